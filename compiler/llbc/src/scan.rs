//! Identifier scanner for Blitz3D source.
//!
//! Produces only what the symbol table cares about: identifiers and the
//! declaration keywords that classify them. Comments (`;` to end of line),
//! string and numeric literals, punctuation, and every other keyword are
//! skipped. Keywords match case-insensitively, like identifiers.

use llb_symtab::SymbolKind;
use thiserror::Error;

/// Reserved words of the language.
const KEYWORDS: &[&str] = &[
    "AFTER", "AND", "BEFORE", "CASE", "CONST", "DATA", "DEFAULT", "DELETE", "DIM", "EACH", "ELSE",
    "ELSEIF", "END", "ENDIF", "EXIT", "FALSE", "FIELD", "FIRST", "FLOAT", "FOR", "FOREVER",
    "FUNCTION", "GLOBAL", "GOSUB", "GOTO", "IF", "INSERT", "INT", "LAST", "LOCAL", "MOD", "NEW",
    "NEXT", "NOT", "NULL", "OR", "PI", "READ", "REPEAT", "RESTORE", "RETURN", "SAR", "SELECT",
    "SHL", "SHR", "STEP", "STR", "THEN", "TO", "TRUE", "TYPE", "UNTIL", "WEND", "WHILE", "XOR",
    "INCLUDE",
];

/// Single-character tokens, type sigils included.
const PUNCTUATION: &str = "#$%(),.\\=+-~^*/<>";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("unterminated string literal")]
    UnterminatedString { line: usize },

    #[error("illegal character '{ch}'")]
    IllegalCharacter { ch: char, line: usize, column: usize },
}

impl ScanError {
    /// Where the error happened, as `line N` or `line:column`.
    pub fn context(&self) -> String {
        match self {
            ScanError::UnterminatedString { line } => format!("line {line}"),
            ScanError::IllegalCharacter { line, column, .. } => format!("{line}:{column}"),
        }
    }
}

/// What the scanner found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Word<'src> {
    /// `Local`, `Global`, `Function` or `Type`: the next identifier is
    /// declared with this kind.
    Declarator(SymbolKind),
    /// A user identifier, in source spelling.
    Ident(&'src str),
}

/// A [`Word`] with its 1-based line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme<'src> {
    pub word: Word<'src>,
    pub line: usize,
}

/// Streaming scanner over a source string.
pub struct Scanner<'src> {
    source: &'src str,
    pos: usize,
    line: usize,
    line_start: usize,
    /// The previous word was `End`, so `End Function` and `End Type` close
    /// a block rather than declare anything.
    after_end: bool,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Scanner {
            source,
            pos: 0,
            line: 1,
            line_start: 0,
            after_end: false,
        }
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn bump(&mut self, c: char) {
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.line_start = self.pos;
        }
    }

    /// Advance while `pred` holds.
    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.bump(c);
        }
    }

    fn column(&self) -> usize {
        self.source[self.line_start..self.pos].chars().count() + 1
    }

    fn string_literal(&mut self) -> Result<(), ScanError> {
        let line = self.line;
        self.bump('"');
        match self.source[self.pos..].find(['"', '\n']) {
            Some(offset) if self.source[self.pos + offset..].starts_with('"') => {
                self.pos += offset + 1;
                Ok(())
            }
            _ => Err(ScanError::UnterminatedString { line }),
        }
    }

    fn number(&mut self) {
        self.eat_while(|c| c.is_ascii_digit());
        if self.peek() == Some('.') {
            self.bump('.');
            self.eat_while(|c| c.is_ascii_digit());
        }
    }

    fn word(&mut self) -> Option<Word<'src>> {
        let source = self.source;
        let start = self.pos;
        self.eat_while(is_word_char);
        let text = &source[start..self.pos];
        let after_end = std::mem::take(&mut self.after_end);
        match keyword(text) {
            Some("END") => {
                self.after_end = true;
                None
            }
            Some(_) if after_end => None,
            Some(kw) => declarator(kw).map(Word::Declarator),
            None => Some(Word::Ident(text)),
        }
    }
}

impl<'src> Iterator for Scanner<'src> {
    type Item = Result<Lexeme<'src>, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(c) = self.peek() {
            let line = self.line;
            match c {
                ';' => self.eat_while(|c| c != '\n'),
                '"' => {
                    if let Err(e) = self.string_literal() {
                        // Nothing after an unterminated literal is trustworthy.
                        self.pos = self.source.len();
                        return Some(Err(e));
                    }
                }
                '.' if self
                    .source
                    .get(self.pos + 1..)
                    .and_then(|rest| rest.chars().next())
                    .is_some_and(|next| next.is_ascii_digit()) =>
                {
                    self.number();
                }
                c if c.is_ascii_digit() => self.number(),
                c if is_word_char(c) => {
                    if let Some(word) = self.word() {
                        return Some(Ok(Lexeme { word, line }));
                    }
                }
                c if c.is_whitespace() || PUNCTUATION.contains(c) => self.bump(c),
                ch => {
                    let err = ScanError::IllegalCharacter {
                        ch,
                        line,
                        column: self.column(),
                    };
                    self.bump(ch);
                    return Some(Err(err));
                }
            }
        }
        None
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// The canonical keyword spelled by `text`, if any.
fn keyword(text: &str) -> Option<&'static str> {
    KEYWORDS
        .iter()
        .copied()
        .find(|kw| kw.eq_ignore_ascii_case(text))
}

fn declarator(keyword: &str) -> Option<SymbolKind> {
    match keyword {
        "LOCAL" => Some(SymbolKind::Local),
        "GLOBAL" => Some(SymbolKind::Global),
        "FUNCTION" => Some(SymbolKind::Function),
        "TYPE" => Some(SymbolKind::Type),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
