use super::*;
use pretty_assertions::assert_eq;

fn scan(source: &str) -> Vec<Lexeme<'_>> {
    Scanner::new(source)
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| panic!("{e} at {}", e.context()))
}

fn idents(source: &str) -> Vec<&str> {
    scan(source)
        .into_iter()
        .filter_map(|lexeme| match lexeme.word {
            Word::Ident(text) => Some(text),
            Word::Declarator(_) => None,
        })
        .collect()
}

#[test]
fn test_identifiers_and_lines() {
    let lexemes = scan("x = 1\nPlayerName$ = \"Bob\"\n");
    assert_eq!(
        lexemes,
        vec![
            Lexeme {
                word: Word::Ident("x"),
                line: 1
            },
            Lexeme {
                word: Word::Ident("PlayerName"),
                line: 2
            },
        ]
    );
}

#[test]
fn test_keywords_skipped_case_insensitively() {
    assert_eq!(idents("If a Then b Else c EndIf"), vec!["a", "b", "c"]);
    assert_eq!(idents("while WEND wEnD"), Vec::<&str>::new());
}

#[test]
fn test_declarators() {
    let words: Vec<Word<'_>> = scan("Local a\nglobal B\nFUNCTION f()\nType T")
        .into_iter()
        .map(|l| l.word)
        .collect();
    assert_eq!(
        words,
        vec![
            Word::Declarator(SymbolKind::Local),
            Word::Ident("a"),
            Word::Declarator(SymbolKind::Global),
            Word::Ident("B"),
            Word::Declarator(SymbolKind::Function),
            Word::Ident("f"),
            Word::Declarator(SymbolKind::Type),
            Word::Ident("T"),
        ]
    );
}

#[test]
fn test_end_closes_blocks() {
    let words: Vec<Word<'_>> = scan("Function f()\nEnd Function\nx = 1\nEND TYPE\nType t")
        .into_iter()
        .map(|l| l.word)
        .collect();
    assert_eq!(
        words,
        vec![
            Word::Declarator(SymbolKind::Function),
            Word::Ident("f"),
            Word::Ident("x"),
            Word::Declarator(SymbolKind::Type),
            Word::Ident("t"),
        ]
    );
}

#[test]
fn test_comments_skipped() {
    assert_eq!(idents("a ; b c d\ne"), vec!["a", "e"]);
}

#[test]
fn test_strings_skipped() {
    assert_eq!(idents("Print \"hello world\" + name"), vec!["Print", "name"]);
}

#[test]
fn test_numbers_skipped() {
    assert_eq!(idents("x = 12 + 3.5 * .25"), vec!["x"]);
    // A number glued to letters splits the way the lexer splits it.
    assert_eq!(idents("12abc"), vec!["abc"]);
}

#[test]
fn test_sigils_and_punctuation() {
    assert_eq!(
        idents("speed# = dist% / time#(1, 2)\\hp"),
        vec!["speed", "dist", "time", "hp"]
    );
    // `Field` is reserved even after a member access.
    assert_eq!(idents("p\\field"), vec!["p"]);
}

#[test]
fn test_unterminated_string() {
    let result: Result<Vec<_>, _> = Scanner::new("a = 1\nb = \"oops\nc").collect();
    let err = result.err().unwrap_or_else(|| panic!("expected error"));
    assert_eq!(err, ScanError::UnterminatedString { line: 2 });
    assert_eq!(err.to_string(), "unterminated string literal");
    assert_eq!(err.context(), "line 2");
}

#[test]
fn test_unterminated_string_stops_scanning() {
    let items: Vec<_> = Scanner::new("\"open\nnext").collect();
    assert_eq!(items.len(), 1);
    assert!(items[0].is_err());
}

#[test]
fn test_illegal_character() {
    let items: Vec<_> = Scanner::new("ok\n  @bad").collect();
    assert_eq!(
        items,
        vec![
            Ok(Lexeme {
                word: Word::Ident("ok"),
                line: 1
            }),
            Err(ScanError::IllegalCharacter {
                ch: '@',
                line: 2,
                column: 3
            }),
            Ok(Lexeme {
                word: Word::Ident("bad"),
                line: 2
            }),
        ]
    );
    assert_eq!(items[1].clone().err().map(|e| e.context()), Some("2:3".to_string()));
}

#[test]
fn test_unicode_identifiers() {
    assert_eq!(idents("Größe = 1"), vec!["Größe"]);
}
