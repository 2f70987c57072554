//! Symbol records.

use std::fmt;

use crate::StrId;

/// What a name denotes. The table never sets this; the parser does once it
/// sees the declaration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Local,
    Global,
    Function,
    Type,
}

impl SymbolKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            SymbolKind::Local => "local",
            SymbolKind::Global => "global",
            SymbolKind::Function => "function",
            SymbolKind::Type => "type",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One distinct name in a symbol table.
///
/// Records are created on first lookup with no classification and live until
/// their table is cleared or destroyed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    kind: Option<SymbolKind>,
    name: StrId,
}

impl Symbol {
    pub(crate) fn new(name: StrId) -> Self {
        Symbol { kind: None, name }
    }

    /// Classification, or `None` until the caller assigns one.
    #[inline]
    pub fn kind(&self) -> Option<SymbolKind> {
        self.kind
    }

    #[inline]
    pub fn set_kind(&mut self, kind: SymbolKind) {
        self.kind = Some(kind);
    }

    /// Canonical (lowercase) name in the shared arena.
    #[inline]
    pub fn name(&self) -> StrId {
        self.name
    }
}
