//! Symbol keys.
//!
//! A name's key is a polynomial rolling hash over its canonical bytes:
//! `key = key * 113 + byte`, wrapping on overflow. Collisions are expected;
//! the table resolves them with collision buckets rather than avoiding them.

/// Splay tree key. Every name in one bucket shares it.
pub type Key = u64;

/// Multiplier of the polynomial hash.
pub const HASH_MULTIPLIER: Key = 113;

/// Maps a canonical name to its tree key.
///
/// Implementations must be deterministic: the same name always yields the
/// same key for the lifetime of a table.
pub trait SymbolHasher {
    fn hash(&self, name: &str) -> Key;
}

/// The default order-sensitive, unseeded polynomial hash.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PolynomialHasher;

impl SymbolHasher for PolynomialHasher {
    #[inline]
    fn hash(&self, name: &str) -> Key {
        name.bytes().fold(0, |key, byte| {
            key.wrapping_mul(HASH_MULTIPLIER)
                .wrapping_add(Key::from(byte))
        })
    }
}

/// Closures work as hashers, which keeps collision stubs short in tests.
impl<F> SymbolHasher for F
where
    F: Fn(&str) -> Key,
{
    #[inline]
    fn hash(&self, name: &str) -> Key {
        self(name)
    }
}

#[cfg(test)]
mod tests;
