//! Collision buckets.
//!
//! A bucket holds every symbol whose name hashes to one key. It starts with
//! room for a single record stored inline, which covers the common case of
//! no collision at all, and doubles whenever it fills.
//!
//! Records are append-only: never reordered, never removed one by one. Slot
//! indices therefore stay valid for the bucket's lifetime.

use smallvec::SmallVec;

use crate::error::to_u32;
use crate::{StringArena, Symbol, SymtabError};

/// Symbols sharing a hash key, in insertion order.
#[derive(Clone, Debug)]
pub struct Bucket {
    symbols: SmallVec<[Symbol; 1]>,
}

impl Bucket {
    /// Factor applied to the capacity when the bucket is full.
    pub const GROWTH_FACTOR: usize = 2;

    /// Empty bucket with capacity for one symbol.
    pub fn new() -> Self {
        Bucket {
            symbols: SmallVec::new(),
        }
    }

    /// Bucket holding `symbol` in slot 0. Never allocates.
    pub fn with_symbol(symbol: Symbol) -> Self {
        let mut symbols = SmallVec::new();
        symbols.push(symbol);
        Bucket { symbols }
    }

    /// Append a symbol and return its slot.
    pub fn try_push(&mut self, symbol: Symbol) -> Result<u32, SymtabError> {
        let slot = to_u32(self.symbols.len(), "bucket slots")?;
        if self.symbols.len() == self.symbols.capacity() {
            let capacity = self.symbols.capacity() * Self::GROWTH_FACTOR;
            self.symbols
                .try_grow(capacity)
                .map_err(|_| SymtabError::BucketGrowth { capacity })?;
        }
        self.symbols.push(symbol);
        Ok(slot)
    }

    /// Slot of the first symbol whose canonical name equals `name` exactly.
    pub fn find(&self, name: &str, arena: &StringArena) -> Option<u32> {
        self.symbols
            .iter()
            .position(|symbol| arena.resolve(symbol.name()) == name)
            // Slots were narrowed on push, so this cannot truncate.
            .and_then(|slot| u32::try_from(slot).ok())
    }

    #[inline]
    pub fn get(&self, slot: u32) -> Option<&Symbol> {
        self.symbols.get(slot as usize)
    }

    #[inline]
    pub fn get_mut(&mut self, slot: u32) -> Option<&mut Symbol> {
        self.symbols.get_mut(slot as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.symbols.capacity()
    }
}

impl Default for Bucket {
    fn default() -> Self {
        Self::new()
    }
}
