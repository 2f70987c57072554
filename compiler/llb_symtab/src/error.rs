//! Errors raised by the symbol table core.
//!
//! Every variant is a resource failure or a re-entered arena. Duplicate names and hash collisions
//! are ordinary outcomes and never surface here.

use thiserror::Error;

/// A storage request the table could not satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymtabError {
    /// The string arena failed to obtain memory for a new chunk.
    #[error("string arena could not allocate a chunk of {requested} bytes")]
    ChunkAllocation { requested: usize },

    /// The chunk index could not grow to hold another chunk.
    #[error("string arena could not index {chunks} chunks")]
    ChunkIndexGrowth { chunks: usize },

    /// A collision bucket failed to double its capacity.
    #[error("collision bucket could not grow to {capacity} symbols")]
    BucketGrowth { capacity: usize },

    /// The splay tree failed to obtain memory for another node.
    #[error("splay tree could not allocate node {nodes}")]
    NodeAllocation { nodes: usize },

    /// The shared arena was already locked when a table needed it, for
    /// instance by a name borrowed through `with_name` or a held
    /// `SharedStringArena::lock` guard.
    #[error("string arena is already locked")]
    ArenaBusy,

    /// An index no longer fits the 32-bit handle encoding.
    #[error("{what} exceeded capacity: {len} (0x{len:X}), max is {max} (0x{max:X})", max = u32::MAX)]
    CapacityOverflow { what: &'static str, len: usize },
}

/// Narrow a length or offset into a 32-bit handle field.
#[inline]
pub(crate) fn to_u32(len: usize, what: &'static str) -> Result<u32, SymtabError> {
    u32::try_from(len).map_err(|_| SymtabError::CapacityOverflow { what, len })
}

#[cfg(test)]
mod tests;
