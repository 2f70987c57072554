//! llb3d symbol table.
//!
//! Interns identifiers case-insensitively and maps every distinct name to a
//! mutable [`Symbol`] record for the lifetime of one compilation unit.
//!
//! # Layers
//!
//! - [`StringArena`]: chunked bump storage for every canonical name
//! - [`SymbolHasher`]: polynomial key over the canonical bytes
//! - [`Bucket`]: symbols whose names share a key, scanned linearly
//! - [`SplayTree`]: key-ordered self-adjusting tree, one bucket per node
//! - [`SymbolTable`]: case-folds, hashes, finds or creates
//!
//! Tables are independent, but they all draw names from one
//! [`SharedStringArena`] handed to each constructor.
//!
//! ```text
//! let arena = SharedStringArena::new();
//! let mut globals = SymbolTable::new(arena.clone());
//! let id = globals.get_symbol("PlayerX");
//! globals[id].set_kind(SymbolKind::Global);
//! assert_eq!(globals.name(id), "playerx");
//! ```

mod arena;
mod bucket;
mod error;
pub mod fatal;
mod hash;
mod splay;
mod symbol;
mod table;

pub use arena::{ArenaConfig, SharedStringArena, StrId, StringArena};
pub use bucket::Bucket;
pub use error::SymtabError;
pub use hash::{Key, PolynomialHasher, SymbolHasher, HASH_MULTIPLIER};
pub use splay::{NodeId, SplayTree};
pub use symbol::{Symbol, SymbolKind};
pub use table::{SymbolId, SymbolTable, TeardownStats};
