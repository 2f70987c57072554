//! The symbol table facade.
//!
//! [`SymbolTable::get_symbol`] is the single way symbols come into being:
//!
//! 1. copy the name into the arena in canonical (lowercase) form
//! 2. hash the copy and search the splay tree for its key
//! 3. scan that node's bucket for the exact canonical name
//! 4. on a hit, try to reclaim the copy and return the existing symbol
//! 5. on a miss, append a new symbol that owns the copy, or insert a new
//!    node whose bucket starts out holding it
//!
//! Lookups are idempotent and case-insensitive: `"Foo"` and `"FOO"` resolve
//! to the same [`SymbolId`]. The accessed node is always the tree root
//! afterwards.

use std::ops::{Index, IndexMut};

use crate::fatal;
use crate::{
    Bucket, Key, NodeId, PolynomialHasher, SharedStringArena, SplayTree, Symbol, SymbolHasher,
    SymtabError,
};

/// Stable handle to a symbol: its tree node and bucket slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SymbolId {
    node: NodeId,
    slot: u32,
}

impl SymbolId {
    pub fn node(self) -> NodeId {
        self.node
    }

    pub fn slot(self) -> u32 {
        self.slot
    }
}

/// What a teardown released.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TeardownStats {
    pub nodes: usize,
    pub symbols: usize,
}

/// Case-insensitive map from identifiers to [`Symbol`] records.
///
/// Names are stored in the [`SharedStringArena`] passed at construction and
/// stay there after the table is gone; only the tree and its buckets belong
/// to the table.
pub struct SymbolTable<H = PolynomialHasher> {
    tree: SplayTree<Bucket>,
    arena: SharedStringArena,
    hasher: H,
    symbols: usize,
}

impl SymbolTable {
    /// Create an empty table drawing names from `arena`.
    pub fn new(arena: SharedStringArena) -> Self {
        Self::with_hasher(arena, PolynomialHasher)
    }
}

impl<H: SymbolHasher> SymbolTable<H> {
    /// Create an empty table with a custom key function.
    pub fn with_hasher(arena: SharedStringArena, hasher: H) -> Self {
        tracing::debug!("created symbol table");
        SymbolTable {
            tree: SplayTree::new(),
            arena,
            hasher,
            symbols: 0,
        }
    }

    /// Return the symbol for `name`, creating it on first sight.
    ///
    /// A new symbol has no classification; set one through
    /// [`SymbolTable::symbol_mut`] or indexing.
    ///
    /// A key seen for the first time gets a node whose bucket already holds
    /// the new symbol, so a failed insert never leaves an empty node behind.
    /// On any error the trial copy is offered back to the arena.
    #[tracing::instrument(level = "trace", skip_all, fields(name = %name))]
    pub fn try_get_symbol(&mut self, name: &str) -> Result<SymbolId, SymtabError> {
        let mut arena = self.arena.try_lock().ok_or(SymtabError::ArenaBusy)?;
        let trial = arena.try_alloc_lowercase(name)?;
        let canonical = arena.resolve(trial);
        let key = self.hasher.hash(canonical);

        let created = match self.tree.search(key) {
            Some(node) => {
                if let Some(slot) = self.tree.value(node).find(canonical, &arena) {
                    let reclaimed = arena.try_reclaim_tail(trial);
                    tracing::trace!(key, reclaimed, "symbol hit");
                    return Ok(SymbolId { node, slot });
                }
                self.tree
                    .value_mut(node)
                    .try_push(Symbol::new(trial))
                    .map(|slot| SymbolId { node, slot })
            }
            None => self
                .tree
                .try_insert(key, Bucket::with_symbol(Symbol::new(trial)))
                .map(|node| SymbolId { node, slot: 0 }),
        };

        match created {
            Ok(id) => {
                self.symbols += 1;
                tracing::trace!(key, slot = id.slot, "symbol created");
                Ok(id)
            }
            Err(e) => {
                arena.try_reclaim_tail(trial);
                Err(e)
            }
        }
    }

    /// Infallible [`SymbolTable::try_get_symbol`]; failure is fatal.
    pub fn get_symbol(&mut self, name: &str) -> SymbolId {
        self.try_get_symbol(name)
            .unwrap_or_else(|e| fatal::table_failure(&e, "symbol table"))
    }

    /// Look up `name` without creating anything.
    ///
    /// A hit still splays its node to the root. The canonical copy made for
    /// the search is always offered back to the arena.
    pub fn try_find(&mut self, name: &str) -> Result<Option<SymbolId>, SymtabError> {
        let mut arena = self.arena.try_lock().ok_or(SymtabError::ArenaBusy)?;
        let trial = arena.try_alloc_lowercase(name)?;
        let canonical = arena.resolve(trial);
        let key = self.hasher.hash(canonical);

        let found = self.tree.search(key).and_then(|node| {
            let slot = self.tree.value(node).find(canonical, &arena)?;
            Some(SymbolId { node, slot })
        });
        arena.try_reclaim_tail(trial);
        Ok(found)
    }

    /// Infallible [`SymbolTable::try_find`]; failure is fatal.
    pub fn find(&mut self, name: &str) -> Option<SymbolId> {
        self.try_find(name)
            .unwrap_or_else(|e| fatal::table_failure(&e, "symbol table"))
    }

    /// The record behind `id`.
    ///
    /// # Panics
    /// Panics if `id` did not come from this table or the table was cleared
    /// since.
    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        match self.tree.value(id.node).get(id.slot) {
            Some(symbol) => symbol,
            None => panic!("stale symbol id {id:?}"),
        }
    }

    /// Mutable access to the record behind `id`, for classification.
    pub fn symbol_mut(&mut self, id: SymbolId) -> &mut Symbol {
        match self.tree.value_mut(id.node).get_mut(id.slot) {
            Some(symbol) => symbol,
            None => panic!("stale symbol id {id:?}"),
        }
    }

    /// Canonical name of a symbol, copied out of the arena.
    pub fn name(&self, id: SymbolId) -> String {
        self.arena.resolve(self.symbol(id).name())
    }

    /// Run `f` on the canonical name without copying it.
    ///
    /// The arena stays locked while `f` runs, so interning through a table
    /// that shares it fails with [`SymtabError::ArenaBusy`] instead of
    /// blocking.
    pub fn with_name<R>(&self, id: SymbolId, f: impl FnOnce(&str) -> R) -> R {
        self.arena.with_str(self.symbol(id).name(), f)
    }

    /// Symbols in ascending key order, insertion order within a bucket.
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> + '_ {
        self.tree.in_order().into_iter().flat_map(move |node| {
            self.tree
                .value(node)
                .iter()
                .zip(0u32..)
                .map(move |(symbol, slot)| (SymbolId { node, slot }, symbol))
        })
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.symbols
    }

    pub fn is_empty(&self) -> bool {
        self.symbols == 0
    }

    /// Number of distinct hash keys, one tree node each.
    pub fn node_count(&self) -> usize {
        self.tree.len()
    }

    /// Key of the most recently accessed node.
    pub fn root_key(&self) -> Option<Key> {
        self.tree.root().map(|node| self.tree.key(node))
    }

    /// The bucket behind a tree node.
    pub fn bucket(&self, node: NodeId) -> &Bucket {
        self.tree.value(node)
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    pub fn arena(&self) -> &SharedStringArena {
        &self.arena
    }

    /// Release every node and bucket, children before parents, leaving an
    /// empty table ready for reuse. Names stay in the arena.
    pub fn clear(&mut self) -> TeardownStats {
        let mut symbols = 0;
        let nodes = self
            .tree
            .drain_post_order(|_, bucket| symbols += bucket.len());
        debug_assert_eq!(symbols, self.symbols, "symbol count drifted");
        self.symbols = 0;

        tracing::debug!(nodes, symbols, "cleared symbol table");
        TeardownStats { nodes, symbols }
    }

    /// Tear the table down at the end of its compilation unit.
    pub fn destroy(mut self) -> TeardownStats {
        let stats = self.clear();
        tracing::debug!("destroyed symbol table");
        stats
    }

    /// Count of nodes whose bucket holds more than one symbol.
    pub fn collision_count(&self) -> usize {
        self.tree
            .in_order()
            .into_iter()
            .filter(|&node| self.tree.value(node).len() > 1)
            .count()
    }
}

impl<H: SymbolHasher> Index<SymbolId> for SymbolTable<H> {
    type Output = Symbol;

    fn index(&self, id: SymbolId) -> &Symbol {
        self.symbol(id)
    }
}

impl<H: SymbolHasher> IndexMut<SymbolId> for SymbolTable<H> {
    fn index_mut(&mut self, id: SymbolId) -> &mut Symbol {
        self.symbol_mut(id)
    }
}
