//! Chunked bump storage for canonical names.
//!
//! Strings are appended to the active chunk until it runs out of room, then a
//! fresh chunk opens. A chunk's buffer is reserved once at its full size and
//! never grows, so every [`StrId`] handed out keeps resolving to the same
//! bytes. Only the chunk index (`Vec<String>`) ever reallocates.
//!
//! Nothing is freed individually. The one exception is
//! [`StringArena::try_reclaim_tail`], which gives back the most recent
//! allocation if it still sits at the end of the active chunk. The symbol
//! table uses it to drop the lowercase trial copy of a name it already knows.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::error::to_u32;
use crate::fatal;
use crate::SymtabError;

/// Byte filler for blank allocations.
const FILL: char = ' ';

/// Sizing for a [`StringArena`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Bytes reserved per chunk. Longer strings get a chunk of their own size.
    pub chunk_size: usize,
    /// How many chunk slots the index grows by when it fills up.
    pub chunk_index_step: usize,
}

impl ArenaConfig {
    pub const DEFAULT_CHUNK_SIZE: usize = 20_000;
    pub const DEFAULT_CHUNK_INDEX_STEP: usize = 100;
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            chunk_size: Self::DEFAULT_CHUNK_SIZE,
            chunk_index_step: Self::DEFAULT_CHUNK_INDEX_STEP,
        }
    }
}

/// Handle to a string stored in a [`StringArena`].
///
/// Resolving a handle against any arena other than the one that produced it
/// is a logic error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct StrId {
    chunk: u32,
    start: u32,
    len: u32,
}

impl StrId {
    /// Index of the chunk holding the string.
    #[inline]
    pub const fn chunk(self) -> usize {
        self.chunk as usize
    }

    /// Byte offset of the string within its chunk.
    #[inline]
    pub const fn start(self) -> usize {
        self.start as usize
    }

    /// Length in bytes.
    #[inline]
    pub const fn len(self) -> usize {
        self.len as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }

    #[inline]
    const fn end(self) -> usize {
        self.start() + self.len()
    }
}

/// Bump allocator over fixed-capacity string chunks.
pub struct StringArena {
    /// The last chunk is the active one.
    chunks: Vec<String>,
    config: ArenaConfig,
    /// Most recent allocation, cleared once reclaimed.
    last: Option<StrId>,
    /// Allocations currently held (reclaimed ones excluded).
    allocations: usize,
}

impl StringArena {
    /// Create an empty arena with default sizing. No chunk is reserved until
    /// the first allocation.
    pub fn new() -> Self {
        Self::with_config(ArenaConfig::default())
    }

    pub fn with_config(config: ArenaConfig) -> Self {
        Self {
            chunks: Vec::new(),
            config: ArenaConfig {
                chunk_size: config.chunk_size.max(1),
                chunk_index_step: config.chunk_index_step.max(1),
            },
            last: None,
            allocations: 0,
        }
    }

    /// Allocate a blank string of `len` bytes, filled with spaces.
    ///
    /// Use [`StringArena::fill`] to write the real content.
    pub fn try_alloc(&mut self, len: usize) -> Result<StrId, SymtabError> {
        self.alloc_with(len, |chunk| chunk.extend(std::iter::repeat(FILL).take(len)))
    }

    /// Infallible [`StringArena::try_alloc`]; exhaustion is fatal.
    pub fn alloc(&mut self, len: usize) -> StrId {
        self.try_alloc(len)
            .unwrap_or_else(|e| fatal::table_failure(&e, "string arena"))
    }

    /// Copy `s` into the arena verbatim.
    pub fn try_alloc_str(&mut self, s: &str) -> Result<StrId, SymtabError> {
        self.alloc_with(s.len(), |chunk| chunk.push_str(s))
    }

    /// Infallible [`StringArena::try_alloc_str`]; exhaustion is fatal.
    pub fn alloc_str(&mut self, s: &str) -> StrId {
        self.try_alloc_str(s)
            .unwrap_or_else(|e| fatal::table_failure(&e, "string arena"))
    }

    /// Copy `s` into the arena with ASCII letters lowercased.
    ///
    /// This is the canonical form of an identifier. Non-ASCII characters are
    /// copied unchanged, so the byte length always equals `s.len()`.
    pub fn try_alloc_lowercase(&mut self, s: &str) -> Result<StrId, SymtabError> {
        self.alloc_with(s.len(), |chunk| {
            chunk.extend(s.chars().map(|c| c.to_ascii_lowercase()));
        })
    }

    /// Infallible [`StringArena::try_alloc_lowercase`]; exhaustion is fatal.
    pub fn alloc_lowercase(&mut self, s: &str) -> StrId {
        self.try_alloc_lowercase(s)
            .unwrap_or_else(|e| fatal::table_failure(&e, "string arena"))
    }

    /// Overwrite a string in place.
    ///
    /// `content` is written from the start of the allocation and the rest is
    /// padded with spaces. Content longer than the allocation is rejected and
    /// leaves the string untouched.
    pub fn fill(&mut self, id: StrId, content: &str) -> bool {
        if content.len() > id.len() {
            return false;
        }
        let mut padded = String::with_capacity(id.len());
        padded.push_str(content);
        padded.extend(std::iter::repeat(FILL).take(id.len() - content.len()));
        // Same length in and out, so the chunk buffer is never reallocated.
        self.chunks[id.chunk()].replace_range(id.start()..id.end(), &padded);
        true
    }

    /// Look up the contents of a string.
    #[inline]
    pub fn resolve(&self, id: StrId) -> &str {
        &self.chunks[id.chunk()][id.start()..id.end()]
    }

    /// Give back the most recent allocation if it still ends the active chunk.
    ///
    /// Returns whether the space was reclaimed. Any other handle is left
    /// alone: its bytes stay in the arena until the arena itself is dropped.
    pub fn try_reclaim_tail(&mut self, id: StrId) -> bool {
        if self.last != Some(id) || id.chunk() + 1 != self.chunks.len() {
            return false;
        }
        let Some(active) = self.chunks.last_mut() else {
            return false;
        };
        if id.end() != active.len() {
            return false;
        }
        active.truncate(id.start());
        self.last = None;
        self.allocations -= 1;
        true
    }

    /// Number of chunks opened so far.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Bytes in use in the active chunk.
    pub fn active_chunk_used(&self) -> usize {
        self.chunks.last().map_or(0, String::len)
    }

    /// Number of allocations still held.
    pub fn allocation_count(&self) -> usize {
        self.allocations
    }

    pub fn config(&self) -> ArenaConfig {
        self.config
    }

    /// Reserve room for `len` bytes, let `write` append exactly that many,
    /// and return the handle.
    ///
    /// The handle is narrowed before anything is written, so a failure
    /// leaves the arena as it was.
    fn alloc_with(
        &mut self,
        len: usize,
        write: impl FnOnce(&mut String),
    ) -> Result<StrId, SymtabError> {
        let len32 = to_u32(len, "string lengths")?;
        let chunk_idx = self.active_chunk_with_room(len)?;
        let start = self.chunks[chunk_idx].len();
        let id = StrId {
            chunk: to_u32(chunk_idx, "string arena chunks")?,
            start: to_u32(start, "string arena chunk offsets")?,
            len: len32,
        };

        let chunk = &mut self.chunks[chunk_idx];
        write(chunk);
        debug_assert_eq!(chunk.len(), start + len, "arena write length mismatch");

        self.last = Some(id);
        self.allocations += 1;
        Ok(id)
    }

    fn active_chunk_with_room(&mut self, len: usize) -> Result<usize, SymtabError> {
        if let Some(active) = self.chunks.last() {
            if active.capacity() - active.len() >= len {
                return Ok(self.chunks.len() - 1);
            }
        }
        self.open_chunk(len)
    }

    fn open_chunk(&mut self, len: usize) -> Result<usize, SymtabError> {
        let size = self.config.chunk_size.max(len);
        let mut chunk = String::new();
        chunk
            .try_reserve_exact(size)
            .map_err(|_| SymtabError::ChunkAllocation { requested: size })?;

        if self.chunks.len() == self.chunks.capacity() {
            let wanted = self.chunks.len() + self.config.chunk_index_step;
            self.chunks
                .try_reserve_exact(self.config.chunk_index_step)
                .map_err(|_| SymtabError::ChunkIndexGrowth { chunks: wanted })?;
        }

        self.chunks.push(chunk);
        tracing::debug!(
            chunk = self.chunks.len() - 1,
            size,
            "opened string arena chunk"
        );
        Ok(self.chunks.len() - 1)
    }
}

impl Default for StringArena {
    fn default() -> Self {
        Self::new()
    }
}

/// Arena shared by every symbol table of a compilation.
///
/// Tables hold a clone each; the mutex keeps allocation single-writer so
/// tail reclamation stays correct.
///
/// Lookups hand out owned copies, or borrow the text only for the length of
/// a closure, so no lock outlives the call that took it.
#[derive(Clone)]
pub struct SharedStringArena(Arc<Mutex<StringArena>>);

impl SharedStringArena {
    pub fn new() -> Self {
        Self::from_arena(StringArena::new())
    }

    pub fn with_config(config: ArenaConfig) -> Self {
        Self::from_arena(StringArena::with_config(config))
    }

    pub fn from_arena(arena: StringArena) -> Self {
        SharedStringArena(Arc::new(Mutex::new(arena)))
    }

    /// Lock the arena for a sequence of operations.
    pub fn lock(&self) -> MutexGuard<'_, StringArena> {
        self.0.lock()
    }

    /// Lock the arena unless it is already locked.
    pub fn try_lock(&self) -> Option<MutexGuard<'_, StringArena>> {
        self.0.try_lock()
    }

    /// Copy a string out of the arena.
    pub fn resolve(&self, id: StrId) -> String {
        self.with_str(id, str::to_owned)
    }

    /// Run `f` on a string while holding the arena lock.
    ///
    /// Interning through a table that shares this arena from inside `f`
    /// fails with [`SymtabError::ArenaBusy`].
    pub fn with_str<R>(&self, id: StrId, f: impl FnOnce(&str) -> R) -> R {
        f(self.0.lock().resolve(id))
    }

    /// Whether two handles share the same arena.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for SharedStringArena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
