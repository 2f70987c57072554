use super::*;
use pretty_assertions::assert_eq;

fn small_arena(chunk_size: usize) -> StringArena {
    StringArena::with_config(ArenaConfig {
        chunk_size,
        chunk_index_step: 2,
    })
}

#[test]
fn test_first_chunk_is_lazy() {
    let mut arena = StringArena::new();
    assert_eq!(arena.chunk_count(), 0);
    assert_eq!(arena.active_chunk_used(), 0);

    arena.alloc_str("x");
    assert_eq!(arena.chunk_count(), 1);
}

#[test]
fn test_alloc_is_blank() {
    let mut arena = StringArena::new();
    let id = arena.alloc(4);
    assert_eq!(arena.resolve(id), "    ");
    assert_eq!(id.len(), 4);
}

#[test]
fn test_fill_pads_with_spaces() {
    let mut arena = StringArena::new();
    let id = arena.alloc(5);
    assert!(arena.fill(id, "ab"));
    assert_eq!(arena.resolve(id), "ab   ");

    assert!(arena.fill(id, "hello"));
    assert_eq!(arena.resolve(id), "hello");
}

#[test]
fn test_fill_rejects_overlong_content() {
    let mut arena = StringArena::new();
    let id = arena.alloc_str("abc");
    assert!(!arena.fill(id, "abcd"));
    assert_eq!(arena.resolve(id), "abc");
}

#[test]
fn test_fill_leaves_neighbours_alone() {
    let mut arena = StringArena::new();
    let a = arena.alloc_str("left");
    let b = arena.alloc(3);
    let c = arena.alloc_str("right");
    assert!(arena.fill(b, "mid"));
    assert_eq!(arena.resolve(a), "left");
    assert_eq!(arena.resolve(b), "mid");
    assert_eq!(arena.resolve(c), "right");
}

#[test]
fn test_lowercase_copy() {
    let mut arena = StringArena::new();
    let id = arena.alloc_lowercase("PlayerX_2");
    assert_eq!(arena.resolve(id), "playerx_2");
}

#[test]
fn test_lowercase_keeps_non_ascii() {
    let mut arena = StringArena::new();
    let id = arena.alloc_lowercase("ÄBC");
    assert_eq!(arena.resolve(id), "Äbc");
    assert_eq!(id.len(), "ÄBC".len());
}

#[test]
fn test_allocations_are_contiguous() {
    let mut arena = StringArena::new();
    let a = arena.alloc_str("foo");
    let b = arena.alloc_str("barbaz");
    assert_eq!(a.chunk(), b.chunk());
    assert_eq!(b.start(), a.start() + a.len());
    assert_eq!(arena.active_chunk_used(), 9);
}

#[test]
fn test_new_chunk_when_full() {
    let mut arena = small_arena(8);
    let a = arena.alloc_str("abcde");
    let b = arena.alloc_str("fghij");
    assert_eq!(arena.chunk_count(), 2);
    assert_eq!(a.chunk(), 0);
    assert_eq!(b.chunk(), 1);
    assert_eq!(b.start(), 0);
    assert_eq!(arena.resolve(a), "abcde");
    assert_eq!(arena.resolve(b), "fghij");
}

#[test]
fn test_oversized_request_gets_own_chunk() {
    let mut arena = small_arena(4);
    let long = "a_rather_long_identifier";
    let id = arena.alloc_str(long);
    assert_eq!(arena.resolve(id), long);
    assert_eq!(arena.active_chunk_used(), long.len());
}

#[test]
fn test_chunk_index_growth_keeps_strings() {
    let mut arena = small_arena(4);
    let ids: Vec<StrId> = (0..50).map(|i| arena.alloc_str(&format!("s{i:03}"))).collect();
    assert!(arena.chunk_count() > 2);
    for (i, id) in ids.iter().enumerate() {
        assert_eq!(arena.resolve(*id), format!("s{i:03}"));
    }
}

#[test]
fn test_reclaim_most_recent() {
    let mut arena = StringArena::new();
    arena.alloc_str("keep");
    let trial = arena.alloc_str("trial");
    assert_eq!(arena.allocation_count(), 2);

    assert!(arena.try_reclaim_tail(trial));
    assert_eq!(arena.active_chunk_used(), 4);
    assert_eq!(arena.allocation_count(), 1);

    // The freed space is reused by the next allocation.
    let next = arena.alloc_str("next");
    assert_eq!(next.start(), trial.start());
}

#[test]
fn test_reclaim_only_once() {
    let mut arena = StringArena::new();
    let trial = arena.alloc_str("trial");
    assert!(arena.try_reclaim_tail(trial));
    assert!(!arena.try_reclaim_tail(trial));
}

#[test]
fn test_reclaim_earlier_allocation_is_noop() {
    let mut arena = StringArena::new();
    let first = arena.alloc_str("first");
    let second = arena.alloc_str("second");

    assert!(!arena.try_reclaim_tail(first));
    assert_eq!(arena.resolve(first), "first");
    assert_eq!(arena.resolve(second), "second");
    assert_eq!(arena.active_chunk_used(), 11);
}

#[test]
fn test_reclaim_does_not_reach_past_empty_string() {
    let mut arena = StringArena::new();
    let word = arena.alloc_str("abc");
    let empty = arena.alloc_str("");

    // `word` still ends at the tail, but it is not the latest allocation.
    assert!(!arena.try_reclaim_tail(word));
    assert!(arena.try_reclaim_tail(empty));
    assert_eq!(arena.resolve(word), "abc");
}

#[test]
fn test_reclaim_after_chunk_switch_is_noop() {
    let mut arena = small_arena(6);
    let a = arena.alloc_str("abcd");
    let _b = arena.alloc_str("efgh");
    assert_eq!(arena.chunk_count(), 2);
    assert!(!arena.try_reclaim_tail(a));
    assert_eq!(arena.resolve(a), "abcd");
}

#[test]
fn test_zero_chunk_size_is_clamped() {
    let arena = StringArena::with_config(ArenaConfig {
        chunk_size: 0,
        chunk_index_step: 0,
    });
    assert_eq!(arena.config().chunk_size, 1);
    assert_eq!(arena.config().chunk_index_step, 1);
}

#[test]
fn test_shared_arena_resolve() {
    let shared = SharedStringArena::new();
    let id = shared.lock().alloc_str("shared");
    assert_eq!(shared.resolve(id), "shared");
    assert_eq!(shared.with_str(id, str::len), 6);

    let other = shared.clone();
    assert!(shared.ptr_eq(&other));
    assert!(!shared.ptr_eq(&SharedStringArena::new()));
    assert_eq!(other.resolve(id), "shared");
}

#[test]
fn test_shared_arena_try_lock() {
    let shared = SharedStringArena::new();
    let id = shared.lock().alloc_str("busy");
    {
        let _held = shared.lock();
        assert!(shared.try_lock().is_none());
    }
    assert!(shared.try_lock().is_some());
    // The copy is independent of the lock.
    let name = shared.resolve(id);
    assert!(shared.try_lock().is_some());
    assert_eq!(name, "busy");
}

#[test]
#[cfg(target_pointer_width = "64")]
fn test_oversized_string_leaves_arena_untouched() {
    let mut arena = StringArena::new();
    let kept = arena.alloc_str("kept");
    let used = arena.active_chunk_used();

    let len = u32::MAX as usize + 1;
    assert_eq!(
        arena.try_alloc(len),
        Err(SymtabError::CapacityOverflow {
            what: "string lengths",
            len
        })
    );
    assert_eq!(arena.chunk_count(), 1);
    assert_eq!(arena.active_chunk_used(), used);
    assert_eq!(arena.allocation_count(), 1);
    // The earlier allocation is still the reclaimable tail.
    assert!(arena.try_reclaim_tail(kept));
}
