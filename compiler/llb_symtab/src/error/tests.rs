use super::*;

#[test]
fn test_to_u32_in_range() {
    assert_eq!(to_u32(0, "nodes"), Ok(0));
    assert_eq!(to_u32(u32::MAX as usize, "nodes"), Ok(u32::MAX));
}

#[test]
#[cfg(target_pointer_width = "64")]
fn test_to_u32_overflow() {
    let len = u32::MAX as usize + 1;
    assert_eq!(
        to_u32(len, "chunk offsets"),
        Err(SymtabError::CapacityOverflow {
            what: "chunk offsets",
            len
        })
    );
}

#[test]
fn test_display_messages() {
    let err = SymtabError::ChunkAllocation { requested: 20_000 };
    assert_eq!(
        err.to_string(),
        "string arena could not allocate a chunk of 20000 bytes"
    );

    let err = SymtabError::CapacityOverflow {
        what: "splay tree nodes",
        len: 16,
    };
    assert_eq!(
        err.to_string(),
        "splay tree nodes exceeded capacity: 16 (0x10), max is 4294967295 (0xFFFFFFFF)"
    );

    assert_eq!(
        SymtabError::ArenaBusy.to_string(),
        "string arena is already locked"
    );
}
