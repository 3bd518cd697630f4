//! Object type codes.
//!
//! These codes are shared with decoders in other runtimes and must never be
//! renumbered.

pub const BYTE: u8 = 1;
pub const SHORT: u8 = 2;
pub const INT: u8 = 3;
pub const LONG: u8 = 4;
pub const FLOAT: u8 = 5;
pub const DOUBLE: u8 = 6;
pub const CHAR: u8 = 7;
pub const BOOL: u8 = 8;
pub const STRING: u8 = 9;
pub const BYTE_ARR: u8 = 12;
pub const COL: u8 = 24;
pub const MAP: u8 = 25;
pub const NULL: u8 = 101;

/// Collection kinds accepted after a [`COL`] header.
pub const COL_USER_SET: i8 = -1;
pub const COL_USER: i8 = 0;
/// Kind written for every encoded collection.
pub const COL_ARRAY_LIST: i8 = 1;
pub const COL_LINKED_LIST: i8 = 2;
pub const COL_HASH_SET: i8 = 3;
pub const COL_LINKED_HASH_SET: i8 = 4;

/// Map kinds accepted after a [`MAP`] header.
pub const MAP_USER: i8 = 0;
pub const MAP_HASH_MAP: i8 = 1;
/// Kind written for every encoded map; insertion order is significant.
pub const MAP_LINKED_HASH_MAP: i8 = 2;

/// Returns a human-readable name for a type code.
pub fn type_name(code: u8) -> &'static str {
    match code {
        BYTE => "byte",
        SHORT => "short",
        INT => "int",
        LONG => "long",
        FLOAT => "float",
        DOUBLE => "double",
        CHAR => "char",
        BOOL => "bool",
        STRING => "string",
        BYTE_ARR => "byte[]",
        COL => "collection",
        MAP => "map",
        NULL => "null",
        _ => "unknown",
    }
}

/// Returns true if `kind` is a collection kind the reader accepts.
pub fn is_known_collection_kind(kind: i8) -> bool {
    (COL_USER_SET..=COL_LINKED_HASH_SET).contains(&kind)
}

/// Returns true if `kind` is a map kind the reader accepts.
pub fn is_known_map_kind(kind: i8) -> bool {
    (MAP_USER..=MAP_LINKED_HASH_MAP).contains(&kind)
}
