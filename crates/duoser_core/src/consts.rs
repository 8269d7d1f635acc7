//! Shared constants between encoding and decoding logic.

/// Presence byte written before a nullable payload.
pub const OPTION_SOME: u8 = 1;
/// Presence byte for an absent nullable. No payload follows.
pub const OPTION_NONE: u8 = 0;

pub const BOOL_TRUE: u8 = 1;
pub const BOOL_FALSE: u8 = 0;

/// Width of the length prefix for strings, byte payloads and collections.
///
/// Always written little-endian.
pub type LengthPrefix = u32;

/// Upper bound on elements preallocated from a count read off the wire.
///
/// Larger collections still decode, they just grow as they are read.
pub const MAX_PREALLOC_ELEMENTS: usize = 4096;

// field names used for each map entry in the text format:
// [{"key": K, "value": V}, ...]
pub const MAP_ENTRY_KEY: &str = "key";
pub const MAP_ENTRY_VALUE: &str = "value";
