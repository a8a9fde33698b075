//! Protocol constants (network-wide, not negotiable per peer).

/// Object type carried by every broadcast object.
pub const OBJECT_TYPE_BROADCAST: u32 = 3;

/// First broadcast version whose wire envelope carries a tag.
pub const TAGGED_BROADCAST_VERSION: u64 = 5;

/// Maximum size of an object payload; caps every declared length.
pub const MAX_PAYLOAD_OF_MSG_OBJECT: usize = 1 << 18; // 262,144

pub const TAG_LEN: usize = 32;
pub const PUBKEY_LEN: usize = 64;
pub const INV_HASH_LEN: usize = 32;

/// nonce(8) + expiration(8) + object type(4) + one-byte version + one-byte stream
pub const OBJECT_HEADER_MIN_LEN: usize = 8 + 8 + 4 + 1 + 1;

/// Largest compact-size integer: 0xFF prefix + 8 bytes.
pub const MAX_VAR_INT_SIZE: usize = 9;

pub const ENCODING_PLAIN: u64 = 1;
pub const ENCODING_SUBJECT_BODY: u64 = 2;
