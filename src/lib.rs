#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::missing_panics_doc)]

//! Broadcast object codec
//!
//! Parses, validates and produces the three byte layouts of a pseudonymous
//! broadcast object:
//!
//! - wire envelope (proof-of-work framing): `Broadcast::encode` / `Broadcast::decode`
//! - signing layout: `Broadcast::encode_for_signing`
//! - encryption plaintext: `Broadcast::encode_for_encryption` /
//!   `Broadcast::decode_from_decrypted`
//!
//! plus the payload encodings carried in the message body (`format`).
//!
// Fixed choices:
// - Integers: compact-size varints and big-endian fixed fields
// - Tag: 32 bytes, present from version 5
// - Public keys: 64 raw bytes, no length prefix
// - Every declared length capped at 2^18 bytes before allocation
//
// Signature and cipher primitives are plugged in through `crypto_traits`.

// Core modules
pub mod constants;
pub mod errors;
pub mod types;
pub mod ser;
pub mod format;
pub mod broadcast;
pub mod wire;
pub mod signing;
pub mod encryption;
pub mod crypto_traits;
pub mod hashers;

// Re-export commonly used types and functions
pub use broadcast::{has_tag, Broadcast, BroadcastParams};
pub use constants::*;
pub use crypto_traits::{PayloadCipher, SignatureVerifier, Signer};
pub use errors::CodecError;
pub use format::Encoding;
pub use hashers::inventory_hash;
pub use types::{InvHash, ObjectHeader, PubKey, Tag};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
