use core::fmt;

use crate::constants::{INV_HASH_LEN, PUBKEY_LEN, TAG_LEN};
use crate::errors::CodecError;

// Fixed-size newtypes prevent misuse
/// 32-byte tag derived from the recipient address; lets peers filter without decrypting.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Tag(pub [u8; TAG_LEN]);

/// Raw 64-byte public key (curve point without its prefix byte).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct PubKey(pub [u8; PUBKEY_LEN]);

/// Inventory identifier of an encoded object.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct InvHash(pub [u8; INV_HASH_LEN]);

impl Default for PubKey {
    fn default() -> Self {
        Self([0u8; PUBKEY_LEN])
    }
}

// Exact-sized decode helpers
macro_rules! impl_tryfrom_slice {
    ($t:ty, $len:expr, $name:literal) => {
        impl TryFrom<&[u8]> for $t {
            type Error = CodecError;
            fn try_from(b: &[u8]) -> Result<Self, Self::Error> {
                if b.len() != $len {
                    return Err(CodecError::format(
                        $name,
                        format!("expected {} bytes, got {}", $len, b.len()),
                    ));
                }
                let mut arr = [0u8; $len];
                arr.copy_from_slice(b);
                Ok(Self(arr))
            }
        }

        impl AsRef<[u8]> for $t {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl fmt::Debug for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}(", $name)?;
                for b in &self.0 {
                    write!(f, "{b:02x}")?;
                }
                write!(f, ")")
            }
        }
    };
}
impl_tryfrom_slice!(Tag, TAG_LEN, "Tag");
impl_tryfrom_slice!(PubKey, PUBKEY_LEN, "PubKey");
impl_tryfrom_slice!(InvHash, INV_HASH_LEN, "InvHash");

/// Fields shared by every object kind, in wire order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ObjectHeader {
    pub nonce: u64,
    /// Seconds since the Unix epoch.
    pub expiration: i64,
    pub object_type: u32,
    pub version: u64,
    pub stream: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tryfrom_rejects_wrong_length() {
        assert!(Tag::try_from(&[0u8; 31][..]).unwrap_err().is_format());
        assert!(PubKey::try_from(&[0u8; 65][..]).unwrap_err().is_format());
        let tag = Tag::try_from(&[7u8; 32][..]).unwrap();
        assert_eq!(tag.0, [7u8; 32]);
    }

    #[test]
    fn debug_renders_hex() {
        let mut raw = [0u8; 32];
        raw[0] = 0xAB;
        let s = format!("{:?}", Tag(raw));
        assert!(s.starts_with("Tag(ab00"));
    }
}
