use sha2::{Digest, Sha512};

use crate::{broadcast::Broadcast, constants::INV_HASH_LEN, errors::CodecError, types::InvHash};

/// INV = SHA512( SHA512( encoded object ) )[..32]
#[must_use]
pub fn inventory_hash(encoded: &[u8]) -> InvHash {
    let first = Sha512::digest(encoded);
    let second = Sha512::digest(first);
    let mut out = [0u8; INV_HASH_LEN];
    out.copy_from_slice(&second[..INV_HASH_LEN]);
    InvHash(out)
}

impl Broadcast {
    /// Inventory identifier peers use to announce and request this object.
    ///
    /// # Errors
    /// Any error from [`Broadcast::encode`].
    pub fn inventory_hash(&self) -> Result<InvHash, CodecError> {
        Ok(inventory_hash(&self.to_bytes()?))
    }
}
