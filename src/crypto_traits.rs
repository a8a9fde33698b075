use crate::{errors::CodecError, types::PubKey};

/// Produces the sender's signature over the signing layout.
pub trait Signer {
    /// Sign an arbitrary byte sequence.
    ///
    /// # Errors
    /// Returns `CodecError::Crypto` if the underlying primitive fails.
    fn sign(&self, msg: &[u8]) -> Result<Vec<u8>, CodecError>;
}

/// Checks a signature under the sender's advertised signing key.
pub trait SignatureVerifier {
    /// Return true if (and only if) `signature` is valid for `msg` under `signing_key`.
    fn verify(&self, signing_key: &PubKey, msg: &[u8], signature: &[u8]) -> bool;
}

/// Symmetric layer over the encryption plaintext. Key material (derived from
/// the tag or address) lives inside the implementation.
pub trait PayloadCipher {
    /// # Errors
    /// Returns `CodecError::Crypto` if encryption fails.
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CodecError>;

    /// # Errors
    /// Returns `CodecError::Crypto` if the ciphertext does not open.
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CodecError>;
}
