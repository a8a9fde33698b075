//! Bytes covered by the sender's signature.
//!
//! The wire header without the nonce, then the plaintext layout without the
//! signature. There is no decoder: verifiers rebuild these bytes from a fully
//! populated object.

use std::io::Write;

use tracing::debug;

use crate::{
    broadcast::Broadcast,
    crypto_traits::{SignatureVerifier, Signer},
    errors::CodecError,
};

impl Broadcast {
    /// Write the signed byte sequence.
    ///
    /// # Errors
    /// Short writes from `w`; a format error if a tagged version has no tag.
    pub fn encode_for_signing<W: Write + ?Sized>(&self, w: &mut W) -> Result<(), CodecError> {
        self.encode_header_tail(w, "Broadcast::encode_for_signing")?;
        self.encode_sender_fields(w)
    }

    /// # Errors
    /// See [`Broadcast::encode_for_signing`].
    pub fn signing_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::new();
        self.encode_for_signing(&mut out)?;
        Ok(out)
    }

    /// Sign the signing layout and store the result in `signature`.
    ///
    /// # Errors
    /// Signer failures, or a missing tag for a tagged version.
    pub fn sign(&mut self, signer: &impl Signer) -> Result<(), CodecError> {
        let msg = self.signing_bytes()?;
        self.signature = signer.sign(&msg)?;
        Ok(())
    }

    /// Check `signature` against the signing layout under `signing_key`.
    ///
    /// # Errors
    /// `CodecError::InvalidSignature` when the verifier rejects it.
    pub fn verify_signature(&self, verifier: &impl SignatureVerifier) -> Result<(), CodecError> {
        let msg = self.signing_bytes()?;
        if verifier.verify(&self.signing_key, &msg, &self.signature) {
            Ok(())
        } else {
            debug!(version = self.version, stream = self.stream, "broadcast signature rejected");
            Err(CodecError::InvalidSignature)
        }
    }
}
