//! Plaintext handed to the symmetric cipher, and its inverse.
//!
//! `fromAddressVersion:varint | fromStream:varint | behavior:4 |
//! signingKey:64 | encryptionKey:64 | nonceTrials:varint | extraBytes:varint |
//! encoding:varint | msgLen:varint | message | sigLen:varint | signature`

use std::io::{Read, Write};

use tracing::trace;

use crate::{
    broadcast::Broadcast,
    constants::{MAX_PAYLOAD_OF_MSG_OBJECT, PUBKEY_LEN},
    crypto_traits::PayloadCipher,
    errors::CodecError,
    ser::{
        read_array, read_u32_be, read_var_bytes, read_var_int, write_u32_be, write_var_bytes,
        write_var_int,
    },
    types::PubKey,
};

const OP_DECRYPTED: &str = "Broadcast::decode_from_decrypted";

impl Broadcast {
    /// Sender fields through the message bytes; the signature is not included.
    pub(crate) fn encode_sender_fields<W: Write + ?Sized>(
        &self,
        w: &mut W,
    ) -> Result<(), CodecError> {
        write_var_int(w, self.from_address_version)?;
        write_var_int(w, self.from_stream)?;
        write_u32_be(w, self.behavior)?;
        w.write_all(&self.signing_key.0)?;
        w.write_all(&self.encryption_key.0)?;
        write_var_int(w, self.nonce_trials)?;
        write_var_int(w, self.extra_bytes)?;
        write_var_int(w, self.encoding)?;
        write_var_bytes(w, &self.message)?;
        Ok(())
    }

    /// Write the plaintext that gets encrypted into `encrypted`.
    ///
    /// # Errors
    /// Short writes from `w`.
    pub fn encode_for_encryption<W: Write + ?Sized>(&self, w: &mut W) -> Result<(), CodecError> {
        self.encode_sender_fields(w)?;
        write_var_bytes(w, &self.signature)?;
        Ok(())
    }

    /// Fill the plaintext fields from decrypted bytes.
    ///
    /// Header, `tag` and `encrypted` are left untouched. Message and signature
    /// lengths are checked against the object payload cap before their bytes
    /// are read.
    ///
    /// # Errors
    /// Short reads, or `CodecError::TooLong` for an oversize declared length.
    pub fn decode_from_decrypted<R: Read + ?Sized>(&mut self, r: &mut R) -> Result<(), CodecError> {
        self.from_address_version = read_var_int(r)?;
        self.from_stream = read_var_int(r)?;
        self.behavior = read_u32_be(r)?;
        self.signing_key = PubKey(read_array::<PUBKEY_LEN, R>(r)?);
        self.encryption_key = PubKey(read_array::<PUBKEY_LEN, R>(r)?);
        self.nonce_trials = read_var_int(r)?;
        self.extra_bytes = read_var_int(r)?;
        self.encoding = read_var_int(r)?;
        self.message = read_var_bytes(r, MAX_PAYLOAD_OF_MSG_OBJECT, OP_DECRYPTED)?;
        self.signature = read_var_bytes(r, MAX_PAYLOAD_OF_MSG_OBJECT, OP_DECRYPTED)?;
        trace!(
            from_address_version = self.from_address_version,
            message = self.message.len(),
            signature = self.signature.len(),
            "decoded broadcast plaintext"
        );
        Ok(())
    }

    /// # Errors
    /// See [`Broadcast::encode_for_encryption`].
    pub fn encryption_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let mut out =
            Vec::with_capacity(2 * PUBKEY_LEN + self.message.len() + self.signature.len() + 32);
        self.encode_for_encryption(&mut out)?;
        Ok(out)
    }

    /// Encrypt the plaintext layout and store the ciphertext in `encrypted`.
    ///
    /// # Errors
    /// Propagates cipher failures.
    pub fn encrypt(&mut self, cipher: &impl PayloadCipher) -> Result<(), CodecError> {
        let plaintext = self.encryption_bytes()?;
        self.encrypted = cipher.encrypt(&plaintext)?;
        Ok(())
    }

    /// Decrypt `encrypted` and decode the plaintext fields in place.
    ///
    /// # Errors
    /// Cipher failures, or any error from [`Broadcast::decode_from_decrypted`].
    pub fn decrypt(&mut self, cipher: &impl PayloadCipher) -> Result<(), CodecError> {
        let plaintext = cipher.decrypt(&self.encrypted)?;
        self.decode_from_decrypted(&mut plaintext.as_slice())
    }
}
