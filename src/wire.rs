//! Outer transport envelope.
//!
//! `nonce:8 | expiration:8 | objectType:4 | version:varint | stream:varint |
//! [tag:32 if version >= 5] | encrypted:rest`

use std::io::{self, Read, Write};

use tracing::{debug, trace};

use crate::{
    broadcast::{has_tag, Broadcast},
    constants::{MAX_PAYLOAD_OF_MSG_OBJECT, OBJECT_HEADER_MIN_LEN, OBJECT_TYPE_BROADCAST, TAG_LEN},
    errors::CodecError,
    ser::{
        read_array, read_i64_be, read_u32_be, read_u64_be, read_var_int, write_i64_be,
        write_u32_be, write_u64_be, write_var_int,
    },
    types::Tag,
};

impl Broadcast {
    /// Protocol-wide cap on an object payload, independent of any instance.
    #[must_use]
    pub const fn max_payload_length() -> usize {
        MAX_PAYLOAD_OF_MSG_OBJECT
    }

    /// Decode the wire envelope.
    ///
    /// Fills the header, `tag` and `encrypted`; every plaintext field is left
    /// at its default until [`Broadcast::decode_from_decrypted`] runs.
    ///
    /// # Errors
    /// Short reads in the header, a missing tag for version 5+, or an object
    /// type other than broadcast. The ciphertext is never read on failure.
    pub fn decode<R: Read + ?Sized>(r: &mut R) -> Result<Self, CodecError> {
        let nonce = read_u64_be(r)?;
        let expiration = read_i64_be(r)?;
        let object_type = read_u32_be(r)?;
        let version = read_var_int(r)?;
        let stream = read_var_int(r)?;

        let tag = if has_tag(version) {
            match read_array::<TAG_LEN, R>(r) {
                Ok(raw) => Some(Tag(raw)),
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    debug!(version, "tagged broadcast without tag bytes");
                    return Err(CodecError::format(
                        "Broadcast::decode",
                        format!("version {version} broadcast is missing its tag"),
                    ));
                }
                Err(e) => return Err(e.into()),
            }
        } else {
            None
        };

        if object_type != OBJECT_TYPE_BROADCAST {
            debug!(object_type, "object type is not broadcast");
            return Err(CodecError::format(
                "Broadcast::decode",
                format!("object type should be {OBJECT_TYPE_BROADCAST}, but is {object_type}"),
            ));
        }

        let mut encrypted = Vec::new();
        r.read_to_end(&mut encrypted)?;
        trace!(version, stream, encrypted = encrypted.len(), "decoded broadcast envelope");

        Ok(Self {
            nonce,
            expiration,
            object_type,
            version,
            stream,
            tag,
            encrypted,
            ..Self::default()
        })
    }

    /// Encode the wire envelope.
    ///
    /// # Errors
    /// Short writes from `w`; a format error if a tagged version has no tag.
    pub fn encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<(), CodecError> {
        write_u64_be(w, self.nonce)?;
        self.encode_header_tail(w, "Broadcast::encode")?;
        w.write_all(&self.encrypted)?;
        Ok(())
    }

    /// `expiration | objectType | version | stream | [tag]`, shared with the signing layout.
    pub(crate) fn encode_header_tail<W: Write + ?Sized>(
        &self,
        w: &mut W,
        op: &'static str,
    ) -> Result<(), CodecError> {
        write_i64_be(w, self.expiration)?;
        write_u32_be(w, self.object_type)?;
        write_var_int(w, self.version)?;
        write_var_int(w, self.stream)?;
        if has_tag(self.version) {
            let Some(tag) = self.wire_tag() else {
                return Err(CodecError::format(
                    op,
                    format!("version {} broadcast requires a tag", self.version),
                ));
            };
            w.write_all(&tag.0)?;
        }
        Ok(())
    }

    /// # Errors
    /// See [`Broadcast::decode`].
    pub fn from_bytes(mut b: &[u8]) -> Result<Self, CodecError> {
        Self::decode(&mut b)
    }

    /// # Errors
    /// See [`Broadcast::encode`].
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::with_capacity(OBJECT_HEADER_MIN_LEN + TAG_LEN + self.encrypted.len());
        self.encode(&mut out)?;
        Ok(out)
    }
}
