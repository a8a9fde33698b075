use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    constants::{OBJECT_TYPE_BROADCAST, TAGGED_BROADCAST_VERSION},
    errors::CodecError,
    format::{self, Encoding},
    types::{ObjectHeader, PubKey, Tag},
};

/// Broadcast object: every field that appears in any of the wire, signing
/// and encryption layouts.
///
/// A wire decode fills the header, `tag` and `encrypted`; a decode of the
/// decrypted plaintext fills the sender fields through `signature`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Broadcast {
    // Wire envelope
    pub nonce: u64,
    pub expiration: i64,
    pub object_type: u32,
    pub version: u64,
    pub stream: u64,
    /// Present iff `version >= 5` on decoded objects.
    pub tag: Option<Tag>,
    pub encrypted: Vec<u8>,

    // Encrypted plaintext
    pub from_address_version: u64,
    pub from_stream: u64,
    pub behavior: u32,
    pub signing_key: PubKey,
    pub encryption_key: PubKey,
    pub nonce_trials: u64,
    pub extra_bytes: u64,
    pub encoding: u64,
    pub message: Vec<u8>,
    pub signature: Vec<u8>,
}

/// Field values for [`Broadcast::new`].
#[derive(Clone, Debug, Default)]
pub struct BroadcastParams {
    pub nonce: u64,
    pub expiration: i64,
    pub version: u64,
    pub stream: u64,
    pub tag: Option<Tag>,
    pub encrypted: Vec<u8>,
    pub from_address_version: u64,
    pub from_stream: u64,
    pub behavior: u32,
    pub signing_key: PubKey,
    pub encryption_key: PubKey,
    pub nonce_trials: u64,
    pub extra_bytes: u64,
    pub encoding: u64,
    pub message: Vec<u8>,
    pub signature: Vec<u8>,
}

/// Whether objects of `version` carry a tag on the wire and in the signed bytes.
#[inline]
#[must_use]
pub const fn has_tag(version: u64) -> bool {
    version >= TAGGED_BROADCAST_VERSION
}

impl Broadcast {
    /// Assemble a broadcast from explicit field values.
    ///
    /// No cross-field validation happens here; a tag supplied for a version
    /// below 5 is kept but never serialized.
    #[must_use]
    pub fn new(p: BroadcastParams) -> Self {
        Self {
            nonce: p.nonce,
            expiration: p.expiration,
            object_type: OBJECT_TYPE_BROADCAST,
            version: p.version,
            stream: p.stream,
            tag: p.tag,
            encrypted: p.encrypted,
            from_address_version: p.from_address_version,
            from_stream: p.from_stream,
            behavior: p.behavior,
            signing_key: p.signing_key,
            encryption_key: p.encryption_key,
            nonce_trials: p.nonce_trials,
            extra_bytes: p.extra_bytes,
            encoding: p.encoding,
            message: p.message,
            signature: p.signature,
        }
    }

    #[must_use]
    pub const fn header(&self) -> ObjectHeader {
        ObjectHeader {
            nonce: self.nonce,
            expiration: self.expiration,
            object_type: self.object_type,
            version: self.version,
            stream: self.stream,
        }
    }

    /// Copy header fields known from the wire envelope onto this object.
    pub fn set_header(&mut self, h: ObjectHeader) {
        self.nonce = h.nonce;
        self.expiration = h.expiration;
        self.object_type = h.object_type;
        self.version = h.version;
        self.stream = h.stream;
    }

    /// Tag as serialized: only for tagged versions.
    pub(crate) const fn wire_tag(&self) -> Option<&Tag> {
        if has_tag(self.version) {
            self.tag.as_ref()
        } else {
            None
        }
    }

    /// Parse `message` under `encoding`.
    ///
    /// # Errors
    /// Unsupported encoding code or text that does not fit it.
    pub fn payload(&self) -> Result<Encoding, CodecError> {
        format::read(self.encoding, &self.message)
    }

    /// Store an encoding's code and message bytes.
    pub fn set_payload(&mut self, enc: &Encoding) {
        self.encoding = enc.code();
        self.message = enc.message().into_owned();
    }

    /// Check the expiration against `current_time` (seconds), or the system clock.
    #[must_use]
    pub fn is_expired(&self, current_time: Option<i64>) -> bool {
        let now = current_time.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
        });
        now > self.expiration
    }
}

impl fmt::Display for Broadcast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "broadcast: v{} {} {} {} ",
            self.version, self.nonce, self.expiration, self.stream
        )?;
        match self.wire_tag() {
            Some(tag) => {
                for b in &tag.0 {
                    write!(f, "{b:02x}")?;
                }
            }
            None => f.write_str("-")?,
        }
        write!(f, " {} encrypted bytes", self.encrypted.len())
    }
}
