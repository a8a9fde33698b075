//! Payload encodings for the user-visible message body.
//!
//! Wrapper layout: `code:varint | len:varint | body:len`. Code 1 carries the
//! body verbatim, code 2 carries `"Subject:{subject}\nBody:{body}"`.

use std::borrow::Cow;
use std::io::{Read, Write};
use std::sync::LazyLock as Lazy;

use regex::bytes::Regex;
use tracing::debug;

use crate::{
    constants::{ENCODING_PLAIN, ENCODING_SUBJECT_BODY, MAX_PAYLOAD_OF_MSG_OBJECT},
    errors::CodecError,
    ser::{read_var_bytes, read_var_int, write_var_bytes, write_var_int},
};

// Subject stops at the first newline; body takes everything after "\nBody:".
// Matched over raw bytes; subject and body need not be UTF-8.
static SUBJECT_BODY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u)^Subject:(.*)\nBody:((?s:.*))").expect("subject/body pattern is valid")
});

/// Decoded message body, tagged by its encoding code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Encoding {
    /// Code 1: raw body, no structure.
    Plain { body: Vec<u8> },
    /// Code 2: subject line plus free-form body. Bytes are kept as sent;
    /// they are usually, but not necessarily, UTF-8.
    SubjectBody { subject: Vec<u8>, body: Vec<u8> },
}

type Constructor = fn(&[u8]) -> Result<Encoding, CodecError>;

/// Code → constructor table consulted by [`read`]. New encodings register here.
const REGISTRY: &[(u64, Constructor)] = &[
    (ENCODING_PLAIN, read_plain),
    (ENCODING_SUBJECT_BODY, read_subject_body),
];

fn read_plain(msg: &[u8]) -> Result<Encoding, CodecError> {
    Ok(Encoding::Plain { body: msg.to_vec() })
}

fn read_subject_body(msg: &[u8]) -> Result<Encoding, CodecError> {
    let Some(caps) = SUBJECT_BODY_RE.captures(msg) else {
        debug!(len = msg.len(), "subject/body text does not match");
        return Err(CodecError::format("format::read", "invalid format"));
    };
    Ok(Encoding::SubjectBody {
        subject: caps[1].to_vec(),
        body: caps[2].to_vec(),
    })
}

impl Encoding {
    #[must_use]
    pub fn plain(body: impl Into<Vec<u8>>) -> Self {
        Self::Plain { body: body.into() }
    }

    #[must_use]
    pub fn subject_body(subject: impl Into<Vec<u8>>, body: impl Into<Vec<u8>>) -> Self {
        Self::SubjectBody { subject: subject.into(), body: body.into() }
    }

    /// Numeric code written ahead of the message bytes.
    #[must_use]
    pub const fn code(&self) -> u64 {
        match self {
            Self::Plain { .. } => ENCODING_PLAIN,
            Self::SubjectBody { .. } => ENCODING_SUBJECT_BODY,
        }
    }

    /// Raw message bytes under this encoding.
    #[must_use]
    pub fn message(&self) -> Cow<'_, [u8]> {
        match self {
            Self::Plain { body } => Cow::Borrowed(body),
            Self::SubjectBody { subject, body } => {
                let mut out = Vec::with_capacity(14 + subject.len() + body.len());
                out.extend_from_slice(b"Subject:");
                out.extend_from_slice(subject);
                out.extend_from_slice(b"\nBody:");
                out.extend_from_slice(body);
                Cow::Owned(out)
            }
        }
    }
}

/// Parse `msg` under encoding `code`.
///
/// # Errors
/// "unsupported encoding" for an unregistered code; a format error when the
/// bytes do not fit the selected encoding.
pub fn read(code: u64, msg: &[u8]) -> Result<Encoding, CodecError> {
    let Some((_, construct)) = REGISTRY.iter().find(|(c, _)| *c == code) else {
        debug!(code, "unsupported payload encoding");
        return Err(CodecError::format("format::read", "unsupported encoding"));
    };
    construct(msg)
}

/// Write `code | len | message`.
///
/// # Errors
/// Propagates short writes from `w`.
pub fn encode<W: Write + ?Sized>(w: &mut W, enc: &Encoding) -> Result<(), CodecError> {
    write_var_int(w, enc.code())?;
    write_var_bytes(w, &enc.message())?;
    Ok(())
}

/// Read `code | len | message` and dispatch on the code.
///
/// # Errors
/// Short reads, an oversize declared length (checked before allocating), or
/// any error from [`read`].
pub fn decode<R: Read + ?Sized>(r: &mut R) -> Result<Encoding, CodecError> {
    let code = read_var_int(r)?;
    let msg = read_var_bytes(r, MAX_PAYLOAD_OF_MSG_OBJECT, "format::decode")?;
    read(code, &msg)
}
