use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    /// Short read or short write from the underlying source or sink.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("{op}: {msg}")]
    Format { op: &'static str, msg: String },

    #[error("{op}: declared length {declared} exceeds max length {max}")]
    TooLong { op: &'static str, declared: u64, max: usize },

    #[error("invalid signature")]
    InvalidSignature,

    #[error("crypto collaborator error: {0}")]
    Crypto(String),
}

impl CodecError {
    #[must_use]
    pub fn format(op: &'static str, msg: impl Into<String>) -> Self {
        Self::Format { op, msg: msg.into() }
    }

    #[must_use]
    pub const fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }

    #[must_use]
    pub const fn is_too_long(&self) -> bool {
        matches!(self, Self::TooLong { .. })
    }

    /// True when the source ran dry before a field was complete.
    #[must_use]
    pub fn is_short_read(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
    }

    /// True when the sink refused to accept every byte of a field.
    #[must_use]
    pub fn is_short_write(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == io::ErrorKind::WriteZero)
    }
}
