use crate::registry::Prefix;
use thiserror::Error;

/// Amino decoding errors
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("base64 decoding failed:: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("amino decoding failed:: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("amino encoding failed:: {0}")]
    Encode(#[from] prost::EncodeError),

    #[error("value too short for a type prefix:: {0} bytes")]
    TruncatedPrefix(usize),

    #[error("length prefix says {declared} bytes, found {actual}")]
    LengthMismatch { declared: u64, actual: usize },

    #[error("unexpected concrete type:: expected {expected}, got prefix {actual}")]
    UnexpectedType {
        expected: &'static str,
        actual: Prefix,
    },

    #[error("type not registered:: {0}")]
    Unregistered(&'static str),

    #[error("fee parameter not found:: {0}")]
    FeeParamNotFound(String),
}

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

impl From<CodecError> for bncnode_errors::Error {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::FeeParamNotFound(kind) => bncnode_errors::Error::FeeParamNotFound(kind),
            other => bncnode_errors::Error::MalformedPayload(other.to_string()),
        }
    }
}
