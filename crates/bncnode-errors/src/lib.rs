//! Error taxonomy for the bncnode adapter.
//!
//! Every failure surfaced by the node adapter is one of the [`Error`]
//! variants below. Nothing is retried internally; callers decide what a
//! failure means for them. An unfunded account or a missing denom is not a
//! failure at all and never shows up here.

use thiserror::Error;

/// Core error type for node adapter operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The transport could not reach the node
    #[error("transport unavailable:: {0}")]
    TransportUnavailable(String),

    /// The node answered, but with nothing at all
    #[error("response is empty")]
    EmptyResponse,

    /// Status code other than 200 or 204, body kept verbatim
    #[error("http status {status}:: {body}")]
    HttpStatus { status: u16, body: String },

    /// Node-reported JSON-RPC error
    #[error("[{code}]{message}")]
    Rpc { code: i64, message: String },

    /// Envelope carries neither `error` nor `result`
    #[error("response carries neither result nor error")]
    MissingResult,

    /// Bad checksum, wrong human-readable prefix or unparsable address
    #[error("invalid address:: {0}")]
    InvalidAddress(String),

    /// Base64, amino or JSON payload that cannot be decoded
    #[error("malformed payload:: {0}")]
    MalformedPayload(String),

    /// The fee schedule has no entry of the requested kind
    #[error("fee parameter not found:: {0}")]
    FeeParamNotFound(String),

    /// Broadcast committed at height zero, carries the check_tx diagnostic
    #[error("send transaction failed with error:{0}")]
    BroadcastRejected(String),

    /// Operation exposed by the API but deliberately not supported
    #[error("unimplemented:: {0}")]
    Unimplemented(&'static str),
}

impl Error {
    /// Stable numeric code for this error kind
    pub fn code(&self) -> u32 {
        match self {
            Error::TransportUnavailable(_) => codes::TRANSPORT_UNAVAILABLE,
            Error::EmptyResponse => codes::EMPTY_RESPONSE,
            Error::HttpStatus { .. } => codes::HTTP_STATUS,
            Error::Rpc { .. } => codes::RPC,
            Error::MissingResult => codes::MISSING_RESULT,
            Error::InvalidAddress(_) => codes::INVALID_ADDRESS,
            Error::MalformedPayload(_) => codes::MALFORMED_PAYLOAD,
            Error::FeeParamNotFound(_) => codes::FEE_PARAM_NOT_FOUND,
            Error::BroadcastRejected(_) => codes::BROADCAST_REJECTED,
            Error::Unimplemented(_) => codes::UNIMPLEMENTED,
        }
    }

    /// Whether the failure happened before the node produced a usable answer
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::TransportUnavailable(_) | Error::EmptyResponse | Error::HttpStatus { .. }
        )
    }
}

/// Result type alias for node adapter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error codes, one per [`Error`] variant
pub mod codes {
    /// Success
    pub const OK: u32 = 0;
    pub const TRANSPORT_UNAVAILABLE: u32 = 1;
    pub const EMPTY_RESPONSE: u32 = 2;
    pub const HTTP_STATUS: u32 = 3;
    pub const RPC: u32 = 4;
    pub const MISSING_RESULT: u32 = 5;
    pub const INVALID_ADDRESS: u32 = 6;
    pub const MALFORMED_PAYLOAD: u32 = 7;
    pub const FEE_PARAM_NOT_FOUND: u32 = 8;
    pub const BROADCAST_REJECTED: u32 = 9;
    pub const UNIMPLEMENTED: u32 = 10;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpc_error_display() {
        let err = Error::Rpc {
            code: -8,
            message: "Block height out of range".to_string(),
        };
        assert_eq!(err.to_string(), "[-8]Block height out of range");
    }

    #[test]
    fn test_broadcast_rejected_display() {
        let err = Error::BroadcastRejected("{\"code\":65541}".to_string());
        assert_eq!(
            err.to_string(),
            "send transaction failed with error:{\"code\":65541}"
        );
    }

    #[test]
    fn test_error_codes_are_distinct() {
        let errors = vec![
            Error::TransportUnavailable("refused".to_string()),
            Error::EmptyResponse,
            Error::HttpStatus {
                status: 500,
                body: String::new(),
            },
            Error::Rpc {
                code: 1,
                message: String::new(),
            },
            Error::MissingResult,
            Error::InvalidAddress(String::new()),
            Error::MalformedPayload(String::new()),
            Error::FeeParamNotFound(String::new()),
            Error::BroadcastRejected(String::new()),
            Error::Unimplemented("getBlock"),
        ];
        let mut codes: Vec<u32> = errors.iter().map(Error::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
        assert!(!codes.contains(&codes::OK));
    }

    #[test]
    fn test_transport_classification() {
        assert!(Error::EmptyResponse.is_transport());
        assert!(!Error::MissingResult.is_transport());
        assert!(!Error::FeeParamNotFound("transfer".into()).is_transport());
    }
}
