//! Error taxonomy for remote catalog operations
//!
//! Fetch failures are surfaced to the presentation layer through the published
//! snapshot, so the type stays `Clone + PartialEq`; the transport cause is
//! carried as its rendered message.

use thiserror::Error;

/// Errors from the remote catalog fetch path.
///
/// Submission has no structured error: it reports a boolean outcome only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The endpoint URL failed to parse.
    #[error("invalid catalog endpoint URL")]
    InvalidUrl,

    /// The server answered with a status other than 200.
    #[error("unexpected response status {0}")]
    InvalidResponse(u16),

    /// The payload did not decode into the product schema.
    #[error("could not decode catalog payload")]
    InvalidData,

    /// Transport-level failure, wrapping the underlying cause.
    #[error("request failed: {0}")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            RemoteError::InvalidResponse(503).to_string(),
            "unexpected response status 503"
        );
        assert_eq!(
            RemoteError::Unknown("connection reset".to_string()).to_string(),
            "request failed: connection reset"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(RemoteError::InvalidData, RemoteError::InvalidData);
        assert_ne!(
            RemoteError::InvalidResponse(404),
            RemoteError::InvalidResponse(500)
        );
    }
}
