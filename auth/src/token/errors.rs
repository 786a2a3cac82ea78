use thiserror::Error;

/// Error type for session token operations.
///
/// Verification failures are deliberately fine-grained here; the service
/// collapses them into a single undifferentiated outcome before anything
/// reaches a client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    Signing(String),

    #[error("Token is malformed")]
    Malformed,

    #[error("Token uses an unexpected signing algorithm")]
    UnexpectedAlgorithm,

    #[error("Token signature is invalid")]
    SignatureInvalid,

    #[error("Token is expired")]
    Expired,

    #[error("Token subject is missing or invalid")]
    MissingOrInvalidSubject,
}
