use thiserror::Error;

/// Error type for password operations.
///
/// A password mismatch is not an error; `verify` only fails when the stored
/// digest itself cannot be parsed.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),
}
