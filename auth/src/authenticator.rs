use uuid::Uuid;

use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::TokenError;
use crate::token::TokenSigner;

/// Login coordinator combining password verification and token issuance.
///
/// Holds the process-wide signing secret (injected once at construction)
/// so that handlers never touch it directly.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_signer: TokenSigner,
}

/// Result of a successful login.
pub struct AuthenticationResult {
    /// Signed session token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator bound to a signing secret.
    pub fn new(token_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_signer: TokenSigner::new(token_secret),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against a stored digest and issue a session token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `Password` - Stored digest is malformed
    /// * `Token` - Token issuance failed
    pub fn login(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: Uuid,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_signer.issue(user_id)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Verify a session token and return the user id it asserts.
    ///
    /// # Errors
    /// * `TokenError` - Token is malformed, forged, expired, or carries no
    ///   usable subject
    pub fn verify_token(&self, token: &str) -> Result<Uuid, TokenError> {
        self.token_signer.verify(token)
    }
}
