use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use uuid::Uuid;

use super::claims::SessionClaims;
use super::errors::TokenError;

/// Session lifetime for issued tokens.
const SESSION_TTL_HOURS: i64 = 24;

/// Issues and verifies compact signed session tokens.
///
/// Binds a user identity to an expiry instant using HS256 (HMAC-SHA256).
/// The secret is injected once at construction and is immutable afterwards;
/// it is never embedded in a token and never logged.
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

/// Decode-side view of the claims. `user_id` is optional so that a token
/// missing the subject can be reported as such rather than as a parse error.
#[derive(Debug, Deserialize)]
struct DecodedClaims {
    #[serde(default)]
    user_id: Option<String>,
    #[allow(dead_code)]
    exp: i64,
}

impl TokenSigner {
    /// Create a new signer bound to a secret key.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a session token for a user, expiring after 24 hours.
    ///
    /// # Errors
    /// * `Signing` - Token encoding failed
    pub fn issue(&self, user_id: Uuid) -> Result<String, TokenError> {
        let claims = SessionClaims::for_user(user_id, SESSION_TTL_HOURS);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a session token and return the user id it asserts.
    ///
    /// A token whose header names any algorithm other than HS256 is rejected
    /// before its signature is checked. Expiry is enforced with zero leeway.
    ///
    /// # Errors
    /// * `Malformed` - Not a parseable token
    /// * `UnexpectedAlgorithm` - Header algorithm is not HS256
    /// * `SignatureInvalid` - Signature does not match the secret
    /// * `Expired` - `exp` is in the past
    /// * `MissingOrInvalidSubject` - `user_id` claim absent or not a UUID
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let token_data = decode::<DecodedClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidAlgorithm => TokenError::UnexpectedAlgorithm,
                ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::MissingRequiredClaim(_) => TokenError::Malformed,
                _ => TokenError::Malformed,
            })?;

        let subject = token_data
            .claims
            .user_id
            .ok_or(TokenError::MissingOrInvalidSubject)?;

        Uuid::parse_str(&subject).map_err(|_| TokenError::MissingOrInvalidSubject)
    }
}
