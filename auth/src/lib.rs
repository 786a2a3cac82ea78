//! Authentication utilities library
//!
//! Provides the credential infrastructure for the learn platform:
//! - Password hashing (Argon2id)
//! - Session token issuance and verification (HS256)
//! - Opaque API key generation for CLI clients
//! - Login coordination (password check + token issue)
//!
//! The service defines its own authentication ports and adapts these
//! implementations. The signing secret is injected once at construction and
//! never read from the ambient environment inside a component.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::TokenSigner;
//! use uuid::Uuid;
//!
//! let signer = TokenSigner::new(b"secret_key_at_least_32_bytes_long!");
//! let user_id = Uuid::new_v4();
//! let token = signer.issue(user_id).unwrap();
//! assert_eq!(signer.verify(&token).unwrap(), user_id);
//! ```
//!
//! ## Complete Login Flow
//! ```
//! use auth::Authenticator;
//! use uuid::Uuid;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let user_id = Uuid::new_v4();
//! let result = auth.login("password123", &hash, user_id).unwrap();
//!
//! // Resolve token back to the user
//! assert_eq!(auth.verify_token(&result.access_token).unwrap(), user_id);
//! ```

pub mod api_key;
pub mod authenticator;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::SessionClaims;
pub use token::TokenError;
pub use token::TokenSigner;
