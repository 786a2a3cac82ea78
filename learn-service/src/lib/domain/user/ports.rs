use async_trait::async_trait;

use crate::domain::user::errors::ResolveError;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::models::Principal;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;

/// Port for user domain service operations, including credential resolution.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user with a hashed password and the default `user` role.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Store operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Verify a username/password pair and issue a session token.
    ///
    /// Unknown username and wrong password are indistinguishable to the
    /// caller: both yield `InvalidCredentials`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Username unknown or password mismatch
    /// * `DatabaseError` - Store operation failed
    async fn login(&self, username: &Username, password: &str) -> Result<LoginOutcome, UserError>;

    /// Resolve a raw bearer string into an authenticated [`Principal`].
    ///
    /// Tries the stored API key by exact match first; an existing key wins
    /// even if the bearer string would also parse as a valid session token.
    /// Otherwise the string is verified as a token and the user is loaded by
    /// the decoded id. Every authentication failure collapses to the
    /// payload-free `Unauthorized`.
    ///
    /// # Errors
    /// * `Unauthorized` - Credential not recognized (any cause)
    /// * `Internal` - Store operation failed
    async fn resolve_bearer(&self, bearer: &str) -> Result<Principal, ResolveError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Store operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Issue a fresh long-lived API key for the user, replacing any previous
    /// key. The old key stops resolving immediately.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Store operation failed
    async fn rotate_api_key(&self, id: &UserId) -> Result<String, UserError>;
}

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier (None if not found).
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by username (None if not found).
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Retrieve user by exact API key match (None if no key matches).
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_api_key(&self, api_key: &str) -> Result<Option<User>, UserError>;

    /// Replace the user's stored API key.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_api_key(&self, id: &UserId, api_key: &str) -> Result<(), UserError>;
}
