use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::errors::ResolveError;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::models::Principal;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Owns credential resolution: the dual-mode lookup (opaque API key vs.
/// signed session token) lives here so that every gate in the HTTP layer
/// shares one resolution path. Stateless per request; the only shared state
/// is the immutable signing secret inside the injected authenticator.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<auth::Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<auth::Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        let password_hash = self
            .authenticator
            .hash_password(&command.password)
            .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            api_key: None,
            role: Role::User,
            created_at: now,
            updated_at: now,
        };

        self.repository.create(user).await
    }

    async fn login(&self, username: &Username, password: &str) -> Result<LoginOutcome, UserError> {
        // An unknown username reads the same as a bad password to the caller.
        let user = self
            .repository
            .find_by_username(username)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        let result = self
            .authenticator
            .login(password, &user.password_hash, user.id.0)
            .map_err(|e| match e {
                auth::AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
                auth::AuthenticationError::Password(err) => {
                    UserError::Unknown(format!("Password verification failed: {}", err))
                }
                auth::AuthenticationError::Token(err) => {
                    UserError::Unknown(format!("Token issuance failed: {}", err))
                }
            })?;

        Ok(LoginOutcome {
            user,
            token: result.access_token,
        })
    }

    async fn resolve_bearer(&self, bearer: &str) -> Result<Principal, ResolveError> {
        // Step 1: exact-match API key lookup. A hit wins immediately, even if
        // the bearer string would also parse as a valid session token.
        match self.repository.find_by_api_key(bearer).await {
            Ok(Some(user)) => return Ok(Principal::from(&user)),
            Ok(None) => {}
            Err(e) => return Err(ResolveError::Internal(e.to_string())),
        }

        // Step 2: treat the bearer string as a signed session token.
        let user_id = match self.authenticator.verify_token(bearer) {
            Ok(id) => UserId(id),
            Err(e) => {
                tracing::debug!(reason = %e, "Bearer string did not verify as a session token");
                return Err(ResolveError::Unauthorized);
            }
        };

        match self.repository.find_by_id(&user_id).await {
            Ok(Some(user)) => Ok(Principal::from(&user)),
            Ok(None) => {
                tracing::debug!(%user_id, "Valid token for a user that no longer exists");
                Err(ResolveError::Unauthorized)
            }
            Err(e) => Err(ResolveError::Internal(e.to_string())),
        }
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn rotate_api_key(&self, id: &UserId) -> Result<String, UserError> {
        let api_key = auth::api_key::generate();
        self.repository.update_api_key(id, &api_key).await?;
        Ok(api_key)
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;
    use uuid::Uuid;

    use super::*;
    use crate::domain::user::models::EmailAddress;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
            async fn find_by_api_key(&self, api_key: &str) -> Result<Option<User>, UserError>;
            async fn update_api_key(&self, id: &UserId, api_key: &str) -> Result<(), UserError>;
        }
    }

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn test_authenticator() -> Arc<auth::Authenticator> {
        Arc::new(auth::Authenticator::new(SECRET))
    }

    fn test_user(id: UserId, username: &str, role: Role) -> User {
        let now = Utc::now();
        User {
            id,
            username: Username::new(username.to_string()).unwrap(),
            email: EmailAddress::new(format!("{}@example.com", username)).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            api_key: None,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create()
            .withf(|user| {
                user.username.as_str() == "alice"
                    && user.password_hash.starts_with("$argon2")
                    && user.password_hash != "pw1"
                    && user.api_key.is_none()
                    && user.role == Role::User
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository), test_authenticator());

        let command = RegisterUserCommand {
            username: Username::new("alice".to_string()).unwrap(),
            email: EmailAddress::new("alice@example.com".to_string()).unwrap(),
            password: "pw1".to_string(),
        };

        let user = service.register(command).await.unwrap();
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_login_success_issues_verifiable_token() {
        let authenticator = test_authenticator();
        let user_id = UserId::new();

        let mut user = test_user(user_id, "alice", Role::User);
        user.password_hash = authenticator.hash_password("pw1").unwrap();

        let mut repository = MockTestUserRepository::new();
        let returned_user = user.clone();
        repository
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));

        let service = UserService::new(Arc::new(repository), Arc::clone(&authenticator));

        let username = Username::new("alice".to_string()).unwrap();
        let outcome = service.login(&username, "pw1").await.unwrap();

        assert_eq!(outcome.user.id, user_id);
        assert_eq!(authenticator.verify_token(&outcome.token).unwrap(), user_id.0);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let authenticator = test_authenticator();
        let mut user = test_user(UserId::new(), "alice", Role::User);
        user.password_hash = authenticator.hash_password("pw1").unwrap();

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = UserService::new(Arc::new(repository), authenticator);

        let username = Username::new("alice".to_string()).unwrap();
        let result = service.login(&username, "wrong").await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_user_reads_as_invalid_credentials() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository), test_authenticator());

        let username = Username::new("ghost".to_string()).unwrap();
        let result = service.login(&username, "pw1").await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_resolve_via_api_key() {
        let user = test_user(UserId::new(), "cli_user", Role::User);
        let expected_id = user.id;

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_api_key()
            .with(eq("a".repeat(64)))
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = UserService::new(Arc::new(repository), test_authenticator());

        let principal = service.resolve_bearer(&"a".repeat(64)).await.unwrap();
        assert_eq!(principal.user_id, expected_id);
    }

    #[tokio::test]
    async fn test_resolve_via_token() {
        let authenticator = test_authenticator();
        let user = test_user(UserId::new(), "web_user", Role::User);
        let user_id = user.id;
        let token = authenticator
            .login(
                "pw1",
                &authenticator.hash_password("pw1").unwrap(),
                user_id.0,
            )
            .unwrap()
            .access_token;

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_api_key()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = UserService::new(Arc::new(repository), authenticator);

        let principal = service.resolve_bearer(&token).await.unwrap();
        assert_eq!(principal.user_id, user_id);
    }

    #[tokio::test]
    async fn test_resolve_api_key_wins_over_valid_token() {
        // The bearer string is a perfectly valid session token for one user
        // but is also stored verbatim as another user's API key. The key
        // lookup runs first and must win.
        let authenticator = test_authenticator();
        let token_user_id = Uuid::new_v4();
        let token = auth::TokenSigner::new(SECRET).issue(token_user_id).unwrap();

        let key_owner = test_user(UserId::new(), "key_owner", Role::Admin);
        let key_owner_id = key_owner.id;
        assert_ne!(key_owner_id.0, token_user_id);

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_api_key()
            .with(eq(token.clone()))
            .times(1)
            .returning(move |_| Ok(Some(key_owner.clone())));
        repository.expect_find_by_id().times(0);

        let service = UserService::new(Arc::new(repository), authenticator);

        let principal = service.resolve_bearer(&token).await.unwrap();
        assert_eq!(principal.user_id, key_owner_id);
    }

    #[tokio::test]
    async fn test_resolve_unknown_bearer_is_unauthorized() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_api_key()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository), test_authenticator());

        let result = service.resolve_bearer("neither-key-nor-token").await;
        assert!(matches!(result, Err(ResolveError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_resolve_valid_token_for_deleted_user_is_unauthorized() {
        let authenticator = test_authenticator();
        let token = auth::TokenSigner::new(SECRET).issue(Uuid::new_v4()).unwrap();

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_api_key()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_find_by_id().times(1).returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository), authenticator);

        let result = service.resolve_bearer(&token).await;
        assert!(matches!(result, Err(ResolveError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_resolve_store_failure_is_internal() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_api_key()
            .times(1)
            .returning(|_| Err(UserError::DatabaseError("connection refused".to_string())));

        let service = UserService::new(Arc::new(repository), test_authenticator());

        let result = service.resolve_bearer("anything").await;
        assert!(matches!(result, Err(ResolveError::Internal(_))));
    }

    #[tokio::test]
    async fn test_rotate_api_key_persists_new_key() {
        let user_id = UserId::new();

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_update_api_key()
            .withf(move |id, key| *id == user_id && key.len() == 64)
            .times(1)
            .returning(|_, _| Ok(()));

        let service = UserService::new(Arc::new(repository), test_authenticator());

        let key = service.rotate_api_key(&user_id).await.unwrap();
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn test_rotate_api_key_unknown_user() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_update_api_key()
            .times(1)
            .returning(|id, _| Err(UserError::NotFound(id.to_string())));

        let service = UserService::new(Arc::new(repository), test_authenticator());

        let result = service.rotate_api_key(&UserId::new()).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }
}
