use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Claims carried by a session token.
///
/// Ephemeral, never persisted: just the user identity and an expiry instant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Identifier of the authenticated user
    pub user_id: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Create claims for a user session expiring after `ttl_hours`.
    pub fn for_user(user_id: Uuid, ttl_hours: i64) -> Self {
        let expiration = Utc::now() + Duration::hours(ttl_hours);

        Self {
            user_id: user_id.to_string(),
            exp: expiration.timestamp(),
        }
    }
}
