use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use crate::domain::user::models::Principal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Issues (or rotates) the caller's long-lived API key. The previous key, if
/// any, stops resolving the moment the new one is stored.
pub async fn issue_api_key(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<ApiSuccess<ApiKeyResponseData>, ApiError> {
    state
        .users
        .rotate_api_key(&principal.user_id)
        .await
        .map_err(ApiError::from)
        .map(|api_key| ApiSuccess::new(StatusCode::CREATED, ApiKeyResponseData { api_key }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiKeyResponseData {
    pub api_key: String,
}
