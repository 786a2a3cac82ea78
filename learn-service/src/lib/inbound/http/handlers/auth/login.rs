use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::user::models::Username;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::Json;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    // A syntactically invalid username cannot belong to any account; treat it
    // like any other bad credential rather than leaking the validation rule.
    let username = Username::new(body.username).map_err(|_| ApiError::Unauthorized)?;

    let outcome = state
        .users
        .login(&username, &body.password)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            token: outcome.token,
            user: LoginUserData {
                id: outcome.user.id.to_string(),
                username: outcome.user.username.as_str().to_string(),
            },
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
    pub user: LoginUserData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginUserData {
    pub id: String,
    pub username: String,
}
