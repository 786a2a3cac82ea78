use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Serialize;
use serde_json::json;

use crate::domain::content::errors::ContentError;
use crate::domain::content::errors::ContentIdError;
use crate::domain::user::errors::ResolveError;
use crate::domain::user::errors::UserError;
use crate::domain::user::errors::UserIdError;

pub mod auth;
pub mod content;

/// The one message every 401 carries, regardless of why the credential was
/// rejected. Keeping it a single constant is what prevents credential
/// enumeration through response bodies.
pub const UNAUTHORIZED_MESSAGE: &str = "Invalid or missing credentials";

/// JSON body extractor. A body that fails to parse or is missing fields is
/// reported as 400, not axum's default 422, keeping all malformed input on
/// the same path as field-level validation.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Json<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Successful response: a status code and a flat JSON body.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize>(StatusCode, axum::Json<T>);

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, axum::Json(data))
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Transport-level error outcome. This is the only place in the service that
/// maps failures to HTTP status codes.
///
/// `Unauthorized` and `Forbidden` are unit variants: the response text is
/// fixed and no component can smuggle a distinguishing detail into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized,
    Forbidden,
    NotFound(String),
    Conflict(String),
    InternalServerError(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, UNAUTHORIZED_MESSAGE.to_string())
            }
            ApiError::Forbidden => (
                StatusCode::FORBIDDEN,
                "Access denied: admin role required".to_string(),
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::InternalServerError(detail) => {
                // Detail stays server-side; the client gets a generic body.
                tracing::error!(%detail, "Internal error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) | UserError::NotFoundByUsername(_) => {
                ApiError::NotFound(err.to_string())
            }
            UserError::UsernameAlreadyExists(_) | UserError::EmailAlreadyExists(_) => {
                ApiError::Conflict(err.to_string())
            }
            UserError::InvalidCredentials => ApiError::Unauthorized,
            UserError::InvalidUsername(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidUserId(_)
            | UserError::InvalidRole(_) => ApiError::BadRequest(err.to_string()),
            UserError::DatabaseError(_) | UserError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<ContentError> for ApiError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::NotFound(_) => ApiError::NotFound(err.to_string()),
            ContentError::InvalidId(_) => ApiError::BadRequest(err.to_string()),
            ContentError::DatabaseError(_) | ContentError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<ResolveError> for ApiError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::Unauthorized => ApiError::Unauthorized,
            ResolveError::Internal(detail) => ApiError::InternalServerError(detail),
        }
    }
}

impl From<UserIdError> for ApiError {
    fn from(err: UserIdError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<ContentIdError> for ApiError {
    fn from(err: ContentIdError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
