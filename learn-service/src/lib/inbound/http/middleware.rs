use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::models::Role;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Authentication gate: resolves the bearer credential and attaches the
/// resulting [`Principal`](crate::domain::user::models::Principal) to the
/// request extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, Response> {
    gate(state, req, next, None).await
}

/// Admin gate: exactly the authentication gate plus a role check, composed
/// over the same resolution path so the two can never diverge in credential
/// semantics.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, Response> {
    gate(state, req, next, Some(Role::Admin)).await
}

async fn gate(
    state: AppState,
    mut req: Request,
    next: Next,
    required_role: Option<Role>,
) -> Result<Response, Response> {
    let bearer =
        extract_bearer(req.headers()).ok_or_else(|| ApiError::Unauthorized.into_response())?;

    let principal = state
        .users
        .resolve_bearer(bearer)
        .await
        .map_err(|e| ApiError::from(e).into_response())?;

    if let Some(required) = required_role {
        if principal.role != required {
            return Err(ApiError::Forbidden.into_response());
        }
    }

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

/// Extract the credential from an `Authorization: Bearer <token>` header.
///
/// The scheme is case-sensitive and separated by a single space; anything
/// else is treated the same as a missing header.
fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;

    if token.is_empty() || token.starts_with(' ') {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_bearer_happy_path() {
        let headers = headers_with("Bearer abc123");
        assert_eq!(extract_bearer(&headers), Some("abc123"));
    }

    #[test]
    fn test_extract_bearer_missing_header() {
        assert_eq!(extract_bearer(&HeaderMap::new()), None);
    }

    #[test]
    fn test_extract_bearer_scheme_is_case_sensitive() {
        assert_eq!(extract_bearer(&headers_with("bearer abc123")), None);
        assert_eq!(extract_bearer(&headers_with("BEARER abc123")), None);
    }

    #[test]
    fn test_extract_bearer_requires_single_space() {
        assert_eq!(extract_bearer(&headers_with("Bearer  abc123")), None);
        assert_eq!(extract_bearer(&headers_with("Bearerabc123")), None);
    }

    #[test]
    fn test_extract_bearer_rejects_empty_token() {
        assert_eq!(extract_bearer(&headers_with("Bearer ")), None);
        assert_eq!(extract_bearer(&headers_with("Bearer")), None);
    }
}
