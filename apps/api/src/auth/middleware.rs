//! Session validation for protected routes.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::warn;
use uuid::Uuid;

use crate::auth::sessions::user_for_token;
use crate::auth::SESSION_COOKIE;
use crate::errors::AppError;
use crate::state::AppState;

/// The authenticated caller, inserted into request extensions by `require_auth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub Uuid);

/// The raw session token of the current request.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

/// Reads the session token from `Authorization: Bearer` or the session cookie.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|c| {
            c.trim()
                .strip_prefix(SESSION_COOKIE)
                .and_then(|rest| rest.strip_prefix('='))
        })
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Rejects the request with 401 unless it carries a live session.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = session_token(req.headers()).ok_or(AppError::Unauthorized)?;

    let user_id = user_for_token(&state.db, &token).await?.ok_or_else(|| {
        warn!("Rejected expired or unknown session token");
        AppError::Unauthorized
    })?;

    req.extensions_mut().insert(AuthUser(user_id));
    req.extensions_mut().insert(SessionToken(token));

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc123"));
        assert_eq!(session_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_cookie_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; session=tok42; other=1"),
        );
        assert_eq!(session_token(&headers).as_deref(), Some("tok42"));
    }

    #[test]
    fn test_similar_cookie_name_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("session_hint=x"));
        assert_eq!(session_token(&headers), None);
    }

    #[test]
    fn test_missing_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert_eq!(session_token(&headers), None);
    }
}
