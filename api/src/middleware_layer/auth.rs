//! Bearer-token guard for the protected routes.
//!
//! A request is an authenticated session when it carries
//! `Authorization: Bearer <AUTH_TOKEN>`. The optional `X-Client-Id` header
//! names the caller (a browser tab, a script) for last-request-wins tracking.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::{core::app_state::AppState, error_handler::AppError};

pub const CLIENT_ID_HEADER: &str = "x-client-id";
const ANONYMOUS: &str = "anonymous";

/// Identity of the authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller(pub String);

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    scheme
        .eq_ignore_ascii_case("bearer")
        .then(|| token.trim())
        .filter(|t| !t.is_empty())
}

fn caller_from(headers: &HeaderMap) -> Caller {
    let id = headers
        .get(CLIENT_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(ANONYMOUS);
    Caller(id.to_string())
}

/// Rejects requests without the configured bearer token with 401.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let expected = state.config.auth_token.trim();
    match bearer_token(req.headers()) {
        Some(token) if !expected.is_empty() && token == expected => {}
        _ => {
            debug!(path = %req.uri().path(), "rejecting unauthenticated request");
            return AppError::unauthorized().into_response();
        }
    }

    let caller = caller_from(req.headers());
    req.extensions_mut().insert(caller);
    next.run(req).await
}
