//! Session-token authentication for the admin API.
//!
//! Login exchanges credentials for an opaque token. The middleware resolves
//! the token to a server-side [`Session`] and hands it to handlers as a
//! request extension, so the operator's role always comes from the server.

mod password;
mod session;

pub use password::*;
pub use session::*;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::errors::AppError;
use crate::AppState;

/// Alternative header carrying the session token.
pub const SESSION_HEADER: &str = "x-session-token";

/// Pull the session token from `Authorization: Bearer` or `x-session-token`.
pub fn token_from_headers(headers: &axum::http::HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .or_else(|| headers.get(SESSION_HEADER).and_then(|v| v.to_str().ok()))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Reject requests without a live session; attach the session otherwise.
pub async fn session_auth_layer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = token_from_headers(request.headers()) else {
        return AppError::Unauthorized("Login required".to_string()).into_response();
    };

    match state.sessions.get(&token).await {
        Some(session) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        None => {
            tracing::debug!("Rejected unknown session token");
            AppError::Unauthorized("Session expired or invalid".to_string()).into_response()
        }
    }
}
