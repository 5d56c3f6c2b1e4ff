use crate::api::AppState;
use crate::error::AppError;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::debug;

/// User identity established by the auth collaborator, carried as a request
/// extension past the session middleware.
#[derive(Debug, Clone, Copy)]
pub struct SessionUser {
    pub user_id: i64,
}

/// Reject requests without a valid numeric session cookie.
///
/// The upstream auth service sets the cookie at login; this layer only
/// extracts it so handlers can scope queries to the user.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let cookie_name = state.config.session.cookie_name.as_str();

    let user_id = request
        .headers()
        .get(header::COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(|raw| session_user_id(raw, cookie_name));

    match user_id {
        Some(user_id) => {
            request.extensions_mut().insert(SessionUser { user_id });
            Ok(next.run(request).await)
        }
        None => {
            debug!("No {} cookie on request", cookie_name);
            Err(AppError::Unauthorized)
        }
    }
}

fn session_user_id(raw_cookies: &str, cookie_name: &str) -> Option<i64> {
    raw_cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .and_then(|(_, value)| value.trim().parse().ok())
}
