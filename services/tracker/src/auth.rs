//! Session-cookie resolution for protected routes
//!
//! [`CurrentUser`] is the capability object handlers receive for the
//! logged-in user. Every protected handler names it in its signature,
//! so session resolution is explicit rather than ambient; a missing or
//! stale session rejects with a redirect to the login page.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;

use crate::error::AppError;
use crate::state::AppState;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session";

/// The authenticated user behind the current request
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::AuthRequired)?;

        let token = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or(AppError::AuthRequired)?;

        let user_id = state
            .sessions
            .resolve_session(&token)
            .await
            .ok_or(AppError::AuthRequired)?;

        // The session store only holds ids of registered users, but the
        // user row is loaded anyway so handlers get a live username.
        let user = state
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::AuthRequired)?;

        Ok(CurrentUser {
            id: user.id,
            username: user.username,
        })
    }
}
