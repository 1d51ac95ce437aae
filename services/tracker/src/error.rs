//! Custom error types for the tracker service
//!
//! Expected error kinds recover at the handler boundary into a flash
//! message plus redirect; only unexpected database failures surface as
//! HTTP 500.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use thiserror::Error;

use crate::flash::{Flash, set_flash};
use crate::views;

/// Custom error type for the tracker service
#[derive(Error, Debug)]
pub enum AppError {
    /// No or invalid session on a protected route
    #[error("Authentication required")]
    AuthRequired,

    /// Credentials did not match any user
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Duplicate username at registration
    #[error("Username already taken")]
    UsernameTaken,

    /// Malformed form input; redirects back to the submitting form
    #[error("Invalid input")]
    Validation { flash: Flash, redirect_to: String },

    /// Unknown product id
    #[error("Not found")]
    NotFound,

    /// Ownership mismatch on a product operation
    #[error("Unauthorized access")]
    Unauthorized,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] common::error::DatabaseError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::AuthRequired => Redirect::to("/login").into_response(),
            AppError::InvalidCredentials => flash_redirect(Flash::InvalidCredentials, "/login"),
            AppError::UsernameTaken => flash_redirect(Flash::UsernameTaken, "/register"),
            AppError::Validation { flash, redirect_to } => flash_redirect(flash, &redirect_to),
            AppError::Unauthorized => flash_redirect(Flash::UnauthorizedAccess, "/dashboard"),
            AppError::NotFound => {
                (StatusCode::NOT_FOUND, Html(views::not_found_page())).into_response()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, Html(views::error_page())).into_response()
            }
        }
    }
}

/// Redirect carrying a flash message for the next page load
fn flash_redirect(flash: Flash, to: &str) -> Response {
    (set_flash(CookieJar::new(), flash), Redirect::to(to)).into_response()
}

/// Type alias for handler results
pub type AppResult<T> = Result<T, AppError>;
