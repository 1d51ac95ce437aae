//! Tracker service routes
//!
//! Every protected handler names [`CurrentUser`] in its signature; the
//! extractor resolves the session cookie and redirects to the login page
//! when there is no live session. Mutating handlers follow the
//! post-redirect-get pattern with a flash message where the outcome needs
//! to be shown.

use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect},
    routing::get,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::auth::{CurrentUser, SESSION_COOKIE};
use crate::error::{AppError, AppResult};
use crate::flash::{Flash, set_flash, take_flash};
use crate::models::{Credentials, NewProduct, NewUser, ProductForm, ProductView};
use crate::state::AppState;
use crate::{validation, views};

/// Dashboard query parameters
#[derive(Deserialize)]
pub struct DashboardQuery {
    pub search: Option<String>,
}

/// Create the router for the tracker service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .route("/register", get(register_page).post(register))
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
        .route("/dashboard", get(dashboard))
        .route("/add", get(add_page).post(add))
        .route("/edit/:id", get(edit_page).post(edit))
        .route("/delete/:id", get(delete))
        .with_state(state)
}

/// The root only redirects to the login page
pub async fn home() -> Redirect {
    Redirect::to("/login")
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let status = match common::database::health_check(&state.db_pool).await {
        Ok(true) => "ok",
        _ => "degraded",
    };
    Json(json!({
        "status": status,
        "service": "tracker",
    }))
}

/// Registration form
pub async fn register_page(jar: CookieJar) -> impl IntoResponse {
    let (jar, flash) = take_flash(jar);
    (jar, Html(views::register_page(flash)))
}

/// Create a user from the registration form
pub async fn register(
    State(state): State<AppState>,
    Form(payload): Form<Credentials>,
) -> AppResult<impl IntoResponse> {
    info!("Registration attempt for user: {}", payload.username);

    validation::validate_username(&payload.username).map_err(|flash| AppError::Validation {
        flash,
        redirect_to: "/register".to_string(),
    })?;
    validation::validate_password(&payload.password).map_err(|flash| AppError::Validation {
        flash,
        redirect_to: "/register".to_string(),
    })?;

    state
        .user_repository
        .create(&NewUser {
            username: payload.username,
            password: payload.password,
        })
        .await?;

    Ok((
        set_flash(CookieJar::new(), Flash::RegistrationSuccessful),
        Redirect::to("/login"),
    ))
}

/// Login form
pub async fn login_page(jar: CookieJar) -> impl IntoResponse {
    let (jar, flash) = take_flash(jar);
    (jar, Html(views::login_page(flash)))
}

/// Authenticate and establish a session
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(payload): Form<Credentials>,
) -> AppResult<impl IntoResponse> {
    info!("Login attempt for user: {}", payload.username);

    let user = state
        .user_repository
        .find_by_credentials(&payload.username, &payload.password)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let token = state.sessions.create_session(user.id).await;
    let jar = jar.add(
        Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .build(),
    );

    Ok((jar, Redirect::to("/dashboard")))
}

/// Clear the session and return to the login page
pub async fn logout(
    State(state): State<AppState>,
    user: CurrentUser,
    jar: CookieJar,
) -> AppResult<impl IntoResponse> {
    info!("Logout for user: {}", user.id);

    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.delete_session(cookie.value()).await;
    }
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/").build());

    Ok((jar, Redirect::to("/login")))
}

/// List the current user's products with days remaining
pub async fn dashboard(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<DashboardQuery>,
    jar: CookieJar,
) -> AppResult<impl IntoResponse> {
    let search = query.search.unwrap_or_default();
    let products = state
        .product_repository
        .list_by_owner(user.id, Some(search.as_str()))
        .await?;

    let today = Local::now().date_naive();
    let listed: Vec<ProductView> = products
        .into_iter()
        .map(|p| ProductView::from_product(p, today))
        .collect();

    let (jar, flash) = take_flash(jar);
    Ok((jar, Html(views::dashboard_page(&user, &listed, &search, flash))))
}

/// Empty add-product form
pub async fn add_page(_user: CurrentUser, jar: CookieJar) -> impl IntoResponse {
    let (jar, flash) = take_flash(jar);
    (jar, Html(views::add_product_page(flash)))
}

/// Create a product from the add form
pub async fn add(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(payload): Form<ProductForm>,
) -> AppResult<Redirect> {
    let (price, expiry_date) = parse_product_form(&payload, "/add")?;

    state
        .product_repository
        .create(&NewProduct {
            name: payload.name,
            kind: payload.kind,
            price,
            expiry_date,
            user_id: user.id,
        })
        .await?;

    Ok(Redirect::to("/dashboard"))
}

/// Edit form pre-filled with the product's current fields
pub async fn edit_page(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    jar: CookieJar,
) -> AppResult<impl IntoResponse> {
    let product = owned_product(&state, &user, id).await?;

    let (jar, flash) = take_flash(jar);
    Ok((jar, Html(views::edit_product_page(&product, flash))))
}

/// Overwrite a product's mutable fields from the edit form
pub async fn edit(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Form(payload): Form<ProductForm>,
) -> AppResult<Redirect> {
    let product = owned_product(&state, &user, id).await?;
    let (price, expiry_date) = parse_product_form(&payload, &format!("/edit/{}", id))?;

    state
        .product_repository
        .update(product.id, &payload.name, &payload.kind, price, expiry_date)
        .await?;

    Ok(Redirect::to("/dashboard"))
}

/// Delete a product permanently
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Redirect> {
    let product = owned_product(&state, &user, id).await?;
    state.product_repository.delete(product.id).await?;

    Ok(Redirect::to("/dashboard"))
}

/// Load a product and apply the shared ownership check
///
/// Unknown id is NotFound; a foreign owner is Unauthorized, which
/// surfaces as a warning flash plus redirect rather than a hard error.
async fn owned_product(
    state: &AppState,
    user: &CurrentUser,
    id: i64,
) -> AppResult<crate::models::Product> {
    let product = state
        .product_repository
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound)?;

    if !product.is_owned_by(user.id) {
        warn!(
            "User {} attempted to access product {} owned by user {}",
            user.id, id, product.user_id
        );
        return Err(AppError::Unauthorized);
    }

    Ok(product)
}

/// Parse the price and expiry date fields of an add/edit form
fn parse_product_form(
    payload: &ProductForm,
    redirect_to: &str,
) -> Result<(f64, chrono::NaiveDate), AppError> {
    let price = validation::parse_price(&payload.price).map_err(|flash| AppError::Validation {
        flash,
        redirect_to: redirect_to.to_string(),
    })?;
    let expiry_date =
        validation::parse_expiry_date(&payload.expiry_date).map_err(|flash| AppError::Validation {
            flash,
            redirect_to: redirect_to.to_string(),
        })?;
    Ok((price, expiry_date))
}
