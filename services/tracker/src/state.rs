//! Application state shared across handlers

use sqlx::SqlitePool;

use crate::repositories::{ProductRepository, UserRepository};
use crate::session::SessionStore;

/// Application state shared across handlers
///
/// Constructed once in `main` and passed to every handler through the
/// router; there is no global storage handle or login-manager singleton.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub user_repository: UserRepository,
    pub product_repository: ProductRepository,
    pub sessions: SessionStore,
}

impl AppState {
    /// Build the application state on top of a connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            user_repository: UserRepository::new(pool.clone()),
            product_repository: ProductRepository::new(pool.clone()),
            sessions: SessionStore::new(),
            db_pool: pool,
        }
    }
}
