//! User repository for database operations

use common::error::DatabaseError;
use sqlx::{Row, SqlitePool};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{NewUser, User};

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user
    ///
    /// The password is stored verbatim; see the module docs on [`User`].
    /// A duplicate username maps the unique-constraint violation to
    /// [`AppError::UsernameTaken`].
    pub async fn create(&self, new_user: &NewUser) -> AppResult<User> {
        info!("Creating new user: {}", new_user.username);

        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password)
            VALUES (?, ?)
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.password)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(User {
                id: done.last_insert_rowid(),
                username: new_user.username.clone(),
                password: new_user.password.clone(),
            }),
            Err(e) if is_unique_violation(&e) => Err(AppError::UsernameTaken),
            Err(e) => Err(AppError::Database(DatabaseError::Query(e))),
        }
    }

    /// Find a user by exact username and password match
    ///
    /// A miss is indistinguishable between unknown-user and
    /// wrong-password, matching the uniform "invalid credentials"
    /// behavior at the login boundary.
    pub async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> AppResult<Option<User>> {
        info!("Looking up credentials for user: {}", username);

        let row = sqlx::query(
            r#"
            SELECT id, username, password
            FROM users
            WHERE username = ? AND password = ?
            "#,
        )
        .bind(username)
        .bind(password)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(row.map(|row| User {
            id: row.get("id"),
            username: row.get("username"),
            password: row.get("password"),
        }))
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, password
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(row.map(|row| User {
            id: row.get("id"),
            username: row.get("username"),
            password: row.get("password"),
        }))
    }
}

/// Whether a sqlx error is a unique-constraint violation
fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(
        error.as_database_error().map(|e| e.kind()),
        Some(sqlx::error::ErrorKind::UniqueViolation)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::database::{DatabaseConfig, init_pool, run_migrations};

    async fn setup_repository() -> UserRepository {
        let config = DatabaseConfig {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
        };
        let pool = init_pool(&config).await.expect("pool init failed");
        run_migrations(&pool).await.expect("migrations failed");
        UserRepository::new(pool)
    }

    fn new_user(username: &str, password: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_login_with_exact_pair() {
        let repo = setup_repository().await;
        let created = repo.create(&new_user("alice", "pw1")).await.unwrap();
        assert!(created.id > 0);

        let found = repo.find_by_credentials("alice", "pw1").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(created.id));
    }

    #[tokio::test]
    async fn test_login_fails_uniformly() {
        let repo = setup_repository().await;
        repo.create(&new_user("alice", "pw1")).await.unwrap();

        // Wrong password and unknown user both come back empty
        let wrong_password = repo.find_by_credentials("alice", "pw2").await.unwrap();
        let unknown_user = repo.find_by_credentials("bob", "pw1").await.unwrap();
        assert!(wrong_password.is_none());
        assert!(unknown_user.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_a_conflict() {
        let repo = setup_repository().await;
        repo.create(&new_user("alice", "pw1")).await.unwrap();

        let err = repo.create(&new_user("alice", "pw2")).await.unwrap_err();
        assert!(matches!(err, AppError::UsernameTaken));
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let repo = setup_repository().await;
        let created = repo.create(&new_user("alice", "pw1")).await.unwrap();

        let found = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(found.map(|u| u.username), Some("alice".to_string()));

        let missing = repo.find_by_id(created.id + 100).await.unwrap();
        assert!(missing.is_none());
    }
}
