//! Product repository for database operations

use chrono::NaiveDate;
use common::error::DatabaseError;
use sqlx::{Row, SqlitePool};
use tracing::info;

use crate::error::AppResult;
use crate::models::{NewProduct, Product};

/// Product repository
#[derive(Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Create a new product repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new product owned by a user
    pub async fn create(&self, new_product: &NewProduct) -> AppResult<Product> {
        info!(
            "Creating product '{}' for user {}",
            new_product.name, new_product.user_id
        );

        let done = sqlx::query(
            r#"
            INSERT INTO products (name, type, price, expiry_date, user_id)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&new_product.name)
        .bind(&new_product.kind)
        .bind(new_product.price)
        .bind(new_product.expiry_date)
        .bind(new_product.user_id)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(Product {
            id: done.last_insert_rowid(),
            name: new_product.name.clone(),
            kind: new_product.kind.clone(),
            price: new_product.price,
            expiry_date: new_product.expiry_date,
            user_id: new_product.user_id,
        })
    }

    /// List all products owned by a user, ordered by id ascending
    ///
    /// A non-empty search term restricts the result to products whose
    /// name contains it as a substring. SQLite's default LIKE collation
    /// applies, so the match is ASCII case-insensitive.
    pub async fn list_by_owner(&self, owner_id: i64, search: Option<&str>) -> AppResult<Vec<Product>> {
        let rows = match search.filter(|s| !s.is_empty()) {
            Some(term) => {
                sqlx::query(
                    r#"
                    SELECT id, name, type, price, expiry_date, user_id
                    FROM products
                    WHERE user_id = ? AND name LIKE ?
                    ORDER BY id ASC
                    "#,
                )
                .bind(owner_id)
                .bind(format!("%{}%", term))
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT id, name, type, price, expiry_date, user_id
                    FROM products
                    WHERE user_id = ?
                    ORDER BY id ASC
                    "#,
                )
                .bind(owner_id)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(DatabaseError::Query)?;

        Ok(rows.into_iter().map(product_from_row).collect())
    }

    /// Find a product by ID
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Product>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, type, price, expiry_date, user_id
            FROM products
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(row.map(product_from_row))
    }

    /// Overwrite all mutable fields of a product in place
    ///
    /// Id and owner never change. Last write wins; there is no version
    /// check.
    pub async fn update(
        &self,
        id: i64,
        name: &str,
        kind: &str,
        price: f64,
        expiry_date: NaiveDate,
    ) -> AppResult<()> {
        info!("Updating product {}", id);

        sqlx::query(
            r#"
            UPDATE products
            SET name = ?, type = ?, price = ?, expiry_date = ?
            WHERE id = ?
            "#,
        )
        .bind(name)
        .bind(kind)
        .bind(price)
        .bind(expiry_date)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(())
    }

    /// Delete a product permanently, returning whether a row was removed
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        info!("Deleting product {}", id);

        let done = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(done.rows_affected() > 0)
    }
}

fn product_from_row(row: sqlx::sqlite::SqliteRow) -> Product {
    Product {
        id: row.get("id"),
        name: row.get("name"),
        kind: row.get("type"),
        price: row.get("price"),
        expiry_date: row.get("expiry_date"),
        user_id: row.get("user_id"),
    }
}
