//! Product model and related functionality

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Product entity
///
/// Every product is owned by exactly one user; the ownership predicate
/// [`Product::is_owned_by`] is the single check used by edit and delete.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Product category, stored in the `type` column
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    /// Non-negative by convention, unchecked
    pub price: f64,
    pub expiry_date: NaiveDate,
    pub user_id: i64,
}

impl Product {
    /// Ownership predicate shared by edit and delete
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }

    /// Signed number of days until expiry, negative once expired
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        (self.expiry_date - today).num_days()
    }
}

/// New product creation payload
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub kind: String,
    pub price: f64,
    pub expiry_date: NaiveDate,
    pub user_id: i64,
}

/// Raw add/edit form payload
///
/// Price and expiry date arrive as strings and are parsed by the
/// validation module so malformed input becomes a flash message instead
/// of a rejected request body.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductForm {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub price: String,
    pub expiry_date: String,
}

/// Product augmented with its derived days-remaining value at read time
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub days_remaining: i64,
}

impl ProductView {
    pub fn from_product(product: Product, today: NaiveDate) -> Self {
        let days_remaining = product.days_remaining(today);
        Self {
            product,
            days_remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(expiry_date: NaiveDate, user_id: i64) -> Product {
        Product {
            id: 1,
            name: "Milk".to_string(),
            kind: "Dairy".to_string(),
            price: 2.5,
            expiry_date,
            user_id,
        }
    }

    #[test]
    fn test_days_remaining_in_future() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let p = product(today + chrono::Duration::days(5), 1);
        assert_eq!(p.days_remaining(today), 5);
    }

    #[test]
    fn test_days_remaining_expired() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let p = product(today - chrono::Duration::days(3), 1);
        assert_eq!(p.days_remaining(today), -3);
    }

    #[test]
    fn test_days_remaining_today() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let p = product(today, 1);
        assert_eq!(p.days_remaining(today), 0);
    }

    #[test]
    fn test_ownership_predicate() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let p = product(today, 7);
        assert!(p.is_owned_by(7));
        assert!(!p.is_owned_by(8));
    }

    #[test]
    fn test_view_carries_derived_days() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let view = ProductView::from_product(product(today + chrono::Duration::days(2), 1), today);
        assert_eq!(view.days_remaining, 2);
        assert_eq!(view.product.name, "Milk");
    }
}
