//! Data models for the tracker service

pub mod product;
pub mod user;

pub use product::{NewProduct, Product, ProductForm, ProductView};
pub use user::{Credentials, NewUser, User};
