//! Repositories for database operations

pub mod product;
pub mod user;

pub use product::ProductRepository;
pub use user::UserRepository;
