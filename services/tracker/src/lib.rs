//! Shelflife tracker service
//!
//! A personal inventory/expiry tracker: users register, log in, and
//! manage their own list of products, each with a name, type, price,
//! and expiry date. Authentication is session-based and deliberately
//! demo-grade: passwords are stored and compared verbatim.

pub mod auth;
pub mod error;
pub mod flash;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod session;
pub mod state;
pub mod validation;
pub mod views;
