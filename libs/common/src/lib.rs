//! Common library for the Shelflife application
//!
//! This crate provides the infrastructure shared by the tracker service:
//! SQLite connectivity, schema setup, and error handling.

pub mod database;
pub mod error;
