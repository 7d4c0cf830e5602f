//! Snippets API backend library
//!
//! Exposes the backend modules so the binary and the integration tests
//! build the same router.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
