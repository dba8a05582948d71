//! Medit API Server Library
//!
//! This library provides the HTTP server for the Medit health-consultation
//! backend: database access, domain models, repositories, handlers and the
//! router.

pub mod app;
pub mod auth;
pub mod database;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod router;

// Re-export the main server function
pub use app::{create_app, start_server, AppState};
