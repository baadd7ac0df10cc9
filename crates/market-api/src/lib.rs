//! HTTP API layer for the campus marketplace
//!
//! Exposes the REST surface: registration and login, email verification,
//! session handling, profile self-service, role-gated dashboards and the
//! admin user management endpoints. Handlers stay thin and delegate to
//! the service layer.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, run_server};
