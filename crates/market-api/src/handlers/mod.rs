//! Route handlers
//!
//! All HTTP request handlers organized by surface.

pub mod account;
pub mod admin;
pub mod auth;
pub mod health;
