//! # market-service
//!
//! Application layer containing business logic, services, and DTOs.
//!
//! Services borrow a [`ServiceContext`] holding the repositories, the
//! session store, and configuration, and expose the operations the API
//! layer maps onto routes:
//!
//! - [`AuthService`]: registration, email verification, login/logout,
//!   and bearer-token resolution
//! - [`ProfileService`]: self-service profile reads and updates
//! - [`AdminService`]: administrative user management

pub mod dto;
pub mod services;

pub use services::{
    AdminService, AuthService, LogNotifier, ProfileService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult,
};
