//! Repository implementations backed by PostgreSQL

pub mod error;
mod user;

pub use user::PgUserRepository;
