//! Database models mapping to PostgreSQL tables

mod user;

pub use user::UserModel;
