//! Model to entity conversions

mod user;
