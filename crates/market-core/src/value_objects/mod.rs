//! Value objects - immutable types that represent domain concepts

mod role;
mod user_id;

pub use role::{Role, RoleParseError, RoleSet};
pub use user_id::{UserId, UserIdParseError};
