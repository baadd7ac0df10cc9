//! Authentication utilities

mod password;
mod token;

pub use password::{
    hash_password, validate_password_strength, verify_password, verify_password_or_decoy,
    DECOY_PASSWORD_HASH,
};
pub use token::{generate_token, TOKEN_BYTES, TOKEN_LEN};
