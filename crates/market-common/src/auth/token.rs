//! Opaque token generation
//!
//! Verification tokens and session bearer tokens are random 256-bit values
//! in URL-safe base64. Unpredictability comes from the OS CSPRNG;
//! uniqueness is carried by entropy alone, with no uniqueness constraint
//! in storage.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;

/// Raw entropy per token (256 bits)
pub const TOKEN_BYTES: usize = 32;

/// Encoded token length: 32 bytes in unpadded base64
pub const TOKEN_LEN: usize = 43;

/// Generate an opaque token suitable for email verification links and
/// session bearer credentials
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
