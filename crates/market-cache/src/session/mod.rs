//! Session storage module.
//!
//! Redis-backed storage for bearer-token sessions.

mod session_store;

pub use session_store::SessionStore;
