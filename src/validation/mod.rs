//! Validation utilities
//!
//! Re-reads a session directory and checks it is complete.

mod session;

pub use session::{validate_session, SessionValidation};
