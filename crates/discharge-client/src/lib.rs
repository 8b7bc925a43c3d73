//! discharge-client
//!
//! HTTP client for the simplification, speech and recovery plan endpoints.
//! Thin wrapper around `reqwest`; every authenticated call takes the bearer
//! credential explicitly.

pub mod client;
pub mod credential;
pub mod error;
pub mod source;
