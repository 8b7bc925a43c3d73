//! discharge-app library root.
//!
//! The views and their state live here so integration tests can drive them
//! without going through the command-line layer.

pub mod config;
pub mod context;
pub mod plans;
pub mod session;
pub mod speech;
pub mod upload;
