//! discharge-core
//!
//! Pure domain types, boundary decoding, endpoint paths and the recovery
//! plan store. No HTTP dependency; this is the shared vocabulary of the
//! discharge companion.

pub mod decode;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod store;
