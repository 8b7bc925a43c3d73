//! Endpoint path conventions.
//!
//! Pure string constants with no HTTP dependency. These define the paths of the
//! collaborator endpoints relative to the service base URL.

pub const SIMPLIFY: &str = "/api/discharge/simplify";

pub const TEXT_TO_SPEECH: &str = "/api/tts";

pub const RECOVERY_PLANS: &str = "/api/recovery-plans";

/// Multipart part names accepted by the simplification endpoint.
pub mod part {
    pub const FILE: &str = "file";
    pub const TEXT: &str = "text";
}

/// Join a base URL and an endpoint path without doubling the slash.
pub fn url(base: &str, path: &str) -> String {
    format!("{}{path}", base.trim_end_matches('/'))
}
