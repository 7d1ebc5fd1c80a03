//! Persisted CLI settings and connection resolution.

pub mod storage;
mod types;

pub use types::{Resolved, Settings, Source, resolve};

/// Service used when nothing else is configured.
pub const DEFAULT_SERVICE: &str = "http://localhost:3000";

/// Environment override for the service URL.
pub const SERVICE_ENV: &str = "BLOGDASH_SERVICE";

/// Environment override for the request timeout, in seconds.
pub const TIMEOUT_ENV: &str = "BLOGDASH_TIMEOUT_SECS";
