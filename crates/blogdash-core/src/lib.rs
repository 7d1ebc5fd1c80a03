//! blogdash-core - Core post types and the remote service trait.
//!
//! Every backend (HTTP, file) implements [`PostService`], and the analytics
//! view in `blogdash-view` consumes nothing else.

pub mod error;
pub mod post;
pub mod traits;
pub mod types;

pub use error::Error;
pub use post::{Post, UNKNOWN_AUTHOR};
pub use traits::PostService;
pub use types::{PostId, ServiceUrl};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
