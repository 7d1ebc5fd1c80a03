//! Validated identifier and locator types.
//!
//! These types enforce their invariants at construction time.

mod post_id;
mod service_url;

pub use post_id::PostId;
pub use service_url::ServiceUrl;
