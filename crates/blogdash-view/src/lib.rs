//! blogdash-view - Analytics view state.
//!
//! The view owns one [`RecordStore`] filled from a [`PostService`] and
//! derives two things from it: the per-author [`AuthorBucket`] aggregate for
//! charts and a [`PageView`] slice for the posts table. Both are memoized on
//! the store revision, so page navigation never re-aggregates and a
//! confirmed delete refreshes both.
//!
//! # Example
//!
//! ```no_run
//! use blogdash_core::ServiceUrl;
//! use blogdash_http::HttpPostService;
//! use blogdash_view::{AnalyticsView, ViewConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = HttpPostService::new(ServiceUrl::new("http://localhost:3000")?)?;
//! let view = AnalyticsView::activate(service, ViewConfig::default()).await;
//!
//! for bucket in view.buckets().iter() {
//!     println!("{}: {}", bucket.name, bucket.count);
//! }
//! let page = view.page();
//! println!("page {} of {}", page.state.current_page, page.state.total_pages);
//! # Ok(())
//! # }
//! ```
//!
//! [`PostService`]: blogdash_core::PostService

pub mod aggregate;
pub mod config;
pub mod coordinator;
mod deadline;
pub mod error;
pub mod memo;
pub mod paginate;
pub mod store;
pub mod view;

pub use aggregate::{AuthorBucket, PALETTE, aggregate, color_for};
pub use config::ViewConfig;
pub use coordinator::{DeleteOutcome, EditRequest, MutationCoordinator};
pub use error::ViewError;
pub use memo::Memo;
pub use paginate::{PAGE_SIZE, PageState, Paginator, page_slice, total_pages};
pub use store::{RecordStore, Snapshot};
pub use view::{AnalyticsView, Computations, PageView};
