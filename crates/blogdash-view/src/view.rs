//! The analytics view: one owned state object per activation.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::{debug, instrument};

use blogdash_core::{Post, PostId, PostService};

use crate::aggregate::{AuthorBucket, aggregate};
use crate::config::ViewConfig;
use crate::coordinator::{DeleteOutcome, EditRequest, MutationCoordinator};
use crate::error::ViewError;
use crate::memo::Memo;
use crate::paginate::{PageState, Paginator};
use crate::store::{RecordStore, Snapshot};

/// Rows for the posts table plus the cursor that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub posts: Vec<Post>,
    pub state: PageState,
}

impl PageView {
    /// True when the table should show its "no posts" row.
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

/// How often each derivation has actually been computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Computations {
    pub aggregate: u64,
    pub page: u64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Store, cursor and memoized derivations for one analytics screen.
///
/// Nothing here is global; drop the view to tear it down.
#[derive(Debug)]
pub struct AnalyticsView<S> {
    service: Arc<S>,
    store: RecordStore,
    coordinator: MutationCoordinator<S>,
    config: ViewConfig,
    paginator: Mutex<Paginator>,
    buckets: Mutex<Memo<u64, Vec<AuthorBucket>>>,
    page: Mutex<Memo<(u64, usize), PageView>>,
    last_error: Mutex<Option<String>>,
}

impl<S: PostService> AnalyticsView<S> {
    /// Create an empty, not yet loaded view.
    pub fn new(service: S, config: ViewConfig) -> Self {
        Self::from_shared(Arc::new(service), config)
    }

    /// Create an empty view over a shared service handle.
    pub fn from_shared(service: Arc<S>, config: ViewConfig) -> Self {
        Self {
            coordinator: MutationCoordinator::new(Arc::clone(&service), config.request_timeout),
            service,
            store: RecordStore::new(),
            config,
            paginator: Mutex::new(Paginator::new(config.page_size)),
            buckets: Mutex::new(Memo::new()),
            page: Mutex::new(Memo::new()),
            last_error: Mutex::new(None),
        }
    }

    /// Create the view and run its single initial load.
    ///
    /// A failed load is logged and kept in [`last_error`](Self::last_error);
    /// the view then stays empty.
    pub async fn activate(service: S, config: ViewConfig) -> Self {
        let view = Self::new(service, config);
        // Failure is already recorded in last_error.
        let _ = view.reload().await;
        view
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// The current collection.
    pub fn snapshot(&self) -> Snapshot {
        self.store.current()
    }

    /// Message of the most recent failed load or delete, cleared by the
    /// next success.
    pub fn last_error(&self) -> Option<String> {
        lock(&self.last_error).clone()
    }

    fn record<T>(&self, result: &Result<T, ViewError>) {
        *lock(&self.last_error) = result.as_ref().err().map(|e| e.to_string());
    }

    /// Re-fetch the whole collection.
    #[instrument(skip(self))]
    pub async fn reload(&self) -> Result<Snapshot, ViewError> {
        let result = self
            .store
            .load(&*self.service, self.config.request_timeout)
            .await;
        if let Ok(snapshot) = &result {
            self.clamp_cursor(snapshot.len());
        }
        self.record(&result);
        result
    }

    /// Delete a post remotely and, once confirmed, locally.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &PostId) -> Result<DeleteOutcome, ViewError> {
        let result = self.coordinator.delete(&self.store, id).await;
        if let Ok(outcome) = &result {
            self.clamp_cursor(outcome.snapshot.len());
        }
        self.record(&result);
        result
    }

    /// Edit hook for a table row.
    pub fn request_edit(&self, id: &PostId) -> EditRequest {
        self.coordinator.edit(id)
    }

    fn clamp_cursor(&self, len: usize) {
        let mut paginator = lock(&self.paginator);
        let before = paginator.current_page();
        if paginator.clamp(len) {
            debug!(
                from = before,
                to = paginator.current_page(),
                "Clamped page cursor"
            );
        }
    }

    /// Posts-per-author buckets for the current collection.
    pub fn buckets(&self) -> Arc<Vec<AuthorBucket>> {
        let snapshot = self.store.current();
        lock(&self.buckets).get_or_compute(snapshot.revision(), || aggregate(snapshot.posts()))
    }

    /// Visible table page for the current collection and cursor.
    pub fn page(&self) -> Arc<PageView> {
        let snapshot = self.store.current();
        let mut paginator = lock(&self.paginator);
        paginator.clamp(snapshot.len());

        let key = (snapshot.revision(), paginator.current_page());
        lock(&self.page).get_or_compute(key, || PageView {
            posts: paginator.slice(snapshot.posts()).to_vec(),
            state: paginator.state(snapshot.len()),
        })
    }

    pub fn page_state(&self) -> PageState {
        let len = self.store.len();
        lock(&self.paginator).state(len)
    }

    /// Jump to page `n`; out-of-range requests are ignored.
    pub fn go_to_page(&self, n: usize) -> bool {
        let len = self.store.len();
        lock(&self.paginator).go_to_page(n, len)
    }

    pub fn next_page(&self) -> bool {
        let len = self.store.len();
        lock(&self.paginator).next(len)
    }

    pub fn previous_page(&self) -> bool {
        let len = self.store.len();
        lock(&self.paginator).previous(len)
    }

    pub fn computations(&self) -> Computations {
        Computations {
            aggregate: lock(&self.buckets).computations(),
            page: lock(&self.page).computations(),
        }
    }
}
