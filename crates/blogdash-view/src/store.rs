//! The record store: single owner of the current post collection.

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, error, info, instrument};

use blogdash_core::error::InvalidInputError;
use blogdash_core::{Post, PostId, PostService};

use crate::deadline;
use crate::error::ViewError;

/// An immutable view of the collection at one revision.
///
/// Cloning is cheap; the posts are shared.
#[derive(Debug, Clone)]
pub struct Snapshot {
    posts: Arc<Vec<Post>>,
    revision: u64,
}

impl Snapshot {
    fn empty() -> Self {
        Self {
            posts: Arc::new(Vec::new()),
            revision: 0,
        }
    }

    /// Posts in store order.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Write counter of the store when this snapshot was taken.
    ///
    /// Strictly increases on every write, so it doubles as the collection
    /// fingerprint for memoized derivations.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn contains(&self, id: &PostId) -> bool {
        self.posts.iter().any(|p| &p.id == id)
    }
}

/// Holds the current collection and serializes writers.
///
/// Readers take [`Snapshot`]s and never wait. A load or a delete holds the
/// write gate from request to apply, so writes land in the order they were
/// started and a reload can never resurrect a post deleted before it.
///
/// Writes are not reachable from outside the crate:
///
/// ```compile_fail
/// let store = blogdash_view::RecordStore::new();
/// store.replace(Vec::new()).unwrap();
/// ```
#[derive(Debug)]
pub struct RecordStore {
    state: RwLock<Snapshot>,
    write_gate: Mutex<()>,
}

impl RecordStore {
    /// Create an empty store at revision 0.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(Snapshot::empty()),
            write_gate: Mutex::new(()),
        }
    }

    /// The present collection.
    pub fn current(&self) -> Snapshot {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.current().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current().is_empty()
    }

    /// Wait for exclusive write access.
    pub(crate) async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_gate.lock().await
    }

    /// Fetch the full collection and replace the stored one wholesale.
    ///
    /// On any failure, including a timeout or a payload with repeated ids,
    /// the stored collection is left untouched.
    #[instrument(skip(self, service), fields(service = %service.url()))]
    pub async fn load<S>(&self, service: &S, timeout: Duration) -> Result<Snapshot, ViewError>
    where
        S: PostService + ?Sized,
    {
        let _gate = self.lock_writes().await;
        debug!("Fetching post collection");

        let result = match deadline::within(timeout, service.list_posts()).await {
            Ok(posts) => self.replace(posts),
            Err(e) => Err(e),
        };

        match result {
            Ok(snapshot) => {
                info!(
                    count = snapshot.len(),
                    revision = snapshot.revision(),
                    "Loaded posts"
                );
                Ok(snapshot)
            }
            Err(source) => {
                error!(error = %source, "Fetch failed, keeping previous collection");
                Err(ViewError::Fetch { source })
            }
        }
    }

    /// Replace the collection, rejecting payloads that repeat an id.
    pub(crate) fn replace(&self, posts: Vec<Post>) -> blogdash_core::Result<Snapshot> {
        if let Some(id) = first_duplicate(&posts) {
            return Err(InvalidInputError::DuplicatePostId { id }.into());
        }

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        *state = Snapshot {
            posts: Arc::new(posts),
            revision: state.revision + 1,
        };
        Ok(state.clone())
    }

    /// Drop the post with `id`, keeping the order of the rest.
    ///
    /// Only call this once the service has confirmed the delete. Returns
    /// false, without bumping the revision, if the post is not present.
    pub(crate) fn remove(&self, id: &PostId) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if !state.contains(id) {
            debug!(%id, "Post not in store, nothing to remove");
            return false;
        }

        let posts: Vec<Post> = state.posts.iter().filter(|p| &p.id != id).cloned().collect();
        *state = Snapshot {
            posts: Arc::new(posts),
            revision: state.revision + 1,
        };
        true
    }
}

fn first_duplicate(posts: &[Post]) -> Option<String> {
    let mut seen = HashSet::with_capacity(posts.len());
    posts
        .iter()
        .find(|p| !seen.insert(&p.id))
        .map(|p| p.id.to_string())
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}
