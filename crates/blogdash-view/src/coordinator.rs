//! Confirm-then-apply mutations.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, instrument};

use blogdash_core::{PostId, PostService};

use crate::deadline;
use crate::error::ViewError;
use crate::store::{RecordStore, Snapshot};

/// Result of a confirmed delete.
#[derive(Debug, Clone)]
pub struct DeleteOutcome {
    pub id: PostId,
    /// False if the post had already left the local collection.
    pub removed_locally: bool,
    /// Collection after the delete was applied.
    pub snapshot: Snapshot,
}

/// An edit request raised from the table. No remote call is made for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    pub id: PostId,
}

/// Runs deletes against the service and applies them to a [`RecordStore`].
#[derive(Debug)]
pub struct MutationCoordinator<S> {
    service: Arc<S>,
    timeout: Duration,
}

impl<S: PostService> MutationCoordinator<S> {
    pub fn new(service: Arc<S>, timeout: Duration) -> Self {
        Self { service, timeout }
    }

    /// Delete `id` remotely, then locally.
    ///
    /// The store is only touched after the service confirms. Waits for any
    /// in-flight load or delete on the same store to finish first.
    #[instrument(skip(self, store), fields(service = %self.service.url(), %id))]
    pub async fn delete(&self, store: &RecordStore, id: &PostId) -> Result<DeleteOutcome, ViewError> {
        let _gate = store.lock_writes().await;

        if let Err(source) = deadline::within(self.timeout, self.service.delete_post(id)).await {
            error!(error = %source, "Delete failed, collection unchanged");
            return Err(ViewError::Delete {
                id: id.clone(),
                source,
            });
        }

        let removed_locally = store.remove(id);
        let snapshot = store.current();
        info!(
            removed_locally,
            remaining = snapshot.len(),
            revision = snapshot.revision(),
            "Deleted post"
        );

        Ok(DeleteOutcome {
            id: id.clone(),
            removed_locally,
            snapshot,
        })
    }

    /// Raise an edit request for `id`.
    #[instrument(skip(self))]
    pub fn edit(&self, id: &PostId) -> EditRequest {
        info!("Edit requested");
        EditRequest { id: id.clone() }
    }
}
