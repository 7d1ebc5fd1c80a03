//! Operation-scoped view errors.

use thiserror::Error;

use blogdash_core::{Error, PostId};

/// A failed view operation.
///
/// None of these are fatal: the store is left exactly as it was and the
/// operation can be retried.
#[derive(Debug, Error)]
pub enum ViewError {
    /// The collection could not be fetched.
    #[error("failed to load posts: {source}")]
    Fetch {
        #[source]
        source: Error,
    },

    /// The service did not confirm a delete.
    #[error("failed to delete post {id}: {source}")]
    Delete {
        id: PostId,
        #[source]
        source: Error,
    },
}

impl ViewError {
    /// The underlying service error.
    pub fn service_error(&self) -> &Error {
        match self {
            ViewError::Fetch { source } | ViewError::Delete { source, .. } => source,
        }
    }

    /// Returns true if the request hit its deadline.
    pub fn is_timeout(&self) -> bool {
        self.service_error().is_timeout()
    }
}
