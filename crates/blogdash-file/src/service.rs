//! File-backed post service implementation.

use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, instrument};

use blogdash_core::error::InvalidInputError;
use blogdash_core::{Post, PostId, PostService, Result, ServiceUrl};

use crate::store::FileStore;

/// Collection key json-server uses for posts.
const DEFAULT_COLLECTION: &str = "posts";

/// Filesystem-backed post service.
#[derive(Debug, Clone)]
pub struct FilePostService {
    store: FileStore,
    url: ServiceUrl,
}

impl FilePostService {
    /// Create a file-backed service rooted at the given path.
    pub fn new(root: impl AsRef<Path>, url: ServiceUrl) -> Self {
        Self {
            store: FileStore::new(root, DEFAULT_COLLECTION),
            url,
        }
    }

    /// Create a service from a `file://` URL.
    pub fn from_url(url: ServiceUrl) -> Result<Self> {
        let path = url.to_file_path().ok_or_else(|| InvalidInputError::ServiceUrl {
            value: url.to_string(),
            reason: "not a file:// URL with a local path".to_string(),
        })?;
        Ok(Self::new(path, url))
    }

    /// Access the underlying file store.
    pub fn store(&self) -> &FileStore {
        &self.store
    }
}

#[async_trait]
impl PostService for FilePostService {
    fn url(&self) -> &ServiceUrl {
        &self.url
    }

    #[instrument(skip(self), fields(service = %self.url))]
    async fn list_posts(&self) -> Result<Vec<Post>> {
        debug!("Listing posts from file");
        self.store.list_posts()
    }

    #[instrument(skip(self), fields(service = %self.url, %id))]
    async fn delete_post(&self, id: &PostId) -> Result<()> {
        debug!("Deleting post from file");
        self.store.delete_post(id)
    }
}
