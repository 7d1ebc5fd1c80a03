//! Remote post collection trait.

use std::sync::Arc;

use async_trait::async_trait;

use crate::post::Post;
use crate::types::{PostId, ServiceUrl};
use crate::Result;

/// A remote post collection.
///
/// Implementations fetch the whole collection in service order and delete
/// single posts by id. The body of a delete response is never relied upon.
#[async_trait]
pub trait PostService: Send + Sync {
    /// Returns the URL this service talks to.
    fn url(&self) -> &ServiceUrl;

    /// Fetch the full, ordered post collection.
    async fn list_posts(&self) -> Result<Vec<Post>>;

    /// Delete one post.
    ///
    /// Returns an error (404 protocol error for a missing post) when the
    /// service did not confirm the delete.
    async fn delete_post(&self, id: &PostId) -> Result<()>;
}

#[async_trait]
impl<T: PostService + ?Sized> PostService for Arc<T> {
    fn url(&self) -> &ServiceUrl {
        (**self).url()
    }

    async fn list_posts(&self) -> Result<Vec<Post>> {
        (**self).list_posts().await
    }

    async fn delete_post(&self, id: &PostId) -> Result<()> {
        (**self).delete_post(id).await
    }
}
