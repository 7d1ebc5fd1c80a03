//! HTTP-backed post service implementation.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use blogdash_core::{Post, PostId, PostService, Result, ServiceUrl};

use crate::client::RestClient;

/// Collection name json-server exposes posts under.
pub const DEFAULT_COLLECTION: &str = "posts";

/// Collection listing, as a bare array or a json-server `_page` envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListResponse {
    Plain(Vec<Post>),
    Paged { data: Vec<Post> },
}

impl ListResponse {
    fn into_posts(self) -> Vec<Post> {
        match self {
            ListResponse::Plain(posts) | ListResponse::Paged { data: posts } => posts,
        }
    }
}

/// Options for [`HttpPostService`].
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Collection path segment.
    pub collection: String,
    /// Per-request transport timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            collection: DEFAULT_COLLECTION.to_string(),
            timeout: None,
        }
    }
}

/// A network-backed post service.
#[derive(Debug, Clone)]
pub struct HttpPostService {
    url: ServiceUrl,
    collection: String,
    client: RestClient,
}

impl HttpPostService {
    /// Create a service for `{url}/posts`.
    pub fn new(url: ServiceUrl) -> Result<Self> {
        Self::with_config(url, HttpConfig::default())
    }

    /// Create a service with explicit options.
    pub fn with_config(url: ServiceUrl, config: HttpConfig) -> Result<Self> {
        let client = RestClient::new(config.timeout)?;
        Ok(Self {
            url,
            collection: config.collection,
            client,
        })
    }

    /// Returns the collection path segment.
    pub fn collection(&self) -> &str {
        &self.collection
    }
}

#[async_trait]
impl PostService for HttpPostService {
    fn url(&self) -> &ServiceUrl {
        &self.url
    }

    #[instrument(skip(self), fields(service = %self.url, collection = %self.collection))]
    async fn list_posts(&self) -> Result<Vec<Post>> {
        debug!("Listing posts via HTTP");

        let response: ListResponse = self
            .client
            .get_json(&self.url.collection_url(&self.collection))
            .await?;

        let posts = response.into_posts();
        debug!(count = posts.len(), "Fetched posts");
        Ok(posts)
    }

    #[instrument(skip(self), fields(service = %self.url, %id))]
    async fn delete_post(&self, id: &PostId) -> Result<()> {
        debug!("Deleting post via HTTP");

        self.client
            .delete(&self.url.item_url(&self.collection, id))
            .await
    }
}
