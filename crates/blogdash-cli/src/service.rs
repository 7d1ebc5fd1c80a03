//! Backend selection for the CLI.

use std::time::Duration;

use async_trait::async_trait;

use blogdash_core::error::InvalidInputError;
use blogdash_core::{Post, PostId, PostService, Result, ServiceUrl};
use blogdash_file::FilePostService;
use blogdash_http::{HttpConfig, HttpPostService};

/// Post service chosen from the URL scheme.
#[derive(Debug)]
pub enum CliService {
    File(FilePostService),
    Http(HttpPostService),
}

impl CliService {
    /// `file://` URLs open a local db.json; everything else goes over HTTP.
    pub fn connect(url: ServiceUrl, timeout: Duration) -> Result<Self> {
        if url.is_local() {
            return Ok(CliService::File(FilePostService::from_url(url)?));
        }
        if !url.is_network() {
            return Err(InvalidInputError::ServiceUrl {
                value: url.to_string(),
                reason: "unsupported scheme".to_string(),
            }
            .into());
        }

        let config = HttpConfig {
            timeout: Some(timeout),
            ..HttpConfig::default()
        };
        Ok(CliService::Http(HttpPostService::with_config(url, config)?))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            CliService::File(_) => "file",
            CliService::Http(_) => "http",
        }
    }
}

#[async_trait]
impl PostService for CliService {
    fn url(&self) -> &ServiceUrl {
        match self {
            CliService::File(service) => service.url(),
            CliService::Http(service) => service.url(),
        }
    }

    async fn list_posts(&self) -> Result<Vec<Post>> {
        match self {
            CliService::File(service) => service.list_posts().await,
            CliService::Http(service) => service.list_posts().await,
        }
    }

    async fn delete_post(&self, id: &PostId) -> Result<()> {
        match self {
            CliService::File(service) => service.delete_post(id).await,
            CliService::Http(service) => service.delete_post(id).await,
        }
    }
}
