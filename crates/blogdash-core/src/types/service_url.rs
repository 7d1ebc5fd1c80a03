//! Post service URL type.

use std::fmt;
use std::path::PathBuf;
use url::Url;

use crate::error::{Error, InvalidInputError};
use crate::types::PostId;

/// A validated post service URL.
///
/// Supports network services (HTTPS, or HTTP for localhost) speaking the
/// json-server REST dialect, and local `file://` databases.
///
/// # Example
///
/// ```
/// use blogdash_core::{PostId, ServiceUrl};
///
/// let service = ServiceUrl::new("http://localhost:3000").unwrap();
/// assert_eq!(service.collection_url("posts"), "http://localhost:3000/posts");
///
/// let id = PostId::new("7").unwrap();
/// assert_eq!(service.item_url("posts", &id), "http://localhost:3000/posts/7");
///
/// let local = ServiceUrl::new("file:///tmp/blog").unwrap();
/// assert!(local.is_local());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ServiceUrl(Url);

impl ServiceUrl {
    /// Create a new service URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::ServiceUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Returns the URL of a whole collection, e.g. `GET /posts`.
    pub fn collection_url(&self, collection: &str) -> String {
        self.join(&[collection])
    }

    /// Returns the URL of one item in a collection, e.g. `DELETE /posts/7`.
    ///
    /// The id is pushed as a single, escaped path segment.
    pub fn item_url(&self, collection: &str, id: &PostId) -> String {
        self.join(&[collection, id.as_str()])
    }

    fn join(&self, segments: &[&str]) -> String {
        let mut url = self.0.clone();
        // Only cannot-be-a-base URLs lack segments, and validate rejects them.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.into()
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns true if this is a local file database (file:// URL).
    pub fn is_local(&self) -> bool {
        self.0.scheme() == "file"
    }

    /// Returns true if this is a network service (http:// or https:// URL).
    pub fn is_network(&self) -> bool {
        let scheme = self.0.scheme();
        scheme == "http" || scheme == "https"
    }

    /// Returns the filesystem path for file:// URLs.
    ///
    /// Returns `None` for non-file URLs.
    pub fn to_file_path(&self) -> Option<PathBuf> {
        if self.is_local() {
            self.0.to_file_path().ok()
        } else {
            None
        }
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::ServiceUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let scheme = url.scheme();

        if scheme == "file" {
            if url.path().is_empty() || url.path() == "/" {
                return Err(InvalidInputError::ServiceUrl {
                    value: original.to_string(),
                    reason: "file:// URL must have a path".to_string(),
                }
                .into());
            }
            return Ok(());
        }

        // Must be HTTPS (or HTTP for localhost)
        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]");

        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(InvalidInputError::ServiceUrl {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::ServiceUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(InvalidInputError::ServiceUrl {
                value: original.to_string(),
                reason: "must not carry a query or fragment".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for ServiceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
