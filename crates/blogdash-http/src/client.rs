//! REST HTTP client implementation.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace};

use blogdash_core::error::{Error, InvalidInputError, ProtocolError, TransportError};

/// Error body some REST servers send alongside a failure status.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<String>,
    message: Option<String>,
}

/// HTTP client for the collection endpoints.
#[derive(Debug, Clone)]
pub(crate) struct RestClient {
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl RestClient {
    /// Create a new client with an optional per-request timeout.
    pub(crate) fn new(timeout: Option<Duration>) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("blogdash/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| TransportError::Http {
            message: format!("failed to build HTTP client: {}", e),
        })?;

        Ok(Self { client, timeout })
    }

    /// GET a URL and decode its JSON body.
    #[instrument(skip(self))]
    pub(crate) async fn get_json<R>(&self, url: &str) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        debug!("REST GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_reqwest(e))?;

        let status = response.status();
        trace!(status = %status, "REST response");

        if !status.is_success() {
            return Err(Error::Protocol(self.parse_error_response(response).await));
        }

        let body = response.bytes().await.map_err(|e| self.map_reqwest(e))?;
        serde_json::from_slice(&body).map_err(|e| {
            Error::InvalidInput(InvalidInputError::Payload {
                message: e.to_string(),
            })
        })
    }

    /// DELETE a URL. Any success status confirms; the body is ignored.
    #[instrument(skip(self))]
    pub(crate) async fn delete(&self, url: &str) -> Result<(), Error> {
        debug!("REST DELETE");

        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(|e| self.map_reqwest(e))?;

        let status = response.status();
        trace!(status = %status, "REST response");

        if status.is_success() {
            Ok(())
        } else {
            Err(Error::Protocol(self.parse_error_response(response).await))
        }
    }

    fn map_reqwest(&self, err: reqwest::Error) -> Error {
        let transport = if err.is_timeout() {
            TransportError::Timeout {
                duration_ms: self.timeout.map(|t| t.as_millis() as u64).unwrap_or(0),
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        };
        Error::Transport(transport)
    }

    async fn parse_error_response(&self, response: reqwest::Response) -> ProtocolError {
        let status = response.status();

        match response.json::<ErrorResponse>().await {
            Ok(body) => ProtocolError::new(
                status.as_u16(),
                body.error
                    .or_else(|| status.canonical_reason().map(str::to_string)),
                body.message,
            ),
            Err(_) => ProtocolError::new(
                status.as_u16(),
                status.canonical_reason().map(str::to_string),
                None,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let client = RestClient::new(Some(Duration::from_secs(2))).unwrap();
        assert_eq!(client.timeout, Some(Duration::from_secs(2)));
    }
}
