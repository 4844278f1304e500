//! JSON fetch client over a pluggable transport.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::transport::DefaultTransport;

/// Error type for fetch operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Request error: {0}")]
    Request(String),
}

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// A response with the given status and body.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Something that can perform a plain `GET`.
///
/// Futures are not required to be `Send`: the page runs on a single
/// cooperative thread and the Spin transport is not `Send`.
#[async_trait(?Send)]
pub trait HttpTransport {
    /// Perform a `GET` with no custom headers.
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
}

#[async_trait(?Send)]
impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        (**self).get(url).await
    }
}

/// Fetch client that decodes JSON bodies.
///
/// One request per call: no retries, no timeout.
#[derive(Debug, Clone, Default)]
pub struct FetchClient<T = DefaultTransport> {
    transport: T,
}

impl FetchClient<DefaultTransport> {
    /// Create a client on the platform's default transport.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: HttpTransport> FetchClient<T> {
    /// Create a client on an explicit transport.
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// `GET` `url` and decode the body as `D`.
    ///
    /// Statuses of 400 and above are errors.
    pub async fn fetch<D: DeserializeOwned>(&self, url: &str) -> Result<D, FetchError> {
        let resp = self.transport.get(url).await?;

        if resp.status >= 400 {
            return Err(FetchError::Http {
                status: resp.status,
                url: url.to_string(),
            });
        }

        serde_json::from_slice(&resp.body).map_err(|e| FetchError::Deserialization(e.to_string()))
    }
}
