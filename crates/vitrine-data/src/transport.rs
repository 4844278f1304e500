//! Platform HTTP transports.

use async_trait::async_trait;

use crate::client::{FetchError, HttpResponse, HttpTransport};

/// The transport [`crate::FetchClient::new`] uses on this platform.
#[cfg(not(target_arch = "wasm32"))]
pub type DefaultTransport = ReqwestTransport;

/// The transport [`crate::FetchClient::new`] uses on this platform.
#[cfg(target_arch = "wasm32")]
pub type DefaultTransport = SpinTransport;

/// Native transport backed by `reqwest`.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

#[cfg(not(target_arch = "wasm32"))]
impl ReqwestTransport {
    /// Create a transport with a default client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait(?Send)]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    FetchError::Request(e.to_string())
                } else {
                    FetchError::Connection(e.to_string())
                }
            })?;

        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .await
            .map_err(|e| FetchError::Connection(e.to_string()))?;

        Ok(HttpResponse::new(status, body.to_vec()))
    }
}

/// Transport backed by Spin's outbound HTTP.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SpinTransport;

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl HttpTransport for SpinTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let req = spin_sdk::http::Request::get(url);
        let resp: spin_sdk::http::Response = spin_sdk::http::send(req)
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(HttpResponse::new(*resp.status(), resp.body().to_vec()))
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reqwest_transport_returns_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/ping")
            .with_status(404)
            .with_body("missing")
            .create_async()
            .await;

        let resp = ReqwestTransport::new()
            .get(&format!("{}/ping", server.url()))
            .await
            .unwrap();

        assert_eq!(resp, HttpResponse::new(404, "missing"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_reqwest_transport_rejects_bad_url() {
        let err = ReqwestTransport::new().get("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::Request(_)));
    }
}
