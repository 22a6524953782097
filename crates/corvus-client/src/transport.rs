//! Transport boundary: one HTTP exchange at a time.
//!
//! The client never talks to the network directly; it hands a
//! [`TransportRequest`] to a [`Transport`] and gets a
//! [`TransportResponse`] or an error back. The default implementation
//! wraps [`reqwest::Client`]; tests substitute their own.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use url::Url;

use crate::error::Result;

/// One HTTP request as seen by the transport.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    /// Serialized request body, absent for GET/DELETE.
    pub body: Option<Vec<u8>>,
    /// Per-exchange timeout imposed by the client configuration.
    pub timeout: Duration,
}

/// One HTTP response as seen by the transport.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Capability that executes a single HTTP exchange.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute one request and return the response, however the service
    /// answered. Only failures of the exchange itself are errors.
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse>;
}

impl std::fmt::Debug for dyn Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Transport")
    }
}

/// Default transport backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse> {
        let mut builder = self
            .http
            .request(request.method, request.url)
            .headers(request.headers)
            .timeout(request.timeout);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}
