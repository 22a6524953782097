//! Main client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use tracing::debug;
use url::Url;

use crate::api::ClustersApi;
use crate::error::{Error, RemoteErrorBody, Result};
use crate::transport::{HttpTransport, Transport, TransportRequest, TransportResponse};

/// Default timeout for a single HTTP exchange.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Corvus API client.
///
/// Provides typed access to the cluster-management endpoints.
///
/// # Example
///
/// ```no_run
/// use corvus_client::CorvusClient;
///
/// # async fn example() -> corvus_client::Result<()> {
/// let client = CorvusClient::builder()
///     .base_url("https://api.corvus.example.com")
///     .auth_token("secret")
///     .build()?;
///
/// let cluster = client.clusters().get("123").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CorvusClient {
    /// Inner shared state.
    inner: Arc<ClientInner>,
}

/// Inner client state (shared across clones).
pub(crate) struct ClientInner {
    /// Transport executing individual exchanges.
    pub(crate) transport: Arc<dyn Transport>,
    /// Base URL for API requests.
    pub(crate) base_url: Url,
    /// Bearer token header, validated at build time.
    pub(crate) auth_header: Option<HeaderValue>,
    /// Per-exchange timeout.
    pub(crate) timeout: Duration,
}

impl CorvusClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client from the `CORVUS_URL` and `CORVUS_TOKEN`
    /// environment variables.
    pub fn from_env() -> Result<Self> {
        let url = std::env::var("CORVUS_URL")
            .map_err(|_| Error::Configuration("CORVUS_URL is not set".to_string()))?;
        let mut builder = Self::builder().base_url(url);
        if let Ok(token) = std::env::var("CORVUS_TOKEN") {
            builder = builder.auth_token(token);
        }
        builder.build()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Access the clusters API.
    pub fn clusters(&self) -> ClustersApi {
        ClustersApi::new(self.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal HTTP methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Build a URL for an API path.
    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        let path = path.trim_start_matches('/');
        self.inner
            .base_url
            .join(&format!("api/v1/{}", path))
            .map_err(Error::from)
    }

    /// Execute one exchange against the transport.
    pub(crate) async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<TransportResponse> {
        let url = self.url(path)?;

        let mut headers = HeaderMap::new();
        if body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        if let Some(auth) = &self.inner.auth_header {
            headers.insert(AUTHORIZATION, auth.clone());
        }

        debug!(%method, %url, "sending request");
        self.inner
            .transport
            .execute(TransportRequest {
                method,
                url,
                headers,
                body,
                timeout: self.inner.timeout,
            })
            .await
    }

    /// Make a GET request and decode the response body.
    pub(crate) async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.execute(Method::GET, path, None).await?;
        self.decode(response)
    }

    /// Make a POST request and decode the response body.
    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let body = serde_json::to_vec(body)?;
        let response = self.execute(Method::POST, path, Some(body)).await?;
        self.decode(response)
    }

    /// Make a PATCH request and decode the response body.
    pub(crate) async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let body = serde_json::to_vec(body)?;
        let response = self.execute(Method::PATCH, path, Some(body)).await?;
        self.decode(response)
    }

    /// Make a DELETE request.
    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let response = self.execute(Method::DELETE, path, None).await?;
        if response.status.is_success() {
            Ok(())
        } else {
            Err(Self::remote_error(&response))
        }
    }

    /// Decode a response body, or turn a non-2xx response into an error.
    pub(crate) fn decode<T: serde::de::DeserializeOwned>(
        &self,
        response: TransportResponse,
    ) -> Result<T> {
        if response.status.is_success() {
            serde_json::from_slice(&response.body).map_err(Error::from)
        } else {
            Err(Self::remote_error(&response))
        }
    }

    /// Decode a non-2xx response body into a structured remote error.
    pub(crate) fn remote_error(response: &TransportResponse) -> Error {
        let body: RemoteErrorBody = serde_json::from_slice(&response.body).unwrap_or_default();
        body.into_error(response.status.as_u16())
    }
}

/// Builder for creating a [`CorvusClient`].
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Option<String>,
    auth_token: Option<String>,
    timeout: Duration,
    user_agent: Option<String>,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            base_url: None,
            auth_token: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
            transport: None,
        }
    }

    /// Set the base URL for the service.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the bearer token sent with every request.
    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Set the per-exchange timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Replace the transport, e.g. with a stub in tests.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<CorvusClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Configuration("base_url is required".to_string()))?;

        // Parse and normalize base URL
        let mut base_url = Url::parse(&base_url)?;
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let auth_header = match &self.auth_token {
            Some(token) => Some(
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|_| Error::Configuration("invalid auth token".to_string()))?,
            ),
            None => None,
        };

        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                let user_agent = self
                    .user_agent
                    .unwrap_or_else(|| format!("corvus-client/{}", env!("CARGO_PKG_VERSION")));
                let http = reqwest::Client::builder().user_agent(user_agent).build()?;
                Arc::new(HttpTransport::new(http))
            }
        };

        Ok(CorvusClient {
            inner: Arc::new(ClientInner {
                transport,
                base_url,
                auth_header,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
