//! Clusters API.

use futures::future::BoxFuture;
use futures::FutureExt;
use serde::Deserialize;

use corvus_model::Cluster;

use crate::client::CorvusClient;
use crate::error::Result;
use crate::poll::{Fetched, PollRequest};

/// Fetch closure used by cluster polls.
pub type ClusterFetch = Box<dyn FnMut() -> BoxFuture<'static, Result<Fetched<Cluster>>> + Send>;

/// A configured poll against one cluster.
pub type ClusterPollRequest =
    PollRequest<Cluster, ClusterFetch, BoxFuture<'static, Result<Fetched<Cluster>>>>;

/// Wire shape of the list endpoint; paging fields are not surfaced.
#[derive(Deserialize)]
struct ClusterListPage {
    #[serde(default)]
    items: Vec<Cluster>,
}

/// Clusters API client.
pub struct ClustersApi {
    client: CorvusClient,
}

impl ClustersApi {
    pub(crate) fn new(client: CorvusClient) -> Self {
        Self { client }
    }

    /// List all clusters.
    pub async fn list(&self) -> Result<Vec<Cluster>> {
        let page: ClusterListPage = self.client.get("clusters").await?;
        Ok(page.items)
    }

    /// Get a cluster by ID.
    pub async fn get(&self, id: &str) -> Result<Cluster> {
        self.client.get(&format!("clusters/{}", id)).await
    }

    /// Create a new cluster. Only fields set on the value are sent.
    pub async fn create(&self, cluster: &Cluster) -> Result<Cluster> {
        self.client.post("clusters", cluster).await
    }

    /// Update a cluster. The body carries exactly the fields the caller
    /// set, which is what makes the partial update safe.
    pub async fn update(&self, id: &str, cluster: &Cluster) -> Result<Cluster> {
        self.client.patch(&format!("clusters/{}", id), cluster).await
    }

    /// Delete a cluster.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&format!("clusters/{}", id)).await
    }

    /// Fetch the current state of a cluster as one poll observation.
    ///
    /// Unlike [`get`](Self::get), a non-2xx response is returned as a
    /// bodiless [`Fetched`] rather than an error, so polls can accept
    /// statuses like 404 after a deletion. Only transport failures and
    /// undecodable 2xx bodies are errors.
    pub async fn fetch_state(&self, id: &str) -> Result<Fetched<Cluster>> {
        let response = self
            .client
            .execute(reqwest::Method::GET, &format!("clusters/{}", id), None)
            .await?;
        let status = response.status;
        let body = if status.is_success() {
            Some(self.client.decode(response)?)
        } else {
            None
        };
        Ok(Fetched { status, body })
    }

    /// Start configuring a poll that waits for this cluster to reach a
    /// desired state. See [`PollRequest`] for the acceptance rules.
    pub fn poll(&self, id: &str) -> ClusterPollRequest {
        let client = self.client.clone();
        let id = id.to_string();
        let fetch: ClusterFetch = Box::new(move || {
            let api = ClustersApi::new(client.clone());
            let id = id.clone();
            async move { api.fetch_state(&id).await }.boxed()
        });
        PollRequest::new(fetch)
    }
}
