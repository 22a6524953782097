//! HTTP client SDK for the Corvus cluster-management API.
//!
//! This crate provides a typed client for the cluster-management
//! endpoints, built on the presence-tracked record model of
//! [`corvus_model`]. Besides plain CRUD calls it offers a generic
//! long-poll loop for waiting until a resource reaches a desired state.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use corvus_client::{CorvusClient, PollContext};
//! use corvus_model::{ClusterBuilder, ClusterState};
//!
//! # async fn example() -> corvus_client::Result<()> {
//! let client = CorvusClient::builder()
//!     .base_url("https://api.corvus.example.com")
//!     .auth_token("secret")
//!     .build()?;
//!
//! // Create a cluster; only the fields set here go on the wire.
//! let cluster = ClusterBuilder::new()
//!     .name("prod")
//!     .multi_az(true)
//!     .build()?;
//! let created = client.clusters().create(&cluster).await?;
//!
//! // Wait for it to come up, checking every 30 seconds for an hour.
//! let ctx = PollContext::deadline_in(Duration::from_secs(3600));
//! let ready = client
//!     .clusters()
//!     .poll(created.id())
//!     .interval(Duration::from_secs(30))
//!     .predicate(|f| {
//!         f.body
//!             .as_ref()
//!             .and_then(|c| c.status())
//!             .is_some_and(|s| s.state() == &ClusterState::Ready)
//!     })
//!     .start(&ctx)
//!     .await?;
//! println!("cluster is ready: {:?}", ready.body);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod poll;
pub mod transport;

pub use api::clusters::{ClusterPollRequest, ClustersApi};
pub use client::{ClientBuilder, CorvusClient};
pub use error::{Error, Result};
pub use poll::{Fetched, PollContext, PollRequest};
pub use transport::{HttpTransport, Transport, TransportRequest, TransportResponse};
