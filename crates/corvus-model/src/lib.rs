//! Record model for the Corvus cluster-management API.
//!
//! Every API resource is represented by a pair of types: an immutable
//! value (e.g. [`Cluster`]) and a mutable builder (e.g. [`ClusterBuilder`])
//! that produces it through a one-way build step. Records track which
//! fields were explicitly set with a [`presence::Presence`] bitmask, so
//! partial updates serialize exactly the fields the caller touched and
//! nothing else.
//!
//! # Example
//!
//! ```
//! use corvus_model::{ClusterBuilder, CloudRegionBuilder};
//!
//! # fn example() -> Result<(), corvus_model::BuildError> {
//! let cluster = ClusterBuilder::new()
//!     .name("prod")
//!     .multi_az(true)
//!     .region(CloudRegionBuilder::new().id("eu-west-1"))
//!     .build()?;
//!
//! // Unset fields are distinguishable from fields set to a zero value.
//! assert_eq!(cluster.get_name(), Some("prod"));
//! assert_eq!(cluster.get_managed(), None);
//! assert!(!cluster.managed());
//!
//! // Edit-and-rebuild: copy into a fresh builder, change, build again.
//! let renamed = ClusterBuilder::new().copy(&cluster).name("prod-2").build()?;
//! assert_eq!(renamed.get_name(), Some("prod-2"));
//! # Ok(())
//! # }
//! ```

pub mod cluster;
pub mod error;
pub mod node_pool;
pub mod nodes;
pub mod presence;
pub mod region;
pub mod status;

pub use cluster::{Cluster, ClusterBuilder, CLUSTER_KIND, CLUSTER_LINK_KIND};
pub use error::BuildError;
pub use node_pool::{NodePool, NodePoolBuilder, NODE_POOL_KIND, NODE_POOL_LINK_KIND};
pub use nodes::{ClusterNodes, ClusterNodesBuilder, CLUSTER_NODES_KIND, CLUSTER_NODES_LINK_KIND};
pub use presence::Presence;
pub use region::{CloudRegion, CloudRegionBuilder, CLOUD_REGION_KIND, CLOUD_REGION_LINK_KIND};
pub use status::{
    ClusterState, ClusterStatus, ClusterStatusBuilder, CLUSTER_STATUS_KIND,
    CLUSTER_STATUS_LINK_KIND,
};
