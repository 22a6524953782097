//! Cluster record.
//!
//! The cluster is the composite record of the model: it nests
//! [`CloudRegion`], [`ClusterNodes`] and [`ClusterStatus`] records and
//! carries an ordered list of [`NodePool`]s. Its builder demonstrates the
//! full copy/build recursion that every record type follows.

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::BuildError;
use crate::nodes::{ClusterNodes, ClusterNodesBuilder};
use crate::node_pool::{NodePool, NodePoolBuilder};
use crate::presence::{FieldIndex, Presence};
use crate::region::{CloudRegion, CloudRegionBuilder};
use crate::status::{ClusterStatus, ClusterStatusBuilder};

/// Kind discriminator for a full cluster object.
pub const CLUSTER_KIND: &str = "Cluster";

/// Kind discriminator for a link to a cluster.
pub const CLUSTER_LINK_KIND: &str = "ClusterLink";

const ID: FieldIndex = 0;
const HREF: FieldIndex = 1;
const NAME: FieldIndex = 2;
const MULTI_AZ: FieldIndex = 3;
const MANAGED: FieldIndex = 4;
const REGION: FieldIndex = 5;
const NODES: FieldIndex = 6;
const STATUS: FieldIndex = 7;
const NODE_POOLS: FieldIndex = 8;

/// Immutable cluster value.
///
/// Values are produced by [`ClusterBuilder::build`] and never mutated in
/// place; updating a cluster means copying it into a fresh builder,
/// changing the fields of interest and sending the rebuilt value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cluster {
    presence: Presence,
    id: String,
    href: String,
    name: String,
    multi_az: bool,
    managed: bool,
    region: Option<CloudRegion>,
    nodes: Option<ClusterNodes>,
    status: Option<ClusterStatus>,
    node_pools: Vec<NodePool>,
}

impl Cluster {
    /// Kind discriminator for this value, depending on the link bit.
    pub fn kind(&self) -> &'static str {
        if self.presence.link() {
            CLUSTER_LINK_KIND
        } else {
            CLUSTER_KIND
        }
    }

    /// Whether this value is a link stub.
    pub fn link(&self) -> bool {
        self.presence.link()
    }

    /// True when no field has been set.
    pub fn empty(&self) -> bool {
        self.presence.is_empty()
    }

    /// Identifier, or the empty string when unset.
    pub fn id(&self) -> &str {
        if self.presence.contains(ID) {
            &self.id
        } else {
            ""
        }
    }

    /// Identifier, or `None` when unset.
    pub fn get_id(&self) -> Option<&str> {
        self.presence.contains(ID).then_some(self.id.as_str())
    }

    /// Link to the cluster, or the empty string when unset.
    pub fn href(&self) -> &str {
        if self.presence.contains(HREF) {
            &self.href
        } else {
            ""
        }
    }

    /// Link to the cluster, or `None` when unset.
    pub fn get_href(&self) -> Option<&str> {
        self.presence.contains(HREF).then_some(self.href.as_str())
    }

    /// Cluster name, or the empty string when unset.
    pub fn name(&self) -> &str {
        if self.presence.contains(NAME) {
            &self.name
        } else {
            ""
        }
    }

    /// Cluster name, or `None` when unset.
    pub fn get_name(&self) -> Option<&str> {
        self.presence.contains(NAME).then_some(self.name.as_str())
    }

    /// Whether nodes span availability zones; `false` when unset.
    pub fn multi_az(&self) -> bool {
        if self.presence.contains(MULTI_AZ) {
            self.multi_az
        } else {
            false
        }
    }

    /// Whether nodes span availability zones, or `None` when unset.
    pub fn get_multi_az(&self) -> Option<bool> {
        self.presence.contains(MULTI_AZ).then_some(self.multi_az)
    }

    /// Whether the service manages the cluster; `false` when unset.
    pub fn managed(&self) -> bool {
        if self.presence.contains(MANAGED) {
            self.managed
        } else {
            false
        }
    }

    /// Whether the service manages the cluster, or `None` when unset.
    pub fn get_managed(&self) -> Option<bool> {
        self.presence.contains(MANAGED).then_some(self.managed)
    }

    /// Region the cluster runs in, or `None` when unset.
    pub fn region(&self) -> Option<&CloudRegion> {
        if self.presence.contains(REGION) {
            self.region.as_ref()
        } else {
            None
        }
    }

    /// Node-count breakdown, or `None` when unset.
    pub fn nodes(&self) -> Option<&ClusterNodes> {
        if self.presence.contains(NODES) {
            self.nodes.as_ref()
        } else {
            None
        }
    }

    /// Current status, or `None` when unset.
    pub fn status(&self) -> Option<&ClusterStatus> {
        if self.presence.contains(STATUS) {
            self.status.as_ref()
        } else {
            None
        }
    }

    /// Node pools, or an empty slice when unset.
    pub fn node_pools(&self) -> &[NodePool] {
        if self.presence.contains(NODE_POOLS) {
            &self.node_pools
        } else {
            &[]
        }
    }

    /// Node pools, or `None` when the list itself was never set.
    ///
    /// Distinguishes "no pools" (`Some(&[])`) from "pools not reported".
    pub fn get_node_pools(&self) -> Option<&[NodePool]> {
        self.presence
            .contains(NODE_POOLS)
            .then_some(self.node_pools.as_slice())
    }
}

/// Mutable accumulator producing [`Cluster`] values.
///
/// Nested fields hold nested builders, so a cluster under construction
/// can be edited at any depth before the single [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct ClusterBuilder {
    presence: Presence,
    id: String,
    href: String,
    name: String,
    multi_az: bool,
    managed: bool,
    region: Option<CloudRegionBuilder>,
    nodes: Option<ClusterNodesBuilder>,
    status: Option<ClusterStatusBuilder>,
    node_pools: Vec<NodePoolBuilder>,
}

impl ClusterBuilder {
    /// Create a builder with no fields set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear the link bit.
    pub fn link(mut self, value: bool) -> Self {
        self.presence.set_link(value);
        self
    }

    /// Set the identifier.
    pub fn id(mut self, value: impl Into<String>) -> Self {
        self.id = value.into();
        self.presence.mark(ID);
        self
    }

    /// Set the link to the cluster.
    pub fn href(mut self, value: impl Into<String>) -> Self {
        self.href = value.into();
        self.presence.mark(HREF);
        self
    }

    /// Set the cluster name.
    pub fn name(mut self, value: impl Into<String>) -> Self {
        self.name = value.into();
        self.presence.mark(NAME);
        self
    }

    /// Set whether nodes span availability zones.
    pub fn multi_az(mut self, value: bool) -> Self {
        self.multi_az = value;
        self.presence.mark(MULTI_AZ);
        self
    }

    /// Set whether the service manages the cluster.
    pub fn managed(mut self, value: bool) -> Self {
        self.managed = value;
        self.presence.mark(MANAGED);
        self
    }

    /// Set the region.
    pub fn region(mut self, value: CloudRegionBuilder) -> Self {
        self.region = Some(value);
        self.presence.mark(REGION);
        self
    }

    /// Set the node-count breakdown.
    pub fn nodes(mut self, value: ClusterNodesBuilder) -> Self {
        self.nodes = Some(value);
        self.presence.mark(NODES);
        self
    }

    /// Set the status.
    pub fn status(mut self, value: ClusterStatusBuilder) -> Self {
        self.status = Some(value);
        self.presence.mark(STATUS);
        self
    }

    /// Replace the node pool list. An empty list still marks the field
    /// as present.
    pub fn node_pools(mut self, items: Vec<NodePoolBuilder>) -> Self {
        self.node_pools = items;
        self.presence.mark(NODE_POOLS);
        self
    }

    /// True when no field has been set.
    pub fn empty(&self) -> bool {
        self.presence.is_empty()
    }

    /// Copy all set fields of an existing value into this builder.
    ///
    /// The bitmask is copied verbatim and nested records are re-wrapped
    /// in new builders, so mutating the copy never affects the source
    /// and an unset nested field stays unset.
    pub fn copy(mut self, object: &Cluster) -> Self {
        self.presence = object.presence;
        self.id = object.id.clone();
        self.href = object.href.clone();
        self.name = object.name.clone();
        self.multi_az = object.multi_az;
        self.managed = object.managed;
        self.region = object
            .region
            .as_ref()
            .map(|value| CloudRegionBuilder::new().copy(value));
        self.nodes = object
            .nodes
            .as_ref()
            .map(|value| ClusterNodesBuilder::new().copy(value));
        self.status = object
            .status
            .as_ref()
            .map(|value| ClusterStatusBuilder::new().copy(value));
        self.node_pools = object
            .node_pools
            .iter()
            .map(|value| NodePoolBuilder::new().copy(value))
            .collect();
        self
    }

    /// Finalize the builder into an immutable value.
    ///
    /// Nested builders are built recursively; the first nested failure
    /// propagates and no partial value is produced.
    pub fn build(self) -> Result<Cluster, BuildError> {
        let region = self.region.map(CloudRegionBuilder::build).transpose()?;
        let nodes = self.nodes.map(ClusterNodesBuilder::build).transpose()?;
        let status = self.status.map(ClusterStatusBuilder::build).transpose()?;
        let node_pools = self
            .node_pools
            .into_iter()
            .map(NodePoolBuilder::build)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Cluster {
            presence: self.presence,
            id: self.id,
            href: self.href,
            name: self.name,
            multi_az: self.multi_az,
            managed: self.managed,
            region,
            nodes,
            status,
            node_pools,
        })
    }
}

impl Serialize for Cluster {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("kind", self.kind())?;
        if self.presence.contains(ID) {
            map.serialize_entry("id", &self.id)?;
        }
        if self.presence.contains(HREF) {
            map.serialize_entry("href", &self.href)?;
        }
        if self.presence.contains(NAME) {
            map.serialize_entry("name", &self.name)?;
        }
        if self.presence.contains(MULTI_AZ) {
            map.serialize_entry("multi_az", &self.multi_az)?;
        }
        if self.presence.contains(MANAGED) {
            map.serialize_entry("managed", &self.managed)?;
        }
        if self.presence.contains(REGION) {
            map.serialize_entry("region", &self.region)?;
        }
        if self.presence.contains(NODES) {
            map.serialize_entry("nodes", &self.nodes)?;
        }
        if self.presence.contains(STATUS) {
            map.serialize_entry("status", &self.status)?;
        }
        if self.presence.contains(NODE_POOLS) {
            map.serialize_entry("node_pools", &self.node_pools)?;
        }
        map.end()
    }
}

#[derive(Deserialize)]
struct ClusterWire {
    kind: Option<String>,
    id: Option<String>,
    href: Option<String>,
    name: Option<String>,
    multi_az: Option<bool>,
    managed: Option<bool>,
    region: Option<CloudRegion>,
    nodes: Option<ClusterNodes>,
    status: Option<ClusterStatus>,
    node_pools: Option<Vec<NodePool>>,
}

impl<'de> Deserialize<'de> for Cluster {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = ClusterWire::deserialize(deserializer)?;
        let mut builder = ClusterBuilder::new();
        if wire.kind.as_deref() == Some(CLUSTER_LINK_KIND) {
            builder = builder.link(true);
        }
        if let Some(value) = wire.id {
            builder = builder.id(value);
        }
        if let Some(value) = wire.href {
            builder = builder.href(value);
        }
        if let Some(value) = wire.name {
            builder = builder.name(value);
        }
        if let Some(value) = wire.multi_az {
            builder = builder.multi_az(value);
        }
        if let Some(value) = wire.managed {
            builder = builder.managed(value);
        }
        if let Some(value) = wire.region {
            builder = builder.region(CloudRegionBuilder::new().copy(&value));
        }
        if let Some(value) = wire.nodes {
            builder = builder.nodes(ClusterNodesBuilder::new().copy(&value));
        }
        if let Some(value) = wire.status {
            builder = builder.status(ClusterStatusBuilder::new().copy(&value));
        }
        if let Some(items) = wire.node_pools {
            builder = builder.node_pools(
                items
                    .iter()
                    .map(|value| NodePoolBuilder::new().copy(value))
                    .collect(),
            );
        }
        builder.build().map_err(D::Error::custom)
    }
}
