//! Cluster node counts.

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::BuildError;
use crate::presence::{FieldIndex, Presence};

/// Kind discriminator for a full cluster nodes object.
pub const CLUSTER_NODES_KIND: &str = "ClusterNodes";

/// Kind discriminator for a link to a cluster nodes object.
pub const CLUSTER_NODES_LINK_KIND: &str = "ClusterNodesLink";

const TOTAL: FieldIndex = 0;
const MASTER: FieldIndex = 1;
const COMPUTE: FieldIndex = 2;

/// Immutable node-count breakdown of a cluster.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterNodes {
    presence: Presence,
    total: i64,
    master: i64,
    compute: i64,
}

impl ClusterNodes {
    pub fn kind(&self) -> &'static str {
        if self.presence.link() {
            CLUSTER_NODES_LINK_KIND
        } else {
            CLUSTER_NODES_KIND
        }
    }

    pub fn link(&self) -> bool {
        self.presence.link()
    }

    pub fn empty(&self) -> bool {
        self.presence.is_empty()
    }

    /// Total node count, or `0` when unset.
    pub fn total(&self) -> i64 {
        if self.presence.contains(TOTAL) {
            self.total
        } else {
            0
        }
    }

    /// Total node count, or `None` when unset.
    pub fn get_total(&self) -> Option<i64> {
        self.presence.contains(TOTAL).then_some(self.total)
    }

    /// Control-plane node count, or `0` when unset.
    pub fn master(&self) -> i64 {
        if self.presence.contains(MASTER) {
            self.master
        } else {
            0
        }
    }

    /// Control-plane node count, or `None` when unset.
    pub fn get_master(&self) -> Option<i64> {
        self.presence.contains(MASTER).then_some(self.master)
    }

    /// Compute node count, or `0` when unset.
    pub fn compute(&self) -> i64 {
        if self.presence.contains(COMPUTE) {
            self.compute
        } else {
            0
        }
    }

    /// Compute node count, or `None` when unset.
    pub fn get_compute(&self) -> Option<i64> {
        self.presence.contains(COMPUTE).then_some(self.compute)
    }
}

/// Mutable accumulator producing [`ClusterNodes`] values.
#[derive(Debug, Clone, Default)]
pub struct ClusterNodesBuilder {
    presence: Presence,
    total: i64,
    master: i64,
    compute: i64,
}

impl ClusterNodesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn link(mut self, value: bool) -> Self {
        self.presence.set_link(value);
        self
    }

    pub fn total(mut self, value: i64) -> Self {
        self.total = value;
        self.presence.mark(TOTAL);
        self
    }

    pub fn master(mut self, value: i64) -> Self {
        self.master = value;
        self.presence.mark(MASTER);
        self
    }

    pub fn compute(mut self, value: i64) -> Self {
        self.compute = value;
        self.presence.mark(COMPUTE);
        self
    }

    pub fn empty(&self) -> bool {
        self.presence.is_empty()
    }

    /// Copy all set fields of an existing value, preserving presence.
    pub fn copy(mut self, object: &ClusterNodes) -> Self {
        self.presence = object.presence;
        self.total = object.total;
        self.master = object.master;
        self.compute = object.compute;
        self
    }

    /// Finalize the builder. Node counts must be non-negative.
    pub fn build(self) -> Result<ClusterNodes, BuildError> {
        for (name, value) in [
            ("total", self.total),
            ("master", self.master),
            ("compute", self.compute),
        ] {
            if value < 0 {
                return Err(BuildError::new(
                    "ClusterNodes",
                    format!("{name} count must be non-negative, got {value}"),
                ));
            }
        }
        Ok(ClusterNodes {
            presence: self.presence,
            total: self.total,
            master: self.master,
            compute: self.compute,
        })
    }
}

impl Serialize for ClusterNodes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("kind", self.kind())?;
        if self.presence.contains(TOTAL) {
            map.serialize_entry("total", &self.total)?;
        }
        if self.presence.contains(MASTER) {
            map.serialize_entry("master", &self.master)?;
        }
        if self.presence.contains(COMPUTE) {
            map.serialize_entry("compute", &self.compute)?;
        }
        map.end()
    }
}

#[derive(Deserialize)]
struct ClusterNodesWire {
    kind: Option<String>,
    total: Option<i64>,
    master: Option<i64>,
    compute: Option<i64>,
}

impl<'de> Deserialize<'de> for ClusterNodes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = ClusterNodesWire::deserialize(deserializer)?;
        let mut builder = ClusterNodesBuilder::new();
        if wire.kind.as_deref() == Some(CLUSTER_NODES_LINK_KIND) {
            builder = builder.link(true);
        }
        if let Some(value) = wire.total {
            builder = builder.total(value);
        }
        if let Some(value) = wire.master {
            builder = builder.master(value);
        }
        if let Some(value) = wire.compute {
            builder = builder.compute(value);
        }
        builder.build().map_err(D::Error::custom)
    }
}
