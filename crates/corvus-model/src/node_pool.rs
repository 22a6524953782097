//! Node pool record.

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::BuildError;
use crate::presence::{FieldIndex, Presence};

/// Kind discriminator for a full node pool object.
pub const NODE_POOL_KIND: &str = "NodePool";

/// Kind discriminator for a link to a node pool.
pub const NODE_POOL_LINK_KIND: &str = "NodePoolLink";

const ID: FieldIndex = 0;
const HREF: FieldIndex = 1;
const INSTANCE_TYPE: FieldIndex = 2;
const REPLICAS: FieldIndex = 3;

/// Immutable node pool value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePool {
    presence: Presence,
    id: String,
    href: String,
    instance_type: String,
    replicas: i64,
}

impl NodePool {
    pub fn kind(&self) -> &'static str {
        if self.presence.link() {
            NODE_POOL_LINK_KIND
        } else {
            NODE_POOL_KIND
        }
    }

    pub fn link(&self) -> bool {
        self.presence.link()
    }

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

    /// Link to the pool, or the empty string when unset.
    pub fn href(&self) -> &str {
        if self.presence.contains(HREF) {
            &self.href
        } else {
            ""
        }
    }

    /// Link to the pool, or `None` when unset.
    pub fn get_href(&self) -> Option<&str> {
        self.presence.contains(HREF).then_some(self.href.as_str())
    }

    /// Machine type backing the pool, or the empty string when unset.
    pub fn instance_type(&self) -> &str {
        if self.presence.contains(INSTANCE_TYPE) {
            &self.instance_type
        } else {
            ""
        }
    }

    /// Machine type backing the pool, or `None` when unset.
    pub fn get_instance_type(&self) -> Option<&str> {
        self.presence
            .contains(INSTANCE_TYPE)
            .then_some(self.instance_type.as_str())
    }

    /// Desired replica count, or `0` when unset.
    pub fn replicas(&self) -> i64 {
        if self.presence.contains(REPLICAS) {
            self.replicas
        } else {
            0
        }
    }

    /// Desired replica count, or `None` when unset.
    pub fn get_replicas(&self) -> Option<i64> {
        self.presence.contains(REPLICAS).then_some(self.replicas)
    }
}

/// Mutable accumulator producing [`NodePool`] values.
#[derive(Debug, Clone, Default)]
pub struct NodePoolBuilder {
    presence: Presence,
    id: String,
    href: String,
    instance_type: String,
    replicas: i64,
}

impl NodePoolBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn link(mut self, value: bool) -> Self {
        self.presence.set_link(value);
        self
    }

    pub fn id(mut self, value: impl Into<String>) -> Self {
        self.id = value.into();
        self.presence.mark(ID);
        self
    }

    pub fn href(mut self, value: impl Into<String>) -> Self {
        self.href = value.into();
        self.presence.mark(HREF);
        self
    }

    pub fn instance_type(mut self, value: impl Into<String>) -> Self {
        self.instance_type = value.into();
        self.presence.mark(INSTANCE_TYPE);
        self
    }

    pub fn replicas(mut self, value: i64) -> Self {
        self.replicas = value;
        self.presence.mark(REPLICAS);
        self
    }

    pub fn empty(&self) -> bool {
        self.presence.is_empty()
    }

    /// Copy all set fields of an existing value, preserving presence.
    pub fn copy(mut self, object: &NodePool) -> Self {
        self.presence = object.presence;
        self.id = object.id.clone();
        self.href = object.href.clone();
        self.instance_type = object.instance_type.clone();
        self.replicas = object.replicas;
        self
    }

    /// Finalize the builder. The replica count must be non-negative.
    pub fn build(self) -> Result<NodePool, BuildError> {
        if self.replicas < 0 {
            return Err(BuildError::new(
                "NodePool",
                format!("replicas must be non-negative, got {}", self.replicas),
            ));
        }
        Ok(NodePool {
            presence: self.presence,
            id: self.id,
            href: self.href,
            instance_type: self.instance_type,
            replicas: self.replicas,
        })
    }
}

impl Serialize for NodePool {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("kind", self.kind())?;
        if self.presence.contains(ID) {
            map.serialize_entry("id", &self.id)?;
        }
        if self.presence.contains(HREF) {
            map.serialize_entry("href", &self.href)?;
        }
        if self.presence.contains(INSTANCE_TYPE) {
            map.serialize_entry("instance_type", &self.instance_type)?;
        }
        if self.presence.contains(REPLICAS) {
            map.serialize_entry("replicas", &self.replicas)?;
        }
        map.end()
    }
}

#[derive(Deserialize)]
struct NodePoolWire {
    kind: Option<String>,
    id: Option<String>,
    href: Option<String>,
    instance_type: Option<String>,
    replicas: Option<i64>,
}

impl<'de> Deserialize<'de> for NodePool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = NodePoolWire::deserialize(deserializer)?;
        let mut builder = NodePoolBuilder::new();
        if wire.kind.as_deref() == Some(NODE_POOL_LINK_KIND) {
            builder = builder.link(true);
        }
        if let Some(value) = wire.id {
            builder = builder.id(value);
        }
        if let Some(value) = wire.href {
            builder = builder.href(value);
        }
        if let Some(value) = wire.instance_type {
            builder = builder.instance_type(value);
        }
        if let Some(value) = wire.replicas {
            builder = builder.replicas(value);
        }
        builder.build().map_err(D::Error::custom)
    }
}
