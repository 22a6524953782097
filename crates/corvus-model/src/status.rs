//! Cluster status record and state enumeration.

use std::fmt;

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::BuildError;
use crate::presence::{FieldIndex, Presence};

/// Kind discriminator for a full cluster status object.
pub const CLUSTER_STATUS_KIND: &str = "ClusterStatus";

/// Kind discriminator for a link to a cluster status.
pub const CLUSTER_STATUS_LINK_KIND: &str = "ClusterStatusLink";

/// Overall state of a cluster as reported by the service.
///
/// The service may introduce new states at any time, so unrecognized
/// values are preserved verbatim rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterState {
    Error,
    Installing,
    Pending,
    Ready,
    Uninstalling,
    /// A state this version of the SDK does not know about.
    Unknown(String),
}

/// Zero value returned by presence-gated accessors for an unset state.
static ZERO_STATE: ClusterState = ClusterState::Unknown(String::new());

impl ClusterState {
    /// Wire representation of the state.
    pub fn as_str(&self) -> &str {
        match self {
            ClusterState::Error => "error",
            ClusterState::Installing => "installing",
            ClusterState::Pending => "pending",
            ClusterState::Ready => "ready",
            ClusterState::Uninstalling => "uninstalling",
            ClusterState::Unknown(value) => value,
        }
    }
}

impl Default for ClusterState {
    fn default() -> Self {
        ClusterState::Unknown(String::new())
    }
}

impl fmt::Display for ClusterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ClusterState {
    fn from(value: &str) -> Self {
        match value {
            "error" => ClusterState::Error,
            "installing" => ClusterState::Installing,
            "pending" => ClusterState::Pending,
            "ready" => ClusterState::Ready,
            "uninstalling" => ClusterState::Uninstalling,
            other => ClusterState::Unknown(other.to_string()),
        }
    }
}

impl Serialize for ClusterState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ClusterState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(ClusterState::from(value.as_str()))
    }
}

const STATE: FieldIndex = 0;
const DESCRIPTION: FieldIndex = 1;

/// Immutable cluster status value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterStatus {
    presence: Presence,
    state: ClusterState,
    description: String,
}

impl ClusterStatus {
    pub fn kind(&self) -> &'static str {
        if self.presence.link() {
            CLUSTER_STATUS_LINK_KIND
        } else {
            CLUSTER_STATUS_KIND
        }
    }

    pub fn link(&self) -> bool {
        self.presence.link()
    }

    pub fn empty(&self) -> bool {
        self.presence.is_empty()
    }

    /// Reported state, or the zero state when unset.
    pub fn state(&self) -> &ClusterState {
        if self.presence.contains(STATE) {
            &self.state
        } else {
            &ZERO_STATE
        }
    }

    /// Reported state, or `None` when unset.
    pub fn get_state(&self) -> Option<&ClusterState> {
        self.presence.contains(STATE).then_some(&self.state)
    }

    /// Human-readable detail, or the empty string when unset.
    pub fn description(&self) -> &str {
        if self.presence.contains(DESCRIPTION) {
            &self.description
        } else {
            ""
        }
    }

    /// Human-readable detail, or `None` when unset.
    pub fn get_description(&self) -> Option<&str> {
        self.presence
            .contains(DESCRIPTION)
            .then_some(self.description.as_str())
    }
}

/// Mutable accumulator producing [`ClusterStatus`] values.
#[derive(Debug, Clone, Default)]
pub struct ClusterStatusBuilder {
    presence: Presence,
    state: ClusterState,
    description: String,
}

impl ClusterStatusBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn link(mut self, value: bool) -> Self {
        self.presence.set_link(value);
        self
    }

    pub fn state(mut self, value: ClusterState) -> Self {
        self.state = value;
        self.presence.mark(STATE);
        self
    }

    pub fn description(mut self, value: impl Into<String>) -> Self {
        self.description = value.into();
        self.presence.mark(DESCRIPTION);
        self
    }

    pub fn empty(&self) -> bool {
        self.presence.is_empty()
    }

    /// Copy all set fields of an existing value, preserving presence.
    pub fn copy(mut self, object: &ClusterStatus) -> Self {
        self.presence = object.presence;
        self.state = object.state.clone();
        self.description = object.description.clone();
        self
    }

    /// Finalize the builder into an immutable value.
    pub fn build(self) -> Result<ClusterStatus, BuildError> {
        Ok(ClusterStatus {
            presence: self.presence,
            state: self.state,
            description: self.description,
        })
    }
}

impl Serialize for ClusterStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("kind", self.kind())?;
        if self.presence.contains(STATE) {
            map.serialize_entry("state", &self.state)?;
        }
        if self.presence.contains(DESCRIPTION) {
            map.serialize_entry("description", &self.description)?;
        }
        map.end()
    }
}

#[derive(Deserialize)]
struct ClusterStatusWire {
    kind: Option<String>,
    state: Option<ClusterState>,
    description: Option<String>,
}

impl<'de> Deserialize<'de> for ClusterStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = ClusterStatusWire::deserialize(deserializer)?;
        let mut builder = ClusterStatusBuilder::new();
        if wire.kind.as_deref() == Some(CLUSTER_STATUS_LINK_KIND) {
            builder = builder.link(true);
        }
        if let Some(value) = wire.state {
            builder = builder.state(value);
        }
        if let Some(value) = wire.description {
            builder = builder.description(value);
        }
        builder.build().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_wire_names() {
        assert_eq!(ClusterState::Ready.as_str(), "ready");
        assert_eq!(ClusterState::from("installing"), ClusterState::Installing);
        assert_eq!(
            ClusterState::from("hibernating"),
            ClusterState::Unknown("hibernating".to_string())
        );
    }

    #[test]
    fn test_unset_state_is_zero() {
        let status = ClusterStatusBuilder::new()
            .description("provisioning")
            .build()
            .unwrap();
        assert_eq!(status.get_state(), None);
        assert_eq!(status.state(), &ClusterState::Unknown(String::new()));
    }
}
