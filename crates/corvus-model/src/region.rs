//! Cloud region record.

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::BuildError;
use crate::presence::{FieldIndex, Presence};

/// Kind discriminator for a full cloud region object.
pub const CLOUD_REGION_KIND: &str = "CloudRegion";

/// Kind discriminator for a link to a cloud region.
pub const CLOUD_REGION_LINK_KIND: &str = "CloudRegionLink";

const ID: FieldIndex = 0;
const HREF: FieldIndex = 1;
const DISPLAY_NAME: FieldIndex = 2;
const ENABLED: FieldIndex = 3;

/// Immutable cloud region value.
///
/// A region retrieved as part of a cluster is usually a link stub
/// carrying only `id` and `href`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CloudRegion {
    presence: Presence,
    id: String,
    href: String,
    display_name: String,
    enabled: bool,
}

impl CloudRegion {
    /// Kind discriminator for this value, depending on the link bit.
    pub fn kind(&self) -> &'static str {
        if self.presence.link() {
            CLOUD_REGION_LINK_KIND
        } else {
            CLOUD_REGION_KIND
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

    /// Link to the region, or the empty string when unset.
    pub fn href(&self) -> &str {
        if self.presence.contains(HREF) {
            &self.href
        } else {
            ""
        }
    }

    /// Link to the region, or `None` when unset.
    pub fn get_href(&self) -> Option<&str> {
        self.presence.contains(HREF).then_some(self.href.as_str())
    }

    /// Human-readable name, or the empty string when unset.
    pub fn display_name(&self) -> &str {
        if self.presence.contains(DISPLAY_NAME) {
            &self.display_name
        } else {
            ""
        }
    }

    /// Human-readable name, or `None` when unset.
    pub fn get_display_name(&self) -> Option<&str> {
        self.presence
            .contains(DISPLAY_NAME)
            .then_some(self.display_name.as_str())
    }

    /// Whether the region accepts new clusters; `false` when unset.
    pub fn enabled(&self) -> bool {
        if self.presence.contains(ENABLED) {
            self.enabled
        } else {
            false
        }
    }

    /// Whether the region accepts new clusters, or `None` when unset.
    pub fn get_enabled(&self) -> Option<bool> {
        self.presence.contains(ENABLED).then_some(self.enabled)
    }
}

/// Mutable accumulator producing [`CloudRegion`] values.
#[derive(Debug, Clone, Default)]
pub struct CloudRegionBuilder {
    presence: Presence,
    id: String,
    href: String,
    display_name: String,
    enabled: bool,
}

impl CloudRegionBuilder {
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

    /// Set the link to the region.
    pub fn href(mut self, value: impl Into<String>) -> Self {
        self.href = value.into();
        self.presence.mark(HREF);
        self
    }

    /// Set the human-readable name.
    pub fn display_name(mut self, value: impl Into<String>) -> Self {
        self.display_name = value.into();
        self.presence.mark(DISPLAY_NAME);
        self
    }

    /// Set whether the region accepts new clusters.
    pub fn enabled(mut self, value: bool) -> Self {
        self.enabled = value;
        self.presence.mark(ENABLED);
        self
    }

    /// True when no field has been set.
    pub fn empty(&self) -> bool {
        self.presence.is_empty()
    }

    /// Copy all set fields of an existing value into this builder,
    /// preserving its presence information verbatim.
    pub fn copy(mut self, object: &CloudRegion) -> Self {
        self.presence = object.presence;
        self.id = object.id.clone();
        self.href = object.href.clone();
        self.display_name = object.display_name.clone();
        self.enabled = object.enabled;
        self
    }

    /// Finalize the builder into an immutable value.
    pub fn build(self) -> Result<CloudRegion, BuildError> {
        Ok(CloudRegion {
            presence: self.presence,
            id: self.id,
            href: self.href,
            display_name: self.display_name,
            enabled: self.enabled,
        })
    }
}

impl Serialize for CloudRegion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("kind", self.kind())?;
        if self.presence.contains(ID) {
            map.serialize_entry("id", &self.id)?;
        }
        if self.presence.contains(HREF) {
            map.serialize_entry("href", &self.href)?;
        }
        if self.presence.contains(DISPLAY_NAME) {
            map.serialize_entry("display_name", &self.display_name)?;
        }
        if self.presence.contains(ENABLED) {
            map.serialize_entry("enabled", &self.enabled)?;
        }
        map.end()
    }
}

#[derive(Deserialize)]
struct CloudRegionWire {
    kind: Option<String>,
    id: Option<String>,
    href: Option<String>,
    display_name: Option<String>,
    enabled: Option<bool>,
}

impl<'de> Deserialize<'de> for CloudRegion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = CloudRegionWire::deserialize(deserializer)?;
        let mut builder = CloudRegionBuilder::new();
        if wire.kind.as_deref() == Some(CLOUD_REGION_LINK_KIND) {
            builder = builder.link(true);
        }
        if let Some(value) = wire.id {
            builder = builder.id(value);
        }
        if let Some(value) = wire.href {
            builder = builder.href(value);
        }
        if let Some(value) = wire.display_name {
            builder = builder.display_name(value);
        }
        if let Some(value) = wire.enabled {
            builder = builder.enabled(value);
        }
        builder.build().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_fields_report_zero_values() {
        let region = CloudRegionBuilder::new().id("eu-west-1").build().unwrap();
        assert_eq!(region.id(), "eu-west-1");
        assert_eq!(region.get_id(), Some("eu-west-1"));
        assert_eq!(region.display_name(), "");
        assert_eq!(region.get_display_name(), None);
        assert!(!region.enabled());
        assert_eq!(region.get_enabled(), None);
    }

    #[test]
    fn test_set_to_zero_is_present() {
        let region = CloudRegionBuilder::new()
            .display_name("")
            .enabled(false)
            .build()
            .unwrap();
        assert_eq!(region.get_display_name(), Some(""));
        assert_eq!(region.get_enabled(), Some(false));
    }

    #[test]
    fn test_kind_follows_link_bit() {
        let full = CloudRegionBuilder::new().id("r").build().unwrap();
        assert_eq!(full.kind(), CLOUD_REGION_KIND);
        assert!(!full.link());

        let stub = CloudRegionBuilder::new().link(true).id("r").build().unwrap();
        assert_eq!(stub.kind(), CLOUD_REGION_LINK_KIND);
        assert!(stub.link());
    }

    #[test]
    fn test_empty_ignores_link_bit() {
        let stub = CloudRegionBuilder::new().link(true).build().unwrap();
        assert!(stub.empty());
        assert!(!CloudRegionBuilder::new().id("r").build().unwrap().empty());
    }
}
