//! Record build errors.

use thiserror::Error;

/// Error produced when finalizing a builder into an immutable record.
///
/// Build failures propagate from the innermost nested builder outwards;
/// a failed build never yields a partially formed record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {type_name}: {reason}")]
pub struct BuildError {
    type_name: &'static str,
    reason: String,
}

impl BuildError {
    pub(crate) fn new(type_name: &'static str, reason: impl Into<String>) -> Self {
        Self {
            type_name,
            reason: reason.into(),
        }
    }

    /// Name of the record type whose invariant was violated.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Human-readable description of the violated invariant.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}
