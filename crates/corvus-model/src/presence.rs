//! Field-presence tracking for partially populated records.
//!
//! The cluster-management API distinguishes "field never set" from "field
//! set to its zero value": a partial update must only send the fields the
//! caller actually touched. Every record therefore carries a [`Presence`]
//! bit-set alongside its fields, one bit per field, plus a reserved bit
//! marking the record as a link stub rather than a full value.

/// Index of a field within a record's presence bit-set.
pub type FieldIndex = u32;

/// Fixed-width presence bit-set carried by every record and builder.
///
/// Bits only accumulate: setting a field through a builder marks its bit,
/// and there is no unset operation. The link bit is the one exception and
/// can be toggled explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Presence(u64);

impl Presence {
    /// Bit reserved to mark a record as a link (reference stub) rather
    /// than a full value. Independent of the field bits.
    pub const LINK: FieldIndex = 63;

    const LINK_MASK: u64 = 1 << Self::LINK;

    /// Create an empty bit-set.
    pub const fn new() -> Self {
        Self(0)
    }

    /// Mark a field as present.
    pub fn mark(&mut self, field: FieldIndex) {
        debug_assert!(field < Self::LINK, "field index collides with link bit");
        self.0 |= 1 << field;
    }

    /// Check whether a field was explicitly set.
    pub fn contains(&self, field: FieldIndex) -> bool {
        self.0 & (1 << field) != 0
    }

    /// Set or clear the link bit.
    pub fn set_link(&mut self, link: bool) {
        if link {
            self.0 |= Self::LINK_MASK;
        } else {
            self.0 &= !Self::LINK_MASK;
        }
    }

    /// Whether this record is a link stub.
    pub fn link(&self) -> bool {
        self.0 & Self::LINK_MASK != 0
    }

    /// True when no field bit is set. The link bit is ignored: a bare
    /// link stub is still an empty record.
    pub fn is_empty(&self) -> bool {
        self.0 & !Self::LINK_MASK == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let presence = Presence::new();
        assert!(presence.is_empty());
        assert!(!presence.link());
        assert!(!presence.contains(0));
    }

    #[test]
    fn test_mark_and_contains() {
        let mut presence = Presence::new();
        presence.mark(3);
        assert!(presence.contains(3));
        assert!(!presence.contains(2));
        assert!(!presence.is_empty());
    }

    #[test]
    fn test_link_bit_independent_of_emptiness() {
        let mut presence = Presence::new();
        presence.set_link(true);
        assert!(presence.link());
        assert!(presence.is_empty());

        presence.set_link(false);
        assert!(!presence.link());
    }

    #[test]
    fn test_marks_accumulate() {
        let mut presence = Presence::new();
        presence.mark(0);
        presence.mark(5);
        presence.mark(0);
        assert!(presence.contains(0));
        assert!(presence.contains(5));
    }
}
