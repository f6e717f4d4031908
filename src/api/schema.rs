//! Wire-schema field tables
//!
//! Each record declares one static table mapping its in-memory fields to wire
//! names plus a required flag. Builders validate against the table, so the
//! error message for a missing field always carries the wire name, and tests
//! pin the tables to the serde output so the two cannot drift.

use crate::error::ValidationError;

/// One field of a record's wire schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name in the serialized JSON object
    pub wire_name: &'static str,
    /// Whether construction must fail when the field is absent
    pub required: bool,
}

impl FieldSpec {
    /// Required field
    pub const fn required(wire_name: &'static str) -> Self {
        Self {
            wire_name,
            required: true,
        }
    }

    /// Optional field, omitted from output when absent
    pub const fn optional(wire_name: &'static str) -> Self {
        Self {
            wire_name,
            required: false,
        }
    }
}

/// A record with a declared wire schema
pub trait Schema {
    /// Field table, in declaration order
    const FIELDS: &'static [FieldSpec];

    /// Wire names of the required fields
    fn required_fields() -> impl Iterator<Item = &'static str> {
        Self::FIELDS
            .iter()
            .filter(|f| f.required)
            .map(|f| f.wire_name)
    }
}

/// Builder-side check that a required slot holds a value.
///
/// `wire_name` must be declared required in `S`'s field table; the resulting
/// message is "<wire_name> is required".
pub fn require<S, T>(wire_name: &'static str, slot: &Option<T>) -> Result<T, ValidationError>
where
    S: Schema,
    T: Clone,
{
    debug_assert!(
        S::FIELDS
            .iter()
            .any(|f| f.wire_name == wire_name && f.required),
        "{wire_name} is not declared required in the field table"
    );
    slot.clone().ok_or(ValidationError::missing(wire_name))
}
