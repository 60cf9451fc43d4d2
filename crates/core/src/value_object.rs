//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values
/// (`YearMonth { 2025, 6 }` equals any other `YearMonth { 2025, 6 }`).
/// To "modify" one, build a new value.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
