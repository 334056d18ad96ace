//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value** — two value
/// objects with the same attributes are the same value. An `EmailAddress`
/// is a value object; a `Session` is an entity (same user, new token, still
/// the same session holder).
///
/// The trait requires:
/// - **Clone**: values are cheap to copy around
/// - **PartialEq**: compared by attribute values
/// - **Debug**: loggable/testable (implementations holding secrets should
///   redact in their `Debug` impl)
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
