//! # Hoist Type
//!
//! Host type model for embedded scripting runtimes: primitives, validated
//! script-side type names, and a registry resolving names to host types.
//!
//! ## Type names
//!
//! Scripts refer to host types by string — a dotted identifier path plus
//! optional `[]` array suffixes (`geo.Shape`, `i32[]`). [`TypeName`] parses
//! and validates these strings: segments follow UAX #31, input is
//! NFKC-normalized, and `$` is accepted mid-segment because registries
//! flatten nested type names with it (`geo.Shape$Circle`).
//!
//! ## Resolution
//!
//! Rust has no runtime class lookup, so embedders populate a
//! [`TypeRegistry`] with the types scripts may name. Resolution checks the
//! built-in [`Primitive`] table first, then the registered path, then one
//! nested-type fallback with the last `.` replaced by `$`. Array suffixes
//! wrap the resolved element, one [`HostType`] per dimension.
//!
//! # Example
//!
//! ```
//! use hoist_type::TypeRegistry;
//!
//! struct Point;
//!
//! let mut registry = TypeRegistry::new();
//! registry.register::<Point>("geo.Point").unwrap();
//!
//! let ty = registry.resolve_str("geo.Point[]").unwrap();
//! assert_eq!(ty.name(), "geo.Point[]");
//! assert_eq!(ty.element().unwrap().name(), "geo.Point");
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

mod name;
mod primitive;
mod registry;

use thiserror::Error;

pub use name::TypeName;
pub use primitive::Primitive;
pub use registry::{HostType, TypeKind, TypeRegistry};

/// Maximum byte length for a type name path (after NFKC normalization,
/// excluding array suffixes).
pub const TYPE_NAME_MAX: usize = 256;

// ============================================================================
// Errors
// ============================================================================

/// Errors produced by type name parsing and registry operations.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The type name is empty.
    #[error("type name cannot be empty")]
    Empty,
    /// The dotted path contains an empty segment.
    #[error("type name contains an empty path segment")]
    EmptySegment,
    /// A path segment starts with an invalid character.
    #[error("path segment cannot start with: '{0}'")]
    InvalidStart(char),
    /// The name contains invalid characters.
    #[error("contains invalid characters: '{0}'")]
    InvalidCharacters(String),
    /// The path exceeds [`TYPE_NAME_MAX`] bytes.
    #[error("type name path cannot be more than {} bytes", TYPE_NAME_MAX)]
    TooLong,
    /// No host type is registered under the given path.
    #[error("no host type registered under '{0}'")]
    NotFound(String),
    /// A host type is already registered under the given path.
    #[error("a host type is already registered under '{0}'")]
    Duplicate(String),
    /// The path is a primitive name, which cannot be registered.
    #[error("'{0}' is a primitive name and cannot be registered")]
    Reserved(String),
    /// Array types are constructed during resolution, never registered.
    #[error("array types cannot be registered: '{0}'")]
    NotRegistrable(String),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests;
