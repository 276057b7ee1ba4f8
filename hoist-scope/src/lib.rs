//! # Hoist Scope
//!
//! Script object model and the `Host` interop namespace for embedded
//! scripting runtimes.
//!
//! The crate provides the pieces an engine embedder needs to give scripts
//! a window onto the host:
//!
//! - [`Value`] — the script-visible value universe, including host
//!   objects, native callables, and resolved host types.
//! - [`ScriptObject`] / [`Scope`] — prototype-chained property maps with
//!   attribute bits (READONLY, DONTENUM, PERMANENT) and sealing.
//! - [`HostNamespace`] — the `Host` global object: id-dispatched native
//!   methods for type resolution and host/script value classification.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//!
//! use hoist_scope::{HostNamespace, MethodId, Scope, TypeRegistry, Value};
//!
//! struct Point;
//!
//! let mut registry = TypeRegistry::new();
//! registry.register::<Point>("geo.Point").unwrap();
//!
//! let scope = Scope::new();
//! let ns = HostNamespace::install(&scope, Rc::new(registry), false).unwrap();
//!
//! // Scripts see a non-enumerable `Host` binding on the global.
//! assert!(scope.global().get("Host").is_some());
//! assert_eq!(ns.object().to_string_tag(), "[object Host]");
//!
//! // Host.type("geo.Point[]")
//! let ty = ns
//!     .call(MethodId::Type, &[Value::from("geo.Point[]")])
//!     .unwrap();
//! assert!(ty.is_type());
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

mod namespace;
mod object;
mod value;

use thiserror::Error;

pub use hoist_type::{HostType, Primitive, TypeName, TypeRegistry};
pub use namespace::{HostNamespace, MethodId, TAG};
pub use object::{Attributes, Scope, ScriptObject};
pub use value::{HostFunction, HostObject, NativeFn, Value};

// ============================================================================
// Errors
// ============================================================================

/// Errors produced by object mutation and namespace dispatch.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// Mutation of a sealed object.
    #[error("object is sealed: cannot modify '{0}'")]
    Sealed(String),
    /// Assignment to a read-only property.
    #[error("property '{0}' is read-only")]
    ReadOnly(String),
    /// A prototype assignment that would make the chain cyclic.
    #[error("prototype chain would contain a cycle")]
    PrototypeCycle,
    /// A host object payload that does not match its claimed host type.
    #[error("payload '{found}' does not match host type '{expected}'")]
    TypeMismatch {
        /// Name of the claimed host type.
        expected: String,
        /// Rust type name of the offending payload.
        found: &'static str,
    },
    /// A declared method slot with no implementation.
    #[error("'{}' is not implemented", .0.name())]
    Unimplemented(MethodId),
    /// Failure raised by an embedder-provided native function.
    #[error("{0}")]
    Native(String),
}

// ============================================================================
// Tests
// ============================================================================
