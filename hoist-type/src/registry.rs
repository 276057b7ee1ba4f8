//! Host type handles and the name → type registry.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::{Error, Primitive, TypeName};

// ============================================================================
// HostType
// ============================================================================

/// How a [`HostType`] is backed.
#[derive(Debug, Clone)]
pub enum TypeKind {
    /// A scalar primitive.
    Primitive(Primitive),
    /// A registered Rust type.
    Named {
        /// Identity of the backing Rust type.
        id: TypeId,
    },
    /// An array over an element type.
    Array {
        /// The element type.
        element: HostType,
    },
}

/// Cheap-to-clone handle describing a resolvable host type.
///
/// Equality, hashing, and display are by canonical name; array names are
/// the element name plus `[]`. Named types are minted only by
/// [`TypeRegistry::register`], so two handles with the same name always
/// describe the same type.
#[derive(Clone)]
pub struct HostType(Arc<TypeInfo>);

#[derive(Debug)]
struct TypeInfo {
    name: String,
    kind: TypeKind,
}

impl HostType {
    /// The handle for a primitive.
    #[must_use]
    pub fn primitive(primitive: Primitive) -> Self {
        Self(Arc::new(TypeInfo {
            name: primitive.name().to_string(),
            kind: TypeKind::Primitive(primitive),
        }))
    }

    /// The array type over `element`.
    #[must_use]
    pub fn array_of(element: HostType) -> Self {
        let name = format!("{}[]", element.name());
        Self(Arc::new(TypeInfo {
            name,
            kind: TypeKind::Array { element },
        }))
    }

    fn named(name: String, id: TypeId) -> Self {
        Self(Arc::new(TypeInfo {
            name,
            kind: TypeKind::Named { id },
        }))
    }

    /// The canonical name (`geo.Shape`, `i32[]`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The backing kind.
    #[must_use]
    pub fn kind(&self) -> &TypeKind {
        &self.0.kind
    }

    /// Whether this is a primitive type.
    #[must_use]
    pub fn is_primitive(&self) -> bool {
        matches!(self.0.kind, TypeKind::Primitive(_))
    }

    /// Whether this is an array type.
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self.0.kind, TypeKind::Array { .. })
    }

    /// The element type of an array, if any.
    #[must_use]
    pub fn element(&self) -> Option<&HostType> {
        match &self.0.kind {
            TypeKind::Array { element } => Some(element),
            _ => None,
        }
    }

    /// Identity of the backing Rust type; `None` for arrays.
    #[must_use]
    pub fn rust_type_id(&self) -> Option<TypeId> {
        match &self.0.kind {
            TypeKind::Primitive(p) => Some(p.rust_type_id()),
            TypeKind::Named { id } => Some(*id),
            TypeKind::Array { .. } => None,
        }
    }
}

impl fmt::Debug for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostType({})", self.0.name)
    }
}

impl fmt::Display for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}

impl PartialEq for HostType {
    fn eq(&self, other: &Self) -> bool {
        self.0.name == other.0.name
    }
}

impl Eq for HostType {}

impl Hash for HostType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.name.hash(state);
    }
}

// ============================================================================
// TypeRegistry
// ============================================================================

/// Registry of named host types, keyed by dotted path.
///
/// The runtime analog of reflective class lookup: embedders register the
/// Rust types scripts may resolve by name. Primitives are built in,
/// resolve first, and cannot be shadowed. Lookups never mutate the
/// registry.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    named: HashMap<String, HostType>,
}

impl TypeRegistry {
    /// An empty registry. Primitives are built in and need no
    /// registration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` under `path`.
    ///
    /// `path` must parse as a non-array [`TypeName`]. Primitive names
    /// are reserved, and each path can be registered once.
    pub fn register<T: Any>(&mut self, path: &str) -> Result<HostType, Error> {
        let name: TypeName = path.parse()?;
        if name.is_array() {
            return Err(Error::NotRegistrable(name.to_string()));
        }
        if Primitive::from_name(name.base()).is_some() {
            return Err(Error::Reserved(name.base().to_string()));
        }
        if self.named.contains_key(name.base()) {
            return Err(Error::Duplicate(name.base().to_string()));
        }

        let ty = HostType::named(name.base().to_string(), TypeId::of::<T>());
        self.named.insert(name.base().to_string(), ty.clone());
        tracing::debug!(
            path = name.base(),
            rust = std::any::type_name::<T>(),
            "registered host type"
        );
        Ok(ty)
    }

    /// Exact lookup by registered path. No primitive table, no nested
    /// fallback.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&HostType> {
        self.named.get(path)
    }

    /// Resolve a parsed type name.
    ///
    /// Resolution order: primitive table, exact registered path, then
    /// one nested-type fallback ([`TypeName::nested_alternate`]). Array
    /// suffixes wrap the resolved element once per dimension.
    pub fn resolve(&self, name: &TypeName) -> Result<HostType, Error> {
        let mut ty = self.resolve_base(name)?;
        for _ in 0..name.dims() {
            ty = HostType::array_of(ty);
        }
        Ok(ty)
    }

    /// Parse and resolve in one step.
    pub fn resolve_str(&self, s: &str) -> Result<HostType, Error> {
        self.resolve(&s.parse()?)
    }

    /// Number of registered named types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.named.len()
    }

    /// Whether no named types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.named.is_empty()
    }

    fn resolve_base(&self, name: &TypeName) -> Result<HostType, Error> {
        if let Some(primitive) = Primitive::from_name(name.base()) {
            return Ok(HostType::primitive(primitive));
        }
        if let Some(ty) = self.named.get(name.base()) {
            return Ok(ty.clone());
        }
        if let Some(alt) = name.nested_alternate() {
            if let Some(ty) = self.named.get(alt.base()) {
                return Ok(ty.clone());
            }
        }
        tracing::debug!(name = %name, "host type not found");
        Err(Error::NotFound(name.to_string()))
    }
}
