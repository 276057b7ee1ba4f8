//! The host language's scalar primitives.

use std::any::TypeId;
use std::fmt;

// ============================================================================
// Types
// ============================================================================

/// A scalar primitive of the host language.
///
/// Primitives resolve ahead of the registry and cannot be shadowed by
/// registered names. Each carries the [`TypeId`] of its backing Rust
/// type, so host object payloads can be checked against resolved
/// primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Primitive {
    /// The unit type `()`.
    Unit,
    /// `bool`.
    Bool,
    /// `char`.
    Char,
    /// `i8`.
    I8,
    /// `i16`.
    I16,
    /// `i32`.
    I32,
    /// `i64`.
    I64,
    /// `i128`.
    I128,
    /// `u8`.
    U8,
    /// `u16`.
    U16,
    /// `u32`.
    U32,
    /// `u64`.
    U64,
    /// `u128`.
    U128,
    /// `isize`.
    Isize,
    /// `usize`.
    Usize,
    /// `f32`.
    F32,
    /// `f64`.
    F64,
}

// ============================================================================
// Implementations
// ============================================================================

impl Primitive {
    /// Every primitive, in declaration order.
    pub const ALL: [Primitive; 17] = [
        Primitive::Unit,
        Primitive::Bool,
        Primitive::Char,
        Primitive::I8,
        Primitive::I16,
        Primitive::I32,
        Primitive::I64,
        Primitive::I128,
        Primitive::U8,
        Primitive::U16,
        Primitive::U32,
        Primitive::U64,
        Primitive::U128,
        Primitive::Isize,
        Primitive::Usize,
        Primitive::F32,
        Primitive::F64,
    ];

    /// The canonical lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unit => "unit",
            Self::Bool => "bool",
            Self::Char => "char",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::I128 => "i128",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::U128 => "u128",
            Self::Isize => "isize",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }

    /// Reverse lookup by canonical name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "unit" => Some(Self::Unit),
            "bool" => Some(Self::Bool),
            "char" => Some(Self::Char),
            "i8" => Some(Self::I8),
            "i16" => Some(Self::I16),
            "i32" => Some(Self::I32),
            "i64" => Some(Self::I64),
            "i128" => Some(Self::I128),
            "u8" => Some(Self::U8),
            "u16" => Some(Self::U16),
            "u32" => Some(Self::U32),
            "u64" => Some(Self::U64),
            "u128" => Some(Self::U128),
            "isize" => Some(Self::Isize),
            "usize" => Some(Self::Usize),
            "f32" => Some(Self::F32),
            "f64" => Some(Self::F64),
            _ => None,
        }
    }

    /// The [`TypeId`] of the backing Rust type.
    #[must_use]
    pub fn rust_type_id(self) -> TypeId {
        match self {
            Self::Unit => TypeId::of::<()>(),
            Self::Bool => TypeId::of::<bool>(),
            Self::Char => TypeId::of::<char>(),
            Self::I8 => TypeId::of::<i8>(),
            Self::I16 => TypeId::of::<i16>(),
            Self::I32 => TypeId::of::<i32>(),
            Self::I64 => TypeId::of::<i64>(),
            Self::I128 => TypeId::of::<i128>(),
            Self::U8 => TypeId::of::<u8>(),
            Self::U16 => TypeId::of::<u16>(),
            Self::U32 => TypeId::of::<u32>(),
            Self::U64 => TypeId::of::<u64>(),
            Self::U128 => TypeId::of::<u128>(),
            Self::Isize => TypeId::of::<isize>(),
            Self::Usize => TypeId::of::<usize>(),
            Self::F32 => TypeId::of::<f32>(),
            Self::F64 => TypeId::of::<f64>(),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
