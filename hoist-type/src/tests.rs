//! Tests for the host type model.

use std::any::TypeId;
use std::str::FromStr;

use crate::{Error, HostType, Primitive, TYPE_NAME_MAX, TypeKind, TypeName, TypeRegistry};

struct Point;
struct Circle;

// ============================================================================
// Primitive
// ============================================================================

#[test]
fn primitive_name_roundtrip() {
    for p in Primitive::ALL {
        assert_eq!(
            Primitive::from_name(p.name()),
            Some(p),
            "'{}' must roundtrip through from_name",
            p.name()
        );
    }
}

#[test]
fn primitive_from_name_unknown() {
    for s in ["int", "boolean", "I32", "f64 ", ""] {
        assert_eq!(Primitive::from_name(s), None, "'{s}' is not a primitive");
    }
}

#[test]
fn primitive_type_ids_distinct() {
    assert_ne!(Primitive::I32.rust_type_id(), Primitive::U32.rust_type_id());
    assert_eq!(Primitive::Bool.rust_type_id(), TypeId::of::<bool>());
    assert_eq!(Primitive::Unit.rust_type_id(), TypeId::of::<()>());
}

#[test]
fn primitive_display() {
    assert_eq!(Primitive::Isize.to_string(), "isize");
    assert_eq!(Primitive::F64.to_string(), "f64");
}

#[cfg(feature = "serde")]
#[test]
fn primitive_serde_roundtrip() {
    let json = serde_json::to_string(&Primitive::I32).unwrap();
    assert_eq!(json, "\"i32\"");
    let back: Primitive = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Primitive::I32);
}

// ============================================================================
// TypeName — valid inputs
// ============================================================================

#[test]
fn name_valid_representative() {
    // ASCII path, Unicode, nested flattened name — 3 representative cases
    let valid = ["geo.Shape", "漢字.かな", "geo.Shape$Circle"];
    for s in valid {
        assert!(TypeName::try_from(s).is_ok(), "expected '{s}' to be valid");
    }
}

#[test]
fn name_single_segment() {
    let name: TypeName = "Point".parse().unwrap();
    assert_eq!(name.base(), "Point");
    assert_eq!(name.dims(), 0);
    assert!(!name.is_array());
    assert_eq!(name.segments().count(), 1);
}

#[test]
fn name_underscore_start() {
    assert!(TypeName::try_from("_private.Type").is_ok());
}

#[test]
fn name_array_dims() {
    let name: TypeName = "i32[][]".parse().unwrap();
    assert_eq!(name.base(), "i32");
    assert_eq!(name.dims(), 2);
    assert!(name.is_array());
}

#[test]
fn name_display_roundtrip() {
    for s in ["geo.Point", "i32[]", "a.b.C$D[][]"] {
        let name: TypeName = s.parse().unwrap();
        assert_eq!(name.to_string(), s);
        let back: TypeName = name.to_string().parse().unwrap();
        assert_eq!(back, name);
    }
}

#[test]
fn name_segments() {
    let name: TypeName = "a.b.c[]".parse().unwrap();
    let segments: Vec<&str> = name.segments().collect();
    assert_eq!(segments, ["a", "b", "c"]);
}

#[test]
fn name_nfkc_normalization() {
    // NFKC: the ligature ﬁ normalizes to "fi"
    let name: TypeName = "ﬁlter.Node".parse().unwrap();
    assert_eq!(name.base(), "filter.Node");

    // Composed vs decomposed ñ produce the same name
    let composed: TypeName = "año.X".parse().unwrap();
    let decomposed: TypeName = "an\u{0303}o.X".parse().unwrap();
    assert_eq!(composed, decomposed);
}

// ============================================================================
// TypeName — invalid inputs
// ============================================================================

#[test]
fn name_rejects_empty() {
    assert_eq!(TypeName::from_str(""), Err(Error::Empty));
    // Bare array suffix has an empty path
    assert_eq!(TypeName::from_str("[]"), Err(Error::Empty));
}

#[test]
fn name_rejects_empty_segment() {
    for s in ["a..b", ".a", "a.", "a.b."] {
        assert_eq!(TypeName::from_str(s), Err(Error::EmptySegment), "'{s}'");
    }
}

#[test]
fn name_rejects_invalid_start() {
    for (input, expected) in [("9type", '9'), ("a.-b", '-'), ("$x", '$')] {
        assert_eq!(
            TypeName::from_str(input),
            Err(Error::InvalidStart(expected)),
            "'{input}'"
        );
    }
}

#[test]
fn name_rejects_invalid_chars() {
    // Multiple invalid chars collected
    assert_eq!(
        TypeName::from_str("a!@#b"),
        Err(Error::InvalidCharacters("!@#".into())),
    );
    // Space
    assert_eq!(
        TypeName::from_str("geo. Shape"),
        Err(Error::InvalidStart(' ')),
    );
    // Unterminated bracket is not an array suffix
    assert_eq!(
        TypeName::from_str("i32["),
        Err(Error::InvalidCharacters("[".into())),
    );
    // Suffixes are trailing only
    assert_eq!(
        TypeName::from_str("a[].b"),
        Err(Error::InvalidCharacters("[]".into())),
    );
}

#[test]
fn name_rejects_too_long() {
    let at_limit = "a".repeat(TYPE_NAME_MAX);
    assert!(TypeName::from_str(&at_limit).is_ok());

    let over_limit = "a".repeat(TYPE_NAME_MAX + 1);
    assert_eq!(TypeName::from_str(&over_limit), Err(Error::TooLong));
}

// ============================================================================
// TypeName — nested fallback
// ============================================================================

#[test]
fn nested_alternate_replaces_last_dot() {
    let name: TypeName = "a.b.C.D".parse().unwrap();
    let alt = name.nested_alternate().unwrap();
    assert_eq!(alt.base(), "a.b.C$D");
}

#[test]
fn nested_alternate_keeps_dims() {
    let name: TypeName = "geo.Shape.Circle[]".parse().unwrap();
    let alt = name.nested_alternate().unwrap();
    assert_eq!(alt.base(), "geo.Shape$Circle");
    assert_eq!(alt.dims(), 1);
}

#[test]
fn nested_alternate_single_segment() {
    let name: TypeName = "Point".parse().unwrap();
    assert!(name.nested_alternate().is_none());
}

#[cfg(feature = "serde")]
#[test]
fn name_serde_roundtrip() {
    let name: TypeName = "geo.Shape[]".parse().unwrap();
    let json = serde_json::to_string(&name).unwrap();
    assert_eq!(json, "\"geo.Shape[]\"");
    let back: TypeName = serde_json::from_str(&json).unwrap();
    assert_eq!(back, name);
}

#[cfg(feature = "serde")]
#[test]
fn name_serde_rejects_invalid() {
    let result: Result<TypeName, _> = serde_json::from_str("\"9bad\"");
    assert!(result.is_err());
}

// ============================================================================
// HostType
// ============================================================================

#[test]
fn host_type_primitive() {
    let ty = HostType::primitive(Primitive::I64);
    assert_eq!(ty.name(), "i64");
    assert!(ty.is_primitive());
    assert!(!ty.is_array());
    assert_eq!(ty.element(), None);
    assert_eq!(ty.rust_type_id(), Some(TypeId::of::<i64>()));
}

#[test]
fn host_type_array_name() {
    let ty = HostType::array_of(HostType::primitive(Primitive::U8));
    assert_eq!(ty.name(), "u8[]");
    assert!(ty.is_array());
    assert_eq!(ty.element().unwrap().name(), "u8");
    assert_eq!(ty.rust_type_id(), None, "arrays have no backing TypeId");
}

#[test]
fn host_type_equality_by_name() {
    let a = HostType::primitive(Primitive::Bool);
    let b = HostType::primitive(Primitive::Bool);
    assert_eq!(a, b, "separately built handles with one name are equal");
    assert_ne!(a, HostType::primitive(Primitive::Char));
}

#[test]
fn host_type_display() {
    let ty = HostType::array_of(HostType::primitive(Primitive::F32));
    assert_eq!(ty.to_string(), "f32[]");
}

// ============================================================================
// TypeRegistry
// ============================================================================

#[test]
fn registry_register_and_resolve() {
    let mut registry = TypeRegistry::new();
    let registered = registry.register::<Point>("geo.Point").unwrap();

    let resolved = registry.resolve_str("geo.Point").unwrap();
    assert_eq!(resolved, registered);
    assert_eq!(resolved.rust_type_id(), Some(TypeId::of::<Point>()));
    assert!(matches!(resolved.kind(), TypeKind::Named { .. }));
}

#[test]
fn registry_rejects_duplicate() {
    let mut registry = TypeRegistry::new();
    registry.register::<Point>("geo.Point").unwrap();
    assert_eq!(
        registry.register::<Circle>("geo.Point"),
        Err(Error::Duplicate("geo.Point".into())),
    );
}

#[test]
fn registry_rejects_primitive_name() {
    let mut registry = TypeRegistry::new();
    assert_eq!(
        registry.register::<Point>("i32"),
        Err(Error::Reserved("i32".into())),
    );
}

#[test]
fn registry_rejects_array_registration() {
    let mut registry = TypeRegistry::new();
    assert_eq!(
        registry.register::<Point>("geo.Point[]"),
        Err(Error::NotRegistrable("geo.Point[]".into())),
    );
}

#[test]
fn registry_register_validates_path() {
    let mut registry = TypeRegistry::new();
    assert_eq!(
        registry.register::<Point>("geo..Point"),
        Err(Error::EmptySegment),
    );
}

#[test]
fn registry_resolves_primitives_without_registration() {
    let registry = TypeRegistry::new();
    assert!(registry.is_empty());
    let ty = registry.resolve_str("f64").unwrap();
    assert!(ty.is_primitive());
}

#[test]
fn registry_resolves_primitive_array() {
    let registry = TypeRegistry::new();
    let ty = registry.resolve_str("i32[][]").unwrap();
    assert_eq!(ty.name(), "i32[][]");
    assert_eq!(ty.element().unwrap().name(), "i32[]");
    assert!(ty.element().unwrap().element().unwrap().is_primitive());
}

#[test]
fn registry_resolves_named_array() {
    let mut registry = TypeRegistry::new();
    registry.register::<Point>("geo.Point").unwrap();
    let ty = registry.resolve_str("geo.Point[]").unwrap();
    assert_eq!(ty.name(), "geo.Point[]");
    assert_eq!(
        ty.element().unwrap().rust_type_id(),
        Some(TypeId::of::<Point>()),
    );
}

#[test]
fn registry_nested_fallback() {
    let mut registry = TypeRegistry::new();
    registry.register::<Circle>("geo.Shape$Circle").unwrap();

    // Scripts write dots; the last one falls back to '$'.
    let ty = registry.resolve_str("geo.Shape.Circle").unwrap();
    assert_eq!(ty.name(), "geo.Shape$Circle");
}

#[test]
fn registry_nested_fallback_single_step() {
    let mut registry = TypeRegistry::new();
    registry.register::<Circle>("a.B$C$D").unwrap();

    // Only the last dot is rewritten; deeper nesting is not discovered.
    assert_eq!(
        registry.resolve_str("a.B.C.D"),
        Err(Error::NotFound("a.B.C.D".into())),
    );
}

#[test]
fn registry_not_found_includes_name() {
    let registry = TypeRegistry::new();
    assert_eq!(
        registry.resolve_str("missing.Type[]"),
        Err(Error::NotFound("missing.Type[]".into())),
    );
}

#[test]
fn registry_get_is_exact() {
    let mut registry = TypeRegistry::new();
    registry.register::<Circle>("geo.Shape$Circle").unwrap();

    assert!(registry.get("geo.Shape$Circle").is_some());
    assert!(registry.get("geo.Shape.Circle").is_none(), "no fallback");
    assert!(registry.get("i32").is_none(), "no primitive table");
}

#[test]
fn registry_len() {
    let mut registry = TypeRegistry::new();
    assert_eq!(registry.len(), 0);
    registry.register::<Point>("geo.Point").unwrap();
    registry.register::<Circle>("geo.Circle").unwrap();
    assert_eq!(registry.len(), 2);
    assert!(!registry.is_empty());
}

#[test]
fn registry_resolve_str_propagates_parse_errors() {
    let registry = TypeRegistry::new();
    assert_eq!(registry.resolve_str(""), Err(Error::Empty));
    assert_eq!(
        registry.resolve_str("9bad"),
        Err(Error::InvalidStart('9')),
    );
}
