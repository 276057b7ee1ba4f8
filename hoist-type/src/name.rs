//! Validated script-side type names.
//!
//! A [`TypeName`] is the parsed form of the string scripts pass to the
//! namespace's `type` method: a dotted identifier path plus zero or more
//! trailing `[]` array suffixes.

use std::fmt;
use std::str::FromStr;

use unicode_normalization::UnicodeNormalization;

use crate::{Error, TYPE_NAME_MAX};

// ============================================================================
// Types
// ============================================================================

/// A parsed, validated script-side type name.
///
/// Grammar: `path ("[]")*` where `path` is `segment ("." segment)*`.
/// Segments follow UAX #31 with two extensions: `_` may start a segment
/// and `$` may continue one (registries flatten nested type names with
/// `$`, as in `geo.Shape$Circle`). Input is NFKC-normalized before
/// validation, and the path is capped at [`TYPE_NAME_MAX`] bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeName {
    base: String,
    dims: usize,
}

// ============================================================================
// Implementations
// ============================================================================

impl TypeName {
    /// The dotted path, without array suffixes.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// The path segments between dots.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.base.split('.')
    }

    /// Number of array dimensions (`[]` suffixes).
    #[must_use]
    pub const fn dims(&self) -> usize {
        self.dims
    }

    /// Whether the name carries at least one array suffix.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        self.dims > 0
    }

    /// The nested-type fallback: a copy of this name with the **last**
    /// `.` replaced by `$`.
    ///
    /// Registries store nested type names flattened with `$`, while
    /// scripts write dots throughout. Returns `None` when the path has a
    /// single segment. The fallback is a single step — resolution does
    /// not iterate it.
    #[must_use]
    pub fn nested_alternate(&self) -> Option<TypeName> {
        let idx = self.base.rfind('.')?;
        let mut alt = self.base.clone();
        alt.replace_range(idx..=idx, "$");
        Some(TypeName {
            base: alt,
            dims: self.dims,
        })
    }

    /// NFKC-normalize and validate a raw name string.
    fn validate(s: &str) -> Result<Self, Error> {
        // Array suffixes are ASCII and unaffected by NFKC; strip them
        // before normalizing the path.
        let mut rest = s;
        let mut dims = 0usize;
        while let Some(stripped) = rest.strip_suffix("[]") {
            rest = stripped;
            dims += 1;
        }

        let base: String = rest.nfkc().collect();

        if base.is_empty() {
            return Err(Error::Empty);
        }
        if base.len() > TYPE_NAME_MAX {
            return Err(Error::TooLong);
        }

        let mut invalid = String::new();
        for segment in base.split('.') {
            let mut chars = segment.chars();
            match chars.next() {
                None => return Err(Error::EmptySegment),
                Some(c) if is_segment_start(c) => {},
                Some(c) => return Err(Error::InvalidStart(c)),
            }
            invalid.extend(chars.filter(|&c| !is_segment_continue(c)));
        }

        if !invalid.is_empty() {
            return Err(Error::InvalidCharacters(invalid));
        }

        Ok(TypeName { base, dims })
    }
}

/// Whether `c` may start a path segment.
fn is_segment_start(c: char) -> bool {
    unicode_ident::is_xid_start(c) || c == '_'
}

/// Whether `c` may continue a path segment.
fn is_segment_continue(c: char) -> bool {
    unicode_ident::is_xid_continue(c) || c == '$'
}

// ============================================================================
// Conversions
// ============================================================================

/// Display as the path plus one `[]` per array dimension.
impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)?;
        for _ in 0..self.dims {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

impl FromStr for TypeName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::validate(s)
    }
}

impl TryFrom<&str> for TypeName {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::validate(s)
    }
}

impl TryFrom<String> for TypeName {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::validate(&s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for TypeName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TypeName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
