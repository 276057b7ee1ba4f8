//! Script-visible values and host handles.

use std::any::{Any, TypeId};
use std::fmt;
use std::rc::Rc;

use hoist_type::HostType;

use crate::{Error, ScriptObject};

// ============================================================================
// Value
// ============================================================================

/// The script-visible value universe.
///
/// Data values (`Bool`, `Number`, `String`) compare by value; objects and
/// host handles compare by identity, types by canonical name.
#[derive(Debug, Clone)]
pub enum Value {
    /// The undefined value.
    Undefined,
    /// The null value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number (64-bit float, engine convention).
    Number(f64),
    /// A string.
    String(String),
    /// A script object.
    Object(ScriptObject),
    /// A host object: a typed native payload.
    HostObject(HostObject),
    /// A native callable.
    HostFunction(HostFunction),
    /// A resolved host type.
    Type(HostType),
}

impl Value {
    /// Whether this is a script object (an engine-side object).
    #[must_use]
    pub fn is_script_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Whether this is host-side: a host object, native callable, or
    /// resolved type.
    ///
    /// Primitives, `Null`, and `Undefined` are neither host nor script
    /// objects.
    #[must_use]
    pub fn is_host_object(&self) -> bool {
        matches!(
            self,
            Self::HostObject(_) | Self::HostFunction(_) | Self::Type(_)
        )
    }

    /// Whether this is a native callable.
    #[must_use]
    pub fn is_host_function(&self) -> bool {
        matches!(self, Self::HostFunction(_))
    }

    /// Whether this is a resolved host type.
    #[must_use]
    pub fn is_type(&self) -> bool {
        matches!(self, Self::Type(_))
    }

    /// The name of this value's case (`"undefined"`, `"number"`,
    /// `"hostobject"`, ...). Not JavaScript `typeof`: `Null` reports
    /// `"null"`.
    #[must_use]
    pub fn type_of(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Object(_) => "object",
            Self::HostObject(_) => "hostobject",
            Self::HostFunction(_) => "hostfunction",
            Self::Type(_) => "type",
        }
    }

    /// JavaScript-flavored string coercion, as applied to the argument
    /// of the namespace's `type` method.
    #[must_use]
    pub fn coerce_string(&self) -> String {
        match self {
            Self::Undefined => "undefined".to_string(),
            Self::Null => "null".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) if n.is_nan() => "NaN".to_string(),
            Self::Number(n) if n.is_infinite() => {
                if *n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
            },
            Self::Number(n) => format!("{n}"),
            Self::String(s) => s.clone(),
            Self::Object(o) => o.to_string_tag(),
            Self::HostObject(o) => format!("[object {}]", o.ty().name()),
            Self::HostFunction(f) => {
                format!("function {}() {{ [native code] }}", f.name())
            },
            Self::Type(t) => t.name().to_string(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a.ptr_eq(b),
            (Self::HostObject(a), Self::HostObject(b)) => a.ptr_eq(b),
            (Self::HostFunction(a), Self::HostFunction(b)) => a.ptr_eq(b),
            (Self::Type(a), Self::Type(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<ScriptObject> for Value {
    fn from(o: ScriptObject) -> Self {
        Self::Object(o)
    }
}

impl From<HostObject> for Value {
    fn from(o: HostObject) -> Self {
        Self::HostObject(o)
    }
}

impl From<HostFunction> for Value {
    fn from(f: HostFunction) -> Self {
        Self::HostFunction(f)
    }
}

impl From<HostType> for Value {
    fn from(t: HostType) -> Self {
        Self::Type(t)
    }
}

// ============================================================================
// HostObject
// ============================================================================

/// A typed native payload exposed to scripts.
///
/// The payload is shared; clones alias the same native value. The paired
/// [`HostType`] is checked against the payload's [`TypeId`] at
/// construction, so a handle's type always describes its payload.
#[derive(Clone)]
pub struct HostObject {
    data: Rc<dyn Any>,
    ty: HostType,
}

impl HostObject {
    /// Wrap `value` as an instance of `ty`.
    ///
    /// Fails with [`Error::TypeMismatch`] unless `ty` is backed by
    /// exactly `T`.
    pub fn new<T: Any>(value: T, ty: HostType) -> Result<Self, Error> {
        if ty.rust_type_id() != Some(TypeId::of::<T>()) {
            return Err(Error::TypeMismatch {
                expected: ty.name().to_string(),
                found: std::any::type_name::<T>(),
            });
        }
        Ok(Self {
            data: Rc::new(value),
            ty,
        })
    }

    /// The host type of this object.
    #[must_use]
    pub fn ty(&self) -> &HostType {
        &self.ty
    }

    /// Borrow the payload as `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.data.downcast_ref()
    }

    /// Whether this object is an instance of `ty`.
    #[must_use]
    pub fn is_instance_of(&self, ty: &HostType) -> bool {
        &self.ty == ty
    }

    /// Identity comparison: whether both handles alias one payload.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }
}

impl fmt::Debug for HostObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostObject({})", self.ty.name())
    }
}

// ============================================================================
// HostFunction
// ============================================================================

/// Boxed native function signature.
pub type NativeFn = dyn Fn(&[Value]) -> Result<Value, Error>;

/// A named native callable with a declared arity.
///
/// Arity is advisory — [`call`](Self::call) passes arguments through
/// unchecked, and implementations read missing arguments as `Undefined`.
#[derive(Clone)]
pub struct HostFunction {
    name: Rc<str>,
    arity: usize,
    func: Rc<NativeFn>,
}

impl HostFunction {
    /// Wrap a native function.
    pub fn new<F>(name: &str, arity: usize, func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, Error> + 'static,
    {
        Self {
            name: Rc::from(name),
            arity,
            func: Rc::new(func),
        }
    }

    /// The function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared parameter count.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Invoke the function with `args`.
    pub fn call(&self, args: &[Value]) -> Result<Value, Error> {
        (self.func)(args)
    }

    /// Identity comparison: whether both handles wrap one function.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for HostFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostFunction({}/{})", self.name, self.arity)
    }
}
