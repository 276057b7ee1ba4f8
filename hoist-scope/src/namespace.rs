//! The `Host` interop namespace.
//!
//! A single global object giving scripts type resolution and host/script
//! value classification. Methods are declared in a fixed slot table with
//! names and arities; dispatch is by slot id.

use std::rc::Rc;

use hoist_type::TypeRegistry;

use crate::{Attributes, Error, HostFunction, Scope, ScriptObject, Value};

/// Global binding name and class tag of the namespace object.
pub const TAG: &str = "Host";

// ============================================================================
// MethodId
// ============================================================================

/// The namespace's method slots.
///
/// The full surface is declared up front; slots without an implementation
/// ([`extend`](Self::Extend), [`from`](Self::From), [`to`](Self::To),
/// [`synchronized`](Self::Synchronized), [`_super`](Self::Super)) dispatch
/// to [`Error::Unimplemented`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodId {
    /// `toSource()` — the tag string.
    ToSource,
    /// `extend(type, impl)` — declared, unimplemented.
    Extend,
    /// `from(hostArray)` — declared, unimplemented.
    From,
    /// `isHostFunction(value)` — native callable check.
    IsHostFunction,
    /// `isHostMethod(value)` — native callable check.
    IsHostMethod,
    /// `isHostObject(value)` — host-side value check.
    IsHostObject,
    /// `isScriptObject(value)` — engine-side object check.
    IsScriptObject,
    /// `isType(value)` — resolved host type check.
    IsType,
    /// `synchronized(fn, lock)` — declared, unimplemented.
    Synchronized,
    /// `to(scriptValue, type)` — declared, unimplemented.
    To,
    /// `type(name)` — resolve a type name against the registry.
    Type,
    /// `typeName(type)` — canonical name of a resolved type.
    TypeName,
    /// `_super(adapter)` — declared, unimplemented.
    Super,
}

impl MethodId {
    /// Every slot, in declaration order.
    pub const ALL: [MethodId; 13] = [
        MethodId::ToSource,
        MethodId::Extend,
        MethodId::From,
        MethodId::IsHostFunction,
        MethodId::IsHostMethod,
        MethodId::IsHostObject,
        MethodId::IsScriptObject,
        MethodId::IsType,
        MethodId::Synchronized,
        MethodId::To,
        MethodId::Type,
        MethodId::TypeName,
        MethodId::Super,
    ];

    /// The script-visible method name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ToSource => "toSource",
            Self::Extend => "extend",
            Self::From => "from",
            Self::IsHostFunction => "isHostFunction",
            Self::IsHostMethod => "isHostMethod",
            Self::IsHostObject => "isHostObject",
            Self::IsScriptObject => "isScriptObject",
            Self::IsType => "isType",
            Self::Synchronized => "synchronized",
            Self::To => "to",
            Self::Type => "type",
            Self::TypeName => "typeName",
            Self::Super => "_super",
        }
    }

    /// The declared parameter count.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::ToSource => 0,
            Self::Extend | Self::Synchronized | Self::To => 2,
            _ => 1,
        }
    }

    /// Reverse lookup by script-visible name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|id| id.name() == name)
    }
}

// ============================================================================
// HostNamespace
// ============================================================================

/// The installed `Host` namespace: the namespace object plus the registry
/// its methods resolve against.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
///
/// use hoist_scope::{HostNamespace, MethodId, Scope, TypeRegistry, Value};
///
/// let scope = Scope::new();
/// let ns = HostNamespace::install(&scope, Rc::new(TypeRegistry::new()), false).unwrap();
///
/// let ty = ns.call(MethodId::Type, &[Value::from("i32[]")]).unwrap();
/// assert!(ty.is_type());
/// ```
pub struct HostNamespace {
    object: ScriptObject,
    registry: Rc<TypeRegistry>,
}

impl HostNamespace {
    /// Build the namespace object and bind it on the scope's global
    /// under [`TAG`], non-enumerable.
    ///
    /// The object's prototype is the scope's `Object` prototype and its
    /// parent scope is the global. Each slot in [`MethodId::ALL`] is
    /// installed as a DONTENUM native function. With `sealed`, the
    /// object is sealed once its methods are in place.
    pub fn install(
        scope: &Scope,
        registry: Rc<TypeRegistry>,
        sealed: bool,
    ) -> Result<Self, Error> {
        let object = ScriptObject::new(TAG);
        object.set_prototype(Some(scope.object_prototype().clone()))?;
        object.set_parent_scope(Some(scope.global().clone()));

        for id in MethodId::ALL {
            let reg = Rc::clone(&registry);
            let func =
                HostFunction::new(id.name(), id.arity(), move |args| dispatch(id, &reg, args));
            object.define_property(id.name(), Value::HostFunction(func), Attributes::DONTENUM)?;
        }

        if sealed {
            object.seal();
        }

        scope
            .global()
            .define_property(TAG, Value::Object(object.clone()), Attributes::DONTENUM)?;

        Ok(Self { object, registry })
    }

    /// The namespace object bound on the global.
    #[must_use]
    pub fn object(&self) -> &ScriptObject {
        &self.object
    }

    /// The registry the namespace resolves against.
    #[must_use]
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Dispatch a method slot directly, bypassing property lookup.
    pub fn call(&self, id: MethodId, args: &[Value]) -> Result<Value, Error> {
        dispatch(id, &self.registry, args)
    }
}

// ============================================================================
// Dispatch
// ============================================================================

/// Execute one method slot.
///
/// Missing arguments read as `Undefined`. `type` coerces its argument to
/// a string and maps every resolution failure to `Null`.
fn dispatch(id: MethodId, registry: &TypeRegistry, args: &[Value]) -> Result<Value, Error> {
    tracing::trace!(method = id.name(), argc = args.len(), "namespace dispatch");
    let first = args.first().cloned().unwrap_or(Value::Undefined);

    match id {
        MethodId::ToSource => Ok(Value::String(TAG.to_string())),
        MethodId::IsHostFunction | MethodId::IsHostMethod => {
            Ok(Value::Bool(first.is_host_function()))
        },
        MethodId::IsHostObject => Ok(Value::Bool(first.is_host_object())),
        MethodId::IsScriptObject => Ok(Value::Bool(first.is_script_object())),
        MethodId::IsType => Ok(Value::Bool(first.is_type())),
        MethodId::Type => {
            let name = first.coerce_string();
            match registry.resolve_str(&name) {
                Ok(ty) => Ok(Value::Type(ty)),
                Err(err) => {
                    tracing::debug!(%name, %err, "type lookup failed");
                    Ok(Value::Null)
                },
            }
        },
        MethodId::TypeName => match first {
            Value::Type(ty) => Ok(Value::String(ty.name().to_string())),
            _ => Ok(Value::Undefined),
        },
        MethodId::Extend
        | MethodId::From
        | MethodId::To
        | MethodId::Synchronized
        | MethodId::Super => Err(Error::Unimplemented(id)),
    }
}
