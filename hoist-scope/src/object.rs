//! Script objects, property attributes, and scopes.

use std::cell::RefCell;
use std::fmt;
use std::ops::BitOr;
use std::rc::Rc;

use crate::{Error, Value};

// ============================================================================
// Attributes
// ============================================================================

/// Property attribute bits.
///
/// The classic engine triple: READONLY blocks [`ScriptObject::put`],
/// DONTENUM hides the property from [`ScriptObject::keys`], PERMANENT
/// makes it survive [`ScriptObject::delete`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Attributes(u8);

impl Attributes {
    /// No attribute bits set.
    pub const EMPTY: Attributes = Attributes(0);
    /// The property rejects assignment.
    pub const READONLY: Attributes = Attributes(1);
    /// The property is hidden from enumeration.
    pub const DONTENUM: Attributes = Attributes(1 << 1);
    /// The property survives deletion.
    pub const PERMANENT: Attributes = Attributes(1 << 2);

    /// Whether every bit of `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Attributes) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Attributes {
    type Output = Attributes;

    fn bitor(self, rhs: Attributes) -> Attributes {
        Attributes(self.0 | rhs.0)
    }
}

// ============================================================================
// ScriptObject
// ============================================================================

struct Slot {
    value: Value,
    attrs: Attributes,
}

struct ObjectData {
    class_name: Rc<str>,
    prototype: Option<ScriptObject>,
    parent_scope: Option<ScriptObject>,
    // Insertion-ordered; host-side objects carry few properties and
    // enumeration order must be stable.
    slots: Vec<(String, Slot)>,
    sealed: bool,
}

/// A shared-mutable script object: class name, attributed properties,
/// prototype and parent-scope links, and sealing.
///
/// Cloning shares the object (`Rc` semantics); equality is identity.
/// Sealing is irreversible — every subsequent mutation errors with
/// [`Error::Sealed`].
#[derive(Clone)]
pub struct ScriptObject {
    inner: Rc<RefCell<ObjectData>>,
}

impl ScriptObject {
    /// Create an empty object with the given class name.
    #[must_use]
    pub fn new(class_name: &str) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObjectData {
                class_name: Rc::from(class_name),
                prototype: None,
                parent_scope: None,
                slots: Vec::new(),
                sealed: false,
            })),
        }
    }

    /// The class name, as reported by [`to_string_tag`](Self::to_string_tag).
    #[must_use]
    pub fn class_name(&self) -> Rc<str> {
        self.inner.borrow().class_name.clone()
    }

    /// The `Object.prototype.toString` result: `[object <ClassName>]`.
    #[must_use]
    pub fn to_string_tag(&self) -> String {
        format!("[object {}]", self.class_name())
    }

    /// Define or redefine an own property with explicit attributes.
    ///
    /// Redefinition replaces both value and attributes regardless of
    /// READONLY; sealed objects refuse.
    pub fn define_property(
        &self,
        name: &str,
        value: Value,
        attrs: Attributes,
    ) -> Result<(), Error> {
        let mut data = self.inner.borrow_mut();
        if data.sealed {
            return Err(Error::Sealed(name.to_string()));
        }
        match data.slots.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => *slot = Slot { value, attrs },
            None => data.slots.push((name.to_string(), Slot { value, attrs })),
        }
        Ok(())
    }

    /// Set an own property value, creating it with empty attributes when
    /// absent. READONLY properties and sealed objects refuse.
    pub fn put(&self, name: &str, value: Value) -> Result<(), Error> {
        let mut data = self.inner.borrow_mut();
        if data.sealed {
            return Err(Error::Sealed(name.to_string()));
        }
        match data.slots.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => {
                if slot.attrs.contains(Attributes::READONLY) {
                    return Err(Error::ReadOnly(name.to_string()));
                }
                slot.value = value;
            },
            None => data.slots.push((
                name.to_string(),
                Slot {
                    value,
                    attrs: Attributes::EMPTY,
                },
            )),
        }
        Ok(())
    }

    /// Own property lookup.
    #[must_use]
    pub fn get_own(&self, name: &str) -> Option<Value> {
        self.inner
            .borrow()
            .slots
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, slot)| slot.value.clone())
    }

    /// Property lookup walking the prototype chain.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        let mut current = self.clone();
        loop {
            if let Some(value) = current.get_own(name) {
                return Some(value);
            }
            match current.prototype() {
                Some(proto) => current = proto,
                None => return None,
            }
        }
    }

    /// Attributes of an own property.
    #[must_use]
    pub fn attributes(&self, name: &str) -> Option<Attributes> {
        self.inner
            .borrow()
            .slots
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, slot)| slot.attrs)
    }

    /// Whether `name` is an own property.
    #[must_use]
    pub fn has_own(&self, name: &str) -> bool {
        self.inner.borrow().slots.iter().any(|(n, _)| n == name)
    }

    /// Delete an own property.
    ///
    /// Returns whether the property was removed. PERMANENT properties
    /// are left in place (`Ok(false)`); sealed objects refuse.
    pub fn delete(&self, name: &str) -> Result<bool, Error> {
        let mut data = self.inner.borrow_mut();
        if data.sealed {
            return Err(Error::Sealed(name.to_string()));
        }
        match data.slots.iter().position(|(n, _)| n == name) {
            Some(i) if data.slots[i].1.attrs.contains(Attributes::PERMANENT) => Ok(false),
            Some(i) => {
                data.slots.remove(i);
                Ok(true)
            },
            None => Ok(false),
        }
    }

    /// Enumerable own property names, in insertion order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.inner
            .borrow()
            .slots
            .iter()
            .filter(|(_, slot)| !slot.attrs.contains(Attributes::DONTENUM))
            .map(|(n, _)| n.clone())
            .collect()
    }

    /// Seal the object. Irreversible.
    pub fn seal(&self) {
        self.inner.borrow_mut().sealed = true;
    }

    /// Whether the object is sealed.
    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.inner.borrow().sealed
    }

    /// The prototype link.
    #[must_use]
    pub fn prototype(&self) -> Option<ScriptObject> {
        self.inner.borrow().prototype.clone()
    }

    /// Set the prototype link.
    ///
    /// Rejects assignments that would make the chain cyclic, and sealed
    /// objects refuse.
    pub fn set_prototype(&self, prototype: Option<ScriptObject>) -> Result<(), Error> {
        if self.is_sealed() {
            return Err(Error::Sealed("[[Prototype]]".to_string()));
        }
        if let Some(proto) = &prototype {
            let mut current = Some(proto.clone());
            while let Some(object) = current {
                if object.ptr_eq(self) {
                    return Err(Error::PrototypeCycle);
                }
                current = object.prototype();
            }
        }
        self.inner.borrow_mut().prototype = prototype;
        Ok(())
    }

    /// The parent scope link.
    #[must_use]
    pub fn parent_scope(&self) -> Option<ScriptObject> {
        self.inner.borrow().parent_scope.clone()
    }

    /// Set the parent scope link. A lexical link, not a property — it is
    /// not affected by sealing.
    pub fn set_parent_scope(&self, scope: Option<ScriptObject>) {
        self.inner.borrow_mut().parent_scope = scope;
    }

    /// Identity comparison.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for ScriptObject {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for ScriptObject {}

impl fmt::Debug for ScriptObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.inner.borrow();
        write!(
            f,
            "ScriptObject({}, {} properties)",
            data.class_name,
            data.slots.len()
        )
    }
}

// ============================================================================
// Scope
// ============================================================================

/// The embedder's standard scope: a global object whose prototype is a
/// distinguished `Object` prototype object.
#[derive(Debug, Clone)]
pub struct Scope {
    global: ScriptObject,
    object_prototype: ScriptObject,
}

impl Scope {
    /// Create a scope with a fresh global and `Object` prototype.
    #[must_use]
    pub fn new() -> Self {
        let object_prototype = ScriptObject::new("Object");
        let global = ScriptObject {
            inner: Rc::new(RefCell::new(ObjectData {
                class_name: Rc::from("global"),
                prototype: Some(object_prototype.clone()),
                parent_scope: None,
                slots: Vec::new(),
                sealed: false,
            })),
        };
        Self {
            global,
            object_prototype,
        }
    }

    /// The global object.
    #[must_use]
    pub fn global(&self) -> &ScriptObject {
        &self.global
    }

    /// The `Object` prototype object.
    #[must_use]
    pub fn object_prototype(&self) -> &ScriptObject {
        &self.object_prototype
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}
