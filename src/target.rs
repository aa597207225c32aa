//! The boundary to the host toolkit.
//!
//! A [`Target`] is whatever element a transition mutates: a view, a scene
//! node, a retained property bag. The crate only ever applies values to it,
//! reads its current values and size, and enumerates its children. Targets
//! are shared by every controller bound to them, so all methods take `&self`
//! and implementations use interior mutability.

use std::rc::Rc;

use crate::error::{ApplyError, Result, TransitError};
use crate::property::{Property, Value};

/// Shared handle to a target. The host controls its lifetime.
pub type TargetRef = Rc<dyn Target>;

/// Measured size of a target
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

pub trait Target {
    /// Push a value for `property` to the element
    fn apply(&self, property: Property, value: Value) -> std::result::Result<(), ApplyError>;

    /// Current value of `property`, if the element can report it
    fn value(&self, property: Property) -> Option<Value>;

    /// Current measured size
    fn size(&self) -> Size;

    /// Ordered child elements, or `None` when the element is not a container
    fn children(&self) -> Option<Vec<TargetRef>> {
        None
    }
}

/// Apply a value, wrapping a host failure with the property it was for
pub(crate) fn apply_value(target: &TargetRef, property: Property, value: Value) -> Result<()> {
    target
        .apply(property, value)
        .map_err(|source| TransitError::Apply { property, source })
}

/// Whether two handles point at the same element
pub fn same_target(a: &TargetRef, b: &TargetRef) -> bool {
    Rc::ptr_eq(a, b)
}
