//! A retained, in-memory [`Target`].
//!
//! `Element` keeps the last value applied for every property, a measured
//! size and an optional list of children. Hosts that render from a property
//! bag can use it directly and poll [`Element::take_changes`] once per frame
//! to learn whether anything needs layout or paint.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use bitflags::bitflags;

use crate::error::ApplyError;
use crate::property::{Property, Value};
use crate::target::{Size, Target, TargetRef};

bitflags! {
    /// Flags indicating what aspects of rendering need to be updated
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ChangeFlags: u8 {
        /// Element position changed, parents may need to re-lay out
        const NEEDS_LAYOUT = 0b01;
        /// Element needs repainting (visual appearance changed)
        const NEEDS_PAINT  = 0b10;
    }
}

impl ChangeFlags {
    /// What applying `property` invalidates
    pub fn for_property(property: Property) -> Self {
        match property {
            Property::X | Property::Y => ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT,
            _ => ChangeFlags::NEEDS_PAINT,
        }
    }
}

pub struct Element {
    name: String,
    size: Cell<Size>,
    values: RefCell<HashMap<Property, Value>>,
    /// `None` for leaves
    children: Option<RefCell<Vec<TargetRef>>>,
    changes: Cell<ChangeFlags>,
}

impl Element {
    /// Create an element without children
    pub fn leaf(name: impl Into<String>, size: Size) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            size: Cell::new(size),
            values: RefCell::new(HashMap::new()),
            children: None,
            changes: Cell::new(ChangeFlags::empty()),
        })
    }

    /// Create a container holding `children` in order
    pub fn container(name: impl Into<String>, size: Size, children: Vec<TargetRef>) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            size: Cell::new(size),
            values: RefCell::new(HashMap::new()),
            children: Some(RefCell::new(children)),
            changes: Cell::new(ChangeFlags::empty()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Update the measured size, as a layout pass would
    pub fn set_size(&self, size: Size) {
        self.size.set(size);
    }

    /// Append a child. No-op on leaves.
    pub fn push_child(&self, child: TargetRef) {
        if let Some(children) = &self.children {
            children.borrow_mut().push(child);
        }
    }

    /// Set a value without recording a change, e.g. the initial state
    pub fn set(&self, property: Property, value: impl Into<Value>) {
        self.values.borrow_mut().insert(property, value.into());
    }

    /// Current value, falling back to the property's default
    pub fn get(&self, property: Property) -> Option<Value> {
        self.values
            .borrow()
            .get(&property)
            .copied()
            .or_else(|| property.default_value())
    }

    /// Current scalar value, if the property is scalar
    pub fn scalar(&self, property: Property) -> Option<f32> {
        self.get(property).and_then(|v| v.as_scalar())
    }

    /// Return and clear the accumulated change flags
    pub fn take_changes(&self) -> ChangeFlags {
        self.changes.replace(ChangeFlags::empty())
    }
}

impl Target for Element {
    fn apply(&self, property: Property, value: Value) -> Result<(), ApplyError> {
        log::trace!("{}: {} = {:?}", self.name, property, value);
        self.values.borrow_mut().insert(property, value);
        self.changes
            .set(self.changes.get() | ChangeFlags::for_property(property));
        Ok(())
    }

    fn value(&self, property: Property) -> Option<Value> {
        self.get(property)
    }

    fn size(&self) -> Size {
        self.size.get()
    }

    fn children(&self) -> Option<Vec<TargetRef>> {
        self.children.as_ref().map(|c| c.borrow().clone())
    }
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("name", &self.name)
            .field("size", &self.size.get())
            .field("values", &self.values.borrow())
            .field("children", &self.children.as_ref().map(|c| c.borrow().len()))
            .finish()
    }
}
