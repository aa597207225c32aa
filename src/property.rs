//! Animatable properties and the (start, end) ranges controllers walk along.

use std::fmt;

use crate::animation::Animatable;
use crate::color::Color;

/// A visual property of a target
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    Alpha,
    Rotation,
    RotationX,
    RotationY,
    ScaleX,
    ScaleY,
    TranslationX,
    TranslationY,
    X,
    Y,
    BackgroundColor,
    /// Host defined property, identified by its key
    Custom(&'static str),
}

impl Property {
    /// Stable string key, e.g. `"translationX"`
    pub fn key(&self) -> &'static str {
        match self {
            Property::Alpha => "alpha",
            Property::Rotation => "rotation",
            Property::RotationX => "rotationX",
            Property::RotationY => "rotationY",
            Property::ScaleX => "scaleX",
            Property::ScaleY => "scaleY",
            Property::TranslationX => "translationX",
            Property::TranslationY => "translationY",
            Property::X => "x",
            Property::Y => "y",
            Property::BackgroundColor => "backgroundColor",
            Property::Custom(key) => *key,
        }
    }

    /// Value an untouched element reports for this property.
    /// `None` for custom properties.
    pub fn default_value(&self) -> Option<Value> {
        match self {
            Property::Alpha | Property::ScaleX | Property::ScaleY => Some(Value::Scalar(1.0)),
            Property::BackgroundColor => Some(Value::Color(Color::TRANSPARENT)),
            Property::Custom(_) => None,
            _ => Some(Value::Scalar(0.0)),
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A property value pushed to a target
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Scalar(f32),
    Color(Color),
}

impl Value {
    pub fn as_scalar(&self) -> Option<f32> {
        match self {
            Value::Scalar(v) => Some(*v),
            Value::Color(_) => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            Value::Color(c) => Some(*c),
            Value::Scalar(_) => None,
        }
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Scalar(value)
    }
}

impl From<Color> for Value {
    fn from(value: Color) -> Self {
        Value::Color(value)
    }
}

/// Endpoints of a range, kept per kind so start and end can never disagree
#[derive(Clone, Copy, Debug, PartialEq)]
enum Span {
    Scalar { start: f32, end: f32 },
    Color { start: Color, end: Color },
}

/// The (start, end) pair for one property
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropertyRange {
    property: Property,
    span: Span,
}

impl PropertyRange {
    pub fn scalar(property: Property, start: f32, end: f32) -> Self {
        Self {
            property,
            span: Span::Scalar { start, end },
        }
    }

    pub fn color(property: Property, start: Color, end: Color) -> Self {
        Self {
            property,
            span: Span::Color { start, end },
        }
    }

    pub fn property(&self) -> Property {
        self.property
    }

    pub fn start(&self) -> Value {
        match self.span {
            Span::Scalar { start, .. } => Value::Scalar(start),
            Span::Color { start, .. } => Value::Color(start),
        }
    }

    pub fn end(&self) -> Value {
        match self.span {
            Span::Scalar { end, .. } => Value::Scalar(end),
            Span::Color { end, .. } => Value::Color(end),
        }
    }

    /// `start + (end - start) * fraction`, component-wise for colors
    pub fn value_at(&self, fraction: f32) -> Value {
        match &self.span {
            Span::Scalar { start, end } => Value::Scalar(f32::lerp(start, end, fraction)),
            Span::Color { start, end } => Value::Color(Color::lerp(start, end, fraction)),
        }
    }

    /// The same range walked the other way
    pub fn reversed(&self) -> Self {
        let span = match self.span {
            Span::Scalar { start, end } => Span::Scalar {
                start: end,
                end: start,
            },
            Span::Color { start, end } => Span::Color {
                start: end,
                end: start,
            },
        };
        Self {
            property: self.property,
            span,
        }
    }

    pub fn reverse(&mut self) {
        *self = self.reversed();
    }
}
