//! Value interpolation and easing.
//!
//! [`Animatable`] describes how a value moves between two endpoints; an
//! [`Interpolator`] reshapes the local fraction before it reaches the value.

mod animatable;
mod interpolator;

pub use animatable::Animatable;
pub use interpolator::Interpolator;
