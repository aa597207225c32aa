//! Progress-driven transitions.
//!
//! Properties of an element (alpha, scale, rotation, translation, position,
//! background color) are driven by a scalar progress value that the caller
//! pushes in, such as a scroll offset or a drag position, instead of by a
//! clock.
//!
//! ```ignore
//! use transit::prelude::*;
//!
//! let card = Element::leaf("card", Size::new(320.0, 120.0));
//! let mut fade = transit_target(card.clone())
//!     .alpha(1.0, 0.0)
//!     .delay_translation_x_of_width(-0.5)
//!     .interpolator(Interpolator::EaseOut)
//!     .create_transition();
//!
//! for offset in [0.0, 0.25, 0.5, 1.0] {
//!     fade.update_progress(offset)?;
//! }
//! fade.end()?;
//! ```
//!
//! The pieces, from the bottom up:
//! - [`PropertyRange`](property::PropertyRange): start and end value of one property
//! - [`Controller`](controller::Controller): maps a progress window onto its ranges
//! - [`ControllerSet`](controller::ControllerSet): fans progress out to the
//!   controllers bound to one target
//! - [`TransitionBuilder`](builder::TransitionBuilder): reusable template
//! - [`Transition`](transition::Transition): a template bound to a target

extern crate self as transit;

pub mod animation;
pub mod builder;
pub mod color;
pub mod config;
pub mod controller;
pub mod diagnostics;
pub mod element;
pub mod error;
pub mod property;
pub mod target;
pub mod transition;

pub use animation::Animatable;
pub use transit_macros::Animatable;

pub mod prelude {
    pub use crate::animation::{Animatable, Interpolator};
    pub use crate::builder::{transit, transit_target, GroupChild, TransitionBuilder};
    pub use crate::color::{Color, HsvColor};
    pub use crate::config::TransitConfig;
    pub use crate::controller::{
        share, Controller, ControllerSet, ProgressController, ProgressWindow, SharedController,
    };
    pub use crate::element::{ChangeFlags, Element};
    pub use crate::error::{Result, TransitError};
    pub use crate::property::{Property, PropertyRange, Value};
    pub use crate::target::{Size, Target, TargetRef};
    pub use crate::transition::Transition;
    pub use transit_macros::Animatable;
}
