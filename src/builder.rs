//! Fluent construction of transitions.
//!
//! A [`TransitionBuilder`] is a template. It accumulates property ranges,
//! setup closures, custom controllers and [`DelayedEvaluator`]s, and turns
//! them into controllers only when a [`ControllerSet`] asks for them. Nothing
//! in a builder is consumed by that setup pass, so one template can back any
//! number of transitions.
//!
//! ## Example
//!
//! ```ignore
//! let fade = transit_target(card.clone())
//!     .alpha(1.0, 0.0)
//!     .scale(1.0, 0.8)
//!     .delay_translation_y_of_height(0.5)
//!     .range(0.0, 0.6);
//!
//! let mut first = fade.create_transition();
//! let mut second = fade.create_transition();
//! first.update_progress(0.3)?;
//! ```

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::animation::{Animatable, Interpolator};
use crate::color::{Color, HsvColor};
use crate::controller::{
    Controller, ControllerSet, GroupController, ProgressController, ProgressWindow,
    SharedController,
};
use crate::error::{Result, TransitError};
use crate::property::{Property, PropertyRange};
use crate::target::{apply_value, TargetRef};
use crate::transition::Transition;

/// Computation deferred until the real target is known.
///
/// Runs once per setup pass, in registration order, before the builder's
/// ranges are frozen into a controller. It receives the resolved target and
/// the builder being set up, and hands the builder back.
pub type DelayedEvaluator = Rc<dyn Fn(&TargetRef, TransitionBuilder) -> Result<TransitionBuilder>>;

/// Setup closure adding controllers to a set, given the builder's window
pub type SetupFn = Rc<dyn Fn(&mut ControllerSet, ProgressWindow) -> Result<()>>;

/// Where a child sits in the container handed to
/// [`TransitionBuilder::transit_group`]
#[derive(Clone)]
pub struct GroupChild {
    pub parent: TargetRef,
    pub child: TargetRef,
    pub index: usize,
    pub total: usize,
}

/// Start building a transition without a target
pub fn transit() -> TransitionBuilder {
    TransitionBuilder::new()
}

/// Start building a transition for `target`
pub fn transit_target(target: TargetRef) -> TransitionBuilder {
    TransitionBuilder::new().target(target)
}

#[derive(Clone, Default)]
pub struct TransitionBuilder {
    id: Option<String>,
    target: Option<TargetRef>,
    /// Later writes for a property replace earlier ones in place
    ranges: IndexMap<Property, PropertyRange>,
    window: ProgressWindow,
    interpolator: Option<Interpolator>,
    delayed: Vec<DelayedEvaluator>,
    setups: Vec<SetupFn>,
    controllers: Vec<SharedController>,
}

macro_rules! scalar_setters {
    ($($(#[$doc:meta])* $name:ident, $to:ident => $property:expr;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(self, start: f32, end: f32) -> Self {
                self.property(PropertyRange::scalar($property, start, end))
            }

            #[doc = concat!("[`", stringify!($name), "`](Self::", stringify!($name), ") starting from the target's current value")]
            pub fn $to(self, end: f32) -> Result<Self> {
                let start = self.current_scalar($property)?;
                Ok(self.$name(start, end))
            }
        )*
    };
}

/// Axis of a geometry-relative translation
#[derive(Clone, Copy, Debug)]
enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn property(self) -> Property {
        match self {
            Axis::Horizontal => Property::TranslationX,
            Axis::Vertical => Property::TranslationY,
        }
    }

    fn extent(self, measured: &TargetRef) -> f32 {
        let size = measured.size();
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }
}

impl TransitionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(mut self, target: TargetRef) -> Self {
        self.target = Some(target);
        self
    }

    /// Id given to the controller sets built from this template
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Progress window of the controller synthesized from the ranges
    pub fn range(mut self, start: f32, end: f32) -> Self {
        self.window = ProgressWindow::new(start, end);
        self
    }

    pub fn interpolator(mut self, interpolator: Interpolator) -> Self {
        self.interpolator = Some(interpolator);
        self
    }

    /// Write a range, replacing any earlier one for the same property
    pub fn property(mut self, range: PropertyRange) -> Self {
        self.ranges.insert(range.property(), range);
        self
    }

    scalar_setters! {
        alpha, alpha_to => Property::Alpha;
        /// Rotation around the z axis, in degrees
        rotation, rotation_to => Property::Rotation;
        rotation_x, rotation_x_to => Property::RotationX;
        rotation_y, rotation_y_to => Property::RotationY;
        scale_x, scale_x_to => Property::ScaleX;
        scale_y, scale_y_to => Property::ScaleY;
        translation_x, translation_x_to => Property::TranslationX;
        translation_y, translation_y_to => Property::TranslationY;
        x, x_to => Property::X;
        y, y_to => Property::Y;
    }

    /// Uniform scale on both axes
    pub fn scale(self, start: f32, end: f32) -> Self {
        self.scale_x(start, end).scale_y(start, end)
    }

    /// Uniform scale to `end`, each axis starting from its current value
    pub fn scale_to(self, end: f32) -> Result<Self> {
        self.scale_x_to(end)?.scale_y_to(end)
    }

    fn current_target(&self, property: Property) -> Result<&TargetRef> {
        self.target
            .as_ref()
            .ok_or(TransitError::TargetUnresolved { property })
    }

    fn current_scalar(&self, property: Property) -> Result<f32> {
        self.current_target(property)?
            .value(property)
            .and_then(|value| value.as_scalar())
            .ok_or(TransitError::UnknownValue { property })
    }

    fn translation_of(self, axis: Axis, measured: &TargetRef, fraction: f32) -> Result<Self> {
        let property = axis.property();
        let start = self.current_scalar(property)?;
        let end = axis.extent(measured) * fraction;
        Ok(self.property(PropertyRange::scalar(property, start, end)))
    }

    fn own_translation_of(self, axis: Axis, fraction: f32) -> Result<Self> {
        let measured = self.current_target(axis.property())?.clone();
        self.translation_of(axis, &measured, fraction)
    }

    /// Translate horizontally to `fraction` of the target's width, measured now
    pub fn translation_x_of_width(self, fraction: f32) -> Result<Self> {
        self.own_translation_of(Axis::Horizontal, fraction)
    }

    /// Translate vertically to `fraction` of the target's height, measured now
    pub fn translation_y_of_height(self, fraction: f32) -> Result<Self> {
        self.own_translation_of(Axis::Vertical, fraction)
    }

    /// Translate horizontally to `fraction` of another element's width
    pub fn translation_x_of_width_of(self, measured: &TargetRef, fraction: f32) -> Result<Self> {
        self.translation_of(Axis::Horizontal, measured, fraction)
    }

    /// Translate vertically to `fraction` of another element's height
    pub fn translation_y_of_height_of(self, measured: &TargetRef, fraction: f32) -> Result<Self> {
        self.translation_of(Axis::Vertical, measured, fraction)
    }

    /// Like [`translation_x_of_width`](Self::translation_x_of_width), but the
    /// width is read from the resolved target at setup, after layout
    pub fn delay_translation_x_of_width(self, fraction: f32) -> Self {
        self.add_delayed_evaluator(move |target, builder| {
            builder.translation_of(Axis::Horizontal, target, fraction)
        })
    }

    pub fn delay_translation_y_of_height(self, fraction: f32) -> Self {
        self.add_delayed_evaluator(move |target, builder| {
            builder.translation_of(Axis::Vertical, target, fraction)
        })
    }

    /// `measured` is only read at setup
    pub fn delay_translation_x_of_width_of(self, measured: TargetRef, fraction: f32) -> Self {
        self.add_delayed_evaluator(move |_, builder| {
            builder.translation_of(Axis::Horizontal, &measured, fraction)
        })
    }

    pub fn delay_translation_y_of_height_of(self, measured: TargetRef, fraction: f32) -> Self {
        self.add_delayed_evaluator(move |_, builder| {
            builder.translation_of(Axis::Vertical, &measured, fraction)
        })
    }

    /// RGB background color range, interpolated channel by channel
    pub fn background_color(self, from: Color, to: Color) -> Self {
        self.property(PropertyRange::color(Property::BackgroundColor, from, to))
    }

    pub fn background_color_to(self, to: Color) -> Result<Self> {
        let property = Property::BackgroundColor;
        let from = self
            .current_target(property)?
            .value(property)
            .and_then(|value| value.as_color())
            .ok_or(TransitError::UnknownValue { property })?;
        Ok(self.background_color(from, to))
    }

    /// Background color walked through hue, saturation and value.
    ///
    /// Runs as its own controller over the builder's window, so it is not
    /// listed among the builder's ranges.
    pub fn background_color_hsv(self, from: Color, to: Color) -> Self {
        let (from, to) = (from.to_hsv(), to.to_hsv());
        self.add_setup(move |set, window| {
            let effect = ProgressController::with_effect(move |target, fraction| {
                let hsv = HsvColor::lerp(&from, &to, fraction);
                apply_value(target, Property::BackgroundColor, Color::from_hsv(&hsv).into())
            })
            .with_window(window);
            set.add_controller(effect);
            Ok(())
        })
    }

    /// Attach a custom controller.
    ///
    /// Every set built from this template receives its own duplicate bound to
    /// the set's target; `controller` itself is never driven.
    pub fn add_controller(mut self, controller: SharedController) -> Self {
        self.controllers.push(controller);
        self
    }

    pub fn add_setup<F>(mut self, setup: F) -> Self
    where
        F: Fn(&mut ControllerSet, ProgressWindow) -> Result<()> + 'static,
    {
        self.setups.push(Rc::new(setup));
        self
    }

    pub fn add_delayed_evaluator<F>(mut self, evaluator: F) -> Self
    where
        F: Fn(&TargetRef, TransitionBuilder) -> Result<TransitionBuilder> + 'static,
    {
        self.delayed.push(Rc::new(evaluator));
        self
    }

    /// Give every child of the target its own transition.
    ///
    /// `transit` is called at setup with a builder bound to the child and
    /// returns the configured builder. Fails with
    /// [`NotAContainer`](TransitError::NotAContainer) when the target is known
    /// and has no children, or at setup when the resolved target has none.
    pub fn transit_group<F>(self, transit: F) -> Result<Self>
    where
        F: Fn(TransitionBuilder, &GroupChild) -> Result<TransitionBuilder> + 'static,
    {
        if let Some(target) = &self.target {
            if target.children().is_none() {
                return Err(TransitError::NotAContainer);
            }
        }
        Ok(self.add_setup(move |set, window| {
            let parent = set
                .target()
                .cloned()
                .ok_or_else(|| TransitError::NoTarget(set.id().to_string()))?;
            let children = parent.children().ok_or(TransitError::NotAContainer)?;
            let total = children.len();

            let mut sets = Vec::with_capacity(total);
            for (index, child) in children.into_iter().enumerate() {
                let info = GroupChild {
                    parent: parent.clone(),
                    child: child.clone(),
                    index,
                    total,
                };
                let builder = transit(transit_target(child.clone()), &info)?;

                let mut child_set =
                    ControllerSet::with_config(format!("{}/{}", set.id(), index), set.config().clone());
                child_set.set_target(Some(child));
                child_set.set_reenable(set.reenables());
                builder.setup_controllers(&mut child_set)?;
                sets.push(child_set);
            }
            log::debug!("{}: grouped {} children", set.id(), total);
            set.add_controller(GroupController::new(sets).with_window(window));
            Ok(())
        }))
    }

    /// Swap every accumulated range and the window
    pub fn reverse(mut self) -> Self {
        for range in self.ranges.values_mut() {
            range.reverse();
        }
        self.window = self.window.reversed();
        self
    }

    /// Accumulated ranges in insertion order
    pub fn ranges(&self) -> impl Iterator<Item = &PropertyRange> {
        self.ranges.values()
    }

    pub fn range_for(&self, property: Property) -> Option<&PropertyRange> {
        self.ranges.get(&property)
    }

    pub fn progress_window(&self) -> ProgressWindow {
        self.window
    }

    pub fn target_ref(&self) -> Option<&TargetRef> {
        self.target.as_ref()
    }

    pub(crate) fn id_ref(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub(crate) fn interpolator_ref(&self) -> Option<&Interpolator> {
        self.interpolator.as_ref()
    }

    /// Bind a copy of this template to its target. The builder stays usable.
    pub fn create_transition(&self) -> Transition {
        Transition::new(self.clone())
    }

    /// Populate `set` from this template.
    ///
    /// The target is taken from the set, or given to it when the set has
    /// none. Delayed evaluators then run against it, followed by the setup
    /// closures, the custom controllers and finally one controller for the
    /// accumulated ranges. The template itself is left untouched.
    pub fn setup_controllers(&self, set: &mut ControllerSet) -> Result<()> {
        let mut builder = self.clone();

        let target = match (set.target().cloned(), builder.target.clone()) {
            (Some(target), _) => target,
            (None, Some(target)) => {
                set.set_target(Some(target.clone()));
                target
            }
            (None, None) => return Err(TransitError::NoTarget(set.id().to_string())),
        };
        builder.target = Some(target.clone());

        let delayed = std::mem::take(&mut builder.delayed);
        for evaluator in &delayed {
            builder = evaluator(&target, builder)?;
        }

        for step in builder.into_setups() {
            step.apply(set)?;
        }
        Ok(())
    }

    fn into_setups(self) -> Vec<Setup> {
        let window = self.window;
        let mut steps: Vec<Setup> = self
            .setups
            .into_iter()
            .map(|setup| Setup::Composite { setup, window })
            .collect();
        steps.extend(self.controllers.into_iter().map(Setup::Controller));
        if !self.ranges.is_empty() {
            steps.push(Setup::Ranges {
                ranges: self.ranges.into_values().collect(),
                window,
                interpolator: self.interpolator,
            });
        }
        steps
    }
}

/// One step of the setup pass
enum Setup {
    Ranges {
        ranges: Vec<PropertyRange>,
        window: ProgressWindow,
        interpolator: Option<Interpolator>,
    },
    Controller(SharedController),
    Composite {
        setup: SetupFn,
        window: ProgressWindow,
    },
}

impl Setup {
    fn apply(self, set: &mut ControllerSet) -> Result<()> {
        match self {
            Setup::Ranges {
                ranges,
                window,
                interpolator,
            } => {
                let controller = ProgressController::new(ranges)?
                    .with_window(window)
                    .with_interpolator(interpolator);
                set.add_controller(controller);
            }
            Setup::Controller(template) => {
                let controller = template.borrow().duplicate();
                set.add(controller);
            }
            Setup::Composite { setup, window } => setup(set, window)?,
        }
        Ok(())
    }
}

impl fmt::Debug for TransitionBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionBuilder")
            .field("id", &self.id)
            .field("has_target", &self.target.is_some())
            .field("ranges", &self.ranges.values().collect::<Vec<_>>())
            .field("window", &self.window)
            .field("interpolator", &self.interpolator)
            .field("delayed", &self.delayed.len())
            .field("setups", &self.setups.len())
            .field("controllers", &self.controllers.len())
            .finish()
    }
}
