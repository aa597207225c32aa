use std::rc::Rc;

use super::{share, Controller, ControllerKey, ControllerState, ProgressWindow, SharedController};
use crate::animation::Interpolator;
use crate::error::{Result, TransitError};
use crate::property::PropertyRange;
use crate::target::{apply_value, TargetRef};

/// Custom behavior run with the target and the interpolated fraction.
///
/// Used for composite effects that are not a plain property range, such as
/// walking a color through HSV space.
pub type Effect = Rc<dyn Fn(&TargetRef, f32) -> Result<()>>;

/// The standard controller: a set of property ranges and/or an effect
/// driven over one progress window.
#[derive(Clone)]
pub struct ProgressController {
    state: ControllerState,
    target: Option<TargetRef>,
    ranges: Vec<PropertyRange>,
    effect: Option<Effect>,
}

impl ProgressController {
    /// Controller animating `ranges`. Fails when `ranges` is empty.
    pub fn new(ranges: Vec<PropertyRange>) -> Result<Self> {
        if ranges.is_empty() {
            return Err(TransitError::EmptyController);
        }
        Ok(Self {
            state: ControllerState::new(ProgressWindow::UNIT),
            target: None,
            ranges,
            effect: None,
        })
    }

    /// Controller running a custom effect
    pub fn with_effect<F>(effect: F) -> Self
    where
        F: Fn(&TargetRef, f32) -> Result<()> + 'static,
    {
        Self {
            state: ControllerState::new(ProgressWindow::UNIT),
            target: None,
            ranges: Vec::new(),
            effect: Some(Rc::new(effect)),
        }
    }

    pub fn with_window(mut self, window: ProgressWindow) -> Self {
        self.state.window = window;
        self
    }

    pub fn with_target(mut self, target: TargetRef) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_interpolator(mut self, interpolator: Option<Interpolator>) -> Self {
        self.state.interpolator = interpolator;
        self
    }

    fn apply(&self, fraction: f32) -> Result<()> {
        let target = self
            .target
            .as_ref()
            .ok_or_else(|| TransitError::NoTarget(self.state.id.clone()))?;
        for range in &self.ranges {
            apply_value(target, range.property(), range.value_at(fraction))?;
        }
        if let Some(effect) = &self.effect {
            effect(target, fraction)?;
        }
        Ok(())
    }
}

impl Controller for ProgressController {
    fn key(&self) -> ControllerKey {
        self.state.key
    }

    fn id(&self) -> &str {
        &self.state.id
    }

    fn set_id(&mut self, id: &str) {
        self.state.id = id.to_string();
    }

    fn target(&self) -> Option<&TargetRef> {
        self.target.as_ref()
    }

    fn set_target(&mut self, target: Option<TargetRef>) {
        self.target = target;
        self.state.last_progress = None;
    }

    fn window(&self) -> ProgressWindow {
        self.state.window
    }

    fn set_progress_window(&mut self, window: ProgressWindow) {
        self.state.window = window;
        self.state.last_progress = None;
    }

    fn interpolator(&self) -> Option<&Interpolator> {
        self.state.interpolator.as_ref()
    }

    fn set_interpolator(&mut self, interpolator: Option<Interpolator>) {
        self.state.interpolator = interpolator;
        self.state.last_progress = None;
    }

    fn is_enable(&self) -> bool {
        self.state.enabled
    }

    fn set_enable(&mut self, enable: bool) {
        self.state.enabled = enable;
    }

    fn start(&mut self) -> Result<()> {
        if self.target.is_none() {
            return Err(TransitError::NoTarget(self.state.id.clone()));
        }
        self.state.begin();
        Ok(())
    }

    fn update_progress(&mut self, progress: f32) -> Result<()> {
        if !self.state.enabled {
            return Ok(());
        }
        if !self.state.started {
            log::debug!("controller {} updated before start, starting", self.state.key);
            self.start()?;
        }
        let Some(fraction) = self.state.advance(progress) else {
            return Ok(());
        };
        let applied = self.apply(fraction);
        if applied.is_err() {
            self.state.last_progress = None;
        }
        applied
    }

    fn end(&mut self) -> Result<()> {
        if !self.state.enabled {
            return Ok(());
        }
        if !self.state.started {
            self.start()?;
        }
        // Terminal value goes straight to the ranges so custom curves that
        // do not end on 1 still land on the declared endpoint
        self.apply(self.state.window.terminal_fraction())?;
        self.state.started = false;
        self.state.last_progress = None;
        Ok(())
    }

    fn reverse(&mut self) {
        for range in &mut self.ranges {
            range.reverse();
        }
        self.state.reverse();
    }

    fn duplicate(&self) -> SharedController {
        share(Self {
            state: self.state.fresh(),
            ..self.clone()
        })
    }

    fn ranges(&self) -> &[PropertyRange] {
        &self.ranges
    }
}

impl std::fmt::Debug for ProgressController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressController")
            .field("state", &self.state)
            .field("ranges", &self.ranges)
            .field("effect", &self.effect.is_some())
            .finish()
    }
}
