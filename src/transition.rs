//! A template bound to a target.

use crate::animation::Interpolator;
use crate::builder::TransitionBuilder;
use crate::config::TransitConfig;
use crate::controller::{ControllerSet, SharedController};
use crate::diagnostics::StateLog;
use crate::error::Result;
use crate::target::TargetRef;

const DEFAULT_ID: &str = "transition";

/// A transition created by [`TransitionBuilder::create_transition`].
///
/// Holds its own copy of the builder. Each run (`start` to `end`) populates a
/// fresh [`ControllerSet`] from it, so geometry read by delayed evaluators is
/// measured again on every run.
#[derive(Clone)]
pub struct Transition {
    id: String,
    target: Option<TargetRef>,
    setup: TransitionBuilder,
    interpolator: Option<Interpolator>,
    reenable: bool,
    reversed: bool,
    config: TransitConfig,
    /// Present between `start` and `end`
    running: Option<ControllerSet>,
}

impl Transition {
    pub(crate) fn new(setup: TransitionBuilder) -> Self {
        Self {
            id: setup.id_ref().unwrap_or(DEFAULT_ID).to_string(),
            target: setup.target_ref().cloned(),
            interpolator: setup.interpolator_ref().cloned(),
            reenable: false,
            reversed: false,
            config: TransitConfig::default(),
            running: None,
            setup,
        }
    }

    pub fn with_config(mut self, config: TransitConfig) -> Self {
        self.config = config;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn target(&self) -> Option<&TargetRef> {
        self.target.as_ref()
    }

    /// Rebind the transition. A running set is rebound immediately.
    pub fn set_target(&mut self, target: Option<TargetRef>) {
        if let Some(set) = &mut self.running {
            set.set_target(target.clone());
        }
        self.target = target;
    }

    /// Interpolator for every controller without one of its own
    pub fn set_interpolator(&mut self, interpolator: Option<Interpolator>) {
        if let Some(set) = &mut self.running {
            set.set_interpolator(interpolator.clone());
        }
        self.interpolator = interpolator;
    }

    /// See [`ControllerSet::set_reenable`]
    pub fn set_reenable(&mut self, reenable: bool) {
        if let Some(set) = &mut self.running {
            set.set_reenable(reenable);
        }
        self.reenable = reenable;
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Controllers of the current run, empty when not running
    pub fn controllers(&self) -> &[SharedController] {
        self.running
            .as_ref()
            .map(|set| set.controllers())
            .unwrap_or(&[])
    }

    pub fn diagnostics(&self) -> Option<&StateLog> {
        self.running.as_ref().map(|set| set.diagnostics())
    }

    /// Run the setup pass of this transition's builder against `set`
    pub fn populate(&self, set: &mut ControllerSet) -> Result<()> {
        self.setup.setup_controllers(set)
    }

    /// Build and start the controller set. No-op while already running.
    pub fn start(&mut self) -> Result<()> {
        if self.running.is_some() {
            return Ok(());
        }
        let mut set = ControllerSet::with_config(self.id.clone(), self.config.clone());
        set.set_target(self.target.clone());
        set.set_interpolator(self.interpolator.clone());
        set.set_reenable(self.reenable);
        self.populate(&mut set)?;
        if self.reversed {
            set.reverse();
        }
        set.start()?;
        log::debug!("{}: running with {} controllers", self.id, set.len());
        self.running = Some(set);
        Ok(())
    }

    pub fn update_progress(&mut self, progress: f32) -> Result<()> {
        if self.running.is_none() {
            self.start()?;
        }
        match &mut self.running {
            Some(set) => set.update_progress(progress),
            None => Ok(()),
        }
    }

    /// Land every controller on its terminal value and release the set
    pub fn end(&mut self) -> Result<()> {
        match self.running.take() {
            Some(mut set) => set.end(),
            None => {
                log::debug!("{}: end without start", self.id);
                Ok(())
            }
        }
    }

    /// Run the transition the other way. Applies to the current run at once
    /// and to every later one.
    pub fn reverse(&mut self) {
        self.reversed = !self.reversed;
        if let Some(set) = &mut self.running {
            set.reverse();
        }
    }
}

impl std::fmt::Debug for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transition")
            .field("id", &self.id)
            .field("setup", &self.setup)
            .field("reenable", &self.reenable)
            .field("reversed", &self.reversed)
            .field("running", &self.running)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::transit_target;
    use crate::controller::Controller;
    use crate::element::Element;
    use crate::property::Property;
    use crate::target::Size;

    #[test]
    fn test_id_defaults() {
        let element = Element::leaf("card", Size::default());
        assert_eq!(transit_target(element.clone()).create_transition().id(), "transition");
        assert_eq!(
            transit_target(element).id("pager").create_transition().id(),
            "pager"
        );
    }

    #[test]
    fn test_start_is_idempotent_while_running() {
        let element = Element::leaf("card", Size::default());
        let mut transition = transit_target(element).alpha(0.0, 1.0).create_transition();
        transition.start().unwrap();
        let key = transition.controllers()[0].borrow().key();

        transition.start().unwrap();
        assert_eq!(transition.controllers().len(), 1);
        assert_eq!(transition.controllers()[0].borrow().key(), key);
    }

    #[test]
    fn test_end_releases_set() {
        let element = Element::leaf("card", Size::default());
        let mut transition = transit_target(element.clone()).alpha(0.0, 1.0).create_transition();
        transition.update_progress(0.2).unwrap();
        assert!(transition.is_running());

        transition.end().unwrap();
        assert!(!transition.is_running());
        assert!(transition.controllers().is_empty());
        assert_eq!(element.scalar(Property::Alpha), Some(1.0));
    }

    #[test]
    fn test_each_run_measures_again() {
        let element = Element::leaf("card", Size::new(100.0, 50.0));
        let mut transition = transit_target(element.clone())
            .delay_translation_x_of_width(1.0)
            .create_transition();

        transition.update_progress(1.0).unwrap();
        assert_eq!(element.scalar(Property::TranslationX), Some(100.0));
        transition.end().unwrap();

        element.set(Property::TranslationX, 0.0);
        element.set_size(Size::new(300.0, 50.0));
        transition.update_progress(1.0).unwrap();
        assert_eq!(element.scalar(Property::TranslationX), Some(300.0));
    }

    #[test]
    fn test_reverse_applies_to_running_and_later_runs() {
        let element = Element::leaf("card", Size::default());
        let mut transition = transit_target(element.clone()).alpha(0.0, 1.0).create_transition();
        transition.update_progress(0.25).unwrap();
        transition.reverse();
        assert!(transition.is_reversed());
        assert_eq!(
            transition.controllers()[0].borrow().window(),
            crate::controller::ProgressWindow::new(1.0, 0.0)
        );
        transition.end().unwrap();

        transition.start().unwrap();
        assert_eq!(
            transition.controllers()[0].borrow().ranges()[0].start(),
            crate::property::Value::Scalar(1.0)
        );
    }

    #[test]
    fn test_set_interpolator_reaches_running_controllers() {
        let element = Element::leaf("card", Size::default());
        let mut transition = transit_target(element.clone()).alpha(0.0, 1.0).create_transition();
        transition.set_interpolator(Some(Interpolator::EaseIn));
        transition.update_progress(0.5).unwrap();
        assert_eq!(element.scalar(Property::Alpha), Some(0.25));
    }

    #[test]
    fn test_populate_into_host_set() {
        let element = Element::leaf("card", Size::default());
        let transition = transit_target(element).alpha(0.0, 1.0).create_transition();

        let mut set = ControllerSet::new("host");
        transition.populate(&mut set).unwrap();
        transition.populate(&mut set).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.controllers()[0].borrow().id(), "host");
    }

    #[test]
    fn test_clone_of_running_transition_is_independent() {
        let element = Element::leaf("card", Size::default());
        let mut transition = transit_target(element).alpha(0.0, 1.0).create_transition();
        transition.start().unwrap();

        let mut copy = transition.clone();
        copy.reverse();
        assert!(!transition.is_reversed());
        assert_eq!(
            transition.controllers()[0].borrow().window(),
            crate::controller::ProgressWindow::UNIT
        );
    }

    #[test]
    fn test_clone_of_running_transition_dispatches_on_its_own() {
        let first = Element::leaf("first", Size::default());
        let second = Element::leaf("second", Size::default());
        let mut transition = transit_target(first.clone()).alpha(0.0, 1.0).create_transition();
        transition.update_progress(0.5).unwrap();

        let mut copy = transition.clone();
        assert!(copy.is_running());
        copy.set_target(Some(second.clone()));
        copy.update_progress(0.5).unwrap();
        assert_eq!(second.scalar(Property::Alpha), Some(0.5));

        copy.update_progress(0.8).unwrap();
        assert_eq!(first.scalar(Property::Alpha), Some(0.5));
        assert_eq!(second.scalar(Property::Alpha), Some(0.8));
    }
}
