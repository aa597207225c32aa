use std::collections::HashSet;

use super::{share, Controller, ControllerKey, SharedController};
use crate::animation::Interpolator;
use crate::config::TransitConfig;
use crate::diagnostics::StateLog;
use crate::error::Result;
use crate::target::TargetRef;

/// Owns the controllers bound to one target and fans progress out to them.
///
/// Controllers are stored once per [`ControllerKey`]; registering the same
/// controller again is tolerated and only reported to the [`StateLog`].
pub struct ControllerSet {
    id: String,
    controllers: Vec<SharedController>,
    keys: HashSet<ControllerKey>,
    target: Option<TargetRef>,
    interpolator: Option<Interpolator>,
    /// Recompute enable flags from the progress sign before each dispatch
    reenable: bool,
    /// `None` until the first update after `start`
    last_progress: Option<f32>,
    started: bool,
    config: TransitConfig,
    log: StateLog,
}

impl ControllerSet {
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_config(id, TransitConfig::default())
    }

    pub fn with_config(id: impl Into<String>, config: TransitConfig) -> Self {
        Self {
            id: id.into(),
            controllers: Vec::new(),
            keys: HashSet::new(),
            target: None,
            interpolator: None,
            reenable: false,
            last_progress: None,
            started: false,
            log: StateLog::new(config.debug),
            config,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &TransitConfig {
        &self.config
    }

    pub fn controllers(&self) -> &[SharedController] {
        &self.controllers
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    pub fn contains(&self, key: ControllerKey) -> bool {
        self.keys.contains(&key)
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn diagnostics(&self) -> &StateLog {
        &self.log
    }

    /// Register a controller and hand it back.
    ///
    /// The controller takes this set's id, and its target when one is bound.
    /// A controller whose key is already registered is not stored again.
    pub fn add(&mut self, controller: SharedController) -> SharedController {
        let key = {
            let mut ctrl = controller.borrow_mut();
            ctrl.set_id(&self.id);
            if let Some(target) = &self.target {
                ctrl.set_target(Some(target.clone()));
            }
            ctrl.key()
        };
        if !self.keys.insert(key) {
            self.log
                .record(&self.id, format!("possible duplicate: controller {}", key));
            return controller;
        }
        self.controllers.push(controller.clone());
        controller
    }

    /// Wrap and register an owned controller
    pub fn add_controller<C: Controller + 'static>(&mut self, controller: C) -> SharedController {
        self.add(share(controller))
    }

    pub fn target(&self) -> Option<&TargetRef> {
        self.target.as_ref()
    }

    /// Bind every controller, present and future, to `target`
    pub fn set_target(&mut self, target: Option<TargetRef>) {
        for ctrl in &self.controllers {
            ctrl.borrow_mut().set_target(target.clone());
        }
        self.target = target;
    }

    pub fn interpolator(&self) -> Option<&Interpolator> {
        self.interpolator.as_ref()
    }

    /// Interpolator handed to controllers that have none of their own
    pub fn set_interpolator(&mut self, interpolator: Option<Interpolator>) {
        self.interpolator = interpolator;
    }

    pub fn reenables(&self) -> bool {
        self.reenable
    }

    /// Enable only the controllers whose window points the way progress is
    /// going, re-evaluated on every new progress value
    pub fn set_reenable(&mut self, reenable: bool) {
        self.reenable = reenable;
    }

    fn propagate(&self, ctrl: &mut dyn Controller) {
        if let Some(interpolator) = &self.interpolator {
            if ctrl.interpolator().is_none() {
                ctrl.set_interpolator(Some(interpolator.clone()));
            }
        }
        if let Some(target) = &self.target {
            ctrl.set_target(Some(target.clone()));
        }
    }

    pub fn start(&mut self) -> Result<()> {
        self.log.start(&self.id);
        self.last_progress = None;
        for ctrl in &self.controllers {
            let mut ctrl = ctrl.borrow_mut();
            self.propagate(&mut *ctrl);
            ctrl.start()?;
        }
        self.started = true;
        log::debug!("{}: started {} controllers", self.id, self.controllers.len());
        Ok(())
    }

    pub fn update_progress(&mut self, progress: f32) -> Result<()> {
        if self.last_progress == Some(progress) {
            return Ok(());
        }
        if !self.started {
            log::debug!("{}: progress before start, starting", self.id);
            self.start()?;
        }
        self.last_progress = Some(progress);

        if self.reenable {
            self.apply_reenable(progress);
        }

        if let Err(err) = self.dispatch(progress) {
            // a failed dispatch must not block a retry with the same value
            self.last_progress = None;
            return Err(err);
        }
        Ok(())
    }

    fn dispatch(&self, progress: f32) -> Result<()> {
        for ctrl in &self.controllers {
            let mut ctrl = ctrl.borrow_mut();
            if ctrl.is_enable() {
                ctrl.update_progress(progress)?;
            }
        }
        Ok(())
    }

    fn apply_reenable(&mut self, progress: f32) {
        for ctrl in &self.controllers {
            let mut ctrl = ctrl.borrow_mut();
            let live = ctrl.window().is_live_for(progress);
            if ctrl.is_enable() != live {
                ctrl.set_enable(live);
                self.log.record(
                    &self.id,
                    format!(
                        "controller {} {} at {}",
                        ctrl.key(),
                        if live { "enabled" } else { "disabled" },
                        progress
                    ),
                );
            }
        }
    }

    pub fn end(&mut self) -> Result<()> {
        for ctrl in &self.controllers {
            let mut ctrl = ctrl.borrow_mut();
            self.propagate(&mut *ctrl);
            ctrl.end()?;
        }
        self.started = false;
        self.last_progress = None;
        self.log.end(&self.id);
        if self.config.print_on_end {
            self.log.print();
        }
        log::debug!("{}: ended", self.id);
        Ok(())
    }

    pub fn reverse(&mut self) {
        for ctrl in &self.controllers {
            ctrl.borrow_mut().reverse();
        }
        self.last_progress = None;
    }
}

impl Clone for ControllerSet {
    /// Deep copy: every controller is duplicated and the copy starts unstarted
    /// with an empty progress cache
    fn clone(&self) -> Self {
        let controllers: Vec<SharedController> = self
            .controllers
            .iter()
            .map(|ctrl| ctrl.borrow().duplicate())
            .collect();
        let keys = controllers.iter().map(|ctrl| ctrl.borrow().key()).collect();
        Self {
            id: self.id.clone(),
            controllers,
            keys,
            target: self.target.clone(),
            interpolator: self.interpolator.clone(),
            reenable: self.reenable,
            last_progress: None,
            started: false,
            config: self.config.clone(),
            log: StateLog::new(self.config.debug),
        }
    }
}

impl std::fmt::Debug for ControllerSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerSet")
            .field("id", &self.id)
            .field("controllers", &self.controllers.len())
            .field("reenable", &self.reenable)
            .field("last_progress", &self.last_progress)
            .field("started", &self.started)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{ProgressController, ProgressWindow};
    use crate::element::Element;
    use crate::property::{Property, PropertyRange};
    use crate::target::Size;
    use std::rc::Rc;

    fn ctrl(property: Property, window: ProgressWindow) -> ProgressController {
        ProgressController::new(vec![PropertyRange::scalar(property, 0.0, 1.0)])
            .unwrap()
            .with_window(window)
    }

    fn debug_set(id: &str) -> ControllerSet {
        ControllerSet::with_config(id, TransitConfig::default().debug(true))
    }

    #[test]
    fn test_add_assigns_id() {
        let mut set = ControllerSet::new("pager");
        let added = set.add_controller(ctrl(Property::Alpha, ProgressWindow::UNIT));
        assert_eq!(added.borrow().id(), "pager");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_duplicate_add_is_stored_once_and_logged() {
        let mut set = debug_set("pager");
        let shared = share(ctrl(Property::Alpha, ProgressWindow::UNIT));
        set.add(shared.clone());
        set.add(shared.clone());

        assert_eq!(set.len(), 1);
        assert_eq!(set.diagnostics().matching("possible duplicate").count(), 1);
    }

    #[test]
    fn test_set_target_propagates() {
        let element = Element::leaf("card", Size::default());
        let mut set = ControllerSet::new("card");
        set.add_controller(ctrl(Property::Alpha, ProgressWindow::UNIT));
        set.add_controller(ctrl(Property::ScaleX, ProgressWindow::UNIT));

        let target: TargetRef = element;
        set.set_target(Some(target.clone()));
        for c in set.controllers() {
            let c = c.borrow();
            assert!(Rc::ptr_eq(c.target().unwrap(), &target));
        }
    }

    #[test]
    fn test_set_interpolator_fills_missing_only() {
        let element = Element::leaf("card", Size::default());
        let mut set = ControllerSet::new("card");
        let plain = set.add_controller(ctrl(Property::Alpha, ProgressWindow::UNIT));
        let eased = set.add_controller(
            ctrl(Property::ScaleX, ProgressWindow::UNIT).with_interpolator(Some(Interpolator::EaseOut)),
        );
        set.set_target(Some(element.clone()));
        set.set_interpolator(Some(Interpolator::EaseIn));
        set.start().unwrap();
        set.update_progress(0.5).unwrap();

        assert!(plain.borrow().interpolator().unwrap().same_as(&Interpolator::EaseIn));
        assert!(eased.borrow().interpolator().unwrap().same_as(&Interpolator::EaseOut));
        assert_eq!(element.scalar(Property::Alpha), Some(0.25));
        assert_eq!(element.scalar(Property::ScaleX), Some(0.75));
    }

    #[test]
    fn test_reenable_policy() {
        let element = Element::leaf("page", Size::default());
        let mut set = debug_set("page");
        let forward = set.add_controller(ctrl(Property::Alpha, ProgressWindow::new(0.0, 1.0)));
        let backward = set.add_controller(ctrl(Property::ScaleX, ProgressWindow::new(0.0, -1.0)));
        let neutral = set.add_controller(ctrl(Property::Rotation, ProgressWindow::new(-1.0, 0.0)));
        set.set_target(Some(element));
        set.set_reenable(true);
        set.start().unwrap();

        set.update_progress(0.3).unwrap();
        assert!(forward.borrow().is_enable());
        assert!(!backward.borrow().is_enable());
        assert!(neutral.borrow().is_enable());

        set.update_progress(-0.3).unwrap();
        assert!(!forward.borrow().is_enable());
        assert!(backward.borrow().is_enable());
        assert!(neutral.borrow().is_enable());

        assert_eq!(set.diagnostics().matching("disabled").count(), 2);
        assert_eq!(set.diagnostics().matching("enabled").count(), 1);
    }

    #[test]
    fn test_clone_is_deep() {
        let element = Element::leaf("card", Size::default());
        let mut set = ControllerSet::new("card");
        set.add_controller(ctrl(Property::Alpha, ProgressWindow::UNIT));
        set.set_target(Some(element));
        set.set_reenable(true);

        let mut copy = set.clone();
        assert_eq!(copy.id(), "card");
        assert!(copy.reenables());
        assert_eq!(copy.len(), 1);

        let original_key = set.controllers()[0].borrow().key();
        let copy_key = copy.controllers()[0].borrow().key();
        assert_ne!(original_key, copy_key);
        assert!(!copy.contains(original_key));

        copy.reverse();
        assert_eq!(set.controllers()[0].borrow().window(), ProgressWindow::UNIT);
        assert_eq!(copy.controllers()[0].borrow().window(), ProgressWindow::new(1.0, 0.0));
    }

    #[test]
    fn test_update_before_start_starts_implicitly() {
        let element = Element::leaf("card", Size::default());
        let mut set = ControllerSet::new("card");
        set.add_controller(ctrl(Property::Alpha, ProgressWindow::UNIT));
        set.set_target(Some(element.clone()));

        set.update_progress(0.4).unwrap();
        assert!(set.is_started());
        assert_eq!(element.scalar(Property::Alpha), Some(0.4));
    }

    #[test]
    fn test_start_without_target_fails() {
        let mut set = ControllerSet::new("orphan");
        set.add_controller(ctrl(Property::Alpha, ProgressWindow::UNIT));
        assert!(set.start().is_err());
    }

    /// Target whose first apply fails
    struct FailsOnce {
        failed: std::cell::Cell<bool>,
        applied: std::cell::Cell<usize>,
    }

    impl crate::target::Target for FailsOnce {
        fn apply(
            &self,
            _: Property,
            _: crate::property::Value,
        ) -> std::result::Result<(), crate::error::ApplyError> {
            if !self.failed.replace(true) {
                return Err("not attached yet".into());
            }
            self.applied.set(self.applied.get() + 1);
            Ok(())
        }

        fn value(&self, _: Property) -> Option<crate::property::Value> {
            None
        }

        fn size(&self) -> Size {
            Size::default()
        }
    }

    #[test]
    fn test_clone_after_run_dispatches_same_progress() {
        let first = Element::leaf("first", Size::default());
        let second = Element::leaf("second", Size::default());
        let mut set = ControllerSet::new("card");
        set.add_controller(ctrl(Property::Alpha, ProgressWindow::UNIT));
        set.set_target(Some(first.clone()));
        set.start().unwrap();
        set.update_progress(0.5).unwrap();

        let mut copy = set.clone();
        assert!(!copy.is_started());
        copy.set_target(Some(second.clone()));
        copy.update_progress(0.5).unwrap();

        assert_eq!(second.scalar(Property::Alpha), Some(0.5));
        assert_eq!(first.scalar(Property::Alpha), Some(0.5));
    }

    #[test]
    fn test_failed_apply_can_be_retried() {
        let target = Rc::new(FailsOnce {
            failed: std::cell::Cell::new(false),
            applied: std::cell::Cell::new(0),
        });
        let mut set = ControllerSet::new("card");
        set.add_controller(ctrl(Property::Alpha, ProgressWindow::UNIT));
        set.set_target(Some(target.clone()));

        assert!(set.update_progress(0.5).is_err());
        assert_eq!(target.applied.get(), 0);

        set.update_progress(0.5).unwrap();
        assert_eq!(target.applied.get(), 1);

        set.update_progress(0.5).unwrap();
        assert_eq!(target.applied.get(), 1);
    }
}
