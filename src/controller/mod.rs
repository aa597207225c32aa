//! Controllers map global progress onto property values of a target.
//!
//! A [`Controller`] owns a [`ProgressWindow`]: the slice of global progress it
//! reacts to. Each progress update is turned into a clamped local fraction,
//! reshaped by an optional [`Interpolator`] and applied to the target.
//! Controllers are grouped under a [`ControllerSet`], which owns the shared
//! target and fans progress out to every enabled member.
//!
//! ## Identity
//!
//! Every controller carries a [`ControllerKey`] that is unique for the life of
//! the process. Sets de-duplicate by key, and [`Controller::duplicate`] always
//! hands out a fresh one, so a copy taken from a template never aliases the
//! original.

mod group;
mod progress;
mod set;
mod window;

pub use group::GroupController;
pub use progress::{Effect, ProgressController};
pub use set::ControllerSet;
pub use window::ProgressWindow;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::animation::Interpolator;
use crate::error::Result;
use crate::property::PropertyRange;
use crate::target::TargetRef;

/// Unique identity of a controller
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ControllerKey(u64);

static NEXT_CONTROLLER_KEY: AtomicU64 = AtomicU64::new(1);

impl ControllerKey {
    /// Generate a new unique key
    pub fn next() -> Self {
        ControllerKey(NEXT_CONTROLLER_KEY.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ControllerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A controller shared between a template and the sets built from it
pub type SharedController = Rc<RefCell<dyn Controller>>;

/// Wrap a controller so it can be registered with a [`ControllerSet`]
pub fn share<C: Controller + 'static>(controller: C) -> SharedController {
    Rc::new(RefCell::new(controller))
}

pub trait Controller {
    fn key(&self) -> ControllerKey;

    /// Id of the set that owns this controller
    fn id(&self) -> &str;

    fn set_id(&mut self, id: &str);

    fn target(&self) -> Option<&TargetRef>;

    fn set_target(&mut self, target: Option<TargetRef>);

    fn window(&self) -> ProgressWindow;

    fn set_progress_window(&mut self, window: ProgressWindow);

    fn interpolator(&self) -> Option<&Interpolator>;

    fn set_interpolator(&mut self, interpolator: Option<Interpolator>);

    fn is_enable(&self) -> bool;

    fn set_enable(&mut self, enable: bool);

    /// Ready the controller for progress. Safe to call again before `end`.
    fn start(&mut self) -> Result<()>;

    /// Apply a global progress value. Repeating the last value is a no-op.
    fn update_progress(&mut self, progress: f32) -> Result<()>;

    /// Land on the terminal value
    fn end(&mut self) -> Result<()>;

    /// Swap the start and end of every range and of the window
    fn reverse(&mut self);

    /// Copy with the same configuration but a fresh key and fresh state
    fn duplicate(&self) -> SharedController;

    /// Property ranges driven by this controller, for inspection
    fn ranges(&self) -> &[PropertyRange] {
        &[]
    }
}

/// Bookkeeping shared by the controller implementations
#[derive(Clone, Debug)]
pub(crate) struct ControllerState {
    pub key: ControllerKey,
    pub id: String,
    pub window: ProgressWindow,
    pub interpolator: Option<Interpolator>,
    pub enabled: bool,
    pub started: bool,
    /// Last progress applied since `start`
    pub last_progress: Option<f32>,
}

impl ControllerState {
    pub fn new(window: ProgressWindow) -> Self {
        Self {
            key: ControllerKey::next(),
            id: String::new(),
            window,
            interpolator: None,
            enabled: true,
            started: false,
            last_progress: None,
        }
    }

    /// Same configuration, new identity, nothing cached
    pub fn fresh(&self) -> Self {
        Self {
            key: ControllerKey::next(),
            started: false,
            last_progress: None,
            ..self.clone()
        }
    }

    pub fn begin(&mut self) {
        if !self.started {
            self.started = true;
            self.last_progress = None;
        }
    }

    /// Record `progress` and return the interpolated local fraction, or
    /// `None` if it was already applied
    pub fn advance(&mut self, progress: f32) -> Option<f32> {
        if self.last_progress == Some(progress) {
            return None;
        }
        self.last_progress = Some(progress);
        let fraction = self.window.fraction(progress);
        Some(match &self.interpolator {
            Some(interpolator) => interpolator.evaluate(fraction),
            None => fraction,
        })
    }

    pub fn reverse(&mut self) {
        self.window = self.window.reversed();
        self.last_progress = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_unique() {
        let a = ControllerKey::next();
        let b = ControllerKey::next();
        assert_ne!(a, b);
        assert!(b.as_u64() > a.as_u64());
    }

    #[test]
    fn test_advance_skips_repeats() {
        let mut state = ControllerState::new(ProgressWindow::UNIT);
        state.begin();
        assert_eq!(state.advance(0.5), Some(0.5));
        assert_eq!(state.advance(0.5), None);
        assert_eq!(state.advance(0.75), Some(0.75));
    }

    #[test]
    fn test_advance_uses_interpolator() {
        let mut state = ControllerState::new(ProgressWindow::UNIT);
        state.interpolator = Some(Interpolator::EaseIn);
        assert_eq!(state.advance(0.5), Some(0.25));
    }

    #[test]
    fn test_fresh_state_keeps_configuration() {
        let mut state = ControllerState::new(ProgressWindow::new(0.0, -1.0));
        state.enabled = false;
        state.begin();
        state.advance(-0.5);

        let fresh = state.fresh();
        assert_ne!(fresh.key, state.key);
        assert_eq!(fresh.window, state.window);
        assert!(!fresh.enabled);
        assert!(!fresh.started);
        assert_eq!(fresh.last_progress, None);
    }
}
