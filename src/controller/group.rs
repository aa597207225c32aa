use super::{
    share, Controller, ControllerKey, ControllerSet, ControllerState, ProgressWindow,
    SharedController,
};
use crate::animation::Interpolator;
use crate::error::Result;
use crate::target::TargetRef;

/// Drives one nested [`ControllerSet`] per child of a container.
///
/// The nested sets keep their own child targets: rebinding the group only
/// changes the parent it reports. Progress is forwarded unchanged, every child
/// set maps it through its own windows.
#[derive(Clone)]
pub struct GroupController {
    state: ControllerState,
    parent: Option<TargetRef>,
    children: Vec<ControllerSet>,
}

impl GroupController {
    pub fn new(children: Vec<ControllerSet>) -> Self {
        Self {
            state: ControllerState::new(ProgressWindow::UNIT),
            parent: None,
            children,
        }
    }

    pub fn with_window(mut self, window: ProgressWindow) -> Self {
        self.state.window = window;
        self
    }

    pub fn children(&self) -> &[ControllerSet] {
        &self.children
    }
}

impl Controller for GroupController {
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
        self.parent.as_ref()
    }

    fn set_target(&mut self, target: Option<TargetRef>) {
        self.parent = target;
    }

    fn window(&self) -> ProgressWindow {
        self.state.window
    }

    fn set_progress_window(&mut self, window: ProgressWindow) {
        self.state.window = window;
    }

    fn interpolator(&self) -> Option<&Interpolator> {
        self.state.interpolator.as_ref()
    }

    fn set_interpolator(&mut self, interpolator: Option<Interpolator>) {
        for child in &mut self.children {
            child.set_interpolator(interpolator.clone());
        }
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
        for child in &mut self.children {
            child.start()?;
        }
        self.state.begin();
        Ok(())
    }

    fn update_progress(&mut self, progress: f32) -> Result<()> {
        if !self.state.enabled {
            return Ok(());
        }
        if !self.state.started {
            self.start()?;
        }
        if self.state.last_progress == Some(progress) {
            return Ok(());
        }
        self.state.last_progress = Some(progress);
        for child in &mut self.children {
            if let Err(err) = child.update_progress(progress) {
                self.state.last_progress = None;
                return Err(err);
            }
        }
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        if !self.state.enabled {
            return Ok(());
        }
        for child in &mut self.children {
            child.end()?;
        }
        self.state.started = false;
        self.state.last_progress = None;
        Ok(())
    }

    fn reverse(&mut self) {
        for child in &mut self.children {
            child.reverse();
        }
        self.state.reverse();
    }

    fn duplicate(&self) -> SharedController {
        // ControllerSet's Clone duplicates every nested controller
        share(Self {
            state: self.state.fresh(),
            parent: self.parent.clone(),
            children: self.children.clone(),
        })
    }
}
