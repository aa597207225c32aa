//! State log for debugging controller sets.
//!
//! Enable it through [`TransitConfig::debug`](crate::config::TransitConfig)
//! (on by default in debug builds). Each [`ControllerSet`](crate::controller::ControllerSet)
//! keeps its own log, recording:
//! - start and end of a run
//! - controllers registered twice
//! - enable flips made by the re-enable policy
//!
//! The log never influences control flow.

/// One recorded event
#[derive(Debug, Clone, PartialEq)]
pub struct StateEvent {
    /// Id of the controller set that recorded the event
    pub set_id: String,
    pub message: String,
}

#[derive(Debug, Default, Clone)]
pub struct StateLog {
    enabled: bool,
    events: Vec<StateEvent>,
    /// Number of completed start/end cycles
    runs: u64,
}

impl StateLog {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            events: Vec::new(),
            runs: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record an event. No-op when disabled.
    pub fn record(&mut self, set_id: &str, message: impl Into<String>) {
        if !self.enabled {
            return;
        }
        let message = message.into();
        log::debug!("[{}] {}", set_id, message);
        self.events.push(StateEvent {
            set_id: set_id.to_string(),
            message,
        });
    }

    pub fn start(&mut self, set_id: &str) {
        self.record(set_id, "start");
    }

    pub fn end(&mut self, set_id: &str) {
        self.record(set_id, "end");
        if self.enabled {
            self.runs += 1;
        }
    }

    pub fn events(&self) -> &[StateEvent] {
        &self.events
    }

    /// Events whose message contains `needle`
    pub fn matching<'a>(&'a self, needle: &'a str) -> impl Iterator<Item = &'a StateEvent> + 'a {
        self.events.iter().filter(move |e| e.message.contains(needle))
    }

    pub fn runs(&self) -> u64 {
        self.runs
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Dump every event through the `log` facade
    pub fn print(&self) {
        if !self.enabled {
            return;
        }
        log::debug!("[State Log] events={} runs={}", self.events.len(), self.runs);
        for event in &self.events {
            log::debug!("  [{}] {}", event.set_id, event.message);
        }
    }
}
