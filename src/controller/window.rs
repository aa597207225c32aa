/// The slice of global progress a controller is active over.
///
/// Progress at `start` maps to local fraction 0, progress at `end` to 1, and
/// anything outside is clamped. `start > end` is allowed and describes a
/// controller driven by progress moving the other way.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressWindow {
    pub start: f32,
    pub end: f32,
}

impl ProgressWindow {
    /// `[0, 1]`
    pub const UNIT: Self = Self {
        start: 0.0,
        end: 1.0,
    };

    pub const fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Clamped local fraction for a global progress value.
    ///
    /// A zero-width window is a step: 1 once progress reaches `start`, else 0.
    pub fn fraction(&self, progress: f32) -> f32 {
        let span = self.end - self.start;
        if span == 0.0 {
            return if progress >= self.start { 1.0 } else { 0.0 };
        }
        ((progress - self.start) / span).clamp(0.0, 1.0)
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    /// Fraction a controller lands on when it ends
    pub fn terminal_fraction(&self) -> f32 {
        if self.is_inverted() {
            0.0
        } else {
            1.0
        }
    }

    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }

    /// Whether a controller with this window should be live for `progress`
    /// under the re-enable policy.
    ///
    /// Non-negative progress keeps windows ending above zero, negative
    /// progress keeps windows ending below zero. A window ending exactly at
    /// zero is always live.
    pub fn is_live_for(&self, progress: f32) -> bool {
        if self.end == 0.0 {
            return true;
        }
        if progress >= 0.0 {
            self.end > 0.0
        } else {
            self.end < 0.0
        }
    }
}

impl Default for ProgressWindow {
    fn default() -> Self {
        Self::UNIT
    }
}
