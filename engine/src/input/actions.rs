//! Build Actions
//!
//! Edge detection for the primary (commit) and secondary (remove) actions.

/// Actions that began on the current tick.
///
/// Both flags are edge-triggered: `true` only on the tick the action starts,
/// never while it is merely held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionState {
    /// Commit (place) was triggered this tick
    pub primary: bool,
    /// Remove (destroy) was triggered this tick
    pub secondary: bool,
}

impl ActionState {
    /// No action this tick.
    pub const NONE: Self = Self {
        primary: false,
        secondary: false,
    };

    /// Only the commit action this tick.
    pub const PRIMARY: Self = Self {
        primary: true,
        secondary: false,
    };

    /// Only the remove action this tick.
    pub const SECONDARY: Self = Self {
        primary: false,
        secondary: true,
    };

    /// Check if any action was triggered.
    pub fn any(&self) -> bool {
        self.primary || self.secondary
    }
}

/// Turns held button levels into edge-triggered [`ActionState`]s.
///
/// The host calls [`ActionButtons::update`] exactly once per tick with the
/// current pressed state of each button.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionButtons {
    primary_held: bool,
    secondary_held: bool,
}

impl ActionButtons {
    /// Create a tracker with both buttons released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record this tick's button levels and return the actions that began.
    pub fn update(&mut self, primary_down: bool, secondary_down: bool) -> ActionState {
        let state = ActionState {
            primary: primary_down && !self.primary_held,
            secondary: secondary_down && !self.secondary_held,
        };
        self.primary_held = primary_down;
        self.secondary_held = secondary_down;
        state
    }

    /// Release both buttons (e.g. on focus loss) so the next press triggers.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
