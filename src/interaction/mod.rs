use serde::{Deserialize, Serialize};

use crate::core::LAST_STEP_INDEX;

/// User-triggerable navigation actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationAction {
    Previous,
    Next,
    Animate,
    Reset,
}

impl NavigationAction {
    pub const ALL: [Self; 4] = [Self::Previous, Self::Next, Self::Animate, Self::Reset];
}

/// Iteration state of the visualization.
///
/// The step index always addresses a valid entry of the step table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum VisualizationState {
    Idle { step: usize },
    Animating { step: usize },
}

impl Default for VisualizationState {
    fn default() -> Self {
        Self::Idle { step: 0 }
    }
}

/// Result of a navigation transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    Applied,
    Rejected,
}

impl Transition {
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Result of one automatic-advance tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickOutcome {
    /// Moved to the next step; the tick stays scheduled.
    Advanced,
    /// Was already on the last step; back to idle, tick must be cancelled.
    Finished,
    /// Not animating, or the tick belongs to a cancelled task.
    Ignored,
}

/// Which navigation actions are currently accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlAvailability {
    pub previous: bool,
    pub next: bool,
    pub animate: bool,
    pub reset: bool,
}

impl ControlAvailability {
    #[must_use]
    pub fn is_enabled(self, action: NavigationAction) -> bool {
        match action {
            NavigationAction::Previous => self.previous,
            NavigationAction::Next => self.next,
            NavigationAction::Animate => self.animate,
            NavigationAction::Reset => self.reset,
        }
    }
}

impl VisualizationState {
    #[must_use]
    pub fn current_step_index(self) -> usize {
        match self {
            Self::Idle { step } | Self::Animating { step } => step,
        }
    }

    #[must_use]
    pub fn is_animating(self) -> bool {
        matches!(self, Self::Animating { .. })
    }

    #[must_use]
    pub fn controls(self) -> ControlAvailability {
        match self {
            Self::Idle { step } => ControlAvailability {
                previous: step > 0,
                next: step < LAST_STEP_INDEX,
                animate: true,
                reset: true,
            },
            Self::Animating { .. } => ControlAvailability {
                previous: false,
                next: false,
                animate: false,
                reset: true,
            },
        }
    }

    pub fn go_previous(&mut self) -> Transition {
        match *self {
            Self::Idle { step } if step > 0 => {
                *self = Self::Idle { step: step - 1 };
                Transition::Applied
            }
            _ => Transition::Rejected,
        }
    }

    pub fn go_next(&mut self) -> Transition {
        match *self {
            Self::Idle { step } if step < LAST_STEP_INDEX => {
                *self = Self::Idle { step: step + 1 };
                Transition::Applied
            }
            _ => Transition::Rejected,
        }
    }

    /// Restarts from the first step in animating mode.
    pub fn start_animation(&mut self) -> Transition {
        match *self {
            Self::Idle { .. } => {
                *self = Self::Animating { step: 0 };
                Transition::Applied
            }
            Self::Animating { .. } => Transition::Rejected,
        }
    }

    /// Applies one automatic-advance tick.
    pub fn advance_tick(&mut self) -> TickOutcome {
        match *self {
            Self::Animating { step } if step < LAST_STEP_INDEX => {
                *self = Self::Animating { step: step + 1 };
                TickOutcome::Advanced
            }
            Self::Animating { step } => {
                *self = Self::Idle { step };
                TickOutcome::Finished
            }
            Self::Idle { .. } => TickOutcome::Ignored,
        }
    }

    /// Always accepted, from any state.
    pub fn reset(&mut self) -> Transition {
        *self = Self::Idle { step: 0 };
        Transition::Applied
    }
}
