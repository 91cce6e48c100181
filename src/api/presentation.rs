use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{Step, dc};
use crate::interaction::{ControlAvailability, NavigationAction};

/// Named text regions the controller writes after every re-render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplaySlot {
    StepTitle,
    StepDescription,
    CurrentPoint,
    CurrentValue,
    Subgradient,
}

impl DisplaySlot {
    pub const ALL: [Self; 5] = [
        Self::StepTitle,
        Self::StepDescription,
        Self::CurrentPoint,
        Self::CurrentValue,
        Self::Subgradient,
    ];
}

/// Presentation layer the controller projects its state onto.
pub trait NavigationSurface {
    fn set_text(&mut self, slot: DisplaySlot, text: &str);

    fn set_action_enabled(&mut self, action: NavigationAction, enabled: bool);
}

/// Text shown in the five display slots for one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Readouts {
    pub step_title: String,
    pub step_description: String,
    pub current_point: String,
    pub current_value: String,
    pub subgradient: String,
}

impl Readouts {
    #[must_use]
    pub fn for_step(index: usize, step: &Step) -> Self {
        let x0 = step.point;
        Self {
            step_title: format!("Step {}", index + 1),
            step_description: step.description.to_owned(),
            current_point: format!("x = {x0:.4}"),
            current_value: format!("f(x) = {:.4}", dc::f(x0)),
            subgradient: format!("∂h(x) = {}", dc::subgradient(x0)),
        }
    }

    #[must_use]
    pub fn slot(&self, slot: DisplaySlot) -> &str {
        match slot {
            DisplaySlot::StepTitle => &self.step_title,
            DisplaySlot::StepDescription => &self.step_description,
            DisplaySlot::CurrentPoint => &self.current_point,
            DisplaySlot::CurrentValue => &self.current_value,
            DisplaySlot::Subgradient => &self.subgradient,
        }
    }

    pub fn apply_to<N: NavigationSurface + ?Sized>(&self, surface: &mut N) {
        for slot in DisplaySlot::ALL {
            surface.set_text(slot, self.slot(slot));
        }
    }
}

impl ControlAvailability {
    pub fn apply_to<N: NavigationSurface + ?Sized>(self, surface: &mut N) {
        for action in NavigationAction::ALL {
            surface.set_action_enabled(action, self.is_enabled(action));
        }
    }
}

/// In-memory navigation surface for tests and headless runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessNavigation {
    texts: IndexMap<DisplaySlot, String>,
    enabled: IndexMap<NavigationAction, bool>,
    writes: usize,
}

impl HeadlessNavigation {
    #[must_use]
    pub fn text(&self, slot: DisplaySlot) -> Option<&str> {
        self.texts.get(&slot).map(String::as_str)
    }

    /// Unset actions report disabled.
    #[must_use]
    pub fn is_enabled(&self, action: NavigationAction) -> bool {
        self.enabled.get(&action).copied().unwrap_or(false)
    }

    /// Number of text writes received so far.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl NavigationSurface for HeadlessNavigation {
    fn set_text(&mut self, slot: DisplaySlot, text: &str) {
        self.texts.insert(slot, text.to_owned());
        self.writes += 1;
    }

    fn set_action_enabled(&mut self, action: NavigationAction, enabled: bool) {
        self.enabled.insert(action, enabled);
    }
}

#[cfg(test)]
mod tests {
    use super::Readouts;
    use crate::core::Step;

    #[test]
    fn negative_points_print_negative_subgradient() {
        let readouts = Readouts::for_step(2, &Step::new(-0.5, "mirror"));
        assert_eq!(readouts.step_title, "Step 3");
        assert_eq!(readouts.current_point, "x = -0.5000");
        assert_eq!(readouts.current_value, "f(x) = -0.2500");
        assert_eq!(readouts.subgradient, "∂h(x) = -1");
    }
}
