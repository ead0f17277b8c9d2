//! On-screen crosshair state.

use bevy_ecs::prelude::*;
use tracing::debug;

/// Visual mode of the reticle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReticleState {
    /// Nothing interactable under the crosshair.
    #[default]
    Normal,
    /// An interactable object is under the crosshair.
    Interactive,
}

impl ReticleState {
    /// Lowercase name for logs and event records.
    pub fn as_str(self) -> &'static str {
        match self {
            ReticleState::Normal => "normal",
            ReticleState::Interactive => "interactive",
        }
    }
}

/// Crosshair mode and the prompt shown next to it.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct Reticle {
    state: ReticleState,
    label: String,
}

impl Reticle {
    /// Current mode.
    pub fn state(&self) -> ReticleState {
        self.state
    }

    /// Current prompt; empty in [`ReticleState::Normal`].
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Set the mode; returns whether it changed.
    pub fn set_state(&mut self, state: ReticleState) -> bool {
        if self.state == state {
            return false;
        }
        debug!(from = self.state.as_str(), to = state.as_str(), "reticle state changed");
        self.state = state;
        true
    }

    /// Set the prompt; returns whether it changed.
    pub fn set_label(&mut self, label: &str) -> bool {
        if self.label == label {
            return false;
        }
        self.label.clear();
        self.label.push_str(label);
        true
    }

    /// Interactive mode with `label`.
    pub fn show_interactive(&mut self, label: &str) {
        self.set_state(ReticleState::Interactive);
        self.set_label(label);
    }

    /// Normal mode with no prompt.
    pub fn show_normal(&mut self) {
        self.set_state(ReticleState::Normal);
        self.set_label("");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_report_changes() {
        let mut reticle = Reticle::default();
        assert!(!reticle.set_state(ReticleState::Normal));
        assert!(reticle.set_state(ReticleState::Interactive));
        assert!(reticle.set_label("Pick up"));
        assert!(!reticle.set_label("Pick up"));
    }

    #[test]
    fn normal_clears_label() {
        let mut reticle = Reticle::default();
        reticle.show_interactive("Interact");
        assert_eq!(reticle.state(), ReticleState::Interactive);
        assert_eq!(reticle.label(), "Interact");
        reticle.show_normal();
        assert_eq!(reticle.state(), ReticleState::Normal);
        assert_eq!(reticle.label(), "");
    }
}
