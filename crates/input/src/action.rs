//! Named input actions with started / performed / canceled phases.

use crate::{InputBinding, InputError, InputState};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Lifecycle phase reported by an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionPhase {
    /// A binding went down.
    Started,
    /// The action's interaction completed.
    Performed,
    /// The binding was released or the action was disabled mid-press.
    Canceled,
}

/// How bindings turn into phases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionKind {
    /// Performed as soon as a binding goes down.
    Press,
    /// Performed once a binding has been held for `seconds`.
    Hold {
        /// Required hold time.
        seconds: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Progress {
    Idle,
    Held { held_for: f32, performed: bool },
}

/// A named action driven by one or more bindings.
#[derive(Debug, Clone)]
pub struct InputAction {
    name: String,
    bindings: Vec<InputBinding>,
    kind: ActionKind,
    enabled: bool,
    progress: Progress,
}

impl InputAction {
    /// Create a disabled action.
    pub fn new(name: impl Into<String>, bindings: Vec<InputBinding>, kind: ActionKind) -> Self {
        Self {
            name: name.into(),
            bindings,
            kind,
            enabled: false,
            progress: Progress::Idle,
        }
    }

    /// Action name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bound controls.
    pub fn bindings(&self) -> &[InputBinding] {
        &self.bindings
    }

    /// Interaction kind.
    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    /// Start producing phases.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Stop producing phases. Returns `Canceled` when a press was in progress.
    pub fn disable(&mut self) -> Option<ActionPhase> {
        self.enabled = false;
        match std::mem::replace(&mut self.progress, Progress::Idle) {
            Progress::Held { .. } => Some(ActionPhase::Canceled),
            Progress::Idle => None,
        }
    }

    /// Whether the action is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether a binding is currently held down for this action.
    pub fn in_progress(&self) -> bool {
        matches!(self.progress, Progress::Held { .. })
    }

    /// Advance by one frame and report the phases that fired, in order.
    pub fn update(&mut self, input: &InputState, dt: f32) -> Vec<ActionPhase> {
        let mut phases = Vec::new();
        if !self.enabled {
            return phases;
        }

        let down = self.bindings.iter().any(|b| input.binding_pressed(*b));
        let pressed = self.bindings.iter().any(|b| input.binding_just_pressed(*b));

        match self.progress {
            Progress::Idle if down || pressed => {
                phases.push(ActionPhase::Started);
                let performed = match self.kind {
                    ActionKind::Press => true,
                    ActionKind::Hold { seconds } => seconds <= 0.0,
                };
                if performed {
                    phases.push(ActionPhase::Performed);
                }
                self.progress = Progress::Held {
                    held_for: 0.0,
                    performed,
                };
                // Tapped and released within a single frame.
                if !down {
                    phases.push(ActionPhase::Canceled);
                    self.progress = Progress::Idle;
                }
            }
            Progress::Idle => {}
            Progress::Held { held_for, performed } => {
                if !down {
                    phases.push(ActionPhase::Canceled);
                    self.progress = Progress::Idle;
                    return phases;
                }
                let held_for = held_for + dt.max(0.0);
                let mut now_performed = performed;
                if let ActionKind::Hold { seconds } = self.kind {
                    if !performed && held_for >= seconds {
                        phases.push(ActionPhase::Performed);
                        now_performed = true;
                    }
                }
                self.progress = Progress::Held {
                    held_for,
                    performed: now_performed,
                };
            }
        }

        phases
    }
}

/// One action entry in a config file.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ActionConfig {
    /// Action name, matched case-insensitively.
    pub name: String,
    /// Binding tokens, e.g. `KeyE` or `MouseLeft`.
    pub bindings: Vec<String>,
    /// Makes this a hold action with the given duration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold_seconds: Option<f32>,
}

/// Action definitions loaded from config.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ActionsConfig {
    /// Every action in the map.
    pub actions: Vec<ActionConfig>,
}

impl Default for ActionsConfig {
    fn default() -> Self {
        Self {
            actions: vec![ActionConfig {
                name: "Interact".to_string(),
                bindings: vec!["KeyE".to_string(), "MouseLeft".to_string()],
                hold_seconds: None,
            }],
        }
    }
}

/// Collection of named actions.
#[derive(Debug, Clone, Default)]
pub struct ActionMap {
    actions: Vec<InputAction>,
}

impl ActionMap {
    /// Empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from config. Unknown binding tokens are skipped with a warning.
    pub fn from_config(config: &ActionsConfig) -> Result<Self, InputError> {
        let mut map = Self::new();
        for entry in &config.actions {
            let bindings = parse_bindings(&entry.bindings);
            if bindings.is_empty() {
                return Err(InputError::NoBindings(entry.name.clone()));
            }
            let kind = match entry.hold_seconds {
                Some(seconds) => ActionKind::Hold { seconds },
                None => ActionKind::Press,
            };
            map.add(InputAction::new(entry.name.clone(), bindings, kind))?;
        }
        Ok(map)
    }

    /// Add an action; names must be unique ignoring case.
    pub fn add(&mut self, action: InputAction) -> Result<(), InputError> {
        if self.find_action(action.name()).is_some() {
            return Err(InputError::DuplicateAction(action.name().to_string()));
        }
        self.actions.push(action);
        Ok(())
    }

    /// Look up an action by name, ignoring case.
    pub fn find_action(&self, name: &str) -> Option<&InputAction> {
        self.actions
            .iter()
            .find(|action| action.name.eq_ignore_ascii_case(name))
    }

    /// Mutable lookup by name, ignoring case.
    pub fn find_action_mut(&mut self, name: &str) -> Option<&mut InputAction> {
        self.actions
            .iter_mut()
            .find(|action| action.name.eq_ignore_ascii_case(name))
    }

    /// All actions in definition order.
    pub fn actions(&self) -> &[InputAction] {
        &self.actions
    }

    /// Mutable iteration in definition order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut InputAction> {
        self.actions.iter_mut()
    }
}

fn parse_bindings(tokens: &[String]) -> Vec<InputBinding> {
    tokens
        .iter()
        .filter_map(|token| match InputBinding::parse(token) {
            Ok(binding) => Some(binding),
            Err(err) => {
                warn!(%err, "ignoring binding token");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    const E: InputBinding = InputBinding::Key(KeyCode::KeyE);

    fn press_action() -> InputAction {
        let mut action = InputAction::new("Interact", vec![E], ActionKind::Press);
        action.enable();
        action
    }

    #[test]
    fn press_action_phases() {
        let mut input = InputState::new();
        let mut action = press_action();

        input.press(E);
        assert_eq!(
            action.update(&input, 0.016),
            vec![ActionPhase::Started, ActionPhase::Performed]
        );
        input.begin_frame();
        assert!(action.update(&input, 0.016).is_empty());

        input.release(E);
        assert_eq!(action.update(&input, 0.016), vec![ActionPhase::Canceled]);
        input.begin_frame();
        assert!(action.update(&input, 0.016).is_empty());
    }

    #[test]
    fn tap_within_one_frame_still_reports() {
        let mut input = InputState::new();
        let mut action = press_action();
        input.press(E);
        input.release(E);
        assert_eq!(
            action.update(&input, 0.016),
            vec![
                ActionPhase::Started,
                ActionPhase::Performed,
                ActionPhase::Canceled
            ]
        );
        assert!(!action.in_progress());
    }

    #[test]
    fn hold_action_performs_after_duration() {
        let mut input = InputState::new();
        let mut action = InputAction::new("Interact", vec![E], ActionKind::Hold { seconds: 0.5 });
        action.enable();

        input.press(E);
        assert_eq!(action.update(&input, 0.1), vec![ActionPhase::Started]);
        input.begin_frame();
        assert!(action.update(&input, 0.3).is_empty());
        assert_eq!(action.update(&input, 0.3), vec![ActionPhase::Performed]);
        assert!(action.update(&input, 0.3).is_empty(), "performs once");

        input.release(E);
        assert_eq!(action.update(&input, 0.1), vec![ActionPhase::Canceled]);
    }

    #[test]
    fn hold_released_early_only_cancels() {
        let mut input = InputState::new();
        let mut action = InputAction::new("Interact", vec![E], ActionKind::Hold { seconds: 1.0 });
        action.enable();

        input.press(E);
        action.update(&input, 0.1);
        input.begin_frame();
        input.release(E);
        assert_eq!(action.update(&input, 0.1), vec![ActionPhase::Canceled]);
    }

    #[test]
    fn disabled_action_is_silent_and_disable_cancels() {
        let mut input = InputState::new();
        let mut action = InputAction::new("Interact", vec![E], ActionKind::Press);
        input.press(E);
        assert!(action.update(&input, 0.016).is_empty());

        action.enable();
        action.update(&input, 0.016);
        assert_eq!(action.disable(), Some(ActionPhase::Canceled));
        assert_eq!(action.disable(), None);
        assert!(action.update(&input, 0.016).is_empty());
    }

    #[test]
    fn map_lookup_ignores_case() {
        let map = ActionMap::from_config(&ActionsConfig::default()).unwrap();
        assert!(map.find_action("interact").is_some());
        assert!(map.find_action("INTERACT").is_some());
        assert!(map.find_action("Jump").is_none());
        assert_eq!(map.find_action("Interact").unwrap().bindings().len(), 2);
    }

    #[test]
    fn config_errors() {
        let config = ActionsConfig {
            actions: vec![ActionConfig {
                name: "Interact".into(),
                bindings: vec!["Nope".into()],
                hold_seconds: None,
            }],
        };
        assert_eq!(
            ActionMap::from_config(&config).unwrap_err(),
            InputError::NoBindings("Interact".into())
        );

        let mut config = ActionsConfig::default();
        config.actions.push(ActionConfig {
            name: "interact".into(),
            bindings: vec!["KeyF".into()],
            hold_seconds: Some(0.4),
        });
        assert_eq!(
            ActionMap::from_config(&config).unwrap_err(),
            InputError::DuplicateAction("interact".into())
        );
    }

    #[test]
    fn actions_config_parses_from_toml() {
        let config: ActionsConfig = toml::from_str(
            r#"
            [[actions]]
            name = "Interact"
            bindings = ["KeyF"]
            hold_seconds = 0.25
            "#,
        )
        .unwrap();
        let map = ActionMap::from_config(&config).unwrap();
        let action = map.find_action("Interact").unwrap();
        assert_eq!(action.kind(), ActionKind::Hold { seconds: 0.25 });
        assert!(!action.is_enabled());
    }
}
