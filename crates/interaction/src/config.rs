use crate::InteractionError;
use pickplace_core::{Color, PICKUP_HIGHLIGHT};
use pickplace_render::OutlineKind;
use serde::{Deserialize, Serialize};

/// Gaze ray and interact input settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RayConfig {
    /// Reach of the gaze ray in world units.
    pub length: f32,
    /// Name of the action that triggers interaction.
    pub interact_action: String,
    /// Also forward the action's release, for hold-style bindings.
    pub interact_on_release: bool,
    /// Record the gaze ray as a debug line every frame.
    pub debug_draw: bool,
}

impl Default for RayConfig {
    fn default() -> Self {
        Self {
            length: 5.0,
            interact_action: "Interact".to_string(),
            interact_on_release: false,
            debug_draw: false,
        }
    }
}

/// How gazed pickable objects are highlighted.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Outline colour.
    pub color: Color,
    /// Outline implementation for spawned objects.
    pub outline: OutlineKind,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            color: PICKUP_HIGHLIGHT,
            outline: OutlineKind::default(),
        }
    }
}

/// Held-object settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HoldConfig {
    /// Distance in front of the camera a held object floats at.
    pub distance: f32,
}

impl Default for HoldConfig {
    fn default() -> Self {
        Self { distance: 2.0 }
    }
}

/// Everything the interaction world needs from config.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// `[ray]`
    pub ray: RayConfig,
    /// `[highlight]`
    pub highlight: HighlightConfig,
    /// `[hold]`
    pub hold: HoldConfig,
}

impl InteractionConfig {
    /// Reject values the systems cannot work with.
    pub fn validate(&self) -> Result<(), InteractionError> {
        if self.ray.length.is_nan() || self.ray.length <= 0.0 {
            return Err(InteractionError::InvalidRayLength(self.ray.length));
        }
        if self.hold.distance.is_nan() || self.hold.distance <= 0.0 {
            return Err(InteractionError::InvalidHoldDistance(self.hold.distance));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = InteractionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ray.length, 5.0);
        assert_eq!(config.ray.interact_action, "Interact");
        assert_eq!(config.highlight.color, PICKUP_HIGHLIGHT);
    }

    #[test]
    fn rejects_non_positive_lengths() {
        let mut config = InteractionConfig::default();
        config.ray.length = 0.0;
        assert_eq!(
            config.validate(),
            Err(InteractionError::InvalidRayLength(0.0))
        );

        let mut config = InteractionConfig::default();
        config.hold.distance = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(InteractionError::InvalidHoldDistance(_))
        ));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: InteractionConfig =
            serde_json::from_str(r#"{"ray":{"length":3.5}}"#).unwrap();
        assert_eq!(config.ray.length, 3.5);
        assert_eq!(config.ray.interact_action, "Interact");
        assert_eq!(config.hold.distance, 2.0);
    }
}
