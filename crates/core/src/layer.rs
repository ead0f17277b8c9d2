//! Object layers and the masks raycasts filter on.

use crate::CoreError;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Layer an object (and its collider) lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    /// Regular scene geometry.
    #[default]
    Default,
    /// Drawn on top of the scene; held objects live here.
    Overlay,
    /// Never hit by gaze raycasts.
    IgnoreRaycast,
    /// Stencil-masked geometry.
    Stencil,
}

impl Layer {
    /// Every layer, in mask bit order.
    pub const ALL: [Layer; 4] = [
        Layer::Default,
        Layer::Overlay,
        Layer::IgnoreRaycast,
        Layer::Stencil,
    ];

    /// Display name of the layer.
    pub fn name(self) -> &'static str {
        match self {
            Layer::Default => "Default",
            Layer::Overlay => "Overlay",
            Layer::IgnoreRaycast => "Ignore Raycast",
            Layer::Stencil => "Stencil",
        }
    }

    /// Resolve a layer by display name (case-insensitive, `_` accepted for spaces).
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        let wanted = name.trim().replace('_', " ");
        Self::ALL
            .into_iter()
            .find(|layer| layer.name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| CoreError::UnknownLayer(name.to_string()))
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// Set of layers a query accepts.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LayerMask: u32 {
        /// [`Layer::Default`].
        const DEFAULT = 1 << 0;
        /// [`Layer::Overlay`].
        const OVERLAY = 1 << 1;
        /// [`Layer::IgnoreRaycast`].
        const IGNORE_RAYCAST = 1 << 2;
        /// [`Layer::Stencil`].
        const STENCIL = 1 << 3;
        /// Layers the gaze ray can see.
        const GAZE = Self::DEFAULT.bits() | Self::STENCIL.bits();
    }
}

impl LayerMask {
    /// Mask with only `layer` set.
    pub fn from_layer(layer: Layer) -> Self {
        match layer {
            Layer::Default => Self::DEFAULT,
            Layer::Overlay => Self::OVERLAY,
            Layer::IgnoreRaycast => Self::IGNORE_RAYCAST,
            Layer::Stencil => Self::STENCIL,
        }
    }

    /// Whether `layer` passes this mask.
    pub fn contains_layer(self, layer: Layer) -> bool {
        self.contains(Self::from_layer(layer))
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::GAZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaze_mask_excludes_overlay_and_ignore_raycast() {
        let mask = LayerMask::GAZE;
        assert!(mask.contains_layer(Layer::Default));
        assert!(mask.contains_layer(Layer::Stencil));
        assert!(!mask.contains_layer(Layer::Overlay));
        assert!(!mask.contains_layer(Layer::IgnoreRaycast));
    }

    #[test]
    fn layer_lookup_by_name() {
        assert_eq!(Layer::from_name("Overlay"), Ok(Layer::Overlay));
        assert_eq!(Layer::from_name("ignore raycast"), Ok(Layer::IgnoreRaycast));
        assert_eq!(Layer::from_name("Ignore_Raycast"), Ok(Layer::IgnoreRaycast));
        assert_eq!(
            Layer::from_name("Water"),
            Err(CoreError::UnknownLayer("Water".into()))
        );
    }

    #[test]
    fn layer_serializes_snake_case() {
        let json = serde_json::to_string(&Layer::IgnoreRaycast).unwrap();
        assert_eq!(json, "\"ignore_raycast\"");
    }
}
