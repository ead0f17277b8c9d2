//! Outline effects that highlight the gazed object.

use crate::{Material, MeshRenderer, OutlineStyle};
use pickplace_core::Color;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tracing::{trace, warn};

/// A switchable highlight applied to one renderer.
///
/// Implementations are attached to an object once (`prepare`) and then toggled
/// as the object gains and loses gaze.
pub trait OutlineEffect: Send + Sync + Debug {
    /// Capture whatever renderer state the effect needs to restore later.
    fn prepare(&mut self, renderer: &mut MeshRenderer);

    /// Show the outline effect.
    fn show_outline(&mut self, renderer: &mut MeshRenderer);

    /// Hide the outline effect.
    fn hide_outline(&mut self, renderer: &mut MeshRenderer);

    /// Change the outline colour; a visible outline picks it up immediately.
    fn set_outline_color(&mut self, color: Color, renderer: &mut MeshRenderer);

    /// Whether the outline is currently shown.
    fn is_visible(&self) -> bool;

    /// Current outline colour.
    fn color(&self) -> Color;
}

/// Highlight by swapping in emissive copies of the renderer's materials.
#[derive(Debug, Clone)]
pub struct EmissiveOutline {
    color: Color,
    intensity: f32,
    original: Option<Vec<Material>>,
    outlined: Vec<Material>,
    visible: bool,
}

impl EmissiveOutline {
    /// Effect glowing with `color * intensity`.
    pub fn new(color: Color, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            original: None,
            outlined: Vec::new(),
            visible: false,
        }
    }

    fn apply(&mut self, renderer: &mut MeshRenderer) {
        let glow = self.color * self.intensity;
        for material in &mut self.outlined {
            material.set_emission(glow);
        }
        renderer.materials = self.outlined.clone();
    }
}

impl Default for EmissiveOutline {
    fn default() -> Self {
        Self::new(Color::WHITE, 2.0)
    }
}

impl OutlineEffect for EmissiveOutline {
    fn prepare(&mut self, renderer: &mut MeshRenderer) {
        if self.visible {
            return;
        }
        self.outlined = renderer
            .materials
            .iter()
            .cloned()
            .map(|mut material| {
                material.enable_emission();
                material
            })
            .collect();
        self.original = Some(renderer.materials.clone());
        trace!(slots = self.outlined.len(), "prepared emissive outline");
    }

    fn show_outline(&mut self, renderer: &mut MeshRenderer) {
        if self.visible {
            return;
        }
        if self.original.is_none() {
            warn!("emissive outline shown before prepare; ignoring");
            return;
        }
        self.apply(renderer);
        self.visible = true;
    }

    fn hide_outline(&mut self, renderer: &mut MeshRenderer) {
        if !self.visible {
            return;
        }
        if let Some(original) = &self.original {
            renderer.materials = original.clone();
        }
        self.visible = false;
    }

    fn set_outline_color(&mut self, color: Color, renderer: &mut MeshRenderer) {
        self.color = color;
        if self.visible {
            self.apply(renderer);
        }
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn color(&self) -> Color {
        self.color
    }
}

/// Highlight by enabling the renderer's silhouette pass.
#[derive(Debug, Clone)]
pub struct ShellOutline {
    color: Color,
    width_px: f32,
    visible: bool,
}

impl ShellOutline {
    /// Silhouette of the given colour and pixel width.
    pub fn new(color: Color, width_px: f32) -> Self {
        Self {
            color,
            width_px,
            visible: false,
        }
    }

    fn style(&self) -> OutlineStyle {
        OutlineStyle {
            color: self.color,
            width_px: self.width_px,
        }
    }
}

impl Default for ShellOutline {
    fn default() -> Self {
        Self::new(Color::WHITE, 2.0)
    }
}

impl OutlineEffect for ShellOutline {
    fn prepare(&mut self, renderer: &mut MeshRenderer) {
        self.visible = renderer.outline.is_some();
    }

    fn show_outline(&mut self, renderer: &mut MeshRenderer) {
        renderer.outline = Some(self.style());
        self.visible = true;
    }

    fn hide_outline(&mut self, renderer: &mut MeshRenderer) {
        renderer.outline = None;
        self.visible = false;
    }

    fn set_outline_color(&mut self, color: Color, renderer: &mut MeshRenderer) {
        self.color = color;
        if self.visible {
            renderer.outline = Some(self.style());
        }
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn color(&self) -> Color {
        self.color
    }
}

/// Outline flavour selected in config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutlineKind {
    /// [`EmissiveOutline`].
    Emissive {
        /// Emission multiplier.
        intensity: f32,
    },
    /// [`ShellOutline`].
    Shell {
        /// Silhouette width in pixels.
        width_px: f32,
    },
}

impl Default for OutlineKind {
    fn default() -> Self {
        OutlineKind::Emissive { intensity: 2.0 }
    }
}

impl OutlineKind {
    /// Build the effect with an initial colour.
    pub fn build(self, color: Color) -> Box<dyn OutlineEffect> {
        match self {
            OutlineKind::Emissive { intensity } => Box::new(EmissiveOutline::new(color, intensity)),
            OutlineKind::Shell { width_px } => Box::new(ShellOutline::new(color, width_px)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> MeshRenderer {
        MeshRenderer::new(vec![
            Material::emissive("body", Color::rgb(0.5, 0.4, 0.3)),
            Material::unlit("decal", Color::WHITE),
        ])
    }

    #[test]
    fn emissive_show_and_hide_restore_materials() {
        let mut renderer = renderer();
        let before = renderer.clone();
        let mut outline = EmissiveOutline::new(Color::rgb(0.5, 0.5, 0.5), 2.0);
        outline.prepare(&mut renderer);

        outline.show_outline(&mut renderer);
        assert!(outline.is_visible());
        assert_eq!(renderer.materials[0].emission, Some(Color::rgb(1.0, 1.0, 1.0)));
        assert!(renderer.materials[0].emission_enabled);
        assert_eq!(renderer.materials[1].emission, None);

        outline.hide_outline(&mut renderer);
        assert!(!outline.is_visible());
        assert_eq!(renderer, before);
    }

    #[test]
    fn emissive_toggles_are_idempotent() {
        let mut renderer = renderer();
        let before = renderer.clone();
        let mut outline = EmissiveOutline::default();
        outline.prepare(&mut renderer);

        outline.hide_outline(&mut renderer);
        assert_eq!(renderer, before);

        outline.show_outline(&mut renderer);
        let shown = renderer.clone();
        outline.show_outline(&mut renderer);
        assert_eq!(renderer, shown);
    }

    #[test]
    fn emissive_requires_prepare() {
        let mut renderer = renderer();
        let mut outline = EmissiveOutline::default();
        outline.show_outline(&mut renderer);
        assert!(!outline.is_visible());
        assert!(!renderer.is_highlighted());
    }

    #[test]
    fn emissive_color_change_reapplies_when_visible() {
        let mut renderer = renderer();
        let mut outline = EmissiveOutline::new(Color::WHITE, 1.0);
        outline.prepare(&mut renderer);
        outline.show_outline(&mut renderer);

        outline.set_outline_color(Color::RED, &mut renderer);
        assert_eq!(renderer.materials[0].emission, Some(Color::RED));

        outline.hide_outline(&mut renderer);
        outline.set_outline_color(Color::WHITE, &mut renderer);
        assert_eq!(renderer.materials[0].emission, Some(Color::BLACK));
    }

    #[test]
    fn shell_outline_toggles_silhouette() {
        let mut renderer = renderer();
        let mut outline = ShellOutline::new(Color::RED, 3.0);
        outline.prepare(&mut renderer);
        assert!(!outline.is_visible());

        outline.show_outline(&mut renderer);
        assert_eq!(
            renderer.outline,
            Some(OutlineStyle {
                color: Color::RED,
                width_px: 3.0
            })
        );

        outline.set_outline_color(Color::WHITE, &mut renderer);
        assert_eq!(renderer.outline.map(|s| s.color), Some(Color::WHITE));

        outline.hide_outline(&mut renderer);
        assert_eq!(renderer.outline, None);
    }

    #[test]
    fn outline_kind_from_json() {
        let kind: OutlineKind = serde_json::from_str(r#"{"type":"shell","width_px":4.0}"#).unwrap();
        assert_eq!(kind, OutlineKind::Shell { width_px: 4.0 });
        let effect = kind.build(Color::RED);
        assert_eq!(effect.color(), Color::RED);
        assert!(!effect.is_visible());
    }
}
