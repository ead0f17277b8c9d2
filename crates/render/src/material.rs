use pickplace_core::Color;
use serde::{Deserialize, Serialize};

/// Surface material of a mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Material name, for logs.
    pub name: String,
    /// Albedo.
    pub base_color: Color,
    /// Emission colour; `None` when the shader has no emission input.
    #[serde(default)]
    pub emission: Option<Color>,
    /// Whether the emission keyword is switched on.
    #[serde(default)]
    pub emission_enabled: bool,
}

impl Material {
    /// Material whose shader exposes an emission input (initially black, off).
    pub fn emissive(name: impl Into<String>, base_color: Color) -> Self {
        Self {
            name: name.into(),
            base_color,
            emission: Some(Color::BLACK),
            emission_enabled: false,
        }
    }

    /// Material without an emission input.
    pub fn unlit(name: impl Into<String>, base_color: Color) -> Self {
        Self {
            name: name.into(),
            base_color,
            emission: None,
            emission_enabled: false,
        }
    }

    /// Whether the shader exposes an emission input.
    pub fn has_emission_property(&self) -> bool {
        self.emission.is_some()
    }

    /// Switch the emission keyword on. Returns false when there is no emission input.
    pub fn enable_emission(&mut self) -> bool {
        if self.has_emission_property() {
            self.emission_enabled = true;
        }
        self.emission_enabled
    }

    /// Set the emission colour if the shader has one.
    pub fn set_emission(&mut self, color: Color) {
        if let Some(emission) = self.emission.as_mut() {
            *emission = color;
        }
    }
}

/// Silhouette pass drawn around a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlineStyle {
    /// Outline colour.
    pub color: Color,
    /// Screen-space width in pixels.
    pub width_px: f32,
}

/// Per-object draw state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshRenderer {
    /// Material slots in submesh order.
    pub materials: Vec<Material>,
    /// Active silhouette pass, if any.
    #[serde(default)]
    pub outline: Option<OutlineStyle>,
}

impl MeshRenderer {
    /// Renderer with the given material slots and no outline.
    pub fn new(materials: Vec<Material>) -> Self {
        Self {
            materials,
            outline: None,
        }
    }

    /// Whether any emission is lit or an outline pass is active.
    pub fn is_highlighted(&self) -> bool {
        self.outline.is_some()
            || self
                .materials
                .iter()
                .any(|m| m.emission_enabled && m.emission.is_some_and(|c| c != Color::BLACK))
    }
}
