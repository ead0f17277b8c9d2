//! Spawning scene objects from declarative specs.

use crate::components::{
    Children, Collider, Interactable, Name, ObjectLayer, Outline, Player, Renderer, Transform,
};
use crate::config::HighlightConfig;
use crate::extractable::Extractable;
use bevy_ecs::prelude::*;
use glam::Vec3;
use pickplace_core::{Color, Layer};
use pickplace_render::{Material, MeshRenderer, OutlineKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Role of a spawned object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// Scenery: never picked up.
    #[default]
    Static,
    /// Can be highlighted and picked up.
    Extractable,
}

fn default_size() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn default_color() -> Color {
    Color::rgb(0.6, 0.6, 0.6)
}

/// Declarative description of one box-shaped object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSpec {
    /// Object name.
    pub name: String,
    /// World-space centre.
    #[serde(default)]
    pub center: [f32; 3],
    /// Box size.
    #[serde(default = "default_size")]
    pub size: [f32; 3],
    /// Layer to spawn on.
    #[serde(default)]
    pub layer: Layer,
    /// Whether the collider is a trigger volume.
    #[serde(default)]
    pub is_trigger: bool,
    /// Scenery or pickable.
    #[serde(default)]
    pub kind: ObjectKind,
    /// Interactable flag; extractables default to interactable, static objects
    /// get no interactable component unless this is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interactable: Option<bool>,
    /// Reticle prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Outline effect; extractables fall back to the configured one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline: Option<OutlineKind>,
    /// Albedo of the object's material.
    #[serde(default = "default_color")]
    pub color: Color,
    /// Objects parented to this one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ObjectSpec>,
}

impl ObjectSpec {
    /// Static box named `name`.
    pub fn new(name: impl Into<String>, center: Vec3, size: Vec3) -> Self {
        Self {
            name: name.into(),
            center: center.to_array(),
            size: size.to_array(),
            layer: Layer::Default,
            is_trigger: false,
            kind: ObjectKind::Static,
            interactable: None,
            label: None,
            outline: None,
            color: default_color(),
            children: Vec::new(),
        }
    }

    /// Same box, pickable.
    pub fn extractable(mut self) -> Self {
        self.kind = ObjectKind::Extractable;
        self
    }

    /// Same box on `layer`.
    pub fn on_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    /// Same box with an explicit interactable flag.
    pub fn interactable(mut self, value: bool) -> Self {
        self.interactable = Some(value);
        self
    }

    /// Same box with a custom prompt.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Same box with a child object.
    pub fn with_child(mut self, child: ObjectSpec) -> Self {
        self.children.push(child);
        self
    }
}

/// Spawn `spec` and its children; returns the root entity.
pub fn spawn_object(world: &mut World, spec: &ObjectSpec, highlight: &HighlightConfig) -> Entity {
    let children: Vec<Entity> = spec
        .children
        .iter()
        .map(|child| spawn_object(world, child, highlight))
        .collect();

    let center = Vec3::from_array(spec.center);
    let mut collider = Collider::cuboid(Vec3::from_array(spec.size));
    collider.is_trigger = spec.is_trigger;
    let renderer = MeshRenderer::new(vec![Material::emissive(spec.name.clone(), spec.color)]);

    let mut entity = world.spawn((
        Name::new(spec.name.clone()),
        Transform::from_translation(center),
        collider,
        ObjectLayer(spec.layer),
        Renderer(renderer),
    ));

    let interactable = match (spec.kind, spec.interactable) {
        (_, Some(value)) => Some(value),
        (ObjectKind::Extractable, None) => Some(true),
        (ObjectKind::Static, None) => None,
    };
    if let Some(is_interactable) = interactable {
        let label = spec.label.clone().unwrap_or_else(|| Interactable::default().label);
        entity.insert(Interactable {
            is_interactable,
            label,
        });
    }

    let outline = match spec.kind {
        ObjectKind::Extractable => Some(spec.outline.unwrap_or(highlight.outline)),
        ObjectKind::Static => spec.outline,
    };
    if let Some(kind) = outline {
        entity.insert(Outline(kind.build(highlight.color)));
    }
    if spec.kind == ObjectKind::Extractable {
        entity.insert(Extractable::new(highlight.color));
    }
    if !children.is_empty() {
        entity.insert(Children(children));
    }

    let id = entity.id();
    debug!(object = %spec.name, ?id, kind = ?spec.kind, layer = %spec.layer, "spawned object");
    id
}

/// Spawn the player marker at `position`.
pub fn spawn_player(world: &mut World, position: Vec3) -> Entity {
    world
        .spawn((
            Player,
            Name::new("Player"),
            Transform::from_translation(position),
        ))
        .id()
}
