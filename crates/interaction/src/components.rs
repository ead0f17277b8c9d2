//! Scene components.

use bevy_ecs::prelude::*;
use glam::Vec3;
use pickplace_core::Layer;
use pickplace_physics::Aabb;
use pickplace_render::{MeshRenderer, OutlineEffect};
use std::collections::HashSet;

/// Human-readable object name.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Name(pub String);

impl Name {
    /// Wrap a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// World-space placement.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    /// Position of the object's origin.
    pub translation: Vec3,
}

impl Transform {
    /// Transform at `translation`.
    pub fn from_translation(translation: Vec3) -> Self {
        Self { translation }
    }
}

/// Box collider in the object's local space.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    /// Local bounds relative to [`Transform::translation`].
    pub bounds: Aabb,
    /// Triggers are volumes rather than solid surfaces.
    pub is_trigger: bool,
}

impl Collider {
    /// Solid box of `size` centred on the origin.
    pub fn cuboid(size: Vec3) -> Self {
        Self {
            bounds: Aabb::from_center_size(Vec3::ZERO, size),
            is_trigger: false,
        }
    }

    /// Bounds moved into world space.
    pub fn world_bounds(&self, transform: &Transform) -> Aabb {
        self.bounds.translated(transform.translation)
    }
}

/// Layer an object lives on.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ObjectLayer(pub Layer);

/// Entities parented to this one.
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct Children(pub Vec<Entity>);

/// Marks the player entity.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Draw state of an object.
#[derive(Component, Debug, Clone, Default)]
pub struct Renderer(pub MeshRenderer);

/// Highlight effect attached to an object.
#[derive(Component, Debug)]
pub struct Outline(pub Box<dyn OutlineEffect>);

/// Something the gaze ray can target and the player can interact with.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Interactable {
    /// Interaction is currently allowed.
    pub is_interactable: bool,
    /// Reticle prompt shown while gazed at.
    pub label: String,
}

impl Default for Interactable {
    fn default() -> Self {
        Self {
            is_interactable: true,
            label: "Interact".to_string(),
        }
    }
}

impl Interactable {
    /// Interactable with a custom prompt.
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }
}

pub(crate) fn display_name(entity: Entity, name: Option<&Name>) -> String {
    match name {
        Some(name) => name.0.clone(),
        None => format!("{entity:?}"),
    }
}

/// Move `root` and everything below it onto `layer`.
pub(crate) fn set_layer_recursive(
    commands: &mut Commands,
    root: Entity,
    layer: Layer,
    layers: &mut Query<&mut ObjectLayer>,
    children: &Query<&Children>,
) {
    let mut stack = vec![root];
    let mut visited = HashSet::new();
    while let Some(entity) = stack.pop() {
        if !visited.insert(entity) {
            continue;
        }
        match layers.get_mut(entity) {
            Ok(mut current) => current.0 = layer,
            Err(_) => {
                if let Some(mut entity_commands) = commands.get_entity(entity) {
                    entity_commands.insert(ObjectLayer(layer));
                }
            }
        }
        if let Ok(kids) = children.get(entity) {
            stack.extend(kids.0.iter().copied());
        }
    }
}

/// Every entity below `root`, paired with its offset from `origin`.
pub(crate) fn descendant_offsets(
    root: Entity,
    origin: Vec3,
    children: &Query<&Children>,
    transforms: &Query<&Transform>,
) -> Vec<(Entity, Vec3)> {
    let mut offsets = Vec::new();
    let mut stack = vec![root];
    let mut visited = HashSet::new();
    while let Some(entity) = stack.pop() {
        if !visited.insert(entity) {
            continue;
        }
        if entity != root {
            if let Ok(transform) = transforms.get(entity) {
                offsets.push((entity, transform.translation - origin));
            }
        }
        if let Ok(kids) = children.get(entity) {
            stack.extend(kids.0.iter().copied());
        }
    }
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::system::SystemState;

    #[test]
    fn collider_world_bounds_follow_transform() {
        let collider = Collider::cuboid(Vec3::splat(2.0));
        let transform = Transform::from_translation(Vec3::new(5.0, 0.0, 0.0));
        let bounds = collider.world_bounds(&transform);
        assert_eq!(bounds.min, Vec3::new(4.0, -1.0, -1.0));
        assert_eq!(bounds.max, Vec3::new(6.0, 1.0, 1.0));
    }

    #[test]
    fn descendant_offsets_walk_nested_children_once() {
        let mut world = World::new();
        let grandchild = world
            .spawn(Transform::from_translation(Vec3::new(1.0, 2.0, 0.0)))
            .id();
        let child = world
            .spawn((
                Transform::from_translation(Vec3::new(1.0, 1.0, 0.0)),
                Children(vec![grandchild]),
            ))
            .id();
        let root = world
            .spawn((
                Transform::from_translation(Vec3::new(1.0, 0.0, 0.0)),
                Children(vec![child, child]),
            ))
            .id();

        let mut state: SystemState<(Query<&Children>, Query<&Transform>)> =
            SystemState::new(&mut world);
        let (children, transforms) = state.get(&world);
        let mut offsets = descendant_offsets(root, Vec3::new(1.0, 0.0, 0.0), &children, &transforms);
        offsets.sort_by(|a, b| a.1.y.total_cmp(&b.1.y));
        assert_eq!(
            offsets,
            vec![(child, Vec3::new(0.0, 1.0, 0.0)), (grandchild, Vec3::new(0.0, 2.0, 0.0))]
        );
    }

    #[test]
    fn interactable_defaults() {
        let interactable = Interactable::default();
        assert!(interactable.is_interactable);
        assert_eq!(interactable.label, "Interact");
        assert_eq!(Interactable::with_label("Open").label, "Open");
    }
}
