//! Held objects: carried in front of the camera until placed.

use crate::components::{
    display_name, set_layer_recursive, Children, Collider, Name, ObjectLayer, Transform,
};
use crate::events::{PlaceRequested, Placed};
use crate::extractable::Extractable;
use crate::resources::{MainCamera, PhysicsScene, PlayerInventory, Viewport};
use bevy_ecs::prelude::*;
use glam::Vec3;
use pickplace_camera::Camera;
use pickplace_core::{Color, Layer};
use pickplace_physics::{Aabb, RaycastQuery};
use tracing::{debug, warn};

/// Held state of a picked-up object.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Movable {
    /// Follows the camera while set.
    pub being_moved: bool,
    /// Layer restored on placement.
    pub original_layer: Layer,
    /// Trigger flag restored on placement.
    pub was_trigger: bool,
    /// Distance in front of the camera the object floats at.
    pub hold_distance: f32,
    /// Highlight colour carried back to the extractable on placement.
    pub highlight: Color,
    /// Descendants and their offsets from the object's origin at pickup.
    pub carried: Vec<(Entity, Vec3)>,
}

/// Carry and placement settings.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct HoldSettings {
    /// Hold distance in front of the camera.
    pub distance: f32,
    /// How far the placement ray reaches.
    pub reach: f32,
}

impl Default for HoldSettings {
    fn default() -> Self {
        Self {
            distance: 2.0,
            reach: 5.0,
        }
    }
}

fn hold_point(camera: &Camera, distance: f32) -> Vec3 {
    camera.position + camera.forward() * distance
}

fn local_center(collider: Option<&Collider>) -> Vec3 {
    collider.map_or(Vec3::ZERO, |collider| collider.bounds.center())
}

/// Centre of `bounds` once it rests against a surface at `point` facing `normal`.
fn resting_center(point: Vec3, normal: Vec3, bounds: &Aabb) -> Vec3 {
    let reach = normal.abs().dot(bounds.half_extents());
    point + normal * reach
}

/// Move `root` to `translation`, keeping every carried descendant at its offset.
fn move_group(
    root: Entity,
    translation: Vec3,
    carried: &[(Entity, Vec3)],
    transforms: &mut Query<&mut Transform>,
) {
    if let Ok(mut transform) = transforms.get_mut(root) {
        transform.translation = translation;
    }
    for (entity, offset) in carried {
        if let Ok(mut transform) = transforms.get_mut(*entity) {
            transform.translation = translation + *offset;
        }
    }
}

/// Keep every held object, and whatever hangs off it, at the hold point.
pub fn carry_held(
    camera: Res<MainCamera>,
    held: Query<(Entity, &Movable, Option<&Collider>)>,
    mut transforms: Query<&mut Transform>,
) {
    for (entity, movable, collider) in &held {
        if !movable.being_moved {
            continue;
        }
        let translation = hold_point(&camera.0, movable.hold_distance) - local_center(collider);
        move_group(entity, translation, &movable.carried, &mut transforms);
    }
}

/// Put held objects down where the gaze ray lands.
#[allow(clippy::too_many_arguments)]
pub fn place_held(
    mut commands: Commands,
    mut requests: EventReader<PlaceRequested>,
    mut inventory: ResMut<PlayerInventory>,
    hold: Res<HoldSettings>,
    camera: Res<MainCamera>,
    viewport: Res<Viewport>,
    scene: Res<PhysicsScene>,
    mut held: Query<(&Movable, Option<&mut Collider>, Option<&Name>)>,
    mut transforms: Query<&mut Transform>,
    mut layers: Query<&mut ObjectLayer>,
    children: Query<&Children>,
    mut placed: EventWriter<Placed>,
) {
    for request in requests.read() {
        let entity = request.entity;
        let Ok((movable, collider, name)) = held.get_mut(entity) else {
            warn!(?entity, "place requested for an object that is not held");
            if inventory.held == Some(entity) {
                inventory.held = None;
            }
            continue;
        };
        if !movable.being_moved {
            continue;
        }

        let ray = camera.0.center_ray(viewport.size());
        let query = RaycastQuery::with_max_distance(hold.reach);
        let hit = scene.0.raycast_filtered(&ray, &query, |id| *id != entity);

        let local = collider
            .as_deref()
            .map_or(Aabb::new(Vec3::ZERO, Vec3::ZERO), |collider| collider.bounds);
        let position = match hit {
            Some(hit) => resting_center(hit.point, hit.normal, &local) - local.center(),
            None => hold_point(&camera.0, movable.hold_distance) - local.center(),
        };
        move_group(entity, position, &movable.carried, &mut transforms);
        if let Some(mut collider) = collider {
            collider.is_trigger = movable.was_trigger;
        }

        let original_layer = movable.original_layer;
        let highlight = movable.highlight;
        debug!(
            object = %display_name(entity, name),
            ?position,
            surface = hit.is_some(),
            "placed"
        );

        set_layer_recursive(&mut commands, entity, original_layer, &mut layers, &children);
        commands
            .entity(entity)
            .remove::<Movable>()
            .insert(Extractable::new(highlight));
        inventory.held = None;
        placed.send(Placed { entity, position });
    }
}
