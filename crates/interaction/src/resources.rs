//! World-wide resources.

use crate::components::{Collider, ObjectLayer, Transform};
use bevy_ecs::prelude::*;
use glam::Vec3;
use pickplace_camera::Camera;
use pickplace_core::{Color, FrameTick, Layer};
use pickplace_input::{ActionMap, InputState};
use pickplace_physics::{ColliderProxy, CollisionWorld};

/// Frame timing.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameClock {
    /// Index of the frame being run.
    pub tick: FrameTick,
    /// Seconds covered by this frame.
    pub dt: f32,
    /// Seconds since the session started, including this frame.
    pub elapsed: f32,
}

/// Render target size in pixels.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// `(width, height)`.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// The active camera the gaze ray is cast from.
#[derive(Resource, Debug, Clone, Default)]
pub struct MainCamera(pub Camera);

/// Raw input plus the action map built on top of it.
#[derive(Resource, Debug, Default)]
pub struct InputResource {
    /// Key and button state.
    pub state: InputState,
    /// Named actions.
    pub actions: ActionMap,
}

/// Collider snapshot the raycasts run against, rebuilt every frame.
#[derive(Resource, Debug, Default)]
pub struct PhysicsScene(pub CollisionWorld<Entity>);

/// What the player is carrying.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInventory {
    /// The held object, if any.
    pub held: Option<Entity>,
}

/// A line segment to draw for debugging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugRay {
    /// Segment start.
    pub start: Vec3,
    /// Segment end.
    pub end: Vec3,
    /// Line colour.
    pub color: Color,
}

/// Debug lines recorded this frame.
#[derive(Resource, Debug, Clone, Default)]
pub struct DebugRays {
    /// Lines, cleared at the start of every frame.
    pub rays: Vec<DebugRay>,
}

/// Mirror every collider into [`PhysicsScene`].
pub fn sync_physics_scene(
    mut scene: ResMut<PhysicsScene>,
    colliders: Query<(Entity, &Collider, &Transform, Option<&ObjectLayer>)>,
) {
    scene.0.clear();
    for (entity, collider, transform, layer) in &colliders {
        scene.0.insert(ColliderProxy {
            id: entity,
            bounds: collider.world_bounds(transform),
            layer: layer.map_or(Layer::Default, |layer| layer.0),
            is_trigger: collider.is_trigger,
        });
    }
}
