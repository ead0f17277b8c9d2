//! Events flowing between the interaction systems.

use bevy_ecs::prelude::*;
use glam::Vec3;
use pickplace_input::ActionPhase;
use pickplace_physics::Ray;

/// The per-frame gaze ray.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct RaycastEvent {
    /// Screen-centre ray from the active camera.
    pub ray: Ray,
}

/// Interact input forwarded by the ray controller.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct InteractEvent {
    /// Phase of the interact action that produced this event.
    pub phase: ActionPhase,
    /// Session time in seconds.
    pub time: f32,
}

/// Stare transition kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StareKind {
    /// Gaze arrived on the object.
    Enter,
    /// Gaze is on the object this frame.
    Stay,
    /// Gaze left the object.
    Exit,
}

/// Stare transition for one object.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StareEvent {
    /// Object concerned.
    pub entity: Entity,
    /// What happened.
    pub kind: StareKind,
}

/// The player interacted with a gazed, interactable object.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemInteracted {
    /// Target of the interaction.
    pub entity: Entity,
}

/// Interact pressed while an object is held.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceRequested {
    /// The held object.
    pub entity: Entity,
}

/// An object entered the held state.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickedUp {
    /// The object now held.
    pub entity: Entity,
}

/// A held object was put down.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct Placed {
    /// The placed object.
    pub entity: Entity,
    /// Where it ended up.
    pub position: Vec3,
}
