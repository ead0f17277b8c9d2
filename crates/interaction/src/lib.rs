#![warn(missing_docs)]
//! Gaze-driven interaction: what the player looks at, what lights up, and what
//! happens when they press interact.
//!
//! A frame runs, in order: collider sync, interact input, the screen-centre
//! gaze ray and stare tracking, interact routing, object feedback (outline,
//! pickup), then held-object carry and placement. [`GazeApp`] owns the world
//! and drives frames.

mod app;
mod components;
mod config;
mod controller;
mod detector;
mod events;
mod extractable;
mod movable;
mod resources;
mod reticle;
mod scene;
mod singleton;
mod stare;

pub use app::GazeApp;
pub use components::{
    Children, Collider, Interactable, Name, ObjectLayer, Outline, Player, Renderer, Transform,
};
pub use config::{HighlightConfig, HoldConfig, InteractionConfig, RayConfig};
pub use controller::{cast_center_ray, forward_interact_input, RayController};
pub use detector::{detect_gaze, route_interact, GazeDetector, GazeTarget};
pub use events::{
    InteractEvent, ItemInteracted, PickedUp, PlaceRequested, Placed, RaycastEvent, StareEvent,
    StareKind,
};
pub use extractable::{apply_stare_feedback, attach_extractables, pick_up_extractables, Extractable};
pub use movable::{carry_held, place_held, HoldSettings, Movable};
pub use resources::{
    sync_physics_scene, DebugRay, DebugRays, FrameClock, InputResource, MainCamera, PhysicsScene,
    PlayerInventory, Viewport,
};
pub use reticle::{Reticle, ReticleState};
pub use scene::{spawn_object, spawn_player, ObjectKind, ObjectSpec};
pub use stare::{Stare, StareTracker};

use pickplace_core::CoreError;
use pickplace_input::InputError;
use thiserror::Error;

/// Errors raised while configuring the interaction world.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InteractionError {
    /// The gaze ray must reach somewhere.
    #[error("ray length must be positive, got {0}")]
    InvalidRayLength(f32),
    /// Held objects must float in front of the camera.
    #[error("hold distance must be positive, got {0}")]
    InvalidHoldDistance(f32),
    /// Core lookup failure.
    #[error(transparent)]
    Core(#[from] CoreError),
    /// Action map failure.
    #[error(transparent)]
    Input(#[from] InputError),
}
