//! Turns gaze ray hits into stare transitions, reticle state and interactions.

use crate::components::{Interactable, Name};
use crate::events::{InteractEvent, ItemInteracted, PlaceRequested, RaycastEvent, StareEvent, StareKind};
use crate::resources::{MainCamera, PhysicsScene, PlayerInventory, Viewport};
use crate::reticle::Reticle;
use crate::singleton::install_singleton;
use crate::stare::{Stare, StareTracker};
use bevy_ecs::prelude::*;
use pickplace_physics::{Ray, RaycastQuery};
use tracing::{debug, trace};

/// What the gaze ray landed on, classified for the detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GazeTarget<'a> {
    /// The ray hit nothing within reach.
    Nothing,
    /// The ray hit something that cannot be interacted with right now.
    Inert(Entity),
    /// The ray hit an interactable object.
    Interactable(Entity, &'a Interactable),
}

impl<'a> GazeTarget<'a> {
    /// Classify a hit against the scene's interactables.
    pub fn classify(hit: Option<Entity>, interactables: &'a Query<'_, '_, &Interactable>) -> Self {
        match hit {
            None => GazeTarget::Nothing,
            Some(entity) => match interactables.get(entity) {
                Ok(interactable) if interactable.is_interactable => {
                    GazeTarget::Interactable(entity, interactable)
                }
                _ => GazeTarget::Inert(entity),
            },
        }
    }
}

/// Tracks the stared-at object and keeps the reticle in sync with it.
#[derive(Resource, Debug, Clone)]
pub struct GazeDetector {
    enabled: bool,
    ray_length: f32,
    tracker: StareTracker<Entity>,
    is_interactable: bool,
    label: String,
}

impl GazeDetector {
    /// Enabled detector reaching `ray_length`.
    pub fn new(ray_length: f32) -> Self {
        Self {
            enabled: true,
            ray_length,
            tracker: StareTracker::new(),
            is_interactable: false,
            label: String::new(),
        }
    }

    /// Install the detector into `world`; a second install keeps the first.
    pub fn install(world: &mut World, ray_length: f32) -> bool {
        install_singleton(world, Self::new(ray_length), "GazeDetector")
    }

    /// Whether ray and interact events are processed.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Toggle event processing.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            debug!(enabled, "gaze detector toggled");
        }
        self.enabled = enabled;
    }

    /// Maximum gaze distance.
    pub fn ray_length(&self) -> f32 {
        self.ray_length
    }

    /// The object currently stared at.
    pub fn stared(&self) -> Option<Entity> {
        self.tracker.current()
    }

    /// Whether the gazed object can be interacted with.
    pub fn is_interactable(&self) -> bool {
        self.is_interactable
    }

    /// Prompt of the gazed interactable.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Update the interactable flag; the reticle follows only on change.
    pub fn set_is_interactable(&mut self, value: bool, reticle: &mut Reticle) {
        if self.is_interactable == value {
            return;
        }
        self.is_interactable = value;
        self.sync_reticle(reticle);
    }

    /// Update the prompt; the reticle follows only on change.
    pub fn set_label(&mut self, label: &str, reticle: &mut Reticle) {
        if self.label == label {
            return;
        }
        self.label.clear();
        self.label.push_str(label);
        self.sync_reticle(reticle);
    }

    fn sync_reticle(&self, reticle: &mut Reticle) {
        if self.is_interactable {
            reticle.show_interactive(&self.label);
        } else {
            reticle.show_normal();
        }
    }

    /// Apply one detection cycle and return the stare transitions to fire.
    pub fn observe(&mut self, target: GazeTarget<'_>, reticle: &mut Reticle) -> Vec<Stare<Entity>> {
        match target {
            GazeTarget::Nothing => {
                let exits = self.tracker.clear();
                self.set_is_interactable(false, reticle);
                reticle.show_normal();
                exits
            }
            GazeTarget::Inert(_) => {
                self.set_is_interactable(false, reticle);
                self.tracker.clear()
            }
            GazeTarget::Interactable(entity, interactable) => {
                self.set_is_interactable(true, reticle);
                self.set_label(&interactable.label, reticle);
                let transitions = self.tracker.observe(Some(entity));
                reticle.show_interactive(&interactable.label);
                transitions
            }
        }
    }
}

fn gaze_query(length: f32) -> RaycastQuery {
    RaycastQuery::with_max_distance(length)
}

/// Process this frame's [`RaycastEvent`]s into [`StareEvent`]s.
pub fn detect_gaze(
    detector: Option<ResMut<GazeDetector>>,
    mut reticle: ResMut<Reticle>,
    scene: Res<PhysicsScene>,
    interactables: Query<&Interactable>,
    names: Query<&Name>,
    mut rays: EventReader<RaycastEvent>,
    mut stares: EventWriter<StareEvent>,
) {
    let Some(mut detector) = detector else {
        rays.clear();
        return;
    };
    if !detector.enabled {
        rays.clear();
        return;
    }

    let query = gaze_query(detector.ray_length);
    for event in rays.read() {
        let hit = scene.0.raycast(&event.ray, &query).map(|hit| hit.id);
        let target = GazeTarget::classify(hit, &interactables);
        for transition in detector.observe(target, &mut reticle) {
            let (entity, kind) = match transition {
                Stare::Enter(entity) => (entity, StareKind::Enter),
                Stare::Stay(entity) => (entity, StareKind::Stay),
                Stare::Exit(entity) => (entity, StareKind::Exit),
            };
            if kind != StareKind::Stay {
                debug!(
                    object = %crate::components::display_name(entity, names.get(entity).ok()),
                    ?kind,
                    "stare transition"
                );
            }
            stares.send(StareEvent { entity, kind });
        }
    }
}

/// Route [`InteractEvent`]s to the held object or to the gazed interactable.
#[allow(clippy::too_many_arguments)]
pub fn route_interact(
    detector: Option<Res<GazeDetector>>,
    inventory: Res<PlayerInventory>,
    camera: Res<MainCamera>,
    viewport: Res<Viewport>,
    scene: Res<PhysicsScene>,
    interactables: Query<&Interactable>,
    mut interacts: EventReader<InteractEvent>,
    mut place_requests: EventWriter<PlaceRequested>,
    mut interacted: EventWriter<ItemInteracted>,
) {
    let Some(detector) = detector.as_deref().filter(|detector| detector.enabled) else {
        interacts.clear();
        return;
    };

    for event in interacts.read() {
        if let Some(held) = inventory.held {
            trace!(?held, phase = ?event.phase, "interact routed to held object");
            place_requests.send(PlaceRequested { entity: held });
            continue;
        }

        let ray: Ray = camera.0.center_ray(viewport.size());
        let hit = scene
            .0
            .raycast(&ray, &gaze_query(detector.ray_length))
            .map(|hit| hit.id);
        match GazeTarget::classify(hit, &interactables) {
            GazeTarget::Interactable(entity, interactable) => {
                debug!(?entity, label = %interactable.label, "interacted with item");
                interacted.send(ItemInteracted { entity });
            }
            GazeTarget::Inert(entity) => {
                debug!(?entity, "interact ignored: target is not interactable");
            }
            GazeTarget::Nothing => {
                debug!("interact ignored: nothing in reach");
            }
        }
    }
}
