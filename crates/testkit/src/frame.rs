//! Per-frame collection of interaction events.

use crate::{EventRecord, JsonlSink};
use anyhow::Result;
use bevy_ecs::entity::Entity;
use glam::Vec3;
use pickplace_core::FrameTick;
use pickplace_interaction::{
    GazeApp, ItemInteracted, Name, PickedUp, Placed, ReticleState, StareEvent, StareKind,
};

/// Everything observable that happened during one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameEvents {
    /// Stare transitions in firing order.
    pub stares: Vec<(Entity, StareKind)>,
    /// Objects the player interacted with.
    pub interacted: Vec<Entity>,
    /// Objects that entered the held state.
    pub picked_up: Vec<Entity>,
    /// Objects that were put down, with their resting position.
    pub placed: Vec<(Entity, Vec3)>,
    /// Reticle mode after the frame.
    pub reticle: ReticleState,
    /// Reticle prompt after the frame.
    pub label: String,
}

impl FrameEvents {
    /// Drain the events `app` buffered during its last step.
    pub fn drain(app: &mut GazeApp) -> Self {
        let stares = app
            .drain_events::<StareEvent>()
            .into_iter()
            .map(|event| (event.entity, event.kind))
            .collect();
        let interacted = app
            .drain_events::<ItemInteracted>()
            .into_iter()
            .map(|event| event.entity)
            .collect();
        let picked_up = app
            .drain_events::<PickedUp>()
            .into_iter()
            .map(|event| event.entity)
            .collect();
        let placed = app
            .drain_events::<Placed>()
            .into_iter()
            .map(|event| (event.entity, event.position))
            .collect();
        let reticle = app.reticle();
        Self {
            stares,
            interacted,
            picked_up,
            placed,
            reticle: reticle.state(),
            label: reticle.label().to_string(),
        }
    }

    /// Stare transitions of `kind`.
    pub fn stares_of(&self, kind: StareKind) -> impl Iterator<Item = Entity> + '_ {
        self.stares
            .iter()
            .filter(move |(_, k)| *k == kind)
            .map(|(entity, _)| *entity)
    }

    /// Whether the frame produced any event.
    pub fn is_quiet(&self) -> bool {
        self.stares.is_empty()
            && self.interacted.is_empty()
            && self.picked_up.is_empty()
            && self.placed.is_empty()
    }

    /// Write every event as a JSONL record stamped with `tick`.
    ///
    /// `Stay` transitions are skipped; they fire every frame and carry no news.
    pub fn write_records(&self, app: &GazeApp, tick: FrameTick, sink: &mut JsonlSink) -> Result<()> {
        let name = |entity: Entity| {
            app.world()
                .get::<Name>(entity)
                .map_or_else(|| format!("{entity:?}"), |name| name.0.clone())
        };

        for (entity, kind) in &self.stares {
            let kind = match kind {
                StareKind::Enter => "stare_enter",
                StareKind::Exit => "stare_exit",
                StareKind::Stay => continue,
            };
            sink.write(&EventRecord {
                tick,
                kind,
                payload: &name(*entity),
            })?;
        }
        for entity in &self.interacted {
            sink.write(&EventRecord {
                tick,
                kind: "interacted",
                payload: &name(*entity),
            })?;
        }
        for entity in &self.picked_up {
            sink.write(&EventRecord {
                tick,
                kind: "picked_up",
                payload: &name(*entity),
            })?;
        }
        for (entity, position) in &self.placed {
            let payload = format!(
                "{} @ {:.3},{:.3},{:.3}",
                name(*entity),
                position.x,
                position.y,
                position.z
            );
            sink.write(&EventRecord {
                tick,
                kind: "placed",
                payload: &payload,
            })?;
        }
        Ok(())
    }
}
