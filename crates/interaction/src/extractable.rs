//! Objects that light up under gaze and can be picked up.

use crate::components::{
    descendant_offsets, display_name, set_layer_recursive, Children, Collider, Name, ObjectLayer,
    Outline, Renderer, Transform,
};
use crate::events::{ItemInteracted, PickedUp, StareEvent, StareKind};
use crate::movable::{HoldSettings, Movable};
use crate::resources::PlayerInventory;
use bevy_ecs::prelude::*;
use glam::Vec3;
use pickplace_core::{Color, Layer, PICKUP_HIGHLIGHT};
use tracing::{debug, warn};

/// Marks an object that can be picked up.
///
/// Layer and trigger state are captured when the component is attached so
/// they can be restored when the object is put down again.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Extractable {
    /// Responds to stare and interact.
    pub enabled: bool,
    /// Layer the object lived on before any pickup.
    pub original_layer: Layer,
    /// Authored trigger flag of the collider.
    pub was_trigger: bool,
    /// Outline colour while gazed.
    pub highlight: Color,
}

impl Default for Extractable {
    fn default() -> Self {
        Self::new(PICKUP_HIGHLIGHT)
    }
}

impl Extractable {
    /// Enabled extractable highlighting with `highlight`.
    pub fn new(highlight: Color) -> Self {
        Self {
            enabled: true,
            original_layer: Layer::Default,
            was_trigger: false,
            highlight,
        }
    }
}

type AttachItem<'a> = (
    Entity,
    &'a mut Extractable,
    Option<&'a ObjectLayer>,
    Option<&'a mut Collider>,
    Option<&'a mut Outline>,
    Option<&'a mut Renderer>,
    Option<&'a Name>,
);

/// Initialise newly attached extractables.
pub fn attach_extractables(mut added: Query<AttachItem<'_>, Added<Extractable>>) {
    for (entity, mut extractable, layer, collider, outline, renderer, name) in &mut added {
        let name = display_name(entity, name);
        extractable.original_layer = layer.map_or(Layer::Default, |layer| layer.0);
        if let Some(mut collider) = collider {
            extractable.was_trigger = collider.is_trigger;
            collider.is_trigger = false;
        }

        match (outline, renderer) {
            (None, _) => {
                warn!(object = %name, "extractable has no outline effect; visual feedback will not work");
            }
            (Some(_), None) => {
                warn!(object = %name, "extractable has no renderer; visual feedback will not work");
            }
            (Some(mut outline), Some(mut renderer)) => {
                let outline = outline.0.as_mut();
                outline.prepare(&mut renderer.0);
                outline.set_outline_color(extractable.highlight, &mut renderer.0);
                outline.hide_outline(&mut renderer.0);
            }
        }
        debug!(object = %name, layer = %extractable.original_layer, "extractable attached");
    }
}

/// Show the outline while an extractable is stared at and hide it on exit.
pub fn apply_stare_feedback(
    mut stares: EventReader<StareEvent>,
    mut targets: Query<(&Extractable, &mut Outline, &mut Renderer)>,
) {
    for event in stares.read() {
        let Ok((extractable, mut outline, mut renderer)) = targets.get_mut(event.entity) else {
            continue;
        };
        if !extractable.enabled {
            continue;
        }
        match event.kind {
            StareKind::Enter => {}
            StareKind::Stay => outline.0.show_outline(&mut renderer.0),
            StareKind::Exit => outline.0.hide_outline(&mut renderer.0),
        }
    }
}

/// Turn interacted extractables into held objects.
#[allow(clippy::too_many_arguments)]
pub fn pick_up_extractables(
    mut commands: Commands,
    mut interacted: EventReader<ItemInteracted>,
    mut inventory: ResMut<PlayerInventory>,
    hold: Res<HoldSettings>,
    mut targets: Query<(&Extractable, Option<&mut Outline>, Option<&mut Renderer>, Option<&Name>)>,
    mut layers: Query<&mut ObjectLayer>,
    children: Query<&Children>,
    transforms: Query<&Transform>,
    mut picked_up: EventWriter<PickedUp>,
) {
    for event in interacted.read() {
        let entity = event.entity;
        let Ok((extractable, outline, renderer, name)) = targets.get_mut(entity) else {
            continue;
        };
        if !extractable.enabled {
            continue;
        }
        if let Some(held) = inventory.held {
            debug!(?held, "already holding an object; pickup ignored");
            continue;
        }

        if let (Some(mut outline), Some(mut renderer)) = (outline, renderer) {
            outline.0.hide_outline(&mut renderer.0);
        }
        let origin = transforms
            .get(entity)
            .map_or(Vec3::ZERO, |transform| transform.translation);
        let movable = Movable {
            being_moved: true,
            original_layer: extractable.original_layer,
            was_trigger: extractable.was_trigger,
            hold_distance: hold.distance,
            highlight: extractable.highlight,
            carried: descendant_offsets(entity, origin, &children, &transforms),
        };
        debug!(object = %display_name(entity, name), "picked up");

        set_layer_recursive(&mut commands, entity, Layer::Overlay, &mut layers, &children);
        commands.entity(entity).remove::<Extractable>().insert(movable);
        inventory.held = Some(entity);
        picked_up.send(PickedUp { entity });
    }
}
