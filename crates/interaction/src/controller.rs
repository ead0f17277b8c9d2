//! Casts the screen-centre ray every frame and forwards interact input.

use crate::config::RayConfig;
use crate::components::Player;
use crate::events::{InteractEvent, RaycastEvent};
use crate::resources::{DebugRay, DebugRays, FrameClock, InputResource, MainCamera, Viewport};
use crate::singleton::install_singleton;
use bevy_ecs::prelude::*;
use pickplace_core::Color;
use pickplace_input::ActionPhase;
use tracing::{debug, trace, warn};

const BROADCAST_LOG_INTERVAL: u64 = 60;

/// Owner of the per-frame gaze ray and the interact action subscription.
#[derive(Resource, Debug, Clone)]
pub struct RayController {
    config: RayConfig,
    player: Option<Entity>,
    enabled: bool,
}

impl RayController {
    /// Controller for `config`, enabled, with no player bound yet.
    pub fn from_config(config: &RayConfig) -> Self {
        Self {
            config: config.clone(),
            player: None,
            enabled: true,
        }
    }

    /// Install the controller into `world`.
    ///
    /// Returns `false` and leaves the existing controller in place when one is
    /// already installed.
    pub fn install(world: &mut World, config: &RayConfig) -> bool {
        let mut controller = Self::from_config(config);
        if world.contains_resource::<RayController>() {
            return install_singleton(world, controller, "RayController");
        }

        controller.player = world
            .query_filtered::<Entity, With<Player>>()
            .iter(world)
            .next();
        if controller.player.is_none() {
            warn!("no player entity found; the gaze ray has no owner");
        }

        set_action_enabled(world, &config.interact_action, true);
        install_singleton(world, controller, "RayController")
    }

    /// Enable or disable ray casting and the interact subscription.
    pub fn set_enabled(world: &mut World, enabled: bool) {
        let Some(mut controller) = world.get_resource_mut::<RayController>() else {
            warn!("ray controller is not installed");
            return;
        };
        if controller.enabled == enabled {
            return;
        }
        controller.enabled = enabled;
        let action = controller.config.interact_action.clone();
        debug!(enabled, action = %action, "ray controller toggled");
        set_action_enabled(world, &action, enabled);
    }

    /// Player the ray is cast for.
    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    /// Whether rays are cast and input forwarded.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Active ray settings.
    pub fn config(&self) -> &RayConfig {
        &self.config
    }
}

fn set_action_enabled(world: &mut World, name: &str, enabled: bool) {
    let Some(mut input) = world.get_resource_mut::<InputResource>() else {
        warn!(action = name, "no action map present; interact input is unavailable");
        return;
    };
    let Some(action) = input.actions.find_action_mut(name) else {
        warn!(action = name, "interact action not found in the action map");
        return;
    };
    if enabled {
        action.enable();
    } else if let Some(phase) = action.disable() {
        trace!(action = name, ?phase, "interact action interrupted by disable");
    }
}

/// Emit the screen-centre [`RaycastEvent`] for this frame.
pub fn cast_center_ray(
    controller: Option<Res<RayController>>,
    camera: Res<MainCamera>,
    viewport: Res<Viewport>,
    clock: Res<FrameClock>,
    mut debug_rays: ResMut<DebugRays>,
    mut rays: EventWriter<RaycastEvent>,
) {
    let Some(controller) = controller else {
        return;
    };
    if !controller.enabled {
        return;
    }

    let ray = camera.0.center_ray(viewport.size());
    if controller.config.debug_draw {
        debug_rays.rays.push(DebugRay {
            start: ray.origin,
            end: ray.at(controller.config.length),
            color: Color::RED,
        });
    }
    if clock.tick.every(BROADCAST_LOG_INTERVAL) {
        trace!(
            tick = clock.tick.0,
            origin = ?ray.origin,
            direction = ?ray.direction,
            "broadcasting gaze ray"
        );
    }
    rays.send(RaycastEvent { ray });
}

/// Advance input actions and forward the interact action as [`InteractEvent`]s.
pub fn forward_interact_input(
    controller: Option<Res<RayController>>,
    clock: Res<FrameClock>,
    mut input: ResMut<InputResource>,
    mut interacts: EventWriter<InteractEvent>,
) {
    let input = &mut *input;
    let mut forwarded = Vec::new();
    for action in input.actions.iter_mut() {
        let phases = action.update(&input.state, clock.dt);
        let Some(controller) = controller.as_deref() else {
            continue;
        };
        if !action.name().eq_ignore_ascii_case(&controller.config.interact_action) {
            continue;
        }
        for phase in phases {
            match phase {
                ActionPhase::Started => {
                    debug!(action = action.name(), "interact started");
                }
                ActionPhase::Performed => forwarded.push(phase),
                ActionPhase::Canceled if controller.config.interact_on_release => {
                    forwarded.push(phase);
                }
                ActionPhase::Canceled => {}
            }
        }
    }

    for phase in forwarded {
        trace!(?phase, time = clock.elapsed, "forwarding interact");
        interacts.send(InteractEvent {
            phase,
            time: clock.elapsed,
        });
    }
}
