//! Frame-stepping driver for whole-system gaze tests.

use crate::FrameEvents;
use anyhow::{Context, Result};
use bevy_ecs::entity::Entity;
use glam::Vec3;
use pickplace_camera::Camera;
use pickplace_input::{ActionMap, ActionsConfig, InputBinding};
use pickplace_interaction::{
    spawn_object, spawn_player, GazeApp, InteractionConfig, ObjectSpec, Transform, Viewport,
};
use tracing::trace;
use winit::keyboard::KeyCode;

/// Default frame length: 60 frames per second.
pub const DEFAULT_DT: f32 = 1.0 / 60.0;

/// Wraps a [`GazeApp`] with helpers for spawning, aiming and pressing interact.
#[derive(Debug)]
pub struct GazeHarness {
    app: GazeApp,
    config: InteractionConfig,
    interact: InputBinding,
    dt: f32,
}

impl GazeHarness {
    /// Harness with default config, default actions and a player at the origin.
    pub fn new() -> Result<Self> {
        Self::with_config(InteractionConfig::default(), &ActionsConfig::default())
    }

    /// Harness with explicit config.
    pub fn with_config(config: InteractionConfig, actions: &ActionsConfig) -> Result<Self> {
        let actions = ActionMap::from_config(actions).context("building action map")?;
        let mut app = GazeApp::new(&config, actions, Camera::default(), Viewport::default())
            .context("building gaze app")?;
        spawn_player(app.world_mut(), Vec3::ZERO);
        Ok(Self {
            app,
            config,
            interact: InputBinding::Key(KeyCode::KeyE),
            dt: DEFAULT_DT,
        })
    }

    /// Spawn an object using the harness highlight settings.
    pub fn spawn(&mut self, spec: &ObjectSpec) -> Entity {
        spawn_object(self.app.world_mut(), spec, &self.config.highlight)
    }

    /// Aim the camera at `target`.
    pub fn look_at(&mut self, target: Vec3) {
        self.app.camera_mut().look_at(target);
    }

    /// Run one frame and collect what it produced.
    pub fn step(&mut self) -> FrameEvents {
        self.app.step(self.dt);
        let events = FrameEvents::drain(&mut self.app);
        trace!(tick = self.app.tick().0, quiet = events.is_quiet(), "harness frame");
        events
    }

    /// Run `frames` frames and return the last one's events.
    pub fn step_n(&mut self, frames: usize) -> FrameEvents {
        let mut last = FrameEvents::default();
        for _ in 0..frames {
            last = self.step();
        }
        last
    }

    /// Press and release interact within one frame, then run it.
    pub fn tap_interact(&mut self) -> FrameEvents {
        self.app.input_mut().press(self.interact);
        self.app.input_mut().release(self.interact);
        self.step()
    }

    /// Hold interact down from the next frame on.
    pub fn press_interact(&mut self) {
        self.app.input_mut().press(self.interact);
    }

    /// Let go of interact on the next frame.
    pub fn release_interact(&mut self) {
        self.app.input_mut().release(self.interact);
    }

    /// World-space position of `entity`.
    pub fn position(&self, entity: Entity) -> Option<Vec3> {
        self.app
            .world()
            .get::<Transform>(entity)
            .map(|transform| transform.translation)
    }

    /// The wrapped session.
    pub fn app(&self) -> &GazeApp {
        &self.app
    }

    /// Mutable access to the wrapped session.
    pub fn app_mut(&mut self) -> &mut GazeApp {
        &mut self.app
    }
}
