//! World, schedule and frame stepping for a gaze session.

use crate::config::{InteractionConfig, RayConfig};
use crate::controller::{cast_center_ray, forward_interact_input, RayController};
use crate::detector::{detect_gaze, route_interact, GazeDetector};
use crate::events::{
    InteractEvent, ItemInteracted, PickedUp, PlaceRequested, Placed, RaycastEvent, StareEvent,
};
use crate::extractable::{apply_stare_feedback, attach_extractables, pick_up_extractables};
use crate::movable::{carry_held, place_held, HoldSettings};
use crate::resources::{
    sync_physics_scene, DebugRays, FrameClock, InputResource, MainCamera, PhysicsScene,
    PlayerInventory, Viewport,
};
use crate::reticle::Reticle;
use crate::InteractionError;
use bevy_ecs::event::{Event, Events};
use bevy_ecs::prelude::*;
use bevy_ecs::schedule::Schedules;
use pickplace_camera::Camera;
use pickplace_ecs::{build_frame_schedule, run_frame, FrameSchedule, FrameSet};
use pickplace_input::{ActionMap, InputState};
use tracing::info;

/// A gaze interaction session: owns the ECS world and runs frames.
pub struct GazeApp {
    world: World,
    schedules: Schedules,
    ray: RayConfig,
    started: bool,
}

impl GazeApp {
    /// Build a session with validated `config`.
    ///
    /// The ray controller and gaze detector are installed on the first
    /// [`step`](Self::step) (or [`start`](Self::start)) so that a player
    /// spawned after construction is picked up.
    pub fn new(
        config: &InteractionConfig,
        actions: ActionMap,
        mut camera: Camera,
        viewport: Viewport,
    ) -> Result<Self, InteractionError> {
        config.validate()?;
        camera.set_aspect(viewport.width, viewport.height);

        let mut world = World::new();
        world.insert_resource(MainCamera(camera));
        world.insert_resource(viewport);
        world.insert_resource(FrameClock::default());
        world.insert_resource(InputResource {
            state: InputState::new(),
            actions,
        });
        world.insert_resource(PhysicsScene::default());
        world.insert_resource(PlayerInventory::default());
        world.insert_resource(DebugRays::default());
        world.insert_resource(Reticle::default());
        world.insert_resource(HoldSettings {
            distance: config.hold.distance,
            reach: config.ray.length,
        });

        world.init_resource::<Events<RaycastEvent>>();
        world.init_resource::<Events<InteractEvent>>();
        world.init_resource::<Events<StareEvent>>();
        world.init_resource::<Events<ItemInteracted>>();
        world.init_resource::<Events<PlaceRequested>>();
        world.init_resource::<Events<PickedUp>>();
        world.init_resource::<Events<Placed>>();

        let mut schedules = build_frame_schedule();
        if let Some(schedule) = schedules.get_mut(FrameSchedule) {
            schedule.add_systems((
                sync_physics_scene.in_set(FrameSet::Sync),
                forward_interact_input.in_set(FrameSet::Input),
                (cast_center_ray, detect_gaze).chain().in_set(FrameSet::Gaze),
                route_interact.in_set(FrameSet::Interact),
                (attach_extractables, apply_stare_feedback, pick_up_extractables)
                    .chain()
                    .in_set(FrameSet::Feedback),
                (carry_held, place_held).chain().in_set(FrameSet::Hold),
            ));
        }

        Ok(Self {
            world,
            schedules,
            ray: config.ray.clone(),
            started: false,
        })
    }

    /// Install the ray controller and gaze detector. Runs once.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        RayController::install(&mut self.world, &self.ray);
        GazeDetector::install(&mut self.world, self.ray.length);
        info!(ray_length = self.ray.length, action = %self.ray.interact_action, "gaze session started");
    }

    /// Run one frame covering `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        self.start();

        let tick = {
            let mut clock = self.world.resource_mut::<FrameClock>();
            clock.dt = dt;
            clock.elapsed += dt;
            clock.tick
        };
        self.world.resource_mut::<DebugRays>().rays.clear();

        run_frame(&mut self.world, &mut self.schedules, tick);

        self.update_events::<RaycastEvent>();
        self.update_events::<InteractEvent>();
        self.update_events::<StareEvent>();
        self.update_events::<ItemInteracted>();
        self.update_events::<PlaceRequested>();
        self.update_events::<PickedUp>();
        self.update_events::<Placed>();

        self.world.resource_mut::<InputResource>().state.begin_frame();
        self.world.resource_mut::<FrameClock>().tick = tick.advance(1);
        self.world.clear_trackers();
    }

    fn update_events<E: Event>(&mut self) {
        self.world.resource_mut::<Events<E>>().update();
    }

    /// Take every buffered event of type `E`.
    pub fn drain_events<E: Event>(&mut self) -> Vec<E> {
        match self.world.get_resource_mut::<Events<E>>() {
            Some(mut events) => events.drain().collect(),
            None => Vec::new(),
        }
    }

    /// Toggle the gaze detector.
    pub fn set_detector_enabled(&mut self, enabled: bool) {
        self.start();
        if let Some(mut detector) = self.world.get_resource_mut::<GazeDetector>() {
            detector.set_enabled(enabled);
        }
    }

    /// Toggle the ray controller and its interact subscription.
    pub fn set_controller_enabled(&mut self, enabled: bool) {
        self.start();
        RayController::set_enabled(&mut self.world, enabled);
    }

    /// The ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable ECS world, for spawning and inspection.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The active camera.
    pub fn camera(&self) -> &Camera {
        &self.world.resource::<MainCamera>().0
    }

    /// Mutable active camera.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.world.resource_mut::<MainCamera>().into_inner().0
    }

    /// Raw input fed to the next frame.
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.world.resource_mut::<InputResource>().into_inner().state
    }

    /// Crosshair state.
    pub fn reticle(&self) -> &Reticle {
        self.world.resource::<Reticle>()
    }

    /// Gaze detector, once started.
    pub fn detector(&self) -> Option<&GazeDetector> {
        self.world.get_resource::<GazeDetector>()
    }

    /// Ray controller, once started.
    pub fn controller(&self) -> Option<&RayController> {
        self.world.get_resource::<RayController>()
    }

    /// The held object, if any.
    pub fn held(&self) -> Option<Entity> {
        self.world.resource::<PlayerInventory>().held
    }

    /// Index of the next frame.
    pub fn tick(&self) -> pickplace_core::FrameTick {
        self.world.resource::<FrameClock>().tick
    }

    /// Debug rays recorded by the last frame.
    pub fn debug_rays(&self) -> &DebugRays {
        self.world.resource::<DebugRays>()
    }
}

impl std::fmt::Debug for GazeApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GazeApp")
            .field("entities", &self.world.entities().len())
            .field("started", &self.started)
            .finish()
    }
}
