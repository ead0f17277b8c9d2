use crate::config::AppConfig;
use crate::scene::SceneFile;
use crate::scripted_input::ScriptedInputPlayer;
use anyhow::{Context, Result};
use glam::Vec3;
use pickplace_camera::Camera;
use pickplace_input::{ActionMap, InputBinding};
use pickplace_interaction::{spawn_object, spawn_player, GazeApp, Viewport};
use pickplace_testkit::{FrameEvents, JsonlSink};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Frames run when neither a script nor `--max-frames` bounds the session.
const DEFAULT_FRAMES: u64 = 600;

pub struct HeadlessConfig {
    pub config: AppConfig,
    pub scene: Option<PathBuf>,
    pub script: Option<PathBuf>,
    pub event_log: Option<PathBuf>,
    pub max_frames: Option<u64>,
    pub fps: u32,
    pub seed: u64,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub frames: u64,
    pub stare_enters: usize,
    pub interactions: usize,
    pub pickups: usize,
    pub placements: usize,
}

pub fn run(cfg: HeadlessConfig) -> Result<SessionSummary> {
    let scene = match cfg.scene.as_deref() {
        Some(path) => SceneFile::from_path(path)?,
        None => {
            info!(seed = cfg.seed, "no scene given; using the demo scene");
            SceneFile::demo(cfg.seed)
        }
    };
    let mut script = cfg
        .script
        .as_deref()
        .map(|path| {
            ScriptedInputPlayer::from_path(path)
                .with_context(|| format!("failed to load script {}", path.display()))
        })
        .transpose()?;
    let mut sink = cfg.event_log.as_deref().map(JsonlSink::create).transpose()?;

    let mut app = build_app(&cfg.config, &scene)?;
    let interact = interact_binding(&cfg.config);
    let dt = 1.0 / cfg.fps.max(1) as f32;
    let max_frames = match (cfg.max_frames, script.is_some()) {
        (Some(frames), _) => Some(frames),
        (None, true) => None,
        (None, false) => Some(DEFAULT_FRAMES),
    };

    let mut summary = SessionSummary::default();
    let mut interact_held = false;
    loop {
        if max_frames.is_some_and(|max| summary.frames >= max) {
            break;
        }
        if let Some(player) = script.as_mut() {
            if player.finished() {
                break;
            }
            let frame = player.advance(dt);
            let camera = app.camera_mut();
            let sensitivity = cfg.config.camera.look_sensitivity;
            camera.rotate(frame.look.0 * sensitivity, -frame.look.1 * sensitivity);
            camera.move_right(frame.movement.0 * cfg.config.camera.move_speed * dt);
            camera.move_forward(frame.movement.1 * cfg.config.camera.move_speed * dt);

            if frame.interact != interact_held {
                interact_held = frame.interact;
                match (interact_held, interact) {
                    (true, Some(binding)) => app.input_mut().press(binding),
                    (false, Some(binding)) => app.input_mut().release(binding),
                    (_, None) => {}
                }
            }
        }

        let tick = app.tick();
        app.step(dt);
        summary.frames += 1;

        let events = FrameEvents::drain(&mut app);
        summary.stare_enters += events
            .stares_of(pickplace_interaction::StareKind::Enter)
            .count();
        summary.interactions += events.interacted.len();
        summary.pickups += events.picked_up.len();
        summary.placements += events.placed.len();
        if !events.is_quiet() {
            debug!(tick = tick.0, reticle = events.reticle.as_str(), label = %events.label, "frame events");
        }
        if let Some(sink) = sink.as_mut() {
            events.write_records(&app, tick, sink)?;
        }
    }

    if let Some(sink) = sink.as_mut() {
        sink.flush()?;
        info!(records = sink.written(), "event log written");
    }
    info!(
        frames = summary.frames,
        stare_enters = summary.stare_enters,
        interactions = summary.interactions,
        pickups = summary.pickups,
        placements = summary.placements,
        "headless session finished"
    );
    Ok(summary)
}

fn build_app(config: &AppConfig, scene: &SceneFile) -> Result<GazeApp> {
    let actions = ActionMap::from_config(&config.actions).context("invalid action config")?;
    let mut camera = Camera::new(Vec3::from_array(scene.camera));
    camera.fov = config.camera.fov_degrees.clamp(10.0, 150.0).to_radians();
    if let Some(target) = scene.look_at {
        camera.look_at(Vec3::from_array(target));
    }

    let mut app = GazeApp::new(
        &config.interaction,
        actions,
        camera,
        Viewport::from(config.viewport),
    )
    .context("invalid interaction config")?;
    spawn_player(app.world_mut(), Vec3::from_array(scene.camera));
    for spec in &scene.objects {
        spawn_object(app.world_mut(), spec, &config.interaction.highlight);
    }
    Ok(app)
}

/// First binding of the configured interact action; scripts press it.
fn interact_binding(config: &AppConfig) -> Option<InputBinding> {
    let name = &config.interaction.ray.interact_action;
    let binding = config
        .actions
        .actions
        .iter()
        .find(|action| action.name.eq_ignore_ascii_case(name))
        .and_then(|action| {
            action
                .bindings
                .iter()
                .find_map(|token| InputBinding::parse(token).ok())
        });
    if binding.is_none() {
        warn!(action = %name, "interact action has no usable binding; scripted interact is ignored");
    }
    binding
}
