//! pickplace - gaze-driven pickup and place
//!
//! Headless session runner: builds a scene, plays scripted input and logs every
//! interaction event.

mod config;
mod headless;
mod scene;
mod scripted_input;

use anyhow::Result;
use config::AppConfig;
use std::{env, path::PathBuf};
use tracing::info;

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting pickplace v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1));
    let mut config = match cli.config.as_deref() {
        Some(path) => AppConfig::load_from_path(path),
        None => AppConfig::load(),
    };
    if cli.debug_rays {
        config.interaction.ray.debug_draw = true;
    }
    if let Some(path) = cli.write_config.as_deref() {
        config.save_to_path(path)?;
        info!(path = %path.display(), "wrote effective config");
    }

    headless::run(headless::HeadlessConfig {
        config,
        scene: cli.scene,
        script: cli.script,
        event_log: cli.event_log,
        max_frames: cli.max_frames,
        fps: cli.fps,
        seed: cli.seed,
    })?;

    info!("pickplace shutting down");
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
struct CliOptions {
    config: Option<PathBuf>,
    scene: Option<PathBuf>,
    script: Option<PathBuf>,
    event_log: Option<PathBuf>,
    max_frames: Option<u64>,
    fps: u32,
    seed: u64,
    debug_rays: bool,
    write_config: Option<PathBuf>,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut opts = CliOptions {
            config: None,
            scene: None,
            script: None,
            event_log: None,
            max_frames: None,
            fps: 60,
            seed: 0,
            debug_rays: false,
            write_config: None,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    if let Some(path) = args.next() {
                        opts.config = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--config requires a file path");
                    }
                }
                "--scene" => {
                    if let Some(path) = args.next() {
                        opts.scene = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--scene requires a file path");
                    }
                }
                "--script" => {
                    if let Some(path) = args.next() {
                        opts.script = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--script requires a file path");
                    }
                }
                "--event-log" => {
                    if let Some(path) = args.next() {
                        opts.event_log = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--event-log requires a file path");
                    }
                }
                "--max-frames" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u64>() {
                            Ok(value) => opts.max_frames = Some(value),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--max-frames must be an integer");
                            }
                        }
                    } else {
                        tracing::error!("--max-frames requires an integer");
                    }
                }
                "--fps" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u32>() {
                            Ok(value) => opts.fps = value.clamp(1, 240),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--fps must be an integer");
                            }
                        }
                    } else {
                        tracing::error!("--fps requires an integer");
                    }
                }
                "--seed" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u64>() {
                            Ok(value) => opts.seed = value,
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--seed must be an integer");
                            }
                        }
                    } else {
                        tracing::error!("--seed requires an integer");
                    }
                }
                "--debug-rays" => opts.debug_rays = true,
                "--write-config" => {
                    if let Some(path) = args.next() {
                        opts.write_config = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--write-config requires a file path");
                    }
                }
                other => {
                    tracing::warn!(arg = %other, "ignoring unknown argument");
                }
            }
        }

        opts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliOptions {
        CliOptions::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn defaults_without_arguments() {
        let opts = parse(&[]);
        assert_eq!(opts.fps, 60);
        assert_eq!(opts.max_frames, None);
        assert!(!opts.debug_rays);
    }

    #[test]
    fn parses_paths_and_numbers() {
        let opts = parse(&[
            "--scene",
            "scene.json",
            "--script",
            "script.json",
            "--max-frames",
            "120",
            "--fps",
            "1000",
            "--seed",
            "7",
            "--debug-rays",
        ]);
        assert_eq!(opts.scene, Some(PathBuf::from("scene.json")));
        assert_eq!(opts.script, Some(PathBuf::from("script.json")));
        assert_eq!(opts.max_frames, Some(120));
        assert_eq!(opts.fps, 240);
        assert_eq!(opts.seed, 7);
        assert!(opts.debug_rays);
    }

    #[test]
    fn bad_numbers_keep_defaults() {
        let opts = parse(&["--max-frames", "lots", "--seed"]);
        assert_eq!(opts.max_frames, None);
        assert_eq!(opts.seed, 0);
    }
}
