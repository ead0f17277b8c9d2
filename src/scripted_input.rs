use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize)]
struct ScriptedInputFile {
    steps: Vec<ScriptedStep>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct ScriptedStep {
    duration: f32,
    #[serde(default)]
    move_x: f32,
    #[serde(default)]
    move_y: f32,
    #[serde(default)]
    look_x: f32,
    #[serde(default)]
    look_y: f32,
    #[serde(default)]
    interact: bool,
}

/// Input for one frame, sampled from the script.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScriptedFrame {
    /// Strafe (x) and forward (y) movement, -1..1.
    pub movement: (f32, f32),
    /// Look delta in sensitivity units.
    pub look: (f32, f32),
    /// Whether interact is held down.
    pub interact: bool,
}

pub struct ScriptedInputPlayer {
    steps: Vec<ScriptedStep>,
    index: usize,
    time_in_step: f32,
    finished: bool,
}

impl ScriptedInputPlayer {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> anyhow::Result<Self> {
        let file: ScriptedInputFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("scripted input file contains no steps");
        }
        Ok(Self {
            steps: file.steps,
            index: 0,
            time_in_step: 0.0,
            finished: false,
        })
    }

    /// Whether the last step has run out.
    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn advance(&mut self, dt: f32) -> ScriptedFrame {
        if self.finished || self.steps.is_empty() {
            return ScriptedFrame::default();
        }

        let frame = self.steps[self.index].to_frame();

        self.time_in_step += dt;
        while self.index < self.steps.len() && self.time_in_step >= self.steps[self.index].duration
        {
            self.time_in_step -= self.steps[self.index].duration;
            if self.index + 1 < self.steps.len() {
                self.index += 1;
            } else {
                self.time_in_step = 0.0;
                self.finished = true;
                break;
            }
        }

        frame
    }
}

impl ScriptedStep {
    fn to_frame(&self) -> ScriptedFrame {
        ScriptedFrame {
            movement: (self.move_x, self.move_y),
            look: (self.look_x, self.look_y),
            interact: self.interact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"{
        "steps": [
            { "duration": 0.1, "look_x": 2.0 },
            { "duration": 0.05, "interact": true },
            { "duration": 0.1, "move_y": 1.0 }
        ]
    }"#;

    #[test]
    fn steps_play_in_order_then_finish() {
        let mut player = ScriptedInputPlayer::from_json(SCRIPT).expect("script parses");
        let dt = 0.05;

        assert_eq!(player.advance(dt).look, (2.0, 0.0));
        assert_eq!(player.advance(dt).look, (2.0, 0.0));
        assert!(player.advance(dt).interact);
        let frame = player.advance(dt);
        assert!(!frame.interact);
        assert_eq!(frame.movement, (0.0, 1.0));
        assert!(!player.finished());
        player.advance(dt);
        assert!(player.finished());
        assert_eq!(player.advance(dt), ScriptedFrame::default());
    }

    #[test]
    fn empty_script_is_rejected() {
        assert!(ScriptedInputPlayer::from_json(r#"{ "steps": [] }"#).is_err());
    }
}
