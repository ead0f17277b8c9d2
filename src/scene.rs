//! Scene files and the seeded demo scene.

use anyhow::{Context, Result};
use glam::Vec3;
use pickplace_core::{Color, Layer};
use pickplace_interaction::ObjectSpec;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// A scene: where the player stands, where they look and what is around them.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SceneFile {
    /// Eye position.
    #[serde(default = "default_eye")]
    pub camera: [f32; 3],
    /// Initial look target.
    #[serde(default)]
    pub look_at: Option<[f32; 3]>,
    /// Objects to spawn.
    pub objects: Vec<ObjectSpec>,
}

fn default_eye() -> [f32; 3] {
    [0.0, 1.6, 0.0]
}

impl SceneFile {
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read scene {}", path.display()))?;
        let scene: SceneFile = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse scene {}", path.display()))?;
        if scene.objects.is_empty() {
            anyhow::bail!("scene {} contains no objects", path.display());
        }
        Ok(scene)
    }

    /// Floor, a table and a few pickable props scattered on it.
    pub fn demo(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut objects = vec![
            ObjectSpec::new("Floor", Vec3::new(0.0, -0.5, 0.0), Vec3::new(20.0, 1.0, 20.0)),
            ObjectSpec::new("Table", Vec3::new(2.5, 0.4, 0.0), Vec3::new(1.2, 0.8, 2.4)),
            ObjectSpec::new("Glass pane", Vec3::new(1.2, 1.0, -2.0), Vec3::new(0.05, 2.0, 2.0))
                .on_layer(Layer::IgnoreRaycast),
        ];

        let props = rng.gen_range(2..=4);
        for index in 0..props {
            let size = Vec3::splat(rng.gen_range(0.15..0.35));
            let z = -0.9 + 1.8 * (index as f32 + 0.5) / props as f32;
            let x = rng.gen_range(2.1..2.9);
            let mut spec = ObjectSpec::new(
                format!("Prop {}", index + 1),
                Vec3::new(x, 0.8 + size.y * 0.5, z),
                size,
            )
            .extractable();
            spec.color = Color::rgb(rng.gen(), rng.gen(), rng.gen());
            objects.push(spec);
        }

        objects.push(
            ObjectSpec::new("Locked chest", Vec3::new(-2.0, 0.3, 1.5), Vec3::new(0.8, 0.6, 0.5))
                .extractable()
                .interactable(false)
                .with_label("Locked"),
        );

        Self {
            camera: default_eye(),
            look_at: Some([2.5, 0.8, 0.0]),
            objects,
        }
    }
}
