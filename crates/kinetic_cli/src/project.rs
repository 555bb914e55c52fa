//! Scene scaffolding

use crate::config::SCENE_FILE;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Starter scene: a ball bouncing in a stage and a floating card
pub const STARTER_SCENE: &str = r#"# Kinetic scene
#
# Run with: kinetic simulate . --frames 120

seed = 1
# Accept cross-frame messages from this origin only
trusted_origin = "https://example.com"

[viewport]
width = 1280.0
height = 720.0
scroll = { x = 0.0, y = 0.0 }
reduced_motion = false

# Laid-out elements (viewport coordinates)
[[element]]
id = 1
rect = { x = 0.0, y = 0.0, width = 640.0, height = 360.0 }

[[element]]
id = 2
rect = { x = 40.0, y = 40.0, width = 48.0, height = 48.0 }

[[element]]
id = 3
rect = { x = 800.0, y = 200.0, width = 240.0, height = 320.0 }

[[element]]
id = 4
rect = { x = 820.0, y = 220.0, width = 200.0, height = 40.0 }

[[bounce]]
element = 2
container = { kind = "element", id = 1 }
speed_x = 1.5
speed_y = 1.0
speed_rotation = 0.2

[[float]]
element = 3
children = [4]
strength = { x = 0.2, y = 0.2 }
properties = ["x", "y", "scaleX", "scaleY", "rotation", "skewX", "skewY"]
scale_on_hover = true
duration = 1.0
origin = "corner"

[[tilt]]
strength = 0.05

# Scripted input, applied before the frame is ticked
[[pointer]]
frame = 0
kind = "move"
x = 900.0
y = 300.0

[[pointer]]
frame = 30
kind = "enter"
target = 3

[[pointer]]
frame = 60
kind = "move"
x = 200.0
y = 600.0

[[pointer]]
frame = 90
kind = "leave"
target = 3

[[message]]
frame = 100
origin = "https://example.com"
data = '{"type":"scroll:progress","progress":0.5}'
"#;

/// Write a starter `kinetic.toml` into `dir`, creating it if needed
pub fn init_scene(dir: &Path, force: bool) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let path = dir.join(SCENE_FILE);
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            path.display()
        );
    }

    fs::write(&path, STARTER_SCENE)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
