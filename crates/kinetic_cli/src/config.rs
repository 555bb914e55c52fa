//! Scene file handling (kinetic.toml)

use anyhow::{Context, Result};
use kinetic_animation::{BounceConfig, FloatConfig, TiltConfig};
use kinetic_core::{Container, ElementId, Rect, Vec2};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const SCENE_FILE: &str = "kinetic.toml";

/// Top-level scene description
#[derive(Debug, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub viewport: ViewportConfig,
    /// RNG seed, overridden by `--seed`
    #[serde(default)]
    pub seed: Option<u64>,
    /// Origin accepted for cross-frame messages
    #[serde(default)]
    pub trusted_origin: Option<String>,
    #[serde(default, rename = "element")]
    pub elements: Vec<ElementConfig>,
    #[serde(default)]
    pub bounce: Vec<BounceObject>,
    #[serde(default)]
    pub float: Vec<FloatObject>,
    #[serde(default)]
    pub tilt: Vec<TiltConfig>,
    /// Scripted pointer input
    #[serde(default)]
    pub pointer: Vec<PointerStep>,
    /// Scripted cross-frame messages
    #[serde(default)]
    pub message: Vec<MessageStep>,
}

/// Simulated browser viewport
#[derive(Debug, Deserialize)]
pub struct ViewportConfig {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
    #[serde(default)]
    pub scroll: Vec2,
    #[serde(default)]
    pub reduced_motion: bool,
}

fn default_width() -> f32 {
    1280.0
}

fn default_height() -> f32 {
    720.0
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            scroll: Vec2::ZERO,
            reduced_motion: false,
        }
    }
}

/// A laid-out element
#[derive(Debug, Deserialize)]
pub struct ElementConfig {
    pub id: ElementId,
    pub rect: Rect,
}

#[derive(Debug, Deserialize)]
pub struct BounceObject {
    pub element: ElementId,
    #[serde(default)]
    pub container: Container,
    #[serde(flatten)]
    pub config: BounceConfig,
}

#[derive(Debug, Deserialize)]
pub struct FloatObject {
    pub element: ElementId,
    /// Elements that receive counter-rotation
    #[serde(default)]
    pub children: Vec<ElementId>,
    #[serde(flatten)]
    pub config: FloatConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Move,
    Enter,
    Leave,
}

/// Pointer input delivered before the given frame is ticked
#[derive(Debug, Deserialize)]
pub struct PointerStep {
    pub frame: u32,
    pub kind: PointerKind,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    /// Hovered element for enter/leave
    #[serde(default)]
    pub target: Option<ElementId>,
}

/// Message posted by a parent frame before the given frame is ticked
#[derive(Debug, Deserialize)]
pub struct MessageStep {
    pub frame: u32,
    pub origin: String,
    /// Raw JSON payload
    pub data: String,
}

impl SceneConfig {
    /// Load a scene from a file, or from `kinetic.toml` inside a directory
    pub fn load(path: &Path) -> Result<Self> {
        let scene_path = if path.is_dir() {
            path.join(SCENE_FILE)
        } else {
            path.to_path_buf()
        };

        if !scene_path.exists() {
            anyhow::bail!(
                "No scene found at {}. Run `kinetic init` to create one.",
                scene_path.display()
            );
        }

        let content = fs::read_to_string(&scene_path)
            .with_context(|| format!("Failed to read {}", scene_path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to parse {}", scene_path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
