//! Per-object configuration
//!
//! Configs are immutable values built once with `Default` plus `with_*`
//! builders (or deserialized from a scene file) and moved into the
//! controller they configure. Values are deliberately not validated: a
//! negative strength mirrors the motion and a zero duration snaps instead of
//! easing. The one exception is the positive-scale floor applied by the
//! compositor.

use crate::easing::Easing;
use kinetic_core::{PropertySet, Vec2};
use serde::{Deserialize, Serialize};

/// Autonomous bouncing object
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BounceConfig {
    /// Pixels per frame along x
    pub speed_x: f32,
    /// Pixels per frame along y
    pub speed_y: f32,
    /// Degrees per frame
    pub speed_rotation: f32,
    /// Starting angle in degrees; random in `[0, 360)` when unset
    pub initial_rotation: Option<f32>,
    pub paused: bool,
    /// Edge distance (px) below which the object slows down
    pub falloff: f32,
    /// Speed multiplier at an edge
    pub min_speed_break: f32,
}

impl Default for BounceConfig {
    fn default() -> Self {
        Self {
            speed_x: 0.05,
            speed_y: 0.05,
            speed_rotation: 0.02,
            initial_rotation: None,
            paused: false,
            falloff: 50.0,
            min_speed_break: 0.05,
        }
    }
}

impl BounceConfig {
    pub fn with_speed(mut self, x: f32, y: f32) -> Self {
        self.speed_x = x;
        self.speed_y = y;
        self
    }

    pub fn with_rotation_speed(mut self, degrees_per_frame: f32) -> Self {
        self.speed_rotation = degrees_per_frame;
        self
    }

    pub fn with_initial_rotation(mut self, degrees: f32) -> Self {
        self.initial_rotation = Some(degrees);
        self
    }

    pub fn paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }
}

/// How pointer coordinates are normalized against the viewport
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginMode {
    /// `[0, 1]` with the origin at the top-left corner
    #[default]
    Corner,
    /// `[-0.5, 0.5]` with the origin at the viewport center
    Center,
}

/// Sign applied to the emitted skew.
///
/// Some float variants skew toward the pointer, some away from it; both are
/// kept as an explicit choice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkewSign {
    #[default]
    Positive,
    Negative,
}

impl SkewSign {
    pub fn factor(self) -> f32 {
        match self {
            SkewSign::Positive => 1.0,
            SkewSign::Negative => -1.0,
        }
    }
}

/// Pointer-driven parallax ("float") object
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatConfig {
    pub strength: Vec2,
    /// Properties to emit, in emission order
    pub properties: PropertySet,
    pub scale_with_pointer_distance: bool,
    pub scale_on_hover: bool,
    /// Smoothing duration in seconds
    pub duration: f32,
    pub easing: Easing,
    pub origin: OriginMode,
    /// Translation constant `K` (px)
    pub translation_gain: f32,
    pub scale_gain: f32,
    pub skew_gain: f32,
    pub skew_sign: SkewSign,
    /// Distance (px) at which pointer proximity stops adding scale
    pub proximity_radius: f32,
    /// Minimum scale while hovered (with `scale_on_hover`)
    pub hover_min_scale: f32,
}

impl Default for FloatConfig {
    fn default() -> Self {
        Self {
            strength: Vec2::new(0.2, 0.2),
            properties: PropertySet::all(),
            scale_with_pointer_distance: false,
            scale_on_hover: false,
            duration: 1.0,
            easing: Easing::EaseOutQuint,
            origin: OriginMode::Corner,
            translation_gain: 500.0,
            scale_gain: 500.0,
            skew_gain: 400.0,
            skew_sign: SkewSign::Positive,
            proximity_radius: 500.0,
            hover_min_scale: 1.5,
        }
    }
}

impl FloatConfig {
    pub fn with_strength(mut self, x: f32, y: f32) -> Self {
        self.strength = Vec2::new(x, y);
        self
    }

    pub fn with_properties(mut self, properties: PropertySet) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_duration(mut self, seconds: f32) -> Self {
        self.duration = seconds;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_origin(mut self, origin: OriginMode) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_translation_gain(mut self, gain: f32) -> Self {
        self.translation_gain = gain;
        self
    }

    pub fn with_skew_sign(mut self, sign: SkewSign) -> Self {
        self.skew_sign = sign;
        self
    }

    pub fn scale_with_pointer_distance(mut self, enabled: bool) -> Self {
        self.scale_with_pointer_distance = enabled;
        self
    }

    pub fn scale_on_hover(mut self, enabled: bool) -> Self {
        self.scale_on_hover = enabled;
        self
    }
}

/// Tilt vector fed to a 3D viewport
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltConfig {
    /// Smoothing duration in seconds
    pub duration: f32,
    pub easing: Easing,
    /// Maximum tilt in radians
    pub strength: f32,
    /// Radians of spin added per frame
    pub spin_speed: f32,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            duration: 0.5,
            easing: Easing::EaseOutQuint,
            strength: 0.05,
            spin_speed: 0.0005,
        }
    }
}
