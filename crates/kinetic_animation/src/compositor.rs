//! Transform compositor
//!
//! Pure mapping from a smoothed pointer state to the transform of a float
//! object and, when rotation is emitted, the counter-rotation of its
//! children.

use crate::config::FloatConfig;
use crate::math::{angle_degrees, stretch_amount};
use kinetic_core::{TransformDescriptor, TransformProperty, Vec2};

/// Smallest scale component ever emitted
pub const MIN_SCALE: f32 = 0.01;

/// Input to [`compose`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatState {
    /// Lagged pointer value
    pub current: Vec2,
    /// Rounded `target - current`
    pub delta: Vec2,
    /// Proximity/hover scale multiplier
    pub scale: f32,
}

/// Transforms for an object and its direct children
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Composite {
    pub root: TransformDescriptor,
    /// Counter-rotation for children, present only when rotation is emitted
    pub children: Option<TransformDescriptor>,
}

/// Compose the configured subset of properties
pub fn compose(state: &FloatState, config: &FloatConfig) -> Composite {
    let strength = config.strength;
    let delta = state.delta;
    let stretch = stretch_amount(delta);
    let skew_sign = config.skew_sign.factor();

    let mut root = TransformDescriptor::default();
    for prop in config.properties.iter() {
        let value = match prop {
            TransformProperty::X => {
                -state.current.x * strength.x * state.scale * config.translation_gain
            }
            TransformProperty::Y => {
                -state.current.y * strength.y * state.scale * config.translation_gain
            }
            TransformProperty::ScaleX => {
                (1.0 + stretch * strength.x * config.scale_gain).max(MIN_SCALE)
            }
            TransformProperty::ScaleY => {
                (1.0 - stretch * strength.y * config.scale_gain).max(MIN_SCALE)
            }
            TransformProperty::Rotation => angle_degrees(delta),
            TransformProperty::SkewX => {
                skew_sign * delta.x.abs() * strength.x * config.skew_gain * state.scale
            }
            TransformProperty::SkewY => {
                skew_sign * delta.y.abs() * strength.y * config.skew_gain * state.scale
            }
        };
        root.set(prop, value);
    }

    let children = root.rotation.map(|r| TransformDescriptor::rotation(-r));
    Composite { root, children }
}
