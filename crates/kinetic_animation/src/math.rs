//! Stateless math helpers shared by the controllers

use kinetic_core::Vec2;
use std::f32::consts::FRAC_PI_2;

/// Length of the delta vector at which the stretch amount saturates
pub const STRETCH_DIVISOR: f32 = 735.0;

/// Upper bound of the stretch amount
pub const STRETCH_MAX: f32 = 0.35;

pub fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Map `value` from `[min, max]` onto `[0, 1]` (not clamped).
///
/// An empty range maps everything to 0.
pub fn normalize(min: f32, max: f32, value: f32) -> f32 {
    let span = max - min;
    if span == 0.0 {
        0.0
    } else {
        (value - min) / span
    }
}

/// `sin(x * PI / 2)`
pub fn ease_out_sine(x: f32) -> f32 {
    (x * FRAC_PI_2).sin()
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f32, places: i32) -> f32 {
    let factor = 10f32.powi(places);
    (value * factor).round() / factor
}

/// Angle of a 2D delta in degrees, `atan2(y, x)`
pub fn angle_degrees(delta: Vec2) -> f32 {
    delta.y.atan2(delta.x).to_degrees()
}

/// Magnitude-capped stretch amount, `min(|delta| / 735, 0.35)`
pub fn stretch_amount(delta: Vec2) -> f32 {
    (delta.length() / STRETCH_DIVISOR).min(STRETCH_MAX)
}
