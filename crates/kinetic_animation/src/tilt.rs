//! Tilt controller for an embedded 3D viewport
//!
//! Smooths the pointer position into a 2D tilt vector and accumulates a
//! slow autonomous spin. The 3D scene itself is owned by the render sink.

use crate::config::TiltConfig;
use crate::math::normalize;
use crate::tween::Tween;
use kinetic_core::{Size, Tilt, Vec2};

#[derive(Clone, Debug)]
pub struct TiltController {
    config: TiltConfig,
    /// x follows the pointer's vertical position, y the horizontal one
    signal: Tween,
    spin: f32,
}

impl TiltController {
    pub fn new(config: TiltConfig) -> Self {
        Self {
            signal: Tween::new(Vec2::ZERO, config.duration, config.easing),
            config,
            spin: 0.0,
        }
    }

    pub fn pointer_move(&mut self, client: Vec2, viewport: Size) {
        self.signal.retarget(Vec2::new(
            normalize(0.0, viewport.height, client.y),
            normalize(0.0, viewport.width, client.x),
        ));
    }

    /// Advance by `dt` seconds and one frame of spin
    pub fn step(&mut self, dt: f32) -> Tilt {
        self.signal.advance(dt);
        self.spin += self.config.spin_speed;
        self.tilt()
    }

    pub fn tilt(&self) -> Tilt {
        let s = self.config.strength;
        let t = self.signal.value();
        Tilt {
            x: s - 2.0 * s * t.x,
            y: -s + 2.0 * s * t.y,
            spin: self.spin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_tilt() {
        let c = TiltController::new(TiltConfig::default());
        let tilt = c.tilt();
        assert_eq!(tilt.x, 0.05);
        assert_eq!(tilt.y, -0.05);
        assert_eq!(tilt.spin, 0.0);
    }

    #[test]
    fn test_centered_pointer_levels_out() {
        let mut c = TiltController::new(TiltConfig::default());
        c.pointer_move(Vec2::new(400.0, 300.0), Size::new(800.0, 600.0));
        for _ in 0..40 {
            c.step(1.0 / 60.0);
        }
        let tilt = c.tilt();
        assert!(tilt.x.abs() < 1e-6);
        assert!(tilt.y.abs() < 1e-6);
        assert!((tilt.spin - 40.0 * 0.0005).abs() < 1e-6);
    }

    #[test]
    fn test_axes_are_swapped() {
        let config = TiltConfig {
            duration: 0.0,
            ..TiltConfig::default()
        };
        let mut c = TiltController::new(config);
        // Bottom-left corner
        c.pointer_move(Vec2::new(0.0, 600.0), Size::new(800.0, 600.0));
        let tilt = c.step(0.0);
        assert!((tilt.x + 0.05).abs() < 1e-6);
        assert!((tilt.y + 0.05).abs() < 1e-6);
    }
}
