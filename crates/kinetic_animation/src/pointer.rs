//! Pointer smoothing controller
//!
//! Keeps a raw target derived from the latest pointer position and a lagged
//! current value that chases it over a fixed duration. The difference
//! between the two drives tilt, skew and stretch.

use crate::config::{FloatConfig, OriginMode};
use crate::math::{clamp01, normalize, round_to};
use crate::tween::Tween;
use kinetic_core::{Size, StateMachine, Vec2};

/// Decimal places kept in the emitted delta
pub const DELTA_PRECISION: i32 = 4;

/// Hover states
pub mod states {
    use kinetic_core::StateId;

    pub const IDLE: StateId = 0;
    pub const HOVERED: StateId = 1;
}

/// Hover events
pub mod hover_events {
    use kinetic_core::EventId;

    pub const POINTER_ENTER: EventId = 1;
    pub const POINTER_LEAVE: EventId = 2;
}

#[derive(Clone, Debug)]
pub struct PointerSmoother {
    signal: Tween,
    origin: OriginMode,
    /// Container center in page coordinates
    center: Vec2,
    scale_with_distance: bool,
    scale_on_hover: bool,
    proximity_radius: f32,
    hover_min_scale: f32,
    /// `1 + proximity` from the latest pointer move
    proximity_scale: f32,
    hover: StateMachine,
}

impl PointerSmoother {
    pub fn new(config: &FloatConfig) -> Self {
        Self {
            signal: Tween::new(Vec2::ZERO, config.duration, config.easing),
            origin: config.origin,
            center: Vec2::ZERO,
            scale_with_distance: config.scale_with_pointer_distance,
            scale_on_hover: config.scale_on_hover,
            proximity_radius: config.proximity_radius,
            hover_min_scale: config.hover_min_scale,
            proximity_scale: 1.0,
            hover: StateMachine::builder(states::IDLE)
                .on(states::IDLE, hover_events::POINTER_ENTER, states::HOVERED)
                .on(states::HOVERED, hover_events::POINTER_LEAVE, states::IDLE)
                .build(),
        }
    }

    /// Record the container center (page coordinates) used for proximity
    pub fn fit(&mut self, center: Vec2) {
        self.center = center;
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Retarget from a pointer position in viewport coordinates.
    ///
    /// `viewport` and `scroll` must be read fresh for each event.
    pub fn pointer_move(&mut self, client: Vec2, viewport: Size, scroll: Vec2) {
        let normalized = Vec2::new(
            normalize(0.0, viewport.width, client.x),
            normalize(0.0, viewport.height, client.y),
        );
        let target = match self.origin {
            OriginMode::Corner => normalized,
            OriginMode::Center => normalized - Vec2::new(0.5, 0.5),
        };
        self.signal.retarget(target);

        if self.scale_with_distance {
            let distance = (client + scroll).distance(self.center);
            let proximity = 1.0 - clamp01(normalize(0.0, self.proximity_radius, distance));
            self.proximity_scale = 1.0 + proximity;
        }
    }

    pub fn pointer_enter(&mut self) {
        self.hover.send(hover_events::POINTER_ENTER);
    }

    pub fn pointer_leave(&mut self) {
        self.hover.send(hover_events::POINTER_LEAVE);
    }

    pub fn is_hovered(&self) -> bool {
        self.hover.is_in(states::HOVERED)
    }

    /// Advance the lagged value by `dt` seconds
    pub fn advance(&mut self, dt: f32) -> Vec2 {
        self.signal.advance(dt)
    }

    pub fn current(&self) -> Vec2 {
        self.signal.value()
    }

    pub fn target(&self) -> Vec2 {
        self.signal.target()
    }

    pub fn is_settled(&self) -> bool {
        self.signal.is_settled()
    }

    /// `target - current`, rounded to [`DELTA_PRECISION`] places
    pub fn delta(&self) -> Vec2 {
        let raw = self.signal.target() - self.signal.value();
        Vec2::new(
            round_to(raw.x, DELTA_PRECISION),
            round_to(raw.y, DELTA_PRECISION),
        )
    }

    pub fn min_scale(&self) -> f32 {
        if self.scale_on_hover && self.is_hovered() {
            self.hover_min_scale
        } else {
            1.0
        }
    }

    /// Proximity-based scale multiplier, never below [`Self::min_scale`]
    pub fn scale(&self) -> f32 {
        self.proximity_scale.max(self.min_scale())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;

    const VIEWPORT: Size = Size::new(1000.0, 500.0);

    #[test]
    fn test_corner_normalization() {
        let mut p = PointerSmoother::new(&FloatConfig::default());
        p.pointer_move(Vec2::new(250.0, 500.0), VIEWPORT, Vec2::ZERO);
        assert_eq!(p.target(), Vec2::new(0.25, 1.0));
        // Not snapped: the current value still has to travel
        assert_eq!(p.current(), Vec2::ZERO);
    }

    #[test]
    fn test_center_normalization() {
        let config = FloatConfig::default().with_origin(OriginMode::Center);
        let mut p = PointerSmoother::new(&config);
        p.pointer_move(Vec2::new(500.0, 250.0), VIEWPORT, Vec2::ZERO);
        assert_eq!(p.target(), Vec2::ZERO);
        p.pointer_move(Vec2::new(0.0, 500.0), VIEWPORT, Vec2::ZERO);
        assert_eq!(p.target(), Vec2::new(-0.5, 0.5));
    }

    #[test]
    fn test_viewport_read_per_event() {
        let mut p = PointerSmoother::new(&FloatConfig::default());
        p.pointer_move(Vec2::new(100.0, 100.0), Size::new(200.0, 200.0), Vec2::ZERO);
        assert_eq!(p.target(), Vec2::new(0.5, 0.5));
        p.pointer_move(Vec2::new(100.0, 100.0), Size::new(400.0, 400.0), Vec2::ZERO);
        assert_eq!(p.target(), Vec2::new(0.25, 0.25));
    }

    #[test]
    fn test_zero_viewport_does_not_produce_nan() {
        let mut p = PointerSmoother::new(&FloatConfig::default());
        p.pointer_move(Vec2::new(10.0, 10.0), Size::ZERO, Vec2::ZERO);
        assert_eq!(p.target(), Vec2::ZERO);
    }

    #[test]
    fn test_monotonic_convergence_within_duration() {
        let mut p = PointerSmoother::new(&FloatConfig::default().with_duration(0.5));
        p.pointer_move(Vec2::new(800.0, 100.0), VIEWPORT, Vec2::ZERO);

        let target = p.target();
        let mut prev_gap = (target - p.current()).length();
        let mut elapsed = 0.0;
        while elapsed < 0.5 {
            p.advance(1.0 / 120.0);
            elapsed += 1.0 / 120.0;
            let gap = (target - p.current()).length();
            assert!(gap <= prev_gap + 1e-6);
            prev_gap = gap;
        }
        p.advance(1.0 / 120.0);
        assert!((p.current() - target).length() < 1e-5);
        assert_eq!(p.delta(), Vec2::ZERO);
    }

    #[test]
    fn test_retarget_mid_flight_continues_from_live_value() {
        let mut p = PointerSmoother::new(&FloatConfig::default().with_easing(Easing::Linear));
        p.pointer_move(Vec2::new(1000.0, 0.0), VIEWPORT, Vec2::ZERO);
        p.advance(0.25);
        let live = p.current();
        assert!(live.x > 0.0 && live.x < 1.0);

        p.pointer_move(Vec2::new(0.0, 0.0), VIEWPORT, Vec2::ZERO);
        assert_eq!(p.current(), live);
        let next = p.advance(0.1);
        assert!(next.x < live.x);
        assert!(next.x > 0.0);
    }

    #[test]
    fn test_delta_rounded_to_four_places() {
        let mut p = PointerSmoother::new(&FloatConfig::default().with_easing(Easing::Linear));
        p.pointer_move(Vec2::new(333.0, 0.0), VIEWPORT, Vec2::ZERO);
        p.advance(0.123_456);
        let d = p.delta();
        assert_eq!(d.x, round_to(d.x, 4));
        assert!(d.x > 0.0);
    }

    #[test]
    fn test_proximity_scale() {
        let config = FloatConfig::default().scale_with_pointer_distance(true);
        let mut p = PointerSmoother::new(&config);
        p.fit(Vec2::new(500.0, 1250.0));

        // Pointer on the center (page coordinates include scroll)
        p.pointer_move(Vec2::new(500.0, 250.0), VIEWPORT, Vec2::new(0.0, 1000.0));
        assert_eq!(p.scale(), 2.0);

        // Half the falloff radius away
        p.pointer_move(Vec2::new(750.0, 250.0), VIEWPORT, Vec2::new(0.0, 1000.0));
        assert!((p.scale() - 1.5).abs() < 1e-6);

        // Beyond the radius
        p.pointer_move(Vec2::new(0.0, 0.0), VIEWPORT, Vec2::ZERO);
        assert_eq!(p.scale(), 1.0);
    }

    #[test]
    fn test_hover_raises_min_scale() {
        let config = FloatConfig::default().scale_on_hover(true);
        let mut p = PointerSmoother::new(&config);
        assert_eq!(p.scale(), 1.0);

        p.pointer_enter();
        assert!(p.is_hovered());
        assert_eq!(p.min_scale(), 1.5);
        assert_eq!(p.scale(), 1.5);

        p.pointer_leave();
        assert_eq!(p.scale(), 1.0);
    }

    #[test]
    fn test_hover_ignored_without_scale_on_hover() {
        let mut p = PointerSmoother::new(&FloatConfig::default());
        p.pointer_enter();
        assert!(p.is_hovered());
        assert_eq!(p.scale(), 1.0);
    }
}
