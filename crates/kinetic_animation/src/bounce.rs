//! Kinetic bounce controller
//!
//! Integrates one object's position inside its container bounds once per
//! frame, reflects velocity when the next step would cross an edge, and
//! slows the object down as it approaches an edge.
//!
//! Velocities are in pixels (or degrees) per frame, not per second, so the
//! controller is stepped once per rendered frame.

use crate::config::BounceConfig;
use crate::math::{clamp01, ease_out_sine, normalize};
use kinetic_core::{ContainerBounds, Size, StateMachine, TransformDescriptor, Vec2};
use rand::Rng;

/// Running/paused mode states
pub mod states {
    use kinetic_core::StateId;

    pub const RUNNING: StateId = 0;
    pub const PAUSED: StateId = 1;
}

/// Running/paused mode events
pub mod mode_events {
    use kinetic_core::EventId;

    pub const PAUSE: EventId = 1;
    pub const RESUME: EventId = 2;
}

/// Signed per-frame speed
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
}

/// Initial sign of each velocity component, each `-1` or `1`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Direction {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
}

impl Direction {
    /// Pick every sign independently and uniformly
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut sign = || if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        Self {
            x: sign(),
            y: sign(),
            rotation: sign(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct BounceController {
    config: BounceConfig,
    bounds: ContainerBounds,
    size: Size,
    position: Vec2,
    /// Position as a fraction of the container extent, re-projected on resize
    relative: Vec2,
    velocity: Velocity,
    rotation: f32,
    mode: StateMachine,
}

impl BounceController {
    /// Create a controller at a random position that fits inside `bounds`
    pub fn new<R: Rng>(
        config: BounceConfig,
        bounds: ContainerBounds,
        size: Size,
        rng: &mut R,
    ) -> Self {
        let direction = Direction::random(rng);
        let velocity = Velocity {
            x: config.speed_x * direction.x,
            y: config.speed_y * direction.y,
            rotation: config.speed_rotation * direction.rotation,
        };
        let position = Vec2::new(
            bounds.left + rng.random::<f32>() * (bounds.width - size.width).max(0.0),
            bounds.top + rng.random::<f32>() * (bounds.height - size.height).max(0.0),
        );
        let rotation = config
            .initial_rotation
            .unwrap_or_else(|| rng.random_range(0.0..360.0));

        Self::from_parts(config, bounds, size, position, velocity, rotation)
    }

    /// Create a controller with explicit state
    pub fn from_parts(
        config: BounceConfig,
        bounds: ContainerBounds,
        size: Size,
        position: Vec2,
        velocity: Velocity,
        rotation: f32,
    ) -> Self {
        let initial = if config.paused {
            states::PAUSED
        } else {
            states::RUNNING
        };
        let mode = StateMachine::builder(initial)
            .on(states::RUNNING, mode_events::PAUSE, states::PAUSED)
            .on(states::PAUSED, mode_events::RESUME, states::RUNNING)
            .build();

        let mut controller = Self {
            config,
            bounds,
            size,
            position,
            relative: Vec2::ZERO,
            velocity,
            rotation,
            mode,
        };
        controller.relative = controller.relative_position();
        controller
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn bounds(&self) -> ContainerBounds {
        self.bounds
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn is_paused(&self) -> bool {
        self.mode.is_in(states::PAUSED)
    }

    pub fn set_paused(&mut self, paused: bool) {
        let event = if paused {
            mode_events::PAUSE
        } else {
            mode_events::RESUME
        };
        self.mode.send(event);
    }

    /// Adopt freshly computed bounds and size.
    ///
    /// The position keeps its relative place in the container and is then
    /// pulled back inside if the box no longer fits.
    pub fn fit(&mut self, bounds: ContainerBounds, size: Size) {
        self.bounds = bounds;
        self.size = size;

        self.position = Vec2::new(
            bounds.left + bounds.width * self.relative.x,
            bounds.top + bounds.height * self.relative.y,
        );
        self.clamp_inside();
        self.relative = self.relative_position();
    }

    /// Advance one frame; a no-op while paused
    pub fn step(&mut self) {
        if self.is_paused() {
            return;
        }

        let bounds = self.bounds;
        let size = self.size;
        let v = self.velocity;

        // Both sides are tested against the pre-reflection velocity, so an
        // axis flips at most once per frame.
        if self.position.x + v.x <= bounds.left
            || self.position.x + size.width + v.x >= bounds.right - v.x
        {
            self.velocity.x = -v.x;
        }
        if self.position.y + v.y <= bounds.top
            || self.position.y + size.height + v.y >= bounds.bottom - v.y
        {
            self.velocity.y = -v.y;
        }

        let speed_break = self.speed_break();
        self.position.x += self.velocity.x * speed_break.x;
        self.position.y += self.velocity.y * speed_break.y;
        self.rotation += self.velocity.rotation;

        // A reflected step larger than the free room would overshoot the
        // near edge
        self.clamp_inside();
        self.relative = self.relative_position();
    }

    /// Pull the box inside the bounds. An axis that cannot hold the box
    /// collapses onto the container origin.
    fn clamp_inside(&mut self) {
        let b = &self.bounds;
        let max_x = (b.right - self.size.width).max(b.left);
        let max_y = (b.bottom - self.size.height).max(b.top);
        self.position = Vec2::new(
            self.position.x.clamp(b.left, max_x),
            self.position.y.clamp(b.top, max_y),
        );
    }

    /// Per-axis speed multiplier in `[min_speed_break, 1]`
    pub fn speed_break(&self) -> Vec2 {
        let b = &self.bounds;
        let nearest_x = (b.left - self.position.x)
            .abs()
            .min((b.right - (self.position.x + self.size.width)).abs());
        let nearest_y = (b.top - self.position.y)
            .abs()
            .min((b.bottom - (self.position.y + self.size.height)).abs());

        Vec2::new(self.axis_break(nearest_x), self.axis_break(nearest_y))
    }

    fn axis_break(&self, edge_distance: f32) -> f32 {
        let eased = ease_out_sine(clamp01(normalize(0.0, self.config.falloff, edge_distance)));
        eased.max(self.config.min_speed_break)
    }

    pub fn transform(&self) -> TransformDescriptor {
        TransformDescriptor::translate_rotate(self.position.x, self.position.y, self.rotation)
    }

    fn relative_position(&self) -> Vec2 {
        let ratio = |offset: f32, extent: f32| if extent > 0.0 { offset / extent } else { 0.0 };
        Vec2::new(
            ratio(self.position.x - self.bounds.left, self.bounds.width),
            ratio(self.position.y - self.bounds.top, self.bounds.height),
        )
    }
}
