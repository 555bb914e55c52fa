//! Kinetic Animation
//!
//! Per-frame motion for on-screen elements inside a bounded container.
//!
//! # Features
//!
//! - **Bounce**: autonomous objects that reflect off container edges and slow
//!   down near them
//! - **Float**: pointer-driven parallax that tilts, skews and stretches an
//!   element from a smoothed pointer signal
//! - **Tilt**: a smoothed 2D tilt vector for an embedded 3D viewport
//! - **Cancellable**: every attached object is driven through a frame handle
//!   that stops its ticks when cancelled
//!
//! # Example
//!
//! ```rust
//! use kinetic_animation::{FloatConfig, MotionEngine};
//! use kinetic_core::{ElementId, Host, Rect, RenderSink, Size, TransformDescriptor};
//!
//! struct Page;
//!
//! impl Host for Page {
//!     fn viewport_size(&self) -> Size {
//!         Size::new(1280.0, 720.0)
//!     }
//!
//!     fn element_rect(&self, _id: ElementId) -> Option<Rect> {
//!         Some(Rect::new(100.0, 100.0, 200.0, 200.0))
//!     }
//! }
//!
//! struct Log(Vec<TransformDescriptor>);
//!
//! impl RenderSink for Log {
//!     fn apply_transform(&mut self, _element: ElementId, transform: &TransformDescriptor) {
//!         self.0.push(*transform);
//!     }
//! }
//!
//! let mut engine = MotionEngine::with_seed(7);
//! let handle = engine
//!     .attach_float(&Page, ElementId(1), [], FloatConfig::default())
//!     .unwrap();
//!
//! let mut log = Log(Vec::new());
//! engine.tick_with(1.0 / 60.0, &Page, &mut log);
//! engine.detach(&handle);
//! engine.tick_with(1.0 / 60.0, &Page, &mut log);
//! assert_eq!(log.0.len(), 1);
//! ```

pub mod boundary;
pub mod bounce;
pub mod compositor;
pub mod config;
pub mod easing;
pub mod engine;
pub mod math;
pub mod pointer;
pub mod tilt;
pub mod tween;

pub use boundary::BoundaryTracker;
pub use bounce::{BounceController, Direction, Velocity};
pub use compositor::{compose, Composite, FloatState};
pub use config::{BounceConfig, FloatConfig, OriginMode, SkewSign, TiltConfig};
pub use easing::Easing;
pub use engine::{FrameHandle, MotionEngine, MotionId};
pub use pointer::PointerSmoother;
pub use tilt::TiltController;
pub use tween::Tween;
