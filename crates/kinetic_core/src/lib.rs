//! Kinetic Core
//!
//! Foundational types for the Kinetic motion engine:
//!
//! - **Geometry**: vectors, sizes, rects and container bounds
//! - **Host capabilities**: layout queries and render sinks injected into the engine
//! - **Transforms**: the descriptors the engine hands to render sinks
//! - **Events**: pointer/resize/scroll notifications and cross-frame message decoding
//! - **State Machines**: flat machines for running/paused and hover modes
//!
//! # Example
//!
//! ```rust
//! use kinetic_core::{ContainerBounds, PropertySet, Size, TransformProperty};
//!
//! let bounds = ContainerBounds::viewport(Size::new(1280.0, 720.0));
//! assert_eq!(bounds.right, 1280.0);
//!
//! let props = PropertySet::from_names(["rotation", "x", "rotation", "opacity"]);
//! assert_eq!(props.iter().collect::<Vec<_>>(), [TransformProperty::Rotation, TransformProperty::X]);
//! ```

pub mod error;
pub mod events;
pub mod fsm;
pub mod geometry;
pub mod host;
pub mod transform;

pub use error::{MotionError, Result};
pub use events::{Event, EventData, EventType, MessageError};
pub use fsm::{EventId, StateId, StateMachine, Transition};
pub use geometry::{ContainerBounds, Rect, Size, Vec2};
pub use host::{Container, ElementId, Host, RenderSink};
pub use transform::{PropertySet, Tilt, TransformDescriptor, TransformProperty};
