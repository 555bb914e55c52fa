//! Boundary tracking
//!
//! Each motion object owns its own tracker. Bounds are read live from the
//! host on every call and never cached across frames.

use kinetic_core::{Container, ContainerBounds, ElementId, Host, MotionError, Result, Size};

#[derive(Clone, Copy, Debug)]
pub struct BoundaryTracker {
    container: Container,
    element: ElementId,
}

impl BoundaryTracker {
    /// Bind a tracker, failing if the container or element is not attached
    pub fn bind(host: &dyn Host, element: ElementId, container: Container) -> Result<Self> {
        if let Container::Element(id) = container {
            if host.element_rect(id).is_none() {
                return Err(MotionError::MissingContainer(id));
            }
        }
        if host.element_rect(element).is_none() {
            return Err(MotionError::MissingElement(element));
        }
        Ok(Self { container, element })
    }

    pub fn compute_bounds(&self, host: &dyn Host) -> Option<ContainerBounds> {
        self.container.bounds(host)
    }

    /// Current rendered size of the tracked element
    pub fn compute_size(&self, host: &dyn Host) -> Option<Size> {
        host.element_rect(self.element).map(|rect| rect.size())
    }
}
