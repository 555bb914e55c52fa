//! Host capabilities consumed by the motion engine
//!
//! The engine never touches a document tree or a renderer directly. A host
//! answers layout queries ([`Host`]) and a sink receives the results
//! ([`RenderSink`]). Both are injected at every call site that needs them.

use crate::geometry::{ContainerBounds, Rect, Size, Vec2};
use crate::transform::{Tilt, TransformDescriptor};
use serde::{Deserialize, Serialize};

/// Opaque handle for an element owned by the host
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u64);

/// Layout queries answered by the host
pub trait Host {
    /// Current viewport (window inner) size
    fn viewport_size(&self) -> Size;

    /// Current page scroll offset
    fn scroll_offset(&self) -> Vec2 {
        Vec2::ZERO
    }

    /// Live viewport-relative bounding rect, or `None` if the element is
    /// not attached
    fn element_rect(&self, id: ElementId) -> Option<Rect>;

    /// Whether the user asked for reduced motion
    fn prefers_reduced_motion(&self) -> bool {
        false
    }
}

/// Receives computed transforms and paints them
pub trait RenderSink {
    fn apply_transform(&mut self, element: ElementId, transform: &TransformDescriptor);

    /// Tilt for a 3D viewport collaborator
    fn apply_tilt(&mut self, _tilt: Tilt) {}
}

/// What a bounded object is confined to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "id")]
pub enum Container {
    #[default]
    Viewport,
    Element(ElementId),
}

impl Container {
    /// Compute live bounds, `None` if the container element is gone
    pub fn bounds(&self, host: &dyn Host) -> Option<ContainerBounds> {
        match self {
            Container::Viewport => Some(ContainerBounds::viewport(host.viewport_size())),
            Container::Element(id) => host.element_rect(*id).map(ContainerBounds::from_rect),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OneElement;

    impl Host for OneElement {
        fn viewport_size(&self) -> Size {
            Size::new(800.0, 600.0)
        }

        fn element_rect(&self, id: ElementId) -> Option<Rect> {
            (id == ElementId(1)).then_some(Rect::new(10.0, 10.0, 100.0, 50.0))
        }
    }

    #[test]
    fn test_container_bounds() {
        let host = OneElement;
        assert_eq!(
            Container::Viewport.bounds(&host),
            Some(ContainerBounds::viewport(Size::new(800.0, 600.0)))
        );
        let el = Container::Element(ElementId(1)).bounds(&host).unwrap();
        assert_eq!((el.right, el.bottom), (110.0, 60.0));
        assert_eq!(Container::Element(ElementId(2)).bounds(&host), None);
    }
}
