//! Headless host and JSON-lines render sink

use crate::config::SceneConfig;
use kinetic_core::{ElementId, Host, Rect, RenderSink, Size, Tilt, TransformDescriptor, Vec2};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Static page layout read from a scene file
pub struct SceneHost {
    viewport: Size,
    scroll: Vec2,
    reduced_motion: bool,
    rects: BTreeMap<ElementId, Rect>,
}

impl SceneHost {
    pub fn from_scene(scene: &SceneConfig) -> Self {
        Self {
            viewport: Size::new(scene.viewport.width, scene.viewport.height),
            scroll: scene.viewport.scroll,
            reduced_motion: scene.viewport.reduced_motion,
            rects: scene.elements.iter().map(|e| (e.id, e.rect)).collect(),
        }
    }
}

impl Host for SceneHost {
    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn scroll_offset(&self) -> Vec2 {
        self.scroll
    }

    fn element_rect(&self, id: ElementId) -> Option<Rect> {
        self.rects.get(&id).copied()
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum Line<'a> {
    Transform {
        frame: u32,
        element: ElementId,
        transform: &'a TransformDescriptor,
    },
    Tilt {
        frame: u32,
        tilt: Tilt,
    },
}

/// Writes one JSON object per applied transform or tilt.
///
/// [`RenderSink`] cannot fail, so the first write error is held until
/// [`JsonLinesSink::end_frame`].
pub struct JsonLinesSink<W: Write> {
    out: W,
    frame: u32,
    lines: usize,
    error: Option<io::Error>,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            frame: 0,
            lines: 0,
            error: None,
        }
    }

    pub fn begin_frame(&mut self, frame: u32) {
        self.frame = frame;
    }

    /// Flush the frame and surface any write error
    pub fn end_frame(&mut self) -> io::Result<()> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()
    }

    /// Number of lines written so far
    pub fn lines(&self) -> usize {
        self.lines
    }

    fn write_line(&mut self, line: &Line<'_>) {
        if self.error.is_some() {
            return;
        }
        let result = serde_json::to_writer(&mut self.out, line)
            .map_err(io::Error::from)
            .and_then(|()| self.out.write_all(b"\n"));
        match result {
            Ok(()) => self.lines += 1,
            Err(err) => self.error = Some(err),
        }
    }
}

impl<W: Write> RenderSink for JsonLinesSink<W> {
    fn apply_transform(&mut self, element: ElementId, transform: &TransformDescriptor) {
        let frame = self.frame;
        self.write_line(&Line::Transform {
            frame,
            element,
            transform,
        });
    }

    fn apply_tilt(&mut self, tilt: Tilt) {
        let frame = self.frame;
        self.write_line(&Line::Tilt { frame, tilt });
    }
}
