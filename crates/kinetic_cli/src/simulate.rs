//! Headless scene simulation

use crate::config::{PointerKind, PointerStep, SceneConfig};
use crate::host::{JsonLinesSink, SceneHost};
use anyhow::{Context, Result};
use kinetic_animation::MotionEngine;
use kinetic_core::Event;
use std::io::Write;
use tracing::{debug, info, warn};

/// Fixed-step simulation settings
#[derive(Clone, Copy, Debug)]
pub struct RunOptions {
    pub frames: u32,
    /// Seconds per frame
    pub dt: f32,
    /// Overrides the scene seed
    pub seed: Option<u64>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub objects: usize,
    pub frames: u32,
    pub lines: usize,
    pub messages_accepted: usize,
}

/// Attach every scene object and tick `options.frames` frames into `out`
pub fn run<W: Write>(scene: &SceneConfig, options: RunOptions, out: W) -> Result<RunSummary> {
    let host = SceneHost::from_scene(scene);
    let seed = options.seed.or(scene.seed).unwrap_or_default();
    let mut engine = MotionEngine::with_seed(seed);
    if let Some(origin) = &scene.trusted_origin {
        engine = engine.with_trusted_origin(origin.clone());
    }

    for object in &scene.bounce {
        engine
            .attach_bounce(&host, object.element, object.container, object.config.clone())
            .with_context(|| format!("Failed to attach bounce object {:?}", object.element))?;
    }
    for object in &scene.float {
        engine
            .attach_float(
                &host,
                object.element,
                object.children.iter().copied(),
                object.config.clone(),
            )
            .with_context(|| format!("Failed to attach float object {:?}", object.element))?;
    }
    for config in &scene.tilt {
        engine.attach_tilt(config.clone());
    }

    let objects = engine.len();
    info!(objects, frames = options.frames, dt = options.dt, seed, "running scene");

    let mut sink = JsonLinesSink::new(out);
    let mut messages_accepted = 0;
    for frame in 0..options.frames {
        for step in scene.pointer.iter().filter(|s| s.frame == frame) {
            match pointer_event(step) {
                Some(event) => engine.dispatch(&host, &event),
                None => warn!(frame, kind = ?step.kind, "pointer step without target skipped"),
            }
        }
        for message in scene.message.iter().filter(|m| m.frame == frame) {
            if engine.handle_message(&host, &message.origin, &message.data) {
                messages_accepted += 1;
            }
        }

        sink.begin_frame(frame);
        engine.tick_with(options.dt, &host, &mut sink);
        sink.end_frame()
            .with_context(|| format!("Failed to write frame {frame}"))?;
    }

    let summary = RunSummary {
        objects,
        frames: options.frames,
        lines: sink.lines(),
        messages_accepted,
    };
    debug!(?summary, "scene finished");
    Ok(summary)
}

fn pointer_event(step: &PointerStep) -> Option<Event> {
    match step.kind {
        PointerKind::Move => Some(Event::pointer_move(step.x, step.y)),
        PointerKind::Enter => step.target.map(Event::pointer_enter),
        PointerKind::Leave => step.target.map(Event::pointer_leave),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r#"
        seed = 3
        trusted_origin = "https://parent.test"

        [viewport]
        width = 800.0
        height = 600.0

        [[element]]
        id = 1
        rect = { x = 0.0, y = 0.0, width = 200.0, height = 200.0 }

        [[element]]
        id = 2
        rect = { x = 20.0, y = 20.0, width = 20.0, height = 20.0 }

        [[element]]
        id = 3
        rect = { x = 300.0, y = 200.0, width = 200.0, height = 200.0 }

        [[element]]
        id = 4
        rect = { x = 320.0, y = 220.0, width = 50.0, height = 20.0 }

        [[bounce]]
        element = 2
        container = { kind = "element", id = 1 }
        speed_x = 1.0
        speed_y = 1.0

        [[float]]
        element = 3
        children = [4]

        [[tilt]]

        [[pointer]]
        frame = 0
        kind = "move"
        x = 600.0
        y = 100.0

        [[message]]
        frame = 2
        origin = "https://parent.test"
        data = '{"type":"pointermove","clientX":100,"clientY":500}'

        [[message]]
        frame = 2
        origin = "https://evil.test"
        data = '{"type":"pointermove","clientX":0,"clientY":0}'
    "#;

    fn options(frames: u32) -> RunOptions {
        RunOptions {
            frames,
            dt: 1.0 / 60.0,
            seed: None,
        }
    }

    #[test]
    fn test_run_emits_lines_per_frame() {
        let scene = SceneConfig::parse(SCENE).unwrap();
        let mut out = Vec::new();
        let summary = run(&scene, options(5), &mut out).unwrap();

        // bounce + float root + one child + tilt
        assert_eq!(summary.objects, 3);
        assert_eq!(summary.lines, 5 * 4);
        assert_eq!(summary.messages_accepted, 1);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), summary.lines);
        for line in text.lines() {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value["frame"].as_u64().unwrap() < 5);
        }
    }

    #[test]
    fn test_same_seed_same_output() {
        let scene = SceneConfig::parse(SCENE).unwrap();
        let mut a = Vec::new();
        let mut b = Vec::new();
        run(&scene, options(20), &mut a).unwrap();
        run(&scene, options(20), &mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_element_fails_attach() {
        let scene = SceneConfig::parse(
            r#"
            [[float]]
            element = 42
            "#,
        )
        .unwrap();
        let err = run(&scene, options(1), Vec::new()).unwrap_err();
        assert!(err.to_string().contains("float object"));
    }
}
