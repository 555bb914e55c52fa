//! Motion engine
//!
//! Owns every attached motion object and advances them once per frame.
//! Each object exclusively owns its own state; the engine only routes host
//! events to them and hands their transforms to a render sink.
//!
//! Attaching returns a [`FrameHandle`]. Cancelling the handle (or calling
//! [`MotionEngine::detach`]) stops all further ticks for that object; a
//! cancelled object is purged before the next frame runs and never writes
//! to the sink again.

use crate::boundary::BoundaryTracker;
use crate::bounce::BounceController;
use crate::compositor::{compose, FloatState};
use crate::config::{BounceConfig, FloatConfig, TiltConfig};
use crate::pointer::PointerSmoother;
use crate::tilt::TiltController;
use kinetic_core::events::event_types;
use kinetic_core::{
    Container, ElementId, Event, EventData, Host, MotionError, RenderSink, Result, Vec2,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, trace};

new_key_type! {
    /// Identifier of an attached motion object
    pub struct MotionId;
}

/// Cancellable registration of one object's per-frame callback
#[derive(Clone, Debug)]
pub struct FrameHandle {
    id: MotionId,
    cancelled: Arc<AtomicBool>,
}

impl FrameHandle {
    pub fn id(&self) -> MotionId {
        self.id
    }

    /// Stop scheduling further ticks for this object
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

struct BounceObject {
    root: ElementId,
    tracker: BoundaryTracker,
    controller: BounceController,
}

struct FloatObject {
    root: ElementId,
    children: SmallVec<[ElementId; 4]>,
    config: FloatConfig,
    smoother: PointerSmoother,
}

enum MotionKind {
    Bounce(BounceObject),
    Float(FloatObject),
    Tilt(TiltController),
}

struct MotionEntry {
    kind: MotionKind,
    cancelled: Arc<AtomicBool>,
}

impl MotionEntry {
    fn is_live(&self) -> bool {
        !self.cancelled.load(Ordering::Acquire)
    }
}

/// The engine that ticks all attached motion objects
pub struct MotionEngine {
    objects: SlotMap<MotionId, MotionEntry>,
    /// Float objects that react to pointer enter/leave, by root element
    hover_targets: FxHashMap<ElementId, SmallVec<[MotionId; 1]>>,
    rng: ChaCha8Rng,
    /// Time of the previous wall-clock tick; `None` until the first one
    last_frame: Option<Instant>,
    trusted_origin: Option<String>,
    scroll_progress: Option<f32>,
}

impl MotionEngine {
    pub fn new() -> Self {
        Self::with_rng(ChaCha8Rng::from_os_rng())
    }

    /// Deterministic engine for reproducible simulations
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(rng: ChaCha8Rng) -> Self {
        Self {
            objects: SlotMap::with_key(),
            hover_targets: FxHashMap::default(),
            rng,
            last_frame: None,
            trusted_origin: None,
            scroll_progress: None,
        }
    }

    /// Accept cross-frame messages from this origin only
    pub fn with_trusted_origin(mut self, origin: impl Into<String>) -> Self {
        self.trusted_origin = Some(origin.into());
        self
    }

    fn insert(&mut self, kind: MotionKind) -> FrameHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let id = self.objects.insert(MotionEntry {
            kind,
            cancelled: cancelled.clone(),
        });
        FrameHandle { id, cancelled }
    }

    /// Attach an autonomous bouncing object confined to `container`
    pub fn attach_bounce(
        &mut self,
        host: &dyn Host,
        root: ElementId,
        container: Container,
        config: BounceConfig,
    ) -> Result<FrameHandle> {
        let tracker = BoundaryTracker::bind(host, root, container)?;
        let bounds = tracker.compute_bounds(host).ok_or(match container {
            Container::Element(id) => MotionError::MissingContainer(id),
            Container::Viewport => MotionError::MissingElement(root),
        })?;
        let size = tracker
            .compute_size(host)
            .ok_or(MotionError::MissingElement(root))?;

        let controller = BounceController::new(config, bounds, size, &mut self.rng);
        let handle = self.insert(MotionKind::Bounce(BounceObject {
            root,
            tracker,
            controller,
        }));
        debug!(id = ?handle.id, ?root, ?container, "attached bounce object");
        Ok(handle)
    }

    /// Attach a pointer-driven float object; `children` receive counter-rotation
    pub fn attach_float(
        &mut self,
        host: &dyn Host,
        root: ElementId,
        children: impl IntoIterator<Item = ElementId>,
        config: FloatConfig,
    ) -> Result<FrameHandle> {
        let rect = host
            .element_rect(root)
            .ok_or(MotionError::MissingElement(root))?;

        let mut smoother = PointerSmoother::new(&config);
        smoother.fit(rect.center() + host.scroll_offset());

        let handle = self.insert(MotionKind::Float(FloatObject {
            root,
            children: children.into_iter().collect(),
            config,
            smoother,
        }));
        self.hover_targets.entry(root).or_default().push(handle.id);
        debug!(id = ?handle.id, ?root, "attached float object");
        Ok(handle)
    }

    /// Attach a tilt source for a 3D viewport
    pub fn attach_tilt(&mut self, config: TiltConfig) -> FrameHandle {
        let handle = self.insert(MotionKind::Tilt(TiltController::new(config)));
        debug!(id = ?handle.id, "attached tilt source");
        handle
    }

    /// Cancel the handle and release the object's state immediately
    pub fn detach(&mut self, handle: &FrameHandle) {
        handle.cancel();
        if self.remove(handle.id) {
            debug!(id = ?handle.id, "detached motion object");
        }
    }

    fn remove(&mut self, id: MotionId) -> bool {
        match self.objects.remove(id) {
            Some(entry) => {
                if let MotionKind::Float(float) = &entry.kind {
                    if let Some(ids) = self.hover_targets.get_mut(&float.root) {
                        ids.retain(|other| *other != id);
                        if ids.is_empty() {
                            self.hover_targets.remove(&float.root);
                        }
                    }
                }
                true
            }
            None => false,
        }
    }

    /// Whether `id` is still scheduled for future ticks
    pub fn is_attached(&self, id: MotionId) -> bool {
        self.objects.get(id).is_some_and(MotionEntry::is_live)
    }

    pub fn len(&self) -> usize {
        self.objects.values().filter(|e| e.is_live()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn bounce(&self, id: MotionId) -> Option<&BounceController> {
        match &self.objects.get(id)?.kind {
            MotionKind::Bounce(b) => Some(&b.controller),
            _ => None,
        }
    }

    pub fn pointer(&self, id: MotionId) -> Option<&PointerSmoother> {
        match &self.objects.get(id)?.kind {
            MotionKind::Float(f) => Some(&f.smoother),
            _ => None,
        }
    }

    pub fn tilt(&self, id: MotionId) -> Option<&TiltController> {
        match &self.objects.get(id)?.kind {
            MotionKind::Tilt(t) => Some(t),
            _ => None,
        }
    }

    /// Latest scroll progress forwarded by a parent frame
    pub fn scroll_progress(&self) -> Option<f32> {
        self.scroll_progress
    }

    /// Pause or resume a bounce object. Returns false if `id` is not one.
    pub fn set_paused(&mut self, id: MotionId, paused: bool) -> bool {
        match self.objects.get_mut(id).map(|e| &mut e.kind) {
            Some(MotionKind::Bounce(b)) => {
                b.controller.set_paused(paused);
                debug!(?id, paused, "bounce mode changed");
                true
            }
            _ => false,
        }
    }

    /// Recompute bounds, sizes and centers from live layout
    pub fn on_resize(&mut self, host: &dyn Host) {
        let scroll = host.scroll_offset();
        for (id, entry) in self.objects.iter_mut().filter(|(_, e)| e.is_live()) {
            match &mut entry.kind {
                MotionKind::Bounce(b) => {
                    match (b.tracker.compute_bounds(host), b.tracker.compute_size(host)) {
                        (Some(bounds), Some(size)) => b.controller.fit(bounds, size),
                        _ => trace!(?id, "resize skipped, element detached"),
                    }
                }
                MotionKind::Float(f) => {
                    if let Some(rect) = host.element_rect(f.root) {
                        f.smoother.fit(rect.center() + scroll);
                    }
                }
                MotionKind::Tilt(_) => {}
            }
        }
        debug!(objects = self.objects.len(), "resized");
    }

    /// Retarget every pointer-driven object
    pub fn on_pointer_move(&mut self, host: &dyn Host, client: Vec2) {
        if host.prefers_reduced_motion() {
            return;
        }
        let viewport = host.viewport_size();
        let scroll = host.scroll_offset();
        for entry in self.objects.values_mut().filter(|e| e.is_live()) {
            match &mut entry.kind {
                MotionKind::Float(f) => f.smoother.pointer_move(client, viewport, scroll),
                MotionKind::Tilt(t) => t.pointer_move(client, viewport),
                MotionKind::Bounce(_) => {}
            }
        }
    }

    pub fn on_pointer_enter(&mut self, target: ElementId) {
        self.for_each_hover_target(target, PointerSmoother::pointer_enter);
    }

    pub fn on_pointer_leave(&mut self, target: ElementId) {
        self.for_each_hover_target(target, PointerSmoother::pointer_leave);
    }

    /// Run `f` on every live float object rooted at `target`
    fn for_each_hover_target(
        &mut self,
        target: ElementId,
        mut f: impl FnMut(&mut PointerSmoother),
    ) {
        let Some(ids) = self.hover_targets.get(&target) else {
            return;
        };
        for id in ids.iter().copied() {
            let Some(entry) = self.objects.get_mut(id).filter(|e| e.is_live()) else {
                continue;
            };
            if let MotionKind::Float(float) = &mut entry.kind {
                f(&mut float.smoother);
            }
        }
    }

    /// Route a host event to the matching handler
    pub fn dispatch(&mut self, host: &dyn Host, event: &Event) {
        match (event.event_type, &event.data) {
            (event_types::POINTER_MOVE, EventData::Pointer { x, y, .. }) => {
                self.on_pointer_move(host, Vec2::new(*x, *y));
            }
            (event_types::POINTER_ENTER, _) => {
                if let Some(target) = event.target {
                    self.on_pointer_enter(target);
                }
            }
            (event_types::POINTER_LEAVE, _) => {
                if let Some(target) = event.target {
                    self.on_pointer_leave(target);
                }
            }
            (event_types::RESIZE, _) => self.on_resize(host),
            (event_types::SCROLL_PROGRESS, EventData::ScrollProgress { progress }) => {
                self.scroll_progress = Some(*progress);
            }
            _ => trace!(event_type = event.event_type, "ignored event"),
        }
    }

    /// Handle a message posted by a parent frame.
    ///
    /// Messages without a trusted origin configured, from another origin,
    /// malformed, or of an unknown type are dropped. Returns whether the
    /// message was accepted.
    pub fn handle_message(&mut self, host: &dyn Host, origin: &str, payload: &str) -> bool {
        let Some(trusted) = self.trusted_origin.as_deref() else {
            debug!(origin, "dropped message, no trusted origin configured");
            return false;
        };
        match Event::from_message(origin, trusted, payload) {
            Ok(event) => {
                self.dispatch(host, &event);
                true
            }
            Err(err) => {
                debug!(%err, "dropped message");
                false
            }
        }
    }

    /// Tick all objects using wall-clock time since the previous tick.
    ///
    /// The first tick advances by zero seconds, so time spent between
    /// construction and the first frame is never applied to tweens.
    pub fn tick(&mut self, host: &dyn Host, sink: &mut dyn RenderSink) {
        let now = Instant::now();
        let dt = self
            .last_frame
            .map_or(0.0, |last| now.duration_since(last).as_secs_f32());
        self.last_frame = Some(now);
        self.tick_with(dt, host, sink);
    }

    /// Tick all objects with an explicit timestep in seconds
    pub fn tick_with(&mut self, dt: f32, host: &dyn Host, sink: &mut dyn RenderSink) {
        self.purge_cancelled();

        for (id, entry) in self.objects.iter_mut() {
            match &mut entry.kind {
                MotionKind::Bounce(b) => {
                    if host.element_rect(b.root).is_none() {
                        trace!(?id, "bounce root detached, tick skipped");
                        continue;
                    }
                    b.controller.step();
                    sink.apply_transform(b.root, &b.controller.transform());
                }
                MotionKind::Float(f) => {
                    if host.element_rect(f.root).is_none() {
                        trace!(?id, "float root detached, tick skipped");
                        continue;
                    }
                    let current = f.smoother.advance(dt);
                    let state = FloatState {
                        current,
                        delta: f.smoother.delta(),
                        scale: f.smoother.scale(),
                    };
                    let composite = compose(&state, &f.config);
                    sink.apply_transform(f.root, &composite.root);
                    if let Some(counter) = composite.children {
                        for child in &f.children {
                            sink.apply_transform(*child, &counter);
                        }
                    }
                }
                MotionKind::Tilt(t) => sink.apply_tilt(t.step(dt)),
            }
        }
    }

    fn purge_cancelled(&mut self) {
        let cancelled: SmallVec<[MotionId; 4]> = self
            .objects
            .iter()
            .filter(|(_, e)| !e.is_live())
            .map(|(id, _)| id)
            .collect();
        for id in cancelled {
            self.remove(id);
            debug!(?id, "purged cancelled motion object");
        }
    }
}

impl Default for MotionEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinetic_core::{Rect, Size, Tilt, TransformDescriptor};

    struct Page {
        viewport: Size,
    }

    impl Host for Page {
        fn viewport_size(&self) -> Size {
            self.viewport
        }

        fn element_rect(&self, id: ElementId) -> Option<Rect> {
            (id.0 < 10).then_some(Rect::new(0.0, 0.0, 20.0, 20.0))
        }
    }

    #[derive(Default)]
    struct Frames {
        transforms: Vec<(ElementId, TransformDescriptor)>,
        tilts: Vec<Tilt>,
    }

    impl RenderSink for Frames {
        fn apply_transform(&mut self, element: ElementId, transform: &TransformDescriptor) {
            self.transforms.push((element, *transform));
        }

        fn apply_tilt(&mut self, tilt: Tilt) {
            self.tilts.push(tilt);
        }
    }

    fn page() -> Page {
        Page {
            viewport: Size::new(800.0, 600.0),
        }
    }

    #[test]
    fn test_attach_missing_root_fails() {
        let mut engine = MotionEngine::with_seed(1);
        let err = engine
            .attach_bounce(&page(), ElementId(42), Container::Viewport, BounceConfig::default())
            .unwrap_err();
        assert_eq!(err, MotionError::MissingElement(ElementId(42)));
        assert!(engine.is_empty());
    }

    #[test]
    fn test_handle_cancel_stops_ticks() {
        let host = page();
        let mut engine = MotionEngine::with_seed(1);
        let handle = engine
            .attach_bounce(&host, ElementId(1), Container::Viewport, BounceConfig::default())
            .unwrap();

        let mut frames = Frames::default();
        engine.tick_with(1.0 / 60.0, &host, &mut frames);
        assert_eq!(frames.transforms.len(), 1);

        handle.cancel();
        assert!(!engine.is_attached(handle.id()));
        engine.tick_with(1.0 / 60.0, &host, &mut frames);
        engine.tick_with(1.0 / 60.0, &host, &mut frames);
        assert_eq!(frames.transforms.len(), 1);
        assert!(engine.bounce(handle.id()).is_none());
    }

    #[test]
    fn test_seeded_engines_agree() {
        let host = page();
        let mut a = MotionEngine::with_seed(9);
        let mut b = MotionEngine::with_seed(9);
        let ha = a
            .attach_bounce(&host, ElementId(1), Container::Viewport, BounceConfig::default())
            .unwrap();
        let hb = b
            .attach_bounce(&host, ElementId(1), Container::Viewport, BounceConfig::default())
            .unwrap();
        assert_eq!(
            a.bounce(ha.id()).unwrap().position(),
            b.bounce(hb.id()).unwrap().position()
        );
    }

    #[test]
    fn test_tilt_delivered_each_frame() {
        let host = page();
        let mut engine = MotionEngine::with_seed(1);
        engine.attach_tilt(TiltConfig::default());

        let mut frames = Frames::default();
        for _ in 0..3 {
            engine.tick_with(1.0 / 60.0, &host, &mut frames);
        }
        assert_eq!(frames.tilts.len(), 3);
        assert!(frames.tilts[2].spin > frames.tilts[0].spin);
    }

    #[test]
    fn test_set_paused_only_for_bounce() {
        let host = page();
        let mut engine = MotionEngine::with_seed(1);
        let bounce = engine
            .attach_bounce(&host, ElementId(1), Container::Viewport, BounceConfig::default())
            .unwrap();
        let tilt = engine.attach_tilt(TiltConfig::default());

        assert!(engine.set_paused(bounce.id(), true));
        assert!(engine.bounce(bounce.id()).unwrap().is_paused());
        assert!(!engine.set_paused(tilt.id(), true));
    }

    #[test]
    fn test_hover_reaches_every_float_on_shared_root() {
        let host = page();
        let mut engine = MotionEngine::with_seed(1);
        let config = FloatConfig {
            scale_on_hover: true,
            ..FloatConfig::default()
        };
        let first = engine
            .attach_float(&host, ElementId(3), [], config.clone())
            .unwrap();
        let second = engine
            .attach_float(&host, ElementId(3), [], config)
            .unwrap();

        engine.on_pointer_enter(ElementId(3));
        assert_eq!(engine.pointer(first.id()).unwrap().scale(), 1.5);
        assert_eq!(engine.pointer(second.id()).unwrap().scale(), 1.5);
        engine.on_pointer_leave(ElementId(3));

        // Detaching one float leaves the other routed
        second.cancel();
        engine.tick_with(1.0 / 60.0, &host, &mut Frames::default());
        assert!(engine.pointer(second.id()).is_none());

        engine.on_pointer_enter(ElementId(3));
        let remaining = engine.pointer(first.id()).unwrap();
        assert!(remaining.is_hovered());
        assert_eq!(remaining.scale(), 1.5);
    }

    #[test]
    fn test_first_wall_clock_tick_does_not_advance() {
        let host = page();
        let mut engine = MotionEngine::with_seed(1);
        let config = FloatConfig {
            duration: 0.05,
            ..FloatConfig::default()
        };
        let handle = engine.attach_float(&host, ElementId(1), [], config).unwrap();
        engine.on_pointer_move(&host, Vec2::new(400.0, 300.0));

        std::thread::sleep(std::time::Duration::from_millis(100));
        let mut frames = Frames::default();
        engine.tick(&host, &mut frames);
        assert_eq!(frames.transforms.len(), 1);
        assert_eq!(engine.pointer(handle.id()).unwrap().current(), Vec2::ZERO);

        std::thread::sleep(std::time::Duration::from_millis(10));
        engine.tick(&host, &mut frames);
        assert_ne!(engine.pointer(handle.id()).unwrap().current(), Vec2::ZERO);
    }
}
