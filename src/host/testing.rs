// testing.rs - In-memory host and surface for unit tests

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use super::{FrameRequest, Host, HostError, Listener, OrbLoop, Subscription};
use crate::color::Color;
use crate::orbs::OrbField;
use crate::render::Surface;
use crate::world::Viewport;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawOp {
    Rect { x: f32, y: f32, w: f32, h: f32, color: Color, alpha: f32 },
    Circle { x: f32, y: f32, radius: f32, color: Color, alpha: f32 },
    Line { from: (f32, f32), to: (f32, f32), color: Color, width: f32, alpha: f32 },
    ResetAlpha,
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
    pub sizes: Vec<Viewport>,
}

impl RecordingSurface {
    pub fn line_alphas(&self) -> Vec<f32> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Line { alpha, .. } => Some(*alpha),
                _ => None,
            })
            .collect()
    }

    pub fn rects(&self) -> Vec<DrawOp> {
        self.ops.iter().copied().filter(|op| matches!(op, DrawOp::Rect { .. })).collect()
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color, alpha: f32) {
        self.ops.push(DrawOp::Rect { x, y, w, h, color, alpha });
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color, alpha: f32) {
        self.ops.push(DrawOp::Circle { x, y, radius, color, alpha });
    }

    fn stroke_line(
        &mut self,
        from: (f32, f32),
        to: (f32, f32),
        color: Color,
        width: f32,
        alpha: f32,
    ) {
        self.ops.push(DrawOp::Line { from, to, color, width, alpha });
    }

    fn reset_alpha(&mut self) {
        self.ops.push(DrawOp::ResetAlpha);
    }

    fn resize(&mut self, viewport: Viewport) {
        self.sizes.push(viewport);
    }
}

/// Surface whose recording outlives the scene that owns it
#[derive(Clone, Debug, Default)]
pub struct SharedSurface(pub Rc<RefCell<RecordingSurface>>);

impl Surface for SharedSurface {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color, alpha: f32) {
        self.0.borrow_mut().fill_rect(x, y, w, h, color, alpha);
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color, alpha: f32) {
        self.0.borrow_mut().fill_circle(x, y, radius, color, alpha);
    }

    fn stroke_line(
        &mut self,
        from: (f32, f32),
        to: (f32, f32),
        color: Color,
        width: f32,
        alpha: f32,
    ) {
        self.0.borrow_mut().stroke_line(from, to, color, width, alpha);
    }

    fn reset_alpha(&mut self) {
        self.0.borrow_mut().reset_alpha();
    }

    fn resize(&mut self, viewport: Viewport) {
        self.0.borrow_mut().resize(viewport);
    }
}

/// Host call that should fail
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailAt {
    Subscribe(Listener),
    RequestFrame,
    StartOrbs,
}

/// Counts every registration and its teardown
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Ledger {
    pub subscribed: usize,
    pub unsubscribed: usize,
    pub frames_requested: usize,
    pub frames_cancelled: usize,
    pub orbs_started: usize,
    pub orbs_stopped: usize,
}

#[derive(Debug)]
pub struct FakeHost {
    pub viewport: Viewport,
    pub has_surface: bool,
    pub fail_at: Option<FailAt>,
    pub surface: SharedSurface,
    pub ledger: Ledger,
    listeners: HashMap<u32, Listener>,
    frames: HashSet<i32>,
    orbs: HashSet<i32>,
    next_id: i32,
}

impl FakeHost {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Viewport::new(width, height),
            has_surface: true,
            fail_at: None,
            surface: SharedSurface::default(),
            ledger: Ledger::default(),
            listeners: HashMap::new(),
            frames: HashSet::new(),
            orbs: HashSet::new(),
            next_id: 1,
        }
    }

    pub fn without_surface(mut self) -> Self {
        self.has_surface = false;
        self
    }

    fn next_id(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn check(&self, at: FailAt) -> Result<(), HostError> {
        if self.fail_at == Some(at) {
            return Err(HostError::Js(format!("{at:?} rejected")));
        }
        Ok(())
    }

    pub fn is_listening(&self, listener: Listener) -> bool {
        self.listeners.values().any(|l| *l == listener)
    }

    pub fn active_listeners(&self) -> usize {
        self.listeners.len()
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn running_orbs(&self) -> usize {
        self.orbs.len()
    }

    /// Deliver the pending frame callback, as the browser would.
    /// Returns false when nothing was scheduled.
    pub fn fire_frame(&mut self) -> bool {
        let Some(&id) = self.frames.iter().next() else {
            return false;
        };
        self.frames.remove(&id);
        true
    }

    pub fn draw_count(&self) -> usize {
        self.surface.0.borrow().ops.len()
    }
}

impl Host for FakeHost {
    type Surface = SharedSurface;

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn acquire_surface(&mut self) -> Option<SharedSurface> {
        self.has_surface.then(|| self.surface.clone())
    }

    fn subscribe(&mut self, listener: Listener) -> Result<Subscription, HostError> {
        self.check(FailAt::Subscribe(listener))?;
        let id = self.next_id() as u32;
        self.listeners.insert(id, listener);
        self.ledger.subscribed += 1;
        Ok(Subscription::new(listener, id))
    }

    fn unsubscribe(&mut self, subscription: Subscription) -> Result<(), HostError> {
        self.listeners
            .remove(&subscription.id())
            .ok_or(HostError::Missing("subscription"))?;
        self.ledger.unsubscribed += 1;
        Ok(())
    }

    fn request_frame(&mut self) -> Result<FrameRequest, HostError> {
        self.check(FailAt::RequestFrame)?;
        let id = self.next_id();
        self.frames.insert(id);
        self.ledger.frames_requested += 1;
        Ok(FrameRequest(id))
    }

    fn cancel_frame(&mut self, request: FrameRequest) -> Result<(), HostError> {
        // Cancelling an already delivered request is harmless, like the browser
        self.frames.remove(&request.0);
        self.ledger.frames_cancelled += 1;
        Ok(())
    }

    fn start_orbs(&mut self, _orbs: OrbField) -> Result<OrbLoop, HostError> {
        self.check(FailAt::StartOrbs)?;
        let id = self.next_id();
        self.orbs.insert(id);
        self.ledger.orbs_started += 1;
        Ok(OrbLoop(id))
    }

    fn stop_orbs(&mut self, orbs: OrbLoop) -> Result<(), HostError> {
        self.orbs.remove(&orbs.0).then_some(()).ok_or(HostError::Missing("orb loop"))?;
        self.ledger.orbs_stopped += 1;
        Ok(())
    }
}
