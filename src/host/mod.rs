// host/ - Boundary to the embedding environment
//
// The scene never talks to a browser directly. Everything it consumes from
// outside (viewport size, listeners, frame scheduling, the drawing surface,
// the orb scheduler) goes through `Host`.
//
// Registration handles are not Copy: each one is moved back into exactly one
// teardown call.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(test)]
pub(crate) mod testing;

use thiserror::Error;

use crate::orbs::OrbField;
use crate::render::Surface;
use crate::world::Viewport;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("missing {0}")]
    Missing(&'static str),
    #[error("javascript call failed: {0}")]
    Js(String),
    #[error("background is busy handling a callback")]
    Busy,
}

/// Host notifications the scene listens to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Listener {
    Resize,
    PointerMove,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Subscription {
    listener: Listener,
    id: u32,
}

impl Subscription {
    pub fn new(listener: Listener, id: u32) -> Self {
        Self { listener, id }
    }

    pub fn listener(&self) -> Listener {
        self.listener
    }

    pub fn id(&self) -> u32 {
        self.id
    }
}

/// Pending per-frame callback
#[derive(Debug, PartialEq, Eq)]
pub struct FrameRequest(pub i32);

/// Running orb tween scheduler
#[derive(Debug, PartialEq, Eq)]
pub struct OrbLoop(pub i32);

pub trait Host {
    type Surface: Surface;

    /// Current viewport, read fresh on every call
    fn viewport(&self) -> Viewport;

    /// `None` when the environment has no 2D drawing capability
    fn acquire_surface(&mut self) -> Option<Self::Surface>;

    fn subscribe(&mut self, listener: Listener) -> Result<Subscription, HostError>;
    fn unsubscribe(&mut self, subscription: Subscription) -> Result<(), HostError>;

    fn request_frame(&mut self) -> Result<FrameRequest, HostError>;
    fn cancel_frame(&mut self, request: FrameRequest) -> Result<(), HostError>;

    /// Start the orb tweens on a clock of the host's choosing
    fn start_orbs(&mut self, orbs: OrbField) -> Result<OrbLoop, HostError>;
    fn stop_orbs(&mut self, orbs: OrbLoop) -> Result<(), HostError>;
}
