// sim/ - Ember particle simulation
//
// One Simulation per mount. It owns the particle set and the pointer
// snapshot; the scene passes it by reference to step and render.

mod particle;

pub use particle::{Particle, Particles};

use rand::Rng;

use crate::color::Palette;
use crate::input::InputTracker;
use crate::world::Viewport;

// Fixed particle count; not configurable at runtime.
pub const PARTICLE_COUNT: usize = 60;

// Physics constants
pub const ATTRACTION_RADIUS: f32 = 200.0;
pub const ATTRACTION_STRENGTH: f32 = 0.00005;
pub const MAX_SPEED: f32 = 1.0;
pub const INITIAL_SPEED: f32 = 0.25; // per axis, either direction

// Appearance ranges (min inclusive, max exclusive)
pub const RADIUS_MIN: f32 = 1.0;
pub const RADIUS_MAX: f32 = 3.0;
pub const ALPHA_MIN: f32 = 0.2;
pub const ALPHA_MAX: f32 = 0.7;

/// Per-mount simulation state
#[derive(Debug)]
pub struct Simulation {
    particles: Particles,
    input: InputTracker,
    frames: u64,
}

impl Simulation {
    pub fn new<R: Rng>(viewport: Viewport, palette: &Palette, rng: &mut R) -> Self {
        Self {
            particles: Particles::initialize(PARTICLE_COUNT, viewport, palette, rng),
            input: InputTracker::new(),
            frames: 0,
        }
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.input.pointer_moved(x, y);
    }

    /// Advance one frame against the current viewport
    pub fn step(&mut self, viewport: Viewport) {
        self.particles.step(self.input.pointer(), viewport);
        self.frames += 1;
    }

    pub fn particles(&self) -> &Particles {
        &self.particles
    }

    pub fn input(&self) -> &InputTracker {
        &self.input
    }

    /// Steps taken since mount
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
