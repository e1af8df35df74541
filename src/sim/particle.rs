// particle.rs - Ember particles
//
// Fixed-size set: every particle is created at mount and lives until unmount.
// Only position and velocity change after creation.

use rand::Rng;

use super::{
    ALPHA_MAX, ALPHA_MIN, ATTRACTION_RADIUS, ATTRACTION_STRENGTH, INITIAL_SPEED, MAX_SPEED,
    RADIUS_MAX, RADIUS_MIN,
};
use crate::color::{Color, Palette};
use crate::input::PointerState;
use crate::world::Viewport;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    // Position
    pub x: f32,
    pub y: f32,

    // Velocity (per frame)
    pub vx: f32,
    pub vy: f32,

    // Appearance, fixed at creation
    radius: f32,
    color: Color,
    alpha: f32,
}

impl Particle {
    pub fn new(x: f32, y: f32, vx: f32, vy: f32, radius: f32, color: Color, alpha: f32) -> Self {
        Self { x, y, vx, vy, radius, color, alpha }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    #[inline]
    pub fn distance_to(&self, x: f32, y: f32) -> f32 {
        let dx = x - self.x;
        let dy = y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    fn spawn<R: Rng>(viewport: Viewport, palette: &Palette, rng: &mut R) -> Self {
        Self {
            x: rng.random::<f32>() * viewport.width.max(0.0),
            y: rng.random::<f32>() * viewport.height.max(0.0),
            vx: (rng.random::<f32>() - 0.5) * INITIAL_SPEED * 2.0,
            vy: (rng.random::<f32>() - 0.5) * INITIAL_SPEED * 2.0,
            radius: rng.random_range(RADIUS_MIN..RADIUS_MAX),
            color: palette.get(rng.random_range(0..palette.len())),
            alpha: rng.random_range(ALPHA_MIN..ALPHA_MAX),
        }
    }

    /// Advance one frame: attract, integrate, reflect, clamp.
    #[inline]
    fn update(&mut self, pointer: PointerState, viewport: Viewport) {
        // Pointer pull uses the raw displacement, so it grows with distance
        // and cuts off at the radius.
        let dx = pointer.x - self.x;
        let dy = pointer.y - self.y;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist < ATTRACTION_RADIUS {
            self.vx += dx * ATTRACTION_STRENGTH;
            self.vy += dy * ATTRACTION_STRENGTH;
        }

        self.x += self.vx;
        self.y += self.vy;

        // Checked every frame, not on crossing: a particle still outside
        // after a flip is flipped again.
        if viewport.outside_x(self.x) {
            self.vx = -self.vx;
        }
        if viewport.outside_y(self.y) {
            self.vy = -self.vy;
        }

        self.vx = self.vx.clamp(-MAX_SPEED, MAX_SPEED);
        self.vy = self.vy.clamp(-MAX_SPEED, MAX_SPEED);
    }
}

/// The particle set of one mount.
#[derive(Clone, Debug)]
pub struct Particles {
    list: Vec<Particle>,
}

impl Particles {
    /// Create `count` particles with independent random attributes
    pub fn initialize<R: Rng>(
        count: usize,
        viewport: Viewport,
        palette: &Palette,
        rng: &mut R,
    ) -> Self {
        let list = (0..count)
            .map(|_| Particle::spawn(viewport, palette, rng))
            .collect();
        Self { list }
    }

    pub fn from_vec(list: Vec<Particle>) -> Self {
        Self { list }
    }

    /// Move every particle one frame in place
    pub fn step(&mut self, pointer: PointerState, viewport: Viewport) {
        for p in &mut self.list {
            p.update(pointer, viewport);
        }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.list
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.list.iter()
    }
}
