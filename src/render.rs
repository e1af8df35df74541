// render.rs - Paint one frame of the ember field
//
// Frame order:
//   1. trail fade   - low-alpha full-viewport fill, not a clear
//   2. particles    - filled circles
//   3. connections  - lines between particles closer than CONNECTION_RADIUS
//   4. alpha reset  - so the frame's opacity never leaks into other draws

use crate::color::Color;
use crate::sim::Particle;
use crate::world::Viewport;

pub const TRAIL_COLOR: Color = Color::from_rgb(5, 5, 5);
pub const TRAIL_ALPHA: f32 = 0.15;

pub const CONNECTION_RADIUS: f32 = 150.0;
pub const CONNECTION_ALPHA: f32 = 0.15;
pub const CONNECTION_WIDTH: f32 = 0.5;

/// 2D drawing surface. Every primitive takes its own opacity.
pub trait Surface {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color, alpha: f32);
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color, alpha: f32);
    fn stroke_line(
        &mut self,
        from: (f32, f32),
        to: (f32, f32),
        color: Color,
        width: f32,
        alpha: f32,
    );
    /// Restore global opacity to 1
    fn reset_alpha(&mut self);
    /// Match the backing store to the viewport
    fn resize(&mut self, viewport: Viewport);
}

/// Opacity of a connection line, `None` when the pair is too far apart
#[inline]
pub fn connection_alpha(distance: f32) -> Option<f32> {
    if distance < CONNECTION_RADIUS {
        Some((1.0 - distance / CONNECTION_RADIUS) * CONNECTION_ALPHA)
    } else {
        None
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Renderer {
    trail: Color,
}

impl Renderer {
    pub fn new(trail: Color) -> Self {
        Self { trail }
    }

    pub fn render_frame<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        particles: &[Particle],
        viewport: Viewport,
    ) {
        surface.fill_rect(0.0, 0.0, viewport.width, viewport.height, self.trail, TRAIL_ALPHA);

        for p in particles {
            surface.fill_circle(p.x, p.y, p.radius(), p.color(), p.alpha());
        }

        // O(n^2) every frame; fine for a few dozen particles.
        for (i, a) in particles.iter().enumerate() {
            for b in &particles[i + 1..] {
                let Some(alpha) = connection_alpha(a.distance_to(b.x, b.y)) else {
                    continue;
                };
                surface.stroke_line((a.x, a.y), (b.x, b.y), a.color(), CONNECTION_WIDTH, alpha);
            }
        }

        surface.reset_alpha();
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(TRAIL_COLOR)
    }
}
