// viewport.rs - Viewport size and bounds queries
//
// Coordinates are CSS pixels with the origin at the top-left corner.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when x lies left of 0 or right of the width.
    /// A point exactly on an edge is inside.
    #[inline]
    pub fn outside_x(&self, x: f32) -> bool {
        x < 0.0 || x > self.width
    }

    #[inline]
    pub fn outside_y(&self, y: f32) -> bool {
        y < 0.0 || y > self.height
    }

    /// Surface size in whole device pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width.max(0.0) as u32, self.height.max(0.0) as u32)
    }
}
