// color.rs - Colors and the particle palette
//
// Colors are stored as 8-bit RGB. Opacity is never part of a color; it is
// passed per draw call so the same palette entry can be painted at any alpha.

use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::from_rgb(0xFF, 0xFF, 0xFF);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// CSS hex notation, e.g. `#ff6b35`
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Non-empty set of colors particles are drawn from.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Orange embers plus a white spark
    pub fn embers() -> Self {
        Self {
            colors: vec![
                Color::from_rgb(0xFF, 0x6B, 0x35),
                Color::from_rgb(0xFF, 0x8C, 0x42),
                Color::from_rgb(0xE8, 0x5D, 0x04),
                Color::from_rgb(0xFF, 0xB3, 0x47),
                Color::WHITE,
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Color at `idx`, wrapping around the palette
    pub fn get(&self, idx: usize) -> Color {
        self.colors[idx % self.colors.len()]
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::embers()
    }
}
