//! Trace color palette shared by the viewer and the static renderer.

use egui::Color32;
use plotters::style::RGBColor;

/// A named RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedColor {
    pub name: &'static str,
    pub rgb: (u8, u8, u8),
}

impl NamedColor {
    const fn new(name: &'static str, r: u8, g: u8, b: u8) -> Self {
        Self {
            name,
            rgb: (r, g, b),
        }
    }

    pub fn to_color32(self) -> Color32 {
        let (r, g, b) = self.rgb;
        Color32::from_rgb(r, g, b)
    }

    pub fn to_rgb_color(self) -> RGBColor {
        let (r, g, b) = self.rgb;
        RGBColor(r, g, b)
    }
}

const TEAL: NamedColor = NamedColor::new("teal", 0, 128, 128);
const BROWN: NamedColor = NamedColor::new("brown", 165, 42, 42);
const BLUE: NamedColor = NamedColor::new("blue", 0, 0, 255);
const GREEN: NamedColor = NamedColor::new("green", 0, 128, 0);
const MAROON: NamedColor = NamedColor::new("maroon", 128, 0, 0);

pub const PALETTE: [NamedColor; 10] = [
    TEAL, BROWN, BLUE, GREEN, MAROON, TEAL, BROWN, BLUE, GREEN, MAROON,
];

/// Color for the trace at `index`, wrapping around for wide tables.
pub fn color_at(index: usize) -> NamedColor {
    PALETTE[index % PALETTE.len()]
}
