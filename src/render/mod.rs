//! Drawing interface between the simulation and a rendering backend
//!
//! The simulation never touches the GPU or the DOM. It issues primitive
//! draw calls against a [`Canvas`]; backends either rasterize them directly
//! or record them into a [`DrawList`] and consume it afterwards.

use glam::Vec2;

/// 8-bit sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Normalized sRGB channels with opaque alpha
    pub fn to_srgb_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        ]
    }

    /// Linear-light channels with opaque alpha (for sRGB render targets)
    pub fn to_linear_f32(self) -> [f32; 4] {
        let [r, g, b, a] = self.to_srgb_f32();
        [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), a]
    }

    /// CSS color string, e.g. `rgb(220, 220, 220)`
    pub fn to_css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Which point of the text box is pinned to the given position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    TopLeft(Vec2),
    TopRight(Vec2),
    Center(Vec2),
}

impl Anchor {
    pub fn point(&self) -> Vec2 {
        match *self {
            Anchor::TopLeft(p) | Anchor::TopRight(p) | Anchor::Center(p) => p,
        }
    }
}

/// Primitive drawing operations a backend must provide
pub trait Canvas {
    /// Fill the whole screen
    fn fill(&mut self, color: Color);
    /// Solid disc
    fn filled_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Disc outline
    fn circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Single line of text
    fn text(&mut self, text: &str, anchor: Anchor, font_size: f32, color: Color);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Fill(Color),
    FilledCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Text {
        text: String,
        anchor: Anchor,
        font_size: f32,
        color: Color,
    },
}

/// Canvas that records draw calls in submission order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    cmds: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.cmds
    }

    /// Text commands only, in order
    pub fn texts(&self) -> impl Iterator<Item = (&str, Anchor, f32, Color)> {
        self.cmds.iter().filter_map(|cmd| match cmd {
            DrawCmd::Text {
                text,
                anchor,
                font_size,
                color,
            } => Some((text.as_str(), *anchor, *font_size, *color)),
            _ => None,
        })
    }
}

impl Canvas for DrawList {
    fn fill(&mut self, color: Color) {
        // Everything drawn before a fill is hidden by it
        self.cmds.clear();
        self.cmds.push(DrawCmd::Fill(color));
    }

    fn filled_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.cmds.push(DrawCmd::FilledCircle {
            center,
            radius,
            color,
        });
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.cmds.push(DrawCmd::Circle {
            center,
            radius,
            color,
        });
    }

    fn text(&mut self, text: &str, anchor: Anchor, font_size: f32, color: Color) {
        self.cmds.push(DrawCmd::Text {
            text: text.to_string(),
            anchor,
            font_size,
            color,
        });
    }
}
