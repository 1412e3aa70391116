use serde::{Deserialize, Serialize};

/// Point in chart-local pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in chart-local pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }
}

/// One-dimensional pixel range produced by the most recent layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRange {
    pub start: f64,
    pub width: f64,
}

impl PixelRange {
    #[must_use]
    pub fn new(start: f64, width: f64) -> Self {
        Self { start, width }
    }

    #[must_use]
    pub fn end(self) -> f64 {
        self.start + self.width
    }

    #[must_use]
    pub fn center(self) -> f64 {
        self.start + self.width / 2.0
    }
}

/// Render orientation of the domain axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisDirection {
    Horizontal,
    Vertical,
}

/// RGBA color used by series accessors and highlight decorations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLUE: Color = Color::rgb(0x42, 0x85, 0xf4);
    pub const RED: Color = Color::rgb(0xdb, 0x44, 0x37);
    pub const YELLOW: Color = Color::rgb(0xf4, 0xb4, 0x00);
    pub const GREEN: Color = Color::rgb(0x0f, 0x9d, 0x58);
    pub const GRAY: Color = Color::rgb(0x75, 0x75, 0x75);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Returns a darker shade of this color.
    ///
    /// `factor` is the fraction of each channel that is kept; values outside
    /// `(0, 1]` are clamped. Alpha is preserved.
    #[must_use]
    pub fn darker(self, factor: f64) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        let scale = |channel: u8| -> u8 {
            let scaled = f64::from(channel) * factor;
            scaled.round().clamp(0.0, 255.0) as u8
        };
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
            a: self.a,
        }
    }
}
