use std::fmt;

/// A position relative to the drawing surface's top-left corner, in logical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned box anchored at `(x, y)`.
///
/// Width and height keep the sign of the drag that produced them: dragging
/// up or to the left yields negative extents.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_drag(start: Point, current: Point) -> Self {
        Self {
            x: start.x,
            y: start.y,
            width: current.x - start.x,
            height: current.y - start.y,
        }
    }

    /// Pixel span covered when filling this rectangle onto a `w`×`h` grid,
    /// as `(x0, y0, x1, y1)` with exclusive upper bounds. `None` when
    /// nothing would be painted.
    pub fn pixel_span(&self, w: u32, h: u32) -> Option<(u32, u32, u32, u32)> {
        let (x0, x1) = span(self.x, self.width, w)?;
        let (y0, y1) = span(self.y, self.height, h)?;
        Some((x0, y0, x1, y1))
    }
}

fn span(origin: f32, extent: f32, limit: u32) -> Option<(u32, u32)> {
    let lo = origin.min(origin + extent).round().max(0.0);
    let hi = origin.max(origin + extent).round().min(limit as f32);
    if hi <= lo {
        return None;
    }
    Some((lo as u32, hi as u32))
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{x: {}, y: {}, width: {}, height: {}}}",
            self.x, self.y, self.width, self.height
        )
    }
}
