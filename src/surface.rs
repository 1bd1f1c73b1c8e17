use image::{imageops, DynamicImage, Rgba, RgbaImage};

use crate::geometry::Rectangle;

pub const SURFACE_WIDTH: u32 = 400;
pub const SURFACE_HEIGHT: u32 = 400;

/// Fill used for the in-progress rectangle.
pub const OVERLAY_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);

const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// The pixels of the drawing surface.
///
/// Drawing calls write straight into the buffer; nothing about what was
/// drawn is remembered except the base image, so that a repaint can put it
/// back underneath a new overlay.
pub struct Surface {
    pixels: RgbaImage,
    base: Option<RgbaImage>,
    dirty: bool,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, CLEAR),
            base: None,
            dirty: true,
        }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn size(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Draw a freshly loaded image on top of whatever is currently shown,
    /// scaled to `display` (the surface's on-screen size) or to the default
    /// surface size when that is unknown.
    pub fn draw_image(&mut self, image: &DynamicImage, display: Option<(u32, u32)>) {
        let (w, h) = match display {
            Some((w, h)) if w > 0 && h > 0 => (w, h),
            _ => (SURFACE_WIDTH, SURFACE_HEIGHT),
        };
        let scaled = imageops::resize(&image.to_rgba8(), w, h, imageops::FilterType::Triangle);
        imageops::overlay(&mut self.pixels, &scaled, 0, 0);
        self.base = Some(scaled);
        self.dirty = true;
    }

    /// Repaint from scratch: clear, base image, then `overlay` filled in
    /// [`OVERLAY_COLOR`].
    pub fn repaint(&mut self, overlay: &Rectangle) {
        for px in self.pixels.pixels_mut() {
            *px = CLEAR;
        }
        if let Some(ref base) = self.base {
            imageops::overlay(&mut self.pixels, base, 0, 0);
        }
        self.fill_rect(overlay, OVERLAY_COLOR);
    }

    pub fn fill_rect(&mut self, rect: &Rectangle, color: Rgba<u8>) {
        let (w, h) = self.size();
        if let Some((x0, y0, x1, y1)) = rect.pixel_span(w, h) {
            for y in y0..y1 {
                for x in x0..x1 {
                    self.pixels.put_pixel(x, y, color);
                }
            }
        }
        self.dirty = true;
    }

    /// Returns whether the pixels changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(SURFACE_WIDTH, SURFACE_HEIGHT)
    }
}
