//! Draw-call surface the handset core renders through.
//!
//! The core only ever pushes pixels; it never reads display state back.

#[cfg(feature = "graphics")]
pub mod graphics;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i16,
    pub y: i16,
    pub w: i16,
    pub h: i16,
}

impl Rect {
    pub const fn new(x: i16, y: i16, w: i16, h: i16) -> Self {
        Self { x, y, w, h }
    }

    /// Closed on both edges: `[x, x + w] × [y, y + h]`.
    pub fn contains(&self, px: i16, py: i16) -> bool {
        let (px, py) = (px as i32, py as i32);
        let (x, y) = (self.x as i32, self.y as i32);
        px >= x && px <= x + self.w as i32 && py >= y && py <= y + self.h as i32
    }

    pub fn offset(&self, dx: i16, dy: i16) -> Self {
        Self::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.w,
            self.h,
        )
    }
}

/// RGB565 color as the panel stores it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color(pub u16);

impl Color {
    pub const BLACK: Self = Self(0x0000);
    pub const WHITE: Self = Self(0xFFFF);
    pub const NAVY: Self = Self(0x000F);
    pub const DARKCYAN: Self = Self(0x03EF);
    pub const LIGHTGREY: Self = Self(0xC618);
    pub const DARKGREY: Self = Self(0x7BEF);
    pub const GREEN: Self = Self(0x07E0);
    pub const YELLOW: Self = Self(0xFFE0);
    pub const STOP_RED: Self = Self(0xF800);
    pub const GO_GREEN: Self = Self(0x2DC6);
    pub const SHADOW: Self = Self(0x2965);
}

pub trait Renderer {
    fn fill_screen(&mut self, color: Color);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn draw_rect(&mut self, rect: Rect, color: Color);

    fn clear_region(&mut self, rect: Rect) {
        self.fill_rect(rect, Color::BLACK);
    }

    /// `(x, y)` is the top-left corner of the text box.
    fn draw_text(&mut self, x: i16, y: i16, text: &str, color: Color);

    fn draw_crosshair(&mut self, x: i16, y: i16, color: Color);
}

/// Raised button with a drop shadow, the handset's only widget.
pub fn draw_button<R: Renderer>(renderer: &mut R, rect: Rect, fill: Color, label: &str) {
    renderer.fill_rect(rect.offset(4, 4), Color::SHADOW);
    renderer.fill_rect(rect, fill);
    renderer.draw_text(rect.x + 29, rect.y + 12, label, Color::WHITE);
}

pub fn draw_frame<R: Renderer>(renderer: &mut R, color: Color) {
    renderer.draw_rect(Rect::new(0, 0, 240, 320), color);
    renderer.draw_rect(Rect::new(1, 1, 238, 318), color);
}
