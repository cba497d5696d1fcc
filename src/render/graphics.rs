use embedded_graphics::{
    pixelcolor::{raw::RawU16, Rgb565},
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle, Rectangle},
};
use u8g2_fonts::{
    fonts,
    types::{FontColor, HorizontalAlignment, VerticalPosition},
    FontRenderer,
};

use super::{Color, Rect, Renderer};

const TEXT_FONT: FontRenderer = FontRenderer::new::<fonts::u8g2_font_helvB12_tf>();
const CROSSHAIR_ARM_PX: i32 = 10;
const CROSSHAIR_RADIUS_PX: i32 = 6;

/// [`Renderer`] over any RGB565 embedded-graphics target (ILI9341 in the handset).
pub struct GraphicsRenderer<D> {
    target: D,
}

impl<D> GraphicsRenderer<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: D) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }
}

impl<D> Renderer for GraphicsRenderer<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn fill_screen(&mut self, color: Color) {
        let _ = self.target.clear(to_rgb565(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let _ = to_rectangle(rect)
            .into_styled(PrimitiveStyle::with_fill(to_rgb565(color)))
            .draw(&mut self.target);
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        let _ = to_rectangle(rect)
            .into_styled(PrimitiveStyle::with_stroke(to_rgb565(color), 1))
            .draw(&mut self.target);
    }

    fn draw_text(&mut self, x: i16, y: i16, text: &str, color: Color) {
        let _ = TEXT_FONT.render_aligned(
            text,
            Point::new(x as i32, y as i32),
            VerticalPosition::Top,
            HorizontalAlignment::Left,
            FontColor::Transparent(to_rgb565(color)),
            &mut self.target,
        );
    }

    fn draw_crosshair(&mut self, x: i16, y: i16, color: Color) {
        let (x, y) = (x as i32, y as i32);
        let style = PrimitiveStyle::with_stroke(to_rgb565(color), 1);
        let _ = Line::new(
            Point::new(x - CROSSHAIR_ARM_PX, y),
            Point::new(x + CROSSHAIR_ARM_PX, y),
        )
        .into_styled(style)
        .draw(&mut self.target);
        let _ = Line::new(
            Point::new(x, y - CROSSHAIR_ARM_PX),
            Point::new(x, y + CROSSHAIR_ARM_PX),
        )
        .into_styled(style)
        .draw(&mut self.target);
        let _ = Circle::new(
            Point::new(x - CROSSHAIR_RADIUS_PX, y - CROSSHAIR_RADIUS_PX),
            (CROSSHAIR_RADIUS_PX * 2) as u32,
        )
        .into_styled(style)
        .draw(&mut self.target);
    }
}

fn to_rgb565(color: Color) -> Rgb565 {
    Rgb565::from(RawU16::new(color.0))
}

fn to_rectangle(rect: Rect) -> Rectangle {
    Rectangle::new(
        Point::new(rect.x as i32, rect.y as i32),
        Size::new(rect.w.max(0) as u32, rect.h.max(0) as u32),
    )
}
