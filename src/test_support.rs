use embedded_hal::delay::DelayNs;

use crate::{
    analog::AnalogChannel,
    platform::AnalogInput,
    render::{Color, Rect, Renderer},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawCall {
    FillScreen(Color),
    FillRect(Rect, Color),
    DrawRect(Rect, Color),
    Text(i16, i16, String, Color),
    Crosshair(i16, i16, Color),
}

#[derive(Default)]
pub struct RecordingRenderer {
    pub calls: Vec<DrawCall>,
}

impl RecordingRenderer {
    pub fn crosshairs(&self) -> Vec<(i16, i16)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Crosshair(x, y, _) => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text(_, _, text, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn full_redraws(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, DrawCall::FillScreen(_)))
            .count()
    }
}

impl Renderer for RecordingRenderer {
    fn fill_screen(&mut self, color: Color) {
        self.calls.push(DrawCall::FillScreen(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.calls.push(DrawCall::FillRect(rect, color));
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.calls.push(DrawCall::DrawRect(rect, color));
    }

    fn draw_text(&mut self, x: i16, y: i16, text: &str, color: Color) {
        self.calls.push(DrawCall::Text(x, y, text.into(), color));
    }

    fn draw_crosshair(&mut self, x: i16, y: i16, color: Color) {
        self.calls.push(DrawCall::Crosshair(x, y, color));
    }
}

/// ADC whose per-channel reading is set by the test; counts reads.
#[derive(Default)]
pub struct ScriptedAdc {
    pub values: [i32; 2],
    pub reads: usize,
}

impl ScriptedAdc {
    pub fn set(&mut self, channel: AnalogChannel, value: i32) {
        self.values[channel.index()] = value;
    }
}

impl AnalogInput for ScriptedAdc {
    fn read_analog(&mut self, channel: AnalogChannel) -> i32 {
        self.reads += 1;
        self.values[channel.index()]
    }
}

#[derive(Default)]
pub struct CountingDelay {
    pub total_ns: u64,
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}
