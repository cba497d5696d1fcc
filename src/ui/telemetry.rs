use core::fmt::Write;

use crate::{
    config::TELEMETRY_UPDATE_MS,
    link::Telemetry,
    render::{Color, Rect, Renderer},
};

const FIELD_COUNT: usize = 5;
const FIELD_H: i16 = 22;
const FIELD_RIGHT: i16 = 236;

type FieldText = heapless::String<12>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Battery,
    Temp1,
    Temp2,
    Motor1,
    Motor2,
}

impl Field {
    const ALL: [Self; FIELD_COUNT] = [
        Self::Battery,
        Self::Temp1,
        Self::Temp2,
        Self::Motor1,
        Self::Motor2,
    ];

    const fn origin(self) -> (i16, i16) {
        match self {
            Self::Battery => (112, 30),
            Self::Temp1 => (112, 54),
            Self::Temp2 => (112, 78),
            Self::Motor1 => (80, 126),
            Self::Motor2 => (80, 174),
        }
    }

    fn raw(self, telemetry: &Telemetry) -> i32 {
        match self {
            Self::Battery => telemetry.battery_dv as i32,
            Self::Temp1 => telemetry.temp1_dc as i32,
            Self::Temp2 => telemetry.temp2_dc as i32,
            Self::Motor1 => telemetry.motor1_ca as i32,
            Self::Motor2 => telemetry.motor2_ca as i32,
        }
    }

    fn format(self, raw: i32) -> FieldText {
        match self {
            Self::Battery => fixed_point(raw, 10, "V"),
            Self::Temp1 | Self::Temp2 => fixed_point(raw, 10, "C"),
            Self::Motor1 | Self::Motor2 => fixed_point(raw, 100, "A"),
        }
    }
}

/// Renders `raw / scale` with a zero-padded fraction, e.g. `521, 100` → `5.21`.
pub fn fixed_point(raw: i32, scale: u32, unit: &str) -> FieldText {
    let digits = match scale {
        100 => 2,
        _ => 1,
    };
    let sign = if raw < 0 { "-" } else { "" };
    let abs = raw.unsigned_abs();
    let mut text = FieldText::new();
    let _ = write!(
        text,
        "{}{}.{:0width$}{}",
        sign,
        abs / scale,
        abs % scale,
        unit,
        width = digits
    );
    text
}

/// Value column of the Home screen. Only fields whose reading changed are
/// redrawn, and no more often than `TELEMETRY_UPDATE_MS`.
#[derive(Debug, Default)]
pub struct TelemetryPanel {
    shown: [Option<i32>; FIELD_COUNT],
    last_refresh_ms: Option<u64>,
}

impl TelemetryPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget what is on screen, e.g. after the Home screen was repainted.
    pub fn invalidate(&mut self) {
        self.shown = [None; FIELD_COUNT];
        self.last_refresh_ms = None;
    }

    /// Returns how many fields were redrawn.
    pub fn refresh<R: Renderer>(
        &mut self,
        now_ms: u64,
        telemetry: &Telemetry,
        renderer: &mut R,
    ) -> usize {
        if let Some(last) = self.last_refresh_ms {
            if now_ms.saturating_sub(last) < TELEMETRY_UPDATE_MS {
                return 0;
            }
        }
        self.last_refresh_ms = Some(now_ms);

        let mut redrawn = 0;
        for (slot, field) in self.shown.iter_mut().zip(Field::ALL) {
            let raw = field.raw(telemetry);
            if *slot == Some(raw) {
                continue;
            }
            let (x, y) = field.origin();
            renderer.clear_region(Rect::new(x, y, FIELD_RIGHT - x, FIELD_H));
            renderer.draw_text(x, y, &field.format(raw), Color::GREEN);
            *slot = Some(raw);
            redrawn += 1;
        }
        redrawn
    }
}
