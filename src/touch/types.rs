use crate::config::TouchConfig;

/// Reading straight off the resistive panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawTouch {
    pub x: i16,
    pub y: i16,
    pub pressure: i16,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TouchSample {
    pub x: i16,
    pub y: i16,
    pub pressure: i16,
    pub valid: bool,
}

impl TouchSample {
    /// Pressure bounds are exclusive: a reading sitting exactly on either bound is noise.
    pub fn classify(raw: RawTouch, config: &TouchConfig) -> Self {
        Self {
            x: raw.x,
            y: raw.y,
            pressure: raw.pressure,
            valid: raw.pressure > config.min_pressure && raw.pressure < config.max_pressure,
        }
    }

    pub const fn released() -> Self {
        Self {
            x: 0,
            y: 0,
            pressure: 0,
            valid: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TouchState {
    #[default]
    Idle,
    Pressed,
    Held,
    WaitRelease,
}

/// One accepted press, in raw panel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TapEvent {
    pub t_ms: u64,
    pub x: i16,
    pub y: i16,
    pub pressure: i16,
}
