use crate::render::Rect;

pub const SCREEN_W: i16 = 240;
pub const SCREEN_H: i16 = 320;

// Raw resistive panel extents used until the touch wizard has run.
pub const TS_MINX: i16 = 150;
pub const TS_MINY: i16 = 120;
pub const TS_MAXX: i16 = 920;
pub const TS_MAXY: i16 = 940;
pub const MINPRESSURE: i16 = 10;
pub const MAXPRESSURE: i16 = 1000;

pub const TOUCH_DEBOUNCE_MS: u64 = 250;
pub const TELEMETRY_UPDATE_MS: u64 = 100;

pub const MAX_BUTTONS: usize = 6;

pub const NUM_ANALOG_INPUTS: usize = 2;
pub const JOY_RAW_MIN: i32 = 0;
pub const JOY_RAW_MAX: i32 = 1023;
pub const ACAL_SAMPLES: u8 = 10;
pub const ACAL_SAMPLE_DELAY_MS: u32 = 5;
pub const ACAL_DEAD_ZONE: u8 = 8;

pub const TCAL_NUM_TARGETS: usize = 3;
/// Top-left, bottom-right, then their midpoint as the cross-check.
pub const TCAL_TARGETS: [(i16, i16); TCAL_NUM_TARGETS] = [(20, 60), (220, 240), (120, 150)];
pub const TCAL_MAX_RESIDUAL_PX: i32 = 12;
pub const TCAL_MIN_RAW_SPAN: i32 = 32;
/// Checked in screen space under the live mapping before a point is recorded.
pub const TCAL_CANCEL_RECT: Rect = Rect::new(12, 263, 216, 45);

pub const HEADER_RECT: Rect = Rect::new(0, 0, 240, 28);
pub const CAL_HEADER_RECT: Rect = Rect::new(0, 0, 240, 51);
pub const CAL_BODY_RECT: Rect = Rect::new(2, 51, 236, 267);
pub const MSTOP_RECT: Rect = Rect::new(12, 220, 216, 45);
pub const MSTOP_SHADOW: i16 = 4;
pub const HOME_SETUP_RECT: Rect = Rect::new(12, 270, 216, 45);
pub const SETUP_THROTTLE_RECT: Rect = Rect::new(12, 60, 216, 45);
pub const SETUP_STEERING_RECT: Rect = Rect::new(12, 115, 216, 45);
pub const SETUP_TOUCH_RECT: Rect = Rect::new(12, 170, 216, 45);
pub const SETUP_BACK_RECT: Rect = Rect::new(12, 263, 216, 45);
pub const ACAL_CONFIRM_RECT: Rect = Rect::new(12, 200, 216, 45);
pub const ACAL_CANCEL_RECT: Rect = Rect::new(12, 258, 216, 45);

/// What the debounce engine does with the first invalid sample after a press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleasePolicy {
    /// Re-arm on the first invalid sample.
    Immediate,
    /// Pass through `WaitRelease` so one more invalid tick is needed before re-arming.
    SettleTick,
}

/// What the debounce engine does with a contact that lands inside the debounce window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EarlyContactPolicy {
    /// Ignore the whole press; input is accepted again only after a lift.
    WaitForLift,
    /// Stay idle, so the same press fires once the window has elapsed.
    StayIdle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TouchConfig {
    pub min_pressure: i16,
    pub max_pressure: i16,
    pub debounce_ms: u64,
    pub release_policy: ReleasePolicy,
    pub early_contact: EarlyContactPolicy,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            min_pressure: MINPRESSURE,
            max_pressure: MAXPRESSURE,
            debounce_ms: TOUCH_DEBOUNCE_MS,
            release_policy: ReleasePolicy::Immediate,
            early_contact: EarlyContactPolicy::WaitForLift,
        }
    }
}
