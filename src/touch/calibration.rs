use crate::config::{
    SCREEN_H, SCREEN_W, TCAL_MIN_RAW_SPAN, TCAL_NUM_TARGETS, TS_MAXX, TS_MAXY, TS_MINX, TS_MINY,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchCalError {
    /// Two fit points landed too close together on one axis to derive a scale.
    DegenerateAxis,
}

/// Two-point scale-and-offset for one axis: `raw_a -> screen_a`, `raw_b -> screen_b`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisMap {
    raw_a: i32,
    raw_b: i32,
    screen_a: i32,
    screen_b: i32,
}

impl AxisMap {
    const fn new(raw_a: i32, raw_b: i32, screen_a: i32, screen_b: i32) -> Self {
        Self {
            raw_a,
            raw_b,
            screen_a,
            screen_b,
        }
    }

    pub fn fit(raw_a: i32, raw_b: i32, screen_a: i32, screen_b: i32) -> Result<Self, TouchCalError> {
        if (raw_b - raw_a).abs() < TCAL_MIN_RAW_SPAN {
            return Err(TouchCalError::DegenerateAxis);
        }
        Ok(Self::new(raw_a, raw_b, screen_a, screen_b))
    }

    /// Exact at both fit points; truncates toward zero in between.
    pub fn apply(&self, raw: i32) -> i32 {
        let span = self.raw_b - self.raw_a;
        if span == 0 {
            return self.screen_a;
        }
        let scaled = (raw - self.raw_a) as i64 * (self.screen_b - self.screen_a) as i64;
        self.screen_a + (scaled / span as i64) as i32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TouchCalibration {
    pub x: AxisMap,
    pub y: AxisMap,
    pub calibrated: bool,
}

impl Default for TouchCalibration {
    fn default() -> Self {
        Self {
            x: AxisMap::new(TS_MINX as i32, TS_MAXX as i32, 0, SCREEN_W as i32),
            y: AxisMap::new(TS_MINY as i32, TS_MAXY as i32, 0, SCREEN_H as i32),
            calibrated: false,
        }
    }
}

impl TouchCalibration {
    /// Maps a raw panel position into the visible screen area.
    pub fn to_screen(&self, raw_x: i16, raw_y: i16) -> (i16, i16) {
        let x = self.x.apply(raw_x as i32).clamp(0, SCREEN_W as i32 - 1);
        let y = self.y.apply(raw_y as i32).clamp(0, SCREEN_H as i32 - 1);
        (x as i16, y as i16)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CalPoint {
    pub screen_x: i16,
    pub screen_y: i16,
    pub raw_x: i16,
    pub raw_y: i16,
}

/// Result of a completed touch wizard, applied by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TouchCalFit {
    pub calibration: TouchCalibration,
    /// Largest per-axis miss at the cross-check target, in px.
    pub residual_px: i32,
}

/// Fits X and Y from points 0 and 1; point 2 only measures the residual.
pub fn fit_points(points: &[CalPoint; TCAL_NUM_TARGETS]) -> Result<TouchCalFit, TouchCalError> {
    let [a, b, check] = points;
    let x = AxisMap::fit(
        a.raw_x as i32,
        b.raw_x as i32,
        a.screen_x as i32,
        b.screen_x as i32,
    )?;
    let y = AxisMap::fit(
        a.raw_y as i32,
        b.raw_y as i32,
        a.screen_y as i32,
        b.screen_y as i32,
    )?;

    let dx = (x.apply(check.raw_x as i32) - check.screen_x as i32).abs();
    let dy = (y.apply(check.raw_y as i32) - check.screen_y as i32).abs();

    Ok(TouchCalFit {
        calibration: TouchCalibration {
            x,
            y,
            calibrated: true,
        },
        residual_px: dx.max(dy),
    })
}
