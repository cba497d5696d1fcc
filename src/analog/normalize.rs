use crate::config::{ACAL_DEAD_ZONE, JOY_RAW_MAX, JOY_RAW_MIN, NUM_ANALOG_INPUTS};

/// Output span of one control channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputRange {
    pub min: i16,
    pub neutral: i16,
    pub max: i16,
}

impl OutputRange {
    /// One byte of the control packet, 64 at rest.
    pub const BYTE: Self = Self {
        min: 0,
        neutral: 64,
        max: 127,
    };

    fn clamp(&self, value: i64) -> i16 {
        value.clamp(self.min as i64, self.max as i64) as i16
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelSpec {
    pub range: OutputRange,
    /// Direction of the uncalibrated fallback map; a calibration learns its own.
    pub inverted: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AnalogChannel {
    Steering,
    Throttle,
}

impl AnalogChannel {
    pub const ALL: [Self; NUM_ANALOG_INPUTS] = [Self::Steering, Self::Throttle];

    pub const fn index(self) -> usize {
        match self {
            Self::Steering => 0,
            Self::Throttle => 1,
        }
    }

    pub const fn spec(self) -> ChannelSpec {
        match self {
            Self::Steering => ChannelSpec {
                range: OutputRange::BYTE,
                inverted: false,
            },
            Self::Throttle => ChannelSpec {
                range: OutputRange::BYTE,
                inverted: true,
            },
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Steering => "Steering",
            Self::Throttle => "Throttle",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnalogCalData {
    pub channel: AnalogChannel,
    pub cal_center: i32,
    pub cal_min: i32,
    pub cal_max: i32,
    pub dead_zone: u8,
    pub calibrated: bool,
}

impl AnalogCalData {
    pub const fn uncalibrated(channel: AnalogChannel) -> Self {
        Self {
            channel,
            cal_center: (JOY_RAW_MIN + JOY_RAW_MAX) / 2,
            cal_min: JOY_RAW_MIN,
            cal_max: JOY_RAW_MAX,
            dead_zone: ACAL_DEAD_ZONE,
            calibrated: false,
        }
    }

    pub fn normalize(&self, raw: i32) -> i16 {
        normalize(self, raw)
    }
}

/// Maps a raw reading into the channel's output range.
///
/// Uncalibrated channels use a plain linear map over the joystick's nominal
/// ADC span. Calibrated channels return `neutral` anywhere within the closed
/// dead-zone band around `cal_center`, and otherwise interpolate from
/// `(cal_center, neutral)` toward whichever endpoint lies on the reading's side:
/// `cal_min` reaches `range.min` and `cal_max` reaches `range.max`. The two sides
/// scale independently, so an off-center stick still spans the full output.
pub fn normalize(data: &AnalogCalData, raw: i32) -> i16 {
    let spec = data.channel.spec();
    let range = spec.range;

    if !data.calibrated {
        let (out_lo, out_hi) = if spec.inverted {
            (range.max, range.min)
        } else {
            (range.min, range.max)
        };
        return range.clamp(map_linear(raw, JOY_RAW_MIN, JOY_RAW_MAX, out_lo, out_hi));
    }

    let offset = raw as i64 - data.cal_center as i64;
    if offset.abs() <= data.dead_zone as i64 {
        return range.neutral;
    }

    let min_offset = data.cal_min as i64 - data.cal_center as i64;
    let (endpoint_offset, extreme) = if offset.signum() == min_offset.signum() {
        (min_offset, range.min)
    } else {
        (data.cal_max as i64 - data.cal_center as i64, range.max)
    };
    if endpoint_offset == 0 {
        return extreme;
    }

    let neutral = range.neutral as i64;
    range.clamp(neutral + offset * (extreme as i64 - neutral) / endpoint_offset)
}

fn map_linear(raw: i32, in_lo: i32, in_hi: i32, out_lo: i16, out_hi: i16) -> i64 {
    let span = (in_hi - in_lo) as i64;
    if span == 0 {
        return out_lo as i64;
    }
    out_lo as i64 + (raw - in_lo) as i64 * (out_hi as i64 - out_lo as i64) / span
}

/// Per-channel calibration storage, indexed by [`AnalogChannel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnalogCalTable {
    channels: [AnalogCalData; NUM_ANALOG_INPUTS],
}

impl Default for AnalogCalTable {
    fn default() -> Self {
        Self {
            channels: AnalogChannel::ALL.map(AnalogCalData::uncalibrated),
        }
    }
}

impl AnalogCalTable {
    pub fn get(&self, channel: AnalogChannel) -> &AnalogCalData {
        &self.channels[channel.index()]
    }

    pub(crate) fn commit(&mut self, data: AnalogCalData) {
        self.channels[data.channel.index()] = data;
    }

    pub fn normalize(&self, channel: AnalogChannel, raw: i32) -> i16 {
        normalize(self.get(channel), raw)
    }
}
