pub mod calibration;
mod core;
pub mod types;
pub mod wizard;

pub use self::core::TouchEngine;
pub use calibration::{AxisMap, CalPoint, TouchCalError, TouchCalFit, TouchCalibration};
pub use types::{RawTouch, TapEvent, TouchSample, TouchState};
pub use wizard::{TouchCalDispatch, TouchCalState, TouchCalibrationSequencer};
