//! Board seams the handset core polls each frame.

use crate::{analog::AnalogChannel, touch::RawTouch};

pub trait TouchInput {
    /// Latest panel reading. `pressure` outside the configured band means no contact.
    fn read_touch(&mut self) -> RawTouch;
}

pub trait AnalogInput {
    fn read_analog(&mut self, channel: AnalogChannel) -> i32;
}

impl<T: TouchInput + ?Sized> TouchInput for &mut T {
    fn read_touch(&mut self) -> RawTouch {
        (**self).read_touch()
    }
}

impl<T: AnalogInput + ?Sized> AnalogInput for &mut T {
    fn read_analog(&mut self, channel: AnalogChannel) -> i32 {
        (**self).read_analog(channel)
    }
}
