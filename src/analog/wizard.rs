use core::fmt::Write;

use embedded_hal::delay::DelayNs;

use crate::{
    config::{
        ACAL_CANCEL_RECT, ACAL_CONFIRM_RECT, ACAL_DEAD_ZONE, ACAL_SAMPLES, ACAL_SAMPLE_DELAY_MS,
        CAL_BODY_RECT,
    },
    platform::AnalogInput,
    render::{draw_button, Color, Rect, Renderer},
};

use super::normalize::{AnalogCalData, AnalogCalTable, AnalogChannel};

const PROMPT_POS: (i16, i16) = (20, 80);
const READING_POS: (i16, i16) = (20, 120);
const READING_RECT: Rect = Rect::new(20, 120, 200, 30);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnalogCalStep {
    #[default]
    Idle,
    Center,
    Min,
    Max,
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnalogCalError {
    /// A run is already in progress or waiting to be acknowledged.
    Busy,
    /// `advance` before the current step was sampled.
    NotSampled,
    /// Endpoints do not straddle the center; the run went back to `Center`.
    Degenerate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnalogCalDispatch {
    Inactive,
    /// Tap landed outside both hit regions; swallowed while the run owns input.
    Consumed,
    Advanced(AnalogCalStep),
    Committed(AnalogChannel),
    Rejected,
    Cancelled,
    Acknowledged,
}

/// Collaborators the sequencer needs to sample and redraw on a tap.
pub struct AnalogCalIo<'a, R, A, D> {
    pub renderer: &'a mut R,
    pub adc: &'a mut A,
    pub delay: &'a mut D,
}

/// Guided center → min → max capture for one analog channel.
///
/// Nothing reaches the [`AnalogCalTable`] until the max step is confirmed and
/// the captured set validates.
#[derive(Debug, Default)]
pub struct AnalogCalSequencer {
    step: AnalogCalStep,
    channel: Option<AnalogChannel>,
    center: Option<i32>,
    min: Option<i32>,
    max: Option<i32>,
}

impl AnalogCalSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> AnalogCalStep {
        self.step
    }

    pub fn channel(&self) -> Option<AnalogChannel> {
        self.channel
    }

    /// True from `start` until the run is cancelled or acknowledged.
    pub fn is_active(&self) -> bool {
        self.step != AnalogCalStep::Idle
    }

    pub fn start(&mut self, channel: AnalogChannel) -> Result<(), AnalogCalError> {
        if self.step != AnalogCalStep::Idle {
            return Err(AnalogCalError::Busy);
        }
        self.discard_pending();
        self.channel = Some(channel);
        self.step = AnalogCalStep::Center;
        log::debug!("analog_cal: start {:?}", channel);
        Ok(())
    }

    /// Averages `ACAL_SAMPLES` reads of the running channel into the current step.
    ///
    /// Blocks for the spacing between reads. Returns `None` outside a sampling step.
    pub fn sample<A, D>(&mut self, adc: &mut A, delay: &mut D) -> Option<i32>
    where
        A: AnalogInput,
        D: DelayNs,
    {
        let channel = self.channel?;
        let slot = match self.step {
            AnalogCalStep::Center => &mut self.center,
            AnalogCalStep::Min => &mut self.min,
            AnalogCalStep::Max => &mut self.max,
            AnalogCalStep::Idle | AnalogCalStep::Done => return None,
        };

        let mut sum: i64 = 0;
        for i in 0..ACAL_SAMPLES {
            if i > 0 {
                delay.delay_ms(ACAL_SAMPLE_DELAY_MS);
            }
            sum += adc.read_analog(channel) as i64;
        }
        let mean = (sum / ACAL_SAMPLES as i64) as i32;
        *slot = Some(mean);
        log::debug!("analog_cal: {:?} {:?} mean={}", channel, self.step, mean);
        Some(mean)
    }

    pub fn advance(&mut self, table: &mut AnalogCalTable) -> Result<AnalogCalStep, AnalogCalError> {
        let sampled = match self.step {
            AnalogCalStep::Center => self.center,
            AnalogCalStep::Min => self.min,
            AnalogCalStep::Max => self.max,
            AnalogCalStep::Idle | AnalogCalStep::Done => None,
        };
        if sampled.is_none() {
            return Err(AnalogCalError::NotSampled);
        }

        self.step = match self.step {
            AnalogCalStep::Center => AnalogCalStep::Min,
            AnalogCalStep::Min => AnalogCalStep::Max,
            _ => return self.finish(table),
        };
        Ok(self.step)
    }

    /// Drops a run that has not reached `Done`. The table keeps its previous data.
    pub fn cancel(&mut self) {
        if self.step == AnalogCalStep::Done {
            return;
        }
        if let Some(channel) = self.channel {
            log::debug!("analog_cal: cancel {:?} at {:?}", channel, self.step);
        }
        self.step = AnalogCalStep::Idle;
        self.channel = None;
        self.discard_pending();
    }

    pub fn acknowledge(&mut self) {
        if self.step == AnalogCalStep::Done {
            self.step = AnalogCalStep::Idle;
            self.channel = None;
            self.discard_pending();
        }
    }

    pub fn on_tap<R, A, D>(
        &mut self,
        x: i16,
        y: i16,
        table: &mut AnalogCalTable,
        io: &mut AnalogCalIo<'_, R, A, D>,
    ) -> AnalogCalDispatch
    where
        R: Renderer,
        A: AnalogInput,
        D: DelayNs,
    {
        let confirm = ACAL_CONFIRM_RECT.contains(x, y);
        let cancel = ACAL_CANCEL_RECT.contains(x, y);

        match self.step {
            AnalogCalStep::Idle => AnalogCalDispatch::Inactive,
            AnalogCalStep::Done if confirm || cancel => {
                self.acknowledge();
                AnalogCalDispatch::Acknowledged
            }
            _ if confirm => {
                let reading = self.sample(io.adc, io.delay);
                let dispatch = match self.advance(table) {
                    Ok(AnalogCalStep::Done) => match self.channel {
                        Some(channel) => AnalogCalDispatch::Committed(channel),
                        None => AnalogCalDispatch::Consumed,
                    },
                    Ok(step) => AnalogCalDispatch::Advanced(step),
                    Err(AnalogCalError::Degenerate) => AnalogCalDispatch::Rejected,
                    Err(_) => AnalogCalDispatch::Consumed,
                };
                self.draw(io.renderer);
                if let Some(raw) = reading {
                    draw_reading(io.renderer, raw);
                }
                dispatch
            }
            AnalogCalStep::Done => AnalogCalDispatch::Consumed,
            _ if cancel => {
                self.cancel();
                AnalogCalDispatch::Cancelled
            }
            _ => AnalogCalDispatch::Consumed,
        }
    }

    /// Redraws the body below the calibration header for the current step.
    pub fn draw<R: Renderer>(&self, renderer: &mut R) {
        renderer.clear_region(CAL_BODY_RECT);
        let prompt = match self.step {
            AnalogCalStep::Idle => return,
            AnalogCalStep::Center => "Release stick",
            AnalogCalStep::Min => "Hold at minimum",
            AnalogCalStep::Max => "Hold at maximum",
            AnalogCalStep::Done => "Saved",
        };
        renderer.draw_text(PROMPT_POS.0, PROMPT_POS.1, prompt, Color::WHITE);

        if self.step == AnalogCalStep::Done {
            draw_button(renderer, ACAL_CONFIRM_RECT, Color::GO_GREEN, "OK");
        } else {
            draw_button(renderer, ACAL_CONFIRM_RECT, Color::GO_GREEN, "CONFIRM");
            draw_button(renderer, ACAL_CANCEL_RECT, Color::STOP_RED, "CANCEL");
        }
    }

    fn finish(&mut self, table: &mut AnalogCalTable) -> Result<AnalogCalStep, AnalogCalError> {
        let (Some(channel), Some(center), Some(min), Some(max)) =
            (self.channel, self.center, self.min, self.max)
        else {
            return Err(AnalogCalError::NotSampled);
        };

        if !straddles(center, min, max) {
            log::warn!(
                "analog_cal: {:?} rejected center={} min={} max={}",
                channel,
                center,
                min,
                max
            );
            self.discard_pending();
            self.step = AnalogCalStep::Center;
            return Err(AnalogCalError::Degenerate);
        }

        table.commit(AnalogCalData {
            channel,
            cal_center: center,
            cal_min: min,
            cal_max: max,
            dead_zone: ACAL_DEAD_ZONE,
            calibrated: true,
        });
        log::info!(
            "analog_cal: {:?} committed center={} min={} max={}",
            channel,
            center,
            min,
            max
        );
        self.step = AnalogCalStep::Done;
        Ok(self.step)
    }

    fn discard_pending(&mut self) {
        self.center = None;
        self.min = None;
        self.max = None;
    }
}

/// Both endpoints clear the dead zone, on opposite sides of the center.
fn straddles(center: i32, min: i32, max: i32) -> bool {
    let below = min - center;
    let above = max - center;
    let dead_zone = ACAL_DEAD_ZONE as i32;
    below.abs() > dead_zone && above.abs() > dead_zone && below.signum() != above.signum()
}

fn draw_reading<R: Renderer>(renderer: &mut R, raw: i32) {
    let mut line = heapless::String::<24>::new();
    let _ = write!(line, "Raw: {}", raw);
    renderer.clear_region(READING_RECT);
    renderer.draw_text(READING_POS.0, READING_POS.1, &line, Color::LIGHTGREY);
}
