//! Per-frame control loop.

use embedded_hal::delay::DelayNs;

use crate::{
    analog::{AnalogCalTable, AnalogChannel},
    config::TouchConfig,
    link::{ControlPacket, Telemetry, Transport},
    platform::{AnalogInput, TouchInput},
    render::Renderer,
    touch::{TouchCalibration, TouchEngine, TouchSample},
    ui::{
        buttons::DispatchError,
        navigator::{ScreenNavigator, TapRoute, UiContext},
        screens::{draw_stop_button, ScreenId},
        telemetry::TelemetryPanel,
    },
};

/// Hardware the loop polls, drives and draws through.
pub struct Collaborators<'a, R, T, A, D, X> {
    pub renderer: &'a mut R,
    pub touch: &'a mut T,
    pub adc: &'a mut A,
    pub delay: &'a mut D,
    pub transport: &'a mut X,
}

/// Single owner of all handset state.
pub struct Handset {
    touch_config: TouchConfig,
    touch: TouchEngine,
    touch_cal: TouchCalibration,
    analog_cal: AnalogCalTable,
    navigator: ScreenNavigator,
    panel: TelemetryPanel,
    telemetry: Option<Telemetry>,
    stop_engaged: bool,
    last_packet: ControlPacket,
}

impl Handset {
    pub fn new(touch_config: TouchConfig) -> Result<Self, DispatchError> {
        Ok(Self {
            touch_config,
            touch: TouchEngine::new(touch_config),
            touch_cal: TouchCalibration::default(),
            analog_cal: AnalogCalTable::default(),
            navigator: ScreenNavigator::new()?,
            panel: TelemetryPanel::new(),
            telemetry: None,
            stop_engaged: false,
            last_packet: ControlPacket::default(),
        })
    }

    pub fn begin<R, T, A, D, X>(&mut self, io: &mut Collaborators<'_, R, T, A, D, X>)
    where
        R: Renderer,
    {
        let mut ctx = UiContext {
            renderer: &mut *io.renderer,
            adc: &mut *io.adc,
            delay: &mut *io.delay,
            touch_cal: &mut self.touch_cal,
            analog_cal: &mut self.analog_cal,
            stop_engaged: self.stop_engaged,
        };
        self.navigator.switch_to(ScreenId::Home, &mut ctx);
        self.panel.invalidate();
        log::info!("handset: ready");
    }

    /// One frame. Returns the packet that was handed to the transport.
    pub fn tick<R, T, A, D, X>(
        &mut self,
        now_ms: u64,
        io: &mut Collaborators<'_, R, T, A, D, X>,
    ) -> ControlPacket
    where
        R: Renderer,
        T: TouchInput,
        A: AnalogInput,
        D: DelayNs,
        X: Transport,
    {
        let raw = io.touch.read_touch();
        let sample = TouchSample::classify(raw, &self.touch_config);

        if let Some(tap) = self.touch.tick(now_ms, sample) {
            let mut ctx = UiContext {
                renderer: &mut *io.renderer,
                adc: &mut *io.adc,
                delay: &mut *io.delay,
                touch_cal: &mut self.touch_cal,
                analog_cal: &mut self.analog_cal,
                stop_engaged: self.stop_engaged,
            };
            match self.navigator.dispatch_tap(&tap, &mut ctx) {
                TapRoute::ToggleStop => {
                    self.stop_engaged = !self.stop_engaged;
                    log::info!("handset: m-stop engaged={}", self.stop_engaged);
                    draw_stop_button(io.renderer, self.stop_engaged);
                }
                TapRoute::Navigated(ScreenId::Home) => self.panel.invalidate(),
                _ => {}
            }
        }

        let throttle_raw = io.adc.read_analog(AnalogChannel::Throttle);
        let steering_raw = io.adc.read_analog(AnalogChannel::Steering);

        let packet = if self.navigator.sequencer_active() {
            // Calibration sweeps the stick end to end; the vehicle stays put.
            ControlPacket::default()
        } else {
            let packet = ControlPacket::from_values(
                self.analog_cal.normalize(AnalogChannel::Throttle, throttle_raw),
                self.analog_cal.normalize(AnalogChannel::Steering, steering_raw),
            );
            if self.stop_engaged {
                packet.stopped()
            } else {
                packet
            }
        };

        if let Err(err) = io.transport.send(&packet) {
            log::warn!("handset: send failed {:?}", err);
        }
        if let Some(ack) = io.transport.try_receive_ack() {
            self.telemetry = Some(ack.decode());
        }
        self.last_packet = packet;

        if self.navigator.active_screen() == ScreenId::Home && !self.navigator.sequencer_active() {
            if let Some(telemetry) = self.telemetry.as_ref() {
                self.panel.refresh(now_ms, telemetry, io.renderer);
            }
        }

        packet
    }

    pub fn active_screen(&self) -> ScreenId {
        self.navigator.active_screen()
    }

    pub fn navigator(&self) -> &ScreenNavigator {
        &self.navigator
    }

    pub fn stop_engaged(&self) -> bool {
        self.stop_engaged
    }

    pub fn last_packet(&self) -> ControlPacket {
        self.last_packet
    }

    pub fn telemetry(&self) -> Option<&Telemetry> {
        self.telemetry.as_ref()
    }

    pub fn touch_calibration(&self) -> &TouchCalibration {
        &self.touch_cal
    }

    pub fn analog_calibration(&self) -> &AnalogCalTable {
        &self.analog_cal
    }
}
