use embedded_hal::delay::DelayNs;

use crate::{
    analog::{AnalogCalDispatch, AnalogCalIo, AnalogCalSequencer, AnalogCalTable},
    platform::AnalogInput,
    render::Renderer,
    touch::{TapEvent, TouchCalDispatch, TouchCalibration, TouchCalibrationSequencer},
};

use super::{
    buttons::{ButtonAction, ButtonTable, DispatchError},
    screens::{draw_screen, ScreenId, SCREEN_COUNT},
};

/// Everything a screen switch or a routed tap may touch.
pub struct UiContext<'a, R, A, D> {
    pub renderer: &'a mut R,
    pub adc: &'a mut A,
    pub delay: &'a mut D,
    pub touch_cal: &'a mut TouchCalibration,
    pub analog_cal: &'a mut AnalogCalTable,
    pub stop_engaged: bool,
}

/// Where a tap ended up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapRoute {
    TouchCalibrationStarted,
    TouchCalibration(TouchCalDispatch),
    AnalogCalibration(AnalogCalDispatch),
    Navigated(ScreenId),
    /// Left to the control loop.
    ToggleStop,
    Unhandled,
}

/// Owns the screens, their button tables and both calibration sequencers.
///
/// At most one sequencer runs at a time, and while one runs it sees every tap.
pub struct ScreenNavigator {
    active: ScreenId,
    tables: [ButtonTable; SCREEN_COUNT],
    touch_wizard: TouchCalibrationSequencer,
    analog_wizard: AnalogCalSequencer,
}

impl ScreenNavigator {
    pub fn new() -> Result<Self, DispatchError> {
        let mut tables: [ButtonTable; SCREEN_COUNT] = Default::default();
        for id in ScreenId::ALL {
            let table = &mut tables[id.index()];
            for spec in id.layout() {
                table.register(spec.rect, spec.action)?;
            }
            table.set_all_enabled(id == ScreenId::Home);
        }

        Ok(Self {
            active: ScreenId::Home,
            tables,
            touch_wizard: TouchCalibrationSequencer::new(),
            analog_wizard: AnalogCalSequencer::new(),
        })
    }

    pub fn active_screen(&self) -> ScreenId {
        self.active
    }

    pub fn table(&self, id: ScreenId) -> &ButtonTable {
        &self.tables[id.index()]
    }

    pub fn touch_wizard(&self) -> &TouchCalibrationSequencer {
        &self.touch_wizard
    }

    pub fn analog_wizard(&self) -> &AnalogCalSequencer {
        &self.analog_wizard
    }

    pub fn sequencer_active(&self) -> bool {
        self.touch_wizard.is_active() || self.analog_wizard.is_active()
    }

    /// Draws the active screen from scratch without changing any state.
    pub fn redraw<R, A, D>(&self, ctx: &mut UiContext<'_, R, A, D>)
    where
        R: Renderer,
    {
        draw_screen(ctx.renderer, self.active, ctx.stop_engaged);
        if self.analog_wizard.is_active() {
            self.analog_wizard.draw(ctx.renderer);
        }
    }

    pub fn switch_to<R, A, D>(&mut self, id: ScreenId, ctx: &mut UiContext<'_, R, A, D>)
    where
        R: Renderer,
    {
        self.touch_wizard.cancel();
        self.analog_wizard.cancel();
        self.analog_wizard.acknowledge();

        log::debug!("ui: {:?} -> {:?}", self.active, id);
        self.tables[self.active.index()].set_all_enabled(false);
        self.tables[id.index()].set_all_enabled(true);
        self.active = id;

        if let Some(channel) = id.analog_channel() {
            if let Err(err) = self.analog_wizard.start(channel) {
                log::warn!("ui: analog calibration not started {:?}", err);
            }
        }
        self.redraw(ctx);
    }

    /// Routes a raw-coordinate tap to the running sequencer or the active screen.
    pub fn dispatch_tap<R, A, D>(
        &mut self,
        tap: &TapEvent,
        ctx: &mut UiContext<'_, R, A, D>,
    ) -> TapRoute
    where
        R: Renderer,
        A: AnalogInput,
        D: DelayNs,
    {
        if self.touch_wizard.is_active() {
            let dispatch = self.touch_wizard.on_tap(tap, ctx.touch_cal, ctx.renderer);
            match dispatch {
                TouchCalDispatch::Finished(fit) => {
                    *ctx.touch_cal = fit.calibration;
                    self.switch_to(self.active, ctx);
                }
                TouchCalDispatch::Cancelled => self.switch_to(self.active, ctx),
                _ => {}
            }
            log::debug!("ui: tap -> touch wizard {:?}", dispatch);
            return TapRoute::TouchCalibration(dispatch);
        }

        let (x, y) = ctx.touch_cal.to_screen(tap.x, tap.y);

        if self.analog_wizard.is_active() {
            let mut io = AnalogCalIo {
                renderer: &mut *ctx.renderer,
                adc: &mut *ctx.adc,
                delay: &mut *ctx.delay,
            };
            let dispatch = self.analog_wizard.on_tap(x, y, ctx.analog_cal, &mut io);
            if matches!(
                dispatch,
                AnalogCalDispatch::Cancelled | AnalogCalDispatch::Acknowledged
            ) {
                // Back to the bare screen so its own Back button is reachable.
                self.redraw(ctx);
            }
            log::debug!("ui: tap ({}, {}) -> analog wizard {:?}", x, y, dispatch);
            return TapRoute::AnalogCalibration(dispatch);
        }

        let Some(action) = self.tables[self.active.index()].on_tap(x, y) else {
            log::debug!("ui: tap ({}, {}) unhandled on {:?}", x, y, self.active);
            return TapRoute::Unhandled;
        };
        log::debug!("ui: tap ({}, {}) -> {:?}", x, y, action);

        match action {
            ButtonAction::ToggleStop => TapRoute::ToggleStop,
            ButtonAction::CalibrateTouch => {
                self.analog_wizard.cancel();
                self.tables[self.active.index()].set_all_enabled(false);
                self.touch_wizard.start(ctx.renderer);
                TapRoute::TouchCalibrationStarted
            }
            ButtonAction::OpenHome => self.navigate(ScreenId::Home, ctx),
            ButtonAction::OpenSetup => self.navigate(ScreenId::Setup, ctx),
            ButtonAction::CalibrateThrottle => self.navigate(ScreenId::CalibrateThrottle, ctx),
            ButtonAction::CalibrateSteering => self.navigate(ScreenId::CalibrateSteering, ctx),
        }
    }

    fn navigate<R, A, D>(&mut self, id: ScreenId, ctx: &mut UiContext<'_, R, A, D>) -> TapRoute
    where
        R: Renderer,
    {
        self.switch_to(id, ctx);
        TapRoute::Navigated(id)
    }
}
