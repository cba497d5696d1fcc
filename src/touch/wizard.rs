use crate::{
    config::{
        SCREEN_H, SCREEN_W, TCAL_CANCEL_RECT, TCAL_MAX_RESIDUAL_PX, TCAL_NUM_TARGETS,
        TCAL_TARGETS,
    },
    render::{draw_button, Color, Rect, Renderer},
};

use super::{
    calibration::{fit_points, CalPoint, TouchCalFit, TouchCalibration},
    types::TapEvent,
};

const TARGET_CLEAR_HALF_PX: i16 = 12;
const PROMPT_RECT: Rect = Rect::new(0, 24, 240, 22);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TouchCalState {
    #[default]
    Idle,
    WaitTarget,
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchCalDispatch {
    Inactive,
    Consumed,
    /// All targets collected; the fit is handed back for the caller to apply.
    Finished(TouchCalFit),
    /// The collected points could not be fit; collection starts over at target 0.
    Restarted,
    /// CANCEL was pressed; points are discarded and the live calibration stays.
    Cancelled,
}

/// Guided crosshair wizard collecting raw panel readings at known screen positions.
pub struct TouchCalibrationSequencer {
    state: TouchCalState,
    target_index: usize,
    points: [CalPoint; TCAL_NUM_TARGETS],
}

impl Default for TouchCalibrationSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl TouchCalibrationSequencer {
    pub fn new() -> Self {
        Self {
            state: TouchCalState::Idle,
            target_index: 0,
            points: [CalPoint::default(); TCAL_NUM_TARGETS],
        }
    }

    pub fn state(&self) -> TouchCalState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, TouchCalState::WaitTarget)
    }

    pub fn target_index(&self) -> usize {
        self.target_index
    }

    pub fn current_target(&self) -> Option<(i16, i16)> {
        if self.is_active() {
            TCAL_TARGETS.get(self.target_index).copied()
        } else {
            None
        }
    }

    pub fn start<R: Renderer>(&mut self, renderer: &mut R) {
        self.reset_points();
        self.state = TouchCalState::WaitTarget;
        log::debug!("touch_cal: start");

        renderer.fill_screen(Color::BLACK);
        renderer.draw_text(34, 8, "Touch Calibration", Color::LIGHTGREY);
        self.draw_target(renderer);
        draw_prompt(renderer, "Tap the crosshair");
        draw_button(renderer, TCAL_CANCEL_RECT, Color::DARKGREY, "Cancel");
    }

    /// Discards collected points. The live calibration is never touched here.
    pub fn cancel(&mut self) {
        if self.state != TouchCalState::Idle {
            log::debug!("touch_cal: cancel at target {}", self.target_index);
        }
        self.reset_points();
        self.state = TouchCalState::Idle;
    }

    /// Records `tap` against the current target, unless it lands on CANCEL
    /// under the `live` mapping.
    pub fn on_tap<R: Renderer>(
        &mut self,
        tap: &TapEvent,
        live: &TouchCalibration,
        renderer: &mut R,
    ) -> TouchCalDispatch {
        let Some((screen_x, screen_y)) = self.current_target() else {
            return TouchCalDispatch::Inactive;
        };

        let (live_x, live_y) = live.to_screen(tap.x, tap.y);
        if TCAL_CANCEL_RECT.contains(live_x, live_y) {
            self.cancel();
            return TouchCalDispatch::Cancelled;
        }

        self.points[self.target_index] = CalPoint {
            screen_x,
            screen_y,
            raw_x: tap.x,
            raw_y: tap.y,
        };
        log::debug!(
            "touch_cal: target {} ({}, {}) raw=({}, {})",
            self.target_index,
            screen_x,
            screen_y,
            tap.x,
            tap.y
        );
        clear_target(renderer, screen_x, screen_y);
        self.target_index += 1;

        if self.target_index < TCAL_NUM_TARGETS {
            self.draw_target(renderer);
            return TouchCalDispatch::Consumed;
        }

        match fit_points(&self.points) {
            Ok(fit) => {
                if fit.residual_px > TCAL_MAX_RESIDUAL_PX {
                    log::warn!("touch_cal: cross-check residual {} px", fit.residual_px);
                } else {
                    log::info!("touch_cal: done residual={} px", fit.residual_px);
                }
                self.state = TouchCalState::Done;
                TouchCalDispatch::Finished(fit)
            }
            Err(err) => {
                log::warn!("touch_cal: fit rejected {:?}, restarting", err);
                self.reset_points();
                self.draw_target(renderer);
                draw_prompt(renderer, "Try again");
                TouchCalDispatch::Restarted
            }
        }
    }

    fn reset_points(&mut self) {
        self.target_index = 0;
        self.points = [CalPoint::default(); TCAL_NUM_TARGETS];
    }

    fn draw_target<R: Renderer>(&self, renderer: &mut R) {
        if let Some((x, y)) = TCAL_TARGETS.get(self.target_index) {
            renderer.draw_crosshair(*x, *y, Color::WHITE);
        }
    }
}

fn clear_target<R: Renderer>(renderer: &mut R, x: i16, y: i16) {
    let side = TARGET_CLEAR_HALF_PX * 2 + 1;
    let rect = Rect::new(
        (x - TARGET_CLEAR_HALF_PX).max(0),
        (y - TARGET_CLEAR_HALF_PX).max(0),
        side.min(SCREEN_W),
        side.min(SCREEN_H),
    );
    renderer.clear_region(rect);
}

fn draw_prompt<R: Renderer>(renderer: &mut R, text: &str) {
    renderer.clear_region(PROMPT_RECT);
    renderer.draw_text(PROMPT_RECT.x + 12, PROMPT_RECT.y + 10, text, Color::WHITE);
}

#[cfg(test)]
mod tests;
