use crate::{
    analog::AnalogChannel,
    config::{
        CAL_HEADER_RECT, HEADER_RECT, HOME_SETUP_RECT, MSTOP_RECT, MSTOP_SHADOW, SETUP_BACK_RECT,
        SETUP_STEERING_RECT, SETUP_THROTTLE_RECT, SETUP_TOUCH_RECT,
    },
    render::{draw_button, draw_frame, Color, Rect, Renderer},
};

use super::buttons::ButtonAction;

pub const CAL_BACK_RECT: Rect = Rect::new(12, 258, 216, 45);
pub const SCREEN_COUNT: usize = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScreenId {
    #[default]
    Home,
    Setup,
    CalibrateThrottle,
    CalibrateSteering,
}

impl ScreenId {
    pub const ALL: [Self; SCREEN_COUNT] = [
        Self::Home,
        Self::Setup,
        Self::CalibrateThrottle,
        Self::CalibrateSteering,
    ];

    pub const fn index(self) -> usize {
        match self {
            Self::Home => 0,
            Self::Setup => 1,
            Self::CalibrateThrottle => 2,
            Self::CalibrateSteering => 3,
        }
    }

    /// Channel a calibration screen captures; `None` for menu screens.
    pub const fn analog_channel(self) -> Option<AnalogChannel> {
        match self {
            Self::CalibrateThrottle => Some(AnalogChannel::Throttle),
            Self::CalibrateSteering => Some(AnalogChannel::Steering),
            Self::Home | Self::Setup => None,
        }
    }

    pub const fn layout(self) -> &'static [ButtonSpec] {
        match self {
            Self::Home => HOME_LAYOUT,
            Self::Setup => SETUP_LAYOUT,
            Self::CalibrateThrottle | Self::CalibrateSteering => CALIBRATE_LAYOUT,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ButtonSpec {
    pub rect: Rect,
    pub action: ButtonAction,
    pub label: &'static str,
    pub fill: Color,
}

const HOME_LAYOUT: &[ButtonSpec] = &[
    ButtonSpec {
        rect: MSTOP_RECT,
        action: ButtonAction::ToggleStop,
        label: "M-STOP",
        fill: Color::STOP_RED,
    },
    ButtonSpec {
        rect: HOME_SETUP_RECT,
        action: ButtonAction::OpenSetup,
        label: "Setup",
        fill: Color::DARKGREY,
    },
];

const SETUP_LAYOUT: &[ButtonSpec] = &[
    ButtonSpec {
        rect: SETUP_THROTTLE_RECT,
        action: ButtonAction::CalibrateThrottle,
        label: "Throttle",
        fill: Color::NAVY,
    },
    ButtonSpec {
        rect: SETUP_STEERING_RECT,
        action: ButtonAction::CalibrateSteering,
        label: "Steering",
        fill: Color::DARKCYAN,
    },
    ButtonSpec {
        rect: SETUP_TOUCH_RECT,
        action: ButtonAction::CalibrateTouch,
        label: "Touch",
        fill: Color::DARKGREY,
    },
    ButtonSpec {
        rect: SETUP_BACK_RECT,
        action: ButtonAction::OpenHome,
        label: "Back",
        fill: Color::DARKGREY,
    },
];

const CALIBRATE_LAYOUT: &[ButtonSpec] = &[ButtonSpec {
    rect: CAL_BACK_RECT,
    action: ButtonAction::OpenSetup,
    label: "Back",
    fill: Color::DARKGREY,
}];

pub const TELEMETRY_LABELS: [(i16, &str); 5] = [
    (30, "Batt:"),
    (54, "Temp1:"),
    (78, "Temp2:"),
    (102, "M1 Current:"),
    (150, "M2 Current:"),
];

/// Full redraw of a screen's static content and buttons.
pub fn draw_screen<R: Renderer>(renderer: &mut R, id: ScreenId, stop_engaged: bool) {
    renderer.fill_screen(Color::BLACK);
    match id {
        ScreenId::Home => {
            renderer.fill_rect(HEADER_RECT, Color::LIGHTGREY);
            draw_frame(renderer, Color::LIGHTGREY);
            renderer.draw_text(69, 2, "Status", Color::BLACK);
            for (y, label) in TELEMETRY_LABELS {
                renderer.draw_text(4, y, label, Color::WHITE);
            }
        }
        ScreenId::Setup => {
            renderer.fill_rect(HEADER_RECT, Color::DARKGREY);
            draw_frame(renderer, Color::DARKGREY);
            renderer.draw_text(78, 2, "Setup", Color::WHITE);
        }
        ScreenId::CalibrateThrottle => draw_calibration_header(renderer, "Throttle", Color::NAVY),
        ScreenId::CalibrateSteering => {
            draw_calibration_header(renderer, "Steering", Color::DARKCYAN)
        }
    }

    for spec in id.layout() {
        if spec.action == ButtonAction::ToggleStop {
            draw_stop_button(renderer, stop_engaged);
        } else {
            draw_button(renderer, spec.rect, spec.fill, spec.label);
        }
    }
}

/// M-STOP doubles as its own indicator: red while driving, green to release.
pub fn draw_stop_button<R: Renderer>(renderer: &mut R, engaged: bool) {
    renderer.clear_region(Rect::new(
        MSTOP_RECT.x,
        MSTOP_RECT.y,
        MSTOP_RECT.w + MSTOP_SHADOW,
        MSTOP_RECT.h + MSTOP_SHADOW,
    ));
    if engaged {
        draw_button(renderer, MSTOP_RECT, Color::GO_GREEN, "RESUME");
    } else {
        draw_button(renderer, MSTOP_RECT, Color::STOP_RED, "M-STOP");
    }
}

fn draw_calibration_header<R: Renderer>(renderer: &mut R, title: &str, color: Color) {
    renderer.fill_rect(CAL_HEADER_RECT, color);
    draw_frame(renderer, color);
    renderer.draw_text(50, 2, title, Color::LIGHTGREY);
    renderer.draw_text(22, 26, "Calibration", Color::LIGHTGREY);
}
