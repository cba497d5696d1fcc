use crate::{config::MAX_BUTTONS, render::Rect};

/// What a button does when tapped. Navigation is handled by the navigator;
/// `ToggleStop` is surfaced to the control loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonAction {
    ToggleStop,
    OpenSetup,
    OpenHome,
    CalibrateThrottle,
    CalibrateSteering,
    CalibrateTouch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchError {
    TableFull,
    UnknownButton(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Button {
    pub rect: Rect,
    pub action: ButtonAction,
    pub enabled: bool,
}

/// Fixed-capacity hit table for one screen.
#[derive(Clone, Debug, Default)]
pub struct ButtonTable {
    buttons: heapless::Vec<Button, MAX_BUTTONS>,
}

impl ButtonTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an enabled button and returns its index.
    pub fn register(&mut self, rect: Rect, action: ButtonAction) -> Result<usize, DispatchError> {
        let index = self.buttons.len();
        self.buttons
            .push(Button {
                rect,
                action,
                enabled: true,
            })
            .map_err(|_| DispatchError::TableFull)?;
        Ok(index)
    }

    /// First enabled button, in registration order, whose rect contains the point.
    pub fn on_tap(&self, x: i16, y: i16) -> Option<ButtonAction> {
        self.buttons
            .iter()
            .find(|button| button.enabled && button.rect.contains(x, y))
            .map(|button| button.action)
    }

    pub fn set_enabled(&mut self, index: usize, enabled: bool) -> Result<(), DispatchError> {
        let button = self
            .buttons
            .get_mut(index)
            .ok_or(DispatchError::UnknownButton(index))?;
        button.enabled = enabled;
        Ok(())
    }

    pub fn set_all_enabled(&mut self, enabled: bool) {
        for button in self.buttons.iter_mut() {
            button.enabled = enabled;
        }
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }
}
