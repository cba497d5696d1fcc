pub mod buttons;
pub mod navigator;
pub mod screens;
pub mod telemetry;

pub use buttons::{Button, ButtonAction, ButtonTable, DispatchError};
pub use navigator::{ScreenNavigator, TapRoute, UiContext};
pub use screens::ScreenId;
pub use telemetry::TelemetryPanel;
