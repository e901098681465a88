//! Device capabilities: opening URLs (dialer, maps) and push notifications.

pub mod dialer;
pub mod notifications;

use thiserror::Error;

pub use dialer::{call, open_directions, phone_url, ConsoleUrlOpener, UrlOpener};
pub use notifications::{
    AndroidChannel, NotificationManager, NotificationPermissionState, PermissionResponse,
    PermissionStatus, PushPlatform, UnsupportedPushPlatform, SIMULATOR_PUSH_TOKEN,
};

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("Cannot open {0}")]
    CannotOpen(String),
    #[error("Notification service failed: {0}")]
    Notifications(String),
}
