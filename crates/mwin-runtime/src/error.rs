//! Runtime error type.

use std::fmt;

use mwin_layout::LayoutError;

use crate::config::ConfigError;
use crate::notifications::WindowNotification;

/// Errors surfaced by the coordinator and its notification queue.
#[derive(Debug)]
pub enum RuntimeError {
    /// A layout operation failed.
    Layout(LayoutError),
    /// The coordinator is gone; the notification was not delivered.
    QueueClosed,
    /// The notification queue is at capacity; the notification is returned.
    QueueFull(WindowNotification),
    /// Configuration could not be loaded or failed validation.
    Config(ConfigError),
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(err) => write!(f, "layout error: {err}"),
            Self::QueueClosed => f.write_str("notification queue closed"),
            Self::QueueFull(n) => write!(f, "notification queue full, {n:?} not queued"),
            Self::Config(err) => write!(f, "configuration error: {err}"),
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Layout(err) => Some(err),
            Self::QueueClosed | Self::QueueFull(_) => None,
            Self::Config(err) => Some(err),
        }
    }
}

impl From<LayoutError> for RuntimeError {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

impl From<ConfigError> for RuntimeError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for runtime operations.
pub type Result<T, E = RuntimeError> = std::result::Result<T, E>;
