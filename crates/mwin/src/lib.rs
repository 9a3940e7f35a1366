#![forbid(unsafe_code)]

//! Multi-window split-screen layout engine: public facade.
//!
//! This crate provides the stable surface area for hosts. It re-exports the
//! common types from the internal crates and offers a prelude for day-to-day
//! usage:
//!
//! ```rust,ignore
//! use mwin::prelude::*;
//!
//! let mut mw = MultiWindow::new(MultiWindowConfig::default(), display, my_window_system)?;
//! mw.add_window();
//! mw.toggle();
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use mwin_core::event::{TouchEvent, TouchPhase, TouchPoint};
pub use mwin_core::geometry::{Point, Rect};
pub use mwin_core::gesture::{DividerDrag, DividerDragEffect, ProxyDrag, ProxyDragEffect};

// --- Layout re-exports -----------------------------------------------------

pub use mwin_layout::{
    AppDescriptor, LayoutError, LayoutMode, LayoutPolicy, LayoutState, SolvedLayout, Subscription,
    TabId, WindowHandle, WindowSystem, WindowSystemError, compute_layout,
};

// --- Runtime re-exports ----------------------------------------------------

pub use mwin_runtime::{
    ConfigError, MultiWindow, MultiWindowConfig, NotificationSender, RuntimeError,
    TouchDisposition, UserMessage, WindowNotification,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for hosts.
#[derive(Debug)]
pub enum Error {
    /// Tab, window, or window-system failure.
    Layout(LayoutError),
    /// Coordinator failure.
    Runtime(RuntimeError),
    /// Configuration could not be loaded or is invalid.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(err) => write!(f, "{err}"),
            Self::Runtime(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Layout(err) => Some(err),
            Self::Runtime(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<LayoutError> for Error {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

impl From<RuntimeError> for Error {
    fn from(err: RuntimeError) -> Self {
        match err {
            RuntimeError::Layout(err) => Self::Layout(err),
            RuntimeError::Config(err) => Self::Config(err),
            other => Self::Runtime(other),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for mwin APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Error, LayoutMode, MultiWindow, MultiWindowConfig, Rect, Result, TabId,
        TouchDisposition, TouchEvent, UserMessage, WindowHandle, WindowSystem,
    };

    pub use crate::{core, layout, runtime};
}

pub use mwin_core as core;
pub use mwin_layout as layout;
pub use mwin_runtime as runtime;
