#![forbid(unsafe_code)]

//! The host window-stack service, seen through a narrow trait.
//!
//! The layout engine never touches a real window. Everything that moves,
//! resizes, creates, or destroys one goes through [`WindowSystem`], which the
//! host implements on top of its compositor or activity manager.

use std::fmt;

use mwin_core::geometry::Rect;
use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// Opaque identifier for a real window, issued by the window system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowHandle(i32);

impl WindowHandle {
    /// Marker for a window that has been torn down.
    pub const INVALID: Self = Self(-1);

    #[must_use]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }

    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != Self::INVALID.0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Application to launch into a freshly created window.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppDescriptor {
    pub package: String,
    pub class: String,
}

impl AppDescriptor {
    /// Parse a fully-qualified class name; the package is everything before
    /// the last `.`.
    pub fn from_class_name(qualified: &str) -> Result<Self, LayoutError> {
        match qualified.rsplit_once('.') {
            Some((package, _)) if !package.is_empty() => Ok(Self {
                package: package.to_owned(),
                class: qualified.to_owned(),
            }),
            _ => Err(LayoutError::InvalidAppDescriptor(qualified.to_owned())),
        }
    }
}

impl fmt::Display for AppDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.package, self.class)
    }
}

/// Failure reported by the window system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowSystemError {
    /// The service could not be reached.
    Unavailable { op: &'static str },
    /// The service does not know this handle.
    UnknownHandle(WindowHandle),
    /// The service refused the request.
    Rejected { op: &'static str, reason: String },
}

impl fmt::Display for WindowSystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { op } => write!(f, "window system unavailable during {op}"),
            Self::UnknownHandle(handle) => write!(f, "window system does not know window {handle}"),
            Self::Rejected { op, reason } => write!(f, "window system rejected {op}: {reason}"),
        }
    }
}

impl std::error::Error for WindowSystemError {}

/// Host window-stack service.
///
/// All calls happen on the UI thread. `relayout_window` and `remove_window`
/// failures are logged by callers and never retried.
pub trait WindowSystem {
    /// Create a window at `rect` and return its handle.
    fn init_window(&mut self, rect: Rect) -> Result<WindowHandle, WindowSystemError>;

    /// Move/resize a window.
    fn relayout_window(&mut self, handle: WindowHandle, rect: Rect) -> Result<(), WindowSystemError>;

    /// Destroy a window.
    fn remove_window(&mut self, handle: WindowHandle) -> Result<(), WindowSystemError>;

    /// Launch an application into a window. Completion is not observed.
    fn start_application(
        &mut self,
        app: &AppDescriptor,
        handle: WindowHandle,
    ) -> Result<(), WindowSystemError>;

    /// The window hosting the primary (launcher) application.
    fn primary_stack_handle(&self) -> Result<WindowHandle, WindowSystemError>;

    /// The window hosting the panel itself.
    fn managed_stack_handle(&self) -> Result<WindowHandle, WindowSystemError>;

    /// Tell the host whether externally initiated relayouts must be
    /// restricted (true while docked).
    fn set_relayout_restriction(&mut self, restricted: bool) -> Result<(), WindowSystemError>;
}
