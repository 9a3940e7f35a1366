//! Error types for the layout engine.
//!
//! Capacity and lookup failures are recoverable: the component that detects
//! them reports them to its caller, which turns them into a boolean result or
//! a user-visible message. Window-system failures abandon the operation that
//! hit them without rolling back local geometry.

use std::fmt;

use crate::tab_container::TabId;
use crate::window_system::{WindowHandle, WindowSystemError};

/// What a capacity limit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityKind {
    WindowsPerTab,
    Tabs,
}

impl fmt::Display for CapacityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WindowsPerTab => f.write_str("windows per tab"),
            Self::Tabs => f.write_str("tabs"),
        }
    }
}

/// Errors from tab, window, and container operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A tab or window ceiling was reached. Nothing was mutated.
    CapacityExceeded { kind: CapacityKind, limit: usize },

    /// Windows can only be added to the active tab.
    TabInactive,

    /// Removing the tab would drop below the minimum tab count.
    TabFloorReached { min: usize },

    /// No tab with this id.
    TabNotFound(TabId),

    /// No window with this handle.
    WindowNotFound(WindowHandle),

    /// The window system failed; the operation was abandoned.
    SystemUnavailable(WindowSystemError),

    /// Application class name could not be split into package and class.
    InvalidAppDescriptor(String),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded { kind, limit } => {
                write!(f, "capacity exceeded: at most {limit} {kind}")
            }
            Self::TabInactive => f.write_str("tab is not active"),
            Self::TabFloorReached { min } => {
                write!(f, "cannot remove tab: at least {min} must remain")
            }
            Self::TabNotFound(id) => write!(f, "tab not found: {id}"),
            Self::WindowNotFound(handle) => write!(f, "window not found: {handle}"),
            Self::SystemUnavailable(err) => write!(f, "{err}"),
            Self::InvalidAppDescriptor(name) => {
                write!(f, "invalid application class name '{name}'")
            }
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SystemUnavailable(err) => Some(err),
            _ => None,
        }
    }
}

impl From<WindowSystemError> for LayoutError {
    fn from(err: WindowSystemError) -> Self {
        Self::SystemUnavailable(err)
    }
}

/// Result type alias for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;
