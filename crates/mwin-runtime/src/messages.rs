//! User-visible messages.
//!
//! The coordinator never shows anything itself. It queues a [`UserMessage`]
//! whenever an action is refused, and the host drains them with
//! [`crate::MultiWindow::take_messages`] to show as toasts or status text.

use std::fmt;

/// A short notice for the user about a refused action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserMessage {
    /// The active tab already holds the maximum number of windows.
    MaxWindowsReached,
    /// The window system could not create a window.
    WindowSystemUnavailable,
    /// Expanding was requested with no window in the active tab.
    CantExpandWithoutWindow,
    /// The maximum number of tabs is open.
    MaxTabsReached,
    /// The last remaining tab cannot be closed.
    LastTabCannotBeRemoved,
}

impl fmt::Display for UserMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MaxWindowsReached => "Maximum number of windows reached",
            Self::WindowSystemUnavailable => "Window could not be created",
            Self::CantExpandWithoutWindow => "Add a window before expanding the panel",
            Self::MaxTabsReached => "Maximum number of tabs reached",
            Self::LastTabCannotBeRemoved => "The last tab cannot be removed",
        })
    }
}
