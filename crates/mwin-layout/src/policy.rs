#![forbid(unsafe_code)]

//! Capacity limits and geometric constants for tabs and windows.

use mwin_core::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Number of cascade slots the floating placement coefficients are defined for.
pub const CASCADE_SLOTS: usize = 4;

/// Tunable limits for tabs and windows.
///
/// Every default matches the values the layout was designed around; see
/// [`LayoutPolicy::validate`] for the accepted ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutPolicy {
    /// Windows a single tab may hold.
    pub max_windows_per_tab: usize,
    /// Tabs the container may hold.
    pub max_tabs: usize,
    /// Tabs that must always remain.
    pub min_tabs: usize,
    /// Windows narrower than this are widened by moving the right edge.
    pub min_window_width: i32,
    /// Windows shorter than this are lengthened by moving the bottom edge.
    pub min_window_height: i32,
    /// Top-left corner hidden windows are parked at.
    pub hidden_origin: Point,
    /// Rectangle a new window is created at before its first relayout.
    pub placeholder_rect: Rect,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self {
            max_windows_per_tab: 4,
            max_tabs: 4,
            min_tabs: 1,
            min_window_width: 200,
            min_window_height: 200,
            hidden_origin: Point::new(10_000, 10_000),
            placeholder_rect: Rect::new(4000, 4000, 4800, 4800),
        }
    }
}

impl LayoutPolicy {
    /// Validate all parameters.
    ///
    /// Returns a list of problems; an empty list means the policy is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.max_windows_per_tab == 0 || self.max_windows_per_tab > CASCADE_SLOTS {
            errors.push(format!(
                "max_windows_per_tab must be in 1..={CASCADE_SLOTS}, got {}",
                self.max_windows_per_tab
            ));
        }
        if self.min_tabs == 0 {
            errors.push("min_tabs must be > 0".into());
        }
        if self.max_tabs < self.min_tabs {
            errors.push(format!(
                "max_tabs ({}) must be >= min_tabs ({})",
                self.max_tabs, self.min_tabs
            ));
        }
        if self.min_window_width <= 0 || self.min_window_height <= 0 {
            errors.push(format!(
                "minimum window size must be positive, got {}x{}",
                self.min_window_width, self.min_window_height
            ));
        }
        if !self.placeholder_rect.is_well_formed() {
            errors.push(format!(
                "placeholder_rect is inverted: {:?}",
                self.placeholder_rect
            ));
        }

        errors
    }
}
