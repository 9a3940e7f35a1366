#![forbid(unsafe_code)]

//! Split-screen position solver.
//!
//! [`compute_layout`] partitions the display into three regions from the
//! divider position and the current [`LayoutMode`]:
//!
//! - **panel**: the fixed-width strip holding tab buttons and controls,
//! - **primary**: the launcher window on the opposite side,
//! - **container**: the rectangle tabs lay their windows out in.
//!
//! The right-anchored case is described below; the left-anchored case is its
//! mirror image.
//!
//! ```text
//!  display.left                 x - pw     x                display.right
//!  |-------- primary ------------|-- panel --|------ container ------|
//! ```
//!
//! # Invariants
//!
//! 1. Every produced rectangle is well-formed (non-negative width/height).
//! 2. With `floating_edit == false`, `primary` and `panel` never overlap.
//! 3. With zero windows in the active tab the divider sits on the trailing
//!    display edge regardless of the requested position.
//! 4. The function is pure: equal inputs produce equal outputs.
//!
//! # Failure Modes
//!
//! Callers guarantee `0 <= panel_width < display.width()`. The requested
//! divider position is clamped so that the panel always fits on screen; no
//! input produces a panic in release builds.

use mwin_core::geometry::Rect;

use crate::state::LayoutMode;

/// Everything the solver reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverInput {
    pub display: Rect,
    pub divider_x: i32,
    pub panel_width: i32,
    pub mode: LayoutMode,
    pub active_window_count: usize,
}

/// Regions produced by [`compute_layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolvedLayout {
    pub panel: Rect,
    pub primary: Rect,
    pub container: Rect,
    /// Divider position after the empty-tab rule and clamping.
    pub divider_x: i32,
}

/// Trailing display edge on the anchored side.
#[inline]
#[must_use]
pub const fn collapsed_edge(display: Rect, right_side: bool) -> i32 {
    if right_side {
        display.right
    } else {
        display.left
    }
}

/// Solve the split for one divider position.
#[must_use]
pub fn compute_layout(input: &SolverInput) -> SolvedLayout {
    let SolverInput {
        display,
        divider_x,
        panel_width,
        mode,
        active_window_count,
    } = *input;
    let pw = panel_width.clamp(0, display.width());

    let x = if active_window_count == 0 {
        collapsed_edge(display, mode.right_side)
    } else if mode.right_side {
        divider_x.clamp(display.left + pw, display.right)
    } else {
        divider_x.clamp(display.left, display.right - pw)
    };

    let mut panel = display;
    let mut primary = display;
    let mut container = display;

    if mode.right_side {
        primary.right = x - pw;
        if !mode.floating_edit {
            panel.left = x - pw;
        }
        panel.right = x;
        if !mode.docked {
            container.right = x - pw;
        } else {
            if !mode.expanded {
                container.right = x + display.width();
            }
            container.left = x;
        }
    } else {
        primary.left = x + pw;
        panel.left = x;
        if !mode.floating_edit {
            panel.right = x + pw;
        }
        if !mode.docked {
            container.left = x + pw;
        } else {
            if !mode.expanded {
                container.left = x - display.width();
            }
            container.right = x;
        }
    }

    debug_assert!(panel.is_well_formed(), "panel inverted: {panel:?}");
    debug_assert!(primary.is_well_formed(), "primary inverted: {primary:?}");
    debug_assert!(container.is_well_formed(), "container inverted: {container:?}");

    tracing::trace!(x, ?panel, ?primary, ?container, "layout solved");

    SolvedLayout {
        panel,
        primary,
        container,
        divider_x: x,
    }
}
