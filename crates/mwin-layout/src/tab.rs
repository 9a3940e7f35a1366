#![forbid(unsafe_code)]

//! A tab: an ordered, bounded group of windows.
//!
//! Insertion order is visual order. Only the active tab accepts new windows,
//! and an inactive tab keeps its windows alive but parked off-display.
//!
//! # Layout
//!
//! Docked, the container is sliced into equal horizontal bands:
//!
//! ```text
//! top + 0*h/n  +-----------+
//!              | window 0  |
//! top + 1*h/n  +-----------+
//!              | window 1  |
//! top + 2*h/n  +-----------+
//! ```
//!
//! Integer division means bands may differ by one pixel; that is accepted.
//!
//! Floating, windows without a remembered placement are cascaded toward the
//! centre using tenths of the container's size, `(4 - i)` tenths from the
//! leading edge and `(i + 1)` tenths from the trailing edge.

use mwin_core::geometry::Rect;

use crate::error::{CapacityKind, LayoutError, LayoutResult};
use crate::policy::{CASCADE_SLOTS, LayoutPolicy};
use crate::tab_container::TabId;
use crate::window::Window;
use crate::window_system::{AppDescriptor, WindowHandle, WindowSystem};

/// Band `index` of `count` equal horizontal slices of `container`.
#[must_use]
pub fn docked_band(container: Rect, index: usize, count: usize) -> Rect {
    debug_assert!(index < count, "band {index} out of {count}");
    let h = i64::from(container.height());
    let n = count.max(1) as i64;
    let i = index as i64;
    let top = i64::from(container.top);
    // Bounded by top + h, which fits in i32.
    Rect::new(
        container.left,
        (top + i * h / n) as i32,
        container.right,
        (top + (i + 1) * h / n) as i32,
    )
}

/// Cascaded floating placement for the window at `index`.
#[must_use]
pub fn cascade_rect(container: Rect, index: usize) -> Rect {
    debug_assert!(index < CASCADE_SLOTS, "cascade slot {index} out of range");
    let slot = index.min(CASCADE_SLOTS - 1) as i32;
    let dw = container.width() / 10;
    let dh = container.height() / 10;
    let lead = CASCADE_SLOTS as i32 - slot;
    let trail = slot + 1;
    Rect::new(
        container.left + lead * dw,
        container.top + trail * dh,
        container.right - trail * dw,
        container.bottom - lead * dh,
    )
}

/// An ordered group of up to `max_windows_per_tab` windows.
#[derive(Debug)]
pub struct Tab {
    id: TabId,
    windows: Vec<Window>,
    active: bool,
    container_rect: Rect,
    policy: LayoutPolicy,
}

impl Tab {
    /// New tabs start active, empty, and laid out against the placeholder.
    #[must_use]
    pub fn new(id: TabId, policy: LayoutPolicy) -> Self {
        Self {
            id,
            windows: Vec::with_capacity(policy.max_windows_per_tab),
            active: true,
            container_rect: policy.placeholder_rect,
            policy,
        }
    }

    #[inline]
    #[must_use]
    pub const fn id(&self) -> TabId {
        self.id
    }

    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Flip the active flag. Visibility follows on the next relayout.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.windows.len() >= self.policy.max_windows_per_tab
    }

    /// Windows in visual order.
    #[must_use]
    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    #[must_use]
    pub const fn container_rect(&self) -> Rect {
        self.container_rect
    }

    #[must_use]
    pub fn window(&self, handle: WindowHandle) -> Option<&Window> {
        self.windows.iter().find(|w| w.handle() == handle)
    }

    pub fn window_mut(&mut self, handle: WindowHandle) -> Option<&mut Window> {
        self.windows.iter_mut().find(|w| w.handle() == handle)
    }

    /// Create a window running `app` and relayout the tab.
    ///
    /// # Errors
    ///
    /// [`LayoutError::TabInactive`] or [`LayoutError::CapacityExceeded`]
    /// without mutating; [`LayoutError::SystemUnavailable`] when the window
    /// system cannot create the window.
    pub fn add_window(
        &mut self,
        app: &AppDescriptor,
        docked: bool,
        ws: &mut dyn WindowSystem,
    ) -> LayoutResult<WindowHandle> {
        if !self.active {
            return Err(LayoutError::TabInactive);
        }
        if self.is_full() {
            return Err(LayoutError::CapacityExceeded {
                kind: CapacityKind::WindowsPerTab,
                limit: self.policy.max_windows_per_tab,
            });
        }
        let window = Window::create(self.policy.placeholder_rect, app, &self.policy, ws)?;
        let handle = window.handle();
        self.windows.push(window);
        tracing::debug!(tab = %self.id, %handle, count = self.windows.len(), "window added");
        self.resize_windows(self.container_rect, docked, ws);
        Ok(handle)
    }

    /// Tear down the window with `handle` and relayout the rest.
    /// Returns `false` if this tab does not hold it.
    pub fn remove_window(
        &mut self,
        handle: WindowHandle,
        docked: bool,
        ws: &mut dyn WindowSystem,
    ) -> bool {
        let Some(index) = self.windows.iter().position(|w| w.handle() == handle) else {
            return false;
        };
        let mut window = self.windows.remove(index);
        window.remove(ws);
        self.resize_windows(self.container_rect, docked, ws);
        true
    }

    /// Drop a window the window system already destroyed and relayout the
    /// rest. Returns `false` if this tab does not hold it.
    pub fn forget_window(
        &mut self,
        handle: WindowHandle,
        docked: bool,
        ws: &mut dyn WindowSystem,
    ) -> bool {
        let Some(index) = self.windows.iter().position(|w| w.handle() == handle) else {
            return false;
        };
        let mut window = self.windows.remove(index);
        window.notify_removed_externally();
        self.resize_windows(self.container_rect, docked, ws);
        true
    }

    /// Lay out every window against `container`.
    pub fn resize_windows(&mut self, container: Rect, docked: bool, ws: &mut dyn WindowSystem) {
        self.container_rect = container;

        if !self.active {
            for window in &mut self.windows {
                window.set_visibility(false, ws);
            }
            return;
        }

        let count = self.windows.len();
        if docked {
            for (index, window) in self.windows.iter_mut().enumerate() {
                window.place(docked_band(container, index, count), ws);
            }
        } else {
            for (index, window) in self.windows.iter_mut().enumerate() {
                if !window.restore_last_floating_position(ws) {
                    window.place(cascade_rect(container, index), ws);
                }
            }
        }
    }

    /// Remove every window through the window system.
    pub fn teardown(&mut self, ws: &mut dyn WindowSystem) {
        tracing::debug!(tab = %self.id, count = self.windows.len(), "tab teardown");
        for window in &mut self.windows {
            window.remove(ws);
        }
        self.windows.clear();
    }
}
