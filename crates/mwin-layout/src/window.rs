#![forbid(unsafe_code)]

//! One managed sub-window.
//!
//! A [`Window`] pairs a window-system handle with the logical rectangle the
//! layout wants it to occupy, its visibility, and the placement the user last
//! chose while floating. The proxy overlay (the draggable ghost the host draws
//! over the real window) mirrors the effective rectangle and is detached when
//! the window goes away.
//!
//! # Invariants
//!
//! 1. Rectangles chosen by the layout or the user (`resize`, `place`,
//!    `on_interactive_relayout`, `restore_last_floating_position`) are never
//!    smaller than the policy minimum; undersized requests grow the trailing
//!    (right/bottom) edges. A placement reported by the window system through
//!    `apply_external_relayout` is recorded as reported.
//! 2. A hidden window keeps its logical rectangle; only the effective
//!    rectangle moves to the hidden origin.
//! 3. Once the handle is invalid no further window-system calls are made.
//!
//! # Failure Modes
//!
//! Creation propagates the window-system error. Relayout and removal failures
//! are logged and the local rectangle stays authoritative.

use mwin_core::geometry::{Point, Rect};

use crate::error::LayoutResult;
use crate::policy::LayoutPolicy;
use crate::window_system::{AppDescriptor, WindowHandle, WindowSystem};

/// A managed sub-window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    handle: WindowHandle,
    rect: Rect,
    visible: bool,
    last_floating_rect: Option<Rect>,
    proxy: Option<Rect>,
    min_width: i32,
    min_height: i32,
    hidden_origin: Point,
}

impl Window {
    /// Ask the window system for a new window at `initial` and launch `app`
    /// into it.
    ///
    /// Launch failures are logged only; the window exists either way.
    pub fn create(
        initial: Rect,
        app: &AppDescriptor,
        policy: &LayoutPolicy,
        ws: &mut dyn WindowSystem,
    ) -> LayoutResult<Self> {
        let handle = ws.init_window(initial).inspect_err(|err| {
            tracing::warn!(error = %err, ?initial, "window creation failed");
        })?;
        tracing::debug!(%handle, %app, "window created");

        if let Err(err) = ws.start_application(app, handle) {
            tracing::warn!(%handle, %app, error = %err, "application launch failed");
        }

        Ok(Self {
            handle,
            rect: initial,
            visible: true,
            last_floating_rect: None,
            proxy: Some(initial),
            min_width: policy.min_window_width,
            min_height: policy.min_window_height,
            hidden_origin: policy.hidden_origin,
        })
    }

    #[inline]
    #[must_use]
    pub const fn handle(&self) -> WindowHandle {
        self.handle
    }

    /// Logical rectangle, independent of visibility.
    #[inline]
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    #[must_use]
    pub const fn last_floating_rect(&self) -> Option<Rect> {
        self.last_floating_rect
    }

    /// Where the proxy overlay currently sits, or `None` once detached.
    #[inline]
    #[must_use]
    pub const fn proxy_rect(&self) -> Option<Rect> {
        self.proxy
    }

    /// Whether the window still has a live handle.
    #[inline]
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.handle.is_valid()
    }

    /// The rectangle actually sent to the window system: the logical one when
    /// visible, the same size parked at the hidden origin otherwise.
    #[must_use]
    pub const fn effective_rect(&self) -> Rect {
        if self.visible {
            self.rect
        } else {
            self.rect.with_origin(self.hidden_origin.x, self.hidden_origin.y)
        }
    }

    fn floor_size(&self, mut rect: Rect) -> Rect {
        if rect.width() < self.min_width {
            rect.right = rect.left + self.min_width;
        }
        if rect.height() < self.min_height {
            rect.bottom = rect.top + self.min_height;
        }
        rect
    }

    /// Store `rect` (floored to the minimum size) and relayout.
    pub fn resize(&mut self, rect: Rect, ws: &mut dyn WindowSystem) {
        self.rect = self.floor_size(rect);
        self.relayout(ws);
    }

    /// Resize and show in a single relayout.
    pub fn place(&mut self, rect: Rect, ws: &mut dyn WindowSystem) {
        self.rect = self.floor_size(rect);
        self.visible = true;
        self.relayout(ws);
    }

    pub fn set_visibility(&mut self, visible: bool, ws: &mut dyn WindowSystem) {
        self.visible = visible;
        self.relayout(ws);
    }

    fn relayout(&mut self, ws: &mut dyn WindowSystem) {
        if !self.handle.is_valid() {
            return;
        }
        let effective = self.effective_rect();
        if self.proxy.is_some() {
            self.proxy = Some(effective);
        }
        match ws.relayout_window(self.handle, effective) {
            Ok(()) => tracing::trace!(handle = %self.handle, rect = ?effective, "relayout"),
            Err(err) => {
                tracing::warn!(handle = %self.handle, rect = ?effective, error = %err, "relayout failed");
            }
        }
    }

    /// Hide, tear down through the window system, and invalidate the handle.
    ///
    /// Calling this on an already removed window does nothing.
    pub fn remove(&mut self, ws: &mut dyn WindowSystem) {
        if !self.handle.is_valid() {
            return;
        }
        self.set_visibility(false, ws);
        if let Err(err) = ws.remove_window(self.handle) {
            tracing::warn!(handle = %self.handle, error = %err, "window removal failed");
        }
        tracing::debug!(handle = %self.handle, "window removed");
        self.detach();
    }

    /// The window system already destroyed this window; drop local ties to
    /// it without calling back.
    pub fn notify_removed_externally(&mut self) {
        tracing::debug!(handle = %self.handle, "window removed externally");
        self.detach();
    }

    fn detach(&mut self) {
        self.proxy = None;
        self.handle = WindowHandle::INVALID;
    }

    /// Reapply the remembered floating placement, if any, and show the
    /// window. Returns `false` without mutating when nothing is remembered.
    pub fn restore_last_floating_position(&mut self, ws: &mut dyn WindowSystem) -> bool {
        let Some(rect) = self.last_floating_rect else {
            return false;
        };
        self.rect = self.floor_size(rect);
        self.visible = true;
        self.relayout(ws);
        true
    }

    /// The user finished dragging this window's proxy to `rect`. The floored
    /// rectangle is what gets remembered.
    pub fn on_interactive_relayout(&mut self, rect: Rect, ws: &mut dyn WindowSystem) {
        self.resize(rect, ws);
        self.last_floating_rect = Some(self.rect);
    }

    /// The window system moved the window itself; record the new placement
    /// without echoing it back.
    pub fn apply_external_relayout(&mut self, rect: Rect) {
        self.rect = rect;
        self.last_floating_rect = Some(rect);
        if self.proxy.is_some() {
            self.proxy = Some(self.effective_rect());
        }
    }
}
