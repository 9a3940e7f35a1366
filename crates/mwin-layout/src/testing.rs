#![forbid(unsafe_code)]

//! In-memory window system for tests.
//!
//! [`RecordingWindowSystem`] hands out sequential handles, remembers the last
//! rectangle sent for every handle, and logs each call in order. It can be
//! told to fail window creation or every call, to exercise the
//! log-and-continue paths.

use std::collections::BTreeMap;

use mwin_core::geometry::Rect;

use crate::window_system::{AppDescriptor, WindowHandle, WindowSystem, WindowSystemError};

/// First handle issued for managed windows.
const FIRST_WINDOW_HANDLE: i32 = 100;

/// One recorded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WsCall {
    InitWindow(Rect),
    RelayoutWindow(WindowHandle, Rect),
    RemoveWindow(WindowHandle),
    StartApplication {
        app: AppDescriptor,
        handle: WindowHandle,
    },
    SetRelayoutRestriction(bool),
}

/// Recording [`WindowSystem`] double.
#[derive(Debug, Clone)]
pub struct RecordingWindowSystem {
    calls: Vec<WsCall>,
    rects: BTreeMap<WindowHandle, Rect>,
    removed: Vec<WindowHandle>,
    next_handle: i32,
    primary: WindowHandle,
    managed: WindowHandle,
    restriction: Option<bool>,
    fail_init: bool,
    fail_all: bool,
}

impl Default for RecordingWindowSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingWindowSystem {
    /// Primary stack is `#1`, managed stack is `#2`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            rects: BTreeMap::new(),
            removed: Vec::new(),
            next_handle: FIRST_WINDOW_HANDLE,
            primary: WindowHandle::new(1),
            managed: WindowHandle::new(2),
            restriction: None,
            fail_init: false,
            fail_all: false,
        }
    }

    /// Make `init_window` fail.
    pub fn fail_init(&mut self, fail: bool) {
        self.fail_init = fail;
    }

    /// Make every call fail.
    pub fn fail_all(&mut self, fail: bool) {
        self.fail_all = fail;
    }

    #[must_use]
    pub fn calls(&self) -> &[WsCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<WsCall> {
        std::mem::take(&mut self.calls)
    }

    /// Last rectangle successfully sent for `handle`.
    #[must_use]
    pub fn last_rect(&self, handle: WindowHandle) -> Option<Rect> {
        self.rects.get(&handle).copied()
    }

    /// Created and not yet removed.
    #[must_use]
    pub fn is_live(&self, handle: WindowHandle) -> bool {
        handle.get() >= FIRST_WINDOW_HANDLE
            && self.rects.contains_key(&handle)
            && !self.removed.contains(&handle)
    }

    /// Managed windows created and not yet removed.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.rects
            .keys()
            .filter(|handle| self.is_live(**handle))
            .count()
    }

    /// Handles removed through [`WindowSystem::remove_window`], in order.
    #[must_use]
    pub fn removed(&self) -> &[WindowHandle] {
        &self.removed
    }

    /// Last value passed to `set_relayout_restriction`.
    #[must_use]
    pub const fn relayout_restriction(&self) -> Option<bool> {
        self.restriction
    }

    #[must_use]
    pub const fn primary(&self) -> WindowHandle {
        self.primary
    }

    #[must_use]
    pub const fn managed(&self) -> WindowHandle {
        self.managed
    }

    fn check(&self, op: &'static str) -> Result<(), WindowSystemError> {
        if self.fail_all {
            Err(WindowSystemError::Unavailable { op })
        } else {
            Ok(())
        }
    }
}

impl WindowSystem for RecordingWindowSystem {
    fn init_window(&mut self, rect: Rect) -> Result<WindowHandle, WindowSystemError> {
        self.calls.push(WsCall::InitWindow(rect));
        self.check("init_window")?;
        if self.fail_init {
            return Err(WindowSystemError::Unavailable { op: "init_window" });
        }
        let handle = WindowHandle::new(self.next_handle);
        self.next_handle += 1;
        self.rects.insert(handle, rect);
        Ok(handle)
    }

    fn relayout_window(&mut self, handle: WindowHandle, rect: Rect) -> Result<(), WindowSystemError> {
        self.calls.push(WsCall::RelayoutWindow(handle, rect));
        self.check("relayout_window")?;
        let known = handle == self.primary || handle == self.managed || self.is_live(handle);
        if !known {
            return Err(WindowSystemError::UnknownHandle(handle));
        }
        self.rects.insert(handle, rect);
        Ok(())
    }

    fn remove_window(&mut self, handle: WindowHandle) -> Result<(), WindowSystemError> {
        self.calls.push(WsCall::RemoveWindow(handle));
        self.check("remove_window")?;
        if !self.is_live(handle) {
            return Err(WindowSystemError::UnknownHandle(handle));
        }
        self.removed.push(handle);
        Ok(())
    }

    fn start_application(
        &mut self,
        app: &AppDescriptor,
        handle: WindowHandle,
    ) -> Result<(), WindowSystemError> {
        self.calls.push(WsCall::StartApplication {
            app: app.clone(),
            handle,
        });
        self.check("start_application")
    }

    fn primary_stack_handle(&self) -> Result<WindowHandle, WindowSystemError> {
        self.check("primary_stack_handle")?;
        Ok(self.primary)
    }

    fn managed_stack_handle(&self) -> Result<WindowHandle, WindowSystemError> {
        self.check("managed_stack_handle")?;
        Ok(self.managed)
    }

    fn set_relayout_restriction(&mut self, restricted: bool) -> Result<(), WindowSystemError> {
        self.calls.push(WsCall::SetRelayoutRestriction(restricted));
        self.check("set_relayout_restriction")?;
        self.restriction = Some(restricted);
        Ok(())
    }
}
