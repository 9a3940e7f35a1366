#![forbid(unsafe_code)]

//! The top-level multi-window coordinator.
//!
//! [`MultiWindow`] owns the mode state, the tab container, both gesture
//! recognizers, and the window system. Every user action (toggle buttons,
//! tab buttons, touches) and every marshalled window-system notification ends
//! in the same place: pick the new mode and divider position, solve the
//! layout, and push the result to the panel, the primary window, and the
//! tabs.
//!
//! # Positions
//!
//! - The **edge** is the anchored display edge (right or left). A divider on
//!   the edge means the panel is collapsed.
//! - The **former position** is where an expanded docked panel reopens. The
//!   divider drag updates it continuously.
//!
//! # Threading
//!
//! `MultiWindow` is single-threaded. The only cross-thread entry point is
//! [`NotificationSender`], drained by [`MultiWindow::pump_notifications`].

use mwin_core::event::{TouchEvent, TouchPhase};
use mwin_core::gesture::{DividerDrag, DividerDragEffect, DividerRange, ProxyDrag, ProxyDragEffect};
use mwin_layout::{
    AppDescriptor, LayoutError, LayoutMode, LayoutState, Rect, SolvedLayout, SolverInput,
    Subscription, TabContainer, TabId, WindowHandle, WindowSystem, collapsed_edge,
    compute_layout,
};

use crate::config::{ConfigError, MultiWindowConfig};
use crate::error::Result;
use crate::messages::UserMessage;
use crate::notifications::{NotificationQueue, NotificationSender, WindowNotification};

/// Whether a touch handler kept the touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchDisposition {
    /// The touch drove a gesture and must not reach anything beneath.
    Consumed,
    /// Not ours; deliver it to whatever lies beneath.
    PassThrough,
}

impl TouchDisposition {
    #[must_use]
    pub const fn is_consumed(self) -> bool {
        matches!(self, Self::Consumed)
    }
}

/// The multi-window coordinator.
pub struct MultiWindow<W: WindowSystem> {
    config: MultiWindowConfig,
    app: AppDescriptor,
    display: Rect,
    ws: W,
    state: LayoutState,
    tabs: TabContainer,
    divider: DividerDrag,
    proxy: ProxyDrag,
    captured: Option<WindowHandle>,
    primary_handle: WindowHandle,
    managed_handle: WindowHandle,
    min_panel: i32,
    max_panel: i32,
    former_position: i32,
    layout: SolvedLayout,
    messages: Vec<UserMessage>,
    queue: NotificationQueue,
}

impl<W: WindowSystem> std::fmt::Debug for MultiWindow<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiWindow")
            .field("display", &self.display)
            .field("mode", &self.state.mode())
            .field("divider_x", &self.layout.divider_x)
            .field("former_position", &self.former_position)
            .field("tabs", &self.tabs.len())
            .finish_non_exhaustive()
    }
}

impl<W: WindowSystem> MultiWindow<W> {
    /// Start the coordinator: docked, right-anchored, collapsed, one empty
    /// tab.
    ///
    /// # Errors
    ///
    /// [`crate::RuntimeError::Config`] for an invalid configuration, and
    /// [`crate::RuntimeError::Layout`] when the stack handles cannot be queried.
    pub fn new(config: MultiWindowConfig, display: Rect, mut ws: W) -> Result<Self> {
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(ConfigError::Invalid(errors).into());
        }
        let app = config.app_descriptor()?;
        let primary_handle = ws.primary_stack_handle().map_err(LayoutError::from)?;
        let managed_handle = ws.managed_stack_handle().map_err(LayoutError::from)?;

        let min_panel = display.width() / config.min_panel_divisor;
        let max_panel = display.width() / config.max_panel_divisor;
        let state = LayoutState::default();

        if let Err(err) = ws.set_relayout_restriction(state.docked()) {
            tracing::warn!(error = %err, "relayout restriction not applied");
        }

        let initial = compute_layout(&SolverInput {
            display,
            divider_x: display.right,
            panel_width: config.panel_width,
            mode: state.mode(),
            active_window_count: 0,
        });

        let mut mw = Self {
            app,
            display,
            state,
            tabs: TabContainer::new(config.layout),
            divider: DividerDrag::new(config.divider_config()),
            proxy: ProxyDrag::new(config.proxy_config()),
            captured: None,
            primary_handle,
            managed_handle,
            min_panel,
            max_panel,
            former_position: display.right - min_panel,
            layout: initial,
            messages: Vec::new(),
            queue: NotificationQueue::new(config.notification_capacity),
            config,
            ws,
        };
        mw.set_position(display.right);
        let bounds = mw.display;
        tracing::info!(?bounds, min_panel, max_panel, "multi-window started");
        Ok(mw)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[must_use]
    pub const fn config(&self) -> &MultiWindowConfig {
        &self.config
    }

    #[must_use]
    pub const fn display(&self) -> Rect {
        self.display
    }

    #[must_use]
    pub const fn mode(&self) -> LayoutMode {
        self.state.mode()
    }

    #[must_use]
    pub const fn state(&self) -> &LayoutState {
        &self.state
    }

    /// The last solved layout.
    #[must_use]
    pub const fn layout(&self) -> SolvedLayout {
        self.layout
    }

    #[must_use]
    pub const fn divider_x(&self) -> i32 {
        self.layout.divider_x
    }

    #[must_use]
    pub const fn former_position(&self) -> i32 {
        self.former_position
    }

    /// Panel width bounds while expanded, as `(min, max)`.
    #[must_use]
    pub const fn panel_bounds(&self) -> (i32, i32) {
        (self.min_panel, self.max_panel)
    }

    #[must_use]
    pub const fn tabs(&self) -> &TabContainer {
        &self.tabs
    }

    #[must_use]
    pub const fn window_system(&self) -> &W {
        &self.ws
    }

    pub fn window_system_mut(&mut self) -> &mut W {
        &mut self.ws
    }

    #[must_use]
    pub const fn primary_handle(&self) -> WindowHandle {
        self.primary_handle
    }

    #[must_use]
    pub const fn managed_handle(&self) -> WindowHandle {
        self.managed_handle
    }

    /// Divider range on the anchored side.
    #[must_use]
    pub fn divider_range(&self) -> DividerRange {
        DividerRange::anchored(
            self.display,
            self.state.right_side(),
            self.min_panel,
            self.max_panel,
        )
    }

    /// Proxy being dragged and its working rectangle, for drawing feedback.
    #[must_use]
    pub fn dragging_proxy(&self) -> Option<(WindowHandle, Rect)> {
        Some((self.captured?, self.proxy.current_rect()?))
    }

    /// Register a mode observer. See [`LayoutState::add_observer`].
    pub fn add_observer(&mut self, callback: impl Fn(&LayoutMode) + 'static) -> Subscription {
        self.state.add_observer(callback)
    }

    pub fn remove_observer(&mut self, subscription: Subscription) -> bool {
        self.state.remove_observer(subscription)
    }

    /// Drain pending user messages.
    pub fn take_messages(&mut self) -> Vec<UserMessage> {
        std::mem::take(&mut self.messages)
    }

    // -----------------------------------------------------------------------
    // Positioning
    // -----------------------------------------------------------------------

    fn edge(&self) -> i32 {
        collapsed_edge(self.display, self.state.right_side())
    }

    /// Where the divider rests for the current mode.
    fn resting_position(&self) -> i32 {
        if self.state.mode().resizing_enabled() {
            self.former_position
        } else {
            self.edge()
        }
    }

    fn push_message(&mut self, message: UserMessage) {
        tracing::debug!(%message, "user message");
        self.messages.push(message);
    }

    /// Switch to `mode` and move the divider to `x`.
    fn commit(&mut self, mode: LayoutMode, x: i32) {
        if mode != self.state.mode() {
            tracing::info!(?mode, "mode changed");
        }
        self.divider.set_resizing_enabled(mode.resizing_enabled());
        if !mode.resizing_enabled() {
            self.divider.reset();
        }
        if !self.state.apply(mode) {
            self.state.notify();
        }
        self.relayout_all(x);
    }

    /// Move the divider to `x` in the current mode.
    fn set_position(&mut self, x: i32) {
        self.state.notify();
        self.relayout_all(x);
    }

    fn relayout_all(&mut self, x: i32) {
        let mode = self.state.mode();
        self.layout = compute_layout(&SolverInput {
            display: self.display,
            divider_x: x,
            panel_width: self.config.panel_width,
            mode,
            active_window_count: self.tabs.active_window_count(),
        });
        tracing::debug!(requested = x, x = self.layout.divider_x, ?mode, "position set");

        for (handle, rect) in [
            (self.managed_handle, self.layout.panel),
            (self.primary_handle, self.layout.primary),
        ] {
            if let Err(err) = self.ws.relayout_window(handle, rect) {
                tracing::warn!(%handle, ?rect, error = %err, "stack relayout failed");
            }
        }
        self.tabs.relayout(self.layout.container, mode.docked, &mut self.ws);
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Add a window running the default application to the active tab.
    ///
    /// Refusals become user messages and return `None`.
    pub fn add_window(&mut self) -> Option<WindowHandle> {
        let docked = self.state.docked();
        let added = match self.tabs.add_window(&self.app, docked, &mut self.ws) {
            Ok(handle) => Some(handle),
            Err(LayoutError::CapacityExceeded { .. }) => {
                self.push_message(UserMessage::MaxWindowsReached);
                None
            }
            Err(LayoutError::SystemUnavailable(err)) => {
                tracing::warn!(error = %err, "window not added");
                self.push_message(UserMessage::WindowSystemUnavailable);
                None
            }
            Err(err) => {
                tracing::warn!(error = %err, "window not added");
                None
            }
        };
        if self.state.expanded() && self.tabs.active_window_count() == 1 {
            self.set_position(self.former_position);
        }
        added
    }

    /// The panel toggle button.
    ///
    /// Floating: enter or leave floating edit. Docked: expand or collapse.
    pub fn toggle(&mut self) {
        let mut mode = self.state.mode();
        let x = if !mode.docked {
            mode.floating_edit = !mode.floating_edit;
            collapsed_edge(self.display, mode.right_side)
        } else {
            mode.expanded = !mode.expanded;
            if mode.expanded && self.tabs.active_window_count() != 0 {
                self.former_position
            } else {
                if mode.expanded {
                    self.push_message(UserMessage::CantExpandWithoutWindow);
                }
                collapsed_edge(self.display, mode.right_side)
            }
        };
        self.commit(mode, x);
    }

    /// Anchor the panel to the other side of the display.
    pub fn toggle_side(&mut self) {
        let mut mode = self.state.mode();
        mode.right_side = !mode.right_side;
        self.former_position = self.display.left + self.display.right - self.former_position;
        let x = if mode.expanded && self.tabs.active_window_count() != 0 {
            self.former_position
        } else {
            collapsed_edge(self.display, mode.right_side)
        };
        self.commit(mode, x);
    }

    /// Switch between docked and floating.
    ///
    /// Leaving docked collapses; entering docked expands to the minimum panel
    /// width, which becomes the former position.
    pub fn toggle_docked(&mut self) {
        let mut mode = self.state.mode();
        let x = if mode.docked {
            mode.docked = false;
            mode.expanded = false;
            mode.floating_edit = false;
            tracing::info!("switching from docked to floating");
            collapsed_edge(self.display, mode.right_side)
        } else {
            mode.docked = true;
            mode.expanded = true;
            mode.floating_edit = false;
            let x = if mode.right_side {
                self.display.right - self.min_panel
            } else {
                self.display.left + self.min_panel
            };
            self.former_position = x;
            tracing::info!("switching from floating to docked");
            x
        };
        if let Err(err) = self.ws.set_relayout_restriction(mode.docked) {
            tracing::warn!(error = %err, "relayout restriction not applied");
        }
        self.commit(mode, x);
    }

    /// Open a new tab and switch to it. Docked tabs start with one window.
    pub fn add_tab(&mut self) -> Option<TabId> {
        let docked = self.state.docked();
        match self.tabs.add_tab(docked, &mut self.ws) {
            Ok(id) => {
                if docked {
                    self.add_window();
                }
                self.set_position(self.resting_position());
                Some(id)
            }
            Err(err) => {
                tracing::debug!(error = %err, "tab not added");
                self.push_message(UserMessage::MaxTabsReached);
                None
            }
        }
    }

    /// Close a tab and its windows.
    pub fn remove_tab(&mut self, id: TabId) -> bool {
        match self.tabs.remove_tab(id, self.state.docked(), &mut self.ws) {
            Ok(()) => {
                self.set_position(self.resting_position());
                true
            }
            Err(LayoutError::TabFloorReached { .. }) => {
                self.push_message(UserMessage::LastTabCannotBeRemoved);
                false
            }
            Err(err) => {
                tracing::warn!(error = %err, "tab not removed");
                false
            }
        }
    }

    pub fn switch_tab(&mut self, id: TabId) -> bool {
        match self.tabs.switch_to(id, self.state.docked(), &mut self.ws) {
            Ok(()) => {
                self.captured = None;
                self.proxy.reset();
                self.set_position(self.resting_position());
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "tab not switched");
                false
            }
        }
    }

    /// A tap on the empty ghost layer leaves floating edit.
    pub fn ghost_layer_tap(&mut self) {
        let mut mode = self.state.mode();
        if !mode.floating_edit {
            return;
        }
        mode.floating_edit = false;
        self.commit(mode, collapsed_edge(self.display, mode.right_side));
    }

    /// Tear down every tab. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if self.tabs.is_empty() {
            return;
        }
        self.captured = None;
        self.proxy.reset();
        self.tabs.clear_all(&mut self.ws);
        tracing::info!("multi-window shut down");
    }

    // -----------------------------------------------------------------------
    // Touch routing
    // -----------------------------------------------------------------------

    fn resize_panel(&mut self, x: i32) {
        if !self.state.mode().resizing_enabled() || self.tabs.active_window_count() == 0 {
            return;
        }
        self.set_position(x);
        self.former_position = self.layout.divider_x;
    }

    /// Route a touch on the divider layer.
    pub fn handle_divider_touch(&mut self, event: &TouchEvent) -> TouchDisposition {
        let range = self.divider_range();
        let effect = self.divider.process(event, &range);
        match effect {
            DividerDragEffect::DragStarted { x }
            | DividerDragEffect::DragUpdated { x }
            | DividerDragEffect::Committed { x } => self.resize_panel(x),
            DividerDragEffect::Canceled { last_x: Some(x) } => self.former_position = x,
            _ => {}
        }
        if effect.consumes_touch() {
            TouchDisposition::Consumed
        } else {
            TouchDisposition::PassThrough
        }
    }

    /// Topmost visible proxy of the active tab under `(x, y)`.
    fn hit_test_proxy(&self, x: i32, y: i32) -> Option<(WindowHandle, Rect)> {
        let tab = self.tabs.active_tab()?;
        tab.windows()
            .iter()
            .rev()
            .filter(|w| w.is_visible())
            .find_map(|w| {
                let rect = w.proxy_rect()?;
                rect.contains(x, y).then_some((w.handle(), rect))
            })
    }

    /// Route a touch on the proxy layer. Proxies are only interactive while
    /// floating.
    pub fn handle_proxy_touch(&mut self, event: &TouchEvent) -> TouchDisposition {
        if self.state.docked() {
            self.captured = None;
            self.proxy.reset();
            return TouchDisposition::PassThrough;
        }

        if event.phase == TouchPhase::Down {
            self.proxy.reset();
            self.captured = None;
            let Some(contact) = event.primary() else {
                return TouchDisposition::PassThrough;
            };
            let Some((handle, rect)) = self.hit_test_proxy(contact.x, contact.y) else {
                return TouchDisposition::PassThrough;
            };
            self.captured = Some(handle);
            let effect = self.proxy.process(event, rect);
            tracing::debug!(%handle, ?effect, "proxy captured");
            return TouchDisposition::Consumed;
        }

        let Some(handle) = self.captured else {
            return TouchDisposition::PassThrough;
        };
        let Some(rect) = self.proxy.current_rect() else {
            self.captured = None;
            return TouchDisposition::PassThrough;
        };
        match self.proxy.process(event, rect) {
            ProxyDragEffect::Released { rect } => {
                self.captured = None;
                match self.tabs.find_window_mut(handle) {
                    Some(window) => {
                        tracing::debug!(%handle, ?rect, "proxy released");
                        window.on_interactive_relayout(rect, &mut self.ws);
                    }
                    None => tracing::debug!(%handle, "proxy released for a vanished window"),
                }
            }
            ProxyDragEffect::Canceled => {
                self.captured = None;
            }
            _ => {}
        }
        TouchDisposition::Consumed
    }

    // -----------------------------------------------------------------------
    // Notifications
    // -----------------------------------------------------------------------

    /// A `Send + Clone` handle for the window system's callback thread.
    #[must_use]
    pub fn notification_sender(&self) -> NotificationSender {
        self.queue.sender()
    }

    /// Apply every queued notification in delivery order. Returns how many
    /// were applied.
    pub fn pump_notifications(&mut self) -> usize {
        let mut applied = 0;
        while let Some(notification) = self.queue.try_next() {
            self.apply_notification(notification);
            applied += 1;
        }
        applied
    }

    fn apply_notification(&mut self, notification: WindowNotification) {
        match notification {
            WindowNotification::Removed(handle) => {
                if self.captured == Some(handle) {
                    self.captured = None;
                    self.proxy.reset();
                }
                if !self.tabs.forget_window(handle, self.state.docked(), &mut self.ws) {
                    tracing::debug!(%handle, "removal notification for unknown window");
                    return;
                }
                tracing::debug!(%handle, "window removed externally");
                if self.state.expanded() && self.tabs.active_window_count() == 0 {
                    self.set_position(self.edge());
                }
            }
            WindowNotification::Relayouted { handle, rect } => {
                match self.tabs.find_window_mut(handle) {
                    Some(window) => window.apply_external_relayout(rect),
                    None => tracing::debug!(%handle, "relayout notification for unknown window"),
                }
            }
        }
    }
}

impl<W: WindowSystem> Drop for MultiWindow<W> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuntimeError;
    use mwin_layout::testing::{RecordingWindowSystem, WsCall};
    use std::cell::Cell;
    use std::rc::Rc;

    const DISPLAY: Rect = Rect::new(0, 40, 1080, 1920);

    fn start() -> MultiWindow<RecordingWindowSystem> {
        MultiWindow::new(
            MultiWindowConfig::default(),
            DISPLAY,
            RecordingWindowSystem::new(),
        )
        .expect("start")
    }

    #[test]
    fn starts_docked_collapsed_right() {
        let mw = start();
        assert_eq!(mw.mode(), LayoutMode::default());
        assert_eq!(mw.divider_x(), 1080);
        assert_eq!(mw.panel_bounds(), (270, 540));
        assert_eq!(mw.former_position(), 810);
        assert_eq!(mw.window_system().relayout_restriction(), Some(true));
        assert_eq!(
            mw.window_system().last_rect(mw.managed_handle()),
            Some(Rect::new(984, 40, 1080, 1920))
        );
        assert_eq!(
            mw.window_system().last_rect(mw.primary_handle()),
            Some(Rect::new(0, 40, 984, 1920))
        );
    }

    #[test]
    fn start_fails_without_stack_handles() {
        let mut ws = RecordingWindowSystem::new();
        ws.fail_all(true);
        let err = MultiWindow::new(MultiWindowConfig::default(), DISPLAY, ws).expect_err("fail");
        assert!(matches!(err, RuntimeError::Layout(LayoutError::SystemUnavailable(_))));
    }

    #[test]
    fn start_rejects_invalid_config() {
        let config = MultiWindowConfig {
            panel_width: 0,
            ..MultiWindowConfig::default()
        };
        let err = MultiWindow::new(config, DISPLAY, RecordingWindowSystem::new()).expect_err("fail");
        assert!(matches!(err, RuntimeError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn expand_without_window_is_refused() {
        let mut mw = start();
        mw.toggle();
        assert!(mw.mode().expanded);
        assert_eq!(mw.divider_x(), 1080);
        assert_eq!(mw.take_messages(), vec![UserMessage::CantExpandWithoutWindow]);
    }

    #[test]
    fn expand_with_window_opens_at_former_position() {
        let mut mw = start();
        mw.add_window().expect("window");
        mw.toggle();
        assert_eq!(mw.divider_x(), 810);
        assert_eq!(mw.layout().container, Rect::new(810, 40, 1080, 1920));
        mw.toggle();
        assert_eq!(mw.divider_x(), 1080);
    }

    #[test]
    fn first_window_reopens_expanded_panel() {
        let mut mw = start();
        mw.toggle();
        mw.take_messages();
        mw.add_window().expect("window");
        assert_eq!(mw.divider_x(), 810);
    }

    #[test]
    fn fifth_window_reports_capacity() {
        let mut mw = start();
        for _ in 0..4 {
            mw.add_window().expect("window");
        }
        assert_eq!(mw.add_window(), None);
        assert_eq!(mw.take_messages(), vec![UserMessage::MaxWindowsReached]);
    }

    #[test]
    fn window_system_failure_reports_message() {
        let mut mw = start();
        mw.window_system_mut().fail_init(true);
        assert_eq!(mw.add_window(), None);
        assert_eq!(mw.take_messages(), vec![UserMessage::WindowSystemUnavailable]);
        assert_eq!(mw.tabs().active_window_count(), 0);
    }

    #[test]
    fn toggle_side_mirrors_former_position() {
        let mut mw = start();
        mw.add_window().expect("window");
        mw.toggle();
        mw.toggle_side();
        assert!(!mw.mode().right_side);
        assert_eq!(mw.former_position(), 270);
        assert_eq!(mw.divider_x(), 270);
        assert_eq!(mw.layout().container, Rect::new(0, 40, 270, 1920));
    }

    #[test]
    fn toggle_side_collapsed_goes_to_left_edge() {
        let mut mw = start();
        mw.toggle_side();
        assert_eq!(mw.divider_x(), 0);
        assert_eq!(mw.layout().panel, Rect::new(0, 40, 96, 1920));
    }

    #[test]
    fn toggle_docked_round_trip() {
        let mut mw = start();
        mw.add_window().expect("window");
        mw.toggle_docked();
        assert!(!mw.mode().docked);
        assert_eq!(mw.window_system().relayout_restriction(), Some(false));
        assert_eq!(mw.divider_x(), 1080);

        mw.toggle_docked();
        let mode = mw.mode();
        assert!(mode.docked && mode.expanded && !mode.floating_edit);
        assert_eq!(mw.divider_x(), 810);
        assert_eq!(mw.former_position(), 810);
        assert_eq!(mw.window_system().relayout_restriction(), Some(true));
    }

    #[test]
    fn floating_edit_and_ghost_tap() {
        let mut mw = start();
        mw.add_window().expect("window");
        mw.toggle_docked();
        mw.toggle();
        assert!(mw.mode().floating_edit);
        assert_eq!(mw.layout().panel, Rect::new(0, 40, 1080, 1920));

        mw.ghost_layer_tap();
        assert!(!mw.mode().floating_edit);
        assert_eq!(mw.layout().panel, Rect::new(984, 40, 1080, 1920));

        let version = mw.state().version();
        mw.ghost_layer_tap();
        assert_eq!(mw.state().version(), version);
    }

    #[test]
    fn docked_add_tab_gets_a_window() {
        let mut mw = start();
        let id = mw.add_tab().expect("tab");
        assert_eq!(mw.tabs().active_tab_id(), Some(id));
        assert_eq!(mw.tabs().active_window_count(), 1);
    }

    #[test]
    fn tab_limits_report_messages() {
        let mut mw = start();
        for _ in 0..3 {
            mw.add_tab().expect("tab");
        }
        assert_eq!(mw.add_tab(), None);
        assert_eq!(mw.take_messages(), vec![UserMessage::MaxTabsReached]);

        let ids: Vec<TabId> = mw.tabs().tabs().iter().map(|t| t.id()).collect();
        for id in &ids[1..] {
            assert!(mw.remove_tab(*id));
        }
        assert!(!mw.remove_tab(ids[0]));
        assert_eq!(mw.take_messages(), vec![UserMessage::LastTabCannotBeRemoved]);
    }

    #[test]
    fn observers_see_every_reposition() {
        let mut mw = start();
        let count = Rc::new(Cell::new(0u32));
        let count_clone = Rc::clone(&count);
        let sub = mw.add_observer(move |_| count_clone.set(count_clone.get() + 1));

        mw.toggle();
        mw.toggle();
        assert_eq!(count.get(), 2);

        assert!(mw.remove_observer(sub));
        mw.toggle();
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn shutdown_tears_down_all_windows() {
        let mut mw = start();
        let a = mw.add_window().expect("window");
        mw.add_tab().expect("tab");
        mw.shutdown();
        assert!(mw.tabs().is_empty());
        assert!(mw.window_system().removed().contains(&a));
        let calls = mw.window_system_mut().take_calls();
        mw.shutdown();
        assert!(mw.window_system().calls().is_empty());
        assert!(calls.iter().any(|c| matches!(c, WsCall::RemoveWindow(_))));
    }
}
