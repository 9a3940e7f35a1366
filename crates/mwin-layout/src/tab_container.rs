#![forbid(unsafe_code)]

//! The ordered set of tabs and the active-tab invariant.
//!
//! # Invariants
//!
//! 1. While non-empty, exactly one tab is active and `active` names it.
//! 2. The tab count stays within `min_tabs..=max_tabs`; only
//!    [`TabContainer::clear_all`] goes below the floor, at teardown.
//! 3. Removing the active tab activates a neighbour first: the next tab, or
//!    the previous one when the removed tab was last.
//!
//! # Failure Modes
//!
//! Capacity and lookup failures are returned without mutating anything.

use std::fmt;

use mwin_core::geometry::Rect;

use crate::error::{CapacityKind, LayoutError, LayoutResult};
use crate::policy::LayoutPolicy;
use crate::tab::Tab;
use crate::window::Window;
use crate::window_system::{AppDescriptor, WindowHandle, WindowSystem};

/// Container rectangle used until the first real relayout.
pub const INITIAL_CONTAINER_RECT: Rect = Rect::new(-3000, 0, 0, 1000);

/// Stable identifier for a tab, unique within its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TabId(u64);

impl TabId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab-{}", self.0)
    }
}

/// Owns every tab and tracks which one is active.
#[derive(Debug)]
pub struct TabContainer {
    tabs: Vec<Tab>,
    active: Option<TabId>,
    next_id: u64,
    container_rect: Rect,
    policy: LayoutPolicy,
}

impl TabContainer {
    /// A container holding one active, empty tab.
    #[must_use]
    pub fn new(policy: LayoutPolicy) -> Self {
        let first = TabId(1);
        Self {
            tabs: vec![Tab::new(first, policy)],
            active: Some(first),
            next_id: 2,
            container_rect: INITIAL_CONTAINER_RECT,
            policy,
        }
    }

    #[must_use]
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    #[must_use]
    pub const fn container_rect(&self) -> Rect {
        self.container_rect
    }

    #[must_use]
    pub const fn active_tab_id(&self) -> Option<TabId> {
        self.active
    }

    #[must_use]
    pub fn tab(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id() == id)
    }

    #[must_use]
    pub fn active_tab(&self) -> Option<&Tab> {
        self.active.and_then(|id| self.tab(id))
    }

    fn active_tab_mut(&mut self) -> Option<&mut Tab> {
        let id = self.active?;
        self.tabs.iter_mut().find(|t| t.id() == id)
    }

    /// Window count of the active tab, zero when there is none.
    #[must_use]
    pub fn active_window_count(&self) -> usize {
        self.active_tab().map_or(0, Tab::len)
    }

    /// Append a new tab and switch to it.
    ///
    /// # Errors
    ///
    /// [`LayoutError::CapacityExceeded`] at the tab ceiling.
    pub fn add_tab(&mut self, docked: bool, ws: &mut dyn WindowSystem) -> LayoutResult<TabId> {
        if self.tabs.len() >= self.policy.max_tabs {
            return Err(LayoutError::CapacityExceeded {
                kind: CapacityKind::Tabs,
                limit: self.policy.max_tabs,
            });
        }
        for tab in &mut self.tabs {
            tab.set_active(false);
        }
        let id = TabId(self.next_id);
        self.next_id += 1;
        self.tabs.push(Tab::new(id, self.policy));
        tracing::info!(tab = %id, count = self.tabs.len(), "tab added");
        self.switch_to(id, docked, ws)?;
        Ok(id)
    }

    /// Tear down a tab and its windows.
    ///
    /// # Errors
    ///
    /// [`LayoutError::TabFloorReached`] when only the minimum number of tabs
    /// remains; [`LayoutError::TabNotFound`] for an unknown id.
    pub fn remove_tab(
        &mut self,
        id: TabId,
        docked: bool,
        ws: &mut dyn WindowSystem,
    ) -> LayoutResult<()> {
        let floor = self.policy.min_tabs.max(1);
        if self.tabs.len() <= floor {
            return Err(LayoutError::TabFloorReached { min: floor });
        }
        let index = self
            .tabs
            .iter()
            .position(|t| t.id() == id)
            .ok_or(LayoutError::TabNotFound(id))?;

        if self.active == Some(id) {
            let neighbour = if index + 1 == self.tabs.len() {
                index - 1
            } else {
                index + 1
            };
            let target = self.tabs[neighbour].id();
            self.switch_to(target, docked, ws)?;
        }

        let mut tab = self.tabs.remove(index);
        tab.teardown(ws);
        tracing::info!(tab = %id, count = self.tabs.len(), "tab removed");
        Ok(())
    }

    /// Make `id` the only active tab and relayout against the last known
    /// container rectangle.
    ///
    /// # Errors
    ///
    /// [`LayoutError::TabNotFound`] for an unknown id.
    pub fn switch_to(&mut self, id: TabId, docked: bool, ws: &mut dyn WindowSystem) -> LayoutResult<()> {
        if self.tab(id).is_none() {
            return Err(LayoutError::TabNotFound(id));
        }
        for tab in &mut self.tabs {
            tab.set_active(tab.id() == id);
        }
        self.active = Some(id);
        tracing::debug!(tab = %id, "switched tab");
        self.relayout(self.container_rect, docked, ws);
        Ok(())
    }

    /// Store `container` and lay out every tab against it.
    pub fn relayout(&mut self, container: Rect, docked: bool, ws: &mut dyn WindowSystem) {
        self.container_rect = container;
        for tab in &mut self.tabs {
            tab.resize_windows(container, docked, ws);
        }
    }

    /// Add a window to the active tab.
    ///
    /// # Errors
    ///
    /// See [`Tab::add_window`]; [`LayoutError::TabInactive`] when no tab is
    /// active.
    pub fn add_window(
        &mut self,
        app: &AppDescriptor,
        docked: bool,
        ws: &mut dyn WindowSystem,
    ) -> LayoutResult<WindowHandle> {
        let tab = self.active_tab_mut().ok_or(LayoutError::TabInactive)?;
        tab.add_window(app, docked, ws)
    }

    /// Tear down the window with `handle`, wherever it lives.
    pub fn remove_window(
        &mut self,
        handle: WindowHandle,
        docked: bool,
        ws: &mut dyn WindowSystem,
    ) -> bool {
        self.tabs
            .iter_mut()
            .any(|tab| tab.remove_window(handle, docked, ws))
    }

    /// Drop a window the window system already removed, wherever it lives.
    pub fn forget_window(
        &mut self,
        handle: WindowHandle,
        docked: bool,
        ws: &mut dyn WindowSystem,
    ) -> bool {
        self.tabs
            .iter_mut()
            .any(|tab| tab.forget_window(handle, docked, ws))
    }

    #[must_use]
    pub fn find_window(&self, handle: WindowHandle) -> Option<&Window> {
        self.tabs.iter().find_map(|tab| tab.window(handle))
    }

    pub fn find_window_mut(&mut self, handle: WindowHandle) -> Option<&mut Window> {
        self.tabs.iter_mut().find_map(|tab| tab.window_mut(handle))
    }

    /// Tear down every tab. The container is empty afterwards.
    pub fn clear_all(&mut self, ws: &mut dyn WindowSystem) {
        for tab in &mut self.tabs {
            tab.teardown(ws);
        }
        self.tabs.clear();
        self.active = None;
        tracing::info!("all tabs cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingWindowSystem;

    fn app() -> AppDescriptor {
        AppDescriptor::from_class_name("org.example.Notes").expect("valid")
    }

    fn active_count(container: &TabContainer) -> usize {
        container.tabs().iter().filter(|t| t.is_active()).count()
    }

    #[test]
    fn starts_with_one_active_tab() {
        let container = TabContainer::new(LayoutPolicy::default());
        assert_eq!(container.len(), 1);
        assert_eq!(active_count(&container), 1);
        assert_eq!(container.active_window_count(), 0);
        assert_eq!(container.container_rect(), INITIAL_CONTAINER_RECT);
    }

    #[test]
    fn add_tab_activates_new_tab() {
        let mut ws = RecordingWindowSystem::new();
        let mut container = TabContainer::new(LayoutPolicy::default());
        let id = container.add_tab(true, &mut ws).expect("add");
        assert_eq!(container.active_tab_id(), Some(id));
        assert_eq!(active_count(&container), 1);
    }

    #[test]
    fn tab_ceiling_enforced() {
        let mut ws = RecordingWindowSystem::new();
        let mut container = TabContainer::new(LayoutPolicy::default());
        for _ in 0..3 {
            container.add_tab(true, &mut ws).expect("add");
        }
        assert_eq!(
            container.add_tab(true, &mut ws),
            Err(LayoutError::CapacityExceeded {
                kind: CapacityKind::Tabs,
                limit: 4
            })
        );
        assert_eq!(container.len(), 4);
    }

    #[test]
    fn last_tab_cannot_be_removed() {
        let mut ws = RecordingWindowSystem::new();
        let mut container = TabContainer::new(LayoutPolicy::default());
        let only = container.active_tab_id().expect("active");
        assert_eq!(
            container.remove_tab(only, true, &mut ws),
            Err(LayoutError::TabFloorReached { min: 1 })
        );
        assert_eq!(container.len(), 1);
    }

    #[test]
    fn zero_tab_floor_still_keeps_one_tab() {
        let mut ws = RecordingWindowSystem::new();
        let mut container = TabContainer::new(LayoutPolicy {
            min_tabs: 0,
            ..LayoutPolicy::default()
        });
        let only = container.active_tab_id().expect("active");
        assert_eq!(
            container.remove_tab(only, true, &mut ws),
            Err(LayoutError::TabFloorReached { min: 1 })
        );
        assert_eq!(container.len(), 1);
        assert_eq!(active_count(&container), 1);
    }

    #[test]
    fn removing_active_tab_activates_next_then_previous() {
        let mut ws = RecordingWindowSystem::new();
        let mut container = TabContainer::new(LayoutPolicy::default());
        let first = container.active_tab_id().expect("active");
        let second = container.add_tab(true, &mut ws).expect("add");
        let third = container.add_tab(true, &mut ws).expect("add");

        container.switch_to(first, true, &mut ws).expect("switch");
        container.remove_tab(first, true, &mut ws).expect("remove");
        assert_eq!(container.active_tab_id(), Some(second));

        container.switch_to(third, true, &mut ws).expect("switch");
        container.remove_tab(third, true, &mut ws).expect("remove");
        assert_eq!(container.active_tab_id(), Some(second));
        assert_eq!(active_count(&container), 1);
    }

    #[test]
    fn removing_tab_tears_down_its_windows() {
        let mut ws = RecordingWindowSystem::new();
        let mut container = TabContainer::new(LayoutPolicy::default());
        let first = container.active_tab_id().expect("active");
        let handle = container.add_window(&app(), true, &mut ws).expect("window");
        container.add_tab(true, &mut ws).expect("add");

        container.remove_tab(first, true, &mut ws).expect("remove");
        assert!(ws.removed().contains(&handle));
        assert!(container.find_window(handle).is_none());
    }

    #[test]
    fn switch_hides_inactive_windows() {
        let mut ws = RecordingWindowSystem::new();
        let mut container = TabContainer::new(LayoutPolicy::default());
        container.relayout(Rect::new(810, 40, 1080, 1920), true, &mut ws);
        let handle = container.add_window(&app(), true, &mut ws).expect("window");
        container.add_tab(true, &mut ws).expect("add");

        let window = container.find_window(handle).expect("found");
        assert!(!window.is_visible());
        assert_eq!(window.rect(), Rect::new(810, 40, 1080, 1920));
    }

    #[test]
    fn unknown_tab_is_not_found() {
        let mut ws = RecordingWindowSystem::new();
        let mut container = TabContainer::new(LayoutPolicy::default());
        container.add_tab(true, &mut ws).expect("add");
        let missing = TabId::new(99);
        assert_eq!(
            container.switch_to(missing, true, &mut ws),
            Err(LayoutError::TabNotFound(missing))
        );
        assert_eq!(
            container.remove_tab(missing, true, &mut ws),
            Err(LayoutError::TabNotFound(missing))
        );
    }

    #[test]
    fn window_lookup_spans_tabs() {
        let mut ws = RecordingWindowSystem::new();
        let mut container = TabContainer::new(LayoutPolicy::default());
        let a = container.add_window(&app(), true, &mut ws).expect("window");
        container.add_tab(true, &mut ws).expect("add");
        let b = container.add_window(&app(), true, &mut ws).expect("window");

        assert!(container.find_window(a).is_some());
        assert!(container.find_window(b).is_some());
        assert!(container.forget_window(a, true, &mut ws));
        assert!(container.find_window(a).is_none());
        assert!(!container.remove_window(a, true, &mut ws));
    }

    #[test]
    fn clear_all_empties() {
        let mut ws = RecordingWindowSystem::new();
        let mut container = TabContainer::new(LayoutPolicy::default());
        let handle = container.add_window(&app(), true, &mut ws).expect("window");
        container.clear_all(&mut ws);
        assert!(container.is_empty());
        assert_eq!(container.active_tab_id(), None);
        assert!(ws.removed().contains(&handle));
    }
}
