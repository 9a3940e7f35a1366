#![forbid(unsafe_code)]

//! Display mode flags with change notification.
//!
//! # Design
//!
//! [`LayoutState`] owns the four mode flags and a registry of observers.
//! Observers are stored as `Weak` callbacks keyed by a [`SubscriptionId`];
//! the strong side lives in the [`Subscription`] guard handed back to the
//! subscriber. Dropping the guard makes the callback unreachable, and
//! [`LayoutState::remove_observer`] removes it eagerly, so an observer that
//! is torn down can never be called afterwards.
//!
//! # Invariants
//!
//! 1. `version` increments by exactly 1 on each flag-changing mutation.
//! 2. Setting a flag to its current value is a no-op and notifies nobody.
//! 3. Observers are notified synchronously, in registration order.
//! 4. `floating_edit` only has meaning while undocked and `expanded` only
//!    while docked; the flags are stored independently and interpreted by
//!    the solver.

use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

type ObserverRc = Rc<dyn Fn(&LayoutMode)>;
type ObserverWeak = Weak<dyn Fn(&LayoutMode)>;

/// The four display mode flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayoutMode {
    /// Panel occupies a fixed vertical slice (vs. free-floating windows).
    pub docked: bool,
    /// Panel is anchored to the right display edge.
    pub right_side: bool,
    /// Docked panel is widened to show its windows.
    pub expanded: bool,
    /// Floating panel is being repositioned full-width.
    pub floating_edit: bool,
}

impl Default for LayoutMode {
    fn default() -> Self {
        Self {
            docked: true,
            right_side: true,
            expanded: false,
            floating_edit: false,
        }
    }
}

impl LayoutMode {
    /// Divider dragging is only allowed while docked and expanded.
    #[inline]
    #[must_use]
    pub const fn resizing_enabled(&self) -> bool {
        self.docked && self.expanded
    }
}

/// Stable key for a registered observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// RAII guard for an observer callback.
///
/// Dropping the guard detaches the callback; the registry entry is pruned on
/// the next notification.
pub struct Subscription {
    id: SubscriptionId,
    _guard: ObserverRc,
}

impl Subscription {
    #[must_use]
    pub const fn id(&self) -> SubscriptionId {
        self.id
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Mode flags plus their observer registry.
pub struct LayoutState {
    mode: LayoutMode,
    version: u64,
    next_id: u64,
    observers: Vec<(SubscriptionId, ObserverWeak)>,
}

impl std::fmt::Debug for LayoutState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutState")
            .field("mode", &self.mode)
            .field("version", &self.version)
            .field("observer_count", &self.observers.len())
            .finish()
    }
}

impl Default for LayoutState {
    fn default() -> Self {
        Self::new(LayoutMode::default())
    }
}

impl LayoutState {
    #[must_use]
    pub fn new(mode: LayoutMode) -> Self {
        Self {
            mode,
            version: 0,
            next_id: 1,
            observers: Vec::new(),
        }
    }

    /// Snapshot of the current flags.
    #[inline]
    #[must_use]
    pub const fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// Bumped once per effective change.
    #[inline]
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    #[inline]
    #[must_use]
    pub const fn docked(&self) -> bool {
        self.mode.docked
    }

    #[inline]
    #[must_use]
    pub const fn right_side(&self) -> bool {
        self.mode.right_side
    }

    #[inline]
    #[must_use]
    pub const fn expanded(&self) -> bool {
        self.mode.expanded
    }

    #[inline]
    #[must_use]
    pub const fn floating_edit(&self) -> bool {
        self.mode.floating_edit
    }

    pub fn set_docked(&mut self, docked: bool) -> bool {
        self.apply(LayoutMode {
            docked,
            ..self.mode
        })
    }

    pub fn set_right_side(&mut self, right_side: bool) -> bool {
        self.apply(LayoutMode {
            right_side,
            ..self.mode
        })
    }

    pub fn set_expanded(&mut self, expanded: bool) -> bool {
        self.apply(LayoutMode {
            expanded,
            ..self.mode
        })
    }

    pub fn set_floating_edit(&mut self, floating_edit: bool) -> bool {
        self.apply(LayoutMode {
            floating_edit,
            ..self.mode
        })
    }

    /// Replace all flags at once, notifying observers a single time if
    /// anything changed. Returns whether it did.
    pub fn apply(&mut self, mode: LayoutMode) -> bool {
        if self.mode == mode {
            return false;
        }
        tracing::debug!(from = ?self.mode, to = ?mode, "layout mode changed");
        self.mode = mode;
        self.version += 1;
        self.notify();
        true
    }

    /// Register an observer. Keep the returned guard alive for as long as the
    /// observer should be called.
    pub fn add_observer(&mut self, callback: impl Fn(&LayoutMode) + 'static) -> Subscription {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        let strong: ObserverRc = Rc::new(callback);
        self.observers.push((id, Rc::downgrade(&strong)));
        Subscription {
            id,
            _guard: strong,
        }
    }

    /// Detach an observer. Consumes the guard so the pairing is explicit.
    ///
    /// Returns `false` if the subscription was not registered here.
    pub fn remove_observer(&mut self, subscription: Subscription) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(id, _)| *id != subscription.id);
        before != self.observers.len()
    }

    /// Number of registered observers whose guard is still alive.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers
            .iter()
            .filter(|(_, weak)| weak.strong_count() > 0)
            .count()
    }

    /// Call every live observer with the current flags, pruning dead ones.
    pub fn notify(&mut self) {
        self.observers.retain(|(_, weak)| weak.strong_count() > 0);
        let callbacks: Vec<ObserverRc> = self
            .observers
            .iter()
            .filter_map(|(_, weak)| weak.upgrade())
            .collect();
        let mode = self.mode;
        for callback in &callbacks {
            callback(&mode);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[test]
    fn defaults_match_startup_mode() {
        let state = LayoutState::default();
        assert!(state.docked());
        assert!(state.right_side());
        assert!(!state.expanded());
        assert!(!state.floating_edit());
        assert!(!state.mode().resizing_enabled());
    }

    #[test]
    fn change_notifies_and_bumps_version() {
        let mut state = LayoutState::default();
        let count = Rc::new(Cell::new(0u32));
        let count_clone = Rc::clone(&count);
        let _sub = state.add_observer(move |_| count_clone.set(count_clone.get() + 1));

        assert!(state.set_expanded(true));
        assert_eq!(count.get(), 1);
        assert_eq!(state.version(), 1);
        assert!(state.mode().resizing_enabled());
    }

    #[test]
    fn same_value_is_silent() {
        let mut state = LayoutState::default();
        let count = Rc::new(Cell::new(0u32));
        let count_clone = Rc::clone(&count);
        let _sub = state.add_observer(move |_| count_clone.set(count_clone.get() + 1));

        assert!(!state.set_docked(true));
        assert_eq!(count.get(), 0);
        assert_eq!(state.version(), 0);
    }

    #[test]
    fn apply_notifies_once() {
        let mut state = LayoutState::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = Rc::clone(&seen);
        let _sub = state.add_observer(move |mode| seen_clone.borrow_mut().push(*mode));

        let target = LayoutMode {
            docked: false,
            right_side: false,
            expanded: false,
            floating_edit: true,
        };
        assert!(state.apply(target));
        assert_eq!(*seen.borrow(), vec![target]);
        assert_eq!(state.version(), 1);
    }

    #[test]
    fn observers_called_in_registration_order() {
        let mut state = LayoutState::default();
        let log = Rc::new(RefCell::new(Vec::new()));
        let (a, b) = (Rc::clone(&log), Rc::clone(&log));
        let _first = state.add_observer(move |_| a.borrow_mut().push("first"));
        let _second = state.add_observer(move |_| b.borrow_mut().push("second"));

        state.notify();
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn dropped_guard_is_never_called() {
        let mut state = LayoutState::default();
        let count = Rc::new(Cell::new(0u32));
        let count_clone = Rc::clone(&count);
        let sub = state.add_observer(move |_| count_clone.set(count_clone.get() + 1));
        drop(sub);

        state.set_right_side(false);
        assert_eq!(count.get(), 0);
        assert_eq!(state.observer_count(), 0);
    }

    #[test]
    fn remove_observer_is_paired() {
        let mut state = LayoutState::default();
        let keep = state.add_observer(|_| {});
        let gone = state.add_observer(|_| {});
        assert_eq!(state.observer_count(), 2);

        assert!(state.remove_observer(gone));
        assert_eq!(state.observer_count(), 1);
        assert_ne!(keep.id(), SubscriptionId(0));
    }
}
