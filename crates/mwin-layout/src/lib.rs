#![forbid(unsafe_code)]

//! Mode state, position solving, and tab/window geometry.
//!
//! # Role in the workspace
//! `mwin-layout` is the layout engine. It decides where the panel, the
//! primary window, and every managed window go, and it talks to the host
//! only through the [`WindowSystem`] trait.
//!
//! # Primary responsibilities
//! - **LayoutState**: docked/right-side/expanded/floating-edit flags plus an
//!   observer registry.
//! - **compute_layout**: pure split of the display into panel, primary, and
//!   container rectangles.
//! - **Window / Tab / TabContainer**: bounded, ordered ownership of managed
//!   windows with equal-band (docked) and cascade (floating) placement.
//!
//! All types are single-threaded; the runtime marshals foreign-thread
//! notifications before touching them.

pub mod error;
pub mod policy;
pub mod solver;
pub mod state;
pub mod tab;
pub mod tab_container;
#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;
pub mod window;
pub mod window_system;

pub use error::{CapacityKind, LayoutError, LayoutResult};
pub use mwin_core::geometry::{Point, Rect};
pub use policy::{CASCADE_SLOTS, LayoutPolicy};
pub use solver::{SolvedLayout, SolverInput, collapsed_edge, compute_layout};
pub use state::{LayoutMode, LayoutState, Subscription, SubscriptionId};
pub use tab::{Tab, cascade_rect, docked_band};
pub use tab_container::{INITIAL_CONTAINER_RECT, TabContainer, TabId};
pub use window::Window;
pub use window_system::{AppDescriptor, WindowHandle, WindowSystem, WindowSystemError};
