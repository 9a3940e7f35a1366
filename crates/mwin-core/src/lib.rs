#![forbid(unsafe_code)]

//! Core: geometry, touch events, and gesture recognition.
//!
//! # Role in the workspace
//! `mwin-core` is the input layer. It owns the pixel-space geometry types,
//! the normalized touch event model hosts translate into, and the two
//! gesture recognizers that turn touch streams into divider positions and
//! proxy rectangles.
//!
//! # Primary responsibilities
//! - **Rect / Point**: edge-based rectangles in device pixels.
//! - **TouchEvent**: one or two contact points with a lifecycle phase.
//! - **DividerDrag**: threshold-gated, range-clamped panel divider drag.
//! - **ProxyDrag**: corner resize, pan, and pinch-scale of a proxy window.
//!
//! # How it fits in the system
//! `mwin-layout` consumes the geometry types to solve the split-screen
//! layout; `mwin-runtime` feeds host touches through the recognizers and
//! applies their effects to the layout.

pub mod event;
pub mod geometry;
pub mod gesture;
pub mod logging;

pub use event::{TouchEvent, TouchPhase, TouchPoint};
pub use geometry::{Point, Rect};
pub use gesture::{
    CornerFlags, DividerDrag, DividerDragConfig, DividerDragEffect, DividerDragState,
    DividerRange, DragZone, ProxyDrag, ProxyDragConfig, ProxyDragEffect,
};
