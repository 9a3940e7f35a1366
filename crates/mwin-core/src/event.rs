#![forbid(unsafe_code)]

//! Canonical touch event types.
//!
//! Hosts translate their native touch stream into [`TouchEvent`] values and
//! feed them to the recognizers in [`crate::gesture`]. Coordinates are raw
//! display pixels, never view-local.
//!
//! # Design Notes
//!
//! - Every event carries *all* active contacts, so a two-finger `Move`
//!   reports both positions in one event.
//! - Only the first two contacts are ever consulted; extra fingers are
//!   carried but ignored.
//! - A `PointerUp` lists only the contacts that remain down. An `Up` lists
//!   the contact that lifted last, at its release position.

use crate::geometry::Point;

/// Lifecycle phase of a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// First contact touched down.
    Down,
    /// An additional contact touched down while others are held.
    PointerDown,
    /// One or more contacts moved.
    Move,
    /// A contact lifted while at least one other remains.
    PointerUp,
    /// The last contact lifted.
    Up,
    /// The host aborted the gesture (focus loss, parent intercept).
    Cancel,
}

/// One contact point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TouchPoint {
    /// Host-assigned contact identifier, stable for the life of the contact.
    pub id: u32,
    pub x: i32,
    pub y: i32,
}

impl TouchPoint {
    #[must_use]
    pub const fn new(id: u32, x: i32, y: i32) -> Self {
        Self { id, x, y }
    }

    #[must_use]
    pub const fn position(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A touch event with every active contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub pointers: Vec<TouchPoint>,
}

impl TouchEvent {
    /// Build an event from a phase and contact list.
    #[must_use]
    pub fn new(phase: TouchPhase, pointers: Vec<TouchPoint>) -> Self {
        Self { phase, pointers }
    }

    /// Single-contact `Down`.
    #[must_use]
    pub fn down(x: i32, y: i32) -> Self {
        Self::new(TouchPhase::Down, vec![TouchPoint::new(0, x, y)])
    }

    /// Single-contact `Move`.
    #[must_use]
    pub fn moved(x: i32, y: i32) -> Self {
        Self::new(TouchPhase::Move, vec![TouchPoint::new(0, x, y)])
    }

    /// Single-contact `Up`.
    #[must_use]
    pub fn up(x: i32, y: i32) -> Self {
        Self::new(TouchPhase::Up, vec![TouchPoint::new(0, x, y)])
    }

    /// Second contact lands while the first is held.
    #[must_use]
    pub fn second_down(first: (i32, i32), second: (i32, i32)) -> Self {
        Self::new(
            TouchPhase::PointerDown,
            vec![
                TouchPoint::new(0, first.0, first.1),
                TouchPoint::new(1, second.0, second.1),
            ],
        )
    }

    /// Both contacts moved.
    #[must_use]
    pub fn two_finger_move(first: (i32, i32), second: (i32, i32)) -> Self {
        Self::new(
            TouchPhase::Move,
            vec![
                TouchPoint::new(0, first.0, first.1),
                TouchPoint::new(1, second.0, second.1),
            ],
        )
    }

    /// Second contact lifted; `remaining` is the contact still held.
    #[must_use]
    pub fn second_up(remaining: (i32, i32)) -> Self {
        Self::new(
            TouchPhase::PointerUp,
            vec![TouchPoint::new(0, remaining.0, remaining.1)],
        )
    }

    /// Host-initiated cancel.
    #[must_use]
    pub fn cancel() -> Self {
        Self::new(TouchPhase::Cancel, Vec::new())
    }

    /// The first contact, if any.
    #[inline]
    #[must_use]
    pub fn primary(&self) -> Option<TouchPoint> {
        self.pointers.first().copied()
    }

    /// The first two contacts, if at least two are present.
    #[must_use]
    pub fn pair(&self) -> Option<(TouchPoint, TouchPoint)> {
        match self.pointers.as_slice() {
            [a, b, ..] => Some((*a, *b)),
            _ => None,
        }
    }

    /// Number of active contacts.
    #[inline]
    #[must_use]
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }
}
