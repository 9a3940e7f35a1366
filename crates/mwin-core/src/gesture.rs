#![forbid(unsafe_code)]

//! Gesture recognition for the split-screen panel and its proxy windows.
//!
//! Two independent recognizers live here:
//!
//! - [`DividerDrag`]: one-axis drag of the boundary between the docked panel
//!   and the primary window.
//! - [`ProxyDrag`]: direct manipulation of a single proxy rectangle by its
//!   corner handles, by its body (pan), or by a two-finger pinch.
//!
//! # State Machine
//!
//! ```text
//! DividerDrag:  Idle -> Armed -> Dragging -> Idle
//!                          \------> Idle (tap / cancel)
//! ```
//!
//! # Invariants
//!
//! 1. A divider gesture only enters `Dragging` while resizing is enabled and
//!    the horizontal displacement strictly exceeds the threshold.
//! 2. Every divider x reported while dragging lies inside the supplied
//!    [`DividerRange`].
//! 3. A proxy rectangle produced by [`ProxyDrag`] is never inverted and never
//!    smaller than the configured minimum size.
//! 4. The first two-finger sample of a pinch establishes a baseline and never
//!    scales.
//!
//! # Failure Modes
//!
//! - Events that arrive without a contact point (other than `Cancel`) are
//!   ignored rather than guessed at.
//! - A `Down` arriving while a gesture is active means the host lost the
//!   matching `Up`; the recognizer restarts from the new contact.

use bitflags::bitflags;

use crate::event::{TouchEvent, TouchPhase};
use crate::geometry::{Point, Rect};

// ---------------------------------------------------------------------------
// Divider drag
// ---------------------------------------------------------------------------

/// Default displacement (pixels) a divider drag must exceed before it resizes.
pub const DIVIDER_DRAG_DEFAULT_THRESHOLD: i32 = 25;

/// Divider drag tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DividerDragConfig {
    /// Horizontal displacement that must be strictly exceeded to start a drag.
    pub threshold: i32,
}

impl Default for DividerDragConfig {
    fn default() -> Self {
        Self {
            threshold: DIVIDER_DRAG_DEFAULT_THRESHOLD,
        }
    }
}

/// Allowed divider positions on the anchored side of the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DividerRange {
    pub min_x: i32,
    pub max_x: i32,
}

impl DividerRange {
    /// Range that keeps the panel between `min_panel` and `max_panel` pixels
    /// away from the anchored display edge.
    #[must_use]
    pub fn anchored(display: Rect, right_side: bool, min_panel: i32, max_panel: i32) -> Self {
        if right_side {
            Self {
                min_x: display.right - max_panel,
                max_x: display.right - min_panel,
            }
        } else {
            Self {
                min_x: display.left + min_panel,
                max_x: display.left + max_panel,
            }
        }
    }

    /// Clamp `x` into the range. An inverted range collapses onto `max_x`.
    #[inline]
    #[must_use]
    pub fn clamp(&self, x: i32) -> i32 {
        x.max(self.min_x).min(self.max_x)
    }
}

/// Divider drag lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DividerDragState {
    Idle,
    /// Contact is down but has not travelled past the threshold.
    Armed { origin_x: i32, current_x: i32 },
    /// Actively forwarding divider updates.
    Dragging { origin_x: i32, current_x: i32 },
}

/// Effect of feeding one touch event to [`DividerDrag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DividerDragEffect {
    /// First contact recorded; the touch still belongs to what lies beneath.
    Armed { origin_x: i32 },
    /// Contact moved but stayed within the threshold.
    ThresholdNotReached,
    /// Threshold crossed; divider moves to `x`.
    DragStarted { x: i32 },
    /// Divider moves to `x`.
    DragUpdated { x: i32 },
    /// Release after a drag; `x` is the final divider position.
    Committed { x: i32 },
    /// Release without a drag (a tap).
    Released,
    /// Gesture aborted. `last_x` is the last applied divider position if a
    /// drag was in progress.
    Canceled { last_x: Option<i32> },
    /// Mid-drag event that changes nothing (an extra finger).
    Held,
    /// Not ours: resizing disabled or no gesture in progress.
    PassThrough,
}

impl DividerDragEffect {
    /// Whether the divider layer keeps this touch instead of yielding it.
    #[must_use]
    pub const fn consumes_touch(self) -> bool {
        matches!(
            self,
            Self::DragStarted { .. }
                | Self::DragUpdated { .. }
                | Self::Committed { .. }
                | Self::Held
                | Self::Canceled { last_x: Some(_) }
        )
    }
}

/// Recognizer for dragging the panel divider.
#[derive(Debug, Clone)]
pub struct DividerDrag {
    config: DividerDragConfig,
    state: DividerDragState,
    resizing_enabled: bool,
}

impl Default for DividerDrag {
    fn default() -> Self {
        Self::new(DividerDragConfig::default())
    }
}

impl DividerDrag {
    /// Create a recognizer. Resizing starts disabled.
    #[must_use]
    pub fn new(config: DividerDragConfig) -> Self {
        Self {
            config,
            state: DividerDragState::Idle,
            resizing_enabled: false,
        }
    }

    #[inline]
    #[must_use]
    pub const fn state(&self) -> DividerDragState {
        self.state
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> DividerDragConfig {
        self.config
    }

    #[inline]
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.state, DividerDragState::Dragging { .. })
    }

    #[inline]
    #[must_use]
    pub const fn is_resizing_enabled(&self) -> bool {
        self.resizing_enabled
    }

    /// Enable or disable resizing. Only docked + expanded layouts resize.
    pub fn set_resizing_enabled(&mut self, enabled: bool) {
        self.resizing_enabled = enabled;
    }

    /// Drop any in-progress gesture.
    pub fn reset(&mut self) {
        self.state = DividerDragState::Idle;
    }

    /// Feed one touch event.
    pub fn process(&mut self, event: &TouchEvent, range: &DividerRange) -> DividerDragEffect {
        if event.phase == TouchPhase::Cancel {
            let last_x = match self.state {
                DividerDragState::Dragging { current_x, .. } => Some(current_x),
                DividerDragState::Armed { .. } => None,
                DividerDragState::Idle => return DividerDragEffect::PassThrough,
            };
            self.state = DividerDragState::Idle;
            return DividerDragEffect::Canceled { last_x };
        }

        let Some(contact) = event.primary() else {
            return DividerDragEffect::PassThrough;
        };
        let x = contact.x;

        match (self.state, event.phase) {
            (_, TouchPhase::Down) => {
                if !self.resizing_enabled {
                    self.state = DividerDragState::Idle;
                    return DividerDragEffect::PassThrough;
                }
                self.state = DividerDragState::Armed {
                    origin_x: x,
                    current_x: x,
                };
                DividerDragEffect::Armed { origin_x: x }
            }
            (DividerDragState::Idle, _) => DividerDragEffect::PassThrough,
            (DividerDragState::Armed { origin_x, .. }, TouchPhase::Move) => {
                if !self.resizing_enabled {
                    self.state = DividerDragState::Idle;
                    return DividerDragEffect::PassThrough;
                }
                if (x - origin_x).abs() > self.config.threshold {
                    let clamped = range.clamp(x);
                    self.state = DividerDragState::Dragging {
                        origin_x,
                        current_x: clamped,
                    };
                    tracing::debug!(origin_x, x = clamped, "divider drag started");
                    DividerDragEffect::DragStarted { x: clamped }
                } else {
                    self.state = DividerDragState::Armed {
                        origin_x,
                        current_x: x,
                    };
                    DividerDragEffect::ThresholdNotReached
                }
            }
            (DividerDragState::Armed { .. }, TouchPhase::Up) => {
                self.state = DividerDragState::Idle;
                DividerDragEffect::Released
            }
            (DividerDragState::Armed { .. }, _) => DividerDragEffect::ThresholdNotReached,
            (DividerDragState::Dragging { origin_x, .. }, TouchPhase::Move) => {
                let clamped = range.clamp(x);
                self.state = DividerDragState::Dragging {
                    origin_x,
                    current_x: clamped,
                };
                DividerDragEffect::DragUpdated { x: clamped }
            }
            (DividerDragState::Dragging { .. }, TouchPhase::Up) => {
                let clamped = range.clamp(x);
                self.state = DividerDragState::Idle;
                tracing::debug!(x = clamped, "divider drag committed");
                DividerDragEffect::Committed { x: clamped }
            }
            (DividerDragState::Dragging { .. }, _) => DividerDragEffect::Held,
        }
    }
}

// ---------------------------------------------------------------------------
// Proxy drag
// ---------------------------------------------------------------------------

/// Default corner handle size in pixels.
pub const PROXY_DEFAULT_HANDLE_SIZE: i32 = 48;

/// Largest width or height a pinch may scale a proxy to.
pub const PROXY_MAX_EXTENT: i32 = 1 << 20;

bitflags! {
    /// Which edges a contact is near. A corner is one horizontal flag
    /// combined with one vertical flag.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CornerFlags: u8 {
        const LEFT   = 0x1;
        const RIGHT  = 0x2;
        const TOP    = 0x4;
        const BOTTOM = 0x8;
    }
}

/// Where on the proxy a contact landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragZone {
    /// One of the four corner handles.
    Corner(CornerFlags),
    /// Anywhere else: pan with one finger, pinch with two.
    Body,
}

impl DragZone {
    /// Classify a contact against the corner handles of `rect`.
    ///
    /// Horizontal proximity is tested first; being near a vertical edge only
    /// counts when a horizontal edge already matched.
    #[must_use]
    pub fn classify(rect: Rect, contact: Point, handle_width: i32, handle_height: i32) -> Self {
        let local_x = contact.x - rect.left;
        let local_y = contact.y - rect.top;

        let horizontal = if local_x < handle_width {
            CornerFlags::LEFT
        } else if rect.width() - local_x < handle_width {
            CornerFlags::RIGHT
        } else {
            return Self::Body;
        };

        let vertical = if local_y < handle_height {
            CornerFlags::TOP
        } else if rect.height() - local_y < handle_height {
            CornerFlags::BOTTOM
        } else {
            return Self::Body;
        };

        Self::Corner(horizontal | vertical)
    }
}

/// Proxy drag tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProxyDragConfig {
    pub handle_width: i32,
    pub handle_height: i32,
    /// Smallest width a corner drag or pinch may produce.
    pub min_width: i32,
    /// Smallest height a corner drag or pinch may produce.
    pub min_height: i32,
}

impl Default for ProxyDragConfig {
    fn default() -> Self {
        Self::with_handle(PROXY_DEFAULT_HANDLE_SIZE, PROXY_DEFAULT_HANDLE_SIZE)
    }
}

impl ProxyDragConfig {
    /// Config for a handle of the given size; the minimum proxy size keeps
    /// two handles side by side.
    #[must_use]
    pub const fn with_handle(handle_width: i32, handle_height: i32) -> Self {
        Self {
            handle_width,
            handle_height,
            min_width: handle_width * 2,
            min_height: handle_height * 2,
        }
    }
}

/// Effect of feeding one touch event to [`ProxyDrag`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProxyDragEffect {
    /// Contact captured the proxy.
    Captured { zone: DragZone },
    /// The working rectangle changed.
    Moved { rect: Rect },
    /// Captured, but this event changed nothing.
    Held,
    /// Last contact lifted; `rect` is the rectangle the user chose.
    Released { rect: Rect },
    /// Gesture aborted; the proxy should snap back to its window.
    Canceled,
    /// No gesture in progress.
    Ignored,
}

#[derive(Debug, Clone, Copy)]
struct ActiveProxyDrag {
    zone: DragZone,
    rect: Rect,
    last: Point,
    pinch_baseline: Option<f64>,
}

/// Recognizer for moving, corner-resizing, and pinch-scaling one proxy.
#[derive(Debug, Clone, Default)]
pub struct ProxyDrag {
    config: ProxyDragConfig,
    active: Option<ActiveProxyDrag>,
}

impl ProxyDrag {
    #[must_use]
    pub fn new(config: ProxyDragConfig) -> Self {
        Self {
            config,
            active: None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> ProxyDragConfig {
        self.config
    }

    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Zone captured by the current gesture.
    #[must_use]
    pub fn zone(&self) -> Option<DragZone> {
        self.active.map(|a| a.zone)
    }

    /// Working rectangle of the current gesture.
    #[must_use]
    pub fn current_rect(&self) -> Option<Rect> {
        self.active.map(|a| a.rect)
    }

    /// Drop any in-progress gesture.
    pub fn reset(&mut self) {
        self.active = None;
    }

    /// Feed one touch event. `rect` is the proxy's current rectangle and is
    /// only read on `Down`.
    pub fn process(&mut self, event: &TouchEvent, rect: Rect) -> ProxyDragEffect {
        if event.phase == TouchPhase::Cancel {
            return match self.active.take() {
                Some(_) => ProxyDragEffect::Canceled,
                None => ProxyDragEffect::Ignored,
            };
        }

        let Some(contact) = event.primary() else {
            return ProxyDragEffect::Ignored;
        };
        let pos = contact.position();

        if event.phase == TouchPhase::Down {
            let zone = DragZone::classify(
                rect,
                pos,
                self.config.handle_width,
                self.config.handle_height,
            );
            self.active = Some(ActiveProxyDrag {
                zone,
                rect,
                last: pos,
                pinch_baseline: None,
            });
            return ProxyDragEffect::Captured { zone };
        }

        let config = self.config;
        let Some(active) = self.active.as_mut() else {
            return ProxyDragEffect::Ignored;
        };

        match event.phase {
            TouchPhase::PointerDown | TouchPhase::PointerUp => {
                active.pinch_baseline = None;
                active.last = pos;
                ProxyDragEffect::Held
            }
            TouchPhase::Move => {
                let (dx, dy) = pos.delta_from(active.last);
                active.last = pos;
                let next = match (active.zone, event.pair()) {
                    (DragZone::Corner(flags), _) => resize_corner(active.rect, flags, dx, dy, config),
                    (DragZone::Body, Some((a, b))) => {
                        let distance = a.position().distance(b.position());
                        match active.pinch_baseline.replace(distance) {
                            Some(previous) if previous > 0.0 => {
                                scale_rect(active.rect, distance / previous, config)
                            }
                            _ => active.rect,
                        }
                    }
                    (DragZone::Body, None) => active.rect.translate(dx, dy),
                };
                if next == active.rect {
                    ProxyDragEffect::Held
                } else {
                    active.rect = next;
                    ProxyDragEffect::Moved { rect: next }
                }
            }
            TouchPhase::Up => {
                let rect = active.rect;
                self.active = None;
                ProxyDragEffect::Released { rect }
            }
            TouchPhase::Down | TouchPhase::Cancel => ProxyDragEffect::Held,
        }
    }
}

/// Move the two edges adjacent to a corner; the opposite edges stay put.
fn resize_corner(rect: Rect, flags: CornerFlags, dx: i32, dy: i32, config: ProxyDragConfig) -> Rect {
    let mut out = rect;
    if flags.contains(CornerFlags::LEFT) {
        out.left = (rect.left + dx).min(rect.right - config.min_width);
    } else if flags.contains(CornerFlags::RIGHT) {
        out.right = (rect.right + dx).max(rect.left + config.min_width);
    }
    if flags.contains(CornerFlags::TOP) {
        out.top = (rect.top + dy).min(rect.bottom - config.min_height);
    } else if flags.contains(CornerFlags::BOTTOM) {
        out.bottom = (rect.bottom + dy).max(rect.top + config.min_height);
    }
    out
}

/// Scale width and height about the top-left corner, truncating toward zero.
fn scale_rect(rect: Rect, factor: f64, config: ProxyDragConfig) -> Rect {
    let width = ((f64::from(rect.width()) * factor) as i32)
        .min(PROXY_MAX_EXTENT)
        .max(config.min_width);
    let height = ((f64::from(rect.height()) * factor) as i32)
        .min(PROXY_MAX_EXTENT)
        .max(config.min_height);
    Rect::from_origin_size(rect.left, rect.top, width, height)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
