#![forbid(unsafe_code)]

//! Marshalling window-system notifications onto the UI thread.
//!
//! The window system reports externally removed and externally relayouted
//! windows from its own thread. Those reports go through a bounded channel:
//! the foreign thread only ever holds a [`NotificationSender`], and the
//! coordinator drains the queue on the UI thread in delivery order.
//!
//! When the queue is full, senders block until the UI thread catches up;
//! notifications are never dropped. A sender must therefore never run on the
//! UI thread itself (for example from inside a synchronous
//! [`WindowSystem`](mwin_layout::WindowSystem) call): once the queue is full
//! it would wait on the thread that drains it. Use
//! [`NotificationSender::try_send`] where that cannot be ruled out.

use std::sync::mpsc;

use mwin_layout::{Rect, WindowHandle};

use crate::error::{Result, RuntimeError};

/// An asynchronous report from the window system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowNotification {
    /// The window was destroyed outside the coordinator's control.
    Removed(WindowHandle),
    /// The window was moved or resized outside the coordinator's control.
    Relayouted { handle: WindowHandle, rect: Rect },
}

/// Cloneable, `Send` handle for posting notifications from any thread.
#[derive(Debug, Clone)]
pub struct NotificationSender {
    tx: mpsc::SyncSender<WindowNotification>,
}

impl NotificationSender {
    /// Queue a notification, blocking while the queue is full.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::QueueClosed`] once the coordinator has been dropped.
    pub fn send(&self, notification: WindowNotification) -> Result<()> {
        self.tx
            .send(notification)
            .map_err(|_| RuntimeError::QueueClosed)
    }

    /// Queue a notification without blocking.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::QueueFull`] when the queue is at capacity (the
    /// notification is handed back), [`RuntimeError::QueueClosed`] once the
    /// coordinator has been dropped.
    pub fn try_send(&self, notification: WindowNotification) -> Result<()> {
        self.tx.try_send(notification).map_err(|err| match err {
            mpsc::TrySendError::Full(notification) => RuntimeError::QueueFull(notification),
            mpsc::TrySendError::Disconnected(_) => RuntimeError::QueueClosed,
        })
    }

    pub fn window_removed(&self, handle: WindowHandle) -> Result<()> {
        self.send(WindowNotification::Removed(handle))
    }

    pub fn window_relayouted(&self, handle: WindowHandle, rect: Rect) -> Result<()> {
        self.send(WindowNotification::Relayouted { handle, rect })
    }
}

/// UI-thread end of the queue.
#[derive(Debug)]
pub(crate) struct NotificationQueue {
    tx: mpsc::SyncSender<WindowNotification>,
    rx: mpsc::Receiver<WindowNotification>,
}

impl NotificationQueue {
    pub(crate) fn new(capacity: usize) -> Self {
        let (tx, rx) = mpsc::sync_channel(capacity);
        Self { tx, rx }
    }

    pub(crate) fn sender(&self) -> NotificationSender {
        NotificationSender {
            tx: self.tx.clone(),
        }
    }

    /// Next queued notification, if any. Never blocks.
    pub(crate) fn try_next(&self) -> Option<WindowNotification> {
        self.rx.try_recv().ok()
    }
}
