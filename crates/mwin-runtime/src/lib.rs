#![forbid(unsafe_code)]

//! Runtime: the multi-window coordinator.
//!
//! # Role in the workspace
//! `mwin-runtime` ties the input layer (`mwin-core`) to the layout engine
//! (`mwin-layout`). It owns the single [`MultiWindow`] instance a host
//! creates, turns button presses and touches into mode changes and divider
//! positions, and marshals window-system callbacks onto the UI thread.
//!
//! # Primary responsibilities
//! - **MultiWindow**: mode actions, tab/window actions, touch routing.
//! - **Notifications**: bounded queue from the window-system thread.
//! - **UserMessage**: refusals the host shows to the user.
//! - **MultiWindowConfig**: every tunable, optionally loaded from TOML/JSON.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod messages;
pub mod notifications;

pub use config::{ConfigError, MultiWindowConfig};
pub use coordinator::{MultiWindow, TouchDisposition};
pub use error::{Result, RuntimeError};
pub use messages::UserMessage;
pub use notifications::{NotificationSender, WindowNotification};
