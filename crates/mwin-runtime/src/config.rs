#![forbid(unsafe_code)]

//! Coordinator configuration.
//!
//! [`MultiWindowConfig`] groups every tunable of the coordinator. With the
//! `config` feature it can be loaded from TOML or JSON at startup:
//!
//! ```toml
//! panel_width = 96
//! default_app = "org.example.notes.NotesActivity"
//!
//! [layout]
//! max_tabs = 3
//! ```
//!
//! ```rust,ignore
//! let config = MultiWindowConfig::from_toml_file("mwin.toml")?;
//! ```
//!
//! # Defaults
//!
//! `MultiWindowConfig::default()` reproduces the built-in constants: a 96px
//! panel, a panel range of a quarter to half the display width, a 25px divider
//! threshold, and 48px proxy handles.

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use mwin_core::gesture::{
    DIVIDER_DRAG_DEFAULT_THRESHOLD, DividerDragConfig, PROXY_DEFAULT_HANDLE_SIZE, ProxyDragConfig,
};
use mwin_layout::{AppDescriptor, LayoutPolicy, LayoutResult};

/// Application launched into new windows unless configured otherwise.
pub const DEFAULT_APP_CLASS: &str = "org.example.notes.NotesActivity";

/// Width of the panel strip in pixels.
pub const DEFAULT_PANEL_WIDTH: i32 = 96;

/// Notifications buffered before the foreign thread blocks.
pub const DEFAULT_NOTIFICATION_CAPACITY: usize = 64;

// ---------------------------------------------------------------------------
// MultiWindowConfig
// ---------------------------------------------------------------------------

/// Every tunable of the multi-window coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct MultiWindowConfig {
    /// Tab and window limits.
    pub layout: LayoutPolicy,

    /// Panel strip width. Default: 96.
    pub panel_width: i32,

    /// Minimum expanded width is `display width / min_panel_divisor`. Default: 4.
    pub min_panel_divisor: i32,

    /// Maximum expanded width is `display width / max_panel_divisor`. Default: 2.
    pub max_panel_divisor: i32,

    /// Pixels the divider must travel before a drag starts. Default: 25.
    pub divider_threshold: i32,

    /// Proxy corner handle size. Default: 48.
    pub proxy_handle_size: i32,

    /// Bounded notification queue capacity. Default: 64.
    pub notification_capacity: usize,

    /// Fully-qualified class launched into new windows.
    pub default_app: String,
}

impl Default for MultiWindowConfig {
    fn default() -> Self {
        Self {
            layout: LayoutPolicy::default(),
            panel_width: DEFAULT_PANEL_WIDTH,
            min_panel_divisor: 4,
            max_panel_divisor: 2,
            divider_threshold: DIVIDER_DRAG_DEFAULT_THRESHOLD,
            proxy_handle_size: PROXY_DEFAULT_HANDLE_SIZE,
            notification_capacity: DEFAULT_NOTIFICATION_CAPACITY,
            default_app: DEFAULT_APP_CLASS.to_owned(),
        }
    }
}

impl MultiWindowConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters.
    ///
    /// Returns a list of problems. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = self.layout.validate();

        if self.panel_width <= 0 {
            errors.push(format!("panel_width must be > 0, got {}", self.panel_width));
        }
        if self.min_panel_divisor <= 0 || self.max_panel_divisor <= 0 {
            errors.push(format!(
                "panel divisors must be > 0, got min={} max={}",
                self.min_panel_divisor, self.max_panel_divisor
            ));
        } else if self.min_panel_divisor < self.max_panel_divisor {
            errors.push(format!(
                "min_panel_divisor ({}) must be >= max_panel_divisor ({})",
                self.min_panel_divisor, self.max_panel_divisor
            ));
        }
        if self.divider_threshold < 0 {
            errors.push(format!(
                "divider_threshold must be >= 0, got {}",
                self.divider_threshold
            ));
        }
        if self.proxy_handle_size <= 0 {
            errors.push(format!(
                "proxy_handle_size must be > 0, got {}",
                self.proxy_handle_size
            ));
        }
        if self.notification_capacity == 0 {
            errors.push("notification_capacity must be > 0".into());
        }
        if let Err(err) = self.app_descriptor() {
            errors.push(err.to_string());
        }

        errors
    }

    /// Return `self` if valid, or every problem at once.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }

    /// Parse [`Self::default_app`].
    pub fn app_descriptor(&self) -> LayoutResult<AppDescriptor> {
        AppDescriptor::from_class_name(&self.default_app)
    }

    #[must_use]
    pub const fn divider_config(&self) -> DividerDragConfig {
        DividerDragConfig {
            threshold: self.divider_threshold,
        }
    }

    /// Proxy tuning. A proxy never shrinks below the window minimum, so the
    /// released rectangle is one the window can actually take.
    #[must_use]
    pub fn proxy_config(&self) -> ProxyDragConfig {
        let handles = ProxyDragConfig::with_handle(self.proxy_handle_size, self.proxy_handle_size);
        ProxyDragConfig {
            min_width: handles.min_width.max(self.layout.min_window_width),
            min_height: handles.min_height.max(self.layout.min_window_height),
            ..handles
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Invalid(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Invalid(errors) => write!(f, "invalid configuration: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_validates_clean() {
        assert!(MultiWindowConfig::default().validate().is_empty());
    }

    #[test]
    fn default_matches_component_defaults() {
        let config = MultiWindowConfig::default();
        assert_eq!(config.divider_config(), DividerDragConfig::default());
        assert_eq!(config.layout, LayoutPolicy::default());
    }

    #[test]
    fn proxy_minimum_follows_window_minimum() {
        let config = MultiWindowConfig::default();
        let proxy = config.proxy_config();
        assert_eq!(proxy.handle_width, PROXY_DEFAULT_HANDLE_SIZE);
        assert_eq!((proxy.min_width, proxy.min_height), (200, 200));

        let mut small = MultiWindowConfig::default();
        small.layout.min_window_width = 50;
        small.layout.min_window_height = 50;
        assert_eq!(small.proxy_config(), ProxyDragConfig::default());
    }

    #[test]
    fn validate_catches_inverted_divisors() {
        let config = MultiWindowConfig {
            min_panel_divisor: 2,
            max_panel_divisor: 4,
            ..MultiWindowConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("min_panel_divisor"));
    }

    #[test]
    fn validate_catches_bad_app() {
        let config = MultiWindowConfig {
            default_app: "Launcher".into(),
            ..MultiWindowConfig::default()
        };
        assert!(config.validate().iter().any(|e| e.contains("Launcher")));
    }

    #[test]
    fn validate_collects_layout_problems() {
        let mut config = MultiWindowConfig::default();
        config.layout.max_windows_per_tab = 0;
        config.notification_capacity = 0;
        let err = config.validated().expect_err("invalid");
        match err {
            ConfigError::Invalid(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[cfg(feature = "config")]
    #[test]
    fn partial_toml_fills_defaults() {
        let config = MultiWindowConfig::from_toml_str(
            "panel_width = 120\n[layout]\nmax_tabs = 2\n",
        )
        .expect("parse");
        assert_eq!(config.panel_width, 120);
        assert_eq!(config.layout.max_tabs, 2);
        assert_eq!(config.layout.max_windows_per_tab, 4);
        assert_eq!(config.divider_threshold, 25);
    }
}
