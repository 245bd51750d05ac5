//! Toast configuration
//!
//! [`ToastConfiguration`] is an immutable value: setters consume and return
//! a new configuration. It can also be loaded from TOML:
//!
//! ```toml
//! auto_hide = true
//! enable_pan_to_close = true
//! display_time = 2.5     # seconds
//! animation_time = 0.25  # seconds
//! attach_to = 42         # optional host container id
//! ```
//!
//! Missing keys keep their defaults; unknown keys are rejected.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use toasty_platform::ContainerId;

use crate::error::{Result, ToastError};

/// Default time a toast stays visible before auto-hiding
pub const DEFAULT_DISPLAY_TIME: Duration = Duration::from_millis(1800);

/// Default duration of enter, exit and settle animations
pub const DEFAULT_ANIMATION_TIME: Duration = Duration::from_millis(300);

/// Presentation and dismissal behavior of a toast
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ToastConfiguration {
    auto_hide: bool,
    enable_pan_to_close: bool,
    display_time: Duration,
    animation_time: Duration,
    attach_to: Option<ContainerId>,
}

impl Default for ToastConfiguration {
    fn default() -> Self {
        Self {
            auto_hide: true,
            enable_pan_to_close: false,
            display_time: DEFAULT_DISPLAY_TIME,
            animation_time: DEFAULT_ANIMATION_TIME,
            attach_to: None,
        }
    }
}

impl ToastConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close automatically once the display time has elapsed
    pub fn with_auto_hide(mut self, auto_hide: bool) -> Self {
        self.auto_hide = auto_hide;
        self
    }

    /// Allow closing by dragging the toast upward
    pub fn with_pan_to_close(mut self, enable: bool) -> Self {
        self.enable_pan_to_close = enable;
        self
    }

    pub fn with_display_time(mut self, display_time: Duration) -> Self {
        self.display_time = display_time;
        self
    }

    pub fn with_animation_time(mut self, animation_time: Duration) -> Self {
        self.animation_time = animation_time;
        self
    }

    /// Attach to this container instead of the host's topmost surface
    pub fn with_attach_to(mut self, container: ContainerId) -> Self {
        self.attach_to = Some(container);
        self
    }

    pub fn auto_hide(&self) -> bool {
        self.auto_hide
    }

    pub fn pan_to_close(&self) -> bool {
        self.enable_pan_to_close
    }

    pub fn display_time(&self) -> Duration {
        self.display_time
    }

    pub fn animation_time(&self) -> Duration {
        self.animation_time
    }

    pub fn attach_to(&self) -> Option<ContainerId> {
        self.attach_to
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let raw: RawConfiguration = toml::from_str(source)?;
        raw.validate()
    }

    /// Read and parse a TOML configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| ToastError::Config(format!("failed to read {}: {e}", path.display())))?;
        tracing::debug!("Loading toast configuration from {}", path.display());
        Self::from_toml_str(&source)
    }
}

/// On-disk shape, durations in fractional seconds
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfiguration {
    auto_hide: Option<bool>,
    enable_pan_to_close: Option<bool>,
    display_time: Option<f64>,
    animation_time: Option<f64>,
    attach_to: Option<u64>,
}

impl RawConfiguration {
    fn validate(self) -> Result<ToastConfiguration> {
        let defaults = ToastConfiguration::default();
        Ok(ToastConfiguration {
            auto_hide: self.auto_hide.unwrap_or(defaults.auto_hide),
            enable_pan_to_close: self
                .enable_pan_to_close
                .unwrap_or(defaults.enable_pan_to_close),
            display_time: match self.display_time {
                Some(value) => seconds("display_time", value)?,
                None => defaults.display_time,
            },
            animation_time: match self.animation_time {
                Some(value) => seconds("animation_time", value)?,
                None => defaults.animation_time,
            },
            attach_to: self.attach_to.map(ContainerId::from_raw),
        })
    }
}

fn seconds(key: &str, value: f64) -> Result<Duration> {
    if !value.is_finite() || value < 0.0 {
        return Err(ToastError::Config(format!(
            "{key} must be a non-negative number of seconds, got {value}"
        )));
    }
    Duration::try_from_secs_f64(value)
        .map_err(|e| ToastError::Config(format!("{key} is out of range: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ToastConfiguration::default();
        assert!(config.auto_hide());
        assert!(!config.pan_to_close());
        assert_eq!(config.display_time(), Duration::from_millis(1800));
        assert_eq!(config.animation_time(), Duration::from_millis(300));
        assert_eq!(config.attach_to(), None);
    }

    #[test]
    fn test_builder_returns_new_value() {
        let base = ToastConfiguration::new();
        let custom = base
            .clone()
            .with_auto_hide(false)
            .with_attach_to(ContainerId::from_raw(3));

        assert_ne!(base, custom);
        assert!(base.auto_hide());
        assert!(!custom.auto_hide());
        assert_eq!(custom.attach_to(), Some(ContainerId::from_raw(3)));
    }

    #[test]
    fn test_value_comparable() {
        use std::collections::HashSet;

        let a = ToastConfiguration::new().with_display_time(Duration::from_secs(2));
        let b = ToastConfiguration::new().with_display_time(Duration::from_secs(2));
        assert_eq!(a, b);

        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_from_toml() {
        let config = ToastConfiguration::from_toml_str(
            r#"
            enable_pan_to_close = true
            display_time = 2.5
            attach_to = 42
            "#,
        )
        .unwrap();

        assert!(config.auto_hide());
        assert!(config.pan_to_close());
        assert_eq!(config.display_time(), Duration::from_millis(2500));
        assert_eq!(config.animation_time(), DEFAULT_ANIMATION_TIME);
        assert_eq!(config.attach_to(), Some(ContainerId::from_raw(42)));
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(
            ToastConfiguration::from_toml_str("").unwrap(),
            ToastConfiguration::default()
        );
    }

    #[test]
    fn test_rejects_negative_duration() {
        let err = ToastConfiguration::from_toml_str("animation_time = -0.1").unwrap_err();
        assert!(matches!(err, ToastError::Config(msg) if msg.contains("animation_time")));
    }

    #[test]
    fn test_rejects_oversized_duration() {
        let err = ToastConfiguration::from_toml_str("display_time = 1e30").unwrap_err();
        assert!(matches!(err, ToastError::Config(msg) if msg.contains("display_time")));
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(matches!(
            ToastConfiguration::from_toml_str("colour = \"red\""),
            Err(ToastError::Config(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ToastConfiguration::load("/nonexistent/toasty.toml").unwrap_err();
        assert!(matches!(err, ToastError::Config(msg) if msg.contains("failed to read")));
    }
}
