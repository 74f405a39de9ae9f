#![forbid(unsafe_code)]

//! Carousel configuration.
//!
//! [`CarouselConfig`] holds every recognized option. It can be built in code
//! or loaded from TOML or JSON:
//!
//! ```toml
//! start_slide = 2
//! speed_ms = 400
//! autoplay_delay_ms = 3000
//! continuous = false
//!
//! [gesture]
//! flick_window_ms = 200
//! ```
//!
//! ```rust,ignore
//! let config = CarouselConfig::from_toml_file("carousel.toml")?;
//! ```
//!
//! # Defaults
//!
//! Missing fields take the documented default, so an empty document yields
//! `CarouselConfig::default()`.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::gesture::GestureConfig;

/// Options recognized by a carousel. Immutable once the carousel is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Initial panel index (default: 0). Clamped to the panel count.
    pub start_slide: usize,
    /// Settle animation length in milliseconds (default: 300).
    pub speed_ms: u64,
    /// Delay between automatic advances; 0 disables autoplay (default: 0).
    pub autoplay_delay_ms: u64,
    /// Wrap past either end (default: true).
    pub continuous: bool,
    /// Block native scrolling even for vertical gestures (default: false).
    pub disable_vertical_scroll: bool,
    /// Fixed panel width in pixels; 0 uses the viewport width (default: 0).
    ///
    /// A non-zero value switches to the multi-panel-visible strip layout.
    pub max_width: f64,
    /// Swipe commit thresholds.
    pub gesture: GestureConfig,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            start_slide: 0,
            speed_ms: 300,
            autoplay_delay_ms: 0,
            continuous: true,
            disable_vertical_scroll: false,
            max_width: 0.0,
            gesture: GestureConfig::default(),
        }
    }
}

impl CarouselConfig {
    /// Settle animation length.
    #[inline]
    #[must_use]
    pub fn speed(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }

    /// Autoplay delay; zero means disabled.
    #[inline]
    #[must_use]
    pub fn autoplay_delay(&self) -> Duration {
        Duration::from_millis(self.autoplay_delay_ms)
    }

    /// Whether a fixed panel width is configured.
    #[inline]
    #[must_use]
    pub fn is_clamped(&self) -> bool {
        self.max_width > 0.0
    }

    /// Builder: initial index.
    #[must_use]
    pub fn with_start_slide(mut self, index: usize) -> Self {
        self.start_slide = index;
        self
    }

    /// Builder: settle speed.
    #[must_use]
    pub fn with_speed(mut self, speed: Duration) -> Self {
        self.speed_ms = u64::try_from(speed.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Builder: autoplay delay.
    #[must_use]
    pub fn with_autoplay(mut self, delay: Duration) -> Self {
        self.autoplay_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Builder: wrap-around.
    #[must_use]
    pub fn with_continuous(mut self, continuous: bool) -> Self {
        self.continuous = continuous;
        self
    }

    /// Builder: block vertical scrolling.
    #[must_use]
    pub fn with_disable_vertical_scroll(mut self, disable: bool) -> Self {
        self.disable_vertical_scroll = disable;
        self
    }

    /// Builder: fixed panel width.
    #[must_use]
    pub fn with_max_width(mut self, width: f64) -> Self {
        self.max_width = width;
        self
    }

    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Serialize to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Check every parameter is usable.
    ///
    /// Returns a list of problems; empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.max_width.is_finite() || self.max_width < 0.0 {
            errors.push(format!(
                "max_width must be a finite value >= 0, got {}",
                self.max_width
            ));
        }

        let g = &self.gesture;
        if !g.flick_distance.is_finite() || g.flick_distance < 0.0 {
            errors.push(format!(
                "gesture.flick_distance must be a finite value >= 0, got {}",
                g.flick_distance
            ));
        }
        if !g.commit_fraction.is_finite() || g.commit_fraction <= 0.0 || g.commit_fraction > 1.0 {
            errors.push(format!(
                "gesture.commit_fraction must be in (0, 1], got {}",
                g.commit_fraction
            ));
        }

        errors
    }

    fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Errors raised while loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parse error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// TOML serialization error.
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    /// JSON parse error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// Validation errors.
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
