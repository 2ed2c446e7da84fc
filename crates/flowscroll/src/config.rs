#![forbid(unsafe_code)]

//! Container configuration.
//!
//! [`FlowConfig`] gathers everything a host can set on a container: sizing
//! limits, alignment, padding, and the gesture/fling tuning. It round-trips
//! through JSON with every field optional.

use serde::{Deserialize, Serialize};

use flowscroll_core::{FlingConfig, GestureConfig, Sides};
use flowscroll_layout::{FlowConstraints, Gravity};

use crate::{ConfigError, Result};

/// Configuration for a [`FlowContainer`](crate::FlowContainer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Row alignment and default child alignment within rows.
    pub gravity: Gravity,
    pub min_width: Option<i32>,
    pub max_width: Option<i32>,
    pub min_height: Option<i32>,
    pub max_height: Option<i32>,
    pub padding: Sides,
    /// Whether drags pan the content (default: true).
    pub scrollable: bool,
    /// Whether short presses are reported as taps (default: true).
    pub clickable: bool,
    pub gesture: GestureConfig,
    pub fling: FlingConfig,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            gravity: Gravity::default(),
            min_width: None,
            max_width: None,
            min_height: None,
            max_height: None,
            padding: Sides::default(),
            scrollable: true,
            clickable: true,
            gesture: GestureConfig::default(),
            fling: FlingConfig::default(),
        }
    }
}

impl FlowConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check limits and physics thresholds.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        for (field, value) in [
            ("min_width", self.min_width),
            ("max_width", self.max_width),
            ("min_height", self.min_height),
            ("max_height", self.max_height),
        ] {
            if let Some(v) = value
                && v < 0
            {
                return Err(ConfigError::NegativeValue {
                    field,
                    value: f64::from(v),
                });
            }
        }
        check_order("width", self.min_width, self.max_width)?;
        check_order("height", self.min_height, self.max_height)?;

        let p = self.padding;
        for (field, value) in [
            ("padding.left", p.left),
            ("padding.top", p.top),
            ("padding.right", p.right),
            ("padding.bottom", p.bottom),
        ] {
            if value < 0 {
                return Err(ConfigError::NegativeValue {
                    field,
                    value: f64::from(value),
                });
            }
        }

        let f = &self.fling;
        for (field, value) in [
            ("gesture.touch_slop", self.gesture.touch_slop),
            ("fling.min_velocity", f.min_velocity),
            ("fling.max_velocity", f.max_velocity),
            ("fling.stop_velocity", f.stop_velocity),
            ("fling.spring_stiffness", f.spring_stiffness),
            ("fling.rest_threshold", f.rest_threshold),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteThreshold { field });
            }
            if value < 0.0 {
                return Err(ConfigError::NegativeValue { field, value });
            }
        }
        Ok(())
    }

    /// Sizing rules handed to the measurer.
    #[must_use]
    pub fn constraints(&self) -> FlowConstraints {
        FlowConstraints {
            gravity: self.gravity,
            min_width: self.min_width,
            max_width: self.max_width,
            min_height: self.min_height,
            max_height: self.max_height,
            padding: self.padding,
            scrollable: self.scrollable,
        }
    }

    /// Gesture tuning with [`clickable`](Self::clickable) applied.
    #[must_use]
    pub fn gesture_config(&self) -> GestureConfig {
        self.gesture.clone().with_clickable(self.clickable)
    }

    /// Set the gravity (builder pattern).
    #[must_use]
    pub fn with_gravity(mut self, gravity: Gravity) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the padding (builder pattern).
    #[must_use]
    pub fn with_padding(mut self, padding: impl Into<Sides>) -> Self {
        self.padding = padding.into();
        self
    }

    /// Set the width limits (builder pattern).
    #[must_use]
    pub fn with_width_limits(mut self, min: Option<i32>, max: Option<i32>) -> Self {
        self.min_width = min;
        self.max_width = max;
        self
    }

    /// Set the height limits (builder pattern).
    #[must_use]
    pub fn with_height_limits(mut self, min: Option<i32>, max: Option<i32>) -> Self {
        self.min_height = min;
        self.max_height = max;
        self
    }

    /// Set whether drags pan the content (builder pattern).
    #[must_use]
    pub fn with_scrollable(mut self, scrollable: bool) -> Self {
        self.scrollable = scrollable;
        self
    }

    /// Set whether taps are reported (builder pattern).
    #[must_use]
    pub fn with_clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    /// Set the gesture tuning (builder pattern).
    #[must_use]
    pub fn with_gesture(mut self, gesture: GestureConfig) -> Self {
        self.gesture = gesture;
        self
    }

    /// Set the fling tuning (builder pattern).
    #[must_use]
    pub fn with_fling(mut self, fling: FlingConfig) -> Self {
        self.fling = fling;
        self
    }
}

fn check_order(
    axis: &'static str,
    min: Option<i32>,
    max: Option<i32>,
) -> std::result::Result<(), ConfigError> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(ConfigError::MinExceedsMax { axis, min, max }),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
