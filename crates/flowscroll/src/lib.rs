#![forbid(unsafe_code)]

//! flowscroll public facade.
//!
//! A [`FlowContainer`] packs children into wrapping rows and lets the result
//! be panned vertically with drag, fling, and spring-back. The host owns
//! event delivery and the frame loop:
//!
//! ```
//! use flowscroll::prelude::*;
//!
//! let mut container = FlowContainer::new(FlowConfig::default());
//! for _ in 0..40 {
//!     container.push(FlowItem::new(Size::new(90, 40)));
//! }
//! container.measure(SizeSpec::Exact(200), SizeSpec::AtMost(300));
//! assert_eq!(container.size().height, 300);
//! assert!(container.content_height() > 300);
//!
//! container.scroll_to(120);
//! assert_eq!(container.scrolled_placements()[0].y, -120);
//! ```

use std::fmt;

pub mod config;
pub mod container;
#[cfg(feature = "tracing-json")]
pub mod logging;

pub use config::FlowConfig;
pub use container::FlowContainer;

pub use flowscroll_core::{
    FlingConfig, GestureConfig, GestureEvent, Instant, PointerEvent, PointerEventKind, PointerId,
    Rect, ScrollController, Sides, Size,
};
pub use flowscroll_layout::{
    Extent, FlowItem, Gravity, HorizontalAlign, ItemParams, MeasureFn, Measurable, SizeSpec,
    VerticalAlign,
};

// --- Errors ---------------------------------------------------------------

/// A configuration value that can't be used.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A minimum limit is larger than its maximum.
    MinExceedsMax {
        axis: &'static str,
        min: i32,
        max: i32,
    },
    /// A physics threshold is NaN or infinite.
    NonFiniteThreshold { field: &'static str },
    /// A size or threshold that must not be negative is.
    NegativeValue { field: &'static str, value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinExceedsMax { axis, min, max } => {
                write!(f, "min {axis} {min} exceeds max {axis} {max}")
            }
            Self::NonFiniteThreshold { field } => write!(f, "{field} must be finite"),
            Self::NegativeValue { field, value } => {
                write!(f, "{field} must not be negative (got {value})")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Top-level error type for flowscroll.
#[derive(Debug)]
pub enum Error {
    /// Configuration failed validation.
    Config(ConfigError),
    /// Configuration JSON could not be parsed.
    Parse(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
            Self::Parse(err) => write!(f, "malformed configuration: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Standard result type for flowscroll APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Error, Extent, FlowConfig, FlowContainer, FlowItem, GestureEvent, Gravity,
        HorizontalAlign, Instant, ItemParams, Measurable, PointerEvent, PointerId, Rect, Result,
        Sides, Size, SizeSpec, VerticalAlign,
    };

    pub use crate::{core, layout};
}

pub use flowscroll_core as core;
pub use flowscroll_layout as layout;
