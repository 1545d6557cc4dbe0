// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunables for the docking panel.
//!
//! A [`DockConfig`] is supplied once when a panel is created and treated as
//! read-only afterwards. It is combined with a container size to build a
//! [`DockLayout`](crate::DockLayout).
//!
//! ```
//! use understory_dock::DockConfig;
//!
//! let config = DockConfig::default()
//!     .with_top_padding(44.0)
//!     .with_bottom_padding(34.0)
//!     .with_flick_speed_threshold(200.0);
//! assert!(config.validate().is_ok());
//! ```

use core::fmt;
use core::time::Duration;

/// Error returned when a [`DockConfig`] or container size cannot produce a
/// usable layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// The container width or height is not a positive finite number.
    InvalidContainer {
        /// Offending container width.
        width: f64,
        /// Offending container height.
        height: f64,
    },
    /// `docked_width_ratio` must be finite and at least `1.0`.
    InvalidWidthRatio(f64),
    /// `top_view_aspect_ratio` must be finite and positive.
    InvalidAspectRatio(f64),
    /// A padding or clearance is negative or not finite.
    InvalidInset {
        /// Name of the field.
        field: &'static str,
        /// Offending value.
        value: f64,
    },
    /// A fraction field lies outside `(0, 1]`.
    InvalidFraction {
        /// Name of the field.
        field: &'static str,
        /// Offending value.
        value: f64,
    },
    /// `flick_speed_threshold` must be finite and non-negative.
    InvalidSpeedThreshold(f64),
    /// The docked tile does not fit inside the expanded region.
    DockedTileDoesNotFit,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidContainer { width, height } => {
                write!(f, "container size {width}x{height} must be positive and finite")
            }
            Self::InvalidWidthRatio(ratio) => {
                write!(f, "docked width ratio {ratio} must be finite and >= 1")
            }
            Self::InvalidAspectRatio(ratio) => {
                write!(f, "aspect ratio {ratio} must be finite and positive")
            }
            Self::InvalidInset { field, value } => {
                write!(f, "{field} = {value} must be finite and non-negative")
            }
            Self::InvalidFraction { field, value } => {
                write!(f, "{field} = {value} must lie in (0, 1]")
            }
            Self::InvalidSpeedThreshold(speed) => {
                write!(f, "flick speed threshold {speed} must be finite and non-negative")
            }
            Self::DockedTileDoesNotFit => {
                f.write_str("docked tile does not fit inside the expanded region")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

/// Immutable tunables for a docking panel.
///
/// Distances are in the same units as pointer samples (typically logical
/// pixels). Speeds are in units per second.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DockConfig {
    /// Docked tile width is `container_width / docked_width_ratio`.
    pub docked_width_ratio: f64,
    /// Width to height ratio of the panel's top view, and therefore of the
    /// docked tile.
    pub top_view_aspect_ratio: f64,
    /// Gap between the docked tile's bottom edge and the expanded region's
    /// bottom edge.
    pub docked_clearance_from_bottom: f64,
    /// Gap between the docked tile's trailing edge and the container's
    /// trailing edge.
    pub docked_clearance_from_trailing: f64,
    /// Safe area inset at the top of the container.
    pub top_padding: f64,
    /// Safe area inset at the bottom of the container.
    pub bottom_padding: f64,
    /// Fraction of the expanded size that a released panel must exceed to
    /// snap to expanded.
    pub transition_threshold_fraction: f64,
    /// Release speed above which a vertical or horizontal gesture commits to
    /// the far state regardless of distance.
    pub flick_speed_threshold: f64,
    /// Fraction of the pan length a vertical drag must cover to start a
    /// transition, and below which a release is treated as cancelled.
    pub minimum_pan_fraction: f64,
    /// Horizontal travel needed before a docked drag locks to a swipe.
    pub axis_lock_deadzone: f64,
    /// Pan length used when no gesture session is open.
    pub default_pan_length: f64,
    /// When `false`, pointer input is ignored entirely.
    pub is_docking_allowed: bool,
    /// Abandon a live session when no sample has arrived for this long.
    ///
    /// `None` disables the watchdog; see
    /// [`DockDirector::expire_stale_session`](crate::DockDirector::expire_stale_session).
    pub stale_session_timeout: Option<Duration>,
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            docked_width_ratio: 2.0,
            top_view_aspect_ratio: 16.0 / 9.0,
            docked_clearance_from_bottom: 50.0,
            docked_clearance_from_trailing: 15.0,
            top_padding: 0.0,
            bottom_padding: 0.0,
            transition_threshold_fraction: 0.5,
            flick_speed_threshold: 150.0,
            minimum_pan_fraction: 0.1,
            axis_lock_deadzone: 20.0,
            default_pan_length: 350.0,
            is_docking_allowed: true,
            stale_session_timeout: None,
        }
    }
}

impl DockConfig {
    /// Sets [`docked_width_ratio`](Self::docked_width_ratio).
    #[must_use]
    pub fn with_docked_width_ratio(mut self, ratio: f64) -> Self {
        self.docked_width_ratio = ratio;
        self
    }

    /// Sets [`top_view_aspect_ratio`](Self::top_view_aspect_ratio).
    #[must_use]
    pub fn with_top_view_aspect_ratio(mut self, ratio: f64) -> Self {
        self.top_view_aspect_ratio = ratio;
        self
    }

    /// Sets the docked tile's bottom and trailing clearances.
    #[must_use]
    pub fn with_docked_clearance(mut self, bottom: f64, trailing: f64) -> Self {
        self.docked_clearance_from_bottom = bottom;
        self.docked_clearance_from_trailing = trailing;
        self
    }

    /// Sets [`top_padding`](Self::top_padding).
    #[must_use]
    pub fn with_top_padding(mut self, padding: f64) -> Self {
        self.top_padding = padding;
        self
    }

    /// Sets [`bottom_padding`](Self::bottom_padding).
    #[must_use]
    pub fn with_bottom_padding(mut self, padding: f64) -> Self {
        self.bottom_padding = padding;
        self
    }

    /// Sets [`transition_threshold_fraction`](Self::transition_threshold_fraction).
    #[must_use]
    pub fn with_transition_threshold_fraction(mut self, fraction: f64) -> Self {
        self.transition_threshold_fraction = fraction;
        self
    }

    /// Sets [`flick_speed_threshold`](Self::flick_speed_threshold).
    #[must_use]
    pub fn with_flick_speed_threshold(mut self, speed: f64) -> Self {
        self.flick_speed_threshold = speed;
        self
    }

    /// Sets [`minimum_pan_fraction`](Self::minimum_pan_fraction).
    #[must_use]
    pub fn with_minimum_pan_fraction(mut self, fraction: f64) -> Self {
        self.minimum_pan_fraction = fraction;
        self
    }

    /// Sets [`axis_lock_deadzone`](Self::axis_lock_deadzone).
    #[must_use]
    pub fn with_axis_lock_deadzone(mut self, deadzone: f64) -> Self {
        self.axis_lock_deadzone = deadzone;
        self
    }

    /// Sets [`is_docking_allowed`](Self::is_docking_allowed).
    #[must_use]
    pub fn with_docking_allowed(mut self, allowed: bool) -> Self {
        self.is_docking_allowed = allowed;
        self
    }

    /// Sets [`stale_session_timeout`](Self::stale_session_timeout).
    #[must_use]
    pub fn with_stale_session_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.stale_session_timeout = timeout;
        self
    }

    /// Checks every field for values that would produce NaN or negative
    /// geometry.
    ///
    /// Container-dependent checks happen in
    /// [`DockLayout::new`](crate::DockLayout::new).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.docked_width_ratio.is_finite() || self.docked_width_ratio < 1.0 {
            return Err(ConfigError::InvalidWidthRatio(self.docked_width_ratio));
        }
        if !self.top_view_aspect_ratio.is_finite() || self.top_view_aspect_ratio <= 0.0 {
            return Err(ConfigError::InvalidAspectRatio(self.top_view_aspect_ratio));
        }
        for (field, value) in [
            ("docked_clearance_from_bottom", self.docked_clearance_from_bottom),
            ("docked_clearance_from_trailing", self.docked_clearance_from_trailing),
            ("top_padding", self.top_padding),
            ("bottom_padding", self.bottom_padding),
            ("axis_lock_deadzone", self.axis_lock_deadzone),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidInset { field, value });
            }
        }
        for (field, value) in [
            ("transition_threshold_fraction", self.transition_threshold_fraction),
            ("minimum_pan_fraction", self.minimum_pan_fraction),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::InvalidFraction { field, value });
            }
        }
        if !self.flick_speed_threshold.is_finite() || self.flick_speed_threshold < 0.0 {
            return Err(ConfigError::InvalidSpeedThreshold(self.flick_speed_threshold));
        }
        if !self.default_pan_length.is_finite() || self.default_pan_length <= 0.0 {
            return Err(ConfigError::InvalidInset {
                field: "default_pan_length",
                value: self.default_pan_length,
            });
        }
        Ok(())
    }
}
