// Copyright 2025 the Freeform Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use freeform_transform::ConfigError;

/// Behavior switches for a [`crate::TouchSurface`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SurfaceConfig {
    /// Distance a single touch must travel before it becomes a drag.
    pub minimum_drag_distance: f64,
    /// A single finger pans the transform instead of dragging.
    pub dragging_disabled: bool,
    /// Only the single-touch path is armed; second fingers are ignored.
    pub transform_disabled: bool,
    /// Exponent applied to each incremental pinch ratio.
    ///
    /// Trackpad pinches report large ratios; the default square root
    /// damps them to feel like a two-finger touch pinch.
    pub pinch_exponent: f64,
}

impl SurfaceConfig {
    /// Default for [`SurfaceConfig::minimum_drag_distance`].
    pub const DEFAULT_MINIMUM_DRAG_DISTANCE: f64 = 3.0;

    /// Default for [`SurfaceConfig::pinch_exponent`].
    pub const DEFAULT_PINCH_EXPONENT: f64 = 0.5;

    /// Sets the drag threshold.
    #[must_use]
    pub fn with_minimum_drag_distance(mut self, distance: f64) -> Self {
        self.minimum_drag_distance = distance;
        self
    }

    /// Makes a single finger pan the transform.
    #[must_use]
    pub fn with_dragging_disabled(mut self, disabled: bool) -> Self {
        self.dragging_disabled = disabled;
        self
    }

    /// Ignores second fingers.
    #[must_use]
    pub fn with_transform_disabled(mut self, disabled: bool) -> Self {
        self.transform_disabled = disabled;
        self
    }

    /// Sets the pinch damping exponent.
    #[must_use]
    pub fn with_pinch_exponent(mut self, exponent: f64) -> Self {
        self.pinch_exponent = exponent;
        self
    }

    /// Checks the drag threshold and pinch exponent.
    ///
    /// Like [`freeform_transform::TransformConfig::validate`], this is an
    /// opt-in host check; the surface never calls it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.minimum_drag_distance >= 0.0) {
            return Err(ConfigError::Negative {
                name: "minimum drag distance",
                value: self.minimum_drag_distance,
            });
        }
        if !(self.pinch_exponent > 0.0) {
            return Err(ConfigError::NonPositive {
                name: "pinch exponent",
                value: self.pinch_exponent,
            });
        }
        Ok(())
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            minimum_drag_distance: Self::DEFAULT_MINIMUM_DRAG_DISTANCE,
            dragging_disabled: false,
            transform_disabled: false,
            pinch_exponent: Self::DEFAULT_PINCH_EXPONENT,
        }
    }
}
