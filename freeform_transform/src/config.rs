// Copyright 2025 the Freeform Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::RangeInclusive;

use kurbo::Vec2;
use thiserror::Error;

/// Construction-time configuration for a [`crate::TouchTransform`].
///
/// The defaults leave every value unbounded (scale only has to stay
/// non-negative) and disable all snapping.
///
/// Ranges are trusted as given. [`TransformConfig::validate`] is available
/// for hosts that want to check a configuration up front, but the
/// controller itself never calls it: a malformed range simply produces
/// visibly wrong clamped output.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TransformConfig {
    /// Initial translation, relative to the surface center.
    pub translation: Vec2,
    /// Initial uniform scale.
    pub scale: f64,
    /// Initial rotation in radians.
    pub rotation: f64,
    /// Inclusive range for the committed scale.
    pub scale_range: RangeInclusive<f64>,
    /// Inclusive range for the committed rotation.
    pub rotation_range: RangeInclusive<f64>,
    /// Inclusive range for the committed translation along X.
    pub translation_range_x: RangeInclusive<f64>,
    /// Inclusive range for the committed translation along Y.
    pub translation_range_y: RangeInclusive<f64>,
    /// Maximum X deviation from zero that snaps to zero.
    pub translation_x_snap_distance: f64,
    /// Maximum Y deviation from zero that snaps to zero.
    pub translation_y_snap_distance: f64,
    /// Period of rotation rest positions, in radians.
    pub rotation_snap_period: f64,
    /// Maximum rotational deviation from a rest position that snaps to it.
    pub rotation_snap_distance: f64,
    /// Maximum deviation of the scale from `1` that snaps to `1`.
    pub scale_snap_distance: f64,
    /// Anchor scale and rotation at the surface center instead of the
    /// midpoint between the touches.
    pub disable_relative_rotation_and_scale: bool,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            translation: Vec2::ZERO,
            scale: 1.0,
            rotation: 0.0,
            scale_range: 0.0..=f64::MAX,
            rotation_range: f64::MIN..=f64::MAX,
            translation_range_x: f64::MIN..=f64::MAX,
            translation_range_y: f64::MIN..=f64::MAX,
            translation_x_snap_distance: 0.0,
            translation_y_snap_distance: 0.0,
            rotation_snap_period: f64::MAX,
            rotation_snap_distance: 0.0,
            scale_snap_distance: 0.0,
            disable_relative_rotation_and_scale: false,
        }
    }
}

impl TransformConfig {
    /// Sets the initial translation, scale and rotation.
    #[must_use]
    pub fn with_initial(mut self, translation: Vec2, scale: f64, rotation: f64) -> Self {
        self.translation = translation;
        self.scale = scale;
        self.rotation = rotation;
        self
    }

    /// Sets the scale range.
    #[must_use]
    pub fn with_scale_range(mut self, range: RangeInclusive<f64>) -> Self {
        self.scale_range = range;
        self
    }

    /// Sets the rotation range.
    #[must_use]
    pub fn with_rotation_range(mut self, range: RangeInclusive<f64>) -> Self {
        self.rotation_range = range;
        self
    }

    /// Sets the translation ranges for both axes.
    #[must_use]
    pub fn with_translation_ranges(
        mut self,
        x: RangeInclusive<f64>,
        y: RangeInclusive<f64>,
    ) -> Self {
        self.translation_range_x = x;
        self.translation_range_y = y;
        self
    }

    /// Sets the translation snap distances for both axes.
    #[must_use]
    pub fn with_translation_snap(mut self, x: f64, y: f64) -> Self {
        self.translation_x_snap_distance = x;
        self.translation_y_snap_distance = y;
        self
    }

    /// Sets the rotation snap period and distance.
    #[must_use]
    pub fn with_rotation_snap(mut self, period: f64, distance: f64) -> Self {
        self.rotation_snap_period = period;
        self.rotation_snap_distance = distance;
        self
    }

    /// Sets the scale snap distance.
    #[must_use]
    pub fn with_scale_snap(mut self, distance: f64) -> Self {
        self.scale_snap_distance = distance;
        self
    }

    /// Anchors scale and rotation at the surface center.
    #[must_use]
    pub fn with_relative_rotation_and_scale_disabled(mut self, disabled: bool) -> Self {
        self.disable_relative_rotation_and_scale = disabled;
        self
    }

    /// Checks the configuration for inverted ranges and negative tolerances.
    ///
    /// This is an optional host-side check; see the type docs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("scale", &self.scale_range)?;
        check_range("rotation", &self.rotation_range)?;
        check_range("translation x", &self.translation_range_x)?;
        check_range("translation y", &self.translation_range_y)?;
        check_non_negative("translation x snap distance", self.translation_x_snap_distance)?;
        check_non_negative("translation y snap distance", self.translation_y_snap_distance)?;
        check_non_negative("rotation snap distance", self.rotation_snap_distance)?;
        check_non_negative("scale snap distance", self.scale_snap_distance)?;
        check_positive("rotation snap period", self.rotation_snap_period)?;
        check_contains("scale", &self.scale_range, self.scale)?;
        check_contains("rotation", &self.rotation_range, self.rotation)?;
        check_contains("translation x", &self.translation_range_x, self.translation.x)?;
        check_contains("translation y", &self.translation_range_y, self.translation.y)?;
        Ok(())
    }
}

/// A configuration value rejected by a `validate` helper.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// A range whose lower bound exceeds its upper bound.
    #[error("{name} range is inverted: {start} > {end}")]
    InvertedRange {
        /// Which range.
        name: &'static str,
        /// Lower bound.
        start: f64,
        /// Upper bound.
        end: f64,
    },
    /// A tolerance or distance that must not be negative.
    #[error("{name} must not be negative, got {value}")]
    Negative {
        /// Which value.
        name: &'static str,
        /// The offending value.
        value: f64,
    },
    /// A period or exponent that must be strictly positive.
    #[error("{name} must be positive, got {value}")]
    NonPositive {
        /// Which value.
        name: &'static str,
        /// The offending value.
        value: f64,
    },
    /// An initial value outside its configured range.
    #[error("initial {name} {value} lies outside its range")]
    InitialOutOfRange {
        /// Which value.
        name: &'static str,
        /// The offending value.
        value: f64,
    },
}

fn check_range(name: &'static str, range: &RangeInclusive<f64>) -> Result<(), ConfigError> {
    let (start, end) = (*range.start(), *range.end());
    if start <= end {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange { name, start, end })
    }
}

/// Rejects negative values, including NaN.
fn check_non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

/// Rejects zero, negative and NaN values.
fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn check_contains(
    name: &'static str,
    range: &RangeInclusive<f64>,
    value: f64,
) -> Result<(), ConfigError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InitialOutOfRange { name, value })
    }
}
