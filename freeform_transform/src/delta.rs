// Copyright 2025 the Freeform Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Vec2};

/// A pivot-relative translation/scale/rotation triple.
///
/// Used both for the committed transform of a surface and for the
/// in-progress change of a gesture. Translation and pivot are expressed
/// relative to the surface center; `rotation` is in radians using the
/// internal sign convention (see [`crate::math::rotate_about`]).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransformDelta {
    /// Offset applied after scale and rotation.
    pub translation: Vec2,
    /// Uniform scale factor.
    pub scale: f64,
    /// Rotation in radians, internal sign convention.
    pub rotation: f64,
    /// Point about which scale and rotation are anchored.
    pub pivot: Point,
}

impl TransformDelta {
    /// No translation, unit scale, no rotation, pivot at the surface center.
    pub const IDENTITY: Self = Self {
        translation: Vec2::ZERO,
        scale: 1.0,
        rotation: 0.0,
        pivot: Point::ORIGIN,
    };

    /// Realizes the delta as an affine map from surface-local coordinates.
    ///
    /// Scale and rotation apply first, then the translation plus
    /// `center_offset` (half the surface size).
    #[must_use]
    pub fn matrix(&self, center_offset: Vec2) -> Affine {
        Affine::translate(self.translation + center_offset)
            * Affine::rotate(-self.rotation)
            * Affine::scale(self.scale)
    }
}

impl Default for TransformDelta {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Whether a gesture is currently accumulating a delta.
///
/// `Active` carries the change since the snapshot taken when the gesture
/// started.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GestureState {
    /// No transform is in progress.
    #[default]
    Idle,
    /// A transform is in progress with the given accumulated delta.
    Active(TransformDelta),
}

impl GestureState {
    /// Returns `true` while a transform is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    /// Returns the accumulated delta, if a transform is in progress.
    #[must_use]
    pub fn delta(&self) -> Option<&TransformDelta> {
        match self {
            Self::Active(delta) => Some(delta),
            Self::Idle => None,
        }
    }
}
