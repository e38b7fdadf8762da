// Copyright 2025 the Freeform Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use bitflags::bitflags;
use kurbo::{Affine, Point, Vec2};

use crate::math::row_major;

bitflags! {
    /// One bit per clamped/snapped component of the committed transform.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TransformFlags: u8 {
        /// Translation along X.
        const TRANSLATION_X = 1 << 0;
        /// Translation along Y.
        const TRANSLATION_Y = 1 << 1;
        /// Uniform scale.
        const SCALE = 1 << 2;
        /// Rotation.
        const ROTATION = 1 << 3;
    }
}

/// Immutable read model of a [`crate::TouchTransform`].
///
/// Obtained from [`crate::TouchTransform::snapshot`]; compare
/// [`TransformSnapshot::revision`] to detect changes cheaply.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformSnapshot {
    /// Bumped on every observable change of the controller.
    pub revision: u64,
    /// Surface-local to transformed coordinates.
    pub matrix: Affine,
    /// Exact inverse of [`TransformSnapshot::matrix`].
    pub matrix_inverse: Affine,
    /// Committed translation, relative to the surface center.
    pub translation: Vec2,
    /// Committed uniform scale.
    pub scale: f64,
    /// Committed rotation in radians.
    ///
    /// This is the negation of the internally stored rotation, i.e. a
    /// standard rotation angle matching [`Affine::rotate`].
    pub rotation: f64,
    /// Pivot of the current manipulation plus the distance it has travelled,
    /// relative to the surface center.
    pub center_point: Point,
    /// Where the current single touch went down.
    pub first_touch: Point,
    /// Latest position of the current single touch while dragging.
    pub current_touch: Point,
    /// `current_touch - first_touch`.
    pub offset: Vec2,
    /// A finger is down on the surface.
    pub is_touching: bool,
    /// A single-finger drag is in progress.
    pub is_dragging: bool,
    /// A two-point manipulation is in progress.
    pub is_transforming: bool,
    /// Components whose latest raw value fell outside their range.
    pub out_of_bounds: TransformFlags,
    /// Components pulled onto a rest position on the latest update.
    pub snapped: TransformFlags,
}

impl TransformSnapshot {
    /// Returns the matrix as a row-major 3×3 array.
    #[must_use]
    pub fn matrix_rows(&self) -> [[f64; 3]; 3] {
        row_major(self.matrix)
    }

    /// Returns the inverse matrix as a row-major 3×3 array.
    #[must_use]
    pub fn matrix_inverse_rows(&self) -> [[f64; 3]; 3] {
        row_major(self.matrix_inverse)
    }

    /// Maps a surface point back into untransformed content coordinates.
    ///
    /// Use this to find which part of the content lies under a touch.
    #[must_use]
    pub fn to_content(&self, surface_point: Point) -> Point {
        self.matrix_inverse * surface_point
    }

    /// Maps a content point onto the surface.
    #[must_use]
    pub fn to_surface(&self, content_point: Point) -> Point {
        self.matrix * content_point
    }

    /// Translation along X was out of range before clamping.
    #[must_use]
    pub fn translation_x_out_of_bounds(&self) -> bool {
        self.out_of_bounds.contains(TransformFlags::TRANSLATION_X)
    }

    /// Translation along Y was out of range before clamping.
    #[must_use]
    pub fn translation_y_out_of_bounds(&self) -> bool {
        self.out_of_bounds.contains(TransformFlags::TRANSLATION_Y)
    }

    /// Scale was out of range before clamping.
    #[must_use]
    pub fn scale_out_of_bounds(&self) -> bool {
        self.out_of_bounds.contains(TransformFlags::SCALE)
    }

    /// Rotation was out of range before clamping.
    #[must_use]
    pub fn rotation_out_of_bounds(&self) -> bool {
        self.out_of_bounds.contains(TransformFlags::ROTATION)
    }

    /// Translation along X was snapped to zero.
    #[must_use]
    pub fn translation_x_snapped(&self) -> bool {
        self.snapped.contains(TransformFlags::TRANSLATION_X)
    }

    /// Translation along Y was snapped to zero.
    #[must_use]
    pub fn translation_y_snapped(&self) -> bool {
        self.snapped.contains(TransformFlags::TRANSLATION_Y)
    }

    /// Scale was snapped to one.
    #[must_use]
    pub fn scale_snapped(&self) -> bool {
        self.snapped.contains(TransformFlags::SCALE)
    }

    /// Rotation was snapped to a multiple of the snap period.
    #[must_use]
    pub fn rotation_snapped(&self) -> bool {
        self.snapped.contains(TransformFlags::ROTATION)
    }
}
