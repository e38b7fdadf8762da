// Copyright 2025 the Freeform Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Size, Vec2};
use tracing::{debug, trace};

use crate::config::TransformConfig;
use crate::delta::{GestureState, TransformDelta};
use crate::math::{clamp_to_range, normalize_angle, rotate_about, snap_to, snap_to_period};
use crate::snapshot::{TransformFlags, TransformSnapshot};

/// Values exposed to consumers, refreshed by [`TouchTransform::publish`].
#[derive(Clone, Copy, Debug)]
struct Published {
    translation: Vec2,
    scale: f64,
    rotation: f64,
    center_point: Point,
}

/// Owns the committed transform of one surface and the gesture in progress.
///
/// - `resulting` is the committed transform. It only changes through
///   [`TouchTransform::clamp_and_snap`] (and the operations built on it),
///   so it always lies inside the configured ranges.
/// - `previous` is the committed transform as it was when the current
///   gesture started.
/// - the [`GestureState`] carries the change accumulated since then.
///
/// The matrix and its inverse are cached and always rebuilt together.
#[derive(Clone, Debug)]
pub struct TouchTransform {
    config: TransformConfig,
    resulting: TransformDelta,
    previous: TransformDelta,
    gesture: GestureState,
    center_offset: Vec2,
    pending_center_offset: Option<Vec2>,
    matrix: Affine,
    matrix_inverse: Affine,
    published: Published,
    out_of_bounds: TransformFlags,
    snapped: TransformFlags,
    is_touching: bool,
    is_dragging: bool,
    is_transforming: bool,
    first_touch: Point,
    current_touch: Point,
    offset: Vec2,
    revision: u64,
}

impl TouchTransform {
    /// Creates a controller seeded with the configured initial transform.
    ///
    /// Initial values outside their ranges are clamped silently.
    #[must_use]
    pub fn new(config: TransformConfig) -> Self {
        let resulting = TransformDelta {
            translation: Vec2::new(
                clamp_to_range(config.translation.x, &config.translation_range_x).0,
                clamp_to_range(config.translation.y, &config.translation_range_y).0,
            ),
            scale: clamp_to_range(config.scale, &config.scale_range).0,
            rotation: clamp_to_range(config.rotation, &config.rotation_range).0,
            pivot: Point::ORIGIN,
        };
        let mut transform = Self {
            config,
            resulting,
            previous: TransformDelta::IDENTITY,
            gesture: GestureState::Idle,
            center_offset: Vec2::ZERO,
            pending_center_offset: None,
            matrix: Affine::IDENTITY,
            matrix_inverse: Affine::IDENTITY,
            published: Published {
                translation: resulting.translation,
                scale: resulting.scale,
                rotation: -resulting.rotation,
                center_point: Point::ORIGIN,
            },
            out_of_bounds: TransformFlags::empty(),
            snapped: TransformFlags::empty(),
            is_touching: false,
            is_dragging: false,
            is_transforming: false,
            first_touch: Point::ORIGIN,
            current_touch: Point::ORIGIN,
            offset: Vec2::ZERO,
            revision: 0,
        };
        transform.update_matrix();
        transform
    }

    /// Returns the configuration this controller was built with.
    #[must_use]
    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Returns an immutable snapshot of the read model.
    #[must_use]
    pub fn snapshot(&self) -> TransformSnapshot {
        TransformSnapshot {
            revision: self.revision,
            matrix: self.matrix,
            matrix_inverse: self.matrix_inverse,
            translation: self.published.translation,
            scale: self.published.scale,
            rotation: self.published.rotation,
            center_point: self.published.center_point,
            first_touch: self.first_touch,
            current_touch: self.current_touch,
            offset: self.offset,
            is_touching: self.is_touching,
            is_dragging: self.is_dragging,
            is_transforming: self.is_transforming,
            out_of_bounds: self.out_of_bounds,
            snapped: self.snapped,
        }
    }

    /// Monotonic counter bumped on every observable change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The committed transform.
    #[must_use]
    pub fn resulting(&self) -> &TransformDelta {
        &self.resulting
    }

    /// The committed transform as of the start of the current gesture.
    #[must_use]
    pub fn previous(&self) -> &TransformDelta {
        &self.previous
    }

    /// Whether a transform is in progress, and its accumulated delta.
    #[must_use]
    pub fn gesture_state(&self) -> &GestureState {
        &self.gesture
    }

    /// Current surface-local to transformed matrix.
    #[must_use]
    pub fn matrix(&self) -> Affine {
        self.matrix
    }

    /// Inverse of [`TouchTransform::matrix`].
    #[must_use]
    pub fn matrix_inverse(&self) -> Affine {
        self.matrix_inverse
    }

    /// Half the last applied surface size.
    #[must_use]
    pub fn center_offset(&self) -> Vec2 {
        self.center_offset
    }

    /// A finger is down on the surface.
    #[must_use]
    pub fn is_touching(&self) -> bool {
        self.is_touching
    }

    /// A single-finger drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// A manipulation is in progress.
    #[must_use]
    pub fn is_transforming(&self) -> bool {
        self.is_transforming
    }

    /// Returns the committed transform to identity.
    ///
    /// The identity is still pushed through the clamp and snap rules, so a
    /// configuration whose ranges exclude it ends up at the nearest bound.
    pub fn reset(&mut self) {
        self.previous = TransformDelta::IDENTITY;
        self.resulting = TransformDelta::IDENTITY;
        self.gesture = GestureState::Active(TransformDelta::IDENTITY);
        self.apply_delta(1.0, 0.0, Vec2::ZERO);
        self.publish();
        self.gesture = GestureState::Idle;
        self.is_transforming = false;
        debug!("transform reset");
    }

    /// Sets an absolute scale, anchored at the surface center.
    ///
    /// Ignored while a gesture is in progress. A collapsed (zero) committed
    /// scale is replaced by `scale` outright, leaving the translation alone.
    pub fn set_scale(&mut self, scale: f64) {
        if self.gesture.is_active() {
            debug!(scale, "set_scale ignored during an active gesture");
            return;
        }
        self.init_transform();
        self.resulting.pivot = Point::ORIGIN;
        let ratio = if self.previous.scale > 0.0 {
            scale / self.previous.scale
        } else {
            // No ratio exists from zero; restart from the target.
            self.previous.scale = scale;
            1.0
        };
        self.clamp_and_snap(ratio, 0.0, Vec2::ZERO);
        self.end_transform();
    }

    /// Records the surface size for the next [`TouchTransform::apply_pending_resize`].
    ///
    /// Nothing is recomputed here, so this is safe to call while the host
    /// is laying out. Returns `true` if a resize is now pending. Only the
    /// latest size counts.
    pub fn set_frame_size(&mut self, size: Size) -> bool {
        let center = size.to_vec2() * 0.5;
        if center == self.center_offset {
            self.pending_center_offset = None;
            false
        } else {
            self.pending_center_offset = Some(center);
            true
        }
    }

    /// Returns `true` if a resize is waiting to be applied.
    #[must_use]
    pub fn has_pending_resize(&self) -> bool {
        self.pending_center_offset.is_some()
    }

    /// Applies a resize recorded by [`TouchTransform::set_frame_size`].
    ///
    /// Call this at a point in the frame where the host is not laying out.
    /// Returns `true` if the matrix changed.
    pub fn apply_pending_resize(&mut self) -> bool {
        let Some(center) = self.pending_center_offset.take() else {
            return false;
        };
        self.center_offset = center;
        self.update_matrix();
        self.revision += 1;
        debug!(x = center.x, y = center.y, "applied pending resize");
        true
    }

    /// Anchors the manipulation at the midpoint between two touches.
    pub fn update_center_point(&mut self, a: Point, b: Point) {
        self.resulting.pivot = a.midpoint(b) - self.center_offset;
        self.publish();
    }

    /// Anchors the manipulation at a single surface point, e.g. a hover location.
    pub fn update_center_point_at(&mut self, point: Point) {
        self.resulting.pivot = point - self.center_offset;
        self.publish();
    }

    /// Begins tracking a single touch at `point`.
    pub fn start_single_touch(&mut self, point: Point) {
        self.first_touch = point;
        self.current_touch = point;
        self.offset = Vec2::ZERO;
        self.is_touching = true;
        self.revision += 1;
    }

    /// Moves the tracked single touch, marking the surface as dragged.
    pub fn move_single_touch(&mut self, point: Point) {
        self.current_touch = point;
        self.offset = point - self.first_touch;
        self.is_dragging = true;
        self.revision += 1;
    }

    /// Stops tracking the single touch.
    pub fn end_single_touch(&mut self) {
        self.is_dragging = false;
        self.is_touching = false;
        self.revision += 1;
    }

    /// Starts a manipulation seeded from the committed transform.
    ///
    /// Idempotent while a manipulation is already in progress.
    pub fn init_transform(&mut self) {
        if !self.gesture.is_active() {
            self.previous = self.resulting;
            self.gesture = GestureState::Active(TransformDelta::IDENTITY);
        }
        self.is_transforming = true;
        self.revision += 1;
    }

    /// Ends the manipulation, keeping the committed transform.
    pub fn end_transform(&mut self) {
        self.gesture = GestureState::Idle;
        self.is_transforming = false;
        self.is_touching = false;
        self.revision += 1;
    }

    /// Applies one step of a two-point manipulation.
    ///
    /// With two points on both sides the change in distance, midpoint and
    /// angle between them becomes an incremental scale, translation and
    /// rotation. Otherwise a finger has just lifted, and the pivot is moved
    /// to the first remaining point without touching the transform itself.
    /// Does nothing when no manipulation is in progress.
    pub fn update_transform(&mut self, prev: &[Point], curr: &[Point]) {
        if !self.gesture.is_active() {
            return;
        }
        match (prev, curr) {
            ([p0, p1], [c0, c1]) => {
                let prev_span = *p0 - *p1;
                let curr_span = *c0 - *c1;
                let prev_dist = prev_span.length();
                let scale = if prev_dist > 0.0 {
                    curr_span.length() / prev_dist
                } else {
                    1.0
                };
                let translation = c0.midpoint(*c1) - p0.midpoint(*p1);
                let angle = normalize_angle(curr_span.atan2() - prev_span.atan2());
                self.apply_delta(scale, angle, translation);
            }
            (_, [first, ..]) => {
                self.resulting.pivot = *first - self.center_offset;
            }
            (_, []) => {}
        }
        self.publish();
    }

    /// Composes an incremental change onto the manipulation in progress.
    ///
    /// `scale` is a ratio, `angle` an on-screen rotation delta and
    /// `translation` an offset, all relative to the previous step. The
    /// result is clamped to the configured ranges, then snapped to rest
    /// positions, and committed. Does nothing when no manipulation is in
    /// progress.
    pub fn clamp_and_snap(&mut self, scale: f64, angle: f64, translation: Vec2) {
        if self.apply_delta(scale, angle, translation) {
            self.publish();
        }
    }

    fn apply_delta(&mut self, scale: f64, angle: f64, translation: Vec2) -> bool {
        let GestureState::Active(mut current) = self.gesture else {
            return false;
        };
        let config = &self.config;
        let previous = self.previous;
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };

        // On-screen angles and the internal rotation have opposite signs.
        let raw_rotation = normalize_angle(previous.rotation + current.rotation - angle);
        let (abs_scale, scale_oob) =
            clamp_to_range(previous.scale * current.scale * scale, &config.scale_range);
        let (abs_rotation, rotation_oob) = clamp_to_range(raw_rotation, &config.rotation_range);
        let raw_translation = previous.translation + current.translation + translation;
        let (tx, tx_oob) = clamp_to_range(raw_translation.x, &config.translation_range_x);
        let (ty, ty_oob) = clamp_to_range(raw_translation.y, &config.translation_range_y);

        current.scale = if previous.scale != 0.0 {
            abs_scale / previous.scale
        } else {
            1.0
        };
        current.rotation = abs_rotation - previous.rotation;

        // Scaling and rotating about an off-center pivot drags the
        // translation along with it.
        let mut anchored = previous.translation;
        if !config.disable_relative_rotation_and_scale {
            let pivot = self.resulting.pivot.to_vec2();
            anchored += (anchored - pivot) * (current.scale - 1.0);
            anchored = rotate_about(anchored, pivot, current.rotation);
        }
        current.translation = Vec2::new(tx, ty) - previous.translation;

        let moved = anchored + current.translation;
        let (sx, sx_snapped) = snap_to(moved.x, 0.0, config.translation_x_snap_distance);
        let (sy, sy_snapped) = snap_to(moved.y, 0.0, config.translation_y_snap_distance);
        let (snapped_rotation, rotation_snapped) = snap_to_period(
            previous.rotation + current.rotation,
            config.rotation_snap_period,
            config.rotation_snap_distance,
        );
        let (snapped_scale, scale_snapped) = snap_to(
            previous.scale * current.scale,
            1.0,
            config.scale_snap_distance,
        );

        // Pivot correction and snapping can both leave the ranges again.
        self.resulting.translation = Vec2::new(
            clamp_to_range(sx, &config.translation_range_x).0,
            clamp_to_range(sy, &config.translation_range_y).0,
        );
        self.resulting.rotation = clamp_to_range(snapped_rotation, &config.rotation_range).0;
        self.resulting.scale = clamp_to_range(snapped_scale, &config.scale_range).0;

        let mut out_of_bounds = TransformFlags::empty();
        out_of_bounds.set(TransformFlags::TRANSLATION_X, tx_oob);
        out_of_bounds.set(TransformFlags::TRANSLATION_Y, ty_oob);
        out_of_bounds.set(TransformFlags::SCALE, scale_oob);
        out_of_bounds.set(TransformFlags::ROTATION, rotation_oob);
        self.out_of_bounds = out_of_bounds;

        let mut snapped = TransformFlags::empty();
        snapped.set(TransformFlags::TRANSLATION_X, sx_snapped);
        snapped.set(TransformFlags::TRANSLATION_Y, sy_snapped);
        snapped.set(TransformFlags::SCALE, scale_snapped);
        snapped.set(TransformFlags::ROTATION, rotation_snapped);
        self.snapped = snapped;

        self.gesture = GestureState::Active(current);
        trace!(
            scale = self.resulting.scale,
            rotation = self.resulting.rotation,
            x = self.resulting.translation.x,
            y = self.resulting.translation.y,
            "transform updated"
        );
        true
    }

    /// Refreshes the matrix and the published values from `resulting`.
    fn publish(&mut self) {
        self.update_matrix();
        let travelled = self
            .gesture
            .delta()
            .map_or(Vec2::ZERO, |delta| delta.translation);
        self.published = Published {
            translation: self.resulting.translation,
            scale: self.resulting.scale,
            rotation: -self.resulting.rotation,
            center_point: self.resulting.pivot + travelled,
        };
        self.revision += 1;
    }

    fn update_matrix(&mut self) {
        self.matrix = self.resulting.matrix(self.center_offset);
        self.matrix_inverse = self.matrix.inverse();
    }
}

impl Default for TouchTransform {
    fn default() -> Self {
        Self::new(TransformConfig::default())
    }
}
