// Copyright 2025 the Freeform Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scalar and vector helpers shared by the transform model.
//!
//! Every helper that can alter a value also reports whether it did, so that
//! callers can surface "out of bounds" and "snapped" flags without repeating
//! the comparison.

use core::f64::consts::{PI, TAU};
use core::ops::RangeInclusive;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `round` and `sin_cos`
use kurbo::{Affine, Vec2};

/// Clamps `value` into `range`, returning the clamped value and whether it changed.
///
/// Unlike [`f64::clamp`] this never panics: an inverted range simply produces
/// whichever bound wins the `max`/`min` comparison.
#[must_use]
pub fn clamp_to_range(value: f64, range: &RangeInclusive<f64>) -> (f64, bool) {
    let clamped = value.max(*range.start()).min(*range.end());
    (clamped, clamped != value)
}

/// Pulls `value` exactly onto `target` when it lies strictly closer than `distance`.
///
/// Returns the (possibly) snapped value and whether snapping occurred. A
/// `distance` of `0` never snaps.
#[must_use]
pub fn snap_to(value: f64, target: f64, distance: f64) -> (f64, bool) {
    if (value - target).abs() < distance {
        (target, true)
    } else {
        (value, false)
    }
}

/// Pulls `value` onto the nearest multiple of `period` when closer than `distance`.
///
/// Non-positive or NaN periods never snap.
#[must_use]
pub fn snap_to_period(value: f64, period: f64, distance: f64) -> (f64, bool) {
    if !(period > 0.0) {
        return (value, false);
    }
    let nearest = (value / period).round() * period;
    if (value - nearest).abs() < distance {
        (nearest, true)
    } else {
        (value, false)
    }
}

/// Wraps an angle into `(-π, π]` by adding or subtracting a single turn.
///
/// Angles more than one turn outside the interval are only moved once.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    if angle > PI {
        angle - TAU
    } else if angle <= -PI {
        angle + TAU
    } else {
        angle
    }
}

/// Rotates `v` about `center` using the transform's internal rotation sign.
///
/// An internal rotation of `angle` is a standard (counter-clockwise in a
/// y-up frame) rotation by `-angle`.
#[must_use]
pub fn rotate_about(v: Vec2, center: Vec2, angle: f64) -> Vec2 {
    let (s, c) = (-angle).sin_cos();
    let d = v - center;
    Vec2::new(d.x * c - d.y * s, d.x * s + d.y * c) + center
}

/// Expands an affine transform into a row-major 3×3 matrix.
///
/// The result maps column vectors `[x, y, 1]`, so translation lives in the
/// last column.
#[must_use]
pub fn row_major(affine: Affine) -> [[f64; 3]; 3] {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    [[a, c, e], [b, d, f], [0.0, 0.0, 1.0]]
}
