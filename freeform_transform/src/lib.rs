// Copyright 2025 the Freeform Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Freeform Transform: a pivot-relative pan/zoom/rotate model for touch surfaces.
//!
//! This crate owns the numeric state behind a freely manipulable surface:
//! - A committed transform (translation, uniform scale, rotation) and the
//!   delta accumulated by the gesture in progress.
//! - Per-component range clamping, with flags reporting when a raw value
//!   fell outside its range.
//! - Snapping of translation to zero, scale to one and rotation to a period.
//! - A cached affine matrix (and inverse) from surface-local coordinates,
//!   anchored at the surface center.
//!
//! It does **not** interpret raw touch events. Callers drive the
//! [`TouchTransform`] lifecycle themselves, or use a higher-level crate such
//! as `freeform_gesture` that turns touch sets into these calls.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use freeform_transform::{TouchTransform, TransformConfig};
//!
//! let config = TransformConfig::default().with_scale_range(0.1..=20.0);
//! let mut transform = TouchTransform::new(config);
//!
//! // Resizes are deferred so they can be recorded during layout.
//! transform.set_frame_size(Size::new(300.0, 200.0));
//! transform.apply_pending_resize();
//!
//! // Two fingers spread apart symmetrically.
//! let before = [Point::new(100.0, 100.0), Point::new(200.0, 100.0)];
//! let after = [Point::new(50.0, 100.0), Point::new(250.0, 100.0)];
//! transform.init_transform();
//! transform.update_center_point(before[0], before[1]);
//! transform.update_transform(&before, &after);
//! transform.end_transform();
//!
//! let snapshot = transform.snapshot();
//! assert!((snapshot.scale - 2.0).abs() < 1e-9);
//!
//! // Find which content point is now under a touch.
//! let content = snapshot.to_content(Point::new(150.0, 100.0));
//! # let _ = content;
//! ```
//!
//! ## Conventions
//!
//! - Translation and pivot are relative to the surface center, which is half
//!   the last applied frame size.
//! - Rotation is stored internally with the opposite sign of the on-screen
//!   angle. [`TransformSnapshot::rotation`] reports the standard angle.
//! - The matrix is `translate(translation + center) · rotate · scale`.
//!
//! Snapping uses strict comparisons: a value exactly at the snap distance
//! does not snap.
//!
//! This crate is `no_std`.

#![no_std]

mod config;
mod controller;
mod delta;
mod snapshot;

pub mod math;

pub use config::{ConfigError, TransformConfig};
pub use controller::TouchTransform;
pub use delta::{GestureState, TransformDelta};
pub use snapshot::{TransformFlags, TransformSnapshot};
