// Copyright 2025 the Freeform Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Freeform Gesture: a touch state machine driving a freeform transform.
//!
//! [`TouchSurface`] consumes batches of touch samples (stable id plus
//! surface-local point) and disambiguates them into:
//! - a **tap**: one finger down and up without travelling past the drag
//!   threshold;
//! - a **drag**: one finger moving past the threshold, reported point by
//!   point and never turned into a transform;
//! - a **transform**: two fingers pinching, rotating and panning the
//!   [`freeform_transform::TouchTransform`] it owns.
//!
//! Only the first two tracked fingers participate; a third is ignored. When
//! one of two fingers lifts, the remaining finger stays tracked and a new
//! second finger continues the manipulation from where it was committed.
//!
//! Trackpad pinch and scroll, and hover locations, are fed through the same
//! lifecycle by the methods in [`adapters`].
//!
//! Hosts observe gestures through a [`TouchDelegate`] and read the current
//! transform through [`TouchSurface::snapshot`].
//!
//! ## Minimal example
//!
//! ```rust
//! use freeform_gesture::{SurfaceConfig, TouchSample, TouchSurface};
//! use freeform_transform::TransformConfig;
//! use kurbo::Size;
//!
//! let mut surface = TouchSurface::new(TransformConfig::default(), SurfaceConfig::default());
//! surface.set_frame_size(Size::new(300.0, 200.0));
//! surface.flush_frame();
//!
//! surface.touches_began(&[
//!     TouchSample::new(1, (100.0, 100.0)),
//!     TouchSample::new(2, (200.0, 100.0)),
//! ]);
//! surface.touches_moved(&[
//!     TouchSample::new(1, (50.0, 100.0)),
//!     TouchSample::new(2, (250.0, 100.0)),
//! ]);
//! surface.touches_ended(&[
//!     TouchSample::new(1, (50.0, 100.0)),
//!     TouchSample::new(2, (250.0, 100.0)),
//! ]);
//!
//! assert!((surface.snapshot().scale - 2.0).abs() < 1e-9);
//! ```
//!
//! Everything runs synchronously on the caller's thread. The only deferred
//! step is a frame resize, applied by [`TouchSurface::flush_frame`].
//!
//! This crate is `no_std`.

#![no_std]

pub mod adapters;
mod config;
mod delegate;
pub mod drag;
mod surface;
mod touches;

pub use adapters::PointerPhase;
pub use config::SurfaceConfig;
pub use delegate::{NoopDelegate, TouchDelegate};
pub use surface::{GesturePhase, TouchSurface};
pub use touches::{TouchId, TouchSample, TouchTable};
