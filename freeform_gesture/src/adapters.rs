// Copyright 2025 the Freeform Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Continuous-pointer adapters: trackpad pinch, two-finger scroll, hover.
//!
//! These feed the same transform lifecycle as touches, but from a single
//! pre-digested delta per update. Pinch and scroll are ignored while any
//! touch is tracked, so a touchscreen gesture always wins.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `powf`
use kurbo::{Point, Vec2};
use tracing::debug;

use crate::delegate::TouchDelegate;
use crate::surface::TouchSurface;

/// Lifecycle phase of a continuous pointer gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerPhase {
    /// The gesture started.
    Began,
    /// The gesture produced a new value.
    Changed,
    /// The gesture finished normally.
    Ended,
    /// The host cancelled the gesture.
    Cancelled,
}

impl PointerPhase {
    /// Returns `true` for [`PointerPhase::Began`] and [`PointerPhase::Changed`].
    #[must_use]
    pub fn is_live(self) -> bool {
        matches!(self, Self::Began | Self::Changed)
    }
}

impl<D: TouchDelegate> TouchSurface<D> {
    /// Handles a trackpad pinch.
    ///
    /// `ratio` is the scale change since the previous `Changed` update. It
    /// is damped by [`crate::SurfaceConfig::pinch_exponent`] and anchored at
    /// the hover location when the delegate asks for it.
    pub fn pinch(&mut self, phase: PointerPhase, ratio: f64) {
        if !self.touches.is_empty() {
            return;
        }
        match phase {
            PointerPhase::Began => self.begin_pointer_transform("pinch"),
            PointerPhase::Changed => {
                if !self.transform.gesture_state().is_active() {
                    return;
                }
                if let Some(hover) = self.hover_point.filter(|_| self.delegate.center_on_hover()) {
                    self.transform.update_center_point_at(hover);
                }
                let scale = ratio.powf(self.config.pinch_exponent);
                self.transform.clamp_and_snap(scale, 0.0, Vec2::ZERO);
                let snapshot = self.transform.snapshot();
                self.delegate.on_gesture_change(&snapshot);
            }
            PointerPhase::Ended | PointerPhase::Cancelled => self.end_pointer_transform(),
        }
    }

    /// Handles a two-finger trackpad scroll as a pan.
    ///
    /// `delta` is the translation since the previous `Changed` update.
    pub fn scroll(&mut self, phase: PointerPhase, delta: Vec2) {
        if !self.touches.is_empty() {
            return;
        }
        match phase {
            PointerPhase::Began => self.begin_pointer_transform("scroll"),
            PointerPhase::Changed => {
                if !self.transform.gesture_state().is_active() {
                    return;
                }
                self.transform.clamp_and_snap(1.0, 0.0, delta);
                let snapshot = self.transform.snapshot();
                self.delegate.on_gesture_change(&snapshot);
            }
            PointerPhase::Ended | PointerPhase::Cancelled => self.end_pointer_transform(),
        }
    }

    /// Records a hovering pointer and forwards it to the delegate.
    pub fn hover(&mut self, point: Point, phase: PointerPhase) {
        self.hover_point = phase.is_live().then_some(point);
        self.delegate.on_hover(point, phase);
    }

    fn begin_pointer_transform(&mut self, source: &'static str) {
        let was_active = self.transform.gesture_state().is_active();
        self.transform.init_transform();
        if !was_active {
            debug!(source, "transform started");
            self.delegate.on_gesture_start();
        }
    }

    fn end_pointer_transform(&mut self) {
        if self.transform.gesture_state().is_active() {
            self.finish_transform();
        }
    }
}
