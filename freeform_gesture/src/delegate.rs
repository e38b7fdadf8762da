// Copyright 2025 the Freeform Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use freeform_transform::TransformSnapshot;
use kurbo::{Point, Size};

use crate::adapters::PointerPhase;

/// Receives gesture notifications from a [`crate::TouchSurface`].
///
/// Every method has a no-op default. Callbacks run after the transform has
/// been updated, so snapshots taken inside them are current.
pub trait TouchDelegate {
    /// A manipulation started.
    fn on_gesture_start(&mut self) {}

    /// A manipulation step was committed.
    fn on_gesture_change(&mut self, snapshot: &TransformSnapshot) {
        let _ = snapshot;
    }

    /// A manipulation ended.
    fn on_gesture_end(&mut self, snapshot: &TransformSnapshot) {
        let _ = snapshot;
    }

    /// A first finger went down.
    ///
    /// At this point it is not yet known whether the gesture will become a
    /// tap, a drag or a transform.
    fn on_touch_down(&mut self, point: Point) {
        let _ = point;
    }

    /// The single touch moved while dragging.
    fn on_drag_move(&mut self, point: Point) {
        let _ = point;
    }

    /// A drag ended.
    fn on_drag_end(&mut self) {}

    /// A touch lifted without moving past the drag threshold.
    fn on_tap(&mut self, point: Point) {
        let _ = point;
    }

    /// The surface reported a new size.
    fn on_frame_size_changed(&mut self, size: Size) {
        let _ = size;
    }

    /// A hovering pointer moved.
    fn on_hover(&mut self, point: Point, phase: PointerPhase) {
        let _ = (point, phase);
    }

    /// Whether pinch adapters anchor at the hover location.
    fn center_on_hover(&self) -> bool {
        true
    }
}

/// A delegate that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopDelegate;

impl TouchDelegate for NoopDelegate {}
