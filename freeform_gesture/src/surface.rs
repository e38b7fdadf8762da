// Copyright 2025 the Freeform Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use freeform_transform::{TouchTransform, TransformConfig, TransformSnapshot};
use kurbo::{Point, Size};
use smallvec::{SmallVec, smallvec};
use tracing::debug;

use crate::config::SurfaceConfig;
use crate::delegate::{NoopDelegate, TouchDelegate};
use crate::drag::DragTracker;
use crate::touches::{TouchSample, TouchTable};

/// Where a [`TouchSurface`] is in its gesture lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GesturePhase {
    /// No touch is tracked.
    #[default]
    Idle,
    /// One touch is down and has not moved past the drag threshold yet.
    PendingSingle,
    /// One touch moved past the drag threshold.
    Dragging,
    /// A manipulation is in progress.
    Transforming,
    /// One finger of a manipulation lifted and the other is still down.
    ///
    /// A new second touch continues the manipulation from the committed
    /// transform.
    Residual,
}

/// Turns raw touch batches into tap, drag and transform gestures.
///
/// Owns a [`TouchTransform`] and drives its lifecycle:
/// - one touch is a potential tap until it moves past
///   [`SurfaceConfig::minimum_drag_distance`], then a drag;
/// - a second touch before the drag starts promotes the gesture to a
///   two-finger transform;
/// - a second touch during a drag, and any third touch, are ignored.
///
/// Every entry point runs synchronously and notifies the delegate after
/// the transform has been updated.
#[derive(Debug)]
pub struct TouchSurface<D = NoopDelegate> {
    pub(crate) transform: TouchTransform,
    pub(crate) config: SurfaceConfig,
    pub(crate) delegate: D,
    pub(crate) touches: TouchTable,
    previous_points: SmallVec<[Point; 2]>,
    drag: DragTracker,
    phase: GesturePhase,
    moved: bool,
    frame_size: Option<Size>,
    pub(crate) hover_point: Option<Point>,
}

impl TouchSurface<NoopDelegate> {
    /// Creates a surface without a delegate.
    #[must_use]
    pub fn new(transform: TransformConfig, config: SurfaceConfig) -> Self {
        Self::with_delegate(transform, config, NoopDelegate)
    }
}

impl<D: TouchDelegate> TouchSurface<D> {
    /// Creates a surface reporting to `delegate`.
    #[must_use]
    pub fn with_delegate(transform: TransformConfig, config: SurfaceConfig, delegate: D) -> Self {
        Self {
            transform: TouchTransform::new(transform),
            drag: DragTracker::new(config.minimum_drag_distance),
            config,
            delegate,
            touches: TouchTable::new(),
            previous_points: SmallVec::new(),
            phase: GesturePhase::Idle,
            moved: false,
            frame_size: None,
            hover_point: None,
        }
    }

    /// The transform controller.
    #[must_use]
    pub fn transform(&self) -> &TouchTransform {
        &self.transform
    }

    /// Snapshot of the transform read model.
    #[must_use]
    pub fn snapshot(&self) -> TransformSnapshot {
        self.transform.snapshot()
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Touches taking part in the current gesture.
    #[must_use]
    pub fn touches(&self) -> &TouchTable {
        &self.touches
    }

    /// Last hover location, while a pointer hovers.
    #[must_use]
    pub fn hover_point(&self) -> Option<Point> {
        self.hover_point
    }

    /// The delegate.
    #[must_use]
    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    /// The delegate, mutably.
    pub fn delegate_mut(&mut self) -> &mut D {
        &mut self.delegate
    }

    /// Handles touches going down.
    pub fn touches_began(&mut self, samples: &[TouchSample]) {
        let Some(&first) = samples.first() else {
            return;
        };
        if self.config.transform_disabled {
            if !self.config.dragging_disabled && self.touches.is_empty() {
                self.begin_single(first);
            }
            return;
        }
        match self.phase {
            GesturePhase::Idle => {
                match samples[1..].iter().find(|s| s.id != first.id) {
                    Some(&second) => self.start_transform(first, second),
                    None => self.begin_single(first),
                }
            }
            GesturePhase::PendingSingle | GesturePhase::Residual => {
                self.join_second_touch(samples);
            }
            GesturePhase::Transforming if self.touches.len() == 1 => {
                self.join_second_touch(samples);
            }
            GesturePhase::Transforming | GesturePhase::Dragging => {
                debug!(phase = ?self.phase, "extra touch ignored");
            }
        }
    }

    /// Handles tracked touches moving.
    pub fn touches_moved(&mut self, samples: &[TouchSample]) {
        let before = self.touches.first().map(|s| s.point);
        if !self.touches.update(samples) {
            return;
        }
        match self.phase {
            GesturePhase::Transforming => self.move_transform(),
            GesturePhase::PendingSingle | GesturePhase::Residual
                if self.config.dragging_disabled && !self.config.transform_disabled =>
            {
                if let Some(before) = before {
                    self.start_pan(before);
                    self.move_transform();
                }
            }
            GesturePhase::PendingSingle | GesturePhase::Dragging => self.move_single(),
            GesturePhase::Residual | GesturePhase::Idle => {}
        }
    }

    /// Handles touches lifting.
    pub fn touches_ended(&mut self, samples: &[TouchSample]) {
        if !self.touches.intersects(samples) {
            return;
        }
        match self.phase {
            GesturePhase::Dragging => {
                self.touches.clear();
                self.drag.end();
                self.phase = GesturePhase::Idle;
                self.transform.end_single_touch();
                debug!("drag ended");
                self.delegate.on_drag_end();
            }
            GesturePhase::PendingSingle => {
                let lifted = samples.iter().find(|s| self.touches.contains(s.id)).copied();
                self.touches.clear();
                self.drag.end();
                self.phase = GesturePhase::Idle;
                self.transform.end_single_touch();
                if let Some(lifted) = lifted.filter(|_| !self.moved) {
                    debug!(x = lifted.point.x, y = lifted.point.y, "tap");
                    self.delegate.on_tap(lifted.point);
                }
            }
            GesturePhase::Transforming => {
                for sample in samples {
                    self.touches.remove(sample.id);
                }
                match self.touches.first().map(|s| s.point) {
                    Some(remaining) => {
                        // Re-anchor before committing so the pivot does not jump.
                        self.transform
                            .update_transform(&self.previous_points, &[remaining]);
                        self.previous_points = smallvec![remaining];
                        self.phase = GesturePhase::Residual;
                    }
                    None => self.phase = GesturePhase::Idle,
                }
                self.finish_transform();
            }
            GesturePhase::Residual => {
                self.touches.clear();
                self.phase = GesturePhase::Idle;
            }
            GesturePhase::Idle => {}
        }
        if self.touches.is_empty() && self.transform.is_transforming() {
            self.finish_transform();
        }
    }

    /// Handles touches being cancelled by the host. Same as lifting them.
    pub fn touches_cancelled(&mut self, samples: &[TouchSample]) {
        self.touches_ended(samples);
    }

    /// Toggles one-finger panning.
    ///
    /// Re-enabling dragging while a manipulation is in progress folds it
    /// back into a single-touch session on the first tracked touch, without
    /// changing the committed transform.
    pub fn set_dragging_disabled(&mut self, disabled: bool) {
        let was_disabled = self.config.dragging_disabled;
        self.config.dragging_disabled = disabled;
        if was_disabled && !disabled && self.phase == GesturePhase::Transforming {
            self.fold_back();
        }
    }

    /// Toggles two-finger transforms. Affects gestures that start afterwards.
    pub fn set_transform_disabled(&mut self, disabled: bool) {
        self.config.transform_disabled = disabled;
    }

    /// Records the surface size.
    ///
    /// The matrix is not recomputed until [`TouchSurface::flush_frame`].
    /// Returns `true` and notifies the delegate if the size changed.
    pub fn set_frame_size(&mut self, size: Size) -> bool {
        if self.frame_size == Some(size) {
            return false;
        }
        self.frame_size = Some(size);
        self.transform.set_frame_size(size);
        self.delegate.on_frame_size_changed(size);
        true
    }

    /// Applies a pending resize. Call once per frame outside of layout.
    pub fn flush_frame(&mut self) -> bool {
        self.transform.apply_pending_resize()
    }

    /// Returns the transform to identity.
    pub fn reset(&mut self) {
        self.transform.reset();
    }

    /// Sets an absolute scale anchored at the surface center.
    ///
    /// Ignored while a manipulation is in progress.
    pub fn set_scale(&mut self, scale: f64) {
        self.transform.set_scale(scale);
    }

    fn begin_single(&mut self, sample: TouchSample) {
        self.touches.clear();
        self.touches.push(sample);
        self.moved = false;
        self.drag.set_threshold(self.config.minimum_drag_distance);
        self.drag.start(sample.point);
        self.transform.start_single_touch(sample.point);
        self.phase = GesturePhase::PendingSingle;
        self.delegate.on_touch_down(sample.point);
    }

    fn start_transform(&mut self, a: TouchSample, b: TouchSample) {
        self.touches.clear();
        self.touches.push(a);
        self.touches.push(b);
        self.moved = true;
        self.transform.init_transform();
        self.transform.update_center_point(a.point, b.point);
        self.previous_points = smallvec![a.point, b.point];
        self.phase = GesturePhase::Transforming;
        debug!("transform started");
        self.delegate.on_gesture_start();
    }

    /// Adds a second finger to a single tracked touch.
    fn join_second_touch(&mut self, samples: &[TouchSample]) {
        let Some(&sample) = samples.iter().find(|s| !self.touches.contains(s.id)) else {
            return;
        };
        if !self.touches.push(sample) {
            return;
        }
        self.moved = true;
        self.drag.end();
        self.transform.end_single_touch();
        let was_active = self.transform.gesture_state().is_active();
        if was_active {
            // Commit the one-finger pan so the two-finger step starts from it.
            self.transform.end_transform();
        }
        self.transform.init_transform();
        let points = self.touches.points();
        if let [a, b] = points.as_slice() {
            self.transform.update_center_point(*a, *b);
        }
        self.previous_points = points;
        self.phase = GesturePhase::Transforming;
        debug!("transform continued");
        if !was_active {
            self.delegate.on_gesture_start();
        }
    }

    /// Starts a one-finger pan from where the touch was before this move.
    fn start_pan(&mut self, from: Point) {
        self.moved = true;
        self.drag.end();
        self.transform.init_transform();
        self.transform.update_center_point_at(from);
        self.previous_points = smallvec![from, from];
        self.phase = GesturePhase::Transforming;
        debug!("pan started");
        self.delegate.on_gesture_start();
    }

    fn move_transform(&mut self) {
        let current: SmallVec<[Point; 2]> = match self.touches.points().as_slice() {
            [] => return,
            [p] => smallvec![*p, *p],
            points => points.iter().copied().collect(),
        };
        self.transform
            .update_transform(&self.previous_points, &current);
        self.previous_points = current;
        let snapshot = self.transform.snapshot();
        self.delegate.on_gesture_change(&snapshot);
    }

    fn move_single(&mut self) {
        let Some(point) = self.touches.first().map(|s| s.point) else {
            return;
        };
        if self.drag.update(point).is_none() {
            return;
        }
        if self.phase != GesturePhase::Dragging {
            self.phase = GesturePhase::Dragging;
            debug!(x = point.x, y = point.y, "drag started");
        }
        self.transform.move_single_touch(point);
        self.delegate.on_drag_move(point);
    }

    fn fold_back(&mut self) {
        let Some(&first) = self.touches.first() else {
            return;
        };
        self.finish_transform();
        self.touches.retain_first();
        self.previous_points.clear();
        self.transform.start_single_touch(first.point);
        self.drag.set_threshold(self.config.minimum_drag_distance);
        self.drag.start(first.point);
        // The finger already manipulated the surface; lifting it is no tap.
        self.moved = true;
        self.phase = GesturePhase::PendingSingle;
        debug!("transform folded back into a single touch");
    }

    pub(crate) fn finish_transform(&mut self) {
        self.transform.end_transform();
        debug!("transform ended");
        let snapshot = self.transform.snapshot();
        self.delegate.on_gesture_end(&snapshot);
    }
}
