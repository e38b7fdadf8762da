// Copyright 2025 the Freeform Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag threshold tracking for a single touch.
//!
//! ## Usage
//!
//! 1) Arm the tracker with [`DragTracker::start`] when the touch goes down.
//! 2) Feed every move to [`DragTracker::update`]. It returns `None` while the
//!    touch stays inside the threshold, and the delta since the last update
//!    once the drag has begun.
//! 3) Call [`DragTracker::end`] when the touch lifts.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use freeform_gesture::drag::DragTracker;
//!
//! let mut drag = DragTracker::new(3.0);
//! drag.start(Point::new(10.0, 20.0));
//!
//! // Still a potential tap.
//! assert_eq!(drag.update(Point::new(11.0, 20.0)), None);
//! assert!(!drag.is_dragging());
//!
//! // Past the threshold: the drag begins.
//! assert_eq!(drag.update(Point::new(14.0, 20.0)), Some(Vec2::new(3.0, 0.0)));
//! assert!(drag.is_dragging());
//! ```

use kurbo::{Point, Vec2};

/// Tracks whether a touch has moved far enough to count as a drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragTracker {
    threshold: f64,
    origin: Option<Point>,
    last: Option<Point>,
    dragging: bool,
}

impl DragTracker {
    /// Creates an idle tracker with the given drag threshold.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            origin: None,
            last: None,
            dragging: false,
        }
    }

    /// Distance a touch must travel from its origin before dragging starts.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Changes the threshold. Takes effect on the next update.
    pub fn set_threshold(&mut self, threshold: f64) {
        self.threshold = threshold;
    }

    /// Arms the tracker at `pos`, discarding any previous drag.
    pub fn start(&mut self, pos: Point) {
        self.origin = Some(pos);
        self.last = Some(pos);
        self.dragging = false;
    }

    /// Records a move.
    ///
    /// Returns the delta since the previous update once the touch has
    /// travelled at least the threshold from its origin, `None` before that
    /// or when the tracker is not armed. The distance is measured from the
    /// origin, so slow movement still crosses the threshold.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        let origin = self.origin?;
        let last = self.last.replace(pos).unwrap_or(origin);
        if !self.dragging && (pos - origin).length() >= self.threshold {
            self.dragging = true;
        }
        self.dragging.then(|| pos - last)
    }

    /// Offset from the origin to `pos`, if the tracker is armed.
    #[must_use]
    pub fn total_offset(&self, pos: Point) -> Option<Vec2> {
        self.origin.map(|origin| pos - origin)
    }

    /// Where the tracked touch went down.
    #[must_use]
    pub fn origin(&self) -> Option<Point> {
        self.origin
    }

    /// Returns `true` while a touch is being tracked.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.origin.is_some()
    }

    /// Returns `true` once the threshold has been crossed.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Disarms the tracker.
    pub fn end(&mut self) {
        self.origin = None;
        self.last = None;
        self.dragging = false;
    }
}

impl Default for DragTracker {
    fn default() -> Self {
        Self::new(crate::SurfaceConfig::DEFAULT_MINIMUM_DRAG_DISTANCE)
    }
}
