// Copyright 2025 the Freeform Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for `TouchSurface`.
//!
//! A recording delegate captures every callback so each scenario can check
//! both the committed transform and the exact notification sequence.

use freeform_gesture::{
    GesturePhase, PointerPhase, SurfaceConfig, TouchDelegate, TouchSample, TouchSurface,
};
use freeform_transform::{TransformConfig, TransformSnapshot};
use kurbo::{Point, Size, Vec2};

const EPS: f64 = 1e-9;

#[derive(Clone, Debug, PartialEq)]
enum Event {
    GestureStart,
    GestureChange,
    GestureEnd,
    TouchDown(Point),
    DragMove(Point),
    DragEnd,
    Tap(Point),
    FrameSize(Size),
    Hover(Point, PointerPhase),
}

#[derive(Debug, Default)]
struct Recorder {
    events: Vec<Event>,
    last_snapshot: Option<TransformSnapshot>,
    ignore_hover: bool,
}

impl Recorder {
    fn count(&self, event: &Event) -> usize {
        self.events.iter().filter(|e| *e == event).count()
    }

    fn has_tap(&self) -> bool {
        self.events.iter().any(|e| matches!(e, Event::Tap(_)))
    }

    fn drag_moves(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::DragMove(_)))
            .count()
    }
}

impl TouchDelegate for Recorder {
    fn on_gesture_start(&mut self) {
        self.events.push(Event::GestureStart);
    }

    fn on_gesture_change(&mut self, snapshot: &TransformSnapshot) {
        self.last_snapshot = Some(*snapshot);
        self.events.push(Event::GestureChange);
    }

    fn on_gesture_end(&mut self, snapshot: &TransformSnapshot) {
        self.last_snapshot = Some(*snapshot);
        self.events.push(Event::GestureEnd);
    }

    fn on_touch_down(&mut self, point: Point) {
        self.events.push(Event::TouchDown(point));
    }

    fn on_drag_move(&mut self, point: Point) {
        self.events.push(Event::DragMove(point));
    }

    fn on_drag_end(&mut self) {
        self.events.push(Event::DragEnd);
    }

    fn on_tap(&mut self, point: Point) {
        self.events.push(Event::Tap(point));
    }

    fn on_frame_size_changed(&mut self, size: Size) {
        self.events.push(Event::FrameSize(size));
    }

    fn on_hover(&mut self, point: Point, phase: PointerPhase) {
        self.events.push(Event::Hover(point, phase));
    }

    fn center_on_hover(&self) -> bool {
        !self.ignore_hover
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("freeform_gesture=debug,freeform_transform=trace")
        .with_test_writer()
        .try_init();
}

fn touch(id: u64, x: f64, y: f64) -> TouchSample {
    TouchSample::new(id, (x, y))
}

fn surface_with(transform: TransformConfig, config: SurfaceConfig) -> TouchSurface<Recorder> {
    let mut surface = TouchSurface::with_delegate(transform, config, Recorder::default());
    surface.set_frame_size(Size::new(300.0, 200.0));
    surface.flush_frame();
    surface.delegate_mut().events.clear();
    surface
}

fn surface() -> TouchSurface<Recorder> {
    surface_with(TransformConfig::default(), SurfaceConfig::default())
}

#[test]
fn tap_without_movement() {
    let mut s = surface();
    s.touches_began(&[touch(1, 10.0, 10.0)]);
    assert_eq!(s.phase(), GesturePhase::PendingSingle);
    assert!(s.snapshot().is_touching);

    // Jitter inside the threshold is not a drag.
    s.touches_moved(&[touch(1, 11.0, 11.0)]);
    s.touches_ended(&[touch(1, 11.0, 11.0)]);

    let events = &s.delegate().events;
    assert_eq!(
        events,
        &[
            Event::TouchDown(Point::new(10.0, 10.0)),
            Event::Tap(Point::new(11.0, 11.0)),
        ]
    );
    assert_eq!(s.phase(), GesturePhase::Idle);
    let snap = s.snapshot();
    assert!(!snap.is_dragging);
    assert!(!snap.is_touching);
}

#[test]
fn drag_past_threshold_never_taps() {
    let mut s = surface();
    let before = *s.transform().resulting();
    s.touches_began(&[touch(1, 10.0, 10.0)]);
    s.touches_moved(&[touch(1, 14.0, 10.0)]);
    assert_eq!(s.phase(), GesturePhase::Dragging);
    assert!(s.snapshot().is_dragging);
    s.touches_moved(&[touch(1, 20.0, 15.0)]);

    let snap = s.snapshot();
    assert_eq!(snap.first_touch, Point::new(10.0, 10.0));
    assert_eq!(snap.current_touch, Point::new(20.0, 15.0));
    assert_eq!(snap.offset, Vec2::new(10.0, 5.0));

    s.touches_ended(&[touch(1, 20.0, 15.0)]);
    let rec = s.delegate();
    assert_eq!(rec.drag_moves(), 2);
    assert_eq!(rec.count(&Event::DragEnd), 1);
    assert!(!rec.has_tap());
    assert!(!s.snapshot().is_dragging);
    // Dragging is observation only.
    assert_eq!(*s.transform().resulting(), before);
}

#[test]
fn ending_an_untracked_touch_is_ignored() {
    let mut s = surface();
    s.touches_began(&[touch(1, 10.0, 10.0)]);
    s.touches_ended(&[touch(9, 10.0, 10.0)]);
    assert_eq!(s.phase(), GesturePhase::PendingSingle);
    assert!(!s.delegate().has_tap());
}

#[test]
fn cancelling_a_drag_ends_it_without_a_tap() {
    let mut s = surface();
    s.touches_began(&[touch(1, 10.0, 10.0)]);
    s.touches_moved(&[touch(1, 30.0, 10.0)]);
    assert_eq!(s.phase(), GesturePhase::Dragging);

    s.touches_cancelled(&[touch(1, 30.0, 10.0)]);
    assert_eq!(s.phase(), GesturePhase::Idle);
    assert!(s.touches().is_empty());
    assert!(!s.snapshot().is_dragging);
    let rec = s.delegate();
    assert_eq!(rec.count(&Event::DragEnd), 1);
    assert!(!rec.has_tap());
}

#[test]
fn cancelling_both_fingers_commits_the_transform() {
    let mut s = surface();
    s.touches_began(&[touch(1, 100.0, 100.0), touch(2, 200.0, 100.0)]);
    s.touches_moved(&[touch(1, 50.0, 100.0), touch(2, 250.0, 100.0)]);

    s.touches_cancelled(&[touch(1, 50.0, 100.0), touch(2, 250.0, 100.0)]);
    assert_eq!(s.phase(), GesturePhase::Idle);
    assert!(!s.snapshot().is_transforming);
    assert!((s.snapshot().scale - 2.0).abs() < EPS);
    assert_eq!(
        s.delegate().events,
        [Event::GestureStart, Event::GestureChange, Event::GestureEnd]
    );
}

#[test]
fn two_touch_pinch_scenario() {
    init_tracing();
    let config = TransformConfig::default()
        .with_scale_range(0.1..=20.0)
        .with_translation_snap(10.0, 10.0);
    let mut s = surface_with(config, SurfaceConfig::default());

    s.touches_began(&[touch(1, 100.0, 100.0), touch(2, 200.0, 100.0)]);
    assert_eq!(s.phase(), GesturePhase::Transforming);
    s.touches_moved(&[touch(1, 55.0, 103.0), touch(2, 255.0, 103.0)]);

    let snap = s.snapshot();
    assert!((snap.scale - 2.0).abs() < EPS);
    assert_eq!(snap.translation, Vec2::ZERO);
    assert!(snap.translation_x_snapped());
    assert!(snap.translation_y_snapped());

    s.touches_ended(&[touch(1, 55.0, 103.0), touch(2, 255.0, 103.0)]);
    assert_eq!(s.phase(), GesturePhase::Idle);
    assert_eq!(
        s.delegate().events,
        [Event::GestureStart, Event::GestureChange, Event::GestureEnd]
    );
    let end = s.delegate().last_snapshot.expect("gesture end carries a snapshot");
    assert!(!end.is_transforming);
    assert!((end.scale - 2.0).abs() < EPS);
}

#[test]
fn second_finger_promotes_pending_touch() {
    let mut s = surface();
    s.touches_began(&[touch(1, 100.0, 100.0)]);
    s.touches_began(&[touch(2, 200.0, 100.0)]);
    assert_eq!(s.phase(), GesturePhase::Transforming);
    assert!(!s.snapshot().is_dragging);

    s.touches_moved(&[touch(2, 300.0, 100.0)]);
    assert!((s.snapshot().scale - 2.0).abs() < EPS);

    s.touches_ended(&[touch(1, 100.0, 100.0)]);
    s.touches_ended(&[touch(2, 300.0, 100.0)]);
    let rec = s.delegate();
    assert!(!rec.has_tap());
    assert_eq!(rec.count(&Event::GestureStart), 1);
    assert_eq!(rec.count(&Event::GestureEnd), 1);
    assert_eq!(s.phase(), GesturePhase::Idle);
}

#[test]
fn third_touch_is_ignored() {
    let mut s = surface();
    s.touches_began(&[touch(1, 100.0, 100.0), touch(2, 200.0, 100.0)]);
    s.touches_began(&[touch(3, 150.0, 150.0)]);
    assert_eq!(s.touches().len(), 2);

    let before = s.snapshot();
    s.touches_moved(&[touch(3, 0.0, 0.0)]);
    assert_eq!(s.snapshot(), before);

    s.touches_ended(&[touch(3, 0.0, 0.0)]);
    assert_eq!(s.phase(), GesturePhase::Transforming);
}

#[test]
fn simultaneous_triple_touch_tracks_first_two() {
    let mut s = surface();
    s.touches_began(&[
        touch(1, 100.0, 100.0),
        touch(2, 200.0, 100.0),
        touch(3, 150.0, 50.0),
    ]);
    let ids: Vec<u64> = s.touches().samples().iter().map(|t| t.id.0).collect();
    assert_eq!(ids, [1, 2]);
}

#[test]
fn drag_takes_priority_over_second_finger() {
    let mut s = surface();
    s.touches_began(&[touch(1, 10.0, 10.0)]);
    s.touches_moved(&[touch(1, 30.0, 10.0)]);
    assert_eq!(s.phase(), GesturePhase::Dragging);

    s.touches_began(&[touch(2, 100.0, 100.0)]);
    assert_eq!(s.phase(), GesturePhase::Dragging);
    assert_eq!(s.touches().len(), 1);
    assert!(!s.snapshot().is_transforming);
    assert_eq!(s.delegate().count(&Event::GestureStart), 0);
}

#[test]
fn lifting_one_finger_then_adding_another_continues() {
    let config = TransformConfig::default().with_scale_range(0.1..=20.0);
    let mut s = surface_with(config, SurfaceConfig::default());

    s.touches_began(&[touch(1, 100.0, 100.0), touch(2, 200.0, 100.0)]);
    s.touches_moved(&[touch(1, 50.0, 100.0), touch(2, 250.0, 100.0)]);
    let committed = *s.transform().resulting();

    s.touches_ended(&[touch(2, 250.0, 100.0)]);
    assert_eq!(s.phase(), GesturePhase::Residual);
    assert!(!s.snapshot().is_transforming);
    let after_lift = *s.transform().resulting();
    assert_eq!(after_lift.scale, committed.scale);
    assert_eq!(after_lift.translation, committed.translation);
    // The pivot moves to the remaining finger, relative to the center.
    assert_eq!(after_lift.pivot, Point::new(-100.0, 0.0));

    // A lone finger in between changes nothing.
    s.touches_moved(&[touch(1, 60.0, 100.0)]);
    assert_eq!(*s.transform().resulting(), after_lift);

    s.touches_began(&[touch(3, 160.0, 100.0)]);
    assert_eq!(s.phase(), GesturePhase::Transforming);
    s.touches_moved(&[touch(3, 260.0, 100.0)]);
    // 2.0 committed, then the span doubles again.
    assert!((s.snapshot().scale - 4.0).abs() < EPS);

    s.touches_ended(&[touch(1, 60.0, 100.0), touch(3, 260.0, 100.0)]);
    assert_eq!(s.phase(), GesturePhase::Idle);
    let rec = s.delegate();
    assert_eq!(rec.count(&Event::GestureStart), 2);
    assert_eq!(rec.count(&Event::GestureEnd), 2);
}

#[test]
fn residual_finger_lift_returns_to_idle_without_tap() {
    let mut s = surface();
    s.touches_began(&[touch(1, 100.0, 100.0), touch(2, 200.0, 100.0)]);
    s.touches_ended(&[touch(1, 100.0, 100.0)]);
    s.touches_ended(&[touch(2, 200.0, 100.0)]);
    assert_eq!(s.phase(), GesturePhase::Idle);
    assert!(s.touches().is_empty());
    assert!(!s.delegate().has_tap());
    assert_eq!(s.delegate().count(&Event::GestureEnd), 1);
}

#[test]
fn dragging_disabled_pans_with_one_finger() {
    let config = SurfaceConfig::default().with_dragging_disabled(true);
    let mut s = surface_with(TransformConfig::default(), config);

    s.touches_began(&[touch(1, 100.0, 100.0)]);
    s.touches_moved(&[touch(1, 110.0, 120.0)]);
    assert_eq!(s.phase(), GesturePhase::Transforming);
    s.touches_moved(&[touch(1, 115.0, 130.0)]);

    let snap = s.snapshot();
    assert!((snap.translation - Vec2::new(15.0, 30.0)).length() < EPS);
    assert_eq!(snap.scale, 1.0);
    assert_eq!(snap.rotation, 0.0);
    assert!(!snap.is_dragging);

    s.touches_ended(&[touch(1, 115.0, 130.0)]);
    let rec = s.delegate();
    assert_eq!(rec.drag_moves(), 0);
    assert!(!rec.has_tap());
    assert_eq!(rec.count(&Event::GestureStart), 1);
    assert_eq!(rec.count(&Event::GestureEnd), 1);
    assert!(!s.snapshot().is_transforming);
}

#[test]
fn second_finger_joins_a_one_finger_pan() {
    let config = SurfaceConfig::default().with_dragging_disabled(true);
    let mut s = surface_with(TransformConfig::default(), config);

    s.touches_began(&[touch(1, 100.0, 100.0)]);
    s.touches_moved(&[touch(1, 120.0, 100.0)]);
    s.touches_began(&[touch(2, 220.0, 100.0)]);
    assert_eq!(s.touches().len(), 2);
    s.touches_moved(&[touch(2, 320.0, 100.0)]);

    let snap = s.snapshot();
    assert!((snap.scale - 2.0).abs() < EPS);
    // One continuous manipulation from the delegate's point of view.
    assert_eq!(s.delegate().count(&Event::GestureStart), 1);
}

#[test]
fn reenabling_drag_folds_transform_back_without_jump() {
    init_tracing();
    let config = SurfaceConfig::default().with_dragging_disabled(true);
    let mut s = surface_with(TransformConfig::default(), config);

    s.touches_began(&[touch(1, 100.0, 100.0), touch(2, 200.0, 100.0)]);
    s.touches_moved(&[touch(1, 90.0, 110.0), touch(2, 210.0, 110.0)]);
    let matrix = s.snapshot().matrix;

    s.set_dragging_disabled(false);
    assert_eq!(s.phase(), GesturePhase::PendingSingle);
    assert_eq!(s.touches().len(), 1);
    let snap = s.snapshot();
    assert_eq!(snap.matrix, matrix);
    assert!(snap.is_touching);
    assert!(!snap.is_transforming);
    assert_eq!(s.delegate().count(&Event::GestureEnd), 1);

    // The remaining finger now drags.
    s.touches_moved(&[touch(1, 120.0, 110.0)]);
    assert_eq!(s.phase(), GesturePhase::Dragging);
    s.touches_ended(&[touch(1, 120.0, 110.0)]);
    let rec = s.delegate();
    assert_eq!(rec.count(&Event::DragEnd), 1);
    assert!(!rec.has_tap());
    assert_eq!(s.snapshot().matrix, matrix);
}

#[test]
fn fold_back_lift_without_move_is_not_a_tap() {
    let config = SurfaceConfig::default().with_dragging_disabled(true);
    let mut s = surface_with(TransformConfig::default(), config);
    s.touches_began(&[touch(1, 100.0, 100.0), touch(2, 200.0, 100.0)]);
    s.set_dragging_disabled(false);
    s.touches_ended(&[touch(1, 100.0, 100.0)]);
    assert_eq!(s.phase(), GesturePhase::Idle);
    assert!(!s.delegate().has_tap());
}

#[test]
fn transform_disabled_ignores_second_finger() {
    let config = SurfaceConfig::default().with_transform_disabled(true);
    let mut s = surface_with(TransformConfig::default(), config);

    s.touches_began(&[touch(1, 10.0, 10.0), touch(2, 100.0, 10.0)]);
    assert_eq!(s.phase(), GesturePhase::PendingSingle);
    assert_eq!(s.touches().len(), 1);
    s.touches_began(&[touch(3, 50.0, 50.0)]);
    assert_eq!(s.touches().len(), 1);

    s.touches_moved(&[touch(1, 40.0, 10.0)]);
    assert_eq!(s.phase(), GesturePhase::Dragging);
    assert!(!s.snapshot().is_transforming);
}

#[test]
fn everything_disabled_tracks_nothing() {
    let config = SurfaceConfig::default()
        .with_transform_disabled(true)
        .with_dragging_disabled(true);
    let mut s = surface_with(TransformConfig::default(), config);
    s.touches_began(&[touch(1, 10.0, 10.0)]);
    assert!(s.touches().is_empty());
    assert!(s.delegate().events.is_empty());
}

#[test]
fn frame_size_notifies_once_and_applies_on_flush() {
    let mut s = surface();
    assert!(s.set_frame_size(Size::new(400.0, 400.0)));
    assert!(!s.set_frame_size(Size::new(400.0, 400.0)));
    assert_eq!(
        s.delegate().events,
        [Event::FrameSize(Size::new(400.0, 400.0))]
    );

    // Nothing moves until the host flushes.
    assert_eq!(s.snapshot().to_surface(Point::ORIGIN), Point::new(150.0, 100.0));
    assert!(s.flush_frame());
    assert_eq!(s.snapshot().to_surface(Point::ORIGIN), Point::new(200.0, 200.0));
    assert!(!s.flush_frame());
}

#[test]
fn pinch_adapter_is_damped() {
    let mut s = surface();
    s.pinch(PointerPhase::Began, 1.0);
    s.pinch(PointerPhase::Changed, 4.0);
    assert!((s.snapshot().scale - 2.0).abs() < EPS);
    s.pinch(PointerPhase::Ended, 1.0);
    assert!(!s.snapshot().is_transforming);
    assert_eq!(
        s.delegate().events,
        [Event::GestureStart, Event::GestureChange, Event::GestureEnd]
    );
}

#[test]
fn pinch_anchors_at_hover_point() {
    let mut s = surface();
    s.hover(Point::new(250.0, 100.0), PointerPhase::Began);
    s.pinch(PointerPhase::Began, 1.0);
    s.pinch(PointerPhase::Changed, 4.0);
    s.pinch(PointerPhase::Ended, 1.0);

    // The content under the pointer stays under the pointer.
    let snap = s.snapshot();
    let under = snap.to_surface(Point::new(100.0, 0.0));
    assert!((under - Point::new(250.0, 100.0)).length() < EPS);
    assert_eq!(
        s.delegate().events[0],
        Event::Hover(Point::new(250.0, 100.0), PointerPhase::Began)
    );
}

#[test]
fn pinch_ignores_hover_when_delegate_declines() {
    let mut s = surface();
    s.delegate_mut().ignore_hover = true;
    s.hover(Point::new(250.0, 100.0), PointerPhase::Changed);
    s.pinch(PointerPhase::Began, 1.0);
    s.pinch(PointerPhase::Changed, 4.0);
    let snap = s.snapshot();
    assert!((snap.to_surface(Point::ORIGIN) - Point::new(150.0, 100.0)).length() < EPS);
}

#[test]
fn hover_end_clears_hover_point() {
    let mut s = surface();
    s.hover(Point::new(10.0, 10.0), PointerPhase::Changed);
    assert_eq!(s.hover_point(), Some(Point::new(10.0, 10.0)));
    s.hover(Point::new(12.0, 10.0), PointerPhase::Ended);
    assert_eq!(s.hover_point(), None);
}

#[test]
fn scroll_pans_and_is_ignored_during_touches() {
    let mut s = surface();
    s.scroll(PointerPhase::Began, Vec2::ZERO);
    s.scroll(PointerPhase::Changed, Vec2::new(10.0, -5.0));
    s.scroll(PointerPhase::Changed, Vec2::new(2.0, 1.0));
    s.scroll(PointerPhase::Ended, Vec2::ZERO);
    assert!((s.snapshot().translation - Vec2::new(12.0, -4.0)).length() < EPS);

    s.touches_began(&[touch(1, 0.0, 0.0)]);
    let before = s.snapshot();
    s.scroll(PointerPhase::Began, Vec2::ZERO);
    s.scroll(PointerPhase::Changed, Vec2::new(50.0, 50.0));
    s.pinch(PointerPhase::Changed, 9.0);
    assert_eq!(s.snapshot(), before);
}

#[test]
fn adapter_end_without_start_does_not_notify() {
    let mut s = surface();
    s.pinch(PointerPhase::Ended, 1.0);
    s.scroll(PointerPhase::Cancelled, Vec2::ZERO);
    assert!(s.delegate().events.is_empty());
}

#[test]
fn set_scale_and_reset_route_through_clamping() {
    let config = TransformConfig::default().with_scale_range(0.5..=3.0);
    let mut s = surface_with(config, SurfaceConfig::default());
    s.set_scale(10.0);
    assert_eq!(s.snapshot().scale, 3.0);
    s.reset();
    assert_eq!(s.snapshot().scale, 1.0);
    assert_eq!(s.snapshot().to_surface(Point::ORIGIN), Point::new(150.0, 100.0));
}
