use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_abs_diff_eq;
use chrono::{TimeZone, Utc};
use forecast_sketch::capture::{
    CaptureConfig, CaptureEngine, CaptureOutcome, CaptureState, ResizePolicy,
};
use forecast_sketch::core::{AnchorPoint, AxisBounds, PointerPosition, StaticViewport, Viewport};
use forecast_sketch::render::NullRenderer;
use forecast_sketch::submission::{Submission, SubmissionMetadata, Timeframe};

const T0: i64 = 1_700_000_000_000;

fn scenario_source() -> StaticViewport {
    StaticViewport::new(
        AnchorPoint::new(500.0, 300.0, 50_000.0),
        AxisBounds::new(49_000.0, 51_000.0),
    )
}

fn build_engine(config: CaptureConfig) -> CaptureEngine<StaticViewport, NullRenderer> {
    CaptureEngine::new(
        NullRenderer::default(),
        scenario_source(),
        Viewport::new(800, 600),
        config,
    )
    .expect("engine init")
}

fn metadata() -> SubmissionMetadata {
    SubmissionMetadata::new(
        "BTCUSDT",
        Timeframe::FourHours,
        Utc.timestamp_millis_opt(T0 + 5_000).single().expect("valid time"),
    )
}

#[test]
fn accepted_gesture_maps_price_and_kinematics() {
    let mut engine = build_engine(CaptureConfig::default());

    assert_eq!(engine.begin_capture(T0), CaptureOutcome::Started);
    assert_eq!(engine.state(), CaptureState::Capturing);
    assert_eq!(
        engine.record_sample(PointerPosition::new(650.0, 150.0), T0 + 100),
        CaptureOutcome::Sampled
    );
    assert_eq!(engine.end_capture(), CaptureOutcome::Completed);
    assert_eq!(engine.state(), CaptureState::Completed);

    let path = engine.completed_path().expect("completed path");
    assert_eq!(path.len(), 2);

    let anchor = path.samples()[0];
    assert_eq!((anchor.t, anchor.x, anchor.y, anchor.price), (T0, 500.0, 300.0, 50_000.0));
    assert_eq!((anchor.v, anchor.a), (0.0, 0.0));

    let second = path.samples()[1];
    assert_eq!(second.t, T0 + 100);
    assert_abs_diff_eq!(second.price, 50_500.0, epsilon = 1e-9);
    let expected_v = 150.0_f64.hypot(150.0) / 100.0;
    assert_abs_diff_eq!(second.v, expected_v, epsilon = 1e-12);
    assert_abs_diff_eq!(second.a, expected_v / 100.0, epsilon = 1e-12);
}

#[test]
fn short_gesture_is_discarded_silently() {
    let mut engine = build_engine(CaptureConfig::default());

    engine.begin_capture(T0);
    engine.record_sample(PointerPosition::new(520.0, 290.0), T0 + 16);
    assert_eq!(engine.end_capture(), CaptureOutcome::Discarded);

    assert_eq!(engine.state(), CaptureState::Idle);
    assert_eq!(engine.sample_count(), 0);
    assert!(engine.completed_path().is_none());
    assert!(engine.stroke_buffer().is_empty());
}

#[test]
fn press_and_release_without_movement_is_discarded() {
    let mut engine = build_engine(CaptureConfig::default());

    engine.begin_capture(T0);
    assert_eq!(engine.end_capture(), CaptureOutcome::Discarded);
    assert_eq!(engine.state(), CaptureState::Idle);
}

#[test]
fn extent_exactly_at_threshold_is_rejected() {
    let mut engine = build_engine(CaptureConfig::default());

    engine.begin_capture(T0);
    engine.record_sample(PointerPosition::new(600.0, 300.0), T0 + 50);
    assert_eq!(engine.end_capture(), CaptureOutcome::Discarded);

    engine.begin_capture(T0 + 1_000);
    engine.record_sample(PointerPosition::new(600.5, 300.0), T0 + 1_050);
    assert_eq!(engine.end_capture(), CaptureOutcome::Completed);
}

#[test]
fn backward_and_vertical_moves_are_dropped() {
    let mut engine = build_engine(CaptureConfig::default());

    engine.begin_capture(T0);
    engine.record_sample(PointerPosition::new(560.0, 280.0), T0 + 10);
    assert_eq!(engine.sample_count(), 2);

    assert_eq!(
        engine.record_sample(PointerPosition::new(540.0, 260.0), T0 + 20),
        CaptureOutcome::Dropped
    );
    assert_eq!(
        engine.record_sample(PointerPosition::new(560.0, 100.0), T0 + 30),
        CaptureOutcome::Dropped
    );
    assert_eq!(engine.sample_count(), 2);

    assert_eq!(
        engine.record_sample(PointerPosition::new(561.0, 100.0), T0 + 40),
        CaptureOutcome::Sampled
    );
    assert_eq!(engine.sample_count(), 3);
}

#[test]
fn move_left_of_anchor_is_dropped() {
    let mut engine = build_engine(CaptureConfig::default());

    engine.begin_capture(T0);
    assert_eq!(
        engine.record_sample(PointerPosition::new(400.0, 300.0), T0 + 10),
        CaptureOutcome::Dropped
    );
    assert_eq!(engine.sample_count(), 1);
}

#[test]
fn moves_off_the_surface_are_dropped() {
    let mut engine = build_engine(CaptureConfig::default());

    engine.begin_capture(T0);
    for (x, y) in [(5_000.0, -6_000.0), (650.0, -1.0), (650.0, 601.0), (801.0, 300.0)] {
        assert_eq!(
            engine.record_sample(PointerPosition::new(x, y), T0 + 10),
            CaptureOutcome::Dropped
        );
    }
    assert_eq!(engine.sample_count(), 1);

    engine.record_sample(PointerPosition::new(800.0, 0.0), T0 + 20);
    assert_eq!(engine.end_capture(), CaptureOutcome::Completed);
    let path = engine.completed_path().expect("completed path");
    for sample in path.samples() {
        assert!((49_000.0..=51_000.0).contains(&sample.price));
    }
    assert_abs_diff_eq!(path.samples()[1].price, 51_000.0, epsilon = 1e-9);
}

#[test]
fn begin_while_completed_keeps_pending_path() {
    let mut engine = build_engine(CaptureConfig::default());

    engine.begin_capture(T0);
    engine.record_sample(PointerPosition::new(650.0, 150.0), T0 + 100);
    engine.end_capture();
    let before = engine.completed_path().cloned().expect("completed path");

    engine
        .source_mut()
        .set_anchor(Some(AnchorPoint::new(300.0, 100.0, 50_900.0)));
    assert_eq!(engine.begin_capture(T0 + 5_000), CaptureOutcome::Ignored);

    assert_eq!(engine.state(), CaptureState::Completed);
    assert_eq!(engine.completed_path(), Some(&before));
}

#[test]
fn begin_while_capturing_does_not_restart_gesture() {
    let mut engine = build_engine(CaptureConfig::default());

    engine.begin_capture(T0);
    engine.record_sample(PointerPosition::new(560.0, 280.0), T0 + 10);
    assert_eq!(engine.begin_capture(T0 + 20), CaptureOutcome::Ignored);
    assert_eq!(engine.sample_count(), 2);
}

#[test]
fn missing_or_malformed_host_view_keeps_engine_idle() {
    let mut engine = build_engine(CaptureConfig::default());

    engine.source_mut().set_anchor(None);
    assert_eq!(engine.begin_capture(T0), CaptureOutcome::Ignored);

    engine
        .source_mut()
        .set_anchor(Some(AnchorPoint::new(f64::NAN, 300.0, 50_000.0)));
    assert_eq!(engine.begin_capture(T0), CaptureOutcome::Ignored);

    engine
        .source_mut()
        .set_anchor(Some(AnchorPoint::new(900.0, 300.0, 50_000.0)));
    assert_eq!(engine.begin_capture(T0), CaptureOutcome::Ignored);

    engine
        .source_mut()
        .set_anchor(Some(AnchorPoint::new(500.0, 300.0, 50_000.0)));
    engine
        .source_mut()
        .set_axis_bounds(Some(AxisBounds::new(51_000.0, 49_000.0)));
    assert_eq!(engine.begin_capture(T0), CaptureOutcome::Ignored);

    engine.source_mut().set_axis_bounds(None);
    assert_eq!(engine.begin_capture(T0), CaptureOutcome::Ignored);

    assert_eq!(engine.state(), CaptureState::Idle);
    assert_eq!(engine.sample_count(), 0);
}

#[test]
fn samples_use_bounds_valid_at_capture_time() {
    let mut engine = build_engine(CaptureConfig::default());

    engine.begin_capture(T0);
    engine.record_sample(PointerPosition::new(550.0, 300.0), T0 + 10);

    engine
        .source_mut()
        .set_axis_bounds(Some(AxisBounds::new(48_000.0, 52_000.0)));
    engine.record_sample(PointerPosition::new(600.0, 300.0), T0 + 20);

    assert_eq!(engine.sample_count(), 3);

    engine.record_sample(PointerPosition::new(700.0, 0.0), T0 + 30);
    engine.end_capture();
    let path = engine.completed_path().expect("completed");
    assert_abs_diff_eq!(path.samples()[1].price, 50_000.0, epsilon = 1e-9);
    assert_abs_diff_eq!(path.samples()[2].price, 50_000.0, epsilon = 1e-9);
    assert_abs_diff_eq!(path.samples()[3].price, 52_000.0, epsilon = 1e-9);
}

#[test]
fn seed_anchor_is_frozen_for_the_gesture() {
    let mut engine = build_engine(CaptureConfig::default());

    engine.begin_capture(T0);
    engine
        .source_mut()
        .set_anchor(Some(AnchorPoint::new(100.0, 50.0, 50_800.0)));
    engine.record_sample(PointerPosition::new(580.0, 300.0), T0 + 10);
    engine.end_capture();

    // Extent is still measured from the seeding anchor at x=500.
    assert_eq!(engine.state(), CaptureState::Idle);

    engine
        .source_mut()
        .set_anchor(Some(AnchorPoint::new(500.0, 300.0, 50_000.0)));
    engine.begin_capture(T0 + 100);
    engine
        .source_mut()
        .set_anchor(Some(AnchorPoint::new(700.0, 50.0, 50_800.0)));
    engine.record_sample(PointerPosition::new(650.0, 300.0), T0 + 110);
    assert_eq!(engine.end_capture(), CaptureOutcome::Completed);
    assert_eq!(
        engine.seed_anchor(),
        Some(AnchorPoint::new(500.0, 300.0, 50_000.0))
    );
}

#[test]
fn reset_is_idempotent_from_every_state() {
    let mut engine = build_engine(CaptureConfig::default());

    engine.reset();
    engine.reset();
    assert_eq!(engine.state(), CaptureState::Idle);

    engine.begin_capture(T0);
    engine.record_sample(PointerPosition::new(560.0, 280.0), T0 + 10);
    engine.reset();
    assert_eq!(engine.state(), CaptureState::Idle);
    assert_eq!(engine.sample_count(), 0);
    assert!(engine.stroke_buffer().is_empty());

    engine.begin_capture(T0 + 100);
    engine.record_sample(PointerPosition::new(700.0, 280.0), T0 + 200);
    engine.end_capture();
    engine.reset();
    engine.reset();
    assert_eq!(engine.state(), CaptureState::Idle);
    assert_eq!(engine.sample_count(), 0);
    assert!(engine.stroke_buffer().is_empty());
    assert!(engine.completed_path().is_none());
}

#[test]
fn resize_mid_gesture_resets_by_default() {
    let mut engine = build_engine(CaptureConfig::default());

    engine.begin_capture(T0);
    engine.record_sample(PointerPosition::new(560.0, 280.0), T0 + 10);
    engine.resize(1024, 768).expect("resize");

    assert_eq!(engine.viewport(), Viewport::new(1024, 768));
    assert_eq!(engine.state(), CaptureState::Idle);
    assert_eq!(engine.sample_count(), 0);
    assert!(engine.stroke_buffer().is_empty());
}

#[test]
fn resize_with_clear_rendering_only_keeps_path() {
    let config = CaptureConfig::default().with_resize_policy(ResizePolicy::ClearRenderingOnly);
    let mut engine = build_engine(config);

    engine.begin_capture(T0);
    engine.record_sample(PointerPosition::new(560.0, 280.0), T0 + 10);
    engine.resize(1024, 768).expect("resize");

    assert_eq!(engine.state(), CaptureState::Capturing);
    assert_eq!(engine.sample_count(), 2);
    assert!(engine.stroke_buffer().is_empty());

    engine.record_sample(PointerPosition::new(700.0, 280.0), T0 + 20);
    assert_eq!(engine.end_capture(), CaptureOutcome::Completed);
}

#[test]
fn zero_sized_resize_is_rejected() {
    let mut engine = build_engine(CaptureConfig::default());
    assert!(engine.resize(0, 600).is_err());
    assert_eq!(engine.viewport(), Viewport::new(800, 600));
}

#[test]
fn path_ready_listener_receives_finalized_path_once() {
    let mut engine = build_engine(CaptureConfig::default());
    let seen: Rc<RefCell<Vec<usize>>> = Rc::default();
    let sink = Rc::clone(&seen);
    engine.set_path_ready_listener(Box::new(move |path| sink.borrow_mut().push(path.len())));

    engine.begin_capture(T0);
    engine.record_sample(PointerPosition::new(520.0, 280.0), T0 + 10);
    engine.end_capture();
    assert!(seen.borrow().is_empty());

    engine.begin_capture(T0 + 100);
    engine.record_sample(PointerPosition::new(560.0, 280.0), T0 + 110);
    engine.record_sample(PointerPosition::new(640.0, 260.0), T0 + 120);
    engine.end_capture();
    assert_eq!(*seen.borrow(), vec![3]);
}

#[test]
fn submit_requires_completed_state_and_happens_once() {
    let mut engine = build_engine(CaptureConfig::default());
    let mut sink: Vec<Submission> = Vec::new();

    assert!(!engine.submit(&mut sink, metadata()).expect("submit idle"));

    engine.begin_capture(T0);
    engine.record_sample(PointerPosition::new(650.0, 150.0), T0 + 100);
    assert!(!engine.submit(&mut sink, metadata()).expect("submit capturing"));

    engine.end_capture();
    assert!(engine.submit(&mut sink, metadata()).expect("submit completed"));
    assert!(engine.is_submitted());
    assert_eq!(engine.state(), CaptureState::Completed);
    assert!(!engine.submit(&mut sink, metadata()).expect("second submit"));

    assert_eq!(sink.len(), 1);
    assert_eq!(sink[0].metadata.symbol, "BTCUSDT");
    assert_eq!(sink[0].path.len(), 2);

    engine.reset();
    assert!(!engine.is_submitted());
}
