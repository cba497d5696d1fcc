use super::*;
use crate::{test_support::RecordingRenderer, touch::calibration::AxisMap};

fn tap(x: i16, y: i16) -> TapEvent {
    TapEvent {
        t_ms: 0,
        x,
        y,
        pressure: 300,
    }
}

/// Raw panel coordinates equal screen coordinates.
fn identity() -> TouchCalibration {
    TouchCalibration {
        x: AxisMap::fit(0, 240, 0, 240).unwrap(),
        y: AxisMap::fit(0, 320, 0, 320).unwrap(),
        calibrated: true,
    }
}

/// Raw readings at the three targets for a panel reading twice the screen position.
const RAW_HITS: [(i16, i16); TCAL_NUM_TARGETS] = [(40, 100), (440, 460), (240, 280)];

#[test]
fn inactive_until_started() {
    let mut wizard = TouchCalibrationSequencer::new();
    let mut renderer = RecordingRenderer::default();

    assert!(!wizard.is_active());
    assert_eq!(
        wizard.on_tap(&tap(100, 100), &identity(), &mut renderer),
        TouchCalDispatch::Inactive
    );
    assert!(renderer.calls.is_empty());
}

#[test]
fn walks_targets_in_order_and_fits_exactly() {
    let live = identity();
    let mut wizard = TouchCalibrationSequencer::new();
    let mut renderer = RecordingRenderer::default();

    wizard.start(&mut renderer);
    assert_eq!(wizard.state(), TouchCalState::WaitTarget);
    assert_eq!(wizard.current_target(), Some((20, 60)));
    assert!(renderer.texts().contains(&"Cancel"));

    let [first, second, check] = RAW_HITS;
    assert_eq!(
        wizard.on_tap(&tap(first.0, first.1), &live, &mut renderer),
        TouchCalDispatch::Consumed
    );
    assert_eq!(wizard.current_target(), Some((220, 240)));
    assert_eq!(
        wizard.on_tap(&tap(second.0, second.1), &live, &mut renderer),
        TouchCalDispatch::Consumed
    );
    assert_eq!(wizard.current_target(), Some((120, 150)));

    let TouchCalDispatch::Finished(fit) = wizard.on_tap(&tap(check.0, check.1), &live, &mut renderer)
    else {
        panic!("expected finished wizard");
    };

    assert_eq!(wizard.state(), TouchCalState::Done);
    assert!(!wizard.is_active());
    assert_eq!(fit.residual_px, 0);
    assert_eq!(fit.calibration.to_screen(40, 100), (20, 60));
    assert_eq!(fit.calibration.to_screen(440, 460), (220, 240));
    assert_eq!(renderer.crosshairs(), [(20, 60), (220, 240), (120, 150)]);
}

#[test]
fn cancel_region_is_hit_tested_under_the_live_mapping() {
    let live = TouchCalibration::default();
    let mut wizard = TouchCalibrationSequencer::new();
    let mut renderer = RecordingRenderer::default();

    wizard.start(&mut renderer);
    // (183, 278) maps to (10, 61): an ordinary point.
    assert_eq!(
        wizard.on_tap(&tap(183, 278), &live, &mut renderer),
        TouchCalDispatch::Consumed
    );
    assert_eq!(wizard.target_index(), 1);

    // (535, 850) maps to (120, 284), inside CANCEL.
    assert_eq!(live.to_screen(535, 850), (120, 284));
    assert_eq!(
        wizard.on_tap(&tap(535, 850), &live, &mut renderer),
        TouchCalDispatch::Cancelled
    );
    assert_eq!(wizard.state(), TouchCalState::Idle);
    assert_eq!(wizard.target_index(), 0);
    assert_eq!(
        wizard.on_tap(&tap(183, 278), &live, &mut renderer),
        TouchCalDispatch::Inactive
    );
}

#[test]
fn cancel_discards_collected_points() {
    let live = identity();
    let mut wizard = TouchCalibrationSequencer::new();
    let mut renderer = RecordingRenderer::default();

    wizard.start(&mut renderer);
    for (x, y) in &RAW_HITS[..2] {
        wizard.on_tap(&tap(*x, *y), &live, &mut renderer);
    }
    wizard.cancel();

    assert_eq!(wizard.state(), TouchCalState::Idle);
    assert_eq!(wizard.target_index(), 0);

    // A fresh run starts from the first target again.
    wizard.start(&mut renderer);
    assert_eq!(wizard.current_target(), Some((20, 60)));
}

#[test]
fn degenerate_fit_restarts_collection() {
    let live = identity();
    let mut wizard = TouchCalibrationSequencer::new();
    let mut renderer = RecordingRenderer::default();

    wizard.start(&mut renderer);
    wizard.on_tap(&tap(500, 500), &live, &mut renderer);
    wizard.on_tap(&tap(505, 505), &live, &mut renderer);

    assert_eq!(
        wizard.on_tap(&tap(502, 502), &live, &mut renderer),
        TouchCalDispatch::Restarted
    );
    assert!(wizard.is_active());
    assert_eq!(wizard.current_target(), Some((20, 60)));
}

#[test]
fn done_can_be_restarted() {
    let live = identity();
    let mut wizard = TouchCalibrationSequencer::new();
    let mut renderer = RecordingRenderer::default();

    wizard.start(&mut renderer);
    for (x, y) in RAW_HITS {
        wizard.on_tap(&tap(x, y), &live, &mut renderer);
    }
    assert_eq!(wizard.state(), TouchCalState::Done);
    assert_eq!(
        wizard.on_tap(&tap(1, 1), &live, &mut renderer),
        TouchCalDispatch::Inactive
    );

    wizard.start(&mut renderer);
    assert_eq!(wizard.state(), TouchCalState::WaitTarget);
}
