// Host-side tests for the front-end constants.
// The main crate is wasm-only, so the pure constants module is included directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn gains_stay_in_unit_range() {
    assert!(MASTER_GAIN > 0.0 && MASTER_GAIN <= 1.0);
    assert!(REVERB_RETURN_GAIN > 0.0 && REVERB_RETURN_GAIN <= 1.0);
    // A feedback loop at or above unity never decays.
    assert!(DELAY_FEEDBACK_GAIN > 0.0 && DELAY_FEEDBACK_GAIN < 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn delay_time_fits_the_delay_line() {
    assert!(DELAY_TIME_SEC > 0.0);
    assert!((DELAY_TIME_SEC as f64) <= DELAY_MAX_SEC);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn analyser_settings_are_accepted_by_webaudio() {
    assert!(FFT_SIZE.is_power_of_two());
    assert!((32..=32768).contains(&FFT_SIZE));
    assert!((0.0..1.0).contains(&ANALYSER_SMOOTHING));
    assert!(FILTER_OPEN_HZ >= 20_000.0);
    assert!(FILTER_Q > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn pose_options_are_valid() {
    assert!(POSE_MAX_HANDS >= 1);
    assert!(POSE_MODEL_COMPLEXITY <= 1);
    assert!((0.0..=1.0).contains(&POSE_MIN_DETECTION_CONFIDENCE));
    assert!((0.0..=1.0).contains(&POSE_MIN_TRACKING_CONFIDENCE));
    assert!(POSE_RETRY_MS > 0.0);
    assert!(POSE_ASSET_BASE.starts_with("https://"));
    assert!(POSE_ASSET_BASE.ends_with('/'));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_request_is_landscape() {
    assert!(CAMERA_IDEAL_WIDTH > CAMERA_IDEAL_HEIGHT);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn fade_layers_leave_trails() {
    for alpha in [FIELD_FADE_ALPHA, INK_FADE_ALPHA, INK_VIDEO_ALPHA] {
        assert!(alpha > 0.0 && alpha < 1.0);
    }
    // Ink trails linger longer than the field's.
    assert!(INK_FADE_ALPHA < FIELD_FADE_ALPHA);
    assert!(INK_FADE_ALPHA > INK_VIDEO_ALPHA);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn compact_radar_is_sparser() {
    assert!(RADAR_GRID_PX_COMPACT < RADAR_GRID_PX);
    assert!(RADAR_RINGS_COMPACT < RADAR_RINGS);
    assert!(RADAR_RING_STEP_PX_COMPACT < RADAR_RING_STEP_PX);
    // outermost ring stays inside a 768 px wide view
    assert!(RADAR_RING_STEP_PX * RADAR_RINGS as f64 <= 768.0);
    assert!(RADAR_WEDGE_RAD > 0.0 && RADAR_WEDGE_RAD < std::f64::consts::PI);
    assert!(RADAR_NODE_RADIUS_PX > 0.0);
    assert!(GLYPH_FONT_SCALE > 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn ink_brush_is_smaller_than_reticle() {
    assert!(INK_BRUSH_PX > 0.0 && INK_BRUSH_PX < RETICLE_PX);
}
