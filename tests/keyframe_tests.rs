//! Keyframe Track & Action Tests
//!
//! Tests for:
//! - Track validation
//! - Linear / step / cubic sampling, cursor-based sampling
//! - Action playback in every loop mode

use std::sync::Arc;

use glam::{Quat, Vec3};

use vesper::animation::{AnimationAction, InterpolationMode, KeyframeCursor, KeyframeTrack, LoopMode};
use vesper::{AnimationType, AnimationValue, VesperError};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn floats(values: &[f32]) -> Vec<AnimationValue> {
    values.iter().copied().map(AnimationValue::from).collect()
}

fn linear_track() -> KeyframeTrack {
    KeyframeTrack::new(vec![0.0, 1.0, 2.0], floats(&[0.0, 10.0, 30.0]), InterpolationMode::Linear).unwrap()
}

fn sample_f32(track: &KeyframeTrack, time: f32) -> f32 {
    *track.sample(time).unwrap().get::<f32>().unwrap()
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn empty_track_is_rejected() {
    let result = KeyframeTrack::new(Vec::new(), Vec::new(), InterpolationMode::Linear);
    assert!(matches!(result, Err(VesperError::EmptyTrack)));
}

#[test]
fn unsorted_times_are_rejected() {
    let result = KeyframeTrack::new(vec![0.0, 2.0, 1.0], floats(&[0.0, 1.0, 2.0]), InterpolationMode::Linear);
    assert!(matches!(result, Err(VesperError::UnsortedKeyframes { index: 2 })));
}

#[test]
fn value_count_must_match_interpolation() {
    let result = KeyframeTrack::new(vec![0.0, 1.0], floats(&[0.0, 1.0]), InterpolationMode::CubicSpline);
    assert!(matches!(
        result,
        Err(VesperError::KeyframeCountMismatch { expected: 6, actual: 2 })
    ));
}

#[test]
fn mixed_value_kinds_are_rejected() {
    let values = vec![AnimationValue::from(0.0_f32), AnimationValue::from(Vec3::ZERO)];
    let result = KeyframeTrack::new(vec![0.0, 1.0], values, InterpolationMode::Linear);
    assert!(matches!(result, Err(VesperError::TypeMismatch { .. })));
}

#[test]
fn empty_key_is_rejected() {
    let result = KeyframeTrack::new(vec![0.0], floats(&[f32::NAN]), InterpolationMode::Linear);
    assert!(matches!(result, Err(VesperError::EmptyValue { .. })));
}

// ============================================================================
// Sampling
// ============================================================================

#[test]
fn linear_sampling() {
    let track = linear_track();
    assert_eq!(track.animation_type(), AnimationType::Float);
    assert!(approx(track.duration(), 2.0));

    assert!(approx(sample_f32(&track, 0.0), 0.0));
    assert!(approx(sample_f32(&track, 0.5), 5.0));
    assert!(approx(sample_f32(&track, 1.5), 20.0));
}

#[test]
fn sampling_outside_range_clamps() {
    let track = linear_track();
    assert!(approx(sample_f32(&track, -1.0), 0.0));
    assert!(approx(sample_f32(&track, 5.0), 30.0));
}

#[test]
fn step_sampling_holds_previous_key() {
    let track = KeyframeTrack::new(vec![0.0, 1.0], floats(&[1.0, 2.0]), InterpolationMode::Step).unwrap();
    assert!(approx(sample_f32(&track, 0.99), 1.0));
    assert!(approx(sample_f32(&track, 1.0), 2.0));
}

#[test]
fn discrete_values_step_under_linear_mode() {
    let values = vec![AnimationValue::from("idle"), AnimationValue::from("run")];
    let track = KeyframeTrack::new(vec![0.0, 1.0], values, InterpolationMode::Linear).unwrap();

    assert_eq!(track.animation_type(), AnimationType::Discrete);
    assert_eq!(track.sample(0.5).unwrap().get::<String>().map(String::as_str), Ok("idle"));
    assert_eq!(track.sample(1.0).unwrap().get::<String>().map(String::as_str), Ok("run"));
}

#[test]
fn cubic_sampling_passes_through_keys() {
    let zero = AnimationValue::from(0.0_f32);
    let values = vec![
        zero.clone(),
        AnimationValue::from(0.0_f32),
        zero.clone(),
        zero.clone(),
        AnimationValue::from(8.0_f32),
        zero,
    ];
    let track = KeyframeTrack::new(vec![0.0, 2.0], values, InterpolationMode::CubicSpline).unwrap();

    assert!(approx(sample_f32(&track, 0.0), 0.0));
    assert!(approx(sample_f32(&track, 2.0), 8.0));
    // Flat tangents: smoothstep midpoint
    assert!(approx(sample_f32(&track, 1.0), 4.0));
    assert!(approx(*track.last_value().get::<f32>().unwrap(), 8.0));
}

#[test]
fn quaternion_track_stays_normalized() {
    let values = vec![
        AnimationValue::from(Quat::IDENTITY),
        AnimationValue::from(Quat::from_rotation_z(1.5)),
    ];
    let track = KeyframeTrack::new(vec![0.0, 1.0], values, InterpolationMode::Linear).unwrap();

    let q = *track.sample(0.3).unwrap().get::<Quat>().unwrap();
    assert!(approx(q.length(), 1.0));
}

#[test]
fn cursor_sampling_matches_binary_search() {
    let times: Vec<f32> = (0..20).map(|i| i as f32 * 0.5).collect();
    let values: Vec<f32> = (0..20).map(|i| (i * i) as f32).collect();
    let track = KeyframeTrack::new(times, floats(&values), InterpolationMode::Linear).unwrap();
    let mut cursor = KeyframeCursor::default();

    // forward, then a jump back (loop reset), then scrubbing
    for time in [0.1, 0.7, 1.2, 2.9, 3.1, 0.2, 8.4, 4.0, 9.9] {
        let with_cursor = track.sample_with_cursor(time, &mut cursor).unwrap();
        assert_eq!(with_cursor, track.sample(time).unwrap(), "at t={time}");
    }
}

// ============================================================================
// Action Playback
// ============================================================================

fn action(loop_mode: LoopMode) -> AnimationAction {
    AnimationAction::new(Arc::new(linear_track())).with_loop_mode(loop_mode)
}

#[test]
fn once_clamps_and_pauses() {
    let mut action = action(LoopMode::Once);
    action.update(2.5);

    assert!(approx(action.time, 2.0));
    assert!(action.paused);
    assert!(approx(*action.sample().unwrap().get::<f32>().unwrap(), 30.0));

    action.update(1.0);
    assert!(approx(action.time, 2.0), "paused actions do not advance");
}

#[test]
fn loop_wraps_time() {
    let mut action = action(LoopMode::Loop);
    action.update(2.5);

    assert!(approx(action.time, 0.5));
    assert!(approx(*action.sample().unwrap().get::<f32>().unwrap(), 5.0));
    assert_eq!(action.cycles(), 0);
}

#[test]
fn loop_wraps_backwards_playback() {
    let mut action = action(LoopMode::Loop);
    action.time_scale = -1.0;
    action.update(0.5);
    assert!(approx(action.time, 1.5));
}

#[test]
fn ping_pong_reverses_direction() {
    let mut action = action(LoopMode::PingPong);

    action.update(2.5);
    assert!(approx(action.local_time(), 1.5));

    action.update(0.5);
    assert!(approx(action.local_time(), 1.0), "still travelling backwards");

    action.update(1.5);
    assert!(approx(action.local_time(), 0.5), "bounced off the start");
    assert!(approx(*action.sample().unwrap().get::<f32>().unwrap(), 5.0));
}

#[test]
fn relative_accumulates_cycle_offset() {
    let mut action = action(LoopMode::Relative);
    action.update(4.5);

    assert_eq!(action.cycles(), 2);
    assert!(approx(action.time, 0.5));
    // 5.0 at t=0.5 plus two cycles of (30 - 0)
    assert!(approx(*action.sample().unwrap().get::<f32>().unwrap(), 65.0));

    action.reset();
    assert_eq!(action.cycles(), 0);
    assert!(approx(*action.sample().unwrap().get::<f32>().unwrap(), 0.0));
}

#[test]
fn relative_offsets_vector_tracks() {
    let values = vec![AnimationValue::from(Vec3::ZERO), AnimationValue::from(Vec3::new(0.0, 0.0, 2.0))];
    let track = KeyframeTrack::new(vec![0.0, 1.0], values, InterpolationMode::Linear).unwrap();
    let mut action = AnimationAction::new(Arc::new(track)).with_loop_mode(LoopMode::Relative);

    action.update(1.25);

    let position = *action.sample().unwrap().get::<Vec3>().unwrap();
    assert!(approx(position.z, 2.5));
}

#[test]
fn disabled_action_does_not_advance() {
    let mut action = action(LoopMode::Loop);
    action.enabled = false;
    action.update(1.0);
    assert!(approx(action.time, 0.0));
}
