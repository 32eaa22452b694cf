//! PostProcessRenderPipeline Tests
//!
//! Tests for:
//! - Effect registration and ordering
//! - Enabling / disabling effects per camera
//! - Camera attach (plain and unique) and detach
//! - Support reporting, reset and per-frame update
//! - MSAA bootstrap on the first stage

mod common;

use std::rc::Rc;

use common::{backend, camera, effect, effect_with, init_logger, names};
use vesper::prelude::*;

fn pipeline() -> PostProcessRenderPipeline {
    init_logger();
    PostProcessRenderPipeline::new(backend(2), "main")
}

// ============================================================================
// Effects
// ============================================================================

#[test]
fn effects_keep_registration_order() {
    let mut p = pipeline();
    for name in ["tone_mapping", "bloom", "fxaa"] {
        p.add_effect(effect_with(name, &[name], true, true).0);
    }

    let order: Vec<&str> = p.effect_names().collect();
    assert_eq!(order, vec!["tone_mapping", "bloom", "fxaa"]);
}

#[test]
fn adding_effect_with_same_name_replaces_it() {
    let mut p = pipeline();
    p.add_effect(effect_with("bloom", &["old"], true, true).0);
    p.add_effect(effect_with("fxaa", &["fxaa"], true, true).0);
    p.add_effect(effect_with("bloom", &["new"], true, true).0);

    let order: Vec<&str> = p.effect_names().collect();
    assert_eq!(order, vec!["bloom", "fxaa"]);
    assert_eq!(p.effect("bloom").unwrap().post_processes(None)[0].name(), "new");
}

#[test]
fn enable_then_disable_for_one_camera() {
    let mut p = pipeline();
    let (bloom, _log) = effect("bloom");
    p.add_effect(bloom);
    let cam_a = camera("camA");
    let cam_b = camera("camB");
    p.attach_cameras(&[cam_a.clone(), cam_b.clone()], false);

    p.enable_effect("bloom", &[cam_a.clone(), cam_b.clone()]);
    p.disable_effect("bloom", std::slice::from_ref(&cam_a));

    let bloom = p.effect("bloom").unwrap();
    assert_eq!(names(&bloom.enabled_cameras()), vec!["camB"]);
    assert!(!bloom.is_enabled("camA"));
}

#[test]
fn enable_with_no_cameras_uses_attached_cameras() {
    let mut p = pipeline();
    let (bloom, log) = effect("bloom");
    p.add_effect(bloom);
    let cam_a = camera("camA");
    p.attach_cameras(&[cam_a.clone(), camera("camB")], false);

    p.enable_effect("bloom", &[]);

    assert_eq!(names(&p.effect("bloom").unwrap().enabled_cameras()), vec!["camA", "camB"]);
    assert_eq!(log.borrow().attached, vec!["camA", "camB"]);

    p.disable_effect("bloom", std::slice::from_ref(&cam_a));

    assert_eq!(names(&p.effect("bloom").unwrap().enabled_cameras()), vec!["camB"]);
    assert_eq!(log.borrow().detached, vec!["camA"]);
}

#[test]
fn enable_for_unattached_camera_is_noop() {
    let mut p = pipeline();
    let (bloom, log) = effect("bloom");
    p.add_effect(bloom);
    let ghost = camera("ghost");

    p.enable_effect("bloom", std::slice::from_ref(&ghost));

    assert!(p.cameras().is_empty());
    let bloom = p.effect("bloom").unwrap();
    assert!(!bloom.is_attached("ghost"));
    assert!(!bloom.is_enabled("ghost"));
    assert!(log.borrow().attached.is_empty());

    p.detach_cameras(&[]);
    assert!(p.effect("bloom").unwrap().enabled_cameras().is_empty());
}

#[test]
fn unknown_effect_is_noop() {
    let mut p = pipeline();
    let (bloom, log) = effect("bloom");
    p.add_effect(bloom);
    let cam = camera("a");

    p.enable_effect("missing", std::slice::from_ref(&cam));
    p.disable_effect("missing", std::slice::from_ref(&cam));

    assert!(log.borrow().attached.is_empty());
    assert!(p.effect("missing").is_none());
}

// ============================================================================
// Support
// ============================================================================

#[test]
fn empty_pipeline_is_supported() {
    assert!(pipeline().is_supported());
}

#[test]
fn one_unsupported_effect_makes_pipeline_unsupported() {
    let mut p = pipeline();
    p.add_effect(effect_with("ok", &["ok"], true, true).0);
    assert!(p.is_supported());

    p.add_effect(effect_with("broken", &["broken"], false, true).0);
    assert!(!p.is_supported());
}

// ============================================================================
// Cameras
// ============================================================================

#[test]
fn attach_forwards_cameras_to_effects() {
    let mut p = pipeline();
    p.add_effect(effect_with("blur", &["blur"], true, false).0);

    p.attach_cameras(&[camera("a"), camera("b")], false);

    assert_eq!(names(&p.cameras()), vec!["a", "b"]);
    let blur = p.effect("blur").unwrap();
    assert!(blur.is_attached("a") && blur.is_attached("b"));
    assert!(blur.enabled_cameras().is_empty());
}

#[test]
fn unique_attach_adds_new_camera() {
    let mut p = pipeline();
    p.add_effect(effect("bloom").0);

    p.attach_cameras(&[camera("a")], true);

    assert!(p.has_camera("a"));
    assert!(p.effect("bloom").unwrap().is_attached("a"));
}

#[test]
fn unique_attach_skips_tracked_camera() {
    let mut p = pipeline();
    p.add_effect(effect_with("blur", &["blur"], true, false).0);
    let original = camera("a");
    let duplicate = camera("a");
    p.attach_cameras(std::slice::from_ref(&original), false);

    p.attach_cameras(&[duplicate.clone(), camera("b")], true);

    assert_eq!(names(&p.cameras()), vec!["a", "b"]);
    assert!(Rc::ptr_eq(&p.cameras()[0], &original));
    let blur_cameras = p.effect("blur").unwrap().attached_cameras();
    assert!(Rc::ptr_eq(&blur_cameras[0], &original));
    assert!(!Rc::ptr_eq(&blur_cameras[0], &duplicate));
}

#[test]
fn plain_attach_refreshes_tracked_camera() {
    let mut p = pipeline();
    p.add_effect(effect_with("blur", &["blur"], true, false).0);
    let original = camera("a");
    let replacement = camera("a");
    p.attach_cameras(std::slice::from_ref(&original), false);

    p.attach_cameras(std::slice::from_ref(&replacement), false);

    assert_eq!(p.cameras().len(), 1);
    assert!(Rc::ptr_eq(&p.cameras()[0], &replacement));
    assert!(Rc::ptr_eq(&p.effect("blur").unwrap().attached_cameras()[0], &replacement));
}

#[test]
fn detach_removes_camera_from_pipeline_and_effects() {
    let mut p = pipeline();
    let (blur, log) = effect_with("blur", &["blur"], true, false);
    p.add_effect(blur);
    let a = camera("a");
    p.attach_cameras(&[a.clone(), camera("b")], false);
    p.enable_effect("blur", &[]);

    p.detach_cameras(std::slice::from_ref(&a));

    assert_eq!(names(&p.cameras()), vec!["b"]);
    assert!(!p.effect("blur").unwrap().is_attached("a"));
    assert_eq!(log.borrow().disposed, vec![Some("a".to_owned())]);
}

#[test]
fn detach_with_no_cameras_detaches_all() {
    let mut p = pipeline();
    p.add_effect(effect("bloom").0);
    p.attach_cameras(&[camera("a"), camera("b")], false);

    p.detach_cameras(&[]);

    assert!(p.cameras().is_empty());
    assert!(p.effect("bloom").unwrap().attached_cameras().is_empty());
}

#[test]
fn detach_unknown_camera_is_noop() {
    let mut p = pipeline();
    p.attach_cameras(&[camera("a")], false);
    p.detach_cameras(&[camera("ghost")]);
    assert_eq!(names(&p.cameras()), vec!["a"]);
}

// ============================================================================
// Update / Reset
// ============================================================================

#[test]
fn update_runs_effects_and_isolated_passes_of_attached_cameras() {
    let mut p = pipeline();
    let (bloom, bloom_log) = effect("bloom");
    let (isolated, isolated_log) = effect("isolated_a");
    let (orphan, orphan_log) = effect("isolated_ghost");
    p.add_effect(bloom);
    p.add_isolated_pass_effect("a", isolated);
    p.add_isolated_pass_effect("ghost", orphan);
    p.attach_cameras(&[camera("a")], false);

    p.update();

    assert_eq!(bloom_log.borrow().updates, 1);
    assert_eq!(isolated_log.borrow().updates, 1);
    assert_eq!(orphan_log.borrow().updates, 0);
    assert!(p.isolated_pass_effect("a").is_some());
}

#[test]
fn reset_clears_effects_but_keeps_cameras() {
    let mut p = pipeline();
    p.add_effect(effect("bloom").0);
    p.add_isolated_pass_effect("a", effect("isolated").0);
    p.attach_cameras(&[camera("a")], false);

    p.reset();

    assert_eq!(p.effect_names().count(), 0);
    assert!(p.isolated_pass_effect("a").is_none());
    assert_eq!(names(&p.cameras()), vec!["a"]);
    assert!(p.is_supported());
}

// ============================================================================
// MSAA
// ============================================================================

#[test]
fn msaa_is_unavailable_on_legacy_backend() {
    init_logger();
    let mut p = PostProcessRenderPipeline::new(backend(1), "legacy");
    p.add_effect(effect("bloom").0);

    assert!(!p.enable_msaa_on_first_post_process(4));
    assert_eq!(p.effect("bloom").unwrap().post_processes(None)[0].samples(), 1);
}

#[test]
fn msaa_sets_samples_on_first_stage_of_first_effect() {
    let mut p = pipeline();
    p.add_effect(effect_with("tone_mapping", &["tone_a", "tone_b"], true, true).0);
    p.add_effect(effect("fxaa").0);

    assert!(p.enable_msaa_on_first_post_process(4));

    let tone = p.effect("tone_mapping").unwrap().post_processes(None);
    assert_eq!(tone[0].samples(), 4);
    assert_eq!(tone[1].samples(), 1);
    assert_eq!(p.effect("fxaa").unwrap().post_processes(None)[0].samples(), 1);
}

#[test]
fn msaa_is_clamped_to_backend_maximum() {
    init_logger();
    let backend: Rc<dyn RenderBackend> = Rc::new(BackendInfo {
        version: 2,
        max_samples: 2,
    });
    let mut p = PostProcessRenderPipeline::new(backend, "clamped");
    p.add_effect(effect("bloom").0);

    assert!(p.enable_msaa_on_first_post_process(8));
    assert_eq!(p.effect("bloom").unwrap().post_processes(None)[0].samples(), 2);
}

#[test]
fn msaa_without_stages_fails() {
    let mut p = pipeline();
    assert!(!p.enable_msaa_on_first_post_process(4));

    p.add_effect(effect_with("lazy", &["lazy"], true, false).0);
    assert!(!p.enable_msaa_on_first_post_process(4), "no camera, no instance");
}
