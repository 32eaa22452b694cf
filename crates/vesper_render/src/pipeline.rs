//! Post-Process Render Pipeline
//!
//! [`PostProcessRenderPipeline`] holds the state every pipeline shares: the
//! named effects (iterated in registration order), the attached cameras and
//! the per-camera isolated-pass effects. Concrete pipelines embed it and
//! implement [`RenderPipeline`], which supplies the GPU-facing lifecycle
//! (`rebuild`, `dispose`) the shared state cannot know about.
//!
//! # Camera lifecycle
//!
//! ```text
//! Unattached ──attach_cameras──▶ Attached ──enable_effect──▶ Attached + enabled
//!     ▲                              │                            │
//!     └────────detach_cameras────────┴────────────────────────────┘
//! ```
//!
//! Unknown effect names and unknown cameras are silent no-ops.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use vesper_core::backend::RenderBackend;
use vesper_core::camera::CameraHandle;
use vesper_core::collections::NamedMap;

use crate::effect::PostProcessRenderEffect;

pub struct PostProcessRenderPipeline {
    name: String,
    backend: Rc<dyn RenderBackend>,
    render_effects: NamedMap<PostProcessRenderEffect>,
    render_effects_for_isolated_pass: FxHashMap<String, PostProcessRenderEffect>,
    cameras: NamedMap<CameraHandle>,
}

impl fmt::Debug for PostProcessRenderPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostProcessRenderPipeline")
            .field("name", &self.name)
            .field("effects", &self.render_effects.keys().collect::<Vec<_>>())
            .field("cameras", &self.cameras.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl PostProcessRenderPipeline {
    pub fn new(backend: Rc<dyn RenderBackend>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            backend,
            render_effects: NamedMap::new(),
            render_effects_for_isolated_pass: FxHashMap::default(),
            cameras: NamedMap::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn backend(&self) -> &Rc<dyn RenderBackend> {
        &self.backend
    }

    /// True iff every registered effect is supported (vacuously true when
    /// there are none).
    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.render_effects.values().all(PostProcessRenderEffect::is_supported)
    }

    /// Attached cameras in attachment order.
    #[must_use]
    pub fn cameras(&self) -> Vec<CameraHandle> {
        self.cameras.values().cloned().collect()
    }

    #[must_use]
    pub fn has_camera(&self, camera_name: &str) -> bool {
        self.cameras.contains_key(camera_name)
    }

    /// Registers `effect` under its own name, replacing any previous effect
    /// with that name (the replacement keeps the old registration slot).
    pub fn add_effect(&mut self, effect: PostProcessRenderEffect) {
        log::debug!("Pipeline '{}': added effect '{}'", self.name, effect.name());
        self.render_effects.insert(effect.name().to_owned(), effect);
    }

    #[must_use]
    pub fn effect(&self, name: &str) -> Option<&PostProcessRenderEffect> {
        self.render_effects.get(name)
    }

    pub fn effect_mut(&mut self, name: &str) -> Option<&mut PostProcessRenderEffect> {
        self.render_effects.get_mut(name)
    }

    /// Effect names in registration order.
    pub fn effect_names(&self) -> impl Iterator<Item = &str> {
        self.render_effects.keys()
    }

    pub(crate) fn effects_mut(&mut self) -> impl Iterator<Item = &mut PostProcessRenderEffect> {
        self.render_effects.values_mut()
    }

    /// Registers the effect that renders `camera_name` in isolation.
    pub fn add_isolated_pass_effect(&mut self, camera_name: impl Into<String>, effect: PostProcessRenderEffect) {
        self.render_effects_for_isolated_pass.insert(camera_name.into(), effect);
    }

    #[must_use]
    pub fn isolated_pass_effect(&self, camera_name: &str) -> Option<&PostProcessRenderEffect> {
        self.render_effects_for_isolated_pass.get(camera_name)
    }

    /// Enables the named effect for `cameras` (all attached cameras when empty).
    pub fn enable_effect(&mut self, effect_name: &str, cameras: &[CameraHandle]) {
        let cameras = self.resolve_cameras(cameras);
        match self.render_effects.get_mut(effect_name) {
            Some(effect) => effect.enable(&cameras),
            None => log::warn!("Pipeline '{}': cannot enable unknown effect '{effect_name}'", self.name),
        }
    }

    /// Disables the named effect for `cameras` (all attached cameras when empty).
    pub fn disable_effect(&mut self, effect_name: &str, cameras: &[CameraHandle]) {
        let cameras = self.resolve_cameras(cameras);
        match self.render_effects.get_mut(effect_name) {
            Some(effect) => effect.disable(&cameras),
            None => log::debug!("Pipeline '{}': no effect '{effect_name}' to disable", self.name),
        }
    }

    /// Tracks `cameras` (re-uses the attached cameras when empty) and
    /// forwards them to every effect.
    ///
    /// New cameras are always tracked. A camera that is already tracked is
    /// refreshed and forwarded again, unless `unique` is set: then it is
    /// pruned from the batch and keeps its current attachment.
    pub fn attach_cameras(&mut self, cameras: &[CameraHandle], unique: bool) {
        let cameras = self.resolve_cameras(cameras);
        if cameras.is_empty() {
            return;
        }

        let mut batch = Vec::with_capacity(cameras.len());
        for camera in cameras {
            if unique && self.cameras.contains_key(camera.name()) {
                log::debug!("Pipeline '{}': camera '{}' already attached, skipped", self.name, camera.name());
                continue;
            }
            self.cameras.insert(camera.name(), camera.clone());
            batch.push(camera);
        }

        for effect in self.render_effects.values_mut() {
            effect.attach_cameras(&batch);
        }
    }

    /// Detaches `cameras` (every attached camera when empty) from the
    /// effects, then stops tracking them.
    pub fn detach_cameras(&mut self, cameras: &[CameraHandle]) {
        let cameras = self.resolve_cameras(cameras);
        if cameras.is_empty() {
            return;
        }

        for effect in self.render_effects.values_mut() {
            effect.detach_cameras(&cameras);
        }
        for camera in &cameras {
            if self.cameras.remove(camera.name()).is_some() {
                log::debug!("Pipeline '{}': detached camera '{}'", self.name, camera.name());
            }
        }
    }

    /// Per-frame update: every effect, then the isolated-pass effect of each
    /// attached camera that has one.
    pub fn update(&mut self) {
        for effect in self.render_effects.values_mut() {
            effect.update();
        }

        for camera_name in self.cameras.keys() {
            if let Some(effect) = self.render_effects_for_isolated_pass.get_mut(camera_name) {
                effect.update();
            }
        }
    }

    /// Drops every effect and isolated-pass effect. Camera attachments survive.
    pub fn reset(&mut self) {
        self.render_effects.clear();
        self.render_effects_for_isolated_pass.clear();
    }

    /// Sets the sample count of the first stage of the first registered
    /// effect, so the chain's entry render target resolves MSAA natively.
    ///
    /// Returns `false` on legacy single-sample backends or when there is no
    /// stage to modify. The count is clamped to the backend's maximum.
    pub fn enable_msaa_on_first_post_process(&mut self, sample_count: u32) -> bool {
        if !self.backend.supports_multisampled_targets() {
            return false;
        }

        let samples = sample_count.min(self.backend.max_samples().max(1));
        let Some((effect_name, effect)) = self.render_effects.first_mut() else {
            return false;
        };
        let Some(first) = effect.post_processes_mut(None).and_then(|chain| chain.first_mut()) else {
            return false;
        };

        first.set_samples(samples);
        log::debug!(
            "Pipeline '{}': {samples}x MSAA on '{}' of effect '{effect_name}'",
            self.name,
            first.name()
        );
        true
    }

    fn resolve_cameras(&self, cameras: &[CameraHandle]) -> Vec<CameraHandle> {
        if cameras.is_empty() {
            self.cameras()
        } else {
            cameras.to_vec()
        }
    }
}

/// Lifecycle contract of a concrete post-process pipeline.
///
/// Implementors embed a [`PostProcessRenderPipeline`] and expose it through
/// [`core`](Self::core)/[`core_mut`](Self::core_mut); the remaining methods
/// delegate to it unless overridden.
pub trait RenderPipeline {
    fn core(&self) -> &PostProcessRenderPipeline;

    fn core_mut(&mut self) -> &mut PostProcessRenderPipeline;

    fn class_name(&self) -> &'static str {
        "PostProcessRenderPipeline"
    }

    fn name(&self) -> &str {
        self.core().name()
    }

    fn is_supported(&self) -> bool {
        self.core().is_supported()
    }

    fn cameras(&self) -> Vec<CameraHandle> {
        self.core().cameras()
    }

    fn attach_cameras(&mut self, cameras: &[CameraHandle], unique: bool) {
        self.core_mut().attach_cameras(cameras, unique);
    }

    fn detach_cameras(&mut self, cameras: &[CameraHandle]) {
        self.core_mut().detach_cameras(cameras);
    }

    fn enable_effect(&mut self, effect_name: &str, cameras: &[CameraHandle]) {
        self.core_mut().enable_effect(effect_name, cameras);
    }

    fn disable_effect(&mut self, effect_name: &str, cameras: &[CameraHandle]) {
        self.core_mut().disable_effect(effect_name, cameras);
    }

    fn update(&mut self) {
        self.core_mut().update();
    }

    /// Recreates GPU resources after a context loss.
    fn rebuild(&mut self) {}

    /// Detaches every camera and releases the pipeline's resources.
    ///
    /// With `do_not_recurse` the effects are left registered and their
    /// stages alive, so whoever shares them can keep using or dispose them.
    /// `dispose_material_and_textures` asks implementors that own materials
    /// or textures outside their stages to release them too; pipelines
    /// without such resources ignore it.
    fn dispose(&mut self, do_not_recurse: bool, dispose_material_and_textures: bool);
}
