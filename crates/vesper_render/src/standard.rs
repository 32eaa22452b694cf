use std::rc::Rc;

use vesper_core::backend::RenderBackend;
use vesper_core::camera::CameraHandle;

use crate::effect::PostProcessRenderEffect;
use crate::pipeline::{PostProcessRenderPipeline, RenderPipeline};
use crate::settings::PipelineSettings;

/// General-purpose pipeline: a fixed list of effects applied to a set of
/// cameras.
///
/// Creation registers the effects in the given order, attaches the cameras,
/// optionally enables every effect and then bootstraps MSAA on the first
/// stage of the first effect.
///
/// ```rust,ignore
/// let pipeline = StandardRenderingPipeline::new(
///     PipelineSettings::default(),
///     Rc::new(BackendInfo::default()),
///     vec![bloom_effect, tone_mapping_effect],
///     &[main_camera.clone()],
/// );
/// manager.add_pipeline(Box::new(pipeline));
/// ```
#[derive(Debug)]
pub struct StandardRenderingPipeline {
    core: PostProcessRenderPipeline,
    settings: PipelineSettings,
    msaa_enabled: bool,
}

impl StandardRenderingPipeline {
    pub fn new(
        settings: PipelineSettings,
        backend: Rc<dyn RenderBackend>,
        effects: Vec<PostProcessRenderEffect>,
        cameras: &[CameraHandle],
    ) -> Self {
        let mut core = PostProcessRenderPipeline::new(backend, settings.name.clone());
        let effect_names: Vec<String> = effects.iter().map(|e| e.name().to_owned()).collect();
        for effect in effects {
            core.add_effect(effect);
        }

        core.attach_cameras(cameras, settings.unique_cameras);
        if settings.enable_all_effects {
            for name in &effect_names {
                core.enable_effect(name, &[]);
            }
        }

        let msaa_enabled = settings.wants_msaa() && core.enable_msaa_on_first_post_process(settings.msaa_samples);

        Self {
            core,
            settings,
            msaa_enabled,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Whether creation managed to configure MSAA on the first stage.
    #[must_use]
    pub fn msaa_enabled(&self) -> bool {
        self.msaa_enabled
    }
}

impl RenderPipeline for StandardRenderingPipeline {
    fn core(&self) -> &PostProcessRenderPipeline {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PostProcessRenderPipeline {
        &mut self.core
    }

    fn class_name(&self) -> &'static str {
        "StandardRenderingPipeline"
    }

    /// Re-applies the MSAA bootstrap, since a lost context loses the stage's
    /// render target configuration.
    fn rebuild(&mut self) {
        if self.settings.wants_msaa() {
            self.msaa_enabled = self.core.enable_msaa_on_first_post_process(self.settings.msaa_samples);
        }
    }

    fn dispose(&mut self, do_not_recurse: bool, dispose_material_and_textures: bool) {
        log::debug!(
            "Disposing pipeline '{}' (do_not_recurse: {do_not_recurse}, dispose_material_and_textures: {dispose_material_and_textures})",
            self.core.name()
        );
        self.core.detach_cameras(&[]);
        self.msaa_enabled = false;
        if do_not_recurse {
            return;
        }

        // Every texture this pipeline uses belongs to a stage, so stage
        // disposal covers `dispose_material_and_textures` as well.
        for effect in self.core.effects_mut() {
            effect.dispose();
        }
        self.core.reset();
    }
}
