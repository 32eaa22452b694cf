//! Pipeline Manager
//!
//! The scene-level registry of post-process pipelines. Scene code addresses
//! pipelines by name; the render loop calls [`update`] once per frame.
//!
//! Every entry point tolerates unknown pipeline names, mirroring the
//! effect/camera no-op policy of the pipelines themselves.
//!
//! [`update`]: PostProcessRenderPipelineManager::update

use vesper_core::camera::CameraHandle;
use vesper_core::collections::NamedMap;

use crate::pipeline::RenderPipeline;

#[derive(Default)]
pub struct PostProcessRenderPipelineManager {
    pipelines: NamedMap<Box<dyn RenderPipeline>>,
}

impl PostProcessRenderPipelineManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }

    /// Registers `pipeline` under its name, replacing a previous one.
    pub fn add_pipeline(&mut self, pipeline: Box<dyn RenderPipeline>) {
        let name = pipeline.name().to_owned();
        log::debug!("Registered {} '{name}'", pipeline.class_name());
        self.pipelines.insert(name, pipeline);
    }

    #[must_use]
    pub fn pipeline(&self, name: &str) -> Option<&dyn RenderPipeline> {
        self.pipelines.get(name).map(|pipeline| &**pipeline)
    }

    pub fn pipeline_mut(&mut self, name: &str) -> Option<&mut (dyn RenderPipeline + 'static)> {
        self.pipelines.get_mut(name).map(|pipeline| &mut **pipeline)
    }

    /// Pipelines whose effects are all supported, in registration order.
    pub fn supported_pipelines(&self) -> impl Iterator<Item = &dyn RenderPipeline> {
        self.pipelines
            .values()
            .map(|pipeline| &**pipeline)
            .filter(|pipeline| pipeline.is_supported())
    }

    pub fn attach_cameras_to_render_pipeline(&mut self, pipeline_name: &str, cameras: &[CameraHandle], unique: bool) {
        if let Some(pipeline) = self.pipelines.get_mut(pipeline_name) {
            pipeline.attach_cameras(cameras, unique);
        }
    }

    pub fn detach_cameras_from_render_pipeline(&mut self, pipeline_name: &str, cameras: &[CameraHandle]) {
        if let Some(pipeline) = self.pipelines.get_mut(pipeline_name) {
            pipeline.detach_cameras(cameras);
        }
    }

    pub fn enable_effect_in_pipeline(&mut self, pipeline_name: &str, effect_name: &str, cameras: &[CameraHandle]) {
        if let Some(pipeline) = self.pipelines.get_mut(pipeline_name) {
            pipeline.enable_effect(effect_name, cameras);
        }
    }

    pub fn disable_effect_in_pipeline(&mut self, pipeline_name: &str, effect_name: &str, cameras: &[CameraHandle]) {
        if let Some(pipeline) = self.pipelines.get_mut(pipeline_name) {
            pipeline.disable_effect(effect_name, cameras);
        }
    }

    /// Per-frame update. Pipelines that stopped being supported are disposed
    /// and dropped instead of updated.
    pub fn update(&mut self) {
        let unsupported: Vec<String> = self
            .pipelines
            .iter()
            .filter(|(_, pipeline)| !pipeline.is_supported())
            .map(|(name, _)| name.to_owned())
            .collect();

        for name in unsupported {
            if let Some(mut pipeline) = self.pipelines.remove(&name) {
                log::warn!("Pipeline '{name}' is not supported by the backend, disposing it");
                pipeline.dispose(false, false);
            }
        }

        for pipeline in self.pipelines.values_mut() {
            pipeline.update();
        }
    }

    /// Rebuilds every pipeline after a context loss.
    pub fn rebuild(&mut self) {
        for pipeline in self.pipelines.values_mut() {
            pipeline.rebuild();
        }
    }

    /// Disposes and drops every pipeline.
    pub fn dispose(&mut self) {
        for (_, mut pipeline) in self.pipelines.drain() {
            pipeline.dispose(false, false);
        }
    }
}
