//! Post-process render effects and pipelines.
//!
//! - [`post_process`]: the GPU stage contract the pipeline drives
//! - [`effect`]: named groups of stages with per-camera enablement
//! - [`pipeline`]: shared pipeline state and the [`RenderPipeline`] trait
//! - [`standard`]: a ready-to-use concrete pipeline
//! - [`manager`]: scene-level registry of pipelines
//! - [`settings`]: pipeline configuration

pub mod effect;
pub mod manager;
pub mod pipeline;
pub mod post_process;
pub mod settings;
pub mod standard;

pub use effect::{PostProcessFactory, PostProcessRenderEffect};
pub use manager::PostProcessRenderPipelineManager;
pub use pipeline::{PostProcessRenderPipeline, RenderPipeline};
pub use post_process::{PostProcess, PostProcessChain};
pub use settings::PipelineSettings;
pub use standard::StandardRenderingPipeline;
