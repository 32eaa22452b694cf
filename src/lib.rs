//! # Vesper Engine
//!
//! The animation-value and post-process composition core of a 3D scene
//! renderer.
//!
//! - [`animation`]: the [`AnimationValue`] tagged union, interpolation,
//!   keyframe tracks and playback
//! - [`render`]: post-process effects bound to dynamic camera sets, the
//!   pipelines that own them, and the scene-level pipeline manager
//! - [`common`]: errors, math value types, camera handles and backend
//!   capabilities shared by both
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use vesper::prelude::*;
//!
//! let camera = Camera::new("main").into_handle();
//! let backend = Rc::new(BackendInfo::default());
//!
//! let pipeline = StandardRenderingPipeline::new(
//!     PipelineSettings::default(),
//!     backend,
//!     vec![PostProcessRenderEffect::new("bloom", make_bloom_chain, true)],
//!     &[camera],
//! );
//!
//! let mut manager = PostProcessRenderPipelineManager::new();
//! manager.add_pipeline(Box::new(pipeline));
//!
//! // Once per frame
//! manager.update();
//! ```

pub use vesper_animation as animation;
pub use vesper_core as common;
pub use vesper_render as render;

pub use vesper_animation::{
    AnimationAction, AnimationType, AnimationValue, InterpolationMode, KeyframeTrack, LoopMode,
};
pub use vesper_core::{BackendInfo, Camera, CameraHandle, RenderBackend, Result, VesperError};
pub use vesper_render::{
    PipelineSettings, PostProcess, PostProcessRenderEffect, PostProcessRenderPipeline,
    PostProcessRenderPipelineManager, RenderPipeline, StandardRenderingPipeline,
};

/// Glob-importable set of the commonly used types.
pub mod prelude {
    pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

    pub use vesper_animation::{
        AnimationAction, AnimationType, AnimationValue, Interpolatable, InterpolationMode,
        KeyframeCursor, KeyframeTrack, LoopMode,
    };
    pub use vesper_core::math::{Color3, Color4, Size};
    pub use vesper_core::{BackendInfo, Camera, CameraHandle, RenderBackend};
    pub use vesper_render::{
        PipelineSettings, PostProcess, PostProcessChain, PostProcessRenderEffect,
        PostProcessRenderPipeline, PostProcessRenderPipelineManager, RenderPipeline,
        StandardRenderingPipeline,
    };
}
