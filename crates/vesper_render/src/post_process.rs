//! Post-Process Stage Contract
//!
//! A post-process stage is a GPU full-screen pass (bloom, tone mapping,
//! FXAA, ...) applied after the scene has been rendered. Shader compilation,
//! render target allocation and command submission all live behind this
//! trait; effects and pipelines only do the bookkeeping around it.

use smallvec::SmallVec;
use vesper_core::camera::Camera;

/// Ordered stage chain of one effect instance.
pub type PostProcessChain = SmallVec<[Box<dyn PostProcess>; 4]>;

pub trait PostProcess {
    /// Returns the stage name, used for debugging.
    fn name(&self) -> &str;

    /// Whether the backend can run this stage (shader compiled, formats
    /// available). An unsupported stage makes its effect unsupported.
    fn is_supported(&self) -> bool {
        true
    }

    /// MSAA sample count of the stage's render target.
    fn samples(&self) -> u32;

    fn set_samples(&mut self, samples: u32);

    /// Per-frame update (time-based uniforms, animated parameters).
    fn update(&mut self) {}

    /// Inserts the stage into the camera's post-process chain.
    fn attach_to_camera(&mut self, camera: &Camera);

    /// Removes the stage from the camera's post-process chain.
    fn detach_from_camera(&mut self, camera: &Camera);

    /// Releases GPU resources held for `camera`, or for every camera when `None`.
    fn dispose(&mut self, _camera: Option<&Camera>) {}
}
