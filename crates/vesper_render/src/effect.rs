//! Post-Process Render Effect
//!
//! A [`PostProcessRenderEffect`] groups one or more post-process stages under
//! a name and tracks, per camera, whether those stages exist (*attached*) and
//! whether they currently run in the camera's post-process chain (*enabled*).
//!
//! Stages are produced by a factory. A single-instance effect builds one
//! chain at construction and shares it between every camera; otherwise each
//! camera gets its own chain when it is attached. Only attached cameras can
//! be enabled.
//!
//! Unknown cameras are tolerated everywhere: scene teardown order is not
//! guaranteed, so enabling, disabling or detaching a camera the effect never
//! saw is a no-op.

use std::fmt;

use vesper_core::camera::{Camera, CameraHandle};
use vesper_core::collections::NamedMap;

use crate::post_process::{PostProcess, PostProcessChain};

/// Builds the stage chain of one effect instance.
pub type PostProcessFactory = Box<dyn Fn() -> PostProcessChain>;

pub struct PostProcessRenderEffect {
    name: String,
    single_instance: bool,
    factory: PostProcessFactory,

    /// Chain shared by all cameras (single-instance effects only).
    shared: Option<PostProcessChain>,
    /// Per-camera chains, keyed by camera name.
    per_camera: NamedMap<PostProcessChain>,

    attached: NamedMap<CameraHandle>,
    enabled: NamedMap<CameraHandle>,
}

impl fmt::Debug for PostProcessRenderEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostProcessRenderEffect")
            .field("name", &self.name)
            .field("single_instance", &self.single_instance)
            .field("attached", &self.attached.keys().collect::<Vec<_>>())
            .field("enabled", &self.enabled.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl PostProcessRenderEffect {
    pub fn new(
        name: impl Into<String>,
        factory: impl Fn() -> PostProcessChain + 'static,
        single_instance: bool,
    ) -> Self {
        let factory: PostProcessFactory = Box::new(factory);
        let shared = single_instance.then(|| factory());
        Self {
            name: name.into(),
            single_instance,
            factory,
            shared,
            per_camera: NamedMap::new(),
            attached: NamedMap::new(),
            enabled: NamedMap::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn is_single_instance(&self) -> bool {
        self.single_instance
    }

    /// True iff every stage of every instance reports support.
    ///
    /// A per-camera effect with no instance yet has nothing unsupported.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.chains().all(|chain| chain.iter().all(|pp| pp.is_supported()))
    }

    /// The stage chain used for `camera`.
    ///
    /// Single-instance effects always return the shared chain. Otherwise
    /// `None` selects the chain of the first attached camera.
    #[must_use]
    pub fn post_processes(&self, camera: Option<&str>) -> &[Box<dyn PostProcess>] {
        if let Some(shared) = &self.shared {
            return shared;
        }
        let chain = match camera {
            Some(name) => self.per_camera.get(name),
            None => self.per_camera.first().map(|(_, chain)| chain),
        };
        chain.map(|chain| chain.as_slice()).unwrap_or_default()
    }

    pub fn post_processes_mut(&mut self, camera: Option<&str>) -> Option<&mut PostProcessChain> {
        if self.shared.is_some() {
            return self.shared.as_mut();
        }
        match camera {
            Some(name) => self.per_camera.get_mut(name),
            None => self.per_camera.first_mut().map(|(_, chain)| chain),
        }
    }

    #[must_use]
    pub fn is_attached(&self, camera_name: &str) -> bool {
        self.attached.contains_key(camera_name)
    }

    #[must_use]
    pub fn is_enabled(&self, camera_name: &str) -> bool {
        self.enabled.contains_key(camera_name)
    }

    #[must_use]
    pub fn attached_cameras(&self) -> Vec<CameraHandle> {
        self.attached.values().cloned().collect()
    }

    #[must_use]
    pub fn enabled_cameras(&self) -> Vec<CameraHandle> {
        self.enabled.values().cloned().collect()
    }

    /// Creates stage instances for `cameras` without enabling them.
    ///
    /// Called by the owning pipeline when cameras are attached to it.
    pub fn attach_cameras(&mut self, cameras: &[CameraHandle]) {
        for camera in cameras {
            self.ensure_attached(camera);
        }
    }

    /// Disables and releases the stages of `cameras`.
    ///
    /// Called by the owning pipeline when cameras are detached from it.
    pub fn detach_cameras(&mut self, cameras: &[CameraHandle]) {
        for camera in cameras {
            if self.attached.remove(camera.name()).is_none() {
                continue;
            }
            self.disable_camera(camera);

            if let Some(mut chain) = self.per_camera.remove(camera.name()) {
                for pp in &mut chain {
                    pp.dispose(Some(camera.as_ref()));
                }
            } else if let Some(shared) = &mut self.shared {
                for pp in shared.iter_mut() {
                    pp.dispose(Some(camera.as_ref()));
                }
            }
            log::debug!("Effect '{}': detached camera '{}'", self.name, camera.name());
        }
    }

    /// Inserts the stages into the post-process chain of `cameras` (all
    /// attached cameras when empty). Cameras that are not attached are
    /// skipped.
    pub fn enable(&mut self, cameras: &[CameraHandle]) {
        let cameras = if cameras.is_empty() {
            self.attached_cameras()
        } else {
            cameras.to_vec()
        };

        for camera in &cameras {
            if self.enabled.contains_key(camera.name()) {
                continue;
            }
            if !self.attached.contains_key(camera.name()) {
                log::debug!("Effect '{}': camera '{}' is not attached, not enabled", self.name, camera.name());
                continue;
            }
            if let Some(chain) = self.chain_mut(camera.name()) {
                for pp in chain.iter_mut() {
                    pp.attach_to_camera(camera);
                }
            }
            self.enabled.insert(camera.name(), camera.clone());
        }
    }

    /// Removes the stages from the post-process chain of `cameras` (all
    /// enabled cameras when empty).
    pub fn disable(&mut self, cameras: &[CameraHandle]) {
        let cameras = if cameras.is_empty() {
            self.enabled_cameras()
        } else {
            cameras.to_vec()
        };

        for camera in &cameras {
            self.disable_camera(camera);
        }
    }

    /// Per-frame update of every stage.
    pub fn update(&mut self) {
        for chain in self.chains_mut() {
            for pp in chain.iter_mut() {
                pp.update();
            }
        }
    }

    /// Disables every camera and releases all stages.
    pub fn dispose(&mut self) {
        self.disable(&[]);
        for chain in self.chains_mut() {
            for pp in chain.iter_mut() {
                pp.dispose(None);
            }
        }
        self.per_camera.clear();
        self.attached.clear();
        if let Some(shared) = &mut self.shared {
            shared.clear();
        }
    }

    fn disable_camera(&mut self, camera: &Camera) {
        if self.enabled.remove(camera.name()).is_none() {
            return;
        }
        if let Some(chain) = self.chain_mut(camera.name()) {
            for pp in chain.iter_mut() {
                pp.detach_from_camera(camera);
            }
        }
    }

    fn ensure_attached(&mut self, camera: &CameraHandle) {
        if let Some(handle) = self.attached.get_mut(camera.name()) {
            *handle = camera.clone();
            return;
        }
        if !self.single_instance {
            self.per_camera.insert(camera.name(), (self.factory)());
        }
        self.attached.insert(camera.name(), camera.clone());
        log::debug!("Effect '{}': attached camera '{}'", self.name, camera.name());
    }

    fn chain_mut(&mut self, camera_name: &str) -> Option<&mut PostProcessChain> {
        match &mut self.shared {
            Some(shared) => Some(shared),
            None => self.per_camera.get_mut(camera_name),
        }
    }

    fn chains(&self) -> impl Iterator<Item = &PostProcessChain> {
        self.shared.iter().chain(self.per_camera.values())
    }

    fn chains_mut(&mut self) -> impl Iterator<Item = &mut PostProcessChain> {
        self.shared.iter_mut().chain(self.per_camera.values_mut())
    }
}
