use std::borrow::Cow;
use std::rc::Rc;

use uuid::Uuid;

/// Shared, non-owning reference to a camera.
///
/// Cameras belong to the scene; render pipelines only hold handles, so one
/// camera can be attached to several pipelines at once.
pub type CameraHandle = Rc<Camera>;

/// The identity a post-process pipeline needs from a scene camera.
///
/// Pipelines and effects key their bookkeeping by [`Camera::name`], so names
/// are expected to be unique within a scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Camera {
    pub uuid: Uuid,
    pub name: Cow<'static, str>,
}

impl Camera {
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
        }
    }

    /// Wraps the camera in a shareable handle.
    #[must_use]
    pub fn into_handle(self) -> CameraHandle {
        Rc::new(self)
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
