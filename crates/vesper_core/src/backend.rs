//! Render Backend Capabilities
//!
//! Post-process pipelines never talk to the GPU API directly. They only ask
//! the backend a couple of capability questions, expressed by
//! [`RenderBackend`]. [`BackendInfo`] is the plain-data implementation used
//! by applications that already know their context's capabilities (and by
//! tests).
//!
//! # Example
//!
//! ```rust,ignore
//! use vesper_core::backend::BackendInfo;
//!
//! // A legacy single-sample context: MSAA bootstrapping is skipped.
//! let legacy = BackendInfo { version: 1, ..Default::default() };
//! ```

use serde::{Deserialize, Serialize};

/// Capability queries a pipeline issues against the render backend.
pub trait RenderBackend {
    /// Major version of the graphics API the context was created with.
    ///
    /// Version `1` denotes a legacy context whose render targets cannot be
    /// multi-sampled.
    fn version(&self) -> u32;

    /// Largest MSAA sample count render targets may use.
    fn max_samples(&self) -> u32 {
        4
    }

    /// Whether multi-sampled post-process render targets are available.
    fn supports_multisampled_targets(&self) -> bool {
        self.version() > 1
    }
}

/// Static description of a render backend.
///
/// | Field         | Description                           | Default |
/// |---------------|---------------------------------------|---------|
/// | `version`     | Graphics API major version            | `2`     |
/// | `max_samples` | Maximum MSAA samples for render targets | `4`   |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendInfo {
    pub version: u32,
    pub max_samples: u32,
}

impl Default for BackendInfo {
    fn default() -> Self {
        Self {
            version: 2,
            max_samples: 4,
        }
    }
}

impl RenderBackend for BackendInfo {
    fn version(&self) -> u32 {
        self.version
    }

    fn max_samples(&self) -> u32 {
        self.max_samples
    }
}
