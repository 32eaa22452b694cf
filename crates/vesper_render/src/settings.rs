//! Pipeline Settings
//!
//! Plain configuration consumed once when a [`StandardRenderingPipeline`]
//! is created. Settings are serde-friendly so applications can keep them in
//! their config files.
//!
//! ```rust,ignore
//! use vesper_render::PipelineSettings;
//!
//! // Split-screen pipeline that never re-attaches a camera twice
//! let settings = PipelineSettings {
//!     name: "split_screen".into(),
//!     unique_cameras: true,
//!     ..Default::default()
//! };
//! ```
//!
//! [`StandardRenderingPipeline`]: crate::StandardRenderingPipeline

use serde::{Deserialize, Serialize};

/// | Field                | Description                                       | Default      |
/// |----------------------|---------------------------------------------------|--------------|
/// | `name`               | Pipeline name (manager key)                       | `"standard"` |
/// | `msaa_samples`       | Samples for the first stage; `1` skips MSAA setup | `4`          |
/// | `unique_cameras`     | Skip cameras the pipeline already tracks          | `false`      |
/// | `enable_all_effects` | Enable every effect for the cameras on creation   | `true`       |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    pub name: String,
    pub msaa_samples: u32,
    pub unique_cameras: bool,
    pub enable_all_effects: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            name: "standard".to_owned(),
            msaa_samples: 4,
            unique_cameras: false,
            enable_all_effects: true,
        }
    }
}

impl PipelineSettings {
    /// Whether creation should touch the sample count of the first stage.
    #[inline]
    #[must_use]
    pub fn wants_msaa(&self) -> bool {
        self.msaa_samples > 1
    }
}
