//! Foundational types shared by the Vesper crates.

pub mod backend;
pub mod camera;
pub mod collections;
pub mod errors;
pub mod math;

pub use backend::{BackendInfo, RenderBackend};
pub use camera::{Camera, CameraHandle};
pub use collections::NamedMap;
pub use errors::{Result, VesperError};
pub use math::{Color3, Color4, Size};
