//! Animation values and keyframe playback.
//!
//! - [`value`]: the [`AnimationValue`] tagged union and its arithmetic
//! - [`interpolation`]: linear/cubic interpolation per value type
//! - [`track`]: keyframe tracks with cursor-accelerated sampling
//! - [`action`]: time-based playback with loop modes

pub mod action;
pub mod interpolation;
pub mod track;
pub mod value;

pub use action::{AnimationAction, LoopMode};
pub use interpolation::Interpolatable;
pub use track::{InterpolationMode, KeyframeCursor, KeyframeTrack};
pub use value::{AnimationType, AnimationValue, Value, ValueKind};
