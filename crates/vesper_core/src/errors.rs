//! Error Types
//!
//! This module defines the error type shared by every Vesper crate.
//!
//! # Overview
//!
//! [`VesperError`] covers the fail-fast conditions of the animation layer:
//! - Operations on an empty animation value
//! - Tag mismatches between two animation values, or a typed access with the
//!   wrong type
//! - Operators that are not defined for the active tag
//! - Keyframe track validation failures
//!
//! The post-process layer has no error path: unknown cameras, effects and
//! pipelines are tolerated as no-ops.
//!
//! # Usage
//!
//! ```rust,ignore
//! use vesper_core::errors::{VesperError, Result};
//!
//! fn delta(a: &AnimationValue, b: &AnimationValue) -> Result<AnimationValue> {
//!     a.subtract(b)
//! }
//! ```

use thiserror::Error;

/// The main error type for the Vesper engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VesperError {
    // ========================================================================
    // Animation Value Errors
    // ========================================================================
    /// The operation needs a value but the animation value is empty.
    #[error("Cannot {operation} an empty animation value")]
    EmptyValue {
        /// The attempted operation
        operation: &'static str,
    },

    /// Two animation values (or a value and a requested type) disagree on their tag.
    #[error("Animation value type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// The tag the operation required
        expected: &'static str,
        /// The tag actually held
        found: &'static str,
    },

    /// The operator is not defined for the active tag.
    #[error("Operation '{operation}' is not defined for {kind} values")]
    UnsupportedOperation {
        /// The attempted operation
        operation: &'static str,
        /// The active tag
        kind: &'static str,
    },

    /// Property access with a name the active tag does not define.
    #[error("Invalid access: property '{property}' is not defined on {kind} values")]
    InvalidProperty {
        /// The requested property name
        property: String,
        /// The active tag
        kind: &'static str,
    },

    /// Componentwise operation on float arrays of different length.
    #[error("Float array length mismatch: {left} vs {right}")]
    LengthMismatch {
        /// Length of the left operand
        left: usize,
        /// Length of the right operand
        right: usize,
    },

    // ========================================================================
    // Keyframe Track Errors
    // ========================================================================
    /// A keyframe track was built without keyframes.
    #[error("Keyframe track has no keyframes")]
    EmptyTrack,

    /// Keyframe times are not in non-decreasing order.
    #[error("Keyframe times are not sorted (at index {index})")]
    UnsortedKeyframes {
        /// First index whose time is smaller than its predecessor's
        index: usize,
    },

    /// The number of values does not match the number of keyframe times.
    #[error("Keyframe track expects {expected} values, got {actual}")]
    KeyframeCountMismatch {
        /// Expected number of values for the interpolation mode
        expected: usize,
        /// Number of values supplied
        actual: usize,
    },
}

/// Alias for `Result<T, VesperError>`.
pub type Result<T> = std::result::Result<T, VesperError>;
