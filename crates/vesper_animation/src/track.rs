use vesper_core::errors::{Result, VesperError};

use crate::value::{AnimationType, AnimationValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    #[default]
    Linear,
    Step,
    CubicSpline,
}

/// Forward/backward window scanned before falling back to binary search.
const MAX_SCAN_OFFSET: usize = 3;

/// Remembers the keyframe interval of the previous sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyframeCursor {
    pub last_index: usize,
}

/// Keyframes of a single animated property.
///
/// All values share one tag, which is checked on construction, so sampling
/// only fails if the payloads themselves disagree (float arrays of different
/// lengths).
#[derive(Debug, Clone)]
pub struct KeyframeTrack {
    times: Vec<f32>,
    /// For `CubicSpline`: `[in_tangent, value, out_tangent]` per keyframe.
    values: Vec<AnimationValue>,
    interpolation: InterpolationMode,
    animation_type: AnimationType,
}

impl KeyframeTrack {
    pub fn new(times: Vec<f32>, values: Vec<AnimationValue>, interpolation: InterpolationMode) -> Result<Self> {
        if times.is_empty() {
            return Err(VesperError::EmptyTrack);
        }
        if let Some(index) = times.windows(2).position(|w| w[1] < w[0]) {
            return Err(VesperError::UnsortedKeyframes { index: index + 1 });
        }

        let expected = match interpolation {
            InterpolationMode::CubicSpline => times.len() * 3,
            _ => times.len(),
        };
        if values.len() != expected {
            return Err(VesperError::KeyframeCountMismatch {
                expected,
                actual: values.len(),
            });
        }

        let first = &values[0];
        let animation_type = first
            .animation_type()
            .ok_or(VesperError::EmptyValue { operation: "key" })?;
        if let Some(other) = values.iter().find(|v| v.kind() != first.kind()) {
            return Err(VesperError::TypeMismatch {
                expected: first.kind(),
                found: other.kind(),
            });
        }

        Ok(Self {
            times,
            values,
            interpolation,
            animation_type,
        })
    }

    #[must_use]
    pub fn times(&self) -> &[f32] {
        &self.times
    }

    #[must_use]
    pub fn interpolation(&self) -> InterpolationMode {
        self.interpolation
    }

    #[must_use]
    pub fn animation_type(&self) -> AnimationType {
        self.animation_type
    }

    /// Time of the last keyframe.
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.times[self.times.len() - 1]
    }

    #[must_use]
    pub fn first_value(&self) -> &AnimationValue {
        self.value_at(0)
    }

    #[must_use]
    pub fn last_value(&self) -> &AnimationValue {
        self.value_at(self.times.len() - 1)
    }

    /// Stateless sample via binary search.
    pub fn sample(&self, time: f32) -> Result<AnimationValue> {
        let next = self.times.partition_point(|&t| t <= time);
        self.sample_at_frame(next.saturating_sub(1), time)
    }

    /// Sample starting the search from the interval the cursor remembers.
    ///
    /// Sequential playback hits the local scan and costs O(1); scrubbing or
    /// loop resets fall back to a binary search.
    pub fn sample_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> Result<AnimationValue> {
        let len = self.times.len();
        if len == 1 {
            return Ok(self.value_at(0).clone());
        }

        let i = cursor.last_index.min(len - 1);
        let found = if time >= self.times[i] {
            (i..=(i + MAX_SCAN_OFFSET).min(len - 1)).find(|&idx| idx == len - 1 || time < self.times[idx + 1])
        } else {
            (i.saturating_sub(MAX_SCAN_OFFSET)..i).rev().find(|&idx| time >= self.times[idx])
        };

        let index = found.unwrap_or_else(|| self.times.partition_point(|&t| t <= time).saturating_sub(1));
        cursor.last_index = index;
        self.sample_at_frame(index, time)
    }

    fn value_at(&self, index: usize) -> &AnimationValue {
        match self.interpolation {
            InterpolationMode::CubicSpline => &self.values[index * 3 + 1],
            _ => &self.values[index],
        }
    }

    fn sample_at_frame(&self, index: usize, time: f32) -> Result<AnimationValue> {
        let len = self.times.len();
        if index >= len - 1 {
            return Ok(self.value_at(len - 1).clone());
        }

        let next = index + 1;
        let t0 = self.times[index];
        let dt = self.times[next] - t0;
        let t = if dt > 1e-6 { ((time - t0) / dt).clamp(0.0, 1.0) } else { 0.0 };

        match self.interpolation {
            InterpolationMode::Step => Ok(self.value_at(index).clone()),
            InterpolationMode::Linear => self.value_at(index).lerp(self.value_at(next), t),
            InterpolationMode::CubicSpline => {
                let prev = index * 3;
                let next = next * 3;
                AnimationValue::hermite(
                    &self.values[prev + 1],
                    &self.values[prev + 2],
                    &self.values[next],
                    &self.values[next + 1],
                    t,
                    dt,
                )
            }
        }
    }
}
