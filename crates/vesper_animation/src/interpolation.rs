use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
use vesper_core::errors::{Result, VesperError};
use vesper_core::math::{Color3, Color4, Size};

use crate::value::{AnimationValue, Value, ValueKind};

pub trait Interpolatable: Copy + Sized {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;

    /// Cubic Hermite spline between `v0` and `v1`; tangents are per unit
    /// time and get scaled by the keyframe interval `dt`.
    fn interpolate_cubic(
        v0: Self,
        out_tangent0: Self,
        in_tangent1: Self,
        v1: Self,
        t: f32,
        dt: f32,
    ) -> Self;
}

/// Hermite basis weights `(s0, s1, s2, s3)` for value0, tangent0, value1, tangent1.
#[inline]
fn hermite_weights(t: f32) -> (f32, f32, f32, f32) {
    let t2 = t * t;
    let t3 = t2 * t;
    let s2 = -2.0 * t3 + 3.0 * t2;
    let s3 = t3 - t2;
    let s0 = 1.0 - s2;
    let s1 = s3 - t2 + t;
    (s0, s1, s2, s3)
}

impl Interpolatable for f32 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }

    fn interpolate_cubic(v0: Self, out_tangent0: Self, in_tangent1: Self, v1: Self, t: f32, dt: f32) -> Self {
        let (s0, s1, s2, s3) = hermite_weights(t);
        s0 * v0 + s1 * out_tangent0 * dt + s2 * v1 + s3 * in_tangent1 * dt
    }
}

macro_rules! impl_vector_space_interpolation {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Interpolatable for $ty {
                fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
                    start * (1.0 - t) + end * t
                }

                fn interpolate_cubic(v0: Self, out_tangent0: Self, in_tangent1: Self, v1: Self, t: f32, dt: f32) -> Self {
                    let (s0, s1, s2, s3) = hermite_weights(t);
                    v0 * s0 + out_tangent0 * (s1 * dt) + v1 * s2 + in_tangent1 * (s3 * dt)
                }
            }
        )+
    };
}

impl_vector_space_interpolation!(Vec2, Vec3, Vec4, Mat4, Color3, Color4, Size);

impl Interpolatable for Quat {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.slerp(end, t)
    }

    fn interpolate_cubic(v0: Self, out_tangent0: Self, in_tangent1: Self, v1: Self, t: f32, dt: f32) -> Self {
        let result = Vec4::interpolate_cubic(
            Vec4::from(v0),
            Vec4::from(out_tangent0),
            Vec4::from(in_tangent1),
            Vec4::from(v1),
            t,
            dt,
        );
        Quat::from_vec4(result).normalize()
    }
}

// ============================================================================
// Dynamic dispatch over AnimationValue
// ============================================================================

fn lerp_slices(a: &[f32], b: &[f32], t: f32) -> Result<Vec<f32>> {
    if a.len() != b.len() {
        return Err(VesperError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.iter()
        .zip(b)
        .map(|(x, y)| f32::interpolate_linear(*x, *y, t))
        .collect())
}

impl AnimationValue {
    /// Interpolates from `self` to `to` with the strategy of the shared tag.
    ///
    /// Bools and strings step: the start value is held while `t < 1`.
    pub fn lerp(&self, to: &Self, t: f32) -> Result<Self> {
        let (a, b) = tagged_pair(self, to, "interpolate")?;
        Ok(match (a, b) {
            (Value::Bool(_), Value::Bool(_)) | (Value::String(_), Value::String(_)) => {
                if t < 1.0 { self.clone() } else { to.clone() }
            }
            (Value::Int(a), Value::Int(b)) => {
                Self::from(f32::interpolate_linear(*a as f32, *b as f32, t).round() as i32)
            }
            (Value::Float(a), Value::Float(b)) => Self::from(f32::interpolate_linear(*a, *b, t)),
            (Value::Size(a), Value::Size(b)) => Self::from(Size::interpolate_linear(*a, *b, t)),
            (Value::Color3(a), Value::Color3(b)) => Self::from(Color3::interpolate_linear(*a, *b, t)),
            (Value::Color4(a), Value::Color4(b)) => Self::from(Color4::interpolate_linear(*a, *b, t)),
            (Value::Vector2(a), Value::Vector2(b)) => Self::from(Vec2::interpolate_linear(*a, *b, t)),
            (Value::Vector3(a), Value::Vector3(b)) => Self::from(Vec3::interpolate_linear(*a, *b, t)),
            (Value::Vector4(a), Value::Vector4(b)) => Self::from(Vec4::interpolate_linear(*a, *b, t)),
            (Value::Quaternion(a), Value::Quaternion(b)) => Self::from(Quat::interpolate_linear(*a, *b, t)),
            (Value::Matrix(a), Value::Matrix(b)) => Self::from(Mat4::interpolate_linear(*a, *b, t)),
            (Value::FloatArray(a), Value::FloatArray(b)) => Self::from(lerp_slices(a, b, t)?),
            (a, b) => {
                return Err(VesperError::TypeMismatch {
                    expected: a.kind(),
                    found: b.kind(),
                });
            }
        })
    }

    /// Cubic Hermite interpolation between `v0` and `v1` with tangents.
    ///
    /// All four values must share one tag. Discrete tags step like [`lerp`](Self::lerp).
    pub fn hermite(v0: &Self, out_tangent0: &Self, in_tangent1: &Self, v1: &Self, t: f32, dt: f32) -> Result<Self> {
        let (a, b) = tagged_pair(v0, v1, "interpolate")?;
        let (m0, m1) = tagged_pair(out_tangent0, in_tangent1, "interpolate")?;

        let typed = cubic_of::<f32>(a, m0, m1, b, t, dt)
            .or_else(|| cubic_of::<Size>(a, m0, m1, b, t, dt))
            .or_else(|| cubic_of::<Color3>(a, m0, m1, b, t, dt))
            .or_else(|| cubic_of::<Color4>(a, m0, m1, b, t, dt))
            .or_else(|| cubic_of::<Vec2>(a, m0, m1, b, t, dt))
            .or_else(|| cubic_of::<Vec3>(a, m0, m1, b, t, dt))
            .or_else(|| cubic_of::<Vec4>(a, m0, m1, b, t, dt))
            .or_else(|| cubic_of::<Quat>(a, m0, m1, b, t, dt))
            .or_else(|| cubic_of::<Mat4>(a, m0, m1, b, t, dt));
        if let Some(value) = typed {
            return Ok(value);
        }

        match (a, m0, m1, b) {
            (Value::Int(a), Value::Int(m0), Value::Int(m1), Value::Int(b)) => Ok(Self::from(
                f32::interpolate_cubic(*a as f32, *m0 as f32, *m1 as f32, *b as f32, t, dt).round() as i32,
            )),
            (Value::FloatArray(a), Value::FloatArray(m0), Value::FloatArray(m1), Value::FloatArray(b)) => {
                let len = a.len();
                for other in [m0, m1, b] {
                    if other.len() != len {
                        return Err(VesperError::LengthMismatch { left: len, right: other.len() });
                    }
                }
                Ok(Self::from(
                    (0..len)
                        .map(|i| f32::interpolate_cubic(a[i], m0[i], m1[i], b[i], t, dt))
                        .collect::<Vec<_>>(),
                ))
            }
            (Value::Bool(_), _, _, Value::Bool(_)) | (Value::String(_), _, _, Value::String(_)) => {
                Ok(if t < 1.0 { v0.clone() } else { v1.clone() })
            }
            (a, m0, m1, b) => {
                let found = [m0, m1, b].into_iter().find(|v| v.kind() != a.kind()).map_or(a.kind(), Value::kind);
                Err(VesperError::TypeMismatch {
                    expected: a.kind(),
                    found,
                })
            }
        }
    }
}

fn cubic_of<T>(a: &Value, m0: &Value, m1: &Value, b: &Value, t: f32, dt: f32) -> Option<AnimationValue>
where
    T: Interpolatable + ValueKind + Into<AnimationValue>,
{
    let v = T::interpolate_cubic(
        *T::from_value(a)?,
        *T::from_value(m0)?,
        *T::from_value(m1)?,
        *T::from_value(b)?,
        t,
        dt,
    );
    Some(v.into())
}

fn tagged_pair<'a>(a: &'a AnimationValue, b: &'a AnimationValue, operation: &'static str) -> Result<(&'a Value, &'a Value)> {
    let a = a.value().ok_or(VesperError::EmptyValue { operation })?;
    let b = b.value().ok_or(VesperError::EmptyValue { operation })?;
    Ok((a, b))
}
