//! Dynamically typed animation values.
//!
//! Keyframe evaluation has to interpolate between two values whose type is
//! only known at runtime (a float on one property, a color on the next).
//! [`AnimationValue`] is a closed tagged union over every animatable type;
//! all operations match exhaustively on the tag and fail fast with a
//! [`VesperError`] when the tags of two operands disagree or an operator is
//! undefined for the active tag.
//!
//! An arithmetic input that is NaN produces an *empty* value. Animation code
//! uses this as the "no result this frame" sentinel, so every operation on an
//! empty value reports [`VesperError::EmptyValue`].

use std::ops::{Add, Not, Sub};

use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
use vesper_core::errors::{Result, VesperError};
use vesper_core::math::{Color3, Color4, Size};

/// Payload of a non-empty [`AnimationValue`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i32),
    Float(f32),
    String(String),
    Size(Size),
    Color3(Color3),
    Color4(Color4),
    Vector2(Vec2),
    Vector3(Vec3),
    Vector4(Vec4),
    Quaternion(Quat),
    Matrix(Mat4),
    FloatArray(Vec<f32>),
}

impl Value {
    /// Name of the tag, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Size(_) => "size",
            Self::Color3(_) => "color3",
            Self::Color4(_) => "color4",
            Self::Vector2(_) => "vector2",
            Self::Vector3(_) => "vector3",
            Self::Vector4(_) => "vector4",
            Self::Quaternion(_) => "quaternion",
            Self::Matrix(_) => "matrix",
            Self::FloatArray(_) => "float array",
        }
    }
}

// ============================================================================
// AnimationType
// ============================================================================

/// Interpolation strategy selected by the tag of a value.
///
/// The numeric codes are stable and match the animation data-type constants
/// used by serialized animations; `Vector4`, `FloatArray` and `Discrete` extend
/// that table for the tags it does not cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum AnimationType {
    /// Scalar lerp (floats and ints).
    Float = 0,
    Vector3 = 1,
    /// Spherical interpolation.
    Quaternion = 2,
    Matrix = 3,
    Color3 = 4,
    Vector2 = 5,
    Size = 6,
    Color4 = 7,
    Vector4 = 8,
    FloatArray = 9,
    /// Step interpolation (bools and strings).
    Discrete = 10,
}

impl AnimationType {
    #[inline]
    #[must_use]
    pub const fn code(self) -> u32 {
        self as u32
    }

    #[must_use]
    pub const fn from_code(code: u32) -> Option<Self> {
        Some(match code {
            0 => Self::Float,
            1 => Self::Vector3,
            2 => Self::Quaternion,
            3 => Self::Matrix,
            4 => Self::Color3,
            5 => Self::Vector2,
            6 => Self::Size,
            7 => Self::Color4,
            8 => Self::Vector4,
            9 => Self::FloatArray,
            10 => Self::Discrete,
            _ => return None,
        })
    }

    /// Whether values of this type jump between keyframes instead of blending.
    #[inline]
    #[must_use]
    pub const fn is_discrete(self) -> bool {
        matches!(self, Self::Discrete)
    }
}

// ============================================================================
// Typed access
// ============================================================================

/// Rust types that can be stored in an [`AnimationValue`].
pub trait ValueKind: Sized {
    /// Tag name, matching [`Value::kind`].
    const KIND: &'static str;

    fn from_value(value: &Value) -> Option<&Self>;

    fn from_value_mut(value: &mut Value) -> Option<&mut Self>;
}

macro_rules! impl_value_kind {
    ($($ty:ty => $variant:ident, $kind:literal;)+) => {
        $(
            impl ValueKind for $ty {
                const KIND: &'static str = $kind;

                #[inline]
                fn from_value(value: &Value) -> Option<&Self> {
                    match value {
                        Value::$variant(v) => Some(v),
                        _ => None,
                    }
                }

                #[inline]
                fn from_value_mut(value: &mut Value) -> Option<&mut Self> {
                    match value {
                        Value::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for AnimationValue {
                fn from(value: $ty) -> Self {
                    Self::from(Value::$variant(value))
                }
            }
        )+
    };
}

impl_value_kind! {
    bool => Bool, "bool";
    i32 => Int, "int";
    f32 => Float, "float";
    String => String, "string";
    Size => Size, "size";
    Color3 => Color3, "color3";
    Color4 => Color4, "color4";
    Vec2 => Vector2, "vector2";
    Vec3 => Vector3, "vector3";
    Vec4 => Vector4, "vector4";
    Quat => Quaternion, "quaternion";
    Mat4 => Matrix, "matrix";
    Vec<f32> => FloatArray, "float array";
}

// ============================================================================
// AnimationValue
// ============================================================================

/// An optional value of one of the animatable types.
///
/// ```rust,ignore
/// let from = AnimationValue::from(Vec3::new(1.0, 2.0, 3.0));
/// let to = AnimationValue::from(Vec3::new(4.0, 6.0, 3.0));
///
/// let delta = to.subtract(&from)?;
/// assert_eq!(delta.get::<Vec3>()?, &Vec3::new(3.0, 4.0, 0.0));
/// assert_eq!(delta.property("y")?.get::<f32>()?, &4.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnimationValue {
    value: Option<Value>,
}

impl From<Value> for AnimationValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Float(f) if f.is_nan() => Self::empty(),
            value => Self { value: Some(value) },
        }
    }
}

impl From<f64> for AnimationValue {
    fn from(value: f64) -> Self {
        Self::from(value as f32)
    }
}

impl From<&str> for AnimationValue {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<&[f32]> for AnimationValue {
    fn from(value: &[f32]) -> Self {
        Self::from(value.to_vec())
    }
}

#[derive(Clone, Copy)]
enum BinaryOp {
    Add,
    Subtract,
}

impl BinaryOp {
    const fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
        }
    }

    #[inline]
    fn apply<T: Add<Output = T> + Sub<Output = T>>(self, a: T, b: T) -> T {
        match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
        }
    }
}

impl AnimationValue {
    /// A value holding nothing.
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self { value: None }
    }

    #[inline]
    #[must_use]
    pub fn new(value: impl Into<Self>) -> Self {
        value.into()
    }

    /// True iff a value is present.
    #[inline]
    #[must_use]
    pub fn is_some(&self) -> bool {
        self.value.is_some()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn into_value(self) -> Option<Value> {
        self.value
    }

    /// Tag name of the held value, or `"empty"`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.value.as_ref().map_or("empty", Value::kind)
    }

    /// Borrows the payload as `T`.
    ///
    /// Fails if the value is empty or holds a different tag.
    pub fn get<T: ValueKind>(&self) -> Result<&T> {
        let value = self.require("read")?;
        T::from_value(value).ok_or(VesperError::TypeMismatch {
            expected: T::KIND,
            found: value.kind(),
        })
    }

    pub fn get_mut<T: ValueKind>(&mut self) -> Result<&mut T> {
        let value = self.value.as_mut().ok_or(VesperError::EmptyValue { operation: "write" })?;
        let found = value.kind();
        T::from_value_mut(value).ok_or(VesperError::TypeMismatch {
            expected: T::KIND,
            found,
        })
    }

    /// Interpolation strategy for the held tag, `None` when empty.
    #[must_use]
    pub fn animation_type(&self) -> Option<AnimationType> {
        Some(match self.value.as_ref()? {
            Value::Bool(_) | Value::String(_) => AnimationType::Discrete,
            Value::Int(_) | Value::Float(_) => AnimationType::Float,
            Value::Size(_) => AnimationType::Size,
            Value::Color3(_) => AnimationType::Color3,
            Value::Color4(_) => AnimationType::Color4,
            Value::Vector2(_) => AnimationType::Vector2,
            Value::Vector3(_) => AnimationType::Vector3,
            Value::Vector4(_) => AnimationType::Vector4,
            Value::Quaternion(_) => AnimationType::Quaternion,
            Value::Matrix(_) => AnimationType::Matrix,
            Value::FloatArray(_) => AnimationType::FloatArray,
        })
    }

    /// Deep copy with an independent lifetime.
    #[inline]
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// `self - from`, componentwise for composite tags.
    pub fn subtract(&self, from: &Self) -> Result<Self> {
        self.combine(from, BinaryOp::Subtract)
    }

    /// `self + other`, componentwise for composite tags.
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.combine(other, BinaryOp::Add)
    }

    /// Multiplies every numeric component by `factor`. Ints are rounded.
    pub fn scale(&self, factor: f32) -> Result<Self> {
        let value = self.require("scale")?;
        Ok(match value {
            Value::Int(v) => Self::from((*v as f32 * factor).round() as i32),
            Value::Float(v) => Self::from(v * factor),
            Value::Size(v) => Self::from(*v * factor),
            Value::Color3(v) => Self::from(*v * factor),
            Value::Color4(v) => Self::from(*v * factor),
            Value::Vector2(v) => Self::from(*v * factor),
            Value::Vector3(v) => Self::from(*v * factor),
            Value::Vector4(v) => Self::from(*v * factor),
            Value::Quaternion(v) => Self::from(*v * factor),
            Value::Matrix(v) => Self::from(*v * factor),
            Value::FloatArray(v) => Self::from(v.iter().map(|x| x * factor).collect::<Vec<_>>()),
            Value::Bool(_) | Value::String(_) => {
                return Err(VesperError::UnsupportedOperation {
                    operation: "scale",
                    kind: value.kind(),
                });
            }
        })
    }

    /// Logical negation; only defined for bools.
    pub fn not(&self) -> Result<Self> {
        match self.require("negate")? {
            Value::Bool(b) => Ok(Self::from(!b)),
            other => Err(VesperError::UnsupportedOperation {
                operation: "!",
                kind: other.kind(),
            }),
        }
    }

    /// Reads a named component (`"x"` of a vector, `"g"` of a color,
    /// `"height"` of a size, or a numeric index into a matrix or float array)
    /// and boxes it as a float value.
    pub fn property(&self, property: &str) -> Result<Self> {
        let value = self.require("index")?;
        let component = match value {
            Value::Vector2(v) => vector_component(&v.to_array(), property),
            Value::Vector3(v) => vector_component(&v.to_array(), property),
            Value::Vector4(v) => vector_component(&v.to_array(), property),
            Value::Quaternion(q) => vector_component(&q.to_array(), property),
            Value::Color3(c) => c.component(property),
            Value::Color4(c) => c.component(property),
            Value::Size(s) => s.component(property),
            Value::Matrix(m) => indexed_component(&m.to_cols_array(), property),
            Value::FloatArray(a) => indexed_component(a, property),
            Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::String(_) => None,
        };
        component.map(Self::from).ok_or_else(|| VesperError::InvalidProperty {
            property: property.to_owned(),
            kind: value.kind(),
        })
    }

    fn require(&self, operation: &'static str) -> Result<&Value> {
        self.value.as_ref().ok_or(VesperError::EmptyValue { operation })
    }

    fn combine(&self, other: &Self, op: BinaryOp) -> Result<Self> {
        let lhs = self.require(op.name())?;
        let rhs = other.require(op.name())?;
        Ok(match (lhs, rhs) {
            (Value::Int(a), Value::Int(b)) => Self::from(match op {
                BinaryOp::Add => a.wrapping_add(*b),
                BinaryOp::Subtract => a.wrapping_sub(*b),
            }),
            (Value::Float(a), Value::Float(b)) => Self::from(op.apply(*a, *b)),
            (Value::Size(a), Value::Size(b)) => Self::from(op.apply(*a, *b)),
            (Value::Color3(a), Value::Color3(b)) => Self::from(op.apply(*a, *b)),
            (Value::Color4(a), Value::Color4(b)) => Self::from(op.apply(*a, *b)),
            (Value::Vector2(a), Value::Vector2(b)) => Self::from(op.apply(*a, *b)),
            (Value::Vector3(a), Value::Vector3(b)) => Self::from(op.apply(*a, *b)),
            (Value::Vector4(a), Value::Vector4(b)) => Self::from(op.apply(*a, *b)),
            (Value::Quaternion(a), Value::Quaternion(b)) => Self::from(op.apply(*a, *b)),
            (Value::Matrix(a), Value::Matrix(b)) => Self::from(op.apply(*a, *b)),
            (Value::FloatArray(a), Value::FloatArray(b)) => {
                if a.len() != b.len() {
                    return Err(VesperError::LengthMismatch {
                        left: a.len(),
                        right: b.len(),
                    });
                }
                Self::from(
                    a.iter()
                        .zip(b)
                        .map(|(x, y)| op.apply(*x, *y))
                        .collect::<Vec<_>>(),
                )
            }
            (Value::Bool(_), Value::Bool(_)) | (Value::String(_), Value::String(_)) => {
                return Err(VesperError::UnsupportedOperation {
                    operation: op.name(),
                    kind: lhs.kind(),
                });
            }
            _ => {
                return Err(VesperError::TypeMismatch {
                    expected: lhs.kind(),
                    found: rhs.kind(),
                });
            }
        })
    }
}

fn vector_component(components: &[f32], property: &str) -> Option<f32> {
    let index = match property {
        "x" => 0,
        "y" => 1,
        "z" => 2,
        "w" => 3,
        _ => return None,
    };
    components.get(index).copied()
}

fn indexed_component(components: &[f32], property: &str) -> Option<f32> {
    let index: usize = property.parse().ok()?;
    components.get(index).copied()
}

impl Sub for &AnimationValue {
    type Output = Result<AnimationValue>;

    fn sub(self, rhs: Self) -> Self::Output {
        self.subtract(rhs)
    }
}

impl Not for &AnimationValue {
    type Output = Result<AnimationValue>;

    fn not(self) -> Self::Output {
        AnimationValue::not(self)
    }
}
