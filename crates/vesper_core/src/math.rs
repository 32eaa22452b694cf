//! Math value types
//!
//! Vectors, quaternions and matrices come from `glam`. This module adds the
//! few value types the animation system distinguishes by tag even though
//! they share a layout with a glam vector: RGB and RGBA colors, and a 2D size.

use std::ops::{Add, Mul, Neg, Sub};

pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

macro_rules! componentwise_type {
    (
        $(#[$meta:meta])*
        struct $name:ident { $($field:ident),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Default)]
        pub struct $name {
            $(pub $field: f32,)+
        }

        impl $name {
            #[inline]
            #[must_use]
            pub const fn new($($field: f32),+) -> Self {
                Self { $($field),+ }
            }

            /// Linear interpolation between `self` and `to`.
            #[inline]
            #[must_use]
            pub fn lerp(self, to: Self, t: f32) -> Self {
                Self { $($field: self.$field + (to.$field - self.$field) * t),+ }
            }

            /// Looks up a component by its field name.
            #[must_use]
            pub fn component(&self, name: &str) -> Option<f32> {
                match name {
                    $(stringify!($field) => Some(self.$field),)+
                    _ => None,
                }
            }
        }

        impl Add for $name {
            type Output = Self;
            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self { $($field: self.$field + rhs.$field),+ }
            }
        }

        impl Sub for $name {
            type Output = Self;
            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self { $($field: self.$field - rhs.$field),+ }
            }
        }

        impl Mul<f32> for $name {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: f32) -> Self {
                Self { $($field: self.$field * rhs),+ }
            }
        }

        impl Neg for $name {
            type Output = Self;
            #[inline]
            fn neg(self) -> Self {
                Self { $($field: -self.$field),+ }
            }
        }
    };
}

componentwise_type!(
    /// Linear RGB color.
    struct Color3 { r, g, b }
);

componentwise_type!(
    /// Linear RGBA color.
    struct Color4 { r, g, b, a }
);

componentwise_type!(
    /// Width/height pair (render target sizes, sprite sizes).
    struct Size { width, height }
);

impl Color3 {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
}

impl Color4 {
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
}

impl From<Color3> for Vec3 {
    fn from(c: Color3) -> Self {
        Vec3::new(c.r, c.g, c.b)
    }
}

impl From<Color4> for Vec4 {
    fn from(c: Color4) -> Self {
        Vec4::new(c.r, c.g, c.b, c.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn componentwise_arithmetic() {
        let a = Color3::new(0.5, 0.25, 1.0);
        let b = Color3::new(0.25, 0.25, 0.5);
        assert_eq!(a - b, Color3::new(0.25, 0.0, 0.5));
        assert_eq!(a + b, Color3::new(0.75, 0.5, 1.5));
        assert_eq!(b * 2.0, Color3::new(0.5, 0.5, 1.0));
    }

    #[test]
    fn component_lookup_by_name() {
        let size = Size::new(640.0, 480.0);
        assert_eq!(size.component("width"), Some(640.0));
        assert_eq!(size.component("height"), Some(480.0));
        assert_eq!(size.component("x"), None);
    }
}
