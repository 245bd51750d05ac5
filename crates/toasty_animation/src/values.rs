//! Animatable value types
//!
//! Linear interpolation for the properties a toast animates: scalars
//! (opacity, vertical origin) and affine transforms.

use toasty_core::Affine2D;

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are approximately equal
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

impl Interpolate for Affine2D {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        let mut elements = [0.0; 6];
        for (i, out) in elements.iter_mut().enumerate() {
            *out = Interpolate::lerp(&self.elements[i], &other.elements[i], t);
        }
        Affine2D { elements }
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        Affine2D::approx_eq(self, other, epsilon)
    }
}

/// A from/to pair sampled by eased progress
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween<T: Interpolate> {
    pub from: T,
    pub to: T,
}

impl<T: Interpolate> Tween<T> {
    pub fn new(from: T, to: T) -> Self {
        Self { from, to }
    }

    /// Value at progress `t`
    pub fn at(&self, t: f32) -> T {
        self.from.lerp(&self.to, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_lerp() {
        assert_eq!(Interpolate::lerp(&0.0f32, &1.0, 0.25), 0.25);
        assert!(Interpolate::approx_eq(&10.0f32, &10.0005, 0.001));
    }

    #[test]
    fn test_transform_tween() {
        let hidden = Affine2D::translation(0.0, -100.0).then(&Affine2D::scale(0.9, 0.9));
        let tween = Tween::new(hidden, Affine2D::IDENTITY);

        assert_eq!(tween.at(0.0), hidden);
        assert!(tween.at(1.0).is_identity());

        let mid = tween.at(0.5);
        assert!((mid.ty() + 50.0).abs() < 1e-4);
        assert!((mid.scale_factors().0 - 0.95).abs() < 1e-4);
    }
}
