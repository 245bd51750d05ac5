//! Geometry primitives
//!
//! Only what view presentation needs: a point and a 2D affine transform.

/// A 2D point in logical pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 2D affine transformation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2D {
    /// Matrix elements [a, b, c, d, tx, ty]
    /// | a  c  tx |
    /// | b  d  ty |
    /// | 0  0   1 |
    pub elements: [f32; 6],
}

impl Default for Affine2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine2D {
    pub const IDENTITY: Affine2D = Affine2D {
        elements: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    pub fn translation(x: f32, y: f32) -> Self {
        Self {
            elements: [1.0, 0.0, 0.0, 1.0, x, y],
        }
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self {
            elements: [sx, 0.0, 0.0, sy, 0.0, 0.0],
        }
    }

    /// Horizontal translation component
    pub fn tx(&self) -> f32 {
        self.elements[4]
    }

    /// Vertical translation component
    pub fn ty(&self) -> f32 {
        self.elements[5]
    }

    /// Axis scale factors, assuming no rotation or skew
    pub fn scale_factors(&self) -> (f32, f32) {
        (self.elements[0], self.elements[3])
    }

    pub fn is_identity(&self) -> bool {
        self.approx_eq(&Self::IDENTITY, 1e-6)
    }

    /// Element-wise comparison within `epsilon`
    pub fn approx_eq(&self, other: &Affine2D, epsilon: f32) -> bool {
        self.elements
            .iter()
            .zip(other.elements.iter())
            .all(|(a, b)| (a - b).abs() < epsilon)
    }

    pub fn transform_point(&self, point: Point) -> Point {
        let [a, b, c, d, tx, ty] = self.elements;
        Point::new(
            a * point.x + c * point.y + tx,
            b * point.x + d * point.y + ty,
        )
    }

    /// Concatenate this transform with another (self * other)
    /// The resulting transform first applies `other`, then `self`.
    pub fn then(&self, other: &Affine2D) -> Affine2D {
        let [a1, b1, c1, d1, tx1, ty1] = self.elements;
        let [a2, b2, c2, d2, tx2, ty2] = other.elements;

        Affine2D {
            elements: [
                a1 * a2 + c1 * b2,
                b1 * a2 + d1 * b2,
                a1 * c2 + c1 * d2,
                b1 * c2 + d1 * d2,
                a1 * tx2 + c1 * ty2 + tx1,
                b1 * tx2 + d1 * ty2 + ty1,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_after_scale_keeps_offset() {
        let t = Affine2D::translation(0.0, -100.0).then(&Affine2D::scale(0.9, 0.9));
        assert_eq!(t.ty(), -100.0);
        assert_eq!(t.tx(), 0.0);
        assert_eq!(t.scale_factors(), (0.9, 0.9));
    }

    #[test]
    fn test_scale_after_translate_scales_offset() {
        let t = Affine2D::scale(0.9, 0.9).then(&Affine2D::translation(0.0, -100.0));
        assert!((t.ty() + 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_transform_point() {
        let t = Affine2D::translation(10.0, -5.0);
        let p = t.transform_point(Point::new(1.0, 2.0));
        assert_eq!(p, Point::new(11.0, -3.0));
    }

    #[test]
    fn test_identity() {
        assert!(Affine2D::default().is_identity());
        assert!(!Affine2D::translation(0.0, 1.0).is_identity());
    }
}
