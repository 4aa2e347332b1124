//! 2D affine transforms
//!
//! Matrices use the PDF layout `[a b c d e f]`:
//! ```text
//! | a  b  0 |
//! | c  d  0 |
//! | e  f  1 |
//! ```
//! A point maps as `(x', y') = (a·x + c·y + e, b·x + d·y + f)`.

use super::{Angle, Length, Line, Point};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn translate(dx: Length, dy: Length) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, dx.to_pt(), dy.to_pt())
    }

    /// Counter-clockwise rotation about the origin
    pub fn rotate(angle: Angle) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Counter-clockwise rotation about `center`
    pub fn rotate_about(angle: Angle, center: Point) -> Self {
        let to_origin = Self::new(1.0, 0.0, 0.0, 1.0, -center.x, -center.y);
        let back = Self::new(1.0, 0.0, 0.0, 1.0, center.x, center.y);
        to_origin.then(&Self::rotate(angle)).then(&back)
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Reflection about `axis`
    pub fn mirror(axis: &Line) -> Self {
        axis.mirror_transform()
    }

    /// Composition: apply `self` first, then `next`
    pub fn then(&self, next: &Transform) -> Transform {
        Transform {
            a: self.a * next.a + self.b * next.c,
            b: self.a * next.b + self.b * next.d,
            c: self.c * next.a + self.d * next.c,
            d: self.c * next.b + self.d * next.d,
            e: self.e * next.a + self.f * next.c + next.e,
            f: self.e * next.b + self.f * next.d + next.f,
        }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point {
            x: self.a * p.x + self.c * p.y + self.e,
            y: self.b * p.x + self.d * p.y + self.f,
        }
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Whether the transform reverses orientation (shows the reverse side)
    pub fn is_mirrored(&self) -> bool {
        self.determinant() < 0.0
    }

    pub fn inverse(&self) -> Option<Transform> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }

        let a = self.d / det;
        let b = -self.b / det;
        let c = -self.c / det;
        let d = self.a / det;
        Some(Transform {
            a,
            b,
            c,
            d,
            e: -(self.e * a + self.f * c),
            f: -(self.e * b + self.f * d),
        })
    }

    /// Component-wise comparison with an explicit tolerance
    pub fn approx_eq(&self, other: &Transform, tolerance: f64) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .all(|(x, y)| (x - y).abs() <= tolerance)
    }

    /// Matrix in PDF `cm` operand order
    pub fn to_array(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GEOMETRY_TOLERANCE;

    #[test]
    fn test_then_applies_left_first() {
        let t = Transform::translate(Length::pt(10.0), Length::ZERO);
        let s = Transform::scale(2.0, 2.0);

        // translate then scale: (1, 1) -> (11, 1) -> (22, 2)
        let p = t.then(&s).apply(Point::new(1.0, 1.0));
        assert_eq!(p, Point::new(22.0, 2.0));

        // scale then translate: (1, 1) -> (2, 2) -> (12, 2)
        let p = s.then(&t).apply(Point::new(1.0, 1.0));
        assert_eq!(p, Point::new(12.0, 2.0));
    }

    #[test]
    fn test_rotation() {
        let r = Transform::rotate(Angle::degrees(90.0));
        let p = r.apply(Point::new(1.0, 0.0));
        assert!(p.approx_eq(Point::new(0.0, 1.0), 1e-12));

        let r = Transform::rotate_about(Angle::degrees(180.0), Point::new(5.0, 5.0));
        let p = r.apply(Point::new(6.0, 5.0));
        assert!(p.approx_eq(Point::new(4.0, 5.0), 1e-12));
    }

    #[test]
    fn test_inverse_roundtrip() {
        let t = Transform::rotate(Angle::degrees(30.0))
            .then(&Transform::scale(2.0, 3.0))
            .then(&Transform::translate(Length::pt(4.0), Length::pt(-7.0)));
        let inv = t.inverse().unwrap();
        assert!(t.then(&inv).approx_eq(&Transform::IDENTITY, GEOMETRY_TOLERANCE));
        assert!(inv.then(&t).approx_eq(&Transform::IDENTITY, GEOMETRY_TOLERANCE));

        assert!(Transform::scale(0.0, 1.0).inverse().is_none());
    }

    #[test]
    fn test_mirror_involution() {
        let axes = [
            Line::horizontal(Length::pt(12.5)),
            Line::vertical(Length::pt(-3.0)),
            Line::new(0.3, -1.7, 4.2).unwrap(),
        ];
        let t = Transform::rotate(Angle::degrees(17.0))
            .then(&Transform::translate(Length::pt(3.0), Length::pt(9.0)));

        for axis in &axes {
            let m = Transform::mirror(axis);
            let twice = t.then(&m).then(&m);
            assert!(twice.approx_eq(&t, 1e-9), "axis {axis:?}");
            assert!(m.is_mirrored());
        }
    }
}
