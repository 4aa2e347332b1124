//! Points and general-form lines
//!
//! Lines are kept as `a·x + b·y + c = 0` so that fold and flip axes of any
//! orientation can be mirrored about with the same code.

use super::{Length, Transform};
use crate::types::{ImposeError, Result};

/// A point on paper, coordinates in points with the origin at bottom-left
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self::default()
    }

    pub fn from_lengths(x: Length, y: Length) -> Self {
        Self::new(x.to_pt(), y.to_pt())
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn approx_eq(&self, other: Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

/// A line in general form `a·x + b·y + c = 0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    a: f64,
    b: f64,
    c: f64,
}

impl Line {
    /// Create a line from its coefficients. `a` and `b` must not both be zero.
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self> {
        if !(a.is_finite() && b.is_finite() && c.is_finite()) || (a == 0.0 && b == 0.0) {
            return Err(ImposeError::DegenerateAxis);
        }
        Ok(Self { a, b, c })
    }

    /// The line `y = y0`, parallel to the X axis
    pub fn horizontal(y: Length) -> Self {
        Self {
            a: 0.0,
            b: 1.0,
            c: -y.to_pt(),
        }
    }

    /// The line `x = x0`, parallel to the Y axis
    pub fn vertical(x: Length) -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: -x.to_pt(),
        }
    }

    /// The line through two distinct points
    pub fn through(p: Point, q: Point) -> Result<Self> {
        let a = p.y - q.y;
        let b = q.x - p.x;
        let c = -(a * p.x + b * p.y);
        Self::new(a, b, c)
    }

    pub fn coefficients(&self) -> (f64, f64, f64) {
        (self.a, self.b, self.c)
    }

    pub fn is_parallel_to_x(&self) -> bool {
        self.a == 0.0
    }

    pub fn is_parallel_to_y(&self) -> bool {
        self.b == 0.0
    }

    /// Where the line crosses the X axis, if it does at a single point
    pub fn x_intercept(&self) -> Option<f64> {
        (!self.is_parallel_to_x()).then(|| -self.c / self.a)
    }

    /// Where the line crosses the Y axis, if it does at a single point
    pub fn y_intercept(&self) -> Option<f64> {
        (!self.is_parallel_to_y()).then(|| -self.c / self.b)
    }

    fn evaluate(&self, p: Point) -> f64 {
        self.a * p.x + self.b * p.y + self.c
    }

    /// Distance from the line, positive on the side the normal `(a, b)` points to
    pub fn signed_distance(&self, p: Point) -> f64 {
        self.evaluate(p) / self.a.hypot(self.b)
    }

    /// Whether both points lie strictly on the same side of the line
    pub fn same_side(&self, p: Point, q: Point) -> bool {
        let (sp, sq) = (self.evaluate(p), self.evaluate(q));
        (sp > 0.0 && sq > 0.0) || (sp < 0.0 && sq < 0.0)
    }

    /// The reflection about this line
    pub fn mirror_transform(&self) -> Transform {
        if self.is_parallel_to_x() {
            let y0 = -self.c / self.b;
            Transform::new(1.0, 0.0, 0.0, -1.0, 0.0, 2.0 * y0)
        } else if self.is_parallel_to_y() {
            let x0 = -self.c / self.a;
            Transform::new(-1.0, 0.0, 0.0, 1.0, 2.0 * x0, 0.0)
        } else {
            let (a, b, c) = (self.a, self.b, self.c);
            let n = a * a + b * b;
            Transform::new(
                1.0 - 2.0 * a * a / n,
                -2.0 * a * b / n,
                -2.0 * a * b / n,
                1.0 - 2.0 * b * b / n,
                -2.0 * a * c / n,
                -2.0 * b * c / n,
            )
        }
    }
}
