//! Unit-safe scalars
//!
//! Lengths are normalized to PostScript points and angles to radians.
//! Conversions happen on construction and on read, so comparisons always
//! operate on the normalized value.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

use crate::constants::{POINTS_PER_INCH, mm_to_pt, pt_to_mm};
use crate::types::{ImposeError, Result};

// =============================================================================
// Length
// =============================================================================

/// A length on paper, stored in points
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Length(f64);

impl Length {
    pub const ZERO: Length = Length(0.0);

    pub fn pt(value: f64) -> Self {
        Self(value)
    }

    pub fn mm(value: f64) -> Self {
        Self(mm_to_pt(value))
    }

    pub fn cm(value: f64) -> Self {
        Self(mm_to_pt(value * 10.0))
    }

    pub fn inches(value: f64) -> Self {
        Self(value * POINTS_PER_INCH)
    }

    pub fn to_pt(self) -> f64 {
        self.0
    }

    pub fn to_mm(self) -> f64 {
        pt_to_mm(self.0)
    }

    pub fn to_inches(self) -> f64 {
        self.0 / POINTS_PER_INCH
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn min(self, other: Length) -> Self {
        Self(self.0.min(other.0))
    }

    pub fn max(self, other: Length) -> Self {
        Self(self.0.max(other.0))
    }

    /// Compare with an explicit tolerance
    pub fn approx_eq(self, other: Length, tolerance: Length) -> bool {
        (self.0 - other.0).abs() <= tolerance.0
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}pt", self.0)
    }
}

impl Add for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl AddAssign for Length {
    fn add_assign(&mut self, rhs: Length) {
        self.0 += rhs.0;
    }
}

impl Sub for Length {
    type Output = Length;

    fn sub(self, rhs: Length) -> Length {
        Length(self.0 - rhs.0)
    }
}

impl Neg for Length {
    type Output = Length;

    fn neg(self) -> Length {
        Length(-self.0)
    }
}

impl Mul<f64> for Length {
    type Output = Length;

    fn mul(self, rhs: f64) -> Length {
        Length(self.0 * rhs)
    }
}

impl Div<f64> for Length {
    type Output = Length;

    fn div(self, rhs: f64) -> Length {
        Length(self.0 / rhs)
    }
}

/// Ratio of two lengths
impl Div for Length {
    type Output = f64;

    fn div(self, rhs: Length) -> f64 {
        self.0 / rhs.0
    }
}

// =============================================================================
// Angle
// =============================================================================

/// An angle, stored in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Angle(f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);

    pub fn radians(value: f64) -> Self {
        Self(value)
    }

    pub fn degrees(value: f64) -> Self {
        Self(value.to_radians())
    }

    pub fn to_radians(self) -> f64 {
        self.0
    }

    pub fn to_degrees(self) -> f64 {
        self.0.to_degrees()
    }

    pub fn sin_cos(self) -> (f64, f64) {
        self.0.sin_cos()
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        Angle(self.0 + rhs.0)
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle(-self.0)
    }
}

// =============================================================================
// Dimensions
// =============================================================================

/// Width × height of a page, leaf or sheet. Both are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    width: Length,
    height: Length,
}

impl Dimensions {
    pub fn new(width: Length, height: Length) -> Result<Self> {
        let (w, h) = (width.to_pt(), height.to_pt());
        if !(w.is_finite() && h.is_finite()) || w < 0.0 || h < 0.0 {
            return Err(ImposeError::InvalidDimensions {
                width: w,
                height: h,
            });
        }
        Ok(Self { width, height })
    }

    /// Dimensions in points
    pub fn from_pt(width: f64, height: f64) -> Result<Self> {
        Self::new(Length::pt(width), Length::pt(height))
    }

    /// Dimensions computed from already validated ones (halving, splitting, swapping)
    pub(crate) fn derived(width: Length, height: Length) -> Self {
        debug_assert!(width >= Length::ZERO && height >= Length::ZERO);
        Self { width, height }
    }

    pub fn width(&self) -> Length {
        self.width
    }

    pub fn height(&self) -> Length {
        self.height
    }

    /// Width and height exchanged (a quarter turn)
    pub fn swapped(&self) -> Self {
        Self::derived(self.height, self.width)
    }

    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }

    /// Size of one cell when this area is split into `columns` × `rows`
    pub fn split(&self, columns: usize, rows: usize) -> Self {
        Self::derived(
            self.width / columns.max(1) as f64,
            self.height / rows.max(1) as f64,
        )
    }

    /// This area repeated `columns` times across and `rows` times down
    pub fn tiled(&self, columns: usize, rows: usize) -> Self {
        Self::derived(self.width * columns as f64, self.height * rows as f64)
    }

    pub fn approx_eq(&self, other: &Dimensions, tolerance: Length) -> bool {
        self.width.approx_eq(other.width, tolerance)
            && self.height.approx_eq(other.height, tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_units_normalize() {
        let inch = Length::inches(1.0);
        assert_eq!(inch.to_pt(), 72.0);
        assert!(Length::mm(25.4).approx_eq(inch, Length::pt(1e-9)));
        assert!(Length::cm(2.54).approx_eq(inch, Length::pt(1e-9)));
        assert!((Length::pt(72.0).to_mm() - 25.4).abs() < 1e-9);
    }

    #[test]
    fn test_length_ordering_uses_normalized_value() {
        assert!(Length::mm(10.0) > Length::pt(28.0));
        assert!(Length::mm(10.0) < Length::pt(29.0));
        assert_eq!(Length::pt(10.0) + Length::pt(5.0), Length::pt(15.0));
        assert_eq!(Length::pt(10.0) / Length::pt(4.0), 2.5);
    }

    #[test]
    fn test_angle_conversion() {
        let right = Angle::degrees(90.0);
        assert!((right.to_radians() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((right.to_degrees() - 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_dimensions_reject_negative() {
        assert!(Dimensions::from_pt(-1.0, 10.0).is_err());
        assert!(Dimensions::from_pt(10.0, f64::NAN).is_err());
        assert!(Dimensions::from_pt(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_dimensions_split_and_swap() {
        let page = Dimensions::from_pt(600.0, 800.0).unwrap();
        let cell = page.split(2, 4);
        assert_eq!(cell.width(), Length::pt(300.0));
        assert_eq!(cell.height(), Length::pt(200.0));

        let swapped = cell.swapped();
        assert_eq!(swapped.width(), Length::pt(200.0));
        assert!(!page.is_landscape());
        assert!(page.swapped().is_landscape());
        assert_eq!(page.tiled(2, 1).width(), Length::pt(1200.0));
    }
}
