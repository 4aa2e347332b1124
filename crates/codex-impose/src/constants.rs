//! Shared constants for imposition
//!
//! This module centralizes magic numbers and constants used throughout
//! the imposition model.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f64 = 72.0 / 25.4;

/// Points per inch
pub const POINTS_PER_INCH: f64 = 72.0;

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f64) -> f64 {
    mm * POINTS_PER_MM
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f64) -> f64 {
    pt / POINTS_PER_MM
}

// =============================================================================
// Default Page Dimensions
// =============================================================================

/// Default page width in points (US Letter: 8.5" × 11")
pub const DEFAULT_PAGE_WIDTH_PT: f64 = 612.0;

/// Default page height in points (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f64 = 792.0;

/// Default page dimensions as tuple (width, height)
pub const DEFAULT_PAGE_DIMENSIONS: (f64, f64) = (DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT);

// =============================================================================
// Geometry
// =============================================================================

/// Tolerance used when comparing transforms produced by fold simulation
pub const GEOMETRY_TOLERANCE: f64 = 1e-9;

// =============================================================================
// Leaves and Sheets
// =============================================================================

/// Pages per leaf (recto and verso)
pub const PAGES_PER_LEAF: usize = 2;

/// Pages carried by one folded sheet of a saddle-stitched booklet
pub const PAGES_PER_BOOKLET_SHEET: usize = 4;
