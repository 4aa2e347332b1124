use thiserror::Error;

use crate::geometry::{Dimensions, Length};

#[derive(Error, Debug)]
pub enum ImposeError {
    #[cfg(feature = "pdf")]
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No pages to impose")]
    NoPages,
    #[error("Gather needs at least one copy, got {count}")]
    InvalidGather { count: usize },
    #[error("No leaf order set and none supplied for numbering")]
    MissingLeafOrder,
    #[error("Page numbers start at 1, got {0}")]
    InvalidPageNumber(u32),
    #[error("Page is already numbered {current}, cannot renumber it as {requested}")]
    PageAlreadyNumbered { current: u32, requested: u32 },
    #[error("Numbering {pages} pages from {start} runs past the largest page number")]
    PageNumberOverflow { start: u32, pages: usize },
    #[error("Multi-page slots are abstract; fill a grid or stacked page instead")]
    AbstractPage,
    #[error("{0} pages cannot be filled from layered sources")]
    UnsupportedPage(&'static str),
    #[error("Degenerate axis: both line coefficients are zero")]
    DegenerateAxis,
    #[error("Transform is not invertible")]
    SingularTransform,
    #[error("Invalid dimensions {width} x {height}")]
    InvalidDimensions { width: f64, height: f64 },
}

pub type Result<T> = std::result::Result<T, ImposeError>;

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A3,
    A4,
    #[default]
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_mm: f64, height_mm: f64 },
}

impl PaperSize {
    /// Get base dimensions (always portrait: width < height for standard sizes)
    pub fn dimensions_mm(self) -> (f64, f64) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Tabloid => (279.4, 431.8),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Portrait dimensions
    pub fn dimensions(self) -> Result<Dimensions> {
        let (w, h) = self.dimensions_mm();
        Dimensions::new(Length::mm(w), Length::mm(h))
    }

    /// Landscape dimensions
    pub fn landscape(self) -> Result<Dimensions> {
        Ok(self.dimensions()?.swapped())
    }
}

/// Spine position of a bound volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Binding {
    /// Spine runs vertically along the left edge; pages turn like a book
    #[default]
    Vertical,
    /// Spine runs horizontally along the top edge; pages turn like a wall calendar
    Horizontal,
}

/// Page scaling behavior when source pages don't match the slot size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScalingMode {
    /// Fit page to available space (preserve aspect ratio)
    #[default]
    Fit,
    /// Fill available space (may crop)
    Fill,
    /// Center without scaling
    None,
    /// Stretch to fill (ignore aspect ratio)
    Stretch,
}

impl ScalingMode {
    /// Scale factors (x, y) that take a `source` sized box into a `target` sized box.
    pub fn scale_factors(
        self,
        source_width: f64,
        source_height: f64,
        target_width: f64,
        target_height: f64,
    ) -> (f64, f64) {
        if source_width <= 0.0 || source_height <= 0.0 {
            return (1.0, 1.0);
        }

        let scale_w = target_width / source_width;
        let scale_h = target_height / source_height;
        match self {
            ScalingMode::Fit => {
                let s = scale_w.min(scale_h);
                (s, s)
            }
            ScalingMode::Fill => {
                let s = scale_w.max(scale_h);
                (s, s)
            }
            ScalingMode::None => (1.0, 1.0),
            ScalingMode::Stretch => (scale_w, scale_h),
        }
    }
}

/// Statistics about the imposition
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpositionStatistics {
    /// Total number of source pages
    pub source_pages: usize,
    /// Total number of physical output sheets
    pub output_sheets: usize,
    /// Number of signatures (booklets only)
    pub signatures: Option<usize>,
    /// Output page count (sheet sides)
    pub output_pages: usize,
    /// Number of blank pages added for padding
    pub blank_pages_added: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_fit() {
        // Source is 800x600, target is 400x400
        let (sx, sy) = ScalingMode::Fit.scale_factors(800.0, 600.0, 400.0, 400.0);
        assert!((sx - 0.5).abs() < 1e-9);
        assert_eq!(sx, sy);

        let (sx, _) = ScalingMode::Fit.scale_factors(400.0, 800.0, 400.0, 400.0);
        assert!((sx - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_scale_fill_and_stretch() {
        let (sx, sy) = ScalingMode::Fill.scale_factors(800.0, 600.0, 400.0, 400.0);
        assert!((sx - 400.0 / 600.0).abs() < 1e-9);
        assert_eq!(sx, sy);

        let (sx, sy) = ScalingMode::Stretch.scale_factors(800.0, 600.0, 400.0, 400.0);
        assert!((sx - 0.5).abs() < 1e-9);
        assert!((sy - 400.0 / 600.0).abs() < 1e-9);
    }

    #[test]
    fn test_paper_sizes() {
        let a4 = PaperSize::A4.dimensions().unwrap();
        assert!((a4.width().to_mm() - 210.0).abs() < 1e-9);
        assert!(PaperSize::A4.landscape().unwrap().is_landscape());

        let custom = PaperSize::Custom {
            width_mm: 100.0,
            height_mm: 50.0,
        };
        assert_eq!(custom.dimensions_mm(), (100.0, 50.0));
        assert!(
            PaperSize::Custom {
                width_mm: -1.0,
                height_mm: 50.0
            }
            .dimensions()
            .is_err()
        );
    }

    #[test]
    fn test_scale_degenerate_source() {
        assert_eq!(
            ScalingMode::Fit.scale_factors(0.0, 600.0, 400.0, 400.0),
            (1.0, 1.0)
        );
    }
}
