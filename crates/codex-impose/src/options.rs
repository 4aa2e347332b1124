use crate::geometry::{Dimensions, Length};
use crate::model::{GridLayout, GridOrder, ReadingDirection};
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

fn positive_dimensions(what: &str, width: Length, height: Length) -> Result<Dimensions> {
    if width <= Length::ZERO || height <= Length::ZERO {
        return Err(ImposeError::Config(format!(
            "{} must be larger than zero, got {} x {}",
            what, width, height
        )));
    }
    Dimensions::new(width, height)
}

// =============================================================================
// Booklet
// =============================================================================

/// Saddle-stitched booklet configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct BookletOptions {
    // Size of one booklet page; a sheet holds two
    pub page_width: Length,
    pub page_height: Length,

    /// Content pages, 0 to take every page of the sources
    pub page_count: usize,

    pub binding: Binding,
    /// Turn the verso of every leaf by 180° (head-to-head printing)
    pub verso_opposite: bool,

    // Flyleaves (each flyleaf = 1 leaf = 2 blank pages)
    pub front_flyleaves: usize,
    pub back_flyleaves: usize,

    pub fold_marks: bool,
    pub scaling: ScalingMode,
}

impl Default for BookletOptions {
    fn default() -> Self {
        let (w, h) = PaperSize::A5.dimensions_mm();
        Self {
            page_width: Length::mm(w),
            page_height: Length::mm(h),
            page_count: 0,
            binding: Binding::Vertical,
            verso_opposite: false,
            front_flyleaves: 0,
            back_flyleaves: 0,
            fold_marks: false,
            scaling: ScalingMode::Fit,
        }
    }
}

impl BookletOptions {
    pub fn page_dimensions(&self) -> Result<Dimensions> {
        positive_dimensions("Booklet page", self.page_width, self.page_height)
    }

    /// Blank pages contributed by flyleaves
    pub fn flyleaf_pages(&self) -> usize {
        crate::constants::PAGES_PER_LEAF * (self.front_flyleaves + self.back_flyleaves)
    }

    pub fn validate(&self) -> Result<()> {
        self.page_dimensions()?;
        Ok(())
    }
}

// =============================================================================
// N-up
// =============================================================================

/// Grid imposition configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct NUpOptions {
    pub sheet_width: Length,
    pub sheet_height: Length,

    pub rows: usize,
    pub columns: usize,
    /// Output sides, or as many as the sources need
    pub page_count: Option<usize>,

    pub order: GridOrder,
    pub direction: ReadingDirection,
    pub rotated: bool,

    pub scaling: ScalingMode,
    pub cut_marks: bool,
}

impl Default for NUpOptions {
    fn default() -> Self {
        let (w, h) = PaperSize::A4.dimensions_mm();
        Self {
            sheet_width: Length::mm(w),
            sheet_height: Length::mm(h),
            rows: 2,
            columns: 2,
            page_count: None,
            order: GridOrder::RowMajor,
            direction: ReadingDirection::LeftToRight,
            rotated: false,
            scaling: ScalingMode::Fit,
            cut_marks: false,
        }
    }
}

impl NUpOptions {
    pub fn sheet_dimensions(&self) -> Result<Dimensions> {
        positive_dimensions("N-up sheet", self.sheet_width, self.sheet_height)
    }

    pub fn layout(&self) -> GridLayout {
        GridLayout {
            order: self.order,
            direction: self.direction,
            rotated: self.rotated,
            ..GridLayout::new(self.rows, self.columns)
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.sheet_dimensions()?;

        if self.rows == 0 || self.columns == 0 {
            return Err(ImposeError::Config(format!(
                "Grid needs at least one row and column, got {} x {}",
                self.rows, self.columns
            )));
        }

        if self.page_count == Some(0) {
            return Err(ImposeError::Config(
                "Explicit page count must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Overlay
// =============================================================================

/// Configuration for merging several documents page by page
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct OverlayOptions {
    pub width: Length,
    pub height: Length,

    /// Stacked layers per page, 0 for one per source document
    pub layers: usize,
    /// Output pages, or as many as the longest source
    pub page_count: Option<usize>,

    pub scaling: ScalingMode,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        let (w, h) = PaperSize::A4.dimensions_mm();
        Self {
            width: Length::mm(w),
            height: Length::mm(h),
            layers: 0,
            page_count: None,
            scaling: ScalingMode::Fit,
        }
    }
}

impl OverlayOptions {
    pub fn page_dimensions(&self) -> Result<Dimensions> {
        positive_dimensions("Overlay page", self.width, self.height)
    }

    pub fn validate(&self) -> Result<()> {
        self.page_dimensions()?;

        if self.page_count == Some(0) {
            return Err(ImposeError::Config(
                "Explicit page count must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Scheme selection
// =============================================================================

/// Imposition configuration: one of the supported schemes
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(tag = "scheme", rename_all = "snake_case")
)]
pub enum ImpositionOptions {
    Booklet(BookletOptions),
    #[cfg_attr(feature = "serde", serde(rename = "nup"))]
    NUp(NUpOptions),
    Overlay(OverlayOptions),
}

impl Default for ImpositionOptions {
    fn default() -> Self {
        ImpositionOptions::Booklet(BookletOptions::default())
    }
}

impl ImpositionOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ImposeError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ImposeError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        match self {
            ImpositionOptions::Booklet(options) => options.validate(),
            ImpositionOptions::NUp(options) => options.validate(),
            ImpositionOptions::Overlay(options) => options.validate(),
        }
    }

    pub fn scheme_name(&self) -> &'static str {
        match self {
            ImpositionOptions::Booklet(_) => "booklet",
            ImpositionOptions::NUp(_) => "nup",
            ImpositionOptions::Overlay(_) => "overlay",
        }
    }

    /// Options with every "take it from the sources" setting replaced by
    /// the value the given sources imply
    pub fn resolve_for(&self, source_page_counts: &[usize]) -> ImpositionOptions {
        let mut resolved = self.clone();
        match &mut resolved {
            ImpositionOptions::Booklet(options) => {
                if options.page_count == 0 {
                    options.page_count = source_page_counts.iter().sum();
                }
            }
            ImpositionOptions::NUp(_) => {}
            ImpositionOptions::Overlay(options) => {
                if options.layers == 0 {
                    options.layers = source_page_counts.len();
                }
            }
        }
        resolved
    }
}
