//! Page slots
//!
//! A [`Page`] is a slot for content with a size and, once its signature has
//! been numbered, a page number. What the slot holds depends on its kind:
//! - [`SinglePage`]: one content slot covering the whole page
//! - [`MultiPage`]: independently positioned [`Pagelet`]s. Abstract: a
//!   source provider refuses to fill it directly.
//! - [`GridPage`]: pagelets generated on a regular `rows × columns` grid
//! - [`StackedPage`]: pagelets all covering the full page, one per overlay layer

use crate::content::{Content, SharedContent};
use crate::geometry::{Angle, Dimensions, Length, Point, Transform};
use crate::types::{ImposeError, Result, ScalingMode};

use super::{GridLayout, GridPosition};

/// Transform fitting content of `content` size into a slot of `slot` size,
/// centered in the slot
pub(crate) fn fit_into(content: Dimensions, slot: Dimensions, mode: ScalingMode) -> Transform {
    let (sx, sy) = mode.scale_factors(
        content.width().to_pt(),
        content.height().to_pt(),
        slot.width().to_pt(),
        slot.height().to_pt(),
    );
    let dx = (slot.width() - content.width() * sx) / 2.0;
    let dy = (slot.height() - content.height() * sy) / 2.0;
    Transform::scale(sx, sy).then(&Transform::translate(dx, dy))
}

/// `number` as a page number, if it fits the page number range
pub fn page_number(number: usize) -> Result<u32> {
    u32::try_from(number).map_err(|_| ImposeError::PageNumberOverflow {
        start: 1,
        pages: number,
    })
}

fn render_slot(
    content: Option<&SharedContent>,
    slot: Dimensions,
    scaling: ScalingMode,
    placement: &Transform,
) -> Vec<Content> {
    match content {
        Some(content) => {
            let outer = fit_into(content.dimensions(), slot, scaling).then(placement);
            content.placed(&outer).collect()
        }
        None => Vec::new(),
    }
}

// =============================================================================
// Page variants
// =============================================================================

/// One content slot covering the whole page
#[derive(Debug, Clone, Default)]
pub struct SinglePage {
    content: Option<SharedContent>,
    pub scaling: ScalingMode,
}

impl SinglePage {
    pub fn content(&self) -> Option<&SharedContent> {
        self.content.as_ref()
    }

    pub fn set_content(&mut self, content: Option<SharedContent>) {
        self.content = content;
    }
}

/// An independently positioned content slot inside a page
#[derive(Debug, Clone)]
pub struct Pagelet {
    dimensions: Dimensions,
    /// Maps pagelet coordinates into page coordinates
    placement: Transform,
    content: Option<SharedContent>,
    position: Option<GridPosition>,
    pub scaling: ScalingMode,
}

impl Pagelet {
    pub fn new(dimensions: Dimensions, placement: Transform) -> Self {
        Self {
            dimensions,
            placement,
            content: None,
            position: None,
            scaling: ScalingMode::default(),
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn placement(&self) -> &Transform {
        &self.placement
    }

    /// Grid cell this pagelet occupies, if it belongs to a grid
    pub fn position(&self) -> Option<GridPosition> {
        self.position
    }

    pub fn content(&self) -> Option<&SharedContent> {
        self.content.as_ref()
    }

    pub fn set_content(&mut self, content: Option<SharedContent>) {
        self.content = content;
    }

    pub fn is_blank(&self) -> bool {
        self.content.is_none()
    }

    /// Content placed in page coordinates
    pub fn render(&self) -> Vec<Content> {
        render_slot(
            self.content.as_ref(),
            self.dimensions,
            self.scaling,
            &self.placement,
        )
    }
}

/// A page holding arbitrary pagelets
#[derive(Debug, Clone, Default)]
pub struct MultiPage {
    pagelets: Vec<Pagelet>,
}

impl MultiPage {
    pub fn new(pagelets: Vec<Pagelet>) -> Self {
        Self { pagelets }
    }

    pub fn pagelets(&self) -> &[Pagelet] {
        &self.pagelets
    }

    pub fn pagelets_mut(&mut self) -> &mut [Pagelet] {
        &mut self.pagelets
    }
}

/// Pagelets arranged on a regular grid, stored in traversal order
#[derive(Debug, Clone)]
pub struct GridPage {
    layout: GridLayout,
    pagelets: Vec<Pagelet>,
}

impl GridPage {
    fn new(page: Dimensions, layout: GridLayout, scaling: ScalingMode) -> Self {
        let size = layout.pagelet_dimensions(page);
        let half_w = -(size.width() / 2.0);
        let half_h = -(size.height() / 2.0);
        let turn = if layout.rotated {
            Transform::rotate(Angle::degrees(90.0))
        } else {
            Transform::IDENTITY
        };

        let pagelets = layout
            .positions()
            .into_iter()
            .map(|pos| {
                let Point { x, y } = layout.cell_center(page, pos);
                let placement = Transform::translate(half_w, half_h)
                    .then(&turn)
                    .then(&Transform::translate(Length::pt(x), Length::pt(y)));
                Pagelet {
                    position: Some(pos),
                    scaling,
                    ..Pagelet::new(size, placement)
                }
            })
            .collect();

        Self { layout, pagelets }
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn pagelets(&self) -> &[Pagelet] {
        &self.pagelets
    }

    pub fn pagelets_mut(&mut self) -> &mut [Pagelet] {
        &mut self.pagelets
    }

    /// Pagelet at a grid cell
    pub fn pagelet_at(&self, pos: GridPosition) -> Option<&Pagelet> {
        self.pagelets.iter().find(|p| p.position == Some(pos))
    }

    pub fn filled_count(&self) -> usize {
        self.pagelets.iter().filter(|p| !p.is_blank()).count()
    }
}

/// Layers covering the full page, drawn in order (layer 0 at the bottom)
#[derive(Debug, Clone)]
pub struct StackedPage {
    pagelets: Vec<Pagelet>,
}

impl StackedPage {
    pub fn layers(&self) -> &[Pagelet] {
        &self.pagelets
    }

    pub fn layers_mut(&mut self) -> &mut [Pagelet] {
        &mut self.pagelets
    }
}

#[derive(Debug, Clone)]
pub enum PageKind {
    Single(SinglePage),
    Multi(MultiPage),
    Grid(GridPage),
    Stacked(StackedPage),
}

impl PageKind {
    pub fn name(&self) -> &'static str {
        match self {
            PageKind::Single(_) => "single",
            PageKind::Multi(_) => "multi",
            PageKind::Grid(_) => "grid",
            PageKind::Stacked(_) => "stacked",
        }
    }

    /// Number of content slots on the page
    pub fn slot_count(&self) -> usize {
        match self {
            PageKind::Single(_) => 1,
            PageKind::Multi(multi) => multi.pagelets.len(),
            PageKind::Grid(grid) => grid.pagelets.len(),
            PageKind::Stacked(stacked) => stacked.pagelets.len(),
        }
    }
}

// =============================================================================
// Page
// =============================================================================

/// A numbered slot for content
#[derive(Debug, Clone)]
pub struct Page {
    number: Option<u32>,
    dimensions: Dimensions,
    kind: PageKind,
}

impl Page {
    pub fn single(dimensions: Dimensions) -> Self {
        Self::with_kind(dimensions, PageKind::Single(SinglePage::default()))
    }

    pub fn multi(dimensions: Dimensions, pagelets: Vec<Pagelet>) -> Self {
        Self::with_kind(dimensions, PageKind::Multi(MultiPage::new(pagelets)))
    }

    /// A page split into a grid of pagelets, one per cell
    pub fn grid(dimensions: Dimensions, layout: GridLayout, scaling: ScalingMode) -> Result<Self> {
        if layout.rows == 0 || layout.columns == 0 {
            return Err(ImposeError::Config(format!(
                "Grid needs at least one row and column, got {} x {}",
                layout.rows, layout.columns
            )));
        }
        Ok(Self::with_kind(
            dimensions,
            PageKind::Grid(GridPage::new(dimensions, layout, scaling)),
        ))
    }

    /// A page of `layers` full-size layers
    pub fn stacked(dimensions: Dimensions, layers: usize, scaling: ScalingMode) -> Self {
        let pagelets = (0..layers)
            .map(|_| Pagelet {
                scaling,
                ..Pagelet::new(dimensions, Transform::IDENTITY)
            })
            .collect();
        Self::with_kind(dimensions, PageKind::Stacked(StackedPage { pagelets }))
    }

    fn with_kind(dimensions: Dimensions, kind: PageKind) -> Self {
        Self {
            number: None,
            dimensions,
            kind,
        }
    }

    pub fn with_scaling(mut self, scaling: ScalingMode) -> Self {
        match &mut self.kind {
            PageKind::Single(single) => single.scaling = scaling,
            PageKind::Multi(multi) => multi.pagelets.iter_mut().for_each(|p| p.scaling = scaling),
            PageKind::Grid(grid) => grid.pagelets.iter_mut().for_each(|p| p.scaling = scaling),
            PageKind::Stacked(stacked) => {
                stacked.pagelets.iter_mut().for_each(|p| p.scaling = scaling)
            }
        }
        self
    }

    pub fn number(&self) -> Option<u32> {
        self.number
    }

    /// Assign the page number. Numbers start at 1 and are fixed once set.
    pub fn assign_number(&mut self, number: u32) -> Result<()> {
        self.check_number(number)?;
        self.number = Some(number);
        Ok(())
    }

    /// Fails where [`assign_number`](Self::assign_number) would, without
    /// touching the page
    pub(crate) fn check_number(&self, number: u32) -> Result<()> {
        if number == 0 {
            return Err(ImposeError::InvalidPageNumber(number));
        }
        match self.number {
            Some(current) if current != number => Err(ImposeError::PageAlreadyNumbered {
                current,
                requested: number,
            }),
            _ => Ok(()),
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn width(&self) -> Length {
        self.dimensions.width()
    }

    pub fn height(&self) -> Length {
        self.dimensions.height()
    }

    pub fn kind(&self) -> &PageKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut PageKind {
        &mut self.kind
    }

    /// Whether no slot on the page has content
    pub fn is_blank(&self) -> bool {
        match &self.kind {
            PageKind::Single(single) => single.content.is_none(),
            PageKind::Multi(multi) => multi.pagelets.iter().all(Pagelet::is_blank),
            PageKind::Grid(grid) => grid.pagelets.iter().all(Pagelet::is_blank),
            PageKind::Stacked(stacked) => stacked.pagelets.iter().all(Pagelet::is_blank),
        }
    }

    /// All assigned content placed in page coordinates. Blank slots add nothing.
    pub fn render(&self) -> Vec<Content> {
        match &self.kind {
            PageKind::Single(single) => render_slot(
                single.content.as_ref(),
                self.dimensions,
                single.scaling,
                &Transform::IDENTITY,
            ),
            PageKind::Multi(MultiPage { pagelets })
            | PageKind::Grid(GridPage { pagelets, .. })
            | PageKind::Stacked(StackedPage { pagelets }) => {
                pagelets.iter().flat_map(Pagelet::render).collect()
            }
        }
    }

    /// A copy of this slot with no number and no content
    pub fn clone_blank(&self) -> Page {
        let mut page = self.clone();
        page.number = None;
        match &mut page.kind {
            PageKind::Single(single) => single.content = None,
            PageKind::Multi(MultiPage { pagelets })
            | PageKind::Grid(GridPage { pagelets, .. })
            | PageKind::Stacked(StackedPage { pagelets }) => {
                pagelets.iter_mut().for_each(|p| p.content = None)
            }
        }
        page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{VirtualDocument, VirtualPage};
    use std::sync::Arc;

    fn dims(w: f64, h: f64) -> Dimensions {
        Dimensions::from_pt(w, h).unwrap()
    }

    fn source(w: f64, h: f64) -> SharedContent {
        let doc = VirtualDocument::from_source(0, 1, dims(w, h));
        doc.pages()[0].clone()
    }

    #[test]
    fn test_page_numbering_lifecycle() {
        let mut page = Page::single(dims(100.0, 100.0));
        assert_eq!(page.number(), None);

        assert!(matches!(
            page.assign_number(0),
            Err(ImposeError::InvalidPageNumber(0))
        ));

        page.assign_number(3).unwrap();
        assert_eq!(page.number(), Some(3));

        // Same number again is fine, a different one is not
        page.assign_number(3).unwrap();
        assert!(matches!(
            page.assign_number(4),
            Err(ImposeError::PageAlreadyNumbered {
                current: 3,
                requested: 4
            })
        ));
    }

    #[test]
    fn test_single_page_fit_centers_content() {
        let mut page = Page::single(dims(200.0, 200.0));
        if let PageKind::Single(single) = page.kind_mut() {
            single.set_content(Some(source(100.0, 50.0)));
        }

        let rendered = page.render();
        assert_eq!(rendered.len(), 1);
        // Scaled by 2 to 200x100 and centered vertically
        assert!(
            rendered[0]
                .transform
                .approx_eq(&Transform::new(2.0, 0.0, 0.0, 2.0, 0.0, 50.0), 1e-9)
        );
    }

    #[test]
    fn test_blank_page_renders_nothing() {
        let page = Page::single(dims(200.0, 200.0));
        assert!(page.is_blank());
        assert!(page.render().is_empty());
    }

    #[test]
    fn test_grid_page_pagelets() {
        let page = Page::grid(dims(400.0, 600.0), GridLayout::new(2, 2), ScalingMode::Fit).unwrap();
        let PageKind::Grid(grid) = page.kind() else {
            panic!("expected grid page");
        };
        assert_eq!(grid.pagelets().len(), 4);

        let first = &grid.pagelets()[0];
        assert_eq!(first.position(), Some(GridPosition::new(0, 0)));
        assert_eq!(first.dimensions(), dims(200.0, 300.0));
        // Top-left cell: pagelet origin lands at (0, 300)
        let origin = first.placement().apply(Point::origin());
        assert!(origin.approx_eq(Point::new(0.0, 300.0), 1e-9));
    }

    #[test]
    fn test_rotated_grid_pagelet_fills_cell() {
        let layout = GridLayout {
            rotated: true,
            ..GridLayout::new(1, 2)
        };
        let page = Page::grid(dims(400.0, 300.0), layout, ScalingMode::Fit).unwrap();
        let PageKind::Grid(grid) = page.kind() else {
            panic!("expected grid page");
        };
        let pagelet = &grid.pagelets()[1];
        assert_eq!(pagelet.dimensions(), dims(300.0, 200.0));

        // The rotated pagelet's corners stay inside the right-hand cell
        let corners = [
            Point::origin(),
            Point::new(300.0, 0.0),
            Point::new(0.0, 200.0),
            Point::new(300.0, 200.0),
        ];
        for corner in corners {
            let p = pagelet.placement().apply(corner);
            assert!(p.x >= 200.0 - 1e-9 && p.x <= 400.0 + 1e-9, "{p:?}");
            assert!(p.y >= -1e-9 && p.y <= 300.0 + 1e-9, "{p:?}");
        }
    }

    #[test]
    fn test_grid_rejects_empty_shape() {
        assert!(Page::grid(dims(10.0, 10.0), GridLayout::new(0, 3), ScalingMode::Fit).is_err());
    }

    #[test]
    fn test_clone_blank_clears_content_and_number() {
        let mut page = Page::stacked(dims(100.0, 100.0), 2, ScalingMode::Fit);
        if let PageKind::Stacked(stacked) = page.kind_mut() {
            stacked.layers_mut()[0].set_content(Some(Arc::new(VirtualPage::new(dims(1.0, 1.0)))));
        }
        page.assign_number(7).unwrap();
        assert!(!page.is_blank());

        let blank = page.clone_blank();
        assert!(blank.is_blank());
        assert_eq!(blank.number(), None);
        assert_eq!(blank.kind().slot_count(), 2);
    }

    #[test]
    fn test_page_number_range() {
        assert_eq!(page_number(12).unwrap(), 12);
        assert_eq!(page_number(u32::MAX as usize).unwrap(), u32::MAX);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_page_number_out_of_range() {
        assert!(matches!(
            page_number(u32::MAX as usize + 1),
            Err(ImposeError::PageNumberOverflow { .. })
        ));
    }
}
