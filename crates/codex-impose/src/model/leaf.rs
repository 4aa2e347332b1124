//! Leaves: one piece of paper with a recto and a verso page

use std::fmt;

use crate::geometry::{Dimensions, Length, Line, Transform};

use super::Page;

/// Identifies a leaf within its signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct LeafId(pub usize);

impl fmt::Display for LeafId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "leaf #{}", self.0)
    }
}

/// Which page of a leaf faces up on its sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeafOrientation {
    #[default]
    RectoUp,
    VersoUp,
}

impl LeafOrientation {
    pub fn inverted(self) -> Self {
        match self {
            LeafOrientation::RectoUp => LeafOrientation::VersoUp,
            LeafOrientation::VersoUp => LeafOrientation::RectoUp,
        }
    }
}

/// How the back face's coordinates relate to the front's
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlipDirection {
    /// Turned over like a book page, about the vertical center line
    #[default]
    AroundY,
    /// Turned over like a calendar page, about the horizontal center line
    AroundX,
}

impl FlipDirection {
    /// Mirror about the center line of an area of the given size
    pub fn mirror(self, dimensions: Dimensions) -> Transform {
        match self {
            FlipDirection::AroundY => Line::vertical(dimensions.width() / 2.0).mirror_transform(),
            FlipDirection::AroundX => Line::horizontal(dimensions.height() / 2.0).mirror_transform(),
        }
    }

    pub fn perpendicular(self) -> Self {
        match self {
            FlipDirection::AroundY => FlipDirection::AroundX,
            FlipDirection::AroundX => FlipDirection::AroundY,
        }
    }

    /// Where the back of a whole sheet is read from: the far edge mirrored
    /// onto the origin
    pub(crate) fn sheet_back(self, dimensions: Dimensions) -> Transform {
        match self {
            FlipDirection::AroundY => Line::vertical(Length::ZERO)
                .mirror_transform()
                .then(&Transform::translate(dimensions.width(), Length::ZERO)),
            FlipDirection::AroundX => Line::horizontal(Length::ZERO)
                .mirror_transform()
                .then(&Transform::translate(Length::ZERO, dimensions.height())),
        }
    }
}

/// A piece of paper carrying two pages
///
/// The placement maps leaf coordinates onto the sheet for the face that is
/// up. The back face is read through the flip mirror.
#[derive(Debug, Clone)]
pub struct Leaf {
    id: LeafId,
    dimensions: Dimensions,
    recto: Page,
    verso: Page,
    placement: Transform,
    orientation: LeafOrientation,
    flip: FlipDirection,
}

impl Leaf {
    /// A leaf with blank single-slot pages, placed at the sheet origin
    pub fn new(dimensions: Dimensions) -> Self {
        Self::with_pages(Page::single(dimensions), Page::single(dimensions))
    }

    /// A leaf holding the given pages. Its size is the recto's size.
    pub fn with_pages(recto: Page, verso: Page) -> Self {
        Self {
            id: LeafId::default(),
            dimensions: recto.dimensions(),
            recto,
            verso,
            placement: Transform::IDENTITY,
            orientation: LeafOrientation::RectoUp,
            flip: FlipDirection::AroundY,
        }
    }

    pub fn with_flip(mut self, flip: FlipDirection) -> Self {
        self.flip = flip;
        self
    }

    pub fn with_orientation(mut self, orientation: LeafOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_placement(mut self, placement: Transform) -> Self {
        self.placement = placement;
        self
    }

    /// A blank copy of this leaf under a new identity
    pub fn clone_blank_as(&self, id: LeafId) -> Leaf {
        Leaf {
            id,
            recto: self.recto.clone_blank(),
            verso: self.verso.clone_blank(),
            ..self.clone()
        }
    }

    pub fn id(&self) -> LeafId {
        self.id
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn orientation(&self) -> LeafOrientation {
        self.orientation
    }

    pub fn flip(&self) -> FlipDirection {
        self.flip
    }

    pub fn placement(&self) -> &Transform {
        &self.placement
    }

    pub(crate) fn place(&mut self, placement: Transform, orientation: LeafOrientation) {
        self.placement = placement;
        self.orientation = orientation;
    }

    pub fn front_position(&self) -> Transform {
        self.placement
    }

    pub fn back_position(&self) -> Transform {
        self.flip.mirror(self.dimensions).then(&self.placement)
    }

    pub fn recto(&self) -> &Page {
        &self.recto
    }

    pub fn verso(&self) -> &Page {
        &self.verso
    }

    pub fn recto_mut(&mut self) -> &mut Page {
        &mut self.recto
    }

    pub fn verso_mut(&mut self) -> &mut Page {
        &mut self.verso
    }

    /// Both pages, recto first
    pub fn pages_mut(&mut self) -> [&mut Page; 2] {
        [&mut self.recto, &mut self.verso]
    }

    /// The page on the up face of the sheet
    pub fn front_page(&self) -> &Page {
        match self.orientation {
            LeafOrientation::RectoUp => &self.recto,
            LeafOrientation::VersoUp => &self.verso,
        }
    }

    /// The page on the reverse face of the sheet
    pub fn back_page(&self) -> &Page {
        match self.orientation {
            LeafOrientation::RectoUp => &self.verso,
            LeafOrientation::VersoUp => &self.recto,
        }
    }
}
