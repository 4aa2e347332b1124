use crate::content::{Content, Mark, VirtualPage};
use crate::geometry::Dimensions;

use super::{FlipDirection, Leaf, LeafId};

/// A physical sheet carrying leaves at fixed positions
#[derive(Debug, Clone)]
pub struct Sheet {
    dimensions: Dimensions,
    leaves: Vec<Leaf>,
    marks: Vec<Mark>,
}

impl Sheet {
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            leaves: Vec::new(),
            marks: Vec::new(),
        }
    }

    /// Same size, no leaves and no marks
    pub fn clone_blank(&self) -> Sheet {
        Sheet::new(self.dimensions)
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    pub fn leaves_mut(&mut self) -> &mut [Leaf] {
        &mut self.leaves
    }

    pub fn contains_leaf(&self, id: LeafId) -> bool {
        self.leaves.iter().any(|l| l.id() == id)
    }

    /// Add a leaf. A leaf whose id is already on the sheet is rejected.
    pub fn add_leaf(&mut self, leaf: Leaf) -> bool {
        if self.contains_leaf(leaf.id()) {
            return false;
        }
        self.leaves.push(leaf);
        true
    }

    /// Add a printer's mark drawn on the front side
    pub fn add_mark(&mut self, mark: Mark) {
        self.marks.push(mark);
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    /// Front side: every leaf's up-facing page placed at its front position
    pub fn render_front(&self) -> VirtualPage {
        let mut side = VirtualPage::new(self.dimensions);
        side.extend(
            self.marks
                .iter()
                .map(|m| Content::mark(m.kind, m.from, m.to)),
        );
        for leaf in &self.leaves {
            let page = leaf.front_page();
            if page.is_blank() {
                continue;
            }
            let position = leaf.front_position();
            side.extend(page.render().iter().map(|c| c.transformed(&position)));
        }
        side
    }

    /// Back side as seen after turning the sheet over by `flip`
    pub fn render_back(&self, flip: FlipDirection) -> VirtualPage {
        let sheet_back = flip.sheet_back(self.dimensions);
        let mut side = VirtualPage::new(self.dimensions);
        for leaf in &self.leaves {
            let page = leaf.back_page();
            if page.is_blank() {
                continue;
            }
            let position = leaf.back_position().then(&sheet_back);
            side.extend(page.render().iter().map(|c| c.transformed(&position)));
        }
        side
    }
}
