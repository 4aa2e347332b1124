//! Fold simulation
//!
//! A [`Stack`] models sheets of paper lying on top of each other. Each
//! [`Layer`] is one face-sized piece of a sheet as it ends up after the
//! manipulations: its position maps sheet coordinates into stack
//! coordinates, and its orientation says whether the sheet's front or back
//! faces up. Layers refer to sheets by index, so two layers folded from the
//! same physical sheet keep pointing at it.
//!
//! Once all manipulations are done, [`Stack::build_signature`] places one
//! copy of a leaf template under every layer. The layer order, top to
//! bottom, is the reading order of the resulting signature.

use crate::geometry::{Dimensions, Line, Transform};
use crate::model::{Leaf, LeafId, Order, Sheet, Signature};
use crate::types::{ImposeError, Result};

/// Which face of its sheet a layer shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerOrientation {
    Positive,
    Negative,
}

impl LayerOrientation {
    pub fn inverted(self) -> Self {
        match self {
            LayerOrientation::Positive => LayerOrientation::Negative,
            LayerOrientation::Negative => LayerOrientation::Positive,
        }
    }
}

/// Where joined or gathered material goes relative to the current stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Top,
    Bottom,
}

/// Side of the stack the folded part ends up on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldDirection {
    Over,
    Under,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    sheet: usize,
    position: Transform,
    orientation: LayerOrientation,
}

impl Layer {
    /// Index of the sheet in the owning stack
    pub fn sheet(&self) -> usize {
        self.sheet
    }

    pub fn position(&self) -> &Transform {
        &self.position
    }

    pub fn orientation(&self) -> LayerOrientation {
        self.orientation
    }

    fn mirrored(&self, mirror: &Transform) -> Layer {
        Layer {
            sheet: self.sheet,
            position: self.position.then(mirror),
            orientation: self.orientation.inverted(),
        }
    }
}

/// A single step of physical handling
#[derive(Debug, Clone)]
pub enum Manipulation {
    Gather { copies: usize, placement: Placement },
    Fold { axis: Line, direction: FoldDirection },
    Flip { axis: Line },
    Join { other: Stack, placement: Placement },
}

impl Manipulation {
    pub fn perform(self, stack: &mut Stack) -> Result<()> {
        match self {
            Manipulation::Gather { copies, placement } => stack.gather(copies, placement),
            Manipulation::Fold { axis, direction } => {
                stack.fold(&axis, direction);
                Ok(())
            }
            Manipulation::Flip { axis } => {
                stack.flip(&axis);
                Ok(())
            }
            Manipulation::Join { other, placement } => {
                stack.join(other, placement);
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Stack {
    dimensions: Dimensions,
    layers: Vec<Layer>,
    sheets: Vec<Sheet>,
}

impl Stack {
    /// One sheet of the given size, lying face up
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            layers: vec![Layer {
                sheet: 0,
                position: Transform::IDENTITY,
                orientation: LayerOrientation::Positive,
            }],
            sheets: vec![Sheet::new(dimensions)],
        }
    }

    /// Unfolded extents of the stack
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Layers from top to bottom
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    /// Structural copy with blank sheets. Each sheet is copied once and the
    /// layers keep referring to the copy of their own sheet.
    pub fn copy(&self) -> Stack {
        Stack {
            dimensions: self.dimensions,
            layers: self.layers.clone(),
            sheets: self.sheets.iter().map(Sheet::clone_blank).collect(),
        }
    }

    pub fn perform_manipulations(
        &mut self,
        manipulations: impl IntoIterator<Item = Manipulation>,
    ) -> Result<()> {
        for manipulation in manipulations {
            manipulation.perform(self)?;
        }
        Ok(())
    }

    /// Put `other` on top of or beneath this stack, as is
    pub fn join(&mut self, other: Stack, placement: Placement) {
        let Stack {
            layers: mut other_layers,
            sheets: other_sheets,
            ..
        } = other;

        match placement {
            Placement::Top => {
                let offset = other_sheets.len();
                for layer in &mut self.layers {
                    layer.sheet += offset;
                }
                other_layers.append(&mut self.layers);
                self.layers = other_layers;

                let mut sheets = other_sheets;
                sheets.append(&mut self.sheets);
                self.sheets = sheets;
            }
            Placement::Bottom => {
                let offset = self.sheets.len();
                for layer in &mut other_layers {
                    layer.sheet += offset;
                }
                self.layers.extend(other_layers);
                self.sheets.extend(other_sheets);
            }
        }
    }

    /// Make the stack `copies` times as thick with blank copies of itself
    pub fn gather(&mut self, copies: usize, placement: Placement) -> Result<()> {
        match copies {
            0 => return Err(ImposeError::InvalidGather { count: copies }),
            1 => log::debug!("Gathering a single copy leaves the stack unchanged"),
            _ => {}
        }

        let template = self.copy();
        for _ in 1..copies {
            self.join(template.copy(), placement);
        }
        Ok(())
    }

    /// Fold the stack about `axis`, doubling its layers
    ///
    /// Folding under puts the folded part beneath the stack, with the last
    /// layer ending up at the very bottom. Folding over puts it on top, with
    /// the last layer ending up at the very top.
    pub fn fold(&mut self, axis: &Line, direction: FoldDirection) {
        let mirror = axis.mirror_transform();
        let folded = self.layers.iter().rev().map(|layer| layer.mirrored(&mirror));

        match direction {
            FoldDirection::Under => {
                let folded: Vec<Layer> = folded.collect();
                self.layers.extend(folded);
            }
            FoldDirection::Over => {
                let mut layers: Vec<Layer> = folded.collect();
                layers.append(&mut self.layers);
                self.layers = layers;
            }
        }
    }

    /// Turn the whole stack over about `axis`
    pub fn flip(&mut self, axis: &Line) {
        let mirror = axis.mirror_transform();
        self.layers = self
            .layers
            .iter()
            .rev()
            .map(|layer| layer.mirrored(&mirror))
            .collect();
    }

    /// Place one blank copy of `template` under every layer, top to bottom
    ///
    /// A layer showing the back of its sheet gets the leaf turned over by the
    /// template's flip direction. The layer order becomes the leaf order of
    /// the signature.
    pub fn build_signature(self, template: &Leaf) -> Result<Signature> {
        let Stack {
            layers, mut sheets, ..
        } = self;

        let reversed_local = template
            .flip()
            .mirror(template.dimensions())
            .then(template.placement());

        let mut order = Order::new();
        for (index, layer) in layers.iter().enumerate() {
            let to_sheet = layer
                .position
                .inverse()
                .ok_or(ImposeError::SingularTransform)?;

            let (local, orientation) = match layer.orientation {
                LayerOrientation::Positive => (*template.placement(), template.orientation()),
                LayerOrientation::Negative => (reversed_local, template.orientation().inverted()),
            };

            let id = LeafId(index);
            let mut leaf = template.clone_blank_as(id);
            leaf.place(local.then(&to_sheet), orientation);

            let sheet = sheets.get_mut(layer.sheet).ok_or_else(|| {
                ImposeError::Config(format!("Layer refers to missing sheet {}", layer.sheet))
            })?;
            if !sheet.add_leaf(leaf) {
                return Err(ImposeError::Config(format!(
                    "{} is already on sheet {}",
                    id, layer.sheet
                )));
            }
            order.push(id);
        }

        Signature::new(sheets, Some(order))
    }
}
