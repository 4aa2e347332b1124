use crate::content::VirtualDocument;
use crate::types::Result;

use super::{FlipDirection, Page, Signature};

/// A bound document: signatures in binding order
#[derive(Debug, Clone, Default)]
pub struct Volume {
    signatures: Vec<Signature>,
}

impl Volume {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_signature(&mut self, signature: Signature) {
        self.signatures.push(signature);
    }

    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    pub fn signatures_mut(&mut self) -> &mut [Signature] {
        &mut self.signatures
    }

    pub fn sheet_count(&self) -> usize {
        self.signatures.iter().map(|s| s.sheets().len()).sum()
    }

    pub fn page_count(&self) -> usize {
        self.signatures.iter().map(Signature::page_count).sum()
    }

    /// Number every signature in turn, continuing from one to the next.
    /// Returns the next free number. On error no page is numbered.
    pub fn number_pages_from(&mut self, start: u32) -> Result<u32> {
        let mut plans = Vec::with_capacity(self.signatures.len());
        let mut next = start;
        for signature in &self.signatures {
            let (plan, after) = signature.numbering_plan(next, None)?;
            plans.push(plan);
            next = after;
        }

        for (signature, plan) in self.signatures.iter_mut().zip(&plans) {
            signature.apply_numbering(plan)?;
        }
        Ok(next)
    }

    /// All pages of the volume, sorted by page number
    pub fn pages_in_reading_order_mut(&mut self) -> Vec<&mut Page> {
        let mut pages: Vec<&mut Page> = self
            .signatures
            .iter_mut()
            .flat_map(Signature::pages_in_reading_order_mut)
            .collect();
        pages.sort_by_key(|p| p.number().unwrap_or(u32::MAX));
        pages
    }

    /// Every sheet side of every signature, front then back
    pub fn render_document(&self, flip: FlipDirection) -> VirtualDocument {
        let mut builder = VirtualDocument::builder();
        for side in self.signatures.iter().flat_map(|s| s.render(flip)) {
            builder.add_page(side);
        }
        builder.build()
    }
}
