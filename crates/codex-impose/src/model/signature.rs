use std::collections::HashSet;

use crate::content::VirtualPage;
use crate::types::{ImposeError, Result};

use super::{FlipDirection, Leaf, LeafId, Order, Page, Sheet};

/// Folded group of sheets with a physical reading order of its leaves
#[derive(Debug, Clone)]
pub struct Signature {
    sheets: Vec<Sheet>,
    leaf_order: Option<Order<LeafId>>,
}

impl Signature {
    /// Leaf ids must be unique across all sheets
    pub fn new(sheets: Vec<Sheet>, leaf_order: Option<Order<LeafId>>) -> Result<Self> {
        let mut seen = HashSet::new();
        for leaf in sheets.iter().flat_map(Sheet::leaves) {
            if !seen.insert(leaf.id()) {
                return Err(ImposeError::Config(format!(
                    "{} appears on more than one sheet of a signature",
                    leaf.id()
                )));
            }
        }
        Ok(Self { sheets, leaf_order })
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheets_mut(&mut self) -> &mut [Sheet] {
        &mut self.sheets
    }

    pub fn leaf_order(&self) -> Option<&Order<LeafId>> {
        self.leaf_order.as_ref()
    }

    pub fn leaves(&self) -> impl Iterator<Item = &Leaf> {
        self.sheets.iter().flat_map(Sheet::leaves)
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    pub fn page_count(&self) -> usize {
        self.leaf_count() * 2
    }

    /// Number all pages starting at `start`, walking leaves in `order` (or
    /// the signature's own leaf order). Leaves missing from the order come
    /// last, keeping their sheet order. Returns the next free number.
    ///
    /// On error no page is numbered.
    pub fn number_pages_from(&mut self, start: u32, order: Option<&Order<LeafId>>) -> Result<u32> {
        let (plan, next) = self.numbering_plan(start, order)?;
        self.apply_numbering(&plan)?;
        Ok(next)
    }

    /// Recto number for every leaf as `(sheet, leaf, recto)`, checked
    /// against numbers already assigned, and the next free number
    pub(crate) fn numbering_plan(
        &self,
        start: u32,
        order: Option<&Order<LeafId>>,
    ) -> Result<(Vec<(usize, usize, u32)>, u32)> {
        if start == 0 {
            return Err(ImposeError::InvalidPageNumber(start));
        }
        let order = order
            .or(self.leaf_order.as_ref())
            .ok_or(ImposeError::MissingLeafOrder)?;

        let mut slots: Vec<(usize, usize, usize)> = self
            .sheets
            .iter()
            .enumerate()
            .flat_map(|(s, sheet)| {
                sheet.leaves().iter().enumerate().map(move |(l, leaf)| {
                    (order.index_of(&leaf.id()).unwrap_or(usize::MAX), s, l)
                })
            })
            .collect();
        // Stable: unordered leaves keep their sheet order
        slots.sort_by_key(|&(rank, _, _)| rank);

        let pages = slots.len() * 2;
        let next = u32::try_from(pages)
            .ok()
            .and_then(|n| start.checked_add(n))
            .ok_or(ImposeError::PageNumberOverflow { start, pages })?;

        // Every number stays below `next`, so none of these additions overflow
        let plan: Vec<(usize, usize, u32)> = slots
            .into_iter()
            .zip((start..next).step_by(2))
            .map(|((_, s, l), recto)| (s, l, recto))
            .collect();

        for &(s, l, recto) in &plan {
            let leaf = &self.sheets[s].leaves()[l];
            leaf.recto().check_number(recto)?;
            leaf.verso().check_number(recto + 1)?;
        }
        Ok((plan, next))
    }

    pub(crate) fn apply_numbering(&mut self, plan: &[(usize, usize, u32)]) -> Result<()> {
        for &(s, l, recto) in plan {
            let leaf = &mut self.sheets[s].leaves_mut()[l];
            leaf.recto_mut().assign_number(recto)?;
            leaf.verso_mut().assign_number(recto + 1)?;
        }
        Ok(())
    }

    /// All pages, sorted by page number. Unnumbered pages come last.
    pub fn pages_in_reading_order_mut(&mut self) -> Vec<&mut Page> {
        let mut pages: Vec<&mut Page> = self
            .sheets
            .iter_mut()
            .flat_map(|sheet| sheet.leaves_mut().iter_mut())
            .flat_map(|leaf| leaf.pages_mut())
            .collect();
        pages.sort_by_key(|p| p.number().unwrap_or(u32::MAX));
        pages
    }

    /// Sheet sides in print order: front, back, front, back, ...
    pub fn render(&self, flip: FlipDirection) -> Vec<VirtualPage> {
        self.sheets
            .iter()
            .flat_map(|sheet| [sheet.render_front(), sheet.render_back(flip)])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Dimensions;

    fn leaf(id: usize) -> Leaf {
        Leaf::new(Dimensions::from_pt(100.0, 100.0).unwrap()).clone_blank_as(LeafId(id))
    }

    fn sheet(ids: &[usize]) -> Sheet {
        let mut sheet = Sheet::new(Dimensions::from_pt(200.0, 100.0).unwrap());
        for &id in ids {
            sheet.add_leaf(leaf(id));
        }
        sheet
    }

    fn numbers(signature: &Signature, id: usize) -> (Option<u32>, Option<u32>) {
        let leaf = signature.leaves().find(|l| l.id() == LeafId(id)).unwrap();
        (leaf.recto().number(), leaf.verso().number())
    }

    #[test]
    fn test_numbering_follows_leaf_order_not_sheet_order() {
        let order: Order<LeafId> = [2, 0, 3, 1].into_iter().map(LeafId).collect();
        let mut signature = Signature::new(vec![sheet(&[0, 1]), sheet(&[2, 3])], Some(order)).unwrap();

        let next = signature.number_pages_from(5, None).unwrap();
        assert_eq!(next, 13);
        assert_eq!(numbers(&signature, 2), (Some(5), Some(6)));
        assert_eq!(numbers(&signature, 0), (Some(7), Some(8)));
        assert_eq!(numbers(&signature, 3), (Some(9), Some(10)));
        assert_eq!(numbers(&signature, 1), (Some(11), Some(12)));
    }

    #[test]
    fn test_unordered_leaves_sort_last() {
        let order: Order<LeafId> = [LeafId(1)].into_iter().collect();
        let mut signature = Signature::new(vec![sheet(&[0, 1, 2])], None).unwrap();

        signature.number_pages_from(1, Some(&order)).unwrap();
        assert_eq!(numbers(&signature, 1), (Some(1), Some(2)));
        assert_eq!(numbers(&signature, 0), (Some(3), Some(4)));
        assert_eq!(numbers(&signature, 2), (Some(5), Some(6)));
    }

    #[test]
    fn test_numbering_errors() {
        let mut signature = Signature::new(vec![sheet(&[0])], None).unwrap();
        assert!(matches!(
            signature.number_pages_from(1, None),
            Err(ImposeError::MissingLeafOrder)
        ));

        let order: Order<LeafId> = [LeafId(0)].into_iter().collect();
        assert!(matches!(
            signature.number_pages_from(0, Some(&order)),
            Err(ImposeError::InvalidPageNumber(0))
        ));

        signature.number_pages_from(1, Some(&order)).unwrap();
        assert!(matches!(
            signature.number_pages_from(3, Some(&order)),
            Err(ImposeError::PageAlreadyNumbered { .. })
        ));
    }

    #[test]
    fn test_numbering_near_the_largest_page_number() {
        let order: Order<LeafId> = [0, 1].into_iter().map(LeafId).collect();
        let mut signature = Signature::new(vec![sheet(&[0, 1])], Some(order)).unwrap();

        assert!(matches!(
            signature.number_pages_from(u32::MAX - 2, None),
            Err(ImposeError::PageNumberOverflow { pages: 4, .. })
        ));
        assert_eq!(numbers(&signature, 0), (None, None));

        // Exactly fits: the last page takes u32::MAX - 1
        let next = signature.number_pages_from(u32::MAX - 4, None).unwrap();
        assert_eq!(next, u32::MAX);
        assert_eq!(numbers(&signature, 1), (Some(u32::MAX - 2), Some(u32::MAX - 1)));
    }

    #[test]
    fn test_failed_numbering_leaves_pages_untouched() {
        let order: Order<LeafId> = [0, 1].into_iter().map(LeafId).collect();
        let mut signature = Signature::new(vec![sheet(&[0, 1])], Some(order)).unwrap();

        let second = &mut signature.sheets_mut()[0].leaves_mut()[1];
        second.recto_mut().assign_number(7).unwrap();
        second.verso_mut().assign_number(8).unwrap();

        // Leaf 1 would need 3 and 4 but already carries 7 and 8
        assert!(matches!(
            signature.number_pages_from(1, None),
            Err(ImposeError::PageAlreadyNumbered { current: 7, requested: 3 })
        ));
        assert_eq!(numbers(&signature, 0), (None, None));
        assert_eq!(numbers(&signature, 1), (Some(7), Some(8)));
    }

    #[test]
    fn test_duplicate_leaf_across_sheets_rejected() {
        assert!(Signature::new(vec![sheet(&[0, 1]), sheet(&[1])], None).is_err());
    }

    #[test]
    fn test_pages_in_reading_order() {
        let order: Order<LeafId> = [1, 0].into_iter().map(LeafId).collect();
        let mut signature = Signature::new(vec![sheet(&[0, 1])], Some(order)).unwrap();
        signature.number_pages_from(1, None).unwrap();

        let numbers: Vec<_> = signature
            .pages_in_reading_order_mut()
            .iter()
            .map(|p| p.number())
            .collect();
        assert_eq!(numbers, vec![Some(1), Some(2), Some(3), Some(4)]);
    }
}
