//! N-up: several source pages on a grid on each output side

use crate::content::{Content, MarkKind, VirtualDocument, VirtualPage};
use crate::diagnostics::{Diagnostics, Warning};
use crate::geometry::Dimensions;
use crate::model::{Page, page_number};
use crate::options::NUpOptions;
use crate::source::SourceProvider;
use crate::types::*;

#[derive(Debug, Clone)]
pub struct NUp {
    options: NUpOptions,
    sheet: Dimensions,
    sides: Vec<Page>,
}

impl NUp {
    /// Grid pages for `source_pages` pages of content, numbered from 1
    pub fn new(options: &NUpOptions, source_pages: usize) -> Result<Self> {
        options.validate()?;

        let layout = options.layout();
        let count = options
            .page_count
            .unwrap_or_else(|| source_pages.div_ceil(layout.cell_count()));
        if count == 0 {
            return Err(ImposeError::NoPages);
        }

        let sheet = options.sheet_dimensions()?;
        let sides = (1..=count)
            .map(|number| {
                let mut side = Page::grid(sheet, layout, options.scaling)?;
                side.assign_number(page_number(number)?)?;
                Ok(side)
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "N-up: {} x {} grid on {} sides",
            layout.rows,
            layout.columns,
            count
        );

        Ok(Self {
            options: options.clone(),
            sheet,
            sides,
        })
    }

    pub fn options(&self) -> &NUpOptions {
        &self.options
    }

    pub fn sides(&self) -> &[Page] {
        &self.sides
    }

    pub fn sides_mut(&mut self) -> &mut [Page] {
        &mut self.sides
    }

    /// Fill the grid cells side by side, in traversal order
    pub fn fill(
        &mut self,
        provider: &mut SourceProvider,
        diagnostics: &mut Diagnostics,
    ) -> Result<()> {
        provider.fill(self.sides.iter_mut(), diagnostics)?;
        if !provider.is_exhausted() {
            diagnostics.warn(Warning::UnusedContent {
                remaining: provider.remaining(),
            });
        }
        Ok(())
    }

    /// One output page per side, with cut marks if requested
    pub fn render(&self) -> VirtualDocument {
        let cut_lines = if self.options.cut_marks {
            self.options.layout().interior_lines(self.sheet)
        } else {
            Vec::new()
        };

        let mut builder = VirtualDocument::builder();
        for side in &self.sides {
            let mut page = VirtualPage::new(self.sheet);
            page.extend(side.render());
            page.extend(
                cut_lines
                    .iter()
                    .map(|&(from, to)| Content::mark(MarkKind::Cut, from, to)),
            );
            builder.add_page(page);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_count_follows_sources() {
        let nup = NUp::new(&NUpOptions::default(), 9).unwrap();
        assert_eq!(nup.sides().len(), 3);
        let numbers: Vec<_> = nup.sides().iter().map(Page::number).collect();
        assert_eq!(numbers, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_explicit_side_count_wins() {
        let options = NUpOptions {
            page_count: Some(1),
            ..Default::default()
        };
        let nup = NUp::new(&options, 40).unwrap();
        assert_eq!(nup.sides().len(), 1);
    }

    #[test]
    fn test_no_sources() {
        assert!(matches!(
            NUp::new(&NUpOptions::default(), 0),
            Err(ImposeError::NoPages)
        ));
    }

    #[test]
    fn test_cut_marks() {
        let options = NUpOptions {
            rows: 2,
            columns: 3,
            cut_marks: true,
            ..Default::default()
        };
        let nup = NUp::new(&options, 6).unwrap();
        let document = nup.render();
        // Two vertical and one horizontal interior line
        assert_eq!(document.page(0).unwrap().marks().count(), 3);
    }
}
