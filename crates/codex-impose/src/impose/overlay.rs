//! Overlay: several documents merged page by page into stacked layers

use crate::content::{VirtualDocument, VirtualPage};
use crate::diagnostics::{Diagnostics, Warning};
use crate::geometry::Dimensions;
use crate::model::{Page, page_number};
use crate::options::OverlayOptions;
use crate::source::LayeredSourceProvider;
use crate::types::*;

#[derive(Debug, Clone)]
pub struct Overlay {
    options: OverlayOptions,
    dimensions: Dimensions,
    pages: Vec<Page>,
}

impl Overlay {
    /// Stacked pages for sources of the given lengths, numbered from 1
    ///
    /// `options.layers` must already be resolved (non-zero).
    pub fn new(
        options: &OverlayOptions,
        source_page_counts: &[usize],
        diagnostics: &mut Diagnostics,
    ) -> Result<Self> {
        options.validate()?;

        if options.layers == 0 {
            return Err(ImposeError::Config(
                "Overlay needs at least one layer".to_string(),
            ));
        }
        if options.layers > source_page_counts.len() {
            diagnostics.warn(Warning::MissingLayers {
                declared: options.layers,
                provided: source_page_counts.len(),
            });
        }

        let count = options.page_count.unwrap_or_else(|| {
            source_page_counts
                .iter()
                .take(options.layers)
                .copied()
                .max()
                .unwrap_or(0)
        });
        if count == 0 {
            return Err(ImposeError::NoPages);
        }

        let dimensions = options.page_dimensions()?;
        let pages = (1..=count)
            .map(|number| {
                let mut page = Page::stacked(dimensions, options.layers, options.scaling);
                page.assign_number(page_number(number)?)?;
                Ok(page)
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Overlay: {} layers on {} pages", options.layers, count);

        Ok(Self {
            options: options.clone(),
            dimensions,
            pages,
        })
    }

    pub fn options(&self) -> &OverlayOptions {
        &self.options
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn fill(
        &mut self,
        provider: &mut LayeredSourceProvider,
        diagnostics: &mut Diagnostics,
    ) -> Result<()> {
        provider.fill(self.pages.iter_mut(), diagnostics)?;

        let remaining: usize = provider.remaining().iter().sum();
        if remaining > 0 {
            diagnostics.warn(Warning::UnusedContent { remaining });
        }
        Ok(())
    }

    /// One output page per stacked page, bottom layer drawn first
    pub fn render(&self) -> VirtualDocument {
        let mut builder = VirtualDocument::builder();
        for page in &self.pages {
            let mut output = VirtualPage::new(self.dimensions);
            output.extend(page.render());
            builder.add_page(output);
        }
        builder.build()
    }
}
