//! Saddle-stitched booklets
//!
//! All sheets are gathered into one pile, folded once through the spine
//! and read as a single signature. With vertical binding the folded pile is
//! also turned over, so the outermost leaf shows the first page.

use crate::constants::{PAGES_PER_BOOKLET_SHEET, PAGES_PER_LEAF};
use crate::content::{Mark, MarkKind, VirtualDocument};
use crate::diagnostics::{Diagnostics, Warning};
use crate::geometry::{Length, Line, Point};
use crate::model::{FlipDirection, Leaf, Page, Signature, Volume};
use crate::options::BookletOptions;
use crate::source::SourceProvider;
use crate::stack::{FoldDirection, Manipulation, Placement, Stack};
use crate::types::*;

/// A booklet: one numbered signature, ready for content
#[derive(Debug, Clone)]
pub struct Booklet {
    options: BookletOptions,
    volume: Volume,
    padded_pages: usize,
}

impl Booklet {
    pub fn new(options: &BookletOptions, diagnostics: &mut Diagnostics) -> Result<Self> {
        options.validate()?;

        let requested = options.page_count + options.flyleaf_pages();
        if requested == 0 {
            return Err(ImposeError::NoPages);
        }

        let padded_pages =
            requested.div_ceil(PAGES_PER_BOOKLET_SHEET) * PAGES_PER_BOOKLET_SHEET;
        if padded_pages != requested {
            diagnostics.warn(Warning::PagesPadded {
                requested,
                padded: padded_pages,
            });
        }
        let sheets = padded_pages / PAGES_PER_BOOKLET_SHEET;

        let page = options.page_dimensions()?;
        let (width, height) = (page.width(), page.height());
        let gather = Manipulation::Gather {
            copies: sheets,
            placement: Placement::Bottom,
        };

        let (stack_dimensions, manipulations, leaf_flip) = match options.binding {
            Binding::Vertical => (
                page.tiled(2, 1),
                vec![
                    gather,
                    Manipulation::Fold {
                        axis: Line::vertical(width),
                        direction: FoldDirection::Under,
                    },
                    Manipulation::Flip {
                        axis: Line::vertical(width / 2.0),
                    },
                ],
                FlipDirection::AroundY,
            ),
            Binding::Horizontal => (
                page.tiled(1, 2),
                vec![
                    gather,
                    Manipulation::Fold {
                        axis: Line::horizontal(height),
                        direction: FoldDirection::Under,
                    },
                ],
                FlipDirection::AroundX,
            ),
        };
        let leaf_flip = if options.verso_opposite {
            leaf_flip.perpendicular()
        } else {
            leaf_flip
        };

        let mut stack = Stack::new(stack_dimensions);
        stack.perform_manipulations(manipulations)?;

        let slot = Page::single(page).with_scaling(options.scaling);
        let template = Leaf::with_pages(slot.clone(), slot).with_flip(leaf_flip);
        let mut signature = stack.build_signature(&template)?;

        if options.fold_marks {
            let (from, to) = match options.binding {
                Binding::Vertical => (
                    Point::from_lengths(width, Length::ZERO),
                    Point::from_lengths(width, height),
                ),
                Binding::Horizontal => (
                    Point::from_lengths(Length::ZERO, height),
                    Point::from_lengths(width, height),
                ),
            };
            for sheet in signature.sheets_mut() {
                sheet.add_mark(Mark {
                    kind: MarkKind::Fold,
                    from,
                    to,
                });
            }
        }

        let mut volume = Volume::new();
        volume.add_signature(signature);
        volume.number_pages_from(1)?;

        log::debug!(
            "Booklet: {} pages on {} sheets ({:?} binding)",
            padded_pages,
            sheets,
            options.binding
        );

        Ok(Self {
            options: options.clone(),
            volume,
            padded_pages,
        })
    }

    pub fn options(&self) -> &BookletOptions {
        &self.options
    }

    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.volume.signatures().first()
    }

    /// Total pages including flyleaves and padding
    pub fn padded_page_count(&self) -> usize {
        self.padded_pages
    }

    pub fn sheet_count(&self) -> usize {
        self.volume.sheet_count()
    }

    /// How the printed sheet is turned over between front and back
    pub fn sheet_flip(&self) -> FlipDirection {
        match self.options.binding {
            Binding::Vertical => FlipDirection::AroundY,
            Binding::Horizontal => FlipDirection::AroundX,
        }
    }

    /// Assign content in page-number order
    ///
    /// The first `page_count` entries of the provider are used, framed by
    /// the flyleaves and followed by padding blanks.
    pub fn fill(
        &mut self,
        provider: &mut SourceProvider,
        diagnostics: &mut Diagnostics,
    ) -> Result<()> {
        let content_pages = self.options.page_count;
        let front_blanks = PAGES_PER_LEAF * self.options.front_flyleaves;

        let dropped = provider.truncate(content_pages);
        if dropped > 0 {
            diagnostics.warn(Warning::UnusedContent { remaining: dropped });
        }

        let available = provider.remaining();
        if available < content_pages {
            diagnostics.warn(Warning::ContentExhausted {
                page: u32::try_from(front_blanks + available + 1).ok(),
                filled: available,
                slots: content_pages,
            });
            provider.push_back_blanks(content_pages - available);
        }

        provider.push_front_blanks(front_blanks);
        provider.push_back_blanks(self.padded_pages - content_pages - front_blanks);

        provider.fill(self.volume.pages_in_reading_order_mut(), diagnostics)
    }

    /// Sheet sides: front and back of every sheet, outermost sheet first
    pub fn render(&self) -> VirtualDocument {
        self.volume.render_document(self.sheet_flip())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(page_count: usize) -> BookletOptions {
        BookletOptions {
            page_width: Length::pt(420.0),
            page_height: Length::pt(595.0),
            page_count,
            ..Default::default()
        }
    }

    #[test]
    fn test_zero_pages_rejected() {
        assert!(matches!(
            Booklet::new(&options(0), &mut Diagnostics::new()),
            Err(ImposeError::NoPages)
        ));
    }

    #[test]
    fn test_padding_warns() {
        let mut diagnostics = Diagnostics::new();
        let booklet = Booklet::new(&options(5), &mut diagnostics).unwrap();
        assert_eq!(booklet.padded_page_count(), 8);
        assert_eq!(booklet.sheet_count(), 2);
        assert_eq!(
            diagnostics.warnings(),
            &[Warning::PagesPadded {
                requested: 5,
                padded: 8
            }]
        );
    }

    #[test]
    fn test_flyleaves_extend_the_booklet() {
        let options = BookletOptions {
            front_flyleaves: 1,
            back_flyleaves: 1,
            ..options(4)
        };
        let booklet = Booklet::new(&options, &mut Diagnostics::new()).unwrap();
        assert_eq!(booklet.padded_page_count(), 8);
    }

    #[test]
    fn test_fold_marks_on_every_sheet() {
        let options = BookletOptions {
            fold_marks: true,
            ..options(8)
        };
        let booklet = Booklet::new(&options, &mut Diagnostics::new()).unwrap();
        let signature = booklet.signature().unwrap();
        for sheet in signature.sheets() {
            assert_eq!(sheet.marks().len(), 1);
            assert_eq!(sheet.marks()[0].from, Point::new(420.0, 0.0));
        }
    }
}
