pub mod constants;
pub mod content;
mod diagnostics;
pub mod geometry;
pub mod impose;
pub mod model;
mod options;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod source;
pub mod stack;
mod stats;
mod types;

pub use content::{Content, ContentKind, Mark, MarkKind, SourcePage, VirtualDocument, VirtualPage};
pub use diagnostics::{Diagnostics, Warning};
pub use impose::{Booklet, Imposition, NUp, Overlay, impose, impose_task};
pub use options::*;
#[cfg(feature = "pdf")]
pub use pdf::{import_pdf, import_pdfs, load_multiple_pdfs, load_pdf};
pub use stats::calculate_statistics;
pub use types::*;
