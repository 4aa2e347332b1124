//! Book model: pages, leaves, sheets, signatures and volumes
//!
//! These types describe where content goes, independent of the content
//! itself. Pages start out blank and unnumbered; numbering happens on a
//! [`Signature`] or [`Volume`] and content is assigned later by a
//! [`SourceProvider`](crate::source::SourceProvider).

mod grid;
mod leaf;
mod order;
mod page;
mod sheet;
mod signature;
mod volume;

pub use grid::*;
pub use leaf::*;
pub use order::*;
pub use page::*;
pub use sheet::*;
pub use signature::*;
pub use volume::*;
