pub mod document;
pub mod section;
pub mod toc;

pub use document::{Document, StructureError};
pub use section::{BlockId, Section, SectionChild, SectionId, SectionName, StylePolicy};
pub use toc::{TocEntry, build_toc, section_label};
