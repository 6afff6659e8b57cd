//! Document-structure resolver for AsciiDoc-style markup: heading
//! recognition, section tree assembly, id allocation, numbering, and the
//! table-of-contents projection.
//!
//! The pipeline is strictly sequential per document: the line driver feeds
//! the heading recognizer (which consults a block-context gate), the tree
//! builder assembles sections with ids allocated inline, and the numbering
//! pass and TOC builder run over the finished tree. All mutable state is
//! scoped to one parse; concurrent parses just use separate [`Document`]s.

pub mod ids;
pub mod model;
pub mod numbering;
pub mod options;
pub mod parsing;

pub use ids::{CharRefSubstitutions, IdRegistry, SubstituteTitle};
pub use model::{
    BlockId, Document, Section, SectionChild, SectionId, SectionName, StructureError, TocEntry,
    build_toc, section_label,
};
pub use options::{Doctype, Options};
pub use parsing::context::{BlockTracker, HeadingGate};
pub use parsing::heading::HeadingEvent;
pub use parsing::{parse_document, parse_document_full, parse_document_with};
