//! Table-of-contents projection of a finished section tree.

use serde::Serialize;

use super::document::Document;
use super::section::{SectionId, SectionName};

/// One outline entry. Entries without an id render as plain text rather
/// than links; nesting mirrors section nesting exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub id: Option<String>,
    pub label: String,
    pub children: Vec<TocEntry>,
}

/// Presentation label for a section: number path for numbered sections,
/// caption prefix for captioned ones, bare title otherwise.
pub fn section_label(doc: &Document, id: SectionId) -> String {
    let section = doc.section(id);
    if section.numbered {
        format!("{} {}", doc.sectnum_default(id), section.title)
    } else if let Some(caption) = &section.caption {
        format!("{caption}{}", section.title)
    } else {
        section.title.clone()
    }
}

/// Walks the numbered tree and produces the ordered outline, skipping
/// floating titles.
pub fn build_toc(doc: &Document) -> Vec<TocEntry> {
    entries_under(doc, doc.root())
}

fn entries_under(doc: &Document, id: SectionId) -> Vec<TocEntry> {
    doc.child_sections(id)
        .filter(|sid| doc.section(*sid).sectname != SectionName::FloatingTitle)
        .map(|sid| TocEntry {
            id: doc.section(sid).id.clone(),
            label: section_label(doc, sid),
            children: entries_under(doc, sid),
        })
        .collect()
}
