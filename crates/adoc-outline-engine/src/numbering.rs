//! Post-pass over the finished tree: per-parent ordinals for default-styled
//! sections (when `sectnums` is set) and captions for lettered specials.
//!
//! Appendix letters come from a single document-wide counter, incremented
//! once per appendix in document order regardless of nesting depth, and
//! assigned whether or not numbering is active. Floating titles are skipped
//! entirely.

use crate::model::document::Document;
use crate::model::section::{SectionId, SectionName};

pub fn apply(doc: &mut Document) {
    let mut letters = LetterCounter::default();
    let root = doc.root();
    visit(doc, root, false, &mut letters);
}

fn visit(doc: &mut Document, parent: SectionId, under_special: bool, letters: &mut LetterCounter) {
    let mut ordinal = 0u32;
    let children: Vec<SectionId> = doc.child_sections(parent).collect();
    for id in children {
        let sectname = doc.section(id).sectname;
        if sectname == SectionName::FloatingTitle {
            continue;
        }
        let policy = sectname.policy();

        if policy.takes_ordinal && !under_special && doc.options.sectnums {
            ordinal += 1;
            let section = doc.section_mut(id);
            section.ordinal = Some(ordinal);
            section.numbered = true;
        }

        if let Some(word) = policy.caption {
            let caption = format!("{word} {}: ", letters.next_letter());
            doc.section_mut(id).caption = Some(caption);
        }

        visit(doc, id, under_special || policy.special, letters);
    }
}

/// Document-wide appendix letter counter: A, B, C, ...
#[derive(Debug, Default)]
struct LetterCounter {
    next: u32,
}

impl LetterCounter {
    fn next_letter(&mut self) -> char {
        let letter = char::from_u32('A' as u32 + self.next).unwrap_or('?');
        self.next += 1;
        letter
    }
}
