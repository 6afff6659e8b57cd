//! Section tree assembly from the ordered heading-event stream.

use crate::model::document::{Document, StructureError};
use crate::model::section::{Section, SectionChild, SectionId, SectionName};

/// Maintains the stack of currently open sections; top of stack is the
/// innermost container for subsequent content. The document root sits at
/// the bottom and is never popped.
#[derive(Debug)]
pub(crate) struct TreeBuilder {
    stack: Vec<SectionId>,
}

impl TreeBuilder {
    pub(crate) fn new(doc: &Document) -> Self {
        Self {
            stack: vec![doc.root()],
        }
    }

    /// Attaches a new section for a heading event at `level`. Floating
    /// titles attach as leaves without opening a containment scope; all
    /// other styles become the current open section.
    pub(crate) fn open_section(
        &mut self,
        doc: &mut Document,
        level: usize,
        title: String,
        explicit_id: Option<String>,
        sectname: SectionName,
    ) -> Result<SectionId, StructureError> {
        if sectname != SectionName::FloatingTitle {
            while self.stack.len() > 1 && self.top_level(doc)? >= level {
                self.stack.pop();
            }
        }
        let parent = *self
            .stack
            .last()
            .ok_or(StructureError::StackUnderflow { level })?;

        let id = doc.allocate_id(&title, explicit_id);
        let section_id = doc.push_section(Section {
            level,
            id,
            title,
            sectname,
            numbered: false,
            ordinal: None,
            caption: None,
            parent: Some(parent),
            children: Vec::new(),
        });
        doc.section_mut(parent)
            .children
            .push(SectionChild::Section(section_id));

        if sectname != SectionName::FloatingTitle {
            self.stack.push(section_id);
        }
        Ok(section_id)
    }

    /// Attaches one opaque body block to the current open section.
    pub(crate) fn add_block(
        &mut self,
        doc: &mut Document,
        text: String,
    ) -> Result<(), StructureError> {
        let parent = *self
            .stack
            .last()
            .ok_or(StructureError::StackUnderflow { level: 0 })?;
        let block_id = doc.push_block(text);
        doc.section_mut(parent)
            .children
            .push(SectionChild::Block(block_id));
        Ok(())
    }

    fn top_level(&self, doc: &Document) -> Result<usize, StructureError> {
        let top = *self
            .stack
            .last()
            .ok_or(StructureError::StackUnderflow { level: 0 })?;
        Ok(doc.section(top).level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;

    fn open(
        builder: &mut TreeBuilder,
        doc: &mut Document,
        level: usize,
        title: &str,
    ) -> SectionId {
        builder
            .open_section(doc, level, title.to_string(), None, SectionName::Section)
            .unwrap()
    }

    #[test]
    fn siblings_pop_back_to_common_parent() {
        let mut doc = Document::new(Options::default());
        let mut builder = TreeBuilder::new(&doc);

        let a = open(&mut builder, &mut doc, 1, "A");
        let a1 = open(&mut builder, &mut doc, 2, "A1");
        let b = open(&mut builder, &mut doc, 1, "B");

        assert_eq!(doc.section(a1).parent, Some(a));
        assert_eq!(doc.section(b).parent, Some(doc.root()));
    }

    #[test]
    fn level_jump_attaches_to_deepest_open_section() {
        let mut doc = Document::new(Options::default());
        let mut builder = TreeBuilder::new(&doc);

        let a = open(&mut builder, &mut doc, 1, "A");
        let deep = open(&mut builder, &mut doc, 3, "Deep");
        assert_eq!(doc.section(deep).parent, Some(a));
    }

    #[test]
    fn floating_title_is_a_leaf_and_not_the_open_section() {
        let mut doc = Document::new(Options::default());
        let mut builder = TreeBuilder::new(&doc);

        let a = open(&mut builder, &mut doc, 1, "A");
        let float = builder
            .open_section(
                &mut doc,
                2,
                "Float".to_string(),
                None,
                SectionName::FloatingTitle,
            )
            .unwrap();
        builder.add_block(&mut doc, "after the float".to_string()).unwrap();

        assert_eq!(doc.section(float).parent, Some(a));
        assert!(doc.section(float).children.is_empty());
        // The block landed in A, not in the floating title.
        assert_eq!(doc.section(a).children.len(), 2);
    }

    #[test]
    fn blocks_interleave_with_subsections_in_document_order() {
        let mut doc = Document::new(Options::default());
        let mut builder = TreeBuilder::new(&doc);

        let a = open(&mut builder, &mut doc, 1, "A");
        builder.add_block(&mut doc, "intro".to_string()).unwrap();
        let a1 = open(&mut builder, &mut doc, 2, "A1");

        let children = &doc.section(a).children;
        assert!(matches!(children[0], SectionChild::Block(_)));
        assert_eq!(children[1], SectionChild::Section(a1));
    }
}
