use thiserror::Error;

use crate::ids::{self, IdRegistry};
use crate::options::Options;

use super::section::{BlockId, Section, SectionChild, SectionId, SectionName};

/// Internal invariant violations. Malformed document text never produces
/// one of these; heading-shaped input that cannot be placed degrades to
/// plain content instead.
#[derive(Debug, Error)]
pub enum StructureError {
    #[error("section stack underflow while attaching level {level} heading")]
    StackUnderflow { level: usize },
}

/// The finished (or in-progress) section tree for one document parse.
///
/// Sections live in an arena indexed by [`SectionId`]; the root node (id 0,
/// level 0, sectname `document`) holds the document title. The id registry
/// is scoped to this parse and discarded with it.
#[derive(Debug)]
pub struct Document {
    pub options: Options,
    sections: Vec<Section>,
    blocks: Vec<String>,
    registry: IdRegistry,
}

impl Document {
    pub fn new(options: Options) -> Self {
        let root = Section {
            level: 0,
            id: None,
            title: String::new(),
            sectname: SectionName::Document,
            numbered: false,
            ordinal: None,
            caption: None,
            parent: None,
            children: Vec::new(),
        };
        Self {
            options,
            sections: vec![root],
            blocks: Vec::new(),
            registry: IdRegistry::default(),
        }
    }

    pub fn root(&self) -> SectionId {
        SectionId(0)
    }

    /// Document title, if a level-0 heading opened the document.
    pub fn title(&self) -> Option<&str> {
        let title = &self.sections[0].title;
        (!title.is_empty()).then_some(title.as_str())
    }

    pub fn section(&self, id: SectionId) -> &Section {
        &self.sections[id.0]
    }

    pub(crate) fn section_mut(&mut self, id: SectionId) -> &mut Section {
        &mut self.sections[id.0]
    }

    pub fn block(&self, id: BlockId) -> &str {
        &self.blocks[id.0]
    }

    pub fn section_count(&self) -> usize {
        self.sections.len() - 1
    }

    /// Section children of a node, in document order.
    pub fn child_sections(&self, id: SectionId) -> impl Iterator<Item = SectionId> + '_ {
        self.section(id).children.iter().filter_map(|c| match c {
            SectionChild::Section(sid) => Some(*sid),
            SectionChild::Block(_) => None,
        })
    }

    /// All sections (excluding the root) in document order.
    pub fn all_sections(&self) -> Vec<SectionId> {
        let mut out = Vec::with_capacity(self.section_count());
        self.collect_sections(self.root(), &mut out);
        out
    }

    fn collect_sections(&self, id: SectionId, out: &mut Vec<SectionId>) {
        for child in self.child_sections(id) {
            out.push(child);
            self.collect_sections(child, out);
        }
    }

    pub(crate) fn set_title(&mut self, title: String, explicit_id: Option<String>) {
        if let Some(id) = &explicit_id {
            self.registry.register(id);
        }
        let root = &mut self.sections[0];
        root.title = title;
        root.id = explicit_id;
    }

    /// Resolves the id for a new section: explicit ids verbatim, synthetic
    /// ids derived from the substituted title, `None` with `sectids` off.
    pub(crate) fn allocate_id(
        &mut self,
        title: &str,
        explicit_id: Option<String>,
    ) -> Option<String> {
        match explicit_id {
            Some(id) => {
                self.registry.register(&id);
                Some(id)
            }
            None if !self.options.sectids => None,
            None => {
                let base = ids::generate_base(title, &self.options);
                Some(self.registry.claim(base))
            }
        }
    }

    pub(crate) fn push_section(&mut self, section: Section) -> SectionId {
        let id = SectionId(self.sections.len());
        self.sections.push(section);
        id
    }

    pub(crate) fn push_block(&mut self, text: String) -> BlockId {
        let id = BlockId(self.blocks.len());
        self.blocks.push(text);
        id
    }

    /// Section number path, e.g. `"1.1."` for the first child of the first
    /// numbered section. Entries come from numbered ancestors only. With
    /// `trailing` the delimiter also follows the final entry.
    pub fn sectnum(&self, id: SectionId, delimiter: char, trailing: bool) -> String {
        let mut entries = Vec::new();
        let mut cursor = Some(id);
        while let Some(sid) = cursor {
            let section = self.section(sid);
            if let Some(ordinal) = section.ordinal {
                entries.push(ordinal.to_string());
            }
            cursor = section.parent;
        }
        entries.reverse();

        let mut out = String::new();
        for (i, entry) in entries.iter().enumerate() {
            out.push_str(entry);
            if trailing || i + 1 < entries.len() {
                out.push(delimiter);
            }
        }
        out
    }

    /// `sectnum` with the default `'.'` delimiter and trailing form.
    pub fn sectnum_default(&self, id: SectionId) -> String {
        self.sectnum(id, '.', true)
    }
}
