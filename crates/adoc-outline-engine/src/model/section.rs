use serde::Serialize;

/// Index of a section in the document arena. The root is always id 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SectionId(pub(crate) usize);

/// Index of an opaque body block in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BlockId(pub(crate) usize);

/// Categorical style of a section, governing numbering and captioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionName {
    Section,
    Appendix,
    Glossary,
    Bibliography,
    Preface,
    Dedication,
    Colophon,
    Abstract,
    Synopsis,
    FloatingTitle,
    /// Root only.
    Document,
}

/// How a style participates in numbering and captioning.
#[derive(Debug, Clone, Copy)]
pub struct StylePolicy {
    /// Takes an ordinary per-parent ordinal when numbering is on.
    pub takes_ordinal: bool,
    /// Caption word, completed with the document-wide letter counter.
    pub caption: Option<&'static str>,
    /// Descendants are excluded from ordinary numbering.
    pub special: bool,
}

impl SectionName {
    /// Maps a style token from an attribute list to a section name.
    /// `float` and `discrete` both force a floating title.
    pub fn from_style(style: &str) -> Option<Self> {
        match style {
            "float" | "discrete" => Some(SectionName::FloatingTitle),
            "appendix" => Some(SectionName::Appendix),
            "glossary" => Some(SectionName::Glossary),
            "bibliography" => Some(SectionName::Bibliography),
            "preface" => Some(SectionName::Preface),
            "dedication" => Some(SectionName::Dedication),
            "colophon" => Some(SectionName::Colophon),
            "abstract" => Some(SectionName::Abstract),
            "synopsis" => Some(SectionName::Synopsis),
            _ => None,
        }
    }

    pub fn policy(self) -> StylePolicy {
        match self {
            SectionName::Section | SectionName::Document => StylePolicy {
                takes_ordinal: true,
                caption: None,
                special: false,
            },
            SectionName::Appendix => StylePolicy {
                takes_ordinal: false,
                caption: Some("Appendix"),
                special: true,
            },
            SectionName::FloatingTitle => StylePolicy {
                takes_ordinal: false,
                caption: None,
                special: false,
            },
            _ => StylePolicy {
                takes_ordinal: false,
                caption: None,
                special: true,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SectionName::Section => "section",
            SectionName::Appendix => "appendix",
            SectionName::Glossary => "glossary",
            SectionName::Bibliography => "bibliography",
            SectionName::Preface => "preface",
            SectionName::Dedication => "dedication",
            SectionName::Colophon => "colophon",
            SectionName::Abstract => "abstract",
            SectionName::Synopsis => "synopsis",
            SectionName::FloatingTitle => "floating_title",
            SectionName::Document => "document",
        }
    }
}

/// Child slot of a section: either a nested section or an opaque body
/// block, interleaved in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SectionChild {
    Section(SectionId),
    Block(BlockId),
}

/// One heading and its subtree. Owned by the [`Document`](super::Document)
/// arena; `parent` is a non-owning back-reference used for number-path
/// queries only.
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    /// Nesting level; 0 is reserved for the document root.
    pub level: usize,
    /// `None` when synthetic ids are disabled and no anchor was given.
    pub id: Option<String>,
    /// Title text, post text-substitution.
    pub title: String,
    pub sectname: SectionName,
    /// Set by the numbering pass for default-styled sections under the
    /// `sectnums` option with no special-styled ancestor.
    pub numbered: bool,
    /// 1-based position among numbered siblings under the same parent.
    pub ordinal: Option<u32>,
    /// Precomputed label prefix, e.g. `"Appendix A: "`.
    pub caption: Option<String>,
    pub parent: Option<SectionId>,
    pub children: Vec<SectionChild>,
}
