use serde::Serialize;

/// Overall document kind. `Book` allows chapter headings after the title;
/// `Article` and `Manpage` treat later title-shaped headings as plain content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Doctype {
    Article,
    Book,
    Manpage,
}

impl Doctype {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "article" => Some(Doctype::Article),
            "book" => Some(Doctype::Book),
            "manpage" => Some(Doctype::Manpage),
            _ => None,
        }
    }
}

/// Per-parse configuration, seeded from defaults and updated by attribute
/// entry lines (`:name: value`, `:name!:`) as the parser encounters them.
#[derive(Debug, Clone)]
pub struct Options {
    /// Generate synthetic ids for sections without an explicit anchor.
    pub sectids: bool,
    /// Prefix prepended to every synthetic id. May be empty.
    pub idprefix: String,
    /// Separator substituted for non-word character runs. May be empty,
    /// in which case the runs are deleted.
    pub idseparator: String,
    /// Assign per-branch ordinals and render section numbers.
    pub sectnums: bool,
    /// Whether a table of contents was requested.
    pub toc: bool,
    pub doctype: Doctype,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            sectids: true,
            idprefix: "_".to_string(),
            idseparator: "_".to_string(),
            sectnums: false,
            toc: false,
            doctype: Doctype::Article,
        }
    }
}

impl Options {
    /// Applies one attribute entry. `value` is `None` for the unset form
    /// (`:name!:`) and `Some` (possibly empty) for the set form. Unknown
    /// attribute names are ignored.
    pub fn apply_attribute(&mut self, name: &str, value: Option<&str>) {
        match name {
            "sectids" => self.sectids = value.is_some(),
            "idprefix" => self.idprefix = value.unwrap_or("").to_string(),
            "idseparator" => self.idseparator = value.unwrap_or("").to_string(),
            // `numbered` is the historical spelling, kept as an alias.
            "sectnums" | "numbered" => self.sectnums = value.is_some(),
            "toc" => self.toc = value.is_some(),
            "doctype" => {
                if let Some(v) = value
                    && let Some(doctype) = Doctype::parse(v)
                {
                    self.doctype = doctype;
                }
            }
            _ => {}
        }
    }
}
