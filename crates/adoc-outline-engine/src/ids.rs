//! Synthetic id derivation and the per-document id registry.
//!
//! Ids are derived from the section title *after* text substitutions have
//! been applied, so `Section{sp}One` and `Section One` produce the same id.
//! Explicit ids (from anchors) are taken verbatim and bypass uniqueness
//! checking; that is a caller contract, not a guarantee.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;

use crate::options::Options;

/// Maximal runs of non-word characters (Unicode-aware, so letters of any
/// script count as word characters).
fn non_word_runs() -> &'static Regex {
    static NON_WORD: OnceLock<Regex> = OnceLock::new();
    NON_WORD.get_or_init(|| Regex::new(r"\W+").expect("valid non-word regex"))
}

/// Hook for expanding inline markup and character references in a title
/// before it is stored or used for id derivation.
pub trait SubstituteTitle {
    fn substitute(&self, raw: &str) -> String;
}

/// Default substitution hook: expands the common character-reference
/// attributes (`{sp}`, `{nbsp}`, `{amp}`, `{lt}`, `{gt}`). Unknown
/// references are left intact.
#[derive(Debug, Default, Clone, Copy)]
pub struct CharRefSubstitutions;

impl SubstituteTitle for CharRefSubstitutions {
    fn substitute(&self, raw: &str) -> String {
        static CHAR_REF: OnceLock<Regex> = OnceLock::new();
        let re = CHAR_REF.get_or_init(|| Regex::new(r"\{(\w+)\}").expect("valid char-ref regex"));
        re.replace_all(raw, |caps: &regex::Captures| {
            match &caps[1] {
                "sp" => " ",
                "nbsp" => "\u{00a0}",
                "amp" => "&",
                "lt" => "<",
                "gt" => ">",
                _ => return caps[0].to_string(),
            }
            .to_string()
        })
        .into_owned()
    }
}

/// Derives the base id (before uniqueness suffixing) for a substituted
/// title under the given options.
pub fn generate_base(title: &str, options: &Options) -> String {
    let lowered = title.to_lowercase();
    let sep = options.idseparator.as_str();
    let mut base = non_word_runs().replace_all(&lowered, sep).into_owned();

    if !sep.is_empty() {
        let doubled = format!("{sep}{sep}");
        while base.contains(&doubled) {
            base = base.replace(&doubled, sep);
        }
        while let Some(rest) = base.strip_prefix(sep) {
            base = rest.to_string();
        }
        while let Some(rest) = base.strip_suffix(sep) {
            base = rest.to_string();
        }
    }

    format!("{}{}", options.idprefix, base)
}

/// Tracks ids already used in one document parse, and hands out `_2`, `_3`,
/// ... suffixes on collision. The suffix separator is always an underscore,
/// independent of the configured `idseparator`.
#[derive(Debug, Default)]
pub struct IdRegistry {
    used: HashSet<String>,
    counters: HashMap<String, u32>,
}

impl IdRegistry {
    /// Claims a synthetic base id, suffixing it if already taken. The first
    /// collision yields `_2`, never `_1`.
    pub fn claim(&mut self, base: String) -> String {
        if self.used.insert(base.clone()) {
            return base;
        }
        let counter = self.counters.entry(base.clone()).or_insert(1);
        loop {
            *counter += 1;
            let candidate = format!("{base}_{counter}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    /// Records an explicit id without any uniqueness check, so later
    /// synthetic ids steer around it.
    pub fn register(&mut self, id: &str) {
        self.used.insert(id.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> Options {
        Options::default()
    }

    #[test]
    fn plain_title() {
        assert_eq!(generate_base("Section One", &opts()), "_section_one");
    }

    #[test]
    fn non_word_characters_become_separators() {
        assert_eq!(generate_base("We're back!", &opts()), "_we_re_back");
    }

    #[test]
    fn symbol_runs_collapse_to_one_separator() {
        assert_eq!(generate_base("Section $ One", &opts()), "_section_one");
    }

    #[test]
    fn literal_underscores_do_not_double_up() {
        assert_eq!(generate_base("Section_ One", &opts()), "_section_one");
    }

    #[test]
    fn custom_prefix() {
        let mut options = opts();
        options.idprefix = "id_".to_string();
        assert_eq!(generate_base("Section One", &options), "id_section_one");
    }

    #[test]
    fn blank_prefix() {
        let mut options = opts();
        options.idprefix = String::new();
        assert_eq!(generate_base("Section One", &options), "section_one");
    }

    #[test]
    fn custom_separator() {
        let mut options = opts();
        options.idseparator = "-".to_string();
        assert_eq!(generate_base("Section One", &options), "_section-one");
    }

    #[test]
    fn blank_separator_deletes_runs() {
        let mut options = opts();
        options.idseparator = String::new();
        assert_eq!(generate_base("Section One", &options), "_sectionone");
    }

    #[test]
    fn base_derivation_is_idempotent_per_config() {
        let options = opts();
        let first = generate_base("What the #@$ is this?", &options);
        let second = generate_base("What the #@$ is this?", &options);
        assert_eq!(first, second);
        assert_eq!(first, "_what_the_is_this");
    }

    #[test]
    fn word_characters_of_any_script_survive() {
        assert_eq!(
            generate_base("Asciidoctor in 中文", &opts()),
            "_asciidoctor_in_中文"
        );
    }

    #[test]
    fn collisions_suffix_from_two() {
        let mut registry = IdRegistry::default();
        assert_eq!(registry.claim("_some_section".to_string()), "_some_section");
        assert_eq!(
            registry.claim("_some_section".to_string()),
            "_some_section_2"
        );
        assert_eq!(
            registry.claim("_some_section".to_string()),
            "_some_section_3"
        );
    }

    #[test]
    fn collision_suffix_uses_underscore_even_with_custom_separator() {
        let mut options = opts();
        options.idseparator = "-".to_string();
        let mut registry = IdRegistry::default();
        let base = generate_base("Section One", &options);
        assert_eq!(registry.claim(base.clone()), "_section-one");
        assert_eq!(registry.claim(base), "_section-one_2");
    }

    #[test]
    fn explicit_registration_steers_synthetic_ids() {
        let mut registry = IdRegistry::default();
        registry.register("_taken");
        assert_eq!(registry.claim("_taken".to_string()), "_taken_2");
    }

    #[test]
    fn char_ref_substitutions() {
        let subs = CharRefSubstitutions;
        assert_eq!(subs.substitute("Section{sp}One"), "Section One");
        assert_eq!(subs.substitute("a{lt}b{gt}c{amp}d"), "a<b>c&d");
        assert_eq!(subs.substitute("{unknown} stays"), "{unknown} stays");
    }
}
