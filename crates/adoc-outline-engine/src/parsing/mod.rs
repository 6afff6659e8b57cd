//! Line-stream driver: scanner -> recognizer -> tree builder -> numbering.
//!
//! The driver walks the document once with one line of lookahead, consults
//! the [`BlockTracker`] before considering any heading or metadata shape,
//! and degrades everything ambiguous to plain content. Numbering runs as a
//! post-pass once the tree is structurally complete.

pub mod builder;
pub mod context;
pub mod heading;

use crate::ids::{CharRefSubstitutions, SubstituteTitle};
use crate::model::document::{Document, StructureError};
use crate::model::section::SectionName;
use crate::numbering;
use crate::options::{Doctype, Options};

use builder::TreeBuilder;
use context::{BlockTracker, HeadingGate};
use heading::HeadingEvent;

/// Parses a document with default options.
pub fn parse_document(input: &str) -> Result<Document, StructureError> {
    parse_document_with(input, Options::default())
}

/// Parses a document with the given options (attribute entries in the text
/// may still update them mid-parse).
pub fn parse_document_with(input: &str, options: Options) -> Result<Document, StructureError> {
    parse_document_full(input, options, &CharRefSubstitutions)
}

/// Full-control entry point: callers may supply their own title
/// substitution hook.
pub fn parse_document_full(
    input: &str,
    options: Options,
    subs: &dyn SubstituteTitle,
) -> Result<Document, StructureError> {
    let mut doc = Document::new(options);
    let mut builder = TreeBuilder::new(&doc);
    let mut tracker = BlockTracker::default();

    // Metadata pending for the next block; cleared by blank lines and by
    // any line that turns out to be ordinary content.
    let mut pending_anchor: Option<String> = None;
    let mut pending_style: Option<String> = None;

    let mut first_block_seen = false;
    let mut pending_block: Vec<&str> = Vec::new();

    let mut lines = input.lines().peekable();
    while let Some(line) = lines.next() {
        if tracker.in_delimited_block() {
            pending_block.push(line);
            tracker.observe(line);
            if !tracker.in_delimited_block() {
                flush_block(&mut pending_block, &mut builder, &mut doc)?;
            }
            continue;
        }

        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            flush_block(&mut pending_block, &mut builder, &mut doc)?;
            pending_anchor = None;
            pending_style = None;
            tracker.observe_blank();
            continue;
        }

        if is_comment_line(trimmed) {
            continue;
        }

        if tracker.is_heading_eligible() {
            if let Some((name, set, value)) = heading::attribute_entry(trimmed) {
                doc.options
                    .apply_attribute(name, set.then_some(value));
                continue;
            }
            if let Some(id) = heading::anchor_line(trimmed) {
                pending_anchor = Some(id.to_string());
                continue;
            }
            if let Some(style) = heading::attribute_list_line(trimmed) {
                pending_style = Some(style.to_string());
                continue;
            }
            if let Some(event) = heading::recognize(trimmed, lines.peek().copied(), &tracker) {
                flush_block(&mut pending_block, &mut builder, &mut doc)?;
                let sectname = resolve_sectname(pending_style.take().as_deref());
                let accepted = place_heading(
                    &mut doc,
                    &mut builder,
                    &event,
                    sectname,
                    pending_anchor.take(),
                    first_block_seen,
                    subs,
                )?;
                if accepted {
                    if event.lines_consumed == 2 {
                        lines.next();
                    }
                    tracker.observe_heading();
                    first_block_seen = true;
                    continue;
                }
                // Title-shaped heading past the first block in an article:
                // falls through as plain content (underline, if any, is
                // reconsidered on the next iteration).
            }
        }

        first_block_seen = true;
        pending_anchor = None;
        pending_style = None;
        pending_block.push(line);
        tracker.observe(line);
    }

    flush_block(&mut pending_block, &mut builder, &mut doc)?;
    numbering::apply(&mut doc);
    Ok(doc)
}

/// Routes one recognized heading event. Returns false when the event is
/// rejected and its line should degrade to plain content (a level-0 shape
/// past the document's first block, outside book doctype).
fn place_heading(
    doc: &mut Document,
    builder: &mut TreeBuilder,
    event: &HeadingEvent,
    sectname: SectionName,
    pending_anchor: Option<String>,
    first_block_seen: bool,
    subs: &dyn SubstituteTitle,
) -> Result<bool, StructureError> {
    // Inline anchor wins when both an anchor line and an inline anchor are
    // present.
    let explicit_id = event.explicit_id.clone().or(pending_anchor);
    let title = subs.substitute(&event.title);

    let mut level = event.level;
    if level == 0 && sectname != SectionName::FloatingTitle {
        if !first_block_seen && doc.title().is_none() {
            doc.set_title(title, explicit_id);
            return Ok(true);
        }
        match doc.options.doctype {
            // Chapter-equivalent: demoted to an ordinary level-1 section.
            Doctype::Book => level = 1,
            Doctype::Article | Doctype::Manpage => return Ok(false),
        }
    }

    builder.open_section(doc, level, title, explicit_id, sectname)?;
    Ok(true)
}

fn resolve_sectname(style: Option<&str>) -> SectionName {
    style
        .and_then(SectionName::from_style)
        .unwrap_or(SectionName::Section)
}

fn flush_block(
    pending: &mut Vec<&str>,
    builder: &mut TreeBuilder,
    doc: &mut Document,
) -> Result<(), StructureError> {
    if pending.is_empty() {
        return Ok(());
    }
    let text = pending.join("\n");
    pending.clear();
    builder.add_block(doc, text)
}

/// Single-line comments (`//`); four or more slashes delimit a comment
/// block and are handled by the tracker instead.
fn is_comment_line(line: &str) -> bool {
    line.starts_with("//") && line.chars().take_while(|&c| c == '/').count() < 4
}
