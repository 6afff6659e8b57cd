//! Heading recognition: classifies a candidate line (or line pair) as a
//! heading event or rejects it. Pure over (lines, context query); all
//! block-context awareness comes through the [`HeadingGate`].
//!
//! Ambiguity always degrades to "not a heading": a mismatched underline or
//! a heading shape inside a suppressed context is ordinary content, never
//! an error.

use super::context::HeadingGate;

/// Longest recognized marker run: `=====` maps to level 4.
pub const MAX_MARKER_RUN: usize = 5;

/// A recognized title occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingEvent {
    pub level: usize,
    /// Raw title text, pre-substitution, with any inline anchor stripped.
    pub title: String,
    /// Id captured from an inline anchor embedded in the title.
    pub explicit_id: Option<String>,
    /// 1 for the single-line form, 2 for the underline form.
    pub lines_consumed: usize,
}

/// Classifies `line` (with one line of lookahead for the underline form).
/// Returns `None` when the gate reports the position ineligible or the
/// shape does not match either heading form.
pub fn recognize(line: &str, next: Option<&str>, gate: &dyn HeadingGate) -> Option<HeadingEvent> {
    if !gate.is_heading_eligible() {
        return None;
    }
    single_line(line).or_else(|| next.and_then(|underline| underlined(line, underline)))
}

/// `== Title` form: a run of L markers maps to level L-1. A trailing run is
/// stripped only when it mirrors the leading run exactly.
fn single_line(line: &str) -> Option<HeadingEvent> {
    let trimmed = line.trim_end();
    let run = trimmed.chars().take_while(|&c| c == '=').count();
    if run == 0 || run > MAX_MARKER_RUN {
        return None;
    }
    let rest = &trimmed[run..];
    if !rest.starts_with(' ') {
        return None;
    }
    let mut title = rest.trim_start_matches(' ');
    if title.is_empty() {
        return None;
    }

    let marker = "=".repeat(run);
    if let Some(stripped) = title.strip_suffix(&marker)
        && !stripped.ends_with('=')
        && stripped.ends_with(' ')
    {
        let stripped = stripped.trim_end();
        if !stripped.is_empty() {
            title = stripped;
        }
    }

    let (title, explicit_id) = take_inline_anchor(title);
    Some(HeadingEvent {
        level: run - 1,
        title,
        explicit_id,
        lines_consumed: 1,
    })
}

/// Underline form: a content line followed by a line of one repeated
/// character from the per-level alphabet, within one char of the title's
/// length (in chars, not bytes).
fn underlined(line: &str, underline: &str) -> Option<HeadingEvent> {
    let title = line.trim_end();
    if title.is_empty() || title.starts_with('.') {
        return None;
    }
    // Metadata lines are never heading text.
    if anchor_line(title).is_some()
        || attribute_list_line(title).is_some()
        || attribute_entry(title).is_some()
    {
        return None;
    }

    let (ch, count) = uniform_run(underline.trim_end())?;
    let level = underline_level(ch)?;
    if count.abs_diff(title.chars().count()) > 1 {
        return None;
    }

    let (title, explicit_id) = take_inline_anchor(title);
    Some(HeadingEvent {
        level,
        title,
        explicit_id,
        lines_consumed: 2,
    })
}

fn underline_level(ch: char) -> Option<usize> {
    match ch {
        '=' => Some(0),
        '-' => Some(1),
        '~' => Some(2),
        '^' => Some(3),
        '+' => Some(4),
        _ => None,
    }
}

/// A line made of a single repeated character, at least two long.
fn uniform_run(line: &str) -> Option<(char, usize)> {
    let mut chars = line.chars();
    let first = chars.next()?;
    let mut count = 1;
    for c in chars {
        if c != first {
            return None;
        }
        count += 1;
    }
    (count >= 2).then_some((first, count))
}

/// Splits a trailing `[[id]]` anchor off a title.
fn take_inline_anchor(title: &str) -> (String, Option<String>) {
    let trimmed = title.trim_end();
    if let Some(body) = trimmed.strip_suffix("]]")
        && let Some(pos) = body.rfind("[[")
    {
        let id = &body[pos + 2..];
        let head = body[..pos].trim_end();
        if valid_anchor_id(id) && !head.is_empty() {
            return (head.to_string(), Some(id.to_string()));
        }
    }
    (trimmed.to_string(), None)
}

/// A standalone `[[id]]` anchor line; consumed, never rendered.
pub fn anchor_line(line: &str) -> Option<&str> {
    let inner = line.strip_prefix("[[")?.strip_suffix("]]")?;
    valid_anchor_id(inner).then_some(inner)
}

/// A `[style, ...]` attribute list line; returns the leading style token.
pub fn attribute_list_line(line: &str) -> Option<&str> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?;
    if inner.starts_with('[') || inner.contains([']', '[']) {
        return None;
    }
    let style = inner.split(',').next().unwrap_or("").trim();
    (!style.is_empty() && style.chars().all(|c| c.is_alphanumeric() || c == '_'))
        .then_some(style)
}

/// A `:name: value` / `:name!:` attribute entry line. Returns the name,
/// whether it is the set form, and the (possibly empty) value.
pub fn attribute_entry(line: &str) -> Option<(&str, bool, &str)> {
    let rest = line.strip_prefix(':')?;
    let end = rest.find(':')?;
    let mut name = &rest[..end];
    let value = rest[end + 1..].trim();
    let set = !name.ends_with('!');
    if !set {
        name = &name[..name.len() - 1];
    }
    if name.is_empty()
        || !name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return None;
    }
    Some((name, set, value))
}

fn valid_anchor_id(id: &str) -> bool {
    let mut chars = id.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | ':' | '.' | '-'))
}
