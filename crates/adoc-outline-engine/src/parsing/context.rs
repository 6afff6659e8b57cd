//! Block-context tracking for heading eligibility.
//!
//! Heading recognition is delegated a single question: is the current
//! position eligible for heading consideration? The [`HeadingGate`] trait
//! carries that question; [`BlockTracker`] is the reference answer,
//! tracking delimited blocks, list items and continuations, and paragraph
//! interiors from the lines the driver feeds it. Full block and list
//! parsing mechanics stay outside this crate.

/// Capability query consulted by the recognizer. False inside delimited
/// blocks, list-item continuations, and other nested-content regions.
pub trait HeadingGate {
    fn is_heading_eligible(&self) -> bool;
}

/// Characters that open a delimited block when repeated four or more
/// times on a line of their own. `--` alone opens an open block.
const DELIMITER_CHARS: &[char] = &['-', '=', '.', '/', '_', '*', '+'];

/// Line-shape scanner that classifies each consumed content line just
/// enough to answer [`HeadingGate::is_heading_eligible`].
#[derive(Debug, Default)]
pub struct BlockTracker {
    open_delimiter: Option<String>,
    in_paragraph: bool,
    in_list: bool,
    pending_continuation: bool,
}

impl BlockTracker {
    pub fn in_delimited_block(&self) -> bool {
        self.open_delimiter.is_some()
    }

    /// Feeds one content line (anything the driver did not consume as a
    /// heading or metadata line).
    pub fn observe(&mut self, line: &str) {
        let trimmed = line.trim_end();

        if let Some(open) = &self.open_delimiter {
            if closes(open, trimmed) {
                self.open_delimiter = None;
                self.in_paragraph = false;
                self.in_list = false;
                self.pending_continuation = false;
            }
            return;
        }

        // A delimited block opens only at block start; a delimiter-shaped
        // line inside a paragraph (such as a rejected underline) is text.
        if !self.in_paragraph
            && let Some(delimiter) = delimiter_line(trimmed)
        {
            self.open_delimiter = Some(delimiter.to_string());
            self.pending_continuation = false;
            return;
        }

        if trimmed == "+" {
            self.pending_continuation = true;
            return;
        }

        if is_list_item(trimmed) {
            self.in_list = true;
            self.in_paragraph = false;
            self.pending_continuation = false;
            return;
        }

        self.in_paragraph = true;
        self.pending_continuation = false;
    }

    /// A blank line closes paragraphs and list runs but not delimited
    /// blocks.
    pub fn observe_blank(&mut self) {
        if self.open_delimiter.is_some() {
            return;
        }
        self.in_paragraph = false;
        self.in_list = false;
        self.pending_continuation = false;
    }

    /// The driver consumed a heading; the position after it starts fresh.
    pub fn observe_heading(&mut self) {
        self.in_paragraph = false;
        self.in_list = false;
        self.pending_continuation = false;
    }
}

impl HeadingGate for BlockTracker {
    fn is_heading_eligible(&self) -> bool {
        self.open_delimiter.is_none()
            && !self.in_paragraph
            && !self.in_list
            && !self.pending_continuation
    }
}

fn delimiter_line(line: &str) -> Option<&str> {
    if line == "--" {
        return Some(line);
    }
    let first = line.chars().next()?;
    if !DELIMITER_CHARS.contains(&first) {
        return None;
    }
    (line.len() >= 4 && line.chars().all(|c| c == first)).then_some(line)
}

fn closes(open: &str, line: &str) -> bool {
    if open == "--" {
        return line == "--";
    }
    let Some(first) = open.chars().next() else {
        return false;
    };
    line.len() >= 4 && line.chars().all(|c| c == first)
}

fn is_list_item(line: &str) -> bool {
    let trimmed = line.trim_start();
    if let Some(rest) = trimmed
        .strip_prefix('*')
        .or_else(|| trimmed.strip_prefix('-'))
        && rest.starts_with(' ')
    {
        return true;
    }
    // Labeled list: `term::` or `term:: definition`.
    if let Some(pos) = trimmed.find("::") {
        let term = &trimmed[..pos];
        if !term.is_empty() && !term.contains(char::is_whitespace) {
            return true;
        }
    }
    false
}
