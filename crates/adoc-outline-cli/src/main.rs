use std::path::PathBuf;

use adoc_outline_engine::{
    Doctype, Document, Options, SectionId, build_toc, parse_document_with, section_label,
};
use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "adoc-outline",
    about = "Print the section outline or table of contents of an AsciiDoc-style document"
)]
struct Args {
    /// Document to analyze.
    file: PathBuf,

    /// Print the table of contents (sections only, floating titles
    /// skipped) instead of the full outline.
    #[arg(long)]
    toc: bool,

    /// Emit JSON instead of plain text.
    #[arg(long)]
    json: bool,

    /// Override the document type (article, book, manpage).
    #[arg(long)]
    doctype: Option<String>,

    /// Force section numbering on, as if :numbered: were set.
    #[arg(long)]
    numbered: bool,
}

/// Outline node for JSON output: the renderer-facing view of one section.
#[derive(Serialize)]
struct OutlineNode {
    level: usize,
    id: Option<String>,
    sectname: &'static str,
    label: String,
    children: Vec<OutlineNode>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut options = Options::default();
    if let Some(doctype) = &args.doctype {
        options.doctype = Doctype::parse(doctype)
            .with_context(|| format!("unknown doctype {doctype:?}"))?;
    }
    if args.numbered {
        options.sectnums = true;
    }

    let input = std::fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let doc = parse_document_with(&input, options)
        .with_context(|| format!("parsing {}", args.file.display()))?;
    debug!(sections = doc.section_count(), title = ?doc.title(), "parsed document");

    match (args.toc, args.json) {
        (true, true) => println!("{}", serde_json::to_string_pretty(&build_toc(&doc))?),
        (true, false) => {
            for entry in build_toc(&doc) {
                print_toc_entry(&entry, 0);
            }
        }
        (false, true) => {
            let outline: Vec<OutlineNode> = doc
                .child_sections(doc.root())
                .map(|id| outline_node(&doc, id))
                .collect();
            println!("{}", serde_json::to_string_pretty(&outline)?);
        }
        (false, false) => {
            if let Some(title) = doc.title() {
                println!("{title}");
            }
            for id in doc.child_sections(doc.root()) {
                print_section(&doc, id, 1);
            }
        }
    }

    Ok(())
}

fn outline_node(doc: &Document, id: SectionId) -> OutlineNode {
    let section = doc.section(id);
    OutlineNode {
        level: section.level,
        id: section.id.clone(),
        sectname: section.sectname.as_str(),
        label: section_label(doc, id),
        children: doc
            .child_sections(id)
            .map(|child| outline_node(doc, child))
            .collect(),
    }
}

fn print_section(doc: &Document, id: SectionId, depth: usize) {
    let section = doc.section(id);
    let indent = "  ".repeat(depth);
    match &section.id {
        Some(sid) => println!("{indent}{} [{sid}]", section_label(doc, id)),
        None => println!("{indent}{}", section_label(doc, id)),
    }
    for child in doc.child_sections(id) {
        print_section(doc, child, depth + 1);
    }
}

fn print_toc_entry(entry: &adoc_outline_engine::TocEntry, depth: usize) {
    let indent = "  ".repeat(depth);
    println!("{indent}{}", entry.label);
    for child in &entry.children {
        print_toc_entry(child, depth + 1);
    }
}
