//! protoc-gen-doc HTML reader.
//!
//! Every heading with an `id` opens a section; the tables that follow it, up
//! to the next heading with an `id`, belong to that anchor. A service section
//! therefore holds its method table and, after the unanchored
//! "Methods with HTTP bindings" heading, its route table.

use super::{Cell, Row, Table, TableReader};
use crate::error::{DocError, DocResult};
use crate::toc::TocIndex;
use percent_encoding::percent_decode_str;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

static SEL_TOC: LazyLock<Selector> = LazyLock::new(|| Selector::parse("ul#toc").unwrap());

static SEL_HEADING: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("h1[id], h2[id], h3[id], h4[id], h5[id], h6[id]").unwrap()
});

static SEL_HEAD_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("thead td, thead th").unwrap());

static SEL_BODY_ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tbody > tr").unwrap());

static SEL_LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

static SEL_PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());

/// The parsed input: table of contents plus anchored tables.
#[derive(Debug)]
pub struct SourceDocument {
    toc: TocIndex,
    sections: HashMap<String, Vec<Table>>,
}

impl SourceDocument {
    /// Parse a protoc-gen-doc HTML page. Fails only when the page has no
    /// table of contents.
    pub fn parse(input: &str) -> DocResult<Self> {
        let html = Html::parse_document(input);

        let toc_root = html.select(&SEL_TOC).next().ok_or(DocError::MissingToc)?;
        let toc = TocIndex::parse(toc_root);

        let mut sections: HashMap<String, Vec<Table>> = HashMap::new();
        for heading in html.select(&SEL_HEADING) {
            let Some(anchor) = heading.value().attr("id") else {
                continue;
            };
            // First definition wins on duplicate ids
            if sections.contains_key(anchor) {
                debug!(anchor, "duplicate heading id ignored");
                continue;
            }
            sections.insert(anchor.to_string(), tables_after(heading));
        }

        debug!(
            entries = toc.entries().len(),
            sections = sections.len(),
            "parsed input document"
        );
        Ok(SourceDocument { toc, sections })
    }

    pub fn toc(&self) -> &TocIndex {
        &self.toc
    }
}

impl TableReader for SourceDocument {
    fn tables_by_anchor(&self, anchor: &str) -> Option<&[Table]> {
        self.sections.tables_by_anchor(anchor)
    }
}

/// Strip the leading `#` from an href and decode `%xx` escapes.
pub fn bare_anchor(href: &str) -> String {
    let trimmed = href.trim().trim_start_matches('#');
    percent_decode_str(trimmed).decode_utf8_lossy().into_owned()
}

fn is_heading(el: &ElementRef) -> bool {
    matches!(el.value().name(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

/// Collect sibling tables until the next anchored heading.
fn tables_after(heading: ElementRef) -> Vec<Table> {
    let mut tables = Vec::new();
    for node in heading.next_siblings() {
        let Some(el) = ElementRef::wrap(node) else {
            continue;
        };
        if is_heading(&el) && el.value().attr("id").is_some() {
            break;
        }
        if el.value().name() == "table" {
            tables.push(parse_table(el));
        }
    }
    tables
}

fn parse_table(table: ElementRef) -> Table {
    let head = table
        .select(&SEL_HEAD_CELL)
        .map(|cell| collapse_whitespace(&cell.text().collect::<String>()))
        .collect();

    let rows = table
        .select(&SEL_BODY_ROW)
        .map(|tr| {
            tr.children()
                .filter_map(ElementRef::wrap)
                .filter(|el| matches!(el.value().name(), "td" | "th"))
                .map(parse_cell)
                .collect::<Row>()
        })
        .collect();

    Table { head, rows }
}

fn parse_cell(td: ElementRef) -> Cell {
    let text = cell_text(td);
    match td
        .select(&SEL_LINK)
        .next()
        .and_then(|a| a.value().attr("href"))
    {
        Some(href) => Cell::Link {
            text,
            anchor: bare_anchor(href),
        },
        None => Cell::Text(text),
    }
}

/// Cell text with whitespace collapsed; paragraphs are joined by newlines.
fn cell_text(td: ElementRef) -> String {
    let paragraphs: Vec<String> = td
        .select(&SEL_PARAGRAPH)
        .map(|p| collapse_whitespace(&p.text().collect::<String>()))
        .filter(|p| !p.is_empty())
        .collect();
    if paragraphs.is_empty() {
        collapse_whitespace(&td.text().collect::<String>())
    } else {
        paragraphs.join("\n")
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
