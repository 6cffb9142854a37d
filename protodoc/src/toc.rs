//! Table-of-contents index.
//!
//! protoc-gen-doc lists every file, message, enum and service in `ul#toc`.
//! Navigable entries carry a one-letter badge inside their link:
//!
//! ```html
//! <li><a href="#pkg.UserService"><span class="badge">S</span>UserService</a></li>
//! ```
//!
//! Entries without a badge (file names, "Scalar Value Types") are structural
//! and skipped.

use crate::model::{TocEntry, TocKind};
use crate::source::html::bare_anchor;
use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

static SEL_ITEM: LazyLock<Selector> = LazyLock::new(|| Selector::parse("li").unwrap());

#[derive(Debug, Default)]
pub struct TocIndex {
    entries: Vec<TocEntry>,
}

impl TocIndex {
    /// Parse the entries under a TOC root element, in document order.
    pub fn parse(toc_root: ElementRef) -> Self {
        let entries = toc_root.select(&SEL_ITEM).filter_map(parse_item).collect();
        TocIndex { entries }
    }

    #[cfg(test)]
    pub fn from_entries(entries: Vec<TocEntry>) -> Self {
        TocIndex { entries }
    }

    pub fn entries(&self) -> &[TocEntry] {
        &self.entries
    }

    pub fn service_entries(&self) -> impl Iterator<Item = &TocEntry> {
        self.entries.iter().filter(|e| e.kind == TocKind::Service)
    }

    pub fn enum_anchors(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| e.kind == TocKind::Enum)
            .map(|e| e.anchor.as_str())
    }
}

/// Turn one `<li>` into an entry. Only the item's own link is considered,
/// not links of nested lists.
fn parse_item(li: ElementRef) -> Option<TocEntry> {
    let link = li
        .children()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "a")?;
    let href = link.value().attr("href")?;

    let badge = link
        .children()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "span")?;
    let tag = badge.text().collect::<String>().trim().to_string();
    if tag.is_empty() {
        return None;
    }

    let display_name = link
        .children()
        .filter_map(|node| node.value().as_text().map(|t| t.trim().to_string()))
        .collect::<String>();

    Some(TocEntry {
        anchor: bare_anchor(href),
        display_name,
        kind: TocKind::from_tag(&tag),
    })
}
