//! Read access to the tables of the input document.
//!
//! The core only sees anchors, tables and typed cells; [`html`] builds them
//! from a protoc-gen-doc page.

pub mod html;

use std::collections::HashMap;

/// A table cell: plain text, or text carrying a link to an anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Link { text: String, anchor: String },
}

impl Cell {
    pub fn text(&self) -> &str {
        match self {
            Cell::Text(text) | Cell::Link { text, .. } => text,
        }
    }

    /// The bare anchor (no `#`) of a link cell.
    pub fn anchor(&self) -> Option<&str> {
        match self {
            Cell::Link { anchor, .. } => Some(anchor),
            Cell::Text(_) => None,
        }
    }
}

pub type Row = Vec<Cell>;

/// A table with a header line and ordered body rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub head: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn head(&self) -> &[String] {
        &self.head
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

/// Lookup of the tables that follow an anchor.
pub trait TableReader {
    /// All tables between the anchor's heading and the next anchored heading.
    /// `None` if the anchor is not defined; an empty slice if it is defined
    /// but has no table (e.g. a message without fields).
    fn tables_by_anchor(&self, anchor: &str) -> Option<&[Table]>;

    /// The first table following the anchor.
    fn table_by_anchor(&self, anchor: &str) -> Option<&Table> {
        self.tables_by_anchor(anchor).and_then(|tables| tables.first())
    }
}

impl TableReader for HashMap<String, Vec<Table>> {
    fn tables_by_anchor(&self, anchor: &str) -> Option<&[Table]> {
        self.get(anchor).map(Vec::as_slice)
    }
}
