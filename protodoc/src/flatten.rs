//! Schema flattening: expand a message and every message it links to into
//! one ordered list of dot-qualified parameter rows.
//!
//! Rows are emitted depth-first, pre-order: a linked field's row comes
//! first, followed immediately by the rows of the message it links to,
//! prefixed with the field's path (plus `[]` when the field is repeated).
//!
//! Response tables get an implicit `data` envelope: when the root message
//! does not start with one, a synthetic `data` row is emitted and every
//! top-level field is nested under it.
//!
//! Message definitions form a graph, not a tree. Anchors on the current
//! recursion path are tracked and revisiting one fails with
//! [`DocError::CyclicSchema`]; the same message reused at sibling paths is
//! fine.

use crate::annotation;
use crate::catalog::{TypeCatalog, TypeKind};
use crate::error::{DocError, DocResult};
use crate::model::{ParamRow, Role};
use crate::source::{Row, TableReader};
use std::collections::HashSet;
use tracing::{debug, trace, warn};

pub const ENVELOPE_FIELD: &str = "data";
pub const ENVELOPE_TYPE: &str = "Object";
pub const LINKED_TYPE: &str = "Object Array";
pub const ENUM_TYPE: &str = "Enum";
const ARRAY_TAG: &str = "[]";
const REPEATED_LABEL: &str = "repeated";

/// When a response's first field counts as the envelope already.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EnvelopeRule {
    /// First field is named `data`, whatever its type.
    #[default]
    ByName,
    /// First field is named `data` and links to a message.
    ByNameAndObject,
}

#[derive(Debug, Clone)]
pub struct FlattenOptions {
    pub envelope_rule: EnvelopeRule,
    /// Description of the synthetic envelope row.
    pub envelope_description: String,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        FlattenOptions {
            envelope_rule: EnvelopeRule::default(),
            envelope_description: ENVELOPE_FIELD.to_string(),
        }
    }
}

/// A message field row: `[name, type, label, description]`.
struct Field<'a> {
    name: &'a str,
    type_anchor: &'a str,
    repeated: bool,
    description: &'a str,
}

impl<'a> Field<'a> {
    fn from_row(row: &'a Row) -> Option<Self> {
        let name = row.first()?.text();
        let type_cell = row.get(1)?;
        Some(Field {
            name,
            // Unlinked type cells are classified by their text
            type_anchor: type_cell.anchor().unwrap_or_else(|| type_cell.text()),
            repeated: row.get(2).is_some_and(|c| c.text().trim() == REPEATED_LABEL),
            description: row.get(3).map(|c| c.text()).unwrap_or_default(),
        })
    }
}

pub struct SchemaFlattener<'a, R: TableReader + ?Sized> {
    reader: &'a R,
    catalog: &'a TypeCatalog,
    options: &'a FlattenOptions,
}

impl<'a, R: TableReader + ?Sized> SchemaFlattener<'a, R> {
    pub fn new(reader: &'a R, catalog: &'a TypeCatalog, options: &'a FlattenOptions) -> Self {
        SchemaFlattener {
            reader,
            catalog,
            options,
        }
    }

    /// Flatten the message at `anchor` into ordered parameter rows.
    pub fn flatten(&self, anchor: &str, role: Role) -> DocResult<Vec<ParamRow>> {
        let mut rows = Vec::new();
        let mut path = Vec::new();
        self.flatten_into(anchor, role, "", &mut path, &mut rows)?;

        let mut seen = HashSet::new();
        for row in &rows {
            if !seen.insert(row.qualified_name.as_str()) {
                warn!(anchor, name = %row.qualified_name, "duplicate parameter path");
            }
        }
        debug!(anchor, ?role, rows = rows.len(), "flattened message");
        Ok(rows)
    }

    fn flatten_into(
        &self,
        anchor: &str,
        role: Role,
        prefix: &str,
        path: &mut Vec<String>,
        rows: &mut Vec<ParamRow>,
    ) -> DocResult<()> {
        if path.iter().any(|a| a == anchor) {
            let mut chain = path.clone();
            chain.push(anchor.to_string());
            return Err(DocError::CyclicSchema { chain });
        }

        // A defined anchor without a table is a message with no fields
        let table = self.reader.table_by_anchor(anchor);
        if table.is_none() && self.reader.tables_by_anchor(anchor).is_none() {
            return Err(DocError::LinkResolution {
                anchor: anchor.to_string(),
            });
        }
        let fields: Vec<Field> = match table {
            Some(table) => table
                .rows()
                .iter()
                .filter_map(|row| {
                    let field = Field::from_row(row);
                    if field.is_none() {
                        warn!(anchor, cells = row.len(), "skipping short field row");
                    }
                    field
                })
                .collect(),
            None => Vec::new(),
        };

        let mut prefix = prefix.to_string();
        if role == Role::Response && prefix.is_empty() && !self.has_envelope(&fields) {
            rows.push(ParamRow::new(
                ENVELOPE_FIELD,
                ENVELOPE_TYPE,
                true,
                self.options.envelope_description.clone(),
            ));
            prefix = ENVELOPE_FIELD.to_string();
        }

        path.push(anchor.to_string());
        for field in &fields {
            self.emit_field(field, role, &prefix, path, rows)?;
        }
        path.pop();
        Ok(())
    }

    fn emit_field(
        &self,
        field: &Field,
        role: Role,
        prefix: &str,
        path: &mut Vec<String>,
        rows: &mut Vec<ParamRow>,
    ) -> DocResult<()> {
        let qualified_name = if prefix.is_empty() {
            field.name.to_string()
        } else {
            format!("{}.{}", prefix, field.name)
        };
        let array_tag = if field.repeated { ARRAY_TAG } else { "" };

        let kind = self.catalog.classify(field.type_anchor);
        let display_type = match kind {
            TypeKind::Scalar => field.type_anchor,
            TypeKind::Enum => ENUM_TYPE,
            TypeKind::Message => LINKED_TYPE,
        };

        let description = annotation::parse(field.description).unwrap_or_else(|e| {
            let anchor = path.last().map(String::as_str).unwrap_or_default();
            warn!(anchor, name = %qualified_name, "{e}; keeping description as plain text");
            annotation::Description::plain(field.description)
        });
        let is_envelope = role == Role::Response && qualified_name == ENVELOPE_FIELD;

        trace!(name = %qualified_name, ?kind, "field");
        rows.push(ParamRow::new(
            qualified_name.clone(),
            display_type,
            is_envelope || description.required,
            description.text,
        ));

        if kind == TypeKind::Message {
            let child_prefix = format!("{}{}", qualified_name, array_tag);
            self.flatten_into(field.type_anchor, role, &child_prefix, path, rows)?;
        }
        Ok(())
    }

    fn has_envelope(&self, fields: &[Field]) -> bool {
        let Some(first) = fields.first() else {
            return false;
        };
        if first.name != ENVELOPE_FIELD {
            return false;
        }
        match self.options.envelope_rule {
            EnvelopeRule::ByName => true,
            EnvelopeRule::ByNameAndObject => {
                self.catalog.classify(first.type_anchor) == TypeKind::Message
            }
        }
    }
}
