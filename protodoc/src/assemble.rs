//! Incremental construction of the output document.
//!
//! The generator drives the builder section by section; rendering happens
//! later, on the finished [`ApiDocument`].

use crate::error::DocError;
use crate::model::*;
use tracing::warn;

#[derive(Debug, Default)]
pub struct DocumentBuilder {
    doc: ApiDocument,
    current: Option<MethodSection>,
    open_table: Option<Role>,
}

impl DocumentBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        DocumentBuilder {
            doc: ApiDocument {
                title: title.into(),
                sections: Vec::new(),
            },
            current: None,
            open_table: None,
        }
    }

    /// Start a method section, closing any section still open.
    pub fn begin_method_section(&mut self, service: &str, method: &MethodRecord) {
        self.end_section();
        self.current = Some(MethodSection {
            service: service.to_string(),
            method: method.clone(),
            request: ParamTable::new(Role::Request),
            response: ParamTable::new(Role::Response),
        });
    }

    /// Open the request or response table; `seed_rows` come first.
    pub fn begin_param_table(&mut self, role: Role, seed_rows: &[ParamRow]) {
        let Some(section) = self.current.as_mut() else {
            warn!(?role, "parameter table outside a method section ignored");
            return;
        };
        section.table_mut(role).rows.extend_from_slice(seed_rows);
        self.open_table = Some(role);
    }

    /// Append a row to the open table.
    pub fn append_row(&mut self, row: ParamRow) {
        match (self.current.as_mut(), self.open_table) {
            (Some(section), Some(role)) => section.table_mut(role).rows.push(row),
            _ => warn!(name = %row.qualified_name, "row outside a parameter table ignored"),
        }
    }

    /// Replace a table with the error that prevented building it.
    pub fn fail_param_table(&mut self, role: Role, error: &DocError) {
        if let Some(section) = self.current.as_mut() {
            let table = section.table_mut(role);
            table.rows.clear();
            table.error = Some(error.to_string());
        }
        self.open_table = None;
    }

    pub fn end_section(&mut self) {
        self.open_table = None;
        if let Some(section) = self.current.take() {
            self.doc.sections.push(section);
        }
    }

    pub fn finish(mut self) -> ApiDocument {
        self.end_section();
        self.doc
    }
}
