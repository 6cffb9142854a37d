//! Data model for the generated API document — format-agnostic.

use serde::Serialize;

/// Badge kind of a table-of-contents entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TocKind {
    Service,
    Message,
    Enum,
    /// Any other badge text, kept verbatim.
    Other(String),
}

impl TocKind {
    /// Map a badge tag (`S`, `M`, `E`, ...) to a kind.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "S" => TocKind::Service,
            "M" => TocKind::Message,
            "E" => TocKind::Enum,
            other => TocKind::Other(other.to_string()),
        }
    }
}

/// A navigable table-of-contents line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub anchor: String,
    pub display_name: String,
    pub kind: TocKind,
}

/// Which side of a method a parameter table describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Request,
    Response,
}

/// One RPC method reconstructed from a service's method and route tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodRecord {
    pub name: String,
    pub http_method: String,
    pub http_path: String,
    pub request_anchor: String,
    pub response_anchor: String,
    pub description: String,
}

/// A single row of a flattened parameter table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamRow {
    /// Dot path from the message root, e.g. `data.items[].id`
    pub qualified_name: String,
    pub display_type: String,
    pub length: String,
    pub required: bool,
    pub description: String,
}

impl ParamRow {
    pub fn new(
        qualified_name: impl Into<String>,
        display_type: impl Into<String>,
        required: bool,
        description: impl Into<String>,
    ) -> Self {
        ParamRow {
            qualified_name: qualified_name.into(),
            display_type: display_type.into(),
            length: "-".to_string(),
            required,
            description: description.into(),
        }
    }
}

/// A parameter table, or the reason it could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamTable {
    pub role: Role,
    pub rows: Vec<ParamRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ParamTable {
    pub fn new(role: Role) -> Self {
        ParamTable {
            role,
            rows: Vec::new(),
            error: None,
        }
    }
}

/// Everything rendered for one method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodSection {
    pub service: String,
    pub method: MethodRecord,
    pub request: ParamTable,
    pub response: ParamTable,
}

impl MethodSection {
    pub fn table_mut(&mut self, role: Role) -> &mut ParamTable {
        match role {
            Role::Request => &mut self.request,
            Role::Response => &mut self.response,
        }
    }
}

/// The complete output document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApiDocument {
    pub title: String,
    pub sections: Vec<MethodSection>,
}
