//! Markdown renderer.
//!
//! One `##` section per method with numbered `###` subsections; parameter
//! tables are GitHub pipe tables.

use crate::error::DocResult;
use crate::locale::{Labels, Locale};
use crate::model::*;
use crate::render::Renderer;

pub struct MarkdownRenderer {
    pub locale: Locale,
}

impl Renderer for MarkdownRenderer {
    fn render(&self, doc: &ApiDocument) -> DocResult<String> {
        let mut output = String::new();
        output.push_str(&format!("# {}\n\n", doc.title));

        for section in &doc.sections {
            output.push_str(&self.render_section(section));
        }

        Ok(output)
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

impl MarkdownRenderer {
    fn render_section(&self, section: &MethodSection) -> String {
        let labels = self.locale.labels();
        let method = &section.method;
        let mut lines: Vec<String> = Vec::new();

        lines.push(format!("## {}\n", method.name));

        lines.push(format!("### {}\n", labels.sections[0]));
        if !method.description.is_empty() {
            lines.push(method.description.clone());
            lines.push(String::new());
        }

        lines.push(format!("### {}\n", labels.sections[1]));
        lines.push(format!("- {}: `{}`", labels.path, method.http_path));
        lines.push(format!("- {}: `{}`", labels.method, method.http_method));
        lines.push(format!("- {}: `application/json`", labels.content_type));
        lines.push(String::new());

        lines.push(format!("### {}\n", labels.sections[2]));
        lines.push(self.render_table(&section.request, labels));

        lines.push(format!("### {}\n", labels.sections[3]));
        lines.push(self.render_table(&section.response, labels));

        // Left empty for manual completion
        for title in &labels.sections[4..] {
            lines.push(format!("### {}\n", title));
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    fn render_table(&self, table: &ParamTable, labels: &Labels) -> String {
        if let Some(ref error) = table.error {
            return format!("> **{}:** {}\n", labels.unavailable, escape_cell(error));
        }

        let mut out = String::new();
        out.push_str(&format!("| {} |\n", labels.header.join(" | ")));
        out.push_str(&format!("|{}\n", " --- |".repeat(labels.header.len())));
        for row in &table.rows {
            out.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                escape_cell(&row.qualified_name),
                escape_cell(&row.display_type),
                escape_cell(&row.length),
                self.locale.yes_no(row.required),
                escape_cell(&row.description),
            ));
        }
        out
    }
}

/// Keep a value inside one pipe-table cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(response: ParamTable) -> ApiDocument {
        ApiDocument {
            title: "OpenApi".to_string(),
            sections: vec![MethodSection {
                service: "UserService".to_string(),
                method: MethodRecord {
                    name: "GetUser".to_string(),
                    http_method: "GET".to_string(),
                    http_path: "/v1/user".to_string(),
                    request_anchor: "Req".to_string(),
                    response_anchor: "Resp".to_string(),
                    description: "Fetch a user".to_string(),
                },
                request: ParamTable {
                    role: Role::Request,
                    rows: vec![ParamRow::new("id", "int64", true, "user id")],
                    error: None,
                },
                response,
            }],
        }
    }

    #[test]
    fn renders_method_section() {
        let response = ParamTable {
            role: Role::Response,
            rows: vec![ParamRow::new("data", "Object", true, "data")],
            error: None,
        };
        let out = MarkdownRenderer { locale: Locale::En }
            .render(&document(response))
            .unwrap();

        assert!(out.starts_with("# OpenApi\n\n## GetUser\n"));
        assert!(out.contains("### 1. Description\n\nFetch a user\n"));
        assert!(out.contains("- Path: `/v1/user`\n- Method: `GET`\n- Content-type: `application/json`"));
        assert!(out.contains("| Parameter | Type | Length | Required | Description |\n| --- | --- | --- | --- | --- |\n"));
        assert!(out.contains("| id | int64 | - | Yes | user id |"));
        assert!(out.contains("| data | Object | - | Yes | data |"));
        assert!(out.contains("### 7. Response payload\n"));
    }

    #[test]
    fn zh_labels() {
        let response = ParamTable::new(Role::Response);
        let out = MarkdownRenderer { locale: Locale::Zh }
            .render(&document(response))
            .unwrap();
        assert!(out.contains("| 参数 | 类型 | 长度 | 是否必须 | 描述 |"));
        assert!(out.contains("| id | int64 | - | 是 | user id |"));
        assert!(out.contains("### 3. 请求参数"));
    }

    #[test]
    fn failed_table_renders_error() {
        let response = ParamTable {
            role: Role::Response,
            rows: Vec::new(),
            error: Some("cyclic schema: A -> A".to_string()),
        };
        let out = MarkdownRenderer { locale: Locale::En }
            .render(&document(response))
            .unwrap();
        assert!(out.contains("> **Parameter table unavailable:** cyclic schema: A -> A"));
    }

    #[test]
    fn cells_are_escaped() {
        assert_eq!(escape_cell("a|b\nc"), "a\\|b<br>c");
    }
}
