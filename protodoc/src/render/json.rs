//! JSON renderer — structured output for tooling integration.
//!
//! Serializes the ApiDocument model directly.

use crate::error::DocResult;
use crate::model::ApiDocument;
use crate::render::Renderer;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, doc: &ApiDocument) -> DocResult<String> {
        let mut out = serde_json::to_string_pretty(doc)?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;

    #[test]
    fn serializes_sections() {
        let doc = ApiDocument {
            title: "API".to_string(),
            sections: vec![MethodSection {
                service: "Svc".to_string(),
                method: MethodRecord {
                    name: "Get".to_string(),
                    http_method: "GET".to_string(),
                    http_path: "/get".to_string(),
                    request_anchor: "Req".to_string(),
                    response_anchor: "Resp".to_string(),
                    description: String::new(),
                },
                request: ParamTable::new(Role::Request),
                response: ParamTable {
                    role: Role::Response,
                    rows: vec![ParamRow::new("data", "Object", true, "data")],
                    error: None,
                },
            }],
        };

        let out = JsonRenderer.render(&doc).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["title"], "API");
        let response = &value["sections"][0]["response"];
        assert_eq!(response["role"], "response");
        assert_eq!(response["rows"][0]["qualified_name"], "data");
        assert_eq!(response["rows"][0]["required"], true);
        assert!(response.get("error").is_none());
    }
}
