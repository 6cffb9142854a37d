//! HTML renderer — standalone HTML page with semantic markup.

use crate::error::DocResult;
use crate::locale::Locale;
use crate::model::*;
use crate::render::Renderer;

pub struct HtmlRenderer {
    pub locale: Locale,
}

impl Renderer for HtmlRenderer {
    fn render(&self, doc: &ApiDocument) -> DocResult<String> {
        let mut out = String::new();

        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        out.push_str("<meta charset=\"utf-8\">\n");
        out.push_str(&format!("<title>{}</title>\n", html_escape(&doc.title)));
        out.push_str("<style>\n");
        out.push_str("body { font-family: system-ui, sans-serif; max-width: 60em; margin: 2em auto; padding: 0 1em; }\n");
        out.push_str("table { border-collapse: collapse; margin: 0.5em 0 1em; }\n");
        out.push_str("th, td { border: 1px solid #ccc; padding: 0.25em 0.6em; text-align: left; font-family: \"Courier New\", monospace; }\n");
        out.push_str("th { text-align: center; background: #f4f4f4; }\n");
        out.push_str(".error { color: #b00020; }\n");
        out.push_str("</style>\n");
        out.push_str("</head>\n<body>\n");
        out.push_str(&format!("<h1>{}</h1>\n", html_escape(&doc.title)));

        for section in &doc.sections {
            out.push_str(&self.render_section(section));
        }

        out.push_str("</body>\n</html>\n");
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "html"
    }
}

impl HtmlRenderer {
    fn render_section(&self, section: &MethodSection) -> String {
        let labels = self.locale.labels();
        let method = &section.method;
        let mut out = String::new();

        out.push_str(&format!(
            "<h2 id=\"{}\">{}</h2>\n",
            html_escape(&method.name),
            html_escape(&method.name)
        ));

        out.push_str(&format!("<h3>{}</h3>\n", labels.sections[0]));
        out.push_str(&format!("<p>{}</p>\n", html_escape(&method.description)));

        out.push_str(&format!("<h3>{}</h3>\n", labels.sections[1]));
        out.push_str(&format!(
            "<p>{}: {}<br>\n{}: {}<br>\n{}: application/json</p>\n",
            labels.path,
            html_escape(&method.http_path),
            labels.method,
            html_escape(&method.http_method),
            labels.content_type
        ));

        out.push_str(&format!("<h3>{}</h3>\n", labels.sections[2]));
        out.push_str(&self.render_table(&section.request));
        out.push_str(&format!("<h3>{}</h3>\n", labels.sections[3]));
        out.push_str(&self.render_table(&section.response));

        for title in &labels.sections[4..] {
            out.push_str(&format!("<h3>{}</h3>\n<p></p>\n", title));
        }
        out
    }

    fn render_table(&self, table: &ParamTable) -> String {
        let labels = self.locale.labels();
        if let Some(ref error) = table.error {
            return format!(
                "<p class=\"error\"><strong>{}:</strong> {}</p>\n",
                labels.unavailable,
                html_escape(error)
            );
        }

        let mut out = String::from("<table>\n<thead>\n<tr>");
        for column in labels.header {
            out.push_str(&format!("<th>{}</th>", column));
        }
        out.push_str("</tr>\n</thead>\n<tbody>\n");
        for row in &table.rows {
            out.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                html_escape(&row.qualified_name),
                html_escape(&row.display_type),
                html_escape(&row.length),
                self.locale.yes_no(row.required),
                html_escape(&row.description).replace('\n', "<br>"),
            ));
        }
        out.push_str("</tbody>\n</table>\n");
        out
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
