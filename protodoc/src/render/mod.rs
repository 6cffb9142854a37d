//! Renderer module — trait-based format dispatch.

pub mod html;
pub mod json;
pub mod markdown;

use crate::error::DocResult;
use crate::locale::Locale;
use crate::model::ApiDocument;
use anyhow::{anyhow, Result};

/// Trait for rendering an ApiDocument into a specific output format.
pub trait Renderer {
    fn render(&self, doc: &ApiDocument) -> DocResult<String>;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str, locale: Locale) -> Result<Box<dyn Renderer>> {
    match format {
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer { locale })),
        "html" => Ok(Box::new(html::HtmlRenderer { locale })),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!(
            "unknown format: {}. Use markdown, html, or json",
            format
        )),
    }
}
