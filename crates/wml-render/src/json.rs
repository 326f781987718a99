//! JSON export.

use wml_parser::ElementNode;

use crate::RenderError;

/// Pretty-printed JSON array of root elements, each tagged with its `type`.
pub fn render_json(nodes: &[ElementNode]) -> Result<String, RenderError> {
    Ok(serde_json::to_string_pretty(nodes)?)
}
