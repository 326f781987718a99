//! WML Renderer
//!
//! Turns parsed root elements into text for display or export.
//!
//! ```text
//! [ElementNode] → render(format) → outline | JSON
//! ```

pub mod json;
pub mod outline;

pub use json::render_json;
pub use outline::render_outline;

use wml_parser::ElementNode;

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    /// Indented, one node per line.
    #[default]
    Outline,
    /// Pretty-printed JSON array.
    Json,
}

/// Rendering error.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Render error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Render root elements in the given format.
pub fn render(nodes: &[ElementNode], format: Format) -> Result<String, RenderError> {
    match format {
        Format::Outline => Ok(render_outline(nodes)),
        Format::Json => render_json(nodes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sequence() {
        assert_eq!(render(&[], Format::Outline).unwrap(), "");
        assert_eq!(render(&[], Format::Json).unwrap(), "[]");
    }

    #[test]
    fn test_default_format() {
        assert_eq!(Format::default(), Format::Outline);
    }
}
