//! Attribute extraction for open tags.
//!
//! Only `name="value"` pairs are recognized: double quotes, no escapes, and a
//! non-empty value. Everything between matches is skipped without complaint.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

/// Attribute name to value, in order of first appearance.
pub type Attributes = IndexMap<String, String>;

static ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([a-zA-Z0-9:]+)="([^"]+)""#).unwrap());

/// Extract attributes from the text following a tag name.
///
/// A repeated name keeps the position of its first occurrence and the value
/// of its last.
pub fn extract_attributes(attr_text: &str) -> Attributes {
    let mut attributes = Attributes::new();
    for caps in ATTRIBUTE.captures_iter(attr_text) {
        attributes.insert(caps[1].to_string(), caps[2].to_string());
    }
    attributes
}
