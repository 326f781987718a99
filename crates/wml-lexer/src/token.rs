/// Classification of a single normalized line.
///
/// Data-carrying variants embed their value directly, the same way the
/// scanner found it on the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// `<name attrs...>`: `attr_text` is everything between the name and the final `>`.
    OpenTag { name: String, attr_text: String },

    /// `</name>`
    CloseTag { name: String },

    /// Any line that is not shaped like a tag, kept verbatim.
    Text(String),

    /// A `<...>` line whose tag name could not be read. Carries the line.
    Malformed(String),
}

impl TokenKind {
    /// Tag name for open and close tags.
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            TokenKind::OpenTag { name, .. } | TokenKind::CloseTag { name } => {
                Some(name.as_str())
            }
            TokenKind::Text(_) | TokenKind::Malformed(_) => None,
        }
    }
}

/// A classified line together with its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// 1-based position in the normalized line sequence.
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, line: usize) -> Self {
        Self { kind, line }
    }
}

/// Characters allowed in a tag or attribute name (`w:tbl`, `w:trHeight`).
pub fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == ':'
}
