use crate::token::{is_name_char, Token, TokenKind};

/// Split raw markup into trimmed, non-empty lines.
pub fn normalize(source: &str) -> Vec<String> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Classify one normalized line.
///
/// Only lines that both start with `<` and end with `>` are tag candidates;
/// anything else is text. A candidate whose name cannot be read is
/// `Malformed` rather than an error.
pub fn classify(line: &str) -> TokenKind {
    if !(line.starts_with('<') && line.ends_with('>')) {
        return TokenKind::Text(line.to_string());
    }

    if let Some(rest) = line.strip_prefix("</") {
        let name = scan_name(rest);
        // The name must run straight into `>`: `</w:p>`, not `</w:p x>`.
        if name.is_empty() || !rest[name.len()..].starts_with('>') {
            return TokenKind::Malformed(line.to_string());
        }
        return TokenKind::CloseTag {
            name: name.to_string(),
        };
    }

    let name = scan_name(&line[1..]);
    if name.is_empty() {
        return TokenKind::Malformed(line.to_string());
    }
    // Name chars are ASCII and the line ends with `>`, so both cuts sit on char boundaries.
    let attr_text = &line[1 + name.len()..line.len() - 1];
    TokenKind::OpenTag {
        name: name.to_string(),
        attr_text: attr_text.to_string(),
    }
}

/// Longest prefix of `s` made of name characters.
fn scan_name(s: &str) -> &str {
    let end = s.find(|c: char| !is_name_char(c)).unwrap_or(s.len());
    &s[..end]
}

/// Line scanner.
///
/// Classifies an already-normalized line sequence and numbers each line so
/// later stages can point back at it.
pub struct Scanner<'a, S> {
    lines: &'a [S],
    first_line: usize,
}

impl<'a, S: AsRef<str>> Scanner<'a, S> {
    /// Create a scanner whose first line is numbered 1.
    pub fn new(lines: &'a [S]) -> Self {
        Self::with_offset(lines, 0)
    }

    /// Create a scanner for a slice that starts `offset` lines into a larger sequence.
    pub fn with_offset(lines: &'a [S], offset: usize) -> Self {
        Self {
            lines,
            first_line: offset + 1,
        }
    }

    /// Classify every line of `lines`.
    pub fn tokenize(lines: &'a [S]) -> Vec<Token> {
        Scanner::new(lines).tokens().collect()
    }

    /// Lazily classify the lines in order.
    pub fn tokens(&self) -> impl Iterator<Item = Token> + 'a {
        let first_line = self.first_line;
        self.lines.iter().enumerate().map(move |(i, line)| {
            let kind = classify(line.as_ref());
            if let TokenKind::Malformed(text) = &kind {
                log::trace!("line {}: unreadable tag name in {text:?}", first_line + i);
            }
            Token::new(kind, first_line + i)
        })
    }
}
