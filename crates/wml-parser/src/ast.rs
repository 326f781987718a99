//! Element tree for WordprocessingML documents.
//!
//! Contains the finished node types (tables down to text runs) and the
//! intermediate values the stack machine juggles while a tag is still open.

use serde::{Deserialize, Serialize};

pub use wml_lexer::Attributes;

// ---------------------------------------------------------------------------
// Finished nodes
// ---------------------------------------------------------------------------

/// A reduced element. Nodes are immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ElementNode {
    /// Any tag without a dedicated reduction. Keeps attributes only.
    Generic(Generic),
    TextRun(TextRun),
    Paragraph(Paragraph),
    TableCell(TableCell),
    TableRow(TableRow),
    Table(Table),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generic {
    pub attributes: Attributes,
}

/// `w:t`: a run of literal text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    pub attributes: Attributes,
    pub text: String,
}

/// `w:p`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub attributes: Attributes,
    pub runs: Vec<TextRun>,
}

/// `w:tc`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    pub attributes: Attributes,
    pub paragraphs: Vec<Paragraph>,
}

/// `w:tr`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub attributes: Attributes,
    pub cells: Vec<TableCell>,
}

/// `w:tbl`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub attributes: Attributes,
    pub rows: Vec<TableRow>,
}

impl ElementNode {
    pub fn attributes(&self) -> &Attributes {
        match self {
            ElementNode::Generic(n) => &n.attributes,
            ElementNode::TextRun(n) => &n.attributes,
            ElementNode::Paragraph(n) => &n.attributes,
            ElementNode::TableCell(n) => &n.attributes,
            ElementNode::TableRow(n) => &n.attributes,
            ElementNode::Table(n) => &n.attributes,
        }
    }

    /// Variant name, as used in serialized output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ElementNode::Generic(_) => "Generic",
            ElementNode::TextRun(_) => "TextRun",
            ElementNode::Paragraph(_) => "Paragraph",
            ElementNode::TableCell(_) => "TableCell",
            ElementNode::TableRow(_) => "TableRow",
            ElementNode::Table(_) => "Table",
        }
    }

    pub fn as_text_run(&self) -> Option<&TextRun> {
        match self {
            ElementNode::TextRun(run) => Some(run),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            ElementNode::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            ElementNode::Paragraph(paragraph) => Some(paragraph),
            _ => None,
        }
    }
}

impl Paragraph {
    /// Concatenated text of every run.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

// ---------------------------------------------------------------------------
// Parse-time values
// ---------------------------------------------------------------------------

/// A value attached to an open frame while its children are parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentItem {
    /// A text line.
    Text(String),
    /// A reduced child element.
    Node(ElementNode),
    /// Text runs spliced in by a `w:r` wrapper, which has no node of its own.
    NodeList(Vec<ElementNode>),
}

/// An open tag waiting for its close tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub name: String,
    pub attributes: Attributes,
    pub content: Vec<ContentItem>,
    /// Line of the open tag.
    pub line: usize,
}

impl Frame {
    pub fn new(name: String, attributes: Attributes, line: usize) -> Self {
        Self {
            name,
            attributes,
            content: Vec::new(),
            line,
        }
    }
}
