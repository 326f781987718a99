//! Tag-specific reductions.
//!
//! When a frame closes, its tag decides what it becomes. Each level keeps
//! only the content shape its children reduce to and drops the rest:
//!
//! ```text
//! w:t   → Node(TextRun)      text lines joined
//! w:r   → NodeList(TextRun)  runs spliced into the parent
//! w:p   → Node(Paragraph)    runs found inside NodeLists
//! w:tc  → Node(TableCell)    Paragraph nodes
//! w:tr  → Node(TableRow)     TableCell nodes
//! w:tbl → Node(Table)        TableRow nodes
//! other → Node(Generic)      content discarded
//! ```

use crate::ast::{
    ContentItem, ElementNode, Frame, Generic, Paragraph, Table, TableCell, TableRow, TextRun,
};

pub const TEXT_RUN_TAG: &str = "w:t";
pub const RUN_TAG: &str = "w:r";
pub const PARAGRAPH_TAG: &str = "w:p";
pub const TABLE_CELL_TAG: &str = "w:tc";
pub const TABLE_ROW_TAG: &str = "w:tr";
pub const TABLE_TAG: &str = "w:tbl";

/// Reduction selected by a tag name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    TextRun,
    Run,
    Paragraph,
    TableCell,
    TableRow,
    Table,
    Other,
}

impl TagKind {
    /// Names match exactly, prefix included.
    pub fn from_name(name: &str) -> Self {
        match name {
            TEXT_RUN_TAG => TagKind::TextRun,
            RUN_TAG => TagKind::Run,
            PARAGRAPH_TAG => TagKind::Paragraph,
            TABLE_CELL_TAG => TagKind::TableCell,
            TABLE_ROW_TAG => TagKind::TableRow,
            TABLE_TAG => TagKind::Table,
            _ => TagKind::Other,
        }
    }
}

/// Turn a closed frame into the content item its parent receives.
pub fn reduce(frame: Frame) -> ContentItem {
    let Frame {
        name,
        attributes,
        content,
        ..
    } = frame;

    match TagKind::from_name(&name) {
        TagKind::TextRun => {
            let text = content
                .into_iter()
                .filter_map(|item| match item {
                    ContentItem::Text(text) => Some(text),
                    _ => None,
                })
                .collect();
            ContentItem::Node(ElementNode::TextRun(TextRun { attributes, text }))
        }
        TagKind::Run => ContentItem::NodeList(
            content
                .into_iter()
                .filter_map(|item| match item {
                    ContentItem::Node(node @ ElementNode::TextRun(_)) => Some(node),
                    _ => None,
                })
                .collect(),
        ),
        TagKind::Paragraph => {
            let runs = content
                .into_iter()
                .filter_map(|item| match item {
                    ContentItem::NodeList(nodes) => Some(nodes),
                    _ => None,
                })
                .flatten()
                .filter_map(|node| match node {
                    ElementNode::TextRun(run) => Some(run),
                    _ => None,
                })
                .collect();
            ContentItem::Node(ElementNode::Paragraph(Paragraph { attributes, runs }))
        }
        TagKind::TableCell => {
            let paragraphs = children(content, |node| match node {
                ElementNode::Paragraph(paragraph) => Some(paragraph),
                _ => None,
            });
            ContentItem::Node(ElementNode::TableCell(TableCell {
                attributes,
                paragraphs,
            }))
        }
        TagKind::TableRow => {
            let cells = children(content, |node| match node {
                ElementNode::TableCell(cell) => Some(cell),
                _ => None,
            });
            ContentItem::Node(ElementNode::TableRow(TableRow { attributes, cells }))
        }
        TagKind::Table => {
            let rows = children(content, |node| match node {
                ElementNode::TableRow(row) => Some(row),
                _ => None,
            });
            ContentItem::Node(ElementNode::Table(Table { attributes, rows }))
        }
        TagKind::Other => ContentItem::Node(ElementNode::Generic(Generic { attributes })),
    }
}

/// Keep the bare `Node` items that `pick` accepts, in order.
fn children<T>(content: Vec<ContentItem>, pick: impl Fn(ElementNode) -> Option<T>) -> Vec<T> {
    content
        .into_iter()
        .filter_map(|item| match item {
            ContentItem::Node(node) => pick(node),
            _ => None,
        })
        .collect()
}
