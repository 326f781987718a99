//! Indented outline renderer.
//!
//! One node per line, labelled by kind with its attributes. Children are
//! indented relative to their parent by a per-level step: rows by 2, cells
//! by 4, paragraphs by 6 and runs by 8.
//!
//! ```text
//! Table: {}
//!   Row: {"w:trHeight": "300"}
//!       Cell: {"w:tcW": "5000"}
//!             Paragraph: {}
//!                     TextRun: {}, Text: Cell 1
//! ```

use wml_parser::{Attributes, ElementNode, Paragraph, TableCell, TableRow, TextRun};

const ROW_STEP: usize = 2;
const CELL_STEP: usize = 4;
const PARAGRAPH_STEP: usize = 6;
const RUN_STEP: usize = 8;

/// Render root elements as an indented outline. Empty input renders as `""`.
pub fn render_outline(nodes: &[ElementNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(node, &mut out, 0);
    }
    out
}

fn write_node(node: &ElementNode, out: &mut String, indent: usize) {
    match node {
        ElementNode::Table(table) => {
            write_line(out, indent, "Table", &table.attributes);
            for row in &table.rows {
                write_row(row, out, indent + ROW_STEP);
            }
        }
        ElementNode::TableRow(row) => write_row(row, out, indent),
        ElementNode::TableCell(cell) => write_cell(cell, out, indent),
        ElementNode::Paragraph(paragraph) => write_paragraph(paragraph, out, indent),
        ElementNode::TextRun(run) => write_run(run, out, indent),
        ElementNode::Generic(generic) => write_line(out, indent, "Element", &generic.attributes),
    }
}

fn write_row(row: &TableRow, out: &mut String, indent: usize) {
    write_line(out, indent, "Row", &row.attributes);
    for cell in &row.cells {
        write_cell(cell, out, indent + CELL_STEP);
    }
}

fn write_cell(cell: &TableCell, out: &mut String, indent: usize) {
    write_line(out, indent, "Cell", &cell.attributes);
    for paragraph in &cell.paragraphs {
        write_paragraph(paragraph, out, indent + PARAGRAPH_STEP);
    }
}

fn write_paragraph(paragraph: &Paragraph, out: &mut String, indent: usize) {
    write_line(out, indent, "Paragraph", &paragraph.attributes);
    for run in &paragraph.runs {
        write_run(run, out, indent + RUN_STEP);
    }
}

fn write_run(run: &TextRun, out: &mut String, indent: usize) {
    out.push_str(&" ".repeat(indent));
    out.push_str(&format!(
        "TextRun: {}, Text: {}\n",
        format_attributes(&run.attributes),
        run.text
    ));
}

fn write_line(out: &mut String, indent: usize, label: &str, attributes: &Attributes) {
    out.push_str(&" ".repeat(indent));
    out.push_str(&format!("{label}: {}\n", format_attributes(attributes)));
}

/// `{"name": "value", ...}` in attribute order.
pub fn format_attributes(attributes: &Attributes) -> String {
    let pairs: Vec<String> = attributes
        .iter()
        .map(|(name, value)| format!("{name:?}: {value:?}"))
        .collect();
    format!("{{{}}}", pairs.join(", "))
}
