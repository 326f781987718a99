//! WML Parser
//!
//! Builds a typed element tree (tables, rows, cells, paragraphs, text runs)
//! from line-oriented WordprocessingML markup.
//!
//! ```text
//! raw text → normalize → classify lines → stack machine per partition → roots
//! ```
//!
//! Malformed markup never fails a tolerant parse; it only loses content.
//! [`RecoveryMode::Strict`] reports the first such loss instead.

pub mod ast;
pub mod builder;
pub mod config;
pub mod partition;
pub mod reduce;

pub use ast::{
    Attributes, ContentItem, ElementNode, Frame, Generic, Paragraph, Table, TableCell, TableRow,
    TextRun,
};
pub use builder::StackMachine;
pub use config::{ParseOptions, RecoveryMode};
pub use partition::BoundaryPolicy;

/// Invalid parse options.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error: partition count must be at least 1, got {partitions}")]
    InvalidPartitions { partitions: usize },
}

/// Kinds of markup that strict mode refuses to drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// A `<...>` line without a readable tag name.
    MalformedTag,
    /// Text with no open element to hold it.
    StrayText,
    /// A close tag that would discard frames opened after its match.
    MismatchedClose,
    /// A close tag with no open tag of that name.
    UnmatchedClose,
    /// A tag still open at the end of its partition.
    UnclosedTag,
}

/// Strict-mode error with the offending line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Strict parse error at line {line}: {message}")]
pub struct StrictError {
    pub kind: Violation,
    pub message: String,
    /// 1-based position in the normalized line sequence.
    pub line: usize,
}

impl StrictError {
    pub fn new(kind: Violation, line: usize, message: String) -> Self {
        Self {
            kind,
            message,
            line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Strict(#[from] StrictError),
}

/// Parse normalized lines with `partitions` positional partitions.
///
/// Fails only when `partitions` is zero.
pub fn parse<S: AsRef<str> + Sync>(
    lines: &[S],
    partitions: usize,
) -> Result<Vec<ElementNode>, ParseError> {
    parse_with(lines, &ParseOptions::new().with_partitions(partitions))
}

/// Parse normalized lines with explicit options.
pub fn parse_with<S: AsRef<str> + Sync>(
    lines: &[S],
    options: &ParseOptions,
) -> Result<Vec<ElementNode>, ParseError> {
    options.validate()?;
    let ranges = partition::plan(lines, options.partitions, options.boundaries);
    let roots = partition::run_partitions(lines, &ranges, options.mode)?;
    log::debug!("parsed {} line(s) into {} root(s)", lines.len(), roots.len());
    Ok(roots)
}

/// Normalize raw markup, then parse it.
pub fn parse_source(source: &str, options: &ParseOptions) -> Result<Vec<ElementNode>, ParseError> {
    let lines = wml_lexer::normalize(source);
    parse_with(&lines, options)
}

/// Parse caller-chosen partitions, concatenating their roots in order.
pub fn parse_partitions<S: AsRef<str> + Sync>(
    partitions: &[&[S]],
    mode: RecoveryMode,
) -> Result<Vec<ElementNode>, ParseError> {
    if partitions.is_empty() {
        return Err(ConfigError::InvalidPartitions { partitions: 0 }.into());
    }
    Ok(partition::run_slices(partitions, mode)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CELL_TABLE: &str = "
        <w:tbl>
        <w:tr>
        <w:tc>
        <w:p>
        <w:r>
        <w:t>
        Cell 1
        </w:t>
        </w:r>
        </w:p>
        </w:tc>
        </w:tr>
        </w:tbl>
    ";

    const TWO_BY_TWO: &str = r#"
        <w:document>
        <w:body>
        </w:body>
        </w:document>
        <w:tbl>
            <w:tr w:trHeight="300">
                <w:tc w:tcW="5000">
                    <w:p>
                        <w:r>
                            <w:t>
                                Cell 1
                            </w:t>
                        </w:r>
                    </w:p>
                </w:tc>
                <w:tc w:tcW="5000">
                    <w:p>
                        <w:r>
                            <w:t>
                                Cell 2
                            </w:t>
                        </w:r>
                    </w:p>
                </w:tc>
            </w:tr>
            <w:tr w:trHeight="400">
                <w:tc w:tcW="5000">
                    <w:p>
                        <w:r>
                            <w:t>
                                Cell 3
                            </w:t>
                        </w:r>
                    </w:p>
                </w:tc>
            </w:tr>
        </w:tbl>
        <w:p w:rsidR="00A1">
            <w:r>
                <w:t>
                    Tail
                </w:t>
            </w:r>
        </w:p>
    "#;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn run(text: &str) -> TextRun {
        TextRun {
            attributes: Attributes::new(),
            text: text.into(),
        }
    }

    fn cell(text: &str) -> TableCell {
        TableCell {
            attributes: attrs(&[("w:tcW", "5000")]),
            paragraphs: vec![Paragraph {
                attributes: Attributes::new(),
                runs: vec![run(text)],
            }],
        }
    }

    fn lines(source: &str) -> Vec<String> {
        wml_lexer::normalize(source)
    }

    #[test]
    fn test_single_cell_table() {
        let roots = parse(&lines(CELL_TABLE), 1).unwrap();
        assert_eq!(
            roots,
            vec![ElementNode::Table(Table {
                attributes: Attributes::new(),
                rows: vec![TableRow {
                    attributes: Attributes::new(),
                    cells: vec![TableCell {
                        attributes: Attributes::new(),
                        paragraphs: vec![Paragraph {
                            attributes: Attributes::new(),
                            runs: vec![run("Cell 1")],
                        }],
                    }],
                }],
            })]
        );
    }

    #[test]
    fn test_nesting_and_attributes() {
        let roots = parse(&lines(TWO_BY_TWO), 1).unwrap();
        assert_eq!(
            roots,
            vec![
                ElementNode::Generic(Generic::default()),
                ElementNode::Table(Table {
                    attributes: Attributes::new(),
                    rows: vec![
                        TableRow {
                            attributes: attrs(&[("w:trHeight", "300")]),
                            cells: vec![cell("Cell 1"), cell("Cell 2")],
                        },
                        TableRow {
                            attributes: attrs(&[("w:trHeight", "400")]),
                            cells: vec![cell("Cell 3")],
                        },
                    ],
                }),
                ElementNode::Paragraph(Paragraph {
                    attributes: attrs(&[("w:rsidR", "00A1")]),
                    runs: vec![run("Tail")],
                }),
            ]
        );
    }

    #[test]
    fn test_typed_accessors() {
        let roots = parse(&lines(TWO_BY_TWO), 1).unwrap();
        let kinds: Vec<&str> = roots.iter().map(ElementNode::kind_name).collect();
        assert_eq!(kinds, vec!["Generic", "Table", "Paragraph"]);
        assert_eq!(roots[2].as_paragraph().map(Paragraph::text).as_deref(), Some("Tail"));
        assert!(roots[1].as_paragraph().is_none());
        assert!(roots[0].as_table().is_none());
    }

    #[test]
    fn test_attribute_order_is_preserved() {
        let input = lines("<w:tc w:trHeight=\"300\" w:tcW=\"5000\">\n</w:tc>");
        let roots = parse(&input, 1).unwrap();
        let order: Vec<(&str, &str)> = roots[0]
            .attributes()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(order, vec![("w:trHeight", "300"), ("w:tcW", "5000")]);
    }

    #[test]
    fn test_parse_is_repeatable() {
        let input = lines(TWO_BY_TWO);
        assert_eq!(parse(&input, 3).unwrap(), parse(&input, 3).unwrap());
        assert_eq!(parse(&input, 1).unwrap(), parse(&input, 1).unwrap());
    }

    #[test]
    fn test_positional_partitions_on_root_boundaries() {
        // Four 3-line roots; 2 and 4 partitions both cut between roots.
        let input = lines(
            "<w:t>\na\n</w:t>\n<w:t>\nb\n</w:t>\n<w:t>\nc\n</w:t>\n<w:t>\nd\n</w:t>",
        );
        let single = parse(&input, 1).unwrap();
        assert_eq!(single.len(), 4);
        assert_eq!(parse(&input, 2).unwrap(), single);
        assert_eq!(parse(&input, 4).unwrap(), single);
    }

    #[test]
    fn test_positional_partitions_can_split_subtrees() {
        let input = lines(CELL_TABLE);
        // The table spans every line, so any cut loses it.
        assert!(parse(&input, 2).unwrap().is_empty());
    }

    #[test]
    fn test_root_aligned_partitions_match_single() {
        let input = lines(TWO_BY_TWO);
        let single = parse(&input, 1).unwrap();
        for partitions in 1..=6 {
            let options = ParseOptions::new()
                .with_partitions(partitions)
                .with_boundaries(BoundaryPolicy::RootAligned);
            assert_eq!(parse_with(&input, &options).unwrap(), single);
        }
    }

    #[test]
    fn test_more_partitions_than_lines() {
        let input = lines("<w:t>\n</w:t>");
        assert!(parse(&input, 8).unwrap().is_empty());
        assert_eq!(parse(&input, 1).unwrap().len(), 1);
    }

    #[test]
    fn test_huge_partition_count_matches_one_per_line() {
        let input = lines(TWO_BY_TWO);
        for policy in [BoundaryPolicy::Positional, BoundaryPolicy::RootAligned] {
            let huge = ParseOptions::new()
                .with_partitions(usize::MAX)
                .with_boundaries(policy);
            let per_line = huge.clone().with_partitions(input.len());
            assert_eq!(
                parse_with(&input, &huge).unwrap(),
                parse_with(&input, &per_line).unwrap()
            );
        }
        let single = lines("<w:t>\nx\n</w:t>");
        assert!(parse(&single, usize::MAX).unwrap().is_empty());
    }

    #[test]
    fn test_zero_partitions_is_config_error() {
        let err = parse(&lines(CELL_TABLE), 0).unwrap_err();
        assert_eq!(
            err,
            ParseError::Config(ConfigError::InvalidPartitions { partitions: 0 })
        );
        let none: [&[String]; 0] = [];
        assert!(matches!(
            parse_partitions(&none, RecoveryMode::Tolerant),
            Err(ParseError::Config(_))
        ));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse::<String>(&[], 1).unwrap().is_empty());
        assert!(parse::<String>(&[], 3).unwrap().is_empty());
    }

    #[test]
    fn test_unmatched_close_drops_inner_content() {
        let roots = parse(&lines("<a>\n<b>\ninner\n</a>"), 1).unwrap();
        assert_eq!(roots, vec![ElementNode::Generic(Generic::default())]);
    }

    #[test]
    fn test_malformed_input_never_fails_tolerant_parse() {
        let input = lines("</w:p>\ntext\n<>\n<w:p>\n<w:tbl>\n</w:r>\n</w:tc>");
        assert!(parse(&input, 1).unwrap().is_empty());
        assert!(parse(&input, 3).unwrap().is_empty());
    }

    #[test]
    fn test_strict_surfaces_split_subtree() {
        let options = ParseOptions::new().with_partitions(2).strict();
        let err = parse_with(&lines(CELL_TABLE), &options).unwrap_err();
        let ParseError::Strict(err) = err else {
            panic!("expected a strict error, got {err:?}");
        };
        assert!(matches!(
            err.kind,
            Violation::UnclosedTag | Violation::UnmatchedClose
        ));
    }

    #[test]
    fn test_parse_source() {
        let roots = parse_source(CELL_TABLE, &ParseOptions::default()).unwrap();
        let table = roots[0].as_table().unwrap();
        assert_eq!(table.rows[0].cells[0].paragraphs[0].text(), "Cell 1");
    }

    #[test]
    fn test_parse_partitions() {
        let input = lines(TWO_BY_TWO);
        let (head, tail) = input.split_at(4);
        let roots = parse_partitions(&[head, tail], RecoveryMode::Strict).unwrap();
        assert_eq!(roots, parse(&input, 1).unwrap());
    }

    #[test]
    fn test_nodes_serialize_with_type_tag() {
        let roots = parse(&lines(CELL_TABLE), 1).unwrap();
        let json = serde_json::to_value(&roots).unwrap();
        assert_eq!(json[0]["type"], "Table");
        assert_eq!(json[0]["type"], roots[0].kind_name());
        assert_eq!(
            json[0]["rows"][0]["cells"][0]["paragraphs"][0]["runs"][0]["text"],
            "Cell 1"
        );
        let back: Vec<ElementNode> = serde_json::from_value(json).unwrap();
        assert_eq!(back, roots);
    }
}
