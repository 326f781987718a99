//! Partition planning and the parallel partition runner.
//!
//! Each partition gets its own [`StackMachine`]; partitions share nothing and
//! run on the rayon pool. Root elements are concatenated in partition order.
//! A tag whose open and close lines land in different partitions is lost:
//! the first partition ends with it unclosed and the second sees an
//! unmatched close.

use std::ops::Range;

use rayon::prelude::*;
use wml_lexer::{Scanner, TokenKind};

use crate::ast::ElementNode;
use crate::builder::StackMachine;
use crate::config::RecoveryMode;
use crate::StrictError;

/// Where partition boundaries may fall.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// Equal-sized contiguous chunks, ignoring tag structure.
    #[default]
    Positional,
    /// Cut only where every open tag has been closed.
    RootAligned,
}

/// Split `lines` into at most `partitions` contiguous ranges.
pub fn plan<S: AsRef<str>>(
    lines: &[S],
    partitions: usize,
    policy: BoundaryPolicy,
) -> Vec<Range<usize>> {
    let ranges = match policy {
        BoundaryPolicy::Positional => positional_ranges(lines.len(), partitions),
        BoundaryPolicy::RootAligned => root_aligned_ranges(lines, partitions),
    };
    log::debug!(
        "planned {} partition(s) over {} line(s) ({policy:?}): {ranges:?}",
        ranges.len(),
        lines.len()
    );
    ranges
}

/// `partitions` chunks whose sizes differ by at most one, larger chunks first.
///
/// At most one chunk per line is made; further chunks would be empty.
pub fn positional_ranges(len: usize, partitions: usize) -> Vec<Range<usize>> {
    let partitions = effective_partitions(len, partitions);
    let base = len / partitions;
    let extra = len % partitions;

    let mut ranges = Vec::with_capacity(partitions);
    let mut start = 0;
    for i in 0..partitions {
        let size = base + usize::from(i < extra);
        ranges.push(start..start + size);
        start += size;
    }
    ranges
}

/// Group whole top-level subtrees into at most `partitions` ranges of
/// roughly `len / partitions` lines each.
///
/// Depth is tracked with the same pop-to-match rule the stack machine uses,
/// so a cut never separates an open tag from the close tag that would
/// reduce it.
pub fn root_aligned_ranges<S: AsRef<str>>(lines: &[S], partitions: usize) -> Vec<Range<usize>> {
    let partitions = effective_partitions(lines.len(), partitions);
    let target = lines.len().div_ceil(partitions).max(1);

    let mut open: Vec<String> = Vec::new();
    let mut ranges = Vec::with_capacity(partitions);
    let mut start = 0;

    for token in Scanner::new(lines).tokens() {
        match token.kind {
            TokenKind::OpenTag { name, .. } => open.push(name),
            TokenKind::CloseTag { name } => {
                while let Some(top) = open.pop() {
                    if top == name {
                        break;
                    }
                }
            }
            TokenKind::Text(_) | TokenKind::Malformed(_) => {}
        }

        // `token.line` is 1-based, so it is also the index just past this line.
        let end = token.line;
        if open.is_empty() && end - start >= target && ranges.len() + 1 < partitions {
            ranges.push(start..end);
            start = end;
        }
    }

    if start < lines.len() || ranges.is_empty() {
        ranges.push(start..lines.len());
    }
    ranges
}

/// Partition count capped to `1..=len`. Empty partitions add no roots.
fn effective_partitions(len: usize, partitions: usize) -> usize {
    partitions.clamp(1, len.max(1))
}

/// Run one stack machine per range and concatenate the roots in order.
pub fn run_partitions<S: AsRef<str> + Sync>(
    lines: &[S],
    ranges: &[Range<usize>],
    mode: RecoveryMode,
) -> Result<Vec<ElementNode>, StrictError> {
    let per_partition: Vec<Vec<ElementNode>> = ranges
        .par_iter()
        .map(|range| {
            let tokens = Scanner::with_offset(&lines[range.clone()], range.start).tokens();
            let roots = StackMachine::run(tokens, mode)?;
            log::trace!("partition {range:?} produced {} root(s)", roots.len());
            Ok(roots)
        })
        .collect::<Result<_, StrictError>>()?;

    Ok(per_partition.into_iter().flatten().collect())
}

/// Run caller-chosen partitions. Line numbers continue across partitions.
pub fn run_slices<S: AsRef<str> + Sync>(
    partitions: &[&[S]],
    mode: RecoveryMode,
) -> Result<Vec<ElementNode>, StrictError> {
    let mut offsets = Vec::with_capacity(partitions.len());
    let mut offset = 0;
    for slice in partitions {
        offsets.push(offset);
        offset += slice.len();
    }

    let per_partition: Vec<Vec<ElementNode>> = partitions
        .par_iter()
        .zip(offsets.par_iter())
        .map(|(slice, &offset)| {
            StackMachine::run(Scanner::with_offset(*slice, offset).tokens(), mode)
        })
        .collect::<Result<_, StrictError>>()?;

    Ok(per_partition.into_iter().flatten().collect())
}
