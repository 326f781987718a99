//! Stack machine that builds elements from classified lines.
//!
//! Open tags push a [`Frame`], text lines land in the top frame, and close
//! tags pop back to the matching frame and reduce it (see [`crate::reduce`]).
//! A reduced frame goes into its parent's content, or into the root list when
//! the stack is empty.
//!
//! In tolerant mode nothing here fails. Misplaced markup is dropped:
//!
//! - a malformed tag line has no effect
//! - text outside any element is discarded
//! - a close tag discards every frame opened after its match, content included
//! - a close tag with no match empties the stack
//! - frames still open when input ends are lost

use wml_lexer::{extract_attributes, Token, TokenKind};

use crate::ast::{ContentItem, ElementNode, Frame};
use crate::config::RecoveryMode;
use crate::reduce::reduce;
use crate::{StrictError, Violation};

/// Push-down element builder for one partition.
#[derive(Debug, Default)]
pub struct StackMachine {
    stack: Vec<Frame>,
    roots: Vec<ElementNode>,
    mode: RecoveryMode,
}

impl StackMachine {
    pub fn new(mode: RecoveryMode) -> Self {
        Self {
            stack: Vec::new(),
            roots: Vec::new(),
            mode,
        }
    }

    /// Feed all tokens and return the root elements.
    pub fn run(
        tokens: impl IntoIterator<Item = Token>,
        mode: RecoveryMode,
    ) -> Result<Vec<ElementNode>, StrictError> {
        let mut machine = StackMachine::new(mode);
        for token in tokens {
            machine.feed(token)?;
        }
        machine.finish()
    }

    /// Number of open frames.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Roots reduced so far.
    pub fn roots(&self) -> &[ElementNode] {
        &self.roots
    }

    /// Process one classified line.
    pub fn feed(&mut self, token: Token) -> Result<(), StrictError> {
        let line = token.line;
        match token.kind {
            TokenKind::OpenTag { name, attr_text } => {
                let attributes = extract_attributes(&attr_text);
                self.stack.push(Frame::new(name, attributes, line));
                Ok(())
            }
            TokenKind::CloseTag { name } => self.close(name, line),
            TokenKind::Text(text) => {
                match self.stack.last_mut() {
                    Some(frame) => frame.content.push(ContentItem::Text(text)),
                    None => {
                        self.violation(
                            Violation::StrayText,
                            line,
                            format!("Text outside any element: {text:?}"),
                        )?;
                        log::debug!("line {line}: discarding text outside any element");
                    }
                }
                Ok(())
            }
            TokenKind::Malformed(text) => {
                self.violation(
                    Violation::MalformedTag,
                    line,
                    format!("Unreadable tag name in {text:?}"),
                )?;
                log::debug!("line {line}: ignoring malformed tag {text:?}");
                Ok(())
            }
        }
    }

    /// End the partition and return its root elements.
    pub fn finish(self) -> Result<Vec<ElementNode>, StrictError> {
        if let Some(frame) = self.stack.first() {
            if self.mode == RecoveryMode::Strict {
                return Err(StrictError::new(
                    Violation::UnclosedTag,
                    frame.line,
                    format!("Tag '{}' is never closed", frame.name),
                ));
            }
            log::debug!(
                "dropping {} unclosed frame(s) at end of input, outermost '{}' from line {}",
                self.stack.len(),
                frame.name,
                frame.line
            );
        }
        Ok(self.roots)
    }

    fn close(&mut self, name: String, line: usize) -> Result<(), StrictError> {
        if self.mode == RecoveryMode::Strict {
            match self.stack.iter().rposition(|frame| frame.name == name) {
                None => {
                    return Err(StrictError::new(
                        Violation::UnmatchedClose,
                        line,
                        format!("Closing tag '{name}' has no open tag"),
                    ))
                }
                Some(index) if index + 1 < self.stack.len() => {
                    let open = &self.stack[self.stack.len() - 1];
                    return Err(StrictError::new(
                        Violation::MismatchedClose,
                        line,
                        format!(
                            "Closing tag '{name}' while '{}' from line {} is still open",
                            open.name, open.line
                        ),
                    ));
                }
                Some(_) => {}
            }
        }

        let mut discarded = 0;
        while let Some(frame) = self.stack.pop() {
            if frame.name == name {
                if discarded > 0 {
                    log::debug!("line {line}: '</{name}>' discarded {discarded} open frame(s)");
                }
                self.attach(reduce(frame));
                return Ok(());
            }
            discarded += 1;
        }

        log::debug!("line {line}: '</{name}>' matched nothing, dropped {discarded} open frame(s)");
        Ok(())
    }

    fn attach(&mut self, item: ContentItem) {
        match self.stack.last_mut() {
            Some(parent) => parent.content.push(item),
            None => match item {
                ContentItem::Node(node) => self.roots.push(node),
                ContentItem::NodeList(nodes) => self.roots.extend(nodes),
                // Reductions never produce bare text.
                ContentItem::Text(_) => {}
            },
        }
    }

    fn violation(&self, kind: Violation, line: usize, message: String) -> Result<(), StrictError> {
        match self.mode {
            RecoveryMode::Strict => Err(StrictError::new(kind, line, message)),
            RecoveryMode::Tolerant => Ok(()),
        }
    }
}
