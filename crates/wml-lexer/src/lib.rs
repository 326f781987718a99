//! WML Lexer
//!
//! Turns raw WordprocessingML-style markup into classified lines.
//! The dialect is line-oriented: every open tag, close tag, or run of text
//! sits on its own line. Lines are trimmed, empty lines are dropped, and each
//! remaining line is classified as an open tag, a close tag, or text.
//!
//! # Example
//!
//! ```
//! use wml_lexer::{Scanner, TokenKind};
//!
//! let lines = wml_lexer::normalize("<w:t>\n  Hello\n</w:t>\n");
//! let tokens = Scanner::tokenize(&lines);
//! assert_eq!(tokens[1].kind, TokenKind::Text("Hello".into()));
//! ```

pub mod attributes;
pub mod scanner;
pub mod token;

pub use attributes::{extract_attributes, Attributes};
pub use scanner::{classify, normalize, Scanner};
pub use token::{Token, TokenKind};
