//! # AST
//!
//! The definition of the Abstract Syntax Tree (AST)
//!
//! Node kinds are closed tagged unions ([`Statement`], [`Expression`],
//! [`Pattern`], [`Type`], and the JSX structs), one struct per kind, each
//! carrying a [`Span`] of byte offsets into the source. The tree borrows
//! identifier names and raw literal text from the source; string and template
//! values are stored cooked (escape sequences processed).

use crate::{LineIndex, parser::ParseError, span::Span};
use std::cell::OnceCell;

pub mod expression;
pub mod jsx;
pub mod pattern;
mod prettyprint;
pub mod statement;
pub mod types;

pub use expression::Expression;
pub use pattern::Pattern;
pub use prettyprint::fingerprint;
pub use statement::{Program, Statement};
pub use types::Type;

/// The result of parsing a source string: the tree, its comments, and any
/// errors found along the way
#[must_use]
#[derive(Debug)]
pub struct Ast<'source> {
  /// The source code which the AST is for
  pub source: &'source str,
  /// Index of line locations, lazily constructed when required
  line_index: OnceCell<LineIndex>,

  /// The statements of the source
  pub program: Program<'source>,
  /// All comments of the source, in order, with their neighbouring-token
  /// context recorded for attachment
  pub comments: Vec<Comment>,

  /// Errors found during parsing
  pub errors: Vec<ParseError>,
}
impl<'source> Ast<'source> {
  pub(crate) fn new(source: &'source str) -> Self {
    Self {
      source,
      line_index: OnceCell::new(),
      program: Program {
        body: Vec::new(),
        span: Span::default(),
      },
      comments: Vec::new(),
      errors: Vec::new(),
    }
  }

  /// Is the parsed AST valid, with no errors found during parsing?
  #[must_use]
  pub fn is_valid(&self) -> bool {
    self.errors.is_empty()
  }

  /// The line index for the AST, the locations of the new lines in the source
  ///
  /// It is lazily initialised, and will be initialised on the first call
  pub fn line_index(&self) -> &LineIndex {
    self
      .line_index
      .get_or_init(|| LineIndex::from_source(self.source))
  }
}

/// Whether a comment is a `//` or a `/* */` comment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
  Line,
  Block,
}

/// A comment found whilst parsing, with the context needed to attach it
#[derive(Debug, Clone)]
pub struct Comment {
  /// The span of the comment, including its delimiters
  pub span: Span,
  /// Line or block comment
  pub kind: CommentKind,

  /// The end offset of the significant token before the comment, if any
  pub previous_token_end: Option<u32>,
  /// Is the comment on the same line as the token before it?
  pub same_line_as_previous: bool,
  /// The start offset of the significant token after the comment, if any
  pub next_token_start: Option<u32>,
  /// Is the comment on the same line as the token after it?
  pub same_line_as_next: bool,
}
impl Comment {
  /// The comment text including delimiters
  #[must_use]
  pub fn text<'a>(&self, source: &'a str) -> &'a str {
    self.span.source_text(source)
  }
}
