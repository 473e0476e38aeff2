//! # Doc IR
//!
//! The layout intermediate representation, in the style described by Philip
//! Wadler in [`A prettier printer`](https://homepages.inf.ed.ac.uk/wadler/papers/prettier/prettier.pdf).
//!
//! The translator builds a `Doc` tree recording both concrete output and the
//! places where layout may vary; the printer then chooses, for every
//! [`Doc::Group`], whether to render it flat or broken. The tree is allocated
//! in a [`bumpalo`] arena and borrows its text from the source (or from
//! strings interned into the same arena), so building it allocates almost
//! nothing on the global heap.

use bumpalo::{boxed::Box, collections::Vec};
use std::fmt;

/// A node of the layout IR
#[derive(Default)]
pub enum Doc<'a> {
  /// No content
  #[default]
  Empty,
  /// Literal output; must not contain newlines
  Text(&'a str),
  /// Sequential composition
  Concat(Vec<'a, Doc<'a>>),
  /// One more level of indentation for contained line breaks
  Indent(Box<'a, Doc<'a>>),
  /// An additive indent of a fixed number of columns
  Align(u16, Box<'a, Doc<'a>>),
  /// A flat/break decision point
  Group {
    content: Box<'a, Doc<'a>>,
    /// Skip the fits check and always break
    should_break: bool,
  },
  /// A newline when broken, a space when flat
  Line,
  /// A newline when broken, nothing when flat
  SoftLine,
  /// Always a newline; forces enclosing groups to break
  HardLine,
  /// Always a newline, with indentation reset to column zero
  LiteralLine,
  /// One of two docs depending on the enclosing group's decision
  IfBreak {
    broken: Box<'a, Doc<'a>>,
    flat: Box<'a, Doc<'a>>,
  },
  /// Content deferred to the end of the current line
  LineSuffix(Box<'a, Doc<'a>>),
  /// Force pending line-suffix content to flush
  LineSuffixBoundary,
  /// An opaque marker recording an output position
  Cursor,
}

impl Doc<'_> {
  /// Does the doc always break, forcing every enclosing group to break?
  pub fn has_forced_break(&self) -> bool {
    match self {
      Doc::HardLine | Doc::LiteralLine => true,
      Doc::Group { should_break: true, .. } => true,
      Doc::Group { content, .. } | Doc::Indent(content) | Doc::Align(_, content) => {
        content.has_forced_break()
      }
      Doc::Concat(parts) => parts.iter().any(Doc::has_forced_break),
      Doc::Empty
      | Doc::Text(_)
      | Doc::Line
      | Doc::SoftLine
      | Doc::IfBreak { .. }
      | Doc::LineSuffix(_)
      | Doc::LineSuffixBoundary
      | Doc::Cursor => false,
    }
  }
}

/// Doc-notation, used by `--debug-print-doc`
impl fmt::Display for Doc<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Doc::Empty => write!(f, "nil"),
      Doc::Text(text) => write!(f, "{text:?}"),
      Doc::Concat(parts) => {
        write!(f, "[")?;
        for (index, part) in parts.iter().enumerate() {
          if index > 0 {
            write!(f, ", ")?;
          }
          write!(f, "{part}")?;
        }
        write!(f, "]")
      }
      Doc::Indent(content) => write!(f, "indent({content})"),
      Doc::Align(columns, content) => write!(f, "align({columns}, {content})"),
      Doc::Group { content, should_break: false } => write!(f, "group({content})"),
      Doc::Group { content, should_break: true } => write!(f, "group!({content})"),
      Doc::Line => write!(f, "line"),
      Doc::SoftLine => write!(f, "softline"),
      Doc::HardLine => write!(f, "hardline"),
      Doc::LiteralLine => write!(f, "literalline"),
      Doc::IfBreak { broken, flat } => write!(f, "ifBreak({broken}, {flat})"),
      Doc::LineSuffix(content) => write!(f, "lineSuffix({content})"),
      Doc::LineSuffixBoundary => write!(f, "lineSuffixBoundary"),
      Doc::Cursor => write!(f, "cursor"),
    }
  }
}

impl fmt::Debug for Doc<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{self}")
  }
}
