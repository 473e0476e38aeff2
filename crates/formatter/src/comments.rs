//! # Comment engine
//!
//! Attaches every comment to a position in the output and hands them to the
//! translator as it prints.
//!
//! Attachment is a pre-pass over the comments collected by the parser, using
//! the neighbouring-token context the parser recorded: a comment on the same
//! line as the token before it trails that position; a comment alone between
//! the delimiters of an empty container dangles on the container; anything
//! else leads the next token's position. The translator drains comments by
//! position as it reaches them, marking each printed; a comment left
//! unprinted at the end of a format is a translator bug and panics.

use jsfmt_syntax::{Span, ast::Comment};
use std::cell::Cell;

pub use jsfmt_syntax::ast::CommentKind;

/// Where an attached comment is emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
  /// Before the node starting at the anchor offset
  Leading { anchor: u32 },
  /// At the end of the line of the node ending at the anchor offset
  Trailing { anchor: u32 },
  /// Inside an empty container spanning the anchors
  Dangling { start: u32, end: u32 },
  /// After the last statement of the file
  EndOfFile,
}

/// A comment with its attachment decision
#[derive(Debug)]
struct AttachedComment {
  span: Span,
  kind: CommentKind,
  placement: Placement,
  own_line: bool,
  printed: Cell<bool>,
}

/// An owned view of a drained comment, free of the store's borrow
#[derive(Debug, Clone, Copy)]
pub struct TakenComment {
  pub span: Span,
  pub kind: CommentKind,
  /// Was the comment separated from what follows it by a line break?
  pub own_line: bool,
}

/// All comments of a file, ordered by position
pub struct Comments<'source> {
  source: &'source str,
  comments: Vec<AttachedComment>,
}
impl<'source> Comments<'source> {
  /// Run the attachment pre-pass
  pub fn attach(source: &'source str, comments: &[Comment]) -> Self {
    let attached = comments
      .iter()
      .map(|comment| AttachedComment {
        span: comment.span,
        kind: comment.kind,
        placement: placement(source, comment),
        own_line: !comment.same_line_as_next,
        printed: Cell::new(false),
      })
      .collect();

    Self {
      source,
      comments: attached,
    }
  }

  /// The text of a comment, including its delimiters
  #[must_use]
  pub fn text(&self, comment: TakenComment) -> &'source str {
    comment.span.source_text(self.source)
  }

  /// Drain the unprinted leading comments anchored at or before `position`
  pub fn take_leading(&self, position: u32) -> Vec<TakenComment> {
    self.take(|comment| {
      matches!(comment.placement, Placement::Leading { anchor } if anchor <= position)
    })
  }

  /// Drain the unprinted trailing comments anchored at or before `position`
  pub fn take_trailing(&self, position: u32) -> Vec<TakenComment> {
    self.take(|comment| {
      matches!(comment.placement, Placement::Trailing { anchor } if anchor <= position)
    })
  }

  /// Drain the unprinted dangling comments inside the container span
  pub fn take_dangling(&self, container: Span) -> Vec<TakenComment> {
    self.take(|comment| match comment.placement {
      Placement::Dangling { start, end } => {
        container.start <= start && end <= container.end
      }
      _ => false,
    })
  }

  /// Drain every comment still unprinted, in source order. The program
  /// printer uses this as the last resort so no comment is ever dropped,
  /// whatever container it hid in.
  pub fn take_remaining(&self) -> Vec<TakenComment> {
    self.take(|_| true)
  }

  fn take(&self, select: impl Fn(&AttachedComment) -> bool) -> Vec<TakenComment> {
    let mut taken = Vec::new();
    for comment in &self.comments {
      if !comment.printed.get() && select(comment) {
        comment.printed.set(true);
        taken.push(TakenComment {
          span: comment.span,
          kind: comment.kind,
          own_line: comment.own_line,
        });
      }
    }
    taken
  }

  /// Is the comment a `prettier-ignore` marker?
  pub fn is_ignore(&self, comment: TakenComment) -> bool {
    let text = self.text(comment);
    let body = match comment.kind {
      CommentKind::Line => text.trim_start_matches("//"),
      CommentKind::Block => text
        .trim_start_matches("/*")
        .trim_end_matches("*/"),
    };
    body.trim() == "prettier-ignore"
  }

  /// Mark every comment within the span printed: the span's raw source is
  /// being copied verbatim, comments included
  pub fn mark_printed_within(&self, span: Span) {
    for comment in &self.comments {
      if span.contains(comment.span) {
        comment.printed.set(true);
      }
    }
  }

  /// Every comment must have been emitted exactly once.
  ///
  /// # Panics
  ///
  /// Panics with the comment's text if one was never printed; that is always
  /// a translator bug and must surface loudly.
  pub fn assert_all_printed(&self) {
    for comment in &self.comments {
      assert!(
        comment.printed.get(),
        "comment was not printed: {:?}",
        comment.span.source_text(self.source),
      );
    }
  }
}

/// The attachment decision for one comment
fn placement(source: &str, comment: &Comment) -> Placement {
  // alone between the delimiters of an empty `{}`, `[]`, or `()`
  if let (Some(previous), Some(next)) = (comment.previous_token_end, comment.next_token_start) {
    let before = source.as_bytes().get(previous as usize - 1);
    let after = source.as_bytes().get(next as usize);
    let empty_container = matches!(
      (before, after),
      (Some(b'{'), Some(b'}')) | (Some(b'['), Some(b']')) | (Some(b'('), Some(b')'))
    );
    if empty_container {
      return Placement::Dangling { start: previous, end: next };
    }
  }

  if let Some(previous) = comment.previous_token_end
    && comment.same_line_as_previous
  {
    return Placement::Trailing { anchor: previous };
  }

  match comment.next_token_start {
    Some(next) => Placement::Leading { anchor: next },
    None => Placement::EndOfFile,
  }
}
