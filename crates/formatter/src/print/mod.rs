//! # AST→Doc translator
//!
//! Converts the parsed tree into the layout IR. Each node kind has a printer
//! which emits the node's syntactic skeleton, delegates children through the
//! path cursor (so the parenthesization oracle and the comment engine observe
//! true ancestry), and glues attached comments around the right fragments.

mod expression;
mod jsx;
mod statement;
mod types;

use crate::{
  comments::{CommentKind, Comments, TakenComment},
  config::Config,
  doc::Doc,
  path::{Node, Path},
};
use bumpalo::{Bump, boxed::Box, collections::Vec};
use jsfmt_syntax::{Ast, LineIndex, Span, ast::statement::Program};
use std::mem;

/// Translate an AST into a `Doc`, attaching and emitting all comments.
///
/// `add_alignment` columns are added to every continuation line, used by
/// range formatting to keep wrapped lines aligned with the original indent.
///
/// # Panics
///
/// Panics if a comment goes unprinted: that is a translator bug.
pub fn print_ast_to_doc<'a, 's: 'a>(
  ast: &'a Ast<'s>,
  allocator: &'a Bump,
  config: Config,
  add_alignment: u16,
) -> Doc<'a> {
  let comments = Comments::attach(ast.source, &ast.comments);
  let mut printer = Printer {
    source: ast.source,
    config,
    allocator,
    comments,
    line_index: ast.line_index(),
    path: Path::new(Node::Program(&ast.program)),
  };

  let doc = printer.program(&ast.program);
  printer.comments.assert_all_printed();

  if add_alignment > 0 {
    Doc::Align(add_alignment, Box::new_in(doc, allocator))
  } else {
    doc
  }
}

pub(crate) struct Printer<'a, 's> {
  pub(crate) source: &'s str,
  pub(crate) config: Config,
  pub(crate) allocator: &'a Bump,
  pub(crate) comments: Comments<'s>,
  pub(crate) line_index: &'a LineIndex,
  pub(crate) path: Path<'a, 's>,
}

impl<'a, 's: 'a> Printer<'a, 's> {
  // ---- doc construction helpers ----

  pub(crate) fn concat<const N: usize>(&self, mut parts: [Doc<'a>; N]) -> Doc<'a> {
    match N {
      0 => Doc::Empty,
      1 => mem::take(&mut parts[0]),
      _ => Doc::Concat(Vec::from_iter_in(parts, self.allocator)),
    }
  }

  pub(crate) fn concat_iter(&self, parts: impl IntoIterator<Item = Doc<'a>>) -> Doc<'a> {
    Doc::Concat(Vec::from_iter_in(parts, self.allocator))
  }

  pub(crate) fn group<const N: usize>(&self, parts: [Doc<'a>; N]) -> Doc<'a> {
    Doc::Group {
      content: Box::new_in(self.concat(parts), self.allocator),
      should_break: false,
    }
  }

  pub(crate) fn indent<const N: usize>(&self, parts: [Doc<'a>; N]) -> Doc<'a> {
    Doc::Indent(Box::new_in(self.concat(parts), self.allocator))
  }

  pub(crate) fn if_break(&self, broken: Doc<'a>, flat: Doc<'a>) -> Doc<'a> {
    Doc::IfBreak {
      broken: Box::new_in(broken, self.allocator),
      flat: Box::new_in(flat, self.allocator),
    }
  }

  pub(crate) fn line_suffix(&self, content: Doc<'a>) -> Doc<'a> {
    Doc::LineSuffix(Box::new_in(content, self.allocator))
  }

  /// A zero-width mark which forces every enclosing group to break. Line
  /// suffixes are invisible to the width check, so a deferred line comment
  /// needs one to keep its container from staying flat.
  pub(crate) fn break_parent(&self) -> Doc<'a> {
    Doc::Group {
      content: Box::new_in(Doc::Empty, self.allocator),
      should_break: true,
    }
  }

  /// Intern a built string into the arena so the doc can borrow it
  pub(crate) fn string(&self, text: String) -> Doc<'a> {
    Doc::Text(self.allocator.alloc_str(&text))
  }

  /// Push a path frame around a callback
  pub(crate) fn with_frame<T>(
    &mut self,
    name: &'static str,
    node: Node<'a, 's>,
    callback: impl FnOnce(&mut Self) -> T,
  ) -> T {
    self.path.push(name, node);
    let result = callback(self);
    self.path.pop();
    result
  }

  // ---- program ----

  fn program(&mut self, program: &'a Program<'s>) -> Doc<'a> {
    let body = self.statement_list(&program.body);

    let mut parts = std::vec::Vec::new();
    let had_statements = !matches!(body, Doc::Empty);
    parts.push(body);

    // comments with nothing after them, plus any the traversal left behind,
    // in source order
    let leftover = self.comments.take_remaining();
    for (index, comment) in leftover.iter().enumerate() {
      if had_statements || index > 0 {
        parts.push(Doc::HardLine);
      }
      parts.push(self.comment_doc(*comment));
    }

    self.concat_iter(parts)
  }

  // ---- statement lists ----

  /// Print statements joined by line breaks, preserving single blank lines,
  /// draining each statement's leading and trailing comments, and honouring
  /// `prettier-ignore`
  pub(crate) fn statement_list(
    &mut self,
    statements: &'a [jsfmt_syntax::ast::Statement<'s>],
  ) -> Doc<'a> {
    use jsfmt_syntax::ast::Statement;

    let significant: std::vec::Vec<&Statement> = statements
      .iter()
      .filter(|statement| !matches!(statement, Statement::Empty(_)))
      .collect();

    let mut parts = std::vec::Vec::new();
    let mut previous_line: Option<usize> = None;

    for (index, statement) in significant.iter().enumerate() {
      let span = statement.span();
      let leading = self.comments.take_leading(span.start);
      let ignored = leading.iter().any(|comment| self.comments.is_ignore(*comment));

      let first_start = leading.first().map_or(span.start, |comment| comment.span.start);
      if let Some(previous) = previous_line {
        parts.push(Doc::HardLine);
        if self.line_index.line_of_offset(first_start) > previous + 1 {
          parts.push(Doc::HardLine);
        }
      }

      self.leading_comment_docs(&mut parts, &leading, span.start);

      if ignored {
        parts.push(self.verbatim(span));
        self.comments.mark_printed_within(span);
      } else {
        parts.push(self.statement(statement));
      }

      let upto = significant
        .get(index + 1)
        .map_or(span.end, |next| next.span().start);
      let mut end = span.end;
      for comment in self.comments.take_trailing(upto) {
        parts.push(self.trailing_comment_doc(comment));
        end = end.max(comment.span.end);
      }

      previous_line = Some(self.line_index.line_of_offset(end));
    }

    if parts.is_empty() {
      return Doc::Empty;
    }
    self.concat_iter(parts)
  }

  // ---- comment emission ----

  /// A comment's text as a doc; block comments keep their interior lines
  /// verbatim
  pub(crate) fn comment_doc(&self, comment: TakenComment) -> Doc<'a> {
    let text = comment.span.source_text(self.source);
    self.raw_lines(text)
  }

  /// Emit leading comments, each followed by a break (or a space for an
  /// inline block comment), preserving blank lines within the run
  pub(crate) fn leading_comment_docs(
    &self,
    parts: &mut std::vec::Vec<Doc<'a>>,
    leading: &[TakenComment],
    node_start: u32,
  ) {
    for (index, comment) in leading.iter().enumerate() {
      parts.push(self.comment_doc(*comment));

      if comment.kind == CommentKind::Block && !comment.own_line {
        parts.push(Doc::Text(" "));
        continue;
      }

      parts.push(Doc::HardLine);
      let next_start = leading
        .get(index + 1)
        .map_or(node_start, |next| next.span.start);
      let comment_line = self.line_index.line_of_offset(comment.span.end);
      if self.line_index.line_of_offset(next_start) > comment_line + 1 {
        parts.push(Doc::HardLine);
      }
    }
  }

  /// A trailing comment rides a line suffix so it stays on its line
  pub(crate) fn trailing_comment_doc(&self, comment: TakenComment) -> Doc<'a> {
    let content = self.concat([Doc::Text(" "), self.comment_doc(comment)]);
    self.line_suffix(content)
  }

  /// Wrap a list item's doc with the comments attached around it. A line
  /// comment breaks the containing group so it stays on the item's line
  /// instead of deferring to the end of a collapsed container.
  pub(crate) fn with_item_comments(&mut self, span: Span, upto: u32, doc: Doc<'a>) -> Doc<'a> {
    let leading = self.comments.take_leading(span.start);

    let mut parts = std::vec::Vec::new();
    self.leading_comment_docs(&mut parts, &leading, span.start);
    parts.push(doc);
    for comment in self.comments.take_trailing(upto) {
      if comment.kind == CommentKind::Line {
        parts.push(self.break_parent());
      }
      parts.push(self.trailing_comment_doc(comment));
    }

    self.concat_iter(parts)
  }

  // ---- raw source ----

  /// A span of the source copied verbatim, line structure preserved
  pub(crate) fn verbatim(&self, span: Span) -> Doc<'a> {
    self.raw_lines(span.source_text(self.source))
  }

  /// Split text with embedded newlines into `Text` pieces joined by literal
  /// line breaks
  pub(crate) fn raw_lines(&self, text: &'s str) -> Doc<'a> {
    if !text.contains('\n') {
      return Doc::Text(text);
    }

    let mut parts = std::vec::Vec::new();
    for (index, line) in text.split('\n').enumerate() {
      if index > 0 {
        parts.push(Doc::LiteralLine);
      }
      parts.push(Doc::Text(line.trim_end_matches('\r')));
    }
    self.concat_iter(parts)
  }
}
