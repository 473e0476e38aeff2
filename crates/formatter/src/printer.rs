//! # Doc printer
//!
//! The width-aware layout engine: renders a [`Doc`] tree to a string,
//! choosing for every [`Doc::Group`] whether to print it flat or broken so
//! that lines stay within the print width where feasible.
//!
//! A work stack of `(indent, mode, doc)` commands is dispatched in order; a
//! group measures its flat width with a bounded [`fits`] lookahead against
//! the remaining column budget. Line-suffix content is queued per line and
//! flushed at the next real newline. The engine always emits `\n`; the caller
//! substitutes other line endings afterwards.

use crate::{
  config::{Config, Indentation},
  doc::Doc,
};

/// Whether the enclosing group rendered flat or broken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
  Flat,
  Break,
}

/// The indentation state a command is printed under
#[derive(Debug, Clone, Copy, Default)]
struct Indent {
  /// Whole indentation levels
  level: u16,
  /// Extra columns of alignment
  align: u16,
}
impl Indent {
  fn deeper(self) -> Self {
    Self {
      level: self.level + 1,
      ..self
    }
  }

  fn aligned(self, columns: u16) -> Self {
    Self {
      align: self.align + columns,
      ..self
    }
  }

  fn width(self, indentation: Indentation) -> usize {
    usize::from(self.level) * usize::from(indentation.len()) + usize::from(self.align)
  }

  fn write(self, out: &mut String, indentation: Indentation) {
    match indentation {
      Indentation::Space(n) => {
        let spaces = usize::from(self.level) * usize::from(n) + usize::from(self.align);
        out.extend(std::iter::repeat_n(' ', spaces));
      }
      Indentation::Tab => {
        out.extend(std::iter::repeat_n('\t', usize::from(self.level)));
        out.extend(std::iter::repeat_n(' ', usize::from(self.align)));
      }
    }
  }
}

/// A command on the printer's work stack
enum Command<'doc, 'a> {
  Doc(Indent, Mode, &'doc Doc<'a>),
  /// A newline queued behind a line-suffix flush
  Newline(Indent, bool),
}

/// Render a `Doc` tree as a string respecting the print width.
///
/// # Panics
///
/// Panics if a [`Doc::Text`] contains a newline (a translator bug).
pub fn print_doc_to_string(doc: &Doc, config: Config) -> String {
  print_doc(doc, config).0
}

/// As [`print_doc_to_string`], also returning the output offset of the first
/// [`Doc::Cursor`] encountered
pub(crate) fn print_doc(doc: &Doc, config: Config) -> (String, Option<usize>) {
  let width = usize::from(config.print_width);
  let mut out = String::new();
  let mut column: usize = 0;
  let mut cursor = None;

  let mut stack = vec![Command::Doc(Indent::default(), Mode::Break, doc)];
  let mut suffixes: Vec<Command> = Vec::new();

  loop {
    let Some(command) = stack.pop() else {
      // line-suffix content at the very end of the output
      if suffixes.is_empty() {
        break;
      }
      stack.extend(suffixes.drain(..).rev());
      continue;
    };

    let (indent, mode, doc) = match command {
      Command::Doc(indent, mode, doc) => (indent, mode, doc),
      Command::Newline(indent, literal) => {
        emit_newline(&mut out, &mut column, indent, literal, config.indentation);
        continue;
      }
    };

    match doc {
      Doc::Empty => {}

      Doc::Text(text) => {
        assert!(!text.contains('\n'), "Doc::Text must not contain newlines: {text:?}");
        out.push_str(text);
        column += text.chars().count();
      }

      Doc::Concat(parts) => {
        for part in parts.iter().rev() {
          stack.push(Command::Doc(indent, mode, part));
        }
      }

      Doc::Indent(content) => stack.push(Command::Doc(indent.deeper(), mode, content)),
      Doc::Align(columns, content) => {
        stack.push(Command::Doc(indent.aligned(*columns), mode, content));
      }

      Doc::Group { content, should_break } => {
        let flat = !should_break
          && !content.has_forced_break()
          && fits(content, width.saturating_sub(column));
        let mode = if flat { Mode::Flat } else { Mode::Break };
        stack.push(Command::Doc(indent, mode, content));
      }

      Doc::Line | Doc::SoftLine | Doc::HardLine | Doc::LiteralLine => {
        let breaks = match doc {
          Doc::Line | Doc::SoftLine => mode == Mode::Break,
          _ => true,
        };

        if !breaks {
          if matches!(doc, Doc::Line) {
            out.push(' ');
            column += 1;
          }
          continue;
        }

        if suffixes.is_empty() {
          emit_newline(
            &mut out,
            &mut column,
            indent,
            matches!(doc, Doc::LiteralLine),
            config.indentation,
          );
        } else {
          // the pending suffix content prints first, then the newline
          stack.push(Command::Newline(indent, matches!(doc, Doc::LiteralLine)));
          stack.extend(suffixes.drain(..).rev());
        }
      }

      Doc::IfBreak { broken, flat } => {
        let chosen = if mode == Mode::Break { broken } else { flat };
        stack.push(Command::Doc(indent, mode, chosen));
      }

      Doc::LineSuffix(content) => suffixes.push(Command::Doc(indent, mode, content)),

      Doc::LineSuffixBoundary => {
        if !suffixes.is_empty() {
          stack.push(Command::Newline(indent, false));
          stack.extend(suffixes.drain(..).rev());
        }
      }

      Doc::Cursor => {
        if cursor.is_none() {
          cursor = Some(out.len());
        }
      }
    }
  }

  (out, cursor)
}

fn emit_newline(out: &mut String, column: &mut usize, indent: Indent, literal: bool, indentation: Indentation) {
  // no trailing whitespace before a line break
  while out.ends_with(' ') || out.ends_with('\t') {
    out.pop();
  }
  out.push('\n');

  if literal {
    *column = 0;
  } else {
    indent.write(out, indentation);
    *column = indent.width(indentation);
  }
}

/// Would the doc, rendered flat, fit within the remaining width?
///
/// The walk is bounded: it stops as soon as the budget is exhausted, so the
/// cost is O(width) rather than O(size of the group). Hard line breaks never
/// fit; forced-break groups are rejected before this check by
/// [`Doc::has_forced_break`].
fn fits(doc: &Doc, width: usize) -> bool {
  let mut remaining = width as isize;
  let mut stack = vec![doc];

  while let Some(doc) = stack.pop() {
    match doc {
      Doc::Empty | Doc::Cursor | Doc::LineSuffix(_) | Doc::LineSuffixBoundary => {}

      Doc::Text(text) => {
        remaining -= text.chars().count() as isize;
        if remaining < 0 {
          return false;
        }
      }

      Doc::Line => {
        remaining -= 1;
        if remaining < 0 {
          return false;
        }
      }
      Doc::SoftLine => {}
      Doc::HardLine | Doc::LiteralLine => return false,

      Doc::Concat(parts) => stack.extend(parts.iter().rev()),
      Doc::Indent(content) | Doc::Align(_, content) | Doc::Group { content, .. } => {
        stack.push(content);
      }
      Doc::IfBreak { flat, .. } => stack.push(flat),
    }
  }

  true
}

#[cfg(test)]
mod test {
  use super::*;
  use bumpalo::{Bump, boxed::Box, collections::Vec};

  fn config(print_width: u16) -> Config {
    Config {
      print_width,
      ..Config::default()
    }
  }

  fn group<'a>(allocator: &'a Bump, content: Doc<'a>) -> Doc<'a> {
    Doc::Group {
      content: Box::new_in(content, allocator),
      should_break: false,
    }
  }

  fn concat<'a, const N: usize>(allocator: &'a Bump, parts: [Doc<'a>; N]) -> Doc<'a> {
    Doc::Concat(Vec::from_iter_in(parts, allocator))
  }

  #[test]
  fn text_renders_verbatim() {
    let doc = Doc::Text("hello");
    assert_eq!(print_doc_to_string(&doc, config(80)), "hello");
  }

  #[test]
  fn group_which_fits_renders_flat() {
    let allocator = Bump::new();
    let doc = group(&allocator, concat(&allocator, [Doc::Text("a"), Doc::Line, Doc::Text("b")]));
    assert_eq!(print_doc_to_string(&doc, config(80)), "a b");
  }

  #[test]
  fn group_which_overflows_breaks() {
    let allocator = Bump::new();
    let doc = group(
      &allocator,
      concat(&allocator, [Doc::Text("aaaa"), Doc::Line, Doc::Text("bbbb")]),
    );
    assert_eq!(print_doc_to_string(&doc, config(5)), "aaaa\nbbbb");
  }

  #[test]
  fn exact_width_renders_flat() {
    let allocator = Bump::new();
    let doc = group(&allocator, concat(&allocator, [Doc::Text("ab"), Doc::Line, Doc::Text("cd")]));
    // "ab cd" is exactly five columns
    assert_eq!(print_doc_to_string(&doc, config(5)), "ab cd");
  }

  #[test]
  fn softline_renders_to_nothing_when_flat() {
    let allocator = Bump::new();
    let doc = group(
      &allocator,
      concat(&allocator, [Doc::Text("("), Doc::SoftLine, Doc::Text("a"), Doc::SoftLine, Doc::Text(")")]),
    );
    assert_eq!(print_doc_to_string(&doc, config(80)), "(a)");
  }

  #[test]
  fn hardline_forces_enclosing_group_to_break() {
    let allocator = Bump::new();
    let doc = group(
      &allocator,
      concat(&allocator, [Doc::Text("a"), Doc::Line, Doc::HardLine, Doc::Text("b")]),
    );
    assert_eq!(print_doc_to_string(&doc, config(80)), "a\n\nb");
  }

  #[test]
  fn indentation_applies_to_line_breaks() {
    let allocator = Bump::new();
    let doc = group(
      &allocator,
      concat(
        &allocator,
        [
          Doc::Text("{"),
          Doc::Indent(Box::new_in(
            concat(&allocator, [Doc::HardLine, Doc::Text("a")]),
            &allocator,
          )),
          Doc::HardLine,
          Doc::Text("}"),
        ],
      ),
    );
    assert_eq!(print_doc_to_string(&doc, config(80)), "{\n  a\n}");
  }

  #[test]
  fn tabs_for_indentation() {
    let allocator = Bump::new();
    let doc = concat(
      &allocator,
      [
        Doc::Text("{"),
        Doc::Indent(Box::new_in(
          concat(&allocator, [Doc::HardLine, Doc::Text("a")]),
          &allocator,
        )),
        Doc::HardLine,
        Doc::Text("}"),
      ],
    );
    let config = Config {
      indentation: Indentation::Tab,
      ..Config::default()
    };
    assert_eq!(print_doc_to_string(&doc, config), "{\n\ta\n}");
  }

  #[test]
  fn align_adds_columns() {
    let allocator = Bump::new();
    let doc = Doc::Align(
      3,
      Box::new_in(concat(&allocator, [Doc::Text("a"), Doc::HardLine, Doc::Text("b")]), &allocator),
    );
    assert_eq!(print_doc_to_string(&doc, config(80)), "a\n   b");
  }

  #[test]
  fn if_break_selects_by_mode() {
    let allocator = Bump::new();
    let trailing = |allocator| Doc::IfBreak {
      broken: Box::new_in(Doc::Text(","), allocator),
      flat: Box::new_in(Doc::Empty, allocator),
    };

    let flat = group(&allocator, concat(&allocator, [Doc::Text("a"), trailing(&allocator)]));
    assert_eq!(print_doc_to_string(&flat, config(80)), "a");

    let broken = Doc::Group {
      content: Box::new_in(
        concat(&allocator, [Doc::Text("a"), trailing(&allocator), Doc::SoftLine]),
        &allocator,
      ),
      should_break: true,
    };
    assert_eq!(print_doc_to_string(&broken, config(80)), "a,\n");
  }

  #[test]
  fn line_suffix_defers_to_end_of_line() {
    let allocator = Bump::new();
    let doc = concat(
      &allocator,
      [
        Doc::Text("code"),
        Doc::LineSuffix(Box::new_in(Doc::Text(" // comment"), &allocator)),
        Doc::Text(" + more"),
        Doc::HardLine,
        Doc::Text("next"),
      ],
    );
    assert_eq!(
      print_doc_to_string(&doc, config(80)),
      "code + more // comment\nnext"
    );
  }

  #[test]
  fn line_suffix_flushes_at_end_of_output() {
    let allocator = Bump::new();
    let doc = concat(
      &allocator,
      [Doc::Text("code"), Doc::LineSuffix(Box::new_in(Doc::Text(" // trailing"), &allocator))],
    );
    assert_eq!(print_doc_to_string(&doc, config(80)), "code // trailing");
  }

  #[test]
  fn literal_line_resets_indentation() {
    let allocator = Bump::new();
    let doc = Doc::Indent(Box::new_in(
      concat(&allocator, [Doc::Text("a"), Doc::LiteralLine, Doc::Text("b")]),
      &allocator,
    ));
    assert_eq!(print_doc_to_string(&doc, config(80)), "a\nb");
  }

  #[test]
  fn trailing_whitespace_is_trimmed_at_breaks() {
    let allocator = Bump::new();
    let doc = concat(&allocator, [Doc::Text("a "), Doc::HardLine, Doc::Text("b")]);
    assert_eq!(print_doc_to_string(&doc, config(80)), "a\nb");
  }

  #[test]
  fn nested_groups_break_independently() {
    let allocator = Bump::new();
    let inner = group(&allocator, concat(&allocator, [Doc::Text("a"), Doc::Line, Doc::Text("b")]));
    let doc = group(
      &allocator,
      concat(&allocator, [Doc::Text("xxxxxxxx"), Doc::Line, inner]),
    );
    // the outer group breaks, the inner still fits on its own line
    assert_eq!(print_doc_to_string(&doc, config(10)), "xxxxxxxx\na b");
  }

  #[test]
  fn fits_lookahead_is_bounded() {
    // a very wide concat: the fits check must bail out early rather than
    // walk the entire tree
    let allocator = Bump::new();
    let mut parts = Vec::new_in(&allocator);
    for _ in 0..100_000 {
      parts.push(Doc::Text("abc"));
    }
    let doc = group(&allocator, Doc::Concat(parts));
    let output = print_doc_to_string(&doc, config(10));
    assert!(output.starts_with("abc"));
  }
}
