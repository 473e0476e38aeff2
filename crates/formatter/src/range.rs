//! # Range driver
//!
//! Restricts formatting to a user-chosen span: both endpoints contract
//! inward to the nearest non-whitespace character, the span widens to the
//! smallest run of sibling statements covering it, the start expands back to
//! the beginning of its line, and the covered statements are reformatted with
//! a reduced width plus a root alignment so continuations line up with the
//! original indent. Everything outside the chosen span is spliced back
//! byte-for-byte.

use crate::{
  FormatError,
  config::Config,
  print::print_ast_to_doc,
  printer::print_doc_to_string,
};
use bumpalo::Bump;
use jsfmt_syntax::{LineIndex, Span, ast::Statement};

pub(crate) fn format_range(
  source: &str,
  config: Config,
  carriage_returns: bool,
) -> Result<String, FormatError> {
  let range_start = (config.range_start as usize).min(source.len());
  let range_end = (config.range_end as usize).min(source.len());

  // contract both endpoints to the nearest non-whitespace character
  let Some(start) = source[range_start..range_end]
    .find(|c: char| !c.is_whitespace())
    .map(|offset| range_start + offset)
  else {
    return Ok(source.to_owned());
  };
  let end = source[start..range_end]
    .rfind(|c: char| !c.is_whitespace())
    .map_or(start, |offset| start + offset + 1);

  let ast = jsfmt_syntax::parse(source);
  if let Some(error) = ast.errors.first() {
    return Err(FormatError::Parse(error.clone()));
  }

  #[allow(clippy::cast_possible_truncation, reason = "offsets come from the source")]
  let Some(span) = covering_span(&ast.program.body, start as u32, end as u32) else {
    return Ok(source.to_owned());
  };

  // the indent prefix of the first covered line becomes the alignment
  let line_index = LineIndex::from_source(source);
  let line_start = line_index.line_start_of_offset(span.start) as usize;
  let indent_prefix: String = source[line_start..span.start as usize]
    .chars()
    .take_while(|character| character.is_whitespace())
    .collect();
  let alignment = column_width(&indent_prefix, config.indentation.len());

  let slice = span.source_text(source);
  let slice_ast = jsfmt_syntax::parse(slice);
  if let Some(error) = slice_ast.errors.first() {
    return Err(FormatError::Parse(error.clone()));
  }

  let slice_config = Config {
    print_width: config.print_width.saturating_sub(alignment).max(1),
    range_start: 0,
    range_end: u32::MAX,
    ..config
  };

  let allocator = Bump::new();
  let doc = print_ast_to_doc(&slice_ast, &allocator, slice_config, alignment);
  let mut formatted = print_doc_to_string(&doc, slice_config);
  while formatted.ends_with(['\n', '\r', ' ', '\t']) {
    formatted.pop();
  }
  if carriage_returns {
    formatted = formatted.replace('\n', "\r\n");
  }

  let mut result = String::with_capacity(source.len() + formatted.len());
  result.push_str(&source[..span.start as usize]);
  result.push_str(&formatted);
  result.push_str(&source[span.end as usize..]);
  Ok(result)
}

/// The merged span of the smallest run of sibling statements covering the
/// contracted range
fn covering_span(statements: &[Statement], start: u32, end: u32) -> Option<Span> {
  let hits: Vec<&Statement> = statements
    .iter()
    .filter(|statement| {
      let span = statement.span();
      span.start <= end && span.end > start
    })
    .collect();

  let (first, last) = match hits.as_slice() {
    [] => return None,
    [only] => {
      // a single covering statement: try to contract into its bodies
      for list in child_statement_lists(only) {
        if let Some(span) = covering_span(list, start, end)
          && span.start <= start
          && span.end >= end
        {
          return Some(span);
        }
      }
      (*only, *only)
    }
    [first, .., last] => (*first, *last),
  };

  Some(first.span().merge(last.span()))
}

/// The statement lists nested directly inside a statement
fn child_statement_lists<'a, 's>(statement: &'a Statement<'s>) -> Vec<&'a [Statement<'s>]> {
  let mut lists = Vec::new();
  match statement {
    Statement::Block(block) => lists.push(block.body.as_slice()),
    Statement::Function(function) => lists.push(function.body.body.as_slice()),
    Statement::If(if_) => {
      lists.extend(block_of(&if_.consequent));
      if let Some(alternate) = &if_.alternate {
        lists.extend(block_of(alternate));
      }
    }
    Statement::For(for_) => lists.extend(block_of(&for_.body)),
    Statement::ForIn(for_in) => lists.extend(block_of(&for_in.body)),
    Statement::ForOf(for_of) => lists.extend(block_of(&for_of.body)),
    Statement::While(while_) => lists.extend(block_of(&while_.body)),
    Statement::DoWhile(do_while) => lists.extend(block_of(&do_while.body)),
    Statement::Labeled(labeled) => lists.extend(block_of(&labeled.body)),
    Statement::Try(try_) => {
      lists.push(try_.block.body.as_slice());
      if let Some(handler) = &try_.handler {
        lists.push(handler.body.body.as_slice());
      }
      if let Some(finalizer) = &try_.finalizer {
        lists.push(finalizer.body.as_slice());
      }
    }
    Statement::Switch(switch) => {
      for case in &switch.cases {
        lists.push(case.consequent.as_slice());
      }
    }
    Statement::Class(class) => {
      for method in &class.body {
        lists.push(method.function.body.body.as_slice());
      }
    }
    _ => {}
  }
  lists
}

fn block_of<'a, 's>(statement: &'a Statement<'s>) -> Option<&'a [Statement<'s>]> {
  match statement {
    Statement::Block(block) => Some(block.body.as_slice()),
    _ => None,
  }
}

/// Column width of an indent prefix, counting tabs at the indent size
fn column_width(prefix: &str, tab_width: u16) -> u16 {
  let mut width = 0u16;
  for character in prefix.chars() {
    width = width.saturating_add(if character == '\t' { tab_width } else { 1 });
  }
  width
}
