//! # Formatter
//!
//! An opinionated formatter for JavaScript with Flow type annotations and
//! JSX. Source text is parsed, translated into a Wadler-style document IR
//! recording every formatting choice, and laid out against the configured
//! print width; the output parses to an equivalent tree.
//!
//! Works in stages:
//! - attach comments to tree positions so they survive the round trip
//! - walk the tree with a path cursor, emitting a [`Doc`] per node and
//!   consulting the parenthesization oracle once per node
//! - choose flat or broken layout for every group within the print width
//!
//! Based upon the algorithm described by Philip Wadler in
//! [`A prettier printer`](https://homepages.inf.ed.ac.uk/wadler/papers/prettier/prettier.pdf).

pub mod config;
mod comments;
mod doc;
mod parens;
mod path;
mod print;
mod printer;
mod range;

use bumpalo::Bump;
use std::{error, fmt};

pub use config::{Config, ConfigError, Indentation, Parser, TrailingComma};
pub use doc::Doc;
pub use print::print_ast_to_doc;
pub use printer::print_doc_to_string;

/// Format source text according to the config.
///
/// # Errors
///
/// Fails on malformed options or when the source does not parse.
pub fn format(text: &str, config: &Config) -> Result<String, FormatError> {
  config.validate()?;

  let (shebang, body) = split_shebang(text);
  let carriage_returns = uses_carriage_returns(text);

  let formatted = if config.has_range(body.len()) {
    let mut adjusted = *config;
    let offset = u32::try_from(shebang.len()).unwrap_or(0);
    adjusted.range_start = config.range_start.saturating_sub(offset);
    adjusted.range_end = config.range_end.saturating_sub(offset);
    range::format_range(body, adjusted, carriage_returns)?
  } else {
    let output = format_body(body, config)?;
    if carriage_returns {
      output.replace('\n', "\r\n")
    } else {
      output
    }
  };

  Ok(format!("{shebang}{formatted}"))
}

/// Is the text already formatted?
///
/// # Errors
///
/// Fails on malformed options or when the source does not parse.
pub fn check(text: &str, config: &Config) -> Result<bool, FormatError> {
  Ok(format(text, config)? == text)
}

/// Format and verify the result: formatting again must not change the output,
/// and the massaged tree of the output must match the input's.
///
/// # Errors
///
/// As [`format`], plus the two verification failures.
pub fn debug_check(text: &str, config: &Config) -> Result<(), FormatError> {
  let first = format(text, config)?;
  let second = format(&first, config)?;
  if first != second {
    return Err(FormatError::NotIdempotent {
      diff: unified_diff(&first, &second),
    });
  }

  let before = jsfmt_syntax::parse(text);
  let after = jsfmt_syntax::parse(&first);
  let before = jsfmt_syntax::ast::fingerprint(&before.program);
  let after = jsfmt_syntax::ast::fingerprint(&after.program);
  if before != after {
    return Err(FormatError::ChangedAst {
      diff: unified_diff(&before, &after),
    });
  }

  Ok(())
}

/// Format an already-parsed tree (a debug hook; no shebang or range
/// handling)
#[must_use]
pub fn format_ast(ast: &jsfmt_syntax::Ast, config: &Config) -> String {
  let allocator = Bump::new();
  let doc = print_ast_to_doc(ast, &allocator, *config, 0);
  finish(print_doc_to_string(&doc, *config))
}

/// The formatter's version
#[must_use]
pub fn version() -> &'static str {
  env!("CARGO_PKG_VERSION")
}

fn format_body(body: &str, config: &Config) -> Result<String, FormatError> {
  let ast = jsfmt_syntax::parse(body);
  if let Some(error) = ast.errors.first() {
    return Err(FormatError::Parse(error.clone()));
  }

  let allocator = Bump::new();
  let doc = print_ast_to_doc(&ast, &allocator, *config, 0);
  Ok(finish(print_doc_to_string(&doc, *config)))
}

/// Exactly one trailing newline, none for empty output
fn finish(mut output: String) -> String {
  while output.ends_with(['\n', ' ', '\t']) {
    output.pop();
  }
  if !output.is_empty() {
    output.push('\n');
  }
  output
}

/// Split a leading `#!` line off, to pass through verbatim
fn split_shebang(text: &str) -> (&str, &str) {
  if !text.starts_with("#!") {
    return ("", text);
  }
  match text.find('\n') {
    Some(end) => text.split_at(end + 1),
    None => (text, ""),
  }
}

/// The output uses `\r\n` iff the first `\n` of the input followed a `\r`
fn uses_carriage_returns(text: &str) -> bool {
  match text.find('\n') {
    Some(0) => false,
    Some(index) => text.as_bytes()[index - 1] == b'\r',
    None => false,
  }
}

/// A minimal unified-style diff for the debug check's failure report
fn unified_diff(before: &str, after: &str) -> String {
  let mut out = String::new();
  let before: Vec<&str> = before.lines().collect();
  let after: Vec<&str> = after.lines().collect();
  let mut shown = 0;

  for index in 0..before.len().max(after.len()) {
    let old = before.get(index);
    let new = after.get(index);
    if old == new {
      continue;
    }
    if shown == 0 {
      out.push_str(&format!("@@ line {} @@\n", index + 1));
    }
    if let Some(old) = old {
      out.push_str(&format!("-{old}\n"));
    }
    if let Some(new) = new {
      out.push_str(&format!("+{new}\n"));
    }
    shown += 1;
    if shown >= 20 {
      out.push_str("…\n");
      break;
    }
  }

  out
}

/// An error from a format call
#[derive(Debug)]
pub enum FormatError {
  /// The source failed to parse; the file is reported and skipped
  Parse(jsfmt_syntax::ParseError),
  /// A malformed option; fatal for the whole run
  Config(ConfigError),
  /// Formatting the output again changed it (debug check)
  NotIdempotent { diff: String },
  /// The output's massaged tree differs from the input's (debug check)
  ChangedAst { diff: String },
}
impl fmt::Display for FormatError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Parse(error) => write!(f, "{}", error.message()),
      Self::Config(error) => write!(f, "{error}"),
      Self::NotIdempotent { diff } => {
        write!(f, "formatting is not idempotent:\n{diff}")
      }
      Self::ChangedAst { diff } => {
        write!(f, "formatting changed the syntax tree:\n{diff}")
      }
    }
  }
}
impl error::Error for FormatError {}
impl From<jsfmt_syntax::ParseError> for FormatError {
  fn from(error: jsfmt_syntax::ParseError) -> Self {
    Self::Parse(error)
  }
}
impl From<ConfigError> for FormatError {
  fn from(error: ConfigError) -> Self {
    Self::Config(error)
  }
}
