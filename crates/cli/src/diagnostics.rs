use jsfmt_syntax::{LineIndex, Span, TokenKind};
use owo_colors::{OwoColorize, Style};
use std::fmt;

#[derive(Debug)]
pub enum Severity {
  Error,
  Warning,
}
pub struct Message {
  pub title: String,
  pub body: String,
  pub severity: Severity,
}
impl Message {
  pub fn error(message: String) -> Self {
    Self {
      title: message,
      body: String::new(),
      severity: Severity::Error,
    }
  }
  pub fn warning(message: String) -> Self {
    Self {
      title: message,
      body: String::new(),
      severity: Severity::Warning,
    }
  }
}
impl fmt::Display for Message {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.severity {
      Severity::Error => write!(f, "{}", "✕ Error".bold().red()),
      Severity::Warning => write!(f, "{}", "⚠ Warning".bold().yellow()),
    }?;
    writeln!(f, "{} {}", ":".bold(), &self.title.bold())?;

    if !self.body.is_empty() {
      writeln!(f, "{}", &self.body)?;
    }

    Ok(())
  }
}
impl From<&jsfmt_syntax::ParseError> for Message {
  fn from(error: &jsfmt_syntax::ParseError) -> Self {
    Self {
      title: error.title(),
      body: error.message(),
      severity: Severity::Error,
    }
  }
}

pub struct CodeFrame<'a> {
  title: &'a str,
  source: &'a str,
  span: Span,

  lines: LineIndex,
}
impl<'a> CodeFrame<'a> {
  pub fn new(title: &'a str, source: &'a str, span: Span) -> Self {
    Self {
      title: if title == "-" { "STDIN" } else { title },
      source,
      span,
      lines: LineIndex::from_source(source),
    }
  }
}
impl fmt::Display for CodeFrame<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let start_line = self.lines.line(self.span).max(1);
    let end_line = self.lines.final_line(self.span);

    writeln!(
      f,
      "    {}{}{}{}{}",
      "╭─[".dimmed(),
      self.title,
      ":".dimmed(),
      start_line,
      "]".dimmed()
    )?;

    for line in start_line..=end_line {
      let line_text = self.lines.line_span(line).source_text(self.source);
      write!(f, "{line:>3} {}", "│".dimmed())?;
      if !line_text.is_empty() {
        write!(f, " ")?;
      }
      highlight_source(f, line_text)?;
      if !line_text.ends_with('\n') {
        writeln!(f)?;
      }
    }

    write!(f, "{}", "────╯".dimmed())
  }
}

pub fn highlight_source(output: &mut dyn fmt::Write, source: &str) -> fmt::Result {
  let mut last = 0;
  for token in jsfmt_syntax::tokenise(source) {
    // if there is a gap between tokens, add spaces for the gap
    let start = token.start as usize;
    for _ in last..start {
      write!(output, " ")?;
    }

    let style = match token.kind {
      TokenKind::Number | TokenKind::True | TokenKind::False | TokenKind::Null => {
        Style::new().blue()
      }
      TokenKind::String
      | TokenKind::Template
      | TokenKind::TemplateHead
      | TokenKind::TemplateMiddle
      | TokenKind::TemplateTail
      | TokenKind::UnterminatedString
      | TokenKind::UnterminatedTemplate => Style::new().green(),
      kind if kind.is_keyword() => Style::new().cyan(),
      TokenKind::LineComment | TokenKind::BlockComment => Style::new().dimmed(),
      _ => Style::new(),
    };
    let token_text = token.span().source_text(source);
    write!(output, "{}", token_text.style(style))?;

    last = token.end as usize;
  }

  Ok(())
}
