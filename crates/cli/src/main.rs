//! # jsfmt
//! An opinionated formatter for JavaScript with Flow type annotations and
//! JSX. Formats files in place, checks them, or writes to stdout.

#![allow(clippy::print_stdout)]

mod commands;
mod diagnostics;

use clap::Parser;
use clap::builder::styling::{AnsiColor, Style, Styles};
use commands::CommandStatus;
use jsfmt_formatter::{Config, Parser as ParseDialect, TrailingComma};
use owo_colors::OwoColorize;
use std::process;

const STYLES: Styles = Styles::styled()
  .usage(Style::new().italic())
  .header(AnsiColor::BrightYellow.on_default().bold());

fn about() -> String {
  format!(
    "{} {}\nAn opinionated JavaScript formatter.",
    "jsfmt".bold(),
    format!("(v{})", env!("CARGO_PKG_VERSION")).italic().dimmed()
  )
}

#[derive(Parser)]
#[clap(name = "jsfmt", version, about = about(), styles = STYLES)]
pub struct App {
  /// The files to format
  pub(crate) files: Vec<String>,

  /// Rewrite the files in place
  #[clap(long, conflicts_with = "debug_check")]
  pub(crate) write: bool,
  /// List files whose formatting differs, without writing
  #[clap(long, short = 'l')]
  pub(crate) list_different: bool,
  /// Read from stdin and print to stdout
  #[clap(long)]
  pub(crate) stdin: bool,
  /// Also format paths inside node_modules
  #[clap(long)]
  pub(crate) with_node_modules: bool,
  /// Disable coloured output
  #[clap(long)]
  pub(crate) no_color: bool,

  /// Check the output re-formats identically and parses to the same tree
  #[clap(long)]
  pub(crate) debug_check: bool,
  /// Print the layout IR instead of the formatted output
  #[clap(long)]
  pub(crate) debug_print_doc: bool,

  /// Maximum line width
  #[clap(long, default_value_t = 80, help_heading = "Formatting Config")]
  pub(crate) print_width: u16,
  /// Spaces per indentation level
  #[clap(long, default_value_t = 2, help_heading = "Formatting Config")]
  pub(crate) tab_width: u16,
  /// Indent with tabs instead of spaces
  #[clap(long, help_heading = "Formatting Config")]
  pub(crate) use_tabs: bool,
  /// Omit semicolons, except where needed to guard statement starts
  #[clap(long, help_heading = "Formatting Config")]
  pub(crate) no_semi: bool,
  /// Prefer single-quoted strings
  #[clap(long, help_heading = "Formatting Config")]
  pub(crate) single_quote: bool,
  /// Omit the spaces inside object braces
  #[clap(long, help_heading = "Formatting Config")]
  pub(crate) no_bracket_spacing: bool,
  /// Keep the `>` of a multi-line JSX opening tag on the last attribute line
  #[clap(long, help_heading = "Formatting Config")]
  pub(crate) jsx_bracket_same_line: bool,
  /// Where to print trailing commas: none, es5, or all
  #[clap(long, default_value = "none", help_heading = "Formatting Config")]
  pub(crate) trailing_comma: String,
  /// The parse dialect: babylon or flow
  #[clap(long, default_value = "babylon", help_heading = "Formatting Config")]
  pub(crate) parser: String,
  /// Format from this byte offset only
  #[clap(long, default_value_t = 0, help_heading = "Formatting Config")]
  pub(crate) range_start: u32,
  /// Format up to this byte offset only
  #[clap(long, default_value_t = u32::MAX, help_heading = "Formatting Config")]
  pub(crate) range_end: u32,
}
impl App {
  /// Build the formatter config, rejecting malformed options
  fn config(&self) -> Result<Config, jsfmt_formatter::ConfigError> {
    let config = Config {
      print_width: self.print_width,
      indentation: if self.use_tabs { 0.into() } else { self.tab_width.into() },
      semi: !self.no_semi,
      single_quote: self.single_quote,
      bracket_spacing: !self.no_bracket_spacing,
      jsx_bracket_same_line: self.jsx_bracket_same_line,
      trailing_comma: TrailingComma::from_name(&self.trailing_comma)?,
      parser: ParseDialect::from_name(&self.parser)?,
      range_start: self.range_start,
      range_end: self.range_end,
    };
    config.validate()?;
    Ok(config)
  }
}

fn main() -> process::ExitCode {
  let app = App::parse();

  if app.no_color {
    anstream::ColorChoice::Never.write_global();
  }

  let config = match app.config() {
    Ok(config) => config,
    Err(error) => {
      anstream::eprintln!("{}", diagnostics::Message::error(error.to_string()));
      return process::ExitCode::from(1);
    }
  };

  match commands::run(&app, config) {
    CommandStatus::Success => process::ExitCode::from(0),
    CommandStatus::DifferencesFound => process::ExitCode::from(1),
    CommandStatus::Failure => process::ExitCode::from(2),
  }
}
