//! The configuration options for the formatter
use std::{error, fmt};

/// Configuration for the formatter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
  /// The max print width to aim for
  pub print_width: u16,
  /// The number of spaces per indent level, if 0 use tabs
  pub indentation: Indentation,
  /// End statements with semicolons
  pub semi: bool,
  /// Use single quotes for strings
  pub single_quote: bool,
  /// Print spaces inside object literal braces
  pub bracket_spacing: bool,
  /// Put the `>` of a multi-line JSX opening tag on the last attribute line
  pub jsx_bracket_same_line: bool,
  /// Where to print trailing commas
  pub trailing_comma: TrailingComma,
  /// The parse dialect to use
  pub parser: Parser,
  /// Format only from this byte offset
  pub range_start: u32,
  /// Format only up to this byte offset
  pub range_end: u32,
}
impl Config {
  /// Check the options are consistent.
  ///
  /// A malformed option aborts the whole run rather than one file.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.print_width == 0 {
      return Err(ConfigError::ZeroPrintWidth);
    }
    if self.range_start > self.range_end {
      return Err(ConfigError::InvertedRange {
        start: self.range_start,
        end: self.range_end,
      });
    }
    Ok(())
  }

  /// Does the config restrict formatting to a sub-range of the source?
  #[must_use]
  pub fn has_range(&self, source_length: usize) -> bool {
    self.range_start > 0 || (self.range_end as usize) < source_length
  }
}
impl Default for Config {
  fn default() -> Self {
    Self {
      print_width: 80,
      indentation: Indentation::Space(2),
      semi: true,
      single_quote: false,
      bracket_spacing: true,
      jsx_bracket_same_line: false,
      trailing_comma: TrailingComma::None,
      parser: Parser::Babylon,
      range_start: 0,
      range_end: u32::MAX,
    }
  }
}

/// The indentation to use when printing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Indentation {
  /// Use this number of spaces for indentation
  Space(u16),
  /// Use tabs for indentation
  Tab,
}
impl Indentation {
  pub(crate) fn len(self) -> u16 {
    match self {
      Self::Space(n) => n,
      Self::Tab => 2,
    }
  }
}
impl From<u16> for Indentation {
  /// The number of spaces to use for indentation. If 0 use tabs.
  fn from(n: u16) -> Self {
    if n == 0 { Self::Tab } else { Self::Space(n) }
  }
}
impl fmt::Display for Indentation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Space(n) => (0..*n).try_for_each(|_| write!(f, " ")),
      Self::Tab => write!(f, "\t"),
    }
  }
}

/// Where trailing commas are printed when a list breaks over lines
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrailingComma {
  /// Never print trailing commas
  #[default]
  None,
  /// Trailing commas where ES5 allows them: arrays, objects, parameters
  Es5,
  /// Trailing commas everywhere one is permitted, including call arguments
  All,
}
impl TrailingComma {
  /// Parse a command line value
  pub fn from_name(name: &str) -> Result<Self, ConfigError> {
    match name {
      "none" => Ok(Self::None),
      "es5" => Ok(Self::Es5),
      "all" => Ok(Self::All),
      _ => Err(ConfigError::UnknownTrailingComma(name.to_owned())),
    }
  }
}

/// The parse dialect. Both dialects share the built-in parser, which accepts
/// the union of their syntax.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Parser {
  #[default]
  Babylon,
  Flow,
}
impl Parser {
  /// Parse a command line value
  pub fn from_name(name: &str) -> Result<Self, ConfigError> {
    match name {
      "babylon" => Ok(Self::Babylon),
      "flow" => Ok(Self::Flow),
      _ => Err(ConfigError::UnknownParser(name.to_owned())),
    }
  }
}

/// A malformed configuration option
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
  /// The print width must be at least one column
  ZeroPrintWidth,
  /// The format range ends before it starts
  InvertedRange { start: u32, end: u32 },
  /// Unknown trailing comma style
  UnknownTrailingComma(String),
  /// Unknown parser name
  UnknownParser(String),
}
impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::ZeroPrintWidth => write!(f, "print width must be at least 1"),
      Self::InvertedRange { start, end } => {
        write!(f, "range start ({start}) is past range end ({end})")
      }
      Self::UnknownTrailingComma(name) => {
        write!(f, "unknown trailing comma style `{name}`, expected none, es5, or all")
      }
      Self::UnknownParser(name) => {
        write!(f, "unknown parser `{name}`, expected babylon or flow")
      }
    }
  }
}
impl error::Error for ConfigError {}
