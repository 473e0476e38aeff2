//! # Syntax
//! Parse JavaScript source code into an Abstract Syntax Tree
//!
//! A pratt parser, based on [Crafting Interpreters](https://craftinginterpreters.com/parsing-expressions.html),
//! covering the scripting core plus Flow-style type annotations and JSX.
//!
//! The tree is a closed tagged union per syntactic category, borrowing names
//! and raw literal text from the source. Comments are collected alongside the
//! tree with the neighbouring-token context a formatter needs to attach them.
//!
//! Statements are terminated by `;`, `}`, the end of the file, or a line
//! break before a token which could start a new statement. Infix operators,
//! member access, call and computed-member brackets, and template-literal
//! heads all continue an expression across line breaks; only the postfix
//! `++`/`--` and the argument of `return`-family keywords are restricted to
//! the same line.

pub mod ast;
mod parser;
mod span;
mod tokeniser;

#[cfg(test)]
mod test;

/// Parses a source code string into an AST.
///
/// # Examples
/// ```
/// use jsfmt_syntax::parse;
/// let ast = parse("5 + 3");
///
/// assert!(ast.is_valid());
/// ```
pub fn parse(source: &str) -> ast::Ast<'_> {
  parser::Parser::new(source).parse()
}

/// Get the tokens from a source code string
pub fn tokenise(source: &str) -> impl Iterator<Item = tokeniser::Token> + '_ {
  tokeniser::Tokeniser::from(source)
}

pub use ast::Ast;
pub use parser::ParseError;
pub use span::{LineIndex, Span};
pub use tokeniser::{LexMode, Token, TokenKind, Tokeniser};
