//! Binding patterns: destructuring targets in declarations and parameters

use super::{
  expression::{Expression, PropertyKey},
  types::Type,
};
use crate::span::Span;

/// A binding pattern
#[derive(Debug)]
pub enum Pattern<'source> {
  Identifier(BindingIdentifier<'source>),
  Object(ObjectPattern<'source>),
  Array(ArrayPattern<'source>),
  Assignment(Box<AssignmentPattern<'source>>),
  Rest(Box<RestElement<'source>>),
}
impl Pattern<'_> {
  /// The span of the pattern
  pub fn span(&self) -> Span {
    match self {
      Self::Identifier(x) => x.span,
      Self::Object(x) => x.span,
      Self::Array(x) => x.span,
      Self::Assignment(x) => x.span,
      Self::Rest(x) => x.span,
    }
  }

  /// Does the pattern destructure, rather than bind a single name?
  #[must_use]
  pub fn is_destructuring(&self) -> bool {
    match self {
      Self::Identifier(_) => false,
      Self::Object(_) | Self::Array(_) => true,
      Self::Assignment(assignment) => assignment.left.is_destructuring(),
      Self::Rest(rest) => rest.argument.is_destructuring(),
    }
  }
}

/// A name being bound, with an optional type annotation
#[derive(Debug)]
pub struct BindingIdentifier<'source> {
  pub name: &'source str,
  pub type_annotation: Option<Type<'source>>,
  pub span: Span,
}

#[derive(Debug)]
pub struct ObjectPattern<'source> {
  pub properties: Vec<ObjectPatternProperty<'source>>,
  pub type_annotation: Option<Type<'source>>,
  pub span: Span,
}

#[derive(Debug)]
pub enum ObjectPatternProperty<'source> {
  Property {
    key: PropertyKey<'source>,
    value: Pattern<'source>,
    shorthand: bool,
    span: Span,
  },
  Rest(RestElement<'source>),
}
impl ObjectPatternProperty<'_> {
  pub fn span(&self) -> Span {
    match self {
      Self::Property { span, .. } => *span,
      Self::Rest(rest) => rest.span,
    }
  }
}

/// An array destructuring pattern; `None` elements are holes
#[derive(Debug)]
pub struct ArrayPattern<'source> {
  pub elements: Vec<Option<Pattern<'source>>>,
  pub type_annotation: Option<Type<'source>>,
  pub span: Span,
}

/// A pattern with a default: `pattern = expression`
#[derive(Debug)]
pub struct AssignmentPattern<'source> {
  pub left: Pattern<'source>,
  pub right: Expression<'source>,
  pub span: Span,
}

/// `...pattern` in a parameter list or destructuring
#[derive(Debug)]
pub struct RestElement<'source> {
  pub argument: Pattern<'source>,
  pub span: Span,
}
