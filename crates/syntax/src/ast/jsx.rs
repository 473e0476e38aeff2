//! The JSX nodes of the AST

use super::expression::{Expression, StringLiteral};
use crate::span::Span;

/// A JSX element: `<name attrs…>children…</name>` or `<name attrs… />`
#[derive(Debug)]
pub struct JsxElement<'source> {
  pub name: Option<JsxName<'source>>,
  pub attributes: Vec<JsxAttributeItem<'source>>,
  pub children: Vec<JsxChild<'source>>,
  pub self_closing: bool,
  pub span: Span,
}

/// A JSX element or attribute name, kept as written (`Foo.Bar`, `data-x`)
#[derive(Debug, Clone, Copy)]
pub struct JsxName<'source> {
  pub name: &'source str,
  pub span: Span,
}

#[derive(Debug)]
pub enum JsxAttributeItem<'source> {
  Attribute(JsxAttribute<'source>),
  Spread(JsxSpreadAttribute<'source>),
}
impl JsxAttributeItem<'_> {
  pub fn span(&self) -> Span {
    match self {
      Self::Attribute(attribute) => attribute.span,
      Self::Spread(spread) => spread.span,
    }
  }
}

/// `name`, `name="value"`, or `name={expression}`
#[derive(Debug)]
pub struct JsxAttribute<'source> {
  pub name: JsxName<'source>,
  pub value: Option<JsxAttributeValue<'source>>,
  pub span: Span,
}

#[derive(Debug)]
pub enum JsxAttributeValue<'source> {
  String(StringLiteral<'source>),
  Container(JsxExpressionContainer<'source>),
}

/// `{...expression}` in an attribute position
#[derive(Debug)]
pub struct JsxSpreadAttribute<'source> {
  pub argument: Expression<'source>,
  pub span: Span,
}

#[derive(Debug)]
pub enum JsxChild<'source> {
  Element(JsxElement<'source>),
  Text(JsxText<'source>),
  Container(JsxExpressionContainer<'source>),
}
impl JsxChild<'_> {
  pub fn span(&self) -> Span {
    match self {
      Self::Element(element) => element.span,
      Self::Text(text) => text.span,
      Self::Container(container) => container.span,
    }
  }
}

/// Raw text between JSX children
#[derive(Debug, Clone, Copy)]
pub struct JsxText<'source> {
  pub raw: &'source str,
  pub span: Span,
}

/// `{expression}` as a JSX child or attribute value; the expression is
/// absent for an empty (or comment-only) container
#[derive(Debug)]
pub struct JsxExpressionContainer<'source> {
  pub expression: Option<Expression<'source>>,
  pub span: Span,
}
