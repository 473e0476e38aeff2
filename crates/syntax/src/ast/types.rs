//! The Flow type annotation nodes of the AST

use crate::span::Span;

/// A type annotation
#[derive(Debug)]
pub enum Type<'source> {
  /// `T[]`
  Array(Box<ArrayType<'source>>),
  /// `(name: T) => U`
  Function(Box<FunctionType<'source>>),
  /// A named type, optionally with arguments: `Foo`, `Map<K, V>`
  Generic(GenericType<'source>),
  /// `A & B`
  Intersection(IntersectionType<'source>),
  /// `?T`
  Nullable(Box<NullableType<'source>>),
  /// `[T, U]`
  Tuple(TupleType<'source>),
  /// `A | B`
  Union(UnionType<'source>),
}
impl Type<'_> {
  /// The span of the type
  pub fn span(&self) -> Span {
    match self {
      Self::Array(x) => x.span,
      Self::Function(x) => x.span,
      Self::Generic(x) => x.span,
      Self::Intersection(x) => x.span,
      Self::Nullable(x) => x.span,
      Self::Tuple(x) => x.span,
      Self::Union(x) => x.span,
    }
  }
}

#[derive(Debug)]
pub struct GenericType<'source> {
  pub name: &'source str,
  pub type_args: Vec<Type<'source>>,
  pub span: Span,
}

#[derive(Debug)]
pub struct UnionType<'source> {
  pub types: Vec<Type<'source>>,
  pub span: Span,
}

#[derive(Debug)]
pub struct IntersectionType<'source> {
  pub types: Vec<Type<'source>>,
  pub span: Span,
}

#[derive(Debug)]
pub struct NullableType<'source> {
  pub inner: Type<'source>,
  pub span: Span,
}

#[derive(Debug)]
pub struct ArrayType<'source> {
  pub element: Type<'source>,
  pub span: Span,
}

#[derive(Debug)]
pub struct TupleType<'source> {
  pub types: Vec<Type<'source>>,
  pub span: Span,
}

#[derive(Debug)]
pub struct FunctionType<'source> {
  pub params: Vec<FunctionTypeParam<'source>>,
  pub return_type: Type<'source>,
  pub span: Span,
}

#[derive(Debug)]
pub struct FunctionTypeParam<'source> {
  pub name: Option<&'source str>,
  pub annotation: Type<'source>,
  pub span: Span,
}
