//! Per-kind printers for Flow type annotations

use super::Printer;
use crate::{doc::Doc, parens::needs_parens, path::Node};
use jsfmt_syntax::ast::types::*;

impl<'a, 's: 'a> Printer<'a, 's> {
  /// Print a type annotation reached by `name`, adding parentheses when the
  /// oracle requires them
  pub(crate) fn type_doc(&mut self, name: &'static str, type_: &'a Type<'s>) -> Doc<'a> {
    self.path.push(name, Node::Type(type_));
    let parens = needs_parens(&self.path);
    let doc = self.type_inner(type_);
    self.path.pop();

    if parens {
      self.concat([Doc::Text("("), doc, Doc::Text(")")])
    } else {
      doc
    }
  }

  fn type_inner(&mut self, type_: &'a Type<'s>) -> Doc<'a> {
    match type_ {
      Type::Generic(generic) => self.generic_type(generic),
      Type::Union(union) => self.joined_types("| ", &union.types),
      Type::Intersection(intersection) => self.joined_types("& ", &intersection.types),
      Type::Nullable(nullable) => {
        let inner = self.type_doc("inner", &nullable.inner);
        self.concat([Doc::Text("?"), inner])
      }
      Type::Array(array) => {
        let element = self.type_doc("element", &array.element);
        self.concat([element, Doc::Text("[]")])
      }
      Type::Tuple(tuple) => self.tuple_type(tuple),
      Type::Function(function) => self.function_type(function),
    }
  }

  fn generic_type(&mut self, generic: &'a GenericType<'s>) -> Doc<'a> {
    if generic.type_args.is_empty() {
      return Doc::Text(generic.name);
    }

    let mut inner = std::vec::Vec::new();
    for (index, argument) in generic.type_args.iter().enumerate() {
      if index > 0 {
        inner.push(Doc::Text(","));
        inner.push(Doc::Line);
      }
      inner.push(self.type_doc("typeArgs", argument));
    }
    let inner = self.concat_iter(inner);

    self.group([
      Doc::Text(generic.name),
      Doc::Text("<"),
      self.indent([Doc::SoftLine, inner]),
      Doc::SoftLine,
      Doc::Text(">"),
    ])
  }

  /// Unions and intersections break before each operator, like binary chains
  fn joined_types(&mut self, operator: &'a str, types: &'a [Type<'s>]) -> Doc<'a> {
    let mut iter = types.iter();
    let Some(first) = iter.next() else {
      return Doc::Empty;
    };
    let first = self.type_doc("types", first);

    let mut rest = std::vec::Vec::new();
    for type_ in iter {
      let doc = self.type_doc("types", type_);
      rest.push(self.concat([Doc::Line, Doc::Text(operator), doc]));
    }
    let rest = self.concat_iter(rest);

    self.group([first, self.indent([rest])])
  }

  fn tuple_type(&mut self, tuple: &'a TupleType<'s>) -> Doc<'a> {
    if tuple.types.is_empty() {
      return Doc::Text("[]");
    }

    let mut inner = std::vec::Vec::new();
    for (index, type_) in tuple.types.iter().enumerate() {
      if index > 0 {
        inner.push(Doc::Text(","));
        inner.push(Doc::Line);
      }
      inner.push(self.type_doc("types", type_));
    }
    let inner = self.concat_iter(inner);

    self.group([
      Doc::Text("["),
      self.indent([Doc::SoftLine, inner]),
      Doc::SoftLine,
      Doc::Text("]"),
    ])
  }

  fn function_type(&mut self, function: &'a FunctionType<'s>) -> Doc<'a> {
    let mut inner = std::vec::Vec::new();
    for (index, param) in function.params.iter().enumerate() {
      if index > 0 {
        inner.push(Doc::Text(","));
        inner.push(Doc::Line);
      }
      if let Some(name) = param.name {
        inner.push(Doc::Text(name));
        inner.push(Doc::Text(": "));
      }
      inner.push(self.type_doc("params", &param.annotation));
    }
    let inner = self.concat_iter(inner);

    let params = self.group([
      Doc::Text("("),
      self.indent([Doc::SoftLine, inner]),
      Doc::SoftLine,
      Doc::Text(")"),
    ]);
    let return_type = self.type_doc("returnType", &function.return_type);

    self.concat([params, Doc::Text(" => "), return_type])
  }
}
