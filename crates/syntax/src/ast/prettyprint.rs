//! A massaged, structural view of the AST
//!
//! [`fingerprint`] renders the tree as an s-expression which ignores
//! everything non-semantic: spans, raw literal spellings, comments, empty
//! statements, and runs of JSX whitespace. Two sources are observably
//! equivalent exactly when their fingerprints are equal, which is what the
//! formatter's debug check compares before and after formatting.

use super::{
  Ast,
  expression::*,
  jsx::*,
  pattern::*,
  statement::*,
  types::*,
};
use std::fmt;

/// The massaged structural form of a program
#[must_use]
pub fn fingerprint(program: &Program) -> String {
  let mut out = String::new();
  write_statements(&mut out, "program", &program.body);
  out
}

impl fmt::Display for Ast<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&fingerprint(&self.program))
  }
}

fn write_statements(out: &mut String, name: &str, statements: &[Statement]) {
  out.push('(');
  out.push_str(name);
  for statement in statements {
    // empty statements are not observable
    if !matches!(statement, Statement::Empty(_)) {
      out.push(' ');
      write_statement(out, statement);
    }
  }
  out.push(')');
}

fn write_statement(out: &mut String, statement: &Statement) {
  match statement {
    Statement::Block(block) => write_statements(out, "block", &block.body),
    Statement::Break(break_) => {
      out.push_str("(break");
      if let Some(label) = &break_.label {
        out.push(' ');
        out.push_str(label.name);
      }
      out.push(')');
    }
    Statement::Class(class) => write_class(out, class),
    Statement::Continue(continue_) => {
      out.push_str("(continue");
      if let Some(label) = &continue_.label {
        out.push(' ');
        out.push_str(label.name);
      }
      out.push(')');
    }
    Statement::Debugger(_) => out.push_str("(debugger)"),
    Statement::DoWhile(do_while) => {
      out.push_str("(do-while ");
      write_statement(out, &do_while.body);
      out.push(' ');
      write_expression(out, &do_while.test);
      out.push(')');
    }
    Statement::Empty(_) => {}
    Statement::ExportAll(export) => {
      out.push_str("(export-all ");
      write_string(out, &export.source.value);
      out.push(')');
    }
    Statement::ExportDefault(export) => {
      out.push_str("(export-default ");
      match &export.declaration {
        ExportDefaultKind::Expression(expression) => write_expression(out, expression),
        ExportDefaultKind::Function(function) => write_function(out, function),
        ExportDefaultKind::Class(class) => write_class(out, class),
      }
      out.push(')');
    }
    Statement::ExportNamed(export) => {
      out.push_str("(export");
      if let Some(declaration) = &export.declaration {
        out.push(' ');
        write_statement(out, declaration);
      }
      for specifier in &export.specifiers {
        out.push(' ');
        out.push_str(specifier.local.name);
        if let Some(exported) = &specifier.exported {
          out.push(':');
          out.push_str(exported.name);
        }
      }
      if let Some(source) = &export.source {
        out.push_str(" from ");
        write_string(out, &source.value);
      }
      out.push(')');
    }
    Statement::Expression(statement) => {
      out.push_str("(statement ");
      write_expression(out, &statement.expression);
      out.push(')');
    }
    Statement::For(for_) => {
      out.push_str("(for ");
      match &for_.init {
        Some(ForInit::Variable(declaration)) => write_variable_declaration(out, declaration),
        Some(ForInit::Expression(expression)) => write_expression(out, expression),
        None => out.push('_'),
      }
      out.push(' ');
      write_optional_expression(out, for_.test.as_ref());
      out.push(' ');
      write_optional_expression(out, for_.update.as_ref());
      out.push(' ');
      write_statement(out, &for_.body);
      out.push(')');
    }
    Statement::ForIn(for_in) => {
      write_for_in_of(out, "for-in", &for_in.left, &for_in.right, &for_in.body);
    }
    Statement::ForOf(for_of) => {
      write_for_in_of(out, "for-of", &for_of.left, &for_of.right, &for_of.body);
    }
    Statement::Function(function) => write_function(out, function),
    Statement::If(if_) => {
      out.push_str("(if ");
      write_expression(out, &if_.test);
      out.push(' ');
      write_statement(out, &if_.consequent);
      if let Some(alternate) = &if_.alternate {
        out.push(' ');
        write_statement(out, alternate);
      }
      out.push(')');
    }
    Statement::Import(import) => {
      out.push_str("(import");
      for specifier in &import.specifiers {
        out.push(' ');
        match specifier {
          ImportSpecifier::Default(name) => out.push_str(name.name),
          ImportSpecifier::Namespace(name) => {
            out.push('*');
            out.push_str(name.name);
          }
          ImportSpecifier::Named { imported, local } => {
            out.push_str(imported.name);
            if let Some(local) = local {
              out.push(':');
              out.push_str(local.name);
            }
          }
        }
      }
      out.push_str(" from ");
      write_string(out, &import.source.value);
      out.push(')');
    }
    Statement::Labeled(labeled) => {
      out.push_str("(label ");
      out.push_str(labeled.label.name);
      out.push(' ');
      write_statement(out, &labeled.body);
      out.push(')');
    }
    Statement::Return(return_) => {
      out.push_str("(return");
      if let Some(argument) = &return_.argument {
        out.push(' ');
        write_expression(out, argument);
      }
      out.push(')');
    }
    Statement::Switch(switch) => {
      out.push_str("(switch ");
      write_expression(out, &switch.discriminant);
      for case in &switch.cases {
        out.push_str(" (case ");
        write_optional_expression(out, case.test.as_ref());
        for statement in &case.consequent {
          if !matches!(statement, Statement::Empty(_)) {
            out.push(' ');
            write_statement(out, statement);
          }
        }
        out.push(')');
      }
      out.push(')');
    }
    Statement::Throw(throw) => {
      out.push_str("(throw ");
      write_expression(out, &throw.argument);
      out.push(')');
    }
    Statement::Try(try_) => {
      out.push_str("(try ");
      write_statements(out, "block", &try_.block.body);
      if let Some(handler) = &try_.handler {
        out.push_str(" (catch ");
        match &handler.param {
          Some(param) => write_pattern(out, param),
          None => out.push('_'),
        }
        out.push(' ');
        write_statements(out, "block", &handler.body.body);
        out.push(')');
      }
      if let Some(finalizer) = &try_.finalizer {
        out.push_str(" (finally ");
        write_statements(out, "block", &finalizer.body);
        out.push(')');
      }
      out.push(')');
    }
    Statement::TypeAlias(alias) => {
      out.push_str("(type ");
      out.push_str(alias.name.name);
      out.push(' ');
      write_type(out, &alias.right);
      out.push(')');
    }
    Statement::Variable(declaration) => write_variable_declaration(out, declaration),
    Statement::While(while_) => {
      out.push_str("(while ");
      write_expression(out, &while_.test);
      out.push(' ');
      write_statement(out, &while_.body);
      out.push(')');
    }
  }
}

fn write_for_in_of(out: &mut String, name: &str, left: &ForTarget, right: &Expression, body: &Statement) {
  out.push('(');
  out.push_str(name);
  out.push(' ');
  match left {
    ForTarget::Variable(declaration) => write_variable_declaration(out, declaration),
    ForTarget::Expression(expression) => write_expression(out, expression),
  }
  out.push(' ');
  write_expression(out, right);
  out.push(' ');
  write_statement(out, body);
  out.push(')');
}

fn write_variable_declaration(out: &mut String, declaration: &VariableDeclaration) {
  out.push('(');
  out.push_str(declaration.kind.as_str());
  for declarator in &declaration.declarations {
    out.push_str(" (");
    write_pattern(out, &declarator.id);
    if let Some(init) = &declarator.init {
      out.push(' ');
      write_expression(out, init);
    }
    out.push(')');
  }
  out.push(')');
}

fn write_function(out: &mut String, function: &Function) {
  out.push_str("(function");
  if function.is_async {
    out.push_str(" async");
  }
  if function.is_generator {
    out.push_str(" *");
  }
  if let Some(name) = &function.name {
    out.push(' ');
    out.push_str(name.name);
  }
  out.push_str(" (params");
  for param in &function.params {
    out.push(' ');
    write_pattern(out, param);
  }
  out.push(')');
  if let Some(return_type) = &function.return_type {
    out.push(' ');
    write_type(out, return_type);
  }
  out.push(' ');
  write_statements(out, "block", &function.body.body);
  out.push(')');
}

fn write_class(out: &mut String, class: &Class) {
  out.push_str("(class");
  if let Some(name) = &class.name {
    out.push(' ');
    out.push_str(name.name);
  }
  if let Some(super_class) = &class.super_class {
    out.push_str(" (extends ");
    write_expression(out, super_class);
    out.push(')');
  }
  for method in &class.body {
    out.push_str(" (");
    out.push_str(match method.kind {
      MethodKind::Constructor => "constructor",
      MethodKind::Method => "method",
      MethodKind::Get => "get",
      MethodKind::Set => "set",
    });
    if method.is_static {
      out.push_str(" static");
    }
    out.push(' ');
    write_property_key(out, &method.key);
    out.push(' ');
    write_function(out, &method.function);
    out.push(')');
  }
  out.push(')');
}

fn write_optional_expression(out: &mut String, expression: Option<&Expression>) {
  match expression {
    Some(expression) => write_expression(out, expression),
    None => out.push('_'),
  }
}

fn write_expression(out: &mut String, expression: &Expression) {
  match expression {
    Expression::Array(array) => {
      out.push_str("(array");
      for element in &array.elements {
        out.push(' ');
        match element {
          ArrayElement::Hole => out.push('_'),
          ArrayElement::Expression(expression) => write_expression(out, expression),
          ArrayElement::Spread(spread) => write_spread(out, spread),
        }
      }
      out.push(')');
    }
    Expression::Arrow(arrow) => {
      out.push_str("(arrow");
      if arrow.is_async {
        out.push_str(" async");
      }
      out.push_str(" (params");
      for param in &arrow.params {
        out.push(' ');
        write_pattern(out, param);
      }
      out.push(')');
      if let Some(return_type) = &arrow.return_type {
        out.push(' ');
        write_type(out, return_type);
      }
      out.push(' ');
      match &arrow.body {
        ArrowBody::Expression(expression) => write_expression(out, expression),
        ArrowBody::Block(block) => write_statements(out, "block", &block.body),
      }
      out.push(')');
    }
    Expression::Assignment(assignment) => {
      out.push('(');
      out.push_str(assignment.operator.as_str());
      out.push(' ');
      write_expression(out, &assignment.left);
      out.push(' ');
      write_expression(out, &assignment.right);
      out.push(')');
    }
    Expression::Await(await_) => {
      out.push_str("(await ");
      write_expression(out, &await_.argument);
      out.push(')');
    }
    Expression::Binary(binary) => {
      out.push('(');
      out.push_str(binary.operator.as_str());
      out.push(' ');
      write_expression(out, &binary.left);
      out.push(' ');
      write_expression(out, &binary.right);
      out.push(')');
    }
    Expression::Boolean(boolean) => {
      out.push_str(if boolean.value { "true" } else { "false" });
    }
    Expression::Call(call) => {
      out.push_str("(call ");
      write_expression(out, &call.callee);
      for argument in &call.arguments {
        out.push(' ');
        write_argument(out, argument);
      }
      out.push(')');
    }
    Expression::Class(class) => write_class(out, class),
    Expression::Conditional(conditional) => {
      out.push_str("(cond ");
      write_expression(out, &conditional.test);
      out.push(' ');
      write_expression(out, &conditional.consequent);
      out.push(' ');
      write_expression(out, &conditional.alternate);
      out.push(')');
    }
    Expression::Function(function) => write_function(out, function),
    Expression::Identifier(identifier) => out.push_str(identifier.name),
    Expression::Jsx(element) => write_jsx_element(out, element),
    Expression::Logical(logical) => {
      out.push('(');
      out.push_str(logical.operator.as_str());
      out.push(' ');
      write_expression(out, &logical.left);
      out.push(' ');
      write_expression(out, &logical.right);
      out.push(')');
    }
    Expression::Member(member) => {
      out.push_str("(member ");
      write_expression(out, &member.object);
      out.push(' ');
      match &member.property {
        MemberProperty::Dot(name) => out.push_str(name.name),
        MemberProperty::Computed(expression) => {
          out.push('[');
          write_expression(out, expression);
          out.push(']');
        }
      }
      out.push(')');
    }
    Expression::New(new) => {
      out.push_str("(new ");
      write_expression(out, &new.callee);
      if let Some(arguments) = &new.arguments {
        for argument in arguments {
          out.push(' ');
          write_argument(out, argument);
        }
      }
      out.push(')');
    }
    Expression::Null(_) => out.push_str("null"),
    Expression::Number(number) => {
      let _ = fmt::Write::write_fmt(out, format_args!("{}", number.value));
    }
    Expression::Object(object) => {
      out.push_str("(object");
      for property in &object.properties {
        out.push(' ');
        match property {
          ObjectProperty::Property(property) => write_property(out, property),
          ObjectProperty::Spread(spread) => write_spread(out, spread),
        }
      }
      out.push(')');
    }
    Expression::Regex(regex) => out.push_str(regex.raw),
    Expression::Sequence(sequence) => {
      out.push_str("(seq");
      for expression in &sequence.expressions {
        out.push(' ');
        write_expression(out, expression);
      }
      out.push(')');
    }
    Expression::String(string) => write_string(out, &string.value),
    Expression::Super(_) => out.push_str("super"),
    Expression::TaggedTemplate(tagged) => {
      out.push_str("(tagged ");
      write_expression(out, &tagged.tag);
      out.push(' ');
      write_template(out, &tagged.quasi);
      out.push(')');
    }
    Expression::Template(template) => write_template(out, template),
    Expression::This(_) => out.push_str("this"),
    Expression::Unary(unary) => {
      out.push_str("(unary ");
      out.push_str(unary.operator.as_str());
      out.push(' ');
      write_expression(out, &unary.argument);
      out.push(')');
    }
    Expression::Update(update) => {
      out.push_str(if update.prefix { "(pre" } else { "(post" });
      out.push_str(update.operator.as_str());
      out.push(' ');
      write_expression(out, &update.argument);
      out.push(')');
    }
    Expression::Yield(yield_) => {
      out.push_str("(yield");
      if yield_.delegate {
        out.push('*');
      }
      if let Some(argument) = &yield_.argument {
        out.push(' ');
        write_expression(out, argument);
      }
      out.push(')');
    }
  }
}

fn write_argument(out: &mut String, argument: &Argument) {
  match argument {
    Argument::Expression(expression) => write_expression(out, expression),
    Argument::Spread(spread) => write_spread(out, spread),
  }
}

fn write_spread(out: &mut String, spread: &SpreadElement) {
  out.push_str("(spread ");
  write_expression(out, &spread.argument);
  out.push(')');
}

fn write_property(out: &mut String, property: &Property) {
  out.push('(');
  out.push_str(match property.kind {
    PropertyKind::Init => "prop",
    PropertyKind::Method => "method",
    PropertyKind::Get => "get",
    PropertyKind::Set => "set",
  });
  out.push(' ');
  write_property_key(out, &property.key);
  out.push(' ');
  write_expression(out, &property.value);
  out.push(')');
}

fn write_property_key(out: &mut String, key: &PropertyKey) {
  match key {
    PropertyKey::Identifier(identifier) => out.push_str(identifier.name),
    PropertyKey::String(string) => write_string(out, &string.value),
    PropertyKey::Number(number) => {
      let _ = fmt::Write::write_fmt(out, format_args!("{}", number.value));
    }
    PropertyKey::Computed(expression) => {
      out.push('[');
      write_expression(out, expression);
      out.push(']');
    }
  }
}

fn write_string(out: &mut String, value: &str) {
  let _ = fmt::Write::write_fmt(out, format_args!("{value:?}"));
}

fn write_template(out: &mut String, template: &TemplateLiteral) {
  out.push_str("(template");
  for (index, quasi) in template.quasis.iter().enumerate() {
    out.push(' ');
    write_string(out, quasi.raw);
    if let Some(expression) = template.expressions.get(index) {
      out.push(' ');
      write_expression(out, expression);
    }
  }
  out.push(')');
}

fn write_pattern(out: &mut String, pattern: &Pattern) {
  match pattern {
    Pattern::Identifier(identifier) => {
      out.push_str(identifier.name);
      if let Some(annotation) = &identifier.type_annotation {
        out.push(':');
        write_type(out, annotation);
      }
    }
    Pattern::Object(object) => {
      out.push_str("(opat");
      for property in &object.properties {
        out.push(' ');
        match property {
          ObjectPatternProperty::Property { key, value, .. } => {
            out.push('(');
            write_property_key(out, key);
            out.push(' ');
            write_pattern(out, value);
            out.push(')');
          }
          ObjectPatternProperty::Rest(rest) => {
            out.push_str("(rest ");
            write_pattern(out, &rest.argument);
            out.push(')');
          }
        }
      }
      if let Some(annotation) = &object.type_annotation {
        out.push(':');
        write_type(out, annotation);
      }
      out.push(')');
    }
    Pattern::Array(array) => {
      out.push_str("(apat");
      for element in &array.elements {
        out.push(' ');
        match element {
          Some(pattern) => write_pattern(out, pattern),
          None => out.push('_'),
        }
      }
      if let Some(annotation) = &array.type_annotation {
        out.push(':');
        write_type(out, annotation);
      }
      out.push(')');
    }
    Pattern::Assignment(assignment) => {
      out.push_str("(default ");
      write_pattern(out, &assignment.left);
      out.push(' ');
      write_expression(out, &assignment.right);
      out.push(')');
    }
    Pattern::Rest(rest) => {
      out.push_str("(rest ");
      write_pattern(out, &rest.argument);
      out.push(')');
    }
  }
}

fn write_type(out: &mut String, type_: &Type) {
  match type_ {
    Type::Array(array) => {
      out.push_str("(array-type ");
      write_type(out, &array.element);
      out.push(')');
    }
    Type::Function(function) => {
      out.push_str("(fn-type (params");
      for param in &function.params {
        out.push(' ');
        if let Some(name) = param.name {
          out.push_str(name);
          out.push(':');
        }
        write_type(out, &param.annotation);
      }
      out.push_str(") ");
      write_type(out, &function.return_type);
      out.push(')');
    }
    Type::Generic(generic) => {
      if generic.type_args.is_empty() {
        out.push_str(generic.name);
      } else {
        out.push('(');
        out.push_str(generic.name);
        for arg in &generic.type_args {
          out.push(' ');
          write_type(out, arg);
        }
        out.push(')');
      }
    }
    Type::Intersection(intersection) => {
      out.push_str("(&");
      for type_ in &intersection.types {
        out.push(' ');
        write_type(out, type_);
      }
      out.push(')');
    }
    Type::Nullable(nullable) => {
      out.push_str("(? ");
      write_type(out, &nullable.inner);
      out.push(')');
    }
    Type::Tuple(tuple) => {
      out.push_str("(tuple");
      for type_ in &tuple.types {
        out.push(' ');
        write_type(out, type_);
      }
      out.push(')');
    }
    Type::Union(union) => {
      out.push_str("(|");
      for type_ in &union.types {
        out.push(' ');
        write_type(out, type_);
      }
      out.push(')');
    }
  }
}

fn write_jsx_element(out: &mut String, element: &JsxElement) {
  out.push_str("(jsx");
  if let Some(name) = &element.name {
    out.push(' ');
    out.push_str(name.name);
  }
  for attribute in &element.attributes {
    out.push(' ');
    match attribute {
      JsxAttributeItem::Attribute(attribute) => {
        out.push('(');
        out.push_str(attribute.name.name);
        match &attribute.value {
          Some(JsxAttributeValue::String(string)) => {
            out.push(' ');
            write_string(out, &string.value);
          }
          Some(JsxAttributeValue::Container(container)) => {
            out.push(' ');
            write_optional_expression(out, container.expression.as_ref());
          }
          None => {}
        }
        out.push(')');
      }
      JsxAttributeItem::Spread(spread) => {
        out.push_str("(spread ");
        write_expression(out, &spread.argument);
        out.push(')');
      }
    }
  }
  for child in &element.children {
    match child {
      JsxChild::Element(child) => {
        out.push(' ');
        write_jsx_element(out, child);
      }
      JsxChild::Text(text) => {
        // whitespace runs are not observable
        let collapsed = text.raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if !collapsed.is_empty() {
          out.push(' ');
          write_string(out, &collapsed);
        }
      }
      JsxChild::Container(container) => {
        if let Some(expression) = &container.expression {
          out.push_str(" {");
          write_expression(out, expression);
          out.push('}');
        }
      }
    }
  }
  out.push(')');
}
