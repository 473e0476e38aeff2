//! Per-kind printers for statements and declarations

use super::Printer;
use crate::{doc::Doc, path::Node};
use jsfmt_syntax::ast::{
  Statement,
  expression::Expression,
  statement::*,
};

impl<'a, 's: 'a> Printer<'a, 's> {
  pub(crate) fn statement(&mut self, statement: &'a Statement<'s>) -> Doc<'a> {
    self.with_frame("statement", Node::Statement(statement), |printer| {
      printer.statement_inner(statement)
    })
  }

  fn statement_inner(&mut self, statement: &'a Statement<'s>) -> Doc<'a> {
    match statement {
      Statement::Block(block) => self.block(block),
      Statement::Break(break_) => self.break_continue("break", break_.label.as_ref()),
      Statement::Class(class) => self.class_doc(class),
      Statement::Continue(continue_) => self.break_continue("continue", continue_.label.as_ref()),
      Statement::Debugger(_) => self.concat([Doc::Text("debugger"), self.semi()]),
      Statement::DoWhile(do_while) => self.do_while_statement(do_while),
      Statement::Empty(_) => Doc::Empty,
      Statement::ExportAll(export) => self.concat([
        Doc::Text("export * from "),
        self.string_literal(&export.source),
        self.semi(),
      ]),
      Statement::ExportDefault(export) => self.export_default(export),
      Statement::ExportNamed(export) => self.export_named(export),
      Statement::Expression(statement) => self.expression_statement(statement),
      Statement::For(for_) => self.for_statement(for_),
      Statement::ForIn(for_in) => {
        self.for_in_of("in", &for_in.left, &for_in.right, &for_in.body)
      }
      Statement::ForOf(for_of) => {
        self.for_in_of("of", &for_of.left, &for_of.right, &for_of.body)
      }
      Statement::Function(function) => self.function_doc(function),
      Statement::If(if_) => self.if_statement(if_),
      Statement::Import(import) => self.import_declaration(import),
      Statement::Labeled(labeled) => self.labeled_statement(labeled),
      Statement::Return(return_) => self.return_statement(return_),
      Statement::Switch(switch) => self.switch_statement(switch),
      Statement::Throw(throw) => self.throw_statement(throw),
      Statement::Try(try_) => self.try_statement(try_),
      Statement::TypeAlias(alias) => self.type_alias(alias),
      Statement::Variable(declaration) => {
        let doc = self.variable_declaration(declaration, "declarations");
        self.concat([doc, self.semi()])
      }
      Statement::While(while_) => self.while_statement(while_),
    }
  }

  pub(crate) fn semi(&self) -> Doc<'a> {
    if self.config.semi { Doc::Text(";") } else { Doc::Empty }
  }

  fn expression_statement(&mut self, statement: &'a ExpressionStatement<'s>) -> Doc<'a> {
    // a lone string statement is (or may be) a directive: keep it verbatim
    // so `'use strict'` survives byte-for-byte
    if let Expression::String(string) = &statement.expression {
      return self.concat([self.raw_lines(string.raw), self.semi()]);
    }

    let expression = self.expression("expression", &statement.expression);

    // without semicolons, a statement starting with one of `[ ( ` + - / <`
    // would continue the previous line when re-parsed
    let guard = if !self.config.semi && needs_leading_semicolon(&statement.expression, false) {
      Doc::Text(";")
    } else {
      Doc::Empty
    };

    self.concat([guard, self.group([expression]), self.semi()])
  }

  pub(crate) fn block(&mut self, block: &'a BlockStatement<'s>) -> Doc<'a> {
    let has_statements = block
      .body
      .iter()
      .any(|statement| !matches!(statement, Statement::Empty(_)));

    if !has_statements {
      let dangling = self.comments.take_dangling(block.span);
      if dangling.is_empty() {
        return Doc::Text("{}");
      }
      let mut inner = std::vec::Vec::new();
      for (index, comment) in dangling.iter().enumerate() {
        if index > 0 {
          inner.push(Doc::HardLine);
        }
        inner.push(self.comment_doc(*comment));
      }
      let inner = self.concat_iter(inner);
      return self.concat([
        Doc::Text("{"),
        self.indent([Doc::HardLine, inner]),
        Doc::HardLine,
        Doc::Text("}"),
      ]);
    }

    let body = self.statement_list(&block.body);

    // own-line comments between the last statement and the closing brace
    let mut tail = std::vec::Vec::new();
    for comment in self.comments.take_leading(block.span.end) {
      tail.push(Doc::HardLine);
      tail.push(self.comment_doc(comment));
    }
    let tail = self.concat_iter(tail);

    self.concat([
      Doc::Text("{"),
      self.indent([Doc::HardLine, body, tail]),
      Doc::HardLine,
      Doc::Text("}"),
    ])
  }

  /// A loop or branch body: blocks stay on the line, other statements are
  /// indented onto their own
  fn clause(&mut self, body: &'a Statement<'s>) -> Doc<'a> {
    match body {
      Statement::Block(_) => {
        let doc = self.statement(body);
        self.concat([Doc::Text(" "), doc])
      }
      Statement::Empty(_) => Doc::Text(";"),
      _ => {
        let doc = self.statement(body);
        self.indent([Doc::HardLine, doc])
      }
    }
  }

  fn if_statement(&mut self, if_: &'a IfStatement<'s>) -> Doc<'a> {
    let test = self.expression("test", &if_.test);
    let opening = self.group([
      Doc::Text("if ("),
      self.indent([Doc::SoftLine, test]),
      Doc::SoftLine,
      Doc::Text(")"),
    ]);

    let mut parts = vec![opening, self.clause(&if_.consequent)];

    if let Some(alternate) = &if_.alternate {
      if matches!(if_.consequent, Statement::Block(_)) {
        parts.push(Doc::Text(" else"));
      } else {
        parts.push(Doc::HardLine);
        parts.push(Doc::Text("else"));
      }

      match alternate {
        // `else if` chains stay flat
        Statement::If(_) => {
          let doc = self.statement(alternate);
          parts.push(Doc::Text(" "));
          parts.push(doc);
        }
        _ => parts.push(self.clause(alternate)),
      }
    }

    self.concat_iter(parts)
  }

  fn while_statement(&mut self, while_: &'a WhileStatement<'s>) -> Doc<'a> {
    let test = self.expression("test", &while_.test);
    let head = self.group([
      Doc::Text("while ("),
      self.indent([Doc::SoftLine, test]),
      Doc::SoftLine,
      Doc::Text(")"),
    ]);
    let clause = self.clause(&while_.body);
    self.concat([head, clause])
  }

  fn do_while_statement(&mut self, do_while: &'a DoWhileStatement<'s>) -> Doc<'a> {
    let body = self.clause(&do_while.body);
    let separator = if matches!(do_while.body, Statement::Block(_)) {
      Doc::Text(" ")
    } else {
      Doc::HardLine
    };
    let test = self.expression("test", &do_while.test);

    self.concat([
      Doc::Text("do"),
      body,
      separator,
      Doc::Text("while ("),
      test,
      Doc::Text(")"),
      self.semi(),
    ])
  }

  fn for_statement(&mut self, for_: &'a ForStatement<'s>) -> Doc<'a> {
    let init = match &for_.init {
      None => Doc::Empty,
      Some(ForInit::Variable(declaration)) => self.variable_declaration(declaration, "init"),
      Some(ForInit::Expression(expression)) => self.expression("init", expression),
    };
    let test = match &for_.test {
      None => Doc::Empty,
      Some(test) => self.expression("test", test),
    };
    let update = match &for_.update {
      None => Doc::Empty,
      Some(update) => self.expression("update", update),
    };

    let head = if for_.init.is_none() && for_.test.is_none() && for_.update.is_none() {
      Doc::Text("for (;;)")
    } else {
      let mut inner = vec![Doc::SoftLine, init, Doc::Text(";")];
      if for_.test.is_some() {
        inner.push(Doc::Line);
        inner.push(test);
      }
      inner.push(Doc::Text(";"));
      if for_.update.is_some() {
        inner.push(Doc::Line);
        inner.push(update);
      }
      let inner = self.concat_iter(inner);

      self.group([
        Doc::Text("for ("),
        self.indent([inner]),
        Doc::SoftLine,
        Doc::Text(")"),
      ])
    };

    let clause = self.clause(&for_.body);
    self.concat([head, clause])
  }

  fn for_in_of(
    &mut self,
    keyword: &'static str,
    left: &'a ForTarget<'s>,
    right: &'a Expression<'s>,
    body: &'a Statement<'s>,
  ) -> Doc<'a> {
    let left = match left {
      ForTarget::Variable(declaration) => self.variable_declaration(declaration, "left"),
      ForTarget::Expression(expression) => self.expression("left", expression),
    };
    let right = self.expression("right", right);
    let keyword = self.string(format!(" {keyword} "));
    let clause = self.clause(body);

    self.concat([
      Doc::Text("for ("),
      left,
      keyword,
      right,
      Doc::Text(")"),
      clause,
    ])
  }

  fn switch_statement(&mut self, switch: &'a SwitchStatement<'s>) -> Doc<'a> {
    let discriminant = self.expression("discriminant", &switch.discriminant);
    let head = self.group([
      Doc::Text("switch ("),
      self.indent([Doc::SoftLine, discriminant]),
      Doc::SoftLine,
      Doc::Text(")"),
    ]);

    if switch.cases.is_empty() {
      let dangling = self.comments.take_dangling(switch.span);
      let mut inner = std::vec::Vec::new();
      for comment in dangling {
        inner.push(Doc::HardLine);
        inner.push(self.comment_doc(comment));
      }
      let inner = self.concat_iter(inner);
      return self.concat([head, Doc::Text(" {"), self.indent([inner]), Doc::HardLine, Doc::Text("}")]);
    }

    let mut cases = std::vec::Vec::new();
    let mut previous_line: Option<usize> = None;
    for case in &switch.cases {
      let leading = self.comments.take_leading(case.span.start);
      let first_start = leading.first().map_or(case.span.start, |comment| comment.span.start);

      if let Some(previous) = previous_line {
        cases.push(Doc::HardLine);
        if self.line_index.line_of_offset(first_start) > previous + 1 {
          cases.push(Doc::HardLine);
        }
      }
      self.leading_comment_docs(&mut cases, &leading, case.span.start);

      cases.push(self.switch_case(case));

      for comment in self.comments.take_trailing(case.span.end) {
        cases.push(self.trailing_comment_doc(comment));
      }
      previous_line = Some(self.line_index.line_of_offset(case.span.end));
    }
    for comment in self.comments.take_leading(switch.span.end) {
      cases.push(Doc::HardLine);
      cases.push(self.comment_doc(comment));
    }
    let cases = self.concat_iter(cases);

    self.concat([
      head,
      Doc::Text(" {"),
      self.indent([Doc::HardLine, cases]),
      Doc::HardLine,
      Doc::Text("}"),
    ])
  }

  fn switch_case(&mut self, case: &'a SwitchCase<'s>) -> Doc<'a> {
    self.path.push("cases", Node::SwitchCase(case));

    let label = match &case.test {
      Some(test) => {
        let test = self.expression("test", test);
        self.concat([Doc::Text("case "), test, Doc::Text(":")])
      }
      None => Doc::Text("default:"),
    };

    let body = match case.consequent.as_slice() {
      [] => Doc::Empty,
      [Statement::Block(_)] => {
        let block = self.statement(&case.consequent[0]);
        self.concat([Doc::Text(" "), block])
      }
      _ => {
        let statements = self.statement_list(&case.consequent);
        self.indent([Doc::HardLine, statements])
      }
    };

    self.path.pop();
    self.concat([label, body])
  }

  fn try_statement(&mut self, try_: &'a TryStatement<'s>) -> Doc<'a> {
    let mut parts = vec![Doc::Text("try "), self.block(&try_.block)];

    if let Some(handler) = &try_.handler {
      self.path.push("handler", Node::CatchClause(handler));
      parts.push(Doc::Text(" catch "));
      if let Some(param) = &handler.param {
        let param = self.pattern("param", param);
        parts.push(self.concat([Doc::Text("("), param, Doc::Text(") ")]));
      }
      parts.push(self.block(&handler.body));
      self.path.pop();
    }

    if let Some(finalizer) = &try_.finalizer {
      parts.push(Doc::Text(" finally "));
      parts.push(self.block(finalizer));
    }

    self.concat_iter(parts)
  }

  fn return_statement(&mut self, return_: &'a ReturnStatement<'s>) -> Doc<'a> {
    let Some(argument) = &return_.argument else {
      return self.concat([Doc::Text("return"), self.semi()]);
    };
    let argument = self.returned_argument("argument", argument);
    self.concat([Doc::Text("return "), argument, self.semi()])
  }

  fn throw_statement(&mut self, throw: &'a ThrowStatement<'s>) -> Doc<'a> {
    let argument = self.returned_argument("argument", &throw.argument);
    self.concat([Doc::Text("throw "), argument, self.semi()])
  }

  /// A returned or thrown value; a JSX argument gains parentheses when it
  /// breaks over lines
  fn returned_argument(&mut self, name: &'static str, argument: &'a Expression<'s>) -> Doc<'a> {
    let doc = self.expression(name, argument);
    if matches!(argument, Expression::Jsx(_)) {
      return self.group([
        self.if_break(Doc::Text("("), Doc::Empty),
        self.indent([Doc::SoftLine, doc]),
        Doc::SoftLine,
        self.if_break(Doc::Text(")"), Doc::Empty),
      ]);
    }
    self.group([doc])
  }

  fn break_continue(
    &mut self,
    keyword: &'static str,
    label: Option<&'a jsfmt_syntax::ast::expression::Identifier<'s>>,
  ) -> Doc<'a> {
    match label {
      Some(label) => self.concat([
        Doc::Text(keyword),
        Doc::Text(" "),
        Doc::Text(label.name),
        self.semi(),
      ]),
      None => self.concat([Doc::Text(keyword), self.semi()]),
    }
  }

  fn labeled_statement(&mut self, labeled: &'a LabeledStatement<'s>) -> Doc<'a> {
    if matches!(labeled.body, Statement::Empty(_)) {
      return self.concat([Doc::Text(labeled.label.name), Doc::Text(":;")]);
    }
    let body = self.statement(&labeled.body);
    self.concat([Doc::Text(labeled.label.name), Doc::Text(": "), body])
  }

  fn type_alias(&mut self, alias: &'a TypeAlias<'s>) -> Doc<'a> {
    let right = self.type_doc("right", &alias.right);
    self.concat([
      Doc::Text("type "),
      Doc::Text(alias.name.name),
      Doc::Text(" = "),
      right,
      self.semi(),
    ])
  }

  // ---- declarations ----

  pub(crate) fn variable_declaration(
    &mut self,
    declaration: &'a VariableDeclaration<'s>,
    edge: &'static str,
  ) -> Doc<'a> {
    let keyword = Doc::Text(declaration.kind.as_str());

    let mut declarators = declaration.declarations.iter().map(|declarator| {
      self.path.push(edge, Node::VariableDeclarator(declarator));
      let doc = self.variable_declarator(declarator);
      self.path.pop();
      doc
    });

    let first = declarators.next().unwrap_or(Doc::Empty);
    let rest: std::vec::Vec<Doc> = declarators.collect();

    if rest.is_empty() {
      return self.concat([keyword, Doc::Text(" "), first]);
    }

    // inside a `for` head the declarators may stay on one line
    let break_always = edge != "init";

    let mut tail = std::vec::Vec::new();
    for declarator in rest {
      tail.push(Doc::Text(","));
      tail.push(if break_always { Doc::HardLine } else { Doc::Line });
      tail.push(declarator);
    }
    let tail = self.concat_iter(tail);

    self.group([keyword, Doc::Text(" "), first, self.indent([tail])])
  }

  fn variable_declarator(&mut self, declarator: &'a VariableDeclarator<'s>) -> Doc<'a> {
    let id = self.pattern("id", &declarator.id);
    match &declarator.init {
      None => id,
      Some(init) => {
        let right = self.assignment_right("init", init);
        self.concat([id, right])
      }
    }
  }

  /// The ` = value` tail of a declarator or assignment. Values which lay
  /// themselves out (functions, literals with their own braces) stay glued
  /// to the `=`; everything else may break onto an indented line.
  pub(crate) fn assignment_right(&mut self, name: &'static str, value: &'a Expression<'s>) -> Doc<'a> {
    self.assignment_tail("=", name, value)
  }

  pub(crate) fn assignment_tail(
    &mut self,
    operator: &'a str,
    name: &'static str,
    value: &'a Expression<'s>,
  ) -> Doc<'a> {
    let doc = self.expression(name, value);

    // operator chains and conditionals may break onto an indented line;
    // everything else lays itself out after the `=`
    let breakable = matches!(
      value,
      Expression::Binary(_)
        | Expression::Logical(_)
        | Expression::Conditional(_)
        | Expression::Assignment(_)
        | Expression::Sequence(_)
    );

    if breakable {
      self.concat([
        Doc::Text(" "),
        Doc::Text(operator),
        self.group([self.indent([Doc::Line, doc])]),
      ])
    } else {
      self.concat([Doc::Text(" "), Doc::Text(operator), Doc::Text(" "), doc])
    }
  }

  pub(crate) fn function_doc(&mut self, function: &'a Function<'s>) -> Doc<'a> {
    self.path.push("function", Node::Function(function));

    let mut parts = std::vec::Vec::new();
    if function.is_async {
      parts.push(Doc::Text("async "));
    }
    parts.push(Doc::Text("function"));
    if function.is_generator {
      parts.push(Doc::Text("*"));
    }
    if let Some(name) = &function.name {
      parts.push(Doc::Text(" "));
      parts.push(Doc::Text(name.name));
    }
    parts.push(self.params_doc(&function.params));
    if let Some(return_type) = &function.return_type {
      parts.push(Doc::Text(": "));
      parts.push(self.type_doc("returnType", return_type));
    }
    parts.push(Doc::Text(" "));
    parts.push(self.block(&function.body));

    self.path.pop();
    self.concat_iter(parts)
  }

  pub(crate) fn class_doc(&mut self, class: &'a Class<'s>) -> Doc<'a> {
    self.path.push("class", Node::Class(class));

    let mut parts = vec![Doc::Text("class")];
    if let Some(name) = &class.name {
      parts.push(Doc::Text(" "));
      parts.push(Doc::Text(name.name));
    }
    if let Some(super_class) = &class.super_class {
      parts.push(Doc::Text(" extends "));
      parts.push(self.expression("superClass", super_class));
    }
    parts.push(Doc::Text(" "));
    parts.push(self.class_body(class));

    self.path.pop();
    self.concat_iter(parts)
  }

  fn class_body(&mut self, class: &'a Class<'s>) -> Doc<'a> {
    if class.body.is_empty() {
      let dangling = self.comments.take_dangling(class.span);
      if dangling.is_empty() {
        return Doc::Text("{}");
      }
      let mut inner = std::vec::Vec::new();
      for (index, comment) in dangling.iter().enumerate() {
        if index > 0 {
          inner.push(Doc::HardLine);
        }
        inner.push(self.comment_doc(*comment));
      }
      let inner = self.concat_iter(inner);
      return self.concat([
        Doc::Text("{"),
        self.indent([Doc::HardLine, inner]),
        Doc::HardLine,
        Doc::Text("}"),
      ]);
    }

    let mut members = std::vec::Vec::new();
    let mut previous_line: Option<usize> = None;
    for method in &class.body {
      let leading = self.comments.take_leading(method.span.start);
      let first_start = leading.first().map_or(method.span.start, |comment| comment.span.start);

      if let Some(previous) = previous_line {
        members.push(Doc::HardLine);
        if self.line_index.line_of_offset(first_start) > previous + 1 {
          members.push(Doc::HardLine);
        }
      }
      self.leading_comment_docs(&mut members, &leading, method.span.start);

      members.push(self.class_method(method));

      for comment in self.comments.take_trailing(method.span.end) {
        members.push(self.trailing_comment_doc(comment));
      }
      previous_line = Some(self.line_index.line_of_offset(method.span.end));
    }
    for comment in self.comments.take_leading(class.span.end) {
      members.push(Doc::HardLine);
      members.push(self.comment_doc(comment));
    }
    let members = self.concat_iter(members);

    self.concat([
      Doc::Text("{"),
      self.indent([Doc::HardLine, members]),
      Doc::HardLine,
      Doc::Text("}"),
    ])
  }

  fn class_method(&mut self, method: &'a ClassMethod<'s>) -> Doc<'a> {
    self.path.push("body", Node::ClassMethod(method));

    let mut parts = std::vec::Vec::new();
    if method.is_static {
      parts.push(Doc::Text("static "));
    }
    match method.kind {
      MethodKind::Get => parts.push(Doc::Text("get ")),
      MethodKind::Set => parts.push(Doc::Text("set ")),
      MethodKind::Constructor | MethodKind::Method => {
        parts.push(Doc::Text(Self::method_prefix(&method.function)));
      }
    }

    let key = self.property_key_doc(&method.key);
    let tail = self.method_tail(&method.function);
    parts.push(key);
    parts.push(tail);

    self.path.pop();
    self.concat_iter(parts)
  }

  /// Parameters, return type, and body of a shorthand method, printed after
  /// its key
  pub(crate) fn method_tail(&mut self, function: &'a Function<'s>) -> Doc<'a> {
    self.path.push("function", Node::Function(function));

    let mut parts = std::vec::Vec::new();
    parts.push(self.params_doc(&function.params));
    if let Some(return_type) = &function.return_type {
      parts.push(Doc::Text(": "));
      parts.push(self.type_doc("returnType", return_type));
    }
    parts.push(Doc::Text(" "));
    parts.push(self.block(&function.body));

    self.path.pop();
    self.concat_iter(parts)
  }

  /// The `async`/`*` prefix of a shorthand method
  pub(crate) fn method_prefix(function: &Function) -> &'static str {
    match (function.is_async, function.is_generator) {
      (true, true) => "async *",
      (true, false) => "async ",
      (false, true) => "*",
      (false, false) => "",
    }
  }

  // ---- modules ----

  fn import_declaration(&mut self, import: &'a ImportDeclaration<'s>) -> Doc<'a> {
    let source = self.string_literal(&import.source);

    if import.specifiers.is_empty() {
      return self.concat([Doc::Text("import "), source, self.semi()]);
    }

    let mut head = std::vec::Vec::new();
    let mut named = std::vec::Vec::new();
    for specifier in &import.specifiers {
      match specifier {
        ImportSpecifier::Default(name) => head.push(Doc::Text(name.name)),
        ImportSpecifier::Namespace(name) => {
          head.push(self.concat([Doc::Text("* as "), Doc::Text(name.name)]));
        }
        ImportSpecifier::Named { imported, local } => named.push(match local {
          Some(local) => self.concat([
            Doc::Text(imported.name),
            Doc::Text(" as "),
            Doc::Text(local.name),
          ]),
          None => Doc::Text(imported.name),
        }),
      }
    }

    let mut parts = vec![Doc::Text("import ")];
    let mut first = true;
    for specifier in head {
      if !first {
        parts.push(Doc::Text(", "));
      }
      first = false;
      parts.push(specifier);
    }
    if !named.is_empty() {
      if !first {
        parts.push(Doc::Text(", "));
      }
      parts.push(self.named_specifier_braces(named));
    }
    parts.push(Doc::Text(" from "));
    parts.push(source);
    parts.push(self.semi());

    self.concat_iter(parts)
  }

  fn export_named(&mut self, export: &'a ExportNamedDeclaration<'s>) -> Doc<'a> {
    if let Some(declaration) = &export.declaration {
      let declaration = self.statement(declaration);
      return self.concat([Doc::Text("export "), declaration]);
    }

    let specifiers: std::vec::Vec<Doc> = export
      .specifiers
      .iter()
      .map(|specifier| match &specifier.exported {
        Some(exported) => self.concat([
          Doc::Text(specifier.local.name),
          Doc::Text(" as "),
          Doc::Text(exported.name),
        ]),
        None => Doc::Text(specifier.local.name),
      })
      .collect();

    let mut parts = vec![Doc::Text("export ")];
    if specifiers.is_empty() {
      parts.push(Doc::Text("{}"));
    } else {
      parts.push(self.named_specifier_braces(specifiers));
    }
    if let Some(source) = &export.source {
      parts.push(Doc::Text(" from "));
      parts.push(self.string_literal(source));
    }
    parts.push(self.semi());

    self.concat_iter(parts)
  }

  /// `{ a, b as c }`, breaking one specifier per line when long
  fn named_specifier_braces(&mut self, specifiers: std::vec::Vec<Doc<'a>>) -> Doc<'a> {
    let spaced = self.config.bracket_spacing;
    let edge = || if spaced { Doc::Line } else { Doc::SoftLine };

    let mut inner = std::vec::Vec::new();
    for (index, specifier) in specifiers.into_iter().enumerate() {
      if index > 0 {
        inner.push(Doc::Text(","));
        inner.push(Doc::Line);
      }
      inner.push(specifier);
    }
    let inner = self.concat_iter(inner);
    let trailing = self.trailing_comma_doc(crate::config::TrailingComma::All);

    self.group([
      Doc::Text("{"),
      self.indent([edge(), inner, trailing]),
      edge(),
      Doc::Text("}"),
    ])
  }

  fn export_default(&mut self, export: &'a ExportDefaultDeclaration<'s>) -> Doc<'a> {
    match &export.declaration {
      ExportDefaultKind::Function(function) => {
        let function = self.function_doc(function);
        self.concat([Doc::Text("export default "), function])
      }
      ExportDefaultKind::Class(class) => {
        let class = self.class_doc(class);
        self.concat([Doc::Text("export default "), class])
      }
      ExportDefaultKind::Expression(expression) => {
        let expression = self.expression("declaration", expression);
        self.concat([Doc::Text("export default "), expression, self.semi()])
      }
    }
  }

  /// The trailing comma doc for a broken list, if the config permits one at
  /// this position (`minimum` is the loosest setting which allows it)
  pub(crate) fn trailing_comma_doc(&self, minimum: crate::config::TrailingComma) -> Doc<'a> {
    use crate::config::TrailingComma;
    let allowed = match minimum {
      TrailingComma::None => true,
      TrailingComma::Es5 => self.config.trailing_comma != TrailingComma::None,
      TrailingComma::All => self.config.trailing_comma == TrailingComma::All,
    };
    if allowed && self.config.trailing_comma != TrailingComma::None {
      self.if_break(Doc::Text(","), Doc::Empty)
    } else {
      Doc::Empty
    }
  }
}

/// Would the statement's printed form begin with `[`, `(`, `` ` ``, `+`,
/// `-`, `/`, or `<`? (`nested` marks positions where the sub-expression
/// would be parenthesized.)
pub(crate) fn needs_leading_semicolon(expression: &Expression, nested: bool) -> bool {
  use jsfmt_syntax::ast::expression::UnaryOperator;

  match expression {
    Expression::Array(_)
    | Expression::Template(_)
    | Expression::Regex(_)
    | Expression::Jsx(_) => true,

    // these are parenthesized at the start of a statement
    Expression::Function(_) | Expression::Class(_) | Expression::Object(_) | Expression::Arrow(_) => {
      true
    }

    Expression::Unary(unary) => {
      matches!(unary.operator, UnaryOperator::Plus | UnaryOperator::Minus)
    }

    Expression::Sequence(sequence) => {
      nested
        || sequence
          .expressions
          .first()
          .is_some_and(|first| needs_leading_semicolon(first, true))
    }
    Expression::Binary(binary) => needs_leading_semicolon(&binary.left, true),
    Expression::Logical(logical) => needs_leading_semicolon(&logical.left, true),
    Expression::Member(member) => needs_leading_semicolon(&member.object, true),
    Expression::Call(call) => needs_leading_semicolon(&call.callee, true),
    Expression::Conditional(conditional) => needs_leading_semicolon(&conditional.test, true),
    Expression::TaggedTemplate(tagged) => needs_leading_semicolon(&tagged.tag, true),
    Expression::Update(update) if !update.prefix => needs_leading_semicolon(&update.argument, true),
    Expression::Assignment(assignment) => {
      matches!(assignment.left, Expression::Object(_) | Expression::Array(_))
        || needs_leading_semicolon(&assignment.left, true)
    }

    _ => false,
  }
}
