//! Per-kind printers for expressions and binding patterns

use super::Printer;
use crate::{config::TrailingComma, doc::Doc, parens::needs_parens, path::Node};
use jsfmt_syntax::ast::{
  expression::*,
  pattern::*,
};

impl<'a, 's: 'a> Printer<'a, 's> {
  /// Print an expression reached by `name`, adding parentheses when the
  /// oracle requires them
  pub(crate) fn expression(&mut self, name: &'static str, expression: &'a Expression<'s>) -> Doc<'a> {
    self.with_frame(name, Node::Expression(expression), |printer| {
      printer.parenthesized_inner(expression)
    })
  }

  /// The oracle consult and wrap for the node the path currently sits on
  fn parenthesized_inner(&mut self, expression: &'a Expression<'s>) -> Doc<'a> {
    let parens = needs_parens(&self.path);
    let doc = self.expression_inner(expression);
    if parens {
      self.concat([Doc::Text("("), doc, Doc::Text(")")])
    } else {
      doc
    }
  }

  fn expression_inner(&mut self, expression: &'a Expression<'s>) -> Doc<'a> {
    match expression {
      Expression::Array(array) => self.array(array),
      Expression::Arrow(arrow) => self.arrow(arrow),
      Expression::Assignment(assignment) => self.assignment(assignment),
      Expression::Await(await_) => {
        let argument = self.expression("argument", &await_.argument);
        self.concat([Doc::Text("await "), argument])
      }
      Expression::Binary(_) | Expression::Logical(_) => self.binary_chain(expression),
      Expression::Boolean(boolean) => {
        Doc::Text(if boolean.value { "true" } else { "false" })
      }
      Expression::Call(_) | Expression::Member(_) => self.member_chain(expression),
      Expression::Class(class) => self.class_doc(class),
      Expression::Conditional(conditional) => self.conditional(conditional),
      Expression::Function(function) => self.function_doc(function),
      Expression::Identifier(identifier) => Doc::Text(identifier.name),
      Expression::Jsx(element) => self.jsx_element(element),
      Expression::New(new) => self.new_expression(new),
      Expression::Null(_) => Doc::Text("null"),
      Expression::Number(number) => Doc::Text(number.raw),
      Expression::Object(object) => self.object(object),
      Expression::Regex(regex) => Doc::Text(regex.raw),
      Expression::Sequence(sequence) => self.sequence(sequence),
      Expression::String(string) => self.string_literal(string),
      Expression::Super(_) => Doc::Text("super"),
      Expression::TaggedTemplate(tagged) => {
        let tag = self.expression("tag", &tagged.tag);
        let quasi = self.template(&tagged.quasi);
        self.concat([tag, quasi])
      }
      Expression::Template(template) => self.template(template),
      Expression::This(_) => Doc::Text("this"),
      Expression::Unary(unary) => self.unary(unary),
      Expression::Update(update) => self.update(update),
      Expression::Yield(yield_) => self.yield_expression(yield_),
    }
  }

  // ---- literals ----

  /// A string literal, requoted to the configured quote unless the other
  /// quote needs fewer escapes
  pub(crate) fn string_literal(&self, literal: &StringLiteral<'s>) -> Doc<'a> {
    let value = &literal.value;
    let singles = value.matches('\'').count();
    let doubles = value.matches('"').count();

    let preferred = if self.config.single_quote { '\'' } else { '"' };
    let (preferred_count, alternate_count) =
      if preferred == '\'' { (singles, doubles) } else { (doubles, singles) };
    let quote = if preferred_count > alternate_count {
      if preferred == '\'' { '"' } else { '\'' }
    } else {
      preferred
    };

    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for character in value.chars() {
      match character {
        '\\' => out.push_str("\\\\"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\0' => out.push_str("\\0"),
        c if c == quote => {
          out.push('\\');
          out.push(c);
        }
        c => out.push(c),
      }
    }
    out.push(quote);

    self.string(out)
  }

  fn template(&mut self, template: &'a TemplateLiteral<'s>) -> Doc<'a> {
    self.path.push("quasi", Node::TemplateLiteral(template));

    let mut parts = vec![Doc::LineSuffixBoundary, Doc::Text("`")];
    for (index, quasi) in template.quasis.iter().enumerate() {
      parts.push(self.raw_lines(quasi.raw));
      if let Some(expression) = template.expressions.get(index) {
        let expression = self.expression("expressions", expression);
        parts.push(Doc::Text("${"));
        parts.push(expression);
        parts.push(Doc::Text("}"));
      }
    }
    parts.push(Doc::Text("`"));

    self.path.pop();
    self.concat_iter(parts)
  }

  // ---- operators ----

  fn unary(&mut self, unary: &'a UnaryExpression<'s>) -> Doc<'a> {
    let operator = unary.operator;
    let argument = self.expression("argument", &unary.argument);

    let space = operator.is_keyword() || same_sign_follows(operator, &unary.argument);
    if space {
      self.concat([Doc::Text(operator.as_str()), Doc::Text(" "), argument])
    } else {
      self.concat([Doc::Text(operator.as_str()), argument])
    }
  }

  fn update(&mut self, update: &'a UpdateExpression<'s>) -> Doc<'a> {
    let argument = self.expression("argument", &update.argument);
    if update.prefix {
      self.concat([Doc::Text(update.operator.as_str()), argument])
    } else {
      self.concat([argument, Doc::Text(update.operator.as_str())])
    }
  }

  /// Chains of the same operator render as a single group breaking before
  /// each operator
  fn binary_chain(&mut self, expression: &'a Expression<'s>) -> Doc<'a> {
    let mut parts = std::vec::Vec::new();
    self.binary_parts(expression, &mut parts);

    let first = parts.remove(0);
    let rest = self.concat_iter(parts);
    self.group([first, self.indent([rest])])
  }

  fn binary_parts(&mut self, expression: &'a Expression<'s>, parts: &mut std::vec::Vec<Doc<'a>>) {
    let (left, operator, right) = match expression {
      Expression::Binary(binary) => (&binary.left, binary.operator.as_str(), &binary.right),
      Expression::Logical(logical) => (&logical.left, logical.operator.as_str(), &logical.right),
      _ => {
        parts.push(self.parenthesized_inner(expression));
        return;
      }
    };

    self.path.push("left", Node::Expression(left));
    let flatten = should_flatten(expression, left) && !needs_parens(&self.path);
    if flatten {
      self.binary_parts(left, parts);
    } else {
      parts.push(self.parenthesized_inner(left));
    }
    self.path.pop();

    let right = self.expression("right", right);
    parts.push(self.concat([Doc::Line, Doc::Text(operator), Doc::Text(" "), right]));
  }

  fn conditional(&mut self, conditional: &'a ConditionalExpression<'s>) -> Doc<'a> {
    let test = self.expression("test", &conditional.test);
    let consequent = self.expression("consequent", &conditional.consequent);
    let alternate = self.expression("alternate", &conditional.alternate);

    self.group([
      test,
      self.indent([
        Doc::Line,
        Doc::Text("? "),
        consequent,
        Doc::Line,
        Doc::Text(": "),
        alternate,
      ]),
    ])
  }

  fn assignment(&mut self, assignment: &'a AssignmentExpression<'s>) -> Doc<'a> {
    let left = self.expression("left", &assignment.left);
    let tail = self.assignment_tail(assignment.operator.as_str(), "right", &assignment.right);
    self.concat([left, tail])
  }

  fn sequence(&mut self, sequence: &'a SequenceExpression<'s>) -> Doc<'a> {
    let mut parts = std::vec::Vec::new();
    for (index, expression) in sequence.expressions.iter().enumerate() {
      let name = if index == 0 { "first" } else { "expressions" };
      let doc = self.expression(name, expression);
      if index > 0 {
        parts.push(Doc::Text(","));
        parts.push(Doc::Line);
      }
      parts.push(doc);
    }
    let parts = self.concat_iter(parts);
    self.group([parts])
  }

  fn yield_expression(&mut self, yield_: &'a YieldExpression<'s>) -> Doc<'a> {
    let keyword = if yield_.delegate { "yield*" } else { "yield" };
    match &yield_.argument {
      Some(argument) => {
        let argument = self.expression("argument", argument);
        self.concat([Doc::Text(keyword), Doc::Text(" "), argument])
      }
      None => Doc::Text(keyword),
    }
  }

  // ---- member and call chains ----

  /// Consecutive property accesses and calls on one receiver fold into a
  /// single group which breaks before each `.`. Short chains (at most one
  /// `.`) stay glued so their arguments break on their own.
  fn member_chain(&mut self, expression: &'a Expression<'s>) -> Doc<'a> {
    let mut chain = Chain::default();
    self.chain_parts(expression, &mut chain);

    let receiver = chain.receiver.unwrap_or(Doc::Empty);
    if chain.links.is_empty() {
      return receiver;
    }

    let breakable = chain.dots > 1;
    let mut parts = std::vec::Vec::new();
    for link in chain.links {
      match link {
        Link::Dot(name) => {
          if breakable {
            parts.push(Doc::SoftLine);
          }
          parts.push(Doc::Text("."));
          parts.push(Doc::Text(name));
        }
        Link::Glued(doc) => parts.push(doc),
      }
    }
    let links = self.concat_iter(parts);

    if breakable {
      self.group([receiver, self.indent([links])])
    } else {
      self.concat([receiver, links])
    }
  }

  fn chain_parts(&mut self, expression: &'a Expression<'s>, chain: &mut Chain<'a>) {
    match expression {
      Expression::Member(member) => {
        self.chain_child("object", &member.object, chain);
        match &member.property {
          MemberProperty::Dot(name) => {
            chain.dots += 1;
            chain.links.push(Link::Dot(name.name));
          }
          MemberProperty::Computed(property) => {
            let property = self.expression("property", property);
            chain
              .links
              .push(Link::Glued(self.concat([Doc::Text("["), property, Doc::Text("]")])));
          }
        }
      }
      Expression::Call(call) => {
        self.chain_child("callee", &call.callee, chain);
        let arguments = self.call_arguments(&call.arguments, call.span);
        chain.links.push(Link::Glued(arguments));
      }
      _ => chain.receiver = Some(self.parenthesized_inner(expression)),
    }
  }

  fn chain_child(&mut self, name: &'static str, child: &'a Expression<'s>, chain: &mut Chain<'a>) {
    self.path.push(name, Node::Expression(child));
    if matches!(child, Expression::Member(_) | Expression::Call(_)) && !needs_parens(&self.path) {
      self.chain_parts(child, chain);
    } else {
      chain.receiver = Some(self.parenthesized_inner(child));
    }
    self.path.pop();
  }

  fn new_expression(&mut self, new: &'a NewExpression<'s>) -> Doc<'a> {
    let callee = self.expression("callee", &new.callee);
    let arguments = match &new.arguments {
      Some(arguments) => self.call_arguments(arguments, new.span),
      // `new X` normalises to `new X()`
      None => Doc::Text("()"),
    };
    self.concat([Doc::Text("new "), callee, arguments])
  }

  pub(crate) fn call_arguments(
    &mut self,
    arguments: &'a [Argument<'s>],
    container: jsfmt_syntax::Span,
  ) -> Doc<'a> {
    if arguments.is_empty() {
      let dangling = self.comments.take_dangling(container);
      if dangling.is_empty() {
        return Doc::Text("()");
      }
      let mut inner = vec![Doc::Text("(")];
      for comment in dangling {
        inner.push(self.comment_doc(comment));
      }
      inner.push(Doc::Text(")"));
      return self.concat_iter(inner);
    }

    // a function-ish final argument hugs the parentheses so its body can
    // span lines without breaking the argument list
    if hugs_arguments(arguments) {
      let mut parts = vec![Doc::Text("(")];
      for (index, argument) in arguments.iter().enumerate() {
        if index > 0 {
          parts.push(Doc::Text(", "));
        }
        parts.push(self.argument(argument));
      }
      parts.push(Doc::Text(")"));
      return self.concat_iter(parts);
    }

    let mut inner = std::vec::Vec::new();
    for (index, argument) in arguments.iter().enumerate() {
      if index > 0 {
        inner.push(Doc::Text(","));
        inner.push(Doc::Line);
      }
      let upto = arguments
        .get(index + 1)
        .map_or(container.end, |next| next.span().start);
      let doc = self.argument(argument);
      inner.push(self.with_item_comments(argument.span(), upto, doc));
    }
    let inner = self.concat_iter(inner);
    let trailing = self.trailing_comma_doc(TrailingComma::All);

    self.group([
      Doc::Text("("),
      self.indent([Doc::SoftLine, inner, trailing]),
      Doc::SoftLine,
      Doc::Text(")"),
    ])
  }

  fn argument(&mut self, argument: &'a Argument<'s>) -> Doc<'a> {
    match argument {
      Argument::Expression(expression) => self.expression("arguments", expression),
      Argument::Spread(spread) => self.spread(spread),
    }
  }

  fn spread(&mut self, spread: &'a SpreadElement<'s>) -> Doc<'a> {
    self.path.push("argument", Node::SpreadElement(spread));
    let argument = self.expression("argument", &spread.argument);
    self.path.pop();
    self.concat([Doc::Text("..."), argument])
  }

  // ---- containers ----

  fn array(&mut self, array: &'a ArrayExpression<'s>) -> Doc<'a> {
    if array.elements.is_empty() {
      let dangling = self.comments.take_dangling(array.span);
      if dangling.is_empty() {
        return Doc::Text("[]");
      }
      let mut inner = std::vec::Vec::new();
      for comment in dangling {
        inner.push(self.comment_doc(comment));
      }
      let inner = self.concat_iter(inner);
      return self.concat([
        Doc::Text("["),
        self.indent([Doc::HardLine, inner]),
        Doc::HardLine,
        Doc::Text("]"),
      ]);
    }

    let mut inner = std::vec::Vec::new();
    for (index, element) in array.elements.iter().enumerate() {
      if index > 0 {
        inner.push(Doc::Text(","));
        inner.push(Doc::Line);
      }
      let doc = match element {
        ArrayElement::Hole => Doc::Empty,
        ArrayElement::Expression(expression) => {
          let upto = self.array_element_upto(array, index);
          let doc = self.expression("elements", expression);
          self.with_item_comments(expression.span(), upto, doc)
        }
        ArrayElement::Spread(spread) => self.spread(spread),
      };
      inner.push(doc);
    }

    // a trailing hole would otherwise be swallowed by the closing bracket
    if matches!(array.elements.last(), Some(ArrayElement::Hole)) {
      inner.push(Doc::Text(","));
    }

    let inner = self.concat_iter(inner);
    let trailing = self.trailing_comma_doc(TrailingComma::Es5);

    self.group([
      Doc::Text("["),
      self.indent([Doc::SoftLine, inner, trailing]),
      Doc::SoftLine,
      Doc::Text("]"),
    ])
  }

  fn array_element_upto(&self, array: &ArrayExpression, index: usize) -> u32 {
    for element in &array.elements[index + 1..] {
      match element {
        ArrayElement::Hole => {}
        ArrayElement::Expression(expression) => return expression.span().start,
        ArrayElement::Spread(spread) => return spread.span.start,
      }
    }
    array.span.end
  }

  fn object(&mut self, object: &'a ObjectExpression<'s>) -> Doc<'a> {
    if object.properties.is_empty() {
      let dangling = self.comments.take_dangling(object.span);
      if dangling.is_empty() {
        return Doc::Text("{}");
      }
      let mut inner = std::vec::Vec::new();
      for comment in dangling {
        inner.push(self.comment_doc(comment));
      }
      let inner = self.concat_iter(inner);
      return self.concat([
        Doc::Text("{"),
        self.indent([Doc::HardLine, inner]),
        Doc::HardLine,
        Doc::Text("}"),
      ]);
    }

    let spaced = self.config.bracket_spacing;
    let edge = || if spaced { Doc::Line } else { Doc::SoftLine };

    let mut inner = std::vec::Vec::new();
    for (index, property) in object.properties.iter().enumerate() {
      if index > 0 {
        inner.push(Doc::Text(","));
        inner.push(Doc::Line);
      }
      let upto = object
        .properties
        .get(index + 1)
        .map_or(object.span.end, |next| next.span().start);
      let doc = match property {
        ObjectProperty::Property(property) => {
          self.path.push("properties", Node::Property(property));
          let doc = self.property(property);
          self.path.pop();
          doc
        }
        ObjectProperty::Spread(spread) => self.spread(spread),
      };
      inner.push(self.with_item_comments(property.span(), upto, doc));
    }
    let inner = self.concat_iter(inner);
    let trailing = self.trailing_comma_doc(TrailingComma::Es5);

    self.group([
      Doc::Text("{"),
      self.indent([edge(), inner, trailing]),
      edge(),
      Doc::Text("}"),
    ])
  }

  fn property(&mut self, property: &'a Property<'s>) -> Doc<'a> {
    match property.kind {
      PropertyKind::Get | PropertyKind::Set => {
        let keyword = if property.kind == PropertyKind::Get { "get " } else { "set " };
        let key = self.property_key_doc(&property.key);
        let Expression::Function(function) = &property.value else {
          // accessors always carry a function value
          let value = self.expression("value", &property.value);
          return self.concat([Doc::Text(keyword), key, Doc::Text(": "), value]);
        };
        let tail = self.method_tail(function);
        self.concat([Doc::Text(keyword), key, tail])
      }
      PropertyKind::Method => {
        let Expression::Function(function) = &property.value else {
          let key = self.property_key_doc(&property.key);
          let value = self.expression("value", &property.value);
          return self.concat([key, Doc::Text(": "), value]);
        };
        let prefix = Self::method_prefix(function);
        let key = self.property_key_doc(&property.key);
        let tail = self.method_tail(function);
        self.concat([Doc::Text(prefix), key, tail])
      }
      PropertyKind::Init => {
        if property.shorthand {
          return self.expression("value", &property.value);
        }
        let key = self.property_key_doc(&property.key);
        let value = self.expression("value", &property.value);
        self.concat([key, Doc::Text(": "), value])
      }
    }
  }

  pub(crate) fn property_key_doc(&mut self, key: &'a PropertyKey<'s>) -> Doc<'a> {
    match key {
      PropertyKey::Identifier(identifier) => Doc::Text(identifier.name),
      PropertyKey::String(string) => self.string_literal(string),
      PropertyKey::Number(number) => Doc::Text(number.raw),
      PropertyKey::Computed(expression) => {
        let expression = self.expression("key", expression);
        self.concat([Doc::Text("["), expression, Doc::Text("]")])
      }
    }
  }

  // ---- functions ----

  fn arrow(&mut self, arrow: &'a ArrowFunction<'s>) -> Doc<'a> {
    let mut parts = std::vec::Vec::new();
    if arrow.is_async {
      parts.push(Doc::Text("async "));
    }

    // a single plain parameter needs no parentheses
    let bare = match arrow.params.as_slice() {
      [Pattern::Identifier(identifier)] if identifier.type_annotation.is_none() => {
        Some(identifier.name)
      }
      _ => None,
    };
    match bare {
      Some(name) if arrow.return_type.is_none() => parts.push(Doc::Text(name)),
      _ => parts.push(self.params_doc(&arrow.params)),
    }

    if let Some(return_type) = &arrow.return_type {
      parts.push(Doc::Text(": "));
      parts.push(self.type_doc("returnType", return_type));
    }

    parts.push(Doc::Text(" =>"));

    match &arrow.body {
      ArrowBody::Block(block) => {
        parts.push(Doc::Text(" "));
        parts.push(self.block(block));
        self.concat_iter(parts)
      }
      ArrowBody::Expression(body) => {
        let hug = matches!(
          **body,
          Expression::Object(_)
            | Expression::Array(_)
            | Expression::Arrow(_)
            | Expression::Template(_)
            | Expression::TaggedTemplate(_)
            | Expression::Jsx(_)
        );
        let body = self.expression("body", body);
        let prefix = self.concat_iter(parts);
        if hug {
          self.concat([prefix, Doc::Text(" "), body])
        } else {
          self.group([prefix, self.indent([Doc::Line, body])])
        }
      }
    }
  }

  // ---- patterns ----

  pub(crate) fn pattern(&mut self, name: &'static str, pattern: &'a Pattern<'s>) -> Doc<'a> {
    self.with_frame(name, Node::Pattern(pattern), |printer| printer.pattern_inner(pattern))
  }

  fn pattern_inner(&mut self, pattern: &'a Pattern<'s>) -> Doc<'a> {
    match pattern {
      Pattern::Identifier(identifier) => {
        let name = Doc::Text(identifier.name);
        match &identifier.type_annotation {
          Some(annotation) => {
            let annotation = self.type_doc("typeAnnotation", annotation);
            self.concat([name, Doc::Text(": "), annotation])
          }
          None => name,
        }
      }
      Pattern::Object(object) => self.object_pattern(object),
      Pattern::Array(array) => self.array_pattern(array),
      Pattern::Assignment(assignment) => {
        let left = self.pattern("left", &assignment.left);
        let right = self.expression("right", &assignment.right);
        self.concat([left, Doc::Text(" = "), right])
      }
      Pattern::Rest(rest) => {
        let argument = self.pattern("argument", &rest.argument);
        self.concat([Doc::Text("..."), argument])
      }
    }
  }

  fn object_pattern(&mut self, object: &'a ObjectPattern<'s>) -> Doc<'a> {
    let spaced = self.config.bracket_spacing;
    let edge = || if spaced { Doc::Line } else { Doc::SoftLine };

    if object.properties.is_empty() {
      return self.pattern_type_suffix(Doc::Text("{}"), object.type_annotation.as_ref());
    }

    let mut inner = std::vec::Vec::new();
    for (index, property) in object.properties.iter().enumerate() {
      if index > 0 {
        inner.push(Doc::Text(","));
        inner.push(Doc::Line);
      }
      inner.push(match property {
        ObjectPatternProperty::Property { key, value, shorthand, .. } => {
          if *shorthand {
            self.pattern("value", value)
          } else {
            let key = self.property_key_doc(key);
            let value = self.pattern("value", value);
            self.concat([key, Doc::Text(": "), value])
          }
        }
        ObjectPatternProperty::Rest(rest) => {
          let argument = self.pattern("argument", &rest.argument);
          self.concat([Doc::Text("..."), argument])
        }
      });
    }
    let inner = self.concat_iter(inner);

    let rest_last = matches!(object.properties.last(), Some(ObjectPatternProperty::Rest(_)));
    let trailing = if rest_last {
      Doc::Empty
    } else {
      self.trailing_comma_doc(TrailingComma::Es5)
    };

    let doc = self.group([
      Doc::Text("{"),
      self.indent([edge(), inner, trailing]),
      edge(),
      Doc::Text("}"),
    ]);
    self.pattern_type_suffix(doc, object.type_annotation.as_ref())
  }

  fn array_pattern(&mut self, array: &'a ArrayPattern<'s>) -> Doc<'a> {
    if array.elements.is_empty() {
      return self.pattern_type_suffix(Doc::Text("[]"), array.type_annotation.as_ref());
    }

    let mut inner = std::vec::Vec::new();
    for (index, element) in array.elements.iter().enumerate() {
      if index > 0 {
        inner.push(Doc::Text(","));
        inner.push(Doc::Line);
      }
      if let Some(element) = element {
        inner.push(self.pattern("elements", element));
      }
    }
    if array.elements.last().is_some_and(Option::is_none) {
      inner.push(Doc::Text(","));
    }
    let inner = self.concat_iter(inner);

    let doc = self.group([
      Doc::Text("["),
      self.indent([Doc::SoftLine, inner]),
      Doc::SoftLine,
      Doc::Text("]"),
    ]);
    self.pattern_type_suffix(doc, array.type_annotation.as_ref())
  }

  fn pattern_type_suffix(
    &mut self,
    doc: Doc<'a>,
    annotation: Option<&'a jsfmt_syntax::ast::Type<'s>>,
  ) -> Doc<'a> {
    match annotation {
      Some(annotation) => {
        let annotation = self.type_doc("typeAnnotation", annotation);
        self.concat([doc, Doc::Text(": "), annotation])
      }
      None => doc,
    }
  }

  /// A parenthesized parameter list, hanging one parameter per line when it
  /// overflows
  pub(crate) fn params_doc(&mut self, params: &'a [Pattern<'s>]) -> Doc<'a> {
    if params.is_empty() {
      return Doc::Text("()");
    }

    let mut inner = std::vec::Vec::new();
    for (index, param) in params.iter().enumerate() {
      if index > 0 {
        inner.push(Doc::Text(","));
        inner.push(Doc::Line);
      }
      inner.push(self.pattern("params", param));
    }
    let inner = self.concat_iter(inner);

    let rest_last = matches!(params.last(), Some(Pattern::Rest(_)));
    let trailing = if rest_last {
      Doc::Empty
    } else {
      self.trailing_comma_doc(TrailingComma::Es5)
    };

    self.group([
      Doc::Text("("),
      self.indent([Doc::SoftLine, inner, trailing]),
      Doc::SoftLine,
      Doc::Text(")"),
    ])
  }
}

/// The accumulated parts of a member/call chain
#[derive(Default)]
struct Chain<'a> {
  receiver: Option<Doc<'a>>,
  links: std::vec::Vec<Link<'a>>,
  dots: usize,
}

/// One step of a member/call chain: a breakable `.name`, or content glued to
/// whatever precedes it (call arguments, computed access)
enum Link<'a> {
  Dot(&'a str),
  Glued(Doc<'a>),
}

/// Would a space be needed between a sign operator and its operand to avoid
/// `--`/`++` forming?
fn same_sign_follows(operator: UnaryOperator, argument: &Expression) -> bool {
  match (operator, argument) {
    (UnaryOperator::Minus, Expression::Unary(inner)) => inner.operator == UnaryOperator::Minus,
    (UnaryOperator::Plus, Expression::Unary(inner)) => inner.operator == UnaryOperator::Plus,
    (UnaryOperator::Minus, Expression::Update(inner)) => {
      inner.prefix && inner.operator == UpdateOperator::Decrement
    }
    (UnaryOperator::Plus, Expression::Update(inner)) => {
      inner.prefix && inner.operator == UpdateOperator::Increment
    }
    _ => false,
  }
}

/// Do the arguments end with a value which lays itself out, so the argument
/// list should stay glued to the parentheses?
fn hugs_arguments(arguments: &[Argument]) -> bool {
  match arguments.last() {
    Some(Argument::Expression(last)) => matches!(
      last,
      Expression::Function(_)
        | Expression::Arrow(_)
        | Expression::Object(_)
        | Expression::Array(_)
        | Expression::Template(_)
        | Expression::TaggedTemplate(_)
        | Expression::Jsx(_)
    ),
    _ => false,
  }
}

/// Can a nested operand at the same precedence be folded into its parent's
/// chain without regrouping?
fn should_flatten(parent: &Expression, child: &Expression) -> bool {
  use jsfmt_syntax::ast::expression::BinaryOperator as Op;

  match (parent, child) {
    (Expression::Logical(parent), Expression::Logical(child)) => {
      parent.operator == child.operator
    }
    (Expression::Binary(parent), Expression::Binary(child)) => {
      let (a, b) = (parent.operator, child.operator);
      if a == Op::Exponent {
        return false;
      }
      a == b
        || (matches!(a, Op::Add | Op::Subtract) && matches!(b, Op::Add | Op::Subtract))
        || (matches!(a, Op::Multiply | Op::Divide) && matches!(b, Op::Multiply | Op::Divide))
    }
    _ => false,
  }
}
