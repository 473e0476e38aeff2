//! # Parenthesization oracle
//!
//! Decides whether the node the path cursor sits on must be wrapped in
//! parentheses to preserve its meaning under operator precedence and
//! associativity, or to satisfy the formatter's disambiguation policy
//! (statement-start hazards, `new` callees, mixed logical and bitwise
//! operator chains).
//!
//! The oracle is pure: it reads only the path, and the translator invokes it
//! exactly once per node emitted.

use crate::path::{Node, Path};
use jsfmt_syntax::ast::{
  Expression, Statement, Type,
  expression::{BinaryOperator, LogicalOperator},
};

/// Would omitting parentheses around the current node change the parse?
pub fn needs_parens(path: &Path) -> bool {
  match path.current() {
    Node::Expression(expression) => expression_needs_parens(expression, path),
    Node::Type(type_) => type_needs_parens(type_, path),
    _ => false,
  }
}

fn expression_needs_parens(node: &Expression, path: &Path) -> bool {
  let Some(parent) = path.parent(0) else {
    return false;
  };
  let name = path.name();

  // `in` directly inside a `for` head would read as a for-in loop
  if let Expression::Binary(binary) = node
    && binary.operator == BinaryOperator::In
    && in_for_init(path)
  {
    return true;
  }

  // anything but a plain name as a superclass is parenthesized
  if name == "superClass" {
    return !matches!(node, Expression::Identifier(_));
  }

  match node {
    Expression::Sequence(_) => !matches!(
      (parent, name),
      (Node::Statement(Statement::Expression(_)), "expression")
        | (Node::Statement(Statement::For(_)), "init" | "test" | "update")
        | (Node::Statement(Statement::Return(_)), "argument")
    ),

    Expression::Assignment(assignment) => {
      // `{ a } = b` at the start of a statement would read as a block
      if matches!(parent, Node::Statement(Statement::Expression(_)))
        && name == "expression"
        && matches!(assignment.left, Expression::Object(_) | Expression::Array(_))
      {
        return true;
      }
      // an assignment as an arrow body reads as the arrow's own `=`
      if matches!(parent, Node::Expression(Expression::Arrow(_))) && name == "body" {
        return true;
      }
      precedence_requires_parens(node, parent, name)
    }

    Expression::Yield(_) | Expression::Await(_) => matches!(
      parent,
      Node::Expression(
        Expression::Unary(_)
          | Expression::Update(_)
          | Expression::Binary(_)
          | Expression::Logical(_)
          | Expression::TaggedTemplate(_)
      ) | Node::SpreadElement(_)
    ) || matches!(
      (parent, name),
      (Node::Expression(Expression::Member(_)), "object")
        | (Node::Expression(Expression::Call(_) | Expression::New(_)), "callee")
        | (Node::Expression(Expression::Conditional(_)), "test")
    ),

    Expression::Binary(_) | Expression::Logical(_) => match (parent, name) {
      (Node::Expression(Expression::Binary(_) | Expression::Logical(_)), "left" | "right") => {
        binary_needs_parens(node, parent, name)
      }
      _ => precedence_requires_parens(node, parent, name),
    },

    Expression::Number(number) => {
      // `1.toString()` would mis-parse; `1..toString()` is already unambiguous
      matches!((parent, name), (Node::Expression(Expression::Member(_)), "object"))
        && !number.raw.contains(['.', 'e', 'E', 'x', 'X', 'b', 'B', 'o', 'O'])
    }

    Expression::Function(_) | Expression::Class(_) => {
      starts_statement(path)
        || matches!(
          (parent, name),
          (Node::Expression(Expression::Call(_) | Expression::New(_)), "callee")
            | (Node::Expression(Expression::TaggedTemplate(_)), "tag")
        )
        || precedence_requires_parens(node, parent, name)
    }

    Expression::Object(_) => {
      starts_statement(path)
        || (matches!(parent, Node::Expression(Expression::Arrow(_))) && name == "body")
    }

    Expression::Arrow(_) => {
      matches!(
        (parent, name),
        (Node::Statement(Statement::Expression(_)), "expression")
          | (Node::Expression(Expression::Call(_) | Expression::New(_)), "callee")
          | (Node::Expression(Expression::TaggedTemplate(_)), "tag")
      ) || precedence_requires_parens(node, parent, name)
    }

    _ => precedence_requires_parens(node, parent, name),
  }
}

/// Nesting rules between binary and logical operators
fn binary_needs_parens(node: &Expression, parent: Node, name: &'static str) -> bool {
  let (Node::Expression(parent), "left" | "right") = (parent, name) else {
    return false;
  };

  let (parent_precedence, parent_op) = match parent {
    Expression::Binary(binary) => (binary_precedence(binary.operator), OperatorKey::Binary(binary.operator)),
    Expression::Logical(logical) => (logical_precedence(logical.operator), OperatorKey::Logical(logical.operator)),
    _ => return false,
  };
  let (precedence, op) = match node {
    Expression::Binary(binary) => (binary_precedence(binary.operator), OperatorKey::Binary(binary.operator)),
    Expression::Logical(logical) => (logical_precedence(logical.operator), OperatorKey::Logical(logical.operator)),
    _ => return false,
  };

  // `&&` inside `||` (and any mix with `??`) is always parenthesized
  if let (OperatorKey::Logical(inner), OperatorKey::Logical(outer)) = (op, parent_op)
    && inner != outer
  {
    return true;
  }

  // mixed bitwise and shift chains are parenthesized for readability
  if op != parent_op {
    let bitwise = |key: OperatorKey| matches!(key, OperatorKey::Binary(op) if op.is_bitwise());
    if bitwise(op) || bitwise(parent_op) {
      return true;
    }
  }

  if precedence != parent_precedence {
    return precedence < parent_precedence;
  }

  // equal precedence: enforce left associativity, except `**` which is
  // right associative and instead forces parens when nested on the left
  if parent_op == OperatorKey::Binary(BinaryOperator::Exponent) {
    name == "left"
  } else {
    name == "right"
  }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum OperatorKey {
  Binary(BinaryOperator),
  Logical(LogicalOperator),
}

/// The positional rules that fall out of operator precedence alone
fn precedence_requires_parens(node: &Expression, parent: Node, name: &'static str) -> bool {
  let Some(required) = required_precedence(parent, name) else {
    return false;
  };

  // `new (f())()` must not collapse into `new f()()`
  if matches!((parent, name), (Node::Expression(Expression::New(_)), "callee"))
    && contains_call_on_spine(node)
  {
    return true;
  }

  // a unary left operand of `**` always needs parens: `(-a) ** b`
  if let Node::Expression(Expression::Binary(binary)) = parent
    && binary.operator == BinaryOperator::Exponent
    && name == "left"
    && matches!(node, Expression::Unary(_) | Expression::Await(_))
  {
    return true;
  }

  expression_precedence(node) < required
}

/// The minimum precedence a child must have to appear bare in this slot
fn required_precedence(parent: Node, name: &'static str) -> Option<u8> {
  let required = match (parent, name) {
    (Node::Expression(Expression::Member(_)), "object") => 17,
    (Node::Expression(Expression::Call(_)), "callee") => 17,
    (Node::Expression(Expression::New(_)), "callee") => 17,
    (Node::Expression(Expression::TaggedTemplate(_)), "tag") => 17,
    (Node::Expression(Expression::Update(_)), "argument") => 16,
    (Node::Expression(Expression::Unary(_) | Expression::Await(_)), _) => 15,
    (Node::Expression(Expression::Binary(_) | Expression::Logical(_)), "left" | "right") => 6,
    (Node::Expression(Expression::Conditional(_)), "test") => 4,
    (Node::Expression(Expression::Conditional(_)), "consequent" | "alternate") => 2,
    (Node::Expression(Expression::Yield(_)), "argument") => 2,
    (Node::SpreadElement(_), "argument") => 2,
    _ => return None,
  };
  Some(required)
}

/// A loose precedence scale matching the grammar's expression tiers
fn expression_precedence(node: &Expression) -> u8 {
  match node {
    Expression::Sequence(_) => 1,
    Expression::Assignment(_) | Expression::Arrow(_) | Expression::Yield(_) => 2,
    Expression::Conditional(_) => 3,
    Expression::Logical(logical) => logical_precedence(logical.operator),
    Expression::Binary(binary) => binary_precedence(binary.operator),
    Expression::Unary(_) | Expression::Await(_) => 15,
    Expression::Update(_) => 16,
    // `new X` without arguments binds looser than member access
    Expression::New(new) if new.arguments.is_none() => 16,
    Expression::Call(_) | Expression::Member(_) | Expression::New(_) | Expression::TaggedTemplate(_) => 17,
    _ => 20,
  }
}

fn binary_precedence(operator: BinaryOperator) -> u8 {
  match operator {
    BinaryOperator::BitOr => 6,
    BinaryOperator::BitXor => 7,
    BinaryOperator::BitAnd => 8,
    BinaryOperator::Equal
    | BinaryOperator::NotEqual
    | BinaryOperator::StrictEqual
    | BinaryOperator::StrictNotEqual => 9,
    BinaryOperator::Less
    | BinaryOperator::LessEqual
    | BinaryOperator::Greater
    | BinaryOperator::GreaterEqual
    | BinaryOperator::In
    | BinaryOperator::Instanceof => 10,
    BinaryOperator::ShiftLeft | BinaryOperator::ShiftRight | BinaryOperator::ShiftRightUnsigned => 11,
    BinaryOperator::Add | BinaryOperator::Subtract => 12,
    BinaryOperator::Multiply | BinaryOperator::Divide | BinaryOperator::Remainder => 13,
    BinaryOperator::Exponent => 14,
  }
}

fn logical_precedence(operator: LogicalOperator) -> u8 {
  match operator {
    LogicalOperator::Or | LogicalOperator::Nullish => 4,
    LogicalOperator::And => 5,
  }
}

/// Does the expression's leftmost spine contain a call? Used to keep a `new`
/// from capturing the call's arguments.
fn contains_call_on_spine(node: &Expression) -> bool {
  match node {
    Expression::Call(_) => true,
    Expression::Member(member) => contains_call_on_spine(&member.object),
    Expression::TaggedTemplate(tagged) => contains_call_on_spine(&tagged.tag),
    _ => false,
  }
}

/// Is the `for` head's init slot among the ancestors, with no statement in
/// between?
fn in_for_init(path: &Path) -> bool {
  for k in 0.. {
    let Some(parent) = path.parent(k) else {
      return false;
    };
    match parent {
      Node::Statement(Statement::For(_)) => {
        return path.name_at(k) == Some("init");
      }
      Node::Statement(_) | Node::Program(_) => return false,
      _ => {}
    }
  }
  false
}

/// Would the current node provide the first token of an expression
/// statement? Walks up through leftmost edges only.
fn starts_statement(path: &Path) -> bool {
  for k in 0.. {
    let Some(parent) = path.parent(k) else {
      return false;
    };
    let Some(edge) = path.name_at(k) else {
      return false;
    };

    match parent {
      Node::Statement(Statement::Expression(_)) => return edge == "expression",
      Node::Expression(expression) => {
        let leftmost = match expression {
          Expression::Member(_) => edge == "object",
          Expression::Call(_) => edge == "callee",
          Expression::TaggedTemplate(_) => edge == "tag",
          Expression::Binary(_) | Expression::Logical(_) | Expression::Assignment(_) => {
            edge == "left"
          }
          Expression::Conditional(_) => edge == "test",
          Expression::Update(update) => !update.prefix && edge == "argument",
          Expression::Sequence(_) => edge == "first",
          _ => false,
        };
        if !leftmost {
          return false;
        }
      }
      _ => return false,
    }
  }
  false
}

fn type_needs_parens(node: &Type, path: &Path) -> bool {
  let Some(parent) = path.parent(0) else {
    return false;
  };
  let Node::Type(parent) = parent else {
    return false;
  };

  match node {
    Type::Union(_) | Type::Intersection(_) => matches!(
      parent,
      Type::Array(_) | Type::Nullable(_) | Type::Union(_) | Type::Intersection(_)
    ),
    Type::Function(_) => matches!(
      parent,
      Type::Union(_) | Type::Intersection(_) | Type::Array(_) | Type::Nullable(_)
    ),
    _ => false,
  }
}
