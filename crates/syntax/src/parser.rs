use crate::{
  ast::{Ast, Comment, CommentKind, expression::*, jsx::*, pattern::*, statement::*, types::*},
  span::Span,
  tokeniser::{LexMode, Token, TokenKind, Tokeniser},
};
use std::{error, fmt};

type Parse<T> = Result<T, ParseError>;

pub struct Parser<'source> {
  source: &'source str,
  tokeniser: Tokeniser<'source>,
  /// The current, not yet consumed token
  current: Token,

  comments: Vec<Comment>,
  /// Comments still waiting for the token which follows them
  pending_comments: Vec<usize>,
  /// The end of the last consumed significant token
  last_token_end: Option<u32>,

  /// Is the `in` operator currently disallowed (the head of a `for`)?
  no_in: bool,
}
impl<'source> Parser<'source> {
  pub fn new(source: &'source str) -> Self {
    let mut parser = Self {
      source,
      tokeniser: Tokeniser::from(source),
      current: Token {
        kind: TokenKind::EndOfFile,
        start: 0,
        end: 0,
        newline_before: false,
      },
      comments: Vec::new(),
      pending_comments: Vec::new(),
      last_token_end: None,
      no_in: false,
    };
    parser.current = parser.pull_token(LexMode::Normal);
    parser
  }

  pub fn parse(mut self) -> Ast<'source> {
    let mut ast = Ast::new(self.source);
    let mut body = Vec::new();

    while self.current.kind != TokenKind::EndOfFile {
      match self.parse_statement() {
        Ok(statement) => body.push(statement),
        Err(error) => {
          ast.errors.push(error);
          break;
        }
      }
    }

    ast.program = Program {
      body,
      span: Span::new(0, u32::try_from(self.source.len()).unwrap_or(u32::MAX)),
    };
    ast.comments = self.comments;
    ast
  }

  // ---- token plumbing ----

  fn pull_token(&mut self, mode: LexMode) -> Token {
    loop {
      let token = self.tokeniser.next_token(mode);
      if token.kind.is_comment() {
        self.record_comment(token);
      } else {
        self.resolve_pending_comments(token);
        return token;
      }
    }
  }

  fn record_comment(&mut self, token: Token) {
    let same_line_as_previous = self.last_token_end.is_some_and(|end| {
      !self.source[end as usize..token.start as usize].contains('\n')
    });

    self.pending_comments.push(self.comments.len());
    self.comments.push(Comment {
      span: token.span(),
      kind: if token.kind == TokenKind::LineComment {
        CommentKind::Line
      } else {
        CommentKind::Block
      },
      previous_token_end: self.last_token_end,
      same_line_as_previous,
      next_token_start: None,
      same_line_as_next: false,
    });
  }

  fn resolve_pending_comments(&mut self, next: Token) {
    if next.kind != TokenKind::EndOfFile {
      for &index in &self.pending_comments {
        let comment = &mut self.comments[index];
        comment.next_token_start = Some(next.start);
        comment.same_line_as_next =
          !self.source[comment.span.end as usize..next.start as usize].contains('\n');
      }
    }
    self.pending_comments.clear();
  }

  /// Consume the current token, lexing the next one under `mode`
  fn bump_with(&mut self, mode: LexMode) -> Token {
    let previous = self.current;
    if previous.kind != TokenKind::EndOfFile {
      self.last_token_end = Some(previous.end);
    }
    self.current = self.pull_token(mode);
    previous
  }

  fn bump(&mut self) -> Token {
    self.bump_with(LexMode::Normal)
  }

  fn matches(&mut self, kind: TokenKind) -> bool {
    if self.current.kind == kind {
      self.bump();
      true
    } else {
      false
    }
  }

  fn expect(&mut self, kind: TokenKind) -> Parse<Token> {
    if self.current.kind == kind {
      Ok(self.bump())
    } else {
      Err(ParseError::Expected {
        expected: kind,
        received: self.current,
      })
    }
  }

  fn token_text(&self, token: Token) -> &'source str {
    token.span().source_text(self.source)
  }

  fn is_ident(&self, token: Token, text: &str) -> bool {
    token.kind == TokenKind::Identifier && self.token_text(token) == text
  }

  /// The kind of the significant token after the current one
  fn peek_kind(&self) -> TokenKind {
    let mut tokeniser = self.tokeniser.clone();
    loop {
      let token = tokeniser.next_token(LexMode::Normal);
      if !token.kind.is_comment() {
        return token.kind;
      }
    }
  }

  /// End a statement: `;`, `}`, the end of the file, or a line break
  fn consume_statement_end(&mut self) -> Parse<u32> {
    match self.current.kind {
      TokenKind::Semicolon => Ok(self.bump().end),
      TokenKind::RightCurly | TokenKind::EndOfFile => Ok(self.previous_end()),
      _ if self.current.newline_before => Ok(self.previous_end()),
      _ => Err(ParseError::ExpectedSemicolon(self.current)),
    }
  }

  fn previous_end(&self) -> u32 {
    self.last_token_end.unwrap_or(0)
  }

  // ---- statements ----

  fn parse_statement(&mut self) -> Parse<Statement<'source>> {
    match self.current.kind {
      TokenKind::LeftCurly => Ok(Statement::Block(self.parse_block()?)),
      TokenKind::Semicolon => {
        let token = self.bump();
        Ok(Statement::Empty(EmptyStatement { span: token.span() }))
      }
      TokenKind::Var | TokenKind::Const => {
        Ok(Statement::Variable(self.parse_variable_declaration(true)?))
      }
      TokenKind::If => self.parse_if_statement(),
      TokenKind::For => self.parse_for_statement(),
      TokenKind::While => self.parse_while_statement(),
      TokenKind::Do => self.parse_do_while_statement(),
      TokenKind::Switch => self.parse_switch_statement(),
      TokenKind::Try => self.parse_try_statement(),
      TokenKind::Return => self.parse_return_statement(),
      TokenKind::Throw => self.parse_throw_statement(),
      TokenKind::Break | TokenKind::Continue => self.parse_break_continue(),
      TokenKind::Debugger => {
        let token = self.bump();
        let end = self.consume_statement_end()?;
        Ok(Statement::Debugger(DebuggerStatement {
          span: Span::new(token.start, end),
        }))
      }
      TokenKind::Function => Ok(Statement::Function(Box::new(self.parse_function(false)?))),
      TokenKind::Class => Ok(Statement::Class(Box::new(self.parse_class()?))),
      TokenKind::Import => self.parse_import_declaration(),
      TokenKind::Export => self.parse_export_declaration(),
      TokenKind::Identifier => {
        let text = self.token_text(self.current);
        let peek = self.peek_kind();

        if text == "let"
          && matches!(peek, TokenKind::Identifier | TokenKind::LeftSquare | TokenKind::LeftCurly)
        {
          Ok(Statement::Variable(self.parse_variable_declaration(true)?))
        } else if text == "async" && peek == TokenKind::Function && !self.peek_has_newline() {
          self.bump();
          Ok(Statement::Function(Box::new(self.parse_function(true)?)))
        } else if text == "type" && peek == TokenKind::Identifier {
          self.parse_type_alias()
        } else if peek == TokenKind::Colon {
          self.parse_labeled_statement()
        } else {
          self.parse_expression_statement()
        }
      }
      _ => self.parse_expression_statement(),
    }
  }

  fn peek_has_newline(&self) -> bool {
    let mut tokeniser = self.tokeniser.clone();
    loop {
      let token = tokeniser.next_token(LexMode::Normal);
      if !token.kind.is_comment() {
        return token.newline_before;
      }
    }
  }

  fn parse_expression_statement(&mut self) -> Parse<Statement<'source>> {
    let expression = self.parse_expression()?;
    let start = expression.span().start;
    let end = self.consume_statement_end()?.max(expression.span().end);

    Ok(Statement::Expression(ExpressionStatement {
      expression,
      span: Span::new(start, end),
    }))
  }

  fn parse_block(&mut self) -> Parse<BlockStatement<'source>> {
    let open = self.expect(TokenKind::LeftCurly)?;
    let mut body = Vec::new();

    while !matches!(self.current.kind, TokenKind::RightCurly | TokenKind::EndOfFile) {
      body.push(self.parse_statement()?);
    }
    let close = self.expect(TokenKind::RightCurly)?;

    Ok(BlockStatement {
      body,
      span: Span::new(open.start, close.end),
    })
  }

  fn parse_if_statement(&mut self) -> Parse<Statement<'source>> {
    let start = self.bump().start;
    self.expect(TokenKind::LeftParen)?;
    let test = self.parse_expression()?;
    self.expect(TokenKind::RightParen)?;
    let consequent = self.parse_statement()?;

    let alternate = if self.matches(TokenKind::Else) {
      Some(self.parse_statement()?)
    } else {
      None
    };

    let end = alternate
      .as_ref()
      .map_or_else(|| consequent.span().end, |alternate| alternate.span().end);

    Ok(Statement::If(Box::new(IfStatement {
      test,
      consequent,
      alternate,
      span: Span::new(start, end),
    })))
  }

  fn parse_for_statement(&mut self) -> Parse<Statement<'source>> {
    let start = self.bump().start;
    self.expect(TokenKind::LeftParen)?;

    // an empty initialiser: `for (;;)`
    if self.current.kind == TokenKind::Semicolon {
      self.bump();
      return self.parse_for_tail(start, None);
    }

    self.no_in = true;
    let is_declaration = matches!(self.current.kind, TokenKind::Var | TokenKind::Const)
      || (self.is_ident(self.current, "let")
        && matches!(
          self.peek_kind(),
          TokenKind::Identifier | TokenKind::LeftSquare | TokenKind::LeftCurly
        ));

    if is_declaration {
      let declaration = self.parse_variable_declaration(false)?;
      self.no_in = false;

      if self.current.kind == TokenKind::In {
        self.bump();
        return self.parse_for_in_of(start, ForTarget::Variable(declaration), true);
      }
      if self.is_ident(self.current, "of") {
        self.bump();
        return self.parse_for_in_of(start, ForTarget::Variable(declaration), false);
      }

      self.expect(TokenKind::Semicolon)?;
      self.parse_for_tail(start, Some(ForInit::Variable(declaration)))
    } else {
      let expression = self.parse_expression()?;
      self.no_in = false;

      if self.current.kind == TokenKind::In {
        self.bump();
        return self.parse_for_in_of(start, ForTarget::Expression(expression), true);
      }
      if self.is_ident(self.current, "of") {
        self.bump();
        return self.parse_for_in_of(start, ForTarget::Expression(expression), false);
      }

      self.expect(TokenKind::Semicolon)?;
      self.parse_for_tail(start, Some(ForInit::Expression(expression)))
    }
  }

  fn parse_for_tail(
    &mut self,
    start: u32,
    init: Option<ForInit<'source>>,
  ) -> Parse<Statement<'source>> {
    let test = if self.current.kind == TokenKind::Semicolon {
      None
    } else {
      Some(self.parse_expression()?)
    };
    self.expect(TokenKind::Semicolon)?;

    let update = if self.current.kind == TokenKind::RightParen {
      None
    } else {
      Some(self.parse_expression()?)
    };
    self.expect(TokenKind::RightParen)?;

    let body = self.parse_statement()?;
    let span = Span::new(start, body.span().end);

    Ok(Statement::For(Box::new(ForStatement { init, test, update, body, span })))
  }

  fn parse_for_in_of(
    &mut self,
    start: u32,
    left: ForTarget<'source>,
    is_in: bool,
  ) -> Parse<Statement<'source>> {
    let right = if is_in { self.parse_expression()? } else { self.parse_assignment()? };
    self.expect(TokenKind::RightParen)?;
    let body = self.parse_statement()?;
    let span = Span::new(start, body.span().end);

    if is_in {
      Ok(Statement::ForIn(Box::new(ForInStatement { left, right, body, span })))
    } else {
      Ok(Statement::ForOf(Box::new(ForOfStatement { left, right, body, span })))
    }
  }

  fn parse_while_statement(&mut self) -> Parse<Statement<'source>> {
    let start = self.bump().start;
    self.expect(TokenKind::LeftParen)?;
    let test = self.parse_expression()?;
    self.expect(TokenKind::RightParen)?;
    let body = self.parse_statement()?;
    let span = Span::new(start, body.span().end);

    Ok(Statement::While(Box::new(WhileStatement { test, body, span })))
  }

  fn parse_do_while_statement(&mut self) -> Parse<Statement<'source>> {
    let start = self.bump().start;
    let body = self.parse_statement()?;
    self.expect(TokenKind::While)?;
    self.expect(TokenKind::LeftParen)?;
    let test = self.parse_expression()?;
    let close = self.expect(TokenKind::RightParen)?;

    // the `;` of a do-while is always optional
    let end = if self.current.kind == TokenKind::Semicolon {
      self.bump().end
    } else {
      close.end
    };

    Ok(Statement::DoWhile(Box::new(DoWhileStatement {
      body,
      test,
      span: Span::new(start, end),
    })))
  }

  fn parse_switch_statement(&mut self) -> Parse<Statement<'source>> {
    let start = self.bump().start;
    self.expect(TokenKind::LeftParen)?;
    let discriminant = self.parse_expression()?;
    self.expect(TokenKind::RightParen)?;
    self.expect(TokenKind::LeftCurly)?;

    let mut cases = Vec::new();
    while matches!(self.current.kind, TokenKind::Case | TokenKind::Default) {
      let case_start = self.current.start;
      let test = if self.bump().kind == TokenKind::Case {
        Some(self.parse_expression()?)
      } else {
        None
      };
      self.expect(TokenKind::Colon)?;

      let mut consequent = Vec::new();
      while !matches!(
        self.current.kind,
        TokenKind::Case | TokenKind::Default | TokenKind::RightCurly | TokenKind::EndOfFile
      ) {
        consequent.push(self.parse_statement()?);
      }

      let case_end = consequent
        .last()
        .map_or(self.previous_end(), |statement| statement.span().end);
      cases.push(SwitchCase {
        test,
        consequent,
        span: Span::new(case_start, case_end),
      });
    }

    let close = self.expect(TokenKind::RightCurly)?;
    Ok(Statement::Switch(Box::new(SwitchStatement {
      discriminant,
      cases,
      span: Span::new(start, close.end),
    })))
  }

  fn parse_try_statement(&mut self) -> Parse<Statement<'source>> {
    let start = self.bump().start;
    let block = self.parse_block()?;

    let handler = if self.current.kind == TokenKind::Catch {
      let catch_start = self.bump().start;
      let param = if self.matches(TokenKind::LeftParen) {
        let param = self.parse_binding_element(true, false)?;
        self.expect(TokenKind::RightParen)?;
        Some(param)
      } else {
        None
      };
      let body = self.parse_block()?;
      let span = Span::new(catch_start, body.span.end);
      Some(CatchClause { param, body, span })
    } else {
      None
    };

    let finalizer = if self.matches(TokenKind::Finally) {
      Some(self.parse_block()?)
    } else {
      None
    };

    let end = finalizer.as_ref().map(|block| block.span.end).unwrap_or_else(|| {
      handler.as_ref().map_or(block.span.end, |handler| handler.span.end)
    });

    Ok(Statement::Try(Box::new(TryStatement {
      block,
      handler,
      finalizer,
      span: Span::new(start, end),
    })))
  }

  fn parse_return_statement(&mut self) -> Parse<Statement<'source>> {
    let start = self.bump().start;

    let argument = if matches!(
      self.current.kind,
      TokenKind::Semicolon | TokenKind::RightCurly | TokenKind::EndOfFile
    ) || self.current.newline_before
    {
      None
    } else {
      Some(self.parse_expression()?)
    };
    let end = self.consume_statement_end()?;

    Ok(Statement::Return(ReturnStatement {
      argument,
      span: Span::new(start, end),
    }))
  }

  fn parse_throw_statement(&mut self) -> Parse<Statement<'source>> {
    let start = self.bump().start;
    if self.current.newline_before {
      return Err(ParseError::ExpectedExpression(self.current));
    }
    let argument = self.parse_expression()?;
    let end = self.consume_statement_end()?;

    Ok(Statement::Throw(ThrowStatement {
      argument,
      span: Span::new(start, end),
    }))
  }

  fn parse_break_continue(&mut self) -> Parse<Statement<'source>> {
    let token = self.bump();

    let label = if self.current.kind == TokenKind::Identifier && !self.current.newline_before {
      let name = self.bump();
      Some(Identifier {
        name: self.token_text(name),
        span: name.span(),
      })
    } else {
      None
    };
    let end = self.consume_statement_end()?;
    let span = Span::new(token.start, end);

    if token.kind == TokenKind::Break {
      Ok(Statement::Break(BreakStatement { label, span }))
    } else {
      Ok(Statement::Continue(ContinueStatement { label, span }))
    }
  }

  fn parse_labeled_statement(&mut self) -> Parse<Statement<'source>> {
    let name = self.bump();
    let label = Identifier {
      name: self.token_text(name),
      span: name.span(),
    };
    self.expect(TokenKind::Colon)?;
    let body = self.parse_statement()?;
    let span = Span::new(name.start, body.span().end);

    Ok(Statement::Labeled(Box::new(LabeledStatement { label, body, span })))
  }

  fn parse_type_alias(&mut self) -> Parse<Statement<'source>> {
    let start = self.bump().start;
    let name_token = self.expect(TokenKind::Identifier)?;
    let name = Identifier {
      name: self.token_text(name_token),
      span: name_token.span(),
    };
    self.expect(TokenKind::Equal)?;
    let right = self.parse_type()?;
    let end = self.consume_statement_end()?.max(right.span().end);

    Ok(Statement::TypeAlias(Box::new(TypeAlias {
      name,
      right,
      span: Span::new(start, end),
    })))
  }

  fn parse_variable_declaration(&mut self, consume_end: bool) -> Parse<VariableDeclaration<'source>> {
    let keyword = self.bump();
    let kind = match keyword.kind {
      TokenKind::Var => VariableKind::Var,
      TokenKind::Const => VariableKind::Const,
      _ => VariableKind::Let,
    };

    let mut declarations = Vec::new();
    loop {
      declarations.push(self.parse_variable_declarator()?);
      if !self.matches(TokenKind::Comma) {
        break;
      }
    }

    let mut end = declarations.last().map_or(keyword.end, |declarator| declarator.span.end);
    if consume_end {
      end = self.consume_statement_end()?.max(end);
    }

    Ok(VariableDeclaration {
      kind,
      declarations,
      span: Span::new(keyword.start, end),
    })
  }

  fn parse_variable_declarator(&mut self) -> Parse<VariableDeclarator<'source>> {
    let id = self.parse_binding_element(true, false)?;

    let init = if self.matches(TokenKind::Equal) {
      Some(self.parse_assignment()?)
    } else {
      None
    };

    let start = id.span().start;
    let end = init.as_ref().map_or(id.span().end, |init| init.span().end);

    Ok(VariableDeclarator {
      id,
      init,
      span: Span::new(start, end),
    })
  }

  // ---- functions and classes ----

  fn parse_function(&mut self, is_async: bool) -> Parse<Function<'source>> {
    let keyword = self.expect(TokenKind::Function)?;
    let is_generator = self.matches(TokenKind::Star);

    let name = if self.current.kind == TokenKind::Identifier {
      let token = self.bump();
      Some(Identifier {
        name: self.token_text(token),
        span: token.span(),
      })
    } else {
      None
    };

    let params = self.parse_params()?;
    let return_type = if self.matches(TokenKind::Colon) {
      Some(self.parse_type()?)
    } else {
      None
    };
    let body = self.parse_block()?;
    let span = Span::new(keyword.start, body.span.end);

    Ok(Function {
      name,
      params,
      return_type,
      body,
      is_async,
      is_generator,
      span,
    })
  }

  fn parse_params(&mut self) -> Parse<Vec<Pattern<'source>>> {
    self.expect(TokenKind::LeftParen)?;
    let mut params = Vec::new();

    while self.current.kind != TokenKind::RightParen {
      params.push(self.parse_binding_element(true, true)?);
      if !self.matches(TokenKind::Comma) {
        break;
      }
    }
    self.expect(TokenKind::RightParen)?;

    Ok(params)
  }

  fn parse_class(&mut self) -> Parse<Class<'source>> {
    let keyword = self.expect(TokenKind::Class)?;

    let name = if self.current.kind == TokenKind::Identifier {
      let token = self.bump();
      Some(Identifier {
        name: self.token_text(token),
        span: token.span(),
      })
    } else {
      None
    };

    let super_class = if self.matches(TokenKind::Extends) {
      let primary = self.parse_primary()?;
      Some(self.parse_postfix(primary, true)?)
    } else {
      None
    };

    self.expect(TokenKind::LeftCurly)?;
    let mut body = Vec::new();
    while !matches!(self.current.kind, TokenKind::RightCurly | TokenKind::EndOfFile) {
      if self.matches(TokenKind::Semicolon) {
        continue;
      }
      body.push(self.parse_class_method()?);
    }
    let close = self.expect(TokenKind::RightCurly)?;

    Ok(Class {
      name,
      super_class,
      body,
      span: Span::new(keyword.start, close.end),
    })
  }

  fn parse_class_method(&mut self) -> Parse<ClassMethod<'source>> {
    let start = self.current.start;

    let is_static = self.is_ident(self.current, "static")
      && !matches!(self.peek_kind(), TokenKind::LeftParen | TokenKind::Equal);
    if is_static {
      self.bump();
    }

    let is_async = self.is_ident(self.current, "async")
      && !matches!(self.peek_kind(), TokenKind::LeftParen | TokenKind::Equal)
      && !self.peek_has_newline();
    if is_async {
      self.bump();
    }

    let is_generator = self.matches(TokenKind::Star);

    let accessor = if !is_async
      && !is_generator
      && (self.is_ident(self.current, "get") || self.is_ident(self.current, "set"))
      && self.peek_kind() != TokenKind::LeftParen
    {
      let token = self.bump();
      if self.token_text(token) == "get" { Some(MethodKind::Get) } else { Some(MethodKind::Set) }
    } else {
      None
    };

    let key = self.parse_property_key()?;
    let kind = accessor.unwrap_or({
      if !is_static && matches!(&key, PropertyKey::Identifier(name) if name.name == "constructor") {
        MethodKind::Constructor
      } else {
        MethodKind::Method
      }
    });

    let function = self.parse_method_function(is_async, is_generator)?;
    let span = Span::new(start, function.span.end);

    Ok(ClassMethod {
      key,
      kind,
      function,
      is_static,
      span,
    })
  }

  fn parse_method_function(&mut self, is_async: bool, is_generator: bool) -> Parse<Function<'source>> {
    let start = self.current.start;
    let params = self.parse_params()?;
    let return_type = if self.matches(TokenKind::Colon) {
      Some(self.parse_type()?)
    } else {
      None
    };
    let body = self.parse_block()?;

    Ok(Function {
      name: None,
      params,
      return_type,
      is_async,
      is_generator,
      span: Span::new(start, body.span.end),
      body,
    })
  }

  // ---- modules ----

  fn parse_import_declaration(&mut self) -> Parse<Statement<'source>> {
    let start = self.bump().start;

    // a side-effect only import: `import './module'`
    if self.current.kind == TokenKind::String {
      let source = self.parse_string_literal()?;
      let end = self.consume_statement_end()?.max(source.span.end);
      return Ok(Statement::Import(ImportDeclaration {
        specifiers: Vec::new(),
        source,
        span: Span::new(start, end),
      }));
    }

    let mut specifiers = Vec::new();

    if self.current.kind == TokenKind::Identifier && !self.is_ident(self.current, "from") {
      let token = self.bump();
      specifiers.push(ImportSpecifier::Default(Identifier {
        name: self.token_text(token),
        span: token.span(),
      }));
      if self.current.kind != TokenKind::Comma && !self.is_ident(self.current, "from") {
        return Err(ParseError::Expected {
          expected: TokenKind::Comma,
          received: self.current,
        });
      }
      self.matches(TokenKind::Comma);
    }

    if self.current.kind == TokenKind::Star {
      self.bump();
      self.expect_contextual("as")?;
      let token = self.expect(TokenKind::Identifier)?;
      specifiers.push(ImportSpecifier::Namespace(Identifier {
        name: self.token_text(token),
        span: token.span(),
      }));
    } else if self.current.kind == TokenKind::LeftCurly {
      self.bump();
      while self.current.kind != TokenKind::RightCurly {
        let imported = self.parse_module_name()?;
        let local = if self.is_ident(self.current, "as") {
          self.bump();
          let token = self.expect(TokenKind::Identifier)?;
          Some(Identifier {
            name: self.token_text(token),
            span: token.span(),
          })
        } else {
          None
        };
        specifiers.push(ImportSpecifier::Named { imported, local });
        if !self.matches(TokenKind::Comma) {
          break;
        }
      }
      self.expect(TokenKind::RightCurly)?;
    }

    self.expect_contextual("from")?;
    let source = self.parse_string_literal()?;
    let end = self.consume_statement_end()?.max(source.span.end);

    Ok(Statement::Import(ImportDeclaration {
      specifiers,
      source,
      span: Span::new(start, end),
    }))
  }

  fn parse_export_declaration(&mut self) -> Parse<Statement<'source>> {
    let start = self.bump().start;

    match self.current.kind {
      TokenKind::Star => {
        self.bump();
        self.expect_contextual("from")?;
        let source = self.parse_string_literal()?;
        let end = self.consume_statement_end()?.max(source.span.end);
        Ok(Statement::ExportAll(ExportAllDeclaration {
          source,
          span: Span::new(start, end),
        }))
      }
      TokenKind::Default => {
        self.bump();
        let (declaration, end) = match self.current.kind {
          TokenKind::Function => {
            let function = self.parse_function(false)?;
            let end = function.span.end;
            (ExportDefaultKind::Function(function), end)
          }
          TokenKind::Class => {
            let class = self.parse_class()?;
            let end = class.span.end;
            (ExportDefaultKind::Class(class), end)
          }
          TokenKind::Identifier
            if self.is_ident(self.current, "async") && self.peek_kind() == TokenKind::Function =>
          {
            self.bump();
            let function = self.parse_function(true)?;
            let end = function.span.end;
            (ExportDefaultKind::Function(function), end)
          }
          _ => {
            let expression = self.parse_assignment()?;
            let end = self.consume_statement_end()?.max(expression.span().end);
            (ExportDefaultKind::Expression(expression), end)
          }
        };
        Ok(Statement::ExportDefault(Box::new(ExportDefaultDeclaration {
          declaration,
          span: Span::new(start, end),
        })))
      }
      TokenKind::LeftCurly => {
        self.bump();
        let mut specifiers = Vec::new();
        while self.current.kind != TokenKind::RightCurly {
          let local = self.parse_module_name()?;
          let exported = if self.is_ident(self.current, "as") {
            self.bump();
            let name = self.parse_module_name()?;
            Some(name)
          } else {
            None
          };
          specifiers.push(ExportSpecifier { local, exported });
          if !self.matches(TokenKind::Comma) {
            break;
          }
        }
        self.expect(TokenKind::RightCurly)?;

        let source = if self.is_ident(self.current, "from") {
          self.bump();
          Some(self.parse_string_literal()?)
        } else {
          None
        };
        let end = self.consume_statement_end()?;

        Ok(Statement::ExportNamed(Box::new(ExportNamedDeclaration {
          declaration: None,
          specifiers,
          source,
          span: Span::new(start, end),
        })))
      }
      _ => {
        let declaration = self.parse_statement()?;
        let span = Span::new(start, declaration.span().end);
        Ok(Statement::ExportNamed(Box::new(ExportNamedDeclaration {
          declaration: Some(declaration),
          specifiers: Vec::new(),
          source: None,
          span,
        })))
      }
    }
  }

  /// A name in an import/export list: identifiers and keywords both allowed
  fn parse_module_name(&mut self) -> Parse<Identifier<'source>> {
    if self.current.kind == TokenKind::Identifier || self.current.kind.is_keyword() {
      let token = self.bump();
      Ok(Identifier {
        name: self.token_text(token),
        span: token.span(),
      })
    } else {
      Err(ParseError::Expected {
        expected: TokenKind::Identifier,
        received: self.current,
      })
    }
  }

  fn expect_contextual(&mut self, text: &str) -> Parse<Token> {
    if self.is_ident(self.current, text) {
      Ok(self.bump())
    } else {
      Err(ParseError::Expected {
        expected: TokenKind::Identifier,
        received: self.current,
      })
    }
  }

  fn parse_string_literal(&mut self) -> Parse<StringLiteral<'source>> {
    let token = self.expect(TokenKind::String)?;
    let raw = self.token_text(token);
    Ok(StringLiteral {
      value: cook_string(&raw[1..raw.len() - 1]),
      raw,
      span: token.span(),
    })
  }

  // ---- patterns ----

  fn parse_binding_element(&mut self, allow_type: bool, allow_default: bool) -> Parse<Pattern<'source>> {
    let mut pattern = self.parse_binding_target()?;

    if allow_type && self.current.kind == TokenKind::Colon {
      self.bump();
      let annotation = self.parse_type()?;
      attach_type(&mut pattern, annotation);
    }

    if allow_default && self.matches(TokenKind::Equal) {
      let right = self.parse_assignment()?;
      let span = Span::new(pattern.span().start, right.span().end);
      pattern = Pattern::Assignment(Box::new(AssignmentPattern {
        left: pattern,
        right,
        span,
      }));
    }

    Ok(pattern)
  }

  fn parse_binding_target(&mut self) -> Parse<Pattern<'source>> {
    match self.current.kind {
      TokenKind::Identifier => {
        let token = self.bump();
        Ok(Pattern::Identifier(BindingIdentifier {
          name: self.token_text(token),
          type_annotation: None,
          span: token.span(),
        }))
      }
      TokenKind::LeftCurly => self.parse_object_pattern(),
      TokenKind::LeftSquare => self.parse_array_pattern(),
      TokenKind::DotDotDot => {
        let dots = self.bump();
        let argument = self.parse_binding_element(true, false)?;
        let span = Span::new(dots.start, argument.span().end);
        Ok(Pattern::Rest(Box::new(RestElement { argument, span })))
      }
      _ => Err(ParseError::ExpectedPattern(self.current)),
    }
  }

  fn parse_object_pattern(&mut self) -> Parse<Pattern<'source>> {
    let open = self.bump();
    let mut properties = Vec::new();

    while self.current.kind != TokenKind::RightCurly {
      if self.current.kind == TokenKind::DotDotDot {
        let dots = self.bump();
        let argument = self.parse_binding_target()?;
        let span = Span::new(dots.start, argument.span().end);
        properties.push(ObjectPatternProperty::Rest(RestElement { argument, span }));
      } else {
        let key = self.parse_property_key()?;
        let key_span = key.span();

        let (value, shorthand) = if self.matches(TokenKind::Colon) {
          (self.parse_binding_element(false, true)?, false)
        } else if self.current.kind == TokenKind::Equal {
          (self.shorthand_pattern_with_default(&key)?, true)
        } else {
          (shorthand_pattern(&key)?, true)
        };

        let span = Span::new(key_span.start, value.span().end);
        properties.push(ObjectPatternProperty::Property { key, value, shorthand, span });
      }

      if !self.matches(TokenKind::Comma) {
        break;
      }
    }
    let close = self.expect(TokenKind::RightCurly)?;

    Ok(Pattern::Object(ObjectPattern {
      properties,
      type_annotation: None,
      span: Span::new(open.start, close.end),
    }))
  }

  fn shorthand_pattern_with_default(&mut self, key: &PropertyKey<'source>) -> Parse<Pattern<'source>> {
    let left = shorthand_pattern(key)?;
    self.expect(TokenKind::Equal)?;
    let right = self.parse_assignment()?;
    let span = Span::new(left.span().start, right.span().end);
    Ok(Pattern::Assignment(Box::new(AssignmentPattern { left, right, span })))
  }

  fn parse_array_pattern(&mut self) -> Parse<Pattern<'source>> {
    let open = self.bump();
    let mut elements = Vec::new();

    loop {
      match self.current.kind {
        TokenKind::RightSquare => break,
        TokenKind::Comma => {
          self.bump();
          elements.push(None);
        }
        _ => {
          elements.push(Some(self.parse_binding_element(false, true)?));
          if !self.matches(TokenKind::Comma) {
            break;
          }
        }
      }
    }
    let close = self.expect(TokenKind::RightSquare)?;

    Ok(Pattern::Array(ArrayPattern {
      elements,
      type_annotation: None,
      span: Span::new(open.start, close.end),
    }))
  }

  fn parse_property_key(&mut self) -> Parse<PropertyKey<'source>> {
    match self.current.kind {
      TokenKind::String => Ok(PropertyKey::String(self.parse_string_literal()?)),
      TokenKind::Number => {
        let token = self.bump();
        let raw = self.token_text(token);
        Ok(PropertyKey::Number(NumberLiteral {
          value: number_value(raw),
          raw,
          span: token.span(),
        }))
      }
      TokenKind::LeftSquare => {
        self.bump();
        let expression = self.parse_assignment()?;
        self.expect(TokenKind::RightSquare)?;
        Ok(PropertyKey::Computed(Box::new(expression)))
      }
      kind if kind == TokenKind::Identifier || kind.is_keyword() => {
        let token = self.bump();
        Ok(PropertyKey::Identifier(Identifier {
          name: self.token_text(token),
          span: token.span(),
        }))
      }
      _ => Err(ParseError::ExpectedPropertyName(self.current)),
    }
  }

  // ---- expressions ----

  fn parse_expression(&mut self) -> Parse<Expression<'source>> {
    let first = self.parse_assignment()?;
    if self.current.kind != TokenKind::Comma {
      return Ok(first);
    }

    let mut expressions = vec![first];
    while self.matches(TokenKind::Comma) {
      expressions.push(self.parse_assignment()?);
    }

    let span = Span::new(
      expressions.first().map_or(0, |expression| expression.span().start),
      expressions.last().map_or(0, |expression| expression.span().end),
    );
    Ok(Expression::Sequence(SequenceExpression { expressions, span }))
  }

  fn parse_assignment(&mut self) -> Parse<Expression<'source>> {
    if self.is_ident(self.current, "yield") && !keyword_is_plain_reference(self.peek_kind()) {
      return self.parse_yield();
    }

    // arrow functions need to be recognised before their parameters are
    // parsed as a parenthesized expression
    if self.current.kind == TokenKind::Identifier && self.peek_kind() == TokenKind::Arrow {
      let start = self.current.start;
      return self.parse_arrow_function(false, start);
    }
    if self.is_ident(self.current, "async") && !self.peek_has_newline() && self.scan_async_arrow() {
      let start = self.bump().start;
      return self.parse_arrow_function(true, start);
    }
    if self.current.kind == TokenKind::LeftParen && self.scan_arrow_after_parens() {
      let start = self.current.start;
      return self.parse_arrow_function(false, start);
    }

    let left = self.parse_conditional()?;

    if let Some(operator) = assignment_operator(self.current.kind) {
      self.bump();
      let right = self.parse_assignment()?;
      let span = Span::new(left.span().start, right.span().end);
      return Ok(Expression::Assignment(Box::new(AssignmentExpression {
        left,
        operator,
        right,
        span,
      })));
    }

    Ok(left)
  }

  fn parse_yield(&mut self) -> Parse<Expression<'source>> {
    let keyword = self.bump();

    let delegate = self.current.kind == TokenKind::Star && !self.current.newline_before;
    if delegate {
      self.bump();
    }

    let argument = if !self.current.newline_before
      && (delegate || can_start_expression(self.current.kind))
    {
      Some(self.parse_assignment()?)
    } else {
      None
    };

    let end = argument.as_ref().map_or(keyword.end, |argument| argument.span().end);
    Ok(Expression::Yield(Box::new(YieldExpression {
      argument,
      delegate,
      span: Span::new(keyword.start, end),
    })))
  }

  fn parse_conditional(&mut self) -> Parse<Expression<'source>> {
    let test = self.parse_binary(0)?;

    if self.current.kind != TokenKind::Question {
      return Ok(test);
    }
    self.bump();

    let consequent = self.parse_assignment()?;
    self.expect(TokenKind::Colon)?;
    let alternate = self.parse_assignment()?;
    let span = Span::new(test.span().start, alternate.span().end);

    Ok(Expression::Conditional(Box::new(ConditionalExpression {
      test,
      consequent,
      alternate,
      span,
    })))
  }

  fn parse_binary(&mut self, min_precedence: u8) -> Parse<Expression<'source>> {
    let mut left = self.parse_unary()?;

    loop {
      let kind = self.current.kind;
      if kind == TokenKind::In && self.no_in {
        break;
      }
      let Some(precedence) = binary_precedence(kind) else {
        break;
      };
      if precedence < min_precedence {
        break;
      }

      self.bump();
      // `**` is right associative
      let next_min = if kind == TokenKind::StarStar { precedence } else { precedence + 1 };
      let right = self.parse_binary(next_min)?;
      let span = Span::new(left.span().start, right.span().end);

      left = if let Some(operator) = logical_operator(kind) {
        Expression::Logical(Box::new(LogicalExpression { left, operator, right, span }))
      } else {
        let operator = binary_operator(kind);
        Expression::Binary(Box::new(BinaryExpression { left, operator, right, span }))
      };
    }

    Ok(left)
  }

  fn parse_unary(&mut self) -> Parse<Expression<'source>> {
    let operator = match self.current.kind {
      TokenKind::Bang => Some(UnaryOperator::Bang),
      TokenKind::Tilde => Some(UnaryOperator::Tilde),
      TokenKind::Plus => Some(UnaryOperator::Plus),
      TokenKind::Minus => Some(UnaryOperator::Minus),
      TokenKind::Typeof => Some(UnaryOperator::Typeof),
      TokenKind::Void => Some(UnaryOperator::Void),
      TokenKind::Delete => Some(UnaryOperator::Delete),
      _ => None,
    };
    if let Some(operator) = operator {
      let token = self.bump();
      let argument = self.parse_unary()?;
      let span = Span::new(token.start, argument.span().end);
      return Ok(Expression::Unary(Box::new(UnaryExpression { operator, argument, span })));
    }

    if matches!(self.current.kind, TokenKind::PlusPlus | TokenKind::MinusMinus) {
      let token = self.bump();
      let operator = if token.kind == TokenKind::PlusPlus {
        UpdateOperator::Increment
      } else {
        UpdateOperator::Decrement
      };
      let argument = self.parse_unary()?;
      let span = Span::new(token.start, argument.span().end);
      return Ok(Expression::Update(Box::new(UpdateExpression {
        operator,
        prefix: true,
        argument,
        span,
      })));
    }

    if self.is_ident(self.current, "await") && can_start_expression(self.peek_kind()) {
      let token = self.bump();
      let argument = self.parse_unary()?;
      let span = Span::new(token.start, argument.span().end);
      return Ok(Expression::Await(Box::new(AwaitExpression { argument, span })));
    }

    let primary = self.parse_primary()?;
    self.parse_postfix(primary, true)
  }

  fn parse_postfix(&mut self, mut expression: Expression<'source>, allow_call: bool) -> Parse<Expression<'source>> {
    loop {
      match self.current.kind {
        TokenKind::Dot => {
          self.bump();
          let name = self.parse_property_name()?;
          let span = Span::new(expression.span().start, name.span.end);
          expression = Expression::Member(Box::new(MemberExpression {
            object: expression,
            property: MemberProperty::Dot(name),
            span,
          }));
        }
        TokenKind::LeftSquare => {
          self.bump();
          let property = self.parse_expression()?;
          let close = self.expect(TokenKind::RightSquare)?;
          let span = Span::new(expression.span().start, close.end);
          expression = Expression::Member(Box::new(MemberExpression {
            object: expression,
            property: MemberProperty::Computed(Box::new(property)),
            span,
          }));
        }
        TokenKind::LeftParen if allow_call => {
          let (arguments, end) = self.parse_arguments()?;
          let span = Span::new(expression.span().start, end);
          expression = Expression::Call(Box::new(CallExpression {
            callee: expression,
            arguments,
            span,
          }));
        }
        TokenKind::Template | TokenKind::TemplateHead => {
          let quasi = self.parse_template()?;
          let span = Span::new(expression.span().start, quasi.span.end);
          expression = Expression::TaggedTemplate(Box::new(TaggedTemplate {
            tag: expression,
            quasi,
            span,
          }));
        }
        TokenKind::PlusPlus | TokenKind::MinusMinus if !self.current.newline_before => {
          let token = self.bump();
          let operator = if token.kind == TokenKind::PlusPlus {
            UpdateOperator::Increment
          } else {
            UpdateOperator::Decrement
          };
          let span = Span::new(expression.span().start, token.end);
          expression = Expression::Update(Box::new(UpdateExpression {
            operator,
            prefix: false,
            argument: expression,
            span,
          }));
        }
        _ => break,
      }
    }

    Ok(expression)
  }

  /// A property name after `.`: identifiers and keywords both allowed
  fn parse_property_name(&mut self) -> Parse<Identifier<'source>> {
    if self.current.kind == TokenKind::Identifier || self.current.kind.is_keyword() {
      let token = self.bump();
      Ok(Identifier {
        name: self.token_text(token),
        span: token.span(),
      })
    } else {
      Err(ParseError::ExpectedPropertyName(self.current))
    }
  }

  fn parse_arguments(&mut self) -> Parse<(Vec<Argument<'source>>, u32)> {
    self.expect(TokenKind::LeftParen)?;
    let mut arguments = Vec::new();

    while self.current.kind != TokenKind::RightParen {
      if self.current.kind == TokenKind::DotDotDot {
        let dots = self.bump();
        let argument = self.parse_assignment()?;
        let span = Span::new(dots.start, argument.span().end);
        arguments.push(Argument::Spread(SpreadElement { argument, span }));
      } else {
        arguments.push(Argument::Expression(self.parse_assignment()?));
      }
      if !self.matches(TokenKind::Comma) {
        break;
      }
    }
    let close = self.expect(TokenKind::RightParen)?;

    Ok((arguments, close.end))
  }

  fn parse_primary(&mut self) -> Parse<Expression<'source>> {
    match self.current.kind {
      TokenKind::Number => {
        let token = self.bump();
        let raw = self.token_text(token);
        Ok(Expression::Number(NumberLiteral {
          value: number_value(raw),
          raw,
          span: token.span(),
        }))
      }
      TokenKind::String => Ok(Expression::String(self.parse_string_literal()?)),
      TokenKind::Regex => {
        let token = self.bump();
        Ok(Expression::Regex(RegexLiteral {
          raw: self.token_text(token),
          span: token.span(),
        }))
      }
      TokenKind::True | TokenKind::False => {
        let token = self.bump();
        Ok(Expression::Boolean(BooleanLiteral {
          value: token.kind == TokenKind::True,
          span: token.span(),
        }))
      }
      TokenKind::Null => {
        let token = self.bump();
        Ok(Expression::Null(NullLiteral { span: token.span() }))
      }
      TokenKind::This => {
        let token = self.bump();
        Ok(Expression::This(ThisExpression { span: token.span() }))
      }
      TokenKind::Super => {
        let token = self.bump();
        Ok(Expression::Super(SuperExpression { span: token.span() }))
      }
      TokenKind::Identifier => {
        if self.is_ident(self.current, "async") && self.peek_kind() == TokenKind::Function {
          self.bump();
          return Ok(Expression::Function(Box::new(self.parse_function(true)?)));
        }
        let token = self.bump();
        Ok(Expression::Identifier(Identifier {
          name: self.token_text(token),
          span: token.span(),
        }))
      }
      TokenKind::LeftParen => {
        self.bump();
        let no_in = std::mem::replace(&mut self.no_in, false);
        let expression = self.parse_expression()?;
        self.no_in = no_in;
        self.expect(TokenKind::RightParen)?;
        // the grouping is discarded: the printer re-derives parentheses
        Ok(expression)
      }
      TokenKind::LeftSquare => self.parse_array_literal(),
      TokenKind::LeftCurly => self.parse_object_literal(),
      TokenKind::Function => Ok(Expression::Function(Box::new(self.parse_function(false)?))),
      TokenKind::Class => Ok(Expression::Class(Box::new(self.parse_class()?))),
      TokenKind::New => self.parse_new_expression(),
      TokenKind::Template | TokenKind::TemplateHead => {
        Ok(Expression::Template(self.parse_template()?))
      }
      TokenKind::Less => {
        let less = self.bump_with(LexMode::JsxTag);
        Ok(Expression::Jsx(Box::new(
          self.parse_jsx_element_after_less(less.start, LexMode::Normal)?,
        )))
      }
      TokenKind::Slash | TokenKind::SlashEqual => {
        // a slash where an expression must start is a mis-lexed regex
        let newline_before = self.current.newline_before;
        let relexed = self.tokeniser.relex_regex(self.current.start);
        self.current = Token { newline_before, ..relexed };
        if self.current.kind == TokenKind::UnterminatedRegex {
          return Err(ParseError::UnterminatedRegex(self.current));
        }
        let token = self.bump();
        Ok(Expression::Regex(RegexLiteral {
          raw: self.token_text(token),
          span: token.span(),
        }))
      }
      TokenKind::UnterminatedString => Err(ParseError::UnterminatedString(self.current)),
      TokenKind::UnterminatedTemplate => Err(ParseError::UnterminatedTemplate(self.current)),
      TokenKind::UnterminatedRegex => Err(ParseError::UnterminatedRegex(self.current)),
      TokenKind::UnterminatedComment => Err(ParseError::UnterminatedComment(self.current)),
      TokenKind::Unknown => Err(ParseError::UnknownCharacter(self.current)),
      _ => Err(ParseError::ExpectedExpression(self.current)),
    }
  }

  fn parse_new_expression(&mut self) -> Parse<Expression<'source>> {
    let keyword = self.bump();

    let primary = self.parse_primary()?;
    let callee = self.parse_postfix(primary, false)?;

    let (arguments, end) = if self.current.kind == TokenKind::LeftParen {
      let (arguments, end) = self.parse_arguments()?;
      (Some(arguments), end)
    } else {
      (None, callee.span().end)
    };

    Ok(Expression::New(Box::new(NewExpression {
      callee,
      arguments,
      span: Span::new(keyword.start, end),
    })))
  }

  fn parse_array_literal(&mut self) -> Parse<Expression<'source>> {
    let open = self.bump();
    let mut elements = Vec::new();

    loop {
      match self.current.kind {
        TokenKind::RightSquare => break,
        TokenKind::Comma => {
          self.bump();
          elements.push(ArrayElement::Hole);
        }
        TokenKind::DotDotDot => {
          let dots = self.bump();
          let argument = self.parse_assignment()?;
          let span = Span::new(dots.start, argument.span().end);
          elements.push(ArrayElement::Spread(SpreadElement { argument, span }));
          if !self.matches(TokenKind::Comma) {
            break;
          }
        }
        _ => {
          elements.push(ArrayElement::Expression(self.parse_assignment()?));
          if !self.matches(TokenKind::Comma) {
            break;
          }
        }
      }
    }
    let close = self.expect(TokenKind::RightSquare)?;

    Ok(Expression::Array(ArrayExpression {
      elements,
      span: Span::new(open.start, close.end),
    }))
  }

  fn parse_object_literal(&mut self) -> Parse<Expression<'source>> {
    let open = self.bump();
    let mut properties = Vec::new();

    while self.current.kind != TokenKind::RightCurly {
      if self.current.kind == TokenKind::DotDotDot {
        let dots = self.bump();
        let argument = self.parse_assignment()?;
        let span = Span::new(dots.start, argument.span().end);
        properties.push(ObjectProperty::Spread(SpreadElement { argument, span }));
      } else {
        properties.push(ObjectProperty::Property(self.parse_object_property()?));
      }
      if !self.matches(TokenKind::Comma) {
        break;
      }
    }
    let close = self.expect(TokenKind::RightCurly)?;

    Ok(Expression::Object(ObjectExpression {
      properties,
      span: Span::new(open.start, close.end),
    }))
  }

  fn parse_object_property(&mut self) -> Parse<Property<'source>> {
    let start = self.current.start;

    let key_follows = |kind: TokenKind| {
      !matches!(
        kind,
        TokenKind::Colon | TokenKind::Comma | TokenKind::RightCurly | TokenKind::LeftParen | TokenKind::Equal
      )
    };

    // accessors: `get key() {}` / `set key(value) {}`
    if (self.is_ident(self.current, "get") || self.is_ident(self.current, "set"))
      && key_follows(self.peek_kind())
    {
      let token = self.bump();
      let kind = if self.token_text(token) == "get" { PropertyKind::Get } else { PropertyKind::Set };
      let key = self.parse_property_key()?;
      let function = self.parse_method_function(false, false)?;
      let span = Span::new(start, function.span.end);
      return Ok(Property {
        key,
        value: Expression::Function(Box::new(function)),
        kind,
        shorthand: false,
        span,
      });
    }

    // `async method() {}` and `*generator() {}`
    let is_async = self.is_ident(self.current, "async") && key_follows(self.peek_kind());
    if is_async {
      self.bump();
    }
    let is_generator = self.matches(TokenKind::Star);

    let key = self.parse_property_key()?;
    let key_span = key.span();

    if is_async || is_generator || self.current.kind == TokenKind::LeftParen {
      let function = self.parse_method_function(is_async, is_generator)?;
      let span = Span::new(start, function.span.end);
      return Ok(Property {
        key,
        value: Expression::Function(Box::new(function)),
        kind: PropertyKind::Method,
        shorthand: false,
        span,
      });
    }

    if self.matches(TokenKind::Colon) {
      let value = self.parse_assignment()?;
      let span = Span::new(start, value.span().end);
      return Ok(Property {
        key,
        value,
        kind: PropertyKind::Init,
        shorthand: false,
        span,
      });
    }

    // shorthand, possibly with a cover-grammar default: `{ a }` / `{ a = 1 }`
    let PropertyKey::Identifier(name) = &key else {
      return Err(ParseError::Expected {
        expected: TokenKind::Colon,
        received: self.current,
      });
    };
    let reference = Expression::Identifier(*name);

    let value = if self.matches(TokenKind::Equal) {
      let right = self.parse_assignment()?;
      let span = Span::new(key_span.start, right.span().end);
      Expression::Assignment(Box::new(AssignmentExpression {
        left: reference,
        operator: AssignmentOperator::Assign,
        right,
        span,
      }))
    } else {
      reference
    };

    let span = Span::new(start, value.span().end);
    Ok(Property {
      key,
      value,
      kind: PropertyKind::Init,
      shorthand: true,
      span,
    })
  }

  fn parse_template(&mut self) -> Parse<TemplateLiteral<'source>> {
    let mut quasis = Vec::new();
    let mut expressions = Vec::new();

    let head = self.bump();
    let start = head.start;

    match head.kind {
      TokenKind::Template => {
        quasis.push(self.template_quasi(head, 1, 1));
        return Ok(TemplateLiteral {
          quasis,
          expressions,
          span: head.span(),
        });
      }
      TokenKind::TemplateHead => quasis.push(self.template_quasi(head, 1, 2)),
      _ => return Err(ParseError::ExpectedExpression(head)),
    }

    loop {
      expressions.push(self.parse_expression()?);

      match self.current.kind {
        TokenKind::TemplateMiddle => {
          let token = self.bump();
          quasis.push(self.template_quasi(token, 1, 2));
        }
        TokenKind::TemplateTail => {
          let token = self.bump();
          quasis.push(self.template_quasi(token, 1, 1));
          return Ok(TemplateLiteral {
            quasis,
            expressions,
            span: Span::new(start, token.end),
          });
        }
        TokenKind::UnterminatedTemplate => {
          return Err(ParseError::UnterminatedTemplate(self.current));
        }
        _ => {
          return Err(ParseError::Expected {
            expected: TokenKind::TemplateTail,
            received: self.current,
          });
        }
      }
    }
  }

  fn template_quasi(&self, token: Token, leading: u32, trailing: u32) -> TemplateQuasi<'source> {
    let span = Span::new(token.start + leading, token.end - trailing);
    TemplateQuasi {
      raw: span.source_text(self.source),
      span,
    }
  }

  // ---- arrow functions ----

  /// After a `(`, does a `=>` (or `: Type =>`) follow the matching `)`?
  fn scan_arrow_after_parens(&self) -> bool {
    let mut tokeniser = self.tokeniser.clone();
    scan_arrow(&mut tokeniser)
  }

  /// Is `async` the start of an arrow function?
  fn scan_async_arrow(&self) -> bool {
    let mut tokeniser = self.tokeniser.clone();
    let first = next_significant(&mut tokeniser);

    match first.kind {
      TokenKind::Identifier => next_significant(&mut tokeniser).kind == TokenKind::Arrow,
      TokenKind::LeftParen => scan_arrow(&mut tokeniser),
      _ => false,
    }
  }

  fn parse_arrow_function(&mut self, is_async: bool, start: u32) -> Parse<Expression<'source>> {
    let params = if self.current.kind == TokenKind::LeftParen {
      self.parse_params()?
    } else {
      let token = self.expect(TokenKind::Identifier)?;
      vec![Pattern::Identifier(BindingIdentifier {
        name: self.token_text(token),
        type_annotation: None,
        span: token.span(),
      })]
    };

    let return_type = if self.matches(TokenKind::Colon) {
      Some(self.parse_type()?)
    } else {
      None
    };

    self.expect(TokenKind::Arrow)?;

    let body = if self.current.kind == TokenKind::LeftCurly {
      ArrowBody::Block(self.parse_block()?)
    } else {
      ArrowBody::Expression(Box::new(self.parse_assignment()?))
    };

    let end = match &body {
      ArrowBody::Block(block) => block.span.end,
      ArrowBody::Expression(expression) => expression.span().end,
    };

    Ok(Expression::Arrow(Box::new(ArrowFunction {
      params,
      return_type,
      body,
      is_async,
      span: Span::new(start, end),
    })))
  }

  // ---- JSX ----

  /// Parse a JSX element with the `<` already consumed; the token after the
  /// element is lexed under `closing_mode` (the enclosing context)
  fn parse_jsx_element_after_less(
    &mut self,
    start: u32,
    closing_mode: LexMode,
  ) -> Parse<JsxElement<'source>> {
    // fragment: `<>`
    if self.current.kind == TokenKind::Greater {
      self.bump_with(LexMode::JsxChild);
      let (children, end) = self.parse_jsx_children(None, closing_mode)?;
      return Ok(JsxElement {
        name: None,
        attributes: Vec::new(),
        children,
        self_closing: false,
        span: Span::new(start, end),
      });
    }

    let name = self.parse_jsx_name()?;
    let mut attributes = Vec::new();

    loop {
      match self.current.kind {
        TokenKind::Slash => {
          self.bump_with(LexMode::JsxTag);
          if self.current.kind != TokenKind::Greater {
            return Err(ParseError::Expected {
              expected: TokenKind::Greater,
              received: self.current,
            });
          }
          let close = self.current;
          self.bump_with(closing_mode);
          return Ok(JsxElement {
            name: Some(name),
            attributes,
            children: Vec::new(),
            self_closing: true,
            span: Span::new(start, close.end),
          });
        }
        TokenKind::Greater => {
          self.bump_with(LexMode::JsxChild);
          let (children, end) = self.parse_jsx_children(Some(name), closing_mode)?;
          return Ok(JsxElement {
            name: Some(name),
            attributes,
            children,
            self_closing: false,
            span: Span::new(start, end),
          });
        }
        TokenKind::LeftCurly => {
          let open = self.bump();
          self.expect(TokenKind::DotDotDot)?;
          let argument = self.parse_assignment()?;
          if self.current.kind != TokenKind::RightCurly {
            return Err(ParseError::Expected {
              expected: TokenKind::RightCurly,
              received: self.current,
            });
          }
          let close = self.current;
          self.bump_with(LexMode::JsxTag);
          attributes.push(JsxAttributeItem::Spread(JsxSpreadAttribute {
            argument,
            span: Span::new(open.start, close.end),
          }));
        }
        kind if kind == TokenKind::Identifier || kind.is_keyword() => {
          attributes.push(self.parse_jsx_attribute()?);
        }
        _ => {
          return Err(ParseError::ExpectedJsxAttribute(self.current));
        }
      }
    }
  }

  fn parse_jsx_attribute(&mut self) -> Parse<JsxAttributeItem<'source>> {
    let name = self.parse_jsx_name()?;

    let value = if self.current.kind == TokenKind::Equal {
      self.bump_with(LexMode::JsxTag);
      match self.current.kind {
        TokenKind::String => {
          let token = self.current;
          self.bump_with(LexMode::JsxTag);
          let raw = self.token_text(token);
          // JSX attribute strings don't process escape sequences
          Some(JsxAttributeValue::String(StringLiteral {
            value: raw[1..raw.len() - 1].to_owned(),
            raw,
            span: token.span(),
          }))
        }
        TokenKind::LeftCurly => {
          let open = self.bump();
          let expression = self.parse_assignment()?;
          if self.current.kind != TokenKind::RightCurly {
            return Err(ParseError::Expected {
              expected: TokenKind::RightCurly,
              received: self.current,
            });
          }
          let close = self.current;
          self.bump_with(LexMode::JsxTag);
          Some(JsxAttributeValue::Container(JsxExpressionContainer {
            expression: Some(expression),
            span: Span::new(open.start, close.end),
          }))
        }
        _ => {
          return Err(ParseError::ExpectedJsxAttribute(self.current));
        }
      }
    } else {
      None
    };

    let end = match &value {
      Some(JsxAttributeValue::String(string)) => string.span.end,
      Some(JsxAttributeValue::Container(container)) => container.span.end,
      None => name.span.end,
    };

    Ok(JsxAttributeItem::Attribute(JsxAttribute {
      name,
      value,
      span: Span::new(name.span.start, end),
    }))
  }

  /// A JSX name: `div`, `Foo.Bar`, `data-value`
  fn parse_jsx_name(&mut self) -> Parse<JsxName<'source>> {
    if self.current.kind != TokenKind::Identifier && !self.current.kind.is_keyword() {
      return Err(ParseError::ExpectedJsxName(self.current));
    }
    let first = self.current;
    let mut end = first.end;
    self.bump_with(LexMode::JsxTag);

    while matches!(self.current.kind, TokenKind::Dot | TokenKind::Minus)
      && self.current.start == end
    {
      self.bump_with(LexMode::JsxTag);
      if self.current.kind != TokenKind::Identifier && !self.current.kind.is_keyword() {
        return Err(ParseError::ExpectedJsxName(self.current));
      }
      end = self.current.end;
      self.bump_with(LexMode::JsxTag);
    }

    let span = Span::new(first.start, end);
    Ok(JsxName {
      name: span.source_text(self.source),
      span,
    })
  }

  fn parse_jsx_children(
    &mut self,
    name: Option<JsxName<'source>>,
    closing_mode: LexMode,
  ) -> Parse<(Vec<JsxChild<'source>>, u32)> {
    let mut children = Vec::new();

    loop {
      match self.current.kind {
        TokenKind::JsxText => {
          let token = self.current;
          self.bump_with(LexMode::JsxChild);
          children.push(JsxChild::Text(JsxText {
            raw: self.token_text(token),
            span: token.span(),
          }));
        }
        TokenKind::LeftCurly => {
          let open = self.bump();
          let expression = if self.current.kind == TokenKind::RightCurly {
            None
          } else {
            Some(self.parse_assignment()?)
          };
          if self.current.kind != TokenKind::RightCurly {
            return Err(ParseError::Expected {
              expected: TokenKind::RightCurly,
              received: self.current,
            });
          }
          let close = self.current;
          self.bump_with(LexMode::JsxChild);
          children.push(JsxChild::Container(JsxExpressionContainer {
            expression,
            span: Span::new(open.start, close.end),
          }));
        }
        TokenKind::Less => {
          let less = self.bump_with(LexMode::JsxTag);

          if self.current.kind == TokenKind::Slash {
            // the closing tag
            self.bump_with(LexMode::JsxTag);
            match name {
              None => {}
              Some(name) => {
                let closing = self.parse_jsx_name()?;
                if closing.name != name.name {
                  return Err(ParseError::MismatchedJsxClosingTag {
                    opening: name.span,
                    closing: closing.span,
                  });
                }
              }
            }
            if self.current.kind != TokenKind::Greater {
              return Err(ParseError::Expected {
                expected: TokenKind::Greater,
                received: self.current,
              });
            }
            let close = self.current;
            self.bump_with(closing_mode);
            return Ok((children, close.end));
          }

          let element = self.parse_jsx_element_after_less(less.start, LexMode::JsxChild)?;
          children.push(JsxChild::Element(element));
        }
        _ => {
          return Err(ParseError::UnclosedJsxElement(self.current));
        }
      }
    }
  }

  // ---- types ----

  fn parse_type(&mut self) -> Parse<Type<'source>> {
    let first = self.parse_intersection_type()?;
    if self.current.kind != TokenKind::Pipe {
      return Ok(first);
    }

    let mut types = vec![first];
    while self.matches(TokenKind::Pipe) {
      types.push(self.parse_intersection_type()?);
    }

    let span = Span::new(
      types.first().map_or(0, |type_| type_.span().start),
      types.last().map_or(0, |type_| type_.span().end),
    );
    Ok(Type::Union(UnionType { types, span }))
  }

  fn parse_intersection_type(&mut self) -> Parse<Type<'source>> {
    let first = self.parse_postfix_type()?;
    if self.current.kind != TokenKind::Ampersand {
      return Ok(first);
    }

    let mut types = vec![first];
    while self.matches(TokenKind::Ampersand) {
      types.push(self.parse_postfix_type()?);
    }

    let span = Span::new(
      types.first().map_or(0, |type_| type_.span().start),
      types.last().map_or(0, |type_| type_.span().end),
    );
    Ok(Type::Intersection(IntersectionType { types, span }))
  }

  fn parse_postfix_type(&mut self) -> Parse<Type<'source>> {
    let mut type_ = self.parse_primary_type()?;

    while self.current.kind == TokenKind::LeftSquare
      && self.peek_kind() == TokenKind::RightSquare
      && !self.current.newline_before
    {
      self.bump();
      let close = self.expect(TokenKind::RightSquare)?;
      let span = Span::new(type_.span().start, close.end);
      type_ = Type::Array(Box::new(ArrayType { element: type_, span }));
    }

    Ok(type_)
  }

  fn parse_primary_type(&mut self) -> Parse<Type<'source>> {
    match self.current.kind {
      TokenKind::Question => {
        let token = self.bump();
        let inner = self.parse_postfix_type()?;
        let span = Span::new(token.start, inner.span().end);
        Ok(Type::Nullable(Box::new(NullableType { inner, span })))
      }
      TokenKind::LeftParen => {
        if self.scan_arrow_after_parens() {
          self.parse_function_type()
        } else {
          self.bump();
          let inner = self.parse_type()?;
          self.expect(TokenKind::RightParen)?;
          // the grouping is discarded: the printer re-derives parentheses
          Ok(inner)
        }
      }
      TokenKind::LeftSquare => {
        let open = self.bump();
        let mut types = Vec::new();
        while self.current.kind != TokenKind::RightSquare {
          types.push(self.parse_type()?);
          if !self.matches(TokenKind::Comma) {
            break;
          }
        }
        let close = self.expect(TokenKind::RightSquare)?;
        Ok(Type::Tuple(TupleType {
          types,
          span: Span::new(open.start, close.end),
        }))
      }
      kind if kind == TokenKind::Identifier || kind.is_keyword() => {
        let token = self.bump();
        let name = self.token_text(token);
        let mut end = token.end;

        let type_args = if self.current.kind == TokenKind::Less {
          self.bump();
          let mut args = Vec::new();
          while !matches!(
            self.current.kind,
            TokenKind::Greater | TokenKind::RightRight | TokenKind::RightRightRight
          ) {
            args.push(self.parse_type()?);
            if !self.matches(TokenKind::Comma) {
              break;
            }
          }
          end = self.current.end.min(self.current.start + 1);
          self.expect_type_close()?;
          args
        } else {
          Vec::new()
        };

        Ok(Type::Generic(GenericType {
          name,
          type_args,
          span: Span::new(token.start, end),
        }))
      }
      _ => Err(ParseError::ExpectedType(self.current)),
    }
  }

  fn parse_function_type(&mut self) -> Parse<Type<'source>> {
    let open = self.expect(TokenKind::LeftParen)?;
    let mut params = Vec::new();

    while self.current.kind != TokenKind::RightParen {
      let start = self.current.start;
      let name = if self.current.kind == TokenKind::Identifier && self.peek_kind() == TokenKind::Colon {
        let token = self.bump();
        self.bump();
        Some(self.token_text(token))
      } else {
        None
      };
      let annotation = self.parse_type()?;
      let span = Span::new(start, annotation.span().end);
      params.push(FunctionTypeParam { name, annotation, span });
      if !self.matches(TokenKind::Comma) {
        break;
      }
    }
    self.expect(TokenKind::RightParen)?;
    self.expect(TokenKind::Arrow)?;
    let return_type = self.parse_type()?;
    let span = Span::new(open.start, return_type.span().end);

    Ok(Type::Function(Box::new(FunctionType {
      params,
      return_type,
      span,
    })))
  }

  /// Close a type argument list, splitting `>>` / `>>>` into single `>`s
  fn expect_type_close(&mut self) -> Parse<()> {
    match self.current.kind {
      TokenKind::Greater => {
        self.bump();
        Ok(())
      }
      TokenKind::RightRight => {
        self.current.kind = TokenKind::Greater;
        self.current.start += 1;
        Ok(())
      }
      TokenKind::RightRightRight => {
        self.current.kind = TokenKind::RightRight;
        self.current.start += 1;
        Ok(())
      }
      _ => Err(ParseError::Expected {
        expected: TokenKind::Greater,
        received: self.current,
      }),
    }
  }
}

/// Pull the next significant token from a scanning tokeniser clone
fn next_significant(tokeniser: &mut Tokeniser) -> Token {
  loop {
    let token = tokeniser.next_token(LexMode::Normal);
    if !token.kind.is_comment() {
      return token;
    }
  }
}

/// Scan from just after a `(` to decide if it opens arrow function parameters
fn scan_arrow(tokeniser: &mut Tokeniser) -> bool {
  let mut depth = 1u32;

  loop {
    let token = next_significant(tokeniser);
    match token.kind {
      TokenKind::LeftParen | TokenKind::LeftSquare | TokenKind::LeftCurly => depth += 1,
      TokenKind::RightParen | TokenKind::RightSquare | TokenKind::RightCurly => {
        depth = depth.saturating_sub(1);
        if depth == 0 {
          break;
        }
      }
      TokenKind::EndOfFile => return false,
      _ => {}
    }
  }

  match next_significant(tokeniser).kind {
    TokenKind::Arrow => true,
    TokenKind::Colon => scan_arrow_after_return_type(tokeniser),
    _ => false,
  }
}

/// After `):`, scan across a possible return type looking for `=>`
fn scan_arrow_after_return_type(tokeniser: &mut Tokeniser) -> bool {
  let mut depth = 0u32;

  loop {
    let token = next_significant(tokeniser);
    match token.kind {
      TokenKind::Arrow if depth == 0 => return true,
      TokenKind::LeftParen | TokenKind::LeftSquare | TokenKind::LeftCurly | TokenKind::Less => {
        depth += 1;
      }
      TokenKind::RightSquare | TokenKind::Greater | TokenKind::RightRight => {
        depth = depth.saturating_sub(1);
      }
      TokenKind::RightParen | TokenKind::RightCurly => {
        if depth == 0 {
          return false;
        }
        depth -= 1;
      }
      TokenKind::Semicolon
      | TokenKind::Question
      | TokenKind::EndOfFile => return false,
      TokenKind::Comma if depth == 0 => return false,
      _ => {}
    }
  }
}

fn attach_type<'source>(pattern: &mut Pattern<'source>, annotation: Type<'source>) {
  match pattern {
    Pattern::Identifier(identifier) => identifier.type_annotation = Some(annotation),
    Pattern::Object(object) => object.type_annotation = Some(annotation),
    Pattern::Array(array) => array.type_annotation = Some(annotation),
    Pattern::Assignment(_) | Pattern::Rest(_) => {}
  }
}

fn shorthand_pattern<'source>(key: &PropertyKey<'source>) -> Parse<Pattern<'source>> {
  if let PropertyKey::Identifier(name) = key {
    Ok(Pattern::Identifier(BindingIdentifier {
      name: name.name,
      type_annotation: None,
      span: name.span,
    }))
  } else {
    Err(ParseError::ExpectedPatternShorthand(key.span()))
  }
}

/// Can a keyword-like contextual word (`yield`) be a plain reference here?
fn keyword_is_plain_reference(next: TokenKind) -> bool {
  matches!(
    next,
    TokenKind::Arrow
      | TokenKind::Colon
      | TokenKind::Comma
      | TokenKind::Dot
      | TokenKind::Equal
      | TokenKind::RightCurly
      | TokenKind::RightParen
      | TokenKind::RightSquare
      | TokenKind::Semicolon
      | TokenKind::EndOfFile
  )
}

fn can_start_expression(kind: TokenKind) -> bool {
  matches!(
    kind,
    TokenKind::Identifier
      | TokenKind::Number
      | TokenKind::String
      | TokenKind::Regex
      | TokenKind::Template
      | TokenKind::TemplateHead
      | TokenKind::True
      | TokenKind::False
      | TokenKind::Null
      | TokenKind::This
      | TokenKind::Super
      | TokenKind::New
      | TokenKind::Function
      | TokenKind::Class
      | TokenKind::Typeof
      | TokenKind::Void
      | TokenKind::Delete
      | TokenKind::LeftParen
      | TokenKind::LeftSquare
      | TokenKind::LeftCurly
      | TokenKind::Plus
      | TokenKind::Minus
      | TokenKind::Bang
      | TokenKind::Tilde
      | TokenKind::PlusPlus
      | TokenKind::MinusMinus
      | TokenKind::Less
  )
}

fn binary_precedence(kind: TokenKind) -> Option<u8> {
  let precedence = match kind {
    TokenKind::PipePipe | TokenKind::QuestionQuestion => 4,
    TokenKind::AmpersandAmpersand => 5,
    TokenKind::Pipe => 6,
    TokenKind::Caret => 7,
    TokenKind::Ampersand => 8,
    TokenKind::EqualEqual
    | TokenKind::BangEqual
    | TokenKind::EqualEqualEqual
    | TokenKind::BangEqualEqual => 9,
    TokenKind::Less
    | TokenKind::LessEqual
    | TokenKind::Greater
    | TokenKind::GreaterEqual
    | TokenKind::In
    | TokenKind::Instanceof => 10,
    TokenKind::LeftLeft | TokenKind::RightRight | TokenKind::RightRightRight => 11,
    TokenKind::Plus | TokenKind::Minus => 12,
    TokenKind::Star | TokenKind::Slash | TokenKind::Percent => 13,
    TokenKind::StarStar => 14,
    _ => return None,
  };
  Some(precedence)
}

fn logical_operator(kind: TokenKind) -> Option<LogicalOperator> {
  match kind {
    TokenKind::AmpersandAmpersand => Some(LogicalOperator::And),
    TokenKind::PipePipe => Some(LogicalOperator::Or),
    TokenKind::QuestionQuestion => Some(LogicalOperator::Nullish),
    _ => None,
  }
}

fn binary_operator(kind: TokenKind) -> BinaryOperator {
  match kind {
    TokenKind::EqualEqual => BinaryOperator::Equal,
    TokenKind::BangEqual => BinaryOperator::NotEqual,
    TokenKind::EqualEqualEqual => BinaryOperator::StrictEqual,
    TokenKind::BangEqualEqual => BinaryOperator::StrictNotEqual,
    TokenKind::Less => BinaryOperator::Less,
    TokenKind::LessEqual => BinaryOperator::LessEqual,
    TokenKind::Greater => BinaryOperator::Greater,
    TokenKind::GreaterEqual => BinaryOperator::GreaterEqual,
    TokenKind::LeftLeft => BinaryOperator::ShiftLeft,
    TokenKind::RightRight => BinaryOperator::ShiftRight,
    TokenKind::RightRightRight => BinaryOperator::ShiftRightUnsigned,
    TokenKind::Plus => BinaryOperator::Add,
    TokenKind::Minus => BinaryOperator::Subtract,
    TokenKind::Star => BinaryOperator::Multiply,
    TokenKind::Slash => BinaryOperator::Divide,
    TokenKind::Percent => BinaryOperator::Remainder,
    TokenKind::StarStar => BinaryOperator::Exponent,
    TokenKind::Ampersand => BinaryOperator::BitAnd,
    TokenKind::Pipe => BinaryOperator::BitOr,
    TokenKind::Caret => BinaryOperator::BitXor,
    TokenKind::In => BinaryOperator::In,
    _ => BinaryOperator::Instanceof,
  }
}

fn assignment_operator(kind: TokenKind) -> Option<AssignmentOperator> {
  let operator = match kind {
    TokenKind::Equal => AssignmentOperator::Assign,
    TokenKind::PlusEqual => AssignmentOperator::Add,
    TokenKind::MinusEqual => AssignmentOperator::Subtract,
    TokenKind::StarEqual => AssignmentOperator::Multiply,
    TokenKind::SlashEqual => AssignmentOperator::Divide,
    TokenKind::PercentEqual => AssignmentOperator::Remainder,
    TokenKind::StarStarEqual => AssignmentOperator::Exponent,
    TokenKind::LeftLeftEqual => AssignmentOperator::ShiftLeft,
    TokenKind::RightRightEqual => AssignmentOperator::ShiftRight,
    TokenKind::RightRightRightEqual => AssignmentOperator::ShiftRightUnsigned,
    TokenKind::AmpersandEqual => AssignmentOperator::BitAnd,
    TokenKind::PipeEqual => AssignmentOperator::BitOr,
    TokenKind::CaretEqual => AssignmentOperator::BitXor,
    _ => return None,
  };
  Some(operator)
}

/// Process the escape sequences of a string literal or template chunk
pub(crate) fn cook_string(raw: &str) -> String {
  if !raw.contains('\\') {
    return raw.to_owned();
  }

  let mut value = String::with_capacity(raw.len());
  let mut characters = raw.chars();

  while let Some(character) = characters.next() {
    if character != '\\' {
      value.push(character);
      continue;
    }

    match characters.next() {
      None => break,
      Some('n') => value.push('\n'),
      Some('t') => value.push('\t'),
      Some('r') => value.push('\r'),
      Some('b') => value.push('\u{8}'),
      Some('f') => value.push('\u{c}'),
      Some('v') => value.push('\u{b}'),
      Some('0') => value.push('\0'),
      Some('\n') => {}
      Some('x') => {
        let hex: String = characters.by_ref().take(2).collect();
        if let Ok(code) = u32::from_str_radix(&hex, 16)
          && let Some(character) = char::from_u32(code)
        {
          value.push(character);
        }
      }
      Some('u') => {
        let mut clone = characters.clone();
        if clone.next() == Some('{') {
          characters.next();
          let hex: String = characters.by_ref().take_while(|c| *c != '}').collect();
          if let Ok(code) = u32::from_str_radix(&hex, 16)
            && let Some(character) = char::from_u32(code)
          {
            value.push(character);
          }
        } else {
          let hex: String = characters.by_ref().take(4).collect();
          if let Ok(code) = u32::from_str_radix(&hex, 16)
            && let Some(character) = char::from_u32(code)
          {
            value.push(character);
          }
        }
      }
      Some(other) => value.push(other),
    }
  }

  value
}

/// The numeric value of a number literal's spelling
pub(crate) fn number_value(raw: &str) -> f64 {
  let bytes = raw.as_bytes();
  if bytes.first() == Some(&b'0') && bytes.len() > 2 {
    let parsed = match bytes[1] {
      b'x' | b'X' => u64::from_str_radix(&raw[2..], 16).ok(),
      b'o' | b'O' => u64::from_str_radix(&raw[2..], 8).ok(),
      b'b' | b'B' => u64::from_str_radix(&raw[2..], 2).ok(),
      _ => None,
    };
    if let Some(value) = parsed {
      #[allow(clippy::cast_precision_loss, reason = "matches runtime semantics")]
      return value as f64;
    }
  }

  raw.parse().unwrap_or(f64::NAN)
}

/// An error which arose during parsing
#[derive(Clone, Debug)]
pub enum ParseError {
  /// Expected a token of a certain kind
  Expected {
    /// Expected Token Kind to be
    expected: TokenKind,
    /// Received this Token instead
    received: Token,
  },
  /// Expected a statement to have ended
  ExpectedSemicolon(Token),
  /// Expected Expression
  ExpectedExpression(Token),
  /// Expected Pattern
  ExpectedPattern(Token),
  /// Shorthand properties in a pattern must be plain names
  ExpectedPatternShorthand(Span),
  /// Expected a Property Name
  ExpectedPropertyName(Token),
  /// Expected Type
  ExpectedType(Token),
  /// Expected a JSX Attribute
  ExpectedJsxAttribute(Token),
  /// Expected a JSX Name
  ExpectedJsxName(Token),
  /// A JSX element is missing its closing tag
  UnclosedJsxElement(Token),
  /// A JSX closing tag doesn't match the opening tag
  MismatchedJsxClosingTag {
    /// The opening name
    opening: Span,
    /// The closing name
    closing: Span,
  },
  /// Unterminated String Literal
  UnterminatedString(Token),
  /// Unterminated Template Literal
  UnterminatedTemplate(Token),
  /// Unterminated Regex Literal
  UnterminatedRegex(Token),
  /// Unterminated Block Comment
  UnterminatedComment(Token),
  /// Unknown Character
  UnknownCharacter(Token),
}
impl ParseError {
  /// The title of the error message
  #[must_use]
  pub fn title(&self) -> String {
    match self {
      Self::Expected { expected, .. } => format!("Expected {expected}"),
      Self::ExpectedSemicolon(_) => "Expected End of Statement".into(),
      Self::ExpectedExpression(_) => "Expected Expression".into(),
      Self::ExpectedPattern(_) => "Expected Pattern".into(),
      Self::ExpectedPatternShorthand(_) => "Expected Shorthand Property Name".into(),
      Self::ExpectedPropertyName(_) => "Expected Property Name".into(),
      Self::ExpectedType(_) => "Expected Type".into(),
      Self::ExpectedJsxAttribute(_) => "Expected JSX Attribute".into(),
      Self::ExpectedJsxName(_) => "Expected JSX Name".into(),
      Self::UnclosedJsxElement(_) => "Unclosed JSX Element".into(),
      Self::MismatchedJsxClosingTag { .. } => "Mismatched JSX Closing Tag".into(),
      Self::UnterminatedString(_) => "Unterminated String".into(),
      Self::UnterminatedTemplate(_) => "Unterminated Template Literal".into(),
      Self::UnterminatedRegex(_) => "Unterminated Regular Expression".into(),
      Self::UnterminatedComment(_) => "Unterminated Comment".into(),
      Self::UnknownCharacter(_) => "Unknown Character".into(),
    }
  }

  /// The body of the error message describing what has gone wrong
  #[must_use]
  pub fn message(&self) -> String {
    match self {
      Self::Expected { expected, received } => {
        format!("expected {expected} but got {}", received.kind)
      }
      Self::ExpectedSemicolon(t) => {
        format!("expected `;` or a new line to end the statement, but got {}", t.kind)
      }
      Self::ExpectedExpression(t) => format!("expected expression but got {}", t.kind),
      Self::ExpectedPattern(t) => format!("expected binding pattern but got {}", t.kind),
      Self::ExpectedPatternShorthand(_) => {
        "a shorthand property must be a plain name; use `key: pattern` instead".into()
      }
      Self::ExpectedPropertyName(t) => format!("expected property name but got {}", t.kind),
      Self::ExpectedType(t) => format!("expected type but got {}", t.kind),
      Self::ExpectedJsxAttribute(t) => format!("expected JSX attribute but got {}", t.kind),
      Self::ExpectedJsxName(t) => format!("expected JSX element name but got {}", t.kind),
      Self::UnclosedJsxElement(_) => "the JSX element is missing its closing tag".into(),
      Self::MismatchedJsxClosingTag { .. } => {
        "the closing tag doesn't match the name of the opening tag".into()
      }
      Self::UnterminatedString(_) => "missing closing quote for string".into(),
      Self::UnterminatedTemplate(_) => "missing closing backtick for template literal".into(),
      Self::UnterminatedRegex(_) => "missing closing slash for regular expression".into(),
      Self::UnterminatedComment(_) => "missing `*/` to close the comment".into(),
      Self::UnknownCharacter(_) => "got unknown character".into(),
    }
  }

  /// The location of the error
  pub fn span(&self) -> Span {
    match self {
      Self::Expected { received: token, .. }
      | Self::ExpectedSemicolon(token)
      | Self::ExpectedExpression(token)
      | Self::ExpectedPattern(token)
      | Self::ExpectedPropertyName(token)
      | Self::ExpectedType(token)
      | Self::ExpectedJsxAttribute(token)
      | Self::ExpectedJsxName(token)
      | Self::UnclosedJsxElement(token)
      | Self::UnterminatedString(token)
      | Self::UnterminatedTemplate(token)
      | Self::UnterminatedRegex(token)
      | Self::UnterminatedComment(token)
      | Self::UnknownCharacter(token) => token.span(),
      Self::ExpectedPatternShorthand(span) => *span,
      Self::MismatchedJsxClosingTag { closing, .. } => *closing,
    }
  }
}
impl fmt::Display for ParseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.message())
  }
}
impl error::Error for ParseError {}
