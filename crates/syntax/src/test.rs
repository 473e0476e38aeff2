use crate::ast::{Ast, fingerprint};

fn parse(source: &str) -> Ast<'_> {
  crate::parse(source)
}

fn parse_to_string(source: &str) -> String {
  let ast = parse(source);
  assert!(ast.is_valid(), "parse failed: {:?}", ast.errors);
  fingerprint(&ast.program)
}

#[test]
fn empty_source() {
  assert!(parse("").is_valid());
  assert!(parse("    ").is_valid());
  assert!(parse("\n\n\n").is_valid());
  assert!(parse("  \n    \n   \n ").is_valid());
}

#[test]
fn space_at_end() {
  assert!(parse("22 + 44 ").is_valid());
  assert!(parse("22 + 44  \t  ").is_valid());
  assert!(parse("22 + 44\n\n\n").is_valid());
}

#[test]
fn unterminated_literals() {
  assert!(!parse("'unterminated string").is_valid());
  assert!(!parse("\"un").is_valid());
  assert!(!parse("`").is_valid());

  assert!(parse("``").is_valid());
  assert!(parse("`hello world`").is_valid());
}

#[test]
fn unknown_character() {
  assert!(!parse("3 # 4").is_valid());
  assert!(!parse("¬").is_valid());

  // unknown characters in strings are fine
  assert!(parse("'¬'").is_valid());
  assert!(parse("'🤗'").is_valid());
}

#[test]
fn binary_precedence() {
  assert_eq!(
    parse_to_string("1 + 2 * 3"),
    "(program (statement (+ 1 (* 2 3))))"
  );
  assert_eq!(
    parse_to_string("1 * 2 + 3"),
    "(program (statement (+ (* 1 2) 3)))"
  );
  assert_eq!(
    parse_to_string("a || b && c"),
    "(program (statement (|| a (&& b c))))"
  );
  assert_eq!(
    parse_to_string("a == b < c"),
    "(program (statement (== a (< b c))))"
  );
}

#[test]
fn exponent_is_right_associative() {
  assert_eq!(
    parse_to_string("a ** b ** c"),
    "(program (statement (** a (** b c))))"
  );
  assert_eq!(
    parse_to_string("a - b - c"),
    "(program (statement (- (- a b) c)))"
  );
}

#[test]
fn grouping_is_discarded() {
  assert_eq!(parse_to_string("(a + b) * c"), "(program (statement (* (+ a b) c)))");
  assert_eq!(parse_to_string("((a))"), "(program (statement a))");
}

#[test]
fn member_and_call() {
  assert_eq!(
    parse_to_string("a.b.c(1)[d]"),
    "(program (statement (member (call (member (member a b) c) 1) [d])))"
  );
  assert_eq!(
    parse_to_string("new Foo(1).bar"),
    "(program (statement (member (new Foo 1) bar)))"
  );
  assert_eq!(
    parse_to_string("new a.b()"),
    "(program (statement (new (member a b))))"
  );
}

#[test]
fn keywords_as_property_names() {
  assert!(parse("a.default").is_valid());
  assert!(parse("a.new").is_valid());
  assert!(parse("let x = { class: 1, if: 2 }").is_valid());
}

#[test]
fn unrestricted_continuations_cross_line_breaks() {
  // computed members, calls, and template tags continue across a line break
  let ast = parse("foo()\n[0].bar()");
  assert!(ast.is_valid());
  assert_eq!(ast.program.body.len(), 1);

  let ast = parse("a\n(b)");
  assert!(ast.is_valid());
  assert_eq!(ast.program.body.len(), 1);

  let ast = parse("tag\n`body`");
  assert!(ast.is_valid());
  assert_eq!(ast.program.body.len(), 1);

  // a token which cannot continue an expression starts a new statement
  let ast = parse("a\nb()");
  assert!(ast.is_valid());
  assert_eq!(ast.program.body.len(), 2);
}

#[test]
fn operators_continue_across_line_breaks() {
  let ast = parse("a\n  + b");
  assert!(ast.is_valid());
  assert_eq!(ast.program.body.len(), 1);

  let ast = parse("a\n  || b");
  assert!(ast.is_valid());
  assert_eq!(ast.program.body.len(), 1);

  let ast = parse("a\n  .b()");
  assert!(ast.is_valid());
  assert_eq!(ast.program.body.len(), 1);
}

#[test]
fn restricted_productions() {
  assert_eq!(
    parse_to_string("function f() { return\n1 }"),
    "(program (function f (params) (block (return) (statement 1))))"
  );
  assert_eq!(
    parse_to_string("x++\n--y"),
    "(program (statement (post++ x)) (statement (pre-- y)))"
  );
}

#[test]
fn arrow_functions() {
  assert_eq!(
    parse_to_string("x => x + 1"),
    "(program (statement (arrow (params x) (+ x 1))))"
  );
  assert_eq!(
    parse_to_string("(a, b) => { return a }"),
    "(program (statement (arrow (params a b) (block (return a)))))"
  );
  assert_eq!(
    parse_to_string("() => 1"),
    "(program (statement (arrow (params) 1)))"
  );
  assert_eq!(
    parse_to_string("async x => x"),
    "(program (statement (arrow async (params x) x)))"
  );
  // not an arrow: a parenthesized expression
  assert_eq!(parse_to_string("(a, b)"), "(program (statement (seq a b)))");
}

#[test]
fn arrow_with_default_and_rest() {
  assert_eq!(
    parse_to_string("(a = 1, ...rest) => a"),
    "(program (statement (arrow (params (default a 1) (rest rest)) a)))"
  );
}

#[test]
fn conditional_versus_arrow_return_type() {
  assert_eq!(
    parse_to_string("x ? (a) : b"),
    "(program (statement (cond x a b)))"
  );
  assert_eq!(
    parse_to_string("(a): number => a"),
    "(program (statement (arrow (params a) number a)))"
  );
}

#[test]
fn destructuring() {
  assert_eq!(
    parse_to_string("let { a, b: c, d = 1 } = x"),
    "(program (let ((opat (a a) (b c) (d (default d 1))) x)))"
  );
  assert_eq!(
    parse_to_string("let [a, , b, ...rest] = x"),
    "(program (let ((apat a _ b (rest rest)) x)))"
  );
}

#[test]
fn object_literals() {
  assert_eq!(
    parse_to_string("x = { a: 1, b, 'c': 3, [d]: 4, ...e }"),
    "(program (statement (= x (object (prop a 1) (prop b b) (prop \"c\" 3) (prop [d] 4) (spread e)))))"
  );
  assert!(parse("x = { get a() { return 1 }, set a(v) {} }").is_valid());
  assert!(parse("x = { method() {}, *gen() {}, async later() {} }").is_valid());
}

#[test]
fn cover_grammar_assignment_targets() {
  // destructuring assignments parse with the literal as the target
  assert!(parse("[a, b] = c").is_valid());
  assert!(parse("({ a } = b)").is_valid());
}

#[test]
fn template_literals() {
  assert_eq!(
    parse_to_string("`hello ${name} and ${other}!`"),
    "(program (statement (template \"hello \" name \" and \" other \"!\")))"
  );
  assert_eq!(
    parse_to_string("tag`a${b}c`"),
    "(program (statement (tagged tag (template \"a\" b \"c\"))))"
  );
  // nested braces inside a substitution
  assert!(parse("`${ { a: 1 }.a }`").is_valid());
}

#[test]
fn regex_versus_division() {
  assert_eq!(parse_to_string("a / b"), "(program (statement (/ a b)))");
  assert_eq!(
    parse_to_string("x = /ab+c/g"),
    "(program (statement (= x /ab+c/g)))"
  );
  assert!(parse("(1 + 2) / 3 / 4").is_valid());
  assert!(parse("if (x) /a/.test(x)").is_valid());
}

#[test]
fn loops_and_branches() {
  assert!(parse("if (a) b(); else c()").is_valid());
  assert!(parse("for (let i = 0; i < 10; i++) f(i)").is_valid());
  assert!(parse("for (;;) break").is_valid());
  assert!(parse("for (const key in object) f(key)").is_valid());
  assert!(parse("for (const item of items) f(item)").is_valid());
  assert!(parse("for (x of items) f(x)").is_valid());
  assert!(parse("while (a) b()").is_valid());
  assert!(parse("do { a() } while (b)").is_valid());
  assert!(parse("outer: for (;;) { continue outer }").is_valid());
}

#[test]
fn for_in_versus_in_operator() {
  assert!(parse("for (let i = (a in b); i < 10; i++) {}").is_valid());
  assert_eq!(
    parse_to_string("for (const key in object) {}"),
    "(program (for-in (const (key)) object (block)))"
  );
}

#[test]
fn switch_statements() {
  assert_eq!(
    parse_to_string("switch (x) { case 1: a(); break; default: b() }"),
    "(program (switch x (case 1 (statement (call a)) (break)) (case _ (statement (call b)))))"
  );
}

#[test]
fn try_statements() {
  assert!(parse("try { a() } catch (error) { b() }").is_valid());
  assert!(parse("try { a() } catch { b() } finally { c() }").is_valid());
}

#[test]
fn classes() {
  assert_eq!(
    parse_to_string("class A extends B { constructor() {} static create() {} get x() {} }"),
    "(program (class A (extends B) (constructor constructor (function (params) (block))) \
     (method static create (function (params) (block))) (get x (function (params) (block)))))"
  );
  assert!(parse("let a = class {}").is_valid());
  assert!(parse("class A extends mixin(B) {}").is_valid());
}

#[test]
fn functions() {
  assert!(parse("function f(a, b = 1, ...rest) {}").is_valid());
  assert!(parse("async function f() { await g() }").is_valid());
  assert!(parse("function* gen() { yield 1; yield* inner() }").is_valid());
}

#[test]
fn modules() {
  assert_eq!(
    parse_to_string("import a, { b, c as d } from 'mod'"),
    "(program (import a b c:d from \"mod\"))"
  );
  assert!(parse("import * as ns from 'mod'").is_valid());
  assert!(parse("import 'polyfill'").is_valid());
  assert!(parse("export { a, b as c }").is_valid());
  assert!(parse("export * from 'mod'").is_valid());
  assert!(parse("export default function () {}").is_valid());
  assert!(parse("export const x = 1").is_valid());
}

#[test]
fn type_annotations() {
  assert_eq!(
    parse_to_string("let x: number = 1"),
    "(program (let ((x:number) 1)))"
  );
  assert_eq!(
    parse_to_string("let x: ?string | Array<number> = null"),
    "(program (let ((x:(| (? string) (Array number))) null)))"
  );
  assert_eq!(
    parse_to_string("type Handler = (event: Event) => void"),
    "(program (type Handler (fn-type (params event:Event) void)))"
  );
  assert!(parse("let x: [number, string] = y").is_valid());
  assert!(parse("let x: A & B = y").is_valid());
  assert!(parse("let x: number[] = y").is_valid());
  assert!(parse("function f(a: number): string {}").is_valid());
}

#[test]
fn nested_generic_close() {
  assert!(parse("let x: Map<string, Array<number>> = y").is_valid());
  assert!(parse("let x: A<B<C<D>>> = y").is_valid());
}

#[test]
fn jsx_elements() {
  assert_eq!(
    parse_to_string("<div className=\"big\">{content}</div>"),
    "(program (statement (jsx div (className \"big\") {content})))"
  );
  assert_eq!(
    parse_to_string("<br />"),
    "(program (statement (jsx br)))"
  );
  assert!(parse("<Foo.Bar data-x={1} {...rest} />").is_valid());
  assert!(parse("<div>text <b>bold</b> more</div>").is_valid());
  assert!(parse("let x = <a href='#'>link</a>").is_valid());
  assert!(!parse("<div></span>").is_valid());
}

#[test]
fn jsx_text_with_apostrophes() {
  assert!(parse("<div>don't panic</div>").is_valid());
}

#[test]
fn comments_are_collected() {
  let ast = parse("// leading\nlet x = 1 // trailing\n/* block */ let y = 2");
  assert!(ast.is_valid());
  assert_eq!(ast.comments.len(), 3);

  assert!(!ast.comments[0].same_line_as_previous);
  assert!(!ast.comments[0].same_line_as_next);
  assert!(ast.comments[1].same_line_as_previous);
  assert!(!ast.comments[1].same_line_as_next);
  assert!(!ast.comments[2].same_line_as_previous);
  assert!(ast.comments[2].same_line_as_next);
}

#[test]
fn comment_at_end_of_file() {
  let ast = parse("let x = 1\n// done");
  assert!(ast.is_valid());
  assert_eq!(ast.comments.len(), 1);
  assert_eq!(ast.comments[0].next_token_start, None);
}

#[test]
fn number_literals() {
  assert_eq!(parse_to_string("0x10"), "(program (statement 16))");
  assert_eq!(parse_to_string("0b101"), "(program (statement 5))");
  assert_eq!(parse_to_string("0o17"), "(program (statement 15))");
  assert_eq!(parse_to_string("1.5e2"), "(program (statement 150))");
  assert_eq!(parse_to_string(".5"), "(program (statement 0.5))");
  assert_eq!(parse_to_string("1."), "(program (statement 1))");
}

#[test]
fn string_escapes() {
  assert_eq!(
    parse_to_string(r#"'a\nb\tA\x41\u{1F600}'"#),
    "(program (statement \"a\\nb\\tAA😀\"))"
  );
}

#[test]
fn member_of_number_literal() {
  assert_eq!(
    parse_to_string("1..toString()"),
    "(program (statement (call (member 1 toString))))"
  );
  assert_eq!(
    parse_to_string("(1).toString()"),
    "(program (statement (call (member 1 toString))))"
  );
}

#[test]
fn sequence_expressions() {
  assert_eq!(parse_to_string("a, b, c"), "(program (statement (seq a b c)))");
  assert_eq!(
    parse_to_string("f((a, b))"),
    "(program (statement (call f (seq a b))))"
  );
}

#[test]
fn spans_cover_statements() {
  let source = "let x = 1;\nlet y = 2;";
  let ast = parse(source);
  let first = ast.program.body[0].span();
  assert_eq!(first.source_text(source), "let x = 1;");
}
