//! # Formatter Tests
//!
//! Check that the output of the formatter matches the expected output, and
//! that formatting the output again changes nothing.

use indoc::indoc;
use jsfmt_formatter::{Config, Indentation, TrailingComma, check, debug_check, format};

fn format_width(source: &str, print_width: u16) -> String {
  let config = Config {
    print_width,
    ..Config::default()
  };
  format(source, &config).expect("valid source")
}

macro_rules! assert_format {
  ($source:expr, $expected:expr, $print_width:expr) => {
    let output = format_width($source, $print_width);
    assert_eq!(output.trim_end(), $expected.trim_end());
    assert_eq!(format_width(&output, $print_width).trim_end(), output.trim_end());
  };
}

macro_rules! assert_format_config {
  ($source:expr, $expected:expr, $config:expr) => {
    let output = format($source, &$config).expect("valid source");
    assert_eq!(output.trim_end(), $expected.trim_end());
    assert_eq!(
      format(&output, &$config).expect("valid output").trim_end(),
      output.trim_end()
    );
  };
}

// ---- seeds ----

#[test]
fn semicolon_policy() {
  let output = format("let x = 1", &Config::default()).unwrap();
  assert_eq!(output, "let x = 1;\n");
}

#[test]
fn leading_semicolon_guard_without_semicolons() {
  let config = Config {
    semi: false,
    ..Config::default()
  };
  let output = format("let x = 1;[1,2].map(f)", &config).unwrap();
  assert_eq!(output, "let x = 1\n;[1, 2].map(f)\n");

  // without the guard, re-parsing would swallow the bracket as a computed
  // member of the previous line
  let again = format(&output, &config).unwrap();
  assert_eq!(again, output);
}

#[test]
fn precedence_parens() {
  assert_format!("a || b && c", "a || (b && c);", 80);
}

#[test]
fn member_of_numeric_literal() {
  assert_format!("1..toString()", "1..toString();", 80);
  assert_format!("(1).toString()", "(1).toString();", 80);
}

#[test]
fn trailing_comma_es5() {
  let narrow = Config {
    print_width: 8,
    trailing_comma: TrailingComma::Es5,
    ..Config::default()
  };
  assert_format_config!("[1,2,3,]", "[\n  1,\n  2,\n  3,\n];", narrow);

  let wide = Config {
    trailing_comma: TrailingComma::Es5,
    ..Config::default()
  };
  assert_format_config!("[1,2,3,]", "[1, 2, 3];", wide);
}

#[test]
fn range_formatting_touches_only_the_range() {
  let config = Config {
    range_start: 21,
    range_end: 26,
    ..Config::default()
  };
  let source = "function f(){\n  x=1 ;y =2;\n}";
  let output = format(source, &config).unwrap();
  assert_eq!(output, "function f(){\n  x=1 ;y = 2;\n}");
}

// ---- configuration ----

#[test]
fn config_indentation() {
  let tabs = Config {
    indentation: Indentation::Tab,
    ..Config::default()
  };
  assert_format_config!("if (a) { b() }", "if (a) {\n\tb();\n}", tabs);

  let four = Config {
    indentation: 4.into(),
    ..Config::default()
  };
  assert_format_config!("if (a) { b() }", "if (a) {\n    b();\n}", four);
}

#[test]
fn config_quotes() {
  let single = Config {
    single_quote: true,
    ..Config::default()
  };
  assert_format_config!("let x = \"abc\"", "let x = 'abc';", single);
  // switching quotes would cost an escape, so keep the other quote
  assert_format_config!("let x = \"who's who\"", "let x = \"who's who\";", single);

  assert_format!("let x = 'abc'", "let x = \"abc\";", 80);
}

#[test]
fn config_bracket_spacing() {
  assert_format!("x = {a: 1}", "x = { a: 1 };", 80);

  let tight = Config {
    bracket_spacing: false,
    ..Config::default()
  };
  assert_format_config!("x = { a: 1 }", "x = {a: 1};", tight);
}

#[test]
fn config_trailing_comma_all_in_calls() {
  let config = Config {
    print_width: 10,
    trailing_comma: TrailingComma::All,
    ..Config::default()
  };
  assert_format_config!("f(aaaa, bbbb)", "f(\n  aaaa,\n  bbbb,\n);", config);

  let es5 = Config {
    print_width: 10,
    trailing_comma: TrailingComma::Es5,
    ..Config::default()
  };
  assert_format_config!("f(aaaa, bbbb)", "f(\n  aaaa,\n  bbbb\n);", es5);
}

// ---- statements ----

#[test]
fn if_else() {
  assert_format!("if (a) b(); else c()", "if (a)\n  b();\nelse\n  c();", 80);
  assert_format!(
    "if (a) { b() } else if (c) { d() } else { e() }",
    "if (a) {\n  b();\n} else if (c) {\n  d();\n} else {\n  e();\n}",
    80
  );
}

#[test]
fn loops() {
  assert_format!(
    "for (let i = 0; i < 10; i++) f(i)",
    "for (let i = 0; i < 10; i++)\n  f(i);",
    80
  );
  assert_format!("for (;;) {}", "for (;;) {}", 80);
  assert_format!(
    "for (const key in object) { f(key) }",
    "for (const key in object) {\n  f(key);\n}",
    80
  );
  assert_format!(
    "for (const item of items) { f(item) }",
    "for (const item of items) {\n  f(item);\n}",
    80
  );
  assert_format!("while (ready()) { tick() }", "while (ready()) {\n  tick();\n}", 80);
  assert_format!("do { a() } while (b)", "do {\n  a();\n} while (b);", 80);
}

#[test]
fn switch_statements() {
  let expected = indoc! {"
    switch (x) {
      case 1:
        a();
        break;
      default:
        b();
    }
  "};
  assert_format!("switch (x) { case 1: a(); break; default: b() }", expected, 80);
}

#[test]
fn try_catch_finally() {
  assert_format!(
    "try { a() } catch (error) { b(error) } finally { c() }",
    "try {\n  a();\n} catch (error) {\n  b(error);\n} finally {\n  c();\n}",
    80
  );
  assert_format!("try { a() } catch { b() }", "try {\n  a();\n} catch {\n  b();\n}", 80);
}

#[test]
fn variable_declarations() {
  assert_format!("let    a =     1", "let a = 1;", 80);
  assert_format!("const a = 1, b = 2", "const a = 1,\n  b = 2;", 80);
  assert_format!("var x", "var x;", 80);
}

#[test]
fn labels_and_jumps() {
  assert_format!(
    "outer: for (;;) { continue outer }",
    "outer: for (;;) {\n  continue outer;\n}",
    80
  );
  assert_format!("debugger", "debugger;", 80);
}

#[test]
fn throw_and_return() {
  assert_format!(
    "function f() { if (bad) throw new Error('no'); return 1 }",
    "function f() {\n  if (bad)\n    throw new Error(\"no\");\n  return 1;\n}",
    80
  );
}

#[test]
fn empty_statements_are_dropped() {
  assert_format!("a();;;b()", "a();\nb();", 80);
}

#[test]
fn directives_keep_their_quotes() {
  assert_format!("'use strict'\nlet x = 1", "'use strict';\nlet x = 1;", 80);
}

// ---- declarations ----

#[test]
fn functions() {
  assert_format!("function f() {}", "function f() {}", 80);
  assert_format!(
    "async function f(a, b = 1, ...rest) { await g() }",
    "async function f(a, b = 1, ...rest) {\n  await g();\n}",
    80
  );
  assert_format!(
    "function* gen() { yield 1; yield* inner() }",
    "function* gen() {\n  yield 1;\n  yield* inner();\n}",
    80
  );
}

#[test]
fn function_parameters_break_one_per_line() {
  assert_format!(
    "function f(firstParameter, secondParameter) {}",
    "function f(\n  firstParameter,\n  secondParameter\n) {}",
    30
  );
}

#[test]
fn classes() {
  let expected = indoc! {"
    class A extends B {
      constructor() {}
      static create() {
        return new A();
      }
      get x() {
        return 1;
      }
    }
  "};
  assert_format!(
    "class A extends B { constructor() {} static create() { return new A() } get x() { return 1 } }",
    expected,
    80
  );
  assert_format!("let a = class {}", "let a = class {};", 80);
}

#[test]
fn superclass_expressions_are_parenthesized() {
  assert_format!(
    "class A extends mixin(B) {}",
    "class A extends (mixin(B)) {}",
    80
  );
}

#[test]
fn imports_and_exports() {
  assert_format!(
    "import a, { b, c as d } from 'mod'",
    "import a, { b, c as d } from \"mod\";",
    80
  );
  assert_format!("import * as ns from 'mod'", "import * as ns from \"mod\";", 80);
  assert_format!("import 'polyfill'", "import \"polyfill\";", 80);
  assert_format!("export { a, b as c }", "export { a, b as c };", 80);
  assert_format!("export * from 'mod'", "export * from \"mod\";", 80);
  assert_format!("export const x = 1", "export const x = 1;", 80);
  assert_format!("export default function () {}", "export default function() {}", 80);
}

#[test]
fn import_specifiers_break_one_per_line() {
  assert_format!(
    "import { firstName, secondName, thirdName } from 'mod'",
    "import {\n  firstName,\n  secondName,\n  thirdName\n} from \"mod\";",
    30
  );
}

#[test]
fn type_aliases_and_annotations() {
  assert_format!(
    "type Handler = (event: Event) => void",
    "type Handler = (event: Event) => void;",
    80
  );
  assert_format!(
    "let x: ?string | Array<number> = null",
    "let x: ?string | Array<number> = null;",
    80
  );
  assert_format!("let x: [number, string] = y", "let x: [number, string] = y;", 80);
  assert_format!("let x: A & B = y", "let x: A & B = y;", 80);
  assert_format!("let x: number[] = y", "let x: number[] = y;", 80);
  assert_format!(
    "function f(a: number): string { return g(a) }",
    "function f(a: number): string {\n  return g(a);\n}",
    80
  );
}

#[test]
fn union_types_inside_arrays_are_parenthesized() {
  assert_format!(
    "let x: (number | string)[] = y",
    "let x: (number | string)[] = y;",
    80
  );
  assert_format!(
    "let f: (() => void) | number = g",
    "let f: (() => void) | number = g;",
    80
  );
}

// ---- expressions ----

#[test]
fn binary_chains() {
  assert_format!("a + b", "a + b;", 80);
  assert_format!("a    - b", "a - b;", 80);
  assert_format!("a + b * c", "a + b * c;", 80);
  assert_format!("(a + b) * c", "(a + b) * c;", 80);
  assert_format!("a - (b - c)", "a - (b - c);", 80);
  assert_format!("a && b && c", "a && b && c;", 80);
}

#[test]
fn binary_chains_break_before_the_operator() {
  assert_format!(
    "alphaValue + betaValue + gammaValue",
    "alphaValue\n  + betaValue\n  + gammaValue;",
    12
  );
}

#[test]
fn mixed_bitwise_chains_are_parenthesized() {
  assert_format!("a | b & c", "a | (b & c);", 80);
  assert_format!("a << b | c", "(a << b) | c;", 80);
}

#[test]
fn exponent_associativity() {
  assert_format!("a ** b ** c", "a ** b ** c;", 80);
  assert_format!("(a ** b) ** c", "(a ** b) ** c;", 80);
  assert_format!("(-a) ** b", "(-a) ** b;", 80);
}

#[test]
fn unary_and_update() {
  assert_format!("!x", "!x;", 80);
  assert_format!("typeof x", "typeof x;", 80);
  assert_format!("void 0", "void 0;", 80);
  assert_format!("-(-x)", "- -x;", 80);
  assert_format!("x++", "x++;", 80);
  assert_format!("--x", "--x;", 80);
}

#[test]
fn conditionals_break_over_branches() {
  assert_format!(
    "condition ? consequentValue : alternateValue",
    "condition\n  ? consequentValue\n  : alternateValue;",
    20
  );
  assert_format!("a ? b : c", "a ? b : c;", 80);
}

#[test]
fn member_chains_fold() {
  assert_format!("a.b.c", "a.b.c;", 80);
  assert_format!(
    "promiseLike.then(handleA).catch(handleB)",
    "promiseLike\n  .then(handleA)\n  .catch(handleB);",
    20
  );
  assert_format!("first[0][1]", "first[0][1];", 80);
}

#[test]
fn calls_and_arguments() {
  assert_format!("f()", "f();", 80);
  assert_format!("f(a, b)", "f(a, b);", 80);
  assert_format!("f(aaaa)", "f(\n  aaaa\n);", 5);
  assert_format!("f(...args)", "f(...args);", 80);
}

#[test]
fn callbacks_hug_the_argument_parentheses() {
  assert_format!(
    "items.forEach(item => { visit(item) })",
    "items.forEach(item => {\n  visit(item);\n});",
    80
  );
}

#[test]
fn new_expressions() {
  assert_format!("new Foo(1)", "new Foo(1);", 80);
  assert_format!("new Foo", "new Foo();", 80);
  assert_format!("new (f())()", "new (f())();", 80);
  assert_format!("new a.b()", "new a.b();", 80);
}

#[test]
fn arrays() {
  assert_format!("[]", "[];", 80);
  assert_format!("[1,2,3]", "[1, 2, 3];", 80);
  assert_format!("[1, , 2]", "[1, , 2];", 80);
  assert_format!("[...a, 1]", "[...a, 1];", 80);
}

#[test]
fn objects() {
  assert_format!("x = {}", "x = {};", 80);
  assert_format!("x = { a: 1, b, 'c': 2, [d]: 3, ...e }", "x = { a: 1, b, \"c\": 2, [d]: 3, ...e };", 80);
  assert_format!(
    "x = { aLongProperty: 1, anotherProperty: 2 }",
    "x = {\n  aLongProperty: 1,\n  anotherProperty: 2\n};",
    20
  );
}

#[test]
fn object_methods() {
  let expected = indoc! {"
    let o = {
      get a() {
        return 1;
      },
      b() {},
    };
  "};
  let config = Config {
    trailing_comma: TrailingComma::Es5,
    ..Config::default()
  };
  assert_format_config!("let o = { get a() { return 1 }, b() {} }", expected, config);
}

#[test]
fn arrows() {
  assert_format!("let f = x => x + 1", "let f = x => x + 1;", 80);
  assert_format!("let f = (a, b) => a + b", "let f = (a, b) => a + b;", 80);
  assert_format!("let f = () => 1", "let f = () => 1;", 80);
  assert_format!("let f = async x => x", "let f = async x => x;", 80);
  assert_format!(
    "let f = x => { return x }",
    "let f = x => {\n  return x;\n};",
    80
  );
  assert_format!("let f = x => ({})", "let f = x => ({});", 80);
}

#[test]
fn arrow_bodies_break_after_the_arrow() {
  assert_format!(
    "let f = x => aVeryLongCallIndeed(x)",
    "let f = x =>\n  aVeryLongCallIndeed(x);",
    25
  );
}

#[test]
fn arrow_statements_are_parenthesized() {
  assert_format!("x => y", "(x => y);", 80);
}

#[test]
fn destructuring() {
  assert_format!("let { a, b: c, d = 1 } = x", "let { a, b: c, d = 1 } = x;", 80);
  assert_format!("let [a, , b, ...rest] = x", "let [a, , b, ...rest] = x;", 80);
  assert_format!("({ a } = b)", "({ a } = b);", 80);
}

#[test]
fn sequences() {
  assert_format!("a, b, c", "a, b, c;", 80);
  assert_format!("a, (b, c)", "a, (b, c);", 80);
  assert_format!("f((a, b))", "f((a, b));", 80);
}

#[test]
fn templates() {
  assert_format!("`hello ${name}`", "`hello ${name}`;", 80);
  assert_format!("`a ${ 1 + 2 } b`", "`a ${1 + 2} b`;", 80);
  assert_format!("tag`a${b}c`", "tag`a${b}c`;", 80);
  // interior newlines are preserved verbatim
  assert_format!("`line one\nline two`", "`line one\nline two`;", 80);
}

#[test]
fn regex_literals() {
  assert_format!("x = /ab+c/gi", "x = /ab+c/gi;", 80);
}

#[test]
fn assignments() {
  assert_format!("x = y + z", "x = y + z;", 80);
  assert_format!("x += 1", "x += 1;", 80);
  assert_format!(
    "result = leftOperand || rightOperand",
    "result =\n  leftOperand || rightOperand;",
    30
  );
}

// ---- JSX ----

#[test]
fn jsx_elements() {
  assert_format!("<br />", "<br />;", 80);
  assert_format!(
    "let x = <div className=\"big\">{content}</div>",
    "let x = <div className=\"big\">{content}</div>;",
    80
  );
  assert_format!("let x = <Foo.Bar data-x={1} {...rest} />", "let x = <Foo.Bar data-x={1} {...rest} />;", 80);
}

#[test]
fn jsx_attributes_break_one_per_line() {
  assert_format!(
    "let x = <div className=\"big\" onClick={x}>{content}</div>",
    "let x = <div\n  className=\"big\"\n  onClick={x}\n>\n  {content}\n</div>;",
    30
  );
}

#[test]
fn jsx_bracket_same_line() {
  let config = Config {
    print_width: 30,
    jsx_bracket_same_line: true,
    ..Config::default()
  };
  assert_format_config!(
    "let x = <div className=\"big\" onClick={x}>{content}</div>",
    "let x = <div\n  className=\"big\"\n  onClick={x}>\n  {content}\n</div>;",
    config
  );
}

#[test]
fn jsx_text_collapses_whitespace() {
  assert_format!(
    "let x = <p>  hello   world  </p>",
    "let x = <p>hello world</p>;",
    80
  );
}

#[test]
fn jsx_returns_gain_parens_when_breaking() {
  let expected = indoc! {"
    function f() {
      return (
        <div
          className=\"wide\"
        >
          {x}
        </div>
      );
    }
  "};
  assert_format!(
    "function f() { return <div className=\"wide\">{x}</div> }",
    expected,
    20
  );
}

// ---- comments ----

#[test]
fn leading_comments() {
  assert_format!("// note\nlet x = 1", "// note\nlet x = 1;", 80);
  assert_format!("/* note */ let x = 1", "/* note */ let x = 1;", 80);
}

#[test]
fn trailing_comments_stay_on_their_line() {
  assert_format!("let x = 1 // trailing", "let x = 1; // trailing", 80);
  assert_format!(
    "let x = 1 // one\nlet y = 2 // two",
    "let x = 1; // one\nlet y = 2; // two",
    80
  );
}

#[test]
fn interior_line_comments_break_their_container() {
  assert_format!(
    "const o = {\n  a: 1, // x\n  b: 2,\n};",
    "const o = {\n  a: 1, // x\n  b: 2\n};",
    80
  );
  assert_format!("[1, // one\n2]", "[\n  1, // one\n  2\n];", 80);
  assert_format!("f(a, // first\nb)", "f(\n  a, // first\n  b\n);", 80);
}

#[test]
fn comments_in_empty_blocks() {
  assert_format!(
    "function f() {\n  // nothing yet\n}",
    "function f() {\n  // nothing yet\n}",
    80
  );
}

#[test]
fn comment_only_file() {
  assert_format!("// just a note", "// just a note", 80);
}

#[test]
fn blank_lines_are_preserved_once() {
  assert_format!(
    "let a = 1\n\n\n\nlet b = 2",
    "let a = 1;\n\nlet b = 2;",
    80
  );
}

#[test]
fn prettier_ignore_keeps_the_statement_verbatim() {
  assert_format!(
    "// prettier-ignore\nlet   x    =   1",
    "// prettier-ignore\nlet   x    =   1",
    80
  );
}

// ---- the driver ----

#[test]
fn empty_input() {
  assert_eq!(format("", &Config::default()).unwrap(), "");
  assert_eq!(format("   \n \n", &Config::default()).unwrap(), "");
}

#[test]
fn shebang_passthrough() {
  let output = format("#!/usr/bin/env node\nlet x = 1", &Config::default()).unwrap();
  assert_eq!(output, "#!/usr/bin/env node\nlet x = 1;\n");
}

#[test]
fn carriage_return_line_endings_are_preserved() {
  let output = format("let x = 1\r\nlet y = 2\r\n", &Config::default()).unwrap();
  assert_eq!(output, "let x = 1;\r\nlet y = 2;\r\n");
}

#[test]
fn check_matches_format() {
  let config = Config::default();
  assert!(check("let x = 1;\n", &config).unwrap());
  assert!(!check("let   x = 1", &config).unwrap());
}

#[test]
fn debug_check_accepts_ordinary_sources() {
  let source = indoc! {"
    // header
    import { run } from \"./run\";

    function main(args) {
      const options = { verbose: true, retries: 3 };
      if (!args.length) {
        return run(options);
      }
      return args.map(argument => run({ ...options, argument }));
    }

    export default main;
  "};
  debug_check(source, &Config::default()).unwrap();
}

#[test]
fn parse_errors_are_reported() {
  assert!(format("let x = ;", &Config::default()).is_err());
  assert!(format("(", &Config::default()).is_err());
  assert!(format("'unterminated", &Config::default()).is_err());
}

#[test]
fn invalid_config_is_rejected() {
  let config = Config {
    print_width: 0,
    ..Config::default()
  };
  assert!(format("a", &config).is_err());

  let config = Config {
    range_start: 10,
    range_end: 2,
    ..Config::default()
  };
  assert!(format("a", &config).is_err());
}

#[test]
fn no_semi_guards_hazard_statements() {
  let config = Config {
    semi: false,
    ..Config::default()
  };
  assert_format_config!("a();`t`;-x", "a()\n;`t`\n;-x", config);
}

#[test]
fn idempotence_over_a_larger_module() {
  let source = indoc! {"
    import defaultMember, { named as alias } from \"module\";

    const table = { rows: [1, 2, 3], columns: [\"a\", \"b\"] };

    class Grid extends Component {
      constructor(props) {
        super(props);
        this.state = { selected: null };
      }
      select(row) {
        this.setState({ selected: row });
      }
    }

    function layout(grid, width = 80) {
      for (let i = 0; i < grid.rows; i++) {
        if (i % 2 === 0) {
          continue;
        }
        emit(grid, i);
      }
      return grid;
    }

    export default Grid;
  "};
  let once = format(source, &Config::default()).unwrap();
  let twice = format(&once, &Config::default()).unwrap();
  assert_eq!(once, twice);
}
