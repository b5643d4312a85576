use comet::{
    ast::{BinaryOperator, EMPTY_LOOP_VARIABLE, Expression, PrefixOperator, Program, Statement},
    interpreter::parser::core::Parser,
};

fn parse_ok(source: &str) -> Program {
    let mut parser = Parser::new(source);
    let program = parser.parse();
    assert!(!parser.errors.has_any(),
            "unexpected parse errors for {source:?}:\n{}",
            parser.errors);
    program
}

fn parse_errors(source: &str) -> String {
    let mut parser = Parser::new(source);
    let _ = parser.parse();
    assert!(parser.errors.has_any(), "expected parse errors for {source:?}");
    parser.errors.to_string()
}

fn first_expression(program: &Program) -> &Expression {
    match &program.statements[0] {
        Statement::Expression { expression, .. } => expression,
        other => panic!("expected an expression statement, got {other:?}"),
    }
}

fn number(value: i64) -> Expression {
    Expression::Number { value, line: 1 }
}

fn binary(op: BinaryOperator, left: Expression, right: Expression) -> Expression {
    Expression::Binary { op,
                         left: Box::new(left),
                         right: Box::new(right),
                         line: 1 }
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let program = parse_ok("1 + 2 * 3");
    let expected = binary(BinaryOperator::Add,
                          number(1),
                          binary(BinaryOperator::Mul, number(2), number(3)));

    assert_eq!(first_expression(&program), &expected);
}

#[test]
fn grouping_overrides_precedence() {
    let program = parse_ok("(1 + 2) * 3");
    let expected =
        binary(BinaryOperator::Mul,
               Expression::Grouping { inner: Box::new(binary(BinaryOperator::Add,
                                                             number(1),
                                                             number(2))),
                                      line:  1, },
               number(3));

    assert_eq!(first_expression(&program), &expected);
}

#[test]
fn range_binds_tighter_than_addition() {
    let program = parse_ok("1 + 2..5");
    let expected = binary(BinaryOperator::Add,
                          number(1),
                          binary(BinaryOperator::Range, number(2), number(5)));

    assert_eq!(first_expression(&program), &expected);
}

#[test]
fn comparison_binds_looser_than_arithmetic() {
    let program = parse_ok("1 + 2 == 3");
    let expected = binary(BinaryOperator::Equal,
                          binary(BinaryOperator::Add, number(1), number(2)),
                          number(3));

    assert_eq!(first_expression(&program), &expected);
}

#[test]
fn prefix_operand_extends_to_the_right() {
    let program = parse_ok("-1 + 2");
    let expected = Expression::Prefix { op:    PrefixOperator::Negate,
                                        right: Box::new(binary(BinaryOperator::Add,
                                                               number(1),
                                                               number(2))),
                                        line:  1, };

    assert_eq!(first_expression(&program), &expected);
}

#[test]
fn declaration_statement_shape() {
    let program = parse_ok("var a = 1");

    assert_eq!(program.statements[0],
               Statement::Declaration { name:  "a".to_string(),
                                        value: number(1),
                                        line:  1, });
}

#[test]
fn identifier_lookahead_selects_call_assign_or_reference() {
    let program = parse_ok("a\na = 1\na(1, 2)");

    assert_eq!(program.statements.len(), 3);
    assert!(matches!(&program.statements[0],
                     Statement::Expression { expression: Expression::Identifier { name, .. }, .. }
                     if name == "a"));
    assert!(matches!(&program.statements[1],
                     Statement::Expression { expression: Expression::Assign { name, .. }, .. }
                     if name == "a"));
    assert!(matches!(&program.statements[2],
                     Statement::Expression { expression: Expression::Call { name, arguments, .. }, .. }
                     if name == "a" && arguments.len() == 2));
}

#[test]
fn call_argument_lists() {
    let program = parse_ok("f()\nf(1)\nf(1, 2 + 3, g(4))");

    for (index, expected_len) in [(0usize, 0usize), (1, 1), (2, 3)] {
        match &program.statements[index] {
            Statement::Expression { expression: Expression::Call { arguments, .. },
                                    .. } => {
                assert_eq!(arguments.len(), expected_len);
            },
            other => panic!("expected a call, got {other:?}"),
        }
    }
}

#[test]
fn if_without_else_gets_an_empty_else_block() {
    let program = parse_ok("if true { 1 }");

    match &program.statements[0] {
        Statement::If { else_block, .. } => assert!(else_block.statements.is_empty()),
        other => panic!("expected an if statement, got {other:?}"),
    }
}

#[test]
fn statement_following_an_if_is_not_swallowed() {
    let program = parse_ok("if true { }\nvar a = 5");

    assert_eq!(program.statements.len(), 2);
    assert!(matches!(&program.statements[1], Statement::Declaration { name, .. } if name == "a"));
}

#[test]
fn if_with_else_keeps_both_blocks() {
    let program = parse_ok("if a == 1 { return 1 } else { return 2 }");

    match &program.statements[0] {
        Statement::If { then_block, else_block, .. } => {
            assert_eq!(then_block.statements.len(), 1);
            assert_eq!(else_block.statements.len(), 1);
        },
        other => panic!("expected an if statement, got {other:?}"),
    }
}

#[test]
fn function_statement_shape() {
    let program = parse_ok("func add(a, b) { return a + b }");

    match &program.statements[0] {
        Statement::Function(function) => {
            assert_eq!(function.name, "add");
            assert_eq!(function.parameters, vec!["a".to_string(), "b".to_string()]);
            assert_eq!(function.body.statements.len(), 1);
        },
        other => panic!("expected a function statement, got {other:?}"),
    }
}

#[test]
fn for_statement_value_defaults_to_the_placeholder() {
    let program = parse_ok("for i in 0..9 { }");

    match &program.statements[0] {
        Statement::For { key, value, .. } => {
            assert_eq!(key, "i");
            assert_eq!(value, EMPTY_LOOP_VARIABLE);
        },
        other => panic!("expected a for statement, got {other:?}"),
    }
}

#[test]
fn for_statement_with_an_explicit_value_identifier() {
    let program = parse_ok("for k, v in 0..9 { }");

    match &program.statements[0] {
        Statement::For { key, value, .. } => {
            assert_eq!(key, "k");
            assert_eq!(value, "v");
        },
        other => panic!("expected a for statement, got {other:?}"),
    }
}

#[test]
fn struct_declaration_collects_methods() {
    let program = parse_ok("struct A { func init() { }\nfunc get() { return 1 } }");

    match &program.statements[0] {
        Statement::StructDeclaration { name, methods, .. } => {
            assert_eq!(name, "A");
            assert_eq!(methods.len(), 2);
            assert_eq!(methods[0].name, "init");
            assert_eq!(methods[1].name, "get");
        },
        other => panic!("expected a struct declaration, got {other:?}"),
    }
}

#[test]
fn index_access_chains_left_to_right() {
    let program = parse_ok("a[0][1]");

    match first_expression(&program) {
        Expression::Index { target, .. } => {
            assert!(matches!(**target, Expression::Index { .. }));
        },
        other => panic!("expected an index access, got {other:?}"),
    }
}

#[test]
fn new_call_shape() {
    let program = parse_ok("new Point(1, 2)");

    match first_expression(&program) {
        Expression::New { type_name, arguments, .. } => {
            assert_eq!(type_name, "Point");
            assert_eq!(arguments.len(), 2);
        },
        other => panic!("expected a new call, got {other:?}"),
    }
}

#[test]
fn empty_and_nested_array_literals() {
    let program = parse_ok("[]\n[1, [2, 3]]");

    match first_expression(&program) {
        Expression::Array { elements, .. } => assert!(elements.is_empty()),
        other => panic!("expected an array literal, got {other:?}"),
    }
    match &program.statements[1] {
        Statement::Expression { expression: Expression::Array { elements, .. },
                                .. } => {
            assert_eq!(elements.len(), 2);
            assert!(matches!(elements[1], Expression::Array { .. }));
        },
        other => panic!("expected an array literal, got {other:?}"),
    }
}

#[test]
fn semicolons_are_tolerated_between_statements() {
    let program = parse_ok("var a = 1;\nvar b = 2;");
    assert_eq!(program.statements.len(), 2);
}

#[test]
fn every_input_yields_a_root_node() {
    let inputs = [")))",
                  "[1,",
                  "struct A {",
                  "func",
                  "var",
                  "if",
                  "new",
                  "\"unterminated",
                  "@ # $",
                  ""];

    for source in inputs {
        let mut parser = Parser::new(source);
        let _program = parser.parse();
    }
}

#[test]
fn expected_token_errors_carry_the_position() {
    let errors = parse_errors("var a 5");
    assert!(errors.contains("Expected = got 5 instead"), "got: {errors}");
    assert!(errors.contains("line 1, column 7"), "got: {errors}");
}

#[test]
fn errors_past_the_first_line_report_the_right_line() {
    let errors = parse_errors("var a = 1\nvar b = )");
    assert!(errors.contains("line 2"), "got: {errors}");
    assert!(errors.contains("No parsing function found for )"), "got: {errors}");
}

#[test]
fn oversized_number_literals_are_reported_and_parsed_as_zero() {
    let mut parser = Parser::new("92233720368547758079");
    let program = parser.parse();

    assert!(parser.errors
                  .to_string()
                  .contains("Could not parse integer value 92233720368547758079"));
    assert_eq!(first_expression(&program), &number(0));
}

#[test]
fn unterminated_strings_are_recoverable_errors() {
    let errors = parse_errors("\"abc");
    assert!(errors.contains("without closing the string quote"), "got: {errors}");
}

#[test]
fn unclosed_blocks_report_end_of_input() {
    let errors = parse_errors("{ var a = 1");
    assert!(errors.contains("Unexpected EOF"), "got: {errors}");
}

#[test]
fn struct_bodies_only_allow_function_declarations() {
    let errors = parse_errors("struct A { var x = 1 }");
    assert!(errors.contains("Expected a function declaration"), "got: {errors}");
}

#[test]
fn printing_then_reparsing_preserves_the_tree() {
    let sources = ["1 + 2 * 3",
                   "(1 + 2) * 3",
                   "-1 + 2",
                   "var a = [1, 2, [3]]",
                   "a[1][0]",
                   "x = x + 1",
                   "1..10",
                   "if a == 1 { return 1 } else { return 2 }",
                   "if a == 1 { }",
                   "func add(a, b) { return a + b }",
                   "for i in 0..9 { println(i) }",
                   "for k, v in 0..3 { }",
                   "struct A { func init() { this.x = 5 }\nfunc get() { return this.x } }",
                   "new A(1).get()",
                   "s.field = 1 + 2"];

    for source in sources {
        let printed = parse_ok(source).to_string();
        let reparsed = parse_ok(&printed);

        assert_eq!(reparsed.to_string(), printed, "round trip diverged for {source:?}");
    }
}
