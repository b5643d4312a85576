use std::fs;

use comet::{
    interpreter::{evaluator::core::Evaluator, parser::core::Parser, value::core::Value},
    repl, run_source,
};
use walkdir::WalkDir;

fn eval_program(source: &str) -> Value {
    run_source(source).unwrap_or_else(|error| {
                          panic!("evaluation failed for {source:?}:\n{error}")
                      })
}

fn eval_error(source: &str) -> String {
    match run_source(source) {
        Err(error) => error.to_string(),
        Ok(value) => panic!("expected an error for {source:?}, got {value}"),
    }
}

fn eval_with_state(source: &str) -> Evaluator {
    let mut parser = Parser::new(source);
    let program = parser.parse();
    assert!(!parser.errors.has_any(),
            "parse errors for {source:?}:\n{}",
            parser.errors);
    let mut evaluator = Evaluator::new();
    evaluator.eval(&program).unwrap_or_else(|error| {
                                panic!("evaluation failed for {source:?}:\n{error}")
                            });
    evaluator
}

#[test]
fn demo_scripts_run_cleanly() {
    let mut count = 0;

    for entry in
        WalkDir::new("demos").into_iter()
                             .filter_map(Result::ok)
                             .filter(|e| e.path().extension().is_some_and(|ext| ext == "comet"))
    {
        count += 1;
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("failed to read {path:?}: {e}"));

        if let Err(error) = run_source(&source) {
            panic!("demo script {path:?} failed:\n{error}");
        }
    }

    assert!(count > 0, "no demo scripts found under demos/");
}

#[test]
fn integer_arithmetic() {
    let tests: &[(&str, i64)] = &[("10", 10),
                                  ("-1", -1),
                                  ("9223372036854775807", i64::MAX),
                                  ("1 + 1", 2),
                                  ("1 - 1", 0),
                                  ("2 * 15", 30),
                                  ("15 / 3", 5),
                                  ("1 + 2 * 3", 7),
                                  ("1 * -2", -2),
                                  ("(1)", 1),
                                  ("(1 + 2) * 3", 9)];

    for (source, expected) in tests {
        assert_eq!(eval_program(source), Value::Int(*expected), "source: {source}");
    }
}

#[test]
fn boolean_operations() {
    let tests: &[(&str, bool)] = &[("true", true),
                                   ("false", false),
                                   ("!true", false),
                                   ("!!true", true),
                                   ("true == true", true),
                                   ("true != false", true),
                                   ("true == false", false),
                                   ("1 < 2", true),
                                   ("2 <= 2", true),
                                   ("3 > 4", false),
                                   ("4 >= 4", true),
                                   ("1 == 1", true),
                                   ("1 != 1", false),
                                   ("1 == true", false),
                                   ("1 != true", true)];

    for (source, expected) in tests {
        assert_eq!(eval_program(source), Value::Bool(*expected), "source: {source}");
    }
}

#[test]
fn declarations_bind_in_scope() {
    let evaluator = eval_with_state("var a = 1 * 2 + 1\nvar c = 10\nvar d = a * c");

    assert_eq!(evaluator.get_variable("a"), Some(&Value::Int(3)));
    assert_eq!(evaluator.get_variable("c"), Some(&Value::Int(10)));
    assert_eq!(evaluator.get_variable("d"), Some(&Value::Int(30)));
    assert_eq!(evaluator.get_variable("missing"), None);
}

#[test]
fn declaration_evaluates_to_the_bound_value() {
    assert_eq!(eval_program("var a = 5"), Value::Int(5));
}

#[test]
fn two_declarations_then_sum() {
    assert_eq!(eval_program("var a = 1\nvar b = 2\na + b"), Value::Int(3));
}

#[test]
fn assignment_updates_nearest_binding() {
    assert_eq!(eval_program("var a = 1\na = 41\na + 1"), Value::Int(42));
}

#[test]
fn function_call_updates_outer_binding() {
    // Call frames chain to the caller's scope, so assignment inside the
    // function reaches the outer variable.
    assert_eq!(eval_program("var a = 1\nfunc f() { a = 5 }\nf()\na"), Value::Int(5));
}

#[test]
fn inner_declaration_shadows_without_destroying() {
    let source = "var a = 1\nfunc f() { var a = 2\nreturn a }\nvar b = f()\na + b * 10";
    assert_eq!(eval_program(source), Value::Int(21));
}

#[test]
fn conditionals_pick_a_branch() {
    assert_eq!(eval_program("if (1 == 1) { return 10 } else { return 20 }"), Value::Int(10));
    assert_eq!(eval_program("if (1 == 2) { return 10 } else { return 20 }"), Value::Int(20));
    assert_eq!(eval_program("if true { 1 }"), Value::Int(1));
}

#[test]
fn empty_then_branch_is_legal() {
    assert_eq!(eval_program("if true { }"), Value::Nop);
}

#[test]
fn statement_after_if_without_else_still_runs() {
    assert_eq!(eval_program("if 1 == 2 { }\nvar a = 5\na"), Value::Int(5));
}

#[test]
fn return_stops_the_program() {
    assert_eq!(eval_program("9 * 9\nreturn 10\n8 + 10"), Value::Int(10));
}

#[test]
fn return_unwinds_nested_blocks() {
    let source = "if (true) {\n  if (true) {\n    return 10\n  }\n  return 1\n}";
    assert_eq!(eval_program(source), Value::Int(10));
}

#[test]
fn return_unwraps_once_at_the_call_boundary() {
    assert_eq!(eval_program("func f() { return 10 }\nf()"), Value::Int(10));
    assert_eq!(eval_program("func g() { if true { return 7 }\nreturn 8 }\ng()"), Value::Int(7));
}

#[test]
fn function_without_return_yields_its_last_value() {
    assert_eq!(eval_program("func f() { 1 + 1 }\nf()"), Value::Int(2));
}

#[test]
fn empty_function_body_returns_nop() {
    assert_eq!(eval_program("func f() { }\nf()"), Value::Nop);
}

#[test]
fn functions_are_first_class_values() {
    let source = "func a() { return 1 }\nfunc b(v, f) { return v * f() }\nb(2, a)";
    assert_eq!(eval_program(source), Value::Int(2));
}

#[test]
fn recursive_fibonacci() {
    let source = "func fib(n) { if n <= 1 { return n }\nreturn fib(n - 1) + fib(n - 2) }\nfib(10)";
    assert_eq!(eval_program(source), Value::Int(55));
}

#[test]
fn string_concatenation() {
    assert_eq!(eval_program(r#""Hello " + "world!""#), Value::from("Hello world!"));
}

#[test]
fn string_repetition_from_both_sides() {
    assert_eq!(eval_program(r#""Hello" * 3"#), Value::from("HelloHelloHello"));
    assert_eq!(eval_program(r#"3 * "Hello""#), Value::from("HelloHelloHello"));
}

#[test]
fn mixed_concatenation_promotes_to_string() {
    assert_eq!(eval_program(r#""Hello" + 42"#), Value::from("Hello42"));
    assert_eq!(eval_program(r#"42 + "Hello""#), Value::from("42Hello"));
    assert_eq!(eval_program(r#""Hello" + true"#), Value::from("Hellotrue"));
    assert_eq!(eval_program(r#"false + "Hello""#), Value::from("falseHello"));
    assert_eq!(eval_program(r#"func f() { }
"call " + f"#),
               Value::from("call CometFunc"));
}

#[test]
fn string_built_inside_a_loop() {
    assert_eq!(eval_program("var s = \"\"\nfor i in 1..3 { s = s + i }\ns"), Value::from("123"));
}

#[test]
fn array_literals() {
    assert_eq!(eval_program("[]"), Value::from(vec![]));
    assert_eq!(eval_program("[1, 2, 3]"),
               Value::from(vec![Value::Int(1), Value::Int(2), Value::Int(3)]));
    assert_eq!(eval_program(r#"["comet", "42"]"#),
               Value::from(vec![Value::from("comet"), Value::from("42")]));
}

#[test]
fn array_elements_evaluate_in_order() {
    let source = "var n = 0\nfunc next() { n = n + 1\nreturn n }\n[next(), next(), next()]";
    assert_eq!(eval_program(source),
               Value::from(vec![Value::Int(1), Value::Int(2), Value::Int(3)]));
}

#[test]
fn array_indexing() {
    assert_eq!(eval_program("var a = [0, 1]\na[0]"), Value::Int(0));
    assert_eq!(eval_program("[1, 2, 3][2]"), Value::Int(3));
    assert_eq!(eval_program("func getArray() { return [1, 2, 3] }\ngetArray()[0]"), Value::Int(1));
    assert_eq!(eval_program("var a = [[1, 42], [2, 3]]\na[0][1]"), Value::Int(42));
    assert_eq!(eval_program("var a = [[1, 2], [3, 4]]\na[1][0]"), Value::Int(3));
}

#[test]
fn ranges_are_inclusive_values() {
    assert_eq!(eval_program("1..5"), Value::Range { from: 1, to: 5 });
}

#[test]
fn for_loop_iteration_counts() {
    assert_eq!(eval_program("var c = 0\nfor k in 1..3 { c = c + 1 }\nc"), Value::Int(3));
    assert_eq!(eval_program("var c = 0\nfor k in 5..1 { c = c + 1 }\nc"), Value::Int(0));
    assert_eq!(eval_program("var c = 0\nfor k in 2..2 { c = c + 1 }\nc"), Value::Int(1));
}

#[test]
fn for_loop_binds_key_and_value_to_the_same_integer() {
    assert_eq!(eval_program("var s = 0\nfor k, v in 1..3 { s = s + k + v }\ns"), Value::Int(12));
}

#[test]
fn nested_for_loops() {
    let source = "var a = 10\nfor i in 0..2 {\n  for j in 0..2 {\n    a = a + i * j\n  }\n}\na";
    assert_eq!(eval_program(source), Value::Int(19));
}

#[test]
fn for_loop_evaluates_to_nop_and_releases_bindings() {
    assert_eq!(eval_program("for i in 1..3 { }"), Value::Nop);

    let message = eval_error("for i in 1..3 { }\ni");
    assert!(message.contains("Identifier (i) is not bounded to any value"), "got: {message}");
}

#[test]
fn return_inside_a_loop_body_does_not_leave_the_function() {
    let source = "func f() { for i in 1..3 { return i }\nreturn 99 }\nf()";
    assert_eq!(eval_program(source), Value::Int(99));
}

#[test]
fn struct_types_are_registered() {
    let evaluator = eval_with_state("struct A { func init() { var temp = 10 } }");

    let def = evaluator.types.get("A").expect("type A registered");
    assert_eq!(def.name, "A");
    assert_eq!(def.methods.len(), 1);
}

#[test]
fn duplicate_method_aborts_the_struct_declaration() {
    let mut parser = Parser::new("struct a { func testa() { }\nfunc testa(x) { } }");
    let program = parser.parse();
    assert!(!parser.errors.has_any());

    let mut evaluator = Evaluator::new();
    let error = evaluator.eval(&program).unwrap_err().to_string();

    assert!(error.contains("Method already exist with the name 'testa' on 'a' struct"),
            "got: {error}");
    assert!(!evaluator.types.contains_key("a"));
}

#[test]
fn instance_without_constructor_starts_empty() {
    let source = "struct A { }\nvar a = new A()\nvar b = new A()";
    let evaluator = eval_with_state(source);

    let Some(Value::Instance(a)) = evaluator.get_variable("a") else {
        panic!("a is not an instance");
    };
    assert_eq!(a.struct_def.name, "A");
    assert!(a.fields.borrow().is_empty());
    assert!(matches!(evaluator.get_variable("b"), Some(Value::Instance(_))));
}

#[test]
fn constructor_and_method_dispatch_through_this() {
    let source = "struct A { func init() { this.x = 5 }\nfunc get() { return this.x } }\n\
                  var a = new A()\na.get()";
    assert_eq!(eval_program(source), Value::Int(5));
}

#[test]
fn constructor_arguments_bind_positionally() {
    let source = "struct Point { func init(x, y) { this.x = x\nthis.y = y }\n\
                  func sum() { return this.x + this.y } }\n\
                  var p = new Point(3, 4)\np.sum()";
    assert_eq!(eval_program(source), Value::Int(7));
}

#[test]
fn methods_can_grow_fields_and_mutate_state() {
    let source = "struct Counter { func init() { this.n = 0 }\n\
                  func bump() { this.n = this.n + 1 } }\n\
                  var c = new Counter()\nc.bump()\nc.bump()\nc.n";
    assert_eq!(eval_program(source), Value::Int(2));
}

#[test]
fn instances_are_shared_by_reference() {
    let source = "struct A { func init() { this.x = 1 } }\n\
                  var a = new A()\nvar b = a\nb.x = 5\na.x";
    assert_eq!(eval_program(source), Value::Int(5));
}

#[test]
fn field_reads_and_writes_through_the_dot() {
    let source = "struct A { }\nvar a = new A()\na.x = 41\na.x + 1";
    assert_eq!(eval_program(source), Value::Int(42));
}

#[test]
fn this_does_not_leak_out_of_method_calls() {
    let source = "struct A { func init() { } }\nvar a = new A()\nthis";
    let message = eval_error(source);
    assert!(message.contains("Identifier (this) is not bounded to any value"), "got: {message}");
}

#[test]
fn method_call_on_a_fresh_instance_expression() {
    let source = "struct A { func init() { this.x = 9 }\nfunc get() { return this.x } }\n\
                  new A().get()";
    assert_eq!(eval_program(source), Value::Int(9));
}

#[test]
fn builtins_shadow_user_functions() {
    assert_eq!(eval_program("func println(x) { return 42 }\nprintln(\"shadowed\")"), Value::Nop);
}

#[test]
fn registered_builtins_receive_evaluated_arguments() {
    let mut parser = Parser::new("sum(1 + 1, 40)");
    let program = parser.parse();
    assert!(!parser.errors.has_any());

    let mut evaluator = Evaluator::new();
    evaluator.register_builtin("sum", Box::new(|args| {
                                   let mut total = 0;
                                   for value in args {
                                       match value {
                                           Value::Int(n) => total += n,
                                           other => return Err(format!("Expected INTEGER, got {}.",
                                                                       other.type_name())),
                                       }
                                   }
                                   Ok(Value::Int(total))
                               }));

    assert_eq!(evaluator.eval(&program), Ok(Value::Int(42)));
}

#[test]
fn operator_type_errors() {
    let tests: &[(&str, &str)] =
        &[("1 + true", "Cannot apply operator + on given types INTEGER and BOOLEAN"),
          ("1 * true", "Cannot apply operator * on given types INTEGER and BOOLEAN"),
          ("1 - true", "Cannot apply operator - on given types INTEGER and BOOLEAN"),
          ("true > 1", "Cannot apply operator > on given types BOOLEAN and INTEGER"),
          ("true < 1", "Cannot apply operator < on given types BOOLEAN and INTEGER"),
          ("-true", "Cannot apply operator (-) on none INTEGER type BOOLEAN"),
          ("-false", "Cannot apply operator (-) on none INTEGER type BOOLEAN"),
          ("!1", "Cannot apply operator (!) on none BOOLEAN type INTEGER"),
          ("true + false", "None-applicable operator + for booleans"),
          (r#""a" * "b""#, "Cannot execute binary operator '*' on strings"),
          (r#""a" - 1"#, "Cannot apply operation '-' on operands of type 'STR' and 'INTEGER'"),
          (r#""ab" * -2"#, "Cannot repeat a string a negative number of times (-2)")];

    for (source, expected) in tests {
        let message = eval_error(source);
        assert!(message.contains(expected), "source: {source}\ngot: {message}");
    }
}

#[test]
fn errors_propagate_out_of_nested_blocks() {
    let message = eval_error("if (true) {\n  !1\n  false\n}");
    assert!(message.contains("Cannot apply operator (!) on none BOOLEAN type INTEGER"),
            "got: {message}");
}

#[test]
fn error_messages_carry_the_source_line() {
    let message = eval_error("var a = 1\n1 + true");
    assert!(message.contains("Error on line 2"), "got: {message}");
}

#[test]
fn binding_errors() {
    let message = eval_error("var a = b * 10");
    assert!(message.contains("Identifier (b) is not bounded to any value, have you tried declaring it?"),
            "got: {message}");

    let message = eval_error("c = 10");
    assert!(message.contains("Identifier (c) is not bounded to any value"), "got: {message}");
}

#[test]
fn call_errors() {
    let message = eval_error("nope()");
    assert!(message.contains("Cannot find callable symbol nope"), "got: {message}");

    let message = eval_error("var x = 1\nx()");
    assert!(message.contains("Cannot invoke none callable object of type INTEGER"),
            "got: {message}");

    let message = eval_error("func f(a, b) { return a }\nf(1)");
    assert!(message.contains("Function 'f' expects 2 arguments, 1 were given"), "got: {message}");
}

#[test]
fn conditional_test_must_be_boolean() {
    let message = eval_error("if 1 { }");
    assert!(message.contains("Test part of the if statement should evaluate to CometBool, evaluated to CometInt(1) instead"),
            "got: {message}");
}

#[test]
fn index_errors() {
    let message = eval_error("[1, 2][5]");
    assert!(message.contains("Array access out of bounds, array of length 2, index was: 5"),
            "got: {message}");

    let message = eval_error("[1, 2][-1]");
    assert!(message.contains("index was: -1"), "got: {message}");

    let message = eval_error("[1][true]");
    assert!(message.contains("Expected CometInt got BOOLEAN"), "got: {message}");

    let message = eval_error("5[0]");
    assert!(message.contains("Expected CometArray got INTEGER"), "got: {message}");
}

#[test]
fn arithmetic_fault_errors() {
    let message = eval_error("1 / 0");
    assert!(message.contains("Division by zero"), "got: {message}");

    let message = eval_error("9223372036854775807 + 1");
    assert!(message.contains("Integer overflow"), "got: {message}");
}

#[test]
fn for_loop_requires_a_range() {
    let message = eval_error("for i in 5 { }");
    assert!(message.contains("For loops can only iterate over RANGE values, got INTEGER instead"),
            "got: {message}");
}

#[test]
fn struct_errors() {
    let message = eval_error("new B()");
    assert!(message.contains("Type 'B' not found"), "got: {message}");

    let message = eval_error("struct A { }\nnew A(1)");
    assert!(message.contains("Cannot find a defined constructor on the 'A' type"),
            "got: {message}");

    let message = eval_error("struct A { }\nvar a = new A()\na.missing()");
    assert!(message.contains("Could not find method 'missing' on type 'A'"), "got: {message}");

    let message = eval_error("struct A { func set(x) { this.v = x } }\nvar a = new A()\na.set()");
    assert!(message.contains("Method 'set' on type 'A' expects at least 1 parameters, 0 were given"),
            "got: {message}");

    let message = eval_error("struct A { }\nvar a = new A()\na.x");
    assert!(message.contains("Field 'x' is not defined on instance of type 'A'"), "got: {message}");

    let message = eval_error("var x = 1\nx.foo()");
    assert!(message.contains("Cannot call method 'foo' on none object type"), "got: {message}");

    let message = eval_error("var x = 1\nx.y");
    assert!(message.contains("Cannot access field 'y' on none object type INTEGER"),
            "got: {message}");
}

#[test]
fn builtin_argument_errors() {
    let message = eval_error("println(1, 2)");
    assert!(message.contains("Expected 0 or 1 arguments, got 2."), "got: {message}");

    let message = eval_error("printf()");
    assert!(message.contains("Expected 1 or more arguments, got none."), "got: {message}");

    let message = eval_error("printf(1)");
    assert!(message.contains("First argument expected to be CometString got 'INTEGER' instead"),
            "got: {message}");
}

#[test]
fn printing_builtins_return_nop() {
    assert_eq!(eval_program("println()"), Value::Nop);
    assert_eq!(eval_program("println(42)"), Value::Nop);
    assert_eq!(eval_program(r#"printf("%d-%d", 1, 2)"#), Value::Nop);
}

#[test]
fn repl_session_keeps_state_and_handles_meta_commands() {
    let input = b"var a = 2\na + 3\n/scope\n/exit\n";
    let mut output = Vec::new();

    repl::start(&mut &input[..], &mut output).unwrap();
    let text = String::from_utf8(output).unwrap();

    assert!(text.contains("CometInt(2)"), "got: {text}");
    assert!(text.contains("CometInt(5)"), "got: {text}");
    assert!(text.contains("a = INTEGER"), "got: {text}");
    assert!(text.contains("==== Types ===="), "got: {text}");
}

#[test]
fn repl_reports_parse_errors_without_evaluating() {
    let input = b"var = 1\n/exit\n";
    let mut output = Vec::new();

    repl::start(&mut &input[..], &mut output).unwrap();
    let text = String::from_utf8(output).unwrap();

    assert!(text.contains("Expected Identifier got = instead"), "got: {text}");
}
