//! # comet
//!
//! comet is a small, dynamically typed scripting language with C-family
//! syntax: variables, first-class functions, conditionals, `for ... in
//! range` loops, arrays, strings, and user-defined structs with methods and
//! an `init` constructor convention.
//!
//! The crate implements the language core as a classic three-stage
//! pipeline: a lexer producing positioned tokens, a Pratt parser building a
//! syntax tree while collecting diagnostics in an error bag, and a
//! tree-walking evaluator with a scope chain, dynamic operator dispatch and
//! return unwinding through a sentinel value.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc, clippy::large_enum_variant, clippy::result_large_err)]

use crate::{
    ast::Program,
    error::{CometError, ErrorBag},
    interpreter::{evaluator::core::Evaluator, parser::core::Parser, value::core::Value},
};

/// Defines the structure of parsed code.
///
/// This module declares the expression and statement enums that represent
/// source code as a tree, the operator enums they carry, and display
/// implementations that render nodes back to canonical source text.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source line numbers to nodes for runtime error reporting.
/// - Renders trees back to parseable source.
pub mod ast;
/// A tree printer used by the `--debug` driver flag.
pub mod debug;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while lexing, parsing
/// or evaluating code, the bag the parser collects syntax errors in, and the
/// combined error type returned by the crate-level entry points.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches source positions and detailed messages for user feedback.
/// - Integrates with the standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, runtime values
/// and the builtin registry to provide a complete runtime for comet source
/// code.
///
/// # Responsibilities
/// - Coordinates the core components: lexer, parser, evaluator and values.
/// - Provides the types driving each phase.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// The interactive session the driver starts when no file is given.
pub mod repl;

/// Parses source text into a root node.
///
/// # Errors
/// Returns the parser's error bag when the source has any syntax error; the
/// partial tree is discarded in that case.
///
/// # Examples
/// ```
/// use comet::parse_source;
///
/// let program = parse_source("var a = 1").unwrap();
/// assert_eq!(program.statements.len(), 1);
///
/// let errors = parse_source("var = 1").unwrap_err();
/// assert!(errors.has_any());
/// ```
pub fn parse_source(source: &str) -> Result<Program, ErrorBag> {
    let mut parser = Parser::new(source);
    let program = parser.parse();
    if parser.errors.has_any() {
        return Err(parser.errors);
    }
    Ok(program)
}

/// Parses and evaluates source text with a fresh evaluator, returning the
/// program's final value.
///
/// # Errors
/// Returns the collected syntax errors when parsing fails, and the runtime
/// error when evaluation fails.
///
/// # Examples
/// ```
/// use comet::{interpreter::value::core::Value, run_source};
///
/// let value = run_source("var a = 1\nvar b = 2\na + b").unwrap();
/// assert_eq!(value, Value::Int(3));
///
/// // An undeclared identifier is a runtime error.
/// let result = run_source("var y = x + 1");
/// assert!(result.is_err());
/// ```
pub fn run_source(source: &str) -> Result<Value, CometError> {
    let program = parse_source(source)?;
    let mut evaluator = Evaluator::new();
    Ok(evaluator.eval(&program)?)
}
