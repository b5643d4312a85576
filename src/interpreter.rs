/// Tree-walking evaluation.
///
/// This module holds the evaluator and its supporting pieces: structural
/// dispatch over the AST, operator tables keyed by runtime type tags, the
/// scope chain, struct/instance semantics and the builtin registry.
///
/// # Responsibilities
/// - Walks the tree depth-first, left to right, producing runtime values.
/// - Propagates runtime errors and unwinds `return` values via a sentinel
///   wrapper unwrapped at call boundaries.
/// - Owns the evaluator state: scope chain, registered types and builtins.
pub mod evaluator;
/// Tokenization of source text.
///
/// Declares the token set as a `logos`-derived enum, tracks line and column
/// positions through lexer extras, and exposes a `tokenize` entry point that
/// produces positioned tokens plus any lexical errors.
pub mod lexer;
/// Pratt parsing of the token stream.
///
/// Turns tokens into the AST using a precedence-driven expression core and
/// per-keyword statement parsers. Syntax errors accumulate in an error bag
/// rather than aborting the parse.
pub mod parser;
/// Runtime values.
///
/// Defines the value variants the evaluator produces, their type tags and
/// display forms, and the struct descriptor/instance pair behind the object
/// system.
pub mod value;
