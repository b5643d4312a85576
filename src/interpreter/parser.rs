/// The Pratt expression parser and its token bookkeeping.
///
/// Declares the `Parser` type with its two tokens of lookahead, the
/// precedence ladder, and the prefix/infix dispatch that turns a token
/// stream into expressions.
pub mod core;
/// Statement parsing.
///
/// Statement-level grammar: declarations, returns, blocks, conditionals,
/// functions, loops and struct declarations, dispatched by the statement's
/// first token.
pub mod statement;
