/// Parsing errors.
///
/// Defines the error type produced during lexing and parsing, and the error
/// bag the parser accumulates them in. Parse errors carry the source
/// position of the offending token.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: type
/// mismatches, unknown identifiers and types, arity violations, bounds
/// failures and arithmetic faults.
pub mod runtime_error;

pub use parse_error::{ErrorBag, ParseError};
pub use runtime_error::RuntimeError;

/// The failure modes of running a complete program: either the source did
/// not parse, or evaluation hit a runtime error.
#[derive(Debug)]
pub enum CometError {
    /// One or more syntax errors; the full bag is preserved.
    Parse(ErrorBag),
    /// Evaluation failed.
    Runtime(RuntimeError),
}

impl std::fmt::Display for CometError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(errors) => write!(f, "{errors}"),
            Self::Runtime(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for CometError {}

impl From<ErrorBag> for CometError {
    fn from(errors: ErrorBag) -> Self {
        Self::Parse(errors)
    }
}

impl From<RuntimeError> for CometError {
    fn from(error: RuntimeError) -> Self {
        Self::Runtime(error)
    }
}
