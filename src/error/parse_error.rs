use crate::interpreter::lexer::{LexicalError, Position};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// The parser found a different token than the grammar requires.
    UnexpectedToken {
        /// The kind of token the grammar expected.
        expected: String,
        /// The literal text of the token that was found.
        found:    String,
        /// The source position of the offending token.
        position: Position,
    },
    /// No expression can start with the current token.
    MissingParseFunction {
        /// The literal text of the offending token.
        found:    String,
        /// The source position of the offending token.
        position: Position,
    },
    /// A numeric literal could not be converted to a 64-bit integer.
    InvalidNumber {
        /// The literal digits as written.
        literal:  String,
        /// The source position of the literal.
        position: Position,
    },
    /// A string literal was never closed before the line or input ended.
    UnterminatedString {
        /// The source position of the opening quote.
        position: Position,
    },
    /// A character that is not part of any token.
    UnrecognizedCharacter {
        /// The offending text.
        found:    String,
        /// The source position of the character.
        position: Position,
    },
    /// The input ended in the middle of a construct.
    UnexpectedEndOfInput {
        /// The source position where input ran out.
        position: Position,
    },
    /// A struct body may only contain function declarations.
    ExpectedFunctionDeclaration {
        /// The source position of the offending token.
        position: Position,
    },
}

impl ParseError {
    /// The source position this error points at.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::UnexpectedToken { position, .. }
            | Self::MissingParseFunction { position, .. }
            | Self::InvalidNumber { position, .. }
            | Self::UnterminatedString { position }
            | Self::UnrecognizedCharacter { position, .. }
            | Self::UnexpectedEndOfInput { position }
            | Self::ExpectedFunctionDeclaration { position } => *position,
        }
    }
}

impl From<LexicalError> for ParseError {
    fn from(error: LexicalError) -> Self {
        match error {
            LexicalError::UnterminatedString { position } => Self::UnterminatedString { position },
            LexicalError::UnrecognizedCharacter { found, position } => {
                Self::UnrecognizedCharacter { found, position }
            },
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { expected,
                                    found,
                                    position, } => {
                write!(f, "Error at {position}: Expected {expected} got {found} instead")
            },

            Self::MissingParseFunction { found, position } => {
                write!(f, "Error at {position}: No parsing function found for {found}")
            },

            Self::InvalidNumber { literal, position } => {
                write!(f, "Error at {position}: Could not parse integer value {literal}")
            },

            Self::UnterminatedString { position } => write!(f,
                                                            "Error at {position}: Reached the end of line or end of input without closing the string quote"),

            Self::UnrecognizedCharacter { found, position } => {
                write!(f, "Error at {position}: Unrecognized character {found}")
            },

            Self::UnexpectedEndOfInput { position } => {
                write!(f, "Error at {position}: Unexpected EOF")
            },

            Self::ExpectedFunctionDeclaration { position } => {
                write!(f, "Error at {position}: Expected a function declaration")
            },
        }
    }
}

impl std::error::Error for ParseError {}

/// Container for the syntax errors collected while parsing one source text.
///
/// The parser never aborts on a syntax error; it records the error here and
/// resumes at the next point where parsing can continue. Callers inspect the
/// bag after [`Parser::parse`](crate::interpreter::parser::core::Parser::parse)
/// and typically refuse to evaluate when it is non-empty.
///
/// # Example
/// ```
/// use comet::interpreter::parser::core::Parser;
///
/// let mut parser = Parser::new("var = 1");
/// let program = parser.parse();
///
/// assert!(parser.errors.has_any());
/// assert!(parser.errors.to_string().contains("Expected Identifier"));
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ErrorBag {
    errors: Vec<ParseError>,
}

impl ErrorBag {
    /// Appends an error to the bag.
    pub fn report(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    /// Returns `true` when at least one error has been reported.
    #[must_use]
    pub fn has_any(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The reported errors, in the order the parser hit them.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }
}

impl std::fmt::Display for ErrorBag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for error in &self.errors {
            writeln!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorBag {}
