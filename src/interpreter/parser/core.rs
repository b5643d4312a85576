use crate::{
    ast::{BinaryOperator, Expression, PrefixOperator, Program},
    error::{ErrorBag, ParseError},
    interpreter::lexer::{Position, Token, tokenize},
};

/// Binding strength of an operator; a higher level binds tighter.
///
/// The ladder is consulted by the Pratt loop: parsing continues into an
/// infix operator only while the operator to the right binds tighter than
/// the level the current subexpression was entered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// The entry level; no operator binds this loosely.
    Lowest,
    /// `== != < <= > >=`
    Comparison,
    /// `+ -`
    Sum,
    /// `* /`
    Product,
    /// `.`
    Member,
    /// `..`
    Range,
    /// `[` used as indexing.
    Index,
}

/// The binding strength of `token` when it appears in infix position.
/// Tokens that cannot be infix operators answer [`Precedence::Lowest`],
/// which terminates the Pratt loop.
#[must_use]
pub fn precedence_of(token: &Token) -> Precedence {
    match token {
        Token::Equal
        | Token::NotEqual
        | Token::Less
        | Token::LessEqual
        | Token::Greater
        | Token::GreaterEqual => Precedence::Comparison,
        Token::Plus | Token::Minus => Precedence::Sum,
        Token::Mul | Token::Div => Precedence::Product,
        Token::Dot => Precedence::Member,
        Token::DotDot => Precedence::Range,
        Token::OpenBracket => Precedence::Index,
        _ => Precedence::Lowest,
    }
}

/// The binary operator a token maps to in infix position.
fn binary_operator_of(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Mul => Some(BinaryOperator::Mul),
        Token::Div => Some(BinaryOperator::Div),
        Token::Less => Some(BinaryOperator::Less),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::Equal => Some(BinaryOperator::Equal),
        Token::NotEqual => Some(BinaryOperator::NotEqual),
        Token::DotDot => Some(BinaryOperator::Range),
        Token::Dot => Some(BinaryOperator::Member),
        _ => None,
    }
}

/// A Pratt parser over the token stream of one source text.
///
/// The parser keeps an index into the fully lexed token list, which gives it
/// the current token and one token of lookahead. Syntax errors are appended
/// to [`errors`](Self::errors) and parsing resumes where it reasonably can,
/// so [`parse`](Self::parse) always produces a root node.
///
/// # Example
/// ```
/// use comet::interpreter::parser::core::Parser;
///
/// let mut parser = Parser::new("var answer = 2 * 21");
/// let program = parser.parse();
///
/// assert!(!parser.errors.has_any());
/// assert_eq!(program.statements.len(), 1);
/// ```
pub struct Parser {
    tokens:   Vec<(Token, Position)>,
    position: usize,
    /// The syntax errors collected so far.
    pub errors: ErrorBag,
}

impl Parser {
    /// Creates a parser for the given source text.
    ///
    /// The source is tokenized eagerly; lexical failures are recorded in the
    /// error bag right away so the caller sees them alongside grammar
    /// errors.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let (tokens, lexical_errors) = tokenize(source);
        let mut errors = ErrorBag::default();
        for error in lexical_errors {
            errors.report(error.into());
        }
        Self { tokens,
               position: 0,
               errors }
    }

    /// Parses the whole token stream into a root node.
    ///
    /// Never fails: statements that cannot be parsed report into the error
    /// bag and are skipped. Stray semicolons between statements are ignored.
    pub fn parse(&mut self) -> Program {
        let mut statements = Vec::new();
        loop {
            while matches!(self.current(), Token::Semicolon) {
                self.advance();
            }
            if matches!(self.current(), Token::Eof) {
                break;
            }
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
            self.advance();
        }
        Program { statements }
    }

    pub(crate) fn current(&self) -> &Token {
        &self.tokens[self.position].0
    }

    pub(crate) fn peek(&self) -> &Token {
        let next = (self.position + 1).min(self.tokens.len() - 1);
        &self.tokens[next].0
    }

    pub(crate) fn current_position(&self) -> Position {
        self.tokens[self.position].1
    }

    pub(crate) fn current_line(&self) -> usize {
        self.current_position().line
    }

    /// The literal text of the current token, used for names. When the
    /// grammar expected an identifier but found something else, the mismatch
    /// has already been reported and the literal is used as a stand-in.
    pub(crate) fn current_literal(&self) -> String {
        self.current().to_string()
    }

    /// Moves the current token to the next token. Saturates at the trailing
    /// EOF sentinel.
    pub(crate) fn advance(&mut self) {
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
    }

    /// Records an "expected X got Y" error pointing at the current token.
    pub(crate) fn report_expected(&mut self, expected: &Token) {
        let error = ParseError::UnexpectedToken { expected: expected.kind_name().to_string(),
                                                  found:    self.current_literal(),
                                                  position: self.current_position(), };
        self.errors.report(error);
    }

    /// Reports an error unless the current token has the expected kind, then
    /// advances past it either way.
    pub(crate) fn advance_expect(&mut self, expected: &Token) {
        if std::mem::discriminant(self.current()) != std::mem::discriminant(expected) {
            self.report_expected(expected);
        }
        self.advance();
    }

    /// Reports an error unless the next token has the expected kind, then
    /// advances onto it either way.
    pub(crate) fn expect_next(&mut self, expected: &Token) {
        if std::mem::discriminant(self.peek()) != std::mem::discriminant(expected) {
            self.report_expected(expected);
        }
        self.advance();
    }

    /// Parses one expression starting at the current token, entering the
    /// Pratt loop at the lowest precedence.
    ///
    /// On success the current token is the last token of the expression.
    /// Returns `None` when no expression could be parsed; the reason is in
    /// the error bag.
    pub(crate) fn parse_expression(&mut self) -> Option<Expression> {
        self.parse_precedence(Precedence::Lowest)
    }

    /// The Pratt core: parse a prefix form, then fold infix operators onto
    /// it while the operator to the right binds tighter than
    /// `current_precedence`.
    fn parse_precedence(&mut self, current_precedence: Precedence) -> Option<Expression> {
        let mut left = self.parse_prefix()?;
        while current_precedence < precedence_of(self.peek()) {
            self.advance();
            left = if matches!(self.current(), Token::OpenBracket) {
                self.parse_index_access(left)?
            } else {
                self.parse_binary_expression(left)?
            };
        }
        Some(left)
    }

    /// Dispatches on the current token to the expression form it can begin.
    fn parse_prefix(&mut self) -> Option<Expression> {
        match self.current().clone() {
            Token::Number(literal) => Some(self.parse_number_literal(&literal)),
            Token::Str(text) => Some(Expression::Str { value: text,
                                                       line:  self.current_line(), }),
            Token::True => Some(Expression::Boolean { value: true,
                                                      line:  self.current_line(), }),
            Token::False => Some(Expression::Boolean { value: false,
                                                       line:  self.current_line(), }),
            Token::Identifier(name) => self.parse_identifier(name),
            Token::Minus => self.parse_prefix_expression(PrefixOperator::Negate),
            Token::Bang => self.parse_prefix_expression(PrefixOperator::Not),
            Token::OpenParen => self.parse_grouping(),
            Token::OpenBracket => self.parse_array_literal(),
            Token::New => self.parse_new_call(),
            token => {
                let error = ParseError::MissingParseFunction { found:    token.to_string(),
                                                               position: self.current_position(), };
                self.errors.report(error);
                None
            },
        }
    }

    /// Converts the digits of a number token. A literal that does not fit in
    /// 64 bits reports an error and stands in as zero so that parsing can
    /// continue.
    fn parse_number_literal(&mut self, literal: &str) -> Expression {
        let line = self.current_line();
        match literal.parse::<i64>() {
            Ok(value) => Expression::Number { value, line },
            Err(_) => {
                let error = ParseError::InvalidNumber { literal:  literal.to_string(),
                                                        position: self.current_position(), };
                self.errors.report(error);
                Expression::Number { value: 0, line }
            },
        }
    }

    /// An identifier starts one of three forms, decided by lookahead: a call
    /// when `(` follows, an assignment when `=` follows, and a plain
    /// variable reference otherwise.
    fn parse_identifier(&mut self, name: String) -> Option<Expression> {
        let line = self.current_line();
        if matches!(self.peek(), Token::OpenParen) {
            self.advance();
            let arguments = self.parse_call_arguments();
            Some(Expression::Call { name,
                                    arguments,
                                    line })
        } else if matches!(self.peek(), Token::Assign) {
            self.expect_next(&Token::Assign);
            self.advance();
            let value = self.parse_expression()?;
            Some(Expression::Assign { name,
                                      value: Box::new(value),
                                      line })
        } else {
            Some(Expression::Identifier { name, line })
        }
    }

    /// Parses the parenthesised, comma-separated argument list of a call.
    /// Expects the current token to be `(`; ends on `)`.
    pub(crate) fn parse_call_arguments(&mut self) -> Vec<Expression> {
        let mut arguments = Vec::new();
        if matches!(self.peek(), Token::CloseParen) {
            self.advance();
            return arguments;
        }
        self.advance();
        if let Some(argument) = self.parse_expression() {
            arguments.push(argument);
        }
        while matches!(self.peek(), Token::Comma) {
            self.advance();
            self.advance();
            if let Some(argument) = self.parse_expression() {
                arguments.push(argument);
            }
        }
        self.advance();
        if !matches!(self.current(), Token::CloseParen) {
            self.report_expected(&Token::CloseParen);
        }
        arguments
    }

    /// `op expression`; the operand extends as far to the right as an
    /// expression can.
    fn parse_prefix_expression(&mut self, op: PrefixOperator) -> Option<Expression> {
        let line = self.current_line();
        self.advance();
        let right = self.parse_expression()?;
        Some(Expression::Prefix { op,
                                  right: Box::new(right),
                                  line })
    }

    /// `( expression )`
    fn parse_grouping(&mut self) -> Option<Expression> {
        let line = self.current_line();
        self.advance_expect(&Token::OpenParen);
        let inner = self.parse_expression()?;
        self.expect_next(&Token::CloseParen);
        Some(Expression::Grouping { inner: Box::new(inner),
                                    line })
    }

    /// `[ expression, ... ]`
    fn parse_array_literal(&mut self) -> Option<Expression> {
        let line = self.current_line();
        let mut elements = Vec::new();
        self.advance_expect(&Token::OpenBracket);
        if matches!(self.current(), Token::CloseBracket) {
            return Some(Expression::Array { elements, line });
        }
        loop {
            if matches!(self.current(), Token::Eof) {
                let error = ParseError::UnexpectedEndOfInput { position: self.current_position() };
                self.errors.report(error);
                break;
            }
            if let Some(element) = self.parse_expression() {
                elements.push(element);
            }
            self.advance();
            if matches!(self.current(), Token::CloseBracket) {
                break;
            }
            self.advance_expect(&Token::Comma);
        }
        Some(Expression::Array { elements, line })
    }

    /// `new Type(arguments)`
    fn parse_new_call(&mut self) -> Option<Expression> {
        let line = self.current_line();
        self.expect_next(&Token::Identifier(String::new()));
        let type_name = self.current_literal();
        self.advance();
        let arguments = self.parse_call_arguments();
        Some(Expression::New { type_name,
                               arguments,
                               line })
    }

    /// `expression op expression`; the right side is parsed at this
    /// operator's own precedence, making every operator left-associative.
    fn parse_binary_expression(&mut self, left: Expression) -> Option<Expression> {
        let line = self.current_line();
        let Some(op) = binary_operator_of(self.current()) else {
            return Some(left);
        };
        let precedence = precedence_of(self.current());
        self.advance();
        let right = self.parse_precedence(precedence)?;
        Some(Expression::Binary { op,
                                  left: Box::new(left),
                                  right: Box::new(right),
                                  line })
    }

    /// `target[index]`, applied as an infix form on `[`.
    fn parse_index_access(&mut self, left: Expression) -> Option<Expression> {
        let line = self.current_line();
        self.advance();
        let index = self.parse_expression()?;
        self.expect_next(&Token::CloseBracket);
        Some(Expression::Index { target: Box::new(left),
                                 index: Box::new(index),
                                 line })
    }
}
