use crate::{
    ast::{BlockStatement, EMPTY_LOOP_VARIABLE, FunctionStatement, Statement},
    error::ParseError,
    interpreter::{lexer::Token, parser::core::Parser},
};

impl Parser {
    /// Parses a single statement, dispatching on the current token.
    ///
    /// The grammar lets the statement kind be decided by its first token;
    /// anything that is not a recognized statement keyword is parsed as an
    /// expression statement. On success the current token is the last token
    /// of the statement. Returns `None` when nothing could be parsed; the
    /// reason is in the error bag.
    pub(crate) fn parse_statement(&mut self) -> Option<Statement> {
        match self.current().clone() {
            Token::Var => self.parse_declaration(),
            Token::Return => self.parse_return_statement(),
            Token::OpenBrace => Some(Statement::Block(self.parse_block_statement())),
            Token::If => self.parse_if_statement(),
            Token::Func => Some(Statement::Function(self.parse_function_statement())),
            Token::For => self.parse_for_statement(),
            Token::Struct => self.parse_struct_declaration(),
            _ => {
                let line = self.current_line();
                self.parse_expression()
                    .map(|expression| Statement::Expression { expression, line })
            },
        }
    }

    /// `var name = expression`
    fn parse_declaration(&mut self) -> Option<Statement> {
        let line = self.current_line();
        self.advance_expect(&Token::Var);
        let name = self.current_literal();
        self.advance_expect(&Token::Identifier(String::new()));
        self.advance_expect(&Token::Assign);
        let value = self.parse_expression()?;
        Some(Statement::Declaration { name, value, line })
    }

    /// `return expression`
    fn parse_return_statement(&mut self) -> Option<Statement> {
        let line = self.current_line();
        self.advance_expect(&Token::Return);
        let value = self.parse_expression()?;
        Some(Statement::Return { value, line })
    }

    /// `{ statement* }`
    ///
    /// Expects the current token to be `{` and ends on the matching `}`.
    /// Reaching the end of input inside the block is reported once and the
    /// partial block is kept.
    pub(crate) fn parse_block_statement(&mut self) -> BlockStatement {
        let line = self.current_line();
        self.advance_expect(&Token::OpenBrace);
        let mut statements = Vec::new();
        loop {
            while matches!(self.current(), Token::Semicolon) {
                self.advance();
            }
            if matches!(self.current(), Token::CloseBrace) {
                break;
            }
            if matches!(self.current(), Token::Eof) {
                let error = ParseError::UnexpectedEndOfInput { position: self.current_position() };
                self.errors.report(error);
                break;
            }
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
            self.advance();
        }
        BlockStatement { statements, line }
    }

    /// `if expression { ... } [else { ... }]`
    ///
    /// The else block is always present in the tree; an `if` without `else`
    /// gets an empty one. Ends on the final `}` in both shapes.
    fn parse_if_statement(&mut self) -> Option<Statement> {
        let line = self.current_line();
        self.advance_expect(&Token::If);
        let condition = self.parse_expression()?;
        self.expect_next(&Token::OpenBrace);
        let then_block = self.parse_block_statement();
        let else_block = if matches!(self.peek(), Token::Else) {
            self.advance();
            self.advance_expect(&Token::Else);
            self.parse_block_statement()
        } else {
            BlockStatement::empty(line)
        };
        Some(Statement::If { condition,
                             then_block,
                             else_block,
                             line })
    }

    /// `func name(param, ...) { ... }`
    ///
    /// Also used for struct methods. Recovers from a malformed parameter
    /// list by reporting and skipping to the closing parenthesis.
    pub(crate) fn parse_function_statement(&mut self) -> FunctionStatement {
        let line = self.current_line();
        self.advance_expect(&Token::Func);
        let name = self.current_literal();
        self.advance_expect(&Token::Identifier(String::new()));
        self.advance_expect(&Token::OpenParen);

        let mut parameters = Vec::new();
        loop {
            if matches!(self.current(), Token::CloseParen | Token::Eof) {
                break;
            }
            if let Token::Identifier(parameter) = self.current() {
                parameters.push(parameter.clone());
            } else {
                self.report_expected(&Token::Identifier(String::new()));
            }
            self.advance();
            if matches!(self.current(), Token::Comma) {
                self.advance();
            }
        }
        self.advance_expect(&Token::CloseParen);

        let body = self.parse_block_statement();
        FunctionStatement { name,
                            parameters,
                            body,
                            line }
    }

    /// `for key[, value] in expression { ... }`
    ///
    /// When no value identifier is given, the reserved placeholder name is
    /// recorded instead so the evaluator can bind both unconditionally.
    fn parse_for_statement(&mut self) -> Option<Statement> {
        let line = self.current_line();
        self.expect_next(&Token::Identifier(String::new()));
        let key = self.current_literal();
        let mut value = EMPTY_LOOP_VARIABLE.to_string();
        if matches!(self.peek(), Token::Comma) {
            self.advance();
            self.expect_next(&Token::Identifier(String::new()));
            value = self.current_literal();
        }
        self.expect_next(&Token::In);
        self.advance();
        let iterable = self.parse_expression()?;
        self.expect_next(&Token::OpenBrace);
        let body = self.parse_block_statement();
        Some(Statement::For { key,
                              value,
                              iterable,
                              body,
                              line })
    }

    /// `struct Name { func method(...) { ... } ... }`
    ///
    /// A struct body may only contain function declarations; anything else
    /// ends the struct with an error.
    fn parse_struct_declaration(&mut self) -> Option<Statement> {
        let line = self.current_line();
        self.advance();
        let name = self.current_literal();
        self.advance();
        self.advance_expect(&Token::OpenBrace);

        let mut methods = Vec::new();
        loop {
            if matches!(self.current(), Token::CloseBrace) {
                break;
            }
            if matches!(self.current(), Token::Eof) {
                let error = ParseError::UnexpectedEndOfInput { position: self.current_position() };
                self.errors.report(error);
                break;
            }
            if !matches!(self.current(), Token::Func) {
                let error =
                    ParseError::ExpectedFunctionDeclaration { position: self.current_position() };
                self.errors.report(error);
                break;
            }
            methods.push(self.parse_function_statement());
            self.advance_expect(&Token::CloseBrace);
        }
        Some(Statement::StructDeclaration { name, methods, line })
    }
}
