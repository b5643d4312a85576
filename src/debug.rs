//! A tree printer for parsed programs.
//!
//! Renders every node as one labelled line with two spaces of indentation
//! per nesting level. The driver prints this under `--debug` before
//! evaluating, which is the quickest way to see how a precedence question
//! was resolved.

use crate::ast::{BlockStatement, Expression, FunctionStatement, Program, Statement};

const INDENT_WIDTH: usize = 2;

/// Walks a parsed tree and accumulates an indented textual rendering.
///
/// # Example
/// ```
/// use comet::{debug::AstPrinter, interpreter::parser::core::Parser};
///
/// let program = Parser::new("1 + 2 * 3").parse();
/// let mut printer = AstPrinter::default();
/// printer.print_program(&program);
///
/// let output = printer.to_string();
/// assert!(output.contains("BinaryExpression (+)"));
/// assert!(output.contains("Number (3)"));
/// ```
#[derive(Default)]
pub struct AstPrinter {
    indent: usize,
    output: String,
}

impl AstPrinter {
    /// Renders a whole program under a root label.
    pub fn print_program(&mut self, program: &Program) {
        self.write_line("RootNode");
        self.indent += INDENT_WIDTH;
        for statement in &program.statements {
            self.print_statement(statement);
        }
        self.indent -= INDENT_WIDTH;
    }

    fn print_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Declaration { name, value, .. } => {
                self.write_line(&format!("DeclarationStatement({name})"));
                self.indented(|printer| printer.print_expression(value));
            },
            Statement::Return { value, .. } => {
                self.write_line("ReturnStatement");
                self.indented(|printer| printer.print_expression(value));
            },
            Statement::Block(block) => self.print_block(block),
            Statement::If { condition,
                            then_block,
                            else_block,
                            .. } => {
                self.write_line("IfStatement");
                self.indented(|printer| {
                        printer.print_expression(condition);
                        printer.write_line("(Then)");
                        printer.print_block(then_block);
                        printer.write_line("(Else)");
                        printer.print_block(else_block);
                    });
            },
            Statement::Function(function) => self.print_function(function),
            Statement::For { key,
                             value,
                             iterable,
                             body,
                             .. } => {
                self.write_line(&format!("ForStatement({key}, {value})"));
                self.indented(|printer| {
                        printer.print_expression(iterable);
                        printer.print_block(body);
                    });
            },
            Statement::StructDeclaration { name, methods, .. } => {
                self.write_line(&format!("StructDeclaration(Type={name})"));
                self.indented(|printer| {
                        for method in methods {
                            printer.print_function(method);
                        }
                    });
            },
            Statement::Expression { expression, .. } => self.print_expression(expression),
        }
    }

    fn print_expression(&mut self, expression: &Expression) {
        match expression {
            Expression::Number { value, .. } => self.write_line(&format!("Number ({value})")),
            Expression::Boolean { value, .. } => {
                self.write_line(&format!("BooleanLiteral ({value})"));
            },
            Expression::Str { value, .. } => self.write_line(&format!("StringLiteral({value})")),
            Expression::Array { elements, .. } => {
                self.write_line("ArrayLiteral");
                self.indented(|printer| {
                        for element in elements {
                            printer.print_expression(element);
                        }
                    });
            },
            Expression::Identifier { name, .. } => {
                self.write_line(&format!("IdentifierExpression({name})"));
            },
            Expression::Prefix { op, right, .. } => {
                self.write_line(&format!("PrefixExpression ({op})"));
                self.indented(|printer| printer.print_expression(right));
            },
            Expression::Binary { op, left, right, .. } => {
                self.write_line(&format!("BinaryExpression ({op})"));
                self.indented(|printer| {
                        printer.print_expression(left);
                        printer.print_expression(right);
                    });
            },
            Expression::Grouping { inner, .. } => {
                self.write_line("ParenthesisedExpression");
                self.indented(|printer| printer.print_expression(inner));
            },
            Expression::Call { name, arguments, .. } => {
                self.write_line(&format!("CallExpression(Name='{name}')"));
                self.indented(|printer| {
                        for argument in arguments {
                            printer.print_expression(argument);
                        }
                    });
            },
            Expression::Index { target, index, .. } => {
                self.write_line("IndexAccess");
                self.indented(|printer| {
                        printer.print_expression(target);
                        printer.print_expression(index);
                    });
            },
            Expression::Assign { name, value, .. } => {
                self.write_line(&format!("AssignmentExpression({name})"));
                self.indented(|printer| printer.print_expression(value));
            },
            Expression::New { type_name, arguments, .. } => {
                self.write_line(&format!("NewCallExpression({type_name})"));
                self.indented(|printer| {
                        for argument in arguments {
                            printer.print_expression(argument);
                        }
                    });
            },
        }
    }

    fn print_function(&mut self, function: &FunctionStatement) {
        self.write_line(&format!("FuncStatement(Name='{}')", function.name));
        self.indent += INDENT_WIDTH;
        self.write_line(&format!("Parameters: [{}]", function.parameters.join(", ")));
        self.print_block(&function.body);
        self.indent -= INDENT_WIDTH;
    }

    fn print_block(&mut self, block: &BlockStatement) {
        self.write_line("BlockStatement");
        self.indent += INDENT_WIDTH;
        for statement in &block.statements {
            self.print_statement(statement);
        }
        self.indent -= INDENT_WIDTH;
    }

    fn indented(&mut self, print: impl FnOnce(&mut Self)) {
        self.indent += INDENT_WIDTH;
        print(self);
        self.indent -= INDENT_WIDTH;
    }

    fn write_line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.output.push(' ');
        }
        self.output.push_str(text);
        self.output.push('\n');
    }
}

impl std::fmt::Display for AstPrinter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.output)
    }
}
