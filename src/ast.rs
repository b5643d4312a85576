use std::fmt;

/// Name bound as the loop value when a `for` statement names only a key.
/// Programs should not declare identifiers with this name themselves.
pub const EMPTY_LOOP_VARIABLE: &str = "__empty__";

/// Represents a binary operator.
///
/// Binary operators cover arithmetic, comparisons, the inclusive range
/// constructor and member access. Member access (`.`) is carried as an
/// operator but receives structural treatment in the evaluator because its
/// right-hand side is inspected before being evaluated.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Inclusive range (`..`)
    Range,
    /// Member access (`.`)
    Member,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Range => "..",
            Self::Member => ".",
        };
        write!(f, "{operator}")
    }
}

/// Represents a prefix operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PrefixOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `!x`).
    Not,
}

impl fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Negate => "-",
            Self::Not => "!",
        };
        write!(f, "{operator}")
    }
}

/// An abstract syntax tree node representing an expression.
///
/// `Expression` covers literals, identifiers, operator applications, calls,
/// indexing, assignment and instance creation. Each variant records the
/// source line of its introducing token for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// An integer literal.
    Number {
        /// The parsed value.
        value: i64,
        /// Line number in the source code.
        line:  usize,
    },
    /// A boolean literal, `true` or `false`.
    Boolean {
        /// The literal value.
        value: bool,
        /// Line number in the source code.
        line:  usize,
    },
    /// A string literal.
    Str {
        /// The text between the quotes.
        value: String,
        /// Line number in the source code.
        line:  usize,
    },
    /// An array literal such as `[1, 2, 3]`.
    Array {
        /// Element expressions in source order.
        elements: Vec<Expression>,
        /// Line number in the source code.
        line:     usize,
    },
    /// Reference to a variable by name.
    Identifier {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A prefix operation such as `-x` or `!flag`.
    Prefix {
        /// The operator to apply.
        op:    PrefixOperator,
        /// The operand expression.
        right: Box<Expression>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A binary operation such as `a + b` or `low..high`.
    Binary {
        /// The operator.
        op:    BinaryOperator,
        /// Left operand.
        left:  Box<Expression>,
        /// Right operand.
        right: Box<Expression>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A parenthesised expression. Kept as its own node so that printing the
    /// tree back to source preserves the grouping.
    Grouping {
        /// The wrapped expression.
        inner: Box<Expression>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A call expression such as `fib(10)`.
    Call {
        /// Name of the function being called.
        name:      String,
        /// Argument expressions in source order.
        arguments: Vec<Expression>,
        /// Line number in the source code.
        line:      usize,
    },
    /// An index access such as `values[2]`.
    Index {
        /// The expression being indexed.
        target: Box<Expression>,
        /// The index expression.
        index:  Box<Expression>,
        /// Line number in the source code.
        line:   usize,
    },
    /// An assignment to an already declared variable, `name = value`.
    Assign {
        /// Name of the variable.
        name:  String,
        /// The assigned expression.
        value: Box<Expression>,
        /// Line number in the source code.
        line:  usize,
    },
    /// An instance creation such as `new Point(1, 2)`.
    New {
        /// Name of the struct type.
        type_name: String,
        /// Constructor arguments in source order.
        arguments: Vec<Expression>,
        /// Line number in the source code.
        line:      usize,
    },
}

impl Expression {
    /// Gets the source line this expression starts on.
    ///
    /// ## Example
    /// ```
    /// use comet::ast::Expression;
    ///
    /// let expression = Expression::Identifier { name: "x".to_string(),
    ///                                           line: 5, };
    ///
    /// assert_eq!(expression.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Number { line, .. }
            | Self::Boolean { line, .. }
            | Self::Str { line, .. }
            | Self::Array { line, .. }
            | Self::Identifier { line, .. }
            | Self::Prefix { line, .. }
            | Self::Binary { line, .. }
            | Self::Grouping { line, .. }
            | Self::Call { line, .. }
            | Self::Index { line, .. }
            | Self::Assign { line, .. }
            | Self::New { line, .. } => *line,
        }
    }
}

/// A brace-delimited list of statements.
///
/// Blocks do not open a scope by themselves; scopes are pushed by function
/// and method invocation and by `for` loops.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    /// Statements inside the block.
    pub statements: Vec<Statement>,
    /// Line number in the source code.
    pub line:       usize,
}

impl BlockStatement {
    /// Creates a block with no statements, used as the `else` branch of an
    /// `if` statement that does not spell one out.
    #[must_use]
    pub const fn empty(line: usize) -> Self {
        Self { statements: Vec::new(),
               line }
    }
}

/// A named function declaration, either free-standing or a struct method.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionStatement {
    /// The declared name.
    pub name:       String,
    /// Parameter names in order.
    pub parameters: Vec<String>,
    /// The body evaluated when the function is called.
    pub body:       BlockStatement,
    /// Line number in the source code.
    pub line:       usize,
}

/// Represents a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A variable declaration, `var name = value`.
    Declaration {
        /// The declared name.
        name:  String,
        /// The initializing expression.
        value: Expression,
        /// Line number in the source code.
        line:  usize,
    },
    /// A `return` statement.
    Return {
        /// The returned expression.
        value: Expression,
        /// Line number in the source code.
        line:  usize,
    },
    /// A bare block used as a statement.
    Block(BlockStatement),
    /// An `if` statement. The `else` block is always present; when the
    /// source has no `else`, it is an empty block.
    If {
        /// The test expression; must evaluate to a boolean.
        condition:  Expression,
        /// Block evaluated when the test is true.
        then_block: BlockStatement,
        /// Block evaluated when the test is false.
        else_block: BlockStatement,
        /// Line number in the source code.
        line:       usize,
    },
    /// A function declaration.
    Function(FunctionStatement),
    /// A `for key[, value] in range { ... }` loop. When the source names no
    /// value identifier, `value` holds [`EMPTY_LOOP_VARIABLE`].
    For {
        /// The key identifier bound on every iteration.
        key:      String,
        /// The value identifier bound on every iteration.
        value:    String,
        /// The iterated expression; must evaluate to a range.
        iterable: Expression,
        /// The loop body.
        body:     BlockStatement,
        /// Line number in the source code.
        line:     usize,
    },
    /// A struct declaration with its methods.
    StructDeclaration {
        /// The declared type name.
        name:    String,
        /// Method declarations in source order.
        methods: Vec<FunctionStatement>,
        /// Line number in the source code.
        line:    usize,
    },
    /// An expression evaluated for its value.
    Expression {
        /// The expression to evaluate.
        expression: Expression,
        /// Line number in the source code.
        line:       usize,
    },
}

/// The root node produced by the parser; a sequence of statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Top-level statements in source order.
    pub statements: Vec<Statement>,
}

fn write_comma_separated(f: &mut fmt::Formatter<'_>, expressions: &[Expression]) -> fmt::Result {
    for (index, expression) in expressions.iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{expression}")?;
    }
    Ok(())
}

impl fmt::Display for Expression {
    /// Renders the expression as canonical source text. Because grouping is
    /// an explicit node, reparsing the rendered text yields a tree of the
    /// same shape.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number { value, .. } => write!(f, "{value}"),
            Self::Boolean { value, .. } => write!(f, "{value}"),
            Self::Str { value, .. } => write!(f, "\"{value}\""),
            Self::Array { elements, .. } => {
                write!(f, "[")?;
                write_comma_separated(f, elements)?;
                write!(f, "]")
            },
            Self::Identifier { name, .. } => write!(f, "{name}"),
            Self::Prefix { op, right, .. } => write!(f, "{op}{right}"),
            Self::Binary { op, left, right, .. } => match op {
                BinaryOperator::Range => write!(f, "{left}..{right}"),
                BinaryOperator::Member => write!(f, "{left}.{right}"),
                other => write!(f, "{left} {other} {right}"),
            },
            Self::Grouping { inner, .. } => write!(f, "({inner})"),
            Self::Call { name, arguments, .. } => {
                write!(f, "{name}(")?;
                write_comma_separated(f, arguments)?;
                write!(f, ")")
            },
            Self::Index { target, index, .. } => write!(f, "{target}[{index}]"),
            Self::Assign { name, value, .. } => write!(f, "{name} = {value}"),
            Self::New { type_name, arguments, .. } => {
                write!(f, "new {type_name}(")?;
                write_comma_separated(f, arguments)?;
                write!(f, ")")
            },
        }
    }
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{{")?;
        for statement in &self.statements {
            writeln!(f, "{statement}")?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for FunctionStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "func {}({}) {}", self.name, self.parameters.join(", "), self.body)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declaration { name, value, .. } => write!(f, "var {name} = {value}"),
            Self::Return { value, .. } => write!(f, "return {value}"),
            Self::Block(block) => write!(f, "{block}"),
            Self::If { condition,
                       then_block,
                       else_block,
                       .. } => {
                write!(f, "if {condition} {then_block} else {else_block}")
            },
            Self::Function(function) => write!(f, "{function}"),
            Self::For { key,
                        value,
                        iterable,
                        body,
                        .. } => {
                if value == EMPTY_LOOP_VARIABLE {
                    write!(f, "for {key} in {iterable} {body}")
                } else {
                    write!(f, "for {key}, {value} in {iterable} {body}")
                }
            },
            Self::StructDeclaration { name, methods, .. } => {
                writeln!(f, "struct {name} {{")?;
                for method in methods {
                    writeln!(f, "{method}")?;
                }
                write!(f, "}}")
            },
            Self::Expression { expression, .. } => write!(f, "{expression}"),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            writeln!(f, "{statement}")?;
        }
        Ok(())
    }
}
