use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::{BlockStatement, Expression, FunctionStatement, Program, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::builtins::Callback,
        value::{
            core::{FunctionValue, Value},
            object::StructDef,
        },
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// [`RuntimeError`] describing the failure. The `?` operator is what makes a
/// failing subexpression abort its whole enclosing evaluation.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The name bound to the receiver inside method bodies.
pub const THIS: &str = "this";

/// A tree-walking evaluator with its scope chain, registered struct types
/// and builtin callbacks.
///
/// Each evaluator owns its state: variables bound in one evaluator are not
/// visible from another. The scope chain is a stack of frames; lookups walk
/// from the innermost frame outward, declarations always hit the innermost
/// frame, and assignments update the nearest frame that already binds the
/// name. Frames are pushed by function, method and constructor invocation
/// and by `for` loops; bare blocks share the enclosing frame.
///
/// ## Usage
///
/// ```
/// use comet::interpreter::{evaluator::core::Evaluator, parser::core::Parser, value::core::Value};
///
/// let program = Parser::new("var a = 40\na + 2").parse();
/// let mut evaluator = Evaluator::new();
///
/// assert_eq!(evaluator.eval(&program), Ok(Value::Int(42)));
/// assert_eq!(evaluator.get_variable("a"), Some(&Value::Int(40)));
/// ```
pub struct Evaluator {
    /// The scope chain, innermost frame last.
    pub scope_stack: Vec<HashMap<String, Value>>,
    /// Struct descriptors registered by `struct` declarations, keyed by type
    /// name. Process-wide for the evaluator instance, not scoped.
    pub types:       HashMap<String, Rc<StructDef>>,
    pub(crate) builtins: HashMap<String, Callback>,
}

#[allow(clippy::new_without_default)]
impl Evaluator {
    /// Creates an evaluator with an empty global scope, no user types and
    /// the default builtins registered.
    #[must_use]
    pub fn new() -> Self {
        let mut evaluator = Self { scope_stack: vec![HashMap::new()],
                                   types:       HashMap::new(),
                                   builtins:    HashMap::new(), };
        evaluator.register_default_builtins();
        evaluator
    }

    /// Evaluates a whole program and returns its final value.
    ///
    /// Statements run in order. A runtime error anywhere aborts evaluation;
    /// a top-level `return` stops execution and its value is unwrapped here,
    /// at the outermost boundary. Otherwise the value of the last statement
    /// is returned, [`Value::Nop`] for an empty program.
    pub fn eval(&mut self, program: &Program) -> EvalResult<Value> {
        let mut result = Value::Nop;
        for statement in &program.statements {
            result = self.eval_statement(statement)?;
            if matches!(result, Value::Returned(_)) {
                return Ok(result.unwrap_return());
            }
        }
        Ok(result)
    }

    /// Evaluates a single statement.
    pub fn eval_statement(&mut self, statement: &Statement) -> EvalResult<Value> {
        match statement {
            Statement::Declaration { name, value, .. } => self.eval_declaration(name, value),
            Statement::Return { value, .. } => {
                let result = self.eval_expression(value)?;
                Ok(Value::Returned(Box::new(result)))
            },
            Statement::Block(block) => self.eval_block(block),
            Statement::If { condition,
                            then_block,
                            else_block,
                            line, } => self.eval_if(condition, then_block, else_block, *line),
            Statement::Function(function) => Ok(self.eval_function_statement(function)),
            Statement::For { key,
                             value,
                             iterable,
                             body,
                             line, } => self.eval_for(key, value, iterable, body, *line),
            Statement::StructDeclaration { name, methods, line } => {
                self.eval_struct_declaration(name, methods, *line)
            },
            Statement::Expression { expression, .. } => self.eval_expression(expression),
        }
    }

    /// Evaluates a single expression.
    pub fn eval_expression(&mut self, expression: &Expression) -> EvalResult<Value> {
        match expression {
            Expression::Number { value, .. } => Ok(Value::Int(*value)),
            Expression::Boolean { value, .. } => Ok(Value::Bool(*value)),
            Expression::Str { value, .. } => Ok(Value::Str(value.clone())),
            Expression::Array { elements, .. } => self.eval_array_literal(elements),
            Expression::Identifier { name, line } => self.eval_identifier(name, *line),
            Expression::Prefix { op, right, line } => self.eval_prefix(*op, right, *line),
            Expression::Binary { op,
                                 left,
                                 right,
                                 line, } => self.eval_binary(*op, left, right, *line),
            Expression::Grouping { inner, .. } => self.eval_expression(inner),
            Expression::Call { name, arguments, line } => self.eval_call(name, arguments, *line),
            Expression::Index { target, index, line } => self.eval_index(target, index, *line),
            Expression::Assign { name, value, line } => self.eval_assign(name, value, *line),
            Expression::New { type_name,
                              arguments,
                              line, } => self.eval_new(type_name, arguments, *line),
        }
    }

    /// Evaluates a block's statements in order.
    ///
    /// A [`Value::Returned`] produced by any statement is handed back
    /// immediately and still wrapped, so it keeps unwinding through the
    /// enclosing blocks until a call boundary unwraps it. Blocks do not push
    /// a scope frame.
    pub fn eval_block(&mut self, block: &BlockStatement) -> EvalResult<Value> {
        let mut result = Value::Nop;
        for statement in &block.statements {
            result = self.eval_statement(statement)?;
            if matches!(result, Value::Returned(_)) {
                return Ok(result);
            }
        }
        Ok(result)
    }

    /// Evaluates the right-hand side and binds it in the current frame,
    /// shadowing any outer binding of the same name. The statement's value
    /// is the bound value.
    fn eval_declaration(&mut self, name: &str, value: &Expression) -> EvalResult<Value> {
        let value = self.eval_expression(value)?;
        self.define_local(name, value.clone());
        Ok(value)
    }

    /// Looks the name up through the whole scope chain.
    fn eval_identifier(&self, name: &str, line: usize) -> EvalResult<Value> {
        self.get_variable(name)
            .cloned()
            .ok_or_else(|| RuntimeError::UnknownIdentifier { name: name.to_string(),
                                                             line })
    }

    /// Assigns to an already declared variable, updating the nearest frame
    /// that binds it. Assigning to an undeclared name is an error; use `var`
    /// to create bindings.
    fn eval_assign(&mut self, name: &str, value: &Expression, line: usize) -> EvalResult<Value> {
        if self.get_variable(name).is_none() {
            return Err(RuntimeError::UnknownIdentifier { name: name.to_string(),
                                                         line });
        }
        let value = self.eval_expression(value)?.unwrap_return();
        self.assign_nearest(name, value.clone());
        Ok(value)
    }

    /// Wraps the declaration in a function value and binds it in the
    /// current frame under its declared name.
    fn eval_function_statement(&mut self, function: &FunctionStatement) -> Value {
        let function = Rc::new(FunctionValue::from(function));
        let value = Value::Function(Rc::clone(&function));
        self.define_local(&function.name, value.clone());
        value
    }

    /// Evaluates the test, then exactly one of the two blocks. The else
    /// block is always present in the tree, possibly empty.
    fn eval_if(&mut self,
               condition: &Expression,
               then_block: &BlockStatement,
               else_block: &BlockStatement,
               line: usize)
               -> EvalResult<Value> {
        let test = match self.eval_expression(condition)? {
            Value::Bool(value) => value,
            other => {
                return Err(RuntimeError::ConditionNotBoolean { found: other.to_string(),
                                                               line });
            },
        };
        if test {
            self.eval_block(then_block)
        } else {
            self.eval_block(else_block)
        }
    }

    /// Evaluates the elements left to right into an array value.
    fn eval_array_literal(&mut self, elements: &[Expression]) -> EvalResult<Value> {
        let mut values = Vec::with_capacity(elements.len());
        for element in elements {
            values.push(self.eval_expression(element)?);
        }
        Ok(Value::Array(Rc::new(values)))
    }

    /// Evaluates `target[index]`: the target must be an array, the index an
    /// integer within `0..length`.
    fn eval_index(&mut self,
                  target: &Expression,
                  index: &Expression,
                  line: usize)
                  -> EvalResult<Value> {
        let values = match self.eval_expression(target)? {
            Value::Array(values) => values,
            other => {
                return Err(RuntimeError::IndexTargetNotArray { found: other.type_name(),
                                                               line });
            },
        };
        let index = match self.eval_expression(index)? {
            Value::Int(index) => index,
            other => {
                return Err(RuntimeError::IndexNotInteger { found: other.type_name(),
                                                           line });
            },
        };
        usize::try_from(index)
            .ok()
            .and_then(|i| values.get(i))
            .cloned()
            .ok_or(RuntimeError::IndexOutOfBounds { length: values.len(),
                                                    index,
                                                    line })
    }

    /// Pushes a fresh innermost frame onto the scope chain.
    pub fn push_scope(&mut self) {
        self.scope_stack.push(HashMap::new());
    }

    /// Removes the innermost frame. Called when leaving a function body or
    /// a loop.
    pub fn pop_scope(&mut self) {
        self.scope_stack.pop();
    }

    /// Retrieves a variable by walking the scope chain from the innermost
    /// frame outward. Shadowed outer bindings stay intact; they are only
    /// hidden.
    ///
    /// # Example
    /// ```
    /// use comet::interpreter::{evaluator::core::Evaluator, value::core::Value};
    ///
    /// let mut evaluator = Evaluator::new();
    /// evaluator.define_local("x", Value::Int(5));
    /// evaluator.push_scope();
    /// evaluator.define_local("x", Value::Int(6));
    ///
    /// assert_eq!(evaluator.get_variable("x"), Some(&Value::Int(6)));
    /// evaluator.pop_scope();
    /// assert_eq!(evaluator.get_variable("x"), Some(&Value::Int(5)));
    /// ```
    #[must_use]
    pub fn get_variable(&self, name: &str) -> Option<&Value> {
        for scope in self.scope_stack.iter().rev() {
            if let Some(value) = scope.get(name) {
                return Some(value);
            }
        }
        None
    }

    /// Binds a variable in the innermost frame, shadowing any outer binding
    /// with the same name.
    pub fn define_local(&mut self, name: &str, value: Value) {
        self.scope_stack
            .last_mut()
            .expect("at least the global scope")
            .insert(name.to_string(), value);
    }

    /// Overwrites the binding in the nearest frame that already holds the
    /// name. Callers check that the name is bound before calling this; an
    /// unbound name falls through to the innermost frame.
    ///
    /// # Example
    /// ```
    /// use comet::interpreter::{evaluator::core::Evaluator, value::core::Value};
    ///
    /// let mut evaluator = Evaluator::new();
    /// evaluator.define_local("y", Value::Int(1));
    /// evaluator.push_scope();
    /// evaluator.assign_nearest("y", Value::Int(5));
    /// evaluator.pop_scope();
    ///
    /// assert_eq!(evaluator.get_variable("y"), Some(&Value::Int(5)));
    /// ```
    pub fn assign_nearest(&mut self, name: &str, value: Value) {
        for scope in self.scope_stack.iter_mut().rev() {
            if scope.contains_key(name) {
                scope.insert(name.to_string(), value);
                return;
            }
        }
        if let Some(scope) = self.scope_stack.last_mut() {
            scope.insert(name.to_string(), value);
        }
    }

    /// Removes a binding from the innermost frame, releasing a `for` loop's
    /// iteration variables once the loop is done.
    pub fn remove_local(&mut self, name: &str) {
        if let Some(scope) = self.scope_stack.last_mut() {
            scope.remove(name);
        }
    }
}
