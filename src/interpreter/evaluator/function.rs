use std::rc::Rc;

use crate::{
    ast::Expression,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::{FunctionValue, Value},
    },
};

impl Evaluator {
    /// Evaluates a call expression.
    ///
    /// Builtins are consulted first, so a builtin name shadows any
    /// user-defined function with the same name. Otherwise the name is
    /// looked up in the scope chain and must hold a function value.
    /// Arguments are evaluated left to right in the caller's scope before a
    /// fresh frame is pushed for the body.
    pub(crate) fn eval_call(&mut self,
                            name: &str,
                            arguments: &[Expression],
                            line: usize)
                            -> EvalResult<Value> {
        if self.builtins.contains_key(name) {
            let mut args = Vec::with_capacity(arguments.len());
            for argument in arguments {
                args.push(self.eval_expression(argument)?);
            }
            return self.invoke_builtin(name, &args, line);
        }

        let function = match self.get_variable(name) {
            None => {
                return Err(RuntimeError::UnknownFunction { name: name.to_string(),
                                                           line });
            },
            Some(Value::Function(function)) => Rc::clone(function),
            Some(other) => {
                return Err(RuntimeError::NotCallable { type_name: other.type_name(),
                                                       line });
            },
        };

        if arguments.len() < function.parameters.len() {
            return Err(RuntimeError::FunctionArity { name:     name.to_string(),
                                                     expected: function.parameters.len(),
                                                     given:    arguments.len(),
                                                     line, });
        }

        let mut args = Vec::with_capacity(function.parameters.len());
        for argument in &arguments[..function.parameters.len()] {
            args.push(self.eval_expression(argument)?);
        }

        self.call_function(&function, args)
    }

    /// Invokes a function value: pushes a frame whose parent is the current
    /// scope, binds the parameters positionally, evaluates the body and
    /// unwraps a returned value exactly once.
    pub(crate) fn call_function(&mut self,
                                function: &FunctionValue,
                                args: Vec<Value>)
                                -> EvalResult<Value> {
        self.push_scope();
        for (parameter, arg) in function.parameters.iter().zip(args) {
            self.define_local(parameter, arg);
        }
        let result = self.eval_block(&function.body);
        self.pop_scope();
        Ok(result?.unwrap_return())
    }
}
