use std::rc::Rc;

use crate::{
    ast::{Expression, FunctionStatement},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator, THIS},
        value::{
            core::{FunctionValue, Value},
            object::{Instance, StructDef},
        },
    },
};

impl Evaluator {
    /// Builds a struct descriptor from a declaration and registers it under
    /// its type name.
    ///
    /// Methods are wrapped as function values as they are added; a repeated
    /// method name aborts the declaration before anything is registered.
    pub(crate) fn eval_struct_declaration(&mut self,
                                          name: &str,
                                          methods: &[FunctionStatement],
                                          line: usize)
                                          -> EvalResult<Value> {
        let mut struct_def = StructDef::new(name);
        for method in methods {
            struct_def.add(FunctionValue::from(method), line)?;
        }
        self.types.insert(name.to_string(), Rc::new(struct_def));
        Ok(Value::Nop)
    }

    /// Evaluates `new Type(arguments)`.
    ///
    /// Creates an empty instance of the named type. A struct without an
    /// `init` method accepts only an empty argument list; with one, the
    /// arguments are evaluated and `init` runs against the new instance
    /// before it is handed back.
    pub(crate) fn eval_new(&mut self,
                           type_name: &str,
                           arguments: &[Expression],
                           line: usize)
                           -> EvalResult<Value> {
        let struct_def = self.types
                             .get(type_name)
                             .cloned()
                             .ok_or_else(|| RuntimeError::UnknownType { name:
                                                                            type_name.to_string(),
                                                                        line })?;
        let instance = Rc::new(Instance::new(Rc::clone(&struct_def)));

        let Some(constructor) = struct_def.constructor().cloned() else {
            if arguments.is_empty() {
                return Ok(Value::Instance(instance));
            }
            return Err(RuntimeError::MissingConstructor { type_name: struct_def.name.clone(),
                                                          line });
        };

        let params = self.eval_method_arguments(&constructor, &struct_def, arguments, line)?;
        self.call_on_object(&constructor, &instance, params)?;
        Ok(Value::Instance(instance))
    }

    /// Evaluates the `.` operator. The right-hand node is inspected before
    /// evaluation: an assignment writes a field, an identifier reads one,
    /// and a call dispatches a method with the instance bound as `this`.
    pub(crate) fn eval_member(&mut self,
                              left: &Expression,
                              right: &Expression,
                              line: usize)
                              -> EvalResult<Value> {
        let target = self.eval_expression(left)?;

        match right {
            Expression::Assign { name, value, .. } => {
                let instance = expect_instance(&target, name, line)?;
                let field_value = self.eval_expression(value)?;
                instance.fields.borrow_mut().insert(name.clone(), field_value);
                Ok(Value::Nop)
            },
            Expression::Identifier { name, .. } => {
                let instance = expect_instance(&target, name, line)?;
                let fields = instance.fields.borrow();
                fields.get(name)
                      .cloned()
                      .ok_or_else(|| RuntimeError::UnknownField { field: name.clone(),
                                                                  type_name:
                                                                      instance.struct_def
                                                                              .name
                                                                              .clone(),
                                                                  line })
            },
            Expression::Call { name, arguments, .. } => {
                let Value::Instance(instance) = target else {
                    return Err(RuntimeError::MethodTargetNotObject { method: name.clone(),
                                                                     line });
                };
                let struct_def = Rc::clone(&instance.struct_def);
                let method = struct_def.method(name)
                                       .cloned()
                                       .ok_or_else(|| RuntimeError::UnknownMethod { method:
                                                                                        name.clone(),
                                                                                    type_name:
                                                                                        struct_def.name
                                                                                                  .clone(),
                                                                                    line })?;
                let params = self.eval_method_arguments(&method, &struct_def, arguments, line)?;
                self.call_on_object(&method, &instance, params)
            },
            _ => Err(RuntimeError::InvalidMemberAccess { line }),
        }
    }

    /// Checks the arity rule shared by method calls and constructors (the
    /// declared parameter count may not exceed the supplied argument count,
    /// extra arguments are ignored), then evaluates one argument per
    /// declared parameter.
    fn eval_method_arguments(&mut self,
                             method: &FunctionValue,
                             struct_def: &StructDef,
                             arguments: &[Expression],
                             line: usize)
                             -> EvalResult<Vec<(String, Value)>> {
        if method.parameters.len() > arguments.len() {
            return Err(RuntimeError::MethodArity { method:    method.name.clone(),
                                                   type_name: struct_def.name.clone(),
                                                   expected:  method.parameters.len(),
                                                   given:     arguments.len(),
                                                   line, });
        }
        let mut params = Vec::with_capacity(method.parameters.len());
        for (parameter, argument) in method.parameters.iter().zip(arguments) {
            params.push((parameter.clone(), self.eval_expression(argument)?));
        }
        Ok(params)
    }

    /// Runs a method against an instance: a fresh frame is pushed, `this`
    /// is bound to the receiver, parameters are bound to their values, the
    /// body runs, and a returned value is unwrapped exactly once.
    fn call_on_object(&mut self,
                      method: &FunctionValue,
                      instance: &Rc<Instance>,
                      params: Vec<(String, Value)>)
                      -> EvalResult<Value> {
        self.push_scope();
        self.define_local(THIS, Value::Instance(Rc::clone(instance)));
        for (name, value) in params {
            self.define_local(&name, value);
        }
        let result = self.eval_block(&method.body);
        self.pop_scope();
        Ok(result?.unwrap_return())
    }
}

/// The dot's field forms require the left side to be an instance.
fn expect_instance<'a>(target: &'a Value, field: &str, line: usize) -> EvalResult<&'a Rc<Instance>> {
    match target {
        Value::Instance(instance) => Ok(instance),
        other => Err(RuntimeError::FieldTargetNotObject { field: field.to_string(),
                                                          type_name: other.type_name(),
                                                          line }),
    }
}
