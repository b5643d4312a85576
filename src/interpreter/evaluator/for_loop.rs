use crate::{
    ast::{BlockStatement, Expression},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator {
    /// Evaluates a `for` statement.
    ///
    /// The iterated expression must produce a range. A fresh scope frame is
    /// pushed for the loop; on every iteration both the key and the value
    /// identifier are bound to the current integer (a range has no separate
    /// key/value pairs), then the body runs. Bounds are inclusive, and a
    /// range whose start exceeds its end simply runs zero times.
    ///
    /// The body's value is discarded on every iteration, so a `return`
    /// inside a loop does not leave the enclosing function. Errors do
    /// propagate, after the loop bindings are cleared and the frame is
    /// popped. The statement itself evaluates to [`Value::Nop`].
    pub(crate) fn eval_for(&mut self,
                           key: &str,
                           value: &str,
                           iterable: &Expression,
                           body: &BlockStatement,
                           line: usize)
                           -> EvalResult<Value> {
        let (from, to) = match self.eval_expression(iterable)? {
            Value::Range { from, to } => (from, to),
            other => {
                return Err(RuntimeError::LoopTargetNotRange { found: other.type_name(),
                                                              line });
            },
        };

        self.push_scope();
        let mut outcome = Ok(());
        for i in from..=to {
            self.define_local(key, Value::Int(i));
            self.define_local(value, Value::Int(i));
            if let Err(error) = self.eval_block(body) {
                outcome = Err(error);
                break;
            }
        }
        self.remove_local(key);
        self.remove_local(value);
        self.pop_scope();
        outcome?;

        Ok(Value::Nop)
    }
}
