use crate::{
    ast::{BinaryOperator, Expression, PrefixOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator {
    /// Evaluates a prefix operation.
    ///
    /// `-` requires an integer operand, `!` a boolean one; anything else is
    /// a type error naming the operand's tag.
    pub(crate) fn eval_prefix(&mut self,
                              op: PrefixOperator,
                              right: &Expression,
                              line: usize)
                              -> EvalResult<Value> {
        let value = self.eval_expression(right)?;
        match op {
            PrefixOperator::Negate => match value {
                Value::Int(operand) => {
                    let negated = operand.checked_neg().ok_or(RuntimeError::Overflow { line })?;
                    Ok(Value::Int(negated))
                },
                other => Err(RuntimeError::PrefixTypeMismatch { operator: "-",
                                                                expected: "INTEGER",
                                                                found: other.type_name(),
                                                                line }),
            },
            PrefixOperator::Not => match value {
                Value::Bool(operand) => Ok(Value::Bool(!operand)),
                other => Err(RuntimeError::PrefixTypeMismatch { operator: "!",
                                                                expected: "BOOLEAN",
                                                                found: other.type_name(),
                                                                line }),
            },
        }
    }

    /// Evaluates a binary operation.
    ///
    /// Member access is dispatched before the right operand is reduced,
    /// because the dot inspects the right-hand node structurally. Every
    /// other operator evaluates both sides left to right and then picks an
    /// operator table from the pair of runtime tags.
    pub(crate) fn eval_binary(&mut self,
                              op: BinaryOperator,
                              left: &Expression,
                              right: &Expression,
                              line: usize)
                              -> EvalResult<Value> {
        if op == BinaryOperator::Member {
            return self.eval_member(left, right, line);
        }

        let lhs = self.eval_expression(left)?;
        let rhs = self.eval_expression(right)?;

        match (&lhs, &rhs) {
            (Value::Int(a), Value::Int(b)) => apply_int_operator(op, *a, *b, line),
            (Value::Bool(a), Value::Bool(b)) => apply_bool_operator(op, *a, *b, line),
            (Value::Str(a), Value::Str(b)) => apply_str_operator(op, a, b, line),
            _ if lhs.is_str() || rhs.is_str() => apply_mixed_str_operator(op, &lhs, &rhs, line),
            _ if lhs.type_name() != rhs.type_name() && op == BinaryOperator::Equal => {
                Ok(Value::Bool(false))
            },
            _ if lhs.type_name() != rhs.type_name() && op == BinaryOperator::NotEqual => {
                Ok(Value::Bool(true))
            },
            _ => Err(RuntimeError::OperatorTypeMismatch { operator: op.to_string(),
                                                          left: lhs.type_name(),
                                                          right: rhs.type_name(),
                                                          line }),
        }
    }
}

/// Integer by integer operations: checked arithmetic, comparisons and the
/// inclusive range constructor.
fn apply_int_operator(op: BinaryOperator, left: i64, right: i64, line: usize) -> EvalResult<Value> {
    match op {
        BinaryOperator::Add => left.checked_add(right)
                                   .map(Value::Int)
                                   .ok_or(RuntimeError::Overflow { line }),
        BinaryOperator::Sub => left.checked_sub(right)
                                   .map(Value::Int)
                                   .ok_or(RuntimeError::Overflow { line }),
        BinaryOperator::Mul => left.checked_mul(right)
                                   .map(Value::Int)
                                   .ok_or(RuntimeError::Overflow { line }),
        BinaryOperator::Div => {
            if right == 0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            left.checked_div(right)
                .map(Value::Int)
                .ok_or(RuntimeError::Overflow { line })
        },
        BinaryOperator::Equal => Ok(Value::Bool(left == right)),
        BinaryOperator::NotEqual => Ok(Value::Bool(left != right)),
        BinaryOperator::Less => Ok(Value::Bool(left < right)),
        BinaryOperator::LessEqual => Ok(Value::Bool(left <= right)),
        BinaryOperator::Greater => Ok(Value::Bool(left > right)),
        BinaryOperator::GreaterEqual => Ok(Value::Bool(left >= right)),
        BinaryOperator::Range => Ok(Value::Range { from: left,
                                                   to:   right, }),
        BinaryOperator::Member => Err(RuntimeError::OperatorTypeMismatch { operator:
                                                                               op.to_string(),
                                                                           left: "INTEGER",
                                                                           right: "INTEGER",
                                                                           line }),
    }
}

/// Boolean by boolean operations: only equality and inequality.
fn apply_bool_operator(op: BinaryOperator, left: bool, right: bool, line: usize) -> EvalResult<Value> {
    match op {
        BinaryOperator::Equal => Ok(Value::Bool(left == right)),
        BinaryOperator::NotEqual => Ok(Value::Bool(left != right)),
        other => Err(RuntimeError::InvalidBooleanOperation { operator: other.to_string(),
                                                             line }),
    }
}

/// String by string operations: only concatenation.
fn apply_str_operator(op: BinaryOperator, left: &str, right: &str, line: usize) -> EvalResult<Value> {
    match op {
        BinaryOperator::Add => {
            let mut text = String::with_capacity(left.len() + right.len());
            text.push_str(left);
            text.push_str(right);
            Ok(Value::Str(text))
        },
        other => Err(RuntimeError::InvalidStringOperation { operator: other.to_string(),
                                                            line }),
    }
}

/// One string operand next to a different kind.
///
/// `+` coerces the other side to its string form and concatenates; `*` with
/// an integer on either side repeats the string. Everything else, and
/// operands without a string form, is an error.
fn apply_mixed_str_operator(op: BinaryOperator,
                            left: &Value,
                            right: &Value,
                            line: usize)
                            -> EvalResult<Value> {
    let mismatch = || RuntimeError::StringOperandMismatch { operator: op.to_string(),
                                                            left: left.type_name(),
                                                            right: right.type_name(),
                                                            line };
    match op {
        BinaryOperator::Add => {
            let lhs = left.promote_to_str().ok_or_else(mismatch)?;
            let rhs = right.promote_to_str().ok_or_else(mismatch)?;
            Ok(Value::Str(lhs + &rhs))
        },
        BinaryOperator::Mul => {
            let (text, count) = match (left, right) {
                (Value::Int(count), Value::Str(text))
                | (Value::Str(text), Value::Int(count)) => (text, *count),
                _ => return Err(mismatch()),
            };
            let count = usize::try_from(count).map_err(|_| {
                                                  RuntimeError::NegativeRepeat { count, line }
                                              })?;
            Ok(Value::Str(text.repeat(count)))
        },
        _ => Err(mismatch()),
    }
}
