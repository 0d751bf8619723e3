use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Applies a prefix operator to an evaluated operand.
///
/// `-` negates numbers and rejects everything else. `!` works on any value
/// and yields the negation of its truthiness.
///
/// # Example
/// ```
/// use gjuha::{
///     ast::UnaryOperator,
///     interpreter::{evaluator::unary::eval_unary, value::core::Value},
/// };
///
/// let v = eval_unary(UnaryOperator::Negate, &Value::Number(5.0), 1).unwrap();
/// assert_eq!(v, Value::Number(-5.0));
///
/// let v = eval_unary(UnaryOperator::Not, &Value::from("tekst"), 1).unwrap();
/// assert_eq!(v, Value::Bool(true));
/// ```
pub fn eval_unary<'src>(op: UnaryOperator,
                        value: &Value<'src>,
                        line: usize)
                        -> EvalResult<Value<'src>> {
    match op {
        UnaryOperator::Negate => match value {
            Value::Number(n) => Ok(Value::Number(-n)),
            _ => Err(RuntimeError::OperandMustBeNumber { op,
                                                         found: value.type_name(),
                                                         line }),
        },
        UnaryOperator::Not => Ok(Value::Bool(!value.is_truthy())),
    }
}
