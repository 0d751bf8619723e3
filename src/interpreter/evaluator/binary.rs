use std::{io::Write, rc::Rc};

use crate::{
    ast::{BinaryOperator, LogicalOperator, Node},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

/// Applies a binary operator to two evaluated operands.
///
/// `+` adds two numbers or concatenates two strings into a new string. The
/// other arithmetic and the comparison operators require two numbers, and
/// division by exactly zero is an error. `==` and `!=` accept any operands and
/// use [`Value`] equality.
///
/// # Example
/// ```
/// use gjuha::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::eval_binary, value::core::Value},
/// };
///
/// let sum = eval_binary(BinaryOperator::Add, &Value::from("ab"), &Value::from("c"), 1).unwrap();
/// assert_eq!(sum, Value::from("abc"));
///
/// let less = eval_binary(BinaryOperator::Less, &Value::Number(1.0), &Value::Number(2.0), 1);
/// assert_eq!(less.unwrap(), Value::Bool(true));
///
/// assert!(eval_binary(BinaryOperator::Div, &Value::Number(1.0), &Value::Number(0.0), 1).is_err());
/// ```
pub fn eval_binary<'src>(op: BinaryOperator,
                         left: &Value<'src>,
                         right: &Value<'src>,
                         line: usize)
                         -> EvalResult<Value<'src>> {
    use BinaryOperator::{
        Add, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Sub,
    };

    match op {
        Add => add(left, right, line),
        Sub => numbers(op, left, right, line).map(|(a, b)| Value::Number(a - b)),
        Mul => numbers(op, left, right, line).map(|(a, b)| Value::Number(a * b)),
        Div => {
            let (a, b) = numbers(op, left, right, line)?;
            if b == 0.0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            Ok(Value::Number(a / b))
        },
        Less => numbers(op, left, right, line).map(|(a, b)| Value::Bool(a < b)),
        Greater => numbers(op, left, right, line).map(|(a, b)| Value::Bool(a > b)),
        LessEqual => numbers(op, left, right, line).map(|(a, b)| Value::Bool(a <= b)),
        GreaterEqual => numbers(op, left, right, line).map(|(a, b)| Value::Bool(a >= b)),
        Equal => Ok(Value::Bool(left == right)),
        NotEqual => Ok(Value::Bool(left != right)),
    }
}

/// Both operands as numbers, or the type error for `op`.
fn numbers(op: BinaryOperator,
           left: &Value<'_>,
           right: &Value<'_>,
           line: usize)
           -> EvalResult<(f64, f64)> {
    match (left.as_number(), right.as_number()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(RuntimeError::OperandsMustBeNumbers { op,
                                                       left: left.type_name(),
                                                       right: right.type_name(),
                                                       line }),
    }
}

fn add<'src>(left: &Value<'src>, right: &Value<'src>, line: usize) -> EvalResult<Value<'src>> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::String(a), Value::String(b)) => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Ok(Value::String(Rc::from(joined)))
        },
        _ => Err(RuntimeError::InvalidAddition { left: left.type_name(),
                                                 right: right.type_name(),
                                                 line }),
    }
}

impl<W: Write> Interpreter<W> {
    /// Evaluates `dhe` / `ose` with short-circuiting.
    ///
    /// The left operand is always evaluated. When it decides the result
    /// (truthy for `ose`, falsy for `dhe`) it is returned as is, without
    /// conversion to a boolean; otherwise the right operand's value is the
    /// result.
    pub(crate) fn eval_logical<'src>(&mut self,
                                     left: &Node<'src>,
                                     op: LogicalOperator,
                                     right: &Node<'src>,
                                     env: &mut Environment<'src, '_>)
                                     -> EvalResult<Value<'src>> {
        let left = self.value_of(left, env)?;

        let decided = match op {
            LogicalOperator::Or => left.is_truthy(),
            LogicalOperator::And => !left.is_truthy(),
        };
        if decided {
            return Ok(left);
        }

        self.value_of(right, env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Value<'static> {
        Value::Number(n)
    }

    #[test]
    fn arithmetic_on_numbers() {
        assert_eq!(eval_binary(BinaryOperator::Add, &num(2.0), &num(3.0), 1).unwrap(), num(5.0));
        assert_eq!(eval_binary(BinaryOperator::Sub, &num(2.0), &num(3.0), 1).unwrap(), num(-1.0));
        assert_eq!(eval_binary(BinaryOperator::Mul, &num(2.5), &num(4.0), 1).unwrap(), num(10.0));
        assert_eq!(eval_binary(BinaryOperator::Div, &num(7.0), &num(2.0), 1).unwrap(), num(3.5));
    }

    #[test]
    fn comparisons_yield_booleans() {
        assert_eq!(eval_binary(BinaryOperator::LessEqual, &num(2.0), &num(2.0), 1).unwrap(),
                   Value::Bool(true));
        assert_eq!(eval_binary(BinaryOperator::Greater, &num(2.0), &num(2.0), 1).unwrap(),
                   Value::Bool(false));
        assert_eq!(eval_binary(BinaryOperator::GreaterEqual, &num(3.0), &num(2.0), 1).unwrap(),
                   Value::Bool(true));
    }

    #[test]
    fn equality_never_crosses_variants() {
        assert_eq!(eval_binary(BinaryOperator::Equal, &num(1.0), &Value::Bool(true), 1).unwrap(),
                   Value::Bool(false));
        assert_eq!(eval_binary(BinaryOperator::NotEqual, &Value::from("1"), &num(1.0), 1).unwrap(),
                   Value::Bool(true));
        assert_eq!(eval_binary(BinaryOperator::Equal, &Value::from("a"), &Value::from("a"), 1).unwrap(),
                   Value::Bool(true));
    }

    #[test]
    fn mixed_addition_is_rejected() {
        let error = eval_binary(BinaryOperator::Add, &num(1.0), &Value::from("x"), 4).unwrap_err();
        assert!(matches!(error,
                         RuntimeError::InvalidAddition { left: "number",
                                                         right: "string",
                                                         line: 4 }));
    }

    #[test]
    fn comparing_strings_is_rejected() {
        let error = eval_binary(BinaryOperator::Less, &Value::from("a"), &Value::from("b"), 2).unwrap_err();
        assert!(matches!(error, RuntimeError::OperandsMustBeNumbers { op: BinaryOperator::Less, .. }));
    }

    #[test]
    fn only_exact_zero_divisor_fails() {
        let error = eval_binary(BinaryOperator::Div, &num(1.0), &num(-0.0), 3).unwrap_err();
        assert!(matches!(error, RuntimeError::DivisionByZero { line: 3 }));
        assert_eq!(eval_binary(BinaryOperator::Div, &num(1.0), &num(0.125), 3).unwrap(),
                   num(8.0));
    }
}
