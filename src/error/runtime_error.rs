use std::io;

use crate::ast::{BinaryOperator, UnaryOperator};

#[derive(Debug, thiserror::Error)]
/// Represents all errors that can occur during evaluation.
pub enum RuntimeError {
    /// Tried to read a variable bound nowhere in the environment chain.
    #[error("Error on line {line}: Undefined variable '{name}'.")]
    UndefinedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// `+` applied to anything but two numbers or two strings.
    #[error("Error on line {line}: Operands for '+' must be two numbers or two strings, found \
             {left} and {right}.")]
    InvalidAddition {
        /// Type name of the left operand.
        left:  &'static str,
        /// Type name of the right operand.
        right: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// An arithmetic or comparison operator applied to a non-number.
    #[error("Error on line {line}: Operands for '{op}' must be numbers, found {left} and \
             {right}.")]
    OperandsMustBeNumbers {
        /// The operator.
        op:    BinaryOperator,
        /// Type name of the left operand.
        left:  &'static str,
        /// Type name of the right operand.
        right: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A numeric prefix operator applied to a non-number.
    #[error("Error on line {line}: Operand for '{op}' must be a number, found {found}.")]
    OperandMustBeNumber {
        /// The operator.
        op:    UnaryOperator,
        /// Type name of the operand.
        found: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Attempted division by zero.
    #[error("Error on line {line}: Division by zero.")]
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The callee of a call expression is not a function.
    #[error("Error on line {line}: Can only call functions, found {found}.")]
    NotCallable {
        /// Type name of the callee value.
        found: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// The wrong number of arguments was supplied to a function.
    #[error("Error on line {line}: Expected {expected} arguments but got {found}.")]
    ArityMismatch {
        /// The declared parameter count.
        expected: usize,
        /// The supplied argument count.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Writing `printo` output failed.
    #[error("Error on line {line}: Failed to write output: {source}")]
    Output {
        /// The underlying I/O failure.
        source: io::Error,
        /// The source line where the error occurred.
        line:   usize,
    },
}

impl RuntimeError {
    /// The source line the error is attributed to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UndefinedVariable { line, .. }
            | Self::InvalidAddition { line, .. }
            | Self::OperandsMustBeNumbers { line, .. }
            | Self::OperandMustBeNumber { line, .. }
            | Self::DivisionByZero { line }
            | Self::NotCallable { line, .. }
            | Self::ArityMismatch { line, .. }
            | Self::Output { line, .. } => *line,
        }
    }
}
