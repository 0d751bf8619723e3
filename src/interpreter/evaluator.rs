/// Binary operator evaluation logic.
///
/// Handles arithmetic, string concatenation, comparisons, equality and the
/// short-circuiting logical operators.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation and logical NOT.
pub mod unary;

/// Core evaluation logic.
///
/// Contains the interpreter, the node dispatch, statement execution and the
/// completion record that carries `kthe` out of nested blocks.
pub mod core;

/// Function calls.
///
/// Handles callee and arity checking, argument evaluation and call frames.
pub mod function;
