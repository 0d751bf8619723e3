/// Stack growth for deeply recursive code.
///
/// The parser and the evaluator both recurse once per nesting level of the
/// program (and the evaluator once more per user function call). This module
/// lets those recursion points grow the native stack on demand instead of
/// overflowing it.
pub mod stack;
