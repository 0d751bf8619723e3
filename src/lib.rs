//! # gjuha
//!
//! gjuha is a tree-walking interpreter for a small, dynamically typed
//! scripting language with Albanian keywords. Source text is scanned on
//! demand, parsed in a single pass by a Pratt parser and evaluated directly
//! over the resulting tree.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::Write;

use crate::{
    ast::Node,
    error::Error,
    interpreter::{evaluator::core::Interpreter, parser::core::Parser},
};

/// Defines the structure of parsed code.
///
/// This module declares the `Node` enum and the operator and literal types it
/// is built from. The tree is built by the parser and traversed by the
/// evaluator.
///
/// # Responsibilities
/// - Defines one node variant per language construct.
/// - Keeps the tokens needed for runtime error locations.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines the syntax errors collected by the parser, the runtime
/// errors raised by the evaluator and the combined error returned by [`run`],
/// together with the process exit status for each.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together scanning, parsing, environments, values and
/// evaluation.
pub mod interpreter;
/// General utilities that are not specific to a single phase.
///
/// # Responsibilities
/// - Keep user-controlled recursion in the parser and evaluator from
///   overflowing the native stack.
pub mod util;

/// Parses `source` and returns its tree, or every recorded syntax error.
///
/// # Examples
/// ```
/// use gjuha::parse;
///
/// assert!(parse("printo 1;").is_ok());
/// assert!(parse("printo 1").is_err());
/// ```
pub fn parse(source: &str) -> Result<Node<'_>, Error> {
    let mut parser = Parser::new(source);
    let program = parser.parse();

    if parser.had_error() {
        return Err(Error::Syntax(parser.into_errors()));
    }
    Ok(program)
}

/// Parses and runs a whole program, writing `printo` output to `out`.
///
/// A program with a syntax error is never evaluated. A runtime error stops
/// the program; whatever was printed before it stays in `out`.
///
/// # Errors
/// Returns [`Error::Syntax`] if parsing fails and [`Error::Runtime`] if
/// evaluation fails.
///
/// # Examples
/// ```
/// use gjuha::{error::Error, run};
///
/// let mut out = Vec::new();
/// run("per (shpall i = 0; i < 3; i = i + 1) { printo i; }", &mut out).unwrap();
/// assert_eq!(out, b"0\n1\n2\n");
///
/// let mut out = Vec::new();
/// let error = run("printo 1 / 0;", &mut out).unwrap_err();
/// assert!(matches!(error, Error::Runtime(_)));
/// assert_eq!(error.exit_code(), 70);
/// ```
pub fn run<W: Write>(source: &str, out: W) -> Result<(), Error> {
    let program = parse(source)?;
    Interpreter::new(out).interpret(&program)?;
    Ok(())
}
