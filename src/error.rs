/// Syntax errors.
///
/// Defines the diagnostic recorded by the parser when the token stream does
/// not match the grammar. Syntax errors never abort a parse; they are
/// collected as a side channel next to the returned tree.
pub mod syntax_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation. Every
/// runtime error is fatal to the program run.
pub mod runtime_error;

pub use runtime_error::RuntimeError;
pub use syntax_error::SyntaxError;

/// Process exit status for programs rejected by the parser.
pub const EXIT_SYNTAX: i32 = 65;
/// Process exit status for programs that failed while running.
pub const EXIT_RUNTIME: i32 = 70;
/// Process exit status when the source file cannot be read.
pub const EXIT_IO: i32 = 74;

/// Any failure of the scan, parse and evaluate pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The program has at least one syntax error and was not evaluated.
    #[error("{}", join_lines(.0))]
    Syntax(Vec<SyntaxError>),
    /// Evaluation stopped on a runtime error.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// The process exit status that reports this failure.
    ///
    /// ## Example
    /// ```
    /// use gjuha::error::{EXIT_RUNTIME, Error, RuntimeError};
    ///
    /// let error = Error::from(RuntimeError::DivisionByZero { line: 1 });
    /// assert_eq!(error.exit_code(), EXIT_RUNTIME);
    /// ```
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Syntax(_) => EXIT_SYNTAX,
            Self::Runtime(_) => EXIT_RUNTIME,
        }
    }
}

fn join_lines(errors: &[SyntaxError]) -> String {
    errors.iter()
          .map(ToString::to_string)
          .collect::<Vec<_>>()
          .join("\n")
}
