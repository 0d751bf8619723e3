use crate::interpreter::lexer::{Token, TokenKind};

/// A syntax error reported by the parser.
///
/// Displays as `[line N] Error at '<lexeme>': <message>`. The lexeme is empty
/// for errors at end of input and holds the offending text for scanner errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[line {line}] Error at '{lexeme}': {message}")]
pub struct SyntaxError {
    /// The source line of the offending token.
    pub line:    usize,
    /// The offending token's text.
    pub lexeme:  String,
    /// What the parser expected or found.
    pub message: String,
}

impl SyntaxError {
    /// Builds an error located at `token`.
    ///
    /// ## Example
    /// ```
    /// use gjuha::{
    ///     error::SyntaxError,
    ///     interpreter::lexer::{Token, TokenKind},
    /// };
    ///
    /// let token = Token::synthetic(TokenKind::Identifier, "x", 3);
    /// let error = SyntaxError::at(&token, "Expect ';' after value.");
    ///
    /// assert_eq!(error.to_string(), "[line 3] Error at 'x': Expect ';' after value.");
    /// ```
    #[must_use]
    pub fn at(token: &Token<'_>, message: impl Into<String>) -> Self {
        let lexeme = match token.kind {
            TokenKind::Eof => String::new(),
            _ => token.lexeme.to_string(),
        };
        Self { line: token.line,
               lexeme,
               message: message.into() }
    }
}
