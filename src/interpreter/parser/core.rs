use crate::{
    ast::Node,
    error::SyntaxError,
    interpreter::lexer::{Scanner, Token, TokenKind},
};

/// One parsing session over one source buffer.
///
/// All parser state (token slots, error flag, panic mode) lives here, so any
/// number of sessions can run independently.
///
/// Errors never abort the parse. The first syntax error switches the parser
/// into panic mode, which suppresses every later report, and parsing carries
/// on structurally until end of input so that a complete tree is always
/// returned. Callers consult [`Parser::had_error`] before evaluating it.
///
/// # Example
/// ```
/// use gjuha::{ast::Node, interpreter::parser::core::Parser};
///
/// let mut parser = Parser::new("shpall x = 1; printo x;");
/// let program = parser.parse();
///
/// assert!(!parser.had_error());
/// assert!(matches!(program, Node::Program(ref statements) if statements.len() == 2));
/// ```
#[derive(Debug)]
pub struct Parser<'src> {
    scanner:    Scanner<'src>,
    current:    Token<'src>,
    previous:   Token<'src>,
    had_error:  bool,
    panic_mode: bool,
    errors:     Vec<SyntaxError>,
}

impl<'src> Parser<'src> {
    /// Creates a session reading tokens from `source`.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        let start = Token::synthetic(TokenKind::Eof, "", 1);
        Self { scanner:    Scanner::new(source),
               current:    start,
               previous:   start,
               had_error:  false,
               panic_mode: false,
               errors:     Vec::new(), }
    }

    /// Parses the whole input into a [`Node::Program`].
    ///
    /// Grammar: `program := declaration* EOF`
    ///
    /// Always returns a tree; whether it is usable is reported by
    /// [`Parser::had_error`].
    pub fn parse(&mut self) -> Node<'src> {
        self.had_error = false;
        self.panic_mode = false;
        self.errors.clear();
        self.advance();

        let mut statements = Vec::new();
        while !self.matches(TokenKind::Eof) {
            statements.push(self.declaration());
        }

        tracing::debug!(statements = statements.len(), had_error = self.had_error, "parsed program");
        Node::Program(statements)
    }

    /// Returns `true` if any syntax error was recorded.
    #[must_use]
    pub const fn had_error(&self) -> bool {
        self.had_error
    }

    /// The recorded syntax errors, in report order.
    #[must_use]
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// Consumes the session, returning the recorded syntax errors.
    #[must_use]
    pub fn into_errors(self) -> Vec<SyntaxError> {
        self.errors
    }

    /// The most recently consumed token.
    pub(super) const fn previous(&self) -> Token<'src> {
        self.previous
    }

    /// The next token, not yet consumed.
    pub(super) const fn current(&self) -> Token<'src> {
        self.current
    }

    /// Shifts `current` into `previous` and scans a new `current`, reporting
    /// and skipping any scanner error tokens on the way.
    pub(super) fn advance(&mut self) {
        self.previous = self.current;
        loop {
            self.current = self.scanner.next_token();
            let TokenKind::Error(error) = self.current.kind else {
                break;
            };
            self.error_at(self.current, error.to_string());
        }
    }

    /// Returns `true` if the current token has the given kind.
    pub(super) fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Consumes the current token if it has the given kind.
    pub(super) fn matches(&mut self, kind: TokenKind) -> bool {
        if !self.check(kind) {
            return false;
        }
        self.advance();
        true
    }

    /// Consumes a token of the given kind or reports `message` at the current
    /// token without consuming anything.
    pub(super) fn consume(&mut self, kind: TokenKind, message: &str) {
        if self.check(kind) {
            self.advance();
            return;
        }
        self.error_at(self.current, message);
    }

    /// Reports a syntax-shape error and enters panic mode.
    pub(super) fn error_at(&mut self, token: Token<'src>, message: impl Into<String>) {
        if self.panic_mode {
            return;
        }
        self.panic_mode = true;
        self.record(token, message.into());
    }

    /// Reports an error that leaves the token stream in a well-formed state,
    /// so panic mode is not entered. Still silent while panicking.
    pub(super) fn report_at(&mut self, token: Token<'src>, message: impl Into<String>) {
        if self.panic_mode {
            return;
        }
        self.record(token, message.into());
    }

    fn record(&mut self, token: Token<'src>, message: String) {
        let error = SyntaxError::at(&token, message);
        tracing::debug!(%error, "syntax error");
        self.had_error = true;
        self.errors.push(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn errors_of(source: &str) -> Vec<String> {
        let mut parser = Parser::new(source);
        parser.parse();
        parser.errors().iter().map(ToString::to_string).collect()
    }

    #[test]
    fn clean_program_has_no_errors() {
        let mut parser = Parser::new("printo 1 + 2;");
        parser.parse();
        assert!(!parser.had_error());
        assert!(parser.errors().is_empty());
    }

    #[test]
    fn only_the_first_syntax_error_is_reported() {
        assert_eq!(errors_of("printo 1\nprinto ;\nshpall = 3;"),
                   vec!["[line 2] Error at 'printo': Expect ';' after value.".to_string()]);
    }

    #[test]
    fn scanner_errors_are_reported_with_their_text() {
        assert_eq!(errors_of("printo 1 @ 2;"),
                   vec!["[line 1] Error at '@': Unexpected character.".to_string()]);
        assert_eq!(errors_of("printo \"hapur;"),
                   vec!["[line 1] Error at '\"hapur;': Unterminated string.".to_string()]);
    }

    #[test]
    fn errors_at_end_of_input_have_an_empty_lexeme() {
        assert_eq!(errors_of("printo 1"),
                   vec!["[line 1] Error at '': Expect ';' after value.".to_string()]);
    }

    #[test]
    fn missing_expression_is_reported() {
        assert_eq!(errors_of("printo );"),
                   vec!["[line 1] Error at ')': Expect expression.".to_string()]);
    }

    #[test]
    fn parse_always_reaches_end_of_input() {
        let mut parser = Parser::new("nese ( { } } ) derisa shpall ; ; tip [ ] .");
        let program = parser.parse();
        assert!(parser.had_error());
        assert!(matches!(program, Node::Program(_)));
    }

    #[test]
    fn sessions_are_independent() {
        let mut broken = Parser::new("printo ;");
        let mut fine = Parser::new("printo 1;");
        broken.parse();
        fine.parse();
        assert!(broken.had_error());
        assert!(!fine.had_error());
    }

    #[test]
    fn reparsing_starts_from_a_clean_slate() {
        let mut parser = Parser::new("printo ;");
        parser.parse();
        assert!(parser.had_error());
        assert_eq!(parser.errors().len(), 1);

        // The input is exhausted, so the second run sees only end of input.
        let program = parser.parse();
        assert!(matches!(program, Node::Program(ref statements) if statements.is_empty()));
        assert!(!parser.had_error());
        assert!(parser.errors().is_empty());
    }
}
