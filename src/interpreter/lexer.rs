use std::fmt;

/// The closed set of token categories produced by the [`Scanner`].
///
/// Keyword variants are named after their meaning; their source spelling is
/// given in the variant documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `-`
    Minus,
    /// `+`
    Plus,
    /// `/`
    Slash,
    /// `*`
    Star,
    /// `!`
    Bang,
    /// `!=`
    BangEqual,
    /// `=`
    Equal,
    /// `==`
    EqualEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// Variable or function names such as `x` or `shuma`.
    Identifier,
    /// A `"`-delimited string literal, quotes included in the lexeme.
    String,
    /// Numeric literals such as `42` or `3.14`.
    Number,
    /// `dhe`
    And,
    /// `tip`
    Class,
    /// `perndryshe`
    Else,
    /// `gabuar`
    False,
    /// `per`
    For,
    /// `funksion`
    Function,
    /// `nese`
    If,
    /// `ose`
    Or,
    /// `printo`
    Print,
    /// `kthe`
    Return,
    /// `vertet`
    True,
    /// `shpall`
    Var,
    /// `derisa`
    While,
    /// A lexical error; the lexeme holds the offending source text.
    Error(ScanError),
    /// End of input. Produced forever once the source is exhausted.
    Eof,
}

/// Diagnostics carried by [`TokenKind::Error`] tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanError {
    /// A character that starts no token.
    UnexpectedCharacter,
    /// A string literal still open at end of input.
    UnterminatedString,
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter => write!(f, "Unexpected character."),
            Self::UnterminatedString => write!(f, "Unterminated string."),
        }
    }
}

/// A lexical token: an immutable view into the source buffer.
///
/// Tokens are `Copy`, so any number of AST nodes may hold the same span
/// without ownership concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    /// The token category.
    pub kind:   TokenKind,
    /// The exact source text covered by the token.
    pub lexeme: &'src str,
    /// Byte offset of the lexeme in the source.
    pub start:  usize,
    /// The 1-based source line the token ends on.
    pub line:   usize,
}

impl<'src> Token<'src> {
    /// Creates a token that does not originate from scanning, such as the
    /// implicit `vertet` condition of a `per` loop without one.
    #[must_use]
    pub const fn synthetic(kind: TokenKind, lexeme: &'src str, line: usize) -> Self {
        Self { kind,
               lexeme,
               start: 0,
               line }
    }

    /// Length of the lexeme in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.lexeme.len()
    }

    /// Returns `true` for zero-length tokens (end of input).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lexeme.is_empty()
    }
}

/// A hand-written, on-demand scanner.
///
/// The scanner never looks further ahead than the character after the current
/// one and never backtracks. Whitespace and `#` line comments are skipped
/// before each token.
///
/// # Example
/// ```
/// use gjuha::interpreter::lexer::{Scanner, TokenKind};
///
/// let mut scanner = Scanner::new("shpall x = 1;");
///
/// assert_eq!(scanner.next_token().kind, TokenKind::Var);
/// assert_eq!(scanner.next_token().lexeme, "x");
/// assert_eq!(scanner.next_token().kind, TokenKind::Equal);
/// assert_eq!(scanner.next_token().kind, TokenKind::Number);
/// assert_eq!(scanner.next_token().kind, TokenKind::Semicolon);
/// assert_eq!(scanner.next_token().kind, TokenKind::Eof);
/// assert_eq!(scanner.next_token().kind, TokenKind::Eof);
/// ```
#[derive(Debug, Clone)]
pub struct Scanner<'src> {
    source:   &'src str,
    bytes:    &'src [u8],
    start:    usize,
    current:  usize,
    line:     usize,
    finished: bool,
}

impl<'src> Scanner<'src> {
    /// Creates a scanner positioned at the first byte of `source`.
    #[must_use]
    pub const fn new(source: &'src str) -> Self {
        Self { source,
               bytes: source.as_bytes(),
               start: 0,
               current: 0,
               line: 1,
               finished: false }
    }

    /// Scans and returns the next token.
    ///
    /// Once the input is exhausted every call returns an [`TokenKind::Eof`]
    /// token. Malformed input produces a [`TokenKind::Error`] token instead of
    /// aborting; the caller decides how to react.
    pub fn next_token(&mut self) -> Token<'src> {
        self.skip_whitespace();
        self.start = self.current;

        if self.is_at_end() {
            return self.make_token(TokenKind::Eof);
        }

        let c = self.advance();

        if is_alpha(c) {
            return self.identifier();
        }
        if c.is_ascii_digit() {
            return self.number();
        }

        match c {
            b'(' => self.make_token(TokenKind::LeftParen),
            b')' => self.make_token(TokenKind::RightParen),
            b'[' => self.make_token(TokenKind::LeftBracket),
            b']' => self.make_token(TokenKind::RightBracket),
            b'{' => self.make_token(TokenKind::LeftBrace),
            b'}' => self.make_token(TokenKind::RightBrace),
            b';' => self.make_token(TokenKind::Semicolon),
            b',' => self.make_token(TokenKind::Comma),
            b'.' => self.make_token(TokenKind::Dot),
            b'-' => self.make_token(TokenKind::Minus),
            b'+' => self.make_token(TokenKind::Plus),
            b'/' => self.make_token(TokenKind::Slash),
            b'*' => self.make_token(TokenKind::Star),
            b'!' => self.two_char(TokenKind::BangEqual, TokenKind::Bang),
            b'=' => self.two_char(TokenKind::EqualEqual, TokenKind::Equal),
            b'<' => self.two_char(TokenKind::LessEqual, TokenKind::Less),
            b'>' => self.two_char(TokenKind::GreaterEqual, TokenKind::Greater),
            b'"' => self.string(),
            _ => {
                // Keep the lexeme on a character boundary for multi-byte input.
                while !self.is_at_end() && self.peek() & 0xC0 == 0x80 {
                    self.current += 1;
                }
                self.make_token(TokenKind::Error(ScanError::UnexpectedCharacter))
            },
        }
    }

    const fn is_at_end(&self) -> bool {
        self.current >= self.bytes.len()
    }

    fn advance(&mut self) -> u8 {
        let c = self.bytes[self.current];
        self.current += 1;
        c
    }

    fn peek(&self) -> u8 {
        self.bytes.get(self.current).copied().unwrap_or(b'\0')
    }

    fn peek_next(&self) -> u8 {
        self.bytes.get(self.current + 1).copied().unwrap_or(b'\0')
    }

    fn matches(&mut self, expected: u8) -> bool {
        if self.is_at_end() || self.peek() != expected {
            return false;
        }
        self.current += 1;
        true
    }

    fn make_token(&self, kind: TokenKind) -> Token<'src> {
        let token = Token { kind,
                            lexeme: &self.source[self.start..self.current],
                            start: self.start,
                            line: self.line };
        tracing::trace!(kind = ?token.kind, lexeme = token.lexeme, line = token.line, "scanned token");
        token
    }

    fn two_char(&mut self, paired: TokenKind, single: TokenKind) -> Token<'src> {
        let kind = if self.matches(b'=') { paired } else { single };
        self.make_token(kind)
    }

    fn skip_whitespace(&mut self) {
        loop {
            match self.peek() {
                b' ' | b'\r' | b'\t' => {
                    self.current += 1;
                },
                b'\n' => {
                    self.line += 1;
                    self.current += 1;
                },
                b'#' => {
                    while self.peek() != b'\n' && !self.is_at_end() {
                        self.current += 1;
                    }
                },
                _ => return,
            }
        }
    }

    fn identifier(&mut self) -> Token<'src> {
        while is_alpha(self.peek()) || self.peek().is_ascii_digit() {
            self.current += 1;
        }
        let kind = keyword(&self.source[self.start..self.current]).unwrap_or(TokenKind::Identifier);
        self.make_token(kind)
    }

    fn number(&mut self) -> Token<'src> {
        while self.peek().is_ascii_digit() {
            self.current += 1;
        }

        if self.peek() == b'.' && self.peek_next().is_ascii_digit() {
            self.current += 1;
            while self.peek().is_ascii_digit() {
                self.current += 1;
            }
        }

        self.make_token(TokenKind::Number)
    }

    fn string(&mut self) -> Token<'src> {
        while self.peek() != b'"' && !self.is_at_end() {
            if self.peek() == b'\n' {
                self.line += 1;
            }
            self.current += 1;
        }

        if self.is_at_end() {
            return self.make_token(TokenKind::Error(ScanError::UnterminatedString));
        }

        self.current += 1;
        self.make_token(TokenKind::String)
    }
}

impl<'src> Iterator for Scanner<'src> {
    type Item = Token<'src>;

    /// Yields every token up to and including the first end-of-input token.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.finished = true;
        }
        Some(token)
    }
}

const fn is_alpha(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

/// Maps a lexeme to its keyword kind, if it is one.
fn keyword(lexeme: &str) -> Option<TokenKind> {
    let kind = match lexeme {
        "dhe" => TokenKind::And,
        "ose" => TokenKind::Or,
        "derisa" => TokenKind::While,
        "funksion" => TokenKind::Function,
        "kthe" => TokenKind::Return,
        "gabuar" => TokenKind::False,
        "vertet" => TokenKind::True,
        "nese" => TokenKind::If,
        "per" => TokenKind::For,
        "printo" => TokenKind::Print,
        "perndryshe" => TokenKind::Else,
        "shpall" => TokenKind::Var,
        "tip" => TokenKind::Class,
        _ => return None,
    };
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Scanner::new(source).map(|token| token.kind).collect()
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(kinds("shpall nese perndryshe derisa per funksion kthe printo tip"),
                   vec![TokenKind::Var,
                        TokenKind::If,
                        TokenKind::Else,
                        TokenKind::While,
                        TokenKind::For,
                        TokenKind::Function,
                        TokenKind::Return,
                        TokenKind::Print,
                        TokenKind::Class,
                        TokenKind::Eof]);
        assert_eq!(kinds("dhe ose vertet gabuar"),
                   vec![TokenKind::And,
                        TokenKind::Or,
                        TokenKind::True,
                        TokenKind::False,
                        TokenKind::Eof]);
        // Prefixes and extensions of keywords stay identifiers.
        assert_eq!(kinds("pe perx shpallje _dhe Nese"),
                   vec![TokenKind::Identifier; 5].into_iter()
                                                 .chain([TokenKind::Eof])
                                                 .collect::<Vec<_>>());
    }

    #[test]
    fn two_character_operators_collapse() {
        assert_eq!(kinds("!= ! == = <= < >= >"),
                   vec![TokenKind::BangEqual,
                        TokenKind::Bang,
                        TokenKind::EqualEqual,
                        TokenKind::Equal,
                        TokenKind::LessEqual,
                        TokenKind::Less,
                        TokenKind::GreaterEqual,
                        TokenKind::Greater,
                        TokenKind::Eof]);
        assert_eq!(kinds("=!"), vec![TokenKind::Equal, TokenKind::Bang, TokenKind::Eof]);
    }

    #[test]
    fn numbers_need_digits_after_the_dot() {
        let tokens = Scanner::new("12 3.25 7. .5").collect::<Vec<_>>();
        let lexemes = tokens.iter().map(|t| (t.kind, t.lexeme)).collect::<Vec<_>>();

        assert_eq!(lexemes,
                   vec![(TokenKind::Number, "12"),
                        (TokenKind::Number, "3.25"),
                        (TokenKind::Number, "7"),
                        (TokenKind::Dot, "."),
                        (TokenKind::Dot, "."),
                        (TokenKind::Number, "5"),
                        (TokenKind::Eof, "")]);
    }

    #[test]
    fn strings_are_raw_and_span_lines() {
        let mut scanner = Scanner::new("\"a\\n\nb\" x");
        let string = scanner.next_token();
        assert_eq!(string.kind, TokenKind::String);
        assert_eq!(string.lexeme, "\"a\\n\nb\"");
        assert_eq!(string.line, 2);
        assert_eq!(scanner.next_token().line, 2);
    }

    #[test]
    fn unterminated_string_is_an_error_token() {
        let token = Scanner::new("\"open").next_token();
        assert_eq!(token.kind, TokenKind::Error(ScanError::UnterminatedString));
    }

    #[test]
    fn comments_and_newlines_advance_lines() {
        let tokens = Scanner::new("# koment\nx # tjeter\n\ny").collect::<Vec<_>>();
        assert_eq!(tokens.len(), 3);
        assert_eq!((tokens[0].lexeme, tokens[0].line), ("x", 2));
        assert_eq!((tokens[1].lexeme, tokens[1].line), ("y", 4));
    }

    #[test]
    fn unexpected_characters_do_not_stop_the_scan() {
        let tokens = Scanner::new("x @ é y").collect::<Vec<_>>();
        let kinds = tokens.iter().map(|t| t.kind).collect::<Vec<_>>();

        assert_eq!(kinds,
                   vec![TokenKind::Identifier,
                        TokenKind::Error(ScanError::UnexpectedCharacter),
                        TokenKind::Error(ScanError::UnexpectedCharacter),
                        TokenKind::Identifier,
                        TokenKind::Eof]);
        assert_eq!(tokens[1].lexeme, "@");
        assert_eq!(tokens[2].lexeme, "é");
    }

    #[test]
    fn spans_point_into_the_source() {
        let source = "shpall emri = 1;";
        let token = Scanner::new(source).nth(1).unwrap();
        assert_eq!(&source[token.start..token.start + token.len()], "emri");
    }
}
