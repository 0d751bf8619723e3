use crate::{
    ast::Node,
    interpreter::{lexer::TokenKind, parser::core::Parser},
};

/// Binding strength of an operator, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Tokens that never continue an expression.
    None,
    /// `=`
    Assignment,
    /// `ose`
    Or,
    /// `dhe`
    And,
    /// `==` `!=`
    Equality,
    /// `<` `>` `<=` `>=`
    Comparison,
    /// `+` `-`
    Term,
    /// `*` `/`
    Factor,
    /// Prefix `-` `!`
    Unary,
    /// `(` as a call
    Call,
    /// Literals and names.
    Primary,
}

impl Precedence {
    /// The next tighter level. Used for the right operand of left-associative
    /// operators.
    ///
    /// ## Example
    /// ```
    /// use gjuha::interpreter::parser::rules::Precedence;
    ///
    /// assert_eq!(Precedence::Term.next(), Precedence::Factor);
    /// assert_eq!(Precedence::Primary.next(), Precedence::Primary);
    /// ```
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::None => Self::Assignment,
            Self::Assignment => Self::Or,
            Self::Or => Self::And,
            Self::And => Self::Equality,
            Self::Equality => Self::Comparison,
            Self::Comparison => Self::Term,
            Self::Term => Self::Factor,
            Self::Factor => Self::Unary,
            Self::Unary => Self::Call,
            Self::Call | Self::Primary => Self::Primary,
        }
    }
}

/// A parse action for a token in prefix position.
pub type PrefixFn<'src> = fn(&mut Parser<'src>) -> Node<'src>;
/// A parse action for a token in infix position, given the left operand.
pub type InfixFn<'src> = fn(&mut Parser<'src>, Node<'src>) -> Node<'src>;

/// How a token kind takes part in expressions.
pub struct ParseRule<'src> {
    /// Action when the token starts an expression.
    pub prefix:     Option<PrefixFn<'src>>,
    /// Action when the token follows a complete left operand.
    pub infix:      Option<InfixFn<'src>>,
    /// Binding precedence in infix position.
    pub precedence: Precedence,
}

impl<'src> ParseRule<'src> {
    const fn new(prefix: Option<PrefixFn<'src>>,
                 infix: Option<InfixFn<'src>>,
                 precedence: Precedence)
                 -> Self {
        Self { prefix,
               infix,
               precedence }
    }
}

/// Looks up the parse rule for a token kind.
///
/// `-` and `(` carry both actions: which one fires depends on whether a left
/// operand is already present.
#[must_use]
pub fn rule<'src>(kind: TokenKind) -> ParseRule<'src> {
    use Precedence as P;
    use TokenKind as T;

    match kind {
        T::LeftParen => ParseRule::new(Some(Parser::grouping), Some(Parser::call), P::Call),
        T::Minus => ParseRule::new(Some(Parser::unary), Some(Parser::binary), P::Term),
        T::Plus => ParseRule::new(None, Some(Parser::binary), P::Term),
        T::Slash | T::Star => ParseRule::new(None, Some(Parser::binary), P::Factor),
        T::Bang => ParseRule::new(Some(Parser::unary), None, P::None),
        T::BangEqual | T::EqualEqual => ParseRule::new(None, Some(Parser::binary), P::Equality),
        T::Greater | T::GreaterEqual | T::Less | T::LessEqual => {
            ParseRule::new(None, Some(Parser::binary), P::Comparison)
        },
        T::Equal => ParseRule::new(None, Some(Parser::assignment), P::Assignment),
        T::Identifier => ParseRule::new(Some(Parser::variable), None, P::None),
        T::String => ParseRule::new(Some(Parser::string), None, P::None),
        T::Number => ParseRule::new(Some(Parser::number), None, P::None),
        T::True | T::False => ParseRule::new(Some(Parser::literal), None, P::None),
        T::And => ParseRule::new(None, Some(Parser::logical), P::And),
        T::Or => ParseRule::new(None, Some(Parser::logical), P::Or),
        T::RightParen
        | T::LeftBracket
        | T::RightBracket
        | T::LeftBrace
        | T::RightBrace
        | T::Semicolon
        | T::Comma
        | T::Dot
        | T::Class
        | T::Else
        | T::For
        | T::Function
        | T::If
        | T::Print
        | T::Return
        | T::Var
        | T::While
        | T::Error(_)
        | T::Eof => ParseRule::new(None, None, P::None),
    }
}
