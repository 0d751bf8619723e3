use std::{fmt, rc::Rc};

use crate::interpreter::lexer::{Token, TokenKind};

/// Represents a literal value folded at parse time.
///
/// Numbers are already converted from their decimal spelling and strings have
/// their surrounding quotes stripped (no escape processing happens).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralValue<'src> {
    /// A double-precision number literal.
    Number(f64),
    /// `vertet` or `gabuar`.
    Bool(bool),
    /// The raw contents of a string literal, quotes excluded.
    String(&'src str),
}

/// A node of the abstract syntax tree.
///
/// Every node owns its children, so dropping the root tears down the whole
/// program. The one shared piece is a function declaration, which runtime
/// function values also point at. Statements and expressions share this one
/// type because every node evaluates to a value.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<'src> {
    /// An ordered statement sequence: the whole program or a `{ ... }` block.
    Program(Vec<Self>),
    /// An arithmetic, comparison or equality operation.
    Binary {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line of the operator token.
        line:  usize,
    },
    /// A prefix operation.
    Unary {
        /// The operator.
        op:    UnaryOperator,
        /// The operand.
        right: Box<Self>,
        /// Line of the operator token.
        line:  usize,
    },
    /// A short-circuiting `dhe`/`ose`.
    Logical {
        /// Left operand, always evaluated.
        left:  Box<Self>,
        /// The operator.
        op:    LogicalOperator,
        /// Right operand, evaluated only when the left one does not decide.
        right: Box<Self>,
        /// Line of the operator token.
        line:  usize,
    },
    /// A literal constant.
    Literal {
        /// The token the literal was read from.
        token: Token<'src>,
        /// The folded value.
        value: LiteralValue<'src>,
    },
    /// A reference to a variable by name.
    Variable {
        /// The identifier token.
        name: Token<'src>,
    },
    /// `name = value`.
    Assign {
        /// The target identifier.
        name:  Token<'src>,
        /// The assigned expression.
        value: Box<Self>,
    },
    /// `shpall name = initializer;`
    VarDecl {
        /// The declared identifier.
        name:        Token<'src>,
        /// Optional initializer; `gabuar` is bound when absent.
        initializer: Option<Box<Self>>,
    },
    /// `printo expression;`
    Print {
        /// The printed expression.
        expression: Box<Self>,
    },
    /// `nese (condition) { ... } perndryshe { ... }`
    If {
        /// The branch condition.
        condition:   Box<Self>,
        /// Block run when the condition is truthy.
        then_branch: Box<Self>,
        /// Optional block run otherwise.
        else_branch: Option<Box<Self>>,
    },
    /// `derisa (condition) { ... }`, also the target of `per` desugaring.
    While {
        /// The loop condition.
        condition: Box<Self>,
        /// The loop body.
        body:      Box<Self>,
    },
    /// A function declaration.
    ///
    /// The declaration is reference counted so that runtime function values
    /// can point at it while the tree keeps owning it.
    Function(Rc<FunctionDecl<'src>>),
    /// `callee(arguments...)`
    Call {
        /// The expression producing the function.
        callee:    Box<Self>,
        /// The closing parenthesis, used for error locations.
        paren:     Token<'src>,
        /// Arguments in source order.
        arguments: Vec<Self>,
    },
    /// `kthe value;`
    Return {
        /// The `kthe` keyword.
        keyword: Token<'src>,
        /// Optional returned expression; `gabuar` when absent.
        value:   Option<Box<Self>>,
    },
}

impl Node<'_> {
    /// Gets a representative source line for `self`.
    ///
    /// ## Example
    /// ```
    /// use gjuha::{
    ///     ast::Node,
    ///     interpreter::lexer::{Token, TokenKind},
    /// };
    ///
    /// let node = Node::Variable { name: Token::synthetic(TokenKind::Identifier, "x", 5) };
    ///
    /// assert_eq!(node.line(), 5);
    /// ```
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::Program(statements) => statements.first().map_or(0, |statement| statement.line()),
            Self::Binary { line, .. } | Self::Unary { line, .. } | Self::Logical { line, .. } => {
                *line
            },
            Self::Literal { token, .. } => token.line,
            Self::Variable { name } | Self::Assign { name, .. } | Self::VarDecl { name, .. } => {
                name.line
            },
            Self::Print { expression } => expression.line(),
            Self::If { condition, .. } | Self::While { condition, .. } => condition.line(),
            Self::Function(declaration) => declaration.name.line,
            Self::Call { paren, .. } => paren.line,
            Self::Return { keyword, .. } => keyword.line,
        }
    }
}

/// A user-defined function: its name, parameters and block body.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl<'src> {
    /// The function name.
    pub name:   Token<'src>,
    /// Parameter names in declaration order.
    pub params: Vec<Token<'src>>,
    /// The body, always a [`Node::Program`].
    pub body:   Node<'src>,
}

impl FunctionDecl<'_> {
    /// The number of declared parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// Represents a binary operator.
///
/// Binary operators include arithmetic, comparisons and equality.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
}

impl BinaryOperator {
    /// Maps an operator token kind to its binary operator.
    #[must_use]
    pub const fn from_kind(kind: TokenKind) -> Option<Self> {
        let op = match kind {
            TokenKind::Plus => Self::Add,
            TokenKind::Minus => Self::Sub,
            TokenKind::Star => Self::Mul,
            TokenKind::Slash => Self::Div,
            TokenKind::Less => Self::Less,
            TokenKind::Greater => Self::Greater,
            TokenKind::LessEqual => Self::LessEqual,
            TokenKind::GreaterEqual => Self::GreaterEqual,
            TokenKind::EqualEqual => Self::Equal,
            TokenKind::BangEqual => Self::NotEqual,
            _ => return None,
        };
        Some(op)
    }
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT over truthiness (e.g. `!x`).
    Not,
}

impl UnaryOperator {
    /// Maps a prefix token kind to its unary operator.
    #[must_use]
    pub const fn from_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Minus => Some(Self::Negate),
            TokenKind::Bang => Some(Self::Not),
            _ => None,
        }
    }
}

/// Represents a short-circuiting logical operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogicalOperator {
    /// `dhe`
    And,
    /// `ose`
    Or,
}

impl LogicalOperator {
    /// Maps a keyword token kind to its logical operator.
    #[must_use]
    pub const fn from_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::And => Some(Self::And),
            TokenKind::Or => Some(Self::Or),
            _ => None,
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryOperator::{
            Add, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
            Self::Not => write!(f, "!"),
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => write!(f, "dhe"),
            Self::Or => write!(f, "ose"),
        }
    }
}
