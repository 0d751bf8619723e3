use std::{fmt, rc::Rc};

use crate::ast::{FunctionDecl, LiteralValue};

/// Represents a runtime value in the interpreter.
///
/// Exactly one variant is active at a time. Strings and functions are
/// reference counted, so cloning a value never duplicates or aliases an
/// independently freed buffer.
#[derive(Debug, Clone)]
pub enum Value<'src> {
    /// A numeric value (double precision floating-point).
    Number(f64),
    /// A boolean value (`vertet` or `gabuar`).
    Bool(bool),
    /// An immutable, owned string.
    String(Rc<str>),
    /// A reference to a declared function.
    Function(Rc<FunctionDecl<'src>>),
}

impl From<f64> for Value<'_> {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value<'_> {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value<'_> {
    fn from(v: &str) -> Self {
        Self::String(Rc::from(v))
    }
}

impl From<String> for Value<'_> {
    fn from(v: String) -> Self {
        Self::String(Rc::from(v))
    }
}

impl From<&LiteralValue<'_>> for Value<'_> {
    fn from(lit: &LiteralValue<'_>) -> Self {
        match lit {
            LiteralValue::Number(n) => (*n).into(),
            LiteralValue::Bool(b) => (*b).into(),
            LiteralValue::String(s) => (*s).into(),
        }
    }
}

impl Value<'_> {
    /// Decides whether the value selects a branch or continues a loop.
    ///
    /// Booleans are their own truth value and numbers are truthy iff non-zero.
    /// Strings and functions are always falsy.
    ///
    /// # Example
    /// ```
    /// use gjuha::interpreter::value::core::Value;
    ///
    /// assert!(Value::Number(2.0).is_truthy());
    /// assert!(!Value::Number(0.0).is_truthy());
    /// assert!(!Value::from("jo bosh").is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0,
            Self::String(_) | Self::Function(_) => false,
        }
    }

    /// The user-facing name of the active variant, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Bool(_) => "boolean",
            Self::String(_) => "string",
            Self::Function(_) => "function",
        }
    }

    /// Returns the number if the value is [`Value::Number`].
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Values of different variants are never equal and functions are never
/// equal to anything, themselves included.
impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Function(declaration) => write!(f, "<fn {}>", declaration.name.lexeme),
        }
    }
}
