use std::{io::Write, rc::Rc};

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::{binary::eval_binary, unary::eval_unary},
        value::core::Value,
    },
    util::stack::ensure_sufficient_stack,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or the
/// `RuntimeError` that stopped the program.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// How evaluation of a node finished.
///
/// A `kthe` statement produces [`Completion::Return`], which every enclosing
/// block and loop passes upward untouched until the surrounding call turns it
/// back into a plain value.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion<'src> {
    /// Evaluation fell through normally with this value.
    Normal(Value<'src>),
    /// A return statement fired with this value.
    Return(Value<'src>),
}

impl<'src> Completion<'src> {
    /// The carried value, whichever way evaluation finished.
    #[must_use]
    pub fn into_value(self) -> Value<'src> {
        match self {
            Self::Normal(value) | Self::Return(value) => value,
        }
    }

    /// Returns `true` for [`Completion::Return`].
    #[must_use]
    pub const fn is_return(&self) -> bool {
        matches!(self, Self::Return(_))
    }
}

/// The value produced by statements that have nothing better to yield.
const NOTHING: Value<'static> = Value::Bool(false);

/// Stores the runtime state of one program run.
///
/// The interpreter itself only owns the output sink for `printo`; variable
/// state lives in the [`Environment`] chain threaded through
/// [`Interpreter::evaluate`].
///
/// ## Usage
/// ```
/// use gjuha::interpreter::{evaluator::core::Interpreter, parser::core::Parser};
///
/// let mut parser = Parser::new("shpall a = 2; printo a * 21;");
/// let program = parser.parse();
/// assert!(!parser.had_error());
///
/// let mut interpreter = Interpreter::new(Vec::new());
/// interpreter.interpret(&program).unwrap();
///
/// assert_eq!(interpreter.into_inner(), b"42\n");
/// ```
#[derive(Debug)]
pub struct Interpreter<W> {
    out: W,
}

impl<W: Write> Interpreter<W> {
    /// Creates an interpreter that prints to `out`.
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Consumes the interpreter, returning the output sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Runs a whole program in a fresh, empty global scope.
    ///
    /// The first runtime error aborts the run; output printed before it stays
    /// printed.
    pub fn interpret(&mut self, program: &Node<'_>) -> EvalResult<()> {
        let mut globals = Environment::new();
        let result = self.evaluate(program, &mut globals);
        if let Err(error) = &result {
            tracing::debug!(%error, "program aborted");
        }
        result.map(drop)
    }

    /// Evaluates one node in `env`.
    ///
    /// Every node yields a value. Statements yield `gabuar` unless they have
    /// something more meaningful, and assignments yield the assigned value.
    ///
    /// Nesting and call depth are limited by memory only: the native stack
    /// grows on demand.
    pub fn evaluate<'src>(&mut self,
                          node: &Node<'src>,
                          env: &mut Environment<'src, '_>)
                          -> EvalResult<Completion<'src>> {
        ensure_sufficient_stack(|| self.eval_node(node, env))
    }

    fn eval_node<'src>(&mut self,
                       node: &Node<'src>,
                       env: &mut Environment<'src, '_>)
                       -> EvalResult<Completion<'src>> {
        match node {
            Node::Program(statements) => self.eval_sequence(statements, env),
            Node::Literal { value, .. } => Ok(Completion::Normal(value.into())),
            Node::Variable { name } => {
                env.get(name.lexeme)
                   .cloned()
                   .map(Completion::Normal)
                   .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.lexeme.to_string(),
                                                                    line: name.line, })
            },
            Node::Assign { name, value } => {
                let value = self.value_of(value, env)?;
                env.define(name.lexeme, value.clone());
                Ok(Completion::Normal(value))
            },
            Node::VarDecl { name, initializer } => {
                let value = match initializer {
                    Some(initializer) => self.value_of(initializer, env)?,
                    None => NOTHING,
                };
                env.define(name.lexeme, value.clone());
                Ok(Completion::Normal(value))
            },
            Node::Print { expression } => {
                let value = self.value_of(expression, env)?;
                let line = expression.line();
                writeln!(self.out, "{value}").map_err(|source| RuntimeError::Output { source, line })?;
                Ok(Completion::Normal(NOTHING))
            },
            Node::If { condition,
                       then_branch,
                       else_branch, } => {
                if self.value_of(condition, env)?.is_truthy() {
                    self.evaluate(then_branch, env)
                } else if let Some(else_branch) = else_branch {
                    self.evaluate(else_branch, env)
                } else {
                    Ok(Completion::Normal(NOTHING))
                }
            },
            Node::While { condition, body } => self.eval_while(condition, body, env),
            Node::Function(declaration) => {
                env.define(declaration.name.lexeme, Value::Function(Rc::clone(declaration)));
                Ok(Completion::Normal(NOTHING))
            },
            Node::Return { value, .. } => {
                let value = match value {
                    Some(value) => self.value_of(value, env)?,
                    None => NOTHING,
                };
                Ok(Completion::Return(value))
            },
            Node::Binary { left,
                           op,
                           right,
                           line, } => {
                let left = self.value_of(left, env)?;
                let right = self.value_of(right, env)?;
                eval_binary(*op, &left, &right, *line).map(Completion::Normal)
            },
            Node::Logical { left, op, right, .. } => {
                self.eval_logical(left, *op, right, env).map(Completion::Normal)
            },
            Node::Unary { op, right, line } => {
                let operand = self.value_of(right, env)?;
                eval_unary(*op, &operand, *line).map(Completion::Normal)
            },
            Node::Call { callee,
                         paren,
                         arguments, } => {
                self.eval_call(callee, arguments, paren.line, env).map(Completion::Normal)
            },
        }
    }

    /// Evaluates an expression for its value.
    pub(crate) fn value_of<'src>(&mut self,
                                 node: &Node<'src>,
                                 env: &mut Environment<'src, '_>)
                                 -> EvalResult<Value<'src>> {
        self.evaluate(node, env).map(Completion::into_value)
    }

    /// Runs statements in order in the same scope, stopping at the first
    /// return.
    fn eval_sequence<'src>(&mut self,
                           statements: &[Node<'src>],
                           env: &mut Environment<'src, '_>)
                           -> EvalResult<Completion<'src>> {
        for statement in statements {
            let completion = self.evaluate(statement, env)?;
            if completion.is_return() {
                return Ok(completion);
            }
        }
        Ok(Completion::Normal(NOTHING))
    }

    fn eval_while<'src>(&mut self,
                        condition: &Node<'src>,
                        body: &Node<'src>,
                        env: &mut Environment<'src, '_>)
                        -> EvalResult<Completion<'src>> {
        while self.value_of(condition, env)?.is_truthy() {
            let completion = self.evaluate(body, env)?;
            if completion.is_return() {
                return Ok(completion);
            }
        }
        Ok(Completion::Normal(NOTHING))
    }
}
