use std::io::Write;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

impl<W: Write> Interpreter<W> {
    /// Evaluates a call expression.
    ///
    /// The callee must evaluate to a function whose arity equals the number
    /// of arguments; both are checked before any argument is evaluated.
    /// Arguments are then evaluated left to right in the caller's scope and
    /// bound to the parameters in a fresh frame enclosed by that scope, so the
    /// body sees the caller's bindings (dynamic scoping).
    ///
    /// A `kthe` inside the body ends the call with its value. A body that runs
    /// to completion yields `gabuar`.
    pub(crate) fn eval_call<'src>(&mut self,
                                  callee: &Node<'src>,
                                  arguments: &[Node<'src>],
                                  line: usize,
                                  env: &mut Environment<'src, '_>)
                                  -> EvalResult<Value<'src>> {
        let declaration = match self.value_of(callee, env)? {
            Value::Function(declaration) => declaration,
            other => {
                return Err(RuntimeError::NotCallable { found: other.type_name(),
                                                       line });
            },
        };

        if arguments.len() != declaration.arity() {
            return Err(RuntimeError::ArityMismatch { expected: declaration.arity(),
                                                     found: arguments.len(),
                                                     line });
        }

        let arguments = arguments.iter()
                                 .map(|argument| self.value_of(argument, env))
                                 .collect::<EvalResult<Vec<_>>>()?;

        tracing::debug!(function = declaration.name.lexeme, line, "call");

        let mut frame = Environment::with_enclosing(&*env);
        for (param, value) in declaration.params.iter().zip(arguments) {
            frame.define(param.lexeme, value);
        }

        let result = self.value_of(&declaration.body, &mut frame);
        tracing::debug!(function = declaration.name.lexeme, ok = result.is_ok(), "return");
        result
    }
}

#[cfg(test)]
mod tests {
    use crate::interpreter::{evaluator::core::Interpreter, parser::core::Parser};

    fn run(source: &str) -> (String, Result<(), String>) {
        let mut parser = Parser::new(source);
        let program = parser.parse();
        assert!(!parser.had_error(), "{:?}", parser.errors());

        let mut interpreter = Interpreter::new(Vec::new());
        let result = interpreter.interpret(&program).map_err(|e| e.to_string());
        (String::from_utf8(interpreter.into_inner()).unwrap(), result)
    }

    #[test]
    fn return_value_reaches_the_caller() {
        let (out, result) = run("funksion dyfish(n) { kthe n * 2; } printo dyfish(21);");
        assert_eq!(result, Ok(()));
        assert_eq!(out, "42\n");
    }

    #[test]
    fn falling_off_the_end_yields_false() {
        let (out, _) = run("funksion bosh() { } printo bosh();");
        assert_eq!(out, "false\n");
    }

    #[test]
    fn return_inside_a_loop_ends_the_call() {
        let source = "funksion gjej() { shpall i = 0; derisa (vertet) { nese (i == 3) { kthe i; } i = i + 1; } }
                      printo gjej();";
        assert_eq!(run(source).0, "3\n");
    }

    #[test]
    fn recursion_works() {
        let source = "funksion fib(n) { nese (n < 2) { kthe n; } kthe fib(n - 1) + fib(n - 2); }
                      printo fib(15);";
        assert_eq!(run(source).0, "610\n");
    }

    #[test]
    fn arity_is_checked_before_arguments_run() {
        let (out, result) = run("funksion f(a) { kthe a; } f(1, 2);");
        assert_eq!(out, "");
        assert_eq!(result, Err("Error on line 1: Expected 1 arguments but got 2.".to_string()));
    }

    #[test]
    fn calling_a_number_fails() {
        let (_, result) = run("shpall x = 3;\nx();");
        assert_eq!(result, Err("Error on line 2: Can only call functions, found number.".to_string()));
    }

    #[test]
    fn callee_sees_the_callers_bindings() {
        let source = "funksion lexo() { kthe y; }
                      funksion thirr() { shpall y = \"dinamik\"; kthe lexo(); }
                      printo thirr();";
        assert_eq!(run(source).0, "dinamik\n");
    }

    #[test]
    fn parameters_shadow_without_touching_the_caller() {
        let source = "shpall n = 1; funksion f(n) { n = n + 10; kthe n; } printo f(5); printo n;";
        assert_eq!(run(source).0, "15\n1\n");
    }
}
