use std::rc::Rc;

use crate::{
    ast::{FunctionDecl, LiteralValue, Node},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::Parser,
    },
    util::stack::ensure_sufficient_stack,
};

/// Largest number of parameters a function declaration may list.
pub const MAX_PARAMETERS: usize = 255;

impl<'src> Parser<'src> {
    /// Grammar: `declaration := funDecl | varDecl | statement`
    pub(super) fn declaration(&mut self) -> Node<'src> {
        ensure_sufficient_stack(|| self.declaration_inner())
    }

    fn declaration_inner(&mut self) -> Node<'src> {
        if self.matches(TokenKind::Function) {
            return self.function_declaration();
        }
        if self.matches(TokenKind::Var) {
            return self.var_declaration();
        }
        self.statement()
    }

    /// Grammar:
    /// `statement := printStmt | ifStmt | whileStmt | returnStmt | forStmt | exprStmt`
    fn statement(&mut self) -> Node<'src> {
        if self.matches(TokenKind::Print) {
            return self.print_statement();
        }
        if self.matches(TokenKind::If) {
            return self.if_statement();
        }
        if self.matches(TokenKind::While) {
            return self.while_statement();
        }
        if self.matches(TokenKind::Return) {
            return self.return_statement();
        }
        if self.matches(TokenKind::For) {
            return self.for_statement();
        }
        self.expression_statement()
    }

    /// `shpall name ( = expression )? ;`
    fn var_declaration(&mut self) -> Node<'src> {
        self.consume(TokenKind::Identifier, "Expect variable name.");
        let name = self.previous();

        let initializer = self.matches(TokenKind::Equal)
                              .then(|| Box::new(self.expression()));
        self.consume(TokenKind::Semicolon, "Expect ';' after variable declaration.");

        Node::VarDecl { name, initializer }
    }

    /// `funksion name ( params? ) { ... }`
    fn function_declaration(&mut self) -> Node<'src> {
        self.consume(TokenKind::Identifier, "Expect function name.");
        let name = self.previous();
        self.consume(TokenKind::LeftParen, "Expect '(' after function name.");

        let mut params = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                if params.len() == MAX_PARAMETERS {
                    self.report_at(self.current(), "Can't have more than 255 parameters.");
                }
                self.consume(TokenKind::Identifier, "Expect parameter name.");
                params.push(self.previous());
                if !self.matches(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.consume(TokenKind::RightParen, "Expect ')' after parameters.");
        self.consume(TokenKind::LeftBrace, "Expect '{' before function body.");
        let body = Node::Program(self.block());

        Node::Function(Rc::new(FunctionDecl { name, params, body }))
    }

    fn print_statement(&mut self) -> Node<'src> {
        let expression = self.expression();
        self.consume(TokenKind::Semicolon, "Expect ';' after value.");
        Node::Print { expression: Box::new(expression) }
    }

    fn expression_statement(&mut self) -> Node<'src> {
        let expression = self.expression();
        self.consume(TokenKind::Semicolon, "Expect ';' after expression.");
        expression
    }

    /// `nese ( condition ) { ... } ( perndryshe { ... } )?`
    ///
    /// Both branches must be braced blocks.
    fn if_statement(&mut self) -> Node<'src> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'nese'.");
        let condition = self.expression();
        self.consume(TokenKind::RightParen, "Expect ')' after condition.");
        self.consume(TokenKind::LeftBrace, "Expect '{' before nese branch.");
        let then_branch = Node::Program(self.block());

        let else_branch = if self.matches(TokenKind::Else) {
            self.consume(TokenKind::LeftBrace, "Expect '{' before perndryshe branch.");
            Some(Box::new(Node::Program(self.block())))
        } else {
            None
        };

        Node::If { condition: Box::new(condition),
                   then_branch: Box::new(then_branch),
                   else_branch }
    }

    /// `derisa ( condition ) { ... }`
    fn while_statement(&mut self) -> Node<'src> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'derisa'.");
        let condition = self.expression();
        self.consume(TokenKind::RightParen, "Expect ')' after condition.");
        self.consume(TokenKind::LeftBrace, "Expect '{' before derisa body.");
        let body = Node::Program(self.block());

        Node::While { condition: Box::new(condition),
                      body:      Box::new(body), }
    }

    /// `kthe expression? ;`
    fn return_statement(&mut self) -> Node<'src> {
        let keyword = self.previous();
        let value = (!self.check(TokenKind::Semicolon)).then(|| Box::new(self.expression()));
        self.consume(TokenKind::Semicolon, "Expect ';' after return value.");

        Node::Return { keyword, value }
    }

    /// `per ( init? ; condition? ; increment? ) { ... }`
    ///
    /// There is no loop node of its own. The loop is rewritten into
    ///
    /// ```text
    /// { init; derisa (condition) { body; increment; } }
    /// ```
    ///
    /// with a missing condition replaced by `vertet`. Without an initializer
    /// the bare `derisa` node is returned.
    fn for_statement(&mut self) -> Node<'src> {
        let keyword = self.previous();
        self.consume(TokenKind::LeftParen, "Expect '(' after 'per'.");

        let initializer = if self.matches(TokenKind::Semicolon) {
            None
        } else if self.matches(TokenKind::Var) {
            Some(self.var_declaration())
        } else {
            Some(self.expression_statement())
        };

        let condition = (!self.check(TokenKind::Semicolon)).then(|| self.expression());
        self.consume(TokenKind::Semicolon, "Expect ';' after loop condition.");

        let increment = (!self.check(TokenKind::RightParen)).then(|| self.expression());
        self.consume(TokenKind::RightParen, "Expect ')' after for clauses.");

        self.consume(TokenKind::LeftBrace, "Expect '{' before per body.");
        let mut body = self.block();

        if let Some(increment) = increment {
            body.push(increment);
        }
        let condition = condition.unwrap_or_else(|| {
                                     Node::Literal { token: Token::synthetic(TokenKind::True,
                                                                             "vertet",
                                                                             keyword.line),
                                                     value: LiteralValue::Bool(true), }
                                 });
        let while_loop = Node::While { condition: Box::new(condition),
                                       body:      Box::new(Node::Program(body)), };

        match initializer {
            Some(initializer) => Node::Program(vec![initializer, while_loop]),
            None => while_loop,
        }
    }

    /// The statements of a block whose `{` has already been consumed.
    ///
    /// Stops at `}` or end of input, whichever comes first.
    fn block(&mut self) -> Vec<Node<'src>> {
        let mut statements = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.check(TokenKind::Eof) {
            statements.push(self.declaration());
        }
        self.consume(TokenKind::RightBrace, "Expect '}' after block.");
        statements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::BinaryOperator;

    fn parse_ok(source: &str) -> Vec<Node<'_>> {
        let mut parser = Parser::new(source);
        let Node::Program(statements) = parser.parse() else {
            panic!("parse did not return a program");
        };
        assert!(!parser.had_error(), "{:?}", parser.errors());
        statements
    }

    fn first_error(source: &str) -> String {
        let mut parser = Parser::new(source);
        parser.parse();
        parser.errors()
              .first()
              .map(ToString::to_string)
              .unwrap_or_default()
    }

    #[test]
    fn variable_declaration_with_and_without_initializer() {
        let statements = parse_ok("shpall a = 1; shpall b;");
        assert!(matches!(&statements[0],
                         Node::VarDecl { name, initializer: Some(_) } if name.lexeme == "a"));
        assert!(matches!(&statements[1],
                         Node::VarDecl { name, initializer: None } if name.lexeme == "b"));
    }

    #[test]
    fn for_loop_desugars_into_initializer_and_while() {
        let statements = parse_ok("per (shpall i = 0; i < 3; i = i + 1) { printo i; }");
        assert_eq!(statements.len(), 1);

        let Node::Program(outer) = &statements[0] else {
            panic!("expected the initializer block");
        };
        assert_eq!(outer.len(), 2);
        assert!(matches!(&outer[0], Node::VarDecl { name, .. } if name.lexeme == "i"));

        let Node::While { condition, body } = &outer[1] else {
            panic!("expected a while loop");
        };
        assert!(matches!(**condition, Node::Binary { op: BinaryOperator::Less, .. }));
        let Node::Program(body) = &**body else {
            panic!("expected a block body");
        };
        assert_eq!(body.len(), 2);
        assert!(matches!(body[0], Node::Print { .. }));
        assert!(matches!(&body[1], Node::Assign { name, .. } if name.lexeme == "i"));
    }

    #[test]
    fn bare_for_loop_is_an_infinite_while() {
        let statements = parse_ok("per (;;) { kthe; }");
        let Node::While { condition, body } = &statements[0] else {
            panic!("expected a bare while loop");
        };
        assert!(matches!(**condition,
                         Node::Literal { value: LiteralValue::Bool(true), .. }));
        assert!(matches!(&**body, Node::Program(body) if body.len() == 1));
    }

    #[test]
    fn if_with_else_branch() {
        let statements = parse_ok("nese (x) { printo 1; } perndryshe { printo 2; printo 3; }");
        let Node::If { then_branch, else_branch, .. } = &statements[0] else {
            panic!("expected an if statement");
        };
        assert!(matches!(&**then_branch, Node::Program(b) if b.len() == 1));
        assert!(matches!(else_branch.as_deref(), Some(Node::Program(b)) if b.len() == 2));
    }

    #[test]
    fn function_declaration_records_parameters() {
        let statements = parse_ok("funksion shuma(a, b) { kthe a + b; }");
        let Node::Function(declaration) = &statements[0] else {
            panic!("expected a function declaration");
        };
        assert_eq!(declaration.name.lexeme, "shuma");
        assert_eq!(declaration.arity(), 2);
        assert!(matches!(&declaration.body, Node::Program(b) if b.len() == 1));
    }

    #[test]
    fn return_without_value() {
        let statements = parse_ok("funksion f() { kthe; }");
        let Node::Function(declaration) = &statements[0] else {
            panic!("expected a function declaration");
        };
        let Node::Program(body) = &declaration.body else {
            panic!("expected a block body");
        };
        assert!(matches!(body[0], Node::Return { value: None, .. }));
    }

    #[test]
    fn branches_require_braces() {
        assert_eq!(first_error("nese (x) printo 1;"),
                   "[line 1] Error at 'printo': Expect '{' before nese branch.");
        assert_eq!(first_error("derisa (x) printo 1;"),
                   "[line 1] Error at 'printo': Expect '{' before derisa body.");
        assert_eq!(first_error("nese (x) { } perndryshe printo 1;"),
                   "[line 1] Error at 'printo': Expect '{' before perndryshe branch.");
    }

    #[test]
    fn unclosed_block_is_reported_at_end_of_input() {
        assert_eq!(first_error("derisa (x) {\nprinto 1;\n"),
                   "[line 3] Error at '': Expect '}' after block.");
    }

    #[test]
    fn parameter_limit_is_enforced() {
        let params = (0..=MAX_PARAMETERS).map(|i| format!("p{i}"))
                                         .collect::<Vec<_>>()
                                         .join(", ");
        let source = format!("funksion f({params}) {{ }}");
        assert_eq!(first_error(&source),
                   "[line 1] Error at 'p255': Can't have more than 255 parameters.");
    }

    #[test]
    fn parameter_limit_does_not_silence_later_errors() {
        let params = (0..=MAX_PARAMETERS).map(|i| format!("p{i}"))
                                         .collect::<Vec<_>>()
                                         .join(", ");
        let source = format!("funksion f({params}) {{ }}\nprinto ;");
        let mut parser = Parser::new(&source);
        parser.parse();
        assert_eq!(parser.errors()
                         .iter()
                         .map(ToString::to_string)
                         .collect::<Vec<_>>(),
                   vec!["[line 1] Error at 'p255': Can't have more than 255 parameters.".to_string(),
                        "[line 2] Error at ';': Expect expression.".to_string()]);
    }
}
