use crate::{
    ast::{BinaryOperator, LiteralValue, LogicalOperator, Node, UnaryOperator},
    interpreter::{
        lexer::TokenKind,
        parser::{
            core::Parser,
            rules::{Precedence, rule},
        },
    },
    util::stack::ensure_sufficient_stack,
};

impl<'src> Parser<'src> {
    /// Parses a full expression.
    ///
    /// Grammar: `expression := assignment`
    pub(super) fn expression(&mut self) -> Node<'src> {
        self.parse_precedence(Precedence::Assignment)
    }

    /// The Pratt loop: parses a prefix form, then keeps folding infix
    /// operators into it while they bind at least as tightly as `precedence`.
    ///
    /// A token with no prefix action reports `Expect expression.` and yields a
    /// placeholder literal so the caller can keep going.
    pub(super) fn parse_precedence(&mut self, precedence: Precedence) -> Node<'src> {
        ensure_sufficient_stack(|| self.parse_precedence_inner(precedence))
    }

    fn parse_precedence_inner(&mut self, precedence: Precedence) -> Node<'src> {
        self.advance();
        let Some(prefix) = rule(self.previous().kind).prefix else {
            let token = self.previous();
            self.error_at(token, "Expect expression.");
            return Node::Literal { token,
                                   value: LiteralValue::Bool(false) };
        };

        let mut left = prefix(self);

        while precedence <= rule(self.current().kind).precedence {
            self.advance();
            let Some(infix) = rule(self.previous().kind).infix else {
                break;
            };
            left = infix(self, left);
        }

        left
    }

    /// `( expression )`. Parentheses leave no trace in the tree.
    pub(super) fn grouping(&mut self) -> Node<'src> {
        let inner = self.expression();
        self.consume(TokenKind::RightParen, "Expect ')' after expression.");
        inner
    }

    /// Prefix `-` and `!`.
    pub(super) fn unary(&mut self) -> Node<'src> {
        let operator = self.previous();
        let right = self.parse_precedence(Precedence::Unary);
        let op = UnaryOperator::from_kind(operator.kind).unwrap_or(UnaryOperator::Negate);

        Node::Unary { op,
                      right: Box::new(right),
                      line: operator.line }
    }

    pub(super) fn number(&mut self) -> Node<'src> {
        let token = self.previous();
        Node::Literal { token,
                        value: LiteralValue::Number(token.lexeme.parse().unwrap_or_default()) }
    }

    pub(super) fn string(&mut self) -> Node<'src> {
        let token = self.previous();
        let contents = token.lexeme
                            .strip_prefix('"')
                            .and_then(|rest| rest.strip_suffix('"'))
                            .unwrap_or(token.lexeme);

        Node::Literal { token,
                        value: LiteralValue::String(contents) }
    }

    /// `vertet` and `gabuar`.
    pub(super) fn literal(&mut self) -> Node<'src> {
        let token = self.previous();
        Node::Literal { token,
                        value: LiteralValue::Bool(token.kind == TokenKind::True) }
    }

    pub(super) fn variable(&mut self) -> Node<'src> {
        Node::Variable { name: self.previous() }
    }

    /// Left-associative binary operators: the right operand is parsed one
    /// level tighter than the operator itself.
    pub(super) fn binary(&mut self, left: Node<'src>) -> Node<'src> {
        let operator = self.previous();
        let right = self.parse_precedence(rule(operator.kind).precedence.next());
        let Some(op) = BinaryOperator::from_kind(operator.kind) else {
            return left;
        };

        Node::Binary { left: Box::new(left),
                       op,
                       right: Box::new(right),
                       line: operator.line }
    }

    /// `dhe` and `ose`.
    pub(super) fn logical(&mut self, left: Node<'src>) -> Node<'src> {
        let operator = self.previous();
        let right = self.parse_precedence(rule(operator.kind).precedence.next());
        let Some(op) = LogicalOperator::from_kind(operator.kind) else {
            return left;
        };

        Node::Logical { left: Box::new(left),
                        op,
                        right: Box::new(right),
                        line: operator.line }
    }

    /// `name = value`, right-associative.
    ///
    /// Only a bare variable is a valid target. Anything else is reported, the
    /// right-hand side is still consumed and the target is returned unchanged.
    pub(super) fn assignment(&mut self, target: Node<'src>) -> Node<'src> {
        let equals = self.previous();
        let value = self.parse_precedence(Precedence::Assignment);

        match target {
            Node::Variable { name } => Node::Assign { name,
                                                      value: Box::new(value) },
            other => {
                self.report_at(equals, "Invalid assignment target.");
                other
            },
        }
    }

    /// `callee(arguments...)`
    pub(super) fn call(&mut self, callee: Node<'src>) -> Node<'src> {
        let mut arguments = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                arguments.push(self.expression());
                if !self.matches(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.consume(TokenKind::RightParen, "Expect ')' after arguments.");

        Node::Call { callee: Box::new(callee),
                     paren: self.previous(),
                     arguments }
    }
}
