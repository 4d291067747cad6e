//! Expression parsing via precedence climbing (§3.3's `Expression` sum).
//!
//! Binding power, loosest to tightest: assignment, range, logical-or,
//! logical-and, equality, relational, bit-or, bit-xor, bit-and, shift,
//! additive, multiplicative, unary, postfix (call/index/access/`as`),
//! primary. Each level is one method that calls the level above it for
//! its operands — the conventional recursive-descent encoding of a
//! precedence table, used in place of a generic Pratt loop because the
//! operator set here is fixed and small enough that spelling out each
//! level reads clearer than a binding-power table would.

use crate::ast::*;
use crate::{ParseError, ParseResult, Parser};
use faxc_lex::Token;
use faxc_util::Symbol;

impl<'a> Parser<'a> {
    pub(crate) fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> ParseResult<Expr> {
        let start = self.pos;
        let start_span = self.current_span();
        let target = self.parse_range()?;

        let compound_op = match self.peek() {
            Token::Eq => {
                self.advance();
                None
            }
            Token::PlusEq => Some(BinaryOperator::Add),
            Token::MinusEq => Some(BinaryOperator::Sub),
            Token::StarEq => Some(BinaryOperator::Mul),
            Token::SlashEq => Some(BinaryOperator::Div),
            Token::PercentEq => Some(BinaryOperator::Mod),
            Token::AmpersandEq => Some(BinaryOperator::BitAnd),
            Token::PipeEq => Some(BinaryOperator::BitOr),
            Token::CaretEq => Some(BinaryOperator::BitXor),
            Token::ShlEq => Some(BinaryOperator::Shl),
            Token::ShrEq => Some(BinaryOperator::Shr),
            _ => return Ok(target),
        };
        if compound_op.is_some() {
            self.advance();
        }

        let value = self.parse_assignment()?;
        Ok(Expr::new(
            self.node_info(start, start_span),
            ExprKind::Assignment {
                target: Box::new(target),
                compound_op,
                value: Box::new(value),
            },
        ))
    }

    fn parse_range(&mut self) -> ParseResult<Expr> {
        let start = self.pos;
        let start_span = self.current_span();
        let left = self.parse_logical_or()?;

        let inclusive = match self.peek() {
            Token::DotDot => Some(false),
            Token::DotDotEq => Some(true),
            _ => None,
        };
        let Some(inclusive) = inclusive else {
            return Ok(left);
        };
        self.advance();
        let right = self.parse_logical_or()?;
        Ok(Expr::new(
            self.node_info(start, start_span),
            ExprKind::Range {
                start: Box::new(left),
                end: Box::new(right),
                inclusive,
            },
        ))
    }

    fn parse_logical_or(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(Self::parse_logical_and, &[(Token::OrOr, BinaryOperator::Or)])
    }

    fn parse_logical_and(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(Self::parse_equality, &[(Token::AndAnd, BinaryOperator::And)])
    }

    fn parse_equality(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(
            Self::parse_relational,
            &[(Token::EqEq, BinaryOperator::Eq), (Token::NotEq, BinaryOperator::Ne)],
        )
    }

    fn parse_relational(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(
            Self::parse_bit_or,
            &[
                (Token::Lt, BinaryOperator::Lt),
                (Token::Gt, BinaryOperator::Gt),
                (Token::LtEq, BinaryOperator::Le),
                (Token::GtEq, BinaryOperator::Ge),
            ],
        )
    }

    fn parse_bit_or(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(Self::parse_bit_xor, &[(Token::Pipe, BinaryOperator::BitOr)])
    }

    fn parse_bit_xor(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(Self::parse_bit_and, &[(Token::Caret, BinaryOperator::BitXor)])
    }

    fn parse_bit_and(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(Self::parse_shift, &[(Token::Ampersand, BinaryOperator::BitAnd)])
    }

    fn parse_shift(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(
            Self::parse_additive,
            &[(Token::Shl, BinaryOperator::Shl), (Token::Shr, BinaryOperator::Shr)],
        )
    }

    fn parse_additive(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(
            Self::parse_multiplicative,
            &[(Token::Plus, BinaryOperator::Add), (Token::Minus, BinaryOperator::Sub)],
        )
    }

    fn parse_multiplicative(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(
            Self::parse_conversion,
            &[
                (Token::Star, BinaryOperator::Mul),
                (Token::Slash, BinaryOperator::Div),
                (Token::Percent, BinaryOperator::Mod),
            ],
        )
    }

    /// Left-associative binary operator level: parses one higher-precedence
    /// operand, then folds in as many `(op, operand)` pairs as match.
    fn parse_binary_level(
        &mut self,
        mut next: impl FnMut(&mut Self) -> ParseResult<Expr>,
        ops: &[(Token, BinaryOperator)],
    ) -> ParseResult<Expr> {
        let start = self.pos;
        let start_span = self.current_span();
        let mut left = next(self)?;
        loop {
            let Some((_, op)) = ops.iter().find(|(tok, _)| self.check(tok)) else {
                break;
            };
            self.advance();
            let right = next(self)?;
            left = Expr::new(
                self.node_info(start, start_span),
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
            );
        }
        Ok(left)
    }

    fn parse_conversion(&mut self) -> ParseResult<Expr> {
        let start = self.pos;
        let start_span = self.current_span();
        let mut value = self.parse_unary()?;
        while self.matches(&Token::As) {
            let target = self.parse_type_ref()?;
            value = Expr::new(
                self.node_info(start, start_span),
                ExprKind::Conversion {
                    value: Box::new(value),
                    target,
                },
            );
        }
        Ok(value)
    }

    fn parse_unary(&mut self) -> ParseResult<Expr> {
        let start = self.pos;
        let start_span = self.current_span();
        let op = match self.peek() {
            Token::Minus => Some(UnaryOperator::Neg),
            Token::Bang => Some(UnaryOperator::Not),
            Token::Tilde => Some(UnaryOperator::BitNot),
            _ => None,
        };
        let Some(op) = op else {
            return self.parse_postfix();
        };
        self.advance();
        let operand = self.parse_unary()?;
        Ok(Expr::new(
            self.node_info(start, start_span),
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
        ))
    }

    fn parse_postfix(&mut self) -> ParseResult<Expr> {
        let start = self.pos;
        let start_span = self.current_span();
        let mut expr = self.parse_primary()?;

        loop {
            match self.peek() {
                Token::LBracket => {
                    self.advance();
                    let index = self.parse_expr()?;
                    self.expect(Token::RBracket, "']'")?;
                    expr = Expr::new(
                        self.node_info(start, start_span),
                        ExprKind::Index {
                            base: Box::new(expr),
                            index: Box::new(index),
                        },
                    );
                }
                Token::Dot => {
                    self.advance();
                    let member = self.expect_ident("member name")?;
                    expr = Expr::new(
                        self.node_info(start, start_span),
                        ExprKind::Access {
                            base: Box::new(expr),
                            member,
                        },
                    );
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let start = self.pos;
        let start_span = self.current_span();

        match self.peek().clone() {
            Token::Number(n) => {
                self.advance();
                Ok(Expr::new(self.node_info(start, start_span), ExprKind::Literal(Literal::Int(n as i64))))
            }
            Token::Float(f) => {
                self.advance();
                Ok(Expr::new(self.node_info(start, start_span), ExprKind::Literal(Literal::Float(f))))
            }
            Token::True => {
                self.advance();
                Ok(Expr::new(self.node_info(start, start_span), ExprKind::Literal(Literal::Bool(true))))
            }
            Token::False => {
                self.advance();
                Ok(Expr::new(self.node_info(start, start_span), ExprKind::Literal(Literal::Bool(false))))
            }
            Token::Char(c) => {
                self.advance();
                Ok(Expr::new(self.node_info(start, start_span), ExprKind::Literal(Literal::Char(c))))
            }
            Token::String(s) | Token::RawString(s) => {
                self.advance();
                Ok(Expr::new(self.node_info(start, start_span), ExprKind::Literal(Literal::String(s))))
            }
            Token::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(Token::RParen, "')'")?;
                Ok(Expr::new(self.node_info(start, start_span), ExprKind::Parenthesis(Box::new(inner))))
            }
            Token::LBracket => self.parse_array_initializer(start, start_span),
            Token::If => self.parse_if_else(start, start_span).map(|e| Expr::new(self.node_info(start, start_span), ExprKind::IfElse(e))),
            Token::While => self.parse_while(None, start, start_span),
            Token::For => self.parse_for(None, start, start_span),
            Token::Label => self.parse_labeled_loop(start, start_span),
            Token::Match => self.parse_match(start, start_span),
            Token::LBrace => self.parse_block().map(|b| Expr::new(self.node_info(start, start_span), ExprKind::Block(b))),
            Token::Shell => {
                self.advance();
                let command = self.parse_expr()?;
                Ok(Expr::new(self.node_info(start, start_span), ExprKind::Shell(Box::new(command))))
            }
            Token::Type => {
                self.advance();
                self.expect(Token::LParen, "'('")?;
                let ty = self.parse_type_ref()?;
                self.expect(Token::RParen, "')'")?;
                Ok(Expr::new(self.node_info(start, start_span), ExprKind::TypeExpression(ty)))
            }
            Token::Ident(name) => self.parse_identifier_led(name, start, start_span),
            other => Err(ParseError::UnexpectedToken {
                found: other,
                expected: "expression".to_string(),
            }),
        }
    }

    fn parse_array_initializer(&mut self, start: usize, start_span: faxc_util::Span) -> ParseResult<Expr> {
        self.expect(Token::LBracket, "'['")?;
        let mut elements = Vec::new();
        while !self.check(&Token::RBracket) {
            elements.push(self.parse_expr()?);
            if !self.matches(&Token::Comma) {
                break;
            }
        }
        self.expect(Token::RBracket, "']'")?;
        Ok(Expr::new(self.node_info(start, start_span), ExprKind::ArrayInitializer(elements)))
    }

    fn parse_identifier_led(&mut self, name: Symbol, start: usize, start_span: faxc_util::Span) -> ParseResult<Expr> {
        self.advance();

        let generic_args = if matches!(self.peek(), Token::ColonColon) && matches!(self.peek_at(1), Token::Lt) {
            self.advance();
            self.advance();
            let mut args = Vec::new();
            while !self.check(&Token::Gt) {
                args.push(self.parse_type_ref()?);
                if !self.matches(&Token::Comma) {
                    break;
                }
            }
            self.expect(Token::Gt, "'>'")?;
            args
        } else {
            Vec::new()
        };

        if matches!(self.peek(), Token::LParen) {
            self.advance();
            let arguments = self.parse_arguments()?;
            return Ok(Expr::new(
                self.node_info(start, start_span),
                ExprKind::FunctionCall { callee: name, arguments },
            ));
        }

        if matches!(self.peek(), Token::LBrace) && !self.no_struct_literal {
            self.advance();
            let mut values = Vec::new();
            while !self.check(&Token::RBrace) {
                values.push(self.parse_expr()?);
                if !self.matches(&Token::Comma) {
                    break;
                }
            }
            self.expect(Token::RBrace, "'}'")?;
            return Ok(Expr::new(
                self.node_info(start, start_span),
                ExprKind::StructureInitializer { name, values },
            ));
        }

        Ok(Expr::new(
            self.node_info(start, start_span),
            ExprKind::Identifier { name, generic_args },
        ))
    }

    fn parse_arguments(&mut self) -> ParseResult<Vec<Argument>> {
        let mut arguments = Vec::new();
        while !self.check(&Token::RParen) {
            // Named argument form: `name: expr`. Only recognized when the
            // colon immediately follows a bare identifier, so `f(x)` where
            // `x` is a variable reference is never misread as a name.
            let name = if let Token::Ident(n) = self.peek().clone() {
                if matches!(self.peek_at(1), Token::Colon) {
                    self.advance();
                    self.advance();
                    Some(n)
                } else {
                    None
                }
            } else {
                None
            };
            let value = self.parse_expr()?;
            arguments.push(Argument { name, value });
            if !self.matches(&Token::Comma) {
                break;
            }
        }
        self.expect(Token::RParen, "')'")?;
        Ok(arguments)
    }

    fn parse_if_else(&mut self, start: usize, start_span: faxc_util::Span) -> ParseResult<IfElseExpr> {
        self.expect(Token::If, "'if'")?;
        let condition = self.with_no_struct_literal(Self::parse_expr)?;
        let then_branch = self.parse_block()?;
        let else_branch = if self.matches(&Token::Else) {
            if matches!(self.peek(), Token::If) {
                let nested_start = self.pos;
                let nested_span = self.current_span();
                Some(ElseClause::If(Box::new(self.parse_if_else(nested_start, nested_span)?)))
            } else {
                Some(ElseClause::Block(self.parse_block()?))
            }
        } else {
            None
        };
        Ok(IfElseExpr {
            info: self.node_info(start, start_span),
            condition: Box::new(condition),
            then_branch,
            else_branch,
        })
    }

    fn parse_while(&mut self, label: Option<Symbol>, start: usize, start_span: faxc_util::Span) -> ParseResult<Expr> {
        self.expect(Token::While, "'while'")?;
        let condition = self.with_no_struct_literal(Self::parse_expr)?;
        let body = self.parse_block()?;
        Ok(Expr::new(
            self.node_info(start, start_span),
            ExprKind::While(WhileExpr {
                info: self.node_info(start, start_span),
                label,
                condition: Box::new(condition),
                body,
            }),
        ))
    }

    fn parse_for(&mut self, label: Option<Symbol>, start: usize, start_span: faxc_util::Span) -> ParseResult<Expr> {
        self.expect(Token::For, "'for'")?;

        let variant = if matches!(self.peek(), Token::LParen) {
            self.advance();
            let init = if matches!(self.peek(), Token::Semicolon) {
                None
            } else {
                Some(Box::new(self.parse_statement_in_for_header()?))
            };
            if !matches!(self.peek(), Token::Semicolon) {
                // `parse_statement_in_for_header` already consumed the
                // trailing `;` for declaration forms; a bare expression
                // form has not, so consume it here.
            } else {
                self.advance();
            }
            let condition = if matches!(self.peek(), Token::Semicolon) {
                None
            } else {
                Some(Box::new(self.with_no_struct_literal(Self::parse_expr)?))
            };
            self.expect(Token::Semicolon, "';'")?;
            let step = if matches!(self.peek(), Token::RParen) {
                None
            } else {
                Some(Box::new(self.parse_expr()?))
            };
            self.expect(Token::RParen, "')'")?;
            ForVariant::CStyle { init, condition, step }
        } else {
            let binding = self.expect_ident("loop binding")?;
            self.expect(Token::In, "'in'")?;
            let iterable = self.with_no_struct_literal(Self::parse_expr)?;
            ForVariant::Ranged {
                binding,
                iterable: Box::new(iterable),
            }
        };

        let body = self.parse_block()?;
        Ok(Expr::new(
            self.node_info(start, start_span),
            ExprKind::For(ForExpr {
                info: self.node_info(start, start_span),
                label,
                variant,
                body,
            }),
        ))
    }

    /// Parses the init-clause of a C-style `for`: either a `let`
    /// declaration or a bare expression, both followed by `;`.
    fn parse_statement_in_for_header(&mut self) -> ParseResult<Statement> {
        let start = self.pos;
        let start_span = self.current_span();
        if matches!(self.peek(), Token::Let) {
            let decl = self.parse_variable_decl()?;
            return Ok(Statement::Declaration(Declaration::Variable(decl)));
        }
        let expr = self.parse_expr()?;
        Ok(Statement::Expression(ExpressionStmt {
            info: self.node_info(start, start_span),
            expr,
        }))
    }

    fn parse_labeled_loop(&mut self, start: usize, start_span: faxc_util::Span) -> ParseResult<Expr> {
        self.expect(Token::Label, "'label'")?;
        let name = self.expect_ident("label name")?;
        self.expect(Token::Colon, "':'")?;
        match self.peek() {
            Token::While => self.parse_while(Some(name), start, start_span),
            Token::For => self.parse_for(Some(name), start, start_span),
            other => Err(ParseError::UnexpectedToken {
                found: other.clone(),
                expected: "'while' or 'for' after label".to_string(),
            }),
        }
    }

    fn parse_match(&mut self, start: usize, start_span: faxc_util::Span) -> ParseResult<Expr> {
        self.expect(Token::Match, "'match'")?;
        let scrutinee = self.with_no_struct_literal(Self::parse_expr)?;
        let clauses = self.parse_match_clauses()?;
        Ok(Expr::new(
            self.node_info(start, start_span),
            ExprKind::Match(MatchExpr {
                info: self.node_info(start, start_span),
                scrutinee: Box::new(scrutinee),
                clauses,
            }),
        ))
    }
}
