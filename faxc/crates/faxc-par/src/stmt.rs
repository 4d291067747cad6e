//! Statement parsing: expression statements, nested declarations, scopes,
//! `return`/`break`/`continue`, `label`/`goto`, and the `putc`/`puts`
//! builtins (§3.3's `Statement` sum).

use crate::ast::*;
use crate::{ParseError, ParseResult, Parser};
use faxc_lex::Token;

impl<'a> Parser<'a> {
    pub(crate) fn parse_block(&mut self) -> ParseResult<Block> {
        let start = self.pos;
        let start_span = self.current_span();
        self.expect(Token::LBrace, "'{'")?;

        let mut statements = Vec::new();
        let mut tail = None;

        while !self.check(&Token::RBrace) {
            if self.is_at_end() {
                return Err(ParseError::UnexpectedEof {
                    expected: "'}'".to_string(),
                });
            }

            // A bare nested `{ ... }` in statement position is a `scope`
            // statement, distinct from a block used for its value.
            if self.check(&Token::LBrace) {
                statements.push(Statement::Scope(self.parse_block()?));
                continue;
            }

            // A trailing expression with no statement-terminating
            // semicolon becomes the block's value; everything else is a
            // statement.
            if self.starts_expression_statement() {
                let expr = self.parse_expr()?;
                if self.matches(&Token::Semicolon) {
                    let info = self.node_info(start, expr.info.span);
                    statements.push(Statement::Expression(ExpressionStmt { info, expr }));
                } else if self.check(&Token::RBrace) {
                    tail = Some(Box::new(expr));
                } else {
                    let info = self.node_info(start, expr.info.span);
                    statements.push(Statement::Expression(ExpressionStmt { info, expr }));
                }
            } else {
                statements.push(self.parse_statement()?);
            }
        }

        self.expect(Token::RBrace, "'}'")?;
        Ok(Block {
            info: self.node_info(start, start_span),
            statements,
            tail,
        })
    }

    /// Whether the next token can only begin an expression (as opposed to
    /// a statement keyword like `let`/`return`/`label`).
    fn starts_expression_statement(&self) -> bool {
        !matches!(
            self.peek(),
            Token::Let
                | Token::Fn
                | Token::Extern
                | Token::Struct
                | Token::Enum
                | Token::Alias
                | Token::Return
                | Token::Break
                | Token::Continue
                | Token::Label
                | Token::Goto
                | Token::Putc
                | Token::Puts
        )
    }

    pub(crate) fn parse_statement(&mut self) -> ParseResult<Statement> {
        match self.peek() {
            Token::Let | Token::Fn | Token::Extern | Token::Struct | Token::Enum | Token::Alias => {
                self.parse_declaration().map(Statement::Declaration)
            }
            Token::LBrace => self.parse_block().map(Statement::Scope),
            Token::Return => self.parse_return_stmt(),
            Token::Break => self.parse_break_stmt(),
            Token::Continue => self.parse_continue_stmt(),
            Token::Label => self.parse_label_stmt(),
            Token::Goto => self.parse_jump_stmt(),
            Token::Putc => self.parse_putc_stmt(),
            Token::Puts => self.parse_puts_stmt(),
            other => Err(ParseError::UnexpectedToken {
                found: other.clone(),
                expected: "statement".to_string(),
            }),
        }
    }

    fn parse_return_stmt(&mut self) -> ParseResult<Statement> {
        let start = self.pos;
        let start_span = self.current_span();
        self.expect(Token::Return, "'return'")?;
        let value = if self.check(&Token::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(Token::Semicolon, "';'")?;
        Ok(Statement::Return(ReturnStmt {
            info: self.node_info(start, start_span),
            value,
        }))
    }

    fn parse_break_stmt(&mut self) -> ParseResult<Statement> {
        let start = self.pos;
        let start_span = self.current_span();
        self.expect(Token::Break, "'break'")?;
        let label = self.try_parse_label_ref();
        let value = if self.check(&Token::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(Token::Semicolon, "';'")?;
        Ok(Statement::Break(BreakStmt {
            info: self.node_info(start, start_span),
            label,
            value,
        }))
    }

    fn parse_continue_stmt(&mut self) -> ParseResult<Statement> {
        let start = self.pos;
        let start_span = self.current_span();
        self.expect(Token::Continue, "'continue'")?;
        let label = self.try_parse_label_ref();
        self.expect(Token::Semicolon, "';'")?;
        Ok(Statement::Continue(ContinueStmt {
            info: self.node_info(start, start_span),
            label,
        }))
    }

    /// `break`/`continue` spell their optional label as a bare trailing
    /// identifier (`break outer;`), distinguished from the expression that
    /// would otherwise follow by requiring it directly precede `;`.
    fn try_parse_label_ref(&mut self) -> Option<faxc_util::Symbol> {
        if let Token::Ident(name) = self.peek().clone() {
            if matches!(self.peek_at(1), Token::Semicolon) {
                self.advance();
                return Some(name);
            }
        }
        None
    }

    fn parse_label_stmt(&mut self) -> ParseResult<Statement> {
        let start = self.pos;
        let start_span = self.current_span();
        self.expect(Token::Label, "'label'")?;
        let name = self.expect_ident("label name")?;
        self.expect(Token::Colon, "':'")?;
        let target = self.parse_statement_as_labelable()?;
        Ok(Statement::Label(LabelStmt {
            info: self.node_info(start, start_span),
            name,
            target: Box::new(target),
        }))
    }

    /// The statement a `label name:` prefix attaches to: a loop
    /// (`while`/`for`) or a bare scope, expressed as an expression
    /// statement so the label sits alongside its `WhileExpr`/`ForExpr`.
    fn parse_statement_as_labelable(&mut self) -> ParseResult<Statement> {
        let start = self.pos;
        let start_span = self.current_span();
        let expr = self.parse_expr()?;
        self.matches(&Token::Semicolon);
        Ok(Statement::Expression(ExpressionStmt {
            info: self.node_info(start, start_span),
            expr,
        }))
    }

    fn parse_jump_stmt(&mut self) -> ParseResult<Statement> {
        let start = self.pos;
        let start_span = self.current_span();
        self.expect(Token::Goto, "'goto'")?;
        let target = self.expect_ident("jump target label")?;
        self.expect(Token::Semicolon, "';'")?;
        Ok(Statement::Jump(JumpStmt {
            info: self.node_info(start, start_span),
            target,
        }))
    }

    fn parse_putc_stmt(&mut self) -> ParseResult<Statement> {
        let start = self.pos;
        let start_span = self.current_span();
        self.expect(Token::Putc, "'putc'")?;
        let value = self.parse_expr()?;
        self.expect(Token::Semicolon, "';'")?;
        Ok(Statement::PutChar(PutCharStmt {
            info: self.node_info(start, start_span),
            value,
        }))
    }

    fn parse_puts_stmt(&mut self) -> ParseResult<Statement> {
        let start = self.pos;
        let start_span = self.current_span();
        self.expect(Token::Puts, "'puts'")?;
        let value = self.parse_expr()?;
        self.expect(Token::Semicolon, "';'")?;
        Ok(Statement::PutString(PutStringStmt {
            info: self.node_info(start, start_span),
            value,
        }))
    }
}
