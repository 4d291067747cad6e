//! `match` clause parsing. Patterns are not a distinct grammar of their
//! own here — per the bound tree's exhaustiveness rule (§4.5), a clause's
//! patterns are literal expressions or enumerator references compared
//! structurally against the scrutinee, and the wildcard `_` spells the
//! default clause as an empty pattern list.

use crate::ast::*;
use crate::{ParseError, ParseResult, Parser};
use faxc_lex::Token;

impl<'a> Parser<'a> {
    /// `{ pattern(, pattern)* => expr (, ...)* }`. A clause whose pattern
    /// list is `_` parses to an empty `patterns` vec, which the binder
    /// treats as the default/catch-all arm.
    pub(crate) fn parse_match_clauses(&mut self) -> ParseResult<Vec<MatchClause>> {
        self.expect(Token::LBrace, "'{'")?;
        let mut clauses = Vec::new();
        while !self.check(&Token::RBrace) {
            clauses.push(self.parse_match_clause()?);
            if !self.matches(&Token::Comma) {
                break;
            }
        }
        self.expect(Token::RBrace, "'}'")?;
        Ok(clauses)
    }

    fn parse_match_clause(&mut self) -> ParseResult<MatchClause> {
        let start = self.pos;
        let start_span = self.current_span();

        let patterns = if matches!(self.peek(), Token::Underscore) {
            self.advance();
            Vec::new()
        } else {
            let mut patterns = vec![self.parse_expr()?];
            while self.matches(&Token::Comma) {
                // A bare trailing comma before `=>` is not a further
                // pattern but the end of the list.
                if matches!(self.peek(), Token::FatArrow) {
                    break;
                }
                patterns.push(self.parse_expr()?);
            }
            patterns
        };

        self.expect(Token::FatArrow, "'=>'")?;
        let body = self.parse_expr()?;
        Ok(MatchClause {
            info: self.node_info(start, start_span),
            patterns,
            body,
        })
    }
}
