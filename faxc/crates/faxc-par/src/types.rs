//! Type-reference parsing: primitive names, declared-name references, and
//! array shapes (`[T; N]` / `[T]`).

use crate::ast::TypeRef;
use crate::{ParseError, ParseResult, Parser};
use faxc_lex::Token;
use faxc_util::Symbol;

impl<'a> Parser<'a> {
    pub(crate) fn parse_type_ref(&mut self) -> ParseResult<TypeRef> {
        if self.matches(&Token::LBracket) {
            let element = self.parse_type_ref()?;
            let length = if self.matches(&Token::Semicolon) {
                match self.advance() {
                    Token::Number(n) => Some(n),
                    other => {
                        return Err(ParseError::UnexpectedToken {
                            found: other,
                            expected: "array length".to_string(),
                        })
                    }
                }
            } else {
                None
            };
            self.expect(Token::RBracket, "']'")?;
            return Ok(TypeRef::Array {
                element: Box::new(element),
                length,
            });
        }

        match self.advance() {
            Token::Ident(name) => Ok(TypeRef::Named(name)),
            // Keyword-spelled primitive type names lex as dedicated
            // keywords only where they collide with a language keyword;
            // `Type` ("type") is the sole primitive that does.
            Token::Type => Ok(TypeRef::Named(Symbol::intern("type"))),
            other => Err(ParseError::UnexpectedToken {
                found: other,
                expected: "type".to_string(),
            }),
        }
    }
}
