//! Declaration parsing: variables, functions, externals, structures,
//! enumerations and aliases (§3.3's `Declaration` sum).

use crate::ast::*;
use crate::{ParseError, ParseResult, Parser};
use faxc_lex::Token;

impl<'a> Parser<'a> {
    pub(crate) fn parse_declaration(&mut self) -> ParseResult<Declaration> {
        match self.peek() {
            Token::Let => self.parse_variable_decl().map(Declaration::Variable),
            Token::Fn => self.parse_function_decl().map(Declaration::Function),
            Token::Extern => self.parse_external_decl().map(Declaration::External),
            Token::Struct => self.parse_structure_decl().map(Declaration::Structure),
            Token::Enum => self.parse_enumeration_decl().map(Declaration::Enumeration),
            Token::Alias => self.parse_alias_decl().map(Declaration::Alias),
            other => Err(ParseError::UnexpectedToken {
                found: other.clone(),
                expected: "declaration".to_string(),
            }),
        }
    }

    pub(crate) fn parse_variable_decl(&mut self) -> ParseResult<VariableDecl> {
        let start = self.pos;
        let start_span = self.current_span();
        self.expect(Token::Let, "'let'")?;
        let mutable = self.matches(&Token::Mut);
        let name = self.expect_ident("variable name")?;
        let declared_type = if self.matches(&Token::Colon) {
            Some(self.parse_type_ref()?)
        } else {
            None
        };
        let initializer = if self.matches(&Token::Eq) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect(Token::Semicolon, "';'")?;
        Ok(VariableDecl {
            info: self.node_info(start, start_span),
            name,
            mutable,
            declared_type,
            initializer,
        })
    }

    fn parse_parameters(&mut self) -> ParseResult<Vec<Parameter>> {
        self.expect(Token::LParen, "'('")?;
        let mut params = Vec::new();
        while !self.check(&Token::RParen) {
            let mutable = self.matches(&Token::Mut);
            let name = self.expect_ident("parameter name")?;
            self.expect(Token::Colon, "':'")?;
            let ty = self.parse_type_ref()?;
            params.push(Parameter { name, mutable, ty });
            if !self.matches(&Token::Comma) {
                break;
            }
        }
        self.expect(Token::RParen, "')'")?;
        Ok(params)
    }

    fn parse_generics(&mut self) -> ParseResult<Vec<faxc_util::Symbol>> {
        if !self.matches(&Token::Lt) {
            return Ok(Vec::new());
        }
        let mut generics = Vec::new();
        while !self.check(&Token::Gt) {
            generics.push(self.expect_ident("generic parameter name")?);
            if !self.matches(&Token::Comma) {
                break;
            }
        }
        self.expect(Token::Gt, "'>'")?;
        Ok(generics)
    }

    pub(crate) fn parse_function_decl(&mut self) -> ParseResult<FunctionDecl> {
        let start = self.pos;
        let start_span = self.current_span();
        self.expect(Token::Fn, "'fn'")?;
        let name = self.expect_ident("function name")?;
        let generics = self.parse_generics()?;
        let parameters = self.parse_parameters()?;
        let return_type = if self.matches(&Token::Arrow) {
            Some(self.parse_type_ref()?)
        } else {
            None
        };
        let body = self.parse_block()?;
        Ok(FunctionDecl {
            info: self.node_info(start, start_span),
            name,
            generics,
            parameters,
            return_type,
            body,
        })
    }

    pub(crate) fn parse_external_decl(&mut self) -> ParseResult<ExternalDecl> {
        let start = self.pos;
        let start_span = self.current_span();
        self.expect(Token::Extern, "'extern'")?;
        self.expect(Token::Fn, "'fn'")?;
        let name = self.expect_ident("external function name")?;
        let parameters = self.parse_parameters()?;
        let return_type = if self.matches(&Token::Arrow) {
            Some(self.parse_type_ref()?)
        } else {
            None
        };
        self.expect(Token::Semicolon, "';'")?;
        Ok(ExternalDecl {
            info: self.node_info(start, start_span),
            name,
            parameters,
            return_type,
        })
    }

    pub(crate) fn parse_structure_decl(&mut self) -> ParseResult<StructureDecl> {
        let start = self.pos;
        let start_span = self.current_span();
        self.expect(Token::Struct, "'struct'")?;
        let name = self.expect_ident("structure name")?;
        self.expect(Token::LBrace, "'{'")?;
        let mut fields = Vec::new();
        while !self.check(&Token::RBrace) {
            let field_name = self.expect_ident("field name")?;
            self.expect(Token::Colon, "':'")?;
            let field_ty = self.parse_type_ref()?;
            fields.push((field_name, field_ty));
            if !self.matches(&Token::Comma) {
                break;
            }
        }
        self.expect(Token::RBrace, "'}'")?;
        Ok(StructureDecl {
            info: self.node_info(start, start_span),
            name,
            fields,
        })
    }

    pub(crate) fn parse_enumeration_decl(&mut self) -> ParseResult<EnumerationDecl> {
        let start = self.pos;
        let start_span = self.current_span();
        self.expect(Token::Enum, "'enum'")?;
        let name = self.expect_ident("enumeration name")?;
        self.expect(Token::LBrace, "'{'")?;
        let mut variants = Vec::new();
        while !self.check(&Token::RBrace) {
            let variant_name = self.expect_ident("variant name")?;
            let payload = if self.matches(&Token::LParen) {
                let ty = self.parse_type_ref()?;
                self.expect(Token::RParen, "')'")?;
                Some(ty)
            } else {
                None
            };
            variants.push((variant_name, payload));
            if !self.matches(&Token::Comma) {
                break;
            }
        }
        self.expect(Token::RBrace, "'}'")?;
        Ok(EnumerationDecl {
            info: self.node_info(start, start_span),
            name,
            variants,
        })
    }

    pub(crate) fn parse_alias_decl(&mut self) -> ParseResult<AliasDecl> {
        let start = self.pos;
        let start_span = self.current_span();
        self.expect(Token::Alias, "'alias'")?;
        let name = self.expect_ident("alias name")?;
        self.expect(Token::Eq, "'='")?;
        let target = self.parse_type_ref()?;
        self.expect(Token::Semicolon, "';'")?;
        Ok(AliasDecl {
            info: self.node_info(start, start_span),
            name,
            target,
        })
    }

    pub(crate) fn expect_ident(&mut self, context: &str) -> ParseResult<faxc_util::Symbol> {
        match self.advance() {
            Token::Ident(name) => Ok(name),
            other => Err(ParseError::UnexpectedToken {
                found: other,
                expected: context.to_string(),
            }),
        }
    }
}
