//! faxc-lex — lexical analyzer for the Fax source language.
//!
//! Turns source text into a stream of [`Token`]s. This crate is the
//! binder's upstream token producer (see `faxc-sem`'s binder): it is
//! deliberately dumb about anything beyond lexical structure — keywords,
//! literals, operators, punctuation — and reports lexical errors through
//! the shared `faxc_util::diagnostic` handler rather than panicking.

pub mod cursor;
mod lexer;
mod token;
pub mod unicode;

pub use cursor::{Cursor, CursorSnapshot};
pub use lexer::Lexer;
pub use token::{keyword_from_ident, Token};

#[cfg(test)]
mod edge_cases;

/// Tokenizes an entire source string, returning `(Token, Span)` pairs.
///
/// `Span::DUMMY`'s `file_id` is left unset; callers that care about
/// multi-file spans should thread a `FileId` through `Span::with_file`
/// themselves once the token boundaries are known (this crate only knows
/// byte offsets and line/column within a single buffer).
pub fn tokenize(source: &str, handler: &mut faxc_util::diagnostic::Handler) -> Vec<(Token, faxc_util::span::Span)> {
    use faxc_util::span::Span;

    let mut lexer = Lexer::new(source, handler);
    let mut tokens = Vec::new();
    loop {
        let start = lexer.position();
        let start_line = lexer.line();
        let tok = lexer.next_token();
        let end = lexer.position();
        let span = Span::new(start, end, start_line, 1);
        let is_eof = tok == Token::Eof;
        tokens.push((tok, span));
        if is_eof {
            break;
        }
    }
    tokens
}
