//! Syntactic analysis
mod block;
mod expr;
mod stmts;

pub use self::{block::*, expr::*, stmts::*};

use log::debug;
use smol_str::SmolStr;

use crate::{
    error::ParseError,
    lex::{Token, TokenKind, TokenStream},
};

pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Parse a token sequence into its top-level statements.
pub fn parse(tokens: &[Token]) -> ParseResult<Vec<Stmt>> {
    Parser::new(tokens).parse_program()
}

/// Recursive descent parser.
///
/// Each grammar rule is a `parse_*` method. All rules share the
/// one forward-only cursor, and no rule backtracks.
pub struct Parser<'a> {
    stream: TokenStream<'a>,
    /// Number of function bodies enclosing the cursor.
    func_depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            stream: TokenStream::new(tokens),
            func_depth: 0,
        }
    }

    /// ```text
    /// program := (statement | NEWLINE)* EOF
    /// ```
    pub fn parse_program(mut self) -> ParseResult<Vec<Stmt>> {
        let mut stmts = vec![];

        loop {
            self.skip_newlines();
            if self.stream.at_end() {
                break;
            }
            stmts.push(self.parse_stmt()?);
        }

        debug!("parsed {} top-level statements", stmts.len());

        Ok(stmts)
    }

    /// Blank lines carry no meaning between statements.
    fn skip_newlines(&mut self) {
        self.stream.ignore_while(|kind| kind == TokenKind::Newline);
    }

    fn consume_ident(&mut self, expected: &'static str) -> ParseResult<SmolStr> {
        self.stream
            .consume(TokenKind::Ident, expected)
            .map(|token| token.text())
    }

    /// Error pointing at the token under the cursor.
    #[inline(never)]
    #[cold]
    fn error(&self, expected: &'static str) -> ParseError {
        ParseError::unexpected(self.stream.peek().clone(), expected)
    }
}
