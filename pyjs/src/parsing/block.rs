use super::{stmts::Stmt, ParseResult, Parser};
use crate::lex::{Keyword, TokenKind};

/// Token kinds that close a block.
///
/// Blocks are delimited by these tokens, not by indentation.
const BLOCK_TERMINATORS: &[TokenKind] = &[
    TokenKind::EOF,
    TokenKind::Keyword(Keyword::Else),
    TokenKind::Keyword(Keyword::End),
];

#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

impl<'a> Parser<'a> {
    /// ```text
    /// block := (statement | NEWLINE)*  until EOF | ELSE | END
    /// ```
    ///
    /// The terminator is left for the owning statement.
    pub(crate) fn parse_block(&mut self) -> ParseResult<Block> {
        let mut stmts = vec![];

        loop {
            self.skip_newlines();
            if self.at_block_end() {
                break;
            }
            stmts.push(self.parse_stmt()?);
        }

        Ok(Block { stmts })
    }

    pub(crate) fn at_block_end(&self) -> bool {
        BLOCK_TERMINATORS.contains(&self.stream.peek_kind())
    }

    /// Consume the optional `end` marker after a block.
    pub(crate) fn match_block_end(&mut self) -> bool {
        self.stream.match_token(TokenKind::Keyword(Keyword::End))
    }
}
