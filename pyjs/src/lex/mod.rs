//! Lexical analysis
mod cursor;
mod lexer;
mod token_stream;
mod tokens;

pub use self::{
    lexer::{tokenize, Lexer, LexerIter},
    token_stream::TokenStream,
    tokens::{Keyword, Number, Span, Token, TokenKind, TokenValue},
};
