//! Forward-only cursor over a token sequence.
use crate::error::ParseError;

use super::{Span, Token, TokenKind, TokenValue};

/// Read-only cursor over lexed tokens that allows look ahead.
///
/// The stream never runs dry. Past the last token, and for
/// sequences missing their terminator, an end-of-file token
/// is reported instead.
pub struct TokenStream<'a> {
    tokens: &'a [Token],
    /// Index of the current token.
    pos: usize,
    /// Stand-in returned when the cursor runs past the sequence.
    eof: Token,
}

impl<'a> TokenStream<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        let end = tokens.last().map(|token| token.span.end()).unwrap_or(0);

        Self {
            tokens,
            pos: 0,
            eof: Token {
                span: Span::new(end, 0),
                kind: TokenKind::EOF,
                value: TokenValue::Text("".into()),
            },
        }
    }

    /// Consumes the current token regardless of type.
    ///
    /// At the end of the stream the end-of-file token is
    /// returned and the cursor stays put.
    #[inline]
    pub fn next_token(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Consumes the current token if it matches the given token kind.
    ///
    /// Returns true when matched. Returns false when token kinds
    /// do not match, or the token stream is at the end.
    ///
    /// Does not consume the token if the types do not match.
    pub fn match_token(&mut self, token_kind: TokenKind) -> bool {
        let is_match = self.peek_kind() == token_kind;
        if is_match {
            let _ = self.next_token(); // discard
        }
        is_match
    }

    /// Return the current token and advance the cursor.
    ///
    /// The consumed token must match the given token kind, otherwise
    /// a parsing error is returned. The cursor is not advanced if
    /// the token kind does not match.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] carrying the encountered token and the
    /// `expected` description if the token kind doesn't match.
    pub fn consume(&mut self, token_kind: TokenKind, expected: &'static str) -> Result<Token, ParseError> {
        if self.peek_kind() == token_kind {
            Ok(self.next_token())
        } else {
            Err(ParseError::unexpected(self.peek().clone(), expected))
        }
    }

    /// Consumes tokens while the given predicate tests as `true`.
    pub fn ignore_while(&mut self, predicate: impl Fn(TokenKind) -> bool) {
        while !self.at_end() && predicate(self.peek_kind()) {
            self.next_token();
        }
    }

    /// Return the current token without advancing the cursor.
    #[inline]
    pub fn peek(&self) -> &Token {
        self.peek_nth(0)
    }

    /// Look ahead `n` tokens past the current one without advancing.
    pub fn peek_nth(&self, n: usize) -> &Token {
        self.tokens.get(self.pos + n).unwrap_or(&self.eof)
    }

    /// Return the current token kind without advancing the cursor.
    #[inline]
    pub fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    /// Indicates whether every token has been consumed.
    pub fn at_end(&self) -> bool {
        self.peek_kind() == TokenKind::EOF
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lex::tokenize;

    #[test]
    fn test_peek_does_not_advance() {
        let tokens = tokenize("a = 1").unwrap();
        let stream = TokenStream::new(&tokens);

        assert_eq!(stream.peek_kind(), TokenKind::Ident);
        assert_eq!(stream.peek_kind(), TokenKind::Ident);
        assert_eq!(stream.peek_nth(1).kind, TokenKind::Assign);
        assert_eq!(stream.peek_nth(10).kind, TokenKind::EOF);
    }

    #[test]
    fn test_match_and_consume() {
        let tokens = tokenize("a = 1").unwrap();
        let mut stream = TokenStream::new(&tokens);

        assert!(!stream.match_token(TokenKind::Assign));
        assert!(stream.match_token(TokenKind::Ident));

        let err = stream.consume(TokenKind::Number, "number").unwrap_err();
        assert_eq!(err.token.kind, TokenKind::Assign);
        assert_eq!(err.expected(), Some("number"));

        // Cursor did not move on mismatch.
        assert!(stream.consume(TokenKind::Assign, "'='").is_ok());
        assert!(stream.consume(TokenKind::Number, "number").is_ok());
        assert!(stream.at_end());
    }

    #[test]
    fn test_end_is_sticky() {
        let tokens = tokenize("a").unwrap();
        let mut stream = TokenStream::new(&tokens);

        stream.next_token();
        assert_eq!(stream.next_token().kind, TokenKind::EOF);
        assert_eq!(stream.next_token().kind, TokenKind::EOF);
        assert_eq!(stream.peek().span, Span::new(1, 0));
    }

    #[test]
    fn test_missing_terminator_reports_eof() {
        let mut tokens = tokenize("a b").unwrap();
        tokens.pop();
        let mut stream = TokenStream::new(&tokens);

        stream.next_token();
        stream.next_token();
        assert!(stream.at_end());
        assert_eq!(stream.peek().span, Span::new(3, 0));
    }

    #[test]
    fn test_ignore_while() {
        let tokens = tokenize("\n\n\nx").unwrap();
        let mut stream = TokenStream::new(&tokens);

        stream.ignore_while(|kind| kind == TokenKind::Newline);
        assert_eq!(stream.peek_kind(), TokenKind::Ident);
    }
}
