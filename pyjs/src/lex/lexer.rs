//! Character-level lexer producing the token sequence.
use log::trace;

use crate::error::LexError;

use super::{
    cursor::{Cursor, EOF_CHAR},
    tokens::{Keyword, Number, Span, Token, TokenKind, TokenValue},
};

/// Tokenize the whole source in one pass.
///
/// The resulting sequence always ends with a single [`TokenKind::EOF`].
/// Stops at the first character that starts no token.
pub fn tokenize(source_code: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source_code).into_iter().collect()
}

pub struct Lexer<'a> {
    /// Character scanner
    cursor: Cursor<'a>,
    /// Keep reference to the source so the tokens can
    /// carry fragments of it.
    original: &'a str,
    /// Start absolute byte position of the current token
    /// in the source.
    start_pos: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source_code: &'a str) -> Self {
        let mut cursor = Cursor::new(source_code);

        // Initial state of the cursor is a non-existant EOF char,
        // but the initial state of the lexer should be a valid
        // token starting character.
        //
        // Prime the cursor for the first iteration.
        cursor.next();

        let start_pos = cursor.offset();

        Self {
            cursor,
            original: source_code,
            start_pos,
        }
    }

    /// Scan the source characters and construct the next token.
    ///
    /// ## Implementation
    ///
    /// Each iteration starts with the cursor pointing at the first
    /// character of the remaining source. Multi-character tokens advance
    /// the cursor onto their last character, and [`Lexer::make_token`]
    /// steps past it, leaving the cursor at the start of the next token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        use TokenKind as TK;

        // Erase leading whitespace.
        while is_whitespace(self.cursor.current()) {
            self.cursor.next();
        }

        // Erase comment line.
        if self.cursor.current() == '#' {
            self.erase_comment();
        }

        self.start_token();

        let token = match self.cursor.current() {
            ',' => self.make_token(TK::Comma),
            ':' => self.make_token(TK::Colon),
            '(' => self.make_token(TK::LeftParen),
            ')' => self.make_token(TK::RightParen),
            '[' => self.make_token(TK::LeftBracket),
            ']' => self.make_token(TK::RightBracket),
            '=' => {
                if self.cursor.peek() == '=' {
                    self.cursor.next();
                    self.make_token(TK::Comparison)
                } else {
                    self.make_token(TK::Assign)
                }
            }
            '!' => {
                if self.cursor.peek() == '=' {
                    self.cursor.next();
                    self.make_token(TK::Comparison)
                } else {
                    return Err(self.unexpected_char());
                }
            }
            '<' | '>' => {
                if self.cursor.peek() == '=' {
                    self.cursor.next();
                }
                self.make_token(TK::Comparison)
            }
            '+' | '-' | '*' | '/' | '%' => {
                if self.cursor.peek() == '=' {
                    self.cursor.next();
                    self.make_token(TK::CompoundAssign)
                } else {
                    self.make_token(TK::Op)
                }
            }
            '\r' => {
                // Windows :(
                if self.cursor.peek() == '\n' {
                    self.cursor.next();
                }
                self.make_token(TK::Newline)
            }
            '\n' => self.make_token(TK::Newline),
            '_' | 'a'..='z' | 'A'..='Z' => self.consume_ident(),
            '0'..='9' => self.consume_number()?,

            EOF_CHAR if self.cursor.at_end() => self.make_token(TK::EOF),
            _ => return Err(self.unexpected_char()),
        };

        trace!("{:>4}:{:<3} {}", token.span.index, token.span.size, token.kind);

        Ok(token)
    }

    /// Create a span using the starting position of the current token,
    /// and the end of the character under the cursor.
    fn make_span(&mut self) -> Span {
        let start = self.start_pos;
        let end = self.cursor.peek_offset();

        // start and end can be equal, and a token can have 0 size.
        debug_assert!(end >= start);
        let size = end - start;

        Span { index: start, size }
    }

    fn fragment(&mut self) -> &'a str {
        let original = self.original;
        self.make_span().fragment(original)
    }

    /// Primes the lexer to consume the next token.
    fn start_token(&mut self) {
        self.start_pos = self.cursor.offset();
    }

    /// Build a token from the source text between the position
    /// stored by [`Lexer::start_token`] and the current cursor position.
    ///
    /// Also prepare the cursor for the next iteration.
    fn make_token(&mut self, kind: TokenKind) -> Token {
        let value = TokenValue::Text(self.fragment().into());
        self.finish_token(kind, value)
    }

    fn finish_token(&mut self, kind: TokenKind, value: TokenValue) -> Token {
        let token = Token {
            span: self.make_span(),
            kind,
            value,
        };

        // Position the cursor to the starting character for the
        // next token, so the lexer's internal state is primed
        // for the next iteration.
        self.cursor.next();
        debug_assert_eq!(self.cursor.offset(), token.span.end());

        token
    }

    #[inline(never)]
    #[cold]
    fn unexpected_char(&mut self) -> LexError {
        LexError::UnexpectedChar {
            ch: self.cursor.current(),
            span: self.make_span(),
        }
    }
}

/// Specialised tokens.
impl<'a> Lexer<'a> {
    /// Erase comment line up to, but not including, the trailing newline.
    fn erase_comment(&mut self) {
        debug_assert_eq!(self.cursor.current(), '#');

        while !is_newline(self.cursor.current()) && !self.cursor.at_end() {
            self.cursor.next();
        }
    }

    /// Make an identifier, keyword or logical operator token.
    fn consume_ident(&mut self) -> Token {
        debug_assert!(is_letter(self.cursor.current()));

        while is_letter_or_digit(self.cursor.peek()) {
            self.cursor.next();
        }

        // Only whole words are reserved, so `order` stays an identifier.
        let fragment = self.fragment();
        let token_kind = match Keyword::parse(fragment) {
            Some(keyword) => TokenKind::Keyword(keyword),
            None => match fragment {
                "and" | "or" => TokenKind::LogicalOp,
                _ => TokenKind::Ident,
            },
        };

        self.make_token(token_kind)
    }

    /// Make a number literal token.
    ///
    /// A decimal point makes the literal floating point, even
    /// without fractional digits (`3.`).
    fn consume_number(&mut self) -> Result<Token, LexError> {
        debug_assert!(is_digit(self.cursor.current()));

        while is_digit(self.cursor.peek()) {
            self.cursor.next();
        }

        let mut is_float = false;
        if self.cursor.peek() == '.' {
            is_float = true;
            self.cursor.next();

            while is_digit(self.cursor.peek()) {
                self.cursor.next();
            }
        }

        let fragment = self.fragment();
        let number = if is_float {
            fragment
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map(Number::Float)
        } else {
            fragment.parse::<i64>().ok().map(Number::Int)
        };

        match number {
            Some(number) => Ok(self.finish_token(TokenKind::Number, TokenValue::Number(number))),
            None => Err(LexError::InvalidNumber {
                span: self.make_span(),
            }),
        }
    }
}

/// Test whether the character is considered whitespace
/// that should be ignored by the parser later.
///
/// Doesn't include newline characters, because newlines
/// are tokenized as statement separators.
fn is_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{0020}' // space
            | '\u{0009}' // tab
            | '\u{00A0}' // no-break space
            | '\u{FEFF}' // zero width no-break space
    )
}

fn is_newline(c: char) -> bool {
    matches!(c, '\r' | '\n')
}

#[allow(clippy::manual_is_ascii_check)] // consistency with other functions
fn is_digit(c: char) -> bool {
    matches!(c, '0'..='9')
}

fn is_letter(c: char) -> bool {
    matches!(c, 'a'..='z' | 'A'..='Z' | '_')
}

fn is_letter_or_digit(c: char) -> bool {
    is_letter(c) || is_digit(c)
}

impl<'a> IntoIterator for Lexer<'a> {
    type Item = Result<Token, LexError>;
    type IntoIter = LexerIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        LexerIter {
            lexer: self,
            done: false,
        }
    }
}

/// Convenience iterator that wraps the lexer.
///
/// Ends after yielding the EOF token or the first error.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct LexerIter<'a> {
    done: bool,
    lexer: Lexer<'a>,
}

impl<'a> Iterator for LexerIter<'a> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.lexer.next_token();
        self.done = match &result {
            Ok(token) => token.kind == TokenKind::EOF,
            Err(_) => true,
        };

        Some(result)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use super::TokenKind as TK;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    fn texts(source: &str) -> Vec<String> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|token| token.text().to_string())
            .collect()
    }

    #[test]
    fn test_assignment() {
        assert_eq!(
            kinds("x = 1 + 2"),
            vec![TK::Ident, TK::Assign, TK::Number, TK::Op, TK::Number, TK::EOF]
        );
    }

    #[test]
    fn test_multi_char_operators_first() {
        assert_eq!(
            kinds("a == b != c <= d >= e < f > g"),
            vec![
                TK::Ident, TK::Comparison, TK::Ident, TK::Comparison, TK::Ident,
                TK::Comparison, TK::Ident, TK::Comparison, TK::Ident,
                TK::Comparison, TK::Ident, TK::Comparison, TK::Ident, TK::EOF,
            ]
        );
        assert_eq!(
            texts("+= -= *= /= %= + - * / %"),
            vec!["+=", "-=", "*=", "/=", "%=", "+", "-", "*", "/", "%", ""]
        );
        assert_eq!(
            kinds("x += 1"),
            vec![TK::Ident, TK::CompoundAssign, TK::Number, TK::EOF]
        );
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("def if else for while in return end"),
            vec![
                TK::Keyword(Keyword::Def),
                TK::Keyword(Keyword::If),
                TK::Keyword(Keyword::Else),
                TK::Keyword(Keyword::For),
                TK::Keyword(Keyword::While),
                TK::Keyword(Keyword::In),
                TK::Keyword(Keyword::Return),
                TK::Keyword(Keyword::End),
                TK::EOF,
            ]
        );
    }

    #[test]
    fn test_logical_ops_are_whole_words() {
        assert_eq!(
            kinds("a and b or order"),
            vec![TK::Ident, TK::LogicalOp, TK::Ident, TK::LogicalOp, TK::Ident, TK::EOF]
        );
        assert_eq!(kinds("android iffy"), vec![TK::Ident, TK::Ident, TK::EOF]);
    }

    #[test]
    fn test_numbers_keep_their_form() {
        let tokens = tokenize("3 3.0 3. 0.25").unwrap();
        let values = tokens
            .iter()
            .filter_map(|token| match token.value {
                TokenValue::Number(number) => Some(number),
                _ => None,
            })
            .collect::<Vec<_>>();

        assert_eq!(
            values,
            vec![
                Number::Int(3),
                Number::Float(3.0),
                Number::Float(3.0),
                Number::Float(0.25),
            ]
        );
    }

    #[test]
    fn test_newlines() {
        assert_eq!(
            kinds("a\nb\r\nc\rd"),
            vec![
                TK::Ident, TK::Newline, TK::Ident, TK::Newline,
                TK::Ident, TK::Newline, TK::Ident, TK::EOF,
            ]
        );
    }

    #[test]
    fn test_whitespace_and_comments_discarded() {
        assert_eq!(
            kinds("  x\t=  1 # set x\n# whole line\n"),
            vec![
                TK::Ident, TK::Assign, TK::Number, TK::Newline,
                TK::Newline, TK::EOF,
            ]
        );
        assert_eq!(kinds("# trailing comment"), vec![TK::EOF]);
    }

    #[test]
    fn test_spans() {
        let tokens = tokenize("ab += 12.5").unwrap();
        assert_eq!(tokens[0].span, Span::new(0, 2));
        assert_eq!(tokens[1].span, Span::new(3, 2));
        assert_eq!(tokens[2].span, Span::new(6, 4));
        assert_eq!(tokens[3].span, Span::new(10, 0));
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(kinds(""), vec![TK::EOF]);
    }

    #[test]
    fn test_unexpected_char() {
        let err = tokenize("x = 1\ny = @ + 2").unwrap_err();
        assert_eq!(
            err,
            LexError::UnexpectedChar {
                ch: '@',
                span: Span::new(10, 1),
            }
        );
        assert_eq!(err.offset(), 10);
    }

    #[test]
    fn test_lone_bang_is_an_error() {
        let err = tokenize("!x").unwrap_err();
        assert!(matches!(err, LexError::UnexpectedChar { ch: '!', .. }));
    }

    #[test]
    fn test_null_char_is_an_error() {
        let err = tokenize("x\0").unwrap_err();
        assert!(matches!(err, LexError::UnexpectedChar { ch: '\0', .. }));
    }

    #[test]
    fn test_integer_overflow() {
        let err = tokenize("x = 99999999999999999999").unwrap_err();
        assert_eq!(
            err,
            LexError::InvalidNumber {
                span: Span::new(4, 20),
            }
        );
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let results = Lexer::new("a $ b").into_iter().collect::<Vec<_>>();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }
}
