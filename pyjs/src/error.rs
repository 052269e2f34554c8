//! Result and errors.
use std::fmt::{self, Display, Formatter, Write as FmtWrite};

use crate::lex::{Span, Token};

pub type TranspileResult<T> = std::result::Result<T, TranspileError>;

#[derive(Debug, Clone, PartialEq)]
pub enum TranspileError {
    Lex(LexError),
    Parse(ParseError),
}

impl TranspileError {
    /// Location in the source the error points at.
    pub fn span(&self) -> Span {
        match self {
            Self::Lex(err) => err.span(),
            Self::Parse(err) => err.token.span,
        }
    }

    /// Format the error together with the offending source line,
    /// underlined with carets.
    ///
    /// ```text
    /// parse error: expected expression, found ASSIGN '='
    ///  --> 1:5
    ///   |
    ///   | x = = 1
    ///   |     ^
    /// ```
    pub fn report(&self, source_code: &str) -> String {
        let span = self.span();
        let (line, line_span) = span.surrounding_line(source_code);
        let line = line.trim_end_matches(&['\r', '\n'][..]);

        let line_number = source_code[..line_span.index as usize]
            .matches('\n')
            .count()
            + 1;
        let column = source_code[line_span.index as usize..span.index as usize]
            .chars()
            .count();
        let width = span.fragment(source_code).chars().count().max(1);

        let mut buf = String::new();
        // Writing into a string does not fail.
        let _ = writeln!(buf, "{self}");
        let _ = writeln!(buf, " --> {}:{}", line_number, column + 1);
        let _ = writeln!(buf, "  |");
        let _ = writeln!(buf, "  | {line}");
        let _ = write!(buf, "  | {}{}", " ".repeat(column), "^".repeat(width));
        buf
    }
}

impl Display for TranspileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lex(err) => write!(f, "lexical error: {err}"),
            Self::Parse(err) => write!(f, "parse error: {err}"),
        }
    }
}

impl std::error::Error for TranspileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lex(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<LexError> for TranspileError {
    fn from(err: LexError) -> Self {
        TranspileError::Lex(err)
    }
}

impl From<ParseError> for TranspileError {
    fn from(err: ParseError) -> Self {
        TranspileError::Parse(err)
    }
}

/// Failure to recognise the text at the current scan position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// No token starts with this character.
    UnexpectedChar { ch: char, span: Span },
    /// Digits that don't fit the numeric representation.
    InvalidNumber { span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            Self::UnexpectedChar { span, .. } | Self::InvalidNumber { span } => *span,
        }
    }

    /// Byte offset of the error in the source.
    pub fn offset(&self) -> usize {
        self.span().index as usize
    }
}

impl Display for LexError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedChar { ch, span } => {
                write!(f, "unexpected character {:?} at offset {}", ch, span.index)
            }
            Self::InvalidNumber { span } => {
                write!(f, "number literal out of range at offset {}", span.index)
            }
        }
    }
}

impl std::error::Error for LexError {}

/// Token at the parser cursor does not fit the grammar rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// The token actually encountered.
    pub token: Token,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Description of the construct the grammar rule required.
    Unexpected { expected: &'static str },
    /// Parameter name repeated within one function definition.
    DuplicateParam { name: String },
    /// Return statement not nested in a function body.
    ReturnOutsideFunction,
}

impl ParseError {
    pub fn unexpected(token: Token, expected: &'static str) -> Self {
        Self {
            kind: ParseErrorKind::Unexpected { expected },
            token,
        }
    }

    /// The construct that was expected, if the error is a mismatch.
    pub fn expected(&self) -> Option<&'static str> {
        match self.kind {
            ParseErrorKind::Unexpected { expected } => Some(expected),
            _ => None,
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::Unexpected { expected } => {
                write!(f, "expected {}, found {}", expected, self.token)
            }
            ParseErrorKind::DuplicateParam { name } => {
                write!(f, "duplicate parameter '{name}' in function definition")
            }
            ParseErrorKind::ReturnOutsideFunction => {
                write!(f, "'return' outside of function")
            }
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_lex_error_report() {
        const CODE: &str = "x = 1\ny = @\n";

        let err = TranspileError::from(LexError::UnexpectedChar {
            ch: '@',
            span: Span::new(10, 1),
        });

        let report = err.report(CODE);
        let lines = report.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "lexical error: unexpected character '@' at offset 10");
        assert_eq!(lines[1], " --> 2:5");
        assert_eq!(lines[3], "  | y = @");
        assert_eq!(lines[4], "  |     ^");
    }
}
