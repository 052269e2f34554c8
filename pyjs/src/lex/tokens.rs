//! Tokens

use smol_str::SmolStr;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Token {
    pub span: Span,
    pub kind: TokenKind,
    pub value: TokenValue,
}

impl Token {
    /// Raw source text of the token.
    ///
    /// Number literals are rendered from their parsed value.
    pub fn text(&self) -> SmolStr {
        match &self.value {
            TokenValue::Text(text) => text.clone(),
            TokenValue::Number(number) => number.to_string().into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            TokenKind::EOF => write!(f, "end-of-file"),
            TokenKind::Newline => write!(f, "newline"),
            kind => write!(f, "{} '{}'", kind, self.text()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[rustfmt::skip]
pub enum TokenKind {
    // Simple
    Assign,       // =
    Colon,        // :
    Comma,        // ,
    LeftParen,    // (
    RightParen,   // )
    LeftBracket,  // [
    RightBracket, // ]
    /// Line-feed and optionally a carriage return
    Newline,

    // ------------------------------------------------------------------------
    // Operators
    /// Arithmetic `+ - * / %`
    Op,
    /// `== != <= >= < >`
    Comparison,
    /// `and`, `or`
    LogicalOp,
    /// `+= -= *= /= %=`
    CompoundAssign,

    // ------------------------------------------------------------------------
    // Complex
    Ident,
    /// Reserved identifiers
    Keyword(Keyword),
    /// Number literal
    Number,

    // ------------------------------------------------------------------------
    // Special
    /// End-of-file
    EOF,
}

impl fmt::Display for TokenKind {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Assign         => write!(f, "ASSIGN"),
            Self::Colon          => write!(f, "COLON"),
            Self::Comma          => write!(f, "COMMA"),
            Self::LeftParen      => write!(f, "LPAREN"),
            Self::RightParen     => write!(f, "RPAREN"),
            Self::LeftBracket    => write!(f, "LBRACKET"),
            Self::RightBracket   => write!(f, "RBRACKET"),
            Self::Newline        => write!(f, "NEWLINE"),
            Self::Op             => write!(f, "OP"),
            Self::Comparison     => write!(f, "COMPARISON"),
            Self::LogicalOp      => write!(f, "LOGICAL_OP"),
            Self::CompoundAssign => write!(f, "COMPOUND_ASSIGN"),
            Self::Ident          => write!(f, "ID"),
            Self::Keyword(kw)    => write!(f, "{}", kw.as_str().to_uppercase()),
            Self::Number         => write!(f, "NUMBER"),
            Self::EOF            => write!(f, "EOF"),
        }
    }
}

/// Reserved keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u8)]
pub enum Keyword {
    Def,
    If,
    Else,
    For,
    While,
    In,
    Return,
    /// Explicit block terminator.
    End,
}

impl Keyword {
    #[rustfmt::skip]
    pub fn parse(text: impl AsRef<str>) -> Option<Self> {
        match text.as_ref() {
            "def"    => Some(Self::Def),
            "if"     => Some(Self::If),
            "else"   => Some(Self::Else),
            "for"    => Some(Self::For),
            "while"  => Some(Self::While),
            "in"     => Some(Self::In),
            "return" => Some(Self::Return),
            "end"    => Some(Self::End),
            _ => None,
        }
    }

    #[rustfmt::skip]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Def    => "def",
            Self::If     => "if",
            Self::Else   => "else",
            Self::For    => "for",
            Self::While  => "while",
            Self::In     => "in",
            Self::Return => "return",
            Self::End    => "end",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TokenValue {
    Number(Number),
    Text(SmolStr),
}

/// Numeric literal value.
///
/// The integer and floating point forms are kept apart so
/// code generation can render `3` and `3.0` faithfully.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            // Debug keeps the trailing `.0` on whole numbers.
            Self::Float(value) => write!(f, "{value:?}"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Span {
    pub index: u32,
    pub size: u32,
}

impl Span {
    pub fn new(index: u32, size: u32) -> Self {
        Self { index, size }
    }

    #[inline]
    pub fn fragment<'a>(&self, text: &'a str) -> &'a str {
        &text[(self.index as usize)..(self.index as usize + self.size as usize)]
    }

    /// Ending index of the span, exclusive.
    #[inline]
    pub fn end(&self) -> u32 {
        self.index + self.size
    }

    pub fn surrounding_line<'a>(&self, text: &'a str) -> (&'a str, Span) {
        const NEWLINE: char = '\n';
        const RETURN: char = '\r';

        let mut chars = text.char_indices().peekable();
        let mut start = 0;
        let mut end = text.len();

        while let Some((i, c)) = chars.next() {
            if i < self.index as usize {
                if c == NEWLINE {
                    // Span not found yet, move the starting cursor to the next line.
                    if let Some((i, _)) = chars.peek() {
                        start = *i;
                    }
                }
            } else if c == NEWLINE || c == RETURN {
                // The line ends at the first line break after the start of the span.
                // Line breaks are not included in the line span.
                end = i;
                break;
            }
        }

        // A span pointing at a line break belongs to the line it ends.
        let start = start.min(end);

        let line_span = Span {
            index: start as u32,
            size: end as u32 - start as u32,
        };

        (&text[start..end], line_span)
    }
}
