//! Expression parsing.
use smol_str::SmolStr;

use super::{ParseResult, Parser};
use crate::{
    error::ParseError,
    lex::{Number, TokenKind, TokenValue},
};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Expr {
    Literal(Number),
    /// Name reference, unresolved.
    Variable(SmolStr),
    Binary(Box<BinaryExpr>),
    List(Vec<Expr>),
    Call(Call),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub lhs: Expr,
    pub rhs: Expr,
}

/// Function call, in either expression or statement position.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Call {
    pub name: SmolStr,
    pub args: Vec<Expr>,
}

/// Binary operators.
///
/// All share a single precedence level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[rustfmt::skip]
pub enum BinaryOp {
    // Arithmetic
    Add, // +
    Sub, // -
    Mul, // *
    Div, // /
    Mod, // %

    // Comparison
    Eq,    // ==
    NotEq, // !=
    Lt,    // <
    LtEq,  // <=
    Gt,    // >
    GtEq,  // >=

    // Logical
    And, // and
    Or,  // or
}

impl BinaryOp {
    #[rustfmt::skip]
    pub fn parse(text: impl AsRef<str>) -> Option<Self> {
        match text.as_ref() {
            "+"   => Some(Self::Add),
            "-"   => Some(Self::Sub),
            "*"   => Some(Self::Mul),
            "/"   => Some(Self::Div),
            "%"   => Some(Self::Mod),
            "=="  => Some(Self::Eq),
            "!="  => Some(Self::NotEq),
            "<"   => Some(Self::Lt),
            "<="  => Some(Self::LtEq),
            ">"   => Some(Self::Gt),
            ">="  => Some(Self::GtEq),
            "and" => Some(Self::And),
            "or"  => Some(Self::Or),
            _ => None,
        }
    }

    /// Source language spelling.
    #[rustfmt::skip]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add   => "+",
            Self::Sub   => "-",
            Self::Mul   => "*",
            Self::Div   => "/",
            Self::Mod   => "%",
            Self::Eq    => "==",
            Self::NotEq => "!=",
            Self::Lt    => "<",
            Self::LtEq  => "<=",
            Self::Gt    => ">",
            Self::GtEq  => ">=",
            Self::And   => "and",
            Self::Or    => "or",
        }
    }

    /// Target language spelling.
    ///
    /// Only the logical operators are spelled differently.
    pub fn js_str(&self) -> &'static str {
        match self {
            Self::And => "&&",
            Self::Or => "||",
            op => op.as_str(),
        }
    }
}

impl<'a> Parser<'a> {
    /// Left fold over a flat run of terms.
    ///
    /// ```text
    /// expr := term ((OP | LOGICAL_OP | COMPARISON) term)*
    /// ```
    pub(crate) fn parse_expr(&mut self) -> ParseResult<Expr> {
        use TokenKind as TK;

        let mut lhs = self.parse_term()?;

        while matches!(
            self.stream.peek_kind(),
            TK::Op | TK::LogicalOp | TK::Comparison
        ) {
            let token = self.stream.next_token();
            let op = BinaryOp::parse(token.text().as_str())
                .ok_or_else(|| ParseError::unexpected(token, "binary operator"))?;
            let rhs = self.parse_term()?;
            lhs = Expr::Binary(Box::new(BinaryExpr { op, lhs, rhs }));
        }

        Ok(lhs)
    }

    /// ```text
    /// term := NUMBER | ID [call-suffix] | LPAREN expr RPAREN
    ///       | LBRACKET (expr (COMMA expr)*)? RBRACKET
    /// ```
    fn parse_term(&mut self) -> ParseResult<Expr> {
        use TokenKind as TK;

        match self.stream.peek_kind() {
            TK::Number => {
                let token = self.stream.next_token();
                match token.value {
                    TokenValue::Number(number) => Ok(Expr::Literal(number)),
                    TokenValue::Text(_) => Err(ParseError::unexpected(token, "number literal")),
                }
            }
            TK::Ident => {
                if self.stream.peek_nth(1).kind == TK::LeftParen {
                    self.parse_call().map(Expr::Call)
                } else {
                    Ok(Expr::Variable(self.stream.next_token().text()))
                }
            }
            TK::LeftParen => {
                self.stream.next_token();
                let expr = self.parse_expr()?;
                self.stream.consume(TK::RightParen, "')'")?;
                Ok(expr)
            }
            TK::LeftBracket => self.parse_list(),
            _ => Err(self.error("expression")),
        }
    }

    /// ```text
    /// LBRACKET (expr (COMMA expr)*)? RBRACKET
    /// ```
    fn parse_list(&mut self) -> ParseResult<Expr> {
        self.stream.consume(TokenKind::LeftBracket, "'['")?;
        let elements = self.parse_expr_list(TokenKind::RightBracket)?;
        self.stream.consume(TokenKind::RightBracket, "']'")?;

        Ok(Expr::List(elements))
    }

    /// ```text
    /// call := ID LPAREN (expr (COMMA expr)*)? RPAREN
    /// ```
    pub(crate) fn parse_call(&mut self) -> ParseResult<Call> {
        let name = self.consume_ident("function name")?;
        self.stream.consume(TokenKind::LeftParen, "'('")?;
        let args = self.parse_expr_list(TokenKind::RightParen)?;
        self.stream.consume(TokenKind::RightParen, "')'")?;

        Ok(Call { name, args })
    }

    /// Comma separated expressions, up to but not including `close`.
    ///
    /// Commas only separate, so a trailing comma is an error.
    fn parse_expr_list(&mut self, close: TokenKind) -> ParseResult<Vec<Expr>> {
        let mut items = vec![];

        if self.stream.peek_kind() != close {
            loop {
                items.push(self.parse_expr()?);
                if !self.stream.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        Ok(items)
    }
}
