//! Statement parsing.
use log::trace;
use smol_str::SmolStr;

use super::{block::Block, expr::Call, expr::Expr, ParseResult, Parser};
use crate::{
    error::{ParseError, ParseErrorKind},
    lex::{Keyword, TokenKind},
};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Stmt {
    Assign(Assign),
    CompoundAssign(CompoundAssign),
    FuncDef(FuncDef),
    If(IfStmt),
    For(ForStmt),
    While(WhileStmt),
    Return(ReturnStmt),
    /// Call in statement position
    Call(Call),
}

/// Plain assignment.
///
/// ```text
/// x = 1
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Assign {
    pub name: SmolStr,
    pub value: Expr,
}

/// Assignment combined with an arithmetic operator.
///
/// ```text
/// x += 1
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CompoundAssign {
    pub name: SmolStr,
    pub op: AssignOp,
    pub value: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AssignOp {
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
}

impl AssignOp {
    #[rustfmt::skip]
    pub fn parse(text: impl AsRef<str>) -> Option<Self> {
        match text.as_ref() {
            "+=" => Some(Self::AddAssign),
            "-=" => Some(Self::SubAssign),
            "*=" => Some(Self::MulAssign),
            "/=" => Some(Self::DivAssign),
            "%=" => Some(Self::ModAssign),
            _ => None,
        }
    }

    /// Spelling is shared by the source and target language.
    #[rustfmt::skip]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AddAssign => "+=",
            Self::SubAssign => "-=",
            Self::MulAssign => "*=",
            Self::DivAssign => "/=",
            Self::ModAssign => "%=",
        }
    }
}

/// Function definition.
///
/// ```text
/// def add(a, b):
///     return a + b
/// end
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FuncDef {
    pub name: SmolStr,
    /// Unique within the definition.
    pub params: Vec<SmolStr>,
    pub body: Block,
}

/// Conditional with an optional else branch.
///
/// An absent else branch is `None`, which is not the
/// same as an else branch with no statements.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IfStmt {
    pub cond: Expr,
    pub then_block: Block,
    pub else_block: Option<Block>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ForStmt {
    /// Loop variable
    pub var: SmolStr,
    pub iterable: Expr,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WhileStmt {
    pub cond: Expr,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReturnStmt {
    /// `None` for a bare `return`.
    pub value: Option<Expr>,
}

impl<'a> Parser<'a> {
    /// ```text
    /// statement := function_def | return_stmt | if_stmt | for_stmt
    ///            | while_stmt | assignment | call_stmt
    /// ```
    pub(crate) fn parse_stmt(&mut self) -> ParseResult<Stmt> {
        use Keyword as K;
        use TokenKind as TK;

        let stmt = match self.stream.peek_kind() {
            TK::Keyword(K::Def) => self.parse_func_def().map(Stmt::FuncDef)?,
            TK::Keyword(K::Return) => self.parse_return().map(Stmt::Return)?,
            TK::Keyword(K::If) => self.parse_if().map(Stmt::If)?,
            TK::Keyword(K::For) => self.parse_for().map(Stmt::For)?,
            TK::Keyword(K::While) => self.parse_while().map(Stmt::While)?,
            TK::Ident => {
                // One token of lookahead tells a call from an assignment.
                if self.stream.peek_nth(1).kind == TK::LeftParen {
                    self.parse_call().map(Stmt::Call)?
                } else {
                    self.parse_assignment()?
                }
            }
            _ => return Err(self.error("statement")),
        };

        trace!("statement {:?}", stmt);

        Ok(stmt)
    }

    /// ```text
    /// assignment := ID (ASSIGN | COMPOUND_ASSIGN) expr
    /// ```
    fn parse_assignment(&mut self) -> ParseResult<Stmt> {
        let name = self.consume_ident("assignment target")?;

        match self.stream.peek_kind() {
            TokenKind::Assign => {
                self.stream.next_token();
                let value = self.parse_expr()?;
                Ok(Stmt::Assign(Assign { name, value }))
            }
            TokenKind::CompoundAssign => {
                let token = self.stream.next_token();
                let op = AssignOp::parse(token.text().as_str())
                    .ok_or_else(|| ParseError::unexpected(token, "compound assignment operator"))?;
                let value = self.parse_expr()?;
                Ok(Stmt::CompoundAssign(CompoundAssign { name, op, value }))
            }
            _ => Err(self.error("'=' or compound assignment")),
        }
    }

    /// ```text
    /// function_def := DEF ID LPAREN (ID (COMMA ID)*)? RPAREN COLON block [END]
    /// ```
    fn parse_func_def(&mut self) -> ParseResult<FuncDef> {
        self.stream
            .consume(TokenKind::Keyword(Keyword::Def), "'def'")?;
        let name = self.consume_ident("function name")?;
        self.stream.consume(TokenKind::LeftParen, "'('")?;

        let mut params: Vec<SmolStr> = vec![];
        if self.stream.peek_kind() != TokenKind::RightParen {
            loop {
                let token = self.stream.consume(TokenKind::Ident, "parameter name")?;
                let param = token.text();
                if params.contains(&param) {
                    return Err(ParseError {
                        kind: ParseErrorKind::DuplicateParam {
                            name: param.to_string(),
                        },
                        token,
                    });
                }
                params.push(param);

                if !self.stream.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.stream.consume(TokenKind::RightParen, "')'")?;
        self.stream.consume(TokenKind::Colon, "':'")?;

        self.func_depth += 1;
        let body = self.parse_block();
        self.func_depth -= 1;
        let body = body?;
        self.match_block_end();

        Ok(FuncDef { name, params, body })
    }

    /// ```text
    /// return_stmt := RETURN [expr]
    /// ```
    fn parse_return(&mut self) -> ParseResult<ReturnStmt> {
        let token = self
            .stream
            .consume(TokenKind::Keyword(Keyword::Return), "'return'")?;

        if self.func_depth == 0 {
            return Err(ParseError {
                kind: ParseErrorKind::ReturnOutsideFunction,
                token,
            });
        }

        let value = if self.stream.peek_kind() == TokenKind::Newline || self.at_block_end() {
            None
        } else {
            Some(self.parse_expr()?)
        };

        Ok(ReturnStmt { value })
    }

    /// ```text
    /// if_stmt := IF expr COLON block (ELSE COLON block)? [END]
    /// ```
    fn parse_if(&mut self) -> ParseResult<IfStmt> {
        self.stream
            .consume(TokenKind::Keyword(Keyword::If), "'if'")?;
        let cond = self.parse_expr()?;
        self.stream.consume(TokenKind::Colon, "':'")?;
        let then_block = self.parse_block()?;

        let else_block = if self.stream.match_token(TokenKind::Keyword(Keyword::Else)) {
            self.stream.consume(TokenKind::Colon, "':'")?;
            Some(self.parse_block()?)
        } else {
            None
        };
        self.match_block_end();

        Ok(IfStmt {
            cond,
            then_block,
            else_block,
        })
    }

    /// ```text
    /// for_stmt := FOR ID IN expr COLON block [END]
    /// ```
    fn parse_for(&mut self) -> ParseResult<ForStmt> {
        self.stream
            .consume(TokenKind::Keyword(Keyword::For), "'for'")?;
        let var = self.consume_ident("loop variable")?;
        self.stream
            .consume(TokenKind::Keyword(Keyword::In), "'in'")?;
        let iterable = self.parse_expr()?;
        self.stream.consume(TokenKind::Colon, "':'")?;
        let body = self.parse_block()?;
        self.match_block_end();

        Ok(ForStmt {
            var,
            iterable,
            body,
        })
    }

    /// ```text
    /// while_stmt := WHILE expr COLON block [END]
    /// ```
    fn parse_while(&mut self) -> ParseResult<WhileStmt> {
        self.stream
            .consume(TokenKind::Keyword(Keyword::While), "'while'")?;
        let cond = self.parse_expr()?;
        self.stream.consume(TokenKind::Colon, "':'")?;
        let body = self.parse_block()?;
        self.match_block_end();

        Ok(WhileStmt { cond, body })
    }
}
