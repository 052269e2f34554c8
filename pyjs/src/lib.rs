//! Transpiler from a small Python-like language to JavaScript.
//!
//! The pipeline runs in three stages, each finishing before the next:
//!
//! ```text
//! source --tokenize--> tokens --parse--> syntax tree --generate--> JavaScript
//! ```
//!
//! ```
//! let js = pyjs::transpile("x = 1 + 2").unwrap();
//! assert_eq!(js, "let x = (1 + 2);\n");
//! ```
pub mod codegen;
mod error;
pub mod lex;
pub mod parsing;

use log::debug;

pub use self::error::{LexError, ParseError, ParseErrorKind, TranspileError, TranspileResult};

/// Translate source text into JavaScript.
///
/// Fails with the first lexical or syntax error. No output is
/// produced on failure.
pub fn transpile(source_code: impl AsRef<str>) -> TranspileResult<String> {
    let source_code = source_code.as_ref();

    // Lexical analysis
    let tokens = lex::tokenize(source_code)?;
    debug!("lexed {} tokens", tokens.len());

    // Syntactic analysis
    let program = parsing::parse(&tokens)?;

    // Code generation
    Ok(codegen::generate(&program))
}

pub mod prelude {
    pub use super::{
        codegen::{generate, CodeGen},
        error::{LexError, ParseError, ParseErrorKind, TranspileError, TranspileResult},
        lex::{tokenize, Lexer, Span, Token, TokenKind},
        parsing::{parse, Parser, Stmt},
        transpile,
    };
}
