//! Entrypoint for CLI
mod error;

use std::{env, fs, io::Write};

use log::{error, info};
use pyjs::prelude::*;

use self::error::CliResult;

static USAGE: &str = r#"
usage: pyjs CMD FILE [OUT]

commands:
    build   Transpile FILE to JavaScript, writing OUT (stdout when omitted)
    tokens  Print the token table of FILE
    ast     Print the syntax tree of FILE as YAML

examples:
    pyjs build fizz.py fizz.js
    pyjs tokens fizz.py
    pyjs ast fizz.py
"#;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn read_source(filepath: &str) -> CliResult<String> {
    let file_bytes = fs::read(filepath)?;
    Ok(String::from_utf8(file_bytes)?)
}

/// Log the failure and print the source excerpt.
fn report(err: TranspileError, source_code: &str) -> TranspileError {
    error!("transpilation failed: {err}");
    eprintln!("{}", err.report(source_code));
    err
}

fn run_build(filepath: &str, outpath: Option<&str>) -> CliResult<()> {
    info!("transpiling {filepath}");

    let source_code = read_source(filepath)?;
    let js = transpile(&source_code).map_err(|err| report(err, &source_code))?;

    // Output is only touched once the whole pipeline succeeded.
    match outpath {
        Some(outpath) => {
            let mut outfile = fs::File::create(outpath)?;
            outfile.write_all(js.as_bytes())?;
            info!("wrote {} bytes to {outpath}", js.len());
        }
        None => {
            print!("{js}");
        }
    }

    Ok(())
}

fn run_tokens(filepath: &str) -> CliResult<()> {
    let source_code = read_source(filepath)?;
    let tokens = tokenize(&source_code)
        .map_err(|err| report(TranspileError::from(err), &source_code))?;

    println!("offset | len | token           | fragment ");
    for token in &tokens {
        let offset = token.span.index;
        let len = token.span.size;
        let kind = token.kind.to_string(); // cannot format Display into columns
        match token.kind {
            TokenKind::EOF | TokenKind::Newline => println!("{offset:7}:{len: <3} {kind: <16}"),
            _ => {
                let fragment = token.span.fragment(&source_code);
                println!("{offset:7}:{len: <3} {kind: <16}  \"{fragment}\"")
            }
        }
    }

    Ok(())
}

fn run_ast(filepath: &str) -> CliResult<()> {
    let source_code = read_source(filepath)?;
    let program = tokenize(&source_code)
        .map_err(TranspileError::from)
        .and_then(|tokens| parse(&tokens).map_err(TranspileError::from))
        .map_err(|err| report(err, &source_code))?;

    print!("{}", serde_yaml::to_string(&program)?);

    Ok(())
}

fn main() {
    if let Err(err) = simple_logger::SimpleLogger::new().env().init() {
        eprintln!("failed to install logger: {err}");
    }

    let result = match parse_args() {
        Some(Cmd::Build { filepath, outpath }) => run_build(&filepath, outpath.as_deref()),
        Some(Cmd::Tokens { filepath }) => run_tokens(&filepath),
        Some(Cmd::Ast { filepath }) => run_ast(&filepath),
        None => {
            print_usage();
            // FreeBSD EX_USAGE (64)
            std::process::exit(64)
        }
    };

    if let Err(err) = result {
        error!("{err}");
        std::process::exit(1);
    }
}

fn parse_args() -> Option<Cmd> {
    let mut args = env::args().skip(1);
    match args.next() {
        Some(cmd) => {
            // don't format me T.T
            match cmd.as_str() {
                "build" => Some(Cmd::Build {
                    filepath: args.next()?,
                    outpath: args.next(),
                }),
                "tokens" => Some(Cmd::Tokens {
                    filepath: args.next()?,
                }),
                "ast" => Some(Cmd::Ast {
                    filepath: args.next()?,
                }),
                _ => None,
            }
        }
        None => None,
    }
}

fn print_usage() {
    println!("pyjs v{VERSION}");
    println!("{USAGE}");
}

enum Cmd {
    /// Transpile file
    Build {
        filepath: String,
        outpath: Option<String>,
    },
    /// Dump tokens
    Tokens { filepath: String },
    /// Dump syntax tree
    Ast { filepath: String },
}
