//! JavaScript code generation.
use std::{borrow::Cow, collections::HashSet};

use itertools::Itertools;
use log::debug;
use smol_str::SmolStr;

use crate::parsing::{BinaryExpr, Block, Call, Expr, Stmt};

const INDENT: &str = "    ";

/// JavaScript reserved words that are plain identifiers in the
/// source language. Sorted for binary search.
#[rustfmt::skip]
const JS_RESERVED: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue",
    "debugger", "default", "delete", "do", "enum", "export", "extends",
    "false", "finally", "function", "implements", "import", "instanceof",
    "interface", "let", "new", "null", "package", "private", "protected",
    "public", "static", "super", "switch", "this", "throw", "true", "try",
    "typeof", "var", "void", "with", "yield",
];

/// Render a program as JavaScript source.
pub fn generate(program: &[Stmt]) -> String {
    CodeGen::new().generate(program)
}

/// Walks the syntax tree, emitting one line per statement.
///
/// Every node kind has a rendering, so generation cannot fail.
#[derive(Debug, Default)]
pub struct CodeGen {
    output: String,
    /// Nesting depth of the statement being emitted.
    depth: usize,
    /// Rendered names bound by `let` or `function` at top level.
    declared: HashSet<SmolStr>,
}

impl CodeGen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate(mut self, program: &[Stmt]) -> String {
        for stmt in program {
            self.emit_stmt(stmt);
        }

        debug!(
            "generated {} bytes for {} top-level statements",
            self.output.len(),
            program.len()
        );

        self.output
    }

    fn emit_line(&mut self, line: &str) {
        for _ in 0..self.depth {
            self.output.push_str(INDENT);
        }
        self.output.push_str(line);
        self.output.push('\n');
    }

    fn emit_block(&mut self, block: &Block) {
        self.depth += 1;
        for stmt in &block.stmts {
            self.emit_stmt(stmt);
        }
        self.depth -= 1;
    }

    fn emit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Assign(assign) => {
                let name = js_ident(&assign.name);
                let value = render_expr(&assign.value);

                // Only the first top-level binding of a name declares it.
                // Blocks reassign.
                if self.depth == 0 && self.declared.insert(SmolStr::new(&name)) {
                    self.emit_line(&format!("let {name} = {value};"));
                } else {
                    self.emit_line(&format!("{name} = {value};"));
                }
            }
            Stmt::CompoundAssign(assign) => {
                let name = js_ident(&assign.name);
                let value = render_expr(&assign.value);
                self.emit_line(&format!("{} {} {};", name, assign.op.as_str(), value));
            }
            Stmt::FuncDef(func) => {
                let name = js_ident(&func.name);
                let params = func.params.iter().map(|param| js_ident(param)).join(", ");

                // A name already bound by `let` cannot be declared again,
                // so the function is assigned to it instead.
                if self.depth == 0 && !self.declared.insert(SmolStr::new(&name)) {
                    self.emit_line(&format!("{name} = function {name}({params}) {{"));
                    self.emit_block(&func.body);
                    self.emit_line("};");
                } else {
                    self.emit_line(&format!("function {name}({params}) {{"));
                    self.emit_block(&func.body);
                    self.emit_line("}");
                }
            }
            Stmt::If(if_stmt) => {
                self.emit_line(&format!("if ({}) {{", render_cond(&if_stmt.cond)));
                self.emit_block(&if_stmt.then_block);
                if let Some(else_block) = &if_stmt.else_block {
                    self.emit_line("} else {");
                    self.emit_block(else_block);
                }
                self.emit_line("}");
            }
            Stmt::For(for_stmt) => {
                self.emit_line(&format!(
                    "for (let {} of {}) {{",
                    js_ident(&for_stmt.var),
                    render_expr(&for_stmt.iterable)
                ));
                self.emit_block(&for_stmt.body);
                self.emit_line("}");
            }
            Stmt::While(while_stmt) => {
                self.emit_line(&format!("while ({}) {{", render_cond(&while_stmt.cond)));
                self.emit_block(&while_stmt.body);
                self.emit_line("}");
            }
            Stmt::Return(ret) => {
                let value = render_opt_expr(ret.value.as_ref());
                self.emit_line(&format!("return {value};"));
            }
            Stmt::Call(call) => {
                self.emit_line(&format!("{};", render_call(call)));
            }
        }
    }
}

fn render_expr(expr: &Expr) -> String {
    match expr {
        Expr::Literal(number) => number.to_string(),
        Expr::Variable(name) => js_ident(name).into_owned(),
        Expr::Binary(binary) => format!("({})", render_binary(binary)),
        Expr::List(elements) => format!("[{}]", elements.iter().map(render_expr).join(", ")),
        Expr::Call(call) => render_call(call),
    }
}

/// A structurally absent expression renders as `null`.
fn render_opt_expr(expr: Option<&Expr>) -> String {
    expr.map(render_expr).unwrap_or_else(|| "null".to_string())
}

/// Binary expression without its enclosing parentheses.
fn render_binary(binary: &BinaryExpr) -> String {
    format!(
        "{} {} {}",
        render_expr(&binary.lhs),
        binary.op.js_str(),
        render_expr(&binary.rhs)
    )
}

/// Condition of `if` and `while`, which already sits in parentheses.
fn render_cond(expr: &Expr) -> String {
    match expr {
        Expr::Binary(binary) => render_binary(binary),
        expr => render_expr(expr),
    }
}

fn render_call(call: &Call) -> String {
    format!(
        "{}({})",
        js_ident(&call.name),
        call.args.iter().map(render_expr).join(", ")
    )
}

/// Rename identifiers that collide with JavaScript reserved words.
///
/// Names already ending in `_` gain another one, so a renamed
/// reserved word never meets a source name of the same spelling.
fn js_ident(name: &str) -> Cow<'_, str> {
    if name.ends_with('_') || JS_RESERVED.binary_search(&name).is_ok() {
        Cow::Owned(format!("{name}_"))
    } else {
        Cow::Borrowed(name)
    }
}
