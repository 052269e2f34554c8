use pyjs::prelude::*;

#[test]
fn test_transpile_sample() {
    let source = include_str!("sample.py");
    let expected = include_str!("sample.js");

    match pyjs::transpile(source) {
        Ok(js) => {
            assert_eq!(js, expected);
        }
        Err(err) => {
            panic!("{}", err.report(source))
        }
    }
}

#[test]
fn test_assignment_declares() {
    assert_eq!(transpile("x = 1 + 2").unwrap(), "let x = (1 + 2);\n");
}

#[test]
fn test_function_definition() {
    assert_eq!(
        transpile("def add(a, b): return a + b").unwrap(),
        "function add(a, b) {\n    return (a + b);\n}\n"
    );
}

#[test]
fn test_if_else_reassigns() {
    assert_eq!(
        transpile("if x > 0: y = 1 else: y = 2").unwrap(),
        "if (x > 0) {\n    y = 1;\n} else {\n    y = 2;\n}\n"
    );
}

#[test]
fn test_for_loop() {
    assert_eq!(
        transpile("for i in [1, 2, 3]: z += i").unwrap(),
        "for (let i of [1, 2, 3]) {\n    z += i;\n}\n"
    );
}

#[test]
fn test_double_assign_fails() {
    match transpile("x = = 1") {
        Err(TranspileError::Parse(err)) => {
            assert_eq!(err.token.kind, TokenKind::Assign);
            assert_eq!(err.token.span, Span::new(4, 1));
            assert_eq!(err.to_string(), "expected expression, found ASSIGN '='");
        }
        result => panic!("expected parse error, found {:?}", result),
    }
}

#[test]
fn test_unknown_character_fails() {
    match transpile("x = 1 @ 2") {
        Err(TranspileError::Lex(err)) => {
            assert_eq!(
                err,
                LexError::UnexpectedChar {
                    ch: '@',
                    span: Span::new(6, 1),
                }
            );
        }
        result => panic!("expected lexical error, found {:?}", result),
    }
}

#[test]
fn test_lex_error_wins_over_parse_error() {
    // Malformed syntax before the bad character is never parsed.
    let err = transpile("x = = 1\n@").unwrap_err();
    assert!(matches!(err, TranspileError::Lex(_)));
}

#[test]
fn test_literal_form_preserved() {
    assert_eq!(
        transpile("a = 3\nb = 3.0\nc = 3.\nd = 0.125").unwrap(),
        "let a = 3;\nlet b = 3.0;\nlet c = 3.0;\nlet d = 0.125;\n"
    );
}

#[test]
fn test_logical_operators_remapped() {
    assert_eq!(
        transpile("r = a and b or c == d != e").unwrap(),
        "let r = ((((a && b) || c) == d) != e);\n"
    );
    assert_eq!(
        transpile("r = a + b - c * d / e % f <= g >= h < i > j").unwrap(),
        "let r = (((((((((a + b) - c) * d) / e) % f) <= g) >= h) < i) > j);\n"
    );
}

#[test]
fn test_flat_precedence() {
    assert_eq!(transpile("r = a + b * c").unwrap(), "let r = ((a + b) * c);\n");
    assert_eq!(transpile("r = a + (b * c)").unwrap(), "let r = (a + (b * c));\n");
}

#[test]
fn test_blank_lines_ignored() {
    let dense = "x = 1\nfor i in xs:\nx += i\nend\nprint(x)";
    let sparse = "\n\nx = 1\n\n\nfor i in xs:\n\n    x += i\n\nend\n\n\nprint(x)\n\n";

    assert_eq!(transpile(dense).unwrap(), transpile(sparse).unwrap());
}

#[test]
fn test_nested_assignment_form() {
    assert_eq!(
        transpile("def f():\n    x = 1\nend\nx = 1").unwrap(),
        "function f() {\n    x = 1;\n}\nlet x = 1;\n"
    );
    assert_eq!(
        transpile("while x:\n    y = 0\nend").unwrap(),
        "while (x) {\n    y = 0;\n}\n"
    );
}

#[test]
fn test_function_name_not_redeclared() {
    assert_eq!(
        transpile("def f(): return 1 end\nf = 2").unwrap(),
        "function f() {\n    return 1;\n}\nf = 2;\n"
    );
}

#[test]
fn test_deep_nesting_indents() {
    let source = "\
def walk(grid):
    for row in grid:
        for cell in row:
            if cell:
                visit(cell)
            end
        end
    end
    return
end
";
    let expected = "\
function walk(grid) {
    for (let row of grid) {
        for (let cell of row) {
            if (cell) {
                visit(cell);
            }
        }
    }
    return null;
}
";
    assert_eq!(transpile(source).unwrap(), expected);
}

#[test]
fn test_reserved_words_renamed() {
    assert_eq!(
        transpile("new = this(1)\nprint(new)").unwrap(),
        "let new_ = this_(1);\nprint(new_);\n"
    );
}

#[test]
fn test_renamed_names_stay_distinct() {
    assert_eq!(
        transpile("new = 1\nnew_ = 2\nnew = new_").unwrap(),
        "let new_ = 1;\nlet new__ = 2;\nnew_ = new__;\n"
    );
}

#[test]
fn test_function_after_variable_assigns() {
    assert_eq!(
        transpile("x = 1\ndef x(): return 1 end\nprint(x())").unwrap(),
        "let x = 1;\nx = function x() {\n    return 1;\n};\nprint(x());\n"
    );
}

#[test]
fn test_comments_dropped() {
    assert_eq!(
        transpile("# header\nx = 1 # trailing\n").unwrap(),
        "let x = 1;\n"
    );
}

#[test]
fn test_empty_source() {
    assert_eq!(transpile("").unwrap(), "");
    assert_eq!(transpile("\n\n# nothing\n").unwrap(), "");
}

#[test]
fn test_error_report() {
    let source = "x = 1\ny = = 2\n";
    let err = transpile(source).unwrap_err();

    assert_eq!(
        err.report(source),
        "parse error: expected expression, found ASSIGN '='\n --> 2:5\n  |\n  | y = = 2\n  |     ^"
    );
}

#[test]
fn test_stages_compose() {
    let source = "def sq(n): return n * n end\nprint(sq(4))";

    let tokens = tokenize(source).unwrap();
    let program = parse(&tokens).unwrap();
    assert_eq!(program.len(), 2);
    assert_eq!(generate(&program), transpile(source).unwrap());
}
