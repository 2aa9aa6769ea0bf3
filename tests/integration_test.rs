// Integration tests for the parser, printer and analyzer

use deadstore::analyzer::{find_unused_assignments, Analyzer};
use deadstore::parser::ast::*;
use deadstore::parser::{parse_program, ParseError, Parser, ParserConfig};
use deadstore::printer::Printer;
use pretty_assertions::assert_eq;

fn unused(source: &str) -> Vec<String> {
    let program = parse_program(source).expect("Parsing failed");
    find_unused_assignments(&program)
        .iter()
        .map(|a| a.to_string())
        .collect()
}

fn assign(target: char, value: Expression) -> Assignment {
    Assignment::new(Variable::new(target), value)
}

#[test]
fn test_overwritten_and_unread_writes() {
    assert_eq!(unused("a = 1\na = 2"), vec!["a = 1", "a = 2"]);
}

#[test]
fn test_read_write_is_used() {
    assert_eq!(unused("a = 1\nb = a"), vec!["b = a"]);
}

#[test]
fn test_loop_back_edge_is_conservative() {
    let source = r#"
        a = 1
        while a
            a = 2
        end
    "#;

    let program = parse_program(source).expect("Parsing failed");
    let result = Analyzer::new().find_unused_assignments(&program);

    // `a = 1` is read by the condition; `a = 2` is never read in a single
    // forward scan but the next iteration's condition would read it.
    assert!(!result.contains(&assign('a', Expression::constant("1"))));
    assert!(!result.contains(&assign('a', Expression::constant("2"))));
    assert!(result.is_empty());
}

#[test]
fn test_full_program() {
    let source = r#"
        n = 5
        f = 1
        g = 0
        while n > 0
            f = f * n
            n = n - 1
            g = f
        end
        if f > 100
            r = f
        end
        f = 0
    "#;

    // `g` is only ever written. Leftovers come out in the order they were written.
    assert_eq!(unused(source), vec!["g = 0", "g = f", "r = f", "f = 0"]);
}

#[test]
fn test_rejects_unknown_operator() {
    assert!(parse_program("a = b ^ c").is_err());
    assert!(parse_program("a = b % 2\nc = a").is_err());
}

#[test]
fn test_rejects_missing_end() {
    let err = parse_program("if a\n  b = 1\n").unwrap_err();
    assert!(matches!(
        err,
        ParseError::UnterminatedBlock { keyword: "if", .. }
    ));

    let err = parse_program("while a\n  b = 1\n").unwrap_err();
    assert!(matches!(
        err,
        ParseError::UnterminatedBlock {
            keyword: "while",
            ..
        }
    ));
}

#[test]
fn test_rejects_malformed_atoms() {
    for source in ["a = @", "a = B", "A = 1", "a = 1.5", "a = -1"] {
        assert!(parse_program(source).is_err(), "accepted {source:?}");
    }
}

#[test]
fn test_error_location() {
    let err = parse_program("a = 1\nb = 2\nc = $").unwrap_err();
    assert_eq!(err.location(), SourceLocation::new(3, 5));
    assert_eq!(
        err.to_string(),
        "Parse error at line 3, column 5: unexpected '$', expected expression"
    );
}

#[test]
fn test_trailing_input_config() {
    let source = "a = 1\nb = a\n}}}";
    assert!(parse_program(source).is_err());

    let config = ParserConfig {
        allow_trailing_input: true,
    };
    let program = Parser::with_config(source, config)
        .parse_program()
        .expect("Parsing failed");
    assert_eq!(program.as_slice().len(), 2);
}

#[test]
fn test_constants_preserve_digits() {
    let program = parse_program("x = 007 + 0\ny = 1200").expect("Parsing failed");
    assert_eq!(
        program.head(),
        &Statement::Assignment(assign(
            'x',
            Expression::operation(
                Expression::constant("007"),
                Operator::Add,
                Expression::constant("0")
            )
        ))
    );
    assert_eq!(program.to_string(), "x = (007 + 0)\ny = 1200\n");
}

#[test]
fn test_round_trip_through_printer() {
    let sources = [
        "a = 1",
        "a = b - c - d\nb = a / 2 / 3",
        "while x < 10 if x > 5 y = (x + 1) * 2 end x = x + 1 end",
        "if a > b + c * d while a a = a - 1 end end z = 0100",
        "a = ((b))\nb = (a < b) > (c < d)",
    ];

    let printer = Printer::new().with_terminators(true);
    for source in sources {
        let program = parse_program(source).expect("Parsing failed");
        let printed = printer.print_program(&program);
        let reparsed = parse_program(&printed).expect("Printed program should parse");
        assert_eq!(program, reparsed, "round trip of {source:?} via {printed:?}");
    }
}

#[test]
fn test_programs_are_never_empty() {
    for source in ["a = 1", "if a b = 1 end", "while a b = 1 end c = 2"] {
        let program = parse_program(source).expect("Parsing failed");
        assert!(!program.as_slice().is_empty());
        let _head: &Statement = program.head();
    }
}

#[test]
fn test_long_program_does_not_overflow() {
    let source: String = (0..20_000)
        .map(|i| format!("{} = {}\n", (b'a' + (i % 26) as u8) as char, i))
        .collect();
    let program = parse_program(&source).expect("Parsing failed");
    assert_eq!(program.as_slice().len(), 20_000);

    let result = find_unused_assignments(&program);
    // Every assignment is overwritten or left unread
    assert_eq!(result.len(), 20_000);
    assert_eq!(Printer::new().lines(&program).len(), 20_000);
}

#[test]
fn test_long_operator_chain_does_not_overflow() {
    let chain = format!("a = x{}", " + 1".repeat(20_000));
    let source = format!("x = 0\n{chain}\nc = a * a{}\nb = c\n", " - a".repeat(20_000));
    let program = parse_program(&source).expect("Parsing failed");
    assert_eq!(program.as_slice().len(), 4);

    let result = find_unused_assignments(&program);
    let flagged: Vec<String> = result.iter().map(|a| a.to_string()).collect();
    assert_eq!(flagged, vec!["b = c"]);

    let printed = Printer::new().print_program(&program);
    assert_eq!(printed.matches('(').count(), 40_001);
    assert!(printed.ends_with(" - a)\nb = c\n"));
}
