//! 端到端测试：源码 -> 词法分析 -> 诊断 -> 文本输出

use pretty_assertions::assert_eq;
use sable_diagnostics::{ColorMode, Diagnostic, DiagnosticSink, Span};
use sable_driver::{DriverConfig, OutputFormat, Session};

fn plain_session() -> Session {
    Session::new(DriverConfig {
        color: ColorMode::Never,
        format: OutputFormat::Plain,
    })
}

fn render(session: &Session, sink: &DiagnosticSink) -> String {
    let mut out = Vec::new();
    session.emit(sink, &mut out, false).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn unknown_character_end_to_end() {
    let mut session = plain_session();
    let id = session.add_source("\nsasd\nint a = 123; @\n", "main.sable");

    let sink = session.check(id).unwrap();
    assert!(sink.has_errors());

    let expected = "\
Error: Unknown character: `@`
 --> main.sable:3:14
3 | int a = 123; @
  |              ^
 --> main.sable:3:14
3 | int a = 123; @
  |              ^
  = This character is not recognized.

Error: aborting due to previous error
";
    assert_eq!(render(&session, &sink), expected);
}

#[test]
fn diagnostic_prints_only_its_own_line() {
    let mut session = plain_session();
    let id = session.add_source("first\nsecond\nthird\n", "lines.sable");

    let diag = Diagnostic::warning()
        .with_message("look here")
        .with_code(Span::new(id, 6, 12));

    let expected = "\
Warning: look here
 --> lines.sable:2:1
2 | second
  | ^~~~~~

Warning: 1 warning emitted
";
    let text = render(&session, &DiagnosticSink::from_iter([diag]));
    assert_eq!(text, expected);
    assert!(!text.contains("first"));
    assert!(!text.contains("third"));
}

#[test]
fn clean_source_produces_no_output() {
    let mut session = plain_session();
    let id = session.add_source("x = 1.5 * y;\n", "clean.sable");

    let sink = session.check(id).unwrap();
    assert!(sink.is_empty());
    assert_eq!(render(&session, &sink), "");
}

#[test]
fn errors_across_files() {
    let mut session = plain_session();
    session.add_source("a = @;\n", "a.sable");
    session.add_source("b = 99999999999999999999;\n", "b.sable");

    let sink = session.check_all();
    let text = render(&session, &sink);

    assert!(text.contains(" --> a.sable:1:5"));
    assert!(text.contains("Error: Invalid integer literal: `99999999999999999999`"));
    assert!(text.contains(" --> b.sable:1:5"));
    assert!(text.ends_with("Error: aborting due to 2 previous errors\n"));
}

#[test]
fn fancy_format_renders_source() {
    let mut session = Session::new(DriverConfig {
        color: ColorMode::Never,
        format: OutputFormat::Fancy,
    });
    let id = session.add_source("int a = 123; @\n", "main.sable");

    let sink = session.check(id).unwrap();
    let text = render(&session, &sink);

    assert!(text.contains("Unknown character: `@`"));
    assert!(text.contains("main.sable"));
    assert!(text.ends_with("Error: aborting due to previous error\n"));
}

#[test]
fn tokens_cover_lexemes() {
    let mut session = plain_session();
    let text = "alpha, 42; 3.25 - beta";
    let id = session.add_source(text, "tokens.sable");

    for token in session.tokens(id).unwrap() {
        assert_eq!(&text[token.location.range()], token.lexeme);
    }
}

#[test]
fn unreadable_file_is_reported_as_diagnostic() {
    let mut session = plain_session();
    let error = session
        .add_file(std::path::Path::new("no/such/dir/missing.sable"))
        .unwrap_err();

    let sink = DiagnosticSink::from_iter([error.to_diagnostic()]);
    let text = render(&session, &sink);

    assert!(text.starts_with("Error: cannot read 'no/such/dir/missing.sable': "));
    assert!(!text.contains(" --> "));
    assert!(text.ends_with("\n\nError: aborting due to previous error\n"));
}
