//! Behavior tests for the build-error formatter, driven through a recording
//! writer so every byte reaching each sink is asserted exactly.

use consio::report::{self, BuildNode, BuildPayload, ErrorInput, PayloadError};
use consio::{LINE_SEP, Ui};

fn red(text: &str) -> String {
    console::style(text).red().to_string()
}

fn block(text: &str) -> String {
    format!("{}{LINE_SEP}{LINE_SEP}", red(text))
}

fn payload_with(
    node_name: Option<&str>,
    error_type: Option<&str>,
    code_frame: Option<&str>,
    message: Option<&str>,
) -> BuildPayload {
    BuildPayload {
        build_node: node_name.map(|n| BuildNode {
            node_name: Some(n.to_string()),
        }),
        error: Some(PayloadError {
            error_type: error_type.map(String::from),
            code_frame: code_frame.map(String::from),
            message: message.map(String::from),
        }),
    }
}

#[test]
fn no_error() {
    let (mut ui, output, errors) = Ui::recording();
    assert_eq!(report::render(&mut ui, None), None);
    assert!(output.is_empty());
    assert!(errors.is_empty());
}

#[test]
fn error_with_message() {
    let (mut ui, output, errors) = Ui::recording();
    let input = ErrorInput {
        message: Some("build error".into()),
        ..Default::default()
    };
    report::render(&mut ui, Some(&input));

    assert!(output.is_empty());
    assert_eq!(errors.contents(), block("build error"));
}

#[test]
fn error_with_stack() {
    let (mut ui, output, _errors) = Ui::recording();
    ui.set_level("DEBUG").unwrap();
    let input = ErrorInput {
        stack: Some("the stack".into()),
        ..Default::default()
    };
    report::render(&mut ui, Some(&input));

    assert_eq!(output.contents(), format!("{}{LINE_SEP}", red("the stack")));
}

#[test]
fn stack_is_hidden_below_debug() {
    let (mut ui, output, _errors) = Ui::recording();
    let input = ErrorInput {
        stack: Some("the stack".into()),
        ..Default::default()
    };
    report::render(&mut ui, Some(&input));

    assert!(output.is_empty());
}

#[test]
fn error_with_file() {
    let (mut ui, output, errors) = Ui::recording();
    let input = ErrorInput {
        file: Some("the file".into()),
        ..Default::default()
    };
    report::render(&mut ui, Some(&input));

    assert!(output.is_empty());
    assert_eq!(errors.contents(), block("File: the file") + &block("Error"));
}

#[test]
fn error_with_filename_alias() {
    let (mut ui, _output, errors) = Ui::recording();
    let input = ErrorInput {
        filename: Some("the file".into()),
        ..Default::default()
    };
    report::render(&mut ui, Some(&input));

    assert_eq!(errors.contents(), block("File: the file") + &block("Error"));
}

#[test]
fn error_with_file_and_line() {
    let (mut ui, _output, errors) = Ui::recording();
    let input = ErrorInput {
        file: Some("the file".into()),
        line: Some("the line".into()),
        ..Default::default()
    };
    report::render(&mut ui, Some(&input));

    assert_eq!(
        errors.contents(),
        block("File: the file:the line") + &block("Error")
    );
}

#[test]
fn error_with_file_and_col_drops_col() {
    let (mut ui, _output, errors) = Ui::recording();
    let input = ErrorInput {
        file: Some("the file".into()),
        col: Some("the col".into()),
        ..Default::default()
    };
    report::render(&mut ui, Some(&input));

    assert_eq!(errors.contents(), block("File: the file") + &block("Error"));
}

#[test]
fn error_with_file_line_and_col() {
    let (mut ui, _output, errors) = Ui::recording();
    let input = ErrorInput {
        file: Some("the file".into()),
        line: Some("the line".into()),
        col: Some("the col".into()),
        ..Default::default()
    };
    report::render(&mut ui, Some(&input));

    assert_eq!(
        errors.contents(),
        block("File: the file:the line:the col") + &block("Error")
    );
}

#[test]
fn title_combines_error_type_node_name_and_location() {
    let (mut ui, _output, errors) = Ui::recording();
    let input = ErrorInput {
        file: Some("index.js".into()),
        line: Some("10".into()),
        col: Some("15".into()),
        build_payload: Some(payload_with(Some("Babel"), Some("Compile Error"), None, None)),
        ..Default::default()
    };
    report::render(&mut ui, Some(&input));

    assert_eq!(
        errors.contents(),
        block("Compile Error (Babel) in index.js:10:15") + &block("Error")
    );
}

#[test]
fn title_with_error_type_and_node_name() {
    let (mut ui, _output, errors) = Ui::recording();
    let input = ErrorInput {
        build_payload: Some(payload_with(Some("Babel"), Some("Compile Error"), None, None)),
        ..Default::default()
    };
    report::render(&mut ui, Some(&input));

    assert_eq!(
        errors.contents(),
        block("Compile Error (Babel)") + &block("Error")
    );
}

#[test]
fn title_with_error_type_only() {
    let (mut ui, _output, errors) = Ui::recording();
    let input = ErrorInput {
        build_payload: Some(payload_with(None, Some("Compile Error"), None, None)),
        ..Default::default()
    };
    report::render(&mut ui, Some(&input));

    assert_eq!(errors.contents(), block("Compile Error") + &block("Error"));
}

#[test]
fn code_frame_replaces_fallback_body() {
    let (mut ui, _output, errors) = Ui::recording();
    let input = ErrorInput {
        build_payload: Some(payload_with(
            None,
            Some("Compile Error"),
            Some("codeFrame"),
            None,
        )),
        ..Default::default()
    };
    report::render(&mut ui, Some(&input));

    assert_eq!(errors.contents(), block("Compile Error") + &block("codeFrame"));
}

#[test]
fn code_frame_with_same_message_suppresses_duplicate() {
    let (mut ui, _output, errors) = Ui::recording();
    let input = ErrorInput {
        build_payload: Some(payload_with(
            None,
            Some("Compile Error"),
            Some("codeFrame"),
            Some("codeFrame"),
        )),
        ..Default::default()
    };
    report::render(&mut ui, Some(&input));

    assert_eq!(errors.contents(), block("Compile Error") + &block("codeFrame"));
}

#[test]
fn code_frame_with_different_message_emits_both() {
    let (mut ui, _output, errors) = Ui::recording();
    let input = ErrorInput {
        build_payload: Some(payload_with(
            None,
            Some("Compile Error"),
            Some("codeFrame"),
            Some("pipeline error message"),
        )),
        ..Default::default()
    };
    report::render(&mut ui, Some(&input));

    assert_eq!(
        errors.contents(),
        block("Compile Error") + &block("pipeline error message") + &block("codeFrame")
    );
}

#[test]
fn silent_error_returns_report_without_console_output() {
    let (mut ui, _output, errors) = Ui::recording();
    let input = ErrorInput {
        message: Some("quiet failure".into()),
        is_silent_error: true,
        ..Default::default()
    };
    let report = report::render(&mut ui, Some(&input)).unwrap();

    assert!(errors.is_empty());
    assert_eq!(report, format!("quiet failure{LINE_SEP}{LINE_SEP}"));
}

#[test]
fn render_is_idempotent() {
    let input = ErrorInput {
        file: Some("index.js".into()),
        line: Some("3".into()),
        stack: Some("trace".into()),
        ..Default::default()
    };

    let (mut ui, _output, errors) = Ui::recording();
    let first = report::render(&mut ui, Some(&input)).unwrap();
    let after_first = errors.contents();
    let second = report::render(&mut ui, Some(&input)).unwrap();

    assert_eq!(first, second);
    assert_eq!(errors.contents(), after_first.repeat(2));
}
