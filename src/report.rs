//! Build-error report formatting.
//!
//! [`build_report`] is a pure transform from a loosely-structured failure
//! record into an ordered list of console blocks; [`render`] hands those
//! blocks to a [`Ui`]. Delivery policy (inline vs dump file) lives on
//! [`Ui::write_error`], not here, so the transform stays testable without
//! touching the filesystem.
//!
//! Field conventions follow what build pipelines actually emit: everything
//! is optional, `filename` aliases `file`, and line/column arrive as strings.
//! Empty strings are treated the same as absent fields.

use serde::Deserialize;

use crate::LINE_SEP;
use crate::level::WriteLevel;
use crate::ui::Ui;

/// A failure record handed in from an upstream tool.
///
/// Deserializes from the JSON shape build pipelines attach to failed nodes.
/// The reporter never mutates it; construct at the failure site, report,
/// discard.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ErrorInput {
    pub message: Option<String>,
    pub stack: Option<String>,
    pub file: Option<String>,
    /// Alias of `file` used by some minifiers.
    pub filename: Option<String>,
    pub line: Option<String>,
    pub col: Option<String>,
    /// Suppresses console output for this failure; the report is still
    /// computed so the caller can decide about persistence.
    pub is_silent_error: bool,
    pub build_payload: Option<BuildPayload>,
}

/// Diagnostic data attached to a failed build-pipeline node.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildPayload {
    pub build_node: Option<BuildNode>,
    pub error: Option<PayloadError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildNode {
    pub node_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PayloadError {
    pub error_type: Option<String>,
    /// Formatted source excerpt highlighting the error location.
    pub code_frame: Option<String>,
    pub message: Option<String>,
}

impl ErrorInput {
    /// Parse a failure record from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The file this failure points at, honoring the `filename` alias.
    pub fn location_file(&self) -> Option<&str> {
        non_empty(&self.file).or_else(|| non_empty(&self.filename))
    }
}

/// The derived report: error-sink blocks in emission order, plus the stack
/// destined for debug output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub error_blocks: Vec<String>,
    pub stack: Option<String>,
    pub silent: bool,
}

impl Report {
    /// Full unstyled text, as persisted to a dump file or re-emitted in
    /// unattended mode. Each error block is followed by a doubled line
    /// separator; the stack by a single one.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for block in &self.error_blocks {
            out.push_str(block);
            out.push_str(LINE_SEP);
            out.push_str(LINE_SEP);
        }
        if let Some(stack) = &self.stack {
            out.push_str(stack);
            out.push_str(LINE_SEP);
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.error_blocks.is_empty() && self.stack.is_none()
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Appends `:line` and, only when a line is present, `:col`. A column
/// without a line is dropped entirely.
fn push_location_suffix(title: &mut String, input: &ErrorInput) {
    if let Some(line) = non_empty(&input.line) {
        title.push(':');
        title.push_str(line);
        if let Some(col) = non_empty(&input.col) {
            title.push(':');
            title.push_str(col);
        }
    }
}

/// Pure transform from a failure record to its report. Idempotent: the same
/// input always yields the same report.
pub fn build_report(input: &ErrorInput) -> Report {
    let mut blocks = Vec::new();

    if let Some(payload) = &input.build_payload {
        let payload_error = payload.error.as_ref();

        let mut title = String::new();
        if let Some(error_type) = payload_error.and_then(|e| non_empty(&e.error_type)) {
            title.push_str(error_type);
        }
        if let Some(node_name) = payload
            .build_node
            .as_ref()
            .and_then(|n| non_empty(&n.node_name))
        {
            if !title.is_empty() {
                title.push(' ');
            }
            title.push('(');
            title.push_str(node_name);
            title.push(')');
        }
        if let Some(file) = input.location_file() {
            title.push_str(" in ");
            title.push_str(file);
            push_location_suffix(&mut title, input);
        }
        if !title.is_empty() {
            blocks.push(title);
        }

        if let Some(code_frame) = payload_error.and_then(|e| non_empty(&e.code_frame)) {
            if let Some(message) = payload_error.and_then(|e| non_empty(&e.message)) {
                if message != code_frame {
                    blocks.push(message.to_string());
                }
            }
            blocks.push(code_frame.to_string());
        } else {
            blocks.push("Error".to_string());
        }
    } else if let Some(file) = input.location_file() {
        let mut title = format!("File: {file}");
        push_location_suffix(&mut title, input);
        blocks.push(title);
        blocks.push("Error".to_string());
    } else if let Some(message) = non_empty(&input.message) {
        blocks.push(message.to_string());
    }

    Report {
        error_blocks: blocks,
        stack: non_empty(&input.stack).map(str::to_string),
        silent: input.is_silent_error,
    }
}

/// Formats the failure and emits it through the writer.
///
/// Error blocks go red to the error sink, each followed by a doubled line
/// separator. The stack goes to the normal sink at `Debug` with a single
/// separator, so it only shows up under verbose runs. Silent failures skip
/// the error sink entirely but still return the report text.
///
/// Returns `None` only for an absent input; otherwise the accumulated
/// unstyled report text.
pub fn render(ui: &mut Ui, input: Option<&ErrorInput>) -> Option<String> {
    let input = input?;
    let report = build_report(input);

    if !report.silent {
        for block in &report.error_blocks {
            let styled = console::style(block.as_str()).red();
            ui.write(&format!("{styled}{LINE_SEP}{LINE_SEP}"), WriteLevel::Error);
        }
    }
    if let Some(stack) = &report.stack {
        let styled = console::style(stack.as_str()).red();
        ui.write(&format!("{styled}{LINE_SEP}"), WriteLevel::Debug);
    }

    Some(report.text())
}
