//! The unified console writer.
//!
//! [`Ui`] gives a command-line tool one mechanism for producing output and
//! requesting input: leveled writes routed to a normal or error sink, styled
//! convenience lines, a progress spinner that is suspended around every
//! write so animation never garbles real output, and error-report delivery
//! with CI-aware persistence.

use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use sha2::{Digest, Sha256};

use crate::LINE_SEP;
use crate::config::UiConfig;
use crate::level::{InvalidLevelError, WriteLevel};
use crate::report::{self, ErrorInput};
use crate::sink::{Recorder, RecordingSink, Sink, StreamSink};

/// Errors surfaced by the writer itself.
#[derive(thiserror::Error, Debug)]
pub enum UiError {
    #[error(transparent)]
    InvalidLevel(#[from] InvalidLevelError),

    #[error("failed to persist error report: {0}")]
    Io(#[from] io::Error),
}

/// Deterministic dump location for a report: identical reports share a path,
/// which doubles as dedup.
pub fn dump_path_for(report: &str) -> PathBuf {
    let digest = Sha256::digest(report.as_bytes());
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        hex.push_str(&format!("{byte:02x}"));
    }
    std::env::temp_dir().join(format!("error.dump.{hex}.log"))
}

pub struct Ui {
    level: WriteLevel,
    output: Box<dyn Sink>,
    errors: Box<dyn Sink>,
    input: Box<dyn BufRead + Send>,
    spinner: Option<ProgressBar>,
    ci: bool,
}

impl Ui {
    /// Construct a writer with injected sinks and input source. Sinks are
    /// fixed for the writer's lifetime; the minimum level is not.
    pub fn new(
        output: Box<dyn Sink>,
        errors: Box<dyn Sink>,
        input: Box<dyn BufRead + Send>,
        level: WriteLevel,
        ci: bool,
    ) -> Self {
        Self {
            level,
            output,
            errors,
            input,
            spinner: None,
            ci,
        }
    }

    /// Writer over the process streams, configured per [`UiConfig`].
    pub fn from_config(config: &UiConfig) -> Self {
        if !config.color {
            console::set_colors_enabled(false);
        }
        Self::new(
            Box::new(StreamSink::new(io::stdout())),
            Box::new(StreamSink::new(io::stderr())),
            Box::new(io::BufReader::new(io::stdin())),
            config.write_level,
            config.ci,
        )
    }

    /// Writer backed by in-memory sinks, for tests. Returns the recorders
    /// for the normal and error sinks, in that order.
    pub fn recording() -> (Self, Recorder, Recorder) {
        let (output, output_recorder) = RecordingSink::with_recorder();
        let (errors, error_recorder) = RecordingSink::with_recorder();
        let ui = Self::new(
            Box::new(output),
            Box::new(errors),
            Box::new(io::Cursor::new(Vec::new())),
            WriteLevel::Info,
            false,
        );
        (ui, output_recorder, error_recorder)
    }

    /// Whether a write at `level` would currently reach the normal sink.
    pub fn level_visible(&self, level: WriteLevel) -> bool {
        level >= self.level
    }

    /// Route `text` by level: `Error` always reaches the error sink,
    /// anything else reaches the normal sink only at or above the configured
    /// minimum, and is dropped silently otherwise. One synchronous handoff
    /// per call, no buffering here.
    pub fn write(&mut self, text: &str, level: WriteLevel) {
        if level == WriteLevel::Error {
            self.errors.write(text);
        } else if self.level_visible(level) {
            self.write_output(text);
        } else {
            tracing::trace!(level = level.as_str(), "write below threshold, dropped");
        }
    }

    /// String-driven variant of [`write`](Self::write) for callers that
    /// carry levels as names. A missing name means `INFO`; an unrecognized
    /// one is fail-closed: the line is hidden, never a panic.
    pub fn write_labeled(&mut self, text: &str, level_name: &str) {
        if level_name.is_empty() {
            return self.write(text, WriteLevel::Info);
        }
        match WriteLevel::from_name(level_name) {
            Some(level) => self.write(text, level),
            None => tracing::trace!(level = level_name, "unrecognized write level, hidden"),
        }
    }

    /// [`write`](Self::write) with the platform line separator appended.
    pub fn write_line(&mut self, text: &str, level: WriteLevel) {
        self.write(&format!("{text}{LINE_SEP}"), level);
    }

    /// Update the minimum level from its canonical name. Unknown names fail
    /// with [`InvalidLevelError`] and leave the prior level intact.
    pub fn set_level(&mut self, name: &str) -> Result<(), InvalidLevelError> {
        self.level = name.parse()?;
        Ok(())
    }

    /// Gray debug line.
    pub fn write_debug_line(&mut self, text: &str) {
        let styled = console::style(text).black().bright();
        self.write_line(&styled.to_string(), WriteLevel::Debug);
    }

    /// Cyan info line.
    pub fn write_info_line(&mut self, text: &str) {
        let styled = console::style(text).cyan();
        self.write_line(&styled.to_string(), WriteLevel::Info);
    }

    /// Yellow warning line, prefixed `WARNING: ` unless `prepend` is false.
    /// Nothing is emitted when `skip` is true.
    pub fn write_warn_line(&mut self, text: &str, skip: bool, prepend: bool) {
        if skip {
            return;
        }
        let text = self.prepend_line("WARNING", text, prepend);
        let styled = console::style(text.as_str()).yellow();
        self.write_line(&styled.to_string(), WriteLevel::Warning);
    }

    /// Deprecation notice: tags the text `DEPRECATION: ` per `prepend`, then
    /// defers to [`write_warn_line`](Self::write_warn_line)'s skip handling.
    pub fn write_deprecate_line(&mut self, text: &str, skip: bool, prepend: bool) {
        let text = self.prepend_line("DEPRECATION", text, prepend);
        self.write_warn_line(&text, skip, false);
    }

    /// `"{tag}: {text}"` when `prepend`, `text` unchanged otherwise.
    pub fn prepend_line(&self, tag: &str, text: &str, prepend: bool) -> String {
        if prepend {
            format!("{tag}: {text}")
        } else {
            text.to_string()
        }
    }

    /// Start the progress spinner with `message`. Gated on `INFO`
    /// visibility. In CI mode there is no animation to garble a log, so the
    /// message is written as a plain line instead.
    pub fn start_progress(&mut self, message: &str) {
        if !self.level_visible(WriteLevel::Info) {
            return;
        }
        if self.ci {
            self.write_line(message, WriteLevel::Info);
            return;
        }
        let spinner = self.spinner.get_or_insert_with(|| {
            let bar = ProgressBar::new_spinner();
            let style = ProgressStyle::with_template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner());
            bar.set_style(style);
            bar
        });
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
    }

    /// Stop and clear the spinner. No-op in CI mode or when nothing is
    /// spinning.
    pub fn stop_progress(&mut self) {
        if self.ci {
            return;
        }
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// Run `f` with the spinner suspended, for callers that write to the
    /// terminal behind the writer's back (child processes, wrapped loggers).
    pub fn with_progress_paused<T>(&self, f: impl FnOnce() -> T) -> T {
        match &self.spinner {
            Some(spinner) => spinner.suspend(f),
            None => f(),
        }
    }

    /// Pass-through prompt: writes the question to the normal sink and reads
    /// one line from the input source, without the trailing newline. The
    /// question/answer engine itself is the caller's concern.
    pub fn prompt(&mut self, question: &str) -> io::Result<String> {
        self.write(question, WriteLevel::Info);
        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        while answer.ends_with('\n') || answer.ends_with('\r') {
            answer.pop();
        }
        Ok(answer)
    }

    /// Report a failure and deliver the result.
    ///
    /// The formatted blocks stream to the error sink (see
    /// [`report::render`]); then, for non-silent reports with content:
    /// unattended runs get the full report re-emitted at `ERROR` level for
    /// automation to capture, interactive runs get the report persisted to a
    /// content-addressed dump file with only the path printed, keeping the
    /// terminal uncluttered. The dump write is a single best-effort attempt;
    /// its failure fails this call only.
    ///
    /// Returns the report text, or `None` when there was nothing to report.
    pub fn write_error(
        &mut self,
        input: Option<&ErrorInput>,
        unattended: bool,
    ) -> Result<Option<String>, UiError> {
        let Some(report) = report::render(self, input) else {
            return Ok(None);
        };
        let silent = input.is_some_and(|e| e.is_silent_error);
        if !silent && !report.is_empty() {
            if unattended {
                self.write_line(&report, WriteLevel::Error);
            } else {
                let path = dump_path_for(&report);
                fs::write(&path, &report)?;
                tracing::debug!(path = %path.display(), "error report persisted");
                let pointer =
                    format!("{LINE_SEP}Stack Trace and Error Report: {}", path.display());
                let styled = console::style(pointer.as_str()).red();
                self.write_line(&styled.to_string(), WriteLevel::Error);
            }
        }
        Ok(Some(report))
    }

    fn write_output(&mut self, text: &str) {
        // The spinner redraws on its own thread; suspend it for the handoff
        // so frames and output never interleave.
        match self.spinner.clone() {
            Some(spinner) => spinner.suspend(|| self.output.write(text)),
            None => self.output.write(text),
        }
    }
}

impl std::fmt::Debug for Ui {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ui")
            .field("level", &self.level)
            .field("ci", &self.ci)
            .field("spinning", &self.spinner.is_some())
            .finish_non_exhaustive()
    }
}
