pub mod config;
pub mod level;
pub mod logging;
pub mod report;
pub mod sink;
pub mod ui;

pub use config::UiConfig;
pub use level::{InvalidLevelError, WriteLevel};
pub use report::{BuildNode, BuildPayload, ErrorInput, PayloadError, Report};
pub use sink::{Recorder, RecordingSink, Sink, StreamSink};
pub use ui::{Ui, UiError, dump_path_for};

/// Platform line separator, appended by [`Ui::write_line`] and used between
/// report blocks.
#[cfg(windows)]
pub const LINE_SEP: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEP: &str = "\n";
