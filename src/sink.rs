//! Text sinks the writer routes output into.
//!
//! A sink is a single synchronous handoff per call; buffering and flushing
//! policy belong to whatever sits behind it. Two adapters are provided:
//! [`StreamSink`] over any `io::Write` (stdout, stderr, a file), and
//! [`RecordingSink`] which captures everything in memory so tests can assert
//! on exactly what the writer emitted. Selection happens by constructor
//! injection on [`crate::Ui`], never by subclassing.

use std::io::Write;
use std::sync::{Arc, Mutex};

/// Consumer of raw text chunks.
pub trait Sink: Send {
    fn write(&mut self, text: &str);
}

/// Adapter over a real output stream.
///
/// Writes are fire-and-forget: a failing stream (closed pipe, full disk)
/// must not take the writer down with it, so errors are logged at trace
/// level and dropped.
pub struct StreamSink {
    inner: Box<dyn Write + Send>,
}

impl StreamSink {
    pub fn new(stream: impl Write + Send + 'static) -> Self {
        Self {
            inner: Box::new(stream),
        }
    }
}

impl Sink for StreamSink {
    fn write(&mut self, text: &str) {
        let result = self
            .inner
            .write_all(text.as_bytes())
            .and_then(|()| self.inner.flush());
        if let Err(e) = result {
            tracing::trace!("stream sink write failed: {e}");
        }
    }
}

/// Cloneable handle onto the text captured by a [`RecordingSink`].
#[derive(Clone, Debug, Default)]
pub struct Recorder(Arc<Mutex<String>>);

impl Recorder {
    /// Snapshot of everything written so far.
    pub fn contents(&self) -> String {
        self.0.lock().unwrap().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().unwrap().is_empty()
    }

    /// Discard captured output, e.g. between test phases.
    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

/// In-memory recording adapter for tests.
#[derive(Default)]
pub struct RecordingSink {
    buffer: Recorder,
}

impl RecordingSink {
    /// Create a sink together with the handle that reads it back, so the
    /// handle stays usable after the sink moves into a `Ui`.
    pub fn with_recorder() -> (Self, Recorder) {
        let buffer = Recorder::default();
        (
            Self {
                buffer: buffer.clone(),
            },
            buffer,
        )
    }
}

impl Sink for RecordingSink {
    fn write(&mut self, text: &str) {
        self.buffer.0.lock().unwrap().push_str(text);
    }
}
