//! `tracing` subscriber that writes to the browser console.
//!
//! The fmt layer formats each event into a [`ConsoleWriter`]; when the
//! writer is dropped the buffered line goes to the `console` method matching
//! the event's level.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;

/// Default filter directive when none (or an invalid one) is given.
pub const DEFAULT_DIRECTIVE: &str = "info";

/// Buffers one formatted event and emits it on drop.
#[derive(Debug)]
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self {
            level,
            buffer: Vec::new(),
        }
    }

    /// The buffered text without the trailing newline, or None if empty.
    fn take_line(&mut self) -> Option<String> {
        let bytes = std::mem::take(&mut self.buffer);
        let line = String::from_utf8_lossy(&bytes);
        let line = line.trim_end_matches(['\n', '\r']);
        if line.is_empty() {
            None
        } else {
            Some(line.to_owned())
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if let Some(line) = self.take_line() {
            emit(self.level, &line);
        }
    }
}

fn emit(level: Level, line: &str) {
    let message = JsValue::from_str(line);
    match level {
        Level::ERROR => web_sys::console::error_1(&message),
        Level::WARN => web_sys::console::warn_1(&message),
        Level::INFO => web_sys::console::info_1(&message),
        Level::DEBUG => web_sys::console::debug_1(&message),
        _ => web_sys::console::log_1(&message),
    }
}

/// [`MakeWriter`] that routes events to the console by level.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Parse a filter directive, falling back to [`DEFAULT_DIRECTIVE`].
pub fn filter_for(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install the console subscriber. Later calls are ignored.
pub fn init(directive: &str) {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter_for(directive))
        .with_writer(ConsoleMakeWriter)
        .with_ansi(false)
        .without_time()
        .with_target(true)
        .try_init();
    if installed.is_ok() {
        tracing::debug!(directive, "console logging installed");
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_take_line_strips_newline() {
        let mut writer = ConsoleWriter::new(Level::INFO);
        writer.write_all(b" INFO tree_visualizer_wasm: tree rendered\n").unwrap();
        assert_eq!(
            writer.take_line().as_deref(),
            Some(" INFO tree_visualizer_wasm: tree rendered")
        );
        // Nothing left, so dropping emits nothing
        assert_eq!(writer.take_line(), None);
    }

    #[test]
    fn test_default_writer_is_info() {
        let make = ConsoleMakeWriter;
        let writer = make.make_writer();
        assert_eq!(writer.level, Level::INFO);
        assert!(writer.buffer.is_empty());
    }

    #[test]
    fn test_filter_fallback() {
        use tracing::level_filters::LevelFilter;

        assert_eq!(filter_for("warn").max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(
            filter_for("tree_visualizer_wasm=loudest").max_level_hint(),
            Some(LevelFilter::INFO)
        );
    }
}
