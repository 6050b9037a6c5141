//! Console Logging
//!
//! Routes `tracing` output to the browser console.

use std::io;

use tracing_subscriber::{
    Layer, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};
use wasm_bindgen::JsValue;

/// Buffers one formatted event and prints it when dropped
#[derive(Default)]
struct ConsoleWriter {
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buf);
        web_sys::console::log_1(&JsValue::from_str(line.trim_end()));
    }
}

/// Install the console subscriber; later calls are ignored
pub fn init() {
    // No wall clock in the fmt layer: `SystemTime` is unavailable on wasm32.
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(ConsoleWriter::default)
        .with_ansi(false)
        .without_time()
        .with_filter(LevelFilter::INFO);

    let _ = tracing_subscriber::registry().with(layer).try_init();
}
