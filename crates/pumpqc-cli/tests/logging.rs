use std::io;
use std::sync::{Arc, Mutex};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

use pumpqc_cli::logging::{LogConfig, LogFormat, init_logging_with_writer};

/// Shared in-memory sink so the test can read back what the subscriber wrote.
#[derive(Clone, Default)]
struct CaptureWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CaptureWriter {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).into_owned()
    }
}

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CaptureWriter {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn custom_writer_receives_filtered_events() {
    let writer = CaptureWriter::default();
    let config = LogConfig {
        level_filter: LevelFilter::INFO,
        use_env_filter: false,
        format: LogFormat::Compact,
        log_file: None,
        with_ansi: false,
    };
    init_logging_with_writer(&config, writer.clone());

    tracing::info!(target: "pumpqc_cli", sheets = 2, "analysis finished");
    tracing::debug!(target: "pumpqc_cli", "per-row detail");

    let output = writer.contents();
    assert!(output.contains("analysis finished"));
    assert!(output.contains("sheets=2"));
    assert!(!output.contains("per-row detail"));
}
