//! Summary output sinks
//!
//! Line-oriented fan-out used by the runner for final summarization. Sinks
//! are configured once at session start; an unopenable file path falls back
//! to stderr with a surfaced warning.

use std::fs::File;
use std::io::Write;
use std::sync::Mutex;

use tracing::warn;


/// A single output target
#[derive(Debug)]
enum Sink {
    Stdout,
    Stderr,
    File(Mutex<File>),
}

/// Ordered list of output sinks written to in lockstep
#[derive(Debug)]
pub struct SummaryWriter {
    sinks: Vec<Sink>,
}

impl Default for SummaryWriter {
    fn default() -> Self {
        SummaryWriter {
            sinks: vec![Sink::Stdout],
        }
    }
}

impl SummaryWriter {
    /// Build a writer from symbolic targets (`stdout`, `stderr`) or file
    /// paths
    ///
    /// With no targets configured the default is stdout only. Open
    /// failures are recovered by falling back to stderr.
    pub fn from_targets(targets: &[String]) -> SummaryWriter {
        if targets.is_empty() {
            return SummaryWriter::default();
        }

        let mut sinks = Vec::with_capacity(targets.len());
        for target in targets {
            let sink = match target.as_str() {
                "stdout" => Sink::Stdout,
                "stderr" => Sink::Stderr,
                path => match File::create(path) {
                    Ok(file) => Sink::File(Mutex::new(file)),
                    Err(err) => {
                        warn!(path, %err, "could not open log file for writing, falling back to stderr");
                        Sink::Stderr
                    }
                },
            };
            sinks.push(sink);
        }

        SummaryWriter { sinks }
    }

    /// Write one line to every sink, flushing each
    pub fn writeln(&self, line: &str) {
        for sink in &self.sinks {
            match sink {
                Sink::Stdout => {
                    let stdout = std::io::stdout();
                    let mut handle = stdout.lock();
                    writeln!(handle, "{}", line).ok();
                    handle.flush().ok();
                }
                Sink::Stderr => {
                    let stderr = std::io::stderr();
                    let mut handle = stderr.lock();
                    writeln!(handle, "{}", line).ok();
                    handle.flush().ok();
                }
                Sink::File(file) => {
                    let mut file = file.lock().unwrap();
                    writeln!(file, "{}", line).ok();
                    file.flush().ok();
                }
            }
        }
    }

    /// Number of configured sinks
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}
