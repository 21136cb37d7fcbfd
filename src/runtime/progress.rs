use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use lrcput::batch::{BatchObserver, BatchOutcome};
use lrcput::pipeline::FileStatus;

/// Bar currently on screen, if any. Log lines are printed around it.
static ACTIVE: Mutex<Option<ProgressBar>> = Mutex::new(None);

fn set_active(bar: Option<ProgressBar>) {
    let mut slot = ACTIVE.lock().unwrap_or_else(|p| p.into_inner());
    *slot = bar;
}

fn active() -> Option<ProgressBar> {
    ACTIVE.lock().unwrap_or_else(|p| p.into_inner()).clone()
}

/// Stderr writer for the tracing subscriber that hides the live bar while a
/// log line is written, then redraws it.
pub struct LogWriter;

pub fn log_writer() -> LogWriter {
    LogWriter
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match active() {
            Some(bar) => bar.suspend(|| io::stderr().write_all(buf))?,
            None => io::stderr().write_all(buf)?,
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

/// Draws an indicatif bar over the files of a batch.
pub struct ProgressObserver {
    bar: Option<ProgressBar>,
    message: String,
    hidden: bool,
}

impl ProgressObserver {
    pub fn new(message: &str, hidden: bool) -> Self {
        Self {
            bar: None,
            message: message.to_string(),
            hidden,
        }
    }

    fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            set_active(None);
            bar.finish_and_clear();
        }
    }
}

fn create_progress_bar(len: u64, msg: &str, hidden: bool) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if hidden {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    } else if let Ok(style) = ProgressStyle::default_bar()
        .template("{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
    {
        pb.set_style(style.progress_chars("=> "));
    }
    pb.set_message(msg.to_string());
    pb
}

impl BatchObserver for ProgressObserver {
    fn started(&mut self, files: usize) {
        let bar = create_progress_bar(files as u64, &self.message, self.hidden);
        if !self.hidden {
            set_active(Some(bar.clone()));
        }
        self.bar = Some(bar);
    }

    // Failures are already reported by the pipeline's own log lines.
    fn processed(&mut self, _path: &Path, _status: FileStatus) {
        let done = match &self.bar {
            Some(bar) => {
                bar.inc(1);
                bar.length() == Some(bar.position())
            }
            None => return,
        };
        // Clear before any resolver prompt takes over the terminal.
        if done {
            self.clear();
        }
    }

    fn finished(&mut self, _outcome: &BatchOutcome) {
        self.clear();
    }
}
