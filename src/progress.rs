//! Progress notification for the pipeline stages.
//!
//! The core only ever talks to [`ProgressObserver`]; [`NoProgress`] keeps it
//! silent and [`ProgressBar`] draws a bar on stderr for the CLI.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};

/// A unit of work the pipeline reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Scanning pixel rows for distinct colors.
    Collect,
    /// Matching distinct colors against the palette slots.
    Match,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Collect => write!(f, "Compiling colors"),
            Stage::Match => write!(f, "Analyzing colors"),
        }
    }
}

/// Receives notifications while a stage runs. Stages may call `advance` from
/// several worker threads at once.
pub trait ProgressObserver: Sync {
    fn start(&self, _stage: Stage, _total: usize) {}
    fn advance(&self, _stage: Stage, _units: usize) {}
    fn finish(&self, _stage: Stage) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {}

const BAR_WIDTH: usize = 60;

/// Text progress bar drawn on stderr, redrawn only when the percentage moves.
#[derive(Debug, Default)]
pub struct ProgressBar {
    total: AtomicUsize,
    done: AtomicUsize,
    percent: AtomicUsize,
}

impl ProgressBar {
    pub fn new() -> Self {
        Self::default()
    }

    fn draw(&self, stage: Stage, percent: usize) {
        let line = render_bar(percent, BAR_WIDTH);
        let mut stderr = std::io::stderr().lock();
        // Drawing is best effort; a closed stderr must not abort the run.
        let _ = queue!(
            stderr,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(format!("\t{line} {stage}"))
        );
        let _ = stderr.flush();
    }
}

impl ProgressObserver for ProgressBar {
    fn start(&self, stage: Stage, total: usize) {
        self.total.store(total, Ordering::Relaxed);
        self.done.store(0, Ordering::Relaxed);
        self.percent.store(0, Ordering::Relaxed);
        self.draw(stage, 0);
    }

    fn advance(&self, stage: Stage, units: usize) {
        let total = self.total.load(Ordering::Relaxed).max(1);
        let done = self.done.fetch_add(units, Ordering::Relaxed) + units;
        let percent = (done.min(total) * 100) / total;
        if self.percent.fetch_max(percent, Ordering::Relaxed) < percent {
            self.draw(stage, percent);
        }
    }

    fn finish(&self, stage: Stage) {
        self.draw(stage, 100);
        eprintln!();
    }
}

/// `[####......]` with `length` cells between the brackets.
pub fn render_bar(percent: usize, length: usize) -> String {
    let filled = (percent.min(100) * length) / 100;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(length - filled))
}
