use std::path::Path;

use crate::pipeline::FileStatus;

use super::runner::BatchOutcome;

/// Side channel for progress reporting. Never affects what a batch does.
pub trait BatchObserver {
    /// Called once with the number of files about to be processed.
    fn started(&mut self, _files: usize) {}

    /// Called after each file, in processing order.
    fn processed(&mut self, _path: &Path, _status: FileStatus) {}

    /// Called once the scan and any resolution pass are over.
    fn finished(&mut self, _outcome: &BatchOutcome) {}
}

/// Observer that ignores everything.
pub struct NoProgress;

impl BatchObserver for NoProgress {}
