use std::fmt;
use std::path::PathBuf;

use crate::error::EmbedError;
use crate::resolver::ResolveRequest;

/// Where lyrics come from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LyricsMode {
    /// A companion `.lrc` next to the audio file.
    Local,
    /// The remote lookup service.
    Remote,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct EmbedOptions {
    /// Leave files that already carry lyrics alone.
    pub skip_existing: bool,
    /// Delete the companion lyric file once embedded (local mode only).
    pub reduce_lrc: bool,
}

/// How processing one file ended.
#[derive(Debug)]
pub enum Outcome {
    /// Not eligible in this mode (no companion file). Not counted anywhere.
    NotCandidate,
    Skipped,
    /// `output` is set when a converted copy was tagged instead of the original.
    Embedded { output: Option<PathBuf> },
    /// Artist or title unknown; needs the interactive resolver.
    Deferred(ResolveRequest),
    Failed(EmbedError),
}

impl Outcome {
    pub fn status(&self) -> FileStatus {
        match self {
            Self::NotCandidate => FileStatus::NotCandidate,
            Self::Skipped => FileStatus::Skipped,
            Self::Embedded { output: None } => FileStatus::Embedded,
            Self::Embedded { output: Some(_) } => FileStatus::Converted,
            Self::Deferred(_) => FileStatus::Deferred,
            Self::Failed(_) => FileStatus::Failed,
        }
    }
}

/// Payload-free summary of an [`Outcome`], for progress reporting.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FileStatus {
    NotCandidate,
    Skipped,
    Embedded,
    Converted,
    Deferred,
    Failed,
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NotCandidate => "no lyrics file",
            Self::Skipped => "skipped",
            Self::Embedded => "embedded",
            Self::Converted => "converted",
            Self::Deferred => "deferred",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}
