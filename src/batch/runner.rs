use std::path::{Path, PathBuf};

use crate::config::LibrarySettings;
use crate::error::EmbedError;
use crate::pipeline::{EmbedOptions, EmbeddingPipeline, LyricsMode, Outcome};
use crate::resolver::{InteractiveResolver, ResolveAnswer, ResolveRequest};
use crate::tags::file_name;

use super::observer::BatchObserver;
use super::scan::scan;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    pub mode: LyricsMode,
    pub skip_existing: bool,
    /// Only honoured in local mode.
    pub reduce_lrc: bool,
    pub recursive: bool,
}

/// Tally of one batch run.
///
/// `embedded + skipped + failed.len() + unresolved.len() <= total` always holds;
/// `embedded` includes files embedded after interactive resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Candidate files, i.e. everything not excluded for lack of a lyric source.
    pub total: usize,
    pub embedded: usize,
    pub skipped: usize,
    /// Files that lacked artist/title and were handed to the resolver.
    pub deferred: usize,
    /// Deferred files embedded after resolution.
    pub resolved: usize,
    /// Names of files that errored or had no match, in processing order.
    pub failed: Vec<String>,
    /// Deferred files that were cancelled or still not found.
    pub unresolved: Vec<String>,
    /// New files produced by conversion.
    pub converted: Vec<PathBuf>,
}

impl BatchOutcome {
    /// Share of candidates that ended up with lyrics, in percent.
    pub fn embedded_percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.embedded as f64 * 100.0 / self.total as f64
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.embedded + self.skipped + self.failed.len() + self.unresolved.len() <= self.total
            && self.resolved <= self.deferred
    }
}

/// Walks a directory and runs the pipeline on every candidate, one at a time.
pub struct BatchRunner<'a> {
    pipeline: &'a EmbeddingPipeline,
    library: &'a LibrarySettings,
}

impl<'a> BatchRunner<'a> {
    pub fn new(pipeline: &'a EmbeddingPipeline, library: &'a LibrarySettings) -> Self {
        Self { pipeline, library }
    }

    /// Process every candidate under `dir`, then hand deferred files to
    /// `resolver` (when given). Fails only when `dir` is not a directory.
    pub fn run(
        &self,
        dir: &Path,
        options: &BatchOptions,
        observer: &mut dyn BatchObserver,
        resolver: Option<&mut dyn InteractiveResolver>,
    ) -> Result<BatchOutcome, EmbedError> {
        if !dir.is_dir() {
            return Err(EmbedError::DirectoryNotFound(dir.to_path_buf()));
        }

        let extensions = match options.mode {
            LyricsMode::Local => &self.library.local_extensions,
            LyricsMode::Remote => &self.library.lookup_extensions,
        };
        let files = scan(dir, self.library, extensions, options.recursive);
        tracing::info!("found {} audio files in {}", files.len(), dir.display());
        observer.started(files.len());

        let embed_options = EmbedOptions {
            skip_existing: options.skip_existing,
            reduce_lrc: options.reduce_lrc && options.mode == LyricsMode::Local,
        };

        let mut outcome = BatchOutcome::default();
        let mut deferred: Vec<ResolveRequest> = Vec::new();

        for path in &files {
            let result = self.pipeline.run(path, options.mode, embed_options);
            let status = result.status();
            match result {
                Outcome::NotCandidate => {}
                Outcome::Skipped => {
                    outcome.total += 1;
                    outcome.skipped += 1;
                }
                Outcome::Embedded { output } => {
                    outcome.total += 1;
                    outcome.embedded += 1;
                    outcome.converted.extend(output);
                }
                Outcome::Deferred(request) => {
                    outcome.total += 1;
                    deferred.push(request);
                }
                Outcome::Failed(_) => {
                    outcome.total += 1;
                    outcome.failed.push(file_name(path));
                }
            }
            observer.processed(path, status);
        }

        outcome.deferred = deferred.len();
        if !deferred.is_empty() {
            match resolver {
                Some(resolver) => self.resolve(deferred, resolver, &mut outcome),
                None => {
                    tracing::warn!(
                        "{} files need artist/title and no resolver is available",
                        deferred.len()
                    );
                    outcome
                        .unresolved
                        .extend(deferred.iter().map(ResolveRequest::file_name));
                }
            }
        }

        tracing::info!(
            "total: {}, embedded: {}, skipped: {}, failed: {}",
            outcome.total,
            outcome.embedded,
            outcome.skipped,
            outcome.failed.len()
        );
        observer.finished(&outcome);
        Ok(outcome)
    }

    fn resolve(
        &self,
        deferred: Vec<ResolveRequest>,
        resolver: &mut dyn InteractiveResolver,
        outcome: &mut BatchOutcome,
    ) {
        tracing::info!("asking for {} files with missing tags", deferred.len());
        let mut answers = resolver.resolve(&deferred).into_iter();

        for request in deferred {
            let name = request.file_name();
            let (artist, title) = match answers.next() {
                Some(ResolveAnswer::Provided { artist, title }) => (artist, title),
                Some(ResolveAnswer::Cancelled) | None => {
                    tracing::info!("skipping {name}, cancelled");
                    outcome.unresolved.push(name);
                    continue;
                }
            };

            match self.pipeline.embed_resolved(&request.path, &artist, &title) {
                Ok(output) => {
                    tracing::info!("embedded (manual) lyrics for {name}");
                    outcome.embedded += 1;
                    outcome.resolved += 1;
                    outcome.converted.extend(output);
                }
                Err(e @ (EmbedError::LyricsNotFound { .. } | EmbedError::MissingMetadata(_))) => {
                    tracing::warn!("manual query found nothing for {name}: {e}");
                    resolver.report_not_found(&request);
                    outcome.unresolved.push(name);
                }
                Err(e) => {
                    tracing::error!("embedding (manual) failed for {name}: {e}");
                    resolver.report_failure(&request, &e);
                    outcome.unresolved.push(name);
                }
            }
        }
    }
}
