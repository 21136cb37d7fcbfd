//! Entry points for front ends (CLI today).

use std::path::{Path, PathBuf};
use std::slice;

use crate::batch::{BatchObserver, BatchOptions, BatchOutcome, BatchRunner};
use crate::config::{LibrarySettings, Settings};
use crate::error::EmbedError;
use crate::lookup::LookupQuery;
use crate::pipeline::{EmbeddingPipeline, LyricsMode, read_lyrics};
use crate::resolver::{InteractiveResolver, ResolveAnswer, ResolveRequest};
use crate::tags::file_name;

pub struct Embedder {
    pipeline: EmbeddingPipeline,
    library: LibrarySettings,
}

impl Embedder {
    pub fn new(pipeline: EmbeddingPipeline, library: LibrarySettings) -> Self {
        Self { pipeline, library }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, EmbedError> {
        settings.validate().map_err(EmbedError::Config)?;
        Ok(Self::new(
            EmbeddingPipeline::from_settings(settings)?,
            settings.library.clone(),
        ))
    }

    pub fn pipeline(&self) -> &EmbeddingPipeline {
        &self.pipeline
    }

    /// Embed every `<stem>.lrc` found next to an audio file under `dir`.
    pub fn embed_from_local_files(
        &self,
        dir: &Path,
        skip_existing: bool,
        reduce_lrc: bool,
        recursive: bool,
        observer: &mut dyn BatchObserver,
    ) -> Result<BatchOutcome, EmbedError> {
        let options = BatchOptions {
            mode: LyricsMode::Local,
            skip_existing,
            reduce_lrc,
            recursive,
        };
        BatchRunner::new(&self.pipeline, &self.library).run(dir, &options, observer, None)
    }

    /// Look lyrics up for every supported audio file under `dir`.
    pub fn embed_from_lookup(
        &self,
        dir: &Path,
        skip_existing: bool,
        recursive: bool,
        observer: &mut dyn BatchObserver,
        resolver: Option<&mut dyn InteractiveResolver>,
    ) -> Result<BatchOutcome, EmbedError> {
        let options = BatchOptions {
            mode: LyricsMode::Remote,
            skip_existing,
            reduce_lrc: false,
            recursive,
        };
        BatchRunner::new(&self.pipeline, &self.library).run(dir, &options, observer, resolver)
    }

    /// Returns the converted file when the original could not be tagged in place.
    pub fn embed_single_from_file(&self, audio: &Path, lrc: &Path) -> Result<Option<PathBuf>, EmbedError> {
        let lyrics = read_lyrics(lrc)?;
        let output = self.pipeline.write(audio, &lyrics)?;
        tracing::info!("embedded {} into {}", file_name(lrc), file_name(audio));
        Ok(output)
    }

    pub fn embed_single_from_lookup(
        &self,
        audio: &Path,
        resolver: Option<&mut dyn InteractiveResolver>,
    ) -> Result<Option<PathBuf>, EmbedError> {
        let meta = self.pipeline.identify(audio);
        let duration = meta.duration_secs;

        let query = match LookupQuery::from_parts(meta.artist.as_deref(), meta.title.as_deref(), duration) {
            Some(query) => query,
            None => {
                let Some(resolver) = resolver else {
                    return Err(EmbedError::MissingMetadata(audio.to_path_buf()));
                };
                let request = ResolveRequest {
                    path: audio.to_path_buf(),
                    suggested_artist: meta.artist,
                    suggested_title: meta.title,
                };
                match resolver.resolve(slice::from_ref(&request)).into_iter().next() {
                    Some(ResolveAnswer::Provided { artist, title }) => {
                        LookupQuery::from_parts(Some(&artist), Some(&title), duration)
                            .ok_or_else(|| EmbedError::MissingMetadata(audio.to_path_buf()))?
                    }
                    Some(ResolveAnswer::Cancelled) | None => {
                        return Err(EmbedError::Cancelled(audio.to_path_buf()));
                    }
                }
            }
        };

        tracing::info!(
            "looking up artist={:?} title={:?} duration={:?}",
            query.artist,
            query.title,
            query.duration_secs
        );
        let lyrics = self
            .pipeline
            .lookup(&query)
            .into_text()
            .ok_or(EmbedError::LyricsNotFound {
                artist: query.artist,
                title: query.title,
            })?;

        let output = self.pipeline.write(audio, &lyrics)?;
        tracing::info!("embedded lyrics for {}", file_name(audio));
        Ok(output)
    }
}
