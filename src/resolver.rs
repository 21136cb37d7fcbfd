//! Boundary to whoever can name a track we could not identify.
//!
//! The core hands over a list of requests once a batch scan is over and gets
//! back one answer per request. How the answers are obtained (terminal
//! prompt, dialog box, canned list) is up to the implementation.

use std::path::PathBuf;

/// A file that needs an artist and title before it can be looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveRequest {
    pub path: PathBuf,
    /// Best guesses, meant to pre-fill a prompt.
    pub suggested_artist: Option<String>,
    pub suggested_title: Option<String>,
}

impl ResolveRequest {
    pub fn file_name(&self) -> String {
        crate::tags::file_name(&self.path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveAnswer {
    Provided { artist: String, title: String },
    /// Either field was cancelled; the file is abandoned.
    Cancelled,
}

pub trait InteractiveResolver {
    /// One answer per request, in order. Missing trailing answers count as cancelled.
    fn resolve(&mut self, requests: &[ResolveRequest]) -> Vec<ResolveAnswer>;

    /// Told when the supplied artist/title still found no lyrics.
    fn report_not_found(&mut self, _request: &ResolveRequest) {}

    /// Told when embedding failed after lyrics were found.
    fn report_failure(&mut self, _request: &ResolveRequest, _error: &crate::error::EmbedError) {}
}
