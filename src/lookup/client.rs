use std::time::Duration;

use crate::config::LookupSettings;
use crate::error::LookupError;

use super::model::{LookupQuery, LookupResult, LyricsRecord};
use super::transport::{HttpTransport, ReqwestTransport};

/// Anything that can turn a query into lyrics.
pub trait LyricsLookup {
    fn lookup(&self, query: &LookupQuery) -> LookupResult;
}

/// LRCLib client: an exact `/get` first, then a broader `/search`.
pub struct LyricsLookupClient<T = ReqwestTransport> {
    transport: T,
    base_url: String,
}

impl LyricsLookupClient<ReqwestTransport> {
    pub fn from_settings(settings: &LookupSettings) -> Result<Self, LookupError> {
        let transport = ReqwestTransport::new(Duration::from_secs(settings.timeout_secs))?;
        Ok(Self::new(transport, &settings.base_url))
    }
}

impl<T: HttpTransport> LyricsLookupClient<T> {
    pub fn new(transport: T, base_url: &str) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn get_exact(&self, query: &LookupQuery) -> Result<LookupResult, LookupError> {
        let body = self.fetch("get", query)?;
        let record: LyricsRecord = serde_json::from_str(&body)?;
        Ok(record.into_result())
    }

    fn search(&self, query: &LookupQuery) -> Result<LookupResult, LookupError> {
        let body = self.fetch("search", query)?;
        let mut records: Vec<LyricsRecord> = serde_json::from_str(&body)?;
        if records.is_empty() {
            return Ok(LookupResult::NotFound);
        }
        let best = records.iter().position(LyricsRecord::has_synced).unwrap_or(0);
        Ok(records.swap_remove(best).into_result())
    }

    fn fetch(&self, endpoint: &str, query: &LookupQuery) -> Result<String, LookupError> {
        let url = format!("{}/{endpoint}", self.base_url);
        tracing::debug!(
            "GET {url} artist={:?} title={:?} duration={:?}",
            query.artist,
            query.title,
            query.duration_secs
        );
        let response = self.transport.get(&url, &query.params())?;
        if response.status != 200 {
            return Err(LookupError::Status(response.status));
        }
        Ok(response.body)
    }
}

impl<T: HttpTransport> LyricsLookup for LyricsLookupClient<T> {
    fn lookup(&self, query: &LookupQuery) -> LookupResult {
        if query.is_empty() {
            return LookupResult::NotFound;
        }

        match self.get_exact(query) {
            Ok(result) if result.is_found() => return result,
            Ok(_) => {}
            Err(e) => tracing::debug!("exact lookup missed for {} - {}: {e}", query.artist, query.title),
        }

        match self.search(query) {
            Ok(result) => result,
            Err(e) => {
                tracing::debug!("search missed for {} - {}: {e}", query.artist, query.title);
                LookupResult::NotFound
            }
        }
    }
}
