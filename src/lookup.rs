//! Remote lyrics lookup against an LRCLib-compatible API.

mod client;
mod model;
mod transport;

pub use client::{LyricsLookup, LyricsLookupClient};
pub use model::{LookupQuery, LookupResult};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
