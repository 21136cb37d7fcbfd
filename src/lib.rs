//! Embed LRC lyrics into audio file tags.
//!
//! Lyrics come either from a companion `<stem>.lrc` next to each audio file
//! or from the LRCLib web service. [`embedder::Embedder`] is the entry point
//! for front ends; everything below it works on one file at a time.

pub mod batch;
pub mod config;
pub mod embedder;
pub mod error;
pub mod filename;
pub mod lookup;
pub mod pipeline;
pub mod resolver;
pub mod tags;

#[cfg(test)]
pub(crate) mod testing;
