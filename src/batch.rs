//! Directory-wide embedding runs.
//!
//! `runner` drives the per-file pipeline over the output of `scan` and keeps
//! the counts; deferred files go to an [`InteractiveResolver`] at the end.
//!
//! [`InteractiveResolver`]: crate::resolver::InteractiveResolver

mod observer;
mod runner;
mod scan;

pub use observer::{BatchObserver, NoProgress};
pub use runner::{BatchOptions, BatchOutcome, BatchRunner};
pub use scan::scan;
