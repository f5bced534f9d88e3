//! Print cached quick-reference sheets ("tldrs") for commands.
//!
//! Documents are looked up by exact file name in an ordered, colon separated
//! search path. A pull refreshes the cache directory from a remote listing
//! before the lookup runs.

pub mod config;
pub mod core;
pub mod logging;
pub mod resolve;
pub mod sync;
pub mod ui;

pub use config::{Config, Settings};
pub use crate::core::{DocumentRef, Result, SyncReport, TldrError};
pub use resolve::{Resolver, SearchPath};
pub use sync::{DocumentSource, HttpSource, Syncer};
