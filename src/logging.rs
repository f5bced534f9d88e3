use crate::config::Settings;
use crate::core::types::SyncReport;
use log::{debug, error, info, warn};
use std::path::Path;

/// Initialize the logger with appropriate level based on verbosity.
///
/// Without `-v` or `-q` the `RUST_LOG` directives decide; when that is unset
/// nothing is logged.
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = level_override(verbose, quiet, std::env::var_os("RUST_LOG").is_some());

    let mut builder = env_logger::Builder::from_default_env();
    if let Some(level) = level {
        builder.filter_level(level);
    }
    let _ = builder
        .format_module_path(false)
        .format_target(false)
        .try_init();

    debug!("Logger initialized with level override: {level:?}");
}

/// Level forced by the command line flags, `None` to defer to `RUST_LOG`
fn level_override(verbose: bool, quiet: bool, env_filter_set: bool) -> Option<log::LevelFilter> {
    if quiet {
        Some(log::LevelFilter::Off)
    } else if verbose {
        Some(log::LevelFilter::Debug)
    } else if env_filter_set {
        None
    } else {
        Some(log::LevelFilter::Off)
    }
}

/// Log the assembled settings
pub fn log_settings(settings: &Settings) {
    info!(
        "Settings: pull={}, cache_dir={}, fail_fast={}",
        settings.pull,
        settings.cache_dir.display(),
        settings.fail_fast
    );
    match settings.timeout {
        Some(timeout) => info!("HTTP: timeout={}s, user_agent={}", timeout.as_secs(), settings.user_agent),
        None => info!("HTTP: no timeout, user_agent={}", settings.user_agent),
    }
    for (i, dir) in settings.search_path.dirs().iter().enumerate() {
        debug!("  search path {}. {}", i + 1, dir.display());
    }
}

/// Log the start of a sync
pub fn log_sync_start(listing_url: &str, cache_dir: &Path) {
    info!(
        "Pulling tldr listing from {listing_url} into {}",
        cache_dir.display()
    );
}

/// Log the size of the fetched listing
pub fn log_listing(document_count: usize) {
    info!("Listing contains {document_count} entries");
}

/// Log a document written to the cache
pub fn log_document_saved(name: &str, path: &Path, bytes: u64) {
    debug!("✓ {name} -> {} ({bytes} bytes)", path.display());
}

/// Log a listing entry without a download location
pub fn log_document_skipped(name: &str) {
    debug!("- {name} has no download location, skipping");
}

/// Log a failed document download
pub fn log_document_failed(name: &str, err: &dyn std::error::Error) {
    warn!("✗ {name}: {err}");
}

/// Log sync completion
pub fn log_sync_complete(report: &SyncReport, duration_ms: u128) {
    if report.failed_count() == 0 {
        info!("✅ Sync complete: {report} ({duration_ms}ms)");
    } else {
        warn!("❌ Sync complete with failures: {report} ({duration_ms}ms)");
    }
}

/// Log a search path match
pub fn log_document_match(name: &str, path: &Path) {
    debug!("Found {name} at {}", path.display());
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

/// Log warning information
pub fn log_warning(message: &str) {
    warn!("{message}");
}
