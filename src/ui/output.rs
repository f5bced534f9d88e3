//! Operator-facing messages. Stdout carries document content only, so
//! everything here goes to the error stream.

use std::io::Write;
use std::path::Path;

use crate::core::constants::display;
use crate::core::error::TldrError;
use crate::core::types::SyncReport;

/// Summarise a finished sync.
pub fn write_sync_summary<W: Write>(
    report: &SyncReport,
    cache_dir: &Path,
    out: &mut W,
) -> std::io::Result<()> {
    let saved = report.saved_count();
    let failed = report.failed_count();

    if failed == 0 {
        writeln!(
            out,
            "{} Pulled {saved} tldr(s) into {}",
            display::SUCCESS_EMOJI,
            cache_dir.display()
        )?;
        return Ok(());
    }

    writeln!(
        out,
        "{} Pulled {saved} of {} tldr(s) into {}, {failed} failed:",
        display::WARNING_EMOJI,
        report.attempted_count(),
        cache_dir.display()
    )?;
    for (i, (name, message)) in report.failures().enumerate() {
        writeln!(out, "{:4}. {} {name}: {message}", i + 1, display::ERROR_EMOJI)?;
    }
    Ok(())
}

/// Print the sync summary to stderr unless quiet
pub fn display_sync_summary(report: &SyncReport, cache_dir: &Path, quiet: bool) {
    if quiet {
        return;
    }
    let _ = write_sync_summary(report, cache_dir, &mut std::io::stderr());
}

/// Report a config file that was skipped while loading.
pub fn write_config_warning<W: Write>(
    path: &Path,
    error: &TldrError,
    out: &mut W,
) -> std::io::Result<()> {
    writeln!(
        out,
        "{} Ignoring config file {}: {error}",
        display::WARNING_EMOJI,
        path.display()
    )
}

/// Print a skipped config file warning to stderr unless quiet.
///
/// Runs before the logger exists, so it does not go through `log`.
pub fn display_config_warning(path: &Path, error: &TldrError, quiet: bool) {
    if quiet {
        return;
    }
    let _ = write_config_warning(path, error, &mut std::io::stderr());
}
