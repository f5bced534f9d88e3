//! Document lookup over the search path
//!
//! Every requested name is looked up in every search path directory and
//! every match is streamed to the output, in search path order.

pub mod search_path;

pub use search_path::SearchPath;

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::core::constants::messages;
use crate::core::error::TldrError;
use crate::core::types::ResolveOutcome;
use crate::logging;

pub struct Resolver<'a> {
    search_path: &'a SearchPath,
}

impl<'a> Resolver<'a> {
    pub fn new(search_path: &'a SearchPath) -> Self {
        Self { search_path }
    }

    /// Stream every match for `names` to `out`.
    ///
    /// Files that exist but cannot be opened or streamed are reported on `err`
    /// and the scan moves on. When nothing matched at all a single hint line is
    /// written to `err`.
    pub fn resolve<S, W, E>(&self, names: &[S], out: &mut W, err: &mut E) -> ResolveOutcome
    where
        S: AsRef<str>,
        W: Write,
        E: Write,
    {
        let mut outcome = ResolveOutcome::default();

        for name in names {
            let name = name.as_ref();
            for candidate in self.search_path.candidates(name) {
                if !candidate.is_file() {
                    continue;
                }

                outcome.matches += 1;
                logging::log_document_match(name, &candidate);

                if let Err(e) = stream_document(&candidate, out) {
                    outcome.read_failures += 1;
                    logging::log_error("Could not print document", Some(&e));
                    let _ = writeln!(err, "{e}");
                }
            }
        }

        if !outcome.found_any() {
            logging::log_warning(&format!("No document found for {} name(s)", names.len()));
            let _ = writeln!(err, "{}", messages::NO_MATCH_HINT);
        }

        outcome
    }
}

/// Copy one document verbatim into `out` without buffering it whole.
fn stream_document<W: Write>(path: &Path, out: &mut W) -> Result<u64, TldrError> {
    let mut file = File::open(path).map_err(|e| TldrError::DocumentOpen(path.to_path_buf(), e))?;
    let copied =
        io::copy(&mut file, out).map_err(|e| TldrError::DocumentRead(path.to_path_buf(), e))?;
    out.flush()
        .map_err(|e| TldrError::DocumentRead(path.to_path_buf(), e))?;
    Ok(copied)
}
