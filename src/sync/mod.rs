//! Remote sync of the document cache
//!
//! A sync creates the cache directory, fetches the remote listing and
//! downloads every listed document into the cache, overwriting local copies.
//! Failing to create the directory or to fetch and decode the listing is
//! fatal. A failed document is recorded and the sync moves on, unless
//! `fail_fast` is set; a sync where every download failed is fatal too.

pub mod source;

pub use source::{DocumentBody, DocumentSource, HttpSource};

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::Settings;
use crate::core::constants::files::CACHE_DIR_MODE;
use crate::core::error::{Result, TldrError};
use crate::core::types::{DocumentRef, DocumentStatus, SyncReport};
use crate::logging;
use crate::ui::ProgressReporter;

pub struct Syncer<S: DocumentSource> {
    source: S,
    cache_dir: PathBuf,
    fail_fast: bool,
}

impl Syncer<HttpSource> {
    /// Syncer pulling from the configured listing URL over HTTP
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::new(
            HttpSource::new(settings)?,
            settings.cache_dir.clone(),
            settings.fail_fast,
        ))
    }
}

impl<S: DocumentSource> Syncer<S> {
    pub fn new(source: S, cache_dir: PathBuf, fail_fast: bool) -> Self {
        Self {
            source,
            cache_dir,
            fail_fast,
        }
    }

    /// Refresh the cache directory with every listed document.
    pub async fn sync(&self, mut progress: Option<&mut ProgressReporter>) -> Result<SyncReport> {
        let start_time = Instant::now();

        create_cache_dir(&self.cache_dir)?;

        let documents = self.source.list().await?;
        logging::log_listing(documents.len());

        if let Some(progress) = progress.as_deref_mut() {
            progress.start_sync(documents.len());
        }

        let mut report = SyncReport::default();
        for (i, document) in documents.iter().enumerate() {
            let status = match self.pull_document(document).await {
                Ok(status) => status,
                Err(e) if self.fail_fast => {
                    logging::log_document_failed(&document.name, &e);
                    if let Some(progress) = progress.as_deref() {
                        progress.finish_and_clear();
                    }
                    return Err(e);
                }
                Err(e) => {
                    logging::log_document_failed(&document.name, &e);
                    if let Some(progress) = progress.as_deref() {
                        progress.log_warning(&e.to_string());
                    }
                    DocumentStatus::Failed(e.to_string())
                }
            };
            report.record(document.name.clone(), status);

            if let Some(progress) = progress.as_deref() {
                progress.update_sync_progress(i + 1, &document.name);
            }
        }

        if let Some(progress) = progress.as_deref() {
            progress.finish_and_clear();
        }
        logging::log_sync_complete(&report, start_time.elapsed().as_millis());

        if report.is_total_failure() {
            return Err(TldrError::SyncFailed {
                failed: report.failed_count(),
                total: report.attempted_count(),
            });
        }

        Ok(report)
    }

    async fn pull_document(&self, document: &DocumentRef) -> Result<DocumentStatus> {
        let Some(ref url) = document.download_url else {
            logging::log_document_skipped(&document.name);
            return Ok(DocumentStatus::Skipped);
        };

        let (path, bytes) = self.download(document, url).await?;
        logging::log_document_saved(&document.name, &path, bytes);
        Ok(DocumentStatus::Saved { path, bytes })
    }

    /// Write one document verbatim to `<cache_dir>/<name>`.
    ///
    /// The destination is only created once the remote answered; a failure
    /// while copying leaves whatever was written so far in place.
    pub async fn download(&self, document: &DocumentRef, url: &str) -> Result<(PathBuf, u64)> {
        if !document.has_safe_name() {
            return Err(TldrError::InvalidDocumentName(document.name.clone()));
        }

        let mut body = self.source.fetch(&document.name, url).await?;

        let path = self.cache_dir.join(&document.name);
        let mut file = File::create(&path).map_err(|e| TldrError::DocumentCreate(path.clone(), e))?;
        let bytes = body.copy_to(&mut file).await?;

        Ok((path, bytes))
    }
}

/// Create the cache directory and any missing parents.
pub fn create_cache_dir(path: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(CACHE_DIR_MODE);
    }
    #[cfg(not(unix))]
    let _ = CACHE_DIR_MODE;

    builder
        .create(path)
        .map_err(|e| TldrError::CreateCacheDir(path.to_path_buf(), e))
}
