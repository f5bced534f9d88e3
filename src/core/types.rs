use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// One entry of the remote document listing.
///
/// Only the two fields needed to download a document are decoded; any other
/// field the listing carries is ignored. Sub-directories in the listing have
/// no download location and are skipped during a sync.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocumentRef {
    /// File name the document is saved under
    pub name: String,
    /// Direct location of the document's raw content
    #[serde(default)]
    pub download_url: Option<String>,
}

impl DocumentRef {
    pub fn new(name: impl Into<String>, download_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            download_url: Some(download_url.into()),
        }
    }

    /// Whether `name` can be used as a single file name inside the cache directory.
    ///
    /// # Examples
    /// ```
    /// use tldrs::core::types::DocumentRef;
    ///
    /// assert!(DocumentRef::new("tar", "https://example.com/tar").has_safe_name());
    /// assert!(!DocumentRef::new("../tar", "https://example.com/tar").has_safe_name());
    /// ```
    pub fn has_safe_name(&self) -> bool {
        let name = self.name.as_str();
        !(name.is_empty()
            || name == "."
            || name == ".."
            || name.contains('/')
            || name.contains('\\')
            || name.contains('\0'))
    }
}

/// What happened to a single document during a sync
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentStatus {
    /// Written to the cache directory
    Saved { path: PathBuf, bytes: u64 },
    /// Listed without a download location
    Skipped,
    /// Download or write failed; the message is operator-facing
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOutcome {
    pub name: String,
    pub status: DocumentStatus,
}

/// Per-document results of one sync, in listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub outcomes: Vec<DocumentOutcome>,
}

impl SyncReport {
    pub fn record(&mut self, name: impl Into<String>, status: DocumentStatus) {
        self.outcomes.push(DocumentOutcome {
            name: name.into(),
            status,
        });
    }

    pub fn saved_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, DocumentStatus::Saved { .. }))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == DocumentStatus::Skipped)
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes.iter().filter_map(|o| match &o.status {
            DocumentStatus::Failed(msg) => Some((o.name.as_str(), msg.as_str())),
            _ => None,
        })
    }

    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    /// Documents a download was attempted for
    pub fn attempted_count(&self) -> usize {
        self.saved_count() + self.failed_count()
    }

    /// True when downloads were attempted and none of them succeeded
    pub fn is_total_failure(&self) -> bool {
        self.attempted_count() > 0 && self.saved_count() == 0
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} saved, {} failed, {} skipped",
            self.saved_count(),
            self.failed_count(),
            self.skipped_count()
        )
    }
}

/// Tally of one resolver run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOutcome {
    /// Matching files found, including ones that later failed to stream
    pub matches: usize,
    /// Matching files that could not be opened or fully streamed
    pub read_failures: usize,
}

impl ResolveOutcome {
    pub fn found_any(&self) -> bool {
        self.matches > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_ref_ignores_unknown_fields() {
        let json = r#"{
            "name": "tar",
            "path": "cheat/cheatsheets/tar",
            "sha": "abc123",
            "size": 512,
            "type": "file",
            "download_url": "https://raw.example.com/tar"
        }"#;

        let doc: DocumentRef = serde_json::from_str(json).unwrap();
        assert_eq!(doc, DocumentRef::new("tar", "https://raw.example.com/tar"));
    }

    #[test]
    fn test_document_ref_null_download_url() {
        let json = r#"{"name": "subdir", "type": "dir", "download_url": null}"#;

        let doc: DocumentRef = serde_json::from_str(json).unwrap();
        assert_eq!(doc.name, "subdir");
        assert_eq!(doc.download_url, None);
    }

    #[test]
    fn test_document_ref_missing_name_is_error() {
        let json = r#"{"download_url": "https://raw.example.com/tar"}"#;
        assert!(serde_json::from_str::<DocumentRef>(json).is_err());
    }

    #[test]
    fn test_has_safe_name() {
        let url = "https://example.com/x";
        assert!(DocumentRef::new("git", url).has_safe_name());
        assert!(DocumentRef::new(".hidden", url).has_safe_name());
        assert!(DocumentRef::new("7z", url).has_safe_name());

        assert!(!DocumentRef::new("", url).has_safe_name());
        assert!(!DocumentRef::new(".", url).has_safe_name());
        assert!(!DocumentRef::new("..", url).has_safe_name());
        assert!(!DocumentRef::new("a/b", url).has_safe_name());
        assert!(!DocumentRef::new("a\\b", url).has_safe_name());
    }

    #[test]
    fn test_sync_report_counts() {
        let mut report = SyncReport::default();
        report.record(
            "a",
            DocumentStatus::Saved {
                path: PathBuf::from("/cache/a"),
                bytes: 3,
            },
        );
        report.record("dir", DocumentStatus::Skipped);
        report.record("b", DocumentStatus::Failed("boom".to_string()));

        assert_eq!(report.saved_count(), 1);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.attempted_count(), 2);
        assert!(!report.is_total_failure());
        assert_eq!(report.failures().collect::<Vec<_>>(), vec![("b", "boom")]);
        assert_eq!(report.to_string(), "1 saved, 1 failed, 1 skipped");
    }

    #[test]
    fn test_sync_report_total_failure() {
        let mut report = SyncReport::default();
        assert!(!report.is_total_failure());

        report.record("dir", DocumentStatus::Skipped);
        assert!(!report.is_total_failure());

        report.record("a", DocumentStatus::Failed("x".to_string()));
        assert!(report.is_total_failure());
    }

    #[test]
    fn test_resolve_outcome_found_any() {
        assert!(!ResolveOutcome::default().found_any());
        assert!(
            ResolveOutcome {
                matches: 1,
                read_failures: 1
            }
            .found_any()
        );
    }
}
