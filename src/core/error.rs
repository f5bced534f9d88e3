use std::fmt;
use std::path::PathBuf;

/// Error types for tldr operations
#[derive(Debug)]
pub enum TldrError {
    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// HTTP client error
    Http(reqwest::Error),

    /// A config file was not valid TOML for [`crate::config::Config`]
    TomlParsing(PathBuf, toml::de::Error),

    /// The cache directory could not be created
    CreateCacheDir(PathBuf, std::io::Error),

    /// The remote listing could not be retrieved
    ListingFetch(String, reqwest::Error),

    /// The remote listing was not a list of document references
    ListingParse(serde_json::Error),

    /// A single document could not be retrieved
    DocumentFetch(String, reqwest::Error),

    /// The destination file for a document could not be created
    DocumentCreate(PathBuf, std::io::Error),

    /// Writing a document's content to disk failed
    DocumentWrite(String, std::io::Error),

    /// A listed document name would escape the cache directory
    InvalidDocumentName(String),

    /// Every attempted download failed
    SyncFailed { failed: usize, total: usize },

    /// A matching local document could not be opened
    DocumentOpen(PathBuf, std::io::Error),

    /// A matching local document could not be streamed to the output
    DocumentRead(PathBuf, std::io::Error),
}

impl fmt::Display for TldrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TldrError::Io(err) => write!(f, "IO error: {err}"),
            TldrError::Config(msg) => write!(f, "Configuration error: {msg}"),
            TldrError::Http(err) => write!(f, "HTTP error: {err}"),
            TldrError::TomlParsing(path, err) => {
                write!(f, "Invalid TOML in config file '{}': {err}", path.display())
            }
            TldrError::CreateCacheDir(path, err) => {
                write!(f, "failed to create tldr directory {}: {err}", path.display())
            }
            TldrError::ListingFetch(url, err) => {
                write!(f, "failed getting tldr listing from {url}: {err}")
            }
            TldrError::ListingParse(err) => write!(f, "failed parsing tldr listing: {err}"),
            TldrError::DocumentFetch(name, err) => write!(f, "failed getting tldr {name}: {err}"),
            TldrError::DocumentCreate(path, err) => {
                write!(f, "failed opening file for tldr {}: {err}", path.display())
            }
            TldrError::DocumentWrite(name, err) => write!(f, "failed saving tldr {name}: {err}"),
            TldrError::InvalidDocumentName(name) => {
                write!(f, "refusing to save tldr with invalid name '{name}'")
            }
            TldrError::SyncFailed { failed, total } => {
                write!(f, "all {failed} of {total} tldr downloads failed")
            }
            TldrError::DocumentOpen(path, err) => {
                write!(f, "failed to open {}: {err}", path.display())
            }
            TldrError::DocumentRead(path, err) => {
                write!(f, "failed writing tldr {} to stdout: {err}", path.display())
            }
        }
    }
}

impl std::error::Error for TldrError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TldrError::Io(err) => Some(err),
            TldrError::Http(err) => Some(err),
            TldrError::TomlParsing(_, err) => Some(err),
            TldrError::CreateCacheDir(_, err) => Some(err),
            TldrError::ListingFetch(_, err) => Some(err),
            TldrError::ListingParse(err) => Some(err),
            TldrError::DocumentFetch(_, err) => Some(err),
            TldrError::DocumentCreate(_, err) => Some(err),
            TldrError::DocumentWrite(_, err) => Some(err),
            TldrError::DocumentOpen(_, err) => Some(err),
            TldrError::DocumentRead(_, err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TldrError {
    fn from(err: std::io::Error) -> Self {
        TldrError::Io(err)
    }
}

impl From<reqwest::Error> for TldrError {
    fn from(err: reqwest::Error) -> Self {
        TldrError::Http(err)
    }
}

impl From<serde_json::Error> for TldrError {
    fn from(err: serde_json::Error) -> Self {
        TldrError::ListingParse(err)
    }
}

/// Type alias for Results using TldrError
pub type Result<T> = std::result::Result<T, TldrError>;
