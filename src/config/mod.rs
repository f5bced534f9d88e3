//! Configuration management
//!
//! This module handles loading configuration from TOML files and CLI
//! arguments, and assembling the immutable [`Settings`] the resolver and
//! the sync run with.

pub mod expand;

use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::constants::{defaults, files};
use crate::core::error::{Result, TldrError};
use crate::resolve::SearchPath;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Cache directory template documents are pulled into
    pub pull_dir: Option<String>,

    /// Colon separated search path template
    pub paths: Option<String>,

    /// Endpoint listing the remote documents
    pub listing_url: Option<String>,

    /// Timeout in seconds for HTTP requests (no timeout when unset)
    pub timeout: Option<u64>,

    /// Custom User-Agent header
    pub user_agent: Option<String>,

    /// Abort the sync on the first document that fails
    pub fail_fast: Option<bool>,

    /// Enable verbose logging
    pub verbose: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pull_dir: Some(defaults::PULL_DIR.to_string()),
            paths: Some(defaults::PATHS.to_string()),
            listing_url: Some(defaults::LISTING_URL.to_string()),
            timeout: None,
            user_agent: None,
            fail_fast: Some(defaults::FAIL_FAST),
            verbose: Some(false),
        }
    }
}

impl Config {
    /// Load configuration from file. Unset keys keep their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            TldrError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let loaded: Config = toml::from_str(&content)
            .map_err(|e| TldrError::TomlParsing(path.to_path_buf(), e))?;

        let mut config = Config::default();
        config.overlay(loaded);
        config.validate()?;
        Ok(config)
    }

    /// Candidate config files, most specific first
    pub fn standard_locations<F>(lookup: F) -> Vec<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut locations = Vec::new();
        if let Some(xdg) = lookup("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
            locations.push(
                PathBuf::from(xdg)
                    .join(files::CONFIG_DIR)
                    .join(files::CONFIG_FILE),
            );
        }
        if let Some(home) = lookup("HOME").filter(|v| !v.is_empty()) {
            locations.push(
                PathBuf::from(home)
                    .join(".config")
                    .join(files::CONFIG_DIR)
                    .join(files::CONFIG_FILE),
            );
        }
        locations
    }

    /// Load the first usable config file in a standard location, falling back to defaults.
    ///
    /// Files that exist but fail to load are skipped and returned alongside the
    /// config so the caller can report them.
    pub fn load_from_standard_locations<F>(lookup: F) -> (Self, Vec<(PathBuf, TldrError)>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut ignored = Vec::new();
        for path in Self::standard_locations(lookup) {
            if !path.is_file() {
                continue;
            }
            match Self::load_from_file(&path) {
                Ok(config) => {
                    debug!("Loaded config from {}", path.display());
                    return (config, ignored);
                }
                Err(e) => ignored.push((path, e)),
            }
        }

        (Self::default(), ignored)
    }

    /// Copy every value set in `other` over this config
    fn overlay(&mut self, other: Config) {
        if other.pull_dir.is_some() {
            self.pull_dir = other.pull_dir;
        }
        if other.paths.is_some() {
            self.paths = other.paths;
        }
        if other.listing_url.is_some() {
            self.listing_url = other.listing_url;
        }
        if other.timeout.is_some() {
            self.timeout = other.timeout;
        }
        if other.user_agent.is_some() {
            self.user_agent = other.user_agent;
        }
        if other.fail_fast.is_some() {
            self.fail_fast = other.fail_fast;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        if let Some(ref pull_dir) = cli_config.pull_dir {
            self.pull_dir = Some(pull_dir.clone());
        }
        if let Some(ref paths) = cli_config.paths {
            self.paths = Some(paths.clone());
        }
        if let Some(ref listing_url) = cli_config.listing_url {
            self.listing_url = Some(listing_url.clone());
        }
        if let Some(timeout) = cli_config.timeout {
            self.timeout = Some(timeout);
        }
        if let Some(ref user_agent) = cli_config.user_agent {
            self.user_agent = Some(user_agent.clone());
        }
        if cli_config.fail_fast {
            self.fail_fast = Some(true);
        }
        if cli_config.verbose {
            self.verbose = Some(true);
        }
    }

    /// Get timeout as Duration, if one is configured
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(0) = self.timeout {
            return Err(TldrError::Config(
                "Timeout cannot be 0. Expected a positive integer representing seconds."
                    .to_string(),
            ));
        }

        if let Some(ref pull_dir) = self.pull_dir
            && pull_dir.trim().is_empty()
        {
            return Err(TldrError::Config(
                "Pull directory cannot be empty.".to_string(),
            ));
        }

        if let Some(ref url) = self.listing_url
            && !(url.starts_with("http://") || url.starts_with("https://"))
        {
            return Err(TldrError::Config(format!(
                "Listing URL '{url}' is not an http(s) URL."
            )));
        }

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Sync
    pub pull: bool,                  // --pull
    pub pull_dir: Option<String>,    // --pull-dir
    pub listing_url: Option<String>, // --listing-url
    pub timeout: Option<u64>,        // --timeout
    pub user_agent: Option<String>,  // --user-agent
    pub fail_fast: bool,             // --fail-fast

    // Lookup
    pub paths: Option<String>, // --paths

    // Output
    pub quiet: bool,       // --quiet
    pub verbose: bool,     // --verbose
    pub no_progress: bool, // --no-progress

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}

/// Fully resolved, read-only settings for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Refresh the cache before resolving
    pub pull: bool,
    /// Directory documents are pulled into
    pub cache_dir: PathBuf,
    /// Directories searched for documents
    pub search_path: SearchPath,
    pub listing_url: String,
    pub timeout: Option<Duration>,
    pub user_agent: String,
    pub fail_fast: bool,
}

impl Settings {
    /// Build settings from a merged config.
    ///
    /// The `(pull-dir)` placeholder in the search path is replaced with the
    /// cache directory template first; home shorthand and variables are then
    /// expanded in both strings using `lookup`.
    pub fn assemble<F>(pull: bool, config: &Config, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pull_dir = config.pull_dir.as_deref().unwrap_or(defaults::PULL_DIR);
        let paths = config.paths.as_deref().unwrap_or(defaults::PATHS);
        let (cache_dir, search_path) = assemble_paths(pull_dir, paths, lookup);

        Self {
            pull,
            cache_dir: PathBuf::from(cache_dir),
            search_path: SearchPath::parse(&search_path),
            listing_url: config
                .listing_url
                .clone()
                .unwrap_or_else(|| defaults::LISTING_URL.to_string()),
            timeout: config.timeout_duration(),
            user_agent: config
                .user_agent
                .clone()
                .unwrap_or_else(default_user_agent),
            fail_fast: config.fail_fast.unwrap_or(defaults::FAIL_FAST),
        }
    }
}

/// Expand the cache directory and search path templates.
///
/// Returns `(cache_dir, search_path)` as strings.
pub fn assemble_paths<F>(pull_dir: &str, paths: &str, lookup: F) -> (String, String)
where
    F: Fn(&str) -> Option<String>,
{
    let paths = expand::substitute_pull_dir(paths, pull_dir);
    (
        expand::expand(pull_dir, &lookup),
        expand::expand(&paths, &lookup),
    )
}

pub fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "HOME" => Some("/home/tester".to_string()),
            _ => None,
        }
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.pull_dir.as_deref(), Some(defaults::PULL_DIR));
        assert_eq!(config.paths.as_deref(), Some(defaults::PATHS));
        assert_eq!(config.listing_url.as_deref(), Some(defaults::LISTING_URL));
        assert_eq!(config.timeout, None);
        assert_eq!(config.fail_fast, Some(false));
    }

    #[test]
    fn test_config_load_from_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"pull_dir = \"/srv/tldr\"\ntimeout = 20\nfail_fast = true")?;

        let config = Config::load_from_file(file.path())?;
        assert_eq!(config.pull_dir.as_deref(), Some("/srv/tldr"));
        assert_eq!(config.timeout, Some(20));
        assert_eq!(config.fail_fast, Some(true));
        // Unset keys keep defaults
        assert_eq!(config.paths.as_deref(), Some(defaults::PATHS));

        Ok(())
    }

    #[test]
    fn test_config_load_from_file__missing() {
        let result = Config::load_from_file("/nonexistent/tldr/config.toml");
        match result {
            Err(TldrError::Config(msg)) => assert!(msg.contains("Could not read config file")),
            other => panic!("Expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_config_load_from_file__invalid_toml() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"pull_dir = [unclosed")?;

        let result = Config::load_from_file(file.path());
        assert!(matches!(result, Err(TldrError::TomlParsing(ref path, _)) if path == file.path()));
        Ok(())
    }

    #[test]
    fn test_config_load_from_file__invalid_values() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"timeout = 0")?;
        assert!(Config::load_from_file(file.path()).is_err());

        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"listing_url = \"ftp://example.com/list\"")?;
        assert!(Config::load_from_file(file.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_standard_locations__order() {
        let lookup = |name: &str| match name {
            "XDG_CONFIG_HOME" => Some("/xdg".to_string()),
            "HOME" => Some("/home/tester".to_string()),
            _ => None,
        };

        assert_eq!(
            Config::standard_locations(lookup),
            vec![
                PathBuf::from("/xdg/tldr/config.toml"),
                PathBuf::from("/home/tester/.config/tldr/config.toml"),
            ]
        );
        assert!(Config::standard_locations(no_env).is_empty());
    }

    #[test]
    fn test_load_from_standard_locations__finds_xdg_file() -> TestResult {
        let temp_dir = TempDir::new()?;
        let config_dir = temp_dir.path().join("tldr");
        fs::create_dir_all(&config_dir)?;
        fs::write(config_dir.join("config.toml"), "paths = \"/only/here\"")?;

        let xdg = temp_dir.path().to_string_lossy().to_string();
        let lookup = move |name: &str| (name == "XDG_CONFIG_HOME").then(|| xdg.clone());

        let (config, ignored) = Config::load_from_standard_locations(lookup);
        assert_eq!(config.paths.as_deref(), Some("/only/here"));
        assert!(ignored.is_empty());
        Ok(())
    }

    #[test]
    fn test_load_from_standard_locations__reports_broken_file() -> TestResult {
        let temp_dir = TempDir::new()?;
        let xdg_dir = temp_dir.path().join("xdg");
        let home_dir = temp_dir.path().join("home");
        fs::create_dir_all(xdg_dir.join("tldr"))?;
        fs::create_dir_all(home_dir.join(".config").join("tldr"))?;
        let broken = xdg_dir.join("tldr").join("config.toml");
        fs::write(&broken, "timeout = 0")?;
        fs::write(
            home_dir.join(".config").join("tldr").join("config.toml"),
            "paths = \"/fallback\"",
        )?;

        let xdg = xdg_dir.to_string_lossy().to_string();
        let home = home_dir.to_string_lossy().to_string();
        let lookup = move |name: &str| match name {
            "XDG_CONFIG_HOME" => Some(xdg.clone()),
            "HOME" => Some(home.clone()),
            _ => None,
        };

        let (config, ignored) = Config::load_from_standard_locations(lookup);
        assert_eq!(config.paths.as_deref(), Some("/fallback"));
        assert_eq!(ignored.len(), 1);
        assert_eq!(ignored[0].0, broken);
        assert!(matches!(ignored[0].1, TldrError::Config(_)));
        Ok(())
    }

    #[test]
    fn test_load_from_standard_locations__falls_back_to_default() -> TestResult {
        let temp_dir = TempDir::new()?;
        let home = temp_dir.path().to_string_lossy().to_string();
        let lookup = move |name: &str| (name == "HOME").then(|| home.clone());

        let (config, ignored) = Config::load_from_standard_locations(lookup);
        assert_eq!(config, Config::default());
        assert!(ignored.is_empty());
        Ok(())
    }

    #[test]
    fn test_config_merge_with_cli() {
        let mut config = Config::default();
        let cli_config = CliConfig {
            pull_dir: Some("/cli/cache".to_string()),
            timeout: Some(5),
            fail_fast: true,
            verbose: true,
            ..Default::default()
        };

        config.merge_with_cli(&cli_config);

        assert_eq!(config.pull_dir.as_deref(), Some("/cli/cache"));
        assert_eq!(config.paths.as_deref(), Some(defaults::PATHS));
        assert_eq!(config.timeout, Some(5));
        assert_eq!(config.fail_fast, Some(true));
        assert_eq!(config.verbose, Some(true));
    }

    #[test]
    fn test_merge_with_cli__unset_flags_keep_config() {
        let mut config = Config {
            fail_fast: Some(true),
            ..Default::default()
        };
        config.merge_with_cli(&CliConfig::default());
        assert_eq!(config.fail_fast, Some(true));
    }

    #[test]
    fn test_timeout_duration() {
        let config = Config {
            timeout: Some(45),
            ..Default::default()
        };
        assert_eq!(config.timeout_duration(), Some(Duration::from_secs(45)));
        assert_eq!(Config::default().timeout_duration(), None);
    }

    #[test]
    fn test_assemble_paths__default_templates() {
        let (cache_dir, paths) = assemble_paths(defaults::PULL_DIR, defaults::PATHS, lookup);
        assert_eq!(cache_dir, "/home/tester/.local/share/tldr");
        assert_eq!(paths, "/home/tester/.tldr:/home/tester/.local/share/tldr");
    }

    #[test]
    fn test_assemble_paths__tilde_in_pull_dir() {
        let (cache_dir, paths) = assemble_paths("~/cache", "(pull-dir):~/mine", lookup);
        assert_eq!(cache_dir, "/home/tester/cache");
        assert_eq!(paths, "/home/tester/cache:/home/tester/mine");
    }

    #[test]
    fn test_assemble_paths__undefined_variable_stays_literal() {
        let (cache_dir, paths) = assemble_paths("$NOPE/tldr", "(pull-dir)", lookup);
        assert_eq!(cache_dir, "$NOPE/tldr");
        assert_eq!(paths, "$NOPE/tldr");
    }

    #[test]
    fn test_settings_assemble() {
        let config = Config {
            pull_dir: Some("/cache".to_string()),
            paths: Some("$HOME/.tldr:(pull-dir)".to_string()),
            timeout: Some(10),
            ..Default::default()
        };

        let settings = Settings::assemble(true, &config, lookup);

        assert!(settings.pull);
        assert_eq!(settings.cache_dir, PathBuf::from("/cache"));
        assert_eq!(
            settings.search_path,
            SearchPath::from_dirs(["/home/tester/.tldr", "/cache"])
        );
        assert_eq!(settings.listing_url, defaults::LISTING_URL);
        assert_eq!(settings.timeout, Some(Duration::from_secs(10)));
        assert!(settings.user_agent.starts_with("tldrs/"));
        assert!(!settings.fail_fast);
    }

    #[test]
    fn test_settings_assemble__custom_user_agent() {
        let config = Config {
            user_agent: Some("custom/1.0".to_string()),
            ..Default::default()
        };
        let settings = Settings::assemble(false, &config, no_env);
        assert_eq!(settings.user_agent, "custom/1.0");
    }
}
