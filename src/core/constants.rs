/// Application-wide constants to avoid magic values throughout the codebase.
///
/// This module centralizes the default templates, endpoints and operator
/// messages used across the application.
/// Default configuration values
pub mod defaults {
    /// Default cache directory template, expanded at startup
    pub const PULL_DIR: &str = "$HOME/.local/share/tldr";
    /// Default search path template
    pub const PATHS: &str = "$HOME/.tldr:(pull-dir)";
    /// Remote listing of available documents
    pub const LISTING_URL: &str =
        "https://api.github.com/repos/chrisallenlane/cheat/contents/cheat/cheatsheets";
    /// Abort a sync on the first failed document
    pub const FAIL_FAST: bool = false;
}

/// Search path syntax
pub mod search_path {
    /// Token in the search path template replaced by the cache directory
    pub const PULL_DIR_PLACEHOLDER: &str = "(pull-dir)";
    /// Separator between search path entries
    pub const DELIMITER: char = ':';
    /// Home-directory shorthand
    pub const HOME_SHORTHAND: char = '~';
    /// Variable the home shorthand stands for
    pub const HOME_VAR: &str = "$HOME";
}

/// Filesystem constants
pub mod files {
    /// Permission bits for a freshly created cache directory
    pub const CACHE_DIR_MODE: u32 = 0o750;
    /// Config file name under the tldr config directory
    pub const CONFIG_FILE: &str = "config.toml";
    /// Directory name under the XDG config home
    pub const CONFIG_DIR: &str = "tldr";
}

/// Operator-facing messages
pub mod messages {
    /// Printed once when a lookup run produced no match at all
    pub const NO_MATCH_HINT: &str = "didn't find any tldrs. have you tried 'tldr --pull'?";
}

/// Display and formatting constants
pub mod display {
    /// Emoji for success status
    pub const SUCCESS_EMOJI: &str = "✅";
    /// Emoji for warning status
    pub const WARNING_EMOJI: &str = "⚠️";
    /// Emoji for error status
    pub const ERROR_EMOJI: &str = "❌";
}
