//! Textual substitutions applied to the path templates at startup.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::core::constants::search_path::{
    DELIMITER, HOME_SHORTHAND, HOME_VAR, PULL_DIR_PLACEHOLDER,
};

/// Matches `$NAME` and `${NAME}`
static VAR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$(?:\{([A-Za-z_][A-Za-z0-9_]*)\}|([A-Za-z_][A-Za-z0-9_]*))")
        .expect("variable pattern is a valid regex")
});

/// Look a variable up in the process environment.
pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Replace every `(pull-dir)` token in `paths` with `pull_dir`.
pub fn substitute_pull_dir(paths: &str, pull_dir: &str) -> String {
    paths.replace(PULL_DIR_PLACEHOLDER, pull_dir)
}

/// Rewrite a leading `~` of every `:`-separated entry to `$HOME`.
///
/// Only a bare `~` or `~/...` is rewritten; `~user` forms are left alone.
pub fn expand_home(input: &str) -> String {
    input
        .split(DELIMITER)
        .map(|entry| {
            let mut chars = entry.chars();
            match (chars.next(), chars.next()) {
                (Some(HOME_SHORTHAND), None) => HOME_VAR.to_string(),
                (Some(HOME_SHORTHAND), Some('/')) => format!("{HOME_VAR}{}", &entry[1..]),
                _ => entry.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(&*DELIMITER.to_string())
}

/// Expand `$NAME` and `${NAME}` references using `lookup`.
///
/// References to variables `lookup` does not know, and anything that is not a
/// well-formed reference, are kept as literal text.
///
/// # Examples
/// ```
/// use tldrs::config::expand::expand_vars;
///
/// let lookup = |name: &str| (name == "HOME").then(|| "/home/me".to_string());
/// assert_eq!(expand_vars("$HOME/.tldr", lookup), "/home/me/.tldr");
/// assert_eq!(expand_vars("${NOPE}/x", lookup), "${NOPE}/x");
/// ```
pub fn expand_vars<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    VAR_PATTERN
        .replace_all(input, |caps: &Captures<'_>| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str())
                .unwrap_or_default();
            lookup(name).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Home shorthand then variable expansion, as applied to both templates.
pub fn expand<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    expand_vars(&expand_home(input), lookup)
}
