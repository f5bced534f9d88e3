use std::path::{Component, Path, PathBuf};

use crate::core::constants::search_path::DELIMITER;

/// Ordered directories consulted when resolving a document name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    /// Split an already expanded search path string. Empty entries are dropped.
    pub fn parse(paths: &str) -> Self {
        let dirs = paths
            .split(DELIMITER)
            .filter(|entry| !entry.is_empty())
            .map(PathBuf::from)
            .collect();
        Self { dirs }
    }

    pub fn from_dirs<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    /// Every `<dir>/<name>` candidate, in search order.
    ///
    /// A leading root in `name` is dropped so candidates never leave their
    /// directory; names climbing out with `..` have no candidates at all.
    pub fn candidates<'a>(&'a self, name: &'a str) -> impl Iterator<Item = PathBuf> + 'a {
        let relative = relative_name(name);
        self.dirs
            .iter()
            .filter_map(move |dir| relative.as_ref().map(|rel| dir.join(rel)))
    }
}

/// `name` as a path relative to a search directory
fn relative_name(name: &str) -> Option<PathBuf> {
    let mut relative = PathBuf::new();
    for component in Path::new(name).components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
            Component::ParentDir => return None,
            Component::Normal(part) => relative.push(part),
        }
    }
    (!relative.as_os_str().is_empty()).then_some(relative)
}
