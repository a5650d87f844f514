//! Exclusion rules and entry-name mapping for archive packaging.
//!
//! An [`ExclusionSet`] holds literal names, which apply to directories and
//! files alike, and file-name suffixes, which apply to files only. Directory
//! names are checked before descending so excluded subtrees are never walked.

use crate::PackError;
use crate::Result;
use std::collections::BTreeSet;
use std::path::Component;
use std::path::Path;

/// Default name of the produced bundle.
pub const DEFAULT_OUTPUT_NAME: &str = "smartproxy.xpi";

/// Names excluded by default: VCS metadata, the legacy packaging script and
/// previously produced bundles.
pub const DEFAULT_EXCLUDED_NAMES: &[&str] = &[
    ".git",
    ".gitignore",
    "build_xpi.py",
    "smartproxy.zip",
    "smartproxy.xpi",
];

/// Archive suffixes excluded by default: the bundle's own format and plain
/// ZIP.
pub const DEFAULT_EXCLUDED_SUFFIXES: &[&str] = &[".xpi", ".zip"];

/// Fixed collection of names and suffixes that never reach the archive.
///
/// # Examples
///
/// ```
/// use xpack_core::creation::ExclusionSet;
///
/// let set = ExclusionSet::default();
/// assert!(set.is_excluded_dir(".git"));
/// assert!(set.is_excluded_file("old-build.zip"));
/// assert!(!set.is_excluded_file("manifest.json"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet {
    names: BTreeSet<String>,
    suffixes: Vec<String>,
}

impl Default for ExclusionSet {
    /// Creates the compiled-in exclusion set.
    fn default() -> Self {
        Self::from_parts(
            DEFAULT_EXCLUDED_NAMES.iter().copied(),
            DEFAULT_EXCLUDED_SUFFIXES.iter().copied(),
        )
    }
}

impl ExclusionSet {
    /// Creates an exclusion set that excludes nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            names: BTreeSet::new(),
            suffixes: Vec::new(),
        }
    }

    /// Creates an exclusion set from literal names and suffixes.
    ///
    /// # Examples
    ///
    /// ```
    /// use xpack_core::creation::ExclusionSet;
    ///
    /// let set = ExclusionSet::from_parts([".git", "out.xpi"], [".xpi", ".zip"]);
    /// assert!(set.contains_name("out.xpi"));
    /// assert!(set.matches_suffix("other.zip"));
    /// ```
    #[must_use]
    pub fn from_parts<N, S>(names: N, suffixes: S) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        let mut set = Self::empty();
        set.names.extend(names.into_iter().map(Into::into));
        for suffix in suffixes {
            set.push_suffix(suffix.into());
        }
        set
    }

    /// Adds a literal name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.names.insert(name.into());
        self
    }

    /// Adds a file-name suffix such as `".xpi"`.
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.push_suffix(suffix.into());
        self
    }

    fn push_suffix(&mut self, suffix: String) {
        if !suffix.is_empty() && !self.suffixes.contains(&suffix) {
            self.suffixes.push(suffix);
        }
    }

    /// Returns whether `name` is excluded by exact match.
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Returns whether `name` ends with one of the excluded suffixes.
    #[must_use]
    pub fn matches_suffix(&self, name: &str) -> bool {
        self.suffixes.iter().any(|suffix| name.ends_with(suffix.as_str()))
    }

    /// Returns whether a directory with this name must not be descended into.
    ///
    /// Only exact names prune directories; suffixes apply to files.
    #[must_use]
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.contains_name(name)
    }

    /// Returns whether a file with this name must be skipped.
    #[must_use]
    pub fn is_excluded_file(&self, name: &str) -> bool {
        self.contains_name(name) || self.matches_suffix(name)
    }

    /// Iterates over the literal names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Iterates over the suffixes in insertion order.
    pub fn suffixes(&self) -> impl Iterator<Item = &str> {
        self.suffixes.iter().map(String::as_str)
    }
}

/// Returns the final component of `path` as UTF-8, if it has one.
///
/// Names that are not valid UTF-8 never match an exclusion.
pub(crate) fn file_name_str(path: &Path) -> Option<&str> {
    path.file_name().and_then(|name| name.to_str())
}

/// Computes the archive entry name of `source_path` relative to `root`.
///
/// Components are joined with `/` regardless of the host separator, so the
/// result is identical on every platform.
///
/// # Errors
///
/// Returns an error if:
/// - `source_path` is not under `root`
/// - A component is not valid UTF-8
/// - The relative path is empty or contains `..`
///
/// # Examples
///
/// ```
/// use xpack_core::creation::filters;
/// use std::path::Path;
///
/// let root = Path::new("/home/user/extension");
/// let source = Path::new("/home/user/extension/popup/popup.js");
///
/// let name = filters::compute_entry_name(source, root).unwrap();
/// assert_eq!(name, "popup/popup.js");
/// ```
pub fn compute_entry_name(source_path: &Path, root: &Path) -> Result<String> {
    let invalid = || PackError::InvalidEntryName {
        path: source_path.to_path_buf(),
    };

    let relative = source_path.strip_prefix(root).map_err(|_| invalid())?;

    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str().ok_or_else(invalid)?),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(invalid());
            }
        }
    }

    if parts.is_empty() {
        return Err(invalid());
    }

    Ok(parts.join("/"))
}
