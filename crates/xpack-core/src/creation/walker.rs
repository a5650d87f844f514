//! Directory tree walking with exclusion pruning.
//!
//! Each directory is listed once, sorted by file name, and stripped of
//! excluded subdirectories before anything below it is visited. An excluded
//! directory is therefore never opened. Files are filtered by name and suffix
//! as they are yielded.

use crate::PackError;
use crate::Result;
use crate::creation::config::PackConfig;
use crate::creation::filters;
use crate::creation::filters::ExclusionSet;
use std::ffi::OsString;
use std::fs;
use std::fs::FileType;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

/// A file that passed every exclusion rule, paired with its entry name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Full filesystem path of the file.
    pub path: PathBuf,

    /// Forward-slash path relative to the root, used inside the archive.
    pub entry_name: String,

    /// Size in bytes at traversal time.
    pub size: u64,
}

/// Walks a directory tree, pruning excluded directories before descent.
///
/// Entries in each directory are visited in file-name order, so two runs over
/// the same tree yield the same sequence.
///
/// # Examples
///
/// ```no_run
/// use xpack_core::creation::ExclusionSet;
/// use xpack_core::creation::walker::FilteredWalker;
/// use std::path::Path;
///
/// let exclusions = ExclusionSet::default();
/// let walker = FilteredWalker::new(Path::new("/work/extension"), &exclusions);
///
/// for entry in walker.walk() {
///     let entry = entry?;
///     println!("Would add: {}", entry.entry_name);
/// }
/// # Ok::<(), xpack_core::PackError>(())
/// ```
pub struct FilteredWalker<'a> {
    root: &'a Path,
    exclusions: &'a ExclusionSet,
    skip_path: Option<&'a Path>,
}

impl<'a> FilteredWalker<'a> {
    /// Creates a walker for `root`.
    ///
    /// `root` should already be absolute; entry names are computed relative
    /// to it verbatim.
    #[must_use]
    pub fn new(root: &'a Path, exclusions: &'a ExclusionSet) -> Self {
        Self {
            root,
            exclusions,
            skip_path: None,
        }
    }

    /// Never yields the file at `path`, whatever its name.
    ///
    /// Used to keep the archive being written out of its own contents.
    #[must_use]
    pub fn skip_path(mut self, path: &'a Path) -> Self {
        self.skip_path = Some(path);
        self
    }

    /// Returns an iterator over the files to archive.
    ///
    /// Directories are listed lazily, one level at a time, as the iterator
    /// reaches them.
    ///
    /// # Errors
    ///
    /// Items are errors if:
    /// - A directory cannot be read
    /// - File metadata cannot be read
    /// - A file name is not valid UTF-8
    ///
    /// The iterator ends after the first error.
    #[must_use]
    pub fn walk(&self) -> Walk<'_, 'a> {
        Walk {
            walker: self,
            stack: Vec::new(),
            started: false,
            failed: false,
            #[cfg(test)]
            listed: Vec::new(),
        }
    }

    /// Builds an `ArchiveEntry`, or `Ok(None)` if the entry is not archived.
    fn build_entry(&self, child: &Child) -> Result<Option<ArchiveEntry>> {
        if child
            .name
            .to_str()
            .is_some_and(|name| self.exclusions.is_excluded_file(name))
        {
            return Ok(None);
        }

        if self.skip_path.is_some_and(|skip| skip == child.path.as_path()) {
            return Ok(None);
        }

        let size = if child.file_type.is_file() {
            fs::metadata(&child.path)
                .map_err(|e| PackError::traversal(&child.path, e))?
                .len()
        } else if child.file_type.is_symlink() {
            // Only links that resolve to a regular file are archived.
            match fs::metadata(&child.path) {
                Ok(target) if target.is_file() => target.len(),
                Ok(_) => return Ok(None),
                Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
                Err(e) => return Err(e.into()),
            }
        } else {
            return Ok(None);
        };

        let entry_name = filters::compute_entry_name(&child.path, self.root)?;

        Ok(Some(ArchiveEntry {
            path: child.path.clone(),
            entry_name,
            size,
        }))
    }
}

/// One directory entry that survived pruning.
struct Child {
    path: PathBuf,
    name: OsString,
    file_type: FileType,
}

/// Depth-first iterator returned by [`FilteredWalker::walk`].
pub struct Walk<'w, 'a> {
    walker: &'w FilteredWalker<'a>,
    stack: Vec<std::vec::IntoIter<Child>>,
    started: bool,
    failed: bool,
    #[cfg(test)]
    listed: Vec<PathBuf>,
}

impl Walk<'_, '_> {
    /// Lists `dir` and makes it the next level to visit.
    fn descend(&mut self, dir: &Path) -> Result<()> {
        #[cfg(test)]
        self.listed.push(dir.to_path_buf());

        let children = read_level(dir, self.walker.exclusions)?;
        self.stack.push(children.into_iter());
        Ok(())
    }

    fn fail(&mut self, err: PackError) -> Option<Result<ArchiveEntry>> {
        self.failed = true;
        self.stack.clear();
        Some(Err(err))
    }
}

impl Iterator for Walk<'_, '_> {
    type Item = Result<ArchiveEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        if !self.started {
            self.started = true;
            let root = self.walker.root;
            if let Err(e) = self.descend(root) {
                return self.fail(e);
            }
        }

        loop {
            let Some(child) = self.stack.last_mut()?.next() else {
                self.stack.pop();
                continue;
            };

            if child.file_type.is_dir() {
                if let Err(e) = self.descend(&child.path) {
                    return self.fail(e);
                }
                continue;
            }

            match self.walker.build_entry(&child) {
                Ok(Some(entry)) => return Some(Ok(entry)),
                Ok(None) => {}
                Err(e) => return self.fail(e),
            }
        }
    }
}

/// Reads one directory level, drops excluded subdirectories and sorts the
/// rest by file name.
fn read_level(dir: &Path, exclusions: &ExclusionSet) -> Result<Vec<Child>> {
    let mut children = Vec::new();

    for entry in fs::read_dir(dir).map_err(|e| PackError::traversal(dir, e))? {
        let entry = entry.map_err(|e| PackError::traversal(dir, e))?;
        let path = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|e| PackError::traversal(&path, e))?;
        let name = entry.file_name();

        if file_type.is_dir()
            && name
                .to_str()
                .is_some_and(|name| exclusions.is_excluded_dir(name))
        {
            continue;
        }

        children.push(Child {
            path,
            name,
            file_type,
        });
    }

    children.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(children)
}

/// Collects every entry the walker would yield.
///
/// # Errors
///
/// Returns the first traversal error encountered.
pub fn collect_entries(walker: &FilteredWalker<'_>) -> Result<Vec<ArchiveEntry>> {
    walker.walk().collect()
}

/// Lists the entries a packaging run over `root` would write, in order.
///
/// Nothing is created on disk. An existing file at the configured output path
/// is skipped exactly as a real run would skip it.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the root is missing or
/// not a directory, or traversal fails.
pub fn plan_entries(root: &Path, config: &PackConfig) -> Result<Vec<ArchiveEntry>> {
    config.validate()?;
    let root = resolve_root(root)?;
    let output_path = root.join(&config.output_name);
    let walker = FilteredWalker::new(&root, &config.exclusions).skip_path(&output_path);
    collect_entries(&walker)
}

/// Resolves `root` to an absolute directory path.
///
/// # Errors
///
/// Returns `SourceNotFound` if the path does not exist, `NotADirectory` if it
/// is not a directory, or an I/O error if it cannot be canonicalized.
pub fn resolve_root(root: &Path) -> Result<PathBuf> {
    if !root.exists() {
        return Err(PackError::SourceNotFound {
            path: root.to_path_buf(),
        });
    }
    let resolved = root.canonicalize()?;
    if !resolved.is_dir() {
        return Err(PackError::NotADirectory { path: resolved });
    }
    Ok(resolved)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(entries: &[ArchiveEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.entry_name.as_str()).collect()
    }

    fn walk_all(root: &Path, exclusions: &ExclusionSet) -> Vec<ArchiveEntry> {
        collect_entries(&FilteredWalker::new(root, exclusions)).unwrap()
    }

    #[test]
    fn test_walker_basic_directory() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::write(root.join("manifest.json"), "{}").unwrap();
        fs::create_dir(root.join("popup")).unwrap();
        fs::write(root.join("popup/popup.js"), "js").unwrap();

        let entries = walk_all(root, &ExclusionSet::empty());

        assert_eq!(names(&entries), vec!["manifest.json", "popup/popup.js"]);
        assert_eq!(entries[0].size, 2);
        assert_eq!(entries[1].path, root.join("popup/popup.js"));
    }

    #[test]
    fn test_walker_yields_no_directories() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("empty/nested")).unwrap();

        let entries = walk_all(temp.path(), &ExclusionSet::empty());
        assert!(entries.is_empty());
    }

    #[test]
    fn test_walker_prunes_excluded_directory() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir(root.join(".git")).unwrap();
        fs::write(root.join(".git/secret.txt"), "hidden").unwrap();
        fs::write(root.join("secret.txt"), "visible").unwrap();

        let entries = walk_all(root, &ExclusionSet::default());
        assert_eq!(names(&entries), vec!["secret.txt"]);
    }

    #[test]
    fn test_walker_prunes_nested_excluded_directory() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir_all(root.join("lib/node_modules/pkg")).unwrap();
        fs::write(root.join("lib/node_modules/pkg/index.js"), "x").unwrap();
        fs::write(root.join("lib/utils.js"), "y").unwrap();

        let exclusions = ExclusionSet::empty().with_name("node_modules");
        let entries = walk_all(root, &exclusions);
        assert_eq!(names(&entries), vec!["lib/utils.js"]);
    }

    #[test]
    fn test_walker_never_lists_excluded_directories() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir_all(root.join(".git/objects/ab")).unwrap();
        fs::write(root.join(".git/objects/ab/cdef"), "blob").unwrap();
        fs::create_dir_all(root.join("lib/node_modules/pkg")).unwrap();
        fs::write(root.join("lib/node_modules/pkg/index.js"), "x").unwrap();
        fs::write(root.join("lib/utils.js"), "y").unwrap();
        fs::write(root.join("a.txt"), "a").unwrap();

        let exclusions = ExclusionSet::default().with_name("node_modules");
        let walker = FilteredWalker::new(root, &exclusions);
        let mut walk = walker.walk();
        let entries: Vec<ArchiveEntry> = walk.by_ref().collect::<Result<_>>().unwrap();

        assert_eq!(names(&entries), vec!["a.txt", "lib/utils.js"]);
        assert_eq!(walk.listed, vec![root.to_path_buf(), root.join("lib")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_walker_skips_unreadable_excluded_directory() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let root = temp.path();
        let locked = root.join(".git");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("config"), "x").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        fs::write(root.join("a.txt"), "a").unwrap();

        let result = collect_entries(&FilteredWalker::new(root, &ExclusionSet::default()));

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        assert_eq!(names(&result.unwrap()), vec!["a.txt"]);
    }

    #[test]
    fn test_walker_stops_after_first_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        let exclusions = ExclusionSet::empty();
        let walker = FilteredWalker::new(&missing, &exclusions);
        let mut walk = walker.walk();

        assert!(matches!(walk.next(), Some(Err(PackError::Traversal { .. }))));
        assert!(walk.next().is_none());
    }

    #[test]
    fn test_walker_skips_excluded_files_and_suffixes() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::write(root.join("build_xpi.py"), "script").unwrap();
        fs::write(root.join(".gitignore"), "*.xpi").unwrap();
        fs::write(root.join("old.xpi"), "x").unwrap();
        fs::create_dir(root.join("dist")).unwrap();
        fs::write(root.join("dist/release.zip"), "z").unwrap();
        fs::write(root.join("keep.js"), "k").unwrap();

        let entries = walk_all(root, &ExclusionSet::default());
        assert_eq!(names(&entries), vec!["keep.js"]);
    }

    #[test]
    fn test_walker_suffix_does_not_prune_directories() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir(root.join("vendor.zip")).unwrap();
        fs::write(root.join("vendor.zip/lib.js"), "x").unwrap();

        let entries = walk_all(root, &ExclusionSet::default());
        assert_eq!(names(&entries), vec!["vendor.zip/lib.js"]);
    }

    #[test]
    fn test_walker_skip_path() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::write(root.join("bundle.pkg"), "old output").unwrap();
        fs::write(root.join("a.txt"), "a").unwrap();

        let output = root.join("bundle.pkg");
        let exclusions = ExclusionSet::empty();
        let walker = FilteredWalker::new(root, &exclusions).skip_path(&output);
        let entries = collect_entries(&walker).unwrap();

        assert_eq!(names(&entries), vec!["a.txt"]);
    }

    #[test]
    fn test_walker_sorted_order() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        for name in ["c.txt", "a.txt", "b.txt"] {
            fs::write(root.join(name), name).unwrap();
        }

        let entries = walk_all(root, &ExclusionSet::empty());
        assert_eq!(names(&entries), vec!["a.txt", "b.txt", "c.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_walker_symlink_rules() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::write(root.join("target.txt"), "content").unwrap();
        fs::create_dir(root.join("dir")).unwrap();
        fs::write(root.join("dir/inner.txt"), "inner").unwrap();
        std::os::unix::fs::symlink(root.join("target.txt"), root.join("link.txt")).unwrap();
        std::os::unix::fs::symlink(root.join("dir"), root.join("dirlink")).unwrap();
        std::os::unix::fs::symlink(root.join("missing"), root.join("dangling")).unwrap();

        let entries = walk_all(root, &ExclusionSet::empty());

        assert_eq!(
            names(&entries),
            vec!["dir/inner.txt", "link.txt", "target.txt"]
        );
        let link = entries.iter().find(|e| e.entry_name == "link.txt").unwrap();
        assert_eq!(link.size, 7);
    }

    #[test]
    fn test_resolve_root() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        let resolved = resolve_root(temp.path()).unwrap();
        assert!(resolved.is_absolute());

        assert!(matches!(
            resolve_root(&temp.path().join("missing")),
            Err(PackError::SourceNotFound { .. })
        ));
        assert!(matches!(
            resolve_root(&file),
            Err(PackError::NotADirectory { .. })
        ));
    }

    #[test]
    fn test_plan_entries_skips_existing_output() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::write(root.join("a.txt"), "a").unwrap();
        fs::write(root.join("bundle.pkg"), "previous run").unwrap();

        let config = PackConfig::new()
            .with_output_name("bundle.pkg")
            .with_exclusions(ExclusionSet::empty());
        let entries = plan_entries(root, &config).unwrap();

        assert_eq!(names(&entries), vec!["a.txt"]);
    }

    #[test]
    fn test_plan_entries_rejects_invalid_config() {
        let temp = TempDir::new().unwrap();
        let config = PackConfig::new().with_compression_level(0);

        assert!(matches!(
            plan_entries(temp.path(), &config),
            Err(PackError::InvalidCompressionLevel { level: 0 })
        ));
    }

    #[test]
    fn test_walker_missing_root_errors() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        let exclusions = ExclusionSet::empty();

        let result = collect_entries(&FilteredWalker::new(&missing, &exclusions));
        assert!(matches!(result, Err(PackError::Traversal { .. })));
    }
}
