//! Builder for packaging runs with a fluent API.

use std::path::Path;
use std::path::PathBuf;

use crate::NoopProgress;
use crate::ProgressCallback;
use crate::creation::config::PackConfig;
use crate::creation::report::PackReport;
use crate::creation::walker::ArchiveEntry;
use crate::creation::walker::plan_entries;
use crate::creation::zip::create_zip;
use crate::error::Result;

/// Builder for packaging a directory tree into an extension bundle.
///
/// # Examples
///
/// ```no_run
/// use xpack_core::creation::Packer;
///
/// let report = Packer::new("/work/extension")
///     .output("addon.xpi")
///     .exclude("node_modules")
///     .compression_level(9)
///     .create()?;
///
/// println!("Packed {} files", report.files_added);
/// # Ok::<(), xpack_core::PackError>(())
/// ```
#[derive(Debug)]
pub struct Packer {
    root: PathBuf,
    config: PackConfig,
}

impl Packer {
    /// Creates a packer for `root` with the compiled-in configuration.
    #[must_use]
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            config: PackConfig::default(),
        }
    }

    /// Sets the output file name, relative to the root.
    #[must_use]
    pub fn output(mut self, name: impl Into<String>) -> Self {
        self.config = self.config.with_output_name(name);
        self
    }

    /// Adds an excluded directory or file name.
    #[must_use]
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.config.exclusions = self.config.exclusions.with_name(name);
        self
    }

    /// Adds an excluded file-name suffix.
    #[must_use]
    pub fn exclude_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.exclusions = self.config.exclusions.with_suffix(suffix);
        self
    }

    /// Sets the deflate level (1-9).
    #[must_use]
    pub fn compression_level(mut self, level: u8) -> Self {
        self.config = self.config.with_compression_level(level);
        self
    }

    /// Sets whether a partial output is deleted on failure.
    #[must_use]
    pub fn remove_partial_on_failure(mut self, remove: bool) -> Self {
        self.config = self.config.with_remove_partial_on_failure(remove);
        self
    }

    /// Replaces the whole configuration.
    #[must_use]
    pub fn config(mut self, config: PackConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn pack_config(&self) -> &PackConfig {
        &self.config
    }

    /// Writes the archive.
    ///
    /// # Errors
    ///
    /// See [`create_zip`].
    pub fn create(&self) -> Result<PackReport> {
        self.create_with_progress(&mut NoopProgress)
    }

    /// Writes the archive, reporting each entry to `progress`.
    ///
    /// # Errors
    ///
    /// See [`create_zip`].
    pub fn create_with_progress(&self, progress: &mut dyn ProgressCallback) -> Result<PackReport> {
        create_zip(&self.root, &self.config, progress)
    }

    /// Lists the entries [`create`](Self::create) would write, without
    /// writing anything.
    ///
    /// # Errors
    ///
    /// See [`plan_entries`].
    pub fn plan(&self) -> Result<Vec<ArchiveEntry>> {
        plan_entries(&self.root, &self.config)
    }
}
