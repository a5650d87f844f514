//! Configuration for packaging operations.

use crate::PackError;
use crate::Result;
use crate::creation::filters::DEFAULT_OUTPUT_NAME;
use crate::creation::filters::ExclusionSet;
use std::path::Component;
use std::path::Path;

/// Default deflate level.
pub const DEFAULT_COMPRESSION_LEVEL: u8 = 6;

/// Configuration for packaging a directory tree.
///
/// # Examples
///
/// ```
/// use xpack_core::creation::PackConfig;
///
/// // Compiled-in defaults: smartproxy.xpi, VCS and prior bundles excluded
/// let config = PackConfig::default();
///
/// let custom = PackConfig::default()
///     .with_output_name("addon.xpi")
///     .with_compression_level(9);
/// assert!(custom.exclusions.contains_name("addon.xpi"));
/// ```
#[derive(Debug, Clone)]
pub struct PackConfig {
    /// File name of the produced archive, relative to the root directory.
    ///
    /// Default: `"smartproxy.xpi"`.
    pub output_name: String,

    /// Names and suffixes that never reach the archive.
    ///
    /// Default: [`ExclusionSet::default`].
    pub exclusions: ExclusionSet,

    /// Deflate level (1-9).
    ///
    /// Default: `6`.
    pub compression_level: u8,

    /// Delete the partially written output when packaging fails.
    ///
    /// Default: `true`.
    pub remove_partial_on_failure: bool,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            exclusions: ExclusionSet::default(),
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            remove_partial_on_failure: true,
        }
    }
}

impl PackConfig {
    /// Creates a new `PackConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the output file name.
    ///
    /// The file-name component is also added to the exclusion set so the
    /// archive can never contain itself.
    #[must_use]
    pub fn with_output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = name.into();
        self.exclusions = exclude_output(self.exclusions, &self.output_name);
        self
    }

    /// Replaces the exclusion set.
    ///
    /// The current output name is kept excluded.
    #[must_use]
    pub fn with_exclusions(mut self, exclusions: ExclusionSet) -> Self {
        self.exclusions = exclude_output(exclusions, &self.output_name);
        self
    }

    /// Sets the compression level.
    ///
    /// Out-of-range values are reported by [`validate`](Self::validate).
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        self.compression_level = level;
        self
    }

    /// Sets whether a partial output is deleted on failure.
    #[must_use]
    pub fn with_remove_partial_on_failure(mut self, remove: bool) -> Self {
        self.remove_partial_on_failure = remove;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Compression level is not in range 1-9
    /// - Output name is empty, absolute, or escapes the root with `..`
    pub fn validate(&self) -> Result<()> {
        if !(1..=9).contains(&self.compression_level) {
            return Err(PackError::InvalidCompressionLevel {
                level: self.compression_level,
            });
        }

        let path = Path::new(&self.output_name);
        let plain = !self.output_name.is_empty()
            && path.file_name().is_some()
            && path
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !plain {
            return Err(PackError::InvalidOutputName {
                name: self.output_name.clone(),
            });
        }

        Ok(())
    }
}

fn exclude_output(exclusions: ExclusionSet, output_name: &str) -> ExclusionSet {
    match Path::new(output_name).file_name().and_then(|n| n.to_str()) {
        Some(name) => exclusions.with_name(name),
        None => exclusions,
    }
}
