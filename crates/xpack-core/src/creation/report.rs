//! Packaging operation reporting.

use std::path::PathBuf;
use std::time::Duration;

/// Report of a completed packaging run.
///
/// Only produced on success; a failed run returns an error instead.
///
/// # Examples
///
/// ```
/// use xpack_core::creation::PackReport;
///
/// let mut report = PackReport::default();
/// report.record_entry("manifest.json", 1000);
/// report.bytes_compressed = 400;
///
/// assert_eq!(report.files_added, 1);
/// assert_eq!(report.compression_ratio(), 2.5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackReport {
    /// Absolute path of the produced archive.
    pub output_path: PathBuf,

    /// Entry names in the order they were written.
    pub entries: Vec<String>,

    /// Number of files added to the archive.
    pub files_added: usize,

    /// Total uncompressed bytes read from disk.
    pub bytes_written: u64,

    /// Size of the finished archive file.
    pub bytes_compressed: u64,

    /// Wall-clock duration of the run.
    pub duration: Duration,
}

impl PackReport {
    /// Creates an empty report for the given output path.
    #[must_use]
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            ..Self::default()
        }
    }

    /// Records one written entry.
    pub fn record_entry(&mut self, name: impl Into<String>, bytes: u64) {
        self.entries.push(name.into());
        self.files_added += 1;
        self.bytes_written += bytes;
    }

    /// Returns the compression ratio (uncompressed / compressed).
    ///
    /// Returns 0.0 if either side is 0.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.bytes_compressed == 0 || self.bytes_written == 0 {
            return 0.0;
        }
        self.bytes_written as f64 / self.bytes_compressed as f64
    }

    /// Returns the space saved as a percentage of the uncompressed size.
    ///
    /// Negative when the archive is larger than its contents, which happens
    /// for tiny or already-compressed inputs.
    #[must_use]
    pub fn compression_percentage(&self) -> f64 {
        if self.bytes_written == 0 {
            return 0.0;
        }
        (1.0 - self.bytes_compressed as f64 / self.bytes_written as f64) * 100.0
    }
}
