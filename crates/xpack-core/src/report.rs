//! Progress notification for packaging runs.

use std::path::Path;

/// Callback trait for progress reporting during packaging.
///
/// The core never prints; implement this trait to surface per-entry notices
/// to an operator.
///
/// # Examples
///
/// ```
/// use xpack_core::ProgressCallback;
/// use std::path::Path;
///
/// struct PrintProgress;
///
/// impl ProgressCallback for PrintProgress {
///     fn on_entry_added(&mut self, entry_name: &str, _bytes: u64) {
///         println!("Adding: {entry_name}");
///     }
///
///     fn on_complete(&mut self, output: &Path) {
///         println!("Successfully created {}", output.display());
///     }
/// }
/// ```
pub trait ProgressCallback {
    /// Called after a file has been written to the archive.
    ///
    /// # Arguments
    ///
    /// * `entry_name` - Forward-slash entry name inside the archive
    /// * `bytes` - Uncompressed size of the file
    fn on_entry_added(&mut self, entry_name: &str, bytes: u64);

    /// Called once after the archive has been finalized.
    fn on_complete(&mut self, output: &Path);
}

/// No-op implementation of `ProgressCallback`.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_added(&mut self, _entry_name: &str, _bytes: u64) {}

    fn on_complete(&mut self, _output: &Path) {}
}

/// Progress callback that records every notice, for tests and embedding.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    /// Entry names in notification order.
    pub entries: Vec<String>,
    /// Output path passed to `on_complete`, if it was called.
    pub completed: Option<std::path::PathBuf>,
}

impl ProgressCallback for RecordingProgress {
    fn on_entry_added(&mut self, entry_name: &str, _bytes: u64) {
        self.entries.push(entry_name.to_string());
    }

    fn on_complete(&mut self, output: &Path) {
        self.completed = Some(output.to_path_buf());
    }
}
