//! Output formatter trait for CLI results.

use anyhow::Result;
use xpack_core::ArchiveEntry;
use xpack_core::PackReport;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format a per-entry notice while the archive is being written
    fn format_entry_added(&self, entry_name: &str, bytes: u64);

    /// Format the final result of a packaging run.
    ///
    /// `verified_entries` is the entry count read back from the archive when
    /// `--verify` was requested.
    fn format_pack_result(&self, report: &PackReport, verified_entries: Option<usize>)
    -> Result<()>;

    /// Format the entries a dry run would write
    fn format_plan(&self, entries: &[ArchiveEntry]) -> Result<()>;

    /// Format error message
    fn format_error(&self, error: &anyhow::Error);
}
