//! Per-entry progress reporting for CLI operations.

use crate::output::OutputFormatter;
use std::path::Path;
use xpack_core::ProgressCallback;

/// Forwards core progress notices to the selected output formatter.
pub struct FormatterProgress<'a> {
    formatter: &'a dyn OutputFormatter,
    entries_seen: usize,
}

impl<'a> FormatterProgress<'a> {
    #[must_use]
    pub fn new(formatter: &'a dyn OutputFormatter) -> Self {
        Self {
            formatter,
            entries_seen: 0,
        }
    }

    #[must_use]
    pub const fn entries_seen(&self) -> usize {
        self.entries_seen
    }
}

impl ProgressCallback for FormatterProgress<'_> {
    fn on_entry_added(&mut self, entry_name: &str, bytes: u64) {
        self.entries_seen += 1;
        self.formatter.format_entry_added(entry_name, bytes);
    }

    // The final line is printed from the report, which carries statistics.
    fn on_complete(&mut self, _output: &Path) {}
}
