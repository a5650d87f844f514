//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use xpack_core::ArchiveEntry;
use xpack_core::PackReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    out: Term,
    err: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            out: Term::stdout(),
            err: Term::stderr(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;

        if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn write_statistics(&self, report: &PackReport) {
        let _ = self.out.write_line(&format!(
            "  Files added:      {}",
            report.files_added
        ));
        let _ = self.out.write_line(&format!(
            "  Total size:       {}",
            Self::format_size(report.bytes_written)
        ));
        let _ = self.out.write_line(&format!(
            "  Compressed size:  {}",
            Self::format_size(report.bytes_compressed)
        ));
        if report.bytes_written > 0 {
            let _ = self.out.write_line(&format!(
                "  Compression:      {:.1}%",
                report.compression_percentage()
            ));
        }
        let _ = self
            .out
            .write_line(&format!("  Duration:         {:?}", report.duration));
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_entry_added(&self, entry_name: &str, bytes: u64) {
        if self.quiet {
            return;
        }

        if self.verbose {
            let _ = self.out.write_line(&format!(
                "Adding: {entry_name} ({})",
                Self::format_size(bytes)
            ));
        } else {
            let _ = self.out.write_line(&format!("Adding: {entry_name}"));
        }
    }

    fn format_pack_result(
        &self,
        report: &PackReport,
        verified_entries: Option<usize>,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let output = report.output_path.display();
        if self.use_colors {
            let _ = self.out.write_line(&format!(
                "{} {output}",
                style("Successfully created").green().bold()
            ));
        } else {
            let _ = self.out.write_line(&format!("Successfully created {output}"));
        }

        if let Some(count) = verified_entries {
            let _ = self
                .out
                .write_line(&format!("Verified {count} entries in archive"));
        }

        if self.verbose {
            self.write_statistics(report);
        }

        Ok(())
    }

    fn format_plan(&self, entries: &[ArchiveEntry]) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for entry in entries {
            if self.verbose {
                let _ = self.out.write_line(&format!(
                    "{:>10}  {}",
                    Self::format_size(entry.size),
                    entry.entry_name
                ));
            } else {
                let _ = self.out.write_line(&entry.entry_name);
            }
        }

        let total: u64 = entries.iter().map(|e| e.size).sum();
        let summary = format!(
            "Dry run: {} files ({}) would be added",
            entries.len(),
            Self::format_size(total)
        );
        if self.use_colors {
            let _ = self.out.write_line(&style(summary).dim().to_string());
        } else {
            let _ = self.out.write_line(&summary);
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always shown, even in quiet mode
        if self.use_colors {
            let _ = self
                .err
                .write_line(&format!("{} {error:#}", style("Error:").red().bold()));
        } else {
            let _ = self.err.write_line(&format!("Error: {error:#}"));
        }
    }
}
