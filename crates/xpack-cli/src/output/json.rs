//! JSON output formatter for machine-readable results.

use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use xpack_core::ArchiveEntry;
use xpack_core::PackReport;

const OPERATION_PACK: &str = "pack";
const OPERATION_PLAN: &str = "plan";

pub struct JsonFormatter;

/// Envelope printed for every run: `data` on success, `error` on failure.
#[derive(Debug, Serialize)]
struct JsonOutput<T> {
    operation: &'static str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> JsonOutput<T> {
    const fn success(operation: &'static str, data: T) -> Self {
        Self {
            operation,
            status: "success",
            data: Some(data),
            error: None,
        }
    }
}

impl JsonOutput<()> {
    const fn failure(error: String) -> Self {
        Self {
            operation: OPERATION_PACK,
            status: "error",
            data: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Serialize)]
struct PackOutput {
    output_path: String,
    entries: Vec<String>,
    files_added: usize,
    bytes_written: u64,
    bytes_compressed: u64,
    compression_ratio: f64,
    compression_percentage: f64,
    duration_ms: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    verified_entries: Option<usize>,
}

impl PackOutput {
    fn new(report: &PackReport, verified_entries: Option<usize>) -> Self {
        Self {
            output_path: report.output_path.display().to_string(),
            entries: report.entries.clone(),
            files_added: report.files_added,
            bytes_written: report.bytes_written,
            bytes_compressed: report.bytes_compressed,
            compression_ratio: report.compression_ratio(),
            compression_percentage: report.compression_percentage(),
            duration_ms: report.duration.as_millis(),
            verified_entries,
        }
    }
}

#[derive(Debug, Serialize)]
struct PlannedEntry<'a> {
    name: &'a str,
    size: u64,
}

#[derive(Debug, Serialize)]
struct PlanOutput<'a> {
    entries: Vec<PlannedEntry<'a>>,
    total_entries: usize,
    total_size: u64,
}

impl<'a> PlanOutput<'a> {
    fn new(entries: &'a [ArchiveEntry]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|e| PlannedEntry {
                    name: &e.entry_name,
                    size: e.size,
                })
                .collect(),
            total_entries: entries.len(),
            total_size: entries.iter().map(|e| e.size).sum(),
        }
    }
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    // Entries are reported in the final document only.
    fn format_entry_added(&self, _entry_name: &str, _bytes: u64) {}

    fn format_pack_result(
        &self,
        report: &PackReport,
        verified_entries: Option<usize>,
    ) -> Result<()> {
        let output = JsonOutput::success(OPERATION_PACK, PackOutput::new(report, verified_entries));
        Self::output(&output)
    }

    fn format_plan(&self, entries: &[ArchiveEntry]) -> Result<()> {
        let output = JsonOutput::success(OPERATION_PLAN, PlanOutput::new(entries));
        Self::output(&output)
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::failure(format!("{error:#}"));
        let _ = Self::output(&output);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn test_failure_envelope_omits_data() {
        let json = serde_json::to_value(JsonOutput::failure("boom".to_string())).unwrap();
        assert_eq!(json["operation"], "pack");
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"], "boom");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_success_envelope_omits_error() {
        let json = serde_json::to_value(JsonOutput::success(OPERATION_PLAN, 3)).unwrap();
        assert_eq!(json["operation"], "plan");
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"], 3);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_pack_output_fields() {
        let mut report = PackReport::new("/work/ext/out.xpi");
        report.record_entry("a.txt", 100);
        report.record_entry("sub/b.txt", 300);
        report.bytes_compressed = 200;
        report.duration = Duration::from_millis(42);

        let json = serde_json::to_value(PackOutput::new(&report, None)).unwrap();

        assert_eq!(json["output_path"], "/work/ext/out.xpi");
        assert_eq!(json["entries"], serde_json::json!(["a.txt", "sub/b.txt"]));
        assert_eq!(json["files_added"], 2);
        assert_eq!(json["bytes_written"], 400);
        assert_eq!(json["duration_ms"], 42);
        assert!(json.get("verified_entries").is_none());
    }

    #[test]
    fn test_pack_output_includes_verification() {
        let report = PackReport::new("out.xpi");
        let json = serde_json::to_value(PackOutput::new(&report, Some(0))).unwrap();
        assert_eq!(json["verified_entries"], 0);
    }

    #[test]
    fn test_plan_output_totals() {
        let entries = vec![
            ArchiveEntry {
                path: PathBuf::from("/r/a.js"),
                entry_name: "a.js".to_string(),
                size: 10,
            },
            ArchiveEntry {
                path: PathBuf::from("/r/lib/b.js"),
                entry_name: "lib/b.js".to_string(),
                size: 5,
            },
        ];

        let json = serde_json::to_value(PlanOutput::new(&entries)).unwrap();

        assert_eq!(json["total_entries"], 2);
        assert_eq!(json["total_size"], 15);
        assert_eq!(json["entries"][1]["name"], "lib/b.js");
    }
}
