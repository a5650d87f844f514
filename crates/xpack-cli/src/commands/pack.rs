//! Pack command: the default action of `xpack`.

use crate::cli::Cli;
use crate::error::add_pack_context;
use crate::output::OutputFormatter;
use crate::progress::FormatterProgress;
use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use std::path::Path;
use std::path::PathBuf;
use xpack_core::PackReport;
use xpack_core::Packer;
use xpack_core::list_archive;

/// Packages the selected root, or lists what would be packaged on
/// `--dry-run`.
pub fn execute(cli: &Cli, formatter: &dyn OutputFormatter) -> Result<()> {
    let root = resolve_root(cli.root.as_deref())?;
    let packer = build_packer(cli, &root);

    if cli.dry_run {
        let entries = add_pack_context(packer.plan(), &root)?;
        return formatter.format_plan(&entries);
    }

    let mut progress = FormatterProgress::new(formatter);
    let report = add_pack_context(packer.create_with_progress(&mut progress), &root)?;

    let verified = if cli.verify {
        Some(verify_archive(&report, progress.entries_seen())?)
    } else {
        None
    };

    formatter.format_pack_result(&report, verified)
}

/// The working directory is only consulted here; the core takes an explicit
/// root.
fn resolve_root(root: Option<&Path>) -> Result<PathBuf> {
    match root {
        Some(root) => Ok(root.to_path_buf()),
        None => std::env::current_dir().context("Cannot determine the current directory"),
    }
}

fn build_packer(cli: &Cli, root: &Path) -> Packer {
    let mut packer = Packer::new(root).output(cli.output.as_str());
    for name in &cli.exclude {
        packer = packer.exclude(name.as_str());
    }
    if let Some(level) = cli.compression_level {
        packer = packer.compression_level(level);
    }
    packer
}

fn verify_archive(report: &PackReport, expected: usize) -> Result<usize> {
    let names = add_pack_context(list_archive(&report.output_path), &report.output_path)
        .context("Verification failed: archive cannot be read back")?;

    if names.len() != expected {
        bail!(
            "Verification failed: '{}' holds {} entries, expected {expected}",
            report.output_path.display(),
            names.len()
        );
    }

    if let Some((found, written)) = names
        .iter()
        .zip(&report.entries)
        .find(|(found, written)| found != written)
    {
        bail!(
            "Verification failed: '{}' lists '{found}' where '{written}' was written",
            report.output_path.display()
        );
    }

    Ok(names.len())
}
