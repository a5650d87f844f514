//! High-level public API for packaging.

use std::path::Path;

use crate::ProgressCallback;
use crate::Result;
use crate::creation::ArchiveEntry;
use crate::creation::ExclusionSet;
use crate::creation::PackConfig;
use crate::creation::PackReport;
use crate::creation::walker::plan_entries;
use crate::creation::zip::create_zip;

/// Packages `root_dir` into `root_dir/<output_name>`.
///
/// `output_name` is always added to `exclusions`, so the archive never
/// contains itself even if a previous run left it in place.
///
/// # Arguments
///
/// * `root_dir` - Existing directory to package
/// * `output_name` - Archive file name, relative to `root_dir`
/// * `exclusions` - Names and suffixes that never reach the archive
///
/// # Errors
///
/// Returns an error if:
/// - Root directory does not exist or is not a directory
/// - Traversal fails
/// - The archive cannot be created, written or finalized
///
/// # Examples
///
/// ```no_run
/// use xpack_core::create_archive;
/// use xpack_core::creation::ExclusionSet;
///
/// let report = create_archive(".", "smartproxy.xpi", &ExclusionSet::default())?;
/// println!("Packed {} files", report.files_added);
/// # Ok::<(), xpack_core::PackError>(())
/// ```
pub fn create_archive<P: AsRef<Path>>(
    root_dir: P,
    output_name: &str,
    exclusions: &ExclusionSet,
) -> Result<PackReport> {
    let config = config_for(output_name, exclusions);
    create_zip(root_dir.as_ref(), &config, &mut crate::NoopProgress)
}

/// Packages `root_dir` with a full configuration and progress reporting.
///
/// # Errors
///
/// Same as [`create_archive`], plus configuration validation errors.
pub fn create_archive_with_progress<P: AsRef<Path>>(
    root_dir: P,
    config: &PackConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<PackReport> {
    create_zip(root_dir.as_ref(), config, progress)
}

/// Lists the entries [`create_archive`] would write, without writing.
///
/// # Errors
///
/// Returns an error if the root is missing or traversal fails.
///
/// # Examples
///
/// ```no_run
/// use xpack_core::plan_archive;
/// use xpack_core::creation::ExclusionSet;
///
/// for entry in plan_archive(".", "smartproxy.xpi", &ExclusionSet::default())? {
///     println!("{}", entry.entry_name);
/// }
/// # Ok::<(), xpack_core::PackError>(())
/// ```
pub fn plan_archive<P: AsRef<Path>>(
    root_dir: P,
    output_name: &str,
    exclusions: &ExclusionSet,
) -> Result<Vec<ArchiveEntry>> {
    let config = config_for(output_name, exclusions);
    plan_entries(root_dir.as_ref(), &config)
}

fn config_for(output_name: &str, exclusions: &ExclusionSet) -> PackConfig {
    PackConfig::default()
        .with_output_name(output_name)
        .with_exclusions(exclusions.clone())
}
