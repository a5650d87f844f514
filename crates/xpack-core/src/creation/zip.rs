//! ZIP archive writing.
//!
//! Traversal and writing are interleaved: each file is streamed into the
//! archive as soon as the walker yields it.

use crate::ProgressCallback;
use crate::Result;
use crate::creation::config::PackConfig;
use crate::creation::report::PackReport;
use crate::creation::walker::FilteredWalker;
use crate::creation::walker::resolve_root;
use std::fs::File;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Packages `root` into `root/<config.output_name>`.
///
/// The output file is created (or truncated) before traversal starts and is
/// never included in itself.
///
/// # Examples
///
/// ```no_run
/// use xpack_core::NoopProgress;
/// use xpack_core::creation::PackConfig;
/// use xpack_core::creation::zip::create_zip;
/// use std::path::Path;
///
/// let config = PackConfig::default();
/// let report = create_zip(Path::new("."), &config, &mut NoopProgress)?;
/// println!("Added {} files", report.files_added);
/// # Ok::<(), xpack_core::PackError>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - Configuration is invalid
/// - Root does not exist or is not a directory
/// - Traversal fails
/// - The output file cannot be created, written or finalized
///
/// On error the partial output is deleted unless
/// `config.remove_partial_on_failure` is `false`.
pub fn create_zip(
    root: &Path,
    config: &PackConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<PackReport> {
    config.validate()?;
    let start = Instant::now();

    let root = resolve_root(root)?;
    let output_path = root.join(&config.output_name);

    let file = File::create(&output_path)?;
    let mut guard = PartialOutput::new(output_path.clone(), config.remove_partial_on_failure);

    let walker = FilteredWalker::new(&root, &config.exclusions).skip_path(&output_path);
    let mut report = PackReport::new(output_path.clone());

    let file = write_zip(file, &walker, config, progress, &mut report)?;
    report.bytes_compressed = file.metadata()?.len();
    drop(file);

    guard.persist();
    report.duration = start.elapsed();
    progress.on_complete(&output_path);

    Ok(report)
}

/// Streams every entry from `walker` into a ZIP written to `writer`.
///
/// Returns the writer after the central directory has been written.
pub(crate) fn write_zip<W: Write + Seek>(
    writer: W,
    walker: &FilteredWalker<'_>,
    config: &PackConfig,
    progress: &mut dyn ProgressCallback,
    report: &mut PackReport,
) -> Result<W> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(i64::from(config.compression_level)));

    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];

    for entry in walker.walk() {
        let entry = entry?;
        let mut file = File::open(&entry.path)?;
        let file_options = entry_options(options, &file, entry.size)?;

        zip.start_file(entry.entry_name.as_str(), file_options)?;
        let bytes = copy_with_buffer(&mut file, &mut zip, &mut buffer)?;

        progress.on_entry_added(&entry.entry_name, bytes);
        report.record_entry(entry.entry_name, bytes);
    }

    Ok(zip.finish()?)
}

/// Per-file options: Unix permissions where available, ZIP64 for big files.
fn entry_options(options: SimpleFileOptions, file: &File, size: u64) -> Result<SimpleFileOptions> {
    let options = options.large_file(size >= u64::from(u32::MAX));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = file.metadata()?.permissions().mode();
        Ok(options.unix_permissions(mode))
    }
    #[cfg(not(unix))]
    {
        let _ = file;
        Ok(options)
    }
}

fn copy_with_buffer<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut [u8],
) -> std::io::Result<u64> {
    let mut total = 0u64;
    loop {
        let read = reader.read(buffer)?;
        if read == 0 {
            return Ok(total);
        }
        writer.write_all(&buffer[..read])?;
        total += read as u64;
    }
}

/// Deletes the output file on drop unless [`persist`](Self::persist) was
/// called.
struct PartialOutput {
    path: PathBuf,
    armed: bool,
}

impl PartialOutput {
    fn new(path: PathBuf, remove_on_failure: bool) -> Self {
        Self {
            path,
            armed: remove_on_failure,
        }
    }

    fn persist(&mut self) {
        self.armed = false;
    }
}

impl Drop for PartialOutput {
    fn drop(&mut self) {
        if self.armed {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}
