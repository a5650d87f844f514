//! Reading back produced archives.

use crate::Result;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Lists the entry names of a ZIP archive in central-directory order.
///
/// # Examples
///
/// ```no_run
/// use xpack_core::list_archive;
///
/// for name in list_archive("smartproxy.xpi")? {
///     println!("{name}");
/// }
/// # Ok::<(), xpack_core::PackError>(())
/// ```
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not a valid ZIP
/// archive.
pub fn list_archive<P: AsRef<Path>>(archive_path: P) -> Result<Vec<String>> {
    let file = File::open(archive_path.as_ref())?;
    let mut archive = zip::ZipArchive::new(BufReader::new(file))?;

    let mut names = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let entry = archive.by_index_raw(i)?;
        names.push(entry.name().to_string());
    }

    Ok(names)
}
