//! Error conversion utilities for CLI.
//!
//! Converts xpack-core's typed errors (thiserror) into user-facing
//! contextual errors (anyhow) with actionable guidance. Each message is a
//! single line so the CLI reports one diagnostic line per failure.

use anyhow::anyhow;
use std::path::Path;
use xpack_core::PackError;

/// Converts `PackError` to a user-facing anyhow error naming the root.
pub fn convert_pack_error(err: PackError, root: &Path) -> anyhow::Error {
    match err {
        PackError::SourceNotFound { path } => {
            anyhow!(
                "Directory '{}' does not exist; \
                 HINT: Run xpack from the extension directory or pass it with --root.",
                path.display()
            )
        }
        PackError::NotADirectory { path } => {
            anyhow!(
                "'{}' is not a directory; \
                 HINT: --root must name the extension directory, not a file inside it.",
                path.display()
            )
        }
        PackError::InvalidCompressionLevel { level } => {
            anyhow!(
                "Invalid compression level {level}; \
                 HINT: Use a level from 1 (fastest) to 9 (smallest)."
            )
        }
        PackError::InvalidOutputName { name } => {
            anyhow!(
                "Invalid output name '{name}'; \
                 HINT: Use a relative file name such as smartproxy.xpi."
            )
        }
        PackError::Io(io_err) => {
            anyhow!("I/O error while packaging '{}': {io_err}", root.display())
        }
        _ => anyhow::Error::from(err).context(format!("Failed to package '{}'", root.display())),
    }
}

/// Adds packaging context to a core result.
pub fn add_pack_context<T>(result: Result<T, PackError>, root: &Path) -> anyhow::Result<T> {
    result.map_err(|e| convert_pack_error(e, root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_convert_source_not_found() {
        let err = PackError::SourceNotFound {
            path: PathBuf::from("/missing/ext"),
        };
        let msg = format!("{:#}", convert_pack_error(err, Path::new("/missing/ext")));
        assert!(msg.contains("does not exist"));
        assert!(msg.contains("/missing/ext"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_hints_stay_on_one_line() {
        let errors = [
            PackError::SourceNotFound {
                path: PathBuf::from("/missing"),
            },
            PackError::NotADirectory {
                path: PathBuf::from("/work/file.txt"),
            },
            PackError::InvalidCompressionLevel { level: 0 },
            PackError::InvalidOutputName {
                name: "../x.xpi".to_string(),
            },
        ];
        for err in errors {
            let msg = format!("{:#}", convert_pack_error(err, Path::new("/work")));
            assert!(!msg.contains('\n'), "multi-line message: {msg}");
            assert!(msg.contains("HINT"));
        }
    }

    #[test]
    fn test_convert_compression_level() {
        let err = PackError::InvalidCompressionLevel { level: 12 };
        let msg = format!("{:#}", convert_pack_error(err, Path::new(".")));
        assert!(msg.contains("12"));
        assert!(msg.contains("1 (fastest)"));
    }

    #[test]
    fn test_convert_io_error_names_root() {
        let err = PackError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        let msg = format!("{:#}", convert_pack_error(err, Path::new("/work/ext")));
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("/work/ext"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_other_errors_keep_source_chain() {
        let err = PackError::InvalidEntryName {
            path: PathBuf::from("/work/ext/bad"),
        };
        let converted = convert_pack_error(err, Path::new("/work/ext"));
        let msg = format!("{converted:#}");
        assert!(msg.starts_with("Failed to package '/work/ext'"));
        assert!(converted.downcast_ref::<PackError>().is_some());
    }
}
