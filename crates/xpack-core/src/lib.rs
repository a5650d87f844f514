//! Packages a directory tree into a browser extension bundle.
//!
//! `xpack-core` walks a root directory, prunes excluded directories before
//! descending, maps every surviving file to a forward-slash entry name
//! relative to the root and streams it into a deflate-compressed ZIP
//! (`.xpi`). Version-control metadata, the packaging script and previously
//! produced bundles are excluded by default.
//!
//! # Examples
//!
//! ```no_run
//! use xpack_core::create_archive;
//! use xpack_core::creation::ExclusionSet;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = create_archive("/work/extension", "smartproxy.xpi", &ExclusionSet::default())?;
//! for entry in &report.entries {
//!     println!("Adding: {entry}");
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod creation;
pub mod error;
pub mod inspection;
pub mod report;

// Re-export main API types
pub use api::create_archive;
pub use api::create_archive_with_progress;
pub use api::plan_archive;
pub use creation::ArchiveEntry;
pub use creation::ExclusionSet;
pub use creation::PackConfig;
pub use creation::PackReport;
pub use creation::Packer;
pub use error::ErrorCategory;
pub use error::PackError;
pub use error::Result;
pub use inspection::list_archive;
pub use report::NoopProgress;
pub use report::ProgressCallback;
pub use report::RecordingProgress;
