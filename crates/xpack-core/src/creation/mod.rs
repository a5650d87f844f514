//! Archive creation module.
//!
//! Walks a root directory with exclusion pruning, maps paths to
//! forward-slash entry names and streams the surviving files into a
//! deflate-compressed ZIP.

pub mod filters;
pub mod walker;

pub mod config;
pub mod packer;
pub mod report;
pub mod zip;

// Re-exports for public API
pub use config::PackConfig;
pub use filters::ExclusionSet;
pub use packer::Packer;
pub use report::PackReport;
pub use walker::ArchiveEntry;
pub use walker::FilteredWalker;
