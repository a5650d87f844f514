//! Example: packaging an extension directory with xpack-core
//!
//! Run with: `cargo run --example pack_extension -- <DIR>`

use std::path::Path;
use xpack_core::Packer;
use xpack_core::ProgressCallback;

struct PrintProgress;

impl ProgressCallback for PrintProgress {
    fn on_entry_added(&mut self, entry_name: &str, bytes: u64) {
        println!("  + {entry_name} ({bytes} bytes)");
    }

    fn on_complete(&mut self, output: &Path) {
        println!("Wrote {}", output.display());
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let root = std::env::args().nth(1).unwrap_or_else(|| ".".to_string());

    println!("Planned entries:");
    let packer = Packer::new(&root).output("example.xpi").exclude("target");
    for entry in packer.plan()? {
        println!("  {}", entry.entry_name);
    }

    println!("\nPacking:");
    let report = packer.create_with_progress(&mut PrintProgress)?;
    println!(
        "{} files, {:.1}% saved",
        report.files_added,
        report.compression_percentage()
    );

    std::fs::remove_file(&report.output_path)?;
    Ok(())
}
