//! Basic usage example for the rbmk exporter
//!
//! Run: cargo run --example basic_usage

use rbmk::{MakefileWriter, MapRegistry, Variant};
use tempfile::TempDir;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== rbmk - Basic Usage ===\n");

    // A synthetic RbConfig snapshot; a real build would source this from
    // `DEP_RB_RBCONFIG_*` environment variables or a JSON file
    let registry = MapRegistry::from_pairs([
        ("rubyhdrdir", "/usr/include/ruby-3.0.0"),
        ("arch", "x86_64-linux"),
        ("libdir", "/usr/lib"),
        ("RUBY_SO_NAME", "ruby3.0"),
        ("LIBRUBYARG_SHARED", ""),
        ("LIBRUBYARG_STATIC", "-lruby3.0-static"),
    ]);

    let dir = TempDir::new()?;
    let writer = MakefileWriter::new(dir.path());

    println!("1. Minimal variant (include dir only)...");
    let report = writer.export(&registry, Variant::Minimal)?;
    println!("  {} entries -> {}", report.entries, report.path.display());
    print!("{}", std::fs::read_to_string(&report.path)?);

    println!("\n2. Full variant (linker args with static fallback)...");
    let report = writer.export(&registry, Variant::Full)?;
    println!("  {} entries -> {}", report.entries, report.path.display());
    print!("{}", std::fs::read_to_string(&report.path)?);

    println!("\nDemo complete!");

    Ok(())
}
