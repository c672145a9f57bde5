//! Example: Packaging a web build with webzip-core
//!
//! Run with: `cargo run --example package_build`

use std::fs;
use webzip_core::PackageConfig;
use webzip_core::RepackTool;
use webzip_core::package;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Lay out a tiny export with a tooling directory next to it
    let root = std::env::temp_dir().join("webzip-example");
    fs::create_dir_all(root.join("lib"))?;
    fs::create_dir_all(root.join("assets"))?;
    fs::write(root.join("index.html"), "<html>Hello, webzip!</html>")?;
    fs::write(root.join("assets/logo.svg"), "<svg/>")?;
    fs::write(root.join("lib/plugin.so"), "not shipped")?;

    let config = PackageConfig::default()
        .with_root(&root)
        .with_output(root.join(".builds/web/game.zip"))
        .with_repack(Some(RepackTool::Builtin));

    let report = package(&config)?;
    println!("Packaged {} files into {}", report.files_added, config.output.display());
    println!("  Excluded: {:?}", report.entries_excluded);
    println!(
        "  Size: {} -> {} bytes ({:.1}% saved)",
        report.intermediate_size,
        report.archive_size,
        report.compression_percentage()
    );

    fs::remove_dir_all(&root)?;
    Ok(())
}
