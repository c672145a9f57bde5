//! Integration tests for webzip-core.
//!
//! These tests run whole packaging passes against real directory trees.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::BTreeSet;
use std::fs;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tempfile::TempDir;
use webzip_core::PackError;
use webzip_core::PackageConfig;
use webzip_core::RepackTool;
use webzip_core::ToolFlavor;
use webzip_core::package;
use zip::CompressionMethod;
use zip::ZipArchive;

/// Lays out a Godot web export next to its tooling directories.
fn build_project(root: &Path) {
    fs::write(root.join("index.html"), "<html>game</html>").unwrap();
    fs::write(root.join("index.wasm"), vec![0x61u8; 8192]).unwrap();
    fs::write(root.join("zip.py"), "import zipfile").unwrap();
    fs::create_dir_all(root.join("assets/sprites")).unwrap();
    fs::write(root.join("assets/sprites/hero.png"), "png").unwrap();
    fs::create_dir_all(root.join("assets/lib")).unwrap();
    fs::write(root.join("assets/lib/util.js"), "js").unwrap();
    fs::create_dir_all(root.join("lib")).unwrap();
    fs::write(root.join("lib/engine.dll"), "dll").unwrap();
    fs::create_dir_all(root.join(".godot/imported")).unwrap();
    fs::write(root.join(".godot/imported/hero.ctex"), "ctex").unwrap();
    fs::create_dir_all(root.join(".builds/web")).unwrap();
}

fn expected_files() -> BTreeSet<String> {
    [
        "demo/assets/lib/util.js",
        "demo/assets/sprites/hero.png",
        "demo/index.html",
        "demo/index.wasm",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect()
}

fn file_names(archive: &Path) -> BTreeSet<String> {
    let mut zip = ZipArchive::new(File::open(archive).unwrap()).unwrap();
    let mut names = BTreeSet::new();
    for i in 0..zip.len() {
        let file = zip.by_index(i).unwrap();
        if !file.is_dir() {
            names.insert(file.name().to_string());
        }
    }
    names
}

fn project_config(root: &Path) -> PackageConfig {
    PackageConfig::default()
        .with_root(root)
        .with_output(root.join(".builds/web/game.zip"))
}

#[test]
fn test_store_only_archive_contents() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    build_project(root);

    let config = project_config(root).with_repack(None);
    let report = package(&config).unwrap();

    assert_eq!(file_names(&config.output), expected_files());
    assert_eq!(report.files_added, 4);
    assert_eq!(report.entries_excluded.len(), 4);

    let mut zip = ZipArchive::new(File::open(&config.output).unwrap()).unwrap();
    for i in 0..zip.len() {
        let file = zip.by_index(i).unwrap();
        assert_eq!(file.compression(), CompressionMethod::Stored);
        assert!(file.name().starts_with("demo/"));
    }
}

#[test]
fn test_builtin_repack_end_to_end() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    build_project(root);

    let config = project_config(root).with_repack(Some(RepackTool::Builtin));
    let report = package(&config).unwrap();

    assert_eq!(file_names(&config.output), expected_files());
    assert!(!root.join(".builds/web/game2.zip").exists());
    assert!(!root.join(".builds/web/demo").exists());
    assert_eq!(report.tool_runs.len(), 2);
    assert!(report.archive_size > 0);
    assert!(report.archive_size < report.intermediate_size);
    assert!(!report.has_warnings(), "{:?}", report.warnings);

    let mut zip = ZipArchive::new(File::open(&config.output).unwrap()).unwrap();
    let mut wasm = Vec::new();
    zip.by_name("demo/index.wasm")
        .unwrap()
        .read_to_end(&mut wasm)
        .unwrap();
    assert_eq!(wasm, vec![0x61u8; 8192]);
}

#[test]
fn test_rerun_replaces_previous_archive() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    build_project(root);

    let config = project_config(root).with_repack(Some(RepackTool::Builtin));
    package(&config).unwrap();

    fs::remove_file(root.join("index.wasm")).unwrap();
    fs::write(root.join("index.pck"), "pck").unwrap();
    package(&config).unwrap();

    let mut expected = expected_files();
    expected.remove("demo/index.wasm");
    expected.insert("demo/index.pck".to_string());
    assert_eq!(file_names(&config.output), expected);
}

#[test]
fn test_custom_layout() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("site");
    fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
    fs::write(root.join("node_modules/pkg/index.js"), "js").unwrap();
    fs::create_dir_all(root.join("src/node_modules")).unwrap();
    fs::write(root.join("src/node_modules/keep.js"), "js").unwrap();
    fs::write(root.join("main.js"), "js").unwrap();

    let config = PackageConfig::default()
        .with_root(&root)
        .with_output(temp.path().join("dist/site.zip"))
        .with_intermediate_name("stage.zip")
        .with_virtual_root("www")
        .with_excluded_names(vec!["node_modules".to_string()])
        .with_repack(Some(RepackTool::Builtin));

    package(&config).unwrap();

    let expected: BTreeSet<String> = ["www/main.js", "www/src/node_modules/keep.js"]
        .iter()
        .map(|s| (*s).to_string())
        .collect();
    assert_eq!(file_names(&config.output), expected);
    assert!(!temp.path().join("dist/stage.zip").exists());
    assert!(!temp.path().join("dist/www").exists());
}

#[test]
fn test_missing_tool_is_fatal() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    build_project(root);

    let config = project_config(root).with_repack(Some(RepackTool::External {
        program: "webzip-missing-archiver".to_string(),
        flavor: ToolFlavor::WinRar,
    }));

    let err = package(&config).unwrap_err();
    assert!(matches!(err, PackError::ToolSpawn { .. }));
}

#[cfg(unix)]
#[test]
fn test_failing_tool_does_not_fail_run() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    build_project(root);

    let config = project_config(root).with_repack(Some(RepackTool::External {
        program: "false".to_string(),
        flavor: ToolFlavor::SevenZip,
    }));

    let report = package(&config).unwrap();

    assert_eq!(report.tool_runs.len(), 2);
    assert!(report.tool_runs.iter().all(|run| !run.success));
    assert!(!root.join(".builds/web/game2.zip").exists());
    assert!(!root.join(".builds/web/demo").exists());
    assert!(
        report
            .warnings
            .iter()
            .any(|w| w.contains("not produced"))
    );
}

#[cfg(unix)]
#[test]
fn test_dangling_symlink_fails_run() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    build_project(root);
    std::os::unix::fs::symlink(root.join("gone.pck"), root.join("game.pck")).unwrap();

    let config = project_config(root).with_repack(None);
    let err = package(&config).unwrap_err();

    assert!(matches!(err, PackError::Io(_)), "{err:?}");
    assert!(!config.output.exists());
}
