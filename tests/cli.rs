//! End-to-end CLI tests: run the binary against `fixtures/content`.
//!
//! Run with: `cargo test --test cli`

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/content")
}

fn run(args: &[&str], source: &Path, work: &Path) -> Output {
    let bin = env!("CARGO_BIN_EXE_wedding-directory");
    Command::new(bin)
        .args(args)
        .args([
            "--source",
            source.to_str().unwrap(),
            "--output",
            work.join("dist").to_str().unwrap(),
            "--temp-dir",
            work.join("temp").to_str().unwrap(),
        ])
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run wedding-directory")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn build_writes_site_and_manifest() {
    let work = TempDir::new().unwrap();
    let out = run(&["build"], &fixtures(), work.path());
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let dist = work.path().join("dist");
    assert!(dist.join("index.html").exists());
    assert!(dist.join("directory/zephyr-house/index.html").exists());
    assert!(dist.join("directory/category/florists/index.html").exists());
    assert!(work.path().join("temp/manifest.json").exists());

    let script = std::fs::read_dir(&dist)
        .unwrap()
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .find(|name| name.starts_with("directory-") && name.ends_with(".js"));
    assert!(script.is_some(), "fingerprinted script missing");

    let text = stdout(&out);
    assert!(text.contains("==> Stage 1: Scanning"));
    assert!(text.contains("001 Acme Catering \u{2192} directory/acme-catering/index.html"));
    assert!(text.contains("==> Build complete"));
}

#[test]
fn scan_then_generate() {
    let work = TempDir::new().unwrap();
    let scan = run(&["scan"], &fixtures(), work.path());
    assert!(scan.status.success());
    assert!(stdout(&scan).contains("Source: directory/acme-catering.md"));

    let generate = run(&["generate"], &fixtures(), work.path());
    assert!(generate.status.success(), "{}", String::from_utf8_lossy(&generate.stderr));
    assert!(work.path().join("dist/blog/index.html").exists());
}

#[test]
fn check_reports_counts() {
    let work = TempDir::new().unwrap();
    let out = run(&["check"], &fixtures(), work.path());
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("Content OK: 4 vendors, 2 posts, 2 authors, 3 pages"));
    assert!(!work.path().join("dist").exists());
}

#[test]
fn check_fails_on_invalid_vendor() {
    let source = TempDir::new().unwrap();
    std::fs::create_dir_all(source.path().join("directory")).unwrap();
    std::fs::write(
        source.path().join("directory/bad.md"),
        "---\ntitle: Bad\nwebsite: not a url\n---\n",
    )
    .unwrap();

    let work = TempDir::new().unwrap();
    let out = run(&["check"], source.path(), work.path());
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("bad.md"));
}

#[test]
fn list_mounts_query_and_normalizes_it() {
    let work = TempDir::new().unwrap();
    let out = run(
        &["list", "--query", "category=catering&utm_source=mail"],
        &fixtures(),
        work.path(),
    );
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("Showing 1 vendor in Catering"));
    assert!(text.contains("001 Acme Catering (featured)"));
    assert!(text.contains("Query: ?category=catering\n"));
}

#[test]
fn list_select_all_clears_query() {
    let work = TempDir::new().unwrap();
    let out = run(
        &["list", "--query", "category=catering", "--category", "all"],
        &fixtures(),
        work.path(),
    );
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("Showing 4 vendors"));
    assert!(text.contains("Query: (none)"));
}

#[test]
fn list_date_sort_with_cap() {
    let work = TempDir::new().unwrap();
    let out = run(&["list", "--sort", "date", "--max", "2"], &fixtures(), work.path());
    assert!(out.status.success());
    let text = stdout(&out);
    let acme = text.find("001 Acme Catering").unwrap();
    let zephyr = text.find("002 Zephyr House").unwrap();
    assert!(acme < zephyr);
    assert!(text.contains("(2 more not shown)"));
}

#[test]
fn list_rejects_unknown_sort() {
    let work = TempDir::new().unwrap();
    let out = run(&["list", "--sort", "popular"], &fixtures(), work.path());
    assert!(!out.status.success());
}

#[test]
fn gen_config_prints_stock_toml() {
    let work = TempDir::new().unwrap();
    let out = run(&["gen-config"], &fixtures(), work.path());
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("[directory]"));
    assert!(text.contains("show_filters = true"));
}
