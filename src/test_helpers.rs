//! Shared test utilities for the wedding-directory test suite.
//!
//! Provides entry builders for listing tests and fixture setup plus lookup
//! helpers for tests that work with a scanned [`Manifest`].
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let entries = vec![
//!     vendor("Zephyr", &["Venues"], &["Sydney"]),
//!     dated_vendor("Acme", Some("2024-02-01")),
//! ];
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//! let acme = find_vendor(&manifest, "Acme Catering");
//! assert!(acme.data.featured);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::scan::Manifest;
use crate::schema::{DirectoryData, parse_date};
use crate::text::slugify;
use crate::types::{DirectoryEntry, Post};

// =========================================================================
// Entry builders
// =========================================================================

/// A vendor with the given taxonomies; slug is the slugified title.
pub fn vendor(title: &str, category: &[&str], location: &[&str]) -> DirectoryEntry {
    let mut data = DirectoryData::new(title);
    data.category = category.iter().map(|s| s.to_string()).collect();
    data.location = location.iter().map(|s| s.to_string()).collect();
    DirectoryEntry::new(slugify(title), data)
}

/// A vendor with an optional `YYYY-MM-DD` date.
pub fn dated_vendor(title: &str, date: Option<&str>) -> DirectoryEntry {
    let mut entry = vendor(title, &["Other"], &["Australia"]);
    entry.data.date = date.map(|d| parse_date(d).unwrap_or_else(|| panic!("bad date {d}")));
    entry
}

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Manifest lookups: panic with a clear message on miss
// =========================================================================

/// Find a vendor by title. Panics if not found.
pub fn find_vendor<'a>(manifest: &'a Manifest, title: &str) -> &'a DirectoryEntry {
    manifest
        .directory
        .iter()
        .find(|e| e.data.title == title)
        .unwrap_or_else(|| {
            let titles: Vec<&str> = manifest
                .directory
                .iter()
                .map(|e| e.data.title.as_str())
                .collect();
            panic!("vendor '{title}' not found. Available: {titles:?}")
        })
}

/// Find a post by title. Panics if not found.
pub fn find_post<'a>(manifest: &'a Manifest, title: &str) -> &'a Post {
    manifest
        .posts
        .iter()
        .find(|p| p.data.title == title)
        .unwrap_or_else(|| {
            let titles: Vec<&str> = manifest.posts.iter().map(|p| p.data.title.as_str()).collect();
            panic!("post '{title}' not found. Available: {titles:?}")
        })
}

/// All vendor titles in manifest order.
pub fn vendor_titles(manifest: &Manifest) -> Vec<&str> {
    manifest
        .directory
        .iter()
        .map(|e| e.data.title.as_str())
        .collect()
}
