//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Each entity leads
//! with its positional index and title; source files and taxonomy terms
//! follow as indented context lines. The result reads as a content
//! inventory while still pointing back at the files behind it.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Directory
//!     001 Acme Catering (featured)
//!         Source: directory/acme-catering.md
//!         Category: Catering
//!         Location: Sydney
//!
//! Posts
//!     001 Choosing a Venue (2024-03-01)
//!         Source: posts/choosing-a-venue.md
//!
//! Config
//!     config.toml
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//! Directory → directory/index.html
//!     001 Acme Catering → directory/acme-catering/index.html
//! ...
//! Generated 24 pages, script directory-3f2a9c1b.js
//! ```
//!
//! ## List
//!
//! ```text
//! Showing 1 vendor in Catering
//!     001 Acme Catering
//!         Category: Catering
//!         Location: Sydney
//! Query: ?category=catering
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::generate::GenerateReport;
use crate::listing::ListingView;
use crate::scan::Manifest;
use crate::types::Entry;
use std::path::{Path, PathBuf};

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: positional index + title, with optional detail.
///
/// ```text
/// 001 Acme Catering (featured)
/// 002 Zephyr House
/// ```
fn entity_header(index: usize, title: &str, detail: Option<&str>) -> String {
    match detail {
        Some(d) => format!("{} {} ({})", format_index(index), title, d),
        None => format!("{} {}", format_index(index), title),
    }
}

/// `Source: <collection>/<file>` for entries loaded from disk.
fn source_line<T>(depth: usize, collection: &str, entry: &Entry<T>) -> Option<String> {
    (!entry.source.is_empty())
        .then(|| format!("{}Source: {}/{}", indent(depth), collection, entry.source))
}

fn terms_line(depth: usize, label: &str, terms: &[String]) -> String {
    format!("{}{}: {}", indent(depth), label, terms.join(", "))
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    format!("{} {}", count, if count == 1 { singular } else { plural })
}

// ============================================================================
// Scan output
// ============================================================================

/// Format scan output: every loaded entry grouped by collection.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = vec!["Directory".to_string()];
    if manifest.directory.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, entry) in manifest.directory.iter().enumerate() {
        let detail = entry.data.featured.then_some("featured");
        lines.push(format!("{}{}", indent(1), entity_header(i + 1, &entry.data.title, detail)));
        lines.extend(source_line(2, "directory", entry));
        lines.push(terms_line(2, "Category", &entry.data.category));
        lines.push(terms_line(2, "Location", &entry.data.location));
    }

    if !manifest.posts.is_empty() {
        lines.push(String::new());
        lines.push("Posts".to_string());
        for (i, post) in manifest.posts.iter().enumerate() {
            let date = post.data.date.map(|d| d.to_string());
            lines.push(format!(
                "{}{}",
                indent(1),
                entity_header(i + 1, &post.data.title, date.as_deref())
            ));
            lines.extend(source_line(2, "posts", post));
        }
    }

    if !manifest.authors.is_empty() {
        lines.push(String::new());
        lines.push("Authors".to_string());
        for (i, author) in manifest.authors.iter().enumerate() {
            lines.push(format!("{}{}", indent(1), entity_header(i + 1, &author.data.title, None)));
            lines.extend(source_line(2, "authors", author));
        }
    }

    if !manifest.about.is_empty() || !manifest.pages.is_empty() {
        lines.push(String::new());
        lines.push("Pages".to_string());
        let about = manifest
            .about
            .iter()
            .map(|a| (a.data.title.as_str(), source_line(2, "about", a)));
        let pages = manifest
            .pages
            .iter()
            .map(|p| (p.data.title.as_str(), source_line(2, "pages", p)));
        for (i, (title, source)) in about.chain(pages).enumerate() {
            lines.push(format!("{}{}", indent(1), entity_header(i + 1, title, None)));
            lines.extend(source);
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push(format!("{}config.toml", indent(1)));
    } else {
        lines.push(format!("{}(defaults)", indent(1)));
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

/// One-line content summary for `check`.
pub fn format_check_output(manifest: &Manifest) -> Vec<String> {
    vec![format!(
        "Content OK: {}, {}, {}, {}",
        plural(
            manifest.directory.len(),
            &manifest.config.directory.noun,
            &manifest.config.directory.noun_plural
        ),
        plural(manifest.posts.len(), "post", "posts"),
        plural(manifest.authors.len(), "author", "authors"),
        plural(manifest.about.len() + manifest.pages.len(), "page", "pages"),
    )]
}

pub fn print_check_output(manifest: &Manifest) {
    for line in format_check_output(manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate output
// ============================================================================

/// Format generate output: sections with their pages, then a total.
///
/// Vendor and post pages are indexed in the order they were written.
pub fn format_generate_output(manifest: &Manifest, report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();
    let written = |rel: &str| report.pages.iter().any(|p| p == Path::new(rel));

    if written("index.html") {
        lines.push("Home \u{2192} index.html".to_string());
    }
    if written("directory/index.html") {
        lines.push("Directory \u{2192} directory/index.html".to_string());
    }
    for (i, entry) in manifest.directory.iter().enumerate() {
        let rel = format!("directory/{}/index.html", entry.slug);
        if written(&rel) {
            lines.push(format!(
                "{}{} \u{2192} {}",
                indent(1),
                entity_header(i + 1, &entry.data.title, None),
                rel
            ));
        }
    }
    let term_pages = report.count_under("directory/category") + report.count_under("directory/location");
    if term_pages > 0 {
        lines.push(format!(
            "{}{} \u{2192} directory/category/, directory/location/",
            indent(1),
            plural(term_pages, "term page", "term pages")
        ));
    }

    if written("blog/index.html") {
        lines.push("Blog \u{2192} blog/index.html".to_string());
        for (i, post) in manifest.posts.iter().enumerate() {
            lines.push(format!(
                "{}{} \u{2192} blog/{}/index.html",
                indent(1),
                entity_header(i + 1, &post.data.title, None),
                post.slug
            ));
        }
    }

    let sections: [(&str, &str); 3] = [
        ("Categories", "categories"),
        ("Tags", "tags"),
        ("Authors", "authors"),
    ];
    for (label, prefix) in sections {
        let count = report.count_under(prefix);
        if count > 0 {
            lines.push(format!("{} \u{2192} {}/ ({})", label, prefix, plural(count, "page", "pages")));
        }
    }

    let mut standalone: Vec<&PathBuf> = Vec::new();
    if let Some(about) = report.pages.iter().find(|p| p.as_path() == Path::new("about/index.html")) {
        standalone.push(about);
    }
    standalone.extend(
        manifest
            .pages
            .iter()
            .map(|p| PathBuf::from(&p.slug).join("index.html"))
            .filter_map(|rel| report.pages.iter().find(|p| **p == rel)),
    );
    if !standalone.is_empty() {
        lines.push(String::new());
        lines.push("Pages".to_string());
        for (i, path) in standalone.iter().enumerate() {
            lines.push(format!("{}{} {}", indent(1), format_index(i + 1), path.display()));
        }
    }

    for slug in &report.skipped {
        lines.push(format!("Skipped page '{}': slug is reserved", slug));
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, script {}",
        plural(report.pages.len(), "page", "pages"),
        report.script
    ));
    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(manifest: &Manifest, report: &GenerateReport) {
    for line in format_generate_output(manifest, report) {
        println!("{}", line);
    }
}

// ============================================================================
// List output
// ============================================================================

/// Format a computed listing: summary, entries, and the normalized query.
pub fn format_listing(view: &ListingView<'_>, query: &str, singular: &str, plural_noun: &str) -> Vec<String> {
    let mut lines = vec![view.summary(singular, plural_noun)];
    if view.is_empty() {
        lines.push(format!("{}No vendors found matching your criteria.", indent(1)));
    }
    for (i, entry) in view.items.iter().enumerate() {
        let detail = entry.data.featured.then_some("featured");
        lines.push(format!("{}{}", indent(1), entity_header(i + 1, &entry.data.title, detail)));
        lines.push(terms_line(2, "Category", &entry.data.category));
        lines.push(terms_line(2, "Location", &entry.data.location));
        if let Some(date) = entry.data.date {
            lines.push(format!("{}Date: {}", indent(2), date));
        }
    }
    if view.matched > view.items.len() {
        lines.push(format!(
            "{}({} more not shown)",
            indent(1),
            view.matched - view.items.len()
        ));
    }
    if query.is_empty() {
        lines.push("Query: (none)".to_string());
    } else {
        lines.push(format!("Query: ?{}", query));
    }
    lines
}

pub fn print_listing(view: &ListingView<'_>, query: &str, singular: &str, plural_noun: &str) {
    for line in format_listing(view, query, singular, plural_noun) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::render_site;
    use crate::listing::sort::SortMode;
    use crate::listing::{FilterState, Filter, ListingOptions, compute};
    use crate::scan::scan;
    use crate::test_helpers::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tempfile::TempDir;

    // =========================================================================
    // Helpers
    // =========================================================================

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1234), "1234");
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn entity_header_with_detail() {
        assert_eq!(entity_header(3, "Acme", Some("featured")), "003 Acme (featured)");
        assert_eq!(entity_header(1, "Zephyr", None), "001 Zephyr");
    }

    #[test]
    fn plural_picks_form() {
        assert_eq!(plural(1, "page", "pages"), "1 page");
        assert_eq!(plural(0, "page", "pages"), "0 pages");
    }

    // =========================================================================
    // Scan
    // =========================================================================

    #[test]
    fn scan_output_lists_vendors_with_context() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let lines = format_scan_output(&manifest, tmp.path());

        assert_eq!(lines[0], "Directory");
        assert_eq!(lines[1], "    001 Acme Catering (featured)");
        assert_eq!(lines[2], "        Source: directory/acme-catering.md");
        assert_eq!(lines[3], "        Category: Catering");
        assert_eq!(lines[4], "        Location: Sydney");
        assert!(lines.contains(&"Posts".to_string()));
        assert!(lines.contains(&"    001 About Harbour & Hills".to_string()));
        assert_eq!(lines.last().unwrap(), "    config.toml");
    }

    #[test]
    fn scan_output_empty_site() {
        let tmp = TempDir::new().unwrap();
        let manifest = scan(tmp.path()).unwrap();
        let lines = format_scan_output(&manifest, tmp.path());
        assert_eq!(lines, vec!["Directory", "    (none)", "", "Config", "    (defaults)"]);
    }

    #[test]
    fn check_output_counts() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(
            format_check_output(&manifest),
            vec!["Content OK: 4 vendors, 2 posts, 2 authors, 3 pages"]
        );
    }

    // =========================================================================
    // Generate
    // =========================================================================

    #[test]
    fn generate_output_summarizes_sections() {
        let content = setup_fixtures();
        let manifest = scan(content.path()).unwrap();
        let out = TempDir::new().unwrap();
        let report = render_site(&manifest, out.path(), &mut StdRng::seed_from_u64(1)).unwrap();
        let lines = format_generate_output(&manifest, &report);

        assert_eq!(lines[0], "Home \u{2192} index.html");
        assert_eq!(lines[1], "Directory \u{2192} directory/index.html");
        assert!(lines.contains(
            &"    001 Acme Catering \u{2192} directory/acme-catering/index.html".to_string()
        ));
        assert!(lines.contains(&"    9 term pages \u{2192} directory/category/, directory/location/".to_string()));
        assert!(lines.contains(&"Tags \u{2192} tags/ (2 pages)".to_string()));
        assert!(lines.contains(&"    001 about/index.html".to_string()));
        assert!(lines.last().unwrap().starts_with(&format!("Generated {} pages", report.pages.len())));
    }

    // =========================================================================
    // List
    // =========================================================================

    #[test]
    fn listing_output_shows_query() {
        let entries = vec![
            vendor("Zephyr", &["Venues"], &["Sydney"]),
            vendor("Acme", &["Catering"], &["Sydney"]),
        ];
        let state = FilterState {
            category: Filter::term("Catering"),
            location: Filter::All,
        };
        let view = compute(
            &entries,
            &state,
            &ListingOptions::listings(SortMode::Alphabetical),
            &mut rand::thread_rng(),
        );
        let lines = format_listing(&view, &state.to_query(), "vendor", "vendors");
        assert_eq!(
            lines,
            vec![
                "Showing 1 vendor in Catering",
                "    001 Acme",
                "        Category: Catering",
                "        Location: Sydney",
                "Query: ?category=catering",
            ]
        );
    }

    #[test]
    fn listing_output_empty_and_capped() {
        let entries = vec![vendor("A", &[], &[]), vendor("B", &[], &[])];
        let options = ListingOptions {
            max_items: Some(1),
            ..ListingOptions::default()
        };
        let view = compute(&entries, &FilterState::default(), &options, &mut rand::thread_rng());
        let lines = format_listing(&view, "", "vendor", "vendors");
        assert!(lines.contains(&"    (1 more not shown)".to_string()));
        assert_eq!(lines.last().unwrap(), "Query: (none)");

        let state = FilterState {
            category: Filter::term("Florists"),
            location: Filter::All,
        };
        let view = compute(&entries, &state, &options, &mut rand::thread_rng());
        let lines = format_listing(&view, "category=florists", "vendor", "vendors");
        assert_eq!(lines[1], "    No vendors found matching your criteria.");
    }
}
