//! # Wedding Directory
//!
//! A static site generator for a wedding vendor directory with a blog.
//! Vendors, posts, authors and pages are markdown files with YAML front
//! matter; the directory listing filters by category and location and keeps
//! the active filters in the page URL.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! Content flows through two independent stages joined by a JSON manifest:
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (markdown → validated entries)
//! 2. Generate  manifest  →  dist/            (final HTML site)
//! ```
//!
//! The manifest is human-readable, so a failed build can be inspected between
//! stages, and each stage can be tested without the other.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: loads config and every collection into the manifest |
//! | [`generate`] | Stage 2: renders the site from the manifest using Maud |
//! | [`content`] | Front matter splitting, collection walking, slug derivation |
//! | [`schema`] | Typed front matter for the five collections, with validation |
//! | [`listing`] | Directory filter/sort state machine and URL sync |
//! | [`components`] | Vendor card and the two listing shells |
//! | [`taxonomy`] | Term lookups shared by vendors and posts |
//! | [`text`] | `slugify`, `humanize` and other string helpers |
//! | [`config`] | `config.toml` loading, merging, validation and CSS generation |
//! | [`types`] | Shared types serialized between stages |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Listing Controller, Two Shells
//!
//! The full directory page and the per-term pages are the same
//! [`listing::Listing`] with different [`listing::ListingOptions`]. State
//! transitions are a pure [`listing::reduce`]; what is shown is a pure
//! [`listing::compute`]. The URL is reached only through
//! [`listing::location::LocationAdapter`], so the controller runs the same
//! against a real URL, an in-memory location, or the terminal (`list`).
//!
//! ## Terms Compare by Slug
//!
//! `"Hair & Makeup"`, `"hair-makeup"` and `"HAIR  MAKEUP"` are one term.
//! Query parameters must be in slug form to match.
//!
//! ## Progressive Filtering
//!
//! Listing pages are fully rendered at build time, including every vendor a
//! client-side filter might reveal. `static/directory.js` re-applies the same
//! rules in the browser and rewrites the query string with replace
//! semantics, so filtering never adds history entries.

pub mod components;
pub mod config;
pub mod content;
pub mod generate;
pub mod listing;
pub mod output;
pub mod scan;
pub mod schema;
pub mod taxonomy;
pub mod text;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
