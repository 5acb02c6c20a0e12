//! Loading content collections from disk.
//!
//! Every collection is a directory of markdown files. Each file starts with
//! a YAML front-matter block:
//!
//! ```text
//! ---
//! title: Acme Catering
//! category: [Catering]
//! location: [Sydney, Blue Mountains]
//! featured: true
//! ---
//!
//! Markdown body...
//! ```
//!
//! Loading a collection walks its directory in file-name order, splits off
//! the front matter, deserializes it into the collection's schema (applying
//! defaults), validates it, assigns a slug and drops drafts.
//!
//! ## Slugs
//!
//! First match wins:
//! 1. a `slug:` key in the front matter (slugified),
//! 2. the path relative to the collection directory, extension removed and
//!    each component slugified (`venues/The Grand.md` → `venues/the-grand`),
//! 3. the slugified title, if the path yields nothing.
//!
//! Slugs must be unique within a collection.

use crate::schema::{FrontMatter, SchemaError};
use crate::text::slugify;
use crate::types::Entry;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot walk {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("{}: missing front matter (expected a leading `---` block)", .path.display())]
    MissingFrontMatter { path: PathBuf },
    #[error("{}: invalid front matter: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("{}: {source}", .path.display())]
    Validation {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },
    #[error("Duplicate slug `{slug}` in {}: {} and {}", .collection, .first.display(), .second.display())]
    DuplicateSlug {
        collection: String,
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// Split a document into its front matter and body.
///
/// The front matter must open on the first line with `---` and close with a
/// line that is exactly `---` (or `...`). Returns `None` when there is no
/// opening or closing fence.
pub fn split_front_matter(text: &str) -> Option<(&str, &str)> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let rest = text
        .strip_prefix("---\r\n")
        .or_else(|| text.strip_prefix("---\n"))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed == "---" || trimmed == "..." {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((yaml, body));
        }
        offset += line.len();
    }
    None
}

/// Parse one document into an entry. `rel` is the path inside the collection.
pub fn parse_entry<T: FrontMatter>(text: &str, rel: &Path) -> Result<Entry<T>, ContentError> {
    let (yaml, body) = split_front_matter(text).ok_or_else(|| ContentError::MissingFrontMatter {
        path: rel.to_path_buf(),
    })?;

    let value: serde_yaml::Value =
        serde_yaml::from_str(yaml).map_err(|source| ContentError::Yaml {
            path: rel.to_path_buf(),
            source,
        })?;
    let slug_override = value
        .get("slug")
        .and_then(|v| v.as_str())
        .map(slugify)
        .filter(|s| !s.is_empty());
    let data: T = serde_yaml::from_value(value).map_err(|source| ContentError::Yaml {
        path: rel.to_path_buf(),
        source,
    })?;
    data.validate().map_err(|source| ContentError::Validation {
        path: rel.to_path_buf(),
        source,
    })?;

    let slug = slug_override
        .or_else(|| Some(path_slug(rel)).filter(|s| !s.is_empty()))
        .unwrap_or_else(|| slugify(data.title()));

    Ok(Entry {
        slug,
        source: rel.to_string_lossy().replace('\\', "/"),
        body: body.trim_start_matches(['\r', '\n']).to_string(),
        data,
    })
}

/// Slug from a relative path: extension dropped, components slugified.
fn path_slug(rel: &Path) -> String {
    let without_ext = rel.with_extension("");
    without_ext
        .components()
        .map(|c| slugify(&c.as_os_str().to_string_lossy()))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Load every entry of collection `T` under `root`.
///
/// A missing collection directory is an empty collection. Drafts are
/// skipped. Order is file-name order, depth first.
pub fn load_collection<T: FrontMatter>(root: &Path) -> Result<Vec<Entry<T>>, ContentError> {
    let collection = T::COLLECTION;
    let dir = root.join(collection.dir_name());
    if !dir.is_dir() {
        tracing::debug!(collection = %collection, "collection directory absent");
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();
    let mut seen: HashMap<String, PathBuf> = HashMap::new();

    for item in WalkDir::new(&dir).sort_by_file_name() {
        let item = item.map_err(|source| ContentError::Walk {
            path: dir.clone(),
            source,
        })?;
        if !item.file_type().is_file() {
            continue;
        }
        let name = item.file_name().to_string_lossy();
        if name.starts_with('.') || !collection.accepts(&name) {
            continue;
        }

        let path = item.path();
        let rel = path.strip_prefix(&dir).unwrap_or(path);
        let text = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let entry: Entry<T> = parse_entry(&text, rel)?;

        if entry.data.is_draft() {
            tracing::debug!(collection = %collection, slug = %entry.slug, "skipping draft");
            continue;
        }
        if let Some(first) = seen.get(&entry.slug) {
            return Err(ContentError::DuplicateSlug {
                collection: collection.to_string(),
                slug: entry.slug,
                first: first.clone(),
                second: rel.to_path_buf(),
            });
        }
        seen.insert(entry.slug.clone(), rel.to_path_buf());
        entries.push(entry);
    }

    tracing::info!(collection = %collection, count = entries.len(), "loaded collection");
    Ok(entries)
}
