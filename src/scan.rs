//! Content scanning and manifest generation.
//!
//! Stage 1 of the build pipeline. Loads the site config and every content
//! collection, producing a [`Manifest`] that the generate stage consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                         # Content root
//! ├── config.toml                  # Site configuration (optional)
//! ├── directory/                   # Vendors → /directory/<slug>/
//! │   ├── acme-catering.md
//! │   └── zephyr-house.md
//! ├── posts/                       # Blog posts → /blog/<slug>/
//! │   └── choosing-a-venue.md
//! ├── authors/                     # Post authors → /authors/<slug>/
//! │   └── jane-doe.md
//! ├── about/                       # About page → /about/
//! │   └── -index.md                # Leading dash required
//! └── pages/                       # Standalone pages → /<slug>/
//!     └── contact.md
//! ```
//!
//! ## Validation
//!
//! The scanner fails on the first invalid file: bad front matter, a failed
//! schema rule, or a duplicate slug. Posts naming an author without an
//! author page are reported as warnings only; the name is shown unlinked.

use crate::config::{self, SiteConfig};
use crate::content::{self, ContentError};
use crate::schema::{AboutData, AuthorData, DirectoryData, PageData, PostData};
use crate::text::slugify;
use crate::types::{AboutPage, Author, DirectoryEntry, NavItem, Page, Post};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Content error: {0}")]
    Content(#[from] ContentError),
}

/// Manifest output from the scan stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub navigation: Vec<NavItem>,
    pub directory: Vec<DirectoryEntry>,
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub about: Vec<AboutPage>,
    #[serde(default)]
    pub pages: Vec<Page>,
    pub config: SiteConfig,
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("content directory not found: {}", root.display()),
        )));
    }

    // Load site config (uses defaults if config.toml doesn't exist)
    let config = config::load_config(root)?;

    let directory = content::load_collection::<DirectoryData>(root)?;
    let posts = content::load_collection::<PostData>(root)?;
    let authors = content::load_collection::<AuthorData>(root)?;
    let about = content::load_collection::<AboutData>(root)?;
    let pages = content::load_collection::<PageData>(root)?;

    warn_unknown_authors(&posts, &authors);

    let navigation = build_navigation(!posts.is_empty(), about.first(), &pages);

    Ok(Manifest {
        navigation,
        directory,
        posts,
        authors,
        about,
        pages,
        config,
    })
}

fn warn_unknown_authors(posts: &[Post], authors: &[Author]) {
    let known: HashSet<String> = authors.iter().map(|a| slugify(&a.data.title)).collect();
    for post in posts {
        for name in &post.data.authors {
            if !known.contains(&slugify(name)) {
                tracing::warn!(post = %post.slug, author = %name, "post names an author without an author page");
            }
        }
    }
}

/// Top-level paths owned by the generator. Pages may not claim them.
pub const RESERVED_SLUGS: &[&str] = &["directory", "blog", "categories", "tags", "authors", "about"];

/// True when a page slug would land inside a generated section.
pub fn is_reserved_page(slug: &str) -> bool {
    let top = slug.split('/').next().unwrap_or_default();
    RESERVED_SLUGS.contains(&top)
}

/// Top navigation: directory, blog (if any posts), about, then pages.
/// Pages with reserved slugs are never rendered, so they get no link.
fn build_navigation(has_posts: bool, about: Option<&AboutPage>, pages: &[Page]) -> Vec<NavItem> {
    let mut nav = vec![NavItem {
        title: "Directory".to_string(),
        path: "directory".to_string(),
    }];
    if has_posts {
        nav.push(NavItem {
            title: "Blog".to_string(),
            path: "blog".to_string(),
        });
    }
    if let Some(about) = about {
        nav.push(NavItem {
            title: about.data.title.clone(),
            path: "about".to_string(),
        });
    }
    nav.extend(pages.iter().filter(|p| !is_reserved_page(&p.slug)).map(|p| NavItem {
        title: p.data.title.clone(),
        path: p.slug.clone(),
    }));
    nav
}
