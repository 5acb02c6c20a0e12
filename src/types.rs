//! Shared types used by both pipeline stages.
//!
//! These types are serialized to JSON between stages (scan → generate) and
//! must round-trip through the manifest unchanged.

use crate::schema::{AboutData, AuthorData, DirectoryData, PageData, PostData};
use serde::{Deserialize, Serialize};

/// One loaded content file: its slug, its validated front matter, and the
/// markdown body that followed the front matter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry<T> {
    /// URL slug, unique within the collection.
    pub slug: String,
    /// Source file relative to the collection directory.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source: String,
    /// Raw markdown body.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,
    pub data: T,
}

impl<T> Entry<T> {
    /// An entry built in code rather than loaded from disk.
    pub fn new(slug: impl Into<String>, data: T) -> Self {
        Self {
            slug: slug.into(),
            source: String::new(),
            body: String::new(),
            data,
        }
    }
}

pub type DirectoryEntry = Entry<DirectoryData>;
pub type Post = Entry<PostData>;
pub type Author = Entry<AuthorData>;
pub type AboutPage = Entry<AboutData>;
pub type Page = Entry<PageData>;

/// Top navigation link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavItem {
    pub title: String,
    pub path: String,
}
