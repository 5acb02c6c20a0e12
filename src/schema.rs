//! Front-matter schemas for the five content collections.
//!
//! Each collection lives in its own directory under the content root and
//! every markdown file in it carries YAML front matter matching one of the
//! structs below:
//!
//! | Collection | Directory | Files |
//! |------------|-----------|-------|
//! | posts | `posts/` | `**/*.md` |
//! | about | `about/` | `**/-*.md` (leading dash) |
//! | authors | `authors/` | `**/*.md` |
//! | pages | `pages/` | `**/*.md` |
//! | directory | `directory/` | `**/*.md` |
//!
//! Deserialization applies the defaults (`category = ["Other"]`,
//! `location = ["Australia"]`, `categories = ["others"]`, ...). Validation
//! then checks the rules serde cannot express: required strings are
//! non-empty, URLs are absolute `http(s)`, emails look like emails, image
//! references are either absolute URLs or site paths. Unknown keys are
//! ignored, so front matter written for other tools does not break a build.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use url::Url;

/// A single failed validation rule.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{field}: {message}")]
pub struct SchemaError {
    pub field: String,
    pub message: String,
}

impl SchemaError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// The content collections a site is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Posts,
    About,
    Authors,
    Pages,
    Directory,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Posts,
        Collection::About,
        Collection::Authors,
        Collection::Pages,
        Collection::Directory,
    ];

    /// Directory name under the content root.
    pub fn dir_name(self) -> &'static str {
        match self {
            Collection::Posts => "posts",
            Collection::About => "about",
            Collection::Authors => "authors",
            Collection::Pages => "pages",
            Collection::Directory => "directory",
        }
    }

    /// Whether a file (by name) belongs to this collection.
    ///
    /// Only `.md` and `.mdx` files count. The about collection additionally
    /// requires a leading dash (`-index.md`).
    pub fn accepts(self, file_name: &str) -> bool {
        let is_markdown = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("mdx"))
            .unwrap_or(false);
        match self {
            Collection::About => is_markdown && file_name.starts_with('-'),
            _ => is_markdown,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Front matter that can be loaded as a collection entry.
pub trait FrontMatter: serde::de::DeserializeOwned {
    const COLLECTION: Collection;

    fn title(&self) -> &str;

    fn is_draft(&self) -> bool {
        false
    }

    /// Check rules that deserialization cannot express.
    fn validate(&self) -> Result<(), SchemaError>;
}

// ============================================================================
// Collections
// ============================================================================

/// A wedding vendor listed in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryData {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Absolute URL or site path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Absolute URL or site path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default = "default_location")]
    pub location: Vec<String>,
    #[serde(default = "default_category")]
    pub category: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub draft: bool,
    #[serde(
        default,
        deserialize_with = "dates::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social: Option<VendorSocial>,
}

fn default_location() -> Vec<String> {
    vec!["Australia".to_string()]
}

fn default_category() -> Vec<String> {
    vec!["Other".to_string()]
}

impl DirectoryData {
    /// A vendor with only a title; every other field takes its default.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            meta_title: None,
            description: None,
            image: None,
            logo: None,
            website: None,
            email: None,
            phone: None,
            address: None,
            location: default_location(),
            category: default_category(),
            featured: false,
            draft: false,
            date: None,
            social: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VendorSocial {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinterest: Option<String>,
}

impl FrontMatter for DirectoryData {
    const COLLECTION: Collection = Collection::Directory;

    fn title(&self) -> &str {
        &self.title
    }

    fn is_draft(&self) -> bool {
        self.draft
    }

    fn validate(&self) -> Result<(), SchemaError> {
        require_text("title", &self.title)?;
        check_image("image", self.image.as_deref())?;
        check_image("logo", self.logo.as_deref())?;
        check_url("website", self.website.as_deref())?;
        check_email("email", self.email.as_deref())?;
        if self.category.is_empty() {
            return Err(SchemaError::new("category", "must list at least one category"));
        }
        if let Some(social) = &self.social {
            check_url("social.facebook", social.facebook.as_deref())?;
            check_url("social.instagram", social.instagram.as_deref())?;
            check_url("social.pinterest", social.pinterest.as_deref())?;
        }
        Ok(())
    }
}

/// A blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostData {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "dates::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default = "default_post_categories")]
    pub categories: Vec<String>,
    #[serde(default = "default_post_authors")]
    pub authors: Vec<String>,
    #[serde(default = "default_post_tags")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub draft: bool,
}

fn default_post_categories() -> Vec<String> {
    vec!["others".to_string()]
}

fn default_post_authors() -> Vec<String> {
    vec!["Admin".to_string()]
}

fn default_post_tags() -> Vec<String> {
    vec!["others".to_string()]
}

impl FrontMatter for PostData {
    const COLLECTION: Collection = Collection::Posts;

    fn title(&self) -> &str {
        &self.title
    }

    fn is_draft(&self) -> bool {
        self.draft
    }

    fn validate(&self) -> Result<(), SchemaError> {
        require_text("title", &self.title)?;
        check_image("image", self.image.as_deref())
    }
}

/// The about page. Only one is expected but the collection allows several.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AboutData {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub draft: bool,
    pub what_i_do: WhatIDo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatIDo {
    pub title: String,
    pub items: Vec<WhatIDoItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatIDoItem {
    pub title: String,
    pub description: String,
}

impl FrontMatter for AboutData {
    const COLLECTION: Collection = Collection::About;

    fn title(&self) -> &str {
        &self.title
    }

    fn is_draft(&self) -> bool {
        self.draft
    }

    fn validate(&self) -> Result<(), SchemaError> {
        require_text("title", &self.title)?;
        require_text("what_i_do.title", &self.what_i_do.title)?;
        check_image("image", self.image.as_deref())
    }
}

/// A blog author. Posts reference authors by title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorData {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social: Option<AuthorSocial>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorSocial {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

impl FrontMatter for AuthorData {
    const COLLECTION: Collection = Collection::Authors;

    fn title(&self) -> &str {
        &self.title
    }

    fn validate(&self) -> Result<(), SchemaError> {
        require_text("title", &self.title)?;
        check_image("image", self.image.as_deref())?;
        if let Some(social) = &self.social {
            check_url("social.facebook", social.facebook.as_deref())?;
            check_url("social.twitter", social.twitter.as_deref())?;
            check_url("social.instagram", social.instagram.as_deref())?;
        }
        Ok(())
    }
}

/// A standalone page such as `/contact/` or `/privacy-policy/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(default)]
    pub draft: bool,
}

impl FrontMatter for PageData {
    const COLLECTION: Collection = Collection::Pages;

    fn title(&self) -> &str {
        &self.title
    }

    fn is_draft(&self) -> bool {
        self.draft
    }

    fn validate(&self) -> Result<(), SchemaError> {
        require_text("title", &self.title)?;
        check_image("image", self.image.as_deref())
    }
}

// ============================================================================
// Field rules
// ============================================================================

fn require_text(field: &str, value: &str) -> Result<(), SchemaError> {
    if value.trim().is_empty() {
        return Err(SchemaError::new(field, "must not be empty"));
    }
    Ok(())
}

/// Absent is fine; present must be an absolute http(s) URL.
fn check_url(field: &str, value: Option<&str>) -> Result<(), SchemaError> {
    match value {
        Some(raw) if !is_http_url(raw) => Err(SchemaError::new(
            field,
            format!("`{raw}` is not an absolute http(s) URL"),
        )),
        _ => Ok(()),
    }
}

fn check_email(field: &str, value: Option<&str>) -> Result<(), SchemaError> {
    match value {
        Some(raw) if !is_email(raw) => Err(SchemaError::new(
            field,
            format!("`{raw}` is not a valid email address"),
        )),
        _ => Ok(()),
    }
}

/// Image references are either remote (`https://...`) or site paths.
fn check_image(field: &str, value: Option<&str>) -> Result<(), SchemaError> {
    let Some(raw) = value else {
        return Ok(());
    };
    if raw.trim().is_empty() {
        return Err(SchemaError::new(field, "must not be empty"));
    }
    if raw.contains("://") && !is_http_url(raw) {
        return Err(SchemaError::new(
            field,
            format!("`{raw}` must be an http(s) URL or a site path"),
        ));
    }
    if raw.chars().any(char::is_whitespace) && !raw.contains("://") {
        return Err(SchemaError::new(
            field,
            format!("`{raw}` must not contain whitespace"),
        ));
    }
    Ok(())
}

pub fn is_http_url(raw: &str) -> bool {
    Url::parse(raw)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host().is_some())
        .unwrap_or(false)
}

pub fn is_email(raw: &str) -> bool {
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !raw.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

/// Dates are written either as `2024-05-01` or as a full RFC 3339 timestamp.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        chrono::DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.date_naive())
    })
}

mod dates {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, de::Error};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| {
            super::parse_date(&s).ok_or_else(|| D::Error::custom(format!("invalid date `{s}`")))
        })
        .transpose()
    }
}
