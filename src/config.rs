//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the content root and is layered over the stock defaults: a user config
//! only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # Defaults shown; every key may be omitted
//!
//! title = "Wedding Directory"
//! base_url = ""             # e.g. "https://example.com/" (used for canonical links)
//!
//! [directory]
//! sort = "alphabetical"     # alphabetical | date | random
//! show_filters = true       # Category/location buttons on /directory/
//! featured_only = false     # Only list featured vendors on /directory/
//! max_items = 0             # Cap the listing (0 = no cap)
//! noun = "vendor"           # "Showing 1 vendor"
//! noun_plural = "vendors"   # "Showing 3 vendors"
//!
//! [home]
//! featured_count = 6        # Featured vendors on the home page (0 hides the section)
//! featured_sort = "random"  # Order of featured vendors
//! recent_posts = 3          # Latest posts on the home page
//!
//! [blog]
//! summary_length = 160      # Characters of post summary on listing pages
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#222222"
//! text_muted = "#666666"
//! border = "#e6e6e6"
//! primary = "#b5838d"       # Active filter buttons, links
//! surface = "#f7f3f0"       # Cards and inactive buttons
//!
//! [colors.dark]
//! background = "#161414"
//! text = "#eeeeee"
//! text_muted = "#a09a98"
//! border = "#3a3534"
//! primary = "#e5989b"
//! surface = "#231f1e"
//! ```
//!
//! Unknown keys are an error.

use crate::listing::sort::SortMode;
use crate::schema::is_http_url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Everything `config.toml` can set. Every key has a default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site title, shown in the header and in every `<title>`.
    pub title: String,
    /// Absolute site URL. Empty means links stay root-relative.
    pub base_url: String,
    /// Vendor directory listing settings.
    pub directory: DirectoryConfig,
    /// Home page sections.
    pub home: HomeConfig,
    /// Blog settings.
    pub blog: BlogConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Wedding Directory".to_string(),
            base_url: String::new(),
            directory: DirectoryConfig::default(),
            home: HomeConfig::default(),
            blog: BlogConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Reject values that would produce a broken site.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Validation("title must not be empty".into()));
        }
        if !self.base_url.is_empty() && !is_http_url(&self.base_url) {
            return Err(ConfigError::Validation(
                "base_url must be an absolute http(s) URL".into(),
            ));
        }
        if self.directory.noun.trim().is_empty() || self.directory.noun_plural.trim().is_empty() {
            return Err(ConfigError::Validation(
                "directory.noun and directory.noun_plural must not be empty".into(),
            ));
        }
        if self.blog.summary_length == 0 {
            return Err(ConfigError::Validation(
                "blog.summary_length must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Vendor directory listing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DirectoryConfig {
    /// Order of the main listing.
    pub sort: SortMode,
    /// Show category and location filter buttons.
    pub show_filters: bool,
    /// Only list featured vendors.
    pub featured_only: bool,
    /// Maximum number of vendors shown; 0 disables the cap.
    pub max_items: usize,
    /// Singular noun used in the result summary.
    pub noun: String,
    /// Plural noun used in the result summary.
    pub noun_plural: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            sort: SortMode::Alphabetical,
            show_filters: true,
            featured_only: false,
            max_items: 0,
            noun: "vendor".to_string(),
            noun_plural: "vendors".to_string(),
        }
    }
}

impl DirectoryConfig {
    /// The cap as the listing expects it: `None` when disabled.
    pub fn cap(&self) -> Option<usize> {
        (self.max_items > 0).then_some(self.max_items)
    }
}

/// Home page sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HomeConfig {
    /// Number of featured vendors; 0 hides the section.
    pub featured_count: usize,
    /// Order of the featured vendors.
    pub featured_sort: SortMode,
    /// Number of recent posts; 0 hides the section.
    pub recent_posts: usize,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            featured_count: 6,
            featured_sort: SortMode::Random,
            recent_posts: 3,
        }
    }
}

/// Blog settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlogConfig {
    /// Characters of summary shown for each post on listing pages.
    pub summary_length: usize,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            summary_length: 160,
        }
    }
}

/// Light and dark palettes, emitted as CSS custom properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// One palette.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Background color.
    pub background: String,
    /// Primary text color.
    pub text: String,
    /// Muted/secondary text color (summaries, dates, chips).
    pub text_muted: String,
    /// Border color.
    pub border: String,
    /// Accent color: active filter buttons, links, badges.
    pub primary: String,
    /// Card and inactive button background.
    pub surface: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#222222".to_string(),
            text_muted: "#666666".to_string(),
            border: "#e6e6e6".to_string(),
            primary: "#b5838d".to_string(),
            surface: "#f7f3f0".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#161414".to_string(),
            text: "#eeeeee".to_string(),
            text_muted: "#a09a98".to_string(),
            border: "#3a3534".to_string(),
            primary: "#e5989b".to_string(),
            surface: "#231f1e".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Stock defaults as a TOML table, the base layer user values land on.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Lay `overlay` over `base`. Tables merge per key, anything else replaces.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    let (mut table, overlay) = match (base, overlay) {
        (toml::Value::Table(table), toml::Value::Table(overlay)) => (table, overlay),
        // Scalars and arrays are replaced wholesale
        (_, overlay) => return overlay,
    };
    for (key, value) in overlay {
        let merged = match table.remove(&key) {
            Some(existing) => merge_toml(existing, value),
            None => value,
        };
        table.insert(key, merged);
    }
    toml::Value::Table(table)
}

/// Load `config.toml` from the content root.
///
/// A missing file yields the stock defaults. A present file is merged over
/// them, deserialized (unknown keys rejected) and validated.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = root.join("config.toml");
    let mut value = stock_defaults_value();
    if config_path.exists() {
        let user: toml::Value = toml::from_str(&fs::read_to_string(&config_path)?)?;
        value = merge_toml(value, user);
    }
    let config: SiteConfig = value.try_into()?;
    config.validate()?;
    Ok(config)
}

/// The documented stock `config.toml` printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Wedding Directory Configuration
# ===============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file at content/config.toml.
# Unknown keys will cause an error.

# Site title, shown in the header and in every page title.
title = "Wedding Directory"

# Absolute site URL, e.g. "https://example.com/". Leave empty for
# root-relative links only.
base_url = ""

# ---------------------------------------------------------------------------
# Vendor directory
# ---------------------------------------------------------------------------
[directory]
# Order of the main listing: "alphabetical", "date" (newest first,
# undated last) or "random" (reshuffled on every page load).
sort = "alphabetical"

# Show category and location filter buttons. The active filters are kept
# in the URL as ?category=...&location=...
show_filters = true

# Only list vendors marked `featured: true`.
featured_only = false

# Maximum number of vendors shown (0 = no cap).
max_items = 0

# Nouns used in "Showing 3 vendors in Catering".
noun = "vendor"
noun_plural = "vendors"

# ---------------------------------------------------------------------------
# Home page
# ---------------------------------------------------------------------------
[home]
# Featured vendors on the home page (0 hides the section).
featured_count = 6

# Order of featured vendors.
featured_sort = "random"

# Latest blog posts on the home page (0 hides the section).
recent_posts = 3

# ---------------------------------------------------------------------------
# Blog
# ---------------------------------------------------------------------------
[blog]
# Characters of summary shown for each post on listing pages.
summary_length = 160

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#222222"
text_muted = "#666666"
border = "#e6e6e6"
primary = "#b5838d"       # Active filters, links, badges
surface = "#f7f3f0"       # Cards, inactive filter buttons

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#161414"
text = "#eeeeee"
text_muted = "#a09a98"
border = "#3a3534"
primary = "#e5989b"
surface = "#231f1e"
"##
}

/// `--color-*` custom properties for both palettes.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-border: {light_border};
    --color-primary: {light_primary};
    --color-surface: {light_surface};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-border: {dark_border};
        --color-primary: {dark_primary};
        --color-surface: {dark_surface};
    }}
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_border = colors.light.border,
        light_primary = colors.light.primary,
        light_surface = colors.light.surface,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        dark_primary = colors.dark.primary,
        dark_surface = colors.dark.surface,
    )
}
