//! HTML site generation.
//!
//! Stage 2 of the build pipeline. Takes the scan manifest and writes the
//! final static site.
//!
//! ## Generated Pages
//!
//! - **Home** (`/index.html`): featured vendors and the latest posts
//! - **Directory** (`/directory/`): every vendor with category and location filters
//! - **Vendor pages** (`/directory/<slug>/`): detail, contact and body
//! - **Taxonomy listings** (`/directory/category/<slug>/`, `/directory/location/<slug>/`):
//!   the filter-only shell preselected on one term
//! - **Blog** (`/blog/`, `/blog/<slug>/`, `/categories/<slug>/`, `/tags/<slug>/`)
//! - **Authors** (`/authors/`, `/authors/<slug>/`)
//! - **About** (`/about/`) and standalone pages (`/<slug>/`)
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── directory-3f2a9c1b.js          # Fingerprinted filter script
//! ├── directory/
//! │   ├── index.html
//! │   ├── acme-catering/index.html
//! │   ├── category/catering/index.html
//! │   └── location/sydney/index.html
//! ├── blog/
//! │   ├── index.html
//! │   └── choosing-a-venue/index.html
//! ├── categories/venues/index.html
//! ├── tags/budget/index.html
//! ├── authors/jane-doe/index.html
//! ├── about/index.html
//! └── contact/index.html
//! ```
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: base styles, inlined after the color variables
//!   generated from config
//! - `static/directory.js`: client-side filtering, written once under a
//!   content-hashed name
//!
//! Page bodies are rendered in parallel with rayon. Files are written
//! afterwards on the calling thread.

use crate::components::{self, Nouns, vendor_path};
use crate::config::{self, SiteConfig};
use crate::listing::location::MemoryLocation;
use crate::listing::sort::newest_first;
use crate::listing::{CATEGORY_PARAM, LOCATION_PARAM, Listing, ListingOptions};
use crate::scan::{Manifest, is_reserved_page};
use crate::taxonomy::{filter_by_taxonomy, unique_terms};
use crate::text::{humanize, slugify, truncate_words};
use crate::types::{AboutPage, Author, DirectoryEntry, NavItem, Page, Post};
use chrono::NaiveDate;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Event, Options, Parser, TagEnd, html as md_html};
use rand::Rng;
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const DIRECTORY_JS: &str = include_str!("../static/directory.js");

/// What a generate run wrote.
#[derive(Debug, Default)]
pub struct GenerateReport {
    /// Page files relative to the output directory, in write order.
    pub pages: Vec<PathBuf>,
    /// File name of the fingerprinted directory script.
    pub script: String,
    /// Pages skipped because their slug collides with a generated section.
    pub skipped: Vec<String>,
}

impl GenerateReport {
    /// Number of pages written under `prefix` (e.g. `"directory"`).
    pub fn count_under(&self, prefix: &str) -> usize {
        self.pages.iter().filter(|p| p.starts_with(prefix)).count()
    }
}

struct RenderedPage {
    path: PathBuf,
    html: String,
}

impl RenderedPage {
    /// `url_path` is the page URL, e.g. `/directory/acme/`.
    fn new(url_path: &str, markup: Markup) -> Self {
        let dir = url_path.trim_matches('/');
        let path = if dir.is_empty() {
            PathBuf::from("index.html")
        } else {
            Path::new(dir).join("index.html")
        };
        Self {
            path,
            html: markup.into_string(),
        }
    }
}

/// Everything shared by every page of one build.
struct Site<'a> {
    manifest: &'a Manifest,
    css: String,
    script: String,
}

impl<'a> Site<'a> {
    fn new(manifest: &'a Manifest) -> Self {
        let color_css = config::generate_color_css(&manifest.config.colors);
        Self {
            manifest,
            css: format!("{}\n\n{}", color_css, CSS_STATIC),
            script: script_file_name(DIRECTORY_JS),
        }
    }

    fn config(&self) -> &SiteConfig {
        &self.manifest.config
    }

    fn nouns(&self) -> Nouns<'_> {
        Nouns {
            singular: &self.config().directory.noun,
            plural: &self.config().directory.noun_plural,
        }
    }

    fn page_title(&self, title: &str) -> String {
        format!("{} | {}", title, self.config().title)
    }

    fn canonical(&self, url_path: &str) -> Option<String> {
        let base = self.config().base_url.trim_end_matches('/');
        (!base.is_empty()).then(|| format!("{base}{url_path}"))
    }
}

/// `directory-<first 8 hex of sha256>.js`.
pub fn script_file_name(script: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(script.as_bytes()));
    format!("directory-{}.js", &digest[..8])
}

pub fn generate(manifest_path: &Path, output_dir: &Path) -> Result<GenerateReport, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;
    render_site(&manifest, output_dir, &mut rand::thread_rng())
}

/// Render every page for `manifest` and write it under `output_dir`.
///
/// `rng` drives random listing orders so builds can be made reproducible.
pub fn render_site<R: Rng + ?Sized>(
    manifest: &Manifest,
    output_dir: &Path,
    rng: &mut R,
) -> Result<GenerateReport, GenerateError> {
    let site = Site::new(manifest);
    let mut report = GenerateReport {
        script: site.script.clone(),
        ..GenerateReport::default()
    };

    let mut posts: Vec<&Post> = manifest.posts.iter().collect();
    posts.sort_by(|a, b| newest_first(a.data.date, b.data.date));

    let mut pages = vec![
        render_home(&site, &posts, rng),
        render_directory(&site, rng),
    ];
    pages.extend(render_directory_terms(&site, CATEGORY_PARAM));
    pages.extend(render_directory_terms(&site, LOCATION_PARAM));

    let vendors: Vec<RenderedPage> = manifest
        .directory
        .par_iter()
        .map(|entry| render_vendor_page(&site, entry))
        .collect();
    pages.extend(vendors);

    if !posts.is_empty() {
        pages.push(render_blog_index(&site, &posts));
        let post_pages: Vec<RenderedPage> = posts
            .par_iter()
            .map(|post| render_post_page(&site, post))
            .collect();
        pages.extend(post_pages);
        pages.extend(render_post_terms(&site, &posts, "categories", "categories"));
        pages.extend(render_post_terms(&site, &posts, "tags", "tags"));
    }

    if !manifest.authors.is_empty() {
        pages.push(render_authors_index(&site));
        for author in &manifest.authors {
            pages.push(render_author_page(&site, author, &posts));
        }
    }

    if let Some(about) = manifest.about.first() {
        pages.push(render_about_page(&site, about));
    }

    for page in &manifest.pages {
        if is_reserved_page(&page.slug) {
            tracing::warn!(slug = %page.slug, "page slug collides with a generated section; skipped");
            report.skipped.push(page.slug.clone());
            continue;
        }
        pages.push(render_page(&site, page));
    }

    fs::create_dir_all(output_dir)?;
    for page in pages {
        let target = output_dir.join(&page.path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, page.html)?;
        tracing::debug!(path = %page.path.display(), "wrote page");
        report.pages.push(page.path);
    }
    fs::write(output_dir.join(&site.script), DIRECTORY_JS)?;

    tracing::info!(
        pages = report.pages.len(),
        output = %output_dir.display(),
        "site generated"
    );
    Ok(report)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(
    site: &Site<'_>,
    title: &str,
    description: Option<&str>,
    url_path: &str,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                @if let Some(description) = description {
                    meta name="description" content=(description);
                }
                @if let Some(canonical) = site.canonical(url_path) {
                    link rel="canonical" href=(canonical);
                }
                style { (PreEscaped(&site.css)) }
            }
            body {
                (site_header(site, url_path))
                main { (content) }
                footer.site-footer {
                    "© " (site.config().title)
                }
                script src={ "/" (site.script) } defer {}
            }
        }
    }
}

fn site_header(site: &Site<'_>, current_path: &str) -> Markup {
    html! {
        header.site-header {
            a.site-title href="/" { (site.config().title) }
            nav.site-nav {
                (render_nav(&site.manifest.navigation, current_path))
            }
        }
    }
}

/// Renders the top navigation, marking the section containing `current_path`.
pub fn render_nav(items: &[NavItem], current_path: &str) -> Markup {
    let current = current_path.trim_matches('/');
    html! {
        ul {
            @for item in items {
                @let is_current = current == item.path
                    || current.starts_with(&format!("{}/", item.path));
                li class=[is_current.then_some("current")] {
                    a href={ "/" (item.path) "/" } { (item.title) }
                }
            }
        }
    }
}

fn markdown_to_html(body: &str) -> String {
    let parser = Parser::new_ext(body, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

/// Visible text of a markdown body, whitespace collapsed.
fn markdown_text(body: &str) -> String {
    let mut out = String::new();
    for event in Parser::new(body) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak
            | Event::HardBreak
            | Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item) => out.push(' '),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn format_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

fn post_summary(post: &Post, max: usize) -> String {
    match &post.data.description {
        Some(description) => description.clone(),
        None => truncate_words(&markdown_text(&post.body), max),
    }
}

fn term_links(base: &str, terms: &[String]) -> Markup {
    html! {
        ul.term-list {
            @for term in terms {
                @let slug = slugify(term);
                @if !slug.is_empty() {
                    li { a.chip href={ "/" (base) "/" (slug) "/" } { (humanize(term)) } }
                }
            }
        }
    }
}

fn author_link(site: &Site<'_>, name: &str) -> Markup {
    let wanted = slugify(name);
    let author = site
        .manifest
        .authors
        .iter()
        .find(|a| slugify(&a.data.title) == wanted);
    html! {
        @match author {
            Some(author) => {
                a href={ "/authors/" (author.slug) "/" } { (author.data.title) }
            }
            None => {
                span { (name) }
            }
        }
    }
}

fn post_card(site: &Site<'_>, post: &Post) -> Markup {
    html! {
        li.post-card {
            h3 { a href={ "/blog/" (post.slug) "/" } { (post.data.title) } }
            p.post-meta {
                @if let Some(date) = post.data.date {
                    time datetime=(date.to_string()) { (format_date(date)) }
                    " · "
                }
                @for (idx, name) in post.data.authors.iter().enumerate() {
                    @if idx > 0 { ", " }
                    (author_link(site, name))
                }
            }
            p { (post_summary(post, site.config().blog.summary_length)) }
        }
    }
}

fn post_list(site: &Site<'_>, posts: &[&Post]) -> Markup {
    html! {
        ul.post-list {
            @for post in posts {
                (post_card(site, post))
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_home<R: Rng + ?Sized>(site: &Site<'_>, posts: &[&Post], rng: &mut R) -> RenderedPage {
    let home = &site.config().home;
    let featured = (home.featured_count > 0).then(|| {
        let listing = Listing::new(
            site.manifest.directory.clone(),
            ListingOptions {
                sort: Some(home.featured_sort),
                featured_only: true,
                max_items: Some(home.featured_count),
                show_filters: false,
            },
            MemoryLocation::new("/"),
        );
        components::listings_shell(&listing, site.nouns(), rng)
    });
    let recent = &posts[..posts.len().min(home.recent_posts)];

    let content = html! {
        section.home-hero {
            h1 { (site.config().title) }
            a href="/directory/" { "Browse the directory" }
        }
        @if let Some(featured) = featured {
            section.home-featured {
                h2 { "Featured " (site.config().directory.noun_plural) }
                (featured)
            }
        }
        @if !recent.is_empty() {
            section.home-posts {
                h2 { "Latest from the blog" }
                (post_list(site, recent))
            }
        }
    };
    let title = site.config().title.clone();
    RenderedPage::new("/", base_document(site, &title, None, "/", content))
}

fn render_directory<R: Rng + ?Sized>(site: &Site<'_>, rng: &mut R) -> RenderedPage {
    let settings = &site.config().directory;
    let mut listing = Listing::new(
        site.manifest.directory.clone(),
        ListingOptions {
            sort: Some(settings.sort),
            featured_only: settings.featured_only,
            max_items: settings.cap(),
            show_filters: settings.show_filters,
        },
        MemoryLocation::new("/directory/"),
    );
    listing.mount();

    let content = html! {
        h1 { "Directory" }
        (components::listings_shell(&listing, site.nouns(), rng))
    };
    let title = site.page_title("Directory");
    RenderedPage::new(
        "/directory/",
        base_document(site, &title, None, "/directory/", content),
    )
}

/// One filter-only page per distinct term of `param` (`category` or `location`).
fn render_directory_terms(site: &Site<'_>, param: &str) -> Vec<RenderedPage> {
    let entries = &site.manifest.directory;
    let categories = unique_terms(entries, CATEGORY_PARAM);
    unique_terms(entries, param)
        .into_iter()
        .filter_map(|term| {
            let slug = slugify(&term);
            if slug.is_empty() {
                tracing::warn!(term = %term, param, "term has an empty slug; no page");
                return None;
            }
            let url_path = format!("/directory/{param}/{slug}/");
            let mut listing = Listing::new(
                entries.clone(),
                ListingOptions::filter_only(),
                MemoryLocation::with_search(url_path.as_str(), &format!("{param}={slug}")),
            )
            .with_categories(categories.clone());
            listing.mount();

            let heading = humanize(&term);
            let content = html! {
                p.breadcrumb { a href="/directory/" { "Directory" } " › " (heading) }
                h1 { (heading) }
                (components::filter_shell(&listing, site.nouns()))
            };
            let title = site.page_title(&heading);
            Some(RenderedPage::new(
                &url_path,
                base_document(site, &title, None, &url_path, content),
            ))
        })
        .collect()
}

fn render_vendor_page(site: &Site<'_>, entry: &DirectoryEntry) -> RenderedPage {
    let data = &entry.data;
    let url_path = vendor_path(&entry.slug);

    let content = html! {
        article.vendor-page {
            p.breadcrumb { a href="/directory/" { "Directory" } " › " (data.title) }
            @if let Some(image) = &data.image {
                div.vendor-hero { img src=(image) alt=(data.title); }
            }
            header {
                @if let Some(logo) = &data.logo {
                    img.directory-item-logo src=(logo) alt="";
                }
                h1 { (data.title) }
                @if data.featured {
                    span.badge-featured { "Featured" }
                }
            }
            @if let Some(description) = &data.description {
                p.lead { (description) }
            }
            (term_links("directory/category", &data.category))
            (term_links("directory/location", &data.location))
            div.vendor-body { (PreEscaped(markdown_to_html(&entry.body))) }
            dl.vendor-contact {
                @if let Some(website) = &data.website {
                    dt { "Website" }
                    dd { a href=(website) target="_blank" rel="noopener noreferrer" { (website) } }
                }
                @if let Some(email) = &data.email {
                    dt { "Email" }
                    dd { a href={ "mailto:" (email) } { (email) } }
                }
                @if let Some(phone) = &data.phone {
                    dt { "Phone" }
                    dd { a href={ "tel:" (phone.replace(' ', "")) } { (phone) } }
                }
                @if let Some(address) = &data.address {
                    dt { "Address" }
                    dd { (address) }
                }
            }
            @if let Some(social) = &data.social {
                ul.social-links {
                    @if let Some(url) = &social.facebook {
                        li { a href=(url) target="_blank" rel="noopener noreferrer" { "Facebook" } }
                    }
                    @if let Some(url) = &social.instagram {
                        li { a href=(url) target="_blank" rel="noopener noreferrer" { "Instagram" } }
                    }
                    @if let Some(url) = &social.pinterest {
                        li { a href=(url) target="_blank" rel="noopener noreferrer" { "Pinterest" } }
                    }
                }
            }
        }
    };
    let title = site.page_title(data.meta_title.as_deref().unwrap_or(&data.title));
    RenderedPage::new(
        &url_path,
        base_document(site, &title, data.description.as_deref(), &url_path, content),
    )
}

fn render_blog_index(site: &Site<'_>, posts: &[&Post]) -> RenderedPage {
    let content = html! {
        h1 { "Blog" }
        (post_list(site, posts))
    };
    let title = site.page_title("Blog");
    RenderedPage::new("/blog/", base_document(site, &title, None, "/blog/", content))
}

fn render_post_page(site: &Site<'_>, post: &Post) -> RenderedPage {
    let data = &post.data;
    let url_path = format!("/blog/{}/", post.slug);

    let content = html! {
        article.post-page {
            h1 { (data.title) }
            p.post-meta {
                @if let Some(date) = data.date {
                    time datetime=(date.to_string()) { (format_date(date)) }
                    " · "
                }
                @for (idx, name) in data.authors.iter().enumerate() {
                    @if idx > 0 { ", " }
                    (author_link(site, name))
                }
            }
            @if let Some(image) = &data.image {
                img.post-image src=(image) alt=(data.title);
            }
            div.post-body { (PreEscaped(markdown_to_html(&post.body))) }
            footer {
                (term_links("categories", &data.categories))
                (term_links("tags", &data.tags))
            }
        }
    };
    let title = site.page_title(data.meta_title.as_deref().unwrap_or(&data.title));
    RenderedPage::new(
        &url_path,
        base_document(site, &title, data.description.as_deref(), &url_path, content),
    )
}

/// Post listings per term of `field`, written under `/<base>/<slug>/`.
fn render_post_terms(site: &Site<'_>, posts: &[&Post], field: &str, base: &str) -> Vec<RenderedPage> {
    unique_terms(posts, field)
        .into_iter()
        .filter(|term| !slugify(term).is_empty())
        .map(|term| {
            let url_path = format!("/{}/{}/", base, slugify(&term));
            let matching: Vec<&Post> = filter_by_taxonomy(posts, field, &term)
                .into_iter()
                .copied()
                .collect();
            let heading = humanize(&term);
            let content = html! {
                p.breadcrumb { a href="/blog/" { "Blog" } " › " (heading) }
                h1 { (heading) }
                (post_list(site, &matching))
            };
            let title = site.page_title(&heading);
            RenderedPage::new(&url_path, base_document(site, &title, None, &url_path, content))
        })
        .collect()
}

fn render_authors_index(site: &Site<'_>) -> RenderedPage {
    let content = html! {
        h1 { "Authors" }
        ul.post-list {
            @for author in &site.manifest.authors {
                li {
                    h3 { a href={ "/authors/" (author.slug) "/" } { (author.data.title) } }
                    @if let Some(description) = &author.data.description {
                        p { (description) }
                    }
                }
            }
        }
    };
    let title = site.page_title("Authors");
    RenderedPage::new("/authors/", base_document(site, &title, None, "/authors/", content))
}

fn render_author_page(site: &Site<'_>, author: &Author, posts: &[&Post]) -> RenderedPage {
    let data = &author.data;
    let url_path = format!("/authors/{}/", author.slug);
    let written: Vec<&Post> = filter_by_taxonomy(posts, "authors", &data.title)
        .into_iter()
        .copied()
        .collect();

    let content = html! {
        article.author-page {
            @if let Some(image) = &data.image {
                img.author-image src=(image) alt=(data.title);
            }
            h1 { (data.title) }
            @if let Some(description) = &data.description {
                p.lead { (description) }
            }
            div.author-body { (PreEscaped(markdown_to_html(&author.body))) }
            @if let Some(social) = &data.social {
                ul.social-links {
                    @if let Some(url) = &social.facebook {
                        li { a href=(url) target="_blank" rel="noopener noreferrer" { "Facebook" } }
                    }
                    @if let Some(url) = &social.twitter {
                        li { a href=(url) target="_blank" rel="noopener noreferrer" { "Twitter" } }
                    }
                    @if let Some(url) = &social.instagram {
                        li { a href=(url) target="_blank" rel="noopener noreferrer" { "Instagram" } }
                    }
                }
            }
            @if !written.is_empty() {
                h2 { "Posts" }
                (post_list(site, &written))
            }
        }
    };
    let title = site.page_title(data.meta_title.as_deref().unwrap_or(&data.title));
    RenderedPage::new(
        &url_path,
        base_document(site, &title, data.description.as_deref(), &url_path, content),
    )
}

fn render_about_page(site: &Site<'_>, about: &AboutPage) -> RenderedPage {
    let data = &about.data;
    let content = html! {
        article.about-page {
            h1 { (data.title) }
            @if let Some(image) = &data.image {
                img.about-image src=(image) alt=(data.title);
            }
            div.about-content { (PreEscaped(markdown_to_html(&about.body))) }
            section {
                h2 { (data.what_i_do.title) }
                div.what-i-do {
                    @for item in &data.what_i_do.items {
                        div.what-i-do-item {
                            h3 { (item.title) }
                            p { (item.description) }
                        }
                    }
                }
            }
        }
    };
    let title = site.page_title(data.meta_title.as_deref().unwrap_or(&data.title));
    RenderedPage::new("/about/", base_document(site, &title, None, "/about/", content))
}

fn render_page(site: &Site<'_>, page: &Page) -> RenderedPage {
    let data = &page.data;
    let url_path = format!("/{}/", page.slug);
    let content = html! {
        article.page id=[data.id.as_deref()] {
            h1 { (data.title) }
            @if let Some(image) = &data.image {
                img.page-image src=(image) alt=(data.title);
            }
            div.page-body { (PreEscaped(markdown_to_html(&page.body))) }
        }
    };
    let title = site.page_title(data.meta_title.as_deref().unwrap_or(&data.title));
    RenderedPage::new(
        &url_path,
        base_document(site, &title, data.description.as_deref(), &url_path, content),
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::scan;
    use crate::test_helpers::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tempfile::TempDir;

    fn build_fixtures() -> (TempDir, TempDir, GenerateReport) {
        let content = setup_fixtures();
        let manifest = scan(content.path()).unwrap();
        let out = TempDir::new().unwrap();
        let report = render_site(&manifest, out.path(), &mut StdRng::seed_from_u64(7)).unwrap();
        (content, out, report)
    }

    fn read(out: &TempDir, rel: &str) -> String {
        fs::read_to_string(out.path().join(rel)).unwrap_or_else(|e| panic!("{rel}: {e}"))
    }

    fn nav() -> Vec<NavItem> {
        vec![
            NavItem {
                title: "Directory".to_string(),
                path: "directory".to_string(),
            },
            NavItem {
                title: "Blog".to_string(),
                path: "blog".to_string(),
            },
        ]
    }

    // =========================================================================
    // Components
    // =========================================================================

    #[test]
    fn nav_renders_items() {
        let html = render_nav(&nav(), "/").into_string();
        assert!(html.contains("Directory"));
        assert!(html.contains(r#"href="/blog/""#));
        assert!(!html.contains("current"));
    }

    #[test]
    fn nav_marks_current_section() {
        let html = render_nav(&nav(), "/directory/acme/").into_string();
        assert!(html.contains(r#"<li class="current"><a href="/directory/">"#));
    }

    #[test]
    fn nav_escapes_titles() {
        let items = vec![NavItem {
            title: "<script>alert('xss')</script>".to_string(),
            path: "x".to_string(),
        }];
        let html = render_nav(&items, "").into_string();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn script_name_is_stable_and_hashed() {
        let a = script_file_name("console.log(1)");
        assert_eq!(a, script_file_name("console.log(1)"));
        assert_ne!(a, script_file_name("console.log(2)"));
        assert!(a.starts_with("directory-") && a.ends_with(".js"));
        assert_eq!(a.len(), "directory-".len() + 8 + ".js".len());
    }

    #[test]
    fn markdown_text_strips_markup() {
        assert_eq!(
            markdown_text("# Title\n\nSome **bold** and `code`.\n\n- item"),
            "Title Some bold and code. item"
        );
    }

    #[test]
    fn dates_render_long_form() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(format_date(date), "1 March 2024");
    }

    // =========================================================================
    // Full site
    // =========================================================================

    #[test]
    fn writes_expected_pages() {
        let (_content, out, report) = build_fixtures();
        for rel in [
            "index.html",
            "directory/index.html",
            "directory/acme-catering/index.html",
            "directory/lens-and-light/index.html",
            "directory/category/catering/index.html",
            "directory/location/blue-mountains/index.html",
            "blog/index.html",
            "blog/choosing-a-venue/index.html",
            "categories/venues/index.html",
            "tags/checklists/index.html",
            "authors/index.html",
            "authors/jane-doe/index.html",
            "about/index.html",
            "contact/index.html",
            "privacy-policy/index.html",
        ] {
            assert!(out.path().join(rel).exists(), "missing {rel}");
        }
        assert!(out.path().join(&report.script).exists());
        assert!(!out.path().join("directory/unfinished-vendor").exists());
        assert!(!out.path().join("blog/unpublished").exists());
        assert_eq!(report.count_under("directory"), 1 + 4 + 5 + 4);
    }

    #[test]
    fn directory_lists_vendors_alphabetically() {
        let (_content, out, _) = build_fixtures();
        let html = read(&out, "directory/index.html");
        let order: Vec<usize> = ["acme-catering", "bloom-florals", "lens-and-light", "zephyr-house"]
            .iter()
            .map(|slug| html.find(&format!(r#"data-slug="{slug}""#)).unwrap())
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
        assert!(html.contains("Showing 4 vendors"));
        assert!(html.contains("All Categories"));
    }

    #[test]
    fn category_page_preselects_term() {
        let (_content, out, _) = build_fixtures();
        let html = read(&out, "directory/category/catering/index.html");
        assert!(html.contains("Showing 1 vendor in Catering"));
        assert!(html.contains(r#"data-value="catering" aria-pressed="true""#));
        assert!(html.contains(r#"data-slug="zephyr-house" data-category="venues" data-location="sydney blue-mountains" hidden"#));
    }

    #[test]
    fn home_shows_featured_and_recent() {
        let (_content, out, _) = build_fixtures();
        let html = read(&out, "index.html");
        assert!(html.contains("Featured vendors"));
        assert!(html.contains(r#"data-slug="acme-catering""#));
        assert!(html.contains(r#"data-slug="bloom-florals""#));
        assert!(!html.contains(r#"data-slug="zephyr-house""#));
        assert!(!html.contains("(featured only)"));
        let newer = html.find("What to Ask Your Caterer").unwrap();
        let older = html.find("/blog/choosing-a-venue/").unwrap();
        assert!(newer < older);
    }

    #[test]
    fn vendor_page_has_contact_details() {
        let (_content, out, _) = build_fixtures();
        let html = read(&out, "directory/acme-catering/index.html");
        assert!(html.contains("mailto:hello@acme-catering.example"));
        assert!(html.contains("tel:+61255501234"));
        assert!(html.contains("<li>Grazing tables</li>"));
        assert!(html.contains(r#"href="/directory/location/sydney/""#));
        assert!(html.contains("<title>Acme Catering | Harbour &amp; Hills Weddings</title>"));
        assert!(html.contains(r#"<link rel="canonical" href="https://weddings.example/directory/acme-catering/">"#));
    }

    #[test]
    fn post_page_links_known_authors() {
        let (_content, out, _) = build_fixtures();
        let html = read(&out, "blog/choosing-a-venue/index.html");
        assert!(html.contains(r#"href="/authors/jane-doe/""#));
        assert!(html.contains(r#"href="/tags/budget/""#));
        assert!(html.contains("1 March 2024"));
    }

    #[test]
    fn author_page_lists_their_posts() {
        let (_content, out, _) = build_fixtures();
        let html = read(&out, "authors/jane-doe/index.html");
        assert!(html.contains("Choosing a Venue"));
        assert!(!html.contains("What to Ask Your Caterer"));
    }

    #[test]
    fn about_page_renders_what_i_do() {
        let (_content, out, _) = build_fixtures();
        let html = read(&out, "about/index.html");
        assert!(html.contains("What we do"));
        assert!(html.contains("Planning guides"));
        assert!(html.contains("<title>About us | Harbour &amp; Hills Weddings</title>"));
    }

    #[test]
    fn script_is_referenced_from_pages() {
        let (_content, out, report) = build_fixtures();
        let html = read(&out, "directory/index.html");
        assert!(html.contains(&format!(r#"src="/{}""#, report.script)));
    }

    #[test]
    fn colors_are_inlined() {
        let (_content, out, _) = build_fixtures();
        let html = read(&out, "index.html");
        assert!(html.contains("--color-primary"));
        assert!(html.contains(".directory-grid"));
    }

    #[test]
    fn reserved_page_slug_is_skipped() {
        let content = setup_fixtures();
        fs::write(
            content.path().join("pages/blog.md"),
            "---\ntitle: Blog Override\n---\n",
        )
        .unwrap();
        let manifest = scan(content.path()).unwrap();
        let out = TempDir::new().unwrap();
        let report = render_site(&manifest, out.path(), &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(report.skipped, vec!["blog"]);
        let html = read(&out, "blog/index.html");
        assert!(!html.contains("<h1>Blog Override</h1>"));
        assert!(!html.contains("Blog Override"));
    }

    #[test]
    fn generate_reads_manifest_file() {
        let content = setup_fixtures();
        let manifest = scan(content.path()).unwrap();
        let tmp = TempDir::new().unwrap();
        let manifest_path = tmp.path().join("manifest.json");
        fs::write(&manifest_path, serde_json::to_string_pretty(&manifest).unwrap()).unwrap();

        let out = tmp.path().join("dist");
        let report = generate(&manifest_path, &out).unwrap();
        assert!(out.join("index.html").exists());
        assert!(!report.pages.is_empty());
    }

    #[test]
    fn generate_rejects_bad_manifest() {
        let tmp = TempDir::new().unwrap();
        let manifest_path = tmp.path().join("manifest.json");
        fs::write(&manifest_path, "{not json").unwrap();
        let result = generate(&manifest_path, &tmp.path().join("dist"));
        assert!(matches!(result, Err(GenerateError::Json(_))));
    }
}
