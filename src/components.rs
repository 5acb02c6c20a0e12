//! Directory markup: vendor cards and the two listing shells.
//!
//! Both shells render the same thing for a [`Listing`]: optional filter
//! button groups, a result summary, and a grid of cards. Every candidate
//! card is emitted; the ones the current state hides carry `hidden` so the
//! client script can re-filter in place.
//!
//! Data attributes consumed by `static/directory.js`:
//!
//! | element            | attribute                 | value                         |
//! |--------------------|---------------------------|-------------------------------|
//! | `.directory-listing` | `data-max-items`         | cap, `0` for none             |
//! |                    | `data-show-filters`       | `true` / `false`              |
//! |                    | `data-sort`               | sort mode, `none` for source order |
//! |                    | `data-noun(-plural)`      | summary nouns                 |
//! | `.filter-button`   | `data-filter`, `data-value` | param name, slug or `all`   |
//! | `.directory-cell`  | `data-category`, `data-location` | space-separated slugs  |

use crate::listing::location::LocationAdapter;
use crate::listing::{
    CATEGORY_PARAM, Filter, KnownTerms, LOCATION_PARAM, Listing, ListingView, Placement,
};
use crate::text::{humanize, slugify};
use crate::types::DirectoryEntry;
use maud::{Markup, html};
use rand::Rng;

/// Nouns for the result summary, e.g. `("vendor", "vendors")`.
#[derive(Debug, Clone, Copy)]
pub struct Nouns<'a> {
    pub singular: &'a str,
    pub plural: &'a str,
}

pub const EMPTY_MESSAGE: &str = "No vendors found matching your criteria.";

/// Detail page path for a vendor.
pub fn vendor_path(slug: &str) -> String {
    format!("/directory/{slug}/")
}

/// One vendor card.
pub fn directory_item(entry: &DirectoryEntry) -> Markup {
    let data = &entry.data;
    let detail = vendor_path(&entry.slug);

    html! {
        article.directory-item {
            @if let Some(image) = &data.image {
                a.directory-item-image href=(detail) {
                    img src=(image) alt=(data.title) loading="lazy";
                }
            }
            div.directory-item-body {
                header.directory-item-header {
                    @if let Some(logo) = &data.logo {
                        img.directory-item-logo src=(logo) alt=(data.title);
                    } @else {
                        h3.directory-item-title {
                            a href=(detail) { (data.title) }
                        }
                    }
                    @if data.featured {
                        span.badge-featured { "Featured" }
                    }
                }
                @if let Some(description) = &data.description {
                    p.directory-item-description.line-clamp { (description) }
                }
                ul.chips {
                    @for category in &data.category {
                        li.chip { (humanize(category)) }
                    }
                }
                div.directory-item-actions {
                    a.view-details href=(detail) { "View Details" }
                    @if let Some(website) = &data.website {
                        a.visit-website href=(website) target="_blank" rel="noopener noreferrer" {
                            "Visit Website"
                        }
                    }
                }
            }
        }
    }
}

/// A row of filter buttons for one taxonomy, "All" first.
pub fn filter_group(param: &str, all_label: &str, terms: &[String], active: &Filter) -> Markup {
    html! {
        div.filter-group role="group" data-filter=(param) {
            (filter_button(param, "all", all_label, active.is_all()))
            @for term in terms {
                (filter_button(param, &slugify(term), &humanize(term), active.selects(term)))
            }
        }
    }
}

fn filter_button(param: &str, value: &str, label: &str, active: bool) -> Markup {
    html! {
        button.filter-button.active[active] type="button"
            data-filter=(param) data-value=(value) aria-pressed=(bool_attr(active)) {
            (label)
        }
    }
}

fn bool_attr(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Result summary line, rewritten by the client after each selection.
pub fn listing_summary(view: &ListingView<'_>, nouns: Nouns<'_>) -> Markup {
    html! {
        p.listing-summary aria-live="polite" {
            (view.summary(nouns.singular, nouns.plural))
        }
    }
}

/// Full listings shell: filters, summary, sorted and capped grid.
pub fn listings_shell<L, R>(listing: &Listing<L>, nouns: Nouns<'_>, rng: &mut R) -> Markup
where
    L: LocationAdapter,
    R: Rng + ?Sized,
{
    let layout = listing.layout_with_rng(rng);
    render_shell(listing, &layout, nouns, "listings")
}

/// Filter-only shell: filters and grid in source order.
pub fn filter_shell<L: LocationAdapter>(listing: &Listing<L>, nouns: Nouns<'_>) -> Markup {
    // No sort is applied, so the rng is never drawn from.
    let layout = listing.layout_with_rng(&mut rand::thread_rng());
    render_shell(listing, &layout, nouns, "filter")
}

fn render_shell<L: LocationAdapter>(
    listing: &Listing<L>,
    layout: &[Placement<'_>],
    nouns: Nouns<'_>,
    kind: &str,
) -> Markup {
    let options = listing.options();
    let state = listing.state();
    let known: &KnownTerms = listing.known_terms();
    let view = ListingView {
        items: layout.iter().filter(|p| p.visible).map(|p| p.entry).collect(),
        matched: layout
            .iter()
            .filter(|p| {
                state.category.admits(p.entry, CATEGORY_PARAM)
                    && state.location.admits(p.entry, LOCATION_PARAM)
            })
            .count(),
        state: state.clone(),
        featured_only: options.featured_only,
    };

    html! {
        section.directory-listing
            data-shell=(kind)
            data-sort=(options.sort.map(|s| s.to_string()).unwrap_or_else(|| "none".to_string()))
            data-max-items=(options.max_items.unwrap_or(0))
            data-show-filters=(bool_attr(options.show_filters))
            data-featured-only=(bool_attr(options.featured_only))
            data-noun=(nouns.singular)
            data-noun-plural=(nouns.plural) {
            @if options.show_filters {
                div.directory-filters {
                    (filter_group(CATEGORY_PARAM, "All Categories", &known.categories, &state.category))
                    (filter_group(LOCATION_PARAM, "All Locations", &known.locations, &state.location))
                }
            }
            @if options.show_filters {
                (listing_summary(&view, nouns))
            }
            p.listing-empty hidden[!view.is_empty()] { (EMPTY_MESSAGE) }
            div.directory-grid {
                @for placement in layout {
                    (directory_cell(placement))
                }
            }
        }
    }
}

fn directory_cell(placement: &Placement<'_>) -> Markup {
    let data = &placement.entry.data;
    let slugs = |terms: &[String]| terms.iter().map(|t| slugify(t)).collect::<Vec<_>>().join(" ");

    html! {
        div.directory-cell
            data-slug=(placement.entry.slug)
            data-category=(slugs(&data.category))
            data-location=(slugs(&data.location))
            hidden[!placement.visible] {
            (directory_item(placement.entry))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
