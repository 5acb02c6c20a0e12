//! Directory listing: filter, sort, cap, and keep the URL in step.
//!
//! The listing is split in two:
//!
//! - [`reduce`] is a pure state transition. Given the current
//!   [`FilterState`], an [`Action`] and the known terms, it returns the next
//!   state. It knows nothing about URLs being written or items being shown.
//! - [`compute`] derives what is shown from the entries, a state and the
//!   [`ListingOptions`]: featured-only, category, location, sort, cap.
//!
//! [`Listing`] wires both to a [`LocationAdapter`] so the query string is read
//! once at mount and rewritten after every filter change. The full listings
//! page and the filter-only shell are the same controller with different
//! options.
//!
//! ## State and URL
//!
//! ```text
//!   mount ──► read ?category=&location= ──► match known terms by slug
//!                                              │
//!   select(category | location) ──────────────►├──► new FilterState
//!                                              │
//!                                              └──► replace query string
//!                                                   (only non-"all" filters)
//! ```
//!
//! Unmatched parameters resolve to "all" and disappear from the URL on the
//! first rewrite. Nothing here can fail.

pub mod location;
pub mod sort;

use crate::text::{humanize, slugify};
use crate::taxonomy::{Taxonomy, unique_terms};
use crate::types::DirectoryEntry;
use location::{LocationAdapter, encode_query, query_param};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sort::{SortMode, sort_items};
use std::fmt;

pub const CATEGORY_PARAM: &str = "category";
pub const LOCATION_PARAM: &str = "location";

/// One taxonomy filter: everything, or one term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Filter {
    #[default]
    All,
    Term(String),
}

impl Filter {
    pub fn term(term: impl Into<String>) -> Self {
        Filter::Term(term.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Filter::All)
    }

    pub fn as_term(&self) -> Option<&str> {
        match self {
            Filter::All => None,
            Filter::Term(t) => Some(t),
        }
    }

    /// Slug used in the query string; `None` for `All`.
    pub fn slug(&self) -> Option<String> {
        self.as_term().map(slugify)
    }

    /// Whether an entry passes this filter on `field`.
    pub fn admits<T: Taxonomy + ?Sized>(&self, entry: &T, field: &str) -> bool {
        match self {
            Filter::All => true,
            Filter::Term(term) => entry.has_term(field, term),
        }
    }

    /// Whether this filter selects `term` (by slug). `All` selects nothing.
    pub fn selects(&self, term: &str) -> bool {
        self.slug().is_some_and(|s| s == slugify(term))
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str("all"),
            Filter::Term(t) => f.write_str(t),
        }
    }
}

/// The user-controlled part of a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub category: Filter,
    pub location: Filter,
}

impl FilterState {
    /// Query string for this state: only non-`All` filters, as slugs.
    pub fn to_query(&self) -> String {
        let category = self.category.slug();
        let location = self.location.slug();
        let pairs = [
            (CATEGORY_PARAM, category.as_deref()),
            (LOCATION_PARAM, location.as_deref()),
        ];
        encode_query(
            pairs
                .iter()
                .filter_map(|(key, value)| value.map(|v| (*key, v))),
        )
    }
}

/// Something that happened to the listing.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Initial load with the page's query string.
    Mount { search: String },
    SelectCategory(Filter),
    SelectLocation(Filter),
}

/// Terms offered as filter buttons, in display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KnownTerms {
    pub categories: Vec<String>,
    pub locations: Vec<String>,
}

impl KnownTerms {
    pub fn from_entries(entries: &[DirectoryEntry]) -> Self {
        Self {
            categories: unique_terms(entries, CATEGORY_PARAM),
            locations: unique_terms(entries, LOCATION_PARAM),
        }
    }
}

/// First known term whose slug equals `param` exactly.
fn match_term(known: &[String], param: Option<&str>) -> Option<String> {
    let param = param.filter(|p| !p.is_empty())?;
    known.iter().find(|t| slugify(t) == param).cloned()
}

/// Pure state transition.
pub fn reduce(state: &FilterState, action: &Action, known: &KnownTerms) -> FilterState {
    match action {
        Action::Mount { search } => {
            let category = query_param(search, CATEGORY_PARAM);
            let location = query_param(search, LOCATION_PARAM);
            FilterState {
                category: match_term(&known.categories, category.as_deref())
                    .map(Filter::Term)
                    .unwrap_or_else(|| state.category.clone()),
                location: match_term(&known.locations, location.as_deref())
                    .map(Filter::Term)
                    .unwrap_or_else(|| state.location.clone()),
            }
        }
        Action::SelectCategory(filter) => FilterState {
            category: filter.clone(),
            location: state.location.clone(),
        },
        Action::SelectLocation(filter) => FilterState {
            category: state.category.clone(),
            location: filter.clone(),
        },
    }
}

/// Presentation options fixed for the lifetime of a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingOptions {
    /// `None` keeps source order.
    pub sort: Option<SortMode>,
    pub featured_only: bool,
    /// Zero or `None` means no cap.
    pub max_items: Option<usize>,
    /// Without filters the URL is neither read nor written.
    pub show_filters: bool,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self::listings(SortMode::Alphabetical)
    }
}

impl ListingOptions {
    /// The full listings page: sorted, filterable, uncapped.
    pub fn listings(sort: SortMode) -> Self {
        Self {
            sort: Some(sort),
            featured_only: false,
            max_items: None,
            show_filters: true,
        }
    }

    /// The filter-only shell: source order, no featured filter, no cap.
    pub fn filter_only() -> Self {
        Self {
            sort: None,
            featured_only: false,
            max_items: None,
            show_filters: true,
        }
    }
}

/// What a listing shows for one state.
#[derive(Debug, Clone)]
pub struct ListingView<'a> {
    /// Sorted and capped entries.
    pub items: Vec<&'a DirectoryEntry>,
    /// Entries that passed the filters, before the cap.
    pub matched: usize,
    pub state: FilterState,
    pub featured_only: bool,
}

impl ListingView<'_> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `"Showing 3 vendors in Catering from Sydney"`.
    pub fn summary(&self, singular: &str, plural: &str) -> String {
        let count = self.items.len();
        let mut out = format!(
            "Showing {} {}",
            count,
            if count == 1 { singular } else { plural }
        );
        if let Some(category) = self.state.category.as_term() {
            out.push_str(&format!(" in {}", humanize(category)));
        }
        if let Some(location) = self.state.location.as_term() {
            out.push_str(&format!(" from {}", humanize(location)));
        }
        if self.featured_only {
            out.push_str(" (featured only)");
        }
        out
    }
}

/// One entry of a pre-rendered listing.
#[derive(Debug, Clone, Copy)]
pub struct Placement<'a> {
    pub entry: &'a DirectoryEntry,
    pub visible: bool,
}

/// Derive the visible entries: featured, category, location, sort, cap.
pub fn compute<'a, R: Rng + ?Sized>(
    entries: &'a [DirectoryEntry],
    state: &FilterState,
    options: &ListingOptions,
    rng: &mut R,
) -> ListingView<'a> {
    let mut items: Vec<&DirectoryEntry> = entries
        .iter()
        .filter(|e| !options.featured_only || e.data.featured)
        .filter(|e| state.category.admits(*e, CATEGORY_PARAM))
        .filter(|e| state.location.admits(*e, LOCATION_PARAM))
        .collect();
    let matched = items.len();

    if let Some(mode) = options.sort {
        sort_items(&mut items, mode, rng);
    }
    if let Some(max) = options.max_items.filter(|&n| n > 0) {
        items.truncate(max);
    }

    ListingView {
        items,
        matched,
        state: state.clone(),
        featured_only: options.featured_only,
    }
}

/// A listing bound to its entries and a location.
#[derive(Debug)]
pub struct Listing<L> {
    entries: Vec<DirectoryEntry>,
    known: KnownTerms,
    options: ListingOptions,
    state: FilterState,
    location: L,
}

impl<L: LocationAdapter> Listing<L> {
    /// Entries with an empty slug get one derived from their title.
    pub fn new(entries: Vec<DirectoryEntry>, options: ListingOptions, location: L) -> Self {
        let entries: Vec<DirectoryEntry> = entries
            .into_iter()
            .map(|mut entry| {
                if entry.slug.is_empty() {
                    entry.slug = slugify(&entry.data.title);
                    tracing::debug!(title = %entry.data.title, slug = %entry.slug, "derived slug");
                }
                entry
            })
            .collect();
        let known = KnownTerms::from_entries(&entries);
        Self {
            entries,
            known,
            options,
            state: FilterState::default(),
            location,
        }
    }

    /// Offer these categories instead of the ones found on the entries.
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.known.categories = categories;
        self
    }

    /// Read the query string once and normalize it.
    pub fn mount(&mut self) {
        if !self.options.show_filters {
            return;
        }
        let search = self.location.search();
        let next = reduce(&self.state, &Action::Mount { search: search.clone() }, &self.known);
        if next.category.is_all() && query_param(&search, CATEGORY_PARAM).is_some() {
            tracing::debug!(search = %search, "ignoring unknown category parameter");
        }
        if next.location.is_all() && query_param(&search, LOCATION_PARAM).is_some() {
            tracing::debug!(search = %search, "ignoring unknown location parameter");
        }
        self.state = next;
        self.sync_location();
    }

    /// Apply a user action. `Mount` is routed through [`Listing::mount`].
    pub fn dispatch(&mut self, action: Action) {
        if let Action::Mount { .. } = action {
            self.mount();
            return;
        }
        let next = reduce(&self.state, &action, &self.known);
        if next != self.state {
            self.state = next;
            if self.options.show_filters {
                self.sync_location();
            }
        }
    }

    pub fn select_category(&mut self, filter: Filter) {
        self.dispatch(Action::SelectCategory(filter));
    }

    pub fn select_location(&mut self, filter: Filter) {
        self.dispatch(Action::SelectLocation(filter));
    }

    fn sync_location(&mut self) {
        let query = self.state.to_query();
        self.location.replace_search(&query);
    }

    /// Recompute with a fresh thread-local RNG.
    pub fn view(&self) -> ListingView<'_> {
        self.view_with_rng(&mut rand::thread_rng())
    }

    pub fn view_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> ListingView<'_> {
        compute(&self.entries, &self.state, &self.options, rng)
    }

    /// Every featured-eligible entry in display order, flagged with whether
    /// the current state shows it.
    ///
    /// Pre-rendered pages emit the whole candidate list so a client can
    /// re-filter without reloading. Visible entries are exactly the ones
    /// [`compute`] returns for a deterministic sort.
    pub fn layout_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Placement<'_>> {
        let uncapped = ListingOptions {
            max_items: None,
            ..self.options.clone()
        };
        let ordered = compute(&self.entries, &FilterState::default(), &uncapped, rng);
        let cap = self.options.max_items.filter(|&n| n > 0).unwrap_or(usize::MAX);
        let mut shown = 0;
        ordered
            .items
            .into_iter()
            .map(|entry| {
                let admitted = self.state.category.admits(entry, CATEGORY_PARAM)
                    && self.state.location.admits(entry, LOCATION_PARAM);
                let visible = admitted && shown < cap;
                if visible {
                    shown += 1;
                }
                Placement { entry, visible }
            })
            .collect()
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn known_terms(&self) -> &KnownTerms {
        &self.known
    }

    pub fn options(&self) -> &ListingOptions {
        &self.options
    }

    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn into_location(self) -> L {
        self.location
    }
}
