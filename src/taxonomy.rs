//! Taxonomy lookups: named term lists on content entries.
//!
//! A taxonomy is a field holding a list of terms (`category`, `location` on
//! vendors; `categories`, `tags`, `authors` on posts). Terms are compared by
//! slug, so `"Hair & Makeup"` and `"hair-makeup"` are the same term.

use crate::schema::{DirectoryData, PostData};
use crate::text::{locale_cmp, slugify};
use crate::types::Entry;
use std::collections::HashSet;

/// Content that exposes taxonomy fields by name.
pub trait Taxonomy {
    /// Terms stored under `field`, or `None` if this content kind has no such field.
    fn terms(&self, field: &str) -> Option<&[String]>;

    /// Whether `term` appears under `field`, compared by slug.
    fn has_term(&self, field: &str, term: &str) -> bool {
        let wanted = slugify(term);
        self.terms(field)
            .is_some_and(|terms| terms.iter().any(|t| slugify(t) == wanted))
    }
}

impl Taxonomy for DirectoryData {
    fn terms(&self, field: &str) -> Option<&[String]> {
        match field {
            "category" => Some(&self.category),
            "location" => Some(&self.location),
            _ => None,
        }
    }
}

impl Taxonomy for PostData {
    fn terms(&self, field: &str) -> Option<&[String]> {
        match field {
            "categories" => Some(&self.categories),
            "tags" => Some(&self.tags),
            "authors" => Some(&self.authors),
            _ => None,
        }
    }
}

impl<T: Taxonomy + ?Sized> Taxonomy for &T {
    fn terms(&self, field: &str) -> Option<&[String]> {
        (**self).terms(field)
    }
}

impl<T: Taxonomy> Taxonomy for Entry<T> {
    fn terms(&self, field: &str) -> Option<&[String]> {
        self.data.terms(field)
    }
}

/// Entries whose `field` contains `term`, in their original order.
///
/// Entries without the field never match.
pub fn filter_by_taxonomy<'a, T: Taxonomy>(entries: &'a [T], field: &str, term: &str) -> Vec<&'a T> {
    entries.iter().filter(|e| e.has_term(field, term)).collect()
}

/// Distinct terms under `field`, sorted for display.
///
/// Spellings that slugify the same collapse to the first one seen.
pub fn unique_terms<T: Taxonomy>(entries: &[T], field: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut terms: Vec<String> = entries
        .iter()
        .filter_map(|e| e.terms(field))
        .flatten()
        .filter(|t| seen.insert(slugify(t)))
        .cloned()
        .collect();
    terms.sort_by(|a, b| locale_cmp(a, b));
    terms
}

/// Each distinct term under `field` with how many entries carry it.
pub fn term_counts<T: Taxonomy>(entries: &[T], field: &str) -> Vec<(String, usize)> {
    unique_terms(entries, field)
        .into_iter()
        .map(|term| {
            let count = entries.iter().filter(|e| e.has_term(field, &term)).count();
            (term, count)
        })
        .collect()
}
