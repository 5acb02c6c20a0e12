//! Sort orders for listings.

use crate::schema::{DirectoryData, PostData};
use crate::text::locale_cmp;
use crate::types::Entry;
use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Title, ascending, case-insensitive.
    #[default]
    Alphabetical,
    /// Newest first; undated entries last in their original order.
    Date,
    /// Fresh shuffle every time the listing is recomputed.
    Random,
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortMode::Alphabetical => "alphabetical",
            SortMode::Date => "date",
            SortMode::Random => "random",
        })
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "alphabetical" | "title" => Ok(SortMode::Alphabetical),
            "date" => Ok(SortMode::Date),
            "random" => Ok(SortMode::Random),
            other => Err(format!(
                "unknown sort mode `{other}` (expected alphabetical, date or random)"
            )),
        }
    }
}

/// What a sort needs to know about an item.
pub trait Sortable {
    fn sort_title(&self) -> &str;
    fn sort_date(&self) -> Option<NaiveDate>;
}

impl Sortable for Entry<DirectoryData> {
    fn sort_title(&self) -> &str {
        &self.data.title
    }

    fn sort_date(&self) -> Option<NaiveDate> {
        self.data.date
    }
}

impl Sortable for Entry<PostData> {
    fn sort_title(&self) -> &str {
        &self.data.title
    }

    fn sort_date(&self) -> Option<NaiveDate> {
        self.data.date
    }
}

impl<T: Sortable + ?Sized> Sortable for &T {
    fn sort_title(&self) -> &str {
        (**self).sort_title()
    }

    fn sort_date(&self) -> Option<NaiveDate> {
        (**self).sort_date()
    }
}

/// Sort `items` in place.
pub fn sort_items<T: Sortable, R: Rng + ?Sized>(items: &mut [T], mode: SortMode, rng: &mut R) {
    match mode {
        SortMode::Alphabetical => items.sort_by(|a, b| locale_cmp(a.sort_title(), b.sort_title())),
        SortMode::Date => items.sort_by(|a, b| newest_first(a.sort_date(), b.sort_date())),
        SortMode::Random => shuffle(items, rng),
    }
}

/// Descending by date, `None` after every `Some`. Stable sorts keep
/// undated items in their original relative order.
pub fn newest_first(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Fisher–Yates.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}
