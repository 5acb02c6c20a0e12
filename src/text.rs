//! Text conversions shared by every content kind.
//!
//! Taxonomy terms (categories, locations, tags, author names) are written by
//! hand in front matter, so the same term shows up spelled several ways:
//! `"Hair & Makeup"`, `"hair-and-makeup"`, `"Hair  &  Makeup"`. Two terms are
//! the same term when their slugs are equal. Slugs are also what appears in
//! URLs, both as path segments (`/directory/category/catering/`) and as query
//! values (`?category=catering`).
//!
//! ## Display Labels
//!
//! [`humanize`] goes the other way for display: dashes and underscores become
//! spaces and each word is capitalised. It is lossy and is never used for
//! comparisons:
//! - `"wedding-venues"` → "Wedding Venues"
//! - `"hair_and_makeup"` → "Hair And Makeup"
//! - `"Sydney"` → "Sydney"

use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Convert a label into a lowercase, URL-safe token.
///
/// Runs of anything that is not a letter or digit collapse into a single
/// dash, and leading/trailing dashes are dropped:
/// - `"Hair & Makeup"` → `"hair-makeup"`
/// - `"  Blue Mountains "` → `"blue-mountains"`
/// - `"Café Royale"` → `"café-royale"`
/// - `"---"` → `""`
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Turn a slug or raw term into a display label.
pub fn humanize(text: &str) -> String {
    text.split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Primary collation key: decomposed, combining marks dropped, lowercased.
fn base_letters(text: &str) -> impl Iterator<Item = char> + '_ {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

/// Locale-style title ordering.
///
/// Accents and case are ignored first, so "Élan" files under E and "acme"
/// next to "Acme". Ties fall back to the accented lowercase form, then the
/// raw text, which keeps the order total.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| {
            a.chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase))
        })
        .then_with(|| a.cmp(b))
}

/// Shorten plain text to at most `max` characters on a word boundary.
///
/// Used for meta descriptions and post summaries. Adds `…` when cut.
pub fn truncate_words(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    for word in text.split_whitespace() {
        let extra = if out.is_empty() { 0 } else { 1 };
        if out.chars().count() + extra + word.chars().count() > max {
            break;
        }
        if extra == 1 {
            out.push(' ');
        }
        out.push_str(word);
    }
    if out.is_empty() {
        out = text.chars().take(max).collect();
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases_and_joins_words() {
        assert_eq!(slugify("Wedding Venues"), "wedding-venues");
    }

    #[test]
    fn slugify_collapses_punctuation_runs() {
        assert_eq!(slugify("Hair & Makeup"), "hair-makeup");
        assert_eq!(slugify("Photo -- Video"), "photo-video");
    }

    #[test]
    fn slugify_trims_edges() {
        assert_eq!(slugify("  Blue Mountains  "), "blue-mountains");
        assert_eq!(slugify("--Sydney--"), "sydney");
    }

    #[test]
    fn slugify_keeps_unicode_letters() {
        assert_eq!(slugify("Café Royale"), "café-royale");
    }

    #[test]
    fn slugify_empty_and_symbol_only() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("&&&"), "");
    }

    #[test]
    fn slugify_is_idempotent() {
        for input in ["Hair & Makeup", "Sydney", "a_b c", "Café"] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once);
        }
    }

    #[test]
    fn slugify_treats_spellings_as_same_term() {
        assert_eq!(slugify("Catering"), slugify("catering"));
        assert_eq!(slugify("Hair  &  Makeup"), slugify("hair-makeup"));
    }

    #[test]
    fn humanize_replaces_separators() {
        assert_eq!(humanize("wedding-venues"), "Wedding Venues");
        assert_eq!(humanize("hair_and_makeup"), "Hair And Makeup");
    }

    #[test]
    fn humanize_keeps_existing_capitals() {
        assert_eq!(humanize("Sydney"), "Sydney");
        assert_eq!(humanize("NSW-south-coast"), "NSW South Coast");
    }

    #[test]
    fn humanize_collapses_repeated_separators() {
        assert_eq!(humanize("--a--b--"), "A B");
    }

    #[test]
    fn locale_cmp_ignores_case_first() {
        assert_eq!(locale_cmp("acme", "Zephyr"), Ordering::Less);
        assert_eq!(locale_cmp("Acme", "zephyr"), Ordering::Less);
    }

    #[test]
    fn locale_cmp_files_accented_letters_with_their_base() {
        assert_eq!(locale_cmp("Élan", "Zephyr"), Ordering::Less);
        assert_eq!(locale_cmp("Élan", "Acme"), Ordering::Greater);
        assert_ne!(locale_cmp("Elan", "Élan"), Ordering::Equal);
    }

    #[test]
    fn locale_cmp_is_total() {
        assert_ne!(locale_cmp("Acme", "acme"), Ordering::Equal);
        assert_eq!(locale_cmp("Acme", "Acme"), Ordering::Equal);
    }

    #[test]
    fn truncate_words_short_text_unchanged() {
        assert_eq!(truncate_words("short", 10), "short");
    }

    #[test]
    fn truncate_words_cuts_on_boundary() {
        assert_eq!(truncate_words("one two three four", 9), "one two…");
    }

    #[test]
    fn truncate_words_single_long_word() {
        assert_eq!(truncate_words("abcdefghij", 4), "abcd…");
    }
}
