//! Where the listing reads and writes its query string.
//!
//! In the browser this is the address bar. Here it is a small capability so
//! the controller can run against a URL, an in-memory location in tests, or
//! nothing at all.

use url::Url;
use url::form_urlencoded;

/// Read and replace the query string of the current location.
///
/// `replace_search` has replace semantics: it overwrites the current
/// location rather than adding a history entry.
pub trait LocationAdapter {
    /// Current query string without the leading `?`. Empty when there is none.
    fn search(&self) -> String;

    /// Replace the query string. An empty string removes it entirely.
    fn replace_search(&mut self, search: &str);
}

/// A location held in memory.
///
/// Records how many replacements happened and never grows a history, which
/// is what tests assert against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryLocation {
    pathname: String,
    search: String,
    replacements: usize,
}

impl MemoryLocation {
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            ..Self::default()
        }
    }

    /// Start at `pathname?search`. A leading `?` on `search` is ignored.
    pub fn with_search(pathname: impl Into<String>, search: &str) -> Self {
        Self {
            pathname: pathname.into(),
            search: search.trim_start_matches('?').to_string(),
            replacements: 0,
        }
    }

    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    /// Path plus query, with no dangling `?` when the query is empty.
    pub fn href(&self) -> String {
        if self.search.is_empty() {
            self.pathname.clone()
        } else {
            format!("{}?{}", self.pathname, self.search)
        }
    }

    pub fn replacements(&self) -> usize {
        self.replacements
    }
}

impl LocationAdapter for MemoryLocation {
    fn search(&self) -> String {
        self.search.clone()
    }

    fn replace_search(&mut self, search: &str) {
        self.search = search.to_string();
        self.replacements += 1;
    }
}

impl LocationAdapter for Url {
    fn search(&self) -> String {
        self.query().unwrap_or_default().to_string()
    }

    fn replace_search(&mut self, search: &str) {
        if search.is_empty() {
            self.set_query(None);
        } else {
            self.set_query(Some(search));
        }
    }
}

/// First value of `key` in a query string, decoded.
///
/// Mirrors `URLSearchParams.get`: later duplicates are ignored and an empty
/// value is returned as-is.
pub fn query_param(search: &str, key: &str) -> Option<String> {
    form_urlencoded::parse(search.trim_start_matches('?').as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Encode key/value pairs as a query string, skipping nothing.
pub fn encode_query<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_location_href_without_query() {
        let loc = MemoryLocation::new("/directory/");
        assert_eq!(loc.href(), "/directory/");
    }

    #[test]
    fn memory_location_strips_question_mark() {
        let loc = MemoryLocation::with_search("/directory/", "?category=venues");
        assert_eq!(loc.search(), "category=venues");
        assert_eq!(loc.href(), "/directory/?category=venues");
    }

    #[test]
    fn memory_location_replace_counts() {
        let mut loc = MemoryLocation::new("/directory/");
        loc.replace_search("location=sydney");
        loc.replace_search("");
        assert_eq!(loc.replacements(), 2);
        assert_eq!(loc.href(), "/directory/");
    }

    #[test]
    fn url_adapter_removes_query() {
        let mut url = Url::parse("https://example.com/directory/?category=venues").unwrap();
        url.replace_search("");
        assert_eq!(url.as_str(), "https://example.com/directory/");
    }

    #[test]
    fn url_adapter_sets_query() {
        let mut url = Url::parse("https://example.com/directory/").unwrap();
        url.replace_search("category=venues");
        assert_eq!(url.search(), "category=venues");
    }

    #[test]
    fn query_param_first_value_wins() {
        assert_eq!(
            query_param("category=a&category=b", "category").as_deref(),
            Some("a")
        );
    }

    #[test]
    fn query_param_decodes() {
        assert_eq!(
            query_param("?location=blue%20mountains", "location").as_deref(),
            Some("blue mountains")
        );
        assert_eq!(query_param("location=x", "category"), None);
    }

    #[test]
    fn encode_query_joins_pairs() {
        assert_eq!(
            encode_query([("category", "catering"), ("location", "sydney")]),
            "category=catering&location=sydney"
        );
        assert_eq!(encode_query(Vec::<(&str, &str)>::new()), "");
    }
}
