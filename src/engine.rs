//! Search URL construction
//!
//! Builds Ecosia search URLs restricted to a single site with the `site:`
//! operator. The query text is percent-encoded; the hostname and the
//! `site:` prefix are left as-is so the operator survives intact.

use urlencoding::encode;

/// Ecosia search endpoint all launched searches go through
pub const SEARCH_ENDPOINT: &str = "https://www.ecosia.org/search";

/// Build the search URL for a query restricted to `hostname`.
///
/// The query lands in the single `q` parameter as
/// `site:{hostname} {query}`, with the space between operator and query
/// encoded as `%20` and the query text percent-encoded.
///
/// ```
/// use sitesearch::engine::site_search_url;
///
/// let url = site_search_url("example.com", "hello world");
/// assert_eq!(
///     url,
///     "https://www.ecosia.org/search?q=site:example.com%20hello%20world"
/// );
/// ```
pub fn site_search_url(hostname: &str, query: &str) -> String {
    format!("{SEARCH_ENDPOINT}?q=site:{hostname}%20{}", encode(query))
}
