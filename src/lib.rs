//! # sitesearch
//!
//! Launches site-restricted Ecosia searches from a terminal prompt and keeps
//! a static blog's derived pages fresh.
//!
//! Typing a query and pressing Enter (or clicking the submit control) opens
//! `https://www.ecosia.org/search?q=site:{hostname}%20{query}` in a new
//! browsing context. The same crate regenerates the blog's paginated index
//! and its tagged photo-project gallery from the article pages themselves.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sitesearch::open_site_search;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Open an Ecosia search restricted to example.com
//!     if let Some(url) = open_site_search("example.com", "hello world")? {
//!         println!("Opened {url}");
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod engine;
pub mod error;
pub mod host;
pub mod prompt;
pub mod site;
pub mod trigger;

// Re-export common types
pub use engine::{site_search_url, SEARCH_ENDPOINT};
pub use error::{SiteSearchError, SiteSearchResult};
pub use host::{open_in_browser, site_hostname, HostEnvironment, SystemEnvironment};
pub use prompt::SearchPrompt;
pub use site::{
    collect_articles, collect_tagged, rebuild_index, rebuild_projects_page, ArticleMeta,
    GalleryOptions, IndexOptions,
};
pub use trigger::{EventOutcome, SearchField, SearchTrigger};

/// Open a site-restricted search for `query` in a new browsing context
///
/// # Arguments
///
/// * `site` - Hostname or URL of the site results are restricted to
/// * `query` - Search text, percent-encoded into the URL
///
/// # Returns
///
/// The opened URL, or `None` when the query is the empty string
pub fn open_site_search(site: &str, query: &str) -> SiteSearchResult<Option<String>> {
    if query.is_empty() {
        return Ok(None);
    }

    let hostname = host::site_hostname(site)?;
    let url = engine::site_search_url(&hostname, query);
    host::open_in_browser(&url)?;

    Ok(Some(url))
}
