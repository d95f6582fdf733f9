//! Host environment abstraction
//!
//! The search launcher asks its environment for two things: the hostname
//! searches are restricted to, and a way to open a URL in a new browsing
//! context. Keeping both behind a trait lets tests substitute a recording
//! implementation while the binary talks to the real system browser.

use crate::error::{SiteSearchError, SiteSearchResult};
use std::process::Command;
use url::Url;

/// Environment the search launcher runs against
pub trait HostEnvironment {
    /// Hostname searches are restricted to
    fn hostname(&self) -> &str;

    /// Open `url` in a new browsing context.
    ///
    /// Never fails from the caller's point of view; implementations
    /// swallow launch problems after logging them.
    fn open_in_new_context(&self, url: &str);
}

/// Host environment backed by the system browser
#[derive(Debug, Clone)]
pub struct SystemEnvironment {
    hostname: String,
}

impl SystemEnvironment {
    /// Create an environment whose searches are restricted to `site`.
    ///
    /// `site` may be a bare hostname or a full URL; only the hostname
    /// is kept either way.
    pub fn new(site: &str) -> SiteSearchResult<Self> {
        Ok(Self {
            hostname: site_hostname(site)?,
        })
    }
}

impl HostEnvironment for SystemEnvironment {
    fn hostname(&self) -> &str {
        &self.hostname
    }

    fn open_in_new_context(&self, url: &str) {
        if let Err(error) = open_in_browser(url) {
            log::warn!("Could not open browser for {url}: {error}");
        }
    }
}

/// Extract the hostname from a site given as a bare host or a URL
pub fn site_hostname(site: &str) -> SiteSearchResult<String> {
    let trimmed = site.trim();
    if trimmed.is_empty() {
        return Err(SiteSearchError::InvalidInput(
            "Site must not be empty".to_string(),
        ));
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let parsed = Url::parse(&candidate)?;
    let host = parsed.host_str().ok_or_else(|| {
        SiteSearchError::InvalidInput(format!("Site has no hostname: {site}"))
    })?;

    Ok(host.to_string())
}

/// Opener commands tried in order, most specific first
#[cfg(target_os = "linux")]
const OPENERS: &[&str] = &[
    "xdg-open",
    "firefox",
    "google-chrome",
    "chromium",
    "brave-browser",
];

#[cfg(target_os = "macos")]
const OPENERS: &[&str] = &["open"];

#[cfg(target_os = "windows")]
const OPENERS: &[&str] = &["explorer"];

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
const OPENERS: &[&str] = &["xdg-open"];

/// Open `url` with the first platform opener that spawns.
///
/// The spawned process is not waited on; the browser owns the new
/// browsing context from here.
pub fn open_in_browser(url: &str) -> SiteSearchResult<()> {
    for opener in OPENERS {
        if Command::new(opener).arg(url).spawn().is_ok() {
            log::info!("Opened {url} with {opener}");
            return Ok(());
        }
    }

    Err(SiteSearchError::Other(format!(
        "No browser opener available for {url}"
    )))
}
