//! Article metadata extraction
//!
//! Each article lives in its own directory whose `index.html` carries Open
//! Graph metadata and the post markup. Extraction pulls the card fields out
//! of that page.

use crate::error::{SiteSearchError, SiteSearchResult};
use chrono::{DateTime, Datelike, FixedOffset};
use scraper::{Html, Selector};
use serde::Serialize;
use std::cmp::Reverse;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Excerpt length in characters
const EXCERPT_CHARS: usize = 200;

/// Directories under the blog root that are not articles
pub const EXCLUDED_DIRS: &[&str] = &["page", "author", "tag", "public", "assets", "rss"];

/// Metadata extracted from one article page
#[derive(Debug, Clone, Serialize)]
pub struct ArticleMeta {
    /// Post title, `"Untitled"` when the page has none
    pub title: String,
    /// Excerpt clamped to 200 characters
    pub excerpt: String,
    /// Featured image URL, empty when the page has none
    pub image: String,
    /// Publication date from `article:published_time`
    pub published: Option<DateTime<FixedOffset>>,
    /// Canonical URL from `og:url`
    pub canonical: Option<String>,
    /// URL relative to the blog root, with a trailing slash
    pub url: String,
    /// Article directory name
    pub slug: String,
}

impl ArticleMeta {
    /// Publication date formatted for display, empty when undated
    pub fn date_str(&self) -> String {
        self.published
            .map(|date| date.format("%d %B %Y").to_string())
            .unwrap_or_default()
    }

    /// Publication year, when dated
    pub fn year(&self) -> Option<i32> {
        self.published.map(|date| date.year())
    }
}

/// Fields readable from the page markup alone
#[derive(Debug, Clone, Default)]
pub struct PageFields {
    pub title: String,
    pub excerpt: String,
    pub image: String,
    pub canonical: Option<String>,
    pub published: Option<DateTime<FixedOffset>>,
}

/// Extract card fields from article HTML.
///
/// The excerpt prefers the page's `description` meta tag and falls back to
/// the first 200 characters of the post content. Unparseable publication
/// dates are treated as absent.
pub fn parse_article(html: &str) -> SiteSearchResult<PageFields> {
    let document = Html::parse_document(html);

    let title_selector = Selector::parse("h1.post-title")
        .map_err(|_| SiteSearchError::ParseError("Invalid CSS selector for title".to_string()))?;
    let content_selector = Selector::parse("section.post-content")
        .map_err(|_| SiteSearchError::ParseError("Invalid CSS selector for content".to_string()))?;

    let title = document
        .select(&title_selector)
        .next()
        .map(|element| normalize_text(&element.text().collect::<Vec<_>>().join(" ")))
        .unwrap_or_default();

    let image = meta_property(&document, "og:image")?.unwrap_or_default();
    let canonical = meta_property(&document, "og:url")?;
    let published = meta_property(&document, "article:published_time")?
        .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok());

    let mut excerpt = meta_name(&document, "description")?.unwrap_or_default();
    if excerpt.is_empty() {
        if let Some(section) = document.select(&content_selector).next() {
            let text = normalize_text(&section.text().collect::<Vec<_>>().join(" "));
            excerpt = text
                .chars()
                .take(EXCERPT_CHARS)
                .collect::<String>()
                .trim()
                .to_string();
        }
    }
    let excerpt = excerpt.chars().take(EXCERPT_CHARS).collect();

    Ok(PageFields {
        title,
        excerpt,
        image,
        canonical,
        published,
    })
}

/// Extract metadata from the article directory's `index.html`.
///
/// Returns `Ok(None)` when the directory has no `index.html`.
pub fn extract_article_metadata(
    article_dir: &Path,
    blog_dir: &Path,
) -> SiteSearchResult<Option<ArticleMeta>> {
    let html_file = article_dir.join("index.html");
    if !html_file.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&html_file)?;
    let fields = parse_article(&content)?;

    Ok(Some(build_meta(fields, article_dir, blog_dir)))
}

/// Collect metadata for every article directly under the blog root,
/// newest first; undated articles sort last.
pub fn collect_articles(blog_dir: &Path) -> SiteSearchResult<Vec<ArticleMeta>> {
    let mut articles = Vec::new();

    for entry in fs::read_dir(blog_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if EXCLUDED_DIRS.contains(&name.as_str()) {
            continue;
        }

        match extract_article_metadata(&path, blog_dir) {
            Ok(Some(meta)) => articles.push(meta),
            Ok(None) => {}
            Err(error) => log::warn!("Skipping article {}: {error}", path.display()),
        }
    }

    articles.sort_by_key(|article| Reverse(article.published));

    Ok(articles)
}

/// Collect every dated article anywhere under the blog root whose page
/// mentions `tag` (case-insensitive) or carries a `tag-<tag>` class,
/// newest first.
pub fn collect_tagged(blog_dir: &Path, tag: &str) -> SiteSearchResult<Vec<ArticleMeta>> {
    let needle = tag.to_lowercase();
    let class_needle = format!("tag-{tag}");
    let mut articles = Vec::new();

    for entry in WalkDir::new(blog_dir).into_iter().filter_map(Result::ok) {
        if entry.file_name() != "index.html" {
            continue;
        }

        let Some(article_dir) = entry.path().parent() else {
            continue;
        };

        let content = match fs::read_to_string(entry.path()) {
            Ok(content) => content,
            Err(error) => {
                log::warn!("Skipping {}: {error}", entry.path().display());
                continue;
            }
        };

        if !content.to_lowercase().contains(&needle) && !content.contains(&class_needle) {
            continue;
        }

        match parse_article(&content) {
            Ok(fields) if fields.published.is_some() => {
                articles.push(build_meta(fields, article_dir, blog_dir));
            }
            Ok(_) => {}
            Err(error) => log::warn!("Skipping {}: {error}", entry.path().display()),
        }
    }

    articles.sort_by_key(|article| Reverse(article.published));

    Ok(articles)
}

fn build_meta(fields: PageFields, article_dir: &Path, blog_dir: &Path) -> ArticleMeta {
    let rel = article_dir.strip_prefix(blog_dir).unwrap_or(article_dir);
    let mut url = rel.to_string_lossy().into_owned();
    url.push('/');

    let slug = article_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    ArticleMeta {
        title: if fields.title.is_empty() {
            "Untitled".to_string()
        } else {
            fields.title
        },
        excerpt: fields.excerpt,
        image: fields.image,
        published: fields.published,
        canonical: fields.canonical,
        url,
        slug,
    }
}

/// Collapse runs of whitespace the way page text is displayed
fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn meta_property(document: &Html, property: &str) -> SiteSearchResult<Option<String>> {
    meta_content(document, &format!(r#"meta[property="{property}"]"#))
}

fn meta_name(document: &Html, name: &str) -> SiteSearchResult<Option<String>> {
    meta_content(document, &format!(r#"meta[name="{name}"]"#))
}

fn meta_content(document: &Html, selector: &str) -> SiteSearchResult<Option<String>> {
    let parsed = Selector::parse(selector)
        .map_err(|_| SiteSearchError::ParseError(format!("Invalid CSS selector: {selector}")))?;

    Ok(document
        .select(&parsed)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(|content| content.to_string()))
}
