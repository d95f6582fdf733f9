//! Tagged photo-project gallery
//!
//! Collects every dated article carrying a tag and regenerates a gallery
//! page: one section per publication year, rows of three image cells,
//! newest year first.

use crate::error::{SiteSearchError, SiteSearchResult};
use crate::site::article::{collect_tagged, ArticleMeta};
use crate::site::split_at_marker;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Element the gallery sections are spliced into
const GALLERY_MARKER: &str = r#"<div class="projects-gallery">"#;

/// Image cells per gallery row
const IMAGES_PER_ROW: usize = 3;

/// Settings for a gallery rebuild
#[derive(Debug, Clone)]
pub struct GalleryOptions {
    /// Blog root scanned for tagged articles
    pub blog_dir: PathBuf,
    /// Tag that marks an article as part of the project
    pub tag: String,
    /// Page providing header and footer around the gallery
    pub template: PathBuf,
    /// Where the regenerated page goes; the template path by default
    pub output: Option<PathBuf>,
}

/// Rebuild the gallery page for `options.tag` and return its HTML
pub fn rebuild_projects_page(options: &GalleryOptions) -> SiteSearchResult<String> {
    let articles = collect_tagged(&options.blog_dir, &options.tag)?;
    log::info!(
        "Found {} dated articles tagged {}",
        articles.len(),
        options.tag
    );

    if !options.template.exists() {
        return Err(SiteSearchError::ConfigError(format!(
            "Gallery template not found: {}",
            options.template.display()
        )));
    }
    let template = fs::read_to_string(&options.template)?;
    let (header, footer) = split_at_marker(&template, GALLERY_MARKER)?;

    let html = format!(
        "{header}{}{footer}",
        render_gallery_sections(&options.tag, &articles)
    );

    let target = options
        .output
        .clone()
        .unwrap_or_else(|| options.template.clone());
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&target, &html)?;
    log::info!("Wrote {}", target.display());

    Ok(html)
}

/// Render the year sections, newest year first. Articles without an image
/// have nothing to show in a gallery and are skipped.
pub fn render_gallery_sections(tag: &str, articles: &[ArticleMeta]) -> String {
    let mut by_year: BTreeMap<i32, Vec<&ArticleMeta>> = BTreeMap::new();
    for article in articles {
        if article.image.is_empty() {
            continue;
        }
        if let Some(year) = article.year() {
            by_year.entry(year).or_default().push(article);
        }
    }

    let mut sections = Vec::new();
    for (year, yearly) in by_year.iter().rev() {
        sections.push(format!(r#"<h2 class="sub-title">{tag} {year}</h2>"#));
        sections.push(render_gallery_rows(yearly));
    }

    sections.join("\n")
}

/// Rows of three image cells
pub fn render_gallery_rows(articles: &[&ArticleMeta]) -> String {
    let mut parts = vec![r#"    <div class="row">"#.to_string()];

    for (i, article) in articles.iter().enumerate() {
        if i > 0 && i % IMAGES_PER_ROW == 0 {
            parts.push("    </div>".to_string());
            parts.push(r#"    <div class="row">"#.to_string());
        }

        parts.push(format!(
            "      <div class=\"col-lg-4 col-xs-12 row-images\">\n        <img src=\"{src}\" alt=\"{title}\"\n             title=\"{title}\" style=\"width:100%\" />\n      </div>",
            src = article.image,
            title = article.title
        ));
    }

    parts.push("    </div>".to_string());
    parts.join("\n")
}
