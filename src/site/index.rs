//! Blog index regeneration
//!
//! The index pages are derived artifacts: article cards spliced between the
//! header and footer of the existing index page. A rebuild renders
//! `index.html` plus `page/N/index.html` for each further page of articles.

use crate::error::{SiteSearchError, SiteSearchResult};
use crate::site::article::{collect_articles, ArticleMeta};
use crate::site::split_at_marker;
use std::fs;
use std::path::PathBuf;

/// Default number of article cards per index page
pub const POSTS_PER_PAGE: usize = 6;

/// Element the article cards are spliced into
const POSTS_LOOP_MARKER: &str = r#"<div class="posts-loop">"#;

/// Settings for an index rebuild
#[derive(Debug, Clone)]
pub struct IndexOptions {
    /// Blog root holding the article directories and the index page
    pub blog_dir: PathBuf,
    /// Article cards per page
    pub posts_per_page: usize,
    /// Page providing header and footer; the current index by default
    pub template: Option<PathBuf>,
    /// Render without writing
    pub dry_run: bool,
}

impl IndexOptions {
    pub fn new(blog_dir: impl Into<PathBuf>) -> Self {
        Self {
            blog_dir: blog_dir.into(),
            posts_per_page: POSTS_PER_PAGE,
            template: None,
            dry_run: false,
        }
    }
}

/// One regenerated page
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Path relative to the blog root
    pub path: PathBuf,
    pub html: String,
}

/// Rebuild the paginated blog index.
///
/// Returns the rendered pages, empty when the blog has no articles. Unless
/// `dry_run` is set the pages are also written under the blog root,
/// creating `page/N/` directories as needed. The template is read once up
/// front so rebuilding is deterministic even though page one overwrites it.
pub fn rebuild_index(options: &IndexOptions) -> SiteSearchResult<Vec<RenderedPage>> {
    let articles = collect_articles(&options.blog_dir)?;
    log::info!(
        "Found {} articles under {}",
        articles.len(),
        options.blog_dir.display()
    );

    if articles.is_empty() {
        return Ok(Vec::new());
    }

    let template_path = options
        .template
        .clone()
        .unwrap_or_else(|| options.blog_dir.join("index.html"));
    if !template_path.exists() {
        return Err(SiteSearchError::ConfigError(format!(
            "Index template not found: {}",
            template_path.display()
        )));
    }
    let template = fs::read_to_string(&template_path)?;

    let posts_per_page = options.posts_per_page.max(1);
    let total_pages = (articles.len() + posts_per_page - 1) / posts_per_page;

    let mut pages = Vec::with_capacity(total_pages);
    for page_num in 1..=total_pages {
        let html = render_index_page(&articles, page_num, total_pages, posts_per_page, &template)?;
        let path = if page_num == 1 {
            PathBuf::from("index.html")
        } else {
            PathBuf::from("page")
                .join(page_num.to_string())
                .join("index.html")
        };
        pages.push(RenderedPage { path, html });
    }

    if !options.dry_run {
        for page in &pages {
            let target = options.blog_dir.join(&page.path);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, &page.html)?;
            log::info!("Wrote {}", target.display());
        }
    }

    Ok(pages)
}

/// Render one index page from the already-sorted article list
pub fn render_index_page(
    articles: &[ArticleMeta],
    page_num: usize,
    total_pages: usize,
    posts_per_page: usize,
    template: &str,
) -> SiteSearchResult<String> {
    let start = (page_num - 1) * posts_per_page;
    let end = (start + posts_per_page).min(articles.len());
    let page_articles = &articles[start..end];

    let template = if page_num > 1 {
        rebase_asset_paths(template)
    } else {
        template.to_string()
    };
    let (header, footer) = split_at_marker(&template, POSTS_LOOP_MARKER)?;

    let cards: Vec<String> = page_articles
        .iter()
        .map(|article| article_card(article, page_num))
        .collect();

    Ok(format!(
        "{header}{}{}{footer}",
        cards.join("\n"),
        pagination_nav(page_num, total_pages)
    ))
}

/// Render one article card. Links are absolutized on pages past the first
/// because those pages live two directories deeper.
fn article_card(article: &ArticleMeta, page_num: usize) -> String {
    let article_url = if page_num > 1 {
        format!("/blog/{}", article.url)
    } else {
        article.url.clone()
    };

    let image_html = if article.image.is_empty() {
        String::new()
    } else {
        format!(
            r#"<img style="width:92%;" alt="{}" src="{}" />"#,
            article.title, article.image
        )
    };

    format!(
        r#"<article class="post row">
  <header class="col-lg-4 post-loop-header">
    <a href="{article_url}">
      {image_html}
    </a>
  </header>
  <section class="post-excerpt col-lg-8">
      <h2 class="post-title">
        <a href="{article_url}">
          {title}
        </a>
      </h2>
      <p>
        <a href="{article_url}">
          {excerpt}...
        </a>
      </p>
      <p class="read-more">
        <a href="{article_url}">
          Read more →
        </a>
      </p>
  </section>
</article>"#,
        title = article.title,
        excerpt = article.excerpt,
    )
}

fn pagination_nav(page_num: usize, total_pages: usize) -> String {
    if total_pages <= 1 {
        return String::new();
    }

    let older = if page_num > 1 {
        let prev_url = if page_num == 2 {
            "/blog/".to_string()
        } else {
            format!("/blog/page/{}/", page_num - 1)
        };
        format!(r#"<a class="older-posts" href="{prev_url}"></a>"#)
    } else {
        String::new()
    };

    let newer = if page_num < total_pages {
        format!(
            r#"<a class="newer-posts" href="/blog/page/{}/"></a>"#,
            page_num + 1
        )
    } else {
        String::new()
    };

    format!(
        "\n    <nav class=\"pagination\" role=\"navigation\">\n        {older}\n        <span class=\"page-number\">Page {page_num} of {total_pages}</span>\n        {newer}\n    </nav>"
    )
}

/// Rewrite template-relative asset paths for pages two levels deeper
fn rebase_asset_paths(template: &str) -> String {
    template
        .replace(r#"href="assets/"#, r#"href="../../assets/"#)
        .replace(r#"src="assets/"#, r#"src="../../assets/"#)
        .replace(r#"href="../images/"#, r#"href="../../../images/"#)
        .replace(r#"src="../images/"#, r#"src="../../../images/"#)
        .replace(r#"href="../css/"#, r#"href="../../../css/"#)
        .replace(r#"src="../js/"#, r#"src="../../../js/"#)
}
