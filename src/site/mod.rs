//! Static site maintenance
//!
//! Rebuilds derived blog pages from the article pages themselves: the
//! paginated index and the tagged photo-project gallery. Metadata comes out
//! of each article's `index.html`; surrounding page chrome is preserved by
//! splicing regenerated content into an existing page at a marker element.

pub mod article;
pub mod index;
pub mod projects;

pub use article::{collect_articles, collect_tagged, extract_article_metadata, ArticleMeta};
pub use index::{rebuild_index, IndexOptions, RenderedPage};
pub use projects::{rebuild_projects_page, render_gallery_sections, GalleryOptions};

use crate::error::{SiteSearchError, SiteSearchResult};

/// Footer used when a template has no recognizable closing sequence
const FALLBACK_FOOTER: &str = "\n</div>\n</main>\n</body>\n</html>";

/// Split a page template open at `marker`.
///
/// The header runs through the marker element plus any following
/// whitespace. The footer reopens with the `</div>` that closes the marker
/// element and continues from the first `</main>` after it through
/// `</html>`; templates missing that closing sequence get a minimal
/// fallback footer.
pub(crate) fn split_at_marker(template: &str, marker: &str) -> SiteSearchResult<(String, String)> {
    let start = template.find(marker).ok_or_else(|| {
        SiteSearchError::ConfigError(format!("Template is missing the {marker} marker"))
    })?;

    let header_end = start + marker.len();
    let rest = &template[header_end..];
    let trailing_ws = rest.len() - rest.trim_start().len();
    let header = template[..header_end + trailing_ws].to_string();

    let footer = match rest.find("</main>").map(|at| header_end + at) {
        Some(main_start) => match template[main_start..].find("</html>") {
            Some(at) => {
                let end = main_start + at + "</html>".len();
                format!("\n</div>\n{}", &template[main_start..end])
            }
            None => FALLBACK_FOOTER.to_string(),
        },
        None => FALLBACK_FOOTER.to_string(),
    };

    Ok((header, footer))
}
