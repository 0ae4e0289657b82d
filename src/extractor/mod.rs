mod html_extractor;

pub use html_extractor::HtmlLinkExtractor;

use url::Url;

/// The link-extraction collaborator. Pure: no side effects, and malformed
/// markup yields best-effort partial results rather than an error.
/// Candidates are returned in document order.
pub trait LinkExtractor: Send + Sync {
    fn extract_links(&self, base: &Url, body: &str) -> Vec<Url>;
}
