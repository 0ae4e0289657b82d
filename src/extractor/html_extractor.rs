use log::trace;
use scraper::{Html, Selector};
use url::Url;

use super::LinkExtractor;

/// Extracts anchor hrefs from an HTML document, resolved against the page
/// URL. Fragments are stripped so `/page` and `/page#section` claim the
/// same frontier slot; anything that is not http(s) is dropped.
pub struct HtmlLinkExtractor {
    selector: Selector,
}

impl HtmlLinkExtractor {
    pub fn new() -> Self {
        Self {
            selector: Selector::parse("a[href]").unwrap(),
        }
    }
}

impl Default for HtmlLinkExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkExtractor for HtmlLinkExtractor {
    fn extract_links(&self, base: &Url, body: &str) -> Vec<Url> {
        let document = Html::parse_document(body);

        let mut links = Vec::new();
        for element in document.select(&self.selector) {
            if let Some(href) = element.value().attr("href") {
                match base.join(href) {
                    Ok(mut url) => {
                        if !matches!(url.scheme(), "http" | "https") {
                            continue;
                        }
                        url.set_fragment(None);
                        links.push(url);
                    }
                    Err(e) => trace!("skipping unresolvable href {href:?}: {e}"),
                }
            }
        }
        links
    }
}
