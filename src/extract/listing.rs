//! Product link discovery on collection pages

use super::{find, find_all};
use scraper::Html;
use url::Url;

/// Extracts the product page links of every product card on a collection page
///
/// Product cards are `form[data-product-id]` elements; each contributes the
/// first `a.product-card__title` link it contains, resolved against `page_url`.
/// An empty result means the page lists no products, which is how the end of a
/// collection is detected.
///
/// # Example
///
/// ```
/// use alinino_scraper::extract::extract_book_links;
/// use url::Url;
///
/// let html = r#"<form data-product-id="7"><a class="product-card__title" href="/product/kitab">Kitab</a></form>"#;
/// let page = Url::parse("https://alinino.az/collection/bestsellery").unwrap();
/// assert_eq!(extract_book_links(html, &page), vec!["https://alinino.az/product/kitab"]);
/// ```
pub fn extract_book_links(html: &str, page_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    for card in find_all(document.root_element(), "form[data-product-id]") {
        let href = find(card, "a.product-card__title[href]")
            .and_then(|link| link.value().attr("href"));

        if let Some(absolute_url) = href.and_then(|href| resolve_link(href, page_url)) {
            links.push(absolute_url);
        }
    }

    links
}

/// Resolves a product href to an absolute http(s) URL
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
        Some(absolute_url.to_string())
    } else {
        None
    }
}
