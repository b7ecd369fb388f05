//! Sequential walk over the pages of a collection
//!
//! The number of pages is not known up front, so pages are requested one at a
//! time in increasing order until a page lists no products.

use crate::crawler::fetcher::Fetcher;
use crate::extract::extract_book_links;
use url::Url;

/// Product links gathered from a collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkOutcome {
    /// Links in page order, then card order
    pub links: Vec<String>,

    /// Number of listing pages requested, including the terminating one
    pub pages_requested: u32,
}

/// Returns the URL of page `page` of a collection
///
/// Page 1 is the collection URL itself; later pages add a `page` query
/// parameter.
///
/// ```
/// use alinino_scraper::crawler::page_url;
/// use url::Url;
///
/// let root = Url::parse("https://alinino.az/collection/bestsellery").unwrap();
/// assert_eq!(page_url(&root, 1).as_str(), "https://alinino.az/collection/bestsellery");
/// assert_eq!(page_url(&root, 3).as_str(), "https://alinino.az/collection/bestsellery?page=3");
/// ```
pub fn page_url(collection_url: &Url, page: u32) -> Url {
    let mut url = collection_url.clone();
    if page > 1 {
        url.query_pairs_mut().append_pair("page", &page.to_string());
    }
    url
}

/// Walks collection pages through a shared `Fetcher`
pub struct PaginationWalker {
    fetcher: Fetcher,
}

impl PaginationWalker {
    pub fn new(fetcher: Fetcher) -> Self {
        Self { fetcher }
    }

    /// Collects product links from every page of the collection
    ///
    /// Stops when `max_pages` pages have been read or when a page yields no
    /// links. A listing page that cannot be fetched also ends the walk; the
    /// links gathered so far are kept.
    pub async fn walk(&self, collection_url: &Url, max_pages: Option<u32>) -> WalkOutcome {
        let mut outcome = WalkOutcome::default();
        let mut page = 1;

        loop {
            if max_pages.is_some_and(|max| page > max) {
                tracing::info!("Reached page limit of {}", page - 1);
                break;
            }

            let url = page_url(collection_url, page);
            tracing::info!("Fetching book links from: {}", url);
            outcome.pages_requested += 1;

            let body = match self.fetcher.fetch_html(url.as_str()).await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!("Stopping pagination at page {}: {}", page, e);
                    break;
                }
            };

            let links = extract_book_links(&body, &url);
            if links.is_empty() {
                tracing::info!("No books found on page {}, stopping", page);
                break;
            }

            tracing::info!("Found {} books on page {}", links.len(), page);
            outcome.links.extend(links);
            page += 1;
        }

        outcome
    }
}
