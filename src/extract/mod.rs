//! HTML field extraction for listing and detail pages
//!
//! Everything in this module is pure: markup in, links or records out. No I/O
//! and no async.
//!
//! - `listing`: product links from a collection page
//! - `detail`: a `BookRecord` from a product page
//! - `properties`: keyword routing for the property table
//! - `numeric`: numeric-token extraction for price/count text

mod detail;
mod listing;
mod numeric;
mod properties;

pub use detail::parse_book;
pub use listing::extract_book_links;
pub use numeric::{first_integer, numeric_price};
pub use properties::{route_property, PropertyField, PROPERTY_KEYWORDS};

use scraper::{ElementRef, Selector};

/// Returns the first descendant of `scope` matching `css`
pub(crate) fn find<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    let found = scope.select(&selector).next();
    found
}

/// Returns every descendant of `scope` matching `css`, in document order
pub(crate) fn find_all<'a>(scope: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => scope.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

/// Concatenated text of an element, trimmed
pub(crate) fn stripped_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
