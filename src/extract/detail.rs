//! Book attribute extraction from product detail pages
//!
//! Extraction is a fixed list of independent rules. Each rule looks up its own
//! markup region and fills zero or more record fields; a rule that finds
//! nothing leaves its fields empty and never stops the rules after it.

use super::numeric::{first_integer, numeric_price};
use super::properties::{route_property, PropertyField};
use super::{find, find_all, stripped_text};
use crate::record::BookRecord;
use crate::{Result, ScraperError};
use scraper::{ElementRef, Html};

/// Substring that marks a real product image (as opposed to a placeholder)
const PRODUCT_ASSET_MARKER: &str = "products";

/// Class of the sale label; never part of `labels`
const SALE_LABEL_CLASS: &str = "labels__item_type_sale";

type Rule = fn(ElementRef<'_>, &mut BookRecord);

const RULES: &[Rule] = &[
    extract_title,
    extract_prices,
    extract_discount,
    extract_properties,
    extract_description,
    extract_rating,
    extract_reviews_count,
    extract_availability,
    extract_labels,
    extract_categories,
    extract_image_url,
];

/// Parses a product detail page into a `BookRecord`
///
/// Every field is located independently and left empty when absent. The only
/// failure is a body that contains no markup at all.
///
/// # Arguments
///
/// * `html` - The detail page body
/// * `url` - The page URL, stored as the record key
///
/// # Example
///
/// ```
/// use alinino_scraper::extract::parse_book;
///
/// let html = r#"<h1 class="product__title"> Səfillər </h1><div class="product__price">12,50 AZN</div>"#;
/// let book = parse_book(html, "https://alinino.az/product/sefiller").unwrap();
/// assert_eq!(book.title, "Səfillər");
/// assert_eq!(book.current_price_numeric, "12.50");
/// assert_eq!(book.reviews_count, "0");
/// ```
pub fn parse_book(html: &str, url: &str) -> Result<BookRecord> {
    if html.trim().is_empty() {
        return Err(ScraperError::HtmlParse {
            url: url.to_string(),
            message: "empty document".to_string(),
        });
    }

    let document = Html::parse_document(html);
    let page = document.root_element();

    let mut record = BookRecord::new(url);
    for rule in RULES {
        rule(page, &mut record);
    }

    Ok(record)
}

fn extract_title(page: ElementRef<'_>, record: &mut BookRecord) {
    if let Some(title) = find(page, "h1.product__title") {
        record.title = stripped_text(title);
    }
}

fn extract_prices(page: ElementRef<'_>, record: &mut BookRecord) {
    if let Some(price) = find(page, "div.product__price") {
        record.current_price = stripped_text(price);
        record.current_price_numeric = numeric_price(&record.current_price).unwrap_or_default();
    }

    if let Some(old_price) = find(page, "div.product__old-price") {
        record.old_price = stripped_text(old_price);
        record.old_price_numeric = numeric_price(&record.old_price).unwrap_or_default();
    }
}

fn extract_discount(page: ElementRef<'_>, record: &mut BookRecord) {
    if let Some(sale) = find(page, &format!("span.{SALE_LABEL_CLASS}")) {
        record.discount_percent = stripped_text(sale);
        record.discount_numeric = first_integer(&record.discount_percent).unwrap_or_default();
    }
}

fn extract_properties(page: ElementRef<'_>, record: &mut BookRecord) {
    for row in find_all(page, "div.properties__item") {
        let name = find(row, "div.properties__item-name");
        let value = find(row, "div.properties__item-value");
        let (Some(name), Some(value)) = (name, value) else {
            continue;
        };

        let Some(field) = route_property(&stripped_text(name)) else {
            continue;
        };

        let slot = field.slot(record);
        if !slot.is_empty() {
            continue;
        }
        *slot = stripped_text(value);

        if field == PropertyField::Pages {
            record.pages_numeric = first_integer(&record.pages).unwrap_or_default();
        }
    }
}

fn extract_description(page: ElementRef<'_>, record: &mut BookRecord) {
    if let Some(container) = find(page, "div.text") {
        record.description = find_all(container, "p")
            .into_iter()
            .map(stripped_text)
            .collect::<Vec<_>>()
            .join(" ");
    }
}

fn extract_rating(page: ElementRef<'_>, record: &mut BookRecord) {
    let rating = find(page, "span.rating__stars")
        .and_then(|stars| stars.value().attr("data-rating"))
        .filter(|value| !value.is_empty());

    if let Some(rating) = rating {
        record.rating = rating.to_string();
        record.rating_numeric = rating.to_string();
    }
}

fn extract_reviews_count(page: ElementRef<'_>, record: &mut BookRecord) {
    record.reviews_count = find(page, "span.rating__count")
        .and_then(|count| first_integer(&stripped_text(count)))
        .unwrap_or_else(|| "0".to_string());
}

fn extract_availability(page: ElementRef<'_>, record: &mut BookRecord) {
    if let Some(availability) = find(page, "span[data-product-card-available]") {
        record.availability = stripped_text(availability);
    }
}

fn extract_labels(page: ElementRef<'_>, record: &mut BookRecord) {
    // Only the purchase form; recommendation cards carry labels of their own
    let Some(form) =
        find(page, "form[data-main-form]").or_else(|| find(page, "div.product__form"))
    else {
        return;
    };
    let Some(container) = find(form, "div.labels") else {
        return;
    };

    let mut labels: Vec<String> = Vec::new();
    for label in find_all(container, "span.labels__item") {
        if label.value().classes().any(|class| class == SALE_LABEL_CLASS) {
            continue;
        }

        let title = label
            .value()
            .attr("data-label-title")
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| stripped_text(label));

        if !title.is_empty() && !labels.contains(&title) {
            labels.push(title);
        }
    }

    record.labels = labels.join(", ");
}

fn extract_categories(page: ElementRef<'_>, record: &mut BookRecord) {
    if let Some(tags) = find(page, "div.product__tags") {
        record.categories = find_all(tags, "a.product-tags__item")
            .into_iter()
            .map(stripped_text)
            .collect::<Vec<_>>()
            .join(", ");
    }
}

fn extract_image_url(page: ElementRef<'_>, record: &mut BookRecord) {
    let gallery_image = find(page, "div.product-gallery__main")
        .and_then(|gallery| find(gallery, "img"))
        .and_then(|img| {
            let img = img.value();
            img.attr("src")
                .filter(|src| !src.is_empty())
                .or_else(|| img.attr("data-src"))
        })
        .filter(|src| src.contains(PRODUCT_ASSET_MARKER));

    if let Some(src) = gallery_image {
        record.image_url = src.to_string();
        return;
    }

    for picture in find_all(page, "picture") {
        let Some(source) = find(picture, "source") else {
            continue;
        };
        let source = source.value();
        let srcset = source
            .attr("srcset")
            .filter(|srcset| !srcset.is_empty())
            .or_else(|| source.attr("data-srcset"))
            .unwrap_or_default();

        if let Some(candidate) = first_asset_url(srcset) {
            record.image_url = candidate;
            return;
        }
    }
}

/// First absolute product-asset URL among the candidates of a srcset
fn first_asset_url(srcset: &str) -> Option<String> {
    srcset
        .split_whitespace()
        .map(|token| token.trim_end_matches(','))
        .find(|token| {
            (token.starts_with("https://") || token.starts_with("http://"))
                && token.contains(PRODUCT_ASSET_MARKER)
        })
        .map(str::to_string)
}
