//! The book record produced for every successfully scraped detail page
//!
//! A record is a flat set of text fields. Numeric columns are kept as text too:
//! the dataset is persisted without any type coercion and downstream tooling
//! decides how to interpret them.

use serde::{Deserialize, Serialize};

/// One book, extracted from one detail page
///
/// Every field except `url` defaults to the empty string when the page does not
/// contain it. Field declaration order is the dataset column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    /// The detail page URL this record was fetched from
    pub url: String,
    pub title: String,
    pub current_price: String,
    pub current_price_numeric: String,
    pub old_price: String,
    pub old_price_numeric: String,
    pub discount_percent: String,
    pub discount_numeric: String,
    pub isbn: String,
    pub publisher: String,
    pub author: String,
    pub pages: String,
    pub pages_numeric: String,
    pub language: String,
    pub cover_type: String,
    pub description: String,
    pub rating: String,
    pub rating_numeric: String,
    /// Number of reviews; `"0"` both when confirmed zero and when unknown
    pub reviews_count: String,
    pub availability: String,
    /// Purchase-form labels, comma-space joined
    pub labels: String,
    /// Tag links, comma-space joined
    pub categories: String,
    pub image_url: String,
}

impl BookRecord {
    /// Column names in dataset order
    pub const FIELD_NAMES: [&'static str; 23] = [
        "url",
        "title",
        "current_price",
        "current_price_numeric",
        "old_price",
        "old_price_numeric",
        "discount_percent",
        "discount_numeric",
        "isbn",
        "publisher",
        "author",
        "pages",
        "pages_numeric",
        "language",
        "cover_type",
        "description",
        "rating",
        "rating_numeric",
        "reviews_count",
        "availability",
        "labels",
        "categories",
        "image_url",
    ];

    /// Creates an empty record keyed by `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Returns `(column, value)` pairs in dataset order
    pub fn fields(&self) -> [(&'static str, &str); 23] {
        let values: [&str; 23] = [
            &self.url,
            &self.title,
            &self.current_price,
            &self.current_price_numeric,
            &self.old_price,
            &self.old_price_numeric,
            &self.discount_percent,
            &self.discount_numeric,
            &self.isbn,
            &self.publisher,
            &self.author,
            &self.pages,
            &self.pages_numeric,
            &self.language,
            &self.cover_type,
            &self.description,
            &self.rating,
            &self.rating_numeric,
            &self.reviews_count,
            &self.availability,
            &self.labels,
            &self.categories,
            &self.image_url,
        ];

        let mut pairs = [("", ""); 23];
        for (index, value) in values.into_iter().enumerate() {
            pairs[index] = (Self::FIELD_NAMES[index], value);
        }
        pairs
    }

    /// Returns the field names of this record, in order
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields().iter().map(|(name, _)| *name).collect()
    }
}
