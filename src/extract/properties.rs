//! Routing of property-table rows to record fields
//!
//! The storefront labels its property rows in Azerbaijani, with English labels
//! on some pages. Each canonical field owns a set of lowercase keyword
//! substrings; the first field whose keywords occur in the row name wins.

use crate::record::BookRecord;

/// A record field fed from the property table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyField {
    Isbn,
    Publisher,
    Author,
    Pages,
    Language,
    CoverType,
}

/// Keyword table, checked in order
pub const PROPERTY_KEYWORDS: &[(PropertyField, &[&str])] = &[
    (PropertyField::Isbn, &["isbn", "artikul"]),
    (PropertyField::Publisher, &["nəşriyyat", "publisher"]),
    (PropertyField::Author, &["müəllif", "author"]),
    (PropertyField::Pages, &["səhifə", "pages"]),
    (PropertyField::Language, &["dil", "language"]),
    (PropertyField::CoverType, &["cild", "cover"]),
];

impl PropertyField {
    /// The text field this property fills
    pub fn slot<'r>(&self, record: &'r mut BookRecord) -> &'r mut String {
        match self {
            PropertyField::Isbn => &mut record.isbn,
            PropertyField::Publisher => &mut record.publisher,
            PropertyField::Author => &mut record.author,
            PropertyField::Pages => &mut record.pages,
            PropertyField::Language => &mut record.language,
            PropertyField::CoverType => &mut record.cover_type,
        }
    }
}

/// Maps a property row name to its field, ignoring case and colons
///
/// ```
/// use alinino_scraper::extract::{route_property, PropertyField};
///
/// assert_eq!(route_property("Nəşriyyat:"), Some(PropertyField::Publisher));
/// assert_eq!(route_property("Weight"), None);
/// ```
pub fn route_property(name: &str) -> Option<PropertyField> {
    let normalized = name.trim().replace(':', "").to_lowercase();

    PROPERTY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| normalized.contains(k)))
        .map(|(field, _)| *field)
}
