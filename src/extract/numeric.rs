use regex::Regex;
use std::sync::OnceLock;

const PRICE_PATTERN: &str = r"[0-9][0-9.,]*";
const INTEGER_PATTERN: &str = r"[0-9]+";

fn price_token() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(PRICE_PATTERN).expect("price pattern is a valid regex"))
}

fn integer_token() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(INTEGER_PATTERN).expect("integer pattern is a valid regex"))
}

/// Extracts the numeric part of a display price
///
/// Whitespace is removed first so thousands separators written as spaces do not
/// split the token; a decimal comma becomes a decimal point.
///
/// ```
/// use alinino_scraper::extract::numeric_price;
///
/// assert_eq!(numeric_price("12,50 AZN"), Some("12.50".to_string()));
/// assert_eq!(numeric_price("Qiymət yoxdur"), None);
/// ```
pub fn numeric_price(text: &str) -> Option<String> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    price_token()
        .find(&compact)
        .map(|token| token.as_str().replace(',', "."))
}

/// Returns the first run of ASCII digits in `text`
pub fn first_integer(text: &str) -> Option<String> {
    integer_token()
        .find(text)
        .map(|token| token.as_str().to_string())
}
