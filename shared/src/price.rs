//! Price display helpers
//!
//! Prices travel as free-form strings ("12,95", "12,95 kr.", "1.299,00").
//! Display keeps digits and the comma, turns the first comma into a decimal
//! point and appends the currency suffix.

/// Currency suffix appended to display prices
pub const CURRENCY_SUFFIX: &str = " DKK";

/// Normalise a raw price for display
///
/// Returns an empty string when nothing numeric is left.
pub fn format_price(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',')
        .collect();

    if cleaned.is_empty() {
        return String::new();
    }

    format!("{}{}", cleaned.replacen(',', ".", 1), CURRENCY_SUFFIX)
}

/// Price as sent to the label printer: display price without the suffix
pub fn printable_price(raw: &str) -> String {
    let display = format_price(raw);
    display
        .strip_suffix(CURRENCY_SUFFIX)
        .unwrap_or(&display)
        .to_string()
}
