//! Barcode input cleanup

/// Trim scanner input down to the barcode
///
/// Scanners emulating a keyboard append CR/LF or TAB, and some prepend a
/// BOM. Returns `None` when nothing is left.
pub fn normalize(raw: &str) -> Option<&str> {
    let s = raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}');
    if s.is_empty() { None } else { Some(s) }
}
