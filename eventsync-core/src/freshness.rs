//! Freshness marker handling.
//!
//! Both systems store `lastUpdatedDate` as a string that may carry one layer
//! of literal `"` characters. The quotes carry no meaning for comparison,
//! but the CMS expects them on write.

const QUOTE: char = '"';

/// Strips a single leading and a single trailing quote, independently.
pub fn normalize_marker(marker: &str) -> &str {
    let marker = marker.strip_prefix(QUOTE).unwrap_or(marker);
    marker.strip_suffix(QUOTE).unwrap_or(marker)
}

/// True when both markers are equal after normalization.
pub fn same_marker(a: &str, b: &str) -> bool {
    normalize_marker(a) == normalize_marker(b)
}

/// The marker in the quoted form written to the CMS.
pub fn quote_marker(marker: &str) -> String {
    format!("{QUOTE}{}{QUOTE}", normalize_marker(marker))
}
