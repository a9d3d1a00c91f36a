//! Listing splitter: turns the free-text listing response into ordered listing blocks.
//!
//! Delimiter rule:
//! 1. `\r\n` is normalized to `\n`.
//! 2. The text is split on every `\n\n`.
//! 3. Segments are trimmed; blank segments are dropped.
//!
//! A response without any delimiter is a single listing. A blank response has none.
//! The number of blocks is whatever the model produced; nothing checks it against
//! the count requested in the prompt.

pub const LISTING_DELIMITER: &str = "\n\n";

pub fn split_listings(response: &str) -> Vec<String> {
    response
        .replace("\r\n", "\n")
        .split(LISTING_DELIMITER)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
