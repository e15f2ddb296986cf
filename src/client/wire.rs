//! Backend response shapes and their normalization into [`PageResult`].

use reqwest::header::HeaderMap;
use serde::Deserialize;

use crate::client::PageResult;
use crate::domain::truck::Truck;
use crate::pagination::total_pages_for;

/// Header carrying the collection size on offset/limit responses.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Body of the page/size endpoint. Extra fields sent by the backend
/// (`number`, `size`, `sort`, ...) are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedEnvelope<T> {
    pub content: Vec<T>,
    pub total_elements: usize,
    pub total_pages: usize,
}

impl From<PagedEnvelope<Truck>> for PageResult {
    /// Totals are taken verbatim from the backend.
    fn from(envelope: PagedEnvelope<Truck>) -> Self {
        Self {
            items: envelope.content,
            total_items: envelope.total_elements,
            total_pages: envelope.total_pages,
        }
    }
}

impl PageResult {
    /// Normalizes an offset/limit window; `total_pages` is computed from the
    /// collection size and the requested page size.
    pub fn from_window(items: Vec<Truck>, total_items: usize, page_size: usize) -> Self {
        Self {
            items,
            total_items,
            total_pages: total_pages_for(total_items, page_size),
        }
    }
}

/// Reads the total count header. Missing or unparsable values yield `None`.
pub fn total_count(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(TOTAL_COUNT_HEADER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}
