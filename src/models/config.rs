//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::client::{DEFAULT_BACKEND_URL, PaginationMode};
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    /// Cookie signing key for flash messages; at least 64 bytes.
    pub secret: String,
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default)]
    pub pagination_mode: PaginationMode,
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_page_size() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}
