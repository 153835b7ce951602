use serde::Deserialize;

use crate::server::model::PageParams;

const DEFAULT_ENTRIES: u64 = 10;
const MAX_ENTRIES: u64 = 100;

pub(crate) fn default_entries() -> u64 {
    DEFAULT_ENTRIES
}

/// `?page=&entries=` query of paginated listings.
#[derive(Deserialize, Debug)]
pub struct PaginationParam {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
}

impl PaginationParam {
    /// Page request with `entries` clamped to `1..=100`.
    pub fn into_page(self) -> PageParams {
        PageParams {
            page: self.page,
            per_page: self.entries.clamp(1, MAX_ENTRIES),
        }
    }
}
