//! List windowing

use serde::Deserialize;

/// Maximum number of notes a single list call may return.
pub const MAX_PAGE_LIMIT: u32 = 1000;

/// Limit used when the caller does not give one.
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// A window over the notes table in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Page {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

impl Page {
    pub fn new(limit: u32, offset: u64) -> Self {
        Self { limit, offset }
    }

    /// A page is bounded when it asks for at least one and at most
    /// `MAX_PAGE_LIMIT` rows.
    pub fn is_bounded(&self) -> bool {
        self.limit > 0 && self.limit <= MAX_PAGE_LIMIT
    }
}
