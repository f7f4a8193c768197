use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// Page request for list operations. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// Rejects a zero page or zero limit.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.page == 0 {
            return Err(CatalogError::InvalidPagination(
                "page must be a positive integer".to_string(),
            ));
        }
        if self.limit == 0 {
            return Err(CatalogError::InvalidPagination(
                "limit must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of records to skip. Only meaningful after [`Pagination::validate`].
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    pub fn last_page(&self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.limit.max(1)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub total: u64,
    pub page: u32,
    pub last_page: u64,
}

/// One page of results plus the counts needed to walk the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub metadata: PageMetadata,
}
