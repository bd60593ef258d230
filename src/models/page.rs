use super::{MessageResponse, PostResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PageQuery {
    /// 1-based page number (default: 1)
    #[schema(example = 1)]
    pub page: Option<u64>,
    /// Items per page (default: 20, max: 100)
    #[schema(example = 20)]
    pub size: Option<u64>,
}

impl PageQuery {
    /// Page number and size with defaults applied and bounds enforced.
    pub fn resolve(&self) -> (u64, u64) {
        let page = self.page.unwrap_or(1).max(1);
        let size = self
            .size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        (page, size)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[aliases(PostPage = PagedResponse<PostResponse>, MessagePage = PagedResponse<MessageResponse>)]
pub struct PagedResponse<T> {
    pub content: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> PagedResponse<T> {
    pub fn empty(page: u64, size: u64) -> Self {
        PagedResponse {
            content: Vec::new(),
            page,
            size,
            total_elements: 0,
            total_pages: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        assert_eq!(PageQuery::default().resolve(), (1, DEFAULT_PAGE_SIZE));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let query = PageQuery {
            page: Some(0),
            size: Some(10_000),
        };
        assert_eq!(query.resolve(), (1, MAX_PAGE_SIZE));

        let query = PageQuery {
            page: Some(3),
            size: Some(0),
        };
        assert_eq!(query.resolve(), (3, 1));
    }
}
