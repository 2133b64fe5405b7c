use serde::Serialize;

pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const MAX_PAGE_LIMIT: u32 = 100;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u32,
    pub limit: u32,
    pub total_count: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Slice an already ordered list into one page.
///
/// Without a `page` the whole list is returned as a single page.
pub fn paginate<T>(items: Vec<T>, page: Option<u32>, limit: Option<u32>) -> PaginatedResponse<T> {
    let total_count = items.len() as u32;

    let (page, limit) = match page {
        Some(p) => (
            p.max(1),
            limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT),
        ),
        None => (1, total_count.max(1)),
    };

    let total_pages = total_count.div_ceil(limit);
    let offset = (page.saturating_sub(1) as usize).saturating_mul(limit as usize);

    let data: Vec<T> = items
        .into_iter()
        .skip(offset)
        .take(limit as usize)
        .collect();

    PaginatedResponse {
        data,
        pagination: PaginationMeta {
            page,
            limit,
            total_count,
            total_pages,
            has_next: page < total_pages,
            has_previous: page > 1,
        },
    }
}
