/// Count and newest id reported by the paginate endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageTotals {
    pub count: u64,
    pub max_index: u64,
}

/// Result of one pagination fetch. Replaced as a whole, never patched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationSnapshot {
    /// Highest job id that existed when the count was taken. Page loads and
    /// new-job checks are bounded by it.
    pub max_index: u64,
    pub total_count: u64,
    pub page_size: u32,
}

impl PaginationSnapshot {
    pub fn new(totals: PageTotals, page_size: u32) -> Self {
        Self {
            max_index: totals.max_index,
            total_count: totals.count,
            page_size: page_size.max(1),
        }
    }

    pub fn page_count(&self) -> u64 {
        page_count(self.total_count, self.page_size)
    }
}

/// Number of pages needed for `total_count` rows; a partial last page counts.
pub fn page_count(total_count: u64, page_size: u32) -> u64 {
    let page_size = u64::from(page_size.max(1));
    let full = total_count / page_size;
    full + u64::from(total_count % page_size != 0)
}
