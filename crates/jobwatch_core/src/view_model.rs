use crate::pagination::PaginationSnapshot;
use crate::query::Filter;
use crate::state::{JobPage, PagerConfig, QueueStat};

/// A panel to (re)draw, handed to the renderer together with its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    QueueStats(Vec<QueueStat>),
    JobList(JobPage),
    /// `None` hides the notice.
    NewJobsNotice(Option<String>),
}

/// Read-only snapshot of the whole dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardView {
    pub hash: String,
    pub controls: Filter,
    pub applied: Option<Filter>,
    pub engine_options: Vec<String>,
    pub initialized: bool,
    pub pagination: Option<PaginationSnapshot>,
    pub page_count: u64,
    pub pager: Option<PagerConfig>,
    pub notice: Option<String>,
    pub stats: Vec<QueueStat>,
    pub jobs: Option<JobPage>,
    pub ticks: u64,
}
