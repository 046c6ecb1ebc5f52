use crate::effect::Request;
use crate::pagination::PageTotals;
use crate::query::Filter;
use crate::state::{JobPage, QueueStat};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Host is up; carries the address-bar hash at startup.
    Started { hash: String },
    /// Refresh timer fired.
    Tick,
    /// Queue statistics arrived.
    QueueStatsLoaded(Vec<QueueStat>),
    /// The address-bar hash changed, by navigation or by our own write.
    HashChanged(String),
    /// User picked a value in the status selector.
    StatusSelected(String),
    /// User picked a value in the engine selector.
    EngineSelected(String),
    /// Pagination totals for `filter` arrived.
    PaginationLoaded { filter: Filter, totals: PageTotals },
    /// Count of jobs at or above `min_id` for `filter` arrived.
    NewJobsCounted {
        filter: Filter,
        min_id: u64,
        count: u64,
    },
    /// User clicked a page link on the pager identified by `generation`.
    PageSelected { generation: u64, page: u64 },
    /// One page of jobs arrived.
    JobsLoaded(JobPage),
    /// User clicked the new-jobs notice.
    NoticeDismissed,
    /// A request failed in transport or decoding.
    FetchFailed { request: Request, reason: String },
}
