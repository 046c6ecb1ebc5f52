use crate::query::{encode, Filter};
use crate::state::PagerConfig;
use crate::view_model::View;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue a read against the monitor endpoints; the outcome comes back as a `Msg`.
    Fetch(Request),
    /// Write the address-bar hash. The host reports it back as `Msg::HashChanged`.
    SetHash(String),
    /// Move the selector controls to these values.
    SetControls(Filter),
    /// Replace a selector's option list.
    PopulateOptions { control: Control, options: Vec<String> },
    /// Tear down the current pager and its page handler.
    DestroyPager,
    ConfigurePager(PagerConfig),
    Render(View),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Status,
    Engine,
}

/// A read request against the monitor API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    QueueStats,
    /// Count and max id for a filter, used to (re)build the pager.
    Pagination { filter: Filter },
    /// Count of jobs at or above `min_id`, used for the new-jobs notice.
    NewJobCount { filter: Filter, min_id: u64 },
    Jobs {
        max_index: u64,
        page_size: u32,
        page: u64,
        filter: Filter,
    },
}

impl Request {
    /// Path relative to the service base URL, including the query string.
    pub fn target(&self) -> String {
        match self {
            Request::QueueStats => "monitor/queues".to_string(),
            Request::Pagination { filter } => {
                format!("monitor/jobs/paginate{}", encode(filter, 0))
            }
            Request::NewJobCount { filter, min_id } => {
                format!("monitor/jobs/paginate{}", encode(filter, *min_id))
            }
            Request::Jobs {
                max_index,
                page_size,
                page,
                filter,
            } => format!(
                "monitor/jobs/{max_index}/{page_size}/{page}{}",
                encode(filter, 0)
            ),
        }
    }
}
