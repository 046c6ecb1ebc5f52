//! Jobwatch core: pure dashboard state machine, query encoding and view-model helpers.
mod config;
mod effect;
mod msg;
mod pagination;
mod query;
mod state;
mod update;
mod view_model;

pub use config::DashboardConfig;
pub use effect::{Control, Effect, Request};
pub use msg::Msg;
pub use pagination::{page_count, PageTotals, PaginationSnapshot};
pub use query::{decode, encode, filter_from_hash, hash_for, Filter, QueryParams, ANY};
pub use state::{Baseline, DashboardState, JobPage, JobRecord, PagerConfig, QueueStat};
pub use update::{new_jobs_text, update};
pub use view_model::{DashboardView, View};
