//! Jobwatch engine: monitor API transport and the runtime that executes core effects.
mod client;
mod dashboard;
mod fixture;
mod scheduler;
mod transport;
mod types;
mod ui;
mod wire;

pub use client::MonitorClient;
pub use dashboard::{Dashboard, DashboardHandle};
pub use fixture::FixtureTransport;
pub use scheduler::{every, IntervalScheduler, Scheduler};
pub use transport::{ClientSettings, ReqwestTransport, Transport};
pub use types::{FailureKind, FetchError};
pub use ui::{DashboardUi, FilterControls, Location, Pager, Renderer};
pub use wire::{decode_job_page, decode_page_totals, decode_queue_stats};
