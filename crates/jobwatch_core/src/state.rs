use std::collections::BTreeMap;

use crate::config::DashboardConfig;
use crate::pagination::PaginationSnapshot;
use crate::query::{Filter, ANY};
use crate::update::new_jobs_text;
use crate::view_model::DashboardView;

/// Per-engine counters as reported by the queues endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueueStat {
    pub engine: String,
    /// Job count per status name.
    pub counters: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobRecord {
    pub id: u64,
    pub engine: Option<String>,
    pub status: Option<String>,
    pub created: Option<String>,
    pub started: Option<String>,
    pub finished: Option<String>,
    pub error: Option<String>,
    pub filename: Option<String>,
}

/// One page of jobs together with the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobPage {
    pub max_index: u64,
    pub page_size: u32,
    pub page: u64,
    pub filter: Filter,
    pub jobs: Vec<JobRecord>,
}

/// A configured pager. Page clicks carry `generation` so clicks from a
/// destroyed pager can be told apart and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerConfig {
    pub generation: u64,
    pub total_pages: u64,
    pub visible_pages: u32,
}

/// Pagination snapshot plus the filter it was counted under. Page loads and
/// new-job checks are anchored to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Baseline {
    pub filter: Filter,
    pub snapshot: PaginationSnapshot,
}

/// All mutable dashboard state, owned by the host runtime.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardState {
    config: DashboardConfig,
    /// Values currently shown by the selector controls.
    controls: Filter,
    /// Filter of the most recent pagination refresh.
    applied: Option<Filter>,
    engine_options: Vec<String>,
    hash: String,
    queues_inited: bool,
    baseline: Option<Baseline>,
    pager: Option<PagerConfig>,
    next_pager_generation: u64,
    new_jobs: Option<u64>,
    stats: Vec<QueueStat>,
    jobs: Option<JobPage>,
    ticks: u64,
}

impl DashboardState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn controls(&self) -> &Filter {
        &self.controls
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn is_initialized(&self) -> bool {
        self.queues_inited
    }

    pub fn baseline(&self) -> Option<&Baseline> {
        self.baseline.as_ref()
    }

    pub fn pager(&self) -> Option<PagerConfig> {
        self.pager
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn view(&self) -> DashboardView {
        let pagination = self.baseline.as_ref().map(|b| b.snapshot);
        DashboardView {
            hash: self.hash.clone(),
            controls: self.controls.clone(),
            applied: self.applied.clone(),
            engine_options: self.engine_options.clone(),
            initialized: self.queues_inited,
            pagination,
            page_count: pagination.map(|p| p.page_count()).unwrap_or(0),
            pager: self.pager,
            notice: self.new_jobs.map(new_jobs_text),
            stats: self.stats.clone(),
            jobs: self.jobs.clone(),
            ticks: self.ticks,
        }
    }

    pub(crate) fn status_options(&self) -> Vec<String> {
        with_any(self.config.status_options.iter().cloned())
    }

    pub(crate) fn engine_options(&self) -> Vec<String> {
        with_any(self.engine_options.iter().cloned())
    }

    pub(crate) fn set_engine_options(&mut self, engines: Vec<String>) {
        self.engine_options = engines;
    }

    /// An engine the selector does not offer cannot be selected; it reads as `Any`.
    pub(crate) fn is_known_engine(&self, engine: &str) -> bool {
        engine == ANY || self.engine_options.iter().any(|e| e == engine)
    }

    pub(crate) fn set_controls(&mut self, filter: Filter) {
        self.controls = filter;
    }

    pub(crate) fn applied(&self) -> Option<&Filter> {
        self.applied.as_ref()
    }

    pub(crate) fn set_applied(&mut self, filter: Filter) {
        self.applied = Some(filter);
    }

    pub(crate) fn set_hash(&mut self, hash: String) {
        self.hash = hash;
    }

    pub(crate) fn mark_initialized(&mut self) {
        self.queues_inited = true;
    }

    pub(crate) fn set_baseline(&mut self, baseline: Baseline) {
        self.baseline = Some(baseline);
    }

    pub(crate) fn take_pager(&mut self) -> Option<PagerConfig> {
        self.pager.take()
    }

    /// Registers a new pager under a fresh generation.
    pub(crate) fn install_pager(&mut self, total_pages: u64) -> PagerConfig {
        self.next_pager_generation += 1;
        let pager = PagerConfig {
            generation: self.next_pager_generation,
            total_pages,
            visible_pages: self.config.visible_pages,
        };
        self.pager = Some(pager);
        pager
    }

    pub(crate) fn set_new_jobs(&mut self, count: u64) {
        self.new_jobs = Some(count);
    }

    pub(crate) fn clear_new_jobs(&mut self) -> bool {
        self.new_jobs.take().is_some()
    }

    pub(crate) fn set_stats(&mut self, stats: Vec<QueueStat>) {
        self.stats = stats;
    }

    pub(crate) fn set_jobs(&mut self, page: JobPage) {
        self.jobs = Some(page);
    }

    pub(crate) fn advance_tick(&mut self) -> u64 {
        self.ticks += 1;
        self.ticks
    }
}

fn with_any(options: impl Iterator<Item = String>) -> Vec<String> {
    std::iter::once(ANY.to_string()).chain(options).collect()
}
