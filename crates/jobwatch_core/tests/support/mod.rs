#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Once;

use jobwatch_core::{
    update, DashboardConfig, DashboardState, Effect, Filter, Msg, PageTotals, QueueStat, Request,
};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(jobwatch_logging::initialize_for_tests);
}

pub fn stat(engine: &str, pending: i64) -> QueueStat {
    let mut counters = BTreeMap::new();
    counters.insert("RECEIVED".to_string(), pending);
    counters.insert("FAIL".to_string(), 0);
    QueueStat {
        engine: engine.to_string(),
        counters,
    }
}

pub fn started(hash: &str) -> DashboardState {
    let (state, _) = update(
        DashboardState::new(DashboardConfig::default()),
        Msg::Started {
            hash: hash.to_string(),
        },
    );
    state
}

/// Runs startup plus the first stats response, returning the effects of the latter.
pub fn initialized(hash: &str, engines: &[&str]) -> (DashboardState, Vec<Effect>) {
    let state = started(hash);
    let stats = engines.iter().map(|e| stat(e, 1)).collect();
    update(state, Msg::QueueStatsLoaded(stats))
}

/// Startup, stats, and the pagination answer for the unfiltered view.
pub fn loaded(count: u64, max_index: u64) -> DashboardState {
    let (state, _) = initialized("#", &["ocr", "asr"]);
    let (state, _) = update(
        state,
        Msg::PaginationLoaded {
            filter: Filter::any(),
            totals: PageTotals { count, max_index },
        },
    );
    state
}

pub fn fetches(effects: &[Effect]) -> Vec<Request> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Fetch(request) => Some(request.clone()),
            _ => None,
        })
        .collect()
}

pub fn pagination_fetches(effects: &[Effect]) -> Vec<Filter> {
    fetches(effects)
        .into_iter()
        .filter_map(|request| match request {
            Request::Pagination { filter } => Some(filter),
            _ => None,
        })
        .collect()
}
