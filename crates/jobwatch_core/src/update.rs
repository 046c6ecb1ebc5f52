use jobwatch_logging::{watch_debug, watch_info, watch_warn};

use crate::effect::{Control, Effect, Request};
use crate::pagination::{PageTotals, PaginationSnapshot};
use crate::query::{filter_from_hash, hash_for, Filter, ANY};
use crate::state::{Baseline, DashboardState, QueueStat};
use crate::view_model::View;
use crate::Msg;

/// Pure update function: applies a message to state and returns any effects.
///
/// Responses are applied in the order they complete, not the order their
/// requests were issued. Two overlapping fetches of the same resource can
/// therefore briefly show the older answer until the next refresh.
pub fn update(mut state: DashboardState, msg: Msg) -> (DashboardState, Vec<Effect>) {
    let mut effects = Vec::new();
    match msg {
        Msg::Started { hash } => {
            state.set_hash(hash);
            effects.push(Effect::PopulateOptions {
                control: Control::Status,
                options: state.status_options(),
            });
            effects.push(Effect::SetControls(state.controls().clone()));
        }
        Msg::Tick => {
            let tick = state.advance_tick();
            watch_debug!(
                "refresh tick {} (initialized={})",
                tick,
                state.is_initialized()
            );
            effects.push(Effect::Fetch(Request::QueueStats));
            if state.is_initialized() {
                check_for_new_jobs(&state, &mut effects);
            }
        }
        Msg::QueueStatsLoaded(stats) => apply_queue_stats(&mut state, stats, &mut effects),
        Msg::HashChanged(hash) => {
            state.set_hash(hash);
            // Until the engine options exist the hash cannot be validated; the
            // first stats response applies whatever hash is current by then.
            if state.is_initialized() {
                apply_url_state(&mut state, false, &mut effects);
            }
        }
        Msg::StatusSelected(status) => {
            let filter = state.controls().clone().with_status(status);
            state.set_controls(filter);
            write_hash(&mut state, &mut effects);
        }
        Msg::EngineSelected(engine) => {
            let filter = state.controls().clone().with_engine(engine);
            state.set_controls(filter);
            write_hash(&mut state, &mut effects);
        }
        Msg::PaginationLoaded { filter, totals } => {
            apply_pagination(&mut state, filter, totals, &mut effects)
        }
        Msg::NewJobsCounted {
            filter,
            min_id,
            count,
        } => {
            watch_debug!("{} job(s) with id >= {} for {:?}", count, min_id, filter);
            if !counts_against_baseline(&state, &filter, min_id) {
                watch_debug!("dropping new-job count taken against an older baseline");
            } else if count > 0 {
                state.set_new_jobs(count);
                let notice = new_jobs_text(count);
                effects.push(Effect::Render(View::NewJobsNotice(Some(notice))));
            }
        }
        Msg::PageSelected { generation, page } => {
            select_page(&state, generation, page, &mut effects)
        }
        Msg::JobsLoaded(page) => {
            state.set_jobs(page.clone());
            effects.push(Effect::Render(View::JobList(page)));
        }
        Msg::NoticeDismissed => {
            if state.clear_new_jobs() {
                effects.push(Effect::Render(View::NewJobsNotice(None)));
            }
            refresh_pagination(&mut state, &mut effects);
        }
        Msg::FetchFailed { request, reason } => {
            watch_warn!("{} <{}>", request.target(), reason);
        }
    }

    (state, effects)
}

/// Text of the new-jobs notice.
pub fn new_jobs_text(count: u64) -> String {
    if count == 1 {
        "One new job".to_string()
    } else {
        format!("{count} new jobs")
    }
}

fn apply_queue_stats(
    state: &mut DashboardState,
    stats: Vec<QueueStat>,
    effects: &mut Vec<Effect>,
) {
    state.set_stats(stats.clone());
    let first = !state.is_initialized();
    if first {
        // Options first: the hash may name an engine that must already be selectable.
        let mut engines: Vec<String> = Vec::with_capacity(stats.len());
        for stat in &stats {
            if !engines.contains(&stat.engine) {
                engines.push(stat.engine.clone());
            }
        }
        watch_info!("engines available: {:?}", engines);
        state.set_engine_options(engines);
        effects.push(Effect::Render(View::QueueStats(stats)));
        effects.push(Effect::PopulateOptions {
            control: Control::Engine,
            options: state.engine_options(),
        });
        apply_url_state(state, true, effects);
        state.mark_initialized();
    } else {
        effects.push(Effect::Render(View::QueueStats(stats)));
    }
}

/// Reconciles the controls with the current hash and refreshes pagination
/// when the effective filter moved (or when `force_refresh` is set).
fn apply_url_state(state: &mut DashboardState, force_refresh: bool, effects: &mut Vec<Effect>) {
    let mut decoded = filter_from_hash(state.hash());
    if !state.is_known_engine(&decoded.engine) {
        watch_warn!("hash names unknown engine {:?}; using {}", decoded.engine, ANY);
        decoded.engine = ANY.to_string();
    }

    let controls_changed = *state.controls() != decoded;
    if controls_changed {
        state.set_controls(decoded.clone());
        effects.push(Effect::SetControls(decoded.clone()));
    }

    let filter_changed = state.applied() != Some(&decoded);
    if controls_changed || filter_changed || force_refresh {
        refresh_pagination(state, effects);
    }
}

/// Selector changes only write the hash; the resulting `HashChanged` is the
/// one path that refetches.
fn write_hash(state: &mut DashboardState, effects: &mut Vec<Effect>) {
    let hash = hash_for(state.controls());
    if hash != state.hash() {
        state.set_hash(hash.clone());
        effects.push(Effect::SetHash(hash));
    }
}

fn refresh_pagination(state: &mut DashboardState, effects: &mut Vec<Effect>) {
    let filter = state.controls().clone();
    watch_debug!("refreshing pagination for {:?}", filter);
    state.set_applied(filter.clone());
    effects.push(Effect::Fetch(Request::Pagination { filter }));
}

fn apply_pagination(
    state: &mut DashboardState,
    filter: Filter,
    totals: PageTotals,
    effects: &mut Vec<Effect>,
) {
    if state.applied() != Some(&filter) {
        watch_debug!("applying pagination for superseded filter {:?}", filter);
    }
    let page_size = state.config().page_size;
    let snapshot = PaginationSnapshot::new(totals, page_size);
    let pages = snapshot.page_count();

    // The old pager's page handler must be gone before a new one exists.
    if state.take_pager().is_some() {
        effects.push(Effect::DestroyPager);
    }

    if pages > 0 {
        let pager = state.install_pager(pages);
        effects.push(Effect::ConfigurePager(pager));
        // A freshly configured pager starts on page 1.
        effects.push(Effect::Fetch(Request::Jobs {
            max_index: snapshot.max_index,
            page_size: snapshot.page_size,
            page: 1,
            filter: filter.clone(),
        }));
    } else {
        effects.push(Effect::Fetch(Request::Jobs {
            max_index: 0,
            page_size: snapshot.page_size,
            page: 1,
            filter: filter.clone(),
        }));
    }

    state.set_baseline(Baseline { filter, snapshot });
    if state.clear_new_jobs() {
        effects.push(Effect::Render(View::NewJobsNotice(None)));
    }
}

fn select_page(state: &DashboardState, generation: u64, page: u64, effects: &mut Vec<Effect>) {
    let (Some(pager), Some(baseline)) = (state.pager(), state.baseline()) else {
        watch_debug!("page {} selected with no pager configured", page);
        return;
    };
    if pager.generation != generation {
        watch_debug!(
            "dropping page {} from stale pager {} (current {})",
            page,
            generation,
            pager.generation
        );
        return;
    }
    if page == 0 || page > pager.total_pages {
        watch_debug!("page {} out of range 1..={}", page, pager.total_pages);
        return;
    }
    effects.push(Effect::Fetch(Request::Jobs {
        max_index: baseline.snapshot.max_index,
        page_size: baseline.snapshot.page_size,
        page,
        filter: baseline.filter.clone(),
    }));
}

/// A count only means something for the baseline it was requested against.
fn counts_against_baseline(state: &DashboardState, filter: &Filter, min_id: u64) -> bool {
    state.baseline().is_some_and(|baseline| {
        baseline.filter == *filter && baseline.snapshot.max_index + 1 == min_id
    })
}

fn check_for_new_jobs(state: &DashboardState, effects: &mut Vec<Effect>) {
    let Some(baseline) = state.baseline() else {
        return;
    };
    effects.push(Effect::Fetch(Request::NewJobCount {
        filter: baseline.filter.clone(),
        min_id: baseline.snapshot.max_index + 1,
    }));
}
