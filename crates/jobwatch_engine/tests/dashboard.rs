mod support;

use jobwatch_core::{Control, DashboardConfig, Filter, Msg, View};
use jobwatch_engine::{Dashboard, FailureKind, MonitorClient};
use pretty_assertions::assert_eq;
use serde_json::json;
use support::{init_logging, MemoryTransport, RecordingUi, UiEvent};

fn service() -> MemoryTransport {
    let transport = MemoryTransport::new();
    transport.answer(
        "monitor/queues",
        json!({"Queues": {
            "ocr": {"RECEIVED": 3, "RUNNING": 1, "FAIL": 2, "SUCCESS": 19},
            "asr": {"RECEIVED": 0, "RUNNING": 0, "FAIL": 0, "SUCCESS": 0}
        }}),
    );
    transport.answer("monitor/jobs/paginate", json!({"count": 25, "max_index": 40}));
    transport.answer(
        "monitor/jobs/40/10/1",
        json!({"jobs": [{"id": 40, "engine": "ocr", "status": "SUCCESS"}]}),
    );
    transport
}

fn dashboard(
    transport: &MemoryTransport,
    hash: &str,
) -> Dashboard<MemoryTransport, RecordingUi> {
    Dashboard::new(
        DashboardConfig::default(),
        MonitorClient::new(transport.clone()),
        RecordingUi::at(hash),
    )
}

/// Startup plus one tick, fully settled.
async fn booted(
    transport: &MemoryTransport,
    hash: &str,
) -> Dashboard<MemoryTransport, RecordingUi> {
    let mut dashboard = dashboard(transport, hash);
    dashboard.start();
    dashboard.dispatch(Msg::Tick);
    dashboard.settle().await;
    dashboard
}

#[tokio::test]
async fn initial_load_builds_pager_and_first_page() {
    init_logging();
    let transport = service();
    let mut dashboard = booted(&transport, "#").await;

    assert_eq!(
        transport.requests(),
        vec![
            "monitor/queues".to_string(),
            "monitor/jobs/paginate".to_string(),
            "monitor/jobs/40/10/1".to_string(),
        ]
    );

    let events = dashboard.ui_mut().take_events();
    assert!(events.contains(&UiEvent::Options(
        Control::Engine,
        vec!["Any".to_string(), "asr".to_string(), "ocr".to_string()]
    )));
    let pager = dashboard.state().pager().expect("pager");
    assert_eq!(pager.total_pages, 3);
    assert!(events.contains(&UiEvent::PagerConfigured(pager)));

    let page = dashboard.state().view().jobs.expect("jobs rendered");
    assert_eq!(page.max_index, 40);
    assert_eq!(page.page, 1);
    assert_eq!(page.jobs[0].id, 40);
    assert!(events.contains(&UiEvent::Rendered(View::JobList(page))));
}

#[tokio::test]
async fn engine_selection_round_trips_through_hash() {
    init_logging();
    let transport = service();
    transport.answer(
        "monitor/jobs/paginate?eng=ocr",
        json!({"count": 12, "max_index": 39}),
    );
    transport.answer("monitor/jobs/39/10/1?eng=ocr", json!({"jobs": []}));
    let mut dashboard = booted(&transport, "#").await;
    transport.take_requests();
    dashboard.ui_mut().take_events();

    let handle = dashboard.handle();
    assert!(handle.send(Msg::EngineSelected("ocr".to_string())));
    dashboard.settle().await;

    assert_eq!(dashboard.ui().hash, "#?eng=ocr");
    assert_eq!(transport.count("monitor/jobs/paginate?eng=ocr"), 1);
    assert_eq!(
        transport.requests(),
        vec![
            "monitor/jobs/paginate?eng=ocr".to_string(),
            "monitor/jobs/39/10/1?eng=ocr".to_string(),
        ]
    );
    let events = dashboard.ui().events.clone();
    let destroyed = events
        .iter()
        .position(|e| *e == UiEvent::PagerDestroyed)
        .expect("old pager destroyed");
    let configured = events
        .iter()
        .position(|e| matches!(e, UiEvent::PagerConfigured(_)))
        .expect("new pager configured");
    assert!(destroyed < configured);
    assert_eq!(dashboard.ui().pager.unwrap().total_pages, 2);
}

#[tokio::test]
async fn bookmarked_hash_is_applied_after_engines_load() {
    init_logging();
    let transport = service();
    transport.answer(
        "monitor/jobs/paginate?st=FAIL&eng=ocr",
        json!({"count": 0, "max_index": null}),
    );
    transport.answer("monitor/jobs/0/10/1?st=FAIL&eng=ocr", json!({"jobs": null}));
    let dashboard = booted(&transport, "#?st=FAIL&eng=ocr").await;

    assert_eq!(dashboard.ui().controls, Filter::new("FAIL", "ocr"));
    assert_eq!(dashboard.ui().pager, None);
    assert_eq!(
        transport.requests(),
        vec![
            "monitor/queues".to_string(),
            "monitor/jobs/paginate?st=FAIL&eng=ocr".to_string(),
            "monitor/jobs/0/10/1?st=FAIL&eng=ocr".to_string(),
        ]
    );
}

#[tokio::test]
async fn new_jobs_notice_and_dismissal() {
    init_logging();
    let transport = service();
    transport.answer(
        "monitor/jobs/paginate?min-id=41",
        json!({"count": 3, "max_index": 43}),
    );
    let mut dashboard = booted(&transport, "#").await;
    transport.take_requests();

    dashboard.dispatch(Msg::Tick);
    dashboard.settle().await;
    // Both requests are in flight together; their order is not fixed.
    assert_eq!(transport.count("monitor/queues"), 1);
    assert_eq!(transport.count("monitor/jobs/paginate?min-id=41"), 1);
    assert_eq!(transport.take_requests().len(), 2);
    assert_eq!(dashboard.ui().notices(), vec![Some("3 new jobs".to_string())]);
    // The displayed page is untouched.
    assert_eq!(dashboard.state().view().jobs.unwrap().max_index, 40);

    transport.answer("monitor/jobs/paginate", json!({"count": 28, "max_index": 43}));
    transport.answer("monitor/jobs/43/10/1", json!({"jobs": []}));
    dashboard.handle().send(Msg::NoticeDismissed);
    dashboard.settle().await;

    assert_eq!(dashboard.state().view().notice, None);
    assert_eq!(dashboard.state().baseline().unwrap().snapshot.max_index, 43);
    assert_eq!(
        transport.take_requests(),
        vec![
            "monitor/jobs/paginate".to_string(),
            "monitor/jobs/43/10/1".to_string(),
        ]
    );
}

#[tokio::test]
async fn stats_failure_is_retried_on_next_tick() {
    init_logging();
    let transport = service();
    transport.fail("monitor/queues", FailureKind::Timeout);
    let mut dashboard = booted(&transport, "#").await;

    assert!(!dashboard.state().is_initialized());
    assert_eq!(transport.requests(), vec!["monitor/queues".to_string()]);
    assert!(dashboard
        .ui()
        .events
        .iter()
        .all(|e| !matches!(e, UiEvent::Rendered(_))));

    transport.answer("monitor/queues", json!({"Queues": {"ocr": {"FAIL": 1}}}));
    dashboard.dispatch(Msg::Tick);
    dashboard.settle().await;

    assert!(dashboard.state().is_initialized());
    assert_eq!(transport.count("monitor/jobs/paginate"), 1);
}

#[tokio::test]
async fn page_failure_keeps_previous_page() {
    init_logging();
    let transport = service();
    let mut dashboard = booted(&transport, "#").await;
    let before = dashboard.state().view().jobs;

    let generation = dashboard.state().pager().unwrap().generation;
    transport.fail("monitor/jobs/40/10/2", FailureKind::HttpStatus(500));
    dashboard.handle().send(Msg::PageSelected { generation, page: 2 });
    dashboard.settle().await;

    assert_eq!(transport.count("monitor/jobs/40/10/2"), 1);
    assert_eq!(dashboard.state().view().jobs, before);
}

#[tokio::test]
async fn malformed_pagination_answer_is_ignored() {
    init_logging();
    let transport = service();
    transport.answer("monitor/jobs/paginate", json!({"count": "lots"}));
    let dashboard = booted(&transport, "#").await;

    assert!(dashboard.state().is_initialized());
    assert!(dashboard.state().pager().is_none());
    assert_eq!(dashboard.state().baseline(), None);
}

#[tokio::test]
async fn back_to_back_selections_refresh_once_with_latest_hash() {
    init_logging();
    let transport = service();
    transport.answer(
        "monitor/jobs/paginate?st=FAIL&eng=ocr",
        json!({"count": 4, "max_index": 38}),
    );
    transport.answer("monitor/jobs/38/10/1?st=FAIL&eng=ocr", json!({"jobs": []}));
    let mut dashboard = booted(&transport, "#").await;
    transport.take_requests();
    dashboard.ui_mut().take_events();

    let handle = dashboard.handle();
    handle.send(Msg::StatusSelected("FAIL".to_string()));
    handle.send(Msg::EngineSelected("ocr".to_string()));
    dashboard.settle().await;

    assert_eq!(
        transport.requests(),
        vec![
            "monitor/jobs/paginate?st=FAIL&eng=ocr".to_string(),
            "monitor/jobs/38/10/1?st=FAIL&eng=ocr".to_string(),
        ]
    );
    let events = dashboard.ui().events.clone();
    assert!(events.iter().all(|e| !matches!(e, UiEvent::Controls(_))));
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, UiEvent::HashWritten(_)))
            .count(),
        2
    );
    assert_eq!(dashboard.state().hash(), "#?st=FAIL&eng=ocr");
    assert_eq!(
        dashboard.state().baseline().unwrap().filter,
        Filter::new("FAIL", "ocr")
    );
}

#[tokio::test]
async fn navigation_moves_the_host_location() {
    init_logging();
    let transport = service();
    transport.answer(
        "monitor/jobs/paginate?eng=asr",
        json!({"count": 0, "max_index": null}),
    );
    let mut dashboard = booted(&transport, "#").await;
    transport.take_requests();
    dashboard.ui_mut().take_events();

    dashboard.handle().send(Msg::HashChanged("#?eng=asr".to_string()));
    dashboard.settle().await;

    assert_eq!(dashboard.ui().hash, "#?eng=asr");
    assert_eq!(dashboard.ui().controls, Filter::any().with_engine("asr"));
    assert!(dashboard
        .ui()
        .events
        .contains(&UiEvent::HashWritten("#?eng=asr".to_string())));
    assert_eq!(transport.count("monitor/jobs/paginate?eng=asr"), 1);
}
