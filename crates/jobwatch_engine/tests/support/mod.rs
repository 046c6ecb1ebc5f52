#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};

use jobwatch_core::{Control, Filter, PagerConfig, View};
use jobwatch_engine::{
    FailureKind, FetchError, FilterControls, Location, Pager, Renderer, Transport,
};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(jobwatch_logging::initialize_for_tests);
}

/// Canned answers keyed by request target; unknown targets answer 404.
#[derive(Clone, Default)]
pub struct MemoryTransport {
    routes: Arc<Mutex<HashMap<String, Result<serde_json::Value, FailureKind>>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(&self, target: &str, body: serde_json::Value) {
        self.routes
            .lock()
            .unwrap()
            .insert(target.to_string(), Ok(body));
    }

    pub fn fail(&self, target: &str, kind: FailureKind) {
        self.routes
            .lock()
            .unwrap()
            .insert(target.to_string(), Err(kind));
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn take_requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().drain(..).collect()
    }

    pub fn count(&self, target: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.as_str() == target)
            .count()
    }
}

#[async_trait::async_trait]
impl Transport for MemoryTransport {
    async fn get_json(&self, target: &str) -> Result<serde_json::Value, FetchError> {
        self.requests.lock().unwrap().push(target.to_string());
        let answer = self.routes.lock().unwrap().get(target).cloned();
        match answer {
            Some(Ok(body)) => Ok(body),
            Some(Err(kind)) => Err(FetchError {
                kind,
                target: target.to_string(),
                message: "canned failure".to_string(),
            }),
            None => Err(FetchError {
                kind: FailureKind::HttpStatus(404),
                target: target.to_string(),
                message: "no route".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Options(Control, Vec<String>),
    Controls(Filter),
    PagerConfigured(PagerConfig),
    PagerDestroyed,
    Rendered(View),
    HashWritten(String),
}

/// Records everything the runtime asks of the host.
#[derive(Debug, Default)]
pub struct RecordingUi {
    pub hash: String,
    pub controls: Filter,
    pub pager: Option<PagerConfig>,
    pub events: Vec<UiEvent>,
}

impl RecordingUi {
    pub fn at(hash: &str) -> Self {
        Self {
            hash: hash.to_string(),
            ..Self::default()
        }
    }

    pub fn take_events(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn notices(&self) -> Vec<Option<String>> {
        self.events
            .iter()
            .filter_map(|e| match e {
                UiEvent::Rendered(View::NewJobsNotice(text)) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingUi {
    fn render(&mut self, view: &View) {
        self.events.push(UiEvent::Rendered(view.clone()));
    }
}

impl FilterControls for RecordingUi {
    fn set_options(&mut self, control: Control, options: &[String]) {
        self.events.push(UiEvent::Options(control, options.to_vec()));
    }

    fn set(&mut self, filter: &Filter) {
        self.controls = filter.clone();
        self.events.push(UiEvent::Controls(filter.clone()));
    }
}

impl Pager for RecordingUi {
    fn configure(&mut self, config: &PagerConfig) {
        assert!(self.pager.is_none(), "pager configured twice without destroy");
        self.pager = Some(*config);
        self.events.push(UiEvent::PagerConfigured(*config));
    }

    fn destroy(&mut self) {
        self.pager = None;
        self.events.push(UiEvent::PagerDestroyed);
    }
}

impl Location for RecordingUi {
    fn hash(&self) -> String {
        self.hash.clone()
    }

    fn set_hash(&mut self, hash: &str) {
        self.hash = hash.to_string();
        self.events.push(UiEvent::HashWritten(hash.to_string()));
    }
}
