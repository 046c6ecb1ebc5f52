use std::sync::Arc;

use jobwatch_core::{update, DashboardConfig, DashboardState, Effect, Msg};
use jobwatch_logging::{set_refresh_tick, watch_debug, watch_error, watch_info};
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};
use tokio_util::sync::CancellationToken;

use crate::{DashboardUi, MonitorClient, Scheduler, Transport};

/// What arrives in the dashboard's inbox.
#[derive(Debug)]
enum Inbound {
    Input(Msg),
    /// The runtime wrote the location; report whatever it holds when handled.
    HashWritten,
}

/// Cloneable entry point for user input (selector changes, page and notice
/// clicks, address-bar navigation).
#[derive(Debug, Clone)]
pub struct DashboardHandle {
    tx: mpsc::UnboundedSender<Inbound>,
}

impl DashboardHandle {
    /// Returns false once the dashboard is gone. A `Msg::HashChanged` also
    /// moves the host's location to the given hash.
    pub fn send(&self, msg: Msg) -> bool {
        self.tx.send(Inbound::Input(msg)).is_ok()
    }
}

/// Owns the dashboard state and carries out the effects `update` asks for.
///
/// Everything runs on one task: messages are applied one at a time, and each
/// fetch runs as its own task whose answer is queued as the next message.
/// Fetches are never cancelled or ordered; whichever answer arrives last is
/// what stays on screen.
pub struct Dashboard<T, U> {
    state: DashboardState,
    client: Arc<MonitorClient<T>>,
    ui: U,
    in_flight: JoinSet<Msg>,
    msg_tx: mpsc::UnboundedSender<Inbound>,
    msg_rx: mpsc::UnboundedReceiver<Inbound>,
}

impl<T, U> Dashboard<T, U>
where
    T: Transport + 'static,
    U: DashboardUi,
{
    pub fn new(config: DashboardConfig, client: MonitorClient<T>, ui: U) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        Self {
            state: DashboardState::new(config),
            client: Arc::new(client),
            ui,
            in_flight: JoinSet::new(),
            msg_tx,
            msg_rx,
        }
    }

    pub fn handle(&self) -> DashboardHandle {
        DashboardHandle {
            tx: self.msg_tx.clone(),
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    /// Announces the host with the hash currently in the address bar.
    pub fn start(&mut self) {
        let hash = self.ui.hash();
        watch_info!("dashboard starting at {:?}", hash);
        self.dispatch(Msg::Started { hash });
    }

    pub fn dispatch(&mut self, msg: Msg) {
        if matches!(msg, Msg::Tick) {
            set_refresh_tick(self.state.ticks() + 1);
        }
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        for effect in effects {
            self.apply(effect);
        }
    }

    /// Processes queued messages and in-flight fetches until none are left.
    pub async fn settle(&mut self) {
        loop {
            if let Ok(inbound) = self.msg_rx.try_recv() {
                self.receive(inbound);
                continue;
            }
            match self.in_flight.join_next().await {
                Some(done) => self.complete(done),
                None => break,
            }
        }
    }

    /// Drives the dashboard until `shutdown` fires.
    pub async fn run<S: Scheduler>(&mut self, mut scheduler: S, shutdown: CancellationToken) {
        self.start();
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = scheduler.tick() => self.dispatch(Msg::Tick),
                Some(inbound) = self.msg_rx.recv() => self.receive(inbound),
                Some(done) = self.in_flight.join_next() => self.complete(done),
            }
        }
        watch_info!(
            "dashboard stopping with {} request(s) in flight",
            self.in_flight.len()
        );
        self.in_flight.abort_all();
    }

    fn receive(&mut self, inbound: Inbound) {
        match inbound {
            Inbound::Input(Msg::HashChanged(hash)) => {
                if self.ui.hash() != hash {
                    self.ui.set_hash(&hash);
                }
                self.dispatch(Msg::HashChanged(self.ui.hash()));
            }
            Inbound::Input(msg) => self.dispatch(msg),
            // Several writes may be queued; each reads the location as it is now.
            Inbound::HashWritten => self.dispatch(Msg::HashChanged(self.ui.hash())),
        }
    }

    fn complete(&mut self, done: Result<Msg, JoinError>) {
        match done {
            Ok(msg) => self.dispatch(msg),
            Err(err) => watch_error!("fetch task ended abnormally: {}", err),
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Fetch(request) => {
                watch_debug!("fetch {}", request.target());
                let client = Arc::clone(&self.client);
                self.in_flight
                    .spawn(async move { client.execute(request).await });
            }
            Effect::SetHash(hash) => {
                self.ui.set_hash(&hash);
                // Stands in for the browser's hashchange event.
                let _ = self.msg_tx.send(Inbound::HashWritten);
            }
            Effect::SetControls(filter) => self.ui.set(&filter),
            Effect::PopulateOptions { control, options } => {
                self.ui.set_options(control, &options)
            }
            Effect::DestroyPager => self.ui.destroy(),
            Effect::ConfigurePager(config) => self.ui.configure(&config),
            Effect::Render(view) => self.ui.render(&view),
        }
    }
}
