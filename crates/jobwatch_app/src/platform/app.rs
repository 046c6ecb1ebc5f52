use std::io;

use anyhow::{Context, Result};
use jobwatch_engine::{
    every, Dashboard, DashboardHandle, FixtureTransport, MonitorClient, ReqwestTransport,
    Transport,
};
use jobwatch_logging::{watch_debug, watch_info, watch_warn};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

use super::commands::{parse_command, Command, HELP};
use super::config::{self, AppConfig, DataSource};
use super::logging;
use super::terminal::{SharedPager, TerminalUi};

pub fn run_app() -> Result<()> {
    let path = config::config_path();
    let config = config::load(&path)?;
    logging::initialize(config.log, &config.log_file, config.verbose);
    watch_info!("configuration from {}: {:?}", path.display(), config);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building the tokio runtime")?;

    runtime.block_on(async move {
        match config.data_source() {
            DataSource::Http(base_url) => {
                watch_info!("monitoring {}", base_url);
                let transport = ReqwestTransport::new(&config.client_settings())
                    .with_context(|| format!("invalid service url {base_url:?}"))?;
                run_dashboard(transport, &config).await;
            }
            DataSource::Fixtures(root) => {
                watch_info!("reading fixtures from {}", root.display());
                run_dashboard(FixtureTransport::new(root), &config).await;
            }
        }
        Ok::<(), anyhow::Error>(())
    })
}

async fn run_dashboard<T: Transport + 'static>(transport: T, config: &AppConfig) {
    let dashboard_config = config.dashboard_config();
    let refresh = dashboard_config.refresh_interval;
    let pager = SharedPager::default();
    let ui = TerminalUi::new(io::stdout(), &config.initial_hash, pager.clone());
    let mut dashboard = Dashboard::new(dashboard_config, MonitorClient::new(transport), ui);

    let shutdown = CancellationToken::new();
    spawn_ctrl_c(shutdown.clone());
    tokio::spawn(read_commands(dashboard.handle(), pager, shutdown.clone()));

    println!("{HELP}");
    dashboard.run(every(refresh), shutdown).await;
    watch_info!("dashboard stopped");
}

fn spawn_ctrl_c(shutdown: CancellationToken) {
    tokio::spawn(async move {
        tokio::select! {
            _ = shutdown.cancelled() => {}
            result = tokio::signal::ctrl_c() => {
                if let Err(err) = result {
                    watch_warn!("cannot listen for ctrl-c: {}", err);
                    return;
                }
                watch_info!("ctrl-c received");
                shutdown.cancel();
            }
        }
    });
}

/// Turns stdin lines into dashboard messages until `quit`, end of input, or
/// shutdown.
async fn read_commands(handle: DashboardHandle, pager: SharedPager, shutdown: CancellationToken) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            _ = shutdown.cancelled() => return,
            line = lines.next_line() => line,
        };
        let line = match line {
            Ok(Some(line)) => line,
            Ok(None) => {
                watch_debug!("stdin closed");
                break;
            }
            Err(err) => {
                watch_warn!("reading stdin failed: {}", err);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                println!("{err}; {HELP}");
                continue;
            }
        };
        match command {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            command => {
                let current = *pager
                    .lock()
                    .unwrap_or_else(std::sync::PoisonError::into_inner);
                match command.to_msg(current) {
                    Some(msg) => {
                        watch_debug!("command {:?} -> {:?}", command, msg);
                        if !handle.send(msg) {
                            break;
                        }
                    }
                    None => println!("no pages to choose from"),
                }
            }
        }
    }
    shutdown.cancel();
}
