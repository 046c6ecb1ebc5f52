//! Terminal host for the job monitor dashboard.
mod app;
mod commands;
mod config;
mod logging;
mod terminal;

pub use app::run_app;
