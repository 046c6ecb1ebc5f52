use std::collections::BTreeSet;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use jobwatch_core::{Control, Filter, JobPage, JobRecord, PagerConfig, QueueStat, View, ANY};
use jobwatch_engine::{FilterControls, Location, Pager, Renderer};
use jobwatch_logging::watch_warn;

/// Pager shared with the command reader, which needs the live generation to
/// turn `page <n>` into a click.
pub type SharedPager = Arc<Mutex<Option<PagerConfig>>>;

/// Prints the dashboard as plain text lines.
pub struct TerminalUi<W: Write> {
    out: W,
    hash: String,
    pager: SharedPager,
}

impl<W: Write> TerminalUi<W> {
    pub fn new(out: W, initial_hash: impl Into<String>, pager: SharedPager) -> Self {
        Self {
            out,
            hash: initial_hash.into(),
            pager,
        }
    }

    fn emit(&mut self, lines: Vec<String>) {
        for line in lines {
            if let Err(err) = writeln!(self.out, "{line}") {
                watch_warn!("terminal write failed: {}", err);
                return;
            }
        }
        let _ = self.out.flush();
    }

    fn set_pager(&self, config: Option<PagerConfig>) {
        *self.pager.lock().unwrap_or_else(PoisonError::into_inner) = config;
    }
}

impl<W: Write> Renderer for TerminalUi<W> {
    fn render(&mut self, view: &View) {
        self.emit(render_view(view));
    }
}

impl<W: Write> FilterControls for TerminalUi<W> {
    fn set_options(&mut self, control: Control, options: &[String]) {
        let label = match control {
            Control::Status => "status",
            Control::Engine => "engine",
        };
        self.emit(vec![format!("{label} options: {}", options.join(", "))]);
    }

    fn set(&mut self, filter: &Filter) {
        self.emit(vec![format!("filter: {}", describe_filter(filter))]);
    }
}

impl<W: Write> Pager for TerminalUi<W> {
    fn configure(&mut self, config: &PagerConfig) {
        self.set_pager(Some(*config));
        self.emit(vec![format_pager(config)]);
    }

    fn destroy(&mut self) {
        self.set_pager(None);
    }
}

impl<W: Write> Location for TerminalUi<W> {
    fn hash(&self) -> String {
        self.hash.clone()
    }

    fn set_hash(&mut self, hash: &str) {
        self.hash = hash.to_string();
        self.emit(vec![format!("location: {hash}")]);
    }
}

pub fn render_view(view: &View) -> Vec<String> {
    match view {
        View::QueueStats(stats) => render_queue_stats(stats),
        View::JobList(page) => render_job_page(page),
        View::NewJobsNotice(Some(text)) => {
            vec![format!("*** {text} (type `dismiss` to refresh) ***")]
        }
        View::NewJobsNotice(None) => Vec::new(),
    }
}

fn render_queue_stats(stats: &[QueueStat]) -> Vec<String> {
    let columns: BTreeSet<&str> = stats
        .iter()
        .flat_map(|s| s.counters.keys().map(String::as_str))
        .collect();
    let width = stats
        .iter()
        .map(|s| s.engine.len())
        .max()
        .unwrap_or(0)
        .max("engine".len());

    let mut lines = Vec::with_capacity(stats.len() + 2);
    lines.push(format!("queues @ {}", Utc::now().format("%H:%M:%S")));
    let mut header = format!("  {:<width$}", "engine");
    for column in &columns {
        header.push_str(&format!(" {column:>10}"));
    }
    lines.push(header);
    for stat in stats {
        let mut row = format!("  {:<width$}", stat.engine);
        for column in &columns {
            let value = stat.counters.get(*column).copied().unwrap_or(0);
            row.push_str(&format!(" {:>10}", format_with_commas(value)));
        }
        lines.push(row);
    }
    lines
}

fn render_job_page(page: &JobPage) -> Vec<String> {
    let mut lines = Vec::with_capacity(page.jobs.len() + 1);
    lines.push(format!(
        "jobs: page {} ({}, ids <= {})",
        page.page,
        describe_filter(&page.filter),
        page.max_index
    ));
    if page.jobs.is_empty() {
        lines.push("  (no jobs)".to_string());
    }
    lines.extend(page.jobs.iter().map(format_job_row));
    lines
}

fn format_job_row(job: &JobRecord) -> String {
    let status = job.status.as_deref().unwrap_or("?");
    let engine = job.engine.as_deref().unwrap_or("?");
    let mut row = format!("  [#{}] {status:<8} {engine}", job.id);
    let latest = [&job.finished, &job.started, &job.created]
        .into_iter()
        .find_map(|stamp| stamp.as_deref());
    if let Some(when) = latest {
        row.push_str(&format!(" {when}"));
    }
    if let Some(filename) = job.filename.as_deref() {
        row.push_str(&format!(" {filename}"));
    }
    if let Some(error) = job.error.as_deref().filter(|e| !e.is_empty()) {
        row.push_str(&format!(" ({error})"));
    }
    row
}

fn format_pager(config: &PagerConfig) -> String {
    let shown = u64::from(config.visible_pages).min(config.total_pages);
    let links: Vec<String> = (1..=shown).map(|p| p.to_string()).collect();
    let more = if config.total_pages > shown { " .. >>" } else { "" };
    format!(
        "pages: {}{} of {} (type `page <n>`)",
        links.join(" "),
        more,
        config.total_pages
    )
}

fn describe_filter(filter: &Filter) -> String {
    if filter.is_unfiltered() {
        return "all jobs".to_string();
    }
    let mut parts = Vec::new();
    if filter.status != ANY {
        parts.push(format!("status={}", filter.status));
    }
    if filter.engine != ANY {
        parts.push(format!("engine={}", filter.engine));
    }
    parts.join(" ")
}

fn format_with_commas(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0 {
        out.push('-');
    }
    out.chars().rev().collect()
}
