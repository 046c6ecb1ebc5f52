use std::time::Duration;

/// Tunables for the dashboard state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Jobs per page.
    pub page_size: u32,
    /// Page links shown at once by the pager.
    pub visible_pages: u32,
    /// Period between refresh ticks.
    pub refresh_interval: Duration,
    /// Job statuses offered by the status selector, besides `Any`.
    pub status_options: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            visible_pages: 5,
            refresh_interval: Duration::from_secs(10),
            status_options: ["RECEIVED", "RUNNING", "FAIL", "SUCCESS"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl DashboardConfig {
    /// Settings used against canned fixture files: the fixtures only hold a
    /// handful of jobs, so pages are kept small.
    pub fn for_fixtures() -> Self {
        Self {
            page_size: 2,
            ..Self::default()
        }
    }
}
