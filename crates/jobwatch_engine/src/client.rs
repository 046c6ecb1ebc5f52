use jobwatch_core::{Msg, Request};
use jobwatch_logging::watch_debug;

use crate::wire::{decode_job_page, decode_page_totals, decode_queue_stats};
use crate::{FailureKind, FetchError, Transport};

/// Executes core [`Request`]s over a [`Transport`] and turns the outcome into
/// the [`Msg`] the state machine expects.
#[derive(Debug, Clone)]
pub struct MonitorClient<T> {
    transport: T,
}

impl<T: Transport> MonitorClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Never fails: transport and decoding errors become `Msg::FetchFailed`.
    pub async fn execute(&self, request: Request) -> Msg {
        match self.fetch(&request).await {
            Ok(msg) => msg,
            Err(err) => Msg::FetchFailed {
                request,
                reason: format!("{}: {}", err.kind, err.message),
            },
        }
    }

    async fn fetch(&self, request: &Request) -> Result<Msg, FetchError> {
        let target = request.target();
        let body = self.transport.get_json(&target).await?;
        watch_debug!("{} answered", target);
        let decode_err =
            |err: serde_json::Error| FetchError::new(FailureKind::Decode, &target, err.to_string());

        let msg = match request {
            Request::QueueStats => {
                Msg::QueueStatsLoaded(decode_queue_stats(body).map_err(decode_err)?)
            }
            Request::Pagination { filter } => Msg::PaginationLoaded {
                filter: filter.clone(),
                totals: decode_page_totals(body).map_err(decode_err)?,
            },
            Request::NewJobCount { filter, min_id } => Msg::NewJobsCounted {
                filter: filter.clone(),
                min_id: *min_id,
                count: decode_page_totals(body).map_err(decode_err)?.count,
            },
            Request::Jobs {
                max_index,
                page_size,
                page,
                filter,
            } => Msg::JobsLoaded(
                decode_job_page(body, *max_index, *page_size, *page, filter.clone())
                    .map_err(decode_err)?,
            ),
        };
        Ok(msg)
    }
}
