//! JSON shapes returned by the monitor endpoints.
//!
//! The service builds rows straight from SQL results, so ids and counts may
//! arrive as numbers or as numeric strings, and an aggregate over no rows
//! comes back as `null`.

use std::collections::BTreeMap;

use jobwatch_core::{Filter, JobPage, JobRecord, PageTotals, QueueStat};
use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
struct QueuesBody {
    #[serde(rename = "Queues", default)]
    queues: BTreeMap<String, BTreeMap<String, Lenient>>,
}

#[derive(Debug, Deserialize)]
struct PaginateBody {
    #[serde(default, deserialize_with = "lenient_u64")]
    count: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    max_index: u64,
}

#[derive(Debug, Deserialize)]
struct JobsBody {
    #[serde(default)]
    jobs: Option<Vec<JobRow>>,
}

#[derive(Debug, Deserialize)]
struct JobRow {
    #[serde(default, deserialize_with = "lenient_u64")]
    id: u64,
    #[serde(default)]
    engine: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    created: Option<String>,
    #[serde(default)]
    started: Option<String>,
    #[serde(default)]
    finished: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    filename: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Lenient {
    Int(i64),
    Text(String),
    Float(f64),
}

impl Lenient {
    fn as_i64(&self) -> Option<i64> {
        match self {
            Lenient::Int(value) => Some(*value),
            Lenient::Text(text) => text.trim().parse().ok(),
            Lenient::Float(value) => Some(*value as i64),
        }
    }
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Lenient>::deserialize(deserializer)?;
    match value {
        None => Ok(0),
        Some(value) => value
            .as_i64()
            .and_then(|n| u64::try_from(n).ok())
            .ok_or_else(|| serde::de::Error::custom(format!("not a count: {value:?}"))),
    }
}

/// `{"Queues": {engine: {status: n}}}`, one entry per engine in name order.
pub fn decode_queue_stats(body: serde_json::Value) -> Result<Vec<QueueStat>, serde_json::Error> {
    let body: QueuesBody = serde_json::from_value(body)?;
    Ok(body
        .queues
        .into_iter()
        .map(|(engine, counters)| QueueStat {
            engine,
            counters: counters
                .into_iter()
                .filter_map(|(name, value)| value.as_i64().map(|n| (name, n)))
                .collect(),
        })
        .collect())
}

/// `{"count": n, "max_index": m}`; a null `max_index` means no matching jobs.
pub fn decode_page_totals(body: serde_json::Value) -> Result<PageTotals, serde_json::Error> {
    let body: PaginateBody = serde_json::from_value(body)?;
    Ok(PageTotals {
        count: body.count,
        max_index: body.max_index,
    })
}

/// `{"jobs": [...]}`, tagged with the request parameters that produced it.
pub fn decode_job_page(
    body: serde_json::Value,
    max_index: u64,
    page_size: u32,
    page: u64,
    filter: Filter,
) -> Result<JobPage, serde_json::Error> {
    let body: JobsBody = serde_json::from_value(body)?;
    let jobs = body
        .jobs
        .unwrap_or_default()
        .into_iter()
        .map(|row| JobRecord {
            id: row.id,
            engine: row.engine,
            status: row.status,
            created: row.created,
            started: row.started,
            finished: row.finished,
            error: row.error,
            filename: row.filename,
        })
        .collect();
    Ok(JobPage {
        max_index,
        page_size,
        page,
        filter,
        jobs,
    })
}
