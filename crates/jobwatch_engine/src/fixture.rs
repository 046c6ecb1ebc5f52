use std::path::{Path, PathBuf};

use crate::{FailureKind, FetchError, Transport};

/// Serves monitor targets from canned JSON files under a directory, e.g.
/// `monitor/queues` or `monitor/jobs/40/2/1`. Query strings are ignored, the
/// way a static file server would.
#[derive(Debug, Clone)]
pub struct FixtureTransport {
    root: PathBuf,
}

impl FixtureTransport {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, target: &str) -> PathBuf {
        let path = target.split('?').next().unwrap_or(target);
        self.root.join(path.trim_start_matches('/'))
    }
}

#[async_trait::async_trait]
impl Transport for FixtureTransport {
    async fn get_json(&self, target: &str) -> Result<serde_json::Value, FetchError> {
        let path = self.path_for(target);
        let bytes = tokio::fs::read(&path).await.map_err(|err| {
            let kind = if err.kind() == std::io::ErrorKind::NotFound {
                FailureKind::HttpStatus(404)
            } else {
                FailureKind::Io
            };
            FetchError::new(kind, target, format!("{}: {}", path.display(), err))
        })?;
        serde_json::from_slice(&bytes)
            .map_err(|err| FetchError::new(FailureKind::Decode, target, err.to_string()))
    }
}
