use std::time::Duration;

use jobwatch_logging::watch_trace;
use url::Url;

use crate::{FailureKind, FetchError};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Service root; request targets are resolved against it.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080/".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(20),
        }
    }
}

/// Fetches a monitor target and returns its JSON body.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn get_json(&self, target: &str) -> Result<serde_json::Value, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    base: Url,
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(settings: &ClientSettings) -> Result<Self, FetchError> {
        let mut base = Url::parse(&settings.base_url).map_err(|err| {
            FetchError::new(FailureKind::InvalidUrl, &settings.base_url, err.to_string())
        })?;
        // Without a trailing slash `join` would drop the last path segment.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| {
                FetchError::new(FailureKind::Network, &settings.base_url, err.to_string())
            })?;

        Ok(Self { base, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn get_json(&self, target: &str) -> Result<serde_json::Value, FetchError> {
        let url = self
            .base
            .join(target)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, target, err.to_string()))?;
        watch_trace!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| map_reqwest_error(target, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                target,
                status.to_string(),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| map_reqwest_error(target, err))?;
        serde_json::from_slice(&body)
            .map_err(|err| FetchError::new(FailureKind::Decode, target, err.to_string()))
    }
}

fn map_reqwest_error(target: &str, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, target, err.to_string());
    }
    FetchError::new(FailureKind::Network, target, err.to_string())
}
