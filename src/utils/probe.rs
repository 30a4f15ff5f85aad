//! Pre-flight liveness check for the storefront server

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("could not reach {url}: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    BadStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Checks that the server under test answers before any browser work starts
#[async_trait]
pub trait LivenessProbe: Send + Sync {
    async fn check(&self, url: &str) -> Result<(), ProbeError>;
}

/// Liveness probe issuing a single GET with a short timeout
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    pub fn new(timeout: Duration) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl LivenessProbe for HttpProbe {
    async fn check(&self, url: &str) -> Result<(), ProbeError> {
        let started = std::time::Instant::now();
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ProbeError::Unreachable {
                url: url.to_string(),
                source,
            })?;

        log::debug!(
            "Liveness probe {} -> {} in {:?}",
            url,
            resp.status(),
            started.elapsed()
        );

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(ProbeError::BadStatus {
                url: url.to_string(),
                status: resp.status(),
            })
        }
    }
}
