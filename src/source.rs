//! Fetching raw documentation dumps.

use crate::config::ProjectConfig;
use crate::doc::{RawDocs, VersionKey};
use crate::error::FetchError;
use futures::future::BoxFuture;
use std::time::Duration;

/// Supplies the raw JSON dump for a project and branch.
pub trait DocSource: Send + Sync {
    fn fetch<'a>(
        &'a self,
        project: &'a ProjectConfig,
        key: &'a VersionKey,
    ) -> BoxFuture<'a, Result<RawDocs, FetchError>>;
}

/// Fetches dumps over HTTP from the project's configured source URL.
#[derive(Debug, Clone)]
pub struct HttpDocSource {
    client: reqwest::Client,
}

impl HttpDocSource {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    async fn fetch_url(&self, url: String) -> Result<RawDocs, FetchError> {
        tracing::debug!("Fetching {}", url);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(source) => return Err(FetchError::Network { url, source }),
        };

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound { url });
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(source) => return Err(FetchError::Network { url, source }),
        };
        Ok(serde_json::from_slice(&body)?)
    }
}

impl DocSource for HttpDocSource {
    fn fetch<'a>(
        &'a self,
        project: &'a ProjectConfig,
        key: &'a VersionKey,
    ) -> BoxFuture<'a, Result<RawDocs, FetchError>> {
        Box::pin(self.fetch_url(project.source_url(key)))
    }
}
