use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use super::ContentStore;
use crate::error::{FaqdeskError, Result};

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Documents fetched over HTTP from a base URL, e.g. a public bucket or a
/// static file host. Keys append to the base path.
pub struct HttpStore {
    base: String,
    client: reqwest::Client,
}

impl HttpStore {
    pub fn new(base: impl Into<String>) -> Result<Self> {
        let base = base.into().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| FaqdeskError::Config(format!("http store client: {e}")))?;
        Ok(Self { base, client })
    }

    pub(super) fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.base, key.trim_start_matches('/'))
    }
}

#[async_trait]
impl ContentStore for HttpStore {
    async fn fetch(&self, key: &str) -> Result<Vec<u8>> {
        let url = self.url_for(key);
        let response = self.client.get(&url).send().await.map_err(|e| {
            FaqdeskError::StoreRead {
                key: key.to_string(),
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FaqdeskError::DocumentNotFound(key.to_string()));
        }
        if !status.is_success() {
            return Err(FaqdeskError::StoreRead {
                key: key.to_string(),
                reason: format!("unexpected status {status}"),
            });
        }

        let bytes = response.bytes().await.map_err(|e| FaqdeskError::StoreRead {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        Ok(bytes.to_vec())
    }
}
