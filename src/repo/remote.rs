use std::time::Duration;

use anyhow::Context;

use async_trait::async_trait;

use reqwest::Client;

use secrecy::{ExposeSecret, Secret};

use serde::Deserialize;

use url::Url;

use crate::error::{Error, Result};
use crate::model::MonitorRecord;

use super::MonitorStorage;

/// Monitor collection stored under a single key of a Redis REST endpoint.
///
/// The value is string-only, so the collection is stored as its JSON
/// document encoded once more as a JSON string.
#[derive(Debug)]
pub struct RemoteStorage {
    client: Client,
    get_url: Url,
    set_url: Url,
    auth_token: Secret<String>,
}

/// Response envelope of the REST `get` command
#[derive(Debug, Deserialize)]
struct GetResponse {
    result: Option<String>,
}

impl RemoteStorage {
    pub fn new(
        base_url: Url,
        key: &str,
        auth_token: Secret<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build http client")?;

        let get_url = base_url
            .join(&format!("get/{}", key))
            .context("Failed to create storage read URL")?;
        let set_url = base_url
            .join(&format!("set/{}", key))
            .context("Failed to create storage write URL")?;

        Ok(Self {
            client,
            get_url,
            set_url,
            auth_token,
        })
    }
}

#[async_trait]
impl MonitorStorage for RemoteStorage {
    #[tracing::instrument(name = "Read monitors from remote store", skip(self), fields(url = %self.get_url))]
    async fn read_all(&self) -> Result<Vec<MonitorRecord>> {
        let response: GetResponse = self
            .client
            .get(self.get_url.clone())
            .bearer_auth(self.auth_token.expose_secret())
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(Error::StorageRequest)?
            .json()
            .await
            .map_err(Error::StorageRequest)?;

        match response.result {
            Some(encoded) => Ok(serde_json::from_str(&encoded)?),
            None => Ok(Vec::new()),
        }
    }

    #[tracing::instrument(name = "Write monitors to remote store", skip(self, monitors), fields(url = %self.set_url))]
    async fn write_all(&self, monitors: &[MonitorRecord]) -> Result<()> {
        let encoded = serde_json::to_string(monitors)?;

        self.client
            .post(self.set_url.clone())
            .bearer_auth(self.auth_token.expose_secret())
            .json(&encoded)
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(Error::StorageRequest)?;
        Ok(())
    }
}
