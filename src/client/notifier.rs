//! HTTP calls from the client to the countdown server

use std::time::Duration;
use anyhow::{bail, Context, Result};
use reqwest::Client;
use tracing::debug;

use crate::{
    api::responses::StartRequest,
    state::{CountdownStatus, StartOutcome},
};

/// Talks to the countdown resource of one server
#[derive(Debug, Clone)]
pub struct ServerNotifier {
    client: Client,
    url: String,
}

impl ServerNotifier {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// GET the server's view of the countdown
    pub async fn fetch_status(&self) -> Result<CountdownStatus> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.url))?;

        if !response.status().is_success() {
            bail!("Server returned {} for status query", response.status());
        }

        let status = response
            .json::<CountdownStatus>()
            .await
            .context("Malformed status response")?;
        debug!("Server status: {:?}", status);
        Ok(status)
    }

    /// POST a start request for `end_time`
    pub async fn notify_start(&self, end_time: i64) -> Result<StartOutcome> {
        let response = self
            .client
            .post(&self.url)
            .json(&StartRequest::start(Some(end_time)))
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.url))?;

        if !response.status().is_success() {
            bail!("Server returned {} for start request", response.status());
        }

        let outcome = response
            .json::<StartOutcome>()
            .await
            .context("Malformed start response")?;
        debug!("Server accepted start: {:?}", outcome);
        Ok(outcome)
    }
}
