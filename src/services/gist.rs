//! GitHub gist backend

use std::collections::HashMap;
use async_trait::async_trait;
use reqwest::{
    header::{ACCEPT, AUTHORIZATION},
    Client,
};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::{error::StoreError, state::CountdownState};
use super::store::StateBackend;

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("shared-countdown/", env!("CARGO_PKG_VERSION"));

/// Stores the countdown record as one JSON file inside a gist
pub struct GistBackend {
    client: Client,
    url: String,
    token: String,
    file_name: String,
}

#[derive(Deserialize)]
struct Gist {
    #[serde(default)]
    files: HashMap<String, GistFile>,
}

#[derive(Deserialize)]
struct GistFile {
    #[serde(default)]
    content: Option<String>,
}

impl GistBackend {
    pub fn new(api_base: &str, gist_id: &str, token: &str, file_name: &str) -> Self {
        Self {
            client: Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_else(|_| Client::new()),
            url: format!("{}/gists/{}", api_base.trim_end_matches('/'), gist_id),
            token: token.to_string(),
            file_name: file_name.to_string(),
        }
    }

    fn authorization(&self) -> String {
        format!("token {}", self.token)
    }
}

#[async_trait]
impl StateBackend for GistBackend {
    fn name(&self) -> &'static str {
        "gist"
    }

    async fn load(&self) -> Result<CountdownState, StoreError> {
        debug!("Fetching gist {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header(AUTHORIZATION, self.authorization())
            .header(ACCEPT, GITHUB_ACCEPT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StoreError::Status(response.status()));
        }

        let gist: Gist = response.json().await?;
        let content = gist
            .files
            .get(&self.file_name)
            .ok_or_else(|| StoreError::MissingFile(self.file_name.clone()))?
            .content
            .as_deref()
            .unwrap_or_default();

        // An empty file means nothing has been stored yet
        if content.trim().is_empty() {
            return Ok(CountdownState::inactive());
        }

        Ok(serde_json::from_str(content)?)
    }

    async fn save(&self, state: &CountdownState) -> Result<(), StoreError> {
        let body = json!({
            "files": {
                &self.file_name: {
                    "content": serde_json::to_string(state)?
                }
            }
        });

        let response = self
            .client
            .patch(&self.url)
            .header(AUTHORIZATION, self.authorization())
            .header(ACCEPT, GITHUB_ACCEPT)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StoreError::Status(response.status()));
        }

        Ok(())
    }
}
