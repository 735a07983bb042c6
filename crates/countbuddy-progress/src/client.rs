//! Typed HTTP client for the progress service.

use std::time::Duration;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ProgressError;
use crate::record::{NewKid, ProgressRecord, ProgressUpdate};

const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Client for the `/api/kids` endpoints.
pub struct ProgressClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    kind: String,
}

impl ProgressClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base = if base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            base_url: base.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub async fn list(&self) -> Result<Vec<ProgressRecord>, ProgressError> {
        self.send(self.client.get(self.url("/api/kids"))).await
    }

    pub async fn get(&self, id: Uuid) -> Result<ProgressRecord, ProgressError> {
        self.send(self.client.get(self.url(&format!("/api/kids/{id}"))))
            .await
    }

    pub async fn create(&self, kid_name: &str) -> Result<ProgressRecord, ProgressError> {
        let body = NewKid::named(kid_name);
        self.send(self.client.post(self.url("/api/kids")).json(&body))
            .await
    }

    pub async fn update_progress(
        &self,
        id: Uuid,
        update: &ProgressUpdate,
    ) -> Result<ProgressRecord, ProgressError> {
        let url = self.url(&format!("/api/kids/{id}/progress"));
        self.send(self.client.put(url).json(update)).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ProgressError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ProgressError::Network(format!("timed out after {DEFAULT_TIMEOUT_SECS}s"))
            } else if e.is_connect() {
                ProgressError::Network(format!(
                    "progress service not reachable at {}",
                    self.base_url
                ))
            } else {
                ProgressError::Network(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        if status >= 400 {
            let text = response.text().await.unwrap_or_default();
            return Err(match serde_json::from_str::<ErrorBody>(&text) {
                Ok(body) => ProgressError::from_wire(status, &body.kind, body.message),
                Err(_) => ProgressError::from_wire(status, "", text),
            });
        }

        response
            .json()
            .await
            .map_err(|e| ProgressError::Network(format!("failed to parse response: {e}")))
    }
}
