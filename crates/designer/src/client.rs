//! HTTP client for the design persistence API.
//!
//! Status codes map onto `DesignError`: 404 → `NotFound`, other 4xx →
//! `Validation`, everything else (including connection failures) → `Transport`.
//! Nothing is retried.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use shared::{CreateDesignRequest, Design, DesignError, DesignPatch, StoredDesign};

/// Default API location of the design server
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone)]
pub struct DesignClient {
    base_url: String,
    http: reqwest::Client,
}

impl DesignClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn designs_url(&self) -> String {
        format!("{}/api/designs", self.base_url)
    }

    fn design_url(&self, id: &str) -> String {
        format!("{}/api/designs/{}", self.base_url, id)
    }

    /// All saved designs, newest first
    pub async fn list(&self) -> Result<Vec<StoredDesign>, DesignError> {
        let response = self
            .http
            .get(self.designs_url())
            .send()
            .await
            .map_err(transport)?;
        decode(response, None).await
    }

    pub async fn get(&self, id: &str) -> Result<StoredDesign, DesignError> {
        let response = self
            .http
            .get(self.design_url(id))
            .send()
            .await
            .map_err(transport)?;
        decode(response, Some(id)).await
    }

    /// Save a snapshot as a new document
    pub async fn create(&self, design: &Design) -> Result<StoredDesign, DesignError> {
        let response = self
            .http
            .post(self.designs_url())
            .json(&CreateDesignRequest::from(design))
            .send()
            .await
            .map_err(transport)?;
        decode(response, None).await
    }

    pub async fn update(&self, id: &str, patch: &DesignPatch) -> Result<StoredDesign, DesignError> {
        let response = self
            .http
            .put(self.design_url(id))
            .json(patch)
            .send()
            .await
            .map_err(transport)?;
        decode(response, Some(id)).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), DesignError> {
        let response = self
            .http
            .delete(self.design_url(id))
            .send()
            .await
            .map_err(transport)?;
        decode::<serde_json::Value>(response, Some(id)).await?;
        Ok(())
    }
}

fn transport(err: reqwest::Error) -> DesignError {
    DesignError::Transport(err.to_string())
}

async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
    id: Option<&str>,
) -> Result<T, DesignError> {
    let status = response.status();
    if status.is_success() {
        return response.json::<T>().await.map_err(transport);
    }

    // Server error bodies carry either `error` or `message`
    let message = response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|body| {
            body.get("error")
                .or_else(|| body.get("message"))
                .and_then(|v| v.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| status.to_string());

    Err(match status {
        StatusCode::NOT_FOUND => DesignError::NotFound(id.unwrap_or(&message).to_string()),
        s if s.is_client_error() => DesignError::Validation(message),
        s => DesignError::Transport(format!("server returned {s}: {message}")),
    })
}
