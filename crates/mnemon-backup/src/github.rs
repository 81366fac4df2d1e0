use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use mnemon_core::{MnemonError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::remote::RemoteStore;

/// Remote store backed by the GitHub contents API.
///
/// `GET /repos/{repo}/contents/{path}` yields the current blob `sha` (the
/// revision token); `PUT` with base64 content and that `sha` updates the
/// blob, while a `PUT` without `sha` creates it. GitHub reports a stale or
/// missing `sha` for an existing file as 409/422.
pub struct GitHubRemote {
    client: Client,
    token: String,
    repo: String,
    base_url: String,
}

impl GitHubRemote {
    pub fn new(token: String, repo: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("mnemon/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MnemonError::RemoteBackup(e.to_string()))?;
        Ok(Self {
            client,
            token,
            repo,
            base_url: "https://api.github.com".into(),
        })
    }

    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    fn contents_url(&self, path: &str) -> String {
        format!("{}/repos/{}/contents/{}", self.base_url, self.repo, path)
    }
}

#[async_trait]
impl RemoteStore for GitHubRemote {
    async fn fetch_revision(&self, path: &str) -> Result<Option<String>> {
        debug!(%path, repo = %self.repo, "fetching remote revision");
        let resp = self
            .client
            .get(self.contents_url(path))
            .bearer_auth(&self.token)
            .header("accept", "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| MnemonError::RemoteBackup(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(MnemonError::RemoteBackup(format!("HTTP {status}: {text}")));
        }

        let data: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| MnemonError::RemoteBackup(e.to_string()))?;
        Ok(data["sha"].as_str().map(String::from))
    }

    async fn push(
        &self,
        path: &str,
        content: &[u8],
        message: &str,
        revision: Option<&str>,
    ) -> Result<String> {
        let mut body = serde_json::json!({
            "message": message,
            "content": BASE64.encode(content),
        });
        if let Some(rev) = revision {
            body["sha"] = serde_json::json!(rev);
        }

        debug!(%path, conditioned = revision.is_some(), "pushing remote blob");
        let resp = self
            .client
            .put(self.contents_url(path))
            .bearer_auth(&self.token)
            .header("accept", "application/vnd.github+json")
            .json(&body)
            .send()
            .await
            .map_err(|e| MnemonError::RemoteBackup(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::CONFLICT
            || status == reqwest::StatusCode::UNPROCESSABLE_ENTITY
        {
            let text = resp.text().await.unwrap_or_default();
            return Err(MnemonError::RemoteConflict {
                path: path.to_string(),
                reason: format!("HTTP {status}: {text}"),
            });
        }
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(MnemonError::RemoteBackup(format!("HTTP {status}: {text}")));
        }

        let data: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| MnemonError::RemoteBackup(e.to_string()))?;
        data["content"]["sha"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| {
                MnemonError::RemoteBackup("push response missing content sha".into())
            })
    }
}
