use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::TmdbError;

/// One authenticated GET returning a JSON body.
///
/// Implementations issue exactly one request per call and never retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get_json(&self, url: &str, bearer_token: &str) -> Result<Value, TmdbError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let user_agent = format!("moviedeck/{}", env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .context("Failed to build TMDB HTTP client")?;
        Ok(Self::from_client(client))
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get_json(&self, url: &str, bearer_token: &str) -> Result<Value, TmdbError> {
        debug!("GET {}", url);
        let res = self
            .client
            .get(url)
            .bearer_auth(bearer_token)
            .send()
            .await?;
        let status = res.status();
        if !status.is_success() {
            warn!("TMDB answered {} for {}", status, url);
            return Err(TmdbError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let bytes = res.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
