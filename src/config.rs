use std::{env, net::SocketAddr, time::Duration};

use anyhow::{Context, Result};
use tracing::warn;

pub const DEFAULT_TMDB_BASE: &str = "https://api.themoviedb.org/3";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_HOMEPAGE_LIMIT: usize = 8;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub tmdb: TmdbConfig,
    pub request_timeout: Duration,
    pub homepage_limit: usize,
}

/// What the catalog client needs to reach TMDB.
#[derive(Clone, Debug)]
pub struct TmdbConfig {
    pub base_url: String,
    pub api_token: String,
}

impl TmdbConfig {
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            api_token: api_token.into(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a port number")?;

        let base_url =
            env::var("TMDB_BASE_URL").unwrap_or_else(|_| DEFAULT_TMDB_BASE.to_string());
        let api_token = env::var("TMDB_API_TOKEN").unwrap_or_default();
        if api_token.trim().is_empty() {
            warn!("TMDB_API_TOKEN is not set - catalog requests will be rejected upstream");
        }

        let timeout_secs: u64 = env::var("TMDB_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let homepage_limit: usize = env::var("HOMEPAGE_LIMIT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_HOMEPAGE_LIMIT);

        Ok(Self {
            addr: format!("{host}:{port}")
                .parse()
                .context("HOST/PORT do not form a socket address")?,
            tmdb: TmdbConfig::new(base_url, api_token),
            request_timeout: Duration::from_secs(timeout_secs),
            homepage_limit,
        })
    }
}
