use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::config::{Config, TmdbConfig};
use crate::error::TmdbError;
use crate::transport::{ReqwestTransport, Transport};

const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";
pub const POSTER_SIZE: &str = "w342";
pub const BACKDROP_SIZE: &str = "w780";

/// Read-only view of the movie catalog used by the web layer.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    async fn get_single_movie(&self, movie_id: u64) -> Result<Value, TmdbError>;
    async fn get_single_movie_cast(&self, movie_id: u64) -> Result<Value, TmdbError>;
    async fn get_movie_images(&self, movie_id: u64) -> Result<Value, TmdbError>;
    async fn get_movies_list(&self, list_type: &str) -> Result<Value, TmdbError>;
}

#[derive(Clone)]
pub struct TmdbClient {
    transport: Arc<dyn Transport>,
    config: TmdbConfig,
}

impl TmdbClient {
    pub fn new(transport: Arc<dyn Transport>, config: TmdbConfig) -> Self {
        Self { transport, config }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = ReqwestTransport::new(config.request_timeout)?;
        Ok(Self::new(Arc::new(transport), config.tmdb.clone()))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path)
    }

    async fn get(&self, path: &str) -> Result<Value, TmdbError> {
        let url = self.endpoint(path);
        self.transport.get_json(&url, &self.config.api_token).await
    }
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    async fn get_single_movie(&self, movie_id: u64) -> Result<Value, TmdbError> {
        self.get(&format!("movie/{movie_id}")).await
    }

    async fn get_single_movie_cast(&self, movie_id: u64) -> Result<Value, TmdbError> {
        let mut credits = self.get(&format!("movie/{movie_id}/credits")).await?;
        credits
            .get_mut("cast")
            .map(Value::take)
            .ok_or(TmdbError::MissingField("cast"))
    }

    async fn get_movie_images(&self, movie_id: u64) -> Result<Value, TmdbError> {
        self.get(&format!("movie/{movie_id}/images")).await
    }

    async fn get_movies_list(&self, list_type: &str) -> Result<Value, TmdbError> {
        self.get(&format!("movie/{}", urlencoding::encode(list_type)))
            .await
    }
}

/// Full URL of a TMDB image for the given size bucket (`w342`, `w780`, `original`, ...).
pub fn image_url(path: &str, size: &str) -> String {
    format!("{IMAGE_BASE}/{size}/{}", path.trim_start_matches('/'))
}
