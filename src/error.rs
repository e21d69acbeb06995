use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::error;

/// Failure of a single catalog call.
#[derive(Debug, thiserror::Error)]
pub enum TmdbError {
    #[error("TMDB returned {status} for {url}")]
    Status { status: u16, url: String },
    #[error("request to TMDB failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("TMDB response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("TMDB response has no '{0}' field")]
    MissingField(&'static str),
}

impl TmdbError {
    /// HTTP status of the failed upstream response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            TmdbError::Status { status, .. } => Some(*status),
            TmdbError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: &'static str,
    source: anyhow::Error,
}

impl AppError {
    pub fn not_found(source: impl Into<anyhow::Error>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: "Movie not found.",
            source: source.into(),
        }
    }

    pub fn bad_request(message: &'static str, source: impl Into<anyhow::Error>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
            source: source.into(),
        }
    }

    /// Upstream 404 means the movie does not exist; anything else is a gateway failure.
    pub fn for_movie(err: TmdbError) -> Self {
        match err.status() {
            Some(404) => Self::not_found(err),
            _ => err.into(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.source.fmt(f)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: "The movie catalog is unavailable right now. Please try again later.",
            source: err,
        }
    }
}

impl From<TmdbError> for AppError {
    fn from(err: TmdbError) -> Self {
        Self::from(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Upstream detail stays in the log, never in the page.
        error!(status = %self.status, "Request failed: {:#}", self.source);
        let body = crate::templates::error_page(self.status, self.message);
        (self.status, Html(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
